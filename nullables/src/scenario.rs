//! Scenario builder: a runtime with one funded depositor and one instance.

use splitz_runtime::{Runtime, RuntimeError};
use splitz_types::{AccountId, AssetId, ContractId};

/// The usual starting point of a distribution test.
pub struct Scenario {
    pub runtime: Runtime,
    pub instance: ContractId,
    pub depositor: AccountId,
    pub payees: Vec<AccountId>,
}

impl Scenario {
    pub const DEPLOYER: &'static str = "deployer";
    pub const DEPOSITOR: &'static str = "depositor";

    /// A fresh instance over `payees`/`shares` and a depositor holding
    /// `funds` of every asset in `assets`.
    pub fn new(
        payees: &[(&str, u128)],
        assets: &[AssetId],
        funds: u128,
    ) -> Result<Self, RuntimeError> {
        let mut runtime = Runtime::new(AccountId::new(Self::DEPLOYER));
        let depositor = AccountId::new(Self::DEPOSITOR);
        for asset in assets {
            runtime.mint(&depositor, asset, funds)?;
        }
        let accounts: Vec<AccountId> = payees.iter().map(|(name, _)| AccountId::new(*name)).collect();
        let shares = payees.iter().map(|(_, share)| *share).collect();
        let instance = runtime.create_instance(accounts.clone(), shares)?;
        Ok(Self {
            runtime,
            instance,
            depositor,
            payees: accounts,
        })
    }

    /// Three payees at 30% / 50% / 20%, with native funds only.
    pub fn three_way() -> Result<Self, RuntimeError> {
        Self::new(
            &[("alice", 3000), ("bob", 5000), ("charlie", 2000)],
            &[AssetId::Native],
            1_000_000,
        )
    }

    /// Move `amount` of `asset` from the depositor into the instance.
    pub fn fund(&mut self, asset: &AssetId, amount: u128) -> Result<(), RuntimeError> {
        let custody = self.instance.account();
        self.runtime.transfer(&self.depositor, &custody, asset, amount)
    }

    pub fn payee(&self, index: usize) -> &AccountId {
        &self.payees[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_way_scenario() {
        let mut scenario = Scenario::three_way().unwrap();
        scenario.fund(&AssetId::Native, 2000).unwrap();
        let rt = &scenario.runtime;
        assert_eq!(
            rt.custody_balance(&scenario.instance, &AssetId::Native).unwrap(),
            2000
        );
        assert_eq!(
            rt.share_of(&scenario.instance, scenario.payee(1)).unwrap(),
            5000
        );
    }
}
