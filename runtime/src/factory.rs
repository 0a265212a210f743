//! Instance factory: the arena of independent distribution instances.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use splitz_ledger::{DistributionEngine, SplitError};
use splitz_types::{AccountId, ContractId, ContractKind};

/// Creates distribution instances and owns them, keyed by derived address.
///
/// Instances share no state. Every successful `create_instance` yields a
/// fresh address; nothing is deduplicated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstanceFactory {
    deployer: AccountId,
    nonce: u64,
    instances: HashMap<ContractId, DistributionEngine>,
    /// Creation order.
    created: Vec<ContractId>,
}

impl InstanceFactory {
    pub fn new(deployer: AccountId) -> Self {
        Self {
            deployer,
            nonce: 0,
            instances: HashMap::new(),
            created: Vec::new(),
        }
    }

    pub fn deployer(&self) -> &AccountId {
        &self.deployer
    }

    /// Validate `payees`/`shares` and register a new instance.
    ///
    /// The nonce only advances on success, so rejected payee lists consume no address.
    pub fn create_instance(
        &mut self,
        payees: Vec<AccountId>,
        shares: Vec<u128>,
    ) -> Result<ContractId, SplitError> {
        let id = ContractId::derive(ContractKind::Distribution, &self.deployer, self.nonce);
        let engine = DistributionEngine::with_payees(id, payees, shares)?;
        self.nonce = self.nonce.checked_add(1).ok_or(SplitError::Overflow)?;
        self.instances.insert(id, engine);
        self.created.push(id);
        Ok(id)
    }

    pub fn get(&self, id: &ContractId) -> Option<&DistributionEngine> {
        self.instances.get(id)
    }

    pub fn get_mut(&mut self, id: &ContractId) -> Option<&mut DistributionEngine> {
        self.instances.get_mut(id)
    }

    pub fn contains(&self, id: &ContractId) -> bool {
        self.instances.contains_key(id)
    }

    /// The instance whose custody account is `account`, if any.
    pub fn instance_for_account(&self, account: &AccountId) -> Option<ContractId> {
        account
            .as_str()
            .parse::<ContractId>()
            .ok()
            .filter(|id| self.instances.contains_key(id) && id.account() == *account)
    }

    /// Every instance id, in creation order.
    pub fn created(&self) -> &[ContractId] {
        &self.created
    }

    pub fn len(&self) -> usize {
        self.created.len()
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payees() -> Vec<AccountId> {
        vec![AccountId::new("alice"), AccountId::new("bob")]
    }

    #[test]
    fn test_each_call_creates_a_fresh_instance() {
        let mut factory = InstanceFactory::new(AccountId::new("deployer"));
        let first = factory.create_instance(payees(), vec![1, 1]).unwrap();
        let second = factory.create_instance(payees(), vec![1, 1]).unwrap();

        assert_ne!(first, second);
        assert_eq!(factory.created(), &[first, second]);
        assert_eq!(factory.get(&first).unwrap().id(), first);
        assert_eq!(factory.instance_for_account(&second.account()), Some(second));
    }

    #[test]
    fn test_rejected_payee_list_creates_nothing() {
        let mut factory = InstanceFactory::new(AccountId::new("deployer"));
        let err = factory.create_instance(payees(), vec![1, 0]).unwrap_err();
        assert!(matches!(err, SplitError::InvalidShare { .. }));
        assert!(factory.is_empty());

        // The failed attempt did not burn the first address.
        let id = factory.create_instance(payees(), vec![1, 1]).unwrap();
        assert_eq!(
            id,
            ContractId::derive(ContractKind::Distribution, &AccountId::new("deployer"), 0)
        );
    }

    #[test]
    fn test_unknown_accounts_map_to_no_instance() {
        let factory = InstanceFactory::new(AccountId::new("deployer"));
        assert_eq!(factory.instance_for_account(&AccountId::new("alice")), None);
        assert_eq!(factory.instance_for_account(&ContractId::ZERO.account()), None);
    }
}
