use proptest::prelude::*;

use splitz_ledger::{DistributionEngine, SplitError};
use splitz_types::{AccountId, AssetId, ContractId};

#[derive(Clone, Debug)]
enum Op {
    Deposit(AssetId, u128),
    Release(usize, AssetId),
}

fn asset_strategy() -> impl Strategy<Value = AssetId> {
    prop_oneof![Just(AssetId::Native), Just(AssetId::token("MCK"))]
}

fn op_strategy(payees: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (asset_strategy(), 0u128..1_000_000).prop_map(|(a, n)| Op::Deposit(a, n)),
        (0..payees, asset_strategy()).prop_map(|(i, a)| Op::Release(i, a)),
    ]
}

fn engine_with(shares: &[u128]) -> (DistributionEngine, Vec<AccountId>) {
    let payees: Vec<AccountId> = (0..shares.len())
        .map(|i| AccountId::new(format!("payee-{i}")))
        .collect();
    let engine =
        DistributionEngine::with_payees(ContractId::ZERO, payees.clone(), shares.to_vec()).unwrap();
    (engine, payees)
}

fn custody_of(custody: &[(AssetId, u128)], asset: &AssetId) -> u128 {
    custody
        .iter()
        .find(|(a, _)| a == asset)
        .map(|(_, c)| *c)
        .unwrap_or(0)
}

proptest! {
    /// No payee is ever paid beyond ⌊received × share / total⌋, and the
    /// per-payee counters always sum to the aggregate counter.
    #[test]
    fn test_released_never_exceeds_entitlement(
        shares in prop::collection::vec(1u128..10_000, 1..6),
        ops in prop::collection::vec(op_strategy(6), 1..60),
    ) {
        let (mut engine, payees) = engine_with(&shares);
        let total_shares: u128 = shares.iter().sum();
        let mut custody = vec![(AssetId::Native, 0u128), (AssetId::token("MCK"), 0u128)];

        for op in ops {
            match op {
                Op::Deposit(asset, amount) => {
                    let slot = custody.iter_mut().find(|(a, _)| *a == asset).unwrap();
                    slot.1 += amount;
                }
                Op::Release(index, asset) => {
                    let payee = &payees[index % payees.len()];
                    let held = custody_of(&custody, &asset);
                    match engine.commit_release(payee, &asset, held) {
                        Ok(payout) => {
                            prop_assert!(payout.amount > 0);
                            let slot = custody.iter_mut().find(|(a, _)| *a == asset).unwrap();
                            slot.1 -= payout.amount;
                        }
                        Err(SplitError::NoPaymentDue(_)) => {}
                        Err(e) => prop_assert!(false, "unexpected error: {e}"),
                    }
                }
            }

            for (asset, held) in &custody {
                let received = held + engine.total_released(asset);
                let mut sum = 0u128;
                for (payee, share) in payees.iter().zip(&shares) {
                    let released = engine.released(payee, asset);
                    prop_assert!(released <= received * share / total_shares);
                    sum += released;
                }
                prop_assert_eq!(sum, engine.total_released(asset));
            }
        }
    }

    /// A second release with no deposit in between fails and changes nothing.
    #[test]
    fn test_repeated_release_is_rejected(
        shares in prop::collection::vec(1u128..10_000, 1..6),
        deposit in 1u128..10_000_000,
        index in 0usize..6,
    ) {
        let (mut engine, payees) = engine_with(&shares);
        let payee = &payees[index % payees.len()];
        let mut custody = deposit;
        if let Ok(payout) = engine.commit_release(payee, &AssetId::Native, custody) {
            custody -= payout.amount;
        }
        let released = engine.released(payee, &AssetId::Native);
        let total = engine.total_released(&AssetId::Native);

        let second = engine.commit_release(payee, &AssetId::Native, custody);
        prop_assert_eq!(second.unwrap_err(), SplitError::NoPaymentDue(payee.clone()));
        prop_assert_eq!(engine.released(payee, &AssetId::Native), released);
        prop_assert_eq!(engine.total_released(&AssetId::Native), total);
    }

    /// Releasing every payee leaves at most (payees − 1) units of dust behind.
    #[test]
    fn test_full_release_leaves_only_dust(
        shares in prop::collection::vec(1u128..10_000, 1..6),
        deposit in 0u128..10_000_000,
    ) {
        let (mut engine, payees) = engine_with(&shares);
        let mut custody = deposit;
        for payee in &payees {
            if let Ok(payout) = engine.commit_release(payee, &AssetId::Native, custody) {
                custody -= payout.amount;
            }
        }
        prop_assert!(custody < payees.len() as u128);
        prop_assert_eq!(custody + engine.total_released(&AssetId::Native), deposit);
    }

    /// Availability is exact for balances whose product with a share no
    /// longer fits in `u128`, around and well above `u128::MAX / total_shares`.
    #[test]
    fn test_large_balances_are_exact(
        shares in prop::collection::vec(1u128..10_000, 1..6),
        scale in 1u128..4,
        offset in 0u128..1_000_000,
        index in 0usize..6,
    ) {
        let (mut engine, payees) = engine_with(&shares);
        let total_shares: u128 = shares.iter().sum();
        let custody = (u128::MAX / total_shares)
            .saturating_mul(scale)
            .saturating_add(offset)
            .saturating_sub(500_000);
        let i = index % payees.len();
        let payee = &payees[i];

        // floor(T * s / S) without forming T * s.
        let expected = custody / total_shares * shares[i]
            + custody % total_shares * shares[i] / total_shares;
        let available = engine.available(payee, &AssetId::Native, custody);
        prop_assert_eq!(available, Ok(expected));

        let payout = engine.commit_release(payee, &AssetId::Native, custody).unwrap();
        prop_assert_eq!(payout.amount, expected);
        let again = engine.available(payee, &AssetId::Native, custody - expected);
        prop_assert_eq!(again, Ok(0));
    }
}
