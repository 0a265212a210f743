use std::sync::Arc;

use proptest::prelude::*;

use splitz_nullables::{RejectingRecipient, Scenario};
use splitz_types::{AccountId, AssetId};

#[derive(Clone, Debug)]
enum Op {
    Fund(u128),
    Release(usize),
    Escrow(u128),
    Pull,
}

fn op_strategy(payees: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u128..100_000).prop_map(Op::Fund),
        (0..payees).prop_map(Op::Release),
        (0u128..100_000).prop_map(Op::Escrow),
        Just(Op::Pull),
    ]
}

proptest! {
    /// Whatever mix of deposits, pulls and releases runs, including releases
    /// refused by a recipient, no native funds are created or lost and every
    /// payee's release stays within its entitlement.
    #[test]
    fn test_native_funds_are_conserved(
        shares in prop::collection::vec(1u128..10_000, 1..6),
        refusing in any::<prop::sample::Index>(),
        ops in prop::collection::vec(op_strategy(6), 0..60),
    ) {
        let named: Vec<(String, u128)> = shares
            .iter()
            .enumerate()
            .map(|(i, s)| (format!("payee-{i}"), *s))
            .collect();
        let refs: Vec<(&str, u128)> = named.iter().map(|(n, s)| (n.as_str(), *s)).collect();
        let supply = 100_000_000u128;
        let mut s = Scenario::new(&refs, &[AssetId::Native], supply).unwrap();
        let rejecter = s.payees[refusing.index(s.payees.len())].clone();
        s.runtime.set_hook(rejecter, Arc::new(RejectingRecipient::new("closed")));
        let store = s.runtime.deploy_store().unwrap();
        let custody = s.instance.account();
        let native = AssetId::Native;

        for op in ops {
            match op {
                Op::Fund(n) => { let _ = s.fund(&native, n); }
                Op::Release(i) => {
                    let payee = s.payees[i % s.payees.len()].clone();
                    let _ = s.runtime.release(s.instance, &payee, &native);
                }
                Op::Escrow(n) => {
                    let _ = s.runtime.deposit(store, &s.depositor, &custody, n);
                }
                Op::Pull => { let _ = s.runtime.withdraw_from_contract(s.instance, store); }
            }

            let rt = &s.runtime;
            let mut holders: Vec<AccountId> = s.payees.clone();
            holders.push(s.depositor.clone());
            holders.push(custody.clone());
            holders.push(store.account());
            let total: u128 = holders.iter().map(|a| rt.balance_of(a, &native)).sum();
            prop_assert_eq!(total, supply);

            prop_assert!(rt.balance_of(&store.account(), &native) >= rt.store(&store).unwrap().total_pending());

            let received = rt.custody_balance(&s.instance, &native).unwrap()
                + rt.total_released(&s.instance, &native).unwrap();
            let total_shares = rt.total_shares(&s.instance).unwrap();
            for payee in &s.payees {
                let share = rt.share_of(&s.instance, payee).unwrap();
                let released = rt.released(&s.instance, payee, &native).unwrap();
                prop_assert!(released <= received * share / total_shares);
            }
        }
    }

    /// Balances far beyond `u128::MAX / total_shares` still release in full,
    /// leaving only rounding dust in custody.
    #[test]
    fn test_large_deposits_release_in_full(
        shares in prop::collection::vec(1u128..10_000, 1..6),
        deposit in (u128::MAX / 20_000)..(u128::MAX / 2),
    ) {
        let named: Vec<(String, u128)> = shares
            .iter()
            .enumerate()
            .map(|(i, s)| (format!("payee-{i}"), *s))
            .collect();
        let refs: Vec<(&str, u128)> = named.iter().map(|(n, s)| (n.as_str(), *s)).collect();
        let native = AssetId::Native;
        let mut s = Scenario::new(&refs, &[native.clone()], deposit).unwrap();
        s.fund(&native, deposit).unwrap();

        for payee in s.payees.clone() {
            prop_assert!(s.runtime.release(s.instance, &payee, &native).is_ok());
        }
        let dust = s.runtime.custody_balance(&s.instance, &native).unwrap();
        prop_assert!(dust < s.payees.len() as u128);
        prop_assert_eq!(s.runtime.total_released(&s.instance, &native).unwrap() + dust, deposit);
    }
}
