//! Nullable recipients: scripted behaviour for accounts that receive funds.

use std::sync::Mutex;

use splitz_runtime::{Receipt, RecipientHook, Runtime, RuntimeError, TransferError};
use splitz_types::ContractId;

/// Refuses every incoming transfer.
pub struct RejectingRecipient {
    reason: String,
}

impl RejectingRecipient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl RecipientHook for RejectingRecipient {
    fn on_receive(&self, _runtime: &mut Runtime, receipt: &Receipt) -> Result<(), TransferError> {
        Err(TransferError::Rejected {
            recipient: receipt.to.clone(),
            reason: self.reason.clone(),
        })
    }
}

/// Accepts everything and remembers every receipt, in arrival order.
#[derive(Default)]
pub struct RecordingRecipient {
    receipts: Mutex<Vec<Receipt>>,
}

impl RecordingRecipient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receipts(&self) -> Vec<Receipt> {
        self.receipts.lock().unwrap().clone()
    }

    /// Sum of all amounts received.
    pub fn total(&self) -> u128 {
        self.receipts.lock().unwrap().iter().map(|r| r.amount).sum()
    }
}

impl RecipientHook for RecordingRecipient {
    fn on_receive(&self, _runtime: &mut Runtime, receipt: &Receipt) -> Result<(), TransferError> {
        self.receipts.lock().unwrap().push(receipt.clone());
        Ok(())
    }
}

/// On receipt, immediately asks `instance` to release the same asset to
/// itself again, up to `max_depth` times. The outcome of every nested
/// attempt is kept; the outer transfer is always accepted.
pub struct ReentrantRecipient {
    instance: ContractId,
    max_depth: usize,
    attempts: Mutex<Vec<Result<u128, RuntimeError>>>,
}

impl ReentrantRecipient {
    pub fn new(instance: ContractId) -> Self {
        Self::with_depth(instance, 1)
    }

    pub fn with_depth(instance: ContractId, max_depth: usize) -> Self {
        Self {
            instance,
            max_depth,
            attempts: Mutex::new(Vec::new()),
        }
    }

    /// Outcomes of the nested release attempts, oldest first.
    pub fn attempts(&self) -> Vec<Result<u128, RuntimeError>> {
        self.attempts.lock().unwrap().clone()
    }
}

impl RecipientHook for ReentrantRecipient {
    fn on_receive(&self, runtime: &mut Runtime, receipt: &Receipt) -> Result<(), TransferError> {
        if self.attempts.lock().unwrap().len() >= self.max_depth {
            return Ok(());
        }
        // Reserve the slot before re-entering so deeper calls see the count.
        let slot = {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(Ok(0));
            attempts.len() - 1
        };
        let outcome = runtime.release(self.instance, &receipt.to, &receipt.asset);
        self.attempts.lock().unwrap()[slot] = outcome;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitz_types::{AccountId, AssetId};
    use std::sync::Arc;

    #[test]
    fn test_rejecting_recipient_fails_transfer() {
        let mut rt = Runtime::new(AccountId::new("deployer"));
        let alice = AccountId::new("alice");
        let bob = AccountId::new("bob");
        rt.mint(&alice, &AssetId::Native, 10).unwrap();
        rt.set_hook(bob.clone(), Arc::new(RejectingRecipient::new("no thanks")));

        let err = rt.transfer(&alice, &bob, &AssetId::Native, 10).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::TransferFailure(TransferError::Rejected {
                recipient: bob,
                reason: "no thanks".into()
            })
        );
    }

    #[test]
    fn test_recording_recipient_keeps_receipts() {
        let mut rt = Runtime::new(AccountId::new("deployer"));
        let alice = AccountId::new("alice");
        let bob = AccountId::new("bob");
        let recorder = Arc::new(RecordingRecipient::new());
        rt.mint(&alice, &AssetId::Native, 10).unwrap();
        rt.set_hook(bob.clone(), recorder.clone());

        rt.transfer(&alice, &bob, &AssetId::Native, 3).unwrap();
        rt.transfer(&alice, &bob, &AssetId::Native, 4).unwrap();
        assert_eq!(recorder.receipts().len(), 2);
        assert_eq!(recorder.total(), 7);
        assert_eq!(recorder.receipts()[0].from, alice);
    }
}
