//! Execution environment for Splitz contracts.
//!
//! The [`Runtime`] owns every balance, every distribution instance (created
//! through the [`InstanceFactory`]) and every [`PullPaymentStore`]. Each entry
//! point runs as one atomic invocation: state is snapshotted on entry and
//! restored if anything inside fails, including a transfer rejected by the
//! recipient. Invocations nest when a [`RecipientHook`] calls back into the
//! runtime; records reach the journal only when the outermost one commits.
//!
//! [`PullPaymentStore`]: splitz_escrow::PullPaymentStore

pub mod bank;
pub mod distribution;
pub mod error;
pub mod escrow;
pub mod event;
pub mod factory;
pub mod hook;
pub mod runtime;

pub use bank::Bank;
pub use error::{RuntimeError, TransferError};
pub use event::{EventBus, SplitEvent};
pub use factory::InstanceFactory;
pub use hook::{Receipt, RecipientHook};
pub use runtime::{Runtime, RuntimeState};
