//! Nullable infrastructure for deterministic testing.
//!
//! Recipients in the real world are arbitrary code: they may refuse funds,
//! or call straight back into the contract that paid them. The hooks here
//! reproduce those behaviours on demand and remember what they saw, so tests
//! can assert on them without any external machinery.

pub mod recipient;
pub mod scenario;

pub use recipient::{RecordingRecipient, ReentrantRecipient, RejectingRecipient};
pub use scenario::Scenario;
