//! Data models for blobwallet commands and services
//!
//! Each model is a transient value built while handling a single command.
//! Nothing here is persisted.

pub mod transfer;
pub mod invocation;
pub mod lookup;
pub mod dispatch;

pub use transfer::TransferRequest;
pub use invocation::InvocationConfig;
pub use lookup::LookupKey;
pub use dispatch::DispatchOutcome;
