pub mod cancel;
pub mod error;
pub mod types;

pub use cancel::CancelSignal;
pub use error::{ErrorKind, LifecycleError, Result};
pub use types::{EntityId, Timestamp, UserId, now};
