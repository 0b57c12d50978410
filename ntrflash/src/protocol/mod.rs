//! Protocol implementations.

pub mod cipher;
pub mod frame;
pub mod jedec;
pub mod poll;
pub mod secure;

// Re-export common types
pub use frame::CommandFrame;
pub use jedec::Dialect;
pub use poll::PollPolicy;
pub use secure::{KeyCandidate, KeyKind};
