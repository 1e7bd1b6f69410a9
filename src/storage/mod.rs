//! Persistence: the append-only candidate store and the last-analysis snapshot

pub mod store;
pub mod session;

pub use session::SessionSnapshot;
pub use store::{CandidateStore, NewCandidate, PersistedRow};
