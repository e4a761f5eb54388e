//! Revision module
//!
//! Append-only audit trail of policy changes. Each revision carries a
//! serialized snapshot of the object, the snapshot hash, and a link to the
//! previous revision of the same object.

pub mod store;
pub mod types;

pub use store::{FileRevisionStore, RevisionRepository};
pub use types::{Revision, POLICY_SCHEMA};
