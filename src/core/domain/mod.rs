//! Domain types.

mod diff;
mod report;
mod secret;

pub use diff::Changes;
pub use report::{FileReport, InvalidSecret, RunReport, SyncReport};
pub use secret::Secret;
