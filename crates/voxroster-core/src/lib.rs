//! Shared plumbing for the voxroster crates: the [`Signal`] type models use
//! to announce changes, and the `tracing` targets and tree-dump options used
//! for diagnostics.

pub mod logging;
pub mod signal;

pub use logging::{TreeFormatOptions, TreeStyle};
pub use signal::{ConnectionId, Signal};
