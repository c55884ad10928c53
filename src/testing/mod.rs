//! Headless testing helpers: Pilot, recording style shim, tree snapshots.
//!
//! Use the [`Pilot`] to drive a [`Runtime`](crate::runtime::Runtime) one task
//! at a time. Use [`tree_to_string`] to capture the composed tree (shadow
//! roots included) as plain text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::{Pilot, RecordingShim};
pub use snapshot::tree_to_string;
