//! Saving and resuming games as JSON snapshots.

mod state;
mod store;

pub use state::GameSnapshot;
pub use store::SnapshotStore;
