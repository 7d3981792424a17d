//! Mix timing: HH:MM:SS offsets and timeline reconciliation

mod reconcile;
mod timecode;

pub use reconcile::{ReconcileConfig, Reconciler, Reconciliation};
pub use timecode::Timecode;
