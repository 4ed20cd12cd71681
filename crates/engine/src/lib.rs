//! `zrecon-engine` — migration reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded records, returns output rows.
//! No CLI or IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod resolve;

pub use config::{Mode, Settings};
pub use engine::reconcile;
pub use error::ReconError;
pub use model::{FieldMap, OutputRecord, Scalar, SingleKeyRecord};
