// Configuration loading

pub mod settings;

pub use settings::{candidate_paths, discover, load_from, ConfigError};
