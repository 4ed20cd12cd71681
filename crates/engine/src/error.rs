use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum ReconError {
    /// Unrecognized reconciliation mode (configuration error, raised before
    /// any input is processed).
    InvalidMode(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMode(mode) => write!(
                f,
                "invalid mode '{mode}' (expected \"accounts\", \"subscriptions\" or \"all\")"
            ),
        }
    }
}

impl std::error::Error for ReconError {}
