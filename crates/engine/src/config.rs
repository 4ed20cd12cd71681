use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which output fields a reconciliation pass composes.
///
/// `Accounts` and `Subscriptions` build one dataset each; `All` builds
/// combined rows carrying both sides (one row per input occurrence, no
/// account dedup).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Accounts,
    Subscriptions,
    #[default]
    All,
}

impl Mode {
    pub fn includes_accounts(self) -> bool {
        matches!(self, Self::Accounts | Self::All)
    }

    pub fn includes_subscriptions(self) -> bool {
        matches!(self, Self::Subscriptions | Self::All)
    }
}

impl FromStr for Mode {
    type Err = ReconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accounts" => Ok(Self::Accounts),
            "subscriptions" => Ok(Self::Subscriptions),
            "all" => Ok(Self::All),
            other => Err(ReconError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accounts => write!(f, "accounts"),
            Self::Subscriptions => write!(f, "subscriptions"),
            Self::All => write!(f, "all"),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Engine settings, the `settings:` block of the config document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Emit legacy (pre-migration) identifier fields alongside the new ones.
    #[serde(rename = "old_data")]
    pub include_old_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { include_old_data: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_recognized_values() {
        assert_eq!("accounts".parse::<Mode>().unwrap(), Mode::Accounts);
        assert_eq!("subscriptions".parse::<Mode>().unwrap(), Mode::Subscriptions);
        assert_eq!("all".parse::<Mode>().unwrap(), Mode::All);
    }

    #[test]
    fn mode_rejects_unknown_value() {
        let err = "invalid".parse::<Mode>().unwrap_err();
        assert_eq!(err, ReconError::InvalidMode("invalid".into()));
        assert!(err.to_string().contains("'invalid'"));
    }

    #[test]
    fn mode_is_never_silently_defaulted() {
        // An empty string is not `all`.
        assert!("".parse::<Mode>().is_err());
        assert!("ALL".parse::<Mode>().is_err());
    }

    #[test]
    fn settings_default_includes_old_data() {
        assert!(Settings::default().include_old_data);
    }
}
