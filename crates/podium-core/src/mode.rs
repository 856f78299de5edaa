//! Speaking modes.
//!
//! A mode is a named category of speaking activity with its own threshold
//! set. Everything downstream (engine, categorizer, report) is generic over
//! the enum, so adding a variant only touches this file and the defaults
//! table in `thresholds`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named category of speaking activity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Introductions,
    TableTopics,
    Speeches,
}

impl Mode {
    /// All modes, in report order.
    pub const ALL: [Mode; 3] = [Mode::Introductions, Mode::TableTopics, Mode::Speeches];

    /// Human-readable name ("Table Topics").
    pub fn label(self) -> &'static str {
        match self {
            Mode::Introductions => "Introductions",
            Mode::TableTopics => "Table Topics",
            Mode::Speeches => "Speeches",
        }
    }

    /// CLI spelling ("table-topics").
    pub fn cli_name(self) -> &'static str {
        match self {
            Mode::Introductions => "introductions",
            Mode::TableTopics => "table-topics",
            Mode::Speeches => "speeches",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = UnknownMode;

    /// Case-insensitive; spaces, hyphens and underscores are equivalent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normal: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normal.as_str() {
            "introductions" => Ok(Mode::Introductions),
            "tabletopics" => Ok(Mode::TableTopics),
            "speeches" => Ok(Mode::Speeches),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Parse failure for [`Mode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode '{0}' (expected introductions, table-topics or speeches)")]
pub struct UnknownMode(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cli_spellings() {
        assert_eq!("introductions".parse::<Mode>().unwrap(), Mode::Introductions);
        assert_eq!("table-topics".parse::<Mode>().unwrap(), Mode::TableTopics);
        assert_eq!("Table Topics".parse::<Mode>().unwrap(), Mode::TableTopics);
        assert_eq!("table_topics".parse::<Mode>().unwrap(), Mode::TableTopics);
        assert_eq!("SPEECHES".parse::<Mode>().unwrap(), Mode::Speeches);
    }

    #[test]
    fn rejects_unknown() {
        assert!("keynote".parse::<Mode>().is_err());
        assert!("".parse::<Mode>().is_err());
    }

    #[test]
    fn label_and_cli_name_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(mode.label().parse::<Mode>().unwrap(), mode);
            assert_eq!(mode.cli_name().parse::<Mode>().unwrap(), mode);
        }
    }
}
