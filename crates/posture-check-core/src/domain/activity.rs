//! Activity selection for rule dispatch.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AnalysisError;

/// The activity a frame should be judged against.
///
/// Each activity selects an independent rule set; there is no shared
/// behavior between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    /// Squat form analysis.
    Squat,
    /// Seated posture analysis.
    Sitting,
}

impl Activity {
    /// Returns the canonical lowercase tag.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Squat => "squat",
            Self::Sitting => "sitting",
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Activity {
    type Err = AnalysisError;

    /// Parses an activity tag, ignoring case. Unknown tags are rejected
    /// before any analysis can run.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "squat" => Ok(Self::Squat),
            "sitting" => Ok(Self::Sitting),
            _ => Err(AnalysisError::InvalidActivity(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("squat".parse::<Activity>().unwrap(), Activity::Squat);
        assert_eq!("SQUAT".parse::<Activity>().unwrap(), Activity::Squat);
        assert_eq!("Sitting".parse::<Activity>().unwrap(), Activity::Sitting);
        assert_eq!("sItTiNg".parse::<Activity>().unwrap(), Activity::Sitting);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "standing".parse::<Activity>().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidActivity(ref tag) if tag == "standing"));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!("".parse::<Activity>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for activity in [Activity::Squat, Activity::Sitting] {
            assert_eq!(
                activity.to_string().parse::<Activity>().unwrap(),
                activity
            );
        }
    }

    #[test]
    fn test_serde_tags() {
        assert_eq!(
            serde_json::to_string(&Activity::Sitting).unwrap(),
            "\"sitting\""
        );
        let parsed: Activity = serde_json::from_str("\"squat\"").unwrap();
        assert_eq!(parsed, Activity::Squat);
    }
}
