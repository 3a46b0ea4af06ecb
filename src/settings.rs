//! Player settings persisted between sessions.

use crate::simulation::Difficulty;
use serde::{Deserialize, Serialize};

/// Menu choices that carry over between runs.
///
/// Missing fields in a stored record take their default, so older or
/// hand-edited files still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub difficulty: Difficulty,
    pub obstacle_mode: bool,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            obstacle_mode: false,
            sound_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.difficulty, Difficulty::Normal);
        assert!(!settings.obstacle_mode);
        assert!(settings.sound_enabled);
    }

    #[test]
    fn test_record_field_names() {
        let settings = Settings {
            difficulty: Difficulty::Hard,
            obstacle_mode: true,
            sound_enabled: false,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(
            json,
            r#"{"difficulty":"hard","obstacleMode":true,"soundEnabled":false}"#
        );
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"difficulty":"easy"}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert!(!settings.obstacle_mode);
        assert!(settings.sound_enabled);
    }
}
