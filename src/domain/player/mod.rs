//! Player statistics records managed through the CRUD surface.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Maximum length of a player or team name.
pub const MAX_NAME_LEN: usize = 100;

/// A stored player row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub team: String,
    pub matches: u32,
    pub runs: u32,
    pub wickets: u32,
}

impl Player {
    /// Builds the stored form of a validated draft.
    pub fn from_draft(id: i64, draft: PlayerDraft) -> Self {
        Self {
            id,
            name: draft.name,
            team: draft.team,
            matches: draft.matches,
            runs: draft.runs,
            wickets: draft.wickets,
        }
    }
}

/// Input for creating or replacing a player.
///
/// Counts are unsigned, so negative values never deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDraft {
    pub name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub matches: u32,
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub wickets: u32,
}

impl PlayerDraft {
    /// Trims names and checks their lengths.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let name_len = name.chars().count();
        if name_len > MAX_NAME_LEN {
            return Err(ValidationError::too_long("name", MAX_NAME_LEN, name_len));
        }

        let team = self.team.trim().to_string();
        let team_len = team.chars().count();
        if team_len > MAX_NAME_LEN {
            return Err(ValidationError::too_long("team", MAX_NAME_LEN, team_len));
        }

        Ok(Self { name, team, ..self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, team: &str) -> PlayerDraft {
        PlayerDraft {
            name: name.to_string(),
            team: team.to_string(),
            matches: 10,
            runs: 500,
            wickets: 3,
        }
    }

    #[test]
    fn validate_trims_names() {
        let valid = draft("  Virat Kohli ", " India ").validate().unwrap();
        assert_eq!(valid.name, "Virat Kohli");
        assert_eq!(valid.team, "India");
        assert_eq!(valid.runs, 500);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = draft("   ", "India").validate().unwrap_err();
        assert_eq!(err, ValidationError::empty_field("name"));
    }

    #[test]
    fn long_names_are_rejected() {
        let err = draft(&"x".repeat(101), "").validate().unwrap_err();
        assert_eq!(err, ValidationError::too_long("name", 100, 101));

        let err = draft("Kohli", &"y".repeat(150)).validate().unwrap_err();
        assert_eq!(err.field(), "team");
    }

    #[test]
    fn negative_counts_do_not_deserialize() {
        let parsed: Result<PlayerDraft, _> = serde_json::from_str(r#"{"name":"A","runs":-5}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn optional_fields_default_to_zero() {
        let parsed: PlayerDraft = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        assert_eq!(parsed.team, "");
        assert_eq!(parsed.matches, 0);
    }
}
