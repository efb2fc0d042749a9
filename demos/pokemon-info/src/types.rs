//! Domain types for the pokemon lookup.
//!
//! The reducers treat [`Pokemon`] as an opaque payload: they hand it from the
//! fetch collaborator to the view without looking inside.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A pokemon as returned by the lookup service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// Service-assigned identifier
    pub id: String,
    /// Pokedex number, zero padded (`"025"`)
    pub number: String,
    /// Display name
    pub name: String,
    /// Image URL
    pub image: String,
    /// Known attacks
    pub attacks: Attacks,
    /// When the collaborator received this record
    pub fetched_at: DateTime<Utc>,
}

/// Attack groups of a [`Pokemon`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attacks {
    /// Special attacks
    pub special: Vec<Attack>,
}

/// A single attack
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    /// Attack name
    pub name: String,
    /// Elemental type
    #[serde(rename = "type")]
    pub kind: String,
    /// Damage dealt
    pub damage: u32,
}

/// A failed lookup
///
/// There is a single failure kind; the message is all a caller gets.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    /// Creates an error carrying `message`
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The service knows no pokemon called `name`
    #[must_use]
    pub fn not_found(name: &str) -> Self {
        Self::new(format!(
            "No pokemon with the name \"{name}\". Try \"pikachu\", \"charizard\", or \"mew\"."
        ))
    }

    /// The human-readable message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_displays_message() {
        let error = FetchError::new("Pokemon not found");
        assert_eq!(error.to_string(), "Pokemon not found");
        assert_eq!(error.message(), "Pokemon not found");
    }

    #[test]
    fn test_not_found_names_the_pokemon() {
        let error = FetchError::not_found("missingno");
        assert!(error.message().starts_with("No pokemon with the name \"missingno\""));
        assert!(error.message().contains("\"pikachu\""));
    }

    #[test]
    fn test_attack_type_field_name() -> Result<(), serde_json::Error> {
        let attack: Attack = serde_json::from_value(serde_json::json!({
            "name": "Thunder",
            "type": "Electric",
            "damage": 100
        }))?;
        assert_eq!(attack.kind, "Electric");
        Ok(())
    }
}
