//! Text rendering of the lookup.
//!
//! A view is a plain value; `Display` turns it into what the terminal shows.
//! Loading reuses the data card with placeholder values so the layout does not
//! jump when the record arrives.

use crate::types::{Attack, FetchError, Pokemon};
use std::fmt;

/// What the lookup area shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    /// No name submitted yet
    Prompt,
    /// Waiting for `name`
    Loading {
        /// Name being looked up
        name: String,
    },
    /// The record arrived
    Data(Pokemon),
    /// A failure escaped the lookup and was caught
    ErrorFallback(FetchError),
}

impl View {
    /// True for [`View::Loading`]
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

const PLACEHOLDER_ATTACKS: [(&str, &str, &str); 2] = [
    ("Loading Attack 1", "Type", "XX"),
    ("Loading Attack 2", "Type", "XX"),
];

fn write_card<'a>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    number: &str,
    attacks: impl Iterator<Item = (&'a str, &'a str, String)>,
    fetched_at: &str,
) -> fmt::Result {
    writeln!(f, "{name} #{number}")?;
    for (attack, kind, damage) in attacks {
        writeln!(f, "  - {attack}: {damage} ({kind})")?;
    }
    write!(f, "fetched at {fetched_at}")
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prompt => f.write_str("Submit a pokemon"),
            Self::Loading { name } => write_card(
                f,
                name,
                "XXX",
                PLACEHOLDER_ATTACKS
                    .iter()
                    .map(|(attack, kind, damage)| (*attack, *kind, (*damage).to_string())),
                "loading...",
            ),
            Self::Data(pokemon) => write_card(
                f,
                &pokemon.name,
                &pokemon.number,
                pokemon.attacks.special.iter().map(|Attack { name, kind, damage }| {
                    (name.as_str(), kind.as_str(), damage.to_string())
                }),
                &pokemon.fetched_at.format("%H:%M:%S%.3f").to_string(),
            ),
            Self::ErrorFallback(error) => write!(f, "There was an error: {error}"),
        }
    }
}
