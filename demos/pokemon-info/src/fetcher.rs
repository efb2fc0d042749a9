//! Pokemon lookup over the public GraphQL API

use crate::config::Config;
use crate::types::{Attacks, FetchError, Pokemon};
use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt};
use pokedex_core::environment::{Clock, Fetch};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const POKEMON_QUERY: &str = "
query PokemonInfo($name: String) {
  pokemon(name: $name) {
    id
    number
    name
    image
    attacks {
      special {
        name
        type
        damage
      }
    }
  }
}";

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<PokemonData>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct PokemonData {
    pokemon: Option<PokemonRecord>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct PokemonRecord {
    id: String,
    number: String,
    name: String,
    image: String,
    #[serde(default)]
    attacks: Attacks,
}

impl PokemonRecord {
    fn into_pokemon(self, fetched_at: DateTime<Utc>) -> Pokemon {
        Pokemon {
            id: self.id,
            number: self.number,
            name: self.name,
            image: self.image,
            attacks: self.attacks,
            fetched_at,
        }
    }
}

/// Looks pokemon up with the `PokemonInfo` GraphQL query
#[derive(Clone)]
pub struct GraphqlPokemonFetcher {
    client: Client,
    api_url: String,
    delay: Duration,
    clock: Arc<dyn Clock>,
}

impl GraphqlPokemonFetcher {
    /// Create a fetcher for the endpoint in `config`
    ///
    /// Every record is stamped with `clock` when it arrives.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the HTTP client cannot be built.
    pub fn new(config: &Config, clock: Arc<dyn Clock>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FetchError::new(format!("Could not build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            delay: config.fetch_delay,
            clock,
        })
    }

    /// Endpoint queried by this fetcher
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Look up `name`
    ///
    /// # Errors
    ///
    /// Every failure is a [`FetchError`]: transport problems, an error status
    /// (carrying the GraphQL error messages, one per line), an unreadable
    /// body, or a name the service does not know.
    pub async fn fetch_pokemon(&self, name: &str) -> Result<Pokemon, FetchError> {
        let body = serde_json::json!({
            "query": POKEMON_QUERY,
            "variables": { "name": name },
        });

        let response = self
            .client
            .post(&self.api_url)
            .header("content-type", "application/json;charset=UTF-8")
            .header("delay", self.delay.as_millis().to_string())
            .json(&body)
            .send()
            .await
            .map_err(|e| FetchError::new(format!("Request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| FetchError::new(format!("Request failed: {e}")))?;
        let payload = serde_json::from_str::<GraphqlResponse>(&text);

        if !status.is_success() {
            let message = payload
                .ok()
                .and_then(|payload| payload.errors)
                .map(|errors| {
                    errors
                        .into_iter()
                        .map(|error| error.message)
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| format!("Request failed with status {status}"));
            tracing::debug!(%name, %status, "Lookup service returned an error");
            return Err(FetchError::new(message));
        }

        let payload =
            payload.map_err(|e| FetchError::new(format!("Could not read response: {e}")))?;

        match payload.data.and_then(|data| data.pokemon) {
            Some(record) => Ok(record.into_pokemon(self.clock.now())),
            None => Err(FetchError::not_found(name)),
        }
    }
}

impl Fetch<String> for GraphqlPokemonFetcher {
    type Output = Pokemon;
    type Error = FetchError;

    fn fetch(&self, name: String) -> BoxFuture<'static, Result<Pokemon, FetchError>> {
        let fetcher = self.clone();
        async move { fetcher.fetch_pokemon(&name).await }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex_testing::test_clock;

    #[test]
    fn test_fetcher_creation() {
        let config = Config::default();
        let fetcher = GraphqlPokemonFetcher::new(&config, Arc::new(test_clock()));
        assert!(fetcher.is_ok_and(|f| f.api_url() == config.api_url));
    }

    #[test]
    fn test_record_is_stamped() -> Result<(), serde_json::Error> {
        let record: PokemonRecord = serde_json::from_value(serde_json::json!({
            "id": "UG9rZW1vbjoxNTE=",
            "number": "151",
            "name": "Mew",
            "image": "mew.jpg",
        }))?;

        let now = test_clock().now();
        let pokemon = record.into_pokemon(now);
        assert_eq!(pokemon.fetched_at, now);
        assert!(pokemon.attacks.special.is_empty());
        Ok(())
    }
}
