//! The bare lookup: one nullable result, no request tracking.
//!
//! This is the simplest thing that works while requests finish in the order
//! they were issued. It has two known gaps, both visible in the tests:
//!
//! - a late response for an earlier name overwrites the current one
//! - a failure is rendered as `Err` and nothing above it catches it
//!
//! [`InfoReducer`](crate::info::InfoReducer) closes both.

use crate::info::{InfoAction, InfoEnvironment};
use crate::types::{FetchError, Pokemon};
use crate::view::View;
use pokedex_core::{
    async_effect, effect::Effect, reducer::Reducer, request::RequestId, smallvec, SmallVec,
};

/// State of the bare lookup
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MinimalInfoState {
    /// Name currently shown
    pub name: String,
    /// Latest result, `None` while waiting
    pub current: Option<Result<Pokemon, FetchError>>,
}

/// Reducer for the bare lookup
#[derive(Clone, Debug, Default)]
pub struct MinimalInfoReducer;

impl MinimalInfoReducer {
    /// Creates a new `MinimalInfoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for MinimalInfoReducer {
    type State = MinimalInfoState;
    type Action = InfoAction;
    type Environment = InfoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            InfoAction::NameChanged { name } => {
                state.name.clone_from(&name);
                if name.is_empty() {
                    return SmallVec::new();
                }

                state.current = None;
                let lookup = env.fetcher.fetch(name.clone());
                let request = RequestId::next();
                smallvec![async_effect! {
                    let result = lookup.await;
                    Some(InfoAction::Fetched { request, name, result })
                }]
            },

            // Whatever arrives last wins
            InfoAction::Fetched { result, .. } => {
                state.current = Some(result);
                SmallVec::new()
            },
        }
    }
}

/// Render the bare lookup
///
/// # Errors
///
/// Returns the [`FetchError`] of a failed lookup.
pub fn minimal_view(state: &MinimalInfoState) -> Result<View, FetchError> {
    if state.name.is_empty() {
        return Ok(View::Prompt);
    }

    match &state.current {
        None => Ok(View::Loading {
            name: state.name.clone(),
        }),
        Some(Ok(pokemon)) => Ok(View::Data(pokemon.clone())),
        Some(Err(error)) => Err(error.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex_testing::{assertions, ReducerTest, StubFetcher};
    use std::sync::Arc;

    fn env(fetcher: &StubFetcher<Pokemon, FetchError>) -> InfoEnvironment {
        InfoEnvironment::new(Arc::new(fetcher.clone()))
    }

    #[test]
    fn test_name_change_clears_and_fetches_exactly_that_name() {
        let fetcher = StubFetcher::new();
        let calls = fetcher.clone();

        ReducerTest::new(MinimalInfoReducer::new())
            .with_env(env(&fetcher))
            .given_state(MinimalInfoState {
                name: "mew".to_string(),
                current: Some(Err(FetchError::new("offline"))),
            })
            .when_action(InfoAction::NameChanged { name: "pikachu".to_string() })
            .then_state(|state| {
                assert_eq!(state.name, "pikachu");
                assert!(state.current.is_none());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();

        assert_eq!(calls.calls(), vec!["pikachu"]);
    }

    #[test]
    fn test_empty_name_does_not_fetch() {
        let fetcher = StubFetcher::new();
        let calls = fetcher.clone();

        ReducerTest::new(MinimalInfoReducer::new())
            .with_env(env(&fetcher))
            .given_state(MinimalInfoState::default())
            .when_action(InfoAction::NameChanged { name: String::new() })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();

        assert!(calls.calls().is_empty());
    }

    #[test]
    fn test_minimal_view() {
        let mut state = MinimalInfoState::default();
        assert_eq!(minimal_view(&state), Ok(View::Prompt));

        state.name = "pikachu".to_string();
        assert!(minimal_view(&state).is_ok_and(|view| view.is_loading()));

        state.current = Some(Err(FetchError::new("Pokemon not found")));
        assert_eq!(minimal_view(&state), Err(FetchError::new("Pokemon not found")));

        state.name = String::new();
        assert_eq!(minimal_view(&state), Ok(View::Prompt));
    }
}
