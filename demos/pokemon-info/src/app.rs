//! The app: a submitted name and the lookup that follows it.
//!
//! Both apps own the current name and embed a lookup through
//! [`scope_reducer`]. They differ in what a new name does to the lookup:
//! [`MinimalAppReducer`] keeps the same lookup and tells it the new name,
//! [`AppReducer`] throws the lookup away and mounts a fresh one.

use crate::info::{InfoAction, InfoEnvironment, InfoReducer, InfoState};
use crate::minimal::{minimal_view, MinimalInfoReducer, MinimalInfoState};
use crate::types::FetchError;
use crate::view::View;
use pokedex_core::{
    composition::{scope_reducer, ScopedReducer},
    effect::Effect,
    reducer::Reducer,
    SmallVec,
};

/// Actions of both apps
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    /// The app was mounted; the lookup sees the initial name
    Mount,
    /// The form submitted a name
    Submit {
        /// Submitted name, taken as is
        name: String,
    },
    /// Action for the embedded lookup
    Info(InfoAction),
}

fn info_action(action: AppAction) -> Option<InfoAction> {
    match action {
        AppAction::Info(action) => Some(action),
        AppAction::Mount | AppAction::Submit { .. } => None,
    }
}

// ============================================================================
// Lookup with error boundary
// ============================================================================

/// State of the app
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    /// Last submitted name
    pub pokemon_name: String,
    /// Counts lookups mounted so far; changes whenever `info` is replaced
    pub mount: u64,
    /// The lookup mounted for `pokemon_name`
    pub info: InfoState,
}

impl AppState {
    /// App whose form starts out holding `name`
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            pokemon_name: name.into(),
            mount: 0,
            info: InfoState::default(),
        }
    }
}

fn info_state(state: &mut AppState) -> &mut InfoState {
    &mut state.info
}

/// Reducer for the app
///
/// Rendering goes through [`Renderer`](crate::boundary::Renderer), which
/// wraps each mounted lookup in its own error boundary.
#[derive(Clone, Debug)]
pub struct AppReducer {
    info: ScopedReducer<AppState, AppAction, InfoReducer>,
}

impl AppReducer {
    /// Creates a new `AppReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            info: scope_reducer(InfoReducer::new(), info_state, info_action, AppAction::Info),
        }
    }

    fn name_changed(
        &self,
        state: &mut AppState,
        env: &InfoEnvironment,
    ) -> SmallVec<[Effect<AppAction>; 4]> {
        let name = state.pokemon_name.clone();
        self.info
            .reduce(state, AppAction::Info(InfoAction::NameChanged { name }), env)
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = InfoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::Mount => self.name_changed(state, env),

            AppAction::Submit { name } => {
                if name == state.pokemon_name {
                    return SmallVec::new();
                }

                tracing::info!(%name, "Name submitted");
                state.pokemon_name = name;
                // A new name gets a new lookup
                state.mount = state.mount.wrapping_add(1);
                state.info = InfoState::default();
                self.name_changed(state, env)
            },

            action @ AppAction::Info(_) => self.info.reduce(state, action, env),
        }
    }
}

// ============================================================================
// Bare lookup
// ============================================================================

/// State of the bare app
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MinimalAppState {
    /// Last submitted name
    pub pokemon_name: String,
    /// The single lookup
    pub info: MinimalInfoState,
}

fn minimal_info_state(state: &mut MinimalAppState) -> &mut MinimalInfoState {
    &mut state.info
}

/// Reducer for the bare app
#[derive(Clone, Debug)]
pub struct MinimalAppReducer {
    info: ScopedReducer<MinimalAppState, AppAction, MinimalInfoReducer>,
}

impl MinimalAppReducer {
    /// Creates a new `MinimalAppReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            info: scope_reducer(
                MinimalInfoReducer::new(),
                minimal_info_state,
                info_action,
                AppAction::Info,
            ),
        }
    }
}

impl Default for MinimalAppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for MinimalAppReducer {
    type State = MinimalAppState;
    type Action = AppAction;
    type Environment = InfoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::Mount => {
                let name = state.pokemon_name.clone();
                self.info
                    .reduce(state, AppAction::Info(InfoAction::NameChanged { name }), env)
            },

            AppAction::Submit { name } => {
                if name == state.pokemon_name {
                    return SmallVec::new();
                }

                tracing::info!(%name, "Name submitted");
                state.pokemon_name.clone_from(&name);
                self.info
                    .reduce(state, AppAction::Info(InfoAction::NameChanged { name }), env)
            },

            action @ AppAction::Info(_) => self.info.reduce(state, action, env),
        }
    }
}

/// Render the bare app
///
/// # Errors
///
/// A failed lookup comes straight through; there is no boundary here.
pub fn render_minimal(state: &MinimalAppState) -> Result<View, FetchError> {
    let view = minimal_view(&state.info)?;
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex_core::request::RequestState;
    use pokedex_testing::{assertions, ReducerTest, StubFetcher};
    use std::sync::Arc;

    fn env(fetcher: &StubFetcher<crate::types::Pokemon, FetchError>) -> InfoEnvironment {
        InfoEnvironment::new(Arc::new(fetcher.clone()))
    }

    #[test]
    fn test_mount_with_empty_name_is_idle() {
        let fetcher = StubFetcher::new();
        let calls = fetcher.clone();

        ReducerTest::new(AppReducer::new())
            .with_env(env(&fetcher))
            .given_state(AppState::default())
            .when_action(AppAction::Mount)
            .then_state(|state| {
                assert!(state.info.request.is_idle());
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();

        assert!(calls.calls().is_empty());
    }

    #[test]
    fn test_mount_with_initial_name_fetches() {
        let fetcher = StubFetcher::new();
        let calls = fetcher.clone();

        ReducerTest::new(AppReducer::new())
            .with_env(env(&fetcher))
            .given_state(AppState::with_name("mew"))
            .when_action(AppAction::Mount)
            .then_state(|state| {
                assert!(state.info.request.is_pending());
            })
            .then_effects(|effects| {
                assertions::assert_has_future_effect(effects);
            })
            .run();

        assert_eq!(calls.calls(), vec!["mew"]);
    }

    #[test]
    fn test_submit_remounts_lookup() {
        let fetcher = StubFetcher::new();

        ReducerTest::new(AppReducer::new())
            .with_env(env(&fetcher))
            .given_state(AppState {
                pokemon_name: "does-not-exist".to_string(),
                mount: 1,
                info: InfoState {
                    name: "does-not-exist".to_string(),
                    request: RequestState::Rejected(FetchError::new("Pokemon not found")),
                    in_flight: None,
                },
            })
            .when_action(AppAction::Submit { name: "pikachu".to_string() })
            .then_state(|state| {
                assert_eq!(state.pokemon_name, "pikachu");
                assert_eq!(state.mount, 2);
                assert_eq!(state.info.name, "pikachu");
                assert!(state.info.request.is_pending());
                assert!(state.info.request.error().is_none());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
            })
            .run();
    }

    #[test]
    fn test_resubmitting_same_name_is_a_no_op() {
        let fetcher = StubFetcher::new();
        let calls = fetcher.clone();

        ReducerTest::new(AppReducer::new())
            .with_env(env(&fetcher))
            .given_state(AppState::default())
            .when_action(AppAction::Submit { name: "pikachu".to_string() })
            .when_action(AppAction::Submit { name: "pikachu".to_string() })
            .then_state(|state| {
                assert_eq!(state.mount, 1);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();

        assert_eq!(calls.calls(), vec!["pikachu"]);
    }

    #[test]
    fn test_minimal_submit_keeps_lookup_instance() {
        let fetcher = StubFetcher::new();
        let calls = fetcher.clone();

        ReducerTest::new(MinimalAppReducer::new())
            .with_env(env(&fetcher))
            .given_state(MinimalAppState::default())
            .when_action(AppAction::Submit { name: "pikachu".to_string() })
            .when_action(AppAction::Submit { name: "mew".to_string() })
            .then_state(|state| {
                assert_eq!(state.pokemon_name, "mew");
                assert_eq!(state.info.name, "mew");
                assert!(state.info.current.is_none());
            })
            .then_effects(|effects| {
                assertions::assert_has_future_effect(effects);
            })
            .run();

        assert_eq!(calls.calls(), vec!["pikachu", "mew"]);
    }

    #[test]
    fn test_render_minimal_propagates_failure() {
        let state = MinimalAppState {
            pokemon_name: "does-not-exist".to_string(),
            info: MinimalInfoState {
                name: "does-not-exist".to_string(),
                current: Some(Err(FetchError::new("Pokemon not found"))),
            },
        };

        assert_eq!(render_minimal(&state), Err(FetchError::new("Pokemon not found")));
    }
}
