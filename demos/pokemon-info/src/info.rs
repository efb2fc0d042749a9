//! The lookup feature: fetch a pokemon whenever the submitted name changes.
//!
//! [`InfoReducer`] tracks the request through [`RequestState`] and tags every
//! request with a [`RequestId`]. A response is applied only while its tag is
//! the one in flight, so a slow answer for an earlier name can never replace
//! the answer for the current one.

use crate::types::{FetchError, Pokemon};
use crate::view::View;
use pokedex_core::{
    async_effect,
    effect::Effect,
    environment::Fetch,
    reducer::Reducer,
    request::{RequestId, RequestState},
    smallvec, SmallVec,
};
use std::sync::Arc;

/// Fetch collaborator shared by every lookup reducer
pub type PokemonFetcher = Arc<dyn Fetch<String, Output = Pokemon, Error = FetchError>>;

/// Environment dependencies for the lookup reducers
#[derive(Clone)]
pub struct InfoEnvironment {
    /// Looks a pokemon up by name
    pub fetcher: PokemonFetcher,
}

impl InfoEnvironment {
    /// Creates a new `InfoEnvironment`
    #[must_use]
    pub fn new(fetcher: PokemonFetcher) -> Self {
        Self { fetcher }
    }
}

/// Actions of the lookup feature
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InfoAction {
    /// The name to look up changed, including the first name after mount
    NameChanged {
        /// New name; empty means nothing to look up
        name: String,
    },
    /// A lookup finished
    Fetched {
        /// Tag of the request that produced this result
        request: RequestId,
        /// Name the request was issued for
        name: String,
        /// Outcome reported by the collaborator
        result: Result<Pokemon, FetchError>,
    },
}

/// State of one mounted lookup
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InfoState {
    /// Name currently shown
    pub name: String,
    /// Lifecycle of the lookup for `name`
    pub request: RequestState<Pokemon, FetchError>,
    /// Tag of the request whose response is still wanted
    pub in_flight: Option<RequestId>,
}

/// Reducer for the lookup feature
#[derive(Clone, Debug, Default)]
pub struct InfoReducer;

impl InfoReducer {
    /// Creates a new `InfoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for InfoReducer {
    type State = InfoState;
    type Action = InfoAction;
    type Environment = InfoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            InfoAction::NameChanged { name } if name.is_empty() => {
                state.name = name;
                state.request = RequestState::Idle;
                state.in_flight = None;
                SmallVec::new()
            },

            InfoAction::NameChanged { name } => {
                let request = RequestId::next();
                tracing::debug!(%name, %request, "Looking up pokemon");
                metrics::counter!("pokemon_info.requests.issued").increment(1);

                state.name.clone_from(&name);
                state.request = RequestState::Pending;
                state.in_flight = Some(request);

                let lookup = env.fetcher.fetch(name.clone());
                smallvec![async_effect! {
                    let result = lookup.await;
                    Some(InfoAction::Fetched { request, name, result })
                }]
            },

            InfoAction::Fetched {
                request,
                name,
                result,
            } => {
                if state.in_flight != Some(request) {
                    tracing::debug!(%name, %request, "Discarding stale lookup result");
                    metrics::counter!("pokemon_info.requests.stale").increment(1);
                    return SmallVec::new();
                }

                if let Err(error) = &result {
                    tracing::warn!(%name, %error, "Lookup failed");
                    metrics::counter!("pokemon_info.requests.failed").increment(1);
                }

                state.in_flight = None;
                state.request = RequestState::settle(result);
                SmallVec::new()
            },
        }
    }
}

/// Render the lookup
///
/// A stored failure comes back as `Err`, as if rendering itself had failed,
/// so that an enclosing [`ErrorBoundary`](crate::boundary::ErrorBoundary)
/// can catch it.
///
/// # Errors
///
/// Returns the stored [`FetchError`] once the lookup was rejected.
pub fn info_view(state: &InfoState) -> Result<View, FetchError> {
    match &state.request {
        RequestState::Idle => Ok(View::Prompt),
        RequestState::Pending => Ok(View::Loading {
            name: state.name.clone(),
        }),
        RequestState::Resolved(pokemon) => Ok(View::Data(pokemon.clone())),
        RequestState::Rejected(error) => Err(error.clone()),
    }
}
