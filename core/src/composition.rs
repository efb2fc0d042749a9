//! Reducer composition utilities
//!
//! [`scope_reducer`] embeds a child feature inside a parent feature: the child
//! reducer runs against a field of the parent state, only sees the parent
//! actions that wrap one of its own, and its effects are mapped back into the
//! parent action type.
//!
//! # Examples
//!
//! ```
//! use pokedex_core::{composition::scope_reducer, effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut CounterState, action: CounterAction, _env: &()) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! #[derive(Clone, Debug, Default)]
//! struct AppState {
//!     counter: CounterState,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum AppAction {
//!     Counter(CounterAction),
//!     Quit,
//! }
//!
//! fn counter(app: &mut AppState) -> &mut CounterState {
//!     &mut app.counter
//! }
//!
//! fn counter_action(action: AppAction) -> Option<CounterAction> {
//!     match action {
//!         AppAction::Counter(action) => Some(action),
//!         AppAction::Quit => None,
//!     }
//! }
//!
//! let scoped = scope_reducer(CounterReducer, counter, counter_action, AppAction::Counter);
//!
//! let mut state = AppState::default();
//! scoped.reduce(&mut state, AppAction::Counter(CounterAction::Increment), &());
//! scoped.reduce(&mut state, AppAction::Quit, &());
//! assert_eq!(state.counter.count, 1);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Scopes a reducer to a field of a larger state and a case of a larger action.
///
/// # Type Parameters
///
/// - `S`: The parent state type
/// - `A`: The parent action type
/// - `R`: The child reducer
///
/// # Arguments
///
/// - `state`: Projects the parent state onto the child's state
/// - `to_child`: Extracts a child action, or `None` if the parent action is
///   not meant for the child
/// - `to_parent`: Wraps child actions produced by effects
pub const fn scope_reducer<S, A, R>(
    reducer: R,
    state: fn(&mut S) -> &mut R::State,
    to_child: fn(A) -> Option<R::Action>,
    to_parent: fn(R::Action) -> A,
) -> ScopedReducer<S, A, R>
where
    R: Reducer,
{
    ScopedReducer {
        reducer,
        state,
        to_child,
        to_parent,
    }
}

/// A reducer embedded in a parent feature.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, A, R>
where
    R: Reducer,
{
    reducer: R,
    state: fn(&mut S) -> &mut R::State,
    to_child: fn(A) -> Option<R::Action>,
    to_parent: fn(R::Action) -> A,
}

impl<S, A, R> ScopedReducer<S, A, R>
where
    R: Reducer,
{
    /// The embedded child reducer
    #[must_use]
    pub const fn inner(&self) -> &R {
        &self.reducer
    }
}

impl<S, A, R> Clone for ScopedReducer<S, A, R>
where
    R: Reducer + Clone,
{
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            state: self.state,
            to_child: self.to_child,
            to_parent: self.to_parent,
        }
    }
}

impl<S, A, R> std::fmt::Debug for ScopedReducer<S, A, R>
where
    R: Reducer + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedReducer")
            .field("reducer", &self.reducer)
            .finish_non_exhaustive()
    }
}

impl<S, A, R> Reducer for ScopedReducer<S, A, R>
where
    R: Reducer,
    R::Action: Send + 'static,
    A: 'static,
{
    type State = S;
    type Action = A;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.to_child)(action) else {
            return SmallVec::new();
        };

        let child_state = (self.state)(state);

        self.reducer
            .reduce(child_state, child_action, env)
            .into_iter()
            .map(|effect| effect.map(self.to_parent))
            .collect()
    }
}
