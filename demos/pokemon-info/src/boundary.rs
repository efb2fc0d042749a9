//! Catching failed lookups at render time.
//!
//! An [`ErrorBoundary`] wraps one render of the lookup. Once it has caught a
//! failure it keeps showing the fallback; it is never cleared. The
//! [`Renderer`] creates a fresh boundary instead whenever the app mounts a new
//! lookup, even if it was never rendered in between.

use crate::app::AppState;
use crate::info::info_view;
use crate::types::FetchError;
use crate::view::View;

/// Latches the first failure of the render it wraps
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorBoundary {
    key: String,
    caught: Option<FetchError>,
}

impl ErrorBoundary {
    /// Creates a boundary identified by `key` that has caught nothing
    #[must_use]
    pub fn keyed(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            caught: None,
        }
    }

    /// Key this boundary was created for
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Failure caught so far
    #[must_use]
    pub const fn caught(&self) -> Option<&FetchError> {
        self.caught.as_ref()
    }

    /// Render `child`, showing the fallback if it fails or has failed before
    pub fn render<F>(&mut self, child: F) -> View
    where
        F: FnOnce() -> Result<View, FetchError>,
    {
        if let Some(error) = &self.caught {
            return View::ErrorFallback(error.clone());
        }

        match child() {
            Ok(view) => view,
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "Render failed, showing fallback");
                self.caught = Some(error.clone());
                View::ErrorFallback(error)
            },
        }
    }
}

/// Renders the app, keeping one boundary per mounted lookup
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    /// Boundary and the [`AppState::mount`] it was created for
    boundary: Option<(u64, ErrorBoundary)>,
}

impl Renderer {
    /// Creates a renderer with no boundary yet
    #[must_use]
    pub const fn new() -> Self {
        Self { boundary: None }
    }

    /// The boundary used by the last render
    #[must_use]
    pub fn boundary(&self) -> Option<&ErrorBoundary> {
        self.boundary.as_ref().map(|(_, boundary)| boundary)
    }

    /// Render the lookup area of `state`
    pub fn render(&mut self, state: &AppState) -> View {
        if self.boundary.as_ref().is_none_or(|(mount, _)| *mount != state.mount) {
            self.boundary = Some((state.mount, ErrorBoundary::keyed(&state.pokemon_name)));
        }

        let (_, boundary) = self
            .boundary
            .get_or_insert_with(|| (state.mount, ErrorBoundary::keyed(&state.pokemon_name)));
        boundary.render(|| info_view(&state.info))
    }
}
