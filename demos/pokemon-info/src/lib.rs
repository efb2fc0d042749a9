//! Pokemon lookup driven by a submitted name.
//!
//! Submitting a name starts a lookup; the lookup area shows a prompt, a
//! loading card, the record, or an error. Two apps are provided:
//!
//! - [`MinimalAppReducer`]: one nullable result. Late responses overwrite
//!   newer ones and a failure escapes [`render_minimal`] unhandled.
//! - [`AppReducer`]: requests are tagged so only the latest one is applied,
//!   and [`Renderer`] wraps the lookup in an [`ErrorBoundary`] recreated for
//!   every new name.
//!
//! # Quick Start
//!
//! ```no_run
//! use pokedex_core::environment::SystemClock;
//! use pokedex_runtime::Store;
//! use pokemon_info::{
//!     AppAction, AppReducer, AppState, Config, GraphqlPokemonFetcher, InfoEnvironment, Renderer,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = GraphqlPokemonFetcher::new(&Config::default(), Arc::new(SystemClock))?;
//! let store = Store::new(AppState::default(), AppReducer::new(), InfoEnvironment::new(Arc::new(fetcher)));
//!
//! let mut handle = store.send(AppAction::Submit { name: "pikachu".to_string() }).await?;
//! handle.wait().await;
//!
//! let mut renderer = Renderer::new();
//! let view = store.state(|state| renderer.render(state)).await;
//! println!("{view}");
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod boundary;
pub mod config;
pub mod fetcher;
pub mod form;
pub mod info;
pub mod minimal;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use app::{render_minimal, AppAction, AppReducer, AppState, MinimalAppReducer, MinimalAppState};
pub use boundary::{ErrorBoundary, Renderer};
pub use config::{Config, ConfigError, Variant};
pub use fetcher::GraphqlPokemonFetcher;
pub use form::PokemonForm;
pub use info::{info_view, InfoAction, InfoEnvironment, InfoReducer, InfoState, PokemonFetcher};
pub use minimal::{minimal_view, MinimalInfoReducer, MinimalInfoState};
pub use types::{Attack, Attacks, FetchError, Pokemon};
pub use view::View;
