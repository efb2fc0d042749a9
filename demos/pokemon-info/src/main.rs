//! Interactive pokemon lookup.
//!
//! Reads names from stdin, one per line, and prints the lookup area after
//! every change. Logs go to stderr; set `RUST_LOG` to adjust them.

use anyhow::Context;
use pokedex_core::{environment::SystemClock, reducer::Reducer};
use pokedex_runtime::{Store, StoreConfig};
use pokemon_info::{
    form::QUIT, render_minimal, AppAction, AppReducer, AppState, Config, GraphqlPokemonFetcher,
    InfoEnvironment, MinimalAppReducer, MinimalAppState, PokemonForm, Renderer, Variant, View,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How long to wait for lookups still in flight when the input ends
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

fn store_config() -> StoreConfig {
    StoreConfig::default().with_shutdown_timeout(SHUTDOWN_TIMEOUT)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokemon_info=info,pokedex_runtime=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = Config::from_env().context("Invalid configuration")?;
    tracing::info!(api_url = %config.api_url, variant = %config.variant, "Starting pokemon-info");

    let fetcher = GraphqlPokemonFetcher::new(&config, Arc::new(SystemClock))
        .context("Failed to create the lookup client")?;
    let env = InfoEnvironment::new(Arc::new(fetcher));
    let form = PokemonForm::new(BufReader::new(tokio::io::stdin()));

    println!("=== Pokemon Info ({}) ===", config.variant);
    println!("Type a name and press enter. A blank line clears it, {QUIT} exits.\n");

    match config.variant {
        Variant::Extended => {
            let store =
                Store::with_config(AppState::default(), AppReducer::new(), env, store_config());
            let mut renderer = Renderer::new();
            run(&store, form, |state| Ok(renderer.render(state))).await
        },
        Variant::Minimal => {
            let store = Store::with_config(
                MinimalAppState::default(),
                MinimalAppReducer::new(),
                env,
                store_config(),
            );
            // Nothing catches a failed lookup here, so it ends the program
            run(&store, form, |state| {
                render_minimal(state).context("Unhandled lookup failure")
            })
            .await
        },
    }
}

/// Feed submissions into `store` and print the view whenever it changes
async fn run<S, R, I, F>(
    store: &Store<S, AppAction, InfoEnvironment, R>,
    mut form: PokemonForm<I>,
    mut render: F,
) -> anyhow::Result<()>
where
    S: Send + Sync + 'static,
    R: Reducer<State = S, Action = AppAction, Environment = InfoEnvironment>
        + Clone
        + Send
        + Sync
        + 'static,
    I: AsyncBufRead + Unpin,
    F: FnMut(&S) -> anyhow::Result<View>,
{
    let mut actions = store.subscribe_actions();
    store.send(AppAction::Mount).await?;

    let mut shown: Option<View> = None;
    loop {
        let view = store.state(&mut render).await?;
        if shown.as_ref() != Some(&view) {
            println!("{view}\n");
            shown = Some(view);
        }

        tokio::select! {
            submission = form.next_submission() => {
                let Some(name) = submission.context("Failed to read input")? else {
                    break;
                };
                store.send(AppAction::Submit { name }).await?;
            },
            action = actions.recv() => match action {
                Ok(_) => {},
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Renderer skipped actions");
                },
                Err(RecvError::Closed) => break,
            },
        }
    }

    if let Err(error) = store.shutdown_default().await {
        tracing::warn!(%error, "Abandoning lookups still in flight");
    }
    Ok(())
}
