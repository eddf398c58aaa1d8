//! Pokedex - An interactive PokeAPI explorer
//!
//! Reads commands from stdin and prints results to stdout. Logs go to stderr.

use std::io;

use anyhow::Context as _;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::repl::{self, Session};
use pokedex::{Cache, Config, PokeApiClient};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its reaper
/// 4. Build the PokeAPI client around the cache
/// 5. Load the saved Pokedex
/// 6. Run the prompt loop until `exit` or end of input
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to warnings only so logs stay out of the REPL,
    // can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: cache_interval={}s, reap_interval={}s, base_url={}, pokedex_file={}",
        config.cache_interval,
        config.reap_interval,
        config.base_url,
        config.pokedex_file.display()
    );

    let cache = Cache::with_reap_period(config.cache_ttl(), config.reap_period());
    let client = PokeApiClient::from_config(&config, cache.clone())
        .context("failed to build HTTP client")?;

    let mut session = Session::with_pokedex_file(&config.pokedex_file).with_context(|| {
        format!(
            "failed to load Pokedex from {}",
            config.pokedex_file.display()
        )
    })?;

    let mut rng = StdRng::from_entropy();
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    let result = repl::run(stdin, &mut stdout, &mut session, &client, &mut rng).await;

    cache.close();
    info!("Pokedex shutdown complete");
    result.context("pokedex session ended with an error")
}
