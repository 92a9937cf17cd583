use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::SeedableRng;

use threads_poster::config::Config;
use threads_poster::generator::ContentGenerator;
use threads_poster::llm::provider::OpenAIProvider;
use threads_poster::persona::memory::PersonaMemoryStore;

#[derive(Parser)]
#[command(name = "threads-poster", about = "Persona-driven social post generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one validated post and print it.
    Post {
        /// Upstream re-draft attempts when a draft fails or is rejected.
        /// Overrides MAX_RETRIES from the environment.
        #[arg(long)]
        retries: Option<u32>,
    },
    /// Delete all persona memories and re-seed the defaults.
    ResetMemory,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let store = PersonaMemoryStore::connect(&config.database_url).await?;
    store.seed_defaults().await?;

    match cli.command {
        Command::Post { retries } => {
            let attempts = retries.unwrap_or(config.max_retries).max(1);
            let provider = Arc::new(OpenAIProvider::new(
                config.openai_api_key.clone(),
                config.openai_base_url.clone(),
                Some(config.openai_model.clone()),
            ));
            let generator = ContentGenerator::new(provider, store, config);

            // thread_rng() is not Send, which generate_post requires
            let mut rng = rand::rngs::StdRng::from_entropy();
            let mut last_err = None;
            for attempt in 1..=attempts {
                match generator.generate_post(&mut rng).await {
                    Ok(post) => {
                        println!("{post}");
                        return Ok(());
                    }
                    Err(e) if e.should_retry() && attempt < attempts => {
                        tracing::warn!(error = %e, attempt, attempts, "attempt failed, requesting a fresh draft");
                        last_err = Some(e);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            // Unreachable unless every attempt consumed the retry branch.
            Err(last_err
                .map(Into::into)
                .unwrap_or_else(|| anyhow::anyhow!("no posting attempt was made")))
        }
        Command::ResetMemory => {
            store.reset().await?;
            println!("persona memories reset");
            Ok(())
        }
    }
}
