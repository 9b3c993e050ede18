//! `deckcrew run`: execute the crew and save the deliverable.

use crate::{config::DeckConfig, pipeline};
use anyhow::{Context, Result};
use llm::LlmBackend;
use runtime::{CancellationToken, FileSink};

/// Exit status after a forced interrupt.
const INTERRUPTED: i32 = 130;

/// Run the configured pipeline once.
pub async fn run(config: &DeckConfig) -> Result<()> {
    let crew = pipeline::load(config.pipeline.as_deref())?
        .build(LlmBackend::from_config(&config.llm)?)
        .context("invalid pipeline")?;

    let vars = config.variables();
    println!("Starting crew...");
    println!("The topic for the presentation is: {}", config.run.topic);

    let cancel = CancellationToken::new();
    let guard = cancel.clone();
    tokio::spawn(async move {
        if watch_interrupts(tokio::signal::ctrl_c, guard).await {
            tracing::error!("interrupted again, exiting");
            std::process::exit(INTERRUPTED);
        }
    });

    let output = crew.run(&vars, &cancel).await?;
    let path = config.output.path();
    println!("Crew finished. Output:\n\n{}\n", output.raw);

    output
        .save(&FileSink, &path.to_string_lossy())
        .await
        .with_context(|| format!("failed to save output to {}", path.display()))?;
    println!("The output has been saved to: {}", path.display());
    Ok(())
}

/// Cancel the run on the first interrupt. Returns `true` once a second
/// interrupt arrives, `false` if the signal source fails.
pub async fn watch_interrupts<F, Fut>(mut interrupt: F, cancel: CancellationToken) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    if interrupt().await.is_err() {
        return false;
    }
    tracing::warn!("interrupted, stopping after the current task");
    cancel.cancel();
    interrupt().await.is_ok()
}
