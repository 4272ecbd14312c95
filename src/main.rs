use irplane::{demo, init_logging, load_config, RulerMode};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(path.as_deref())?;
    tracing::info!(
        "irplane {} replaying demo drag in {} mode",
        irplane::VERSION,
        config.ruler.mode
    );

    if config.ruler.mode == RulerMode::Disabled {
        tracing::warn!("Ruler is disabled; nothing to replay");
        return Ok(());
    }

    let events = demo::replay(&config).await?;
    tracing::info!("Replay finished with {} ruler events", events);
    Ok(())
}
