//! wayfarer CLI binary entry point.

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use wayfarer::cli::{self, Cli};
use wayfarer::prelude::*;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wayfarer=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = cli.apply(ProviderSettings::from_env()?);
    let config = AgentConfiguration::new(DEFAULT_INSTRUCTIONS, travel_tools()?, settings);
    let session = AgentSession::connect(config)?;

    let prompt = match cli.destination.as_deref() {
        Some(destination) => Prompt::for_destination(Some(destination)),
        None => cli::ask_destination(&mut std::io::stdin().lock(), &mut std::io::stdout())?,
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let mut options = RunOptions::new().with_cancel(cancel);
    if let Some(timeout) = cli.timeout() {
        options = options.with_timeout(timeout);
    }

    let fragments = session.run(&prompt, options)?;
    let mut renderer = StreamRenderer::new(std::io::stdout()).with_pace(cli.pace());
    let outcome = renderer.render(fragments).await;
    cli::close_output(&mut renderer.into_inner(), outcome)
}
