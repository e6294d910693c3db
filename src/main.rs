use anyhow::{Context, Result};
use clap::Parser;
use pong::cli::Args;
use pong::{AppConfig, IcmpProber, LoopSettings, ProbeLoop, TerminalRenderer, interrupt};
use tokio_util::sync::CancellationToken;

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("pong: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let settings = args.settings().context("invalid arguments")?;
    let config = AppConfig::load(args.config.as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    runtime.block_on(monitor(settings, config))
}

async fn monitor(settings: LoopSettings, config: AppConfig) -> Result<()> {
    let prober = IcmpProber::connect(&settings.host).await?;
    log::info!("{} resolved to {}", settings.host, prober.target_ip());

    let cancel = CancellationToken::new();
    interrupt::install(cancel.clone()).context("failed to install the Ctrl+C handler")?;

    let mut probe_loop = ProbeLoop::new(settings, config, prober, TerminalRenderer::stdout());
    probe_loop
        .run(&cancel)
        .await
        .context("failed to draw to the terminal")?;
    Ok(())
}
