/// frameconv - convert positions and Euler angles between coordinate frames
///
/// Examples:
///   frameconv position --from +X+Y-Z --to -Y+Z+X 1 2 3
///   frameconv euler --from-axes +X+Y-Z --from-order -Z-X-Y \
///                   --to-axes -Y+Z+X --to-order +Z+Y+X 30 10 20
///   frameconv list --orders
///
/// Set RUST_LOG (e.g. RUST_LOG=frameconv_core=trace) for diagnostics.

use clap::Parser;
use frameconv_terminal::{run, Cli};
use std::io::stdout;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    run(&cli, &mut stdout().lock())
}
