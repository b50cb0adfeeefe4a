use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vreg_app::Cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(files = cli.files.len(), json = cli.json, "ovpn-check starting");

    let status = vreg_app::run(&cli, &mut std::io::stdout(), &mut std::io::stderr());
    ExitCode::from(status)
}
