use clap::Parser;
use salient_cli::{Cli, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    salient_telemetry::init_telemetry(&cli.telemetry_config())?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(cli, &mut stdin.lock(), &mut stdout.lock()).inspect_err(|e| {
        tracing::error!(error = %e, "command failed");
    })
}
