use clap::Parser;
use dotenvy::dotenv;
use material_tracker::{cli, config, errors::Result, store::Store};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Initialize tracing on stderr so command output stays on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Parse arguments before touching any files
    let cli = cli::Cli::parse();

    // 4. Load settings
    let settings = config::load_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    info!(
        data_dir = ?settings.data_dir,
        report_sources = settings.report_sources.len(),
        "Settings loaded"
    );

    // 5. Open the data directory
    let mut store = Store::open(&settings.data_dir)
        .inspect_err(|e| error!("Failed to open data directory: {}", e))?;

    // 6. Run the command
    cli::run(cli, &settings, &mut store).inspect_err(|e| error!("{}", e))
}
