//! Submission Snapshot CLI
//!
//! Snapshots submission statistics into a static report, optionally
//! refreshing and serving it continuously.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use submission_snapshot::{
    error::{AppError, Result},
    models::Config,
    pipeline::{self, SnapshotOptions},
    services::SubmittableClient,
    storage::LocalStorage,
};

/// Submittable submission snapshot
#[derive(Parser, Debug)]
#[command(
    name = "snapshot",
    version,
    about = "Snapshot Submittable submission statistics into a webpage"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "snapshot.toml", global = true)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch submissions and write the report
    Snapshot(SnapshotArgs),

    /// Validate configuration
    Validate,
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    /// Output path for the snapshot webpage (html file)
    #[arg(long)]
    output_path: PathBuf,

    /// Submittable API key
    #[arg(long, env = "SUBMITTABLE_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Limit the snapshot to this many submissions (useful for testing)
    #[arg(long)]
    limit: Option<usize>,

    /// Keep refreshing the report and serve it over HTTP
    #[cfg(feature = "serve")]
    #[arg(long)]
    serve: bool,

    #[cfg(feature = "serve")]
    #[command(flatten)]
    server: ServerArgs,
}

#[cfg(feature = "serve")]
#[derive(Args, Debug)]
struct ServerArgs {
    /// Address to bind the report server to
    #[arg(long)]
    host: Option<String>,

    /// Port for the report server
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Basic auth username for the report server
    #[arg(long, env = "SNAPSHOT_USERNAME")]
    username: Option<String>,

    /// Basic auth password for the report server
    #[arg(long, env = "SNAPSHOT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Seconds between snapshot refreshes
    #[arg(long)]
    refresh_interval: Option<u64>,
}

#[cfg(feature = "serve")]
impl ServerArgs {
    /// Layer command-line and environment overrides onto the loaded config.
    fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.serve.host = host;
        }
        if let Some(port) = self.port {
            config.serve.port = port;
        }
        if self.username.is_some() {
            config.serve.username = self.username;
        }
        if self.password.is_some() {
            config.serve.password = self.password;
        }
        if let Some(secs) = self.refresh_interval {
            config.serve.refresh_interval_secs = secs;
        }
        config
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Snapshot(args) => {
            #[cfg(feature = "serve")]
            let config = args.server.apply(config);

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            if args.api_key.trim().is_empty() {
                return Err(AppError::config("API key is empty"));
            }

            let client = SubmittableClient::new(&config.api, args.api_key)?;
            let storage = LocalStorage::new(&args.output_path);
            let options = SnapshotOptions::from_config(&config, args.limit);

            #[cfg(feature = "serve")]
            {
                use std::sync::Arc;

                if args.serve {
                    return pipeline::run_serve(
                        Arc::new(client),
                        Arc::new(storage),
                        options,
                        &config.serve,
                    )
                    .await;
                }
            }

            let summary = pipeline::run_snapshot(&client, &storage, &options).await?;
            log::info!(
                "Generated a snapshot with {} submissions and {} submitters to '{}'.",
                summary.submission_count,
                summary.submitter_count,
                summary.location
            );
        }

        Command::Validate => {
            log::info!("Validating configuration from {}...", cli.config.display());

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
            log::info!("    API: {}", config.api.base_url);
            log::info!(
                "    Page size: {}, batch size: {}",
                config.api.page_size,
                config.api.batch_size
            );
            log::info!("    Serve: {}:{}", config.serve.host, config.serve.port);
        }
    }

    Ok(())
}
