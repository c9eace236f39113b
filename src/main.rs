use clap::Parser;
use stakebook::cli::Cli;
use stakebook::config::AppConfig;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config problems are never fatal: fall back to defaults and say so
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("warning: failed to load config ({err}), using defaults");
            AppConfig::default()
        }
    };
    init_logging(&config);
    if let Err(errors) = config.validate() {
        for error in &errors {
            warn!("config: {error}");
        }
    }

    cli.run(&config)
}

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,stakebook={}", config.logging.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
