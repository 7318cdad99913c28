mod lookup;
mod report;

use clap::{Parser, Subcommand, ValueEnum};
use shelter_core::AppConfig;
use tracing_subscriber::EnvFilter;

use crate::lookup::{LocationArgs, Locator, NearestOutput};

#[derive(Debug, Parser)]
#[command(name = "shelter-cli")]
#[command(about = "Find the nearest emergency shelters in Jerusalem")]
struct Cli {
    /// Catalog file path or URL (overrides `SHELTER_CATALOG_SOURCE`)
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the nearest shelters to an address or coordinates
    Nearest {
        #[command(flatten)]
        location: LocationArgs,
        /// Maximum number of shelters to list
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print a printable sheet of the nearest shelters
    Report {
        #[command(flatten)]
        location: LocationArgs,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the reverse-geocoded label for a position
    Describe {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Summarize the loaded shelter catalog
    Catalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // Logs go to stderr so `--format json` output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn result_limit(requested: Option<usize>, config: &AppConfig) -> anyhow::Result<usize> {
    match requested {
        Some(0) => anyhow::bail!("--limit must be at least 1"),
        Some(n) => Ok(n),
        None => Ok(config.result_limit),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = shelter_core::load_app_config()?;
    if let Some(source) = cli.catalog {
        config.catalog_source = source;
    }
    init_tracing(&config)?;

    match cli.command {
        Commands::Nearest {
            location,
            limit,
            format,
        } => {
            let limit = result_limit(limit, &config)?;
            let catalog = lookup::load_catalog(&config).await?;
            let locator = Locator::from_config(&config)?;
            let (resolved, ranked) = lookup::nearest(&locator, &catalog, &location, limit).await?;
            match format {
                OutputFormat::Text => println!("{}", lookup::render_text(&resolved, &ranked)),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&NearestOutput::new(&resolved, &ranked))?
                ),
            }
        }
        Commands::Report { location, limit } => {
            let limit = result_limit(limit, &config)?;
            let catalog = lookup::load_catalog(&config).await?;
            let locator = Locator::from_config(&config)?;
            let (resolved, ranked) = lookup::nearest(&locator, &catalog, &location, limit).await?;
            print!(
                "{}",
                report::render_report(&resolved, &ranked, chrono::Utc::now())?
            );
        }
        Commands::Describe { lat, lon } => {
            let locator = Locator::from_config(&config)?;
            println!("{}", lookup::describe(&locator, lat, lon).await?);
        }
        Commands::Catalog => {
            let catalog = lookup::load_catalog(&config).await?;
            println!("source:   {}", config.catalog_source);
            println!("shelters: {}", catalog.len());
            println!("skipped:  {}", catalog.skipped());
            if catalog.is_empty() {
                tracing::warn!("catalog contains no usable shelters");
            }
        }
    }

    Ok(())
}
