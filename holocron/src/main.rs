use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use holocron::{load_dataset, load_mapping, to_pretty_json, write_json};
use holocron_core::supplementary::DEFAULT_LOOKUP_KEY;
use holocron_core::{
    EntityBuilder, EntityKind, HolocronConfig, MappingSpecs, ResourceCache, Resolver,
    SupplementaryData, SwapiClient,
};

#[derive(Parser)]
#[command(name = "holocron")]
#[command(about = "Fetch, cache and normalize Star Wars API records", long_about = None)]
struct Cli {
    /// Cache document (overrides HOLOCRON_CACHE_PATH)
    #[arg(long, global = true)]
    cache_file: Option<PathBuf>,

    /// API root URL (overrides HOLOCRON_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Request timeout in seconds (overrides HOLOCRON_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Mapping overrides, JSON or YAML
    #[arg(long, global = true)]
    mapping: Option<PathBuf>,

    /// Supplementary planet records for nested homeworlds
    #[arg(long, global = true)]
    planets: Option<PathBuf>,

    /// Supplementary species records for nested species
    #[arg(long, global = true)]
    species: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one resource and print (or write) its normalized entity
    Entity {
        /// Entity kind (droid, person, planet, species, starship)
        kind: EntityKind,

        /// Resource locator
        #[arg(long, conflicts_with = "search", required_unless_present = "search")]
        url: Option<String>,

        /// Search term; the first match is used
        #[arg(long)]
        search: Option<String>,

        /// Supplementary records for this kind
        #[arg(long)]
        supplementary: Option<PathBuf>,

        /// Field matching supplementary records to API records
        #[arg(long, default_value = DEFAULT_LOOKUP_KEY)]
        key: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Normalize every record of a local dataset
    Build {
        /// Entity kind of the records
        kind: EntityKind,

        /// Raw records, JSON array or CSV
        input: PathBuf,

        /// Supplementary records for this kind
        #[arg(long)]
        supplementary: Option<PathBuf>,

        /// Field matching supplementary records to raw records
        #[arg(long, default_value = DEFAULT_LOOKUP_KEY)]
        key: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Inspect or reset the cache document
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Print the effective mapping specifications
    Mapping,
}

#[derive(Subcommand)]
enum CacheAction {
    /// File location and counters of the opened cache
    Stats,

    /// List cached keys
    Keys,

    /// Remove every entry
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "holocron=info,holocron_core=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Entity {
            kind,
            ref url,
            ref search,
            ref supplementary,
            ref key,
            ref out,
        } => {
            let cache = ResourceCache::open(&config, SwapiClient::new()?)?;
            let builder = create_builder(&cli, &config)?;
            let mut datasets = load_reference_datasets(&cli)?;
            if let Some(path) = supplementary {
                datasets.insert(kind, key.as_str(), load_dataset(path)?);
            }

            let resolver = Resolver::new(&cache, &builder, &datasets);
            let entity = match (url, search) {
                (Some(url), _) => resolver.entity(kind, url).await?,
                (None, Some(term)) => {
                    resolver
                        .search(kind, &kind.endpoint(&config.api_base), term)
                        .await?
                }
                (None, None) => bail!("either --url or --search is required"),
            };

            emit(out.as_ref(), &entity)?;
            info!("{}", cache.stats().await);
        }

        Commands::Build {
            kind,
            ref input,
            ref supplementary,
            ref key,
            ref out,
        } => {
            let cache = ResourceCache::open(&config, SwapiClient::new()?)?;
            let builder = create_builder(&cli, &config)?;
            let mut datasets = load_reference_datasets(&cli)?;
            if let Some(path) = supplementary {
                datasets.insert(kind, key.as_str(), load_dataset(path)?);
            }

            let raws = load_dataset(input)?;
            let resolver = Resolver::new(&cache, &builder, &datasets);

            let mut entities = Vec::with_capacity(raws.len());
            for raw in &raws {
                let overlay = datasets.lookup(kind, raw);
                entities.push(resolver.from_raw(kind, raw, overlay).await?);
            }

            info!("Built {} {} entities", entities.len(), kind);
            emit(out.as_ref(), &entities)?;
            info!("{}", cache.stats().await);
        }

        Commands::Cache { ref action } => {
            let cache = ResourceCache::open(&config, SwapiClient::new()?)?;

            match action {
                CacheAction::Stats => {
                    println!("Cache: {:?}", config.cache_path);
                    println!("  {}", cache.stats().await);
                }
                CacheAction::Keys => {
                    for key in cache.keys().await {
                        println!("{}", key);
                    }
                }
                CacheAction::Clear => {
                    let removed = cache.clear().await?;
                    println!("Removed {} entries from {:?}", removed, config.cache_path);
                }
            }
        }

        Commands::Mapping => {
            let builder = create_builder(&cli, &config)?;
            println!("{}", to_pretty_json(builder.specs())?);
        }
    }

    Ok(())
}

/// Environment (and `.env`) first, command-line flags on top
fn load_config(cli: &Cli) -> Result<HolocronConfig> {
    let mut config = HolocronConfig::from_env()?;

    if let Some(path) = &cli.cache_file {
        config.cache_path = path.clone();
    }
    if let Some(api_base) = &cli.api_base {
        config.api_base = api_base.trim_end_matches('/').to_string();
    }
    if let Some(secs) = cli.timeout {
        config.timeout = Duration::from_secs(secs);
    }

    config.validate()?;
    Ok(config)
}

fn create_builder(cli: &Cli, config: &HolocronConfig) -> Result<EntityBuilder> {
    let specs = match &cli.mapping {
        Some(path) => load_mapping(path)?,
        None => MappingSpecs::default(),
    };
    Ok(EntityBuilder::new(specs, config.null_markers.clone())?)
}

fn load_reference_datasets(cli: &Cli) -> Result<SupplementaryData> {
    let mut datasets = SupplementaryData::new();
    if let Some(path) = &cli.planets {
        datasets.insert(EntityKind::Planet, DEFAULT_LOOKUP_KEY, load_dataset(path)?);
    }
    if let Some(path) = &cli.species {
        datasets.insert(EntityKind::Species, DEFAULT_LOOKUP_KEY, load_dataset(path)?);
    }
    Ok(datasets)
}

fn emit<T: serde::Serialize + ?Sized>(out: Option<&PathBuf>, value: &T) -> Result<()> {
    match out {
        Some(path) => {
            write_json(path, value)?;
            println!("Wrote {:?}", path);
        }
        None => println!("{}", to_pretty_json(value)?),
    }
    Ok(())
}
