//! # Curator — reference document selection for prompt context
//!
//! Usage:
//!   curator context --use-case lesson-plan --query "3rd grade math"
//!   curator explain --use-case profile-summary --query "loves her family"
//!   curator profiles --dump                      # built-ins + config, as TOML
//!   curator import --from corpus.json --db ~/.curator/curator.db

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use curator_core::{CalesCriteria, CuratorConfig, DocumentStore, StructuredCriteria, UseCaseProfile};
use curator_engine::{ProfileRegistry, RelevanceEngine};
use curator_store::{JsonFileStore, SqliteStore};

#[derive(Parser)]
#[command(name = "curator", version, about = "📚 Curator — category-diverse reference context for LLM prompts")]
struct Cli {
    /// JSON corpus file (overrides the configured store)
    #[arg(long)]
    corpus: Option<String>,

    /// SQLite document database (overrides the configured store)
    #[arg(long)]
    db: Option<String>,

    /// Config file
    #[arg(short, long)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the formatted context for a query
    Context(QueryArgs),
    /// Print the full selection (scores, categories) as JSON
    Explain(QueryArgs),
    /// List the available use-case profiles
    Profiles {
        /// Dump the profiles as TOML instead of a summary table
        #[arg(long)]
        dump: bool,
    },
    /// Load a JSON corpus into a SQLite database
    Import {
        /// JSON corpus file
        #[arg(long)]
        from: String,
        /// Target database
        #[arg(long, default_value = "~/.curator/curator.db")]
        db: String,
    },
}

#[derive(Args)]
struct QueryArgs {
    /// Use case (profile name)
    #[arg(short, long, default_value = curator_engine::LESSON_PLAN)]
    use_case: String,

    /// Query text
    #[arg(short, long, default_value = "")]
    query: String,

    /// CALES criteria names, comma-separated
    #[arg(long, value_delimiter = ',')]
    criteria: Vec<String>,

    #[arg(long)]
    subject: Option<String>,

    #[arg(long)]
    grade: Option<String>,
}

impl QueryArgs {
    fn structured(&self) -> Option<StructuredCriteria> {
        if self.criteria.is_empty() && self.subject.is_none() && self.grade.is_none() {
            return None;
        }
        Some(StructuredCriteria {
            framework: CalesCriteria::from_names(&self.criteria),
            subject: self.subject.clone(),
            grade: self.grade.clone(),
            extra_terms: Vec::new(),
        })
    }
}

#[derive(Serialize)]
struct ProfileDump<'a> {
    profiles: Vec<&'a UseCaseProfile>,
}

fn expand_path(p: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(p).to_string())
}

fn load_config(path: Option<&str>) -> Result<CuratorConfig> {
    let config = match path {
        Some(p) => CuratorConfig::load_from(&expand_path(p))?,
        None => CuratorConfig::load()?,
    };
    Ok(config)
}

fn open_store(cli: &Cli, config: &CuratorConfig) -> Result<Arc<dyn DocumentStore>> {
    if let Some(db) = &cli.db {
        return Ok(Arc::new(SqliteStore::open(&expand_path(db))?));
    }
    if let Some(corpus) = &cli.corpus {
        return Ok(Arc::new(JsonFileStore::new(&expand_path(corpus))));
    }
    let path = expand_path(&config.store.path);
    Ok(curator_store::create_store(&config.store.backend, &path)?)
}

async fn import(from: &Path, db: &Path) -> Result<()> {
    let docs = JsonFileStore::new(from)
        .load_all()
        .await
        .with_context(|| format!("reading {}", from.display()))?;
    let store = SqliteStore::open(db)?;
    let written = store.upsert_all(&docs)?;
    println!("✅ Imported {written} of {} documents into {}", docs.len(), db.display());
    println!("   Total in database: {}", store.count()?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "curator=debug,curator_engine=debug,curator_store=debug"
    } else {
        "curator=info,curator_engine=warn,curator_store=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;
    let registry = ProfileRegistry::from_config(&config);
    tracing::debug!("📋 {} profiles available", registry.count());

    match &cli.command {
        Command::Context(args) => {
            let engine = RelevanceEngine::with_profiles(open_store(&cli, &config)?, registry);
            let criteria = args.structured();
            let text = engine
                .get_relevant_context(&args.query, &args.use_case, criteria.as_ref())
                .await;
            println!("{text}");
        }
        Command::Explain(args) => {
            let engine = RelevanceEngine::with_profiles(open_store(&cli, &config)?, registry);
            let criteria = args.structured();
            let result = engine
                .explain(&args.query, &args.use_case, criteria.as_ref())
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Profiles { dump } => {
            let profiles = registry.list();
            if *dump {
                print!("{}", toml::to_string_pretty(&ProfileDump { profiles })?);
            } else {
                println!("📋 {} profiles:", profiles.len());
                for p in profiles {
                    let min = p
                        .min_category_diversity
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "-".into());
                    let doc_type = p
                        .document_type
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "any".into());
                    println!(
                        "  {:<18} bound={} min-diversity={} type={:<12} {}",
                        p.name, p.output_bound, min, doc_type, p.description
                    );
                }
            }
        }
        Command::Import { from, db } => {
            import(&expand_path(from), &expand_path(db)).await?;
        }
    }

    Ok(())
}
