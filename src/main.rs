use anyhow::Context;
use bytes::Bytes;
use clap::Parser;
use heritage_core::{Catalog, FeatureDescription, MonumentCatalog, MonumentId, OverrideTable, SignatureCatalog};
use heritage_engine::{
    EngineConfig, FeatureExtractor, RecognitionError, Recognizer, SidecarExtractor, StaticExtractor,
    NOT_RECOGNIZED_MESSAGE,
};
use heritage_matcher::{similar_monuments, CandidateSummary, ScoreStats, Scorer, DEFAULT_SIMILAR_LIMIT};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Identify a heritage monument from an extracted feature description
#[derive(Parser, Debug)]
#[command(name = "heritage-lens")]
#[command(about = "Identify heritage monuments from image features", long_about = None)]
struct Args {
    /// JSON feature description written by an external extractor
    #[arg(long)]
    features: Option<PathBuf>,

    /// Uploaded image; its file name doubles as the override hint
    #[arg(long)]
    image: Option<PathBuf>,

    /// Override hint (defaults to the image file name)
    #[arg(long)]
    hint: Option<String>,

    /// Signature catalog JSON (defaults to the built-in catalog)
    #[arg(long)]
    signatures: Option<PathBuf>,

    /// Monument catalog JSON (defaults to the built-in catalog)
    #[arg(long)]
    monuments: Option<PathBuf>,

    /// Override alias table JSON (defaults to the built-in table)
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Engine configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Vote across all configured strategies
    #[arg(long)]
    ensemble: bool,

    /// Print every scored candidate and summary statistics instead of a verdict
    #[arg(long)]
    explain: bool,

    /// List the override aliases and exit
    #[arg(long)]
    list_overrides: bool,

    /// List monuments related to this id and exit
    #[arg(long)]
    similar: Option<String>,

    /// Search monuments by name or location and exit
    #[arg(long)]
    search: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Serialize)]
struct ExplainReport {
    stats: ScoreStats,
    candidates: Vec<CandidateSummary>,
}

#[derive(Serialize)]
struct NoConsensusReport {
    status: &'static str,
    message: &'static str,
    failures: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries the JSON result
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Heritage Lens v{}", env!("CARGO_PKG_VERSION"));

    let monuments = match &args.monuments {
        Some(path) => MonumentCatalog::from_path(path).with_context(|| format!("loading {}", path.display()))?,
        None => MonumentCatalog::builtin()?,
    };
    let signatures = match &args.signatures {
        Some(path) => SignatureCatalog::from_path(path).with_context(|| format!("loading {}", path.display()))?,
        None => SignatureCatalog::builtin()?,
    };
    let overrides = match &args.overrides {
        Some(path) => OverrideTable::from_path(path).with_context(|| format!("loading {}", path.display()))?,
        None => OverrideTable::builtin()?,
    };
    let config = match &args.config {
        Some(path) => EngineConfig::from_path(path).with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let catalog = Catalog::new(monuments, signatures)?;
    info!("Catalog loaded: {} monuments, {} signatures", catalog.len(), catalog.signatures().len());

    if args.list_overrides {
        return print_json(overrides.entries());
    }

    if let Some(id) = &args.similar {
        let related = similar_monuments(&MonumentId::from(id.as_str()), &catalog, DEFAULT_SIMILAR_LIMIT);
        return print_json(&related);
    }

    if let Some(query) = &args.search {
        return print_json(&catalog.monuments().search(query));
    }

    let extractor: Arc<dyn FeatureExtractor> = match &args.features {
        Some(path) => Arc::new(SidecarExtractor::new(path)),
        None => {
            warn!("No --features given; only a manual override can identify a monument");
            Arc::new(StaticExtractor::new(FeatureDescription::default()))
        }
    };

    let image = match &args.image {
        Some(path) => Bytes::from(
            tokio::fs::read(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?,
        ),
        None => Bytes::new(),
    };
    let hint = args.hint.clone().or_else(|| args.image.as_deref().and_then(file_name));

    if args.explain {
        let features = extractor.extract(image).await?;
        let ranked = Scorer::new(config.weights).score(&features, &catalog);
        return print_json(&ExplainReport {
            stats: ScoreStats::compute(&ranked),
            candidates: CandidateSummary::from_scored_list(&ranked, &catalog),
        });
    }

    let recognizer = Recognizer::new(Arc::new(catalog), Arc::new(overrides), extractor, config)?;

    let result = if args.ensemble {
        recognizer.recognize_ensemble(image, hint.as_deref()).await
    } else {
        recognizer.recognize(image, hint.as_deref()).await
    };

    match result {
        Ok(outcome) => print_json(&outcome),
        Err(RecognitionError::NoConsensus { failures }) => print_json(&NoConsensusReport {
            status: "not_recognized",
            message: NOT_RECOGNIZED_MESSAGE,
            failures: failures.iter().map(|f| f.to_string()).collect(),
        }),
        Err(e) => Err(e.into()),
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
