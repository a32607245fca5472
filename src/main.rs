//! Occupation coder CLI.
//! Reads survey records as JSON lines (file or stdin), classifies them in
//! parallel and writes one JSON result per line to stdout. Logs go to stderr.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use occupation_coder::metrics::Metrics;
use occupation_coder::{
    ClassificationQuery, CodingEngine, MatcherConfig, OverrideTable, Taxonomy,
};

#[derive(Debug, Parser)]
#[command(name = "occupation-coder", version, about)]
struct Args {
    /// Catalogue file (.csv or .json table)
    #[arg(long, env = "OCCUPATION_TAXONOMY_PATH")]
    taxonomy: PathBuf,

    /// Curated overrides (.json records or .csv table)
    #[arg(long, env = "OCCUPATION_OVERRIDES_PATH")]
    overrides: Option<PathBuf>,

    /// Matcher config TOML; defaults to OCCUPATION_CONFIG_PATH or config/matcher.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON lines of records; stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Print Prometheus metrics to stderr after the batch
    #[arg(long, env = "OCCUPATION_METRICS", default_value_t = false)]
    metrics: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("occupation=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(io::stderr))
        .init();
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn load_taxonomy(path: &Path) -> Result<Taxonomy> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading taxonomy {}", path.display()))?;
    let taxonomy = match extension(path).as_str() {
        "csv" => Taxonomy::from_csv_str(&raw),
        "json" => Taxonomy::from_json_str(&raw),
        other => bail!("unsupported taxonomy format {other:?} ({})", path.display()),
    };
    taxonomy.with_context(|| format!("parsing taxonomy {}", path.display()))
}

fn load_overrides(path: Option<&Path>) -> Result<OverrideTable> {
    let Some(path) = path else {
        return Ok(OverrideTable::new());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading overrides {}", path.display()))?;
    let table = match extension(path).as_str() {
        "csv" => occupation_coder::taxonomy::CatalogueTable::from_csv_str(&raw)
            .and_then(|t| OverrideTable::from_table(&t)),
        "json" => OverrideTable::from_json_str(&raw),
        other => bail!("unsupported overrides format {other:?} ({})", path.display()),
    };
    table.with_context(|| format!("parsing overrides {}", path.display()))
}

fn read_queries(input: Option<&Path>) -> Result<Vec<ClassificationQuery>> {
    let reader: Box<dyn BufRead> = match input {
        Some(p) => Box::new(BufReader::new(
            fs::File::open(p).with_context(|| format!("opening input {}", p.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut queries = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line.context("reading input")?;
        if line.trim().is_empty() {
            continue;
        }
        let q: ClassificationQuery = serde_json::from_str(&line)
            .with_context(|| format!("input line {} is not a JSON record", n + 1))?;
        queries.push(q);
    }
    Ok(queries)
}

fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();
    init_tracing();
    let args = Args::parse();

    let metrics = if args.metrics { Some(Metrics::init()?) } else { None };

    let config = match &args.config {
        Some(p) => {
            let mut cfg = MatcherConfig::from_path(p)
                .with_context(|| format!("loading matcher config {}", p.display()))?;
            cfg.apply_env();
            cfg
        }
        None => MatcherConfig::load().context("loading matcher config")?,
    };

    let taxonomy = load_taxonomy(&args.taxonomy)?;
    let overrides = load_overrides(args.overrides.as_deref())?;
    let engine = CodingEngine::new(taxonomy, overrides, config).context("building engine")?;

    let queries = read_queries(args.input.as_deref())?;
    let results = engine.classify_batch(&queries);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for r in &results {
        serde_json::to_writer(&mut out, r)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    info!(target: "occupation", records = results.len(), "batch done");

    if let Some(m) = metrics {
        eprintln!("{}", m.render());
    }
    Ok(())
}
