mod config;
mod db;
mod error;
mod parser;
mod report;
mod server;
mod upstream;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::db::SqliteCache;
use crate::error::ApiError;
use crate::report::Report;
use crate::server::handlers::REPORT_TYPE;
use crate::server::AppState;
use crate::upstream::{Fetched, ReportHost, Upstream};

#[derive(Parser)]
#[command(name = "ip_report", about = "IP quality report parser and lookup service")]
struct Cli {
    /// Cache database (overrides IPREPORT_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Report host (overrides IPREPORT_REPORT_HOST)
    #[arg(long, global = true)]
    report_host: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP lookup service
    Serve {
        /// Listen address (overrides IPREPORT_LISTEN)
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Parse a local SVG report and print it as JSON
    Parse {
        file: PathBuf,
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
    /// Look up one report by hash, through the cache
    Fetch {
        hash: String,
        /// Always go to the report host and do not store the result
        #[arg(long)]
        no_cache: bool,
    },
    /// Parse every .svg in a directory into <name>.json files
    Batch {
        dir: PathBuf,
        /// Output directory (default: next to the inputs)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show cache statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    if let Some(db) = cli.db {
        settings.db_path = db;
    }
    if let Some(host) = cli.report_host {
        settings.report_host = host;
    }

    let result = match cli.command {
        Commands::Serve { listen } => {
            if let Some(listen) = listen {
                settings.listen = listen;
            }
            let state = app_state(&settings)?;
            server::serve(&settings.listen, state).await
        }
        Commands::Parse { file, compact } => {
            let svg = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            let report = parser::parse_svg(&svg);
            println!("{}", to_json(&report, compact)?);
            Ok(())
        }
        Commands::Fetch { hash, no_cache } => {
            let json = if no_cache {
                let host = ReportHost::new(&settings)?;
                match host.fetch_svg(&hash).await? {
                    Fetched::Svg(svg) => to_json(&parser::parse_svg(&svg), false)?,
                    Fetched::Rejected(status) => {
                        anyhow::bail!("Report host answered {} for {}", status, hash)
                    }
                }
            } else {
                let state = app_state(&settings)?;
                let value = match server::handlers::load_report(&state, REPORT_TYPE, &hash).await {
                    Ok(value) => value,
                    Err(ApiError::Internal(e)) => return Err(e),
                    Err(e) => anyhow::bail!("{}", e),
                };
                serde_json::to_string_pretty(&value)?
            };
            println!("{}", json);
            Ok(())
        }
        Commands::Batch { dir, out } => {
            let inputs = list_svgs(&dir)?;
            if inputs.is_empty() {
                println!("No .svg files in {:?}.", dir);
                return Ok(());
            }
            let out_dir = out.unwrap_or_else(|| dir.clone());
            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("Failed to create {:?}", out_dir))?;
            println!("Parsing {} reports...", inputs.len());
            let counts = parse_files(&inputs, &out_dir)?;
            counts.print();
            Ok(())
        }
        Commands::Stats => {
            let cache = SqliteCache::open(&settings.db_path)?;
            let s = cache.stats()?;
            println!("Database: {:?}", settings.db_path);
            println!("Entries:  {}", s.entries);
            println!("Size:     {} bytes", s.bytes);
            println!("Newest:   {}", s.newest.as_deref().unwrap_or("-"));
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        tracing::info!("Done in {}", format_duration(elapsed));
    }

    result
}

fn app_state(settings: &Settings) -> Result<AppState> {
    Ok(AppState {
        cache: Arc::new(SqliteCache::open(&settings.db_path)?),
        upstream: Arc::new(ReportHost::new(settings)?),
    })
}

fn to_json(report: &Report, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(report)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    Ok(json)
}

// ── Batch ──

struct BatchCounts {
    parsed: usize,
    failed: usize,
    empty: usize,
}

impl BatchCounts {
    fn print(&self) {
        println!(
            "Wrote {} reports ({} failed, {} with no IP found).",
            self.parsed, self.failed, self.empty,
        );
    }
}

fn list_svgs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list {:?}", dir))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("svg")))
        .collect();
    files.sort();
    Ok(files)
}

fn parse_files(inputs: &[PathBuf], out_dir: &Path) -> Result<BatchCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let results: Vec<(PathBuf, Result<Report>)> = inputs
        .par_iter()
        .map(|path| {
            let report = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {:?}", path))
                .map(|svg| parser::parse_svg(&svg));
            pb.inc(1);
            (path.clone(), report)
        })
        .collect();
    pb.finish_and_clear();

    let mut counts = BatchCounts {
        parsed: 0,
        failed: 0,
        empty: 0,
    };
    for (path, report) in results {
        let report = match report {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("{:#}", e);
                counts.failed += 1;
                continue;
            }
        };
        if report.ip.is_empty() {
            counts.empty += 1;
        }
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("report");
        let target = out_dir.join(format!("{}.json", stem));
        std::fs::write(&target, to_json(&report, false)?)
            .with_context(|| format!("Failed to write {:?}", target))?;
        counts.parsed += 1;
    }
    Ok(counts)
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
