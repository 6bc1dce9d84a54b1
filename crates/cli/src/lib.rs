use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use leafturn_view::{PageTurner, ViewPhase, ViewportSize};
use pager_core::PagerConfig;
use score_engine::{default_engine, FixtureScore, ScoreSource};
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Frame ticks granted to the pipeline before giving up on a score.
const MAX_FRAMES: u32 = 240;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(name = "leafturn-cli")]
#[command(about = "LeafTurn CLI")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a machine-readable pagination summary for a score.
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long, default_value_t = 900.0)]
        width: f32,
        #[arg(long, default_value_t = 600.0)]
        height: f32,
        /// Write the JSON report to a file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the page plan, one line per page.
    Pages {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long, default_value_t = 900.0)]
        width: f32,
        #[arg(long, default_value_t = 600.0)]
        height: f32,
    },
    /// Print CLI version.
    Version,
}

#[derive(Debug, Serialize)]
struct InfoOutput {
    path: String,
    viewport: ViewportOutput,
    total_systems: usize,
    lines_per_page: usize,
    page_count: usize,
    pages: Vec<PageOutput>,
}

#[derive(Debug, Serialize)]
struct ViewportOutput {
    width: f32,
    height: f32,
}

#[derive(Debug, Serialize)]
struct PageOutput {
    page: usize,
    first_system: usize,
    last_system: usize,
    first_measure: Option<u32>,
    last_measure: Option<u32>,
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    match cli.command {
        Commands::Info { file, width, height, output } => {
            run_info(&file, width, height, output.as_deref())
        }
        Commands::Pages { file, width, height } => run_pages(&file, width, height),
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_info(file: &Path, width: f32, height: f32, output: Option<&Path>) -> Result<()> {
    let pages = paginate(file, width, height)?;

    let payload = InfoOutput {
        path: file.display().to_string(),
        viewport: ViewportOutput { width, height },
        total_systems: pages.total_systems,
        lines_per_page: pages.lines_per_page,
        page_count: pages.entries.len(),
        pages: pages.entries,
    };

    let json = serde_json::to_string_pretty(&payload)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            println!("{}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn run_pages(file: &Path, width: f32, height: f32) -> Result<()> {
    let pages = paginate(file, width, height)?;

    for entry in &pages.entries {
        let measures = match (entry.first_measure, entry.last_measure) {
            (Some(first), Some(last)) => format!(", measures {first}-{last}"),
            _ => String::new(),
        };
        println!(
            "page {}: systems {}-{}{measures}",
            entry.page, entry.first_system, entry.last_system
        );
    }

    Ok(())
}

struct PagePlan {
    total_systems: usize,
    lines_per_page: usize,
    entries: Vec<PageOutput>,
}

/// Run the full pipeline against the fixture engine and sweep every page.
fn paginate(file: &Path, width: f32, height: f32) -> Result<PagePlan> {
    ensure_score_exists(file)?;

    let bytes = fs::read(file)?;
    let _: FixtureScore =
        serde_json::from_slice(&bytes).context("failed to load score")?;

    let mut turner = PageTurner::new(
        default_engine(),
        PagerConfig::default(),
        ViewportSize::new(width, height),
    );

    let start = Instant::now();
    turner.mount(ScoreSource::Bytes(bytes), start);

    let mut now = start;
    for _ in 0..MAX_FRAMES {
        now += FRAME_INTERVAL;
        turner.on_frame(now);
        if turner.phase() == ViewPhase::Ready {
            break;
        }
    }

    if turner.phase() != ViewPhase::Ready {
        anyhow::bail!("score produced no measurable geometry");
    }

    let total_systems = turner.model().total_systems();
    let lines_per_page = turner.model().lines_per_page;
    let mut entries = Vec::new();

    turner.go_to_start();
    loop {
        let status = turner.status();
        let span = turner.page_measures();
        entries.push(PageOutput {
            page: status.page,
            first_system: turner.model().start_index + 1,
            last_system: turner.model().page_end() + 1,
            first_measure: span.map(|span| span.first),
            last_measure: span.map(|span| span.last),
        });

        let before = turner.model().start_index;
        turner.next_page();
        if turner.model().start_index == before {
            break;
        }
    }

    Ok(PagePlan { total_systems, lines_per_page, entries })
}

fn ensure_score_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("file does not exist: {}", path.display());
    }

    if !path.is_file() {
        anyhow::bail!("path is not a file: {}", path.display());
    }

    Ok(())
}
