use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::{Context, bail};
use clap::{CommandFactory, Parser};
use tracing::{info, warn};

use quizboard::{
    board::{self, ColumnMapping},
    config::{Options, WrongAnswerPolicy},
    game::Game,
    tui::{self, App},
};

/// Quiz board for a live host and two teams
#[derive(Debug, Parser)]
#[command(name = "quizboard", version, about)]
struct Cli {
    /// Clue file to play; without it the clue directory is scanned
    file: Option<PathBuf>,

    /// Configuration file (defaults to ./quizboard.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read the prompt from the answer column, as archive files do
    #[arg(long)]
    archive: bool,

    /// Wrong answers leave the score unchanged
    #[arg(long)]
    no_penalty: bool,

    /// Directory scanned for clue files
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Errors only
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the final standings as JSON
    #[arg(long)]
    summary_json: bool,
}

impl Cli {
    /// Applies flags on top of the loaded options
    fn apply(&self, options: &mut Options) {
        if self.archive {
            options.columns = ColumnMapping::Archive;
        }
        if self.no_penalty {
            options.wrong_answer = WrongAnswerPolicy::NoPenalty;
        }
        if let Some(dir) = &self.dir {
            options.question_dir.clone_from(dir);
        }
    }
}

fn main() {
    if let Err(error) = run() {
        eprintln!("quizboard error: {error:#}");
        eprintln!("{}", Cli::command().render_usage());
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let mut options = Options::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply(&mut options);

    let mut app = match &cli.file {
        Some(path) => {
            let report = board::load_report(path, options.columns)
                .with_context(|| format!("failed to load clue file {}", path.display()))?;
            if report.board.is_empty() {
                warn!(path = %path.display(), "clue file has no usable rows");
            }
            let files = board::discover_files(
                &options.question_dir,
                &options.file_prefix,
                &options.file_extension,
            )
            .unwrap_or_else(|error| {
                warn!(%error, "could not scan clue directory");
                Vec::new()
            });
            let game = Game::new(report.board, options).context("invalid team names")?;
            App::new(game, files)
        }
        None => {
            let files = board::discover_files(
                &options.question_dir,
                &options.file_prefix,
                &options.file_extension,
            )
            .with_context(|| {
                format!("failed to scan clue directory {}", options.question_dir.display())
            })?;
            if files.is_empty() {
                bail!(
                    "no clue files named {}*.{} in {}",
                    options.file_prefix,
                    options.file_extension,
                    options.question_dir.display()
                );
            }
            let game = Game::with_file_selection(files.clone(), options)
                .context("invalid team names")?;
            App::new(game, files)
        }
    };

    tui::run(&mut app).context("terminal failure")?;

    let summary = app.into_game().summary();
    info!(winner = ?summary.winner, "session ended");
    if cli.summary_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("failed to serialize summary")?
        );
    } else {
        println!("{summary}");
    }

    Ok(())
}

/// Installs the log subscriber
///
/// The terminal is in raw mode while the board is up, so logs only go to a
/// file when one is given.
fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("QUIZBOARD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false);

    let result = match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::sink).try_init(),
    };

    result.map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}
