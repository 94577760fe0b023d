use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand};
use quiz_studio::{load_quiz_draft, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file (defaults to ./quiz-studio.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Root URL of the quiz service
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Value of the `session_id` cookie of a logged-in user
    #[arg(long, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new quiz, or edit an existing one
    Edit {
        /// JSON file with the quiz to edit
        #[arg(short, long)]
        quiz: Option<PathBuf>,
    },
    /// Browse, search and delete quizzes
    Browse,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())
        .context("failed to load configuration")?
        .with_overrides(args.base_url, args.session);

    init_logging(&config)?;
    tracing::info!(base_url = %config.base_url, "starting quiz-studio");

    match args.command {
        Command::Edit { quiz } => {
            let draft = quiz.map(load_quiz_draft).transpose()?;
            quiz_studio::run_editor(&config, draft).await?;
        }
        Command::Browse => quiz_studio::run_browser(&config).await?,
    }

    Ok(())
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("failed to create log file {}", config.log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quiz_studio=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}
