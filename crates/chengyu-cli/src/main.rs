//! chengyu CLI: study and quiz drill for Chinese idioms.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use chengyu_core::model::QuizVariant;

mod commands;

#[derive(Parser)]
#[command(name = "chengyu", version, about = "Chinese idiom study and quiz drill")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive drill session
    Drill {
        /// Start in quiz mode instead of study mode
        #[arg(long)]
        quiz: bool,

        /// Prompt variant: meaning, example, mixed
        #[arg(long)]
        variant: Option<QuizVariant>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the session summary as JSON on exit
        #[arg(long)]
        json_summary: bool,
    },

    /// Print the difficulty tier of an idiom
    Classify {
        /// The idiom
        word: String,

        /// Its explanation
        explanation: String,
    },

    /// Fetch idioms from the configured source and list them
    Sample {
        /// Number of idioms to fetch
        #[arg(long, default_value = "5")]
        count: usize,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and dataset
    Init,
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chengyu=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Drill {
            quiz,
            variant,
            config,
            json_summary,
        } => commands::drill::execute(quiz, variant, config, json_summary).await,
        Commands::Classify { word, explanation } => {
            commands::classify::execute(word, explanation)
        }
        Commands::Sample { count, config } => commands::sample::execute(count, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
