mod cli;
mod shell;
mod status;

use std::path::PathBuf;

use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use cli::Commands;

#[derive(Parser)]
#[command(name = "studywell")]
#[command(about = "Student wellness companion with a virtual pet and chat assistant")]
#[command(version)]
struct Args {
    /// Directory holding config.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let data_dir = args.data_dir;

    let result = match args.command {
        Commands::Status { json } => cli::handle_status(json, data_dir).await,
        Commands::Recommend { metrics } => cli::handle_recommend(metrics, data_dir).await,
        Commands::Calendar { date, plan, provider, model } => {
            cli::handle_calendar(date, plan, provider, model, data_dir).await
        }
        Commands::Community { category } => cli::handle_community(category).await,
        Commands::Chat { message, provider, model } => {
            cli::handle_chat(message, provider, model, data_dir).await
        }
        Commands::Shell { provider, model } => shell::handle_shell(provider, model, data_dir).await,
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "❌ Error:".red().bold(), e);
        std::process::exit(1);
    }
}
