use clap::{Args, Subcommand};

use studywell::wellness::MetricsUpdate;

#[derive(Subcommand)]
pub enum Commands {
    /// Show metrics, pet, goals and the overall wellness score
    Status {
        /// Print the state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest an action for the given metrics
    Recommend {
        #[command(flatten)]
        metrics: MetricArgs,
    },
    /// Show a week of events with mental load estimates
    Calendar {
        /// First day of the week (YYYY-MM-DD), defaults to the sample week
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
        /// Ask the assistant for a plan for that day
        #[arg(long)]
        plan: bool,
        #[arg(long)]
        provider: Option<String>,
        #[arg(long)]
        model: Option<String>,
    },
    /// Browse the anonymous community board
    Community {
        /// nutrition, sleep, focus, motivation, anxiety or general
        #[arg(long, default_value = "general")]
        category: String,
    },
    /// Send one message to the assistant
    Chat {
        message: String,
        #[arg(long)]
        provider: Option<String>,
        #[arg(long)]
        model: Option<String>,
    },
    /// Interactive session with pet decay running in the background
    Shell {
        #[arg(long)]
        provider: Option<String>,
        #[arg(long)]
        model: Option<String>,
    },
}

/// Optional metric overrides shared by commands that read metrics
#[derive(Args, Debug, Default)]
pub struct MetricArgs {
    #[arg(long)]
    pub mood: Option<f64>,
    #[arg(long)]
    pub energy: Option<f64>,
    #[arg(long)]
    pub stress: Option<f64>,
    #[arg(long)]
    pub sleep: Option<f64>,
    #[arg(long)]
    pub water: Option<f64>,
    #[arg(long)]
    pub anxiety: Option<f64>,
}

impl From<MetricArgs> for MetricsUpdate {
    fn from(args: MetricArgs) -> Self {
        MetricsUpdate {
            mood: args.mood,
            energy: args.energy,
            stress: args.stress,
            sleep: args.sleep,
            water: args.water,
            anxiety: args.anxiety,
        }
    }
}
