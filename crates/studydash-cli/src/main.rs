use clap::{Parser, Subcommand};
use studydash_core::{Config, PomodoroMode};
use tracing_subscriber::EnvFilter;

mod bell;
mod commands;
mod render;

#[derive(Parser)]
#[command(name = "studydash", version, about = "Studydash CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a month calendar with today marked
    Calendar {
        /// Month to show, e.g. "2024-02" (defaults to the current month)
        #[arg(long, value_name = "YYYY-MM")]
        month: Option<String>,
        /// Print the grid as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run one Pomodoro countdown in the foreground
    Pomodoro {
        /// focus, short or long
        #[arg(long, default_value = "focus")]
        mode: PomodoroMode,
    },
    /// Interactive dashboard (tasks, progress, Pomodoro, alarms)
    Session,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completion scripts
    Completions {
        shell: clap_complete::Shell,
    },
}

/// Log to stderr so command output on stdout stays clean.
/// `RUST_LOG` wins over the configured level.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_logging(&config);

    let result = match cli.command {
        Commands::Calendar { month, json } => commands::calendar::run(month.as_deref(), json),
        Commands::Pomodoro { mode } => commands::pomodoro::run(mode, &config),
        Commands::Session => commands::session::run(&config),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
