use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "mindstudy", version, about = "MindStudy CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Onboarding profile (name + email)
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Session timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Study-plan wizard
    Plan(commands::plan::PlanArgs),
    /// Ask the study assistant
    Chat(commands::chat::ChatArgs),
    /// Break-time activities
    Relax(commands::relax::RelaxArgs),
    /// Flashcard session
    Cards,
    /// Reminder session
    Remind,
    /// Achievement log session
    Progress,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Timer { action } => commands::timer::run(action).await,
        Commands::Plan(args) => commands::plan::run(args).await,
        Commands::Chat(args) => commands::chat::run(args).await,
        Commands::Relax(args) => commands::relax::run(args).await,
        Commands::Cards => commands::cards::run(),
        Commands::Remind => commands::remind::run(),
        Commands::Progress => commands::progress::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
