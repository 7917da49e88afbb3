use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "deskmate-cli", version, about = "Deskmate CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Schedule and reminder management
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Plain countdown timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Pomodoro work/break timer
    Pomodoro {
        #[command(subcommand)]
        action: commands::pomodoro::PomodoroAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Pomodoro { action } => commands::pomodoro::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
