use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Subcommand;
use deskmate_core::{Config, Event, Ticker, TimerEngine, TimerPhase};

use super::event_bus;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a countdown to zero, printing the face each second
    Run {
        /// Minutes to count down (falls back to the configured default)
        #[arg(long)]
        minutes: Option<u64>,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { minutes } => run_countdown(minutes),
    }
}

fn run_countdown(minutes: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let minutes = match minutes {
        Some(m) if m > 0 => m,
        _ => config.timer.default_minutes,
    };

    let events = event_bus();
    let _printer = events.subscribe(|event| {
        if let Event::TimerExpired { .. } = event {
            println!("\ntime's up");
        }
    });

    let engine = Arc::new(Mutex::new(TimerEngine::new()));
    let mut ticker = Ticker::new();
    let handle = {
        let engine = engine.clone();
        let events = events.clone();
        ticker.subscribe(move || {
            let mut engine = engine.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(event) = engine.on_tick() {
                events.publish(&event);
            }
        })
    };

    if let Some(event) = engine.lock().unwrap_or_else(|e| e.into_inner()).start(minutes) {
        events.publish(&event);
    }

    loop {
        {
            let engine = engine.lock().unwrap_or_else(|e| e.into_inner());
            if engine.phase() != TimerPhase::Running {
                break;
            }
            print!("\r{}  ", engine.display());
            std::io::stdout().flush()?;
        }
        std::thread::sleep(Duration::from_secs(1));
        ticker.emit();
    }

    ticker.unsubscribe(handle);
    Ok(())
}
