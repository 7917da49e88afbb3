use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Subcommand;
use deskmate_core::{Config, Cycle, Event, PomodoroDurations, PomodoroEngine, Ticker, TimerPhase};

use super::event_bus;

#[derive(Subcommand)]
pub enum PomodoroAction {
    /// Run work/break cycles, printing the face each second
    Run {
        /// Work minutes (defaults to the configured value)
        #[arg(long)]
        work_minutes: Option<u64>,
        /// Break minutes (defaults to the configured value)
        #[arg(long)]
        break_minutes: Option<u64>,
        /// How many cycle completions to run before exiting
        #[arg(long, default_value = "2")]
        cycles: u32,
    },
}

pub fn run(action: PomodoroAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PomodoroAction::Run {
            work_minutes,
            break_minutes,
            cycles,
        } => run_cycles(work_minutes, break_minutes, cycles),
    }
}

fn run_cycles(
    work_minutes: Option<u64>,
    break_minutes: Option<u64>,
    cycles: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let defaults = config.durations();
    let durations = PomodoroDurations {
        work_secs: work_minutes.map_or(defaults.work_secs, |m| m.saturating_mul(60)),
        break_secs: break_minutes.map_or(defaults.break_secs, |m| m.saturating_mul(60)),
    };

    let events = event_bus();
    let _printer = events.subscribe(|event| {
        if let Event::CycleCompleted { previous_cycle, .. } = event {
            match previous_cycle {
                Cycle::Work => println!("\nwork done -- break time"),
                Cycle::Break => println!("\nbreak over -- back to work"),
            }
        }
    });

    let engine = Arc::new(Mutex::new(PomodoroEngine::new(durations)));
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

    for _ in 0..cycles {
        // Each cycle is acknowledged explicitly; here the acknowledgement
        // is the loop iteration itself.
        if let Some(event) = engine.lock().unwrap_or_else(|e| e.into_inner()).start() {
            events.publish(&event);
        }
        loop {
            {
                let engine = engine.lock().unwrap_or_else(|e| e.into_inner());
                if engine.phase() != TimerPhase::Running {
                    break;
                }
                let label = match engine.cycle() {
                    Cycle::Work => "work",
                    Cycle::Break => "break",
                };
                print!("\r{label} {}  ", engine.display());
                std::io::stdout().flush()?;
            }
            std::thread::sleep(Duration::from_secs(1));
            ticker.emit();
        }
    }

    ticker.unsubscribe(handle);
    Ok(())
}
