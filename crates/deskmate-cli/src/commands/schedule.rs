use clap::Subcommand;
use deskmate_core::{format_wire_time, parse_wire_time, NewSchedule, ScheduleStore};

use super::{event_bus, open_bridge};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Add a schedule entry or reminder
    Add {
        title: String,
        /// Start time as `YYYY-MM-DD HH:MM:SS`
        #[arg(long)]
        start: String,
        /// Optional end time, same pattern
        #[arg(long)]
        end: Option<String>,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
        /// Mark as a reminder
        #[arg(long)]
        reminder: bool,
    },
    /// List schedule entries
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a schedule entry
    Rm { id: String },
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let store = ScheduleStore::new(open_bridge()?, event_bus());
        store.load_all().await?;

        match action {
            ScheduleAction::Add {
                title,
                start,
                end,
                description,
                reminder,
            } => {
                let schedule = store
                    .add(NewSchedule {
                        title,
                        description,
                        start_time: parse_wire_time(&start)?,
                        end_time: end.as_deref().map(parse_wire_time).transpose()?,
                        is_reminder: reminder,
                    })
                    .await?;
                println!("schedule created: {}", schedule.id);
            }
            ScheduleAction::List { json } => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&store.schedules())?);
                } else {
                    for schedule in store.schedules() {
                        let kind = if schedule.is_reminder { "reminder" } else { "event" };
                        println!(
                            "{}  {}  {}  ({kind})",
                            schedule.id,
                            format_wire_time(&schedule.start_time),
                            schedule.title
                        );
                    }
                }
            }
            ScheduleAction::Rm { id } => {
                store.remove(&id).await?;
                println!("schedule deleted: {id}");
            }
        }
        Ok(())
    })
}
