use clap::Subcommand;
use deskmate_core::{parse_wire_time, NewTask, TaskStore};

use super::{event_bus, open_bridge};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        title: String,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
        /// Due date as `YYYY-MM-DD HH:MM:SS`
        #[arg(long)]
        due: Option<String>,
    },
    /// List tasks
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Flip a task's completion flag
    Toggle { id: String },
    /// Delete a task
    Rm { id: String },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let store = TaskStore::new(open_bridge()?, event_bus());
        store.load_all().await?;

        match action {
            TaskAction::Add {
                title,
                description,
                due,
            } => {
                let due_date = due.as_deref().map(parse_wire_time).transpose()?;
                let task = store
                    .add(NewTask {
                        title,
                        description,
                        due_date,
                    })
                    .await?;
                println!("task created: {}", task.id);
            }
            TaskAction::List { json } => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&store.tasks())?);
                } else {
                    for task in store.tasks() {
                        let mark = if task.completed { "x" } else { " " };
                        println!("[{mark}] {}  {}", task.id, task.title);
                    }
                }
            }
            TaskAction::Toggle { id } => {
                let completed = store.toggle_completion(&id).await?;
                println!("{id} -> {}", if completed { "completed" } else { "open" });
            }
            TaskAction::Rm { id } => {
                store.remove(&id).await?;
                println!("task deleted: {id}");
            }
        }
        Ok(())
    })
}
