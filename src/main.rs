//! Todo Store RS binary entry point

use std::str::FromStr;
use todo_store_rs::task::filter::newest_first;
use todo_store_rs::{Config, TaskFilter, TaskStore};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let level = Level::from_str(&config.log_level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Todo Store RS");
    info!("Using {:?} backend, key: {}", config.storage_backend, config.storage_key);

    let store = TaskStore::from_config(&config)?;
    if !store.health_check() {
        return Err("storage backend is not healthy".into());
    }

    let filter = match std::env::args().nth(1) {
        Some(arg) => TaskFilter::from_str(&arg)?,
        None => TaskFilter::All,
    };

    let mut tasks = store.list(filter);
    newest_first(&mut tasks);

    for task in &tasks {
        let mark = if task.completed { "x" } else { " " };
        println!("[{}] {:<6} {}  {}", mark, task.priority, task.title, task.id);
    }

    let stats = store.stats();
    println!("{} tasks ({} active, {} completed)", stats.total, stats.active, stats.completed);

    Ok(())
}
