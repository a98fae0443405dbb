use crate::error::AppError;
use crate::model::{Priority, Task, parse_due_date, timestamp_now};
use crate::storage::TaskStore;
use tracing::info;
use uuid::Uuid;

/// Appends a new pending task and returns it.
///
/// The title is trimmed but may be empty. `due_date` goes through
/// [`parse_due_date`], so anything that is not a real `YYYY-MM-DD` date is
/// stored as absent. `priority` is clamped into 1..=5.
pub fn add_task(
    store: &TaskStore,
    title: &str,
    due_date: Option<&str>,
    priority: i64,
) -> Result<Task, AppError> {
    let task = Task {
        id: Uuid::new_v4().to_string(),
        title: title.trim().to_string(),
        created_at: timestamp_now()?,
        due_date: due_date.and_then(parse_due_date),
        priority: Priority::clamped(priority),
        completed: false,
    };

    let mut tasks = store.load()?;
    tasks.push(task.clone());
    store.save(&tasks)?;

    info!(id = %task.id, "added task");
    Ok(task)
}

/// Snapshot of stored tasks, optionally only those whose `completed` flag
/// equals `completed`.
pub fn list_tasks(store: &TaskStore, completed: Option<bool>) -> Result<Vec<Task>, AppError> {
    let tasks = store.load()?;
    Ok(match completed {
        Some(flag) => tasks.into_iter().filter(|task| task.completed == flag).collect(),
        None => tasks,
    })
}

/// Marks the first task, in stored order, whose id starts with `id_prefix`.
///
/// Returns `false` when nothing matches. Later tasks sharing the prefix are
/// left alone. An empty prefix matches the first task.
pub fn complete_task(store: &TaskStore, id_prefix: &str) -> Result<bool, AppError> {
    let mut tasks = store.load()?;
    let Some(task) = tasks.iter_mut().find(|task| task.id.starts_with(id_prefix)) else {
        return Ok(false);
    };

    task.completed = true;
    info!(id = %task.id, "completed task");
    store.save(&tasks)?;

    Ok(true)
}

/// Removes every task whose id starts with `id_prefix`, so an empty prefix
/// removes them all.
///
/// The file is only rewritten when something was removed.
pub fn delete_task(store: &TaskStore, id_prefix: &str) -> Result<bool, AppError> {
    let mut tasks = store.load()?;
    let before = tasks.len();
    tasks.retain(|task| !task.id.starts_with(id_prefix));

    let removed = before - tasks.len();
    if removed == 0 {
        return Ok(false);
    }

    store.save(&tasks)?;
    info!(prefix = id_prefix, removed, "deleted tasks");

    Ok(true)
}
