use std::cmp::Ordering;
use std::io::{self, Write};
use tasktrack_core::config::Palette;
use tasktrack_core::model::{DUE_DATE_SENTINEL, Task};

const TITLE_WIDTH: usize = 30;
const TITLE_KEEP: usize = 27;
const RULE_WIDTH: usize = 80;

/// Incomplete before done, then earliest due date (undated last), then
/// priority, then creation time. Ties keep their stored order.
pub fn sort_for_display(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(display_order);
    tasks
}

fn display_order(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| due_key(a).cmp(due_key(b)))
        .then_with(|| a.priority.cmp(&b.priority))
        .then_with(|| a.created_at.cmp(&b.created_at))
}

fn due_key(task: &Task) -> &str {
    task.due_date.as_deref().unwrap_or(DUE_DATE_SENTINEL)
}

fn display_title(title: &str) -> String {
    if title.chars().count() > TITLE_WIDTH {
        let kept: String = title.chars().take(TITLE_KEEP).collect();
        format!("{kept}...")
    } else {
        title.to_string()
    }
}

/// Writes `tasks` as a sorted fixed-width table.
pub fn render<W: Write>(out: &mut W, tasks: &[Task], palette: &Palette) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(out, "No tasks yet. Add one!");
    }

    let header = format!(
        "{:<8} {:<30} {:<10} {:<3} {:<9} {}",
        "ID", "Title", "Due", "Pri", "Status", "Created"
    );
    writeln!(out, "{}", palette.accentize(&header))?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for task in sort_for_display(tasks.to_vec()) {
        let status = if task.completed {
            palette.mutedize(&format!("{:<9}", "done"))
        } else {
            format!("{:<9}", "todo")
        };
        writeln!(
            out,
            "{:<8} {:<30} {:<10} {:<3} {} {}",
            task.short_id(),
            display_title(&task.title),
            task.due_date.as_deref().unwrap_or("-"),
            task.priority.value(),
            status,
            task.created_at
        )?;
    }

    Ok(())
}
