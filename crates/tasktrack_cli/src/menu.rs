use crate::render::render;
use std::io::{BufRead, Write};
use std::num::IntErrorKind;
use tasktrack_core::config::Palette;
use tasktrack_core::error::AppError;
use tasktrack_core::model::{Priority, parse_due_date};
use tasktrack_core::storage::TaskStore;
use tasktrack_core::task_api;

const MENU_TEXT: &str = "\nTask Tracker\n\
1) Add task\n\
2) List tasks\n\
3) Complete task\n\
4) Delete task\n\
5) List only TODO\n\
6) List only DONE\n\
0) Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    Complete,
    Delete,
    ListTodo,
    ListDone,
    Quit,
}

impl MenuChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::List),
            "3" => Some(Self::Complete),
            "4" => Some(Self::Delete),
            "5" => Some(Self::ListTodo),
            "6" => Some(Self::ListDone),
            "0" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Priority typed at the prompt: blank or non-numeric input means the
/// default, integers of any size are clamped into range.
pub fn parse_priority_input(raw: &str) -> i64 {
    let default = Priority::default().value() as i64;
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return default;
    }

    let value = match trimmed.parse::<i64>() {
        Ok(value) => value,
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => return default,
        },
    };
    Priority::clamped(value).value() as i64
}

fn io_error(err: std::io::Error) -> AppError {
    AppError::io(err.to_string())
}

/// Numbered menu loop. Runs until `0` is chosen or input ends.
pub struct Menu<'a, R, W> {
    store: &'a TaskStore,
    input: R,
    output: W,
    palette: Palette,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a TaskStore, input: R, output: W, palette: Palette) -> Self {
        Self {
            store,
            input,
            output,
            palette,
        }
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        loop {
            writeln!(self.output, "{}", MENU_TEXT).map_err(io_error)?;
            let Some(line) = self.prompt("Choose: ")? else {
                return Ok(());
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                self.say("Invalid choice. Try again.")?;
                continue;
            };

            let keep_going = match choice {
                MenuChoice::Add => self.add()?,
                MenuChoice::List => self.list(None)?,
                MenuChoice::Complete => self.complete()?,
                MenuChoice::Delete => self.delete()?,
                MenuChoice::ListTodo => self.list(Some(false))?,
                MenuChoice::ListDone => self.list(Some(true))?,
                MenuChoice::Quit => {
                    self.say("Bye!")?;
                    false
                }
            };

            if !keep_going {
                return Ok(());
            }
        }
    }

    /// Prints `text` without a newline and reads one line. `None` on end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{text}").map_err(io_error)?;
        self.output.flush().map_err(io_error)?;

        let mut line = String::new();
        let bytes = self.input.read_line(&mut line).map_err(io_error)?;
        if bytes == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.output, "{text}").map_err(io_error)
    }

    fn add(&mut self) -> Result<bool, AppError> {
        let Some(title) = self.prompt("Task title: ")? else {
            return Ok(false);
        };
        let Some(due_raw) = self.prompt("Due date (YYYY-MM-DD, optional): ")? else {
            return Ok(false);
        };
        let Some(priority_raw) = self.prompt("Priority (1=high..5=low, default 3): ")? else {
            return Ok(false);
        };

        let due_date = parse_due_date(&due_raw);
        let priority = parse_priority_input(&priority_raw);
        let task = task_api::add_task(self.store, &title, due_date.as_deref(), priority)?;
        self.say(&format!("Added task {} (id={}).", task.title, task.short_id()))?;
        Ok(true)
    }

    fn list(&mut self, completed: Option<bool>) -> Result<bool, AppError> {
        let tasks = task_api::list_tasks(self.store, completed)?;
        render(&mut self.output, &tasks, &self.palette).map_err(io_error)?;
        Ok(true)
    }

    fn complete(&mut self) -> Result<bool, AppError> {
        let Some(id) = self.prompt("Enter task id (you can paste the short id): ")? else {
            return Ok(false);
        };
        let done = task_api::complete_task(self.store, &id)?;
        self.say(if done { "Marked complete." } else { "Task not found." })?;
        Ok(true)
    }

    fn delete(&mut self) -> Result<bool, AppError> {
        let Some(id) = self.prompt("Enter task id to delete: ")? else {
            return Ok(false);
        };
        let deleted = task_api::delete_task(self.store, &id)?;
        self.say(if deleted { "Deleted." } else { "Task not found." })?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::{Menu, MenuChoice, parse_priority_input};
    use std::io::Cursor;
    use tasktrack_core::config::Palette;
    use tasktrack_core::model::{Priority, Task};
    use tasktrack_core::storage::TaskStore;
    use tasktrack_core::task_api::list_tasks;
    use tempfile::TempDir;

    fn run_menu(store: &TaskStore, input: &str) -> String {
        let mut output = Vec::new();
        Menu::new(store, Cursor::new(input.as_bytes()), &mut output, Palette::PLAIN)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn seeded(id: &str, title: &str) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            created_at: "2024-01-01 09:00:00".to_string(),
            due_date: None,
            priority: Priority::default(),
            completed: false,
        }
    }

    #[test]
    fn menu_choice_parses_numbers() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse(" 6 "), Some(MenuChoice::ListDone));
        assert_eq!(MenuChoice::parse("0"), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse("add"), None);
    }

    #[test]
    fn priority_input_falls_back_and_clamps() {
        assert_eq!(parse_priority_input(""), 3);
        assert_eq!(parse_priority_input("high"), 3);
        assert_eq!(parse_priority_input("2.5"), 3);
        assert_eq!(parse_priority_input(" 1 "), 1);
        assert_eq!(parse_priority_input("9"), 5);
        assert_eq!(parse_priority_input("-3"), 1);
    }

    #[test]
    fn priority_input_clamps_integers_beyond_i64() {
        assert_eq!(parse_priority_input("99999999999999999999"), 5);
        assert_eq!(parse_priority_input("+99999999999999999999"), 5);
        assert_eq!(parse_priority_input("-99999999999999999999"), 1);
        assert_eq!(parse_priority_input("99999999999999999999x"), 3);
    }

    #[test]
    fn add_then_list_shows_task() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));

        let output = run_menu(&store, "1\nBuy milk\n2024-01-01\n2\n2\n0\n");

        let tasks = list_tasks(&store, None).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].due_date.as_deref(), Some("2024-01-01"));
        assert_eq!(tasks[0].priority.value(), 2);
        assert!(output.contains(&format!("Added task Buy milk (id={}).", tasks[0].short_id())));
        assert!(output.contains("Buy milk                       2024-01-01 2   todo"));
        assert!(output.ends_with("Bye!\n"));
    }

    #[test]
    fn add_silently_drops_bad_date_and_priority() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));

        run_menu(&store, "1\nWeird\n2024-13-40\nurgent\n0\n");

        let tasks = list_tasks(&store, None).unwrap();
        assert_eq!(tasks[0].due_date, None);
        assert_eq!(tasks[0].priority.value(), 3);
    }

    #[test]
    fn complete_and_delete_report_outcome() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));
        store
            .save(&[seeded("abc123-1", "first"), seeded("def456-2", "second")])
            .unwrap();

        let output = run_menu(&store, "3\nabc1\n3\nzzz\n4\ndef\n4\nzzz\n0\n");

        assert!(output.contains("Marked complete."));
        assert!(output.contains("Deleted."));
        assert_eq!(output.matches("Task not found.").count(), 2);
        let tasks = list_tasks(&store, None).unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].completed);
    }

    #[test]
    fn filtered_lists_split_todo_and_done() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));
        let mut done = seeded("aaa-1", "finished thing");
        done.completed = true;
        store.save(&[done, seeded("bbb-2", "open thing")]).unwrap();

        let todo_output = run_menu(&store, "5\n0\n");
        let done_output = run_menu(&store, "6\n0\n");

        assert!(todo_output.contains("open thing"));
        assert!(!todo_output.contains("finished thing"));
        assert!(done_output.contains("finished thing"));
        assert!(!done_output.contains("open thing"));
    }

    #[test]
    fn empty_list_prints_hint() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));

        let output = run_menu(&store, "2\n0\n");
        assert!(output.contains("No tasks yet. Add one!"));
    }

    #[test]
    fn invalid_choice_loops() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));

        let output = run_menu(&store, "9\n\n0\n");

        assert_eq!(output.matches("Invalid choice. Try again.").count(), 2);
        assert_eq!(output.matches("Task Tracker").count(), 3);
    }

    #[test]
    fn end_of_input_stops_quietly() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));

        let output = run_menu(&store, "1\nhalf typed");

        assert!(!output.contains("Bye!"));
        assert!(list_tasks(&store, None).unwrap().is_empty());
    }
}
