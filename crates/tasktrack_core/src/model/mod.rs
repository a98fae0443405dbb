mod date;
mod task;

pub use date::{DUE_DATE_SENTINEL, parse_due_date, timestamp_now};
pub use task::{Priority, Task};
