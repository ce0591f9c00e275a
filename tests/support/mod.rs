#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use dashboard_rs::source::{MemorySource, Page, Task};

pub const ALPHA_FILE: &str = "# Alpha\n\nTodo:\n- [ ] Ship it\n- [x] Write docs\n";

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(hour, minute, 0)
        .expect("valid time")
}

/// 2024-03-10 12:00, a Sunday.
pub fn now() -> NaiveDateTime {
    at(2024, 3, 10, 12, 0)
}

/// Five notes and five tasks:
///
/// | path                      | tags                  | ctime      | status |
/// |---------------------------|-----------------------|------------|--------|
/// | Projects/alpha.md         | #work #project/rust   | 2024-03-08 | active |
/// | Projects/beta.md          | #work                 | 2024-02-20 | done   |
/// | Home/garden.md            | #home                 | 2024-03-09 | -      |
/// | inbox.md                  | -                     | garbage    | -      |
/// | Projects/archive/old.md   | #work #archived       | 2023-12-31 | done   |
pub fn sample_vault() -> MemorySource {
    let pages = vec![
        Page::new("Projects/alpha.md")
            .with_tags(["#work", "#project/rust"])
            .with_ctime("2024-03-08T10:00:00")
            .with_mtime("2024-03-10T09:00:00")
            .with_field("status", "active")
            .with_field("rating", 5_i64),
        Page::new("Projects/beta.md")
            .with_tags(["#work"])
            .with_ctime("2024-02-20")
            .with_mtime("2024-03-01")
            .with_field("status", "done"),
        Page::new("Home/garden.md")
            .with_tags(["#home"])
            .with_ctime("2024-03-09T08:00:00"),
        Page::new("inbox.md").with_ctime("not a date"),
        Page::new("Projects/archive/old.md")
            .with_tags(["#work", "#archived"])
            .with_ctime("2023-12-31")
            .with_field("status", "done"),
    ];

    let tasks = vec![
        Task::new("Projects/alpha.md", 3, "Ship it")
            .with_file_times(Some("2024-03-08T10:00:00"), Some("2024-03-10T09:00:00")),
        Task::new("Projects/alpha.md", 4, "Write docs")
            .completed(true)
            .with_file_times(Some("2024-03-08T10:00:00"), Some("2024-03-10T09:00:00")),
        Task::new("Home/garden.md", 0, "Water plants")
            .with_file_times(Some("2024-03-09T08:00:00"), None),
        Task::new("inbox.md", 1, "Call about #work")
            .with_tags(["#work"])
            .with_file_times(Some("2024-03-10"), None),
        Task::new("Projects/beta.md", 2, "Review")
            .with_file_times(Some("2024-02-20"), Some("2024-03-01")),
    ];

    MemorySource::new(pages, tasks).with_file("Projects/alpha.md", ALPHA_FILE)
}
