mod support;

use dashboard_rs::source::{DataSource, MemorySource, NullSource, Page, Task, file_stem};

use support::{ALPHA_FILE, sample_vault};

fn page_paths(source: &MemorySource, query: &str) -> Vec<String> {
    source
        .query_pages(query)
        .expect("valid query")
        .into_iter()
        .map(|page| page.path)
        .collect()
}

#[test]
fn empty_query_selects_everything() {
    let vault = sample_vault();
    assert_eq!(page_paths(&vault, "").len(), 5);
    assert_eq!(vault.query_tasks("  ").expect("valid query").len(), 5);
}

#[test]
fn folder_and_tag_terms_combine() {
    let vault = sample_vault();
    assert_eq!(
        page_paths(&vault, "\"Projects\""),
        vec!["Projects/alpha.md", "Projects/beta.md", "Projects/archive/old.md"]
    );
    assert_eq!(
        page_paths(&vault, "#work AND \"Projects/archive\""),
        vec!["Projects/archive/old.md"]
    );
    assert_eq!(
        page_paths(&vault, "(#home OR #archived) AND #WORK"),
        vec!["Projects/archive/old.md"]
    );
    assert_eq!(
        page_paths(&vault, "#home OR \"Projects/beta\""),
        vec!["Projects/beta.md", "Home/garden.md"]
    );
}

#[test]
fn folder_terms_do_not_match_sibling_prefixes() {
    let vault = MemorySource::new(
        vec![Page::new("Project/a.md"), Page::new("Projects/b.md")],
        Vec::new(),
    );
    assert_eq!(page_paths(&vault, "\"Project\""), vec!["Project/a.md"]);
}

#[test]
fn malformed_queries_are_errors() {
    let vault = sample_vault();
    assert!(vault.query_pages("(#work").is_err());
    assert!(vault.query_pages("#work AND").is_err());
    assert!(vault.query_pages("\"unterminated").is_err());
}

#[test]
fn tasks_match_tags_of_their_page() {
    let vault = sample_vault();
    let tasks = vault.query_tasks("#project/rust").expect("valid query");
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|task| task.path == "Projects/alpha.md"));
}

#[test]
fn toggle_flips_checkbox_and_task_state() {
    let mut vault = sample_vault();
    assert!(vault.toggle_task("Projects/alpha.md", 4));
    let content = vault.file("Projects/alpha.md").expect("file");
    assert!(content.contains("- [ ] Write docs"));
    assert_eq!(content.lines().count(), ALPHA_FILE.lines().count());
    let task = vault
        .tasks()
        .iter()
        .find(|task| task.line == 4)
        .expect("task");
    assert!(!task.completed);

    assert!(vault.toggle_task("Projects/alpha.md", 4));
    assert_eq!(vault.file("Projects/alpha.md"), Some(ALPHA_FILE));
}

#[test]
fn toggle_rejects_non_matching_targets() {
    let mut vault = sample_vault();
    assert!(!vault.toggle_task("Projects/alpha.md", 2));
    assert!(!vault.toggle_task("Projects/alpha.md", 99));
    assert!(!vault.toggle_task("Home/garden.md", 0));
    assert_eq!(vault.file("Projects/alpha.md"), Some(ALPHA_FILE));
}

#[test]
fn null_source_is_never_ready_and_empty() {
    let mut source = NullSource;
    assert!(!source.is_ready());
    assert!(source.query_pages("#any").expect("empty").is_empty());
    assert!(source.query_tasks("").expect("empty").is_empty());
    assert!(!source.toggle_task("a.md", 0));
}

#[test]
fn display_names_drop_folders_and_extension() {
    assert_eq!(file_stem("Projects/alpha.md"), "alpha");
    assert_eq!(file_stem("inbox.md"), "inbox");
    assert_eq!(Page::new("Notes/Daily.md").display_name(), "Daily");
    let task = Task::new("a.md", 0, "x");
    assert!(!task.completed);
}
