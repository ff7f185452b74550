use chrono::{TimeZone, Utc};
use taskpad_core::db::{open_db, open_db_in_memory};
use taskpad_core::{
    Comment, KvStore, MemoryKvStore, Project, ProjectStatus, SqliteKvStore, StateRepository,
    StoreError, Task, TaskPriority, Todo, NOTES_KEY, PROJECTS_KEY, TODOS_KEY,
};

fn sample_todos() -> Vec<Todo> {
    let mut done = Todo::new("Pay rent", Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
    done.completed = true;
    vec![
        Todo::new("Buy milk", Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap()),
        done,
    ]
}

fn sample_projects() -> Vec<Project> {
    let created = Utc.with_ymd_and_hms(2024, 4, 30, 12, 0, 0).unwrap();
    let mut launch = Project::new("Launch", "Ship v1", ProjectStatus::InProgress, created);
    launch.tasks.push(Task::new("Design"));
    launch.tasks.push(Task {
        text: "Build".to_string(),
        completed: true,
        priority: TaskPriority::High,
    });
    launch.comments.push(Comment {
        text: "Kickoff".to_string(),
        created_at: created,
    });
    vec![
        launch,
        Project::new("Garden", "", ProjectStatus::Planning, created),
    ]
}

#[test]
fn memory_round_trip_preserves_elements_and_order() {
    let mut repo = StateRepository::new(MemoryKvStore::new());
    repo.save_todos(&sample_todos()).unwrap();
    repo.save_projects(&sample_projects()).unwrap();
    repo.save_notes("line one\nline two").unwrap();

    let loaded = repo.load();
    assert_eq!(loaded.todos, sample_todos());
    assert_eq!(loaded.projects, sample_projects());
    assert_eq!(loaded.notes, "line one\nline two");
}

#[test]
fn sqlite_round_trip_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskpad.db");

    {
        let conn = open_db(&path).unwrap();
        let mut repo = StateRepository::new(SqliteKvStore::try_new(&conn).unwrap());
        repo.save_todos(&sample_todos()).unwrap();
        repo.save_projects(&sample_projects()).unwrap();
        repo.save_projects(&sample_projects()[..1]).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = StateRepository::new(SqliteKvStore::try_new(&conn).unwrap());
    let loaded = repo.load();
    assert_eq!(loaded.todos, sample_todos());
    assert_eq!(loaded.projects, sample_projects()[..1].to_vec());
    assert_eq!(loaded.notes, "");
}

#[test]
fn sqlite_store_overwrites_values_per_key() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteKvStore::try_new(&conn).unwrap();
    assert_eq!(store.get(NOTES_KEY).unwrap(), None);

    store.set(NOTES_KEY, "first").unwrap();
    store.set(NOTES_KEY, "second").unwrap();
    assert_eq!(store.get(NOTES_KEY).unwrap().as_deref(), Some("second"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn sqlite_store_rejects_unmigrated_connection() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    match SqliteKvStore::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        }) => {
            assert_eq!(actual_version, 0);
            assert!(expected_version > 0);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("unmigrated connection must be rejected"),
    }
}

#[test]
fn blobs_written_by_the_browser_build_still_load() {
    let mut store = MemoryKvStore::new();
    store
        .set(
            TODOS_KEY,
            r#"[{"text":"Buy milk","completed":false,"date":"2024-05-02T09:30:00.000Z"}]"#,
        )
        .unwrap();
    store
        .set(
            PROJECTS_KEY,
            r#"[
                {"title":"Launch","description":"","status":"progress",
                 "date":"2024-04-30T12:00:00.000Z",
                 "tasks":[{"text":"Design","completed":true,"priority":"medium"}],
                 "comments":[{"text":"Kickoff","date":"2024-04-30T12:05:00.000Z"}]},
                {"title":"Old","status":"completed","date":"2023-01-01T00:00:00.000Z"}
            ]"#,
        )
        .unwrap();
    store.set(NOTES_KEY, "raw notes, no encoding").unwrap();

    let loaded = StateRepository::new(store).load();
    assert_eq!(loaded.todos[0].text, "Buy milk");
    assert_eq!(loaded.projects.len(), 2);
    assert_eq!(loaded.projects[0].status, ProjectStatus::InProgress);
    assert!(loaded.projects[0].tasks[0].completed);
    assert_eq!(loaded.projects[0].comments[0].text, "Kickoff");
    assert!(loaded.projects[1].tasks.is_empty());
    assert_eq!(loaded.notes, "raw notes, no encoding");
}

#[test]
fn corrupt_blob_only_empties_its_own_collection() {
    let mut store = MemoryKvStore::new();
    store.set(TODOS_KEY, "[{\"text\":").unwrap();
    let mut repo = StateRepository::new(store);
    repo.save_projects(&sample_projects()).unwrap();

    let loaded = repo.load();
    assert!(loaded.todos.is_empty());
    assert_eq!(loaded.projects, sample_projects());
}

#[test]
fn one_bad_project_does_not_cost_the_collection() {
    let mut store = MemoryKvStore::new();
    store
        .set(
            PROJECTS_KEY,
            r#"[
                {"title":"Undated","status":"planning"},
                {"title":"Broken","status":"archived","date":"2024-01-02T03:04:05Z"},
                {"title":"Dated","status":"completed","date":"2024-01-02T03:04:05Z"}
            ]"#,
        )
        .unwrap();
    let mut repo = StateRepository::new(store);

    let projects = repo.load_projects();
    let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Undated", "Dated"]);

    repo.save_projects(&projects).unwrap();
    let reloaded = repo.load_projects();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded[0].created_at, projects[0].created_at);
    assert_eq!(reloaded[1].status, ProjectStatus::Completed);
}
