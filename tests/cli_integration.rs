//! CLI integration tests for todo
//!
//! These tests drive the binary end to end: workspace setup, the todo
//! lifecycle, dependencies and the satellite commands.

use std::path::Path;

use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command instance for the todo binary
fn todo_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("todo"));
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("TODO_LOG")
        .env_remove("TODO_LOG_FORMAT");
    cmd
}

/// Create a temporary directory and initialize a workspace in it
fn setup_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    todo_cmd(dir.path()).arg("init").assert().success();
    dir
}

/// Runs a command with `--format json` and parses stdout
fn json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let output = todo_cmd(dir)
        .args(args)
        .args(["--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    serde_json::from_str(&stdout).unwrap()
}

/// Adds a todo and returns its ID
fn add_todo(dir: &Path, title: &str) -> String {
    json(dir, &["add", title])["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized todo workspace"));

    assert!(dir.path().join(".todo").is_dir());
    assert!(dir.path().join(".todo/config.toml").is_file());
    assert!(dir.path().join(".todo/.gitignore").is_file());
    assert!(dir.path().join(".todo/todo.db").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = setup_workspace();
    todo_cmd(dir.path()).arg("init").assert().success();
}

#[test]
fn test_commands_outside_workspace_fail() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Not in a todo workspace"));
}

#[test]
fn test_commands_work_from_subdirectory() {
    let dir = setup_workspace();
    add_todo(dir.path(), "From the root");

    let nested = dir.path().join("src").join("deep");
    std::fs::create_dir_all(&nested).unwrap();

    todo_cmd(&nested)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("From the root"));
}

// =============================================================================
// Todo Tests
// =============================================================================

#[test]
fn test_add_and_list() {
    let dir = setup_workspace();

    todo_cmd(dir.path())
        .args(["add", "Write docs", "--priority", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created todo"));
    add_todo(dir.path(), "Fix bug");

    todo_cmd(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Write docs"))
        .stdout(predicate::str::contains("Fix bug"));

    let high = json(dir.path(), &["list", "--priority", "high"]);
    let high = high.as_array().unwrap();
    assert_eq!(high.len(), 1);
    assert_eq!(high[0]["title"], "Write docs");
    assert_eq!(high[0]["status"], "pending");
    assert_eq!(high[0]["work_state"], "idle");
}

#[test]
fn test_add_rejects_blank_title() {
    let dir = setup_workspace();

    todo_cmd(dir.path())
        .args(["add", "   "])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_default_priority_comes_from_config() {
    let dir = setup_workspace();
    std::fs::write(
        dir.path().join(".todo/config.toml"),
        "default_priority = \"low\"\n",
    )
    .unwrap();

    let todo = json(dir.path(), &["add", "Someday"]);
    assert_eq!(todo["priority"], "low");
}

#[test]
fn test_show_and_update() {
    let dir = setup_workspace();
    let id = add_todo(dir.path(), "Draft");

    let updated = json(
        dir.path(),
        &["update", &id, "--title", "Final", "--due", "2030-01-15"],
    );
    assert_eq!(updated["title"], "Final");
    assert!(updated["due_date"].as_str().unwrap().starts_with("2030-01-15"));

    todo_cmd(dir.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Final"))
        .stdout(predicate::str::contains("Due: 2030-01-15"));

    todo_cmd(dir.path())
        .args(["update", &id])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_lifecycle_and_activity() {
    let dir = setup_workspace();
    let id = add_todo(dir.path(), "Deep work");

    let started = json(dir.path(), &["start", &id]);
    assert_eq!(started["status"], "in_progress");
    assert_eq!(started["work_state"], "active");

    let paused = json(dir.path(), &["pause", &id]);
    assert_eq!(paused["work_state"], "paused");

    json(dir.path(), &["resume", &id]);

    let done = json(dir.path(), &["done", &id]);
    assert_eq!(done["status"], "completed");
    assert_eq!(done["work_state"], "completed");
    assert!(done["completed_at"].is_string());

    let time = json(dir.path(), &["time", &id]);
    assert_eq!(time["work_state"], "completed");
    assert_eq!(time["total_seconds"], time["current_seconds"]);

    let log = json(dir.path(), &["activity", &id]);
    let kinds: Vec<&str> = log
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec!["completed", "resumed", "paused", "started", "created"]
    );

    let reopened = json(dir.path(), &["reopen", &id]);
    assert_eq!(reopened["status"], "pending");
    assert_eq!(reopened["work_state"], "idle");
}

#[test]
fn test_invalid_transitions_exit_with_code_2() {
    let dir = setup_workspace();
    let id = add_todo(dir.path(), "Idle");

    todo_cmd(dir.path())
        .args(["pause", &id])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Cannot pause"));

    todo_cmd(dir.path()).args(["done", &id]).assert().success();

    todo_cmd(dir.path())
        .args(["done", &id])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already completed"));
}

#[test]
fn test_missing_todo_exits_with_code_3() {
    let dir = setup_workspace();

    todo_cmd(dir.path())
        .args(["show", "td-0000000"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Todo not found: td-0000000"));
}

#[test]
fn test_json_errors_carry_status_and_kind() {
    let dir = setup_workspace();

    let output = todo_cmd(dir.path())
        .args(["start", "td-0000000", "--format", "json"])
        .assert()
        .failure()
        .code(3);

    let stderr = String::from_utf8_lossy(&output.get_output().stderr);
    let line = stderr
        .lines()
        .find(|line| line.starts_with('{'))
        .unwrap();
    let err: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(err["success"], false);
    assert_eq!(err["status"], 404);
    assert_eq!(err["kind"], "not_found");
}

#[test]
fn test_delete_todo() {
    let dir = setup_workspace();
    let id = add_todo(dir.path(), "Temporary");

    todo_cmd(dir.path())
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted todo"));

    todo_cmd(dir.path()).args(["show", &id]).assert().code(3);
}

#[test]
fn test_overdue_filter() {
    let dir = setup_workspace();
    todo_cmd(dir.path())
        .args(["add", "Late", "--due", "2001-01-01"])
        .assert()
        .success();
    todo_cmd(dir.path())
        .args(["add", "Later", "--due", "2999-01-01"])
        .assert()
        .success();

    let overdue = json(dir.path(), &["list", "--overdue"]);
    let overdue = overdue.as_array().unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0]["title"], "Late");

    let window = json(dir.path(), &["list", "--due-within", "4294967295"]);
    let window = window.as_array().unwrap();
    assert_eq!(window.len(), 1);
    assert_eq!(window[0]["title"], "Later");
}

// =============================================================================
// Dependency Tests
// =============================================================================

#[test]
fn test_dependency_gate_and_ready_queries() {
    let dir = setup_workspace();
    let design = add_todo(dir.path(), "Design");
    let implement = add_todo(dir.path(), "Implement");

    todo_cmd(dir.path())
        .args(["dep", "add", &implement, &design])
        .assert()
        .success()
        .stdout(predicate::str::contains("now depends on"));

    let ready = json(dir.path(), &["dep", "ready"]);
    assert_eq!(ready.as_array().unwrap().len(), 1);
    assert_eq!(ready[0]["title"], "Design");

    let blocked = json(dir.path(), &["dep", "blocked"]);
    assert_eq!(blocked[0]["todo"]["title"], "Implement");
    assert_eq!(blocked[0]["blocked_by"][0], design.as_str());

    todo_cmd(dir.path())
        .args(["done", &implement])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("incomplete dependencies"));

    todo_cmd(dir.path()).args(["done", &design]).assert().success();
    todo_cmd(dir.path()).args(["done", &implement]).assert().success();
}

#[test]
fn test_dependency_gate_can_be_disabled() {
    let dir = setup_workspace();
    std::fs::write(
        dir.path().join(".todo/config.toml"),
        "require_dependencies_complete = false\n",
    )
    .unwrap();
    let design = add_todo(dir.path(), "Design");
    let implement = add_todo(dir.path(), "Implement");
    todo_cmd(dir.path())
        .args(["dep", "add", &implement, &design])
        .assert()
        .success();

    todo_cmd(dir.path()).args(["done", &implement]).assert().success();
}

#[test]
fn test_cycles_are_rejected() {
    let dir = setup_workspace();
    let design = add_todo(dir.path(), "Design");
    let implement = add_todo(dir.path(), "Implement");

    todo_cmd(dir.path())
        .args(["dep", "add", &implement, &design])
        .assert()
        .success();

    let check = json(dir.path(), &["dep", "check", &design, &implement]);
    assert_eq!(check["would_create_cycle"], true);

    todo_cmd(dir.path())
        .args(["dep", "add", &design, &implement])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("would create a cycle"));

    todo_cmd(dir.path())
        .args(["dep", "add", &design, &design])
        .assert()
        .failure()
        .code(2);

    todo_cmd(dir.path())
        .args(["dep", "add", &implement, &design])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_dependency_remove_and_list() {
    let dir = setup_workspace();
    let a = add_todo(dir.path(), "A");
    let b = add_todo(dir.path(), "B");
    let c = add_todo(dir.path(), "C");

    todo_cmd(dir.path()).args(["dep", "add", &a, &b]).assert().success();
    todo_cmd(dir.path()).args(["dep", "add", &a, &c]).assert().success();

    let listed = json(dir.path(), &["dep", "list", &a]);
    assert_eq!(listed["dependencies"][0]["id"], b.as_str());
    assert_eq!(listed["dependents"].as_array().unwrap().len(), 0);

    // removing an edge that does not exist changes nothing
    todo_cmd(dir.path())
        .args(["dep", "rm", &b, &a])
        .assert()
        .failure()
        .code(3);
    let listed = json(dir.path(), &["dep", "list", &a]);
    let deps: Vec<_> = listed["dependencies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(deps, vec![b.clone(), c.clone()]);
    let listed = json(dir.path(), &["dep", "list", &b]);
    assert_eq!(listed["dependents"][0]["id"], a.as_str());

    todo_cmd(dir.path()).args(["dep", "rm", &a, &b]).assert().success();
    let listed = json(dir.path(), &["dep", "list", &a]);
    assert_eq!(listed["dependencies"].as_array().unwrap().len(), 1);
    assert_eq!(listed["dependencies"][0]["id"], c.as_str());

    todo_cmd(dir.path())
        .args(["dep", "rm", &a, &b])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_dependency_tree_and_order() {
    let dir = setup_workspace();
    let ship = add_todo(dir.path(), "Ship");
    let build = add_todo(dir.path(), "Build");
    let design = add_todo(dir.path(), "Design");

    todo_cmd(dir.path()).args(["dep", "add", &ship, &build]).assert().success();
    todo_cmd(dir.path()).args(["dep", "add", &build, &design]).assert().success();

    todo_cmd(dir.path())
        .args(["dep", "tree", &ship])
        .assert()
        .success()
        .stdout(predicate::str::contains("└── "))
        .stdout(predicate::str::contains("Design"));

    let shallow = json(dir.path(), &["dep", "tree", &ship, "--depth", "1"]);
    assert_eq!(shallow["dependencies"][0]["title"], "Build");
    assert_eq!(
        shallow["dependencies"][0]["dependencies"]
            .as_array()
            .unwrap()
            .len(),
        0
    );

    let order = json(dir.path(), &["dep", "order"]);
    let titles: Vec<&str> = order
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Design", "Build", "Ship"]);
}

// =============================================================================
// Project, Tag and Subtask Tests
// =============================================================================

#[test]
fn test_projects() {
    let dir = setup_workspace();

    json(dir.path(), &["project", "add", "Garden"]);
    todo_cmd(dir.path())
        .args(["project", "add", "garden"])
        .assert()
        .failure()
        .code(4);

    todo_cmd(dir.path())
        .args(["add", "Weed", "--project", "Garden"])
        .assert()
        .success();

    let summary = json(dir.path(), &["project", "show", "Garden"]);
    assert_eq!(summary["name"], "Garden");
    assert_eq!(summary["counts"]["pending"], 1);

    todo_cmd(dir.path())
        .args(["project", "rename", "Garden", "Backyard"])
        .assert()
        .success();

    let listed = json(dir.path(), &["list", "--project", "Backyard"]);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    todo_cmd(dir.path())
        .args(["project", "delete", "Backyard"])
        .assert()
        .success();

    let todos = json(dir.path(), &["list"]);
    assert!(todos[0].get("project_id").is_none());
}

#[test]
fn test_tags() {
    let dir = setup_workspace();
    json(dir.path(), &["tag", "add", "Urgent", "--color", "red"]);
    let id = add_todo(dir.path(), "Call back");

    todo_cmd(dir.path())
        .args(["tag", "attach", &id, "urgent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tagged"));

    let tagged = json(dir.path(), &["list", "--tag", "urgent"]);
    assert_eq!(tagged.as_array().unwrap().len(), 1);

    todo_cmd(dir.path())
        .args(["tag", "detach", &id, "urgent"])
        .assert()
        .success();

    let tagged = json(dir.path(), &["list", "--tag", "urgent"]);
    assert!(tagged.as_array().unwrap().is_empty());

    todo_cmd(dir.path())
        .args(["tag", "delete", "urgent"])
        .assert()
        .success();
    todo_cmd(dir.path())
        .args(["tag", "attach", &id, "urgent"])
        .assert()
        .code(3);
}

#[test]
fn test_subtasks() {
    let dir = setup_workspace();
    let id = add_todo(dir.path(), "Pack");

    let passport = json(dir.path(), &["subtask", "add", &id, "Passport"]);
    json(dir.path(), &["subtask", "add", &id, "Charger"]);
    let passport_id = passport["id"].as_str().unwrap();

    let toggled = json(dir.path(), &["subtask", "toggle", passport_id]);
    assert_eq!(toggled["completed"], true);

    todo_cmd(dir.path())
        .args(["subtask", "list", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/2 done"));

    todo_cmd(dir.path())
        .args(["subtask", "rename", passport_id, "Visa"])
        .assert()
        .success();

    let listed = json(dir.path(), &["subtask", "list", &id]);
    assert_eq!(listed[0]["title"], "Visa");
    assert_eq!(listed[1]["position"], 1);

    todo_cmd(dir.path())
        .args(["subtask", "delete", passport_id])
        .assert()
        .success();
}
