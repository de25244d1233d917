use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn roster_cmd() -> Command {
    let mut cmd = Command::cargo_bin("roster").expect("Failed to find roster binary");
    cmd.arg("--no-color");
    cmd
}

/// Registers a worker and returns nothing; the first record gets ID 1.
fn register_worker(db_arg: &str, name: &str) {
    roster_cmd()
        .args(["--database-file", db_arg, "entity", "create", "worker", name])
        .assert()
        .success();
}

#[test]
fn test_cli_create_worker() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    roster_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "entity",
            "create",
            "worker",
            "Amina Hassan",
            "--type",
            "Housemaid",
            "--passport-number",
            "P998877",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created worker with ID: 1"))
        .stdout(predicate::str::contains("# 1. Amina Hassan"))
        .stdout(predicate::str::contains("P998877"))
        .stdout(predicate::str::contains("- [ ] visa"));
}

#[test]
fn test_cli_create_rejects_attribute_of_other_kind() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    roster_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "entity",
            "create",
            "worker",
            "Amina Hassan",
            "--airline",
            "Qatar Airways",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create entity"));
}

#[test]
fn test_cli_list_empty() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    roster_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "entity", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entities found."));
}

#[test]
fn test_cli_default_command_lists_workers() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    register_worker(db_arg, "Amina Hassan");
    roster_cmd()
        .args(["--database-file", db_arg, "entity", "create", "task", "Renew licence"])
        .assert()
        .success();

    roster_cmd()
        .args(["--database-file", db_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Amina Hassan (ID: 1)"))
        .stdout(predicate::str::contains("Renew licence").not());
}

#[test]
fn test_cli_search_filter() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    register_worker(db_arg, "Amina Hassan");
    register_worker(db_arg, "Fatima Omar");

    roster_cmd()
        .args([
            "--database-file",
            db_arg,
            "entity",
            "list",
            "--search",
            "amina",
            "--status",
            "all",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amina Hassan"))
        .stdout(predicate::str::contains("Fatima Omar").not());
}

#[test]
fn test_cli_milestones_drive_progress() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    register_worker(db_arg, "Amina Hassan");

    for label in ["visa", "passport", "medical"] {
        roster_cmd()
            .args(["--database-file", db_arg, "milestone", "set", "1", label])
            .assert()
            .success();
    }

    roster_cmd()
        .args(["--database-file", db_arg, "milestone", "check", "1", "Insurance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milestone 'Insurance' is now done"))
        .stdout(predicate::str::contains("4/6 (66%, Attention Needed)"));

    roster_cmd()
        .args(["--database-file", db_arg, "milestone", "list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [x] insurance"))
        .stdout(predicate::str::contains("- [ ] contract"));

    roster_cmd()
        .args(["--database-file", db_arg, "milestone", "set", "1", "visa", "--undone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milestone 'visa' is now pending"))
        .stdout(predicate::str::contains("3/6 (50%, Attention Needed)"));

    roster_cmd()
        .args(["--database-file", db_arg, "milestone", "set", "1", "stamped"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Milestone 'stamped' not found"));
}

#[test]
fn test_cli_custom_checklist() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    roster_cmd()
        .args([
            "--database-file",
            db_arg,
            "entity",
            "create",
            "ticket",
            "DOH one-way",
            "--milestones",
            "booked,paid",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [ ] booked"))
        .stdout(predicate::str::contains("- [ ] paid"));

    roster_cmd()
        .args(["--database-file", db_arg, "milestone", "add", "1", "boarded"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added milestone 'boarded' to DOH one-way"))
        .stdout(predicate::str::contains("0/3"));

    roster_cmd()
        .args(["--database-file", db_arg, "milestone", "add", "1", "PAID"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    roster_cmd()
        .args(["--database-file", db_arg, "milestone", "toggle", "1", "booked"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milestone 'booked' is now done"));

    roster_cmd()
        .args(["--database-file", db_arg, "milestone", "remove", "1", "boarded"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/2 (50%, Attention Needed)"));
}

#[test]
fn test_cli_status_change_is_recorded() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    register_worker(db_arg, "Amina Hassan");

    roster_cmd()
        .args([
            "--database-file",
            db_arg,
            "--actor",
            "ops",
            "status",
            "set",
            "1",
            "today-flying",
            "--note",
            "QR1234 at 22:10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved worker 'Amina Hassan' (ID: 1)"))
        .stdout(predicate::str::contains("Today Flying"));

    roster_cmd()
        .args(["--database-file", db_arg, "history", "list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Today Flying** by ops: QR1234 at 22:10"))
        .stdout(predicate::str::contains("Registered"));
}

#[test]
fn test_cli_status_of_other_kind_is_rejected() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    register_worker(db_arg, "Amina Hassan");

    roster_cmd()
        .args(["--database-file", db_arg, "status", "set", "1", "Confirmed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to change status of entity 1"));
}

#[test]
fn test_cli_strict_transitions() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    register_worker(db_arg, "Amina Hassan");

    roster_cmd()
        .args([
            "--database-file",
            db_arg,
            "--strict-transitions",
            "status",
            "set",
            "1",
            "Abroad",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not allowed"));

    // Without the flag any status of the kind is accepted.
    roster_cmd()
        .args(["--database-file", db_arg, "status", "set", "1", "Abroad"])
        .assert()
        .success();
}

#[test]
fn test_cli_status_legend() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    roster_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "status",
            "legend",
            "ticket",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Ticket statuses"))
        .stdout(predicate::str::contains("| ✓ Confirmed | green | check-circle |"));
}

#[test]
fn test_cli_add_note() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    register_worker(db_arg, "Amina Hassan");

    roster_cmd()
        .args([
            "--database-file",
            db_arg,
            "--actor",
            "front-desk",
            "history",
            "note",
            "1",
            "Passport collected",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added note to entity 1"))
        .stdout(predicate::str::contains("by front-desk: Passport collected"));
}

#[test]
fn test_cli_update_entity() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    register_worker(db_arg, "Amina Hassan");

    roster_cmd()
        .args([
            "--database-file",
            db_arg,
            "entity",
            "update",
            "1",
            "--name",
            "Amina H. Hassan",
            "--destination",
            "Qatar",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated worker with ID: 1"))
        .stdout(predicate::str::contains("Renamed to 'Amina H. Hassan'"))
        .stdout(predicate::str::contains("Qatar"));
}

#[test]
fn test_cli_delete_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    register_worker(db_arg, "Amina Hassan");

    roster_cmd()
        .args(["--database-file", db_arg, "entity", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confirmed"));

    roster_cmd()
        .args(["--database-file", db_arg, "entity", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Deleted worker 'Amina Hassan' (ID: 1) with its milestones and history",
        ));

    roster_cmd()
        .args(["--database-file", db_arg, "entity", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entity with ID 1 not found"));
}

#[test]
fn test_cli_layout_persists() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    roster_cmd()
        .args(["--database-file", db_arg, "layout", "move", "recent-activity", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Moved recent-activity to position 1"));

    roster_cmd()
        .args(["--database-file", db_arg, "layout", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. **Recent Activity** (`recent-activity`)"));

    roster_cmd()
        .args(["--database-file", db_arg, "layout", "toggle", "sidebar-clock"])
        .assert()
        .failure();
}
