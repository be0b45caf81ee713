use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn dashboard_cmd(db_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("homelab-dashboard").unwrap();
    cmd.env("DASHBOARD_DB_PATH", db_dir.path().join("dashboard.db"));
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();

    dashboard_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("feed"))
        .stdout(predicate::str::contains("subreddit"));
}

#[test]
fn test_serve_help_shows_bind_flag() {
    let dir = TempDir::new().unwrap();

    dashboard_cmd(&dir)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--bind"));
}

#[test]
fn test_empty_lists() {
    let dir = TempDir::new().unwrap();

    dashboard_cmd(&dir)
        .args(["feed", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No feeds configured."));

    dashboard_cmd(&dir)
        .args(["subreddit", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No subreddits followed."));
}

#[test]
fn test_feed_add_then_list() {
    let dir = TempDir::new().unwrap();

    dashboard_cmd(&dir)
        .args(["feed", "add", "Rust Blog", "https://blog.rust-lang.org/feed.xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Feed added!"));

    dashboard_cmd(&dir)
        .args(["feed", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] Rust Blog"))
        .stdout(predicate::str::contains("https://blog.rust-lang.org/feed.xml"));
}

#[test]
fn test_feed_add_rejects_non_http_url() {
    let dir = TempDir::new().unwrap();

    dashboard_cmd(&dir)
        .args(["feed", "add", "Local", "file:///etc/passwd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_feed_add_duplicate_fails() {
    let dir = TempDir::new().unwrap();

    dashboard_cmd(&dir)
        .args(["feed", "add", "A", "https://example.com/feed"])
        .assert()
        .success();

    dashboard_cmd(&dir)
        .args(["feed", "add", "B", "https://example.com/feed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Already exists"));
}

#[test]
fn test_feed_remove_unknown_id_fails() {
    let dir = TempDir::new().unwrap();

    dashboard_cmd(&dir)
        .args(["feed", "remove", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_subreddit_follow_strips_prefix() {
    let dir = TempDir::new().unwrap();

    dashboard_cmd(&dir)
        .args(["subreddit", "follow", "r/selfhosted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Following r/selfhosted"));

    dashboard_cmd(&dir)
        .args(["subreddit", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] r/selfhosted"));
}

#[test]
fn test_subreddit_unfollow() {
    let dir = TempDir::new().unwrap();

    dashboard_cmd(&dir)
        .args(["subreddit", "follow", "rust"])
        .assert()
        .success();

    dashboard_cmd(&dir)
        .args(["subreddit", "unfollow", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unfollowed"));

    dashboard_cmd(&dir)
        .args(["subreddit", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No subreddits followed."));
}
