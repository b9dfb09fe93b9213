use crate::repos::test_repo::TestRepo;

#[test]
fn passthrough_runs_git() {
    let repo = TestRepo::new();
    let output = repo.hub(&["rev-parse", "--is-inside-work-tree"]);
    assert!(output.success(), "{}", output.stderr);
    assert_eq!(output.stdout.trim(), "true");
}

#[test]
fn git_exit_status_is_propagated() {
    let repo = TestRepo::new();
    let output = repo.hub(&["rev-parse", "--verify", "-q", "no-such-ref"]);
    assert_eq!(output.code, Some(1));
}

#[test]
fn wrapped_executable_comes_from_environment() {
    let repo = TestRepo::new();
    let output = repo.hub_with_env(&["status", "-sb"], &[("GIT", "echo")]);
    assert!(output.success(), "{}", output.stderr);
    assert_eq!(output.stdout, "status -sb\n");
}

#[test]
fn version_appends_hub_version() {
    let repo = TestRepo::new();
    let output = repo.hub(&["--version"]);
    assert!(output.success(), "{}", output.stderr);
    let lines = output.lines();
    assert!(lines[0].starts_with("git version"));
    assert_eq!(
        lines.last().unwrap(),
        &format!("hub version {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn browse_url_is_echoed() {
    let repo = TestRepo::new();
    let output = repo.hub(&["browse", "-u", "mojombo/bert", "wiki"]);
    assert!(output.success(), "{}", output.stderr);
    assert_eq!(output.stdout, "https://github.com/mojombo/bert/wiki\n");
}

#[test]
fn help_lists_github_commands() {
    let repo = TestRepo::new();
    let output = repo.hub(&[]);
    assert!(output.success(), "{}", output.stderr);
    assert!(output.stdout.contains("GitHub Commands:"));

    let output = repo.hub(&["help", "hub"]);
    assert!(output.stdout.starts_with("HUB(1)"));
}

#[test]
fn alias_script() {
    let repo = TestRepo::new();
    let output = repo.hub(&["alias", "-s", "bash"]);
    assert!(output.success(), "{}", output.stderr);
    assert_eq!(output.stdout, "alias git=hub\n");

    let output = repo.hub(&["alias", "tcsh"]);
    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("hub alias: unsupported shell"));
}

#[test]
fn custom_command_usage() {
    let repo = TestRepo::new();
    let output = repo.hub(&["fork", "-h"]);
    assert_eq!(output.code, Some(1));
    assert_eq!(output.stderr.trim(), "Usage: git fork [--no-remote]");
}

#[test]
fn errors_abort_before_running_anything() {
    let dir = TestRepo::uninitialized("scratch");
    let output = dir.hub_with_env(&["create"], &[("GITHUB_USER", "tpw")]);
    assert_eq!(output.code, Some(1));
    assert_eq!(
        output.stderr.trim(),
        "'create' must be run from inside a git repository"
    );
}

#[test]
fn chained_commands_stop_at_first_failure() {
    let repo = TestRepo::new();
    // no commits yet, so the first push fails and the second never runs
    let output = repo.hub(&["push", "nowhere,elsewhere"]);
    assert_ne!(output.code, Some(0));
    assert!(!output.stderr.contains("elsewhere"));
}
