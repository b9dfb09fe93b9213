use crate::repos::test_repo::TestRepo;

#[test]
fn clone_public_and_own_repositories() {
    let repo = TestRepo::new();
    assert_eq!(
        repo.noop(&["clone", "rtomayko/ronn"]),
        vec!["git clone git://github.com/rtomayko/ronn.git"]
    );
    assert_eq!(
        repo.noop(&["clone", "-p", "rtomayko/ronn"]),
        vec!["git clone git@github.com:rtomayko/ronn.git"]
    );
    assert_eq!(
        repo.noop(&["clone", "resque"]),
        vec!["git clone git@github.com:tpw/resque.git"]
    );
}

#[test]
fn clone_honors_https_protocol_and_enterprise_host() {
    let repo = TestRepo::new();
    repo.git(&["config", "hub.protocol", "https"]).unwrap();
    assert_eq!(
        repo.noop(&["clone", "rtomayko/ronn"]),
        vec!["git clone https://github.com/rtomayko/ronn.git"]
    );

    let output = repo.hub_with_env(
        &["--noop", "clone", "rtomayko/ronn"],
        &[("GITHUB_HOST", "git.example.com")],
    );
    assert!(output.success(), "{}", output.stderr);
    assert_eq!(
        output.lines(),
        vec!["git clone https://git.example.com/rtomayko/ronn.git"]
    );
}

#[test]
fn remote_add_private_fork() {
    let repo = TestRepo::with_origin("defunkt/hub");
    assert_eq!(
        repo.noop(&["remote", "add", "-p", "mislav"]),
        vec!["git remote add mislav git@github.com:mislav/hub.git"]
    );
    assert_eq!(
        repo.noop(&["remote", "add", "rtomayko"]),
        vec!["git remote add rtomayko git://github.com/rtomayko/hub.git"]
    );
}

#[test]
fn push_to_multiple_remotes() {
    let repo = TestRepo::new();
    assert_eq!(
        repo.noop(&["push", "origin,staging,qa"]),
        vec![
            "git push origin main",
            "git push staging main",
            "git push qa main",
        ]
    );
    assert_eq!(
        repo.noop(&["push", "origin,staging", "feature"]),
        vec!["git push origin feature", "git push staging feature"]
    );
}

#[test]
fn fetch_multiple_known_remotes() {
    let repo = TestRepo::with_origin("defunkt/hub");
    repo.git(&["remote", "add", "mislav", "git://github.com/mislav/hub.git"])
        .unwrap();
    assert_eq!(
        repo.noop(&["fetch", "origin,mislav"]),
        vec!["git fetch --multiple origin mislav"]
    );
}

#[test]
fn init_with_github_origin() {
    let dir = TestRepo::uninitialized("dotfiles");
    let output = dir.hub_with_env(&["--noop", "init", "-g"], &[("GITHUB_USER", "tpw")]);
    assert!(output.success(), "{}", output.stderr);
    assert_eq!(
        output.lines(),
        vec![
            "git init",
            "git remote add origin git@github.com:tpw/dotfiles.git",
        ]
    );
}

#[test]
fn cherry_pick_from_fork() {
    let repo = TestRepo::with_origin("defunkt/hub");
    assert_eq!(
        repo.noop(&["cherry-pick", "mislav@a319d88"]),
        vec![
            "git remote add -f mislav git://github.com/mislav/hub.git",
            "git cherry-pick a319d88",
        ]
    );
}

#[test]
fn submodule_add_expands_shorthand() {
    let repo = TestRepo::new();
    assert_eq!(
        repo.noop(&["submodule", "add", "-b", "stable", "wycats/bundler", "vendor/bundler"]),
        vec!["git submodule add -b stable git://github.com/wycats/bundler.git vendor/bundler"]
    );
}

#[test]
fn browse_and_compare_urls() {
    let repo = TestRepo::with_origin("defunkt/hub");
    assert_eq!(
        repo.noop(&["browse", "-u", "--", "issues"]),
        vec!["echo https://github.com/defunkt/hub/issues"]
    );
    assert_eq!(
        repo.noop(&["compare", "-u", "1.0..fix"]),
        vec!["echo https://github.com/defunkt/hub/compare/1.0...fix"]
    );
}

#[test]
fn global_flags_are_placed_on_the_chain() {
    let repo = TestRepo::new();
    let path = repo.path().to_str().unwrap().to_string();
    assert_eq!(
        repo.noop(&["-C", &path, "-c", "core.quotepath=off", "status"]),
        vec![format!("git -C {} -c core.quotepath=off status", path)]
    );
}
