use crate::repos::test_repo::TestRepo;

#[test]
fn alias_with_args_expands_into_clone_rewrite() {
    let repo = TestRepo::new();
    repo.git(&["config", "alias.c", "clone --bare"]).unwrap();

    assert_eq!(
        repo.noop(&["c", "rtomayko/ronn", "ronn.git"]),
        vec!["git clone --bare git://github.com/rtomayko/ronn.git ronn.git"]
    );
}

#[test]
fn alias_to_plain_git_command_is_left_for_git() {
    let repo = TestRepo::new();
    repo.git(&["config", "alias.st", "status -sb"]).unwrap();

    assert_eq!(repo.noop(&["st", "."]), vec!["git st ."]);
}

#[test]
fn shell_alias_is_not_expanded() {
    let repo = TestRepo::new();
    repo.git(&["config", "alias.root", "!git rev-parse --show-toplevel"])
        .unwrap();

    assert_eq!(repo.noop(&["root"]), vec!["git root"]);
}

#[test]
fn alias_parsing_respects_quotes() {
    let repo = TestRepo::with_origin("defunkt/hub");
    repo.git(&["config", "alias.rap", "remote add -p \"mislav\""])
        .unwrap();

    assert_eq!(
        repo.noop(&["rap"]),
        vec!["git remote add mislav git@github.com:mislav/hub.git"]
    );
}

#[test]
fn custom_commands_ignore_aliases() {
    let repo = TestRepo::new();
    repo.git(&["config", "alias.browse", "status"]).unwrap();

    assert_eq!(
        repo.noop(&["browse", "-u", "mojombo/bert"]),
        vec!["echo https://github.com/mojombo/bert"]
    );
}
