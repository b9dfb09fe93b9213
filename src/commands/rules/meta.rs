use crate::commands::context::Context;
use crate::error::HubError;
use crate::git::ArgumentList;
use std::path::Path;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const SHELLS: &[&str] = &["bash", "zsh", "sh", "ksh", "csh", "fish"];

/// Commands hub adds on top of git, with their one-line synopsis.
pub const CUSTOM_COMMANDS: &[(&str, &str)] = &[
    ("alias", "git alias [-s] [SHELL]"),
    (
        "create",
        "git create [-p] [-d DESCRIPTION] [-h HOMEPAGE] [[ORGANIZATION/]NAME]",
    ),
    (
        "browse",
        "git browse [-u] [[USER/]REPOSITORY|--] [SUBPAGE]",
    ),
    ("compare", "git compare [-u] [USER] [START...]END"),
    ("fork", "git fork [--no-remote]"),
    (
        "pull-request",
        "git pull-request [-f] [-b BASE] [-h HEAD] [-i ISSUE | ISSUE-URL | TITLE]",
    ),
];

pub fn is_custom_command(name: &str) -> bool {
    CUSTOM_COMMANDS.iter().any(|(command, _)| *command == name)
}

pub fn usage_of(name: &str) -> Option<&'static str> {
    CUSTOM_COMMANDS
        .iter()
        .find(|(command, _)| *command == name)
        .map(|(_, usage)| *usage)
}

pub const HELP_TEXT: &str = "\
usage: git [--version] [--exec-path[=<path>]] [--html-path] [--man-path] [--info-path]
           [-p|--paginate|--no-pager] [--no-replace-objects] [--bare]
           [--git-dir=<path>] [--work-tree=<path>] [--namespace=<name>]
           [-c name=value] [--help]
           <command> [<args>]

Basic Commands:
   init       Create an empty git repository or reinitialize an existing one
   add        Add new or modified files to the staging area
   rm         Remove files from the working directory and staging area
   mv         Move or rename a file, a directory, or a symlink
   status     Show the status of the working directory and staging area
   commit     Record changes to the repository

History Commands:
   log        Show the commit history log
   diff       Show changes between commits, commit and working tree, etc
   show       Show information about commits, tags or files

Branching Commands:
   branch     List, create, or delete branches
   checkout   Switch the active branch to another branch
   merge      Join two or more development histories (branches) together
   tag        Create, list, delete, sign or verify a tag object

Remote Commands:
   clone      Clone a remote repository into a new directory
   fetch      Download data, tags and branches from a remote repository
   pull       Fetch from and merge with another repository or a local branch
   push       Upload data, tags and branches to a remote repository
   remote     View and manage a set of remote repositories

Advanced Commands:
   reset      Reset your staging area or working directory to another point
   rebase     Re-apply a series of patches in one branch onto another
   bisect     Find by binary search the change that introduced a bug
   grep       Print files with lines matching a pattern in your codebase

GitHub Commands:
   pull-request   Open a pull request on GitHub
   fork           Make a fork of a remote repository on GitHub and add as remote
   create         Create this repository on GitHub and add GitHub as origin
   browse         Open a GitHub page in the default browser
   compare        Open a compare page on GitHub

See 'git help <command>' for more information on a specific command.
";

/// Manual shown by `git help hub`.
pub fn manual() -> String {
    let mut text = String::from(
        "HUB(1)\n\nNAME\n       hub - git + hub = github\n\nSYNOPSIS\n       \
         hub [--noop] COMMAND OPTIONS\n       hub alias [-s] [SHELL]\n\n\
         DESCRIPTION\n       hub enhances various git commands to ease most common \
         workflows with GitHub.\n\n       git clone [-p] OPTIONS [USER/]REPOSITORY DIRECTORY\n\
         \x20      git remote add [-p] OPTIONS USER[/REPOSITORY]\n\
         \x20      git remote set-url [-p] OPTIONS REMOTE-NAME USER[/REPOSITORY]\n\
         \x20      git fetch USER-1,[USER-2,...]\n\
         \x20      git checkout PULLREQ-URL [BRANCH]\n\
         \x20      git merge PULLREQ-URL\n\
         \x20      git cherry-pick GITHUB-REF\n\
         \x20      git am|apply GITHUB-URL\n\
         \x20      git init -g OPTIONS\n\
         \x20      git push REMOTE-1,REMOTE-2,...,REMOTE-N [REF]\n\
         \x20      git submodule add [-p] OPTIONS [USER/]REPOSITORY DIRECTORY\n",
    );
    for (_, usage) in CUSTOM_COMMANDS {
        text.push_str("       ");
        text.push_str(usage);
        text.push('\n');
    }
    text.push_str(
        "\nCONFIGURATION\n       Use \"git config --global github.user USER\" and \
         \"git config --global github.token TOKEN\" to authenticate.\n       \
         Set hub.protocol to https to use HTTPS remote URLs, and GITHUB_HOST or \
         hub.host for GitHub Enterprise.\n",
    );
    text
}

/// `hub` on its own prints the help text.
pub fn hub(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    help(args, ctx)
}

/// `version` prints git's version followed by hub's.
pub fn version(args: &mut ArgumentList, _ctx: &Context) -> Result<(), HubError> {
    args.schedule_after_with("echo", &["hub version", VERSION]);
    Ok(())
}

/// `help hub` shows the manual; bare `help` the command overview. Anything
/// else is git's own help.
pub fn help(args: &mut ArgumentList, _ctx: &Context) -> Result<(), HubError> {
    let words = args.words();
    match words.get(1).map(String::as_str) {
        Some("hub") => args.display(manual(), true),
        None if !args.has_flag(&["-a", "--all"]) => {
            let paged = args.has_flag(&["-p", "--paginate"]);
            args.display(HELP_TEXT, paged);
        }
        _ => {}
    }
    Ok(())
}

/// `alias [-s] [SHELL]`
pub fn alias(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    let script = args.remove_value("-s");
    let shell = args
        .get(1)
        .map(str::to_string)
        .or_else(|| ctx.shell().map(str::to_string))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| HubError::Usage("hub alias: unknown shell".to_string()))?;
    let shell = Path::new(&shell)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or(shell);

    if !SHELLS.contains(&shell.as_str()) {
        return Err(HubError::Usage(format!(
            "hub alias: unsupported shell\nsupported shells: {}",
            SHELLS.join(" ")
        )));
    }

    let text = if script {
        let mut text = String::from("alias git=hub\n");
        if shell == "zsh" {
            text.push_str("if type compdef >/dev/null; then\n   compdef hub=git\nfi\n");
        }
        text
    } else {
        let profile = match shell.as_str() {
            "bash" => "~/.bash_profile",
            "zsh" => "~/.zshrc",
            "ksh" => "~/.profile",
            _ => "your profile",
        };
        format!(
            "# Wrap git automatically by adding the following to {}:\n\neval \"$(hub alias -s)\"\n",
            profile
        )
    };
    args.display(text, false);
    Ok(())
}
