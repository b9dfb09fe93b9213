use crate::commands::context::Context;
use crate::error::HubError;
use crate::git::ArgumentList;
use crate::repo_url::{RepositoryReference, escape_ref_path};
use once_cell::sync::Lazy;
use regex::Regex;

static TWO_DOT_RANGE: Lazy<Regex> = Lazy::new(|| {
    let sha_or_tag = r"(\w{1,2}|\w[\w.-]+\w)";
    Regex::new(&format!(r"^{}\.\.{}$", sha_or_tag, sha_or_tag))
        .expect("range pattern is valid")
});

#[cfg(target_os = "macos")]
const LAUNCHERS: &[&str] = &["open"];
#[cfg(windows)]
const LAUNCHERS: &[&str] = &["cmd"];
#[cfg(not(any(target_os = "macos", windows)))]
const LAUNCHERS: &[&str] = &[
    "xdg-open",
    "cygstart",
    "x-www-browser",
    "firefox",
    "opera",
    "mozilla",
    "netscape",
];

/// Command line that opens a URL: `$BROWSER`, else the first launcher
/// found on `PATH`.
fn browser_launcher(ctx: &Context) -> Result<Vec<String>, HubError> {
    if let Some(browser) = ctx.browser() {
        if let Some(words) = shlex::split(browser).filter(|w| !w.is_empty()) {
            return Ok(words);
        }
    }
    let found = LAUNCHERS
        .iter()
        .find(|launcher| which::which(launcher).is_ok())
        .map(|launcher| {
            if cfg!(windows) {
                vec!["cmd".to_string(), "/c".to_string(), "start".to_string()]
            } else {
                vec![launcher.to_string()]
            }
        });
    found.ok_or_else(|| {
        HubError::Domain("Please set $BROWSER to a web launcher to use this command.".to_string())
    })
}

/// Shared tail of `browse` and `compare`: strip `-u`/`-p`, compute the URL
/// from the remaining arguments, then print or open it.
fn browse_command(
    args: &mut ArgumentList,
    ctx: &Context,
    url_for: impl FnOnce(&mut Vec<String>, &Context) -> Result<String, HubError>,
) -> Result<(), HubError> {
    let mut rest = args.take_arguments();
    let url_only = remove(&mut rest, "-u");
    if remove(&mut rest, "-p") {
        args.notice("Warning: the `-p` flag has no effect anymore");
    }

    let url = url_for(&mut rest, ctx)?;

    let mut launcher = if url_only {
        vec!["echo".to_string()]
    } else {
        browser_launcher(ctx)?
    };
    let executable = launcher.remove(0);
    launcher.extend(rest);
    launcher.push(url);
    args.set_executable(executable);
    args.replace_all(&launcher);
    Ok(())
}

fn remove(tokens: &mut Vec<String>, value: &str) -> bool {
    match tokens.iter().position(|t| t == value) {
        Some(idx) => {
            tokens.remove(idx);
            true
        }
        None => false,
    }
}

fn shift(tokens: &mut Vec<String>) -> Option<String> {
    (!tokens.is_empty()).then(|| tokens.remove(0))
}

fn missing_project() -> HubError {
    HubError::Usage("Usage: hub browse [<USER>/]<REPOSITORY>".to_string())
}

/// `browse [-u] [[USER/]REPOSITORY|--] [SUBPAGE]`
pub fn browse(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    browse_command(args, ctx, |rest, ctx| {
        let dest = shift(rest).filter(|d| d != "--");
        let (project, branch) = match dest {
            Some(dest) => (ctx.github_project(Some(&dest), None)?, ctx.default_branch()),
            None => {
                let project = ctx.current_project().ok_or_else(missing_project)?;
                let branch = ctx.upstream_branch().unwrap_or_else(|| ctx.default_branch());
                (project, branch)
            }
        };

        let default = ctx.default_branch();
        let ref_path = escape_ref_path(branch.short_name());
        let path = match shift(rest).as_deref() {
            Some("commits") => Some(format!("/commits/{}", ref_path)),
            Some("tree") | None => {
                (!branch.is_default(&default)).then(|| format!("/tree/{}", ref_path))
            }
            Some(subpage) => Some(format!("/{}", subpage)),
        };
        Ok(project.web_url(path.as_deref()))
    })
}

/// `compare [-u] [USER] [START...]END`
pub fn compare(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    browse_command(args, ctx, |rest, ctx| {
        let (project, range): (RepositoryReference, String) = match rest.pop() {
            None => {
                let usage =
                    || HubError::Usage("Usage: hub compare [USER] [<START>...]<END>".to_string());
                let upstream = ctx.upstream_branch().ok_or_else(usage)?;
                if upstream.is_default(&ctx.default_branch()) {
                    return Err(usage());
                }
                let project = ctx.current_project().ok_or_else(usage)?;
                (project, upstream.short_name().to_string())
            }
            Some(last) => {
                let range = TWO_DOT_RANGE.replace(&last, "$1...$2").to_string();
                let project = match rest.pop() {
                    Some(owner) => ctx.github_project(None, Some(&owner))?,
                    None => ctx.current_project().ok_or_else(missing_project)?,
                };
                (project, range)
            }
        };
        Ok(project.web_url(Some(&format!("/compare/{}", range.replace('/', ";")))))
    })
}
