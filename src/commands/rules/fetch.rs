use crate::commands::context::Context;
use crate::error::HubError;
use crate::git::ArgumentList;
use crate::repo_url::is_owner;
use once_cell::sync::Lazy;
use regex::Regex;

static COMMA_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+(,\w+)+$").expect("comma list pattern is valid"));

/// `fetch USER`, `fetch USER1,USER2` and `fetch --multiple USER1 USER2`
///
/// Users that are not yet remotes get a `remote add` for their fork of the
/// current repository, provided the fork exists.
pub fn fetch(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    let names: Vec<String> = if args.contains("--multiple") {
        args.words().into_iter().skip(1).collect()
    } else if let Some(remote_name) = args.words().get(1).cloned() {
        if COMMA_LIST.is_match(&remote_name) {
            let index = args.position(&remote_name).unwrap_or(args.len());
            args.remove_at(index);
            let names: Vec<String> = remote_name.split(',').map(str::to_string).collect();
            let mut replacement = vec!["--multiple".to_string()];
            replacement.extend(names.iter().cloned());
            args.insert_at(index, &replacement);
            names
        } else {
            vec![remote_name]
        }
    } else {
        Vec::new()
    };

    let remotes = ctx.remotes();
    for name in names {
        if !is_owner(&name)
            || remotes.contains(&name)
            || ctx.local().remote_group(&name).is_some()
        {
            continue;
        }
        let project = ctx.github_project(None, Some(&name))?;
        if ctx.hosted().project_exists(&project)? {
            let url = ctx.git_url(&project, false);
            args.schedule_before(&["remote", "add", project.remote_slug(), url.as_str()]);
        }
    }
    Ok(())
}
