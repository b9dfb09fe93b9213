use crate::api::CreateOptions;
use crate::commands::context::Context;
use crate::error::HubError;
use crate::git::ArgumentList;

/// `create [-p] [-d DESCRIPTION] [-h HOMEPAGE] [[ORGANIZATION/]NAME]`
pub fn create(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    if !ctx.is_repo() {
        return Err(HubError::Domain(
            "'create' must be run from inside a git repository".to_string(),
        ));
    }

    let mut owner = ctx.github_user()?;
    let mut rest = args.take_arguments().into_iter();
    let mut options = CreateOptions::default();
    let mut name: Option<String> = None;

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-p" => options.private = true,
            "-d" => options.description = rest.next(),
            "-h" => options.homepage = rest.next(),
            _ if !arg.starts_with('-') && name.is_none() => match arg.split_once('/') {
                Some((org, repo)) => {
                    owner = org.to_string();
                    name = Some(repo.to_string());
                }
                None => name = Some(arg.clone()),
            },
            _ => return Err(HubError::Usage(format!("invalid argument: {}", arg))),
        }
    }

    let name = match name {
        Some(name) => name,
        None => ctx.repo_name().ok_or_else(|| {
            HubError::Domain("Error: can't determine repository name".to_string())
        })?,
    };
    let project = ctx.github_project(Some(&name), Some(&owner))?;

    let exists = ctx
        .hosted()
        .project_exists(&project)
        .map_err(|e| e.during("creating repository"))?;
    let action = if exists {
        args.notice(format!(
            "{} already exists on {}",
            project.name_with_owner(),
            project.host
        ));
        "set remote origin"
    } else {
        if !args.is_dry_run() {
            ctx.hosted()
                .create_project(&project, &options)
                .map_err(|e| e.during("creating repository"))?;
        }
        "created repository"
    };

    let url = ctx.git_url(&project, true);
    if ctx.remotes().first().map(String::as_str) != Some("origin") {
        args.replace_all(&["remote", "add", "-f", "origin", url.as_str()]);
    } else {
        args.replace_all(&["remote", "-v"]);
    }
    args.schedule_after_with(
        "echo",
        &[format!("{}:", action), project.name_with_owner()],
    );
    Ok(())
}
