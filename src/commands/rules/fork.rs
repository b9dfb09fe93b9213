use crate::commands::context::Context;
use crate::error::HubError;
use crate::git::ArgumentList;

/// `fork [--no-remote]`
pub fn fork(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    let project = ctx.main_project().ok_or_else(|| {
        HubError::Domain(
            "Error: repository under 'origin' remote is not a GitHub project".to_string(),
        )
    })?;
    let forked = project.owned_by(&ctx.github_user()?);

    let exists = ctx
        .hosted()
        .project_exists(&forked)
        .map_err(|e| e.during("creating fork"))?;
    // an existing repository of that name aborts whether or not it is a fork
    if exists {
        return Err(HubError::Domain(format!(
            "Error creating fork: {} already exists on {}",
            forked.name_with_owner(),
            forked.host
        )));
    }
    if !args.is_dry_run() {
        ctx.hosted()
            .fork_project(&project)
            .map_err(|e| e.during("creating fork"))?;
    }

    if args.contains("--no-remote") {
        args.skip();
        return Ok(());
    }

    let url = ctx.git_url(&forked, true);
    args.replace_all(&["remote", "add", "-f", forked.remote_slug(), url.as_str()]);
    args.schedule_after_with("echo", &["new remote:", forked.remote_slug()]);
    Ok(())
}
