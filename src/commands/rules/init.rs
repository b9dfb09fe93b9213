use crate::commands::context::Context;
use crate::error::HubError;
use crate::git::ArgumentList;

/// `init -g`: after initializing, point `origin` at the user's repository
/// named after the current directory.
pub fn init(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    if !args.remove_value("-g") {
        return Ok(());
    }
    let name = ctx.local().working_dir_name().ok_or_else(|| {
        HubError::Domain("Error: can't determine the current directory name".to_string())
    })?;
    let project = ctx.github_project(Some(&name), None)?;
    let url = ctx.git_url(&project, true);
    args.schedule_after(&["remote", "add", "origin", url.as_str()]);
    Ok(())
}
