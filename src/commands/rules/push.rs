use crate::commands::context::Context;
use crate::error::HubError;
use crate::git::ArgumentList;

/// `push REMOTE1,REMOTE2,... [REF...]`
///
/// Pushes to the first remote, then once more per extra remote as
/// follow-ups so they only run if the previous push succeeded.
pub fn push(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    let Some(targets) = args.get(1).filter(|t| t.contains(',')).map(str::to_string) else {
        return Ok(());
    };

    let mut refs: Vec<String> = args.words().into_iter().skip(2).collect();
    let mut remotes = targets.split(',').filter(|r| !r.is_empty());
    let Some(first) = remotes.next() else {
        return Ok(());
    };
    args.set(1, first);

    if refs.is_empty() {
        let branch = ctx.current_branch().ok_or_else(|| {
            HubError::Domain("Error: no current branch to push".to_string())
        })?;
        refs.push(branch.short_name().to_string());
        args.push(branch.short_name());
    }

    for remote in remotes {
        let mut command = vec!["push".to_string(), remote.to_string()];
        command.extend(refs.iter().cloned());
        args.schedule_after(&command);
    }
    Ok(())
}
