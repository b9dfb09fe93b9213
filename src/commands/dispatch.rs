use crate::api::{ApiClient, Credentials};
use crate::commands::context::{Context, Settings};
use crate::commands::executor;
use crate::commands::rules::{self, meta};
use crate::config::Config;
use crate::error::HubError;
use crate::git::cli_parser::{ParsedGlobalFlags, parse_global_flags};
use crate::git::{ArgumentList, GitRepository, LocalState};
use crate::utils::debug_log;

/// Entry point for one invocation. Returns the process exit code.
pub fn run(raw_args: &[String]) -> i32 {
    let config = Config::get();
    let parsed = parse_global_flags(raw_args);
    debug_log(&format!("global flags: {:?}", parsed));

    let repo = GitRepository::new(
        config.git_cmd(),
        &parsed.exec_flags,
        &config.editor_command(),
    );
    let client = ApiClient::new(config, || Credentials {
        user: repo
            .config_value("github.user")
            .or_else(|| config.github_user().map(str::to_string)),
        token: repo
            .config_value("github.token")
            .or_else(|| config.github_token().map(str::to_string)),
    });
    let ctx = Context::new(&repo, &client, Settings::from_config(config));

    let result = rewrite(parsed, &ctx, config.git_cmd())
        .and_then(|args| executor::execute(&args, config));
    match result {
        Ok(code) => code,
        Err(e) => {
            report(&e);
            1
        }
    }
}

fn report(err: &HubError) {
    eprintln!("{}", err);
    for hint in err.hints() {
        eprintln!("{}", hint);
    }
}

/// Turn the invocation into a fully rewritten argument list: expand git
/// aliases, apply the global flags, then run the subcommand's rule if it
/// has one.
pub fn rewrite(
    parsed: ParsedGlobalFlags,
    ctx: &Context,
    git_cmd: &str,
) -> Result<ArgumentList, HubError> {
    let mut tokens = parsed.command;
    if tokens.is_empty() {
        tokens.push("help".to_string());
    }

    if let Some(text) = custom_help(&tokens)? {
        let mut args = ArgumentList::new(&tokens, git_cmd);
        args.display(text, true);
        return Ok(args);
    }

    let (tokens, rule) = match expand_alias(&tokens, ctx) {
        Some(expanded) => match rules::lookup(&expanded[0]) {
            Some(rule) => {
                debug_log(&format!("alias {} expands to {:?}", tokens[0], expanded));
                (expanded, Some(rule))
            }
            // git expands the alias itself
            None => (tokens, None),
        },
        None => {
            let rule = rules::lookup(&tokens[0]);
            (tokens, rule)
        }
    };

    let mut args = ArgumentList::new(&tokens, git_cmd);
    args.add_exec_flags(&parsed.exec_flags);
    args.add_local_flags(&parsed.local_flags);
    if parsed.noop {
        args.set_noop();
    }

    if let Some(rule) = rule {
        rule(&mut args, ctx)?;
    }
    Ok(args)
}

/// `alias.<command>` from git config, split into words with the remaining
/// user tokens appended. Commands hub implements itself and shell aliases
/// are never expanded.
fn expand_alias(tokens: &[String], ctx: &Context) -> Option<Vec<String>> {
    let command = tokens.first()?;
    if meta::is_custom_command(command) {
        return None;
    }
    let body = ctx.local().config_value(&format!("alias.{}", command))?;
    if body.trim_start().starts_with('!') {
        return None;
    }
    let mut expanded = shlex::split(&body).filter(|words| !words.is_empty())?;
    expanded.extend(tokens[1..].iter().cloned());
    Some(expanded)
}

/// `<custom> -h` is a usage error, `<custom> --help` shows the manual.
fn custom_help(tokens: &[String]) -> Result<Option<String>, HubError> {
    let [command, flag] = tokens else {
        return Ok(None);
    };
    let Some(usage) = meta::usage_of(command) else {
        return Ok(None);
    };
    match flag.as_str() {
        "-h" => Err(HubError::Usage(format!("Usage: {}", usage))),
        "--help" => Ok(Some(meta::manual())),
        _ => Ok(None),
    }
}
