use crate::commands::pager;
use crate::config::Config;
use crate::error::HubError;
use crate::git::{ArgumentList, ScheduledCommand};
use crate::utils::{debug_log, exit_code_for};
use std::io::Write;
use std::process::Command;

/// Carry out a rewritten argument list and return the process exit code.
///
/// A lone command replaces the current process on Unix. Anything with
/// scheduled commands runs as a supervised chain where the first failure
/// stops the rest.
pub fn execute(args: &ArgumentList, config: &Config) -> Result<i32, HubError> {
    for notice in args.notices() {
        eprintln!("{}", notice);
    }

    if args.is_skipped() {
        if let Some(output) = args.output() {
            pager::display(&output.text, output.paged, config);
        }
        return Ok(0);
    }

    let commands = args.commands();
    if args.is_dry_run() {
        let mut stdout = std::io::stdout().lock();
        for command in &commands {
            writeln!(stdout, "{}", command.to_shell_line())?;
        }
        stdout.flush()?;
        return Ok(0);
    }

    if args.is_chained() {
        run_chain(&commands)
    } else {
        exec_replace(&args.main_command())
    }
}

/// Run each command in order, stopping at the first failure. The exit code
/// of the last command run is returned.
pub fn run_chain(commands: &[ScheduledCommand]) -> Result<i32, HubError> {
    let mut code = 0;
    for command in commands {
        debug_log(&format!("running: {}", command.to_shell_line()));
        let status = Command::new(&command.executable)
            .args(&command.args)
            .status()
            .map_err(|e| spawn_error(&command.executable, e))?;
        code = exit_code_for(status);
        if !status.success() {
            debug_log(&format!(
                "{} exited with {}, skipping remaining commands",
                command.executable, code
            ));
            return Ok(code);
        }
    }
    Ok(code)
}

#[cfg(unix)]
fn exec_replace(command: &ScheduledCommand) -> Result<i32, HubError> {
    use std::os::unix::process::CommandExt;

    debug_log(&format!("exec: {}", command.to_shell_line()));
    let _ = std::io::stdout().flush();
    let _ = std::io::stderr().flush();
    // only returns on failure
    let err = Command::new(&command.executable)
        .args(&command.args)
        .exec();
    Err(spawn_error(&command.executable, err))
}

#[cfg(not(unix))]
fn exec_replace(command: &ScheduledCommand) -> Result<i32, HubError> {
    run_chain(std::slice::from_ref(command))
}

fn spawn_error(executable: &str, err: std::io::Error) -> HubError {
    if err.kind() == std::io::ErrorKind::NotFound {
        HubError::ToolNotFound(executable.to_string())
    } else {
        HubError::IoError(err)
    }
}
