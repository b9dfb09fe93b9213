use std::process::ExitStatus;

/// Debug logging utility function
///
/// Emits a `tracing` debug event under the `hub` target. Nothing is printed
/// unless the subscriber installed by [`crate::observability::init`] enables
/// debug output (`HUB_DEBUG=1` or a `HUB_LOG` filter).
pub fn debug_log(msg: &str) {
    tracing::debug!(target: "hub", "{}", msg);
}

/// Quote a single token for display in a POSIX shell line.
pub fn sh_quote(s: &str) -> String {
    if !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@%+,=~".contains(c))
    {
        return s.to_string();
    }

    let mut out = String::from("'");
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// Render a command as a single shell-safe line, e.g. for `--noop` output.
pub fn shell_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(sh_quote)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map a child's exit status onto our own exit code. Signals follow the
/// shell convention of 128 + signal number.
pub fn exit_code_for(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
