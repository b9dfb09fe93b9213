use crate::config::Config;
use crate::utils::debug_log;
use std::io::{IsTerminal, Write};
use std::process::{Command, Stdio};

/// Print `text` to stdout, through the configured pager when `paged` is set
/// and stdout is a terminal.
pub fn display(text: &str, paged: bool, config: &Config) {
    if paged && std::io::stdout().is_terminal() {
        if let Some(pager) = config.pager_command() {
            if page(text, &pager) {
                return;
            }
        }
    }
    print_plain(text);
}

fn print_plain(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    if !text.ends_with('\n') {
        let _ = stdout.write_all(b"\n");
    }
    let _ = stdout.flush();
}

/// Returns false when the pager could not be started so the caller can fall
/// back to plain output.
fn page(text: &str, pager: &str) -> bool {
    let Some(words) = shlex::split(pager).filter(|w| !w.is_empty()) else {
        debug_log(&format!("unusable pager command: {}", pager));
        return false;
    };

    let mut command = Command::new(&words[0]);
    command.args(&words[1..]).stdin(Stdio::piped());
    if std::env::var_os("LESS").is_none() {
        command.env("LESS", "FRX");
    }

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            debug_log(&format!("failed to start pager {}: {}", pager, e));
            return false;
        }
    };

    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(text.as_bytes()) {
            Ok(()) => {}
            // the user quit the pager early
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Err(e) => debug_log(&format!("failed writing to pager: {}", e)),
        }
        drop(stdin);
    }

    if let Err(e) = child.wait() {
        debug_log(&format!("failed waiting for pager: {}", e));
    }
    true
}
