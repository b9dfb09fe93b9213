use clap::Parser;

#[derive(Parser)]
#[command(name = "hub")]
#[command(about = "git wrapper with GitHub shortcuts", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Git command and arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    hub::observability::init();

    let cli = Cli::parse();

    hub::utils::debug_log(&format!("args: {:?}", cli.args));

    std::process::exit(hub::commands::dispatch::run(&cli.args));
}
