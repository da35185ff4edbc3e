use ctx::{cli::execute_command, exit_codes::CtxExitCode};
use tracing_subscriber::EnvFilter;

/// Main entry point for the program
fn main() {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut out = std::io::stdout().lock();
    let exit_code = match execute_command(std::env::args_os(), &mut out) {
        Ok(()) => CtxExitCode::Success,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(usage) = e.usage() {
                eprint!("{}", usage);
            }
            e.exit_code()
        }
    };

    std::process::exit(exit_code.into());
}
