use archivist::cli::{execute_command, Cli};
use archivist::utils::logging;
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = execute_command(cli) {
        eprintln!("archivist: {}", e);
        std::process::exit(1);
    }
}
