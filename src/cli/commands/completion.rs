use crate::cli::parser::{Cli, CompletionArgs, Shell};
use crate::utils::Result;
use clap::CommandFactory;
use clap_complete::{generate, shells};
use std::io::{self, Write};

const BIN_NAME: &str = "archivist";

pub fn execute(args: CompletionArgs) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_completion(args.shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}

fn write_completion(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, BIN_NAME, out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, BIN_NAME, out),
        Shell::Fish => generate(shells::Fish, &mut cmd, BIN_NAME, out),
    }
}
