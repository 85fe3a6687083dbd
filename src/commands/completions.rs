//! Completions command - print a shell completion script

use crate::cli::Cli;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::{self, Write};

/// Write the completion script for `shell` to `buf`
pub fn generate<W: Write>(shell: Shell, buf: &mut W) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, buf);
}

/// Execute the completions command
pub fn execute(shell: Shell) {
    generate(shell, &mut io::stdout());
}
