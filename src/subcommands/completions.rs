use std::io::Write;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};

use crate::Cli;

#[derive(Debug, Parser)]
pub struct Completions {
    #[clap(help = "Shell name")]
    shell: Shell,
}

impl Completions {
    pub fn run(self) -> Result<()> {
        self.write_to(&mut std::io::stdout())
    }

    fn write_to<W>(&self, buffer: &mut W) -> Result<()>
    where
        W: Write,
    {
        generate(
            self.shell,
            &mut Cli::command(),
            env!("CARGO_PKG_NAME"),
            buffer,
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completions_cover_subcommands() {
        let mut buffer = Vec::new();
        Completions { shell: Shell::Bash }
            .write_to(&mut buffer)
            .unwrap();

        let script = String::from_utf8(buffer).unwrap();
        assert!(script.contains("tokenize-image"));
        assert!(script.contains("generate"));
        assert!(script.contains("--keypair"));
    }
}
