//! Shell completion command implementation

use crate::error::{CliError, CliResult};
use crate::get_cli_command;
use clap_complete::{generate, Shell};
use std::io;

pub struct Options {
    pub shell: String,
}

/// Generate shell completion script
pub fn run(options: &Options) -> i32 {
    match run_inner(options, &mut io::stdout()) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

fn parse_shell(name: &str) -> CliResult<Shell> {
    match name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        "" => Err(CliError::Message(
            "Shell name is required. Supported shells: bash, zsh, fish".to_string(),
        )),
        _ => Err(CliError::Message(format!(
            "Unsupported shell: {name}. Supported shells: bash, zsh, fish"
        ))),
    }
}

fn run_inner(options: &Options, out: &mut dyn io::Write) -> CliResult<()> {
    let shell = parse_shell(&options.shell)?;
    let mut cmd = get_cli_command();
    generate(shell, &mut cmd, "edgectl", out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cli_command() {
        let cmd = get_cli_command();
        assert_eq!(cmd.get_name(), "edgectl");
        cmd.debug_assert();
    }

    #[test]
    fn test_shells_case_insensitive() {
        for shell in ["bash", "BASH", "Zsh", "fish", "FISH"] {
            assert!(parse_shell(shell).is_ok(), "Shell '{shell}' should be valid");
        }
    }

    #[test]
    fn test_bash_script_covers_logging_commands() {
        let mut out = Vec::new();
        run_inner(
            &Options {
                shell: "bash".to_string(),
            },
            &mut out,
        )
        .unwrap();
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("edgectl"));
        assert!(script.contains("newrelic"));
        assert!(script.contains("--autoclone"));
    }

    #[test]
    fn test_invalid_shell() {
        match parse_shell("powershell") {
            Err(CliError::Message(msg)) => {
                assert!(msg.contains("Unsupported shell"));
                assert!(msg.contains("powershell"));
            }
            _ => panic!("Expected CliError::Message for invalid shell"),
        }
    }

    #[test]
    fn test_empty_shell() {
        match parse_shell("") {
            Err(CliError::Message(msg)) => assert!(msg.contains("Shell name is required")),
            _ => panic!("Expected CliError::Message for empty shell"),
        }
    }
}
