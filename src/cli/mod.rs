//! Command-line interface.

mod commands;

use clap::{Parser, Subcommand};

/// Studylog - a personal study journal with forgetting-curve reminders
#[derive(Parser)]
#[command(name = "studylog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user
    Add {
        username: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Replace a user's password
    Passwd {
        username: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["studylog"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_user_add_parses_password_flag() {
        let cli =
            Cli::try_parse_from(["studylog", "user", "add", "alice", "--password", "pw123456"])
                .unwrap();
        match cli.command {
            Some(Commands::User {
                command: UserCommands::Add { username, password },
            }) => {
                assert_eq!(username, "alice");
                assert_eq!(password.as_deref(), Some("pw123456"));
            }
            _ => panic!("expected user add"),
        }
    }

    #[test]
    fn test_passwd_without_flag() {
        let cli = Cli::try_parse_from(["studylog", "user", "passwd", "bob"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::User {
                command: UserCommands::Passwd { password: None, .. }
            })
        ));
    }
}
