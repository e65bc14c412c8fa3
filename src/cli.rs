use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect the demo form schemas and pages
#[derive(Parser, Debug, Clone)]
#[command(name = "jsonform", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "JSONFORM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only render schemas that were added in advance
    #[arg(long, env = "JSONFORM_STRICT")]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the names of the added schemas
    Names,
    /// Print a schema and its form descriptor as JSON
    Schema {
        name: String,
    },
    /// Print an HTML page with the named form
    Render {
        name: String,

        /// Page title, the schema name when absent
        #[arg(long)]
        title: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["jsonform", "names"]);
        assert!(cli.config.is_none());
        assert!(!cli.strict);
        assert_eq!(cli.command, Command::Names);
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "jsonform",
            "--config",
            "custom.toml",
            "--strict",
            "render",
            "user",
            "--title",
            "Users",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(cli.strict);
        assert_eq!(
            cli.command,
            Command::Render {
                name: "user".to_string(),
                title: Some("Users".to_string()),
            }
        );
    }

    #[test]
    fn test_schema_requires_name() {
        assert!(Cli::try_parse_from(["jsonform", "schema"]).is_err());
    }
}
