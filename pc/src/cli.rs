//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// pc - query a remote prompt catalog
#[derive(Parser, Debug)]
#[command(
    name = "pc",
    about = "Search and browse a remote prompt catalog, or serve it to tool clients",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the catalog tools as JSON-RPC over stdin/stdout
    Serve,

    /// Search prompts by keyword and filters
    Search {
        /// Free-text keyword (title, tags, category, subcategory, pack)
        query: Option<String>,

        /// Only prompts with a matching tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Only prompts whose category contains this text
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Only prompts for a matching persona
        #[arg(short, long)]
        persona: Option<String>,

        /// Maximum results (1-50)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show one prompt by id
    Get {
        /// Prompt id
        id: u64,
    },

    /// List categories
    Categories,

    /// List packs
    Packs {
        /// Category filter
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Show a pack's prompts grouped by section
    Pack {
        /// Pack title, or part of it
        title: String,
    },

    /// List the most used tags
    Tags {
        /// Maximum tags (1-200)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// List the most common personas
    Personas {
        /// Maximum personas (1-500)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Pick random prompts
    Random {
        /// How many prompts (1-10)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Category filter
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Tag filter
        #[arg(short, long)]
        tag: Option<String>,
    },
}

/// Output format for query commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Log file location
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptcatalog")
        .join("logs")
        .join("promptcatalog.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_search_args() {
        let cli = Cli::try_parse_from(["pc", "--format", "json", "search", "email", "-t", "outreach", "-n", "5"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Some(Command::Search {
                query, tag, limit, ..
            }) => {
                assert_eq!(query.as_deref(), Some("email"));
                assert_eq!(tag.as_deref(), Some("outreach"));
                assert_eq!(limit, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_get_requires_numeric_id() {
        assert!(Cli::try_parse_from(["pc", "get", "abc"]).is_err());
        assert!(Cli::try_parse_from(["pc", "get", "42"]).is_ok());
    }
}
