use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for userjs
#[derive(Parser, Debug)]
#[command(name = "userjs")]
#[command(about = "Load, merge and diff user.js preference files")]
pub struct Cli {
    /// Marker that starts a line comment
    #[arg(long, global = true, default_value = "//")]
    pub comment_marker: String,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a single file and print its preferences
    Load {
        /// Path to the user.js file
        file: PathBuf,

        /// Only keep keys matching these glob patterns (repeatable)
        #[arg(short, long)]
        query: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = OutputType::JsonObject)]
        output: OutputType,
    },
    /// Apply files in order and print the effective configuration
    Merge {
        /// Files to apply; later files win
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Skip files that fail to load
        #[arg(long)]
        continue_on_error: bool,

        #[arg(short, long, value_enum, default_value_t = OutputType::JsonObject)]
        output: OutputType,
    },
    /// Compare two files key by key
    Diff {
        old: PathBuf,
        new: PathBuf,

        #[arg(short, long, value_enum, default_value_t = DiffOutput::Text)]
        output: DiffOutput,
    },
}

/// How preferences are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputType {
    /// JSON object keyed by preference name
    JsonObject,
    /// JSON array of {key, value} entries
    JsonArray,
    /// user.js statements
    UserJs,
}

/// How a diff is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiffOutput {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_merge_args() {
        let cli = Cli::parse_from(["userjs", "merge", "a.js", "b.js", "--continue-on-error"]);
        match cli.command {
            Commands::Merge {
                files,
                continue_on_error,
                output,
            } => {
                assert_eq!(files, vec![PathBuf::from("a.js"), PathBuf::from("b.js")]);
                assert!(continue_on_error);
                assert_eq!(output, OutputType::JsonObject);
            }
            other => panic!("Unexpected command {:?}", other),
        }
        assert_eq!(cli.comment_marker, "//");
    }

    #[test]
    fn test_parse_load_args() {
        let cli = Cli::parse_from([
            "userjs",
            "load",
            "user.js",
            "-q",
            "network.*",
            "--output",
            "user-js",
            "--comment-marker",
            "#",
        ]);
        match cli.command {
            Commands::Load { query, output, .. } => {
                assert_eq!(query, vec!["network.*".to_string()]);
                assert_eq!(output, OutputType::UserJs);
            }
            other => panic!("Unexpected command {:?}", other),
        }
        assert_eq!(cli.comment_marker, "#");
    }
}
