//! CLI argument parsing for contactbook

use clap::Parser;
use std::path::PathBuf;

/// Interactive address book
#[derive(Parser, Debug)]
#[command(name = "cb")]
#[command(author, version, about = "Interactive address book", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Contacts file to load before the menu starts
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_args() {
        let cli = Cli::try_parse_from(["cb"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
        assert!(cli.file.is_none());
    }

    #[test]
    fn test_parse_all_args() {
        let cli = Cli::try_parse_from(["cb", "-c", "cb.yml", "--log-level", "debug", "book.txt"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("cb.yml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.file, Some(PathBuf::from("book.txt")));
    }
}
