use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "folio", bin_name = "folio", version)]
#[command(
    about = "Filter, search and page through portfolio cards",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog file (.json manifest or .md listing); defaults to the configured one
    #[arg(short, long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Use the global configuration instead of ./.folio
    #[arg(short, long, global = true)]
    pub global: bool,

    /// Verbose logging on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show one page of the listing
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Category filter value (e.g. web, mobile, all)
        #[arg(long)]
        category: Option<String>,

        /// Search term (matched against title, description and tags)
        #[arg(short, long)]
        search: Option<String>,

        /// Page number (clamped to the available pages)
        #[arg(short, long)]
        page: Option<usize>,
    },

    /// List the filter values with item counts
    #[command(display_order = 2)]
    Categories,

    /// Replay a JSON-lines event script, printing each applied frame
    #[command(display_order = 3)]
    Replay {
        /// Script file, one {"at": ms, "event": ...} per line
        script: PathBuf,

        /// JSON description of which controls exist (default: all of them)
        #[arg(long, value_name = "PATH")]
        controls: Option<PathBuf>,
    },

    /// Get or set configuration
    #[command(display_order = 4)]
    Config {
        /// Configuration key (e.g., page-size)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_with_facets() {
        let cli = Cli::try_parse_from([
            "folio", "list", "--category", "web", "-s", "site", "-p", "2",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::List {
                category,
                search,
                page,
            }) => {
                assert_eq!(category.as_deref(), Some("web"));
                assert_eq!(search.as_deref(), Some("site"));
                assert_eq!(page, Some(2));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from([
            "folio", "categories", "--catalog", "cards.md", "-vv", "--no-color",
        ])
        .unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("cards.md")));
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
    }

    #[test]
    fn replay_requires_a_script() {
        assert!(Cli::try_parse_from(["folio", "replay"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
