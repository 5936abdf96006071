//! CLI module - Command-line interface for `AnimeHub`
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use crate::domain::CanonicalStatus;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// `AnimeHub` - catalog admin and broadcast schedule
#[derive(Parser)]
#[command(name = "animehub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create default config file
    Init,

    /// Add an item to the catalog
    #[command(alias = "a")]
    Add {
        /// Title of the item
        #[arg(required = true)]
        title: Vec<String>,
        /// MyAnimeList id
        #[arg(long)]
        mal_id: Option<i32>,
        /// AniList id
        #[arg(long)]
        anilist_id: Option<i32>,
        /// Season the item belongs to
        #[arg(long)]
        season: Option<i32>,
        /// Initial status (airing, finished, upcoming)
        #[arg(long, default_value = "airing")]
        status: CanonicalStatus,
    },

    /// List catalog items
    #[command(alias = "ls", alias = "l")]
    List {
        /// Only items of this season
        #[arg(long)]
        season: Option<i32>,
    },

    /// Show one item with its resolved broadcast
    #[command(alias = "i", alias = "info")]
    Show {
        /// Catalog item ID
        id: i32,
    },

    /// Show what airs today in the viewer's timezone
    #[command(alias = "t")]
    Today {
        /// IANA timezone to view the schedule in (defaults to config, then system)
        #[arg(long)]
        timezone: Option<String>,
    },

    /// Fetch provider data for an item and store it
    Link {
        /// Catalog item ID
        id: i32,
        /// MyAnimeList id (overrides the stored one)
        #[arg(long)]
        mal_id: Option<i32>,
        /// AniList id (overrides the stored one)
        #[arg(long)]
        anilist_id: Option<i32>,
    },

    /// Set or clear the manual broadcast override
    Override(OverrideArgs),

    /// Enable or disable an item in the daily schedule
    Schedule {
        /// Catalog item ID
        id: i32,
        /// Show the item in "today" again
        #[arg(long, conflicts_with = "disable", required_unless_present = "disable")]
        enable: bool,
        /// Hide the item from "today"
        #[arg(long)]
        disable: bool,
    },

    /// Search a provider by title
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
        /// Provider to query
        #[arg(long, value_enum, default_value_t = SearchProvider::Anilist)]
        provider: SearchProvider,
    },

    /// Remove an item from the catalog
    #[command(alias = "rm", alias = "r")]
    Remove {
        /// Catalog item ID
        id: i32,
    },
}

#[derive(Args)]
pub struct OverrideArgs {
    /// Catalog item ID
    pub id: i32,
    /// Weekday, e.g. "Tuesdays"
    #[arg(long, requires = "time", required_unless_present = "clear")]
    pub day: Option<String>,
    /// Local time, HH:MM
    #[arg(long, requires = "day")]
    pub time: Option<String>,
    /// Source timezone (default Asia/Tokyo)
    #[arg(long)]
    pub timezone: Option<String>,
    /// Remove the override
    #[arg(long, conflicts_with_all = ["day", "time", "timezone"])]
    pub clear: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchProvider {
    Anilist,
    Mal,
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn override_requires_day_and_time_or_clear() {
        assert!(Cli::try_parse_from(["animehub", "override", "1", "--day", "Tuesdays"]).is_err());
        assert!(Cli::try_parse_from(["animehub", "override", "1"]).is_err());
        assert!(Cli::try_parse_from(["animehub", "override", "1", "--clear"]).is_ok());

        let cli = Cli::try_parse_from([
            "animehub", "override", "1", "--day", "Tuesdays", "--time", "20:00",
        ])
        .unwrap();
        let Some(Commands::Override(args)) = cli.command else {
            panic!("expected override command");
        };
        assert_eq!(args.day.as_deref(), Some("Tuesdays"));
        assert!(!args.clear);
    }

    #[test]
    fn add_parses_status() {
        let cli = Cli::try_parse_from([
            "animehub", "add", "Sousou", "no", "Frieren", "--mal-id", "52991", "--status",
            "completed",
        ])
        .unwrap();
        let Some(Commands::Add { title, mal_id, status, .. }) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(title.join(" "), "Sousou no Frieren");
        assert_eq!(mal_id, Some(52_991));
        assert_eq!(status, CanonicalStatus::Finished);
    }

    #[test]
    fn schedule_needs_a_direction() {
        assert!(Cli::try_parse_from(["animehub", "schedule", "3"]).is_err());
        assert!(Cli::try_parse_from(["animehub", "schedule", "3", "--disable"]).is_ok());
        assert!(
            Cli::try_parse_from(["animehub", "schedule", "3", "--enable", "--disable"]).is_err()
        );
    }
}
