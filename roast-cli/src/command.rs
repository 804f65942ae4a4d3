use clap::{Parser, Subcommand};

pub const DEFAULT_LIST_LIMIT: u32 = 10;

#[derive(Debug, Parser)]
#[command(name = "roast-cli")]
#[command(about = "Creator progression reports for Roast Live", long_about = None)]
pub struct Cli {
    /// Print the view as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Creator level and XP progress
    Creator { creator_id: String },
    /// Season tier and rank of a creator
    Season {
        season_id: String,
        creator_id: String,
    },
    /// Top creators of a season
    Leaderboard {
        season_id: String,
        #[arg(default_value_t = DEFAULT_LIST_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
    },
    /// VIP club level of a member
    Vip { club_id: String, user_id: String },
    /// Biggest gifters of a club
    Club {
        club_id: String,
        #[arg(default_value_t = DEFAULT_LIST_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
    },
    /// Record a VIP gift
    Gift {
        club_id: String,
        user_id: String,
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        amount_sek: u64,
    },
}
