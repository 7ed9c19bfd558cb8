//! # Argument Definitions
//!
//! One subcommand per storage or query operation.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use sweetshop_core::{SortKey, SortOrder, ALL_CATEGORIES};

use crate::config::ENV_DB_PATH;

#[derive(Parser, Debug)]
#[command(name = "sweetshop", bin_name = "sweetshop", version)]
#[command(about = "Inventory manager for a sweet shop", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Database file (default: platform data directory)
    #[arg(long, global = true, env = ENV_DB_PATH, value_name = "PATH")]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show sweets, filtered and sorted
    List(ListArgs),

    /// Add a sweet
    Add(AddArgs),

    /// Delete a sweet by id
    Delete { id: i64 },

    /// Sell some units of a sweet
    Purchase {
        id: i64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Add units to a sweet
    Restock {
        id: i64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// List the distinct categories
    Categories,

    /// Show inventory totals
    Stats,

    /// Forget all stored data (the next read reseeds)
    Reset,

    /// Print the whole inventory as JSON
    Export,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ListArgs {
    /// Case-insensitive name substring
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Exact category, or "all"
    #[arg(short, long, default_value = ALL_CATEGORIES)]
    pub category: String,

    /// Lowest price to include
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub min_price: String,

    /// Highest price to include
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub max_price: String,

    /// Field to sort by: name, category, price, quantity
    #[arg(long, default_value_t = SortKey::Name)]
    pub sort: SortKey,

    /// asc or desc
    #[arg(long, default_value_t = SortOrder::Asc)]
    pub order: SortOrder,
}

/// Raw add-form fields. Missing ones reach validation as empty strings.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct AddArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub category: String,

    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub price: String,

    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub quantity: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sweetshop").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_defaults() {
        let cli = parse(&["list"]);
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.category, "all");
        assert_eq!(args.sort, SortKey::Name);
        assert_eq!(args.order, SortOrder::Asc);
        assert!(args.min_price.is_empty());
    }

    #[test]
    fn test_list_sort_is_case_insensitive() {
        let cli = parse(&["list", "--sort", "PRICE", "--order", "desc"]);
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.sort, SortKey::Price);
        assert_eq!(args.order, SortOrder::Desc);
    }

    #[test]
    fn test_unknown_sort_key_rejected() {
        let result = Cli::try_parse_from(["sweetshop", "list", "--sort", "colour"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_quantities_parse() {
        let cli = parse(&["restock", "1001", "-5"]);
        assert_eq!(
            cli.command,
            Command::Restock {
                id: 1001,
                quantity: -5
            }
        );
    }

    #[test]
    fn test_global_db_flag() {
        let cli = parse(&["stats", "--db", "/tmp/shop.db"]);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/shop.db")));
        assert_eq!(cli.command, Command::Stats);
    }
}
