//! # Commands
//!
//! One handler per subcommand. Each calls the storage and query engines and
//! turns the result into the text printed on stdout.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    sweetshop purchase 1001 5                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  dispatch() ──► purchase(store, 1001, 5)                               │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │               store.purchase(1001, 5) ──► StockOutcome                 │
//! │                      │                                                  │
//! │           success? ──┼── yes ──► Ok("Purchased 5 Kaju Katli(s)")       │
//! │                      └── no  ──► Err(Rejected(["Insufficient ..."]))   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sweetshop_core::query::{self, FilterCriteria};
use sweetshop_core::validation::validate;
use sweetshop_core::{FilterInput, StockOutcome, SweetInput};
use sweetshop_db::SweetStore;
use tracing::debug;

use crate::cli::{AddArgs, Command, ListArgs};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::render;

/// Runs one subcommand against `store`.
pub async fn dispatch(store: &SweetStore, config: &AppConfig, command: Command) -> CliResult<String> {
    debug!(?command, "Dispatching command");

    match command {
        Command::List(args) => list(store, config, &args).await,
        Command::Add(args) => add(store, args).await,
        Command::Delete { id } => delete(store, id).await,
        Command::Purchase { id, quantity } => stock_result(store.purchase(id, quantity).await),
        Command::Restock { id, quantity } => stock_result(store.restock(id, quantity).await),
        Command::Categories => Ok(render::lines(&store.list_categories().await)),
        Command::Stats => stats(store, config).await,
        Command::Reset => reset(store).await,
        Command::Export => export(store).await,
    }
}

/// Filtered, sorted listing.
pub async fn list(store: &SweetStore, config: &AppConfig, args: &ListArgs) -> CliResult<String> {
    let input = FilterInput {
        search_term: args.search.clone(),
        category: args.category.clone(),
        min_price: args.min_price.clone(),
        max_price: args.max_price.clone(),
    };
    let criteria = FilterCriteria::from(&input);

    let sweets = store.load().await;
    let shown = query::sort(&query::filter(&sweets, &criteria), args.sort, args.order);

    debug!(total = sweets.len(), shown = shown.len(), "Listing sweets");
    Ok(render::sweets_table(&shown, config))
}

/// Validates the form, then stores it.
pub async fn add(store: &SweetStore, args: AddArgs) -> CliResult<String> {
    let input = SweetInput::new(args.name, args.category, args.price, args.quantity);

    let report = validate(&input);
    if !report.is_valid {
        return Err(CliError::Rejected(report.errors));
    }

    match store.add(&input).await {
        Some(sweet) => Ok(format!(
            "{} added successfully! (id {})\n",
            sweet.name, sweet.id
        )),
        None => Err(CliError::rejected("Failed to add sweet. Please try again.")),
    }
}

pub async fn delete(store: &SweetStore, id: i64) -> CliResult<String> {
    let Some(sweet) = store.find(id).await else {
        return Err(CliError::rejected("Sweet not found"));
    };

    if store.delete_by_id(id).await {
        Ok(format!("{} deleted successfully!\n", sweet.name))
    } else {
        Err(CliError::rejected("Failed to delete sweet. Please try again."))
    }
}

pub async fn stats(store: &SweetStore, config: &AppConfig) -> CliResult<String> {
    let sweets = store.load().await;
    Ok(render::stats(&query::aggregate(&sweets), config))
}

pub async fn reset(store: &SweetStore) -> CliResult<String> {
    if store.clear().await {
        Ok("All data cleared. Default sweets return on next use.\n".to_string())
    } else {
        Err(CliError::rejected("Failed to clear data. Please try again."))
    }
}

/// The whole collection as pretty JSON, same shape as the stored slot.
pub async fn export(store: &SweetStore) -> CliResult<String> {
    let sweets = store.load().await;
    let mut json = serde_json::to_string_pretty(&sweets)?;
    json.push('\n');
    Ok(json)
}

fn stock_result(outcome: StockOutcome) -> CliResult<String> {
    if outcome.success {
        Ok(format!("{}\n", outcome.message))
    } else {
        Err(CliError::rejected(outcome.message))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sweetshop_core::{seed_sweets, SortKey, SortOrder, Sweet};
    use sweetshop_db::{Database, DbConfig};

    async fn setup() -> (Database, SweetStore, AppConfig) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db.sweets();
        let config = AppConfig::from_lookup(|_| None).unwrap();
        (db, store, config)
    }

    fn list_args() -> ListArgs {
        ListArgs {
            search: String::new(),
            category: "all".to_string(),
            min_price: String::new(),
            max_price: String::new(),
            sort: SortKey::Name,
            order: SortOrder::Asc,
        }
    }

    fn add_args(name: &str, category: &str, price: &str, quantity: &str) -> AddArgs {
        AddArgs {
            name: name.to_string(),
            category: category.to_string(),
            price: price.to_string(),
            quantity: quantity.to_string(),
        }
    }

    fn first_column(table: &str) -> Vec<String> {
        table
            .lines()
            .skip(1)
            .filter_map(|l| l.split_whitespace().next().map(str::to_string))
            .collect()
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let (_db, store, config) = setup().await;
        let out = list(&store, &config, &list_args()).await.unwrap();
        assert_eq!(first_column(&out), vec!["1002", "1003", "1001"]);
    }

    #[tokio::test]
    async fn test_list_filters_and_orders() {
        let (_db, store, config) = setup().await;
        let args = ListArgs {
            min_price: "20".to_string(),
            sort: SortKey::Price,
            order: SortOrder::Desc,
            ..list_args()
        };
        let out = list(&store, &config, &args).await.unwrap();
        assert_eq!(first_column(&out), vec!["1001", "1002"]);
    }

    #[tokio::test]
    async fn test_list_no_matches() {
        let (_db, store, config) = setup().await;
        let args = ListArgs {
            search: "zzz".to_string(),
            ..list_args()
        };
        assert_eq!(
            list(&store, &config, &args).await.unwrap(),
            "No sweets found\n"
        );
    }

    #[tokio::test]
    async fn test_add_reports_every_validation_error() {
        let (_db, store, _config) = setup().await;

        let err = add(&store, add_args("  ", "", "-1", "abc")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Sweet name is required\nCategory is required\nValid price is required\nValid quantity is required"
        );
        assert_eq!(store.load().await, seed_sweets());
    }

    #[tokio::test]
    async fn test_add_success() {
        let (_db, store, _config) = setup().await;

        let out = add(&store, add_args("Rasgulla", "Milk-Based", "12", "40"))
            .await
            .unwrap();
        assert_eq!(out, "Rasgulla added successfully! (id 1004)\n");
        assert_eq!(
            store.find(1004).await,
            Some(Sweet::new(1004, "Rasgulla", "Milk-Based", 12.0, 40))
        );
    }

    #[tokio::test]
    async fn test_add_storage_failure() {
        let (db, store, _config) = setup().await;
        db.close().await;

        let err = add(&store, add_args("Rasgulla", "Milk-Based", "12", "40"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to add sweet. Please try again.");
    }

    #[tokio::test]
    async fn test_delete() {
        let (_db, store, _config) = setup().await;

        assert_eq!(
            delete(&store, 1002).await.unwrap(),
            "Gajar Halwa deleted successfully!\n"
        );
        assert_eq!(
            delete(&store, 1002).await.unwrap_err().to_string(),
            "Sweet not found"
        );
    }

    #[tokio::test]
    async fn test_purchase_and_restock() {
        let (_db, store, config) = setup().await;

        let out = dispatch(&store, &config, Command::Purchase { id: 1001, quantity: 5 })
            .await
            .unwrap();
        assert_eq!(out, "Purchased 5 Kaju Katli(s)\n");

        let err = dispatch(&store, &config, Command::Purchase { id: 1001, quantity: 99 })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Insufficient stock! Only 15 available");

        let out = dispatch(&store, &config, Command::Restock { id: 1001, quantity: 10 })
            .await
            .unwrap();
        assert_eq!(out, "Stock updated successfully!\n");
        assert_eq!(store.find(1001).await.unwrap().quantity, 25);
    }

    #[tokio::test]
    async fn test_categories() {
        let (_db, store, config) = setup().await;
        let out = dispatch(&store, &config, Command::Categories).await.unwrap();
        assert_eq!(out, "Milk-Based\nNut-Based\nVegetable-Based\n");
    }

    #[tokio::test]
    async fn test_stats_after_purchase() {
        let (_db, store, config) = setup().await;
        store.purchase(1002, 10).await;

        let out = stats(&store, &config).await.unwrap();
        assert!(out.contains("Total Quantity: 75\n"));
        assert!(out.contains("Total Value: ₹1650.00\n"));
        assert!(out.contains("Low Stock Count: 1\n"));
    }

    #[tokio::test]
    async fn test_reset_then_reseed() {
        let (_db, store, config) = setup().await;
        store.delete_by_id(1001).await;

        dispatch(&store, &config, Command::Reset).await.unwrap();
        assert_eq!(store.load().await, seed_sweets());
    }

    #[tokio::test]
    async fn test_export_matches_store() {
        let (_db, store, config) = setup().await;
        let out = dispatch(&store, &config, Command::Export).await.unwrap();

        let parsed: Vec<Sweet> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, seed_sweets());
        assert!(out.contains("\n  {\n    \"id\": 1001,"));
    }
}
