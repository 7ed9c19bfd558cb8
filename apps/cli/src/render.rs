//! # Rendering
//!
//! Plain-text views of engine results. Nothing here touches storage.
//!
//! ## Inventory Table
//! ```text
//!   ID NAME        CATEGORY    PRICE QTY
//! 1001 Kaju Katli  Nut-Based  ₹50.00  20
//! 1003 Gulab Jamun Milk-Based ₹10.00   4  LOW
//! ```

use std::fmt::Write;
use sweetshop_core::{InventoryStats, Sweet};

use crate::config::AppConfig;

const EMPTY_MESSAGE: &str = "No sweets found";

/// Renders a listing, one sweet per row, in the order given.
pub fn sweets_table(sweets: &[Sweet], config: &AppConfig) -> String {
    if sweets.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }

    let ids: Vec<String> = sweets.iter().map(|s| s.id.to_string()).collect();
    let prices: Vec<String> = sweets.iter().map(|s| config.format_price(s.price)).collect();
    let quantities: Vec<String> = sweets.iter().map(|s| s.quantity.to_string()).collect();

    let id_w = column_width("ID", ids.iter().map(String::as_str));
    let name_w = column_width("NAME", sweets.iter().map(|s| s.name.as_str()));
    let cat_w = column_width("CATEGORY", sweets.iter().map(|s| s.category.as_str()));
    let price_w = column_width("PRICE", prices.iter().map(String::as_str));
    let qty_w = column_width("QTY", quantities.iter().map(String::as_str));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {} {} {}",
        pad_left("ID", id_w),
        pad_right("NAME", name_w),
        pad_right("CATEGORY", cat_w),
        pad_left("PRICE", price_w),
        pad_left("QTY", qty_w),
    );

    for (i, sweet) in sweets.iter().enumerate() {
        let row = format!(
            "{} {} {} {} {}{}",
            pad_left(&ids[i], id_w),
            pad_right(&sweet.name, name_w),
            pad_right(&sweet.category, cat_w),
            pad_left(&prices[i], price_w),
            pad_left(&quantities[i], qty_w),
            if sweet.is_low_stock() { "  LOW" } else { "" },
        );
        let _ = writeln!(out, "{}", row.trim_end());
    }

    out
}

/// Renders the statistics block.
pub fn stats(stats: &InventoryStats, config: &AppConfig) -> String {
    format!(
        "Total Items: {}\nTotal Quantity: {}\nTotal Value: {}\nLow Stock Count: {}\nCategories: {}\n",
        stats.total_items,
        stats.total_quantity,
        config.format_price(stats.total_value),
        stats.low_stock_count,
        stats.category_count,
    )
}

/// Renders one line per category.
pub fn lines(items: &[String]) -> String {
    items.iter().map(|item| format!("{item}\n")).collect()
}

// Widths count chars, not bytes, so the rupee sign lines up.
fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|c| c.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

fn pad_left(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.chars().count());
    format!("{}{}", " ".repeat(fill), text)
}

fn pad_right(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.chars().count());
    format!("{}{}", text, " ".repeat(fill))
}
