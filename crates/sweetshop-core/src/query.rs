//! # Query Module
//!
//! Side-effect-free filtering, sorting and aggregation over a snapshot of
//! the collection. Nothing here touches storage; callers pass slices and
//! get new vectors back.
//!
//! ## Listing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a Listing Is Built                               │
//! │                                                                         │
//! │  store.load()  ──►  [Kaju Katli, Gajar Halwa, Gulab Jamun]             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  filter(criteria)     name ∋ term  AND  category  AND  min ≤ price ≤ max│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sort(key, order)     stable: equal keys keep their input order        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  render                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cmp::Ordering;
use std::collections::BTreeSet;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::types::{FilterInput, InventoryStats, SortKey, SortOrder, Sweet};
use crate::validation::parse_number;
use crate::ALL_CATEGORIES;

// =============================================================================
// Filter Criteria
// =============================================================================

/// Category part of a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Case-sensitive exact match.
    Exact(String),
}

impl CategoryFilter {
    /// `"all"` and the empty string select every category.
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() || raw == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Exact(raw.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Exact(wanted) => wanted == category,
        }
    }
}

/// Typed filter. All predicates must hold for a sweet to be kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the name; empty matches everything.
    pub search_term: String,
    pub category: CategoryFilter,
    /// Inclusive lower bound; `None` means 0. A `NaN` bound matches nothing.
    pub min_price: Option<f64>,
    /// Inclusive upper bound; `None` means unbounded. A `NaN` bound matches
    /// nothing.
    pub max_price: Option<f64>,
}

impl FilterCriteria {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = CategoryFilter::from_raw(category);
        self
    }

    pub fn min_price(mut self, min: f64) -> Self {
        self.min_price = Some(min);
        self
    }

    pub fn max_price(mut self, max: f64) -> Self {
        self.max_price = Some(max);
        self
    }

    pub fn matches(&self, sweet: &Sweet) -> bool {
        let matches_name = self.search_term.is_empty()
            || sweet
                .name
                .to_lowercase()
                .contains(&self.search_term.to_lowercase());

        let min = self.min_price.unwrap_or(0.0);
        let max = self.max_price.unwrap_or(f64::INFINITY);
        let matches_price = sweet.price >= min && sweet.price <= max;

        matches_name && self.category.matches(&sweet.category) && matches_price
    }
}

/// Empty price strings mean "no bound". A non-empty bound that does not
/// parse as a number becomes `NaN`, so every price comparison fails and the
/// filter keeps nothing.
impl From<&FilterInput> for FilterCriteria {
    fn from(input: &FilterInput) -> Self {
        FilterCriteria {
            search_term: input.search_term.clone(),
            category: CategoryFilter::from_raw(&input.category),
            min_price: price_bound(&input.min_price),
            max_price: price_bound(&input.max_price),
        }
    }
}

fn price_bound(raw: &str) -> Option<f64> {
    if raw.trim().is_empty() {
        return None;
    }
    Some(parse_number(raw).unwrap_or(f64::NAN))
}

// =============================================================================
// Filtering
// =============================================================================

/// Keeps the sweets matching every predicate of `criteria`, in input order.
pub fn filter(sweets: &[Sweet], criteria: &FilterCriteria) -> Vec<Sweet> {
    sweets
        .iter()
        .filter(|sweet| criteria.matches(sweet))
        .cloned()
        .collect()
}

/// Name search only.
pub fn search_by_name(sweets: &[Sweet], term: &str) -> Vec<Sweet> {
    filter(sweets, &FilterCriteria::default().search(term))
}

/// Category lookup only (exact, case-sensitive).
pub fn by_category(sweets: &[Sweet], category: &str) -> Vec<Sweet> {
    filter(sweets, &FilterCriteria::default().category(category))
}

// =============================================================================
// Sorting
// =============================================================================

/// Compares display strings the way a shop listing expects.
///
/// Three levels, each consulted only when the previous one ties:
/// 1. base letters: accents stripped, case folded (`"Éclair" < "Fudge"`)
/// 2. accents: the unaccented form first (`"creme" < "crème"`)
/// 3. case: the lowercase form first (`"barfi" < "Barfi" < "burfi"`)
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
        .then_with(|| case_order(a, b))
}

// NFD splits "é" into "e" + U+0301; dropping the marks leaves the base letter.
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn lowercase(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_order(a: &str, b: &str) -> Ordering {
    a.nfd()
        .zip(b.nfd())
        .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        })
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn compare_by(key: SortKey, a: &Sweet, b: &Sweet) -> Ordering {
    match key {
        SortKey::Name => collate(&a.name, &b.name),
        SortKey::Category => collate(&a.category, &b.category),
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::Quantity => a.quantity.cmp(&b.quantity),
    }
}

/// Returns a sorted copy of `sweets`; the input is left alone.
///
/// The sort is stable in both directions: records with equal keys keep
/// their relative input order, including under `Desc`.
///
/// ## Example
/// ```rust
/// use sweetshop_core::query::sort;
/// use sweetshop_core::{SortKey, SortOrder, Sweet};
///
/// let sweets = vec![
///     Sweet::new(1, "B", "X", 5.0, 1),
///     Sweet::new(2, "A", "X", 5.0, 1),
/// ];
/// let sorted = sort(&sweets, SortKey::Price, SortOrder::Asc);
/// assert_eq!(sorted[0].name, "B");
/// ```
pub fn sort(sweets: &[Sweet], key: SortKey, order: SortOrder) -> Vec<Sweet> {
    let mut sorted = sweets.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_by(key, a, b);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

// =============================================================================
// Aggregation
// =============================================================================

/// Σ price × quantity.
pub fn total_value(sweets: &[Sweet]) -> f64 {
    sweets.iter().map(Sweet::stock_value).sum()
}

/// Distinct category values, ascending, case-sensitive.
pub fn distinct_categories(sweets: &[Sweet]) -> Vec<String> {
    sweets
        .iter()
        .map(|s| s.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Computes the dashboard figures for a snapshot.
///
/// `total_quantity` saturates at `i64::MAX`; restock has no upper bound, so
/// several large stocks can exceed it.
pub fn aggregate(sweets: &[Sweet]) -> InventoryStats {
    InventoryStats {
        total_items: sweets.len(),
        total_quantity: sweets
            .iter()
            .fold(0i64, |total, s| total.saturating_add(s.quantity)),
        total_value: total_value(sweets),
        low_stock_count: sweets.iter().filter(|s| s.is_low_stock()).count(),
        category_count: distinct_categories(sweets).len(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
