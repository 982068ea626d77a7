//! Derived ledger views
//!
//! Pure functions over the insertion-ordered transaction list. Nothing here
//! is cached: callers recompute on every read so the views can never drift
//! from the list they came from.

use bankportal_config::{BalanceSource, SortOrder};

use crate::models::Transaction;

/// Copy of the list ordered by date.
///
/// The sort is stable, so equal dates keep insertion order in both
/// directions. Unparseable dates order before real dates when ascending and
/// after them when descending.
pub fn sort_by_date(transactions: &[Transaction], order: SortOrder) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    match order {
        SortOrder::Ascending => sorted.sort_by(|a, b| a.date_naive().cmp(&b.date_naive())),
        SortOrder::Descending => sorted.sort_by(|a, b| b.date_naive().cmp(&a.date_naive())),
    }
    sorted
}

/// Number of pages needed for `len` records
pub fn page_count(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    (len + page_size - 1) / page_size
}

/// Split into consecutive chunks of `page_size`; the last may be shorter
pub fn chunk_pages(sorted: &[Transaction], page_size: usize) -> Vec<Vec<Transaction>> {
    sorted
        .chunks(page_size.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// The balance shown on the balance card, 0 for an empty ledger
pub fn displayed_balance(transactions: &[Transaction], source: BalanceSource) -> f64 {
    match source {
        BalanceSource::MostRecent => transactions.first().map(|t| t.balance).unwrap_or(0.0),
        BalanceSource::Chronological => {
            let mut latest: Option<(chrono::NaiveDate, f64)> = None;
            for tx in transactions {
                if let Some(date) = tx.date_naive() {
                    // strictly later only: among equal dates the earliest
                    // list entry (most recently created) wins
                    if latest.map_or(true, |(best, _)| date > best) {
                        latest = Some((date, tx.balance));
                    }
                }
            }
            latest.map(|(_, balance)| balance).unwrap_or(0.0)
        }
    }
}
