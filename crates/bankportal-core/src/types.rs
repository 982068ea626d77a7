//! Basic types for the ledger state container

use bankportal_config::SortOrder;
use serde::{Deserialize, Serialize};

use crate::models::{FormVisibility, Transaction};

/// Outcome of the initial record fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LoadState {
    /// Fetch not finished yet
    Loading,
    /// Records are in place
    Loaded,
    /// Fetch failed; the list stays empty
    Failed { message: String },
}

impl Default for LoadState {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl LoadState {
    /// Error message of a failed load
    pub fn failure(&self) -> Option<&str> {
        match self {
            LoadState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadState::Loading => write!(f, "loading"),
            LoadState::Loaded => write!(f, "loaded"),
            LoadState::Failed { .. } => write!(f, "failed"),
        }
    }
}

/// Ledger overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_transactions: usize,
    pub page: usize,
    pub page_count: usize,
    pub records_per_page: usize,
    pub sort: SortOrder,
    pub form: FormVisibility,
    pub balance: f64,
    pub load_state: LoadState,
}

/// One page of the sorted ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsPage {
    pub page: usize,
    pub page_count: usize,
    pub sort: SortOrder,
    pub transactions: Vec<Transaction>,
}
