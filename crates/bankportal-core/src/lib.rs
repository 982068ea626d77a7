//! Core ledger state and business logic
//!
//! [`Ledger`] owns the transaction list together with the view state
//! (page, sort direction, open form, load state). All transitions are plain
//! `&mut self` methods; sorted and paginated views are derived on every read.

pub mod amount;
pub mod error;
pub mod models;
pub mod types;
pub mod views;

use bankportal_config::Config;
use bankportal_source::SourceRef;
use chrono::{NaiveDate, Utc};

pub use bankportal_config::{BalanceSource, SortOrder};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use models::{field, FormFields, FormVisibility, Transaction, TransactionKind};
pub use types::{LedgerSummary, LoadState, TransactionsPage};

/// The banking ledger and its view state
pub struct Ledger {
    config: Config,
    source: SourceRef,
    /// Insertion order, most recently created first
    transactions: Vec<Transaction>,
    page: usize,
    sort: SortOrder,
    form: FormVisibility,
    load_state: LoadState,
}

impl Ledger {
    /// Create an empty ledger; call [`Ledger::load`] to fetch records
    pub fn new(config: Config, source: SourceRef) -> Self {
        let sort = config.ledger.default_sort;
        Self {
            config,
            source,
            transactions: Vec::new(),
            page: 0,
            sort,
            form: FormVisibility::None,
            load_state: LoadState::Loading,
        }
    }

    /// Fetch records from the data source.
    ///
    /// On failure the list is left empty and the ledger enters the failed
    /// state; the error is logged and also returned.
    pub async fn load(&mut self) -> CoreResult<()> {
        self.load_state = LoadState::Loading;
        log::info!("Loading transactions from {}", self.source.describe());

        match self.source.fetch().await {
            Ok(records) => {
                self.transactions = records.into_iter().map(Transaction::from).collect();
                self.load_state = LoadState::Loaded;
                log::info!("Loaded {} transactions", self.transactions.len());
                Ok(())
            }
            Err(e) => {
                let context = ErrorContext::new("load".to_string())
                    .with_data("source", serde_json::json!(self.source.describe()))
                    .with_data("location", serde_json::json!(e.location()));
                let error = CoreError::from(e);
                DefaultErrorLogger.log_error(&error, &context);

                self.transactions.clear();
                self.load_state = LoadState::Failed {
                    message: error.to_string(),
                };
                Err(error)
            }
        }
    }

    /// Discard all state and fetch again
    pub async fn reload(&mut self) -> CoreResult<()> {
        self.transactions.clear();
        self.page = 0;
        self.sort = self.config.ledger.default_sort;
        self.form = FormVisibility::None;
        self.load().await
    }

    // ==================== Accessors ====================

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Records in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn form(&self) -> FormVisibility {
        self.form
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    fn records_per_page(&self) -> usize {
        self.config.pagination.records_per_page
    }

    // ==================== Derived views ====================

    pub fn sorted_transactions(&self) -> Vec<Transaction> {
        views::sort_by_date(&self.transactions, self.sort)
    }

    pub fn pages(&self) -> Vec<Vec<Transaction>> {
        views::chunk_pages(&self.sorted_transactions(), self.records_per_page())
    }

    pub fn page_count(&self) -> usize {
        views::page_count(self.transactions.len(), self.records_per_page())
    }

    /// Records on the current page; empty when the ledger is empty
    pub fn current_page_transactions(&self) -> Vec<Transaction> {
        self.page_view(self.page).map(|p| p.transactions).unwrap_or_default()
    }

    pub fn displayed_balance(&self) -> f64 {
        views::displayed_balance(&self.transactions, self.config.ledger.balance_source)
    }

    /// One page of the sorted ledger; page 0 of an empty ledger is empty
    pub fn page_view(&self, index: usize) -> CoreResult<TransactionsPage> {
        let page_count = self.page_count();
        if index >= page_count.max(1) {
            return Err(CoreError::PageOutOfRange { page: index, page_count });
        }

        let transactions = self
            .pages()
            .into_iter()
            .nth(index)
            .unwrap_or_default();

        Ok(TransactionsPage {
            page: index,
            page_count,
            sort: self.sort,
            transactions,
        })
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            total_transactions: self.transactions.len(),
            page: self.page,
            page_count: self.page_count(),
            records_per_page: self.records_per_page(),
            sort: self.sort,
            form: self.form,
            balance: self.displayed_balance(),
            load_state: self.load_state.clone(),
        }
    }

    // ==================== Transitions ====================

    /// Move by `delta` pages; returns false (and changes nothing) when the
    /// target is outside the available pages
    pub fn paginate(&mut self, delta: isize) -> bool {
        let Some(target) = (self.page as isize).checked_add(delta) else {
            return false;
        };
        if target < 0 || target >= self.page_count() as isize {
            return false;
        }
        self.page = target as usize;
        true
    }

    /// Jump to a page
    pub fn set_page(&mut self, index: usize) -> CoreResult<()> {
        let page_count = self.page_count();
        if index >= page_count.max(1) {
            return Err(CoreError::PageOutOfRange { page: index, page_count });
        }
        self.page = index;
        Ok(())
    }

    /// Flip the date sort direction; the page index is kept
    pub fn toggle_sort(&mut self) -> SortOrder {
        self.sort = self.sort.toggled();
        self.sort
    }

    pub fn open_form(&mut self, kind: TransactionKind) {
        self.form = FormVisibility::from(kind);
    }

    pub fn close_form(&mut self) {
        self.form = FormVisibility::None;
    }

    /// Create a transaction dated today (UTC)
    pub fn submit_transaction(&mut self, kind: TransactionKind, fields: &FormFields) -> Transaction {
        self.submit_transaction_on(kind, fields, Utc::now().date_naive())
    }

    /// Create a transaction from raw form input, prepend it and close the form
    pub fn submit_transaction_on(
        &mut self,
        kind: TransactionKind,
        fields: &FormFields,
        date: NaiveDate,
    ) -> Transaction {
        if kind == TransactionKind::Transfer {
            let account_id = fields.account_id.as_deref().unwrap_or("");
            if !amount::is_account_identifier(account_id) {
                let context = ErrorContext::new("submit_transaction".to_string())
                    .with_data("kind", serde_json::json!(kind.to_string()));
                DefaultErrorLogger.log_warning(
                    &format!("Transfer destination '{}' does not look like an account identifier", account_id),
                    &context,
                );
            }
        }

        let entered = amount::parse_amount(fields.amount.as_deref());
        let signed = kind.signed(entered);
        let balance = amount::round_to(
            self.displayed_balance() + signed,
            self.config.currency.decimal_places,
        );

        let transaction = Transaction::new(
            date.format("%Y-%m-%d").to_string(),
            fields.description_for(kind),
            signed,
            balance,
        );

        log::info!(
            "Created {} transaction: {} {} (balance {})",
            kind,
            transaction.description,
            transaction.amount,
            transaction.balance
        );

        self.transactions.insert(0, transaction.clone());
        self.close_form();
        transaction
    }
}

// ==================== Tests ====================
