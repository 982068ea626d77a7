//! Core data models for the ledger

use bankportal_source::Record;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::CoreError;

/// A ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date (YYYY-MM-DD)
    pub date: String,
    /// Free-text description
    pub description: String,
    /// Signed amount: credits positive, debits negative
    pub amount: f64,
    /// Account balance right after this transaction, fixed at creation
    pub balance: f64,
}

impl Transaction {
    pub fn new(date: impl Into<String>, description: impl Into<String>, amount: f64, balance: f64) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount,
            balance,
        }
    }

    /// Parse the date; accepts YYYY-MM-DD or an RFC 3339 timestamp
    pub fn date_naive(&self) -> Option<NaiveDate> {
        let trimmed = self.date.trim();
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|d| d.date_naive()))
    }

    /// Positive amounts are credits
    pub fn is_credit(&self) -> bool {
        self.amount > 0.0
    }
}

impl From<Record> for Transaction {
    fn from(record: Record) -> Self {
        Self {
            date: record.date,
            description: record.description,
            amount: record.amount,
            balance: record.balance,
        }
    }
}

/// Kind of a locally created transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    Transfer,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 3] = [
        TransactionKind::Deposit,
        TransactionKind::Withdraw,
        TransactionKind::Transfer,
    ];

    /// Withdrawals and transfers take money out of the account
    pub fn is_debit(self) -> bool {
        matches!(self, TransactionKind::Withdraw | TransactionKind::Transfer)
    }

    /// Apply the kind's sign to an entered (positive) amount
    pub fn signed(self, amount: f64) -> f64 {
        if self.is_debit() { -amount } else { amount }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deposit" => Ok(TransactionKind::Deposit),
            "withdraw" => Ok(TransactionKind::Withdraw),
            "transfer" => Ok(TransactionKind::Transfer),
            _ => Err(CoreError::InvalidKind { kind: s.to_string() }),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "deposit"),
            TransactionKind::Withdraw => write!(f, "withdraw"),
            TransactionKind::Transfer => write!(f, "transfer"),
        }
    }
}

/// Which transaction form, if any, is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormVisibility {
    None,
    Deposit,
    Withdraw,
    Transfer,
}

impl FormVisibility {
    /// The kind of the open form
    pub fn kind(self) -> Option<TransactionKind> {
        match self {
            FormVisibility::None => None,
            FormVisibility::Deposit => Some(TransactionKind::Deposit),
            FormVisibility::Withdraw => Some(TransactionKind::Withdraw),
            FormVisibility::Transfer => Some(TransactionKind::Transfer),
        }
    }
}

impl Default for FormVisibility {
    fn default() -> Self {
        FormVisibility::None
    }
}

impl From<TransactionKind> for FormVisibility {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Deposit => FormVisibility::Deposit,
            TransactionKind::Withdraw => FormVisibility::Withdraw,
            TransactionKind::Transfer => FormVisibility::Transfer,
        }
    }
}

impl std::str::FromStr for FormVisibility {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("none") {
            return Ok(FormVisibility::None);
        }
        s.parse::<TransactionKind>().map(FormVisibility::from)
    }
}

impl std::fmt::Display for FormVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            Some(kind) => write!(f, "{}", kind),
            None => write!(f, "none"),
        }
    }
}

/// Form field names shared by the renderer and the submit handler
pub mod field {
    pub const DESCRIPTION: &str = "description";
    pub const RECIPIENT: &str = "recipient";
    pub const ACCOUNT_ID: &str = "iban";
    pub const AMOUNT: &str = "amount";
}

/// Raw values posted by the transaction form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormFields {
    pub description: Option<String>,
    pub recipient: Option<String>,
    pub account_id: Option<String>,
    pub amount: Option<String>,
}

impl FormFields {
    /// Pick the known fields out of decoded form pairs
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self {
            description: map.get(field::DESCRIPTION).cloned(),
            recipient: map.get(field::RECIPIENT).cloned(),
            account_id: map.get(field::ACCOUNT_ID).cloned(),
            amount: map.get(field::AMOUNT).cloned(),
        }
    }

    /// Description for a new transaction of the given kind
    pub fn description_for(&self, kind: TransactionKind) -> String {
        match kind {
            TransactionKind::Transfer => format!(
                "Transferred to {}",
                self.recipient.as_deref().unwrap_or("")
            ),
            _ => self.description.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_parsing() {
        let tx = Transaction::new("2024-03-09", "x", 1.0, 1.0);
        assert_eq!(tx.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 9));

        let tx = Transaction::new("2024-03-09T10:15:00Z", "x", 1.0, 1.0);
        assert_eq!(tx.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 9));

        let tx = Transaction::new("yesterday", "x", 1.0, 1.0);
        assert!(tx.date_naive().is_none());
    }

    #[test]
    fn test_kind_parse_and_sign() {
        assert_eq!("Deposit".parse::<TransactionKind>().unwrap(), TransactionKind::Deposit);
        assert!(matches!("loan".parse::<TransactionKind>(), Err(CoreError::InvalidKind { .. })));
        assert_eq!(TransactionKind::Deposit.signed(10.0), 10.0);
        assert_eq!(TransactionKind::Withdraw.signed(10.0), -10.0);
        assert_eq!(TransactionKind::Transfer.signed(10.0), -10.0);
    }

    #[test]
    fn test_form_visibility() {
        assert_eq!("none".parse::<FormVisibility>().unwrap(), FormVisibility::None);
        assert_eq!("transfer".parse::<FormVisibility>().unwrap(), FormVisibility::Transfer);
        assert_eq!(FormVisibility::Withdraw.kind(), Some(TransactionKind::Withdraw));
        assert_eq!(FormVisibility::None.kind(), None);
        assert_eq!(FormVisibility::Deposit.to_string(), "deposit");
    }

    #[test]
    fn test_form_fields_description() {
        let mut map = HashMap::new();
        map.insert("description".to_string(), "Paycheck".to_string());
        map.insert("recipient".to_string(), "Alice".to_string());
        let fields = FormFields::from_map(&map);

        assert_eq!(fields.description_for(TransactionKind::Deposit), "Paycheck");
        assert_eq!(fields.description_for(TransactionKind::Transfer), "Transferred to Alice");
        assert_eq!(FormFields::default().description_for(TransactionKind::Withdraw), "");
    }
}
