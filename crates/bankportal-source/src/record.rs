//! Raw transaction records as they appear in the data file

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Calendar date, normally YYYY-MM-DD
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    /// Free-text description
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    /// Signed amount: credits positive, debits negative
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: f64,
    /// Running balance after this transaction
    #[serde(default, deserialize_with = "lenient_number")]
    pub balance: f64,
}

impl Record {
    pub fn new(date: impl Into<String>, description: impl Into<String>, amount: f64, balance: f64) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount,
            balance,
        }
    }
}

/// Accepts numbers and numeric strings; anything else reads as 0
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("number out of range: {}", n)))?,
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(n) => n,
            Err(_) => {
                log::warn!("Non-numeric value '{}' in data file, reading as 0", s);
                0.0
            }
        },
        Some(other) => {
            log::warn!("Unexpected value {} in numeric field, reading as 0", other);
            0.0
        }
    };
    Ok(number)
}

/// Accepts any scalar as text; null and containers read as empty
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => {
            log::warn!("Unexpected value {} in text field, reading as empty", other);
            String::new()
        }
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_plain_json() {
        let record: Record = serde_json::from_str(
            r#"{"date": "2024-06-01", "description": "Salary", "amount": 2500, "balance": 3120.45}"#,
        ).unwrap();
        assert_eq!(record, Record::new("2024-06-01", "Salary", 2500.0, 3120.45));
    }

    #[test]
    fn test_record_numeric_strings() {
        let record: Record = serde_json::from_str(
            r#"{"date": "2024-06-01", "description": "Rent", "amount": "-950.00", "balance": " 120.5 "}"#,
        ).unwrap();
        assert_eq!(record.amount, -950.0);
        assert_eq!(record.balance, 120.5);
    }

    #[test]
    fn test_record_missing_and_garbage_fields() {
        let record: Record = serde_json::from_str(
            r#"{"description": null, "amount": "lots", "balance": true}"#,
        ).unwrap();
        assert_eq!(record.date, "");
        assert_eq!(record.description, "");
        assert_eq!(record.amount, 0.0);
        assert_eq!(record.balance, 0.0);
    }
}
