//! Defines the core data models for ledger transactions.

use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned.
    Income,
    /// Money that was spent.
    #[default]
    Expense,
}

impl TransactionType {
    /// The lowercase label used in forms and in the stored JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

/// The amount of money in a transaction.
///
/// The variant says whether the money was earned or spent, the value is the
/// magnitude and is always finite and greater than zero. Use [Amount::new] or
/// [Amount::from_signed] to create an amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    /// Money earned.
    Income(f64),
    /// Money spent.
    Expense(f64),
}

impl Amount {
    /// Create an amount of `transaction_type`.
    ///
    /// The sign of `value` is ignored, the transaction type decides it.
    ///
    /// # Errors
    /// Returns [Error::ZeroAmount] if `value` is zero, or
    /// [Error::InvalidAmount] if `value` is NaN or infinite.
    pub fn new(transaction_type: TransactionType, value: f64) -> Result<Self, Error> {
        if !value.is_finite() {
            return Err(Error::InvalidAmount(value.to_string()));
        }

        if value == 0.0 {
            return Err(Error::ZeroAmount);
        }

        let magnitude = value.abs();

        Ok(match transaction_type {
            TransactionType::Income => Amount::Income(magnitude),
            TransactionType::Expense => Amount::Expense(magnitude),
        })
    }

    /// Create an amount from a signed value, positive for income and
    /// negative for expenses.
    ///
    /// # Errors
    /// Same as [Amount::new].
    pub fn from_signed(value: f64) -> Result<Self, Error> {
        let transaction_type = if value < 0.0 {
            TransactionType::Expense
        } else {
            TransactionType::Income
        };

        Self::new(transaction_type, value)
    }

    /// The amount as a signed value, positive for income and negative for expenses.
    pub fn signed(self) -> f64 {
        match self {
            Amount::Income(magnitude) => magnitude,
            Amount::Expense(magnitude) => -magnitude,
        }
    }

    /// The size of the amount, always positive.
    pub fn magnitude(self) -> f64 {
        match self {
            Amount::Income(magnitude) | Amount::Expense(magnitude) => magnitude,
        }
    }

    /// Whether the amount is income or an expense.
    pub fn transaction_type(self) -> TransactionType {
        match self {
            Amount::Income(_) => TransactionType::Income,
            Amount::Expense(_) => TransactionType::Expense,
        }
    }

    /// Returns `true` for income.
    pub fn is_income(self) -> bool {
        matches!(self, Amount::Income(_))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are stored as JSON records with the fields `id`,
/// `description`, `amount` (signed), `date` (`YYYY-MM-DD`) and `category`
/// (`"income"` or `"expense"`). When reading records back the sign of
/// `amount` decides the category, the stored `category` is only there for
/// people reading the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: Amount,
    /// When the transaction happened.
    pub date: Date,
}

/// The fields of a transaction that the user controls.
///
/// Used both for adding transactions and for replacing the fields of an
/// existing transaction when it is edited.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned.
    pub amount: Amount,
    /// When the transaction happened.
    pub date: Date,
}

impl NewTransaction {
    /// Create the transaction details.
    pub fn new(description: &str, amount: Amount, date: Date) -> Self {
        Self {
            description: description.to_owned(),
            amount,
            date,
        }
    }

    pub(super) fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            date: self.date,
        }
    }
}

// ============================================================================
// SERIALIZATION
// ============================================================================

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Serialize, Deserialize)]
struct TransactionRecord {
    id: TransactionId,
    description: String,
    amount: f64,
    #[serde(with = "iso_date")]
    date: Date,
    #[serde(default)]
    category: String,
}

impl From<Transaction> for TransactionRecord {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            description: transaction.description,
            amount: transaction.amount.signed(),
            date: transaction.date,
            category: transaction.amount.transaction_type().as_str().to_owned(),
        }
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = Error;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            description: record.description,
            amount: Amount::from_signed(record.amount)?,
            date: record.date,
        })
    }
}

/// Parse a date from a form in the `YYYY-MM-DD` format used by date inputs.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is not a valid date.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

// ============================================================================
// TESTS
// ============================================================================
