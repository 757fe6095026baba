//! Projects the ledger into the view-model that the page templates render.

use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{
    html::format_currency,
    ledger::{
        core::{Transaction, TransactionId, TransactionType},
        summary::Summary,
    },
};

/// Which transactions to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Show income and expenses.
    #[default]
    All,
    /// Show only income.
    Income,
    /// Show only expenses.
    Expense,
}

impl Filter {
    /// Every filter, in the order the filter buttons are shown.
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Income, Filter::Expense];

    fn matches(self, transaction: &Transaction) -> bool {
        match self {
            Filter::All => true,
            Filter::Income => transaction.amount.is_income(),
            Filter::Expense => !transaction.amount.is_income(),
        }
    }

    /// The value of the `filter` query parameter for this filter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Income => "income",
            Filter::Expense => "expense",
        }
    }

    /// The text shown on the filter button.
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Income => "Income",
            Filter::Expense => "Expenses",
        }
    }
}

/// The transient, never persisted, state of the transaction list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Which transactions to show.
    pub filter: Filter,
    /// Only show transactions whose description contains this text, ignoring case.
    pub query: String,
}

/// Get the transactions to display: filtered, searched and sorted newest first.
///
/// Transactions on the same date are ordered by ID, highest first.
pub fn visible_transactions<'a>(
    transactions: &'a [Transaction],
    view_state: &ViewState,
) -> Vec<&'a Transaction> {
    let query = view_state.query.to_lowercase();

    let mut visible = transactions
        .iter()
        .filter(|transaction| view_state.filter.matches(transaction))
        .filter(|transaction| transaction.description.to_lowercase().contains(&query))
        .collect::<Vec<_>>();

    visible.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    visible
}

/// A transaction formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    /// The ID of the transaction, used for the edit and delete controls.
    pub id: TransactionId,
    /// The description, or a placeholder if it is empty.
    pub description: String,
    /// The date, e.g. "31 Jan 2025".
    pub date: String,
    /// "income" or "expense".
    pub category: &'static str,
    /// The signed amount, e.g. "+$1,000.00" or "-$400.00".
    pub amount: String,
    /// Whether the transaction is income, used for styling.
    pub is_income: bool,
}

impl TransactionRow {
    fn new(transaction: &Transaction) -> Self {
        let description = if transaction.description.trim().is_empty() {
            "(no description)".to_owned()
        } else {
            transaction.description.clone()
        };

        let sign = if transaction.amount.is_income() {
            "+"
        } else {
            "-"
        };

        Self {
            id: transaction.id,
            description,
            date: format_display_date(transaction.date),
            category: transaction.amount.transaction_type().as_str(),
            amount: format!("{sign}{}", format_currency(transaction.amount.magnitude())),
            is_income: transaction.amount.is_income(),
        }
    }
}

/// The summary totals formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    /// The balance, e.g. "$600.00" or "-$20.00".
    pub balance: String,
    /// Total income, e.g. "+$1,000.00".
    pub income: String,
    /// Total expenses, e.g. "-$400.00".
    pub expense: String,
}

impl From<Summary> for SummaryView {
    fn from(summary: Summary) -> Self {
        Self {
            balance: format_currency(summary.balance),
            income: format!("+{}", format_currency(summary.income)),
            expense: format!("-{}", format_currency(summary.expense)),
        }
    }
}

/// The values to prefill the transaction form with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFormValues {
    /// The description text.
    pub description: String,
    /// The amount as a positive number at full precision, or empty.
    pub amount: String,
    /// The selected type.
    pub transaction_type: TransactionType,
    /// The date in `YYYY-MM-DD` format, or empty to use today's date.
    pub date: String,
}

impl From<&Transaction> for TransactionFormValues {
    fn from(transaction: &Transaction) -> Self {
        Self {
            description: transaction.description.clone(),
            amount: transaction.amount.magnitude().to_string(),
            transaction_type: transaction.amount.transaction_type(),
            date: transaction.date.to_string(),
        }
    }
}

/// Everything needed to render the ledger widget.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerView {
    /// The transactions to display, in display order.
    pub rows: Vec<TransactionRow>,
    /// True when no transactions match the filter and search.
    pub is_empty: bool,
    /// The totals over the whole ledger, not just the visible rows.
    pub summary: SummaryView,
    /// The active filter.
    pub filter: Filter,
    /// The active search text.
    pub query: String,
    /// The values for the transaction form.
    pub form: TransactionFormValues,
    /// The transaction being edited, if any.
    pub editing: Option<TransactionId>,
}

/// Build the view-model for the ledger.
///
/// `summary` should be calculated over every transaction, while the rows
/// only include the transactions that match `view_state`.
pub fn project(
    transactions: &[Transaction],
    summary: Summary,
    view_state: &ViewState,
    form: TransactionFormValues,
    editing: Option<TransactionId>,
) -> LedgerView {
    let rows = visible_transactions(transactions, view_state)
        .into_iter()
        .map(TransactionRow::new)
        .collect::<Vec<_>>();

    LedgerView {
        is_empty: rows.is_empty(),
        rows,
        summary: summary.into(),
        filter: view_state.filter,
        query: view_state.query.clone(),
        form,
        editing,
    }
}

fn format_display_date(date: Date) -> String {
    date.format(format_description!("[day padding:none] [month repr:short] [year]"))
        .unwrap_or_else(|_| date.to_string())
}
