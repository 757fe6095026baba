//! Totals derived from the ledger.

use crate::ledger::core::{Amount, Transaction};

/// The income, expenses and balance of a list of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    /// The sum of all income.
    pub income: f64,
    /// The sum of all expenses as a positive number.
    pub expense: f64,
    /// Income minus expenses.
    pub balance: f64,
}

/// Calculate the totals for `transactions`.
///
/// An empty list gives all zeros.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let (income, expense) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expense), transaction| {
                match transaction.amount {
                    Amount::Income(amount) => (income + amount, expense),
                    Amount::Expense(amount) => (income, expense + amount),
                }
            });

    Summary {
        income,
        expense,
        balance: income - expense,
    }
}
