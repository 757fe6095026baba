//! Turns user actions into changes to the ledger.

use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    ledger::{
        core::{Amount, NewTransaction, TransactionId, TransactionType, parse_date},
        store::Ledger,
        summary::summarize,
        view::{Filter, LedgerView, TransactionFormValues, ViewState, project},
    },
};

/// The form data for adding or editing a transaction.
///
/// The amount is kept as text so that invalid input can be reported to the
/// user instead of being rejected by the form parser.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionForm {
    /// Text detailing the transaction.
    pub description: String,
    /// The amount of money, the sign is ignored.
    pub amount: String,
    /// Whether the amount is income or an expense. Defaults to an expense.
    #[serde(rename = "type", default)]
    pub transaction_type: TransactionType,
    /// The date in `YYYY-MM-DD` format. Defaults to today when empty.
    #[serde(default)]
    pub date: String,
}

impl TransactionForm {
    /// Check the form and convert it into transaction details.
    ///
    /// # Errors
    /// Returns a:
    /// - [Error::EmptyDescription] if the description is blank,
    /// - [Error::InvalidAmount] if the amount is not a finite number,
    /// - [Error::ZeroAmount] if the amount is zero,
    /// - or [Error::InvalidDate] if the date is given but is not a valid date.
    pub fn validate(&self, today: Date) -> Result<NewTransaction, Error> {
        let description = self.description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        let value: f64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| Error::InvalidAmount(self.amount.clone()))?;
        let amount = Amount::new(self.transaction_type, value)?;

        let date = match self.date.trim() {
            "" => today,
            date => parse_date(date)?,
        };

        Ok(NewTransaction::new(description, amount, date))
    }
}

/// A one-click preset transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickAdd {
    /// Adds $50 of income.
    Income,
    /// Adds a $20 expense.
    Expense,
}

impl QuickAdd {
    /// Both presets, in the order their buttons are shown.
    pub const ALL: [QuickAdd; 2] = [QuickAdd::Income, QuickAdd::Expense];

    fn preset(self, today: Date) -> NewTransaction {
        match self {
            QuickAdd::Income => NewTransaction::new("Quick Income", Amount::Income(50.0), today),
            QuickAdd::Expense => NewTransaction::new("Quick Expense", Amount::Expense(20.0), today),
        }
    }

    /// The value of the path parameter for this preset.
    pub fn as_path_value(self) -> &'static str {
        match self {
            QuickAdd::Income => "income",
            QuickAdd::Expense => "expense",
        }
    }

    /// The text shown on the preset's button.
    pub fn label(self) -> &'static str {
        match self {
            QuickAdd::Income => "+$50 Quick Income",
            QuickAdd::Expense => "-$20 Quick Expense",
        }
    }
}

/// Whether the form is editing an existing transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    /// Submitting the form adds a new transaction.
    #[default]
    Idle,
    /// Submitting the form replaces the transaction with this ID.
    Pending(TransactionId),
}

/// What a successful form submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new transaction was added with this ID.
    Added(TransactionId),
    /// The transaction with this ID was replaced.
    Updated(TransactionId),
    /// The transaction being edited no longer exists, nothing changed.
    Ignored(TransactionId),
}

/// Owns the ledger and the state of the page showing it.
///
/// Every method that changes the ledger also saves it, and undoes the change
/// if the save fails.
#[derive(Debug)]
pub struct LedgerController {
    ledger: Ledger,
    view_state: ViewState,
    edit_state: EditState,
}

impl LedgerController {
    /// Create a controller for `ledger` with no filter, search or pending edit.
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger,
            view_state: ViewState::default(),
            edit_state: EditState::Idle,
        }
    }

    /// Add a transaction, or replace the one being edited, from the form.
    ///
    /// Leaves edit mode on success. On failure nothing changes, including
    /// when the ledger cannot be saved.
    ///
    /// # Errors
    /// Returns the validation errors of [TransactionForm::validate], or an
    /// error if the ledger could not be saved.
    pub fn submit(&mut self, form: &TransactionForm, today: Date) -> Result<SubmitOutcome, Error> {
        let transaction = form.validate(today)?;
        let edit_state = self.edit_state;

        let outcome = self.ledger.commit(|ledger| match edit_state {
            EditState::Idle => SubmitOutcome::Added(ledger.add(transaction).id),
            EditState::Pending(id) => {
                if ledger.update(id, transaction) {
                    SubmitOutcome::Updated(id)
                } else {
                    tracing::debug!("Transaction {id} was removed while being edited");
                    SubmitOutcome::Ignored(id)
                }
            }
        })?;

        self.edit_state = EditState::Idle;

        Ok(outcome)
    }

    /// Start editing the transaction with `id`, replacing any other pending edit.
    ///
    /// Returns the values to fill the form with, or `None` if there is no
    /// such transaction, in which case the edit state does not change.
    pub fn begin_edit(&mut self, id: TransactionId) -> Option<TransactionFormValues> {
        let values = TransactionFormValues::from(self.ledger.get(id)?);

        match self.edit_state {
            EditState::Pending(previous_id) if previous_id != id => {
                tracing::debug!("Dropping pending edit of {previous_id} to edit {id}");
            }
            _ => {}
        }

        self.edit_state = EditState::Pending(id);

        Some(values)
    }

    /// Stop editing without changing the ledger.
    pub fn cancel_edit(&mut self) {
        self.edit_state = EditState::Idle;
    }

    /// Delete the transaction with `id`.
    ///
    /// Returns `false` if there is no such transaction.
    ///
    /// # Errors
    /// Returns an error if the ledger could not be saved, in which case
    /// nothing changes.
    pub fn delete(&mut self, id: TransactionId) -> Result<bool, Error> {
        if self.ledger.get(id).is_none() {
            return Ok(false);
        }

        self.ledger.commit(|ledger| ledger.remove(id))?;

        if self.edit_state == EditState::Pending(id) {
            self.edit_state = EditState::Idle;
        }

        Ok(true)
    }

    /// Delete every transaction, only if the user `confirmed` it.
    ///
    /// # Errors
    /// Returns [Error::ClearNotConfirmed] if `confirmed` is `false`, or an
    /// error if the ledger could not be saved.
    pub fn clear_all(&mut self, confirmed: bool) -> Result<(), Error> {
        if !confirmed {
            return Err(Error::ClearNotConfirmed);
        }

        self.ledger.commit(Ledger::clear)?;
        self.edit_state = EditState::Idle;

        Ok(())
    }

    /// Add the `preset` transaction dated `today`.
    ///
    /// # Errors
    /// Returns an error if the ledger could not be saved.
    pub fn quick_add(&mut self, preset: QuickAdd, today: Date) -> Result<TransactionId, Error> {
        self.ledger.commit(|ledger| ledger.add(preset.preset(today)).id)
    }

    /// Show only the transactions that match `filter`.
    pub fn set_filter(&mut self, filter: Filter) {
        self.view_state.filter = filter;
    }

    /// Show only the transactions whose description contains `query`.
    pub fn set_query(&mut self, query: &str) {
        self.view_state.query = query.to_owned();
    }

    /// The current edit state.
    pub fn edit_state(&self) -> EditState {
        self.edit_state
    }

    /// The ledger being controlled.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Build the view-model for the current state.
    pub fn render(&self) -> LedgerView {
        let transactions = self.ledger.transactions();

        let (form, editing) = match self.edit_state {
            EditState::Pending(id) => match self.ledger.get(id) {
                Some(transaction) => (TransactionFormValues::from(transaction), Some(id)),
                None => (TransactionFormValues::default(), None),
            },
            EditState::Idle => (TransactionFormValues::default(), None),
        };

        project(
            transactions,
            summarize(transactions),
            &self.view_state,
            form,
            editing,
        )
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        ledger::{
            Amount, Ledger, LedgerController, TransactionType,
            controller::{EditState, QuickAdd, SubmitOutcome, TransactionForm},
            store::DEFAULT_STORAGE_KEY,
            view::Filter,
        },
        storage::{KeyValueStore, MemoryStore, test_store::ReadOnlyStore},
    };

    const TODAY: time::Date = date!(2025 - 06 - 15);

    fn get_controller() -> LedgerController {
        LedgerController::new(Ledger::load(
            Box::new(MemoryStore::new()),
            DEFAULT_STORAGE_KEY,
        ))
    }

    fn form(description: &str, amount: &str, transaction_type: TransactionType) -> TransactionForm {
        TransactionForm {
            description: description.to_owned(),
            amount: amount.to_owned(),
            transaction_type,
            date: String::new(),
        }
    }

    #[test]
    fn validate_rejects_blank_description() {
        let result = form("  ", "10", TransactionType::Income).validate(TODAY);

        assert_eq!(result, Err(Error::EmptyDescription));
    }

    #[test]
    fn validate_rejects_non_numeric_amount() {
        for amount in ["", "abc", "12abc", "NaN", "inf"] {
            let result = form("Coffee", amount, TransactionType::Expense).validate(TODAY);

            assert!(
                matches!(result, Err(Error::InvalidAmount(_))),
                "want invalid amount error for {amount:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn validate_rejects_zero_amount() {
        let result = form("Coffee", "0.00", TransactionType::Expense).validate(TODAY);

        assert_eq!(result, Err(Error::ZeroAmount));
    }

    #[test]
    fn validate_defaults_date_to_today() {
        let transaction = form(" Coffee ", "4.50", TransactionType::Expense)
            .validate(TODAY)
            .unwrap();

        assert_eq!(transaction.date, TODAY);
        assert_eq!(transaction.description, "Coffee");
        assert_eq!(transaction.amount, Amount::Expense(4.5));
    }

    #[test]
    fn validate_uses_given_date() {
        let mut form = form("Coffee", "4.50", TransactionType::Expense);
        form.date = "2025-01-02".to_owned();

        let transaction = form.validate(TODAY).unwrap();

        assert_eq!(transaction.date, date!(2025 - 01 - 02));
    }

    #[test]
    fn validate_rejects_invalid_date() {
        let mut form = form("Coffee", "4.50", TransactionType::Expense);
        form.date = "tomorrow".to_owned();

        let result = form.validate(TODAY);

        assert_eq!(result, Err(Error::InvalidDate("tomorrow".to_owned())));
    }

    #[test]
    fn invalid_submit_changes_nothing() {
        let mut controller = get_controller();

        let result = controller.submit(&form("", "10", TransactionType::Income), TODAY);

        assert!(result.is_err());
        assert!(controller.ledger().transactions().is_empty());
    }

    #[test]
    fn salary_then_rent_then_delete() {
        let mut controller = get_controller();

        controller
            .submit(&form("Salary", "1000", TransactionType::Income), TODAY)
            .unwrap();
        let summary = controller.render().summary;
        assert_eq!(summary.balance, "$1,000.00");
        assert_eq!(summary.income, "+$1,000.00");
        assert_eq!(summary.expense, "-$0.00");

        let rent = controller
            .submit(&form("Rent", "400", TransactionType::Expense), TODAY)
            .unwrap();
        let summary = controller.render().summary;
        assert_eq!(summary.balance, "$600.00");
        assert_eq!(summary.income, "+$1,000.00");
        assert_eq!(summary.expense, "-$400.00");

        let SubmitOutcome::Added(rent_id) = rent else {
            panic!("want rent to be added, got {rent:?}");
        };
        assert_eq!(controller.delete(rent_id), Ok(true));
        assert_eq!(controller.render().summary.balance, "$1,000.00");
    }

    #[test]
    fn submit_while_editing_updates_only_the_target() {
        let mut controller = get_controller();
        controller
            .submit(&form("Salary", "1000", TransactionType::Income), TODAY)
            .unwrap();
        controller
            .submit(&form("Rent", "400", TransactionType::Expense), TODAY)
            .unwrap();
        let salary = controller.ledger().transactions()[0].clone();
        let rent_id = controller.ledger().transactions()[1].id;

        let values = controller.begin_edit(rent_id).unwrap();
        assert_eq!(values.amount, "400");
        let mut edit = form("Rent (shared)", "200", TransactionType::Expense);
        edit.date = "2025-06-01".to_owned();
        let outcome = controller.submit(&edit, TODAY).unwrap();

        assert_eq!(outcome, SubmitOutcome::Updated(rent_id));
        assert_eq!(controller.edit_state(), EditState::Idle);
        let transactions = controller.ledger().transactions();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0], salary);
        assert_eq!(transactions[1].id, rent_id);
        assert_eq!(transactions[1].description, "Rent (shared)");
        assert_eq!(transactions[1].amount, Amount::Expense(200.0));
        assert_eq!(transactions[1].date, date!(2025 - 06 - 01));
    }

    #[test]
    fn edit_keeps_full_precision_of_amount() {
        let mut controller = get_controller();
        controller
            .submit(&form("Interest", "0.004", TransactionType::Income), TODAY)
            .unwrap();
        let id = controller.ledger().transactions()[0].id;

        let values = controller.begin_edit(id).unwrap();
        assert_eq!(values.amount, "0.004");
        let outcome = controller.submit(
            &form("Bank interest", &values.amount, values.transaction_type),
            TODAY,
        );

        assert_eq!(outcome, Ok(SubmitOutcome::Updated(id)));
        let transaction = &controller.ledger().transactions()[0];
        assert_eq!(transaction.description, "Bank interest");
        assert_eq!(transaction.amount, Amount::Income(0.004));
    }

    #[test]
    fn edit_can_change_type() {
        let mut controller = get_controller();
        controller
            .submit(&form("Refund", "30", TransactionType::Expense), TODAY)
            .unwrap();
        let id = controller.ledger().transactions()[0].id;

        controller.begin_edit(id);
        controller
            .submit(&form("Refund", "30", TransactionType::Income), TODAY)
            .unwrap();

        assert_eq!(
            controller.ledger().transactions()[0].amount,
            Amount::Income(30.0)
        );
    }

    #[test]
    fn new_edit_replaces_pending_edit() {
        let mut controller = get_controller();
        controller
            .submit(&form("First", "1", TransactionType::Income), TODAY)
            .unwrap();
        controller
            .submit(&form("Second", "2", TransactionType::Income), TODAY)
            .unwrap();

        controller.begin_edit(1);
        controller.begin_edit(2);

        assert_eq!(controller.edit_state(), EditState::Pending(2));
        assert_eq!(controller.render().form.description, "Second");
        assert_eq!(controller.render().editing, Some(2));
    }

    #[test]
    fn begin_edit_of_missing_id_keeps_state() {
        let mut controller = get_controller();
        controller
            .submit(&form("First", "1", TransactionType::Income), TODAY)
            .unwrap();
        controller.begin_edit(1);

        let values = controller.begin_edit(99);

        assert_eq!(values, None);
        assert_eq!(controller.edit_state(), EditState::Pending(1));
    }

    #[test]
    fn cancel_edit_returns_to_adding() {
        let mut controller = get_controller();
        controller
            .submit(&form("First", "1", TransactionType::Income), TODAY)
            .unwrap();
        controller.begin_edit(1);

        controller.cancel_edit();
        let outcome = controller
            .submit(&form("Second", "2", TransactionType::Income), TODAY)
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Added(2));
        assert_eq!(controller.ledger().transactions().len(), 2);
    }

    #[test]
    fn deleting_edited_transaction_ends_edit() {
        let mut controller = get_controller();
        controller
            .submit(&form("First", "1", TransactionType::Income), TODAY)
            .unwrap();
        controller.begin_edit(1);

        controller.delete(1).unwrap();

        assert_eq!(controller.edit_state(), EditState::Idle);
        assert_eq!(controller.render().editing, None);
    }

    #[test]
    fn delete_missing_id_is_a_no_op() {
        let mut controller = get_controller();
        controller
            .submit(&form("First", "1", TransactionType::Income), TODAY)
            .unwrap();

        assert_eq!(controller.delete(42), Ok(false));
        assert_eq!(controller.ledger().transactions().len(), 1);
    }

    #[test]
    fn clear_all_needs_confirmation() {
        let mut controller = get_controller();
        controller.quick_add(QuickAdd::Income, TODAY).unwrap();

        assert_eq!(controller.clear_all(false), Err(Error::ClearNotConfirmed));
        assert_eq!(controller.ledger().transactions().len(), 1);

        assert_eq!(controller.clear_all(true), Ok(()));
        assert!(controller.ledger().transactions().is_empty());
        assert!(controller.render().is_empty);
    }

    #[test]
    fn quick_add_presets() {
        let mut controller = get_controller();

        controller.quick_add(QuickAdd::Income, TODAY).unwrap();
        controller.quick_add(QuickAdd::Expense, TODAY).unwrap();

        let transactions = controller.ledger().transactions();
        assert_eq!(transactions[0].description, "Quick Income");
        assert_eq!(transactions[0].amount, Amount::Income(50.0));
        assert_eq!(transactions[0].date, TODAY);
        assert_eq!(transactions[1].description, "Quick Expense");
        assert_eq!(transactions[1].amount, Amount::Expense(20.0));
        assert_eq!(controller.render().summary.balance, "$30.00");
    }

    /// A controller whose ledger holds one transaction with ID 1 and can no
    /// longer be saved.
    fn get_unsaveable_controller() -> LedgerController {
        let mut store = ReadOnlyStore::default();
        store
            .inner
            .set(
                DEFAULT_STORAGE_KEY,
                r#"[{"id":1,"description":"Rent","amount":-400.0,"date":"2025-06-01","category":"expense"}]"#,
            )
            .unwrap();

        LedgerController::new(Ledger::load(Box::new(store), DEFAULT_STORAGE_KEY))
    }

    #[test]
    fn failed_save_keeps_ledger_and_pending_edit() {
        let mut controller = get_unsaveable_controller();
        let before = controller.ledger().transactions().to_vec();
        controller.begin_edit(1).unwrap();

        let result = controller.submit(&form("Rent", "500", TransactionType::Expense), TODAY);

        assert!(matches!(result, Err(Error::SqlError(_))), "got {result:?}");
        assert_eq!(controller.ledger().transactions(), before.as_slice());
        assert_eq!(controller.edit_state(), EditState::Pending(1));
    }

    #[test]
    fn failed_save_undoes_add_delete_and_clear() {
        let mut controller = get_unsaveable_controller();
        let before = controller.ledger().transactions().to_vec();

        assert!(controller.quick_add(QuickAdd::Income, TODAY).is_err());
        assert!(controller.delete(1).is_err());
        assert!(controller.clear_all(true).is_err());

        assert_eq!(controller.ledger().transactions(), before.as_slice());
    }

    #[test]
    fn filter_and_query_only_change_the_view() {
        let mut controller = get_controller();
        controller.quick_add(QuickAdd::Income, TODAY).unwrap();
        controller.quick_add(QuickAdd::Expense, TODAY).unwrap();

        controller.set_filter(Filter::Expense);
        let view = controller.render();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.filter, Filter::Expense);

        controller.set_filter(Filter::All);
        controller.set_query("INCOME");
        let view = controller.render();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].description, "Quick Income");
        assert_eq!(controller.ledger().transactions().len(), 2);
    }
}
