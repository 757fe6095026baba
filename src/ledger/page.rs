//! HTML rendering for the ledger widget.

use maud::{Markup, html};

use crate::{
    alert::{ALERT_CONTAINER_ID, clear_alerts_oob},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_ACTIVE_STYLE, BUTTON_DELETE_STYLE, BUTTON_ICON_STYLE, BUTTON_PRIMARY_STYLE,
        BUTTON_SECONDARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, base, dollar_input_styles, loading_spinner,
    },
    ledger::{
        controller::QuickAdd,
        core::TransactionType,
        view::{Filter, LedgerView, SummaryView, TransactionFormValues, TransactionRow},
    },
};

/// The element ID of the ledger widget, the target of every ledger request.
pub(super) const LEDGER_ID: &str = "ledger";

fn ledger_target() -> String {
    format!("#{LEDGER_ID}")
}

fn alert_target() -> String {
    format!("#{ALERT_CONTAINER_ID}")
}

/// The full page containing the ledger widget.
pub(super) fn ledger_page(view: &LedgerView) -> Markup {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-2xl space-y-4"
            {
                h1 class="text-xl font-bold" { "Ledger" }

                (ledger_widget(view))
            }
        }
    };

    base("Ledger", &[dollar_input_styles()], &content)
}

/// The ledger widget followed by an out-of-band swap that clears old alerts.
///
/// This is the response to every successful ledger request.
pub(super) fn ledger_fragment(view: &LedgerView) -> Markup {
    html! {
        (ledger_widget(view))
        (clear_alerts_oob())
    }
}

fn ledger_widget(view: &LedgerView) -> Markup {
    html! {
        div
            id=(LEDGER_ID)
            hx-target-error=(alert_target())
            class="w-full space-y-4"
        {
            (summary_cards(&view.summary))
            (transaction_form(&view.form, view.editing.is_some()))
            (list_controls(view.filter, &view.query))
            (transaction_list(&view.rows, view.is_empty))
        }
    }
}

fn summary_cards(summary: &SummaryView) -> Markup {
    html! {
        section class="grid grid-cols-1 gap-4 sm:grid-cols-3"
        {
            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Balance" }
                p id="balance" class="text-2xl font-bold" { (summary.balance) }
            }

            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Income" }
                p id="income" class="text-2xl font-bold text-green-700 dark:text-green-300"
                {
                    (summary.income)
                }
            }

            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Expenses" }
                p id="expense" class="text-2xl font-bold text-red-700 dark:text-red-300"
                {
                    (summary.expense)
                }
            }
        }
    }
}

fn transaction_form(values: &TransactionFormValues, is_editing: bool) -> Markup {
    let is_income = values.transaction_type == TransactionType::Income;
    let submit_text = if is_editing {
        "Save Changes"
    } else {
        "Add Transaction"
    };

    html! {
        form
            id="transaction-form"
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target=(ledger_target())
            hx-swap="outerHTML"
            hx-disabled-elt="find button[type=submit]"
            hx-indicator="#indicator"
            class=(format!("{CARD_STYLE} space-y-4"))
        {
            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Transaction type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    div class="flex items-center gap-3"
                    {
                        input
                            name="type"
                            id="transaction-type-expense"
                            type="radio"
                            value="expense"
                            checked[!is_income]
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for="transaction-type-expense" class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Expense"
                        }
                    }

                    div class="flex items-center gap-3"
                    {
                        input
                            name="type"
                            id="transaction-type-income"
                            type="radio"
                            value="income"
                            checked[is_income]
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for="transaction-type-income" class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Income"
                        }
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="any"
                        placeholder="0.00"
                        value=(values.amount)
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="Description"
                    value=(values.description)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    value=(values.date)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="flex gap-2"
            {
                button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="htmx-indicator" { (loading_spinner()) }
                    (submit_text)
                }

                @if is_editing {
                    button
                        type="button"
                        hx-post=(endpoints::CANCEL_EDIT)
                        hx-target=(ledger_target())
                        hx-swap="outerHTML"
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Cancel"
                    }
                }
            }
        }
    }
}

fn list_controls(active_filter: Filter, query: &str) -> Markup {
    html! {
        section class="space-y-2"
        {
            div class="flex flex-wrap gap-2" role="group" aria-label="Filter transactions"
            {
                @for filter in Filter::ALL {
                    @let style = if filter == active_filter {
                        BUTTON_ACTIVE_STYLE
                    } else {
                        BUTTON_SECONDARY_STYLE
                    };

                    button
                        type="button"
                        data-filter=(filter.as_query_value())
                        aria-pressed=(filter == active_filter)
                        hx-get=(format!("{}?filter={}", endpoints::LEDGER_FRAGMENT, filter.as_query_value()))
                        hx-target=(ledger_target())
                        hx-swap="outerHTML"
                        class=(style)
                    {
                        (filter.label())
                    }
                }
            }

            input
                id="search"
                name="q"
                type="search"
                placeholder="Search descriptions"
                value=(query)
                hx-get=(endpoints::LEDGER_FRAGMENT)
                hx-trigger="input changed delay:300ms, search"
                hx-target=(ledger_target())
                hx-swap="outerHTML"
                class=(FORM_TEXT_INPUT_STYLE);

            div class="flex flex-wrap gap-2"
            {
                @for preset in QuickAdd::ALL {
                    button
                        type="button"
                        data-quick-add=(preset.as_path_value())
                        hx-post=(format_endpoint(endpoints::QUICK_ADD, preset.as_path_value()))
                        hx-target=(ledger_target())
                        hx-swap="outerHTML"
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        (preset.label())
                    }
                }

                button
                    type="button"
                    id="clear-all"
                    hx-post=(endpoints::CLEAR_TRANSACTIONS)
                    hx-confirm="Clear ALL transactions?"
                    hx-vals=r#"{"confirmed": true}"#
                    hx-target=(ledger_target())
                    hx-swap="outerHTML"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Clear All"
                }
            }
        }
    }
}

fn transaction_list(rows: &[TransactionRow], is_empty: bool) -> Markup {
    html! {
        section
        {
            @if is_empty {
                p id="empty-state" class="text-center text-gray-500 dark:text-gray-400 py-4"
                {
                    "No transactions found."
                }
            } @else {
                ul id="transaction-list" class="divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for row in rows {
                        (transaction_row(row))
                    }
                }
            }
        }
    }
}

fn transaction_row(row: &TransactionRow) -> Markup {
    let amount_style = if row.is_income {
        "font-semibold text-green-700 dark:text-green-300"
    } else {
        "font-semibold text-red-700 dark:text-red-300"
    };

    html! {
        li data-transaction-id=(row.id) class="flex items-center justify-between gap-4 py-3"
        {
            div
            {
                p class="font-medium" { (row.description) }
                small class="text-gray-500 dark:text-gray-400"
                {
                    (row.date) " • " (row.category)
                }
            }

            div class="flex items-center gap-2"
            {
                span class=(amount_style) { (row.amount) }

                button
                    type="button"
                    title="Edit"
                    hx-post=(format_endpoint(endpoints::EDIT_TRANSACTION, row.id))
                    hx-target=(ledger_target())
                    hx-swap="outerHTML"
                    class=(BUTTON_ICON_STYLE)
                {
                    "✏️"
                }

                button
                    type="button"
                    title="Delete"
                    hx-delete=(format_endpoint(endpoints::DELETE_TRANSACTION, row.id))
                    hx-target=(ledger_target())
                    hx-swap="outerHTML"
                    class=(BUTTON_ICON_STYLE)
                {
                    "🗑"
                }
            }
        }
    }
}
