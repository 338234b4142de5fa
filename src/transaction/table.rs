//! The HTML table used to list transactions.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        format_currency,
    },
    transaction::{Category, TransactionRow},
};

/// Render `rows` as a table.
///
/// When `show_actions` is set each row gets a link to its edit page and a
/// button that deletes it.
pub fn transaction_table(rows: &[TransactionRow], show_actions: bool) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow-md rounded w-full max-w-4xl"
        {
            table
                id="transactions"
                class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class="px-6 py-3 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }

                        @if show_actions {
                            th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                        }
                    }
                }

                tbody
                {
                    @for row in rows {
                        (transaction_row(row, show_actions))
                    }

                    @if rows.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan=(if show_actions { 5 } else { 4 }) class="px-6 py-4 text-center"
                            {
                                "No transactions found."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(row: &TransactionRow, show_actions: bool) -> Markup {
    let amount_class = match row.category {
        Category::Income => "text-green-600 dark:text-green-400",
        Category::Expense => "text-red-600 dark:text-red-400",
    };

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(row.id)
        {
            td class=(TABLE_CELL_STYLE) { (row.description) }
            td class={ "px-6 py-4 text-right " (amount_class) } { (format_currency(row.amount)) }
            td class=(TABLE_CELL_STYLE) { (row.category) }
            td class=(TABLE_CELL_STYLE) { (row.date) }

            @if show_actions {
                td class={ (TABLE_CELL_STYLE) " flex gap-4" }
                {
                    a href=(format_endpoint(endpoints::EDIT_TRANSACTION, &row.id)) class=(LINK_STYLE)
                    {
                        "Edit"
                    }

                    form
                        method="post"
                        action=(format_endpoint(endpoints::DELETE_TRANSACTION, &row.id))
                    {
                        button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete" }
                    }
                }
            }
        }
    }
}
