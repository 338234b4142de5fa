//! The form used to create and edit transactions, its validation, and the
//! shared HTML for its fields.

use std::fmt::Display;

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    transaction::core::{Category, Transaction, TransactionFields},
};

/// The raw form data for creating or editing a transaction.
///
/// Every field is optional here so that a missing field can be reported to the
/// user instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionForm {
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: Option<String>,
    /// The value of the transaction.
    #[serde(default)]
    pub amount: Option<String>,
    /// Either "Income" or "Expense".
    #[serde(default)]
    pub category: Option<String>,
    /// The date in the format YYYY-MM-DD.
    #[serde(default)]
    pub date: Option<String>,
}

/// Why a [TransactionForm] was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// At least one of the four fields was absent or blank.
    MissingField,
    /// The amount was not a number.
    InvalidAmount,
    /// The category was not "Income" or "Expense".
    InvalidCategory,
    /// The date was not a calendar date.
    InvalidDate,
}

impl ValidationError {
    /// The message to show the user next to the form.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::MissingField => "All fields are required!",
            ValidationError::InvalidAmount => "Amount must be a number.",
            ValidationError::InvalidCategory => "Category must be Income or Expense.",
            ValidationError::InvalidDate => "Date must be a valid date.",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// The date format used by HTML date inputs, e.g. "2024-05-01".
const FORM_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

impl TransactionForm {
    /// Pre-fill the form with the current values of `transaction`.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            description: Some(transaction.description.clone()),
            amount: Some(transaction.amount.to_string()),
            category: Some(transaction.category.to_string()),
            date: Some(format_form_date(transaction.date)),
        }
    }

    /// Check that all four fields are present and valid.
    ///
    /// # Errors
    /// Returns the first problem found, missing fields are reported before
    /// invalid values.
    pub fn validate(&self) -> Result<TransactionFields, ValidationError> {
        let (Some(description), Some(amount), Some(category), Some(date)) = (
            non_blank(&self.description),
            non_blank(&self.amount),
            non_blank(&self.category),
            non_blank(&self.date),
        ) else {
            return Err(ValidationError::MissingField);
        };

        let amount = amount
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
            .ok_or(ValidationError::InvalidAmount)?;
        let category = category
            .parse::<Category>()
            .map_err(|_| ValidationError::InvalidCategory)?;
        let date =
            Date::parse(date, FORM_DATE_FORMAT).map_err(|_| ValidationError::InvalidDate)?;

        Ok(TransactionFields {
            description: description.to_owned(),
            amount,
            category,
            date,
        })
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Format `date` the way HTML date inputs expect, e.g. "2024-05-01".
pub fn format_form_date(date: Date) -> String {
    date.format(FORM_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// The inputs shared by the add and edit transaction forms.
///
/// `values` pre-fills the inputs, `default_date` is used when no date has been
/// entered yet.
pub fn transaction_form_fields(values: &TransactionForm, default_date: Date) -> Markup {
    let category = values.category.as_deref();
    let is_income = category == Some(Category::Income.as_str());
    let is_expense = category == Some(Category::Expense.as_str());
    let date = values
        .date
        .clone()
        .unwrap_or_else(|| format_form_date(default_date));

    html! {
        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                required
                autofocus
                value=[values.description.as_deref()]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    placeholder="0.00"
                    required
                    value=[values.amount.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Category" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                div class="flex items-center gap-3"
                {
                    input
                        name="category"
                        id="category-expense"
                        type="radio"
                        value=(Category::Expense)
                        checked[is_expense]
                        required
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="category-expense"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Expense"
                    }
                }

                div class="flex items-center gap-3"
                {
                    input
                        name="category"
                        id="category-income"
                        type="radio"
                        value=(Category::Income)
                        checked[is_income]
                        required
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="category-income"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Income"
                    }
                }
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                required
                value=(date)
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::transaction::{
        Category,
        core::TransactionFields,
        form::{TransactionForm, ValidationError, transaction_form_fields},
    };

    fn valid_form() -> TransactionForm {
        TransactionForm {
            description: Some("  Coffee ".to_owned()),
            amount: Some("-4.5".to_owned()),
            category: Some("Expense".to_owned()),
            date: Some("2024-05-01".to_owned()),
        }
    }

    #[test]
    fn valid_form_produces_trimmed_fields() {
        let fields = valid_form().validate();

        assert_eq!(
            fields,
            Ok(TransactionFields {
                description: "Coffee".to_owned(),
                amount: -4.5,
                category: Category::Expense,
                date: date!(2024 - 05 - 01),
            })
        );
    }

    #[test]
    fn zero_amount_is_allowed() {
        let form = TransactionForm {
            amount: Some("0".to_owned()),
            ..valid_form()
        };

        assert_eq!(form.validate().map(|fields| fields.amount), Ok(0.0));
    }

    #[test]
    fn any_missing_field_fails() {
        let forms = [
            TransactionForm {
                description: None,
                ..valid_form()
            },
            TransactionForm {
                amount: None,
                ..valid_form()
            },
            TransactionForm {
                category: None,
                ..valid_form()
            },
            TransactionForm {
                date: None,
                ..valid_form()
            },
            TransactionForm {
                description: Some("   ".to_owned()),
                ..valid_form()
            },
            TransactionForm::default(),
        ];

        for form in forms {
            assert_eq!(
                form.validate(),
                Err(ValidationError::MissingField),
                "form {form:?}"
            );
        }
    }

    #[test]
    fn invalid_values_fail() {
        let cases = [
            (
                TransactionForm {
                    amount: Some("four".to_owned()),
                    ..valid_form()
                },
                ValidationError::InvalidAmount,
            ),
            (
                TransactionForm {
                    amount: Some("inf".to_owned()),
                    ..valid_form()
                },
                ValidationError::InvalidAmount,
            ),
            (
                TransactionForm {
                    category: Some("Savings".to_owned()),
                    ..valid_form()
                },
                ValidationError::InvalidCategory,
            ),
            (
                TransactionForm {
                    date: Some("01/05/2024".to_owned()),
                    ..valid_form()
                },
                ValidationError::InvalidDate,
            ),
        ];

        for (form, want) in cases {
            assert_eq!(form.validate(), Err(want), "form {form:?}");
        }
    }

    #[test]
    fn form_fields_check_selected_category() {
        let form = TransactionForm {
            category: Some("Income".to_owned()),
            ..valid_form()
        };
        let markup = maud::html! { form { (transaction_form_fields(&form, date!(2024 - 05 - 02))) } };
        let html = Html::parse_document(&markup.into_string());
        let selector = Selector::parse("input[type=radio][name=category]").unwrap();

        let checked: Vec<_> = html
            .select(&selector)
            .filter(|input| input.value().attr("checked").is_some())
            .filter_map(|input| input.value().attr("value"))
            .collect();

        assert_eq!(checked, ["Income"]);
    }

    #[test]
    fn form_fields_fall_back_to_default_date() {
        let markup =
            maud::html! { form { (transaction_form_fields(&TransactionForm::default(), date!(2024 - 05 - 02))) } };
        let html = Html::parse_document(&markup.into_string());
        let selector = Selector::parse("input[name=date]").unwrap();

        let date_input = html.select(&selector).next().expect("no date input");

        assert_eq!(date_input.value().attr("value"), Some("2024-05-02"));
    }
}
