//! Turns a user's transactions and an optional free-text query into rows ready
//! for display.
//!
//! Without a query the transactions are listed newest first. With a query the
//! description and category of each transaction are matched case-insensitively
//! and the closest matches are listed first. A match is graded, best first, as
//! an exact match, a substring, an in-order subsequence ("cofee" in "coffee"),
//! or a substring within a small edit distance ("cpffee" in "coffee").

use serde::Serialize;
use time::Date;

use crate::transaction::{Category, Transaction};

/// A transaction formatted for display in a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    /// The transaction ID in its canonical string form.
    pub id: String,
    /// Text detailing the transaction.
    pub description: String,
    /// The value of the transaction.
    pub amount: f64,
    /// Whether the transaction is an income or an expense.
    pub category: Category,
    /// The date formatted as a US short date, e.g. "5/1/2024".
    pub date: String,
}

impl From<Transaction> for TransactionRow {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id.to_string(),
            description: transaction.description,
            amount: transaction.amount,
            category: transaction.category,
            date: format_date(transaction.date),
        }
    }
}

/// Format `date` as month/day/year without zero padding, e.g. "5/1/2024".
pub fn format_date(date: Date) -> String {
    format!("{}/{}/{}", u8::from(date.month()), date.day(), date.year())
}

/// Sort `transactions` by date, most recent first.
///
/// The sort is stable, transactions on the same date keep their relative order.
pub fn sort_by_date_desc(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

/// List `transactions` for display, either all of them newest first or only
/// those that match `query`, closest match first.
///
/// A query that is absent or only whitespace lists every transaction.
pub fn filter_transactions(
    mut transactions: Vec<Transaction>,
    query: Option<&str>,
) -> Vec<TransactionRow> {
    let query = query.map(str::trim).unwrap_or_default();

    let transactions = if query.is_empty() {
        sort_by_date_desc(&mut transactions);
        transactions
    } else {
        fuzzy_search(transactions, query)
    };

    transactions.into_iter().map(TransactionRow::from).collect()
}

/// How well a query matched a field. Smaller is better.
///
/// The derived ordering compares variants in declaration order first, so any
/// exact substring outranks any fuzzy match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchScore {
    Exact,
    Substring { position: usize, extra_chars: usize },
    Subsequence { gaps: usize },
    Approximate { edits: usize },
}

/// Keep the transactions whose description or category matches `query` and
/// order them by how well they match.
///
/// Transactions with equal scores keep their relative order.
pub fn fuzzy_search(transactions: Vec<Transaction>, query: &str) -> Vec<Transaction> {
    let query: Vec<char> = query.to_lowercase().chars().collect();

    if query.is_empty() {
        return transactions;
    }

    let mut scored: Vec<(MatchScore, Transaction)> = transactions
        .into_iter()
        .filter_map(|transaction| {
            let description_score = score_field(&query, &transaction.description);
            let category_score = score_field(&query, transaction.category.as_str());

            let best = match (description_score, category_score) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };

            best.map(|score| (score, transaction))
        })
        .collect();

    scored.sort_by_key(|(score, _)| *score);

    scored
        .into_iter()
        .map(|(_, transaction)| transaction)
        .collect()
}

/// `query` must be lowercase and non-empty.
fn score_field(query: &[char], field: &str) -> Option<MatchScore> {
    let haystack: Vec<char> = field.to_lowercase().chars().collect();

    if haystack == query {
        return Some(MatchScore::Exact);
    }

    if let Some(position) = haystack
        .windows(query.len())
        .position(|window| window == query)
    {
        return Some(MatchScore::Substring {
            position,
            extra_chars: haystack.len() - query.len(),
        });
    }

    if let Some(gaps) = subsequence_gaps(query, &haystack) {
        return Some(MatchScore::Subsequence { gaps });
    }

    let edit_budget = query.len() / 4;
    if edit_budget > 0 {
        let edits = approximate_substring_distance(query, &haystack);
        if edits <= edit_budget {
            return Some(MatchScore::Approximate { edits });
        }
    }

    None
}

/// The number of unmatched characters between the first and last character of
/// the leftmost in-order match of `query` in `haystack`, if there is one.
fn subsequence_gaps(query: &[char], haystack: &[char]) -> Option<usize> {
    let mut remaining = query.iter().peekable();
    let mut start = None;
    let mut end = 0;

    for (i, c) in haystack.iter().enumerate() {
        if remaining.peek() == Some(&c) {
            start.get_or_insert(i);
            end = i;
            remaining.next();

            if remaining.peek().is_none() {
                break;
            }
        }
    }

    if remaining.peek().is_some() {
        return None;
    }

    start.map(|start| end + 1 - start - query.len())
}

/// The smallest edit distance between `query` and any substring of `haystack`.
fn approximate_substring_distance(query: &[char], haystack: &[char]) -> usize {
    // column[i] holds the distance between query[..i] and the best substring
    // of haystack ending at the current character. Row zero is always zero so a
    // match may start anywhere.
    let mut column: Vec<usize> = (0..=query.len()).collect();
    let mut best = query.len();

    for haystack_char in haystack {
        let mut diagonal = column[0];

        for i in 1..=query.len() {
            let left = column[i];
            let substitution = if query[i - 1] == *haystack_char { 0 } else { 1 };

            column[i] = (diagonal + substitution)
                .min(left + 1)
                .min(column[i - 1] + 1);
            diagonal = left;
        }

        best = best.min(column[query.len()]);
    }

    best
}
