//! # Transactions and their in-memory aggregation
//!
//! Transactions are fetched read-only. [`TransactionSummary`] derives the
//! dashboard figures from whatever list is currently loaded; it holds no
//! state of its own and is rebuilt on every render.

use serde::{Deserialize, Serialize};

fn default_match_status() -> String {
    "No".to_string()
}

/// A single ledger transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: String,
    pub description: String,
    /// Signed; refunds and reversals are negative.
    pub amount: f64,
    pub payment_mode: String,
    pub account_id: String,
    pub department: String,
    pub category: String,
    /// Reconciliation marker against the accounting system.
    #[serde(rename = "zoho_match", default = "default_match_status")]
    pub match_status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Filters for `GET /transactions`. Blank strings mean "no filter".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub payment_mode: String,
    #[serde(default)]
    pub min_amount: Option<f64>,
    #[serde(default)]
    pub max_amount: Option<f64>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

impl TransactionFilter {
    /// Number of filters currently narrowing the list.
    pub fn active_count(&self) -> usize {
        let text = [
            &self.department,
            &self.category,
            &self.payment_mode,
            &self.start_date,
            &self.end_date,
        ]
        .iter()
        .filter(|v| !v.trim().is_empty())
        .count();
        text + usize::from(self.min_amount.is_some()) + usize::from(self.max_amount.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

/// One department's slice of the loaded transactions.
#[derive(Clone, Debug, PartialEq)]
pub struct DepartmentShare {
    pub department: String,
    pub amount: f64,
    /// Share of the overall total, in percent. Zero when the total is zero.
    pub percent: f64,
}

/// Figures derived from a loaded transaction list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionSummary {
    pub total_amount: f64,
    pub count: usize,
    /// Departments in order of first appearance.
    pub departments: Vec<DepartmentShare>,
    pub categories: Vec<String>,
    pub payment_modes: Vec<String>,
}

impl TransactionSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let total_amount: f64 = transactions.iter().map(|t| t.amount).sum();

        let mut departments: Vec<DepartmentShare> = Vec::new();
        let mut categories: Vec<String> = Vec::new();
        let mut payment_modes: Vec<String> = Vec::new();

        for t in transactions {
            match departments.iter_mut().find(|d| d.department == t.department) {
                Some(share) => share.amount += t.amount,
                None => departments.push(DepartmentShare {
                    department: t.department.clone(),
                    amount: t.amount,
                    percent: 0.0,
                }),
            }
            push_unique(&mut categories, &t.category);
            push_unique(&mut payment_modes, &t.payment_mode);
        }

        if total_amount != 0.0 {
            for share in &mut departments {
                share.percent = share.amount / total_amount * 100.0;
            }
        }

        Self {
            total_amount,
            count: transactions.len(),
            departments,
            categories,
            payment_modes,
        }
    }

    pub fn department_count(&self) -> usize {
        self.departments.len()
    }

    pub fn department_names(&self) -> Vec<String> {
        self.departments.iter().map(|d| d.department.clone()).collect()
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
