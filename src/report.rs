// Report - per-category totals and the net profit figure

use crate::ledger::{IdSource, LedgerStore};
use crate::record::{Category, Record};
use crate::storage::StorageBackend;

/// Profit/loss classification of a report. A net profit of exactly zero
/// counts as profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Profit,
    Loss,
}

/// Summary totals over the whole ledger, consumed by the presentation
/// layer's summary cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub total_sales: f64,
    pub total_expenses: f64,
    pub total_payroll: f64,
    pub total_fixed: f64,
    pub net_profit: f64,
}

impl Report {
    /// Compute the report from the store's current contents.
    pub fn compute<B: StorageBackend, I: IdSource>(store: &LedgerStore<B, I>) -> Report {
        let total_sales = sum(&store.get(Category::Sales));
        let total_expenses = sum(&store.get(Category::Expenses));
        let total_payroll = sum(&store.get(Category::Payroll));
        let total_fixed = sum(&store.get(Category::FixedCosts));

        Report {
            total_sales,
            total_expenses,
            total_payroll,
            total_fixed,
            net_profit: total_sales - (total_expenses + total_payroll + total_fixed),
        }
    }

    pub fn outcome(&self) -> Outcome {
        if self.net_profit >= 0.0 {
            Outcome::Profit
        } else {
            Outcome::Loss
        }
    }
}

fn sum(records: &[Record]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

// ============================================================================
// TESTS
// ============================================================================
