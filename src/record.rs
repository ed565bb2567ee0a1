// Record model - the four ledger categories and their entries

use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORY
// ============================================================================

/// The four independent record collections of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Sales income
    Sales,

    /// Day-to-day expenses
    Expenses,

    /// Employee payroll payments
    Payroll,

    /// Recurring monthly costs (rent, utilities); these carry no date
    FixedCosts,
}

impl Category {
    /// All categories, in the order exports traverse them.
    pub const ALL: [Category; 4] = [
        Category::Sales,
        Category::Expenses,
        Category::Payroll,
        Category::FixedCosts,
    ];

    /// Key under which this category's list is persisted.
    ///
    /// The keys match the original data layout, so a store pointed at an
    /// existing substrate picks the data up as-is.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Category::Sales => "ventas",
            Category::Expenses => "gastos",
            Category::Payroll => "nomina",
            Category::FixedCosts => "fijos",
        }
    }

    /// Row tag used by the CSV and clipboard exports.
    pub fn export_tag(&self) -> &'static str {
        match self {
            Category::Sales => "VENTA",
            Category::Expenses => "GASTO",
            Category::Payroll => "NOMINA",
            Category::FixedCosts => "FIJO",
        }
    }

    /// Payroll records name an employee instead of describing a purchase.
    pub fn subject_is_employee(&self) -> bool {
        matches!(self, Category::Payroll)
    }

    /// Fixed costs are monthly amounts with no associated date.
    pub fn requires_date(&self) -> bool {
        !matches!(self, Category::FixedCosts)
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// One ledger entry within a category.
///
/// `subject` is the description for sales, expenses, and fixed costs, and
/// the employee name for payroll. Which one it means is decided by the
/// category the record lives under, not by the record itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Unique within its category, strictly increasing across adds.
    pub id: i64,
    pub subject: String,
    /// Non-negative amount in the ledger's currency.
    pub amount: f64,
    /// ISO-8601 date (`YYYY-MM-DD`). Always present except for fixed costs.
    pub date: Option<String>,
}

/// The caller-supplied part of a record; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub subject: String,
    pub amount: f64,
    pub date: Option<String>,
}

impl NewRecord {
    pub fn new(subject: impl Into<String>, amount: f64, date: Option<&str>) -> Self {
        NewRecord {
            subject: subject.into(),
            amount,
            date: date.map(str::to_string),
        }
    }

    pub(crate) fn into_record(self, id: i64) -> Record {
        Record {
            id,
            subject: self.subject,
            amount: self.amount,
            date: self.date,
        }
    }
}

/// Partial update for an existing record. Set fields overwrite, unset
/// fields leave the stored value untouched. A date can be replaced but
/// not cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub subject: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<String>,
}

impl RecordPatch {
    pub fn apply(&self, record: &mut Record) {
        if let Some(subject) = &self.subject {
            record.subject = subject.clone();
        }
        if let Some(amount) = self.amount {
            record.amount = amount;
        }
        if let Some(date) = &self.date {
            record.date = Some(date.clone());
        }
    }
}

// ============================================================================
// WIRE FORM
// ============================================================================

/// Persisted shape of a record, field-compatible with the original JSON
/// layout: `descripcion` for sales/expenses/fixed costs, `empleado` for
/// payroll, `monto`, optional `fecha`. Absent fields are omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredRecord {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empleado: Option<String>,

    pub monto: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
}

impl Record {
    pub(crate) fn to_stored(&self, category: Category) -> StoredRecord {
        let (descripcion, empleado) = if category.subject_is_employee() {
            (None, Some(self.subject.clone()))
        } else {
            (Some(self.subject.clone()), None)
        };
        StoredRecord {
            id: self.id,
            descripcion,
            empleado,
            monto: self.amount,
            fecha: self.date.clone(),
        }
    }

    /// Rebuild a domain record from its stored form. Tolerates the subject
    /// living under the "wrong" field for the category, since the original
    /// layout never enforced it.
    pub(crate) fn from_stored(stored: StoredRecord, category: Category) -> Record {
        let subject = if category.subject_is_employee() {
            stored.empleado.or(stored.descripcion)
        } else {
            stored.descripcion.or(stored.empleado)
        };
        Record {
            id: stored.id,
            subject: subject.unwrap_or_default(),
            amount: stored.monto,
            date: stored.fecha,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
