// Export - CSV and clipboard renderings of the full ledger

use chrono::Utc;
use csv::{QuoteStyle, WriterBuilder};

use crate::ledger::{IdSource, LedgerStore};
use crate::record::{Category, Record};
use crate::storage::StorageBackend;

const HEADER: [&str; 4] = ["TIPO", "DESCRIPCIÓN", "MONTO", "FECHA"];

/// Render every record across all four categories as CSV.
///
/// Header `TIPO,DESCRIPCIÓN,MONTO,FECHA`, one row per record in category
/// order (sales, expenses, payroll, fixed costs), string fields quoted,
/// amounts bare. Fixed-cost rows have an empty FECHA field.
pub fn to_csv<B: StorageBackend, I: IdSource>(store: &LedgerStore<B, I>) -> String {
    render(store, b',', QuoteStyle::NonNumeric)
}

/// Render the ledger as tab-separated text for pasting into a
/// spreadsheet. Same fields and escaping as the CSV, no quoting.
pub fn to_clipboard_text<B: StorageBackend, I: IdSource>(store: &LedgerStore<B, I>) -> String {
    render(store, b'\t', QuoteStyle::Never)
}

/// Dated file name for a CSV download, e.g. `Contabilidad_2024-01-15.csv`.
pub fn csv_file_name() -> String {
    format!("Contabilidad_{}.csv", Utc::now().format("%Y-%m-%d"))
}

fn render<B: StorageBackend, I: IdSource>(
    store: &LedgerStore<B, I>,
    delimiter: u8,
    quote_style: QuoteStyle,
) -> String {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(quote_style)
        .from_writer(Vec::new());

    // Writing into a Vec cannot fail
    writer
        .write_record(HEADER)
        .expect("write to an in-memory buffer");
    for category in Category::ALL {
        for record in store.get(category) {
            writer
                .write_record(row_fields(category, &record))
                .expect("write to an in-memory buffer");
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| err.error().to_string())
        .expect("flush to an in-memory buffer");
    String::from_utf8(bytes).expect("export output is UTF-8")
}

fn row_fields(category: Category, record: &Record) -> [String; 4] {
    [
        category.export_tag().to_string(),
        neutralize(&record.subject),
        record.amount.to_string(),
        neutralize(record.date.as_deref().unwrap_or("")),
    ]
}

/// Defuse spreadsheet formula injection: a value starting with `=`, `+`,
/// `-`, or `@` gets a leading space so the spreadsheet treats it as text.
fn neutralize(value: &str) -> String {
    if value.starts_with(['=', '+', '-', '@']) {
        format!(" {value}")
    } else {
        value.to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::SequenceIdSource;
    use crate::record::NewRecord;
    use crate::storage::MemoryBackend;

    fn test_store() -> LedgerStore<MemoryBackend, SequenceIdSource> {
        LedgerStore::with_id_source(MemoryBackend::new(), SequenceIdSource::new())
    }

    #[test]
    fn test_csv_header_and_row_layout() {
        let store = test_store();
        store.add(Category::Sales, NewRecord::new("Ticket batch", 500.0, Some("2024-01-15")));
        store.add(Category::FixedCosts, NewRecord::new("Rent", 300.0, None));

        let csv = to_csv(&store);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "\"TIPO\",\"DESCRIPCIÓN\",\"MONTO\",\"FECHA\"");
        assert_eq!(lines[1], "\"VENTA\",\"Ticket batch\",500,\"2024-01-15\"");
        // Fixed costs carry no date
        assert_eq!(lines[2], "\"FIJO\",\"Rent\",300,\"\"");
    }

    #[test]
    fn test_csv_rows_follow_category_order() {
        let store = test_store();
        store.add(Category::FixedCosts, NewRecord::new("Rent", 300.0, None));
        store.add(Category::Payroll, NewRecord::new("Maria", 400.0, Some("2024-01-31")));
        store.add(Category::Expenses, NewRecord::new("Supplies", 20.0, Some("2024-01-02")));
        store.add(Category::Sales, NewRecord::new("Tickets", 100.0, Some("2024-01-01")));

        let csv = to_csv(&store);
        let tags: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();

        assert_eq!(tags, ["\"VENTA\"", "\"GASTO\"", "\"NOMINA\"", "\"FIJO\""]);
    }

    #[test]
    fn test_csv_escapes_formula_injection() {
        let store = test_store();
        store.add(Category::Sales, NewRecord::new("=SUM(A1)", 10.0, Some("2024-01-15")));

        let csv = to_csv(&store);

        assert!(csv.contains("\" =SUM(A1)\""));
        assert!(!csv.contains("\"=SUM(A1)\""));
    }

    #[test]
    fn test_neutralize_covers_all_trigger_characters() {
        assert_eq!(neutralize("=1+1"), " =1+1");
        assert_eq!(neutralize("+5"), " +5");
        assert_eq!(neutralize("-5"), " -5");
        assert_eq!(neutralize("@cmd"), " @cmd");
        assert_eq!(neutralize("plain"), "plain");
        assert_eq!(neutralize(""), "");
    }

    #[test]
    fn test_clipboard_text_is_tab_separated_and_unquoted() {
        let store = test_store();
        store.add(Category::Payroll, NewRecord::new("Maria Perez", 400.0, Some("2024-01-31")));

        let text = to_clipboard_text(&store);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "TIPO\tDESCRIPCIÓN\tMONTO\tFECHA");
        assert_eq!(lines[1], "NOMINA\tMaria Perez\t400\t2024-01-31");
    }

    #[test]
    fn test_clipboard_text_applies_same_escaping() {
        let store = test_store();
        store.add(Category::Expenses, NewRecord::new("@shell", 1.0, Some("2024-01-01")));

        let text = to_clipboard_text(&store);
        assert!(text.contains("GASTO\t @shell\t1\t2024-01-01"));
    }

    #[test]
    fn test_empty_ledger_exports_header_only() {
        let store = test_store();
        store.initialize();

        let csv = to_csv(&store);
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_csv_file_name_shape() {
        let name = csv_file_name();
        assert!(name.starts_with("Contabilidad_"));
        assert!(name.ends_with(".csv"));
        // Contabilidad_YYYY-MM-DD.csv
        assert_eq!(name.len(), "Contabilidad_".len() + 10 + ".csv".len());
    }
}
