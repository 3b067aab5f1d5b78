//! Test fixtures and data factories

use directory_import::core::import::{RawRow, Table};

/// Builds CSV input the way an administrator's spreadsheet export looks
#[derive(Debug, Clone)]
pub struct CsvBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvBuilder {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, values: &[&str]) -> Self {
        self.rows.push(values.iter().map(|v| v.to_string()).collect());
        self
    }

    /// Bytes, quoting every field that needs it
    pub fn build(&self) -> Vec<u8> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers).expect("header");
        for row in &self.rows {
            writer.write_record(row).expect("row");
        }
        writer.into_inner().expect("flush")
    }
}

/// Factory for business rows
pub struct BusinessRowFactory;

impl BusinessRowFactory {
    /// `count` rows named "Business 0", "Business 1", ...
    pub fn named(count: usize) -> Table {
        let rows = (0..count)
            .map(|i| RawRow::from_pairs([("name", format!("Business {}", i))]))
            .collect();
        Table::new(vec!["name".to_string()], rows)
    }

    /// A fully populated row
    pub fn complete(name: &str, category: &str, neighbourhood: &str) -> RawRow {
        RawRow::from_pairs([
            ("name", name.to_string()),
            ("description", format!("{} in the heart of town", name)),
            ("address", "1 High Street".to_string()),
            ("phone", "555-0100".to_string()),
            ("email", "hello@example.com".to_string()),
            ("website", "example.com".to_string()),
            ("category_slug", category.to_string()),
            ("neighbourhood_slug", neighbourhood.to_string()),
            ("latitude", "51.5072".to_string()),
            ("longitude", "-0.1276".to_string()),
            ("status", "active".to_string()),
        ])
    }
}

/// A table whose header is the first row's columns
pub fn table_of(rows: Vec<RawRow>) -> Table {
    let headers = rows
        .first()
        .map(|row| row.columns().map(str::to_string).collect())
        .unwrap_or_default();
    Table::new(headers, rows)
}
