use tabled::{
    Table,
    settings::{
        Alignment, Modify, Style,
        format::Format,
        object::{Columns, Rows},
    },
};

/// Table styling shared by every command that prints rows.
pub struct TableTheme;

impl TableTheme {
    /// Rounded borders, upper-cased headers and left-aligned cells, kubectl style.
    pub fn apply_default(mut table: Table) -> Table {
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Format::content(|s| s.to_uppercase())))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table
    }

    /// Placeholder row shown in place of an empty table.
    pub fn empty_message(namespace: &str) -> String {
        format!("No ConfigMaps found in namespace {namespace}")
    }
}
