use serde_json::Value;
use summons_columns::ColumnDefinition;
use summons_model::DocWrapper;

const SEPARATOR: &str = " | ";

/// Renders rows as text: a header of column names, then one line per row.
/// Cells show the raw column value; missing values are blank.
pub fn format_table(columns: &[ColumnDefinition], rows: &[DocWrapper]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        columns
            .iter()
            .map(ColumnDefinition::name)
            .collect::<Vec<_>>()
            .join(SEPARATOR),
    );
    for row in rows {
        lines.push(
            columns
                .iter()
                .map(|column| cell(column.value(row)))
                .collect::<Vec<_>>()
                .join(SEPARATOR),
        );
    }
    lines.join("\n")
}

fn cell(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}
