//! # Record Codec
//!
//! Converts between raw comma-delimited text and a [`Table`].
//!
//! Format: first line is the header (column names), every following
//! non-blank line is one record, fields positionally matched to the
//! header. Fields and header names are trimmed of surrounding
//! whitespace. The ASCII comma is the sole delimiter and there is no
//! quoting, so values containing commas or newlines do not round-trip;
//! that is a documented limitation of the format, not of this codec.

mod types;

pub use types::{Record, Table, DEFAULT_COLUMNS};

/// Parse raw delimited text into a table.
///
/// Empty (or all-blank) input yields an empty table over the default
/// columns. A data row with fewer fields than the header is padded with
/// empty strings for the missing trailing columns; fields beyond the
/// header are dropped. Parsing never fails.
pub fn parse(raw: &str) -> Table {
    let mut lines = raw.lines().filter(|line| !line.trim().is_empty());

    let header = match lines.next() {
        Some(header) => header,
        None => return Table::default(),
    };

    let columns: Vec<String> = header.split(',').map(|c| c.trim().to_string()).collect();

    let mut records = Vec::new();
    for line in lines {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let record: Record = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let value = fields.get(i).copied().unwrap_or("");
                (column.clone(), value.to_string())
            })
            .collect();
        records.push(record);
    }

    Table::from_parts(columns, records)
}

/// Serialize a table back to delimited text.
///
/// The header comes from the table's explicit column list; each record
/// contributes one line of values in that column order, with a missing
/// column rendered as an empty field. An empty table serializes to the
/// fixed `name,roll,marks` header and nothing else.
pub fn serialize(table: &Table) -> String {
    if table.is_empty() {
        return DEFAULT_COLUMNS.join(",");
    }

    let mut out = table.columns().join(",");
    for record in table.records() {
        out.push('\n');
        let row: Vec<&str> = table
            .columns()
            .iter()
            .map(|column| record.get(column).unwrap_or(""))
            .collect();
        out.push_str(&row.join(","));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(c, v)| (c.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_empty_input() {
        let table = parse("");
        assert!(table.is_empty());
        assert_eq!(table.columns(), &["name", "roll", "marks"]);
    }

    #[test]
    fn test_parse_blank_lines_only() {
        let table = parse("\n  \n\n");
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_header_and_rows() {
        let table = parse("name,roll,marks\nAlice,1,90\nBob,2,80");
        assert_eq!(table.columns(), &["name", "roll", "marks"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0], record(&[("name", "Alice"), ("roll", "1"), ("marks", "90")]));
        assert_eq!(table.records()[1], record(&[("name", "Bob"), ("roll", "2"), ("marks", "80")]));
    }

    #[test]
    fn test_parse_trims_fields_and_headers() {
        let table = parse(" name , roll \n  Alice ,  1 ");
        assert_eq!(table.columns(), &["name", "roll"]);
        assert_eq!(table.records()[0], record(&[("name", "Alice"), ("roll", "1")]));
    }

    #[test]
    fn test_parse_short_row_padded_with_empty() {
        let table = parse("name,roll,marks\nAlice,1");
        assert_eq!(
            table.records()[0],
            record(&[("name", "Alice"), ("roll", "1"), ("marks", "")])
        );
    }

    #[test]
    fn test_parse_long_row_drops_extra_fields() {
        let table = parse("name,roll\nAlice,1,stray");
        assert_eq!(table.records()[0], record(&[("name", "Alice"), ("roll", "1")]));
    }

    #[test]
    fn test_parse_ignores_trailing_newline() {
        let table = parse("name,roll,marks\nAlice,1,90\n");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_serialize_empty_table_is_default_header() {
        assert_eq!(serialize(&Table::default()), "name,roll,marks");
    }

    #[test]
    fn test_serialize_rows_in_column_order() {
        let mut table = Table::default();
        table.push(record(&[("name", "Alice"), ("roll", "1"), ("marks", "90")]));
        assert_eq!(serialize(&table), "name,roll,marks\nAlice,1,90");
    }

    #[test]
    fn test_serialize_missing_column_as_empty_field() {
        let mut table = Table::default();
        table.push(record(&[("name", "Alice")]));
        assert_eq!(serialize(&table), "name,roll,marks\nAlice,,");
    }

    #[test]
    fn test_round_trip() {
        let mut table = Table::default();
        table.push(record(&[("name", "Alice"), ("roll", "1"), ("marks", "90")]));
        table.push(record(&[("name", "Bob"), ("roll", "2"), ("marks", "80")]));

        assert_eq!(parse(&serialize(&table)), table);
    }

    #[test]
    fn test_round_trip_custom_columns() {
        let columns = vec!["id".to_string(), "label".to_string()];
        let table = Table::from_parts(
            columns,
            vec![record(&[("id", "7"), ("label", "x")])],
        );
        assert_eq!(parse(&serialize(&table)), table);
    }
}
