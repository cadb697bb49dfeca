//! Record format handling for the backing account file
//!
//! Each non-empty line of the backing file holds one account:
//!
//! ```text
//! <pin>,<name>,<balance>
//! 1234,Alice,500.00
//! ```
//!
//! This module centralizes all format concerns, providing:
//! - RecordRow structure for (de)serialization
//! - Conversion from rows to domain types
//! - Bounded reading of a whole record set
//! - Record set serialization
//!
//! Functions here work on generic readers and writers; opening and closing
//! the backing file is left to `record_store`.

use crate::core::RecordSet;
use crate::types::{AccountRecord, AtmError, Pin, MAX_NAME_LEN};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::str::FromStr;

/// Number of comma-separated fields on every record line
pub const FIELD_COUNT: usize = 3;

/// Raw record structure for (de)serialization
///
/// Fields are positional (the file has no header row) and kept as strings
/// so validation can report exactly what was wrong with a line.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RecordRow {
    pub pin: String,
    pub name: String,
    pub balance: String,
}

impl From<&AccountRecord> for RecordRow {
    fn from(record: &AccountRecord) -> Self {
        RecordRow {
            pin: record.pin.to_string(),
            name: record.name.clone(),
            balance: format!("{:.2}", record.balance),
        }
    }
}

/// Convert a RecordRow to an AccountRecord
///
/// This function:
/// - Parses the PIN as a signed 32-bit integer (surrounding whitespace allowed)
/// - Checks the name is between 1 and 49 characters
/// - Parses the balance as a decimal and rounds it to cents
///
/// # Returns
///
/// Result containing either:
/// - Ok(AccountRecord) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_record_row(row: RecordRow) -> Result<AccountRecord, String> {
    let pin = Pin::from_str(row.pin.trim())
        .map_err(|_| format!("Invalid PIN '{}'", row.pin))?;

    let name_len = row.name.chars().count();
    if name_len == 0 {
        return Err("Empty account name".to_string());
    }
    if name_len > MAX_NAME_LEN {
        return Err(format!(
            "Account name is {} characters long (maximum {})",
            name_len, MAX_NAME_LEN
        ));
    }

    let balance = Decimal::from_str(row.balance.trim())
        .map_err(|_| format!("Invalid balance '{}'", row.balance))?;

    Ok(AccountRecord::new(pin, row.name, balance))
}

/// Read account records until end of input or until `capacity` is reached
///
/// Reading stops as soon as the set is full; anything after that point is
/// never looked at, malformed or not. Blank lines are skipped.
///
/// # Errors
///
/// Returns `StoreCorrupt` with the physical line number for the first line
/// that is not `<int>,<name>,<decimal>`. No partial set is returned.
pub fn read_records<R: Read>(input: R, capacity: usize) -> Result<RecordSet, AtmError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(input);

    let mut records = RecordSet::with_capacity(capacity);
    let mut raw = StringRecord::new();

    while !records.is_full() {
        if !reader.read_record(&mut raw)? {
            break;
        }
        if is_blank(&raw) {
            continue;
        }

        let line = raw.position().map(|pos| pos.line()).unwrap_or_default();

        if raw.len() != FIELD_COUNT {
            return Err(AtmError::store_corrupt(
                line,
                format!("expected {} fields, found {}", FIELD_COUNT, raw.len()),
            ));
        }

        let row: RecordRow = raw
            .deserialize(None)
            .map_err(|e| AtmError::store_corrupt(line, e.to_string()))?;
        let record = convert_record_row(row).map_err(|e| AtmError::store_corrupt(line, e))?;

        records.push(record)?;
    }

    Ok(records)
}

/// Write every record in order, one `<pin>,<name>,<balance>` line each
///
/// Balances are always written with exactly two fractional digits.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_records(records: &RecordSet, output: &mut dyn Write) -> Result<(), String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(output);

    for record in records {
        writer
            .serialize(RecordRow::from(record))
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

// A line holding nothing but whitespace counts as blank.
fn is_blank(raw: &StringRecord) -> bool {
    raw.len() == 1 && raw.get(0).is_some_and(|field| field.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(pin: &str, name: &str, balance: &str) -> RecordRow {
        RecordRow {
            pin: pin.to_string(),
            name: name.to_string(),
            balance: balance.to_string(),
        }
    }

    #[rstest]
    #[case::plain(row("1234", "Alice", "500.00"), 1234, "Alice", Decimal::new(50000, 2))]
    #[case::spaces_in_name(row("42", "Mary Ann", "7"), 42, "Mary Ann", Decimal::new(700, 2))]
    #[case::padded_numbers(row(" 7 ", "Bob", " 1.5 "), 7, "Bob", Decimal::new(150, 2))]
    #[case::negative_pin(row("-1", "Neg", "0"), -1, "Neg", Decimal::ZERO)]
    #[case::rounds_balance(row("1", "Eve", "10.005"), 1, "Eve", Decimal::new(1001, 2))]
    fn test_convert_record_row_valid(
        #[case] input: RecordRow,
        #[case] pin: Pin,
        #[case] name: &str,
        #[case] balance: Decimal,
    ) {
        let record = convert_record_row(input).unwrap();
        assert_eq!(record.pin, pin);
        assert_eq!(record.name, name);
        assert_eq!(record.balance, balance);
    }

    #[rstest]
    #[case::pin_not_numeric(row("abc", "Alice", "1.00"), "Invalid PIN")]
    #[case::pin_float(row("12.5", "Alice", "1.00"), "Invalid PIN")]
    #[case::empty_name(row("1", "", "1.00"), "Empty account name")]
    #[case::name_too_long(row("1", &"x".repeat(50), "1.00"), "maximum 49")]
    #[case::balance_not_numeric(row("1", "Alice", "lots"), "Invalid balance")]
    #[case::balance_empty(row("1", "Alice", ""), "Invalid balance")]
    fn test_convert_record_row_errors(#[case] input: RecordRow, #[case] expected_error: &str) {
        let result = convert_record_row(input);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains(expected_error));
    }

    #[test]
    fn test_convert_record_row_accepts_max_name() {
        let name = "y".repeat(MAX_NAME_LEN);
        let record = convert_record_row(row("1", &name, "0")).unwrap();
        assert_eq!(record.name, name);
    }

    #[test]
    fn test_read_records_in_file_order() {
        let input = "1234,Alice,500.00\n5678,Bob,20.5\n";
        let records = read_records(input.as_bytes(), 10).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records.get(0).unwrap().name, "Alice");
        assert_eq!(records.get(1).unwrap().pin, 5678);
        assert_eq!(records.get(1).unwrap().balance, Decimal::new(2050, 2));
    }

    #[test]
    fn test_read_records_stops_at_capacity() {
        let input: String = (1..=12)
            .map(|i| format!("{},User{},{}.00\n", i, i, i))
            .collect();
        let records = read_records(input.as_bytes(), 10).unwrap();

        assert_eq!(records.len(), 10);
        let pins: Vec<Pin> = records.iter().map(|r| r.pin).collect();
        assert_eq!(pins, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_read_records_ignores_garbage_after_capacity() {
        let input = "1,A,1.00\n2,B,2.00\nthis is not a record\n";
        let records = read_records(input.as_bytes(), 2).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_read_records_skips_blank_lines() {
        let input = "\n1,A,1.00\n\n   \n2,B,2.00\n";
        let records = read_records(input.as_bytes(), 10).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_read_records_empty_input() {
        let records = read_records("".as_bytes(), 10).unwrap();
        assert!(records.is_empty());
    }

    #[rstest]
    #[case::second_line_bad("1234,Alice,500.00\nnot-a-record\n", 2)]
    #[case::too_few_fields("1234,Alice\n", 1)]
    #[case::comma_in_name("1234,Smith, John,5.00\n", 1)]
    #[case::bad_balance_after_blank("1,A,1.00\n\n3,C,abc\n", 3)]
    fn test_read_records_malformed_line(#[case] input: &str, #[case] expected_line: u64) {
        let result = read_records(input.as_bytes(), 10);
        match result {
            Err(AtmError::StoreCorrupt { line, .. }) => assert_eq!(line, expected_line),
            other => panic!("Expected StoreCorrupt, got {:?}", other),
        }
    }

    #[test]
    fn test_write_records_formats_two_decimals() {
        let mut records = RecordSet::default();
        records
            .push(AccountRecord::new(1234, "Alice", Decimal::new(500, 0)))
            .unwrap();
        records
            .push(AccountRecord::new(42, "Mary Ann", Decimal::new(15, 1)))
            .unwrap();

        let mut output = Vec::new();
        write_records(&records, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(output_str, "1234,Alice,500.00\n42,Mary Ann,1.50\n");
    }

    #[test]
    fn test_write_records_empty_set() {
        let mut output = Vec::new();
        write_records(&RecordSet::default(), &mut output).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_written_records_read_back_identically() {
        let mut records = RecordSet::default();
        for (pin, name, cents) in [(1234, "Alice", 50000), (5678, "Bob", 1), (9, "Zed", 0)] {
            records
                .push(AccountRecord::new(pin, name, Decimal::new(cents, 2)))
                .unwrap();
        }

        let mut output = Vec::new();
        write_records(&records, &mut output).unwrap();
        let reloaded = read_records(output.as_slice(), 10).unwrap();

        assert_eq!(reloaded, records);
    }
}
