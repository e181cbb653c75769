//! Delimited-text result sink.
//!
//! Formatting lives in one place so the search code stays clean and the
//! observable file layout is easy to pin down in tests: one row per record,
//! no header, fixed column order
//! `[time_of_flight, epoch, best_cost, revolutions]`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::eval::ResultRecord;

/// Default column delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// Default significant digits per numeric column. Seventeen digits
/// round-trip any `f64` exactly.
pub const DEFAULT_PRECISION: usize = 17;

/// Formats one record as a delimited row (no trailing newline).
///
/// Float columns use scientific notation with `precision` significant
/// digits. An invalid record writes its sentinel cost as `inf` and `-1` in
/// the revolution column.
pub fn format_record(record: &ResultRecord, delimiter: char, precision: usize) -> String {
    let digits = precision.saturating_sub(1);
    let revolutions = match record.revolutions {
        Some(revolutions) => revolutions as i64,
        None => -1,
    };
    format!(
        "{:.digits$e}{delimiter}{:.digits$e}{delimiter}{:.digits$e}{delimiter}{revolutions}",
        record.time_of_flight, record.epoch, record.best_cost,
    )
}

/// Writes an ordered record stream to `writer`, one row per record.
pub fn write_records<W: Write>(
    writer: &mut W,
    records: &[ResultRecord],
    delimiter: char,
    precision: usize,
) -> io::Result<()> {
    for record in records {
        writeln!(writer, "{}", format_record(record, delimiter, precision))?;
    }
    Ok(())
}

/// Writes an ordered record stream to a file at `path`.
///
/// A campaign writes three such files: baseline, low-order, high-order.
pub fn write_records_to_path(
    path: impl AsRef<Path>,
    records: &[ResultRecord],
    delimiter: char,
    precision: usize,
) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_records(&mut writer, records, delimiter, precision)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::GridPoint;

    fn record() -> ResultRecord {
        ResultRecord::new(
            GridPoint {
                epoch: 7304.5,
                time_of_flight: 580.0,
            },
            12.345678901234567,
            2,
        )
    }

    #[test]
    fn row_has_fixed_column_order() {
        let row = format_record(&record(), ',', 17);
        let columns: Vec<&str> = row.split(',').collect();
        assert_eq!(columns.len(), 4);
        assert_eq!(columns[0].parse::<f64>().unwrap(), 580.0);
        assert_eq!(columns[1].parse::<f64>().unwrap(), 7304.5);
        assert_eq!(columns[2].parse::<f64>().unwrap(), 12.345678901234567);
        assert_eq!(columns[3], "2");
    }

    #[test]
    fn default_precision_round_trips_exactly() {
        let row = format_record(&record(), DEFAULT_DELIMITER, DEFAULT_PRECISION);
        let columns: Vec<&str> = row.split(DEFAULT_DELIMITER).collect();
        let cost: f64 = columns[2].parse().unwrap();
        assert_eq!(cost.to_bits(), 12.345678901234567f64.to_bits());
    }

    #[test]
    fn invalid_record_writes_sentinels() {
        let invalid = ResultRecord::invalid(GridPoint {
            epoch: 1.0,
            time_of_flight: 2.0,
        });
        let row = format_record(&invalid, ',', 17);
        let columns: Vec<&str> = row.split(',').collect();
        assert_eq!(columns[2], "inf");
        assert_eq!(columns[3], "-1");
    }

    #[test]
    fn custom_delimiter_is_respected() {
        let row = format_record(&record(), '\t', 6);
        assert_eq!(row.split('\t').count(), 4);
        assert!(!row.contains(','));
    }

    #[test]
    fn stream_writes_one_row_per_record_without_header() {
        let records = vec![
            record(),
            ResultRecord::invalid(GridPoint {
                epoch: 1.0,
                time_of_flight: 2.0,
            }),
        ];
        let mut buffer = Vec::new();
        write_records(&mut buffer, &records, ',', 17).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        // First column of the first line is numeric: there is no header row.
        assert!(lines[0].split(',').next().unwrap().parse::<f64>().is_ok());
    }

    #[test]
    fn empty_stream_writes_empty_output() {
        let mut buffer = Vec::new();
        write_records(&mut buffer, &[], ',', 17).unwrap();
        assert!(buffer.is_empty());
    }
}
