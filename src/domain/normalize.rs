//! Column-name normalization for raw trade tables.
//!
//! Header labels are trimmed and matched case-insensitively against the
//! enumerated variants below. Variant lists are in priority order.

use crate::domain::error::PairsimError;
use crate::domain::trade::{pair_id, TradeRecord};
use chrono::{NaiveDate, NaiveDateTime};

/// Exit date wins over entry date, which wins over a plain date column.
pub const DATE_COLUMNS: &[&str] = &["Exit Date", "exit_date", "Entry Date", "entry_date", "Date"];
pub const PAIR_COLUMNS: &[&str] = &["pair_id", "Pair"];
pub const INSTRUMENT_1_COLUMNS: &[&str] = &["Stock1", "instrument_1", "Symbol1"];
pub const INSTRUMENT_2_COLUMNS: &[&str] = &["Stock2", "instrument_2", "Symbol2"];
pub const NET_RETURN_COLUMNS: &[&str] = &["Net Return", "net_return"];

/// `%.f` also accepts a time with no fractional part.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Positions of the canonical fields within a raw header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub pair_id: Option<usize>,
    pub instrument_1: usize,
    pub instrument_2: usize,
    pub net_return: usize,
}

fn find_column<S: AsRef<str>>(headers: &[S], variants: &[&str]) -> Option<usize> {
    variants.iter().find_map(|variant| {
        headers
            .iter()
            .position(|h| h.as_ref().trim().eq_ignore_ascii_case(variant))
    })
}

fn require_column<S: AsRef<str>>(
    headers: &[S],
    variants: &[&str],
    field: &str,
) -> Result<usize, PairsimError> {
    find_column(headers, variants).ok_or_else(|| {
        let available: Vec<&str> = headers.iter().map(|h| h.as_ref().trim()).collect();
        PairsimError::Schema {
            reason: format!(
                "no {} column (expected one of: {}); available: [{}]",
                field,
                variants.join(", "),
                available.join(", ")
            ),
        }
    })
}

pub fn normalize_headers<S: AsRef<str>>(headers: &[S]) -> Result<ColumnMap, PairsimError> {
    Ok(ColumnMap {
        date: require_column(headers, DATE_COLUMNS, "date")?,
        pair_id: find_column(headers, PAIR_COLUMNS),
        instrument_1: require_column(headers, INSTRUMENT_1_COLUMNS, "first instrument")?,
        instrument_2: require_column(headers, INSTRUMENT_2_COLUMNS, "second instrument")?,
        net_return: require_column(headers, NET_RETURN_COLUMNS, "net return")?,
    })
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn field<'a, S: AsRef<str>>(
    fields: &'a [S],
    row: usize,
    index: usize,
    column: &str,
) -> Result<&'a str, PairsimError> {
    fields
        .get(index)
        .map(|f| f.as_ref().trim())
        .ok_or_else(|| PairsimError::MalformedRecord {
            row,
            column: column.to_string(),
            reason: "missing field".into(),
        })
}

impl ColumnMap {
    /// Builds a trade from one data row. `row` is the 1-based data row number
    /// used in error messages.
    pub fn parse_row<S: AsRef<str>>(
        &self,
        fields: &[S],
        row: usize,
    ) -> Result<TradeRecord, PairsimError> {
        let instrument_1 = field(fields, row, self.instrument_1, "instrument_1")?.to_string();
        let instrument_2 = field(fields, row, self.instrument_2, "instrument_2")?.to_string();

        let pair = match self.pair_id {
            Some(index) => field(fields, row, index, "pair_id")?.to_string(),
            None => pair_id(&instrument_1, &instrument_2),
        };

        let date_str = field(fields, row, self.date, "date")?;
        let date = parse_timestamp(date_str).ok_or_else(|| PairsimError::MalformedRecord {
            row,
            column: "date".into(),
            reason: format!("unrecognized date '{}'", date_str),
        })?;

        let return_str = field(fields, row, self.net_return, "net_return")?;
        let net_return = return_str
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite())
            .ok_or_else(|| PairsimError::MalformedRecord {
                row,
                column: "net_return".into(),
                reason: format!("not a number: '{}'", return_str),
            })?;

        Ok(TradeRecord {
            pair_id: pair,
            instrument_1,
            instrument_2,
            date,
            net_return,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_whitespace_from_labels() {
        let headers = [" Stock1 ", "Stock2", " Exit Date", "Net Return  "];
        let map = normalize_headers(&headers).unwrap();
        assert_eq!(map.instrument_1, 0);
        assert_eq!(map.instrument_2, 1);
        assert_eq!(map.date, 2);
        assert_eq!(map.net_return, 3);
        assert_eq!(map.pair_id, None);
    }

    #[test]
    fn exit_date_preferred_over_entry_date() {
        let headers = ["Entry Date", "Exit Date", "Stock1", "Stock2", "Net Return"];
        let map = normalize_headers(&headers).unwrap();
        assert_eq!(map.date, 1);
    }

    #[test]
    fn entry_date_used_when_no_exit_date() {
        let headers = ["Stock1", "Stock2", "Entry Date", "Net Return"];
        let map = normalize_headers(&headers).unwrap();
        assert_eq!(map.date, 2);
    }

    #[test]
    fn plain_date_column_accepted() {
        let headers = ["date", "stock1", "stock2", "net_return"];
        let map = normalize_headers(&headers).unwrap();
        assert_eq!(map.date, 0);
    }

    #[test]
    fn pair_column_variants() {
        let map = normalize_headers(&["pair_id", "Stock1", "Stock2", "Date", "Net Return"]).unwrap();
        assert_eq!(map.pair_id, Some(0));
        let map = normalize_headers(&["Stock1", "Stock2", "Pair", "Date", "Net Return"]).unwrap();
        assert_eq!(map.pair_id, Some(2));
    }

    #[test]
    fn missing_date_column_is_schema_error() {
        let err = normalize_headers(&["Stock1", "Stock2", "Net Return"]).unwrap_err();
        match err {
            PairsimError::Schema { reason } => {
                assert!(reason.contains("date"));
                assert!(reason.contains("Stock1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_instrument_column_is_schema_error() {
        let err = normalize_headers(&["pair_id", "Stock1", "Date", "Net Return"]).unwrap_err();
        assert!(matches!(err, PairsimError::Schema { .. }));
    }

    #[test]
    fn missing_return_column_is_schema_error() {
        let err = normalize_headers(&["Stock1", "Stock2", "Date"]).unwrap_err();
        assert!(matches!(err, PairsimError::Schema { .. }));
    }

    #[test]
    fn parse_row_synthesizes_pair_id() {
        let map = normalize_headers(&["Stock1", "Stock2", "Exit Date", "Net Return"]).unwrap();
        let trade = map
            .parse_row(&["KO", "PEP", "2024-03-01", "0.0125"], 1)
            .unwrap();
        assert_eq!(trade.pair_id, "KO - PEP");
        assert_eq!(trade.net_return, 0.0125);
        assert_eq!(
            trade.date,
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn parse_row_keeps_native_pair_id() {
        let map = normalize_headers(&["pair_id", "Stock1", "Stock2", "Date", "Net Return"]).unwrap();
        let trade = map
            .parse_row(&["KO/PEP", "KO", "PEP", "2024-03-01 15:30:00", "-0.01"], 1)
            .unwrap();
        assert_eq!(trade.pair_id, "KO/PEP");
    }

    #[test]
    fn parse_row_rejects_non_numeric_return() {
        let map = normalize_headers(&["Stock1", "Stock2", "Date", "Net Return"]).unwrap();
        let err = map.parse_row(&["KO", "PEP", "2024-03-01", "n/a"], 7).unwrap_err();
        assert!(matches!(err, PairsimError::MalformedRecord { row: 7, .. }));

        let err = map.parse_row(&["KO", "PEP", "2024-03-01", ""], 2).unwrap_err();
        assert!(matches!(err, PairsimError::MalformedRecord { row: 2, .. }));

        let err = map.parse_row(&["KO", "PEP", "2024-03-01", "NaN"], 3).unwrap_err();
        assert!(matches!(err, PairsimError::MalformedRecord { row: 3, .. }));
    }

    #[test]
    fn parse_row_rejects_bad_date() {
        let map = normalize_headers(&["Stock1", "Stock2", "Date", "Net Return"]).unwrap();
        let err = map.parse_row(&["KO", "PEP", "March 1st", "0.01"], 1).unwrap_err();
        assert!(matches!(err, PairsimError::MalformedRecord { .. }));
    }

    #[test]
    fn parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-02").is_some());
        assert!(parse_timestamp("2024-01-02 09:30:00").is_some());
        assert!(parse_timestamp("2024-01-02T09:30:00").is_some());
        assert!(parse_timestamp("2024-01-02 09:30").is_some());
        assert!(parse_timestamp("02/01/2024").is_none());
    }

    #[test]
    fn parse_timestamp_fractional_seconds() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-01-02 09:30:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-02T09:30:00.000000"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-01-02 09:30:00.250"),
            expected.checked_add_signed(chrono::Duration::milliseconds(250))
        );
    }
}
