//! Property Tests for the row formatter
//!
//! Invariants that must hold for any grid.

use proptest::prelude::*;
use xlsxtxt::{convert, CellValue, ColumnRule, Row};

fn cell_strategy() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Empty),
        "[a-y0-9,. /-]{0,8}".prop_map(CellValue::Text),
        (-1.0e9f64..1.0e9f64).prop_map(CellValue::Number),
        any::<bool>().prop_map(CellValue::Bool),
    ]
}

fn row_strategy() -> impl Strategy<Value = Row> {
    prop::collection::vec(cell_strategy(), 0..14)
}

fn data_rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(row_strategy(), 0..12)
}

fn with_header(header: Row, rows: Vec<Row>) -> Vec<Row> {
    let mut grid = vec![header];
    grid.extend(rows);
    grid
}

proptest! {
    #[test]
    fn output_always_ends_with_exactly_one_newline(rows in data_rows_strategy()) {
        let text = convert(&with_header(vec![CellValue::from("h")], rows));
        prop_assert!(text.ends_with('\n'));
        prop_assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn header_never_appears(rows in data_rows_strategy()) {
        let header = vec![CellValue::from("ZZHEADER"), CellValue::from("ZZOTHER")];
        let text = convert(&with_header(header, rows));
        prop_assert!(!text.contains("ZZ"));
    }

    #[test]
    fn one_line_per_non_blank_row(rows in data_rows_strategy()) {
        let expected = rows
            .iter()
            .filter(|row| !row.iter().all(CellValue::is_blank))
            .count();
        let text = convert(&with_header(Vec::new(), rows));

        if expected == 0 {
            prop_assert_eq!(text, "\n");
        } else {
            prop_assert_eq!(text.matches('\n').count(), expected);
        }
    }

    #[test]
    fn cells_per_line_match_row_length(row in row_strategy()) {
        prop_assume!(!row.iter().all(CellValue::is_blank));
        let length = row.len();
        let text = convert(&[Vec::new(), row]);
        let line = text.trim_end_matches('\n');
        prop_assert_eq!(line.split(';').count(), length);
    }

    #[test]
    fn decimal_columns_have_two_fraction_digits(value in -1.0e12f64..1.0e12f64) {
        for column in [1usize, 8] {
            let formatted = ColumnRule::for_column(column).apply(&CellValue::Number(value));
            let (_, fraction) = formatted.split_once('.').expect("decimal point");
            prop_assert_eq!(fraction.len(), 2);
            prop_assert!(fraction.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn padded_ids_have_minimum_width(value in 1u64..10_000_000_000_000u64) {
        let formatted = ColumnRule::for_column(6).apply(&CellValue::Number(value as f64));
        prop_assert_eq!(formatted.len(), 13);
        prop_assert!(formatted.chars().all(|c| c.is_ascii_digit()));
        prop_assert_eq!(formatted.trim_start_matches('0'), value.to_string());
    }

    #[test]
    fn integer_column_round_trips_integer_text(value in -1_000_000i64..1_000_000i64) {
        let formatted = ColumnRule::for_column(0).apply(&CellValue::from(value.to_string()));
        prop_assert_eq!(formatted, value.to_string());
    }
}
