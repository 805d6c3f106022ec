//! A1 notation helpers.
//!
//! Sheet titles are always quoted so titles containing spaces, `!` or digits
//! are unambiguous. Embedded single quotes are doubled.

/// Convert a 1-based column number to letters: 1 → "A", 26 → "Z", 27 → "AA".
pub fn column_letters(mut column: usize) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.push(b'A' + rem as u8);
        column = (column - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// `'Title'` with single quotes doubled.
pub fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Whole-sheet range.
pub fn sheet_range(title: &str) -> String {
    quote_title(title)
}

/// A full physical row, e.g. `'People'!1:1`.
pub fn row_range(title: &str, row: usize) -> String {
    format!("{}!{}:{}", quote_title(title), row, row)
}

/// A single cell from 1-based coordinates, e.g. `'People'!B3`.
pub fn cell_ref(title: &str, row: usize, column: usize) -> String {
    format!("{}!{}{}", quote_title(title), column_letters(column), row)
}
