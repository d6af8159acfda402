//! Embedded 5x7 bitmap font for label chips.
//!
//! Uppercase ASCII letters only; lowercase input is folded to uppercase and
//! anything else renders as a blank cell. Each glyph is seven rows, the low
//! five bits of each row are the pixels, most significant bit leftmost.

/// Glyph width in cells.
pub const GLYPH_COLUMNS: usize = 5;
/// Glyph height in cells.
pub const GLYPH_ROWS: usize = 7;
/// Horizontal advance per character in cells (glyph plus one cell of spacing).
pub const ADVANCE: usize = GLYPH_COLUMNS + 1;

const LETTERS: [[u8; GLYPH_ROWS]; 26] = [
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // C
    [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110], // D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // F
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // G
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // H
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // I
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // J
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // K
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // L
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001], // M
    [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001], // N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // P
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // Q
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // R
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010], // W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // X
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100], // Y
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // Z
];

/// Rows for `c`, or `None` for characters drawn as blank space.
pub fn glyph(c: char) -> Option<&'static [u8; GLYPH_ROWS]> {
    let upper = c.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Some(&LETTERS[(upper as u8 - b'A') as usize])
    } else {
        None
    }
}

/// Size of one font cell for text `size` pixels tall.
#[inline]
pub fn cell_size(size: f32) -> f32 {
    size / GLYPH_ROWS as f32
}

/// Width of `text` drawn `size` pixels tall (no trailing spacing).
pub fn text_width(text: &str, size: f32) -> f32 {
    let chars = text.chars().count();
    if chars == 0 {
        return 0.0;
    }
    (chars * ADVANCE - 1) as f32 * cell_size(size)
}

/// Lit cells of `text` as `(column, row)` pairs, columns counted across the
/// whole run.
pub fn lit_cells(text: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    text.chars().enumerate().flat_map(|(index, c)| {
        glyph(c).into_iter().flat_map(move |rows| {
            rows.iter().enumerate().flat_map(move |(row, bits)| {
                (0..GLYPH_COLUMNS)
                    .filter(move |col| bits & (1 << (GLYPH_COLUMNS - 1 - col)) != 0)
                    .map(move |col| (index * ADVANCE + col, row))
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(glyph('a'), glyph('A'));
        assert!(glyph('z').is_some());
        assert!(glyph(' ').is_none());
        assert!(glyph('7').is_none());
    }

    #[test]
    fn test_glyphs_fit_five_columns() {
        for rows in LETTERS.iter() {
            assert!(rows.iter().all(|r| *r < 32));
            assert!(rows.iter().any(|r| *r != 0));
        }
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 14.0), 0.0);
        assert_eq!(text_width("A", 14.0), 10.0);
        assert_eq!(text_width("AB", 14.0), 22.0);
    }

    #[test]
    fn test_lit_cells_offsets_by_advance() {
        let t: Vec<_> = lit_cells("T").collect();
        let tt: Vec<_> = lit_cells("TT").collect();
        assert_eq!(t.len() * 2, tt.len());
        assert!(t.contains(&(0, 0)) && t.contains(&(2, 6)));
        assert!(tt.contains(&(ADVANCE + 2, 6)));
        assert_eq!(lit_cells(" ").count(), 0);
    }
}
