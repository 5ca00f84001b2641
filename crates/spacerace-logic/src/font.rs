//! 3×5 bitmap font used for bubble labels.
//!
//! Each glyph is five rows, top to bottom; bit 2 is the leftmost column.

pub const GLYPH_WIDTH: i32 = 3;
pub const GLYPH_HEIGHT: i32 = 5;
/// Horizontal cursor advance after a glyph.
pub const ADVANCE: i32 = GLYPH_WIDTH + 1;

type Glyph = [u8; 5];

const LETTERS: [Glyph; 26] = [
    [0b010, 0b101, 0b111, 0b101, 0b101], // A
    [0b110, 0b101, 0b110, 0b101, 0b110], // B
    [0b011, 0b100, 0b100, 0b100, 0b011], // C
    [0b110, 0b101, 0b101, 0b101, 0b110], // D
    [0b111, 0b100, 0b110, 0b100, 0b111], // E
    [0b111, 0b100, 0b110, 0b100, 0b100], // F
    [0b011, 0b100, 0b101, 0b101, 0b011], // G
    [0b101, 0b101, 0b111, 0b101, 0b101], // H
    [0b111, 0b010, 0b010, 0b010, 0b111], // I
    [0b001, 0b001, 0b001, 0b101, 0b010], // J
    [0b101, 0b101, 0b110, 0b101, 0b101], // K
    [0b100, 0b100, 0b100, 0b100, 0b111], // L
    [0b101, 0b111, 0b111, 0b101, 0b101], // M
    [0b110, 0b101, 0b101, 0b101, 0b101], // N
    [0b010, 0b101, 0b101, 0b101, 0b010], // O
    [0b110, 0b101, 0b110, 0b100, 0b100], // P
    [0b010, 0b101, 0b101, 0b110, 0b011], // Q
    [0b110, 0b101, 0b110, 0b101, 0b101], // R
    [0b011, 0b100, 0b010, 0b001, 0b110], // S
    [0b111, 0b010, 0b010, 0b010, 0b010], // T
    [0b101, 0b101, 0b101, 0b101, 0b111], // U
    [0b101, 0b101, 0b101, 0b101, 0b010], // V
    [0b101, 0b101, 0b111, 0b111, 0b101], // W
    [0b101, 0b101, 0b010, 0b101, 0b101], // X
    [0b101, 0b101, 0b010, 0b010, 0b010], // Y
    [0b111, 0b001, 0b010, 0b100, 0b111], // Z
];

const DIGITS: [Glyph; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b110, 0b001, 0b010, 0b100, 0b111],
    [0b110, 0b001, 0b010, 0b001, 0b110],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b110, 0b001, 0b110],
    [0b011, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b110],
];

/// Rows for `ch`, or `None` if the font has no glyph for it.
pub fn glyph(ch: char) -> Option<&'static Glyph> {
    match ch {
        'A'..='Z' => Some(&LETTERS[(ch as u8 - b'A') as usize]),
        'a'..='z' => Some(&LETTERS[(ch as u8 - b'a') as usize]),
        '0'..='9' => Some(&DIGITS[(ch as u8 - b'0') as usize]),
        _ => None,
    }
}

/// Pixel offsets set by `ch`, relative to its top-left cell.
pub fn lit_cells(ch: char) -> impl Iterator<Item = (i32, i32)> {
    glyph(ch).into_iter().flat_map(|rows| {
        rows.iter().enumerate().flat_map(|(row, bits)| {
            (0..GLYPH_WIDTH).filter_map(move |col| {
                let mask: u8 = 1 << (GLYPH_WIDTH - 1 - col);
                (*bits & mask != 0).then_some((col, row as i32))
            })
        })
    })
}
