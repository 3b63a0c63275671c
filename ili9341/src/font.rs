//! 8x8 bitmap font.
//!
//! One byte per row, top row first, most significant bit is the leftmost
//! pixel. Only a subset of printable ASCII carries a drawing; every other
//! printable code point resolves to [`BLANK_GLYPH`], which paints the whole
//! cell in the background color.

pub const GLYPH_WIDTH: u16 = 8;
pub const GLYPH_HEIGHT: u16 = 8;

/// Vertical distance between two text lines.
pub const LINE_ADVANCE: u16 = 10;

/// First and last code points accepted by the renderer.
pub const FIRST_PRINTABLE: char = ' ';
pub const LAST_PRINTABLE: char = '\x7F';

pub type Bitmap = [u8; GLYPH_HEIGHT as usize];

/// Drawing used for printable code points without an entry in the table.
pub const BLANK_GLYPH: Bitmap = [0x00; GLYPH_HEIGHT as usize];

const GLYPHS: &[(char, Bitmap)] = &[
    (' ', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('0', [0x38, 0x6C, 0xC6, 0xD6, 0xC6, 0x6C, 0x38, 0x00]),
    ('1', [0x30, 0x70, 0x30, 0x30, 0x30, 0x30, 0xFC, 0x00]),
    ('2', [0x78, 0xCC, 0x0C, 0x38, 0x60, 0xCC, 0xFC, 0x00]),
    ('3', [0x78, 0xCC, 0x0C, 0x38, 0x0C, 0xCC, 0x78, 0x00]),
    ('4', [0x1C, 0x3C, 0x6C, 0xCC, 0xFE, 0x0C, 0x1E, 0x00]),
    ('5', [0xFC, 0xC0, 0xF8, 0x0C, 0x0C, 0xCC, 0x78, 0x00]),
    ('6', [0x38, 0x60, 0xC0, 0xF8, 0xCC, 0xCC, 0x78, 0x00]),
    ('7', [0xFC, 0xCC, 0x0C, 0x18, 0x30, 0x30, 0x30, 0x00]),
    ('8', [0x78, 0xCC, 0xCC, 0x78, 0xCC, 0xCC, 0x78, 0x00]),
    ('9', [0x78, 0xCC, 0xCC, 0x7C, 0x0C, 0x18, 0x70, 0x00]),
    (':', [0x00, 0x30, 0x30, 0x00, 0x30, 0x30, 0x00, 0x00]),
    ('A', [0x30, 0x78, 0xCC, 0xCC, 0xFC, 0xCC, 0xCC, 0x00]),
    ('B', [0xFC, 0x66, 0x66, 0x7C, 0x66, 0x66, 0xFC, 0x00]),
    ('C', [0x3C, 0x66, 0xC0, 0xC0, 0xC0, 0x66, 0x3C, 0x00]),
    ('D', [0xF8, 0x6C, 0x66, 0x66, 0x66, 0x6C, 0xF8, 0x00]),
    ('E', [0xFE, 0x62, 0x68, 0x78, 0x68, 0x62, 0xFE, 0x00]),
    ('H', [0xCC, 0xCC, 0xCC, 0xFC, 0xCC, 0xCC, 0xCC, 0x00]),
    ('I', [0x78, 0x30, 0x30, 0x30, 0x30, 0x30, 0x78, 0x00]),
    ('L', [0xF0, 0x60, 0x60, 0x60, 0x62, 0x66, 0xFE, 0x00]),
    ('O', [0x38, 0x6C, 0xC6, 0xC6, 0xC6, 0x6C, 0x38, 0x00]),
    ('S', [0x78, 0xCC, 0x60, 0x30, 0x0C, 0xCC, 0x78, 0x00]),
    ('T', [0xFC, 0xB4, 0x30, 0x30, 0x30, 0x30, 0x78, 0x00]),
];

/// Whether `ch` is in the range the renderer draws at all.
#[inline]
pub fn is_printable(ch: char) -> bool {
    (FIRST_PRINTABLE..=LAST_PRINTABLE).contains(&ch)
}

/// Bitmap for `ch`, or `None` when `ch` is outside the printable range.
pub fn glyph(ch: char) -> Option<&'static Bitmap> {
    if !is_printable(ch) {
        return None;
    }
    let bitmap = GLYPHS
        .iter()
        .find(|(c, _)| *c == ch)
        .map_or(&BLANK_GLYPH, |(_, bitmap)| bitmap);
    Some(bitmap)
}

/// Row-major iterator over the 64 cells of `bitmap`, yielding `on` for set
/// bits and `off` for clear bits.
pub fn cells<'a, C: Copy + 'a>(
    bitmap: &'a Bitmap,
    on: C,
    off: C,
) -> impl Iterator<Item = C> + 'a {
    bitmap.iter().flat_map(move |row| {
        (0..GLYPH_WIDTH).map(move |col| if row & (0x80 >> col) != 0 { on } else { off })
    })
}
