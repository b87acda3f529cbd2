//! The bitmap glyph catalog.
//!
//! Every glyph is drawn on a 5x7 pixel base cell. A cell is stored column by column, one byte per
//! column, with bit 0 being the top pixel row. The larger scales are integer upscalings of the
//! same cells (10x14, 15x21 and 20x28 pixels), built at compile time, so that a glyph at scale `k`
//! occupies exactly `k` panel pages. For those scales each column is a `u32` whose byte `h` holds
//! the eight pixels that fall on page row `h` of the glyph.
//!
//! Coverage deliberately shrinks as the scale grows; the large scales only need to show numbers
//! and a handful of words such as "NO", "YES" and "END".

/// Pixel columns in a base glyph cell.
pub const CELL_WIDTH: usize = 5;
/// Pixel rows in a base glyph cell.
pub const CELL_HEIGHT: usize = 7;

/// One of the four fixed glyph sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scale {
    /// 5x7 pixel glyphs, one page high. Full alphanumeric coverage.
    Single,
    /// 10x14 pixel glyphs, two pages high. Digits and `' ' . , -` only.
    Double,
    /// 15x21 pixel glyphs, three pages high. Digits, `E N O S Y` and `' ' . , : -`.
    Triple,
    /// 20x28 pixel glyphs, four pages high. Same coverage as `Triple`.
    Quadruple,
}

impl Scale {
    /// The integer upscaling factor relative to the base cell.
    pub const fn factor(self) -> u8 {
        match self {
            Scale::Single => 1,
            Scale::Double => 2,
            Scale::Triple => 3,
            Scale::Quadruple => 4,
        }
    }

    /// Height of a glyph in panel pages.
    pub const fn pages(self) -> u8 {
        self.factor()
    }

    /// Number of lit (data carrying) columns in a glyph.
    pub const fn width(self) -> u8 {
        CELL_WIDTH as u8 * self.factor()
    }

    /// Number of blank columns written after each glyph.
    pub const fn gap(self) -> u8 {
        self.factor()
    }

    /// Horizontal distance between the starts of two consecutive glyphs.
    pub const fn pitch(self) -> u8 {
        self.width() + self.gap()
    }

    /// Look up the glyph for the byte `ch`. Bytes without a glyph at this scale resolve to the
    /// scale's placeholder glyph.
    pub fn glyph(self, ch: u8) -> Glyph {
        let columns: &'static [u32] = match self {
            Scale::Single => match ch {
                b'0'..=b'9' => &SINGLE_DIGITS[(ch - b'0') as usize],
                b'A'..=b'Z' => &SINGLE_UPPER[(ch - b'A') as usize],
                b'a'..=b'z' => &SINGLE_LOWER[(ch - b'a') as usize],
                _ => &SINGLE_SYMBOLS[symbol_index(SINGLE_PUNCTUATION, ch)],
            },
            Scale::Double => match ch {
                b'0'..=b'9' => &DOUBLE_DIGITS[(ch - b'0') as usize],
                _ => &DOUBLE_SYMBOLS[symbol_index(DOUBLE_PUNCTUATION, ch)],
            },
            Scale::Triple => match ch {
                b'0'..=b'9' => &TRIPLE_DIGITS[(ch - b'0') as usize],
                _ => match LARGE_LETTERS.iter().position(|&l| l == ch) {
                    Some(i) => &TRIPLE_LETTERS[i],
                    None => &TRIPLE_SYMBOLS[symbol_index(LARGE_PUNCTUATION, ch)],
                },
            },
            Scale::Quadruple => match ch {
                b'0'..=b'9' => &QUADRUPLE_DIGITS[(ch - b'0') as usize],
                _ => match LARGE_LETTERS.iter().position(|&l| l == ch) {
                    Some(i) => &QUADRUPLE_LETTERS[i],
                    None => &QUADRUPLE_SYMBOLS[symbol_index(LARGE_PUNCTUATION, ch)],
                },
            },
        };
        Glyph { columns }
    }

    /// The glyph rendered for characters this scale cannot show.
    pub fn placeholder(self) -> Glyph {
        let columns: &'static [u32] = match self {
            Scale::Single => &SINGLE_SYMBOLS[0],
            Scale::Double => &DOUBLE_SYMBOLS[0],
            Scale::Triple => &TRIPLE_SYMBOLS[0],
            Scale::Quadruple => &QUADRUPLE_SYMBOLS[0],
        };
        Glyph { columns }
    }

    /// The blank glyph used as field filler.
    pub fn space(self) -> Glyph {
        self.glyph(b' ')
    }
}

/// A glyph at one scale: the column values of its bitmap, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    columns: &'static [u32],
}

impl Glyph {
    /// Number of lit columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Raw column values. Byte `h` of each value is the column's slice on page row `h`.
    pub fn columns(&self) -> &'static [u32] {
        self.columns
    }

    /// The byte of column `column` that lands on page row `row` of the glyph.
    pub fn page_byte(&self, column: usize, row: u8) -> u8 {
        (self.columns[column] >> (8 * row as u32)) as u8
    }
}

/// Map a punctuation byte to its row in a symbol table, whose row 0 is the placeholder.
fn symbol_index(set: &[u8], ch: u8) -> usize {
    set.iter().position(|&s| s == ch).map_or(0, |i| i + 1)
}

type Cell = [u8; CELL_WIDTH];

/// Upscale a base cell by `k` in both directions. `W` must be `CELL_WIDTH * k`.
const fn upscale<const W: usize>(cell: &Cell, k: usize) -> [u32; W] {
    let mut out = [0u32; W];
    let mut x = 0;
    while x < W {
        let src = cell[x / k];
        let mut y = 0;
        while y < CELL_HEIGHT {
            if (src >> y) & 1 != 0 {
                let mut dy = 0;
                while dy < k {
                    out[x] |= 1u32 << (y * k + dy);
                    dy += 1;
                }
            }
            y += 1;
        }
        x += 1;
    }
    out
}

const fn upscale_all<const N: usize, const W: usize>(cells: &[Cell; N], k: usize) -> [[u32; W]; N] {
    let mut out = [[0u32; W]; N];
    let mut i = 0;
    while i < N {
        out[i] = upscale(&cells[i], k);
        i += 1;
    }
    out
}

const UNKNOWN: Cell = [0x7F, 0x41, 0x41, 0x41, 0x7F];
const SPACE: Cell = [0x00, 0x00, 0x00, 0x00, 0x00];
const PERIOD: Cell = [0x00, 0x60, 0x60, 0x00, 0x00];
const COMMA: Cell = [0x00, 0x50, 0x30, 0x00, 0x00];
const COLON: Cell = [0x00, 0x36, 0x36, 0x00, 0x00];
const MINUS: Cell = [0x08, 0x08, 0x08, 0x08, 0x08];

const DIGITS: [Cell; 10] = [
    [0x3E, 0x51, 0x49, 0x45, 0x3E],
    [0x00, 0x42, 0x7F, 0x40, 0x00],
    [0x42, 0x61, 0x51, 0x49, 0x46],
    [0x21, 0x41, 0x45, 0x4B, 0x31],
    [0x18, 0x14, 0x12, 0x7F, 0x10],
    [0x27, 0x45, 0x45, 0x45, 0x39],
    [0x3C, 0x4A, 0x49, 0x49, 0x30],
    [0x01, 0x71, 0x09, 0x05, 0x03],
    [0x36, 0x49, 0x49, 0x49, 0x36],
    [0x06, 0x49, 0x49, 0x29, 0x1E],
];

const UPPER: [Cell; 26] = [
    [0x7E, 0x11, 0x11, 0x11, 0x7E],
    [0x7F, 0x49, 0x49, 0x49, 0x36],
    [0x3E, 0x41, 0x41, 0x41, 0x22],
    [0x7F, 0x41, 0x41, 0x22, 0x1C],
    [0x7F, 0x49, 0x49, 0x49, 0x41],
    [0x7F, 0x09, 0x09, 0x01, 0x01],
    [0x3E, 0x41, 0x41, 0x51, 0x32],
    [0x7F, 0x08, 0x08, 0x08, 0x7F],
    [0x00, 0x41, 0x7F, 0x41, 0x00],
    [0x20, 0x40, 0x41, 0x3F, 0x01],
    [0x7F, 0x08, 0x14, 0x22, 0x41],
    [0x7F, 0x40, 0x40, 0x40, 0x40],
    [0x7F, 0x02, 0x04, 0x02, 0x7F],
    [0x7F, 0x04, 0x08, 0x10, 0x7F],
    [0x3E, 0x41, 0x41, 0x41, 0x3E],
    [0x7F, 0x09, 0x09, 0x09, 0x06],
    [0x3E, 0x41, 0x51, 0x21, 0x5E],
    [0x7F, 0x09, 0x19, 0x29, 0x46],
    [0x46, 0x49, 0x49, 0x49, 0x31],
    [0x01, 0x01, 0x7F, 0x01, 0x01],
    [0x3F, 0x40, 0x40, 0x40, 0x3F],
    [0x1F, 0x20, 0x40, 0x20, 0x1F],
    [0x7F, 0x20, 0x18, 0x20, 0x7F],
    [0x63, 0x14, 0x08, 0x14, 0x63],
    [0x03, 0x04, 0x78, 0x04, 0x03],
    [0x61, 0x51, 0x49, 0x45, 0x43],
];

const LOWER: [Cell; 26] = [
    [0x20, 0x54, 0x54, 0x54, 0x78],
    [0x7F, 0x48, 0x44, 0x44, 0x38],
    [0x38, 0x44, 0x44, 0x44, 0x20],
    [0x38, 0x44, 0x44, 0x48, 0x7F],
    [0x38, 0x54, 0x54, 0x54, 0x18],
    [0x08, 0x7E, 0x09, 0x01, 0x02],
    [0x0C, 0x52, 0x52, 0x52, 0x3E],
    [0x7F, 0x08, 0x04, 0x04, 0x78],
    [0x00, 0x44, 0x7D, 0x40, 0x00],
    [0x20, 0x40, 0x44, 0x3D, 0x00],
    [0x7F, 0x10, 0x28, 0x44, 0x00],
    [0x00, 0x41, 0x7F, 0x40, 0x00],
    [0x7C, 0x04, 0x18, 0x04, 0x78],
    [0x7C, 0x08, 0x04, 0x04, 0x78],
    [0x38, 0x44, 0x44, 0x44, 0x38],
    [0x7C, 0x14, 0x14, 0x14, 0x08],
    [0x08, 0x14, 0x14, 0x18, 0x7C],
    [0x7C, 0x08, 0x04, 0x04, 0x08],
    [0x48, 0x54, 0x54, 0x54, 0x20],
    [0x04, 0x3F, 0x44, 0x40, 0x20],
    [0x3C, 0x40, 0x40, 0x20, 0x7C],
    [0x1C, 0x20, 0x40, 0x20, 0x1C],
    [0x3C, 0x40, 0x30, 0x40, 0x3C],
    [0x44, 0x28, 0x10, 0x28, 0x44],
    [0x0C, 0x50, 0x50, 0x50, 0x3C],
    [0x44, 0x64, 0x54, 0x4C, 0x44],
];

// '#' is drawn as a degree sign, it only ever appears in unit labels.
const SINGLE_PUNCTUATION: &[u8] = b" .,:-;+_%/#?><";
const SINGLE_SYMBOL_CELLS: [Cell; 15] = [
    UNKNOWN,
    SPACE,
    PERIOD,
    COMMA,
    COLON,
    MINUS,
    [0x00, 0x56, 0x36, 0x00, 0x00],
    [0x08, 0x08, 0x3E, 0x08, 0x08],
    [0x40, 0x40, 0x40, 0x40, 0x40],
    [0x23, 0x13, 0x08, 0x64, 0x62],
    [0x20, 0x10, 0x08, 0x04, 0x02],
    [0x00, 0x06, 0x09, 0x09, 0x06],
    [0x02, 0x01, 0x51, 0x09, 0x06],
    [0x41, 0x22, 0x14, 0x08, 0x00],
    [0x00, 0x08, 0x14, 0x22, 0x41],
];

const DOUBLE_PUNCTUATION: &[u8] = b" .,-";
const DOUBLE_SYMBOL_CELLS: [Cell; 5] = [UNKNOWN, SPACE, PERIOD, COMMA, MINUS];

const LARGE_PUNCTUATION: &[u8] = b" .,:-";
const LARGE_SYMBOL_CELLS: [Cell; 6] = [UNKNOWN, SPACE, PERIOD, COMMA, COLON, MINUS];
const LARGE_LETTERS: &[u8] = b"ENOSY";
const LARGE_LETTER_CELLS: [Cell; 5] = [UPPER[4], UPPER[13], UPPER[14], UPPER[18], UPPER[24]];

static SINGLE_DIGITS: [[u32; 5]; 10] = upscale_all(&DIGITS, 1);
static SINGLE_UPPER: [[u32; 5]; 26] = upscale_all(&UPPER, 1);
static SINGLE_LOWER: [[u32; 5]; 26] = upscale_all(&LOWER, 1);
static SINGLE_SYMBOLS: [[u32; 5]; 15] = upscale_all(&SINGLE_SYMBOL_CELLS, 1);

static DOUBLE_DIGITS: [[u32; 10]; 10] = upscale_all(&DIGITS, 2);
static DOUBLE_SYMBOLS: [[u32; 10]; 5] = upscale_all(&DOUBLE_SYMBOL_CELLS, 2);

static TRIPLE_DIGITS: [[u32; 15]; 10] = upscale_all(&DIGITS, 3);
static TRIPLE_LETTERS: [[u32; 15]; 5] = upscale_all(&LARGE_LETTER_CELLS, 3);
static TRIPLE_SYMBOLS: [[u32; 15]; 6] = upscale_all(&LARGE_SYMBOL_CELLS, 3);

static QUADRUPLE_DIGITS: [[u32; 20]; 10] = upscale_all(&DIGITS, 4);
static QUADRUPLE_LETTERS: [[u32; 20]; 5] = upscale_all(&LARGE_LETTER_CELLS, 4);
static QUADRUPLE_SYMBOLS: [[u32; 20]; 6] = upscale_all(&LARGE_SYMBOL_CELLS, 4);
