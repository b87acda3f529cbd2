//! The word-packed framebuffer, the panel geometry it is laid out for, and the write cursor.
//!
//! Pixel column `c` of page `p` lives in word `c / 4 + p * (columns / 4)`, in byte lane `c % 4`
//! (bits `8 * (c % 4)` to `8 * (c % 4) + 7`). Read back in little-endian byte order, each page of
//! words is exactly the byte sequence the controller expects for that page, so flushing needs no
//! transformation.

use itertools::iproduct;

use crate::command::consts::{NUM_PAGES, NUM_PIXEL_COLS};

/// Words of backing storage, enough for the largest panel the controller supports.
const MAX_WORDS: usize = NUM_PAGES as usize * NUM_PIXEL_COLS as usize / 4;

/// The shape of the panel: how many pages it has and how many pixel columns each page holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    pages: u8,
    columns: u8,
}

impl Geometry {
    /// A 128x32 module, four pages.
    pub const SIZE_128X32: Geometry = Geometry {
        pages: 4,
        columns: 128,
    };

    /// A 128x64 module, eight pages.
    pub const SIZE_128X64: Geometry = Geometry {
        pages: 8,
        columns: 128,
    };

    /// Describe a panel of `pages` pages by `columns` pixel columns. Panics if the controller
    /// cannot drive that shape, or if `columns` is not a whole number of packed words.
    pub fn new(pages: u8, columns: u8) -> Self {
        if false
            || pages == 0
            || columns == 0
            || pages > NUM_PAGES
            || columns > NUM_PIXEL_COLS
            || columns % 4 != 0
        {
            panic!("Panel geometry not supported by SSD1306.");
        }
        Geometry { pages, columns }
    }

    pub const fn pages(&self) -> u8 {
        self.pages
    }

    pub const fn columns(&self) -> u8 {
        self.columns
    }

    /// Pixel rows, eight per page.
    pub const fn pixel_rows(&self) -> u8 {
        self.pages * 8
    }

    /// Packed words holding one page.
    pub const fn words_per_page(&self) -> usize {
        self.columns as usize / 4
    }

    /// Packed words holding the whole panel.
    pub const fn words(&self) -> usize {
        self.pages as usize * self.words_per_page()
    }
}

/// The current write position. `column` may equal the panel width after a blit runs off the
/// right edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    pub(crate) page: u8,
    pub(crate) column: u8,
}

impl Cursor {
    pub fn page(&self) -> u8 {
        self.page
    }

    pub fn column(&self) -> u8 {
        self.column
    }

    /// Move to (`page`, `column`), clamping each coordinate to the last valid index. Returns
    /// whether both requested coordinates were in range.
    pub fn set(&mut self, geometry: &Geometry, page: u8, column: u8) -> bool {
        let page_ok = self.set_page(geometry, page);
        let column_ok = self.set_column(geometry, column);
        page_ok && column_ok
    }

    /// Move to `page`, clamping to the last page. Returns whether `page` was in range.
    pub fn set_page(&mut self, geometry: &Geometry, page: u8) -> bool {
        self.page = page.min(geometry.pages - 1);
        self.page == page
    }

    /// Move to `column`, clamping to the last column. Returns whether `column` was in range.
    pub fn set_column(&mut self, geometry: &Geometry, column: u8) -> bool {
        self.column = column.min(geometry.columns - 1);
        self.column == column
    }
}

/// The packed pixel state of the whole panel.
#[derive(Clone)]
pub struct Framebuffer {
    geometry: Geometry,
    words: [u32; MAX_WORDS],
}

impl Framebuffer {
    /// A blank framebuffer for a panel of shape `geometry`.
    pub fn new(geometry: Geometry) -> Self {
        Framebuffer {
            geometry,
            words: [0; MAX_WORDS],
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Word index and lane shift of pixel column `column` on page `page`.
    fn locate(&self, page: u8, column: u8) -> (usize, u32) {
        let word = column as usize / 4 + page as usize * self.geometry.words_per_page();
        let shift = (column % 4) as u32 * 8;
        (word, shift)
    }

    /// Replace the 8 pixels of column `column` on page `page` with `byte`. This is the only
    /// operation that changes pixel state.
    pub fn write_column(&mut self, page: u8, column: u8, byte: u8) {
        debug_assert!(page < self.geometry.pages && column < self.geometry.columns);
        let (word, shift) = self.locate(page, column);
        let mask = 0xFFu32 << shift;
        self.words[word] = (self.words[word] & !mask) | ((byte as u32) << shift);
    }

    /// Read back the 8 pixels of column `column` on page `page`.
    pub fn column(&self, page: u8, column: u8) -> u8 {
        let (word, shift) = self.locate(page, column);
        (self.words[word] >> shift) as u8
    }

    /// Whether the pixel at (`x`, `y`) is lit.
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        self.column(y / 8, x) & (1 << (y % 8)) != 0
    }

    /// Lit pixel coordinates, row by row.
    pub fn lit_pixels<'a>(&'a self) -> impl Iterator<Item = (u8, u8)> + 'a {
        iproduct!(0..self.geometry.pixel_rows(), 0..self.geometry.columns)
            .filter(move |&(y, x)| self.pixel(x, y))
            .map(|(y, x)| (x, y))
    }

    /// The packed words of the active panel area.
    pub fn words(&self) -> &[u32] {
        &self.words[..self.geometry.words()]
    }

    /// The packed words of one page.
    pub fn page_words(&self, page: u8) -> &[u32] {
        let n = self.geometry.words_per_page();
        let start = page as usize * n;
        &self.words[start..start + n]
    }

    /// Unpack page `page` into controller byte order. `out` must hold at least one byte per
    /// column; returns the number of bytes written.
    pub fn copy_page(&self, page: u8, out: &mut [u8]) -> usize {
        let words = self.page_words(page);
        for (dst, word) in out.chunks_exact_mut(4).zip(words.iter()) {
            dst.copy_from_slice(&word.to_le_bytes());
        }
        words.len() * 4
    }

    /// Blank every pixel.
    pub fn clear(&mut self) {
        for (page, column) in iproduct!(0..self.geometry.pages, 0..self.geometry.columns) {
            self.write_column(page, column, 0);
        }
    }

    /// Render pages `first .. first + count` as text, one line per pixel row, `#` for a lit
    /// pixel and `.` for a dark one.
    #[cfg(any(test, feature = "std"))]
    pub fn ascii_art(&self, first: u8, count: u8) -> std::string::String {
        let first = first.min(self.geometry.pages);
        let last = first.saturating_add(count).min(self.geometry.pages);
        let mut art = std::string::String::new();
        for y in first * 8..last * 8 {
            let row = (0..self.geometry.columns).map(|x| if self.pixel(x, y) { '#' } else { '.' });
            art.extend(row);
            art.push('\n');
        }
        art
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[test]
    fn geometry_accepts_supported_shapes() {
        let g = Geometry::new(4, 128);
        assert_eq!(g, Geometry::SIZE_128X32);
        assert_eq!(g.words_per_page(), 32);
        assert_eq!(g.words(), 128);
        assert_eq!(g.pixel_rows(), 32);
        assert_eq!(Geometry::new(2, 64).words(), 32);
    }

    #[test]
    #[should_panic]
    fn geometry_rejects_unaligned_columns() {
        Geometry::new(4, 126);
    }

    #[test]
    #[should_panic]
    fn geometry_rejects_too_many_pages() {
        Geometry::new(9, 128);
    }

    #[test]
    #[should_panic]
    fn geometry_rejects_empty_panel() {
        Geometry::new(0, 128);
    }

    #[test]
    fn column_lanes() {
        let mut fb = Framebuffer::new(Geometry::SIZE_128X32);
        fb.write_column(0, 0, 0x11);
        fb.write_column(0, 1, 0x22);
        fb.write_column(0, 2, 0x33);
        fb.write_column(0, 3, 0x44);
        assert_eq!(fb.words()[0], 0x4433_2211);
        // Column 5 of page 2 is lane 1 of word 1 + 2 * 32.
        fb.write_column(2, 5, 0xA5);
        assert_eq!(fb.words()[65], 0x0000_A500);
        assert_eq!(fb.column(2, 5), 0xA5);
    }

    #[test]
    fn write_replaces_only_its_lane() {
        let mut fb = Framebuffer::new(Geometry::SIZE_128X32);
        for c in 0..4 {
            fb.write_column(1, 4 + c, 0xFF);
        }
        fb.write_column(1, 6, 0x0F);
        assert_eq!(fb.page_words(1)[1], 0xFF0F_FFFF);
        fb.write_column(1, 6, 0x00);
        assert_eq!(fb.page_words(1)[1], 0xFF00_FFFF);
    }

    #[test]
    fn copy_page_is_controller_order() {
        let mut fb = Framebuffer::new(Geometry::SIZE_128X32);
        for c in 0..128u8 {
            fb.write_column(3, c, c);
        }
        let mut out = [0u8; 128];
        assert_eq!(fb.copy_page(3, &mut out), 128);
        assert_eq!(&out[..], &(0..128u8).collect::<Vec<_>>()[..]);
        assert_eq!(fb.copy_page(2, &mut out), 128);
        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn pixels() {
        let mut fb = Framebuffer::new(Geometry::SIZE_128X32);
        fb.write_column(1, 10, 0b1000_0001);
        assert!(fb.pixel(10, 8));
        assert!(fb.pixel(10, 15));
        assert!(!fb.pixel(10, 9));
        assert_eq!(fb.lit_pixels().collect::<Vec<_>>(), vec![(10, 8), (10, 15)]);
        fb.clear();
        assert_eq!(fb.lit_pixels().count(), 0);
    }

    #[test]
    fn ascii_art_rows() {
        let mut fb = Framebuffer::new(Geometry::new(1, 4));
        fb.write_column(0, 1, 0b0000_0001);
        fb.write_column(0, 3, 0b1000_0000);
        let art = fb.ascii_art(0, 1);
        let rows = art.lines().collect::<Vec<_>>();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], ".#..");
        assert_eq!(rows[7], "...#");
        assert!(rows[1..7].iter().all(|r| *r == "...."));
        assert_eq!(fb.ascii_art(1, 1), "");
    }

    #[test]
    fn cursor_clamps() {
        let g = Geometry::SIZE_128X32;
        let mut cursor = Cursor::default();
        assert!(cursor.set(&g, 3, 127));
        assert_eq!((cursor.page(), cursor.column()), (3, 127));
        assert!(!cursor.set(&g, 4, 10));
        assert_eq!((cursor.page(), cursor.column()), (3, 10));
        assert!(!cursor.set_column(&g, 200));
        assert_eq!(cursor.column(), 127);
        assert!(!cursor.set_page(&g, 9));
        assert_eq!(cursor.page(), 3);
        assert!(cursor.set_page(&g, 0));
    }
}
