//! Glyph blitting: drawing glyphs and strings into the framebuffer at the cursor.

use crate::display::framebuffer::{Cursor, Framebuffer, Geometry};
use crate::font::{Glyph, Scale};

/// A framebuffer together with the cursor that every blit reads and advances.
#[derive(Clone)]
pub struct Canvas {
    framebuffer: Framebuffer,
    cursor: Cursor,
}

impl Canvas {
    /// A blank canvas with the cursor at the top left.
    pub fn new(geometry: Geometry) -> Self {
        Canvas {
            framebuffer: Framebuffer::new(geometry),
            cursor: Cursor::default(),
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn geometry(&self) -> Geometry {
        self.framebuffer.geometry()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// See `Cursor::set`.
    pub fn set_cursor(&mut self, page: u8, column: u8) -> bool {
        let geometry = self.geometry();
        self.cursor.set(&geometry, page, column)
    }

    /// See `Cursor::set_page`.
    pub fn set_page(&mut self, page: u8) -> bool {
        let geometry = self.geometry();
        self.cursor.set_page(&geometry, page)
    }

    /// See `Cursor::set_column`.
    pub fn set_column(&mut self, column: u8) -> bool {
        let geometry = self.geometry();
        self.cursor.set_column(&geometry, column)
    }

    /// Blank the framebuffer and home the cursor.
    pub fn clear(&mut self) {
        self.framebuffer.clear();
        self.cursor = Cursor::default();
    }

    /// Draw `glyph` at the cursor, followed by the scale's blank gap columns.
    ///
    /// Columns falling past the right edge are dropped; nothing wraps. On return the cursor
    /// column is just past the last column written. A multi-page glyph is drawn page row by page
    /// row from the same starting column, and the cursor page is put back to where it started,
    /// so callers move between text lines themselves.
    ///
    /// Returns `false` when the glyph could not be drawn completely: the cursor page is off the
    /// panel, a page row of the glyph falls below the last page, or, at the single-page scale,
    /// the right edge was reached.
    pub fn put_glyph(&mut self, scale: Scale, glyph: Glyph) -> bool {
        if scale.pages() == 1 {
            self.put_single(scale, glyph)
        } else {
            self.put_tall(scale, glyph)
        }
    }

    fn put_single(&mut self, scale: Scale, glyph: Glyph) -> bool {
        let geometry = self.geometry();
        let page = self.cursor.page;
        if page >= geometry.pages() {
            return false;
        }

        let width = glyph.width();
        for i in 0..width + scale.gap() as usize {
            if self.cursor.column >= geometry.columns() {
                return false;
            }
            let byte = if i < width { glyph.page_byte(i, 0) } else { 0 };
            self.framebuffer.write_column(page, self.cursor.column, byte);
            self.cursor.column += 1;
        }
        true
    }

    fn put_tall(&mut self, scale: Scale, glyph: Glyph) -> bool {
        let geometry = self.geometry();
        let start_column = self.cursor.column;
        let start_page = self.cursor.page;
        let width = glyph.width();

        for row in 0..scale.pages() {
            if self.cursor.page >= geometry.pages() {
                self.cursor.page = start_page;
                return false;
            }

            self.cursor.column = start_column;
            for i in 0..width + scale.gap() as usize {
                if self.cursor.column >= geometry.columns() {
                    break;
                }
                let byte = if i < width { glyph.page_byte(i, row) } else { 0 };
                self.framebuffer
                    .write_column(self.cursor.page, self.cursor.column, byte);
                self.cursor.column += 1;
            }
            self.cursor.page += 1;
        }
        self.cursor.page = start_page;
        true
    }

    /// Draw the glyph `scale` maps `ch` to.
    pub fn put_char(&mut self, scale: Scale, ch: u8) -> bool {
        self.put_glyph(scale, scale.glyph(ch))
    }

    /// Draw `count` blank glyphs.
    pub fn put_spaces(&mut self, scale: Scale, count: usize) {
        let space = scale.space();
        for _ in 0..count {
            self.put_glyph(scale, space);
        }
    }

    /// Draw each byte of `text` in turn, up to the first NUL if there is one. Glyphs that run
    /// past the right edge are silently cut off.
    pub fn render_text(&mut self, scale: Scale, text: &str) {
        for ch in text.bytes().take_while(|&b| b != 0) {
            self.put_char(scale, ch);
        }
    }
}
