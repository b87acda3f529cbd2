//! Fixed-width placement of the three telemetry fields: the header line, the numeric value and
//! the unit label.

use core::fmt::Write;

use heapless::String;

use crate::display::compositor::Canvas;
use crate::display::framebuffer::Geometry;
use crate::font::Scale;
use crate::units::Unit;

/// Page the header line is drawn on.
pub const HEADER_PAGE: u8 = 0;

/// Width of a unit label in characters.
pub const UNIT_LABEL_LEN: usize = 3;

/// Capacity of a formatted value: sign plus six digits, or sign, digits, point and fraction.
pub const VALUE_STRING_LEN: usize = 8;

/// A formatted numeric value.
pub type ValueString = String<VALUE_STRING_LEN>;

/// Horizontal alignment of the header text within the header line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alignment {
    Left,
    Right,
    Center,
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::Left
    }
}

/// Where the value and unit fields sit for one display scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    scale: Scale,
    value_page: u8,
    value_column: u8,
    unit_column: u8,
}

impl Layout {
    /// The standard placement for `scale` on a panel of shape `geometry`. The unit label is right
    /// aligned against the panel edge and shares the bottom page of the value field.
    pub fn new(scale: Scale, geometry: Geometry) -> Self {
        let (value_page, value_column) = match scale {
            Scale::Single => (1, 0),
            Scale::Double => (1, 0),
            Scale::Triple => (1, 2),
            Scale::Quadruple => (0, 14),
        };
        let label_width = UNIT_LABEL_LEN as u8 * Scale::Single.pitch();
        Layout {
            scale,
            value_page,
            value_column,
            unit_column: geometry.columns().saturating_sub(label_width),
        }
    }

    /// Move the value field to start at (`page`, `column`).
    pub fn with_value_anchor(self, page: u8, column: u8) -> Self {
        Layout {
            value_page: page,
            value_column: column,
            ..self
        }
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn value_page(&self) -> u8 {
        self.value_page
    }

    pub fn value_column(&self) -> u8 {
        self.value_column
    }

    /// Character capacity of the value field.
    pub fn value_width(&self) -> usize {
        match self.scale {
            Scale::Single => 18,
            Scale::Double => 9,
            Scale::Triple => 6,
            Scale::Quadruple => 4,
        }
    }

    /// Number of pages the value field covers.
    pub fn value_pages(&self) -> u8 {
        self.scale.pages()
    }

    /// Page the unit label is drawn on: the bottom page of the value field.
    pub fn unit_page(&self) -> u8 {
        self.value_page.saturating_add(self.scale.pages() - 1)
    }

    pub fn unit_column(&self) -> u8 {
        self.unit_column
    }
}

/// Number of characters `render_text` draws from `text`: everything before the first NUL.
fn drawn_len(text: &str) -> usize {
    text.bytes().take_while(|&b| b != 0).count()
}

/// Character capacity of the header line on a panel of shape `geometry`.
pub fn header_width(geometry: Geometry) -> usize {
    (geometry.columns() / Scale::Single.pitch()) as usize
}

/// Draw `text` as the header line, padded with blanks to the full header width. Text longer than
/// the header is rejected and nothing is drawn. Returns whether the header was drawn.
pub fn write_header(canvas: &mut Canvas, text: &str, alignment: Alignment) -> bool {
    let width = header_width(canvas.geometry());
    let len = drawn_len(text);
    if len > width {
        return false;
    }

    let extra = width - len;
    let (before, after) = match alignment {
        Alignment::Left => (0, extra),
        Alignment::Right => (extra, 0),
        Alignment::Center => (extra / 2, (extra + 1) / 2),
    };

    canvas.set_cursor(HEADER_PAGE, 0);
    canvas.put_spaces(Scale::Single, before);
    canvas.render_text(Scale::Single, text);
    canvas.put_spaces(Scale::Single, after);
    true
}

/// Draw `text` right justified in the value field. Text longer than the field is rejected and
/// nothing is drawn. Returns whether the value was drawn.
pub fn write_value(canvas: &mut Canvas, layout: &Layout, text: &str) -> bool {
    let width = layout.value_width();
    let len = drawn_len(text);
    if len > width {
        return false;
    }

    canvas.set_cursor(layout.value_page, layout.value_column);
    canvas.put_spaces(layout.scale, width - len);
    canvas.render_text(layout.scale, text);
    true
}

/// Draw the label of `unit` next to the value field.
pub fn write_unit(canvas: &mut Canvas, layout: &Layout, unit: Unit) {
    canvas.set_cursor(layout.unit_page(), layout.unit_column);
    canvas.render_text(Scale::Single, unit.label());
}

/// Format `value`, a fixed-point number with `decimals` implied decimal places, as
/// `[-]INT[.FRAC]`. The magnitude is first reduced modulo 1,000,000 (no decimals) or 100,000
/// (with decimals) so the result always fits a value field. Only 0 to 3 decimals are supported;
/// anything else yields `None`.
pub fn format_value(value: i32, decimals: u8) -> Option<ValueString> {
    let negative = value < 0;
    let magnitude = value.unsigned_abs();
    let sign = if negative { "-" } else { "" };

    let mut s = ValueString::new();
    let written = match decimals {
        0 => write!(s, "{}{}", sign, magnitude % 1_000_000),
        1..=3 => {
            let magnitude = magnitude % 100_000;
            let divisor = 10u32.pow(decimals as u32);
            write!(
                s,
                "{}{}.{:0width$}",
                sign,
                magnitude / divisor,
                magnitude % divisor,
                width = decimals as usize
            )
        }
        _ => return None,
    };
    written.ok().map(|_| s)
}
