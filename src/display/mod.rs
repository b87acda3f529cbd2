//! The main API to the display driver. A `Display` owns the framebuffer, the write cursor and the
//! dirty mask for one panel; the telemetry formatters draw into the framebuffer and `refresh`
//! sends the changed pages to the controller.

pub mod compositor;
pub mod dirty;
pub mod framebuffer;
pub mod layout;

use crate::command::consts::NUM_PIXEL_COLS;
use crate::command::*;
use crate::config::Config;
use crate::display::compositor::Canvas;
use crate::display::dirty::{DirtyMask, FlushPolicy};
use crate::display::framebuffer::Geometry;
use crate::display::layout::{Alignment, Layout};
use crate::error::Error;
use crate::font::Scale;
use crate::interface;
use crate::units::Unit;

/// Header shown by `Display::init` until the application sets its own.
pub const STARTUP_HEADER: &str = "   ACC FUEL METER   ";

/// Value shown by `Display::init` until the first reading arrives.
pub const STARTUP_VALUE: &str = "-";

/// A driver for an SSD1306 panel showing one telemetry reading.
pub struct Display<DI>
where
    DI: interface::DisplayInterface,
{
    iface: DI,
    canvas: Canvas,
    layout: Layout,
    dirty: DirtyMask,
    flush_policy: FlushPolicy,
}

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Construct a new display driver for a panel of shape `geometry` connected to `iface`. Every
    /// page starts out dirty so the first `refresh` sends the whole framebuffer.
    pub fn new(iface: DI, geometry: Geometry) -> Self {
        Display {
            iface,
            canvas: Canvas::new(geometry),
            layout: Layout::new(Scale::Single, geometry),
            dirty: DirtyMask::all(geometry.pages()),
            flush_policy: FlushPolicy::default(),
        }
    }

    /// Initialize the controller with `config`, then draw and send the startup screen.
    pub fn init(&mut self, config: Config) -> Result<(), Error<DI::Error>> {
        let geometry = self.canvas.geometry();
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "init {}x{} panel, value scale {}",
            geometry.columns(),
            geometry.pixel_rows(),
            config.scale
        );

        let com_pins = if geometry.pixel_rows() > 32 {
            ComPinLayout::Alternative
        } else {
            ComPinLayout::Sequential
        };

        Command::SetDisplayOn(false).send(&mut self.iface)?;
        config.clock_command().send(&mut self.iface)?;
        Command::SetMuxRatio(geometry.pixel_rows()).send(&mut self.iface)?;
        Command::SetDisplayOffset(0).send(&mut self.iface)?;
        Command::SetStartLine(0).send(&mut self.iface)?;
        Command::SetChargePump(true).send(&mut self.iface)?;
        Command::SetAddressingMode(AddressingMode::Horizontal).send(&mut self.iface)?;
        config.rotation.send(&mut self.iface)?;
        Command::SetComPins(com_pins).send(&mut self.iface)?;
        Command::SetColumnAddress(0, geometry.columns() - 1).send(&mut self.iface)?;
        Command::SetPageAddress(0, geometry.pages() - 1).send(&mut self.iface)?;
        config.send(&mut self.iface)?;
        Command::DeactivateScroll.send(&mut self.iface)?;
        Command::EntireDisplayOn(false).send(&mut self.iface)?;
        Command::SetInverted(false).send(&mut self.iface)?;
        Command::SetDisplayOn(true).send(&mut self.iface)?;

        self.layout = config.layout(geometry);
        self.flush_policy = config.flush_policy;

        self.clear();
        self.set_value_str(STARTUP_VALUE);
        self.set_header(STARTUP_HEADER, Alignment::Right);
        self.set_unit(Unit::Blank);
        self.refresh()
    }

    /// Draw `text` as the header line. Returns `false`, leaving the panel unchanged, when the
    /// text is wider than the panel.
    pub fn set_header(&mut self, text: &str, alignment: Alignment) -> bool {
        let drawn = layout::write_header(&mut self.canvas, text, alignment);
        if drawn {
            self.dirty.mark(layout::HEADER_PAGE);
        } else {
            #[cfg(feature = "defmt")]
            defmt::trace!("header rejected, {} chars", text.len());
        }
        drawn
    }

    /// Draw preformatted `text` right justified in the value field. Returns `false`, leaving the
    /// panel unchanged, when the text is wider than the field.
    pub fn set_value_str(&mut self, text: &str) -> bool {
        let drawn = layout::write_value(&mut self.canvas, &self.layout, text);
        if drawn {
            // The blit leaves the cursor on the page the field was actually drawn from.
            let page = self.canvas.cursor().page();
            self.dirty.mark_span(page, self.layout.value_pages());
        } else {
            #[cfg(feature = "defmt")]
            defmt::trace!("value rejected, {} chars", text.len());
        }
        drawn
    }

    /// Draw the fixed-point number `value` with `decimals` implied decimal places. See
    /// `layout::format_value`. Returns `false` when `decimals` is unsupported.
    pub fn set_value(&mut self, value: i32, decimals: u8) -> bool {
        match layout::format_value(value, decimals) {
            Some(text) => self.set_value_str(&text),
            None => {
                #[cfg(feature = "defmt")]
                defmt::trace!("value rejected, {} decimals", decimals);
                false
            }
        }
    }

    /// Draw the label of `unit` beside the value field.
    pub fn set_unit(&mut self, unit: Unit) {
        layout::write_unit(&mut self.canvas, &self.layout, unit);
        let page = self.canvas.cursor().page();
        self.dirty.mark(page);
    }

    /// Draw the label of the unit with catalog index `id`; unknown indices draw the blank
    /// sentinel label.
    pub fn set_unit_id(&mut self, id: u8) {
        self.set_unit(Unit::from_id(id));
    }

    /// Show `unit` with its placeholder reading, for when no value is available yet.
    pub fn show_placeholder(&mut self, unit: Unit) -> bool {
        let drawn = self.set_value_str(unit.placeholder());
        self.set_unit(unit);
        drawn
    }

    /// Draw free `text` at `scale` starting at (`page`, `column`), clamped onto the panel.
    /// Returns whether the requested position was on the panel.
    pub fn draw_text(&mut self, scale: Scale, page: u8, column: u8, text: &str) -> bool {
        let in_range = self.canvas.set_cursor(page, column);
        let page = self.canvas.cursor().page();
        self.canvas.render_text(scale, text);
        self.dirty.mark_span(page, scale.pages());
        in_range
    }

    /// Blank the framebuffer and mark every page for sending.
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.dirty = DirtyMask::all(self.canvas.geometry().pages());
    }

    /// Send the pages with unsent changes, or every page under `FlushPolicy::Bulk`, then mark
    /// the panel clean. Does nothing when no page is dirty. If the interface fails the mask is
    /// kept, so the next call tries again.
    pub fn refresh(&mut self) -> Result<(), Error<DI::Error>> {
        if self.dirty.is_clean() {
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("refresh, dirty mask {=u8:#b}", self.dirty.bits());

        let geometry = self.canvas.geometry();
        let mut buf = [0u8; NUM_PIXEL_COLS as usize];
        for page in self.dirty.pages_to_send(geometry.pages(), self.flush_policy) {
            #[cfg(feature = "defmt")]
            defmt::trace!("sending page {=u8}", page);
            Command::SetPageStart(page).send(&mut self.iface)?;
            Command::SetLowerColumnStart(0).send(&mut self.iface)?;
            Command::SetUpperColumnStart(0).send(&mut self.iface)?;
            let len = self.canvas.framebuffer().copy_page(page, &mut buf);
            self.iface.send_data(&buf[..len])?;
        }
        self.dirty.clear();
        Ok(())
    }

    /// Control the contrast current.
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<DI::Error>> {
        Command::SetContrast(contrast).send(&mut self.iface)
    }

    /// Show lit pixels dark and dark pixels lit.
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error<DI::Error>> {
        Command::SetInverted(inverted).send(&mut self.iface)
    }

    /// Switch the panel on, or off into sleep. Display RAM is retained while off.
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Error<DI::Error>> {
        Command::SetDisplayOn(on).send(&mut self.iface)
    }

    pub fn dirty(&self) -> DirtyMask {
        self.dirty
    }

    pub fn flush_policy(&self) -> FlushPolicy {
        self.flush_policy
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Give back the interface.
    pub fn release(self) -> DI {
        self.iface
    }
}
