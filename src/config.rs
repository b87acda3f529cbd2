//! Defines the structs that hold the relatively static setup of a telemetry display: which glyph
//! scale the value field uses, how the panel is mounted, and the register values sent at init.

use crate::command::*;
use crate::display::dirty::FlushPolicy;
use crate::display::framebuffer::Geometry;
use crate::display::layout::Layout;
use crate::error::Error;
use crate::font::Scale;
use crate::interface;

/// How the panel is mounted. Only the segment remap and COM scan direction sent at init depend on
/// this; rendering is unaffected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    Normal,
    /// Turned through 180 degrees.
    Rotated,
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::Normal
    }
}

impl Rotation {
    fn segment_remap(self) -> bool {
        match self {
            Rotation::Normal => true,
            Rotation::Rotated => false,
        }
    }

    fn com_scan_direction(self) -> ComScanDirection {
        match self {
            Rotation::Normal => ComScanDirection::Remapped,
            Rotation::Rotated => ComScanDirection::Normal,
        }
    }

    /// Transmit the addressing orientation for this mounting.
    pub(crate) fn send<DI>(self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: interface::DisplayInterface,
    {
        Command::SetSegmentRemap(self.segment_remap()).send(iface)?;
        Command::SetComScanDirection(self.com_scan_direction()).send(iface)
    }
}

/// A configuration for the display. Builder methods offer a declarative way to either send a
/// register command at init time or leave the register at its power-on default; contrast,
/// precharge and VCOMH deselect are preset to the values a small I2C module wants.
#[derive(Clone, Debug)]
pub struct Config {
    pub(crate) scale: Scale,
    pub(crate) rotation: Rotation,
    pub(crate) flush_policy: FlushPolicy,
    value_anchor: Option<(u8, u8)>,
    contrast_cmd: Option<Command>,
    precharge_cmd: Option<Command>,
    vcomh_deselect_cmd: Option<Command>,
    clock_cmd: Option<Command>,
}

impl Config {
    /// Create a new configuration whose value field is drawn at `scale`. All other options can
    /// be set by calling the provided builder methods on `Config`.
    pub fn new(scale: Scale) -> Self {
        Config {
            scale,
            rotation: Rotation::Normal,
            flush_policy: FlushPolicy::Selective,
            value_anchor: None,
            contrast_cmd: Some(Command::SetContrast(0xCF)),
            precharge_cmd: Some(Command::SetPrecharge(1, 15)),
            vcomh_deselect_cmd: Some(Command::SetVcomhDeselect(4)),
            clock_cmd: None,
        }
    }

    /// Extend this `Config` to drive a panel mounted as `rotation`.
    pub fn rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }

    /// Extend this `Config` to choose which pages `Display::refresh` transmits.
    pub fn flush_policy(self, flush_policy: FlushPolicy) -> Self {
        Self {
            flush_policy,
            ..self
        }
    }

    /// Extend this `Config` to draw the value field starting at (`page`, `column`) instead of the
    /// scale's standard anchor.
    pub fn value_anchor(self, page: u8, column: u8) -> Self {
        Self {
            value_anchor: Some((page, column)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure display contrast. See `Command::SetContrast`.
    pub fn contrast(self, contrast: u8) -> Self {
        Self {
            contrast_cmd: Some(Command::SetContrast(contrast)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure the precharge phase lengths. See
    /// `Command::SetPrecharge`.
    pub fn precharge(self, phase1: u8, phase2: u8) -> Self {
        Self {
            precharge_cmd: Some(Command::SetPrecharge(phase1, phase2)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure the VCOMH deselect level. See
    /// `Command::SetVcomhDeselect`.
    pub fn vcomh_deselect(self, level: u8) -> Self {
        Self {
            vcomh_deselect_cmd: Some(Command::SetVcomhDeselect(level)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure the display clock divider and oscillator
    /// frequency. See `Command::SetClockDivide`.
    pub fn clock(self, divide: u8, fosc: u8) -> Self {
        Self {
            clock_cmd: Some(Command::SetClockDivide(divide, fosc)),
            ..self
        }
    }

    /// Leave contrast, precharge and VCOMH deselect at their power-on defaults.
    pub fn por_registers(self) -> Self {
        Self {
            contrast_cmd: None,
            precharge_cmd: None,
            vcomh_deselect_cmd: None,
            ..self
        }
    }

    /// The field placement this configuration selects on a panel of shape `geometry`. An anchor
    /// override off the panel is clamped to the last page and column.
    pub fn layout(&self, geometry: Geometry) -> Layout {
        let layout = Layout::new(self.scale, geometry);
        match self.value_anchor {
            Some((page, column)) => layout.with_value_anchor(
                page.min(geometry.pages() - 1),
                column.min(geometry.columns() - 1),
            ),
            None => layout,
        }
    }

    /// The clock command sent early in the init sequence: the configured one, or divide ratio 1
    /// at oscillator setting 8.
    pub(crate) fn clock_command(&self) -> Command {
        self.clock_cmd.unwrap_or(Command::SetClockDivide(1, 8))
    }

    /// Transmit the optional register commands encoded in `self`.
    pub(crate) fn send<DI>(&self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: interface::DisplayInterface,
    {
        self.contrast_cmd.map_or(Ok(()), |c| c.send(iface))?;
        self.precharge_cmd.map_or(Ok(()), |c| c.send(iface))?;
        self.vcomh_deselect_cmd.map_or(Ok(()), |c| c.send(iface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::test_spy::{Sent, TestSpyInterface};

    #[test]
    fn default_registers() {
        let di = TestSpyInterface::new();
        Config::new(Scale::Single).send(&mut di.split()).unwrap();
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(sends!(
            (0x81, 0xCF), // contrast
            (0xD9, 0xF1), // precharge
            (0xDB, 0x40) // vcomh deselect
        ));
    }

    #[test]
    fn configured_registers() {
        let di = TestSpyInterface::new();
        let cfg = Config::new(Scale::Double)
            .contrast(0x40)
            .precharge(2, 2)
            .vcomh_deselect(3);
        cfg.send(&mut di.split()).unwrap();
        di.check_multi(sends!((0x81, 0x40), (0xD9, 0x22), (0xDB, 0x30)));
    }

    #[test]
    fn por_registers_send_nothing() {
        let di = TestSpyInterface::new();
        Config::new(Scale::Triple)
            .por_registers()
            .send(&mut di.split())
            .unwrap();
        assert!(di.sent().is_empty());
    }

    #[test]
    fn bad_register_argument() {
        let di = TestSpyInterface::new();
        let cfg = Config::new(Scale::Single).vcomh_deselect(8);
        assert_eq!(cfg.send(&mut di.split()), Err(Error::Argument));
        // Commands ahead of the bad one went out.
        assert_eq!(di.sent().len(), 2);
    }

    #[test]
    fn clock_default_and_override() {
        let cfg = Config::new(Scale::Single);
        assert_eq!(cfg.clock_command(), Command::SetClockDivide(1, 8));
        let cfg = cfg.clock(2, 15);
        assert_eq!(cfg.clock_command(), Command::SetClockDivide(2, 15));
    }

    #[test]
    fn rotation_orientation() {
        let di = TestSpyInterface::new();
        Rotation::Normal.send(&mut di.split()).unwrap();
        Rotation::Rotated.send(&mut di.split()).unwrap();
        di.check_multi(sends!(0xA1, 0xC8, 0xA0, 0xC0));
    }

    #[test]
    fn anchor_override() {
        let g = Geometry::SIZE_128X32;
        let layout = Config::new(Scale::Quadruple).layout(g);
        assert_eq!((layout.value_page(), layout.value_column()), (0, 14));
        let layout = Config::new(Scale::Double).value_anchor(2, 8).layout(g);
        assert_eq!((layout.value_page(), layout.value_column()), (2, 8));
        assert_eq!(layout.scale(), Scale::Double);
    }

    #[test]
    fn anchor_off_panel_is_clamped() {
        let layout = Config::new(Scale::Quadruple)
            .value_anchor(254, 200)
            .layout(Geometry::SIZE_128X32);
        assert_eq!((layout.value_page(), layout.value_column()), (3, 127));
        assert_eq!(layout.unit_page(), 6);
    }
}
