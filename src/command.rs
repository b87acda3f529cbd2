//! The command set for the SSD1306.
//!
//! Note 1: The display RAM of the SSD1306 is 128 columns by 8 pages, where each page is a band of
//! 8 pixel rows. One byte of display RAM is one column of one page, with bit 0 being the topmost
//! pixel of the band. Modules with 32 pixel rows only show pages 0-3.

use crate::error::Error;
use crate::interface::DisplayInterface;

pub mod consts {
    //! Limits of the controller's display RAM.

    pub const NUM_PIXEL_COLS: u8 = 128;
    pub const NUM_PAGES: u8 = 8;
    pub const NUM_PIXEL_ROWS: u8 = NUM_PAGES * 8;
    pub const PIXEL_COL_MAX: u8 = NUM_PIXEL_COLS - 1;
    pub const PAGE_MAX: u8 = NUM_PAGES - 1;
    pub const PIXEL_ROW_MAX: u8 = NUM_PIXEL_ROWS - 1;
}

use self::consts::*;

/// How the RAM address pointer advances as data is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressingMode {
    /// Column increments, wrapping to the next page at the end of the column range.
    Horizontal,
    /// Page increments, wrapping to the next column at the end of the page range.
    Vertical,
    /// Column increments and wraps within the current page only.
    Page,
}

/// Setting of the COM output scan direction. Changing this setting will flip the image
/// vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComScanDirection {
    /// Scan from COM0 to COM[N-1].
    Normal,
    /// Scan from COM[N-1] to COM0.
    Remapped,
}

/// Hardware layout of the COM pins. This is dictated by how the module wires the OLED matrix to
/// the driver chip; see the module datasheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComPinLayout {
    /// Sequential COM pin configuration, used by 128x32 modules.
    Sequential,
    /// Alternative COM pin configuration, used by 128x64 modules.
    Alternative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Set the contrast current. Range 0-255.
    SetContrast(u8),
    /// Light every pixel regardless of RAM contents (`true`), or follow RAM (`false`).
    EntireDisplayOn(bool),
    /// Invert the meaning of RAM bits.
    SetInverted(bool),
    /// Turn the panel drivers on or off (sleep).
    SetDisplayOn(bool),
    /// Lower nibble of the column start address for page addressing mode. Range 0-15.
    SetLowerColumnStart(u8),
    /// Upper nibble of the column start address for page addressing mode. Range 0-7.
    SetUpperColumnStart(u8),
    /// Select the RAM addressing mode.
    SetAddressingMode(AddressingMode),
    /// Column start and end address for horizontal and vertical addressing. Range 0-127.
    SetColumnAddress(u8, u8),
    /// Page start and end address for horizontal and vertical addressing. Range 0-7.
    SetPageAddress(u8, u8),
    /// Page start address for page addressing mode. Range 0-7. (Note 1)
    SetPageStart(u8),
    /// Set the RAM row shown on the first display line. Range 0-63.
    SetStartLine(u8),
    /// Map column address 127 to SEG0 (`true`) instead of column address 0 (`false`). Flips the
    /// image horizontally.
    SetSegmentRemap(bool),
    /// Set the number of active COM lines. Range 16-64.
    SetMuxRatio(u8),
    /// Set the COM output scan direction.
    SetComScanDirection(ComScanDirection),
    /// Vertical shift of the COM lines. Range 0-63.
    SetDisplayOffset(u8),
    /// Set the COM pin hardware layout.
    SetComPins(ComPinLayout),
    /// Set the display clock divide ratio (1-16) and oscillator frequency setting (0-15).
    SetClockDivide(u8, u8),
    /// Set the pre-charge phase lengths, phase 1 and phase 2, each 1-15 DCLKs.
    SetPrecharge(u8, u8),
    /// Set the VCOMH deselect level. Range 0-7; 4 is roughly 0.77 Vcc.
    SetVcomhDeselect(u8),
    /// Enable or disable the internal charge pump.
    SetChargePump(bool),
    /// Stop any running scroll.
    DeactivateScroll,
}

macro_rules! ok_command {
    ($buf:ident, $cmd:expr,[]) => {{
        $buf[0] = $cmd;
        Ok(&$buf[..1])
    }};
    ($buf:ident, $cmd:expr,[$arg0:expr]) => {{
        $buf[0] = $cmd;
        $buf[1] = $arg0;
        Ok(&$buf[..2])
    }};
    ($buf:ident, $cmd:expr,[$arg0:expr, $arg1:expr]) => {{
        $buf[0] = $cmd;
        $buf[1] = $arg0;
        $buf[2] = $arg1;
        Ok(&$buf[..3])
    }};
}

impl Command {
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: DisplayInterface,
    {
        let mut buf = [0u8; 3];
        let bytes: Result<&[u8], Error<DI::Error>> = match self {
            Command::SetContrast(contrast) => ok_command!(buf, 0x81, [contrast]),
            Command::EntireDisplayOn(on) => ok_command!(buf, if on { 0xA5 } else { 0xA4 }, []),
            Command::SetInverted(inv) => ok_command!(buf, if inv { 0xA7 } else { 0xA6 }, []),
            Command::SetDisplayOn(on) => ok_command!(buf, if on { 0xAF } else { 0xAE }, []),
            Command::SetLowerColumnStart(nibble) => match nibble {
                0..=15 => ok_command!(buf, nibble, []),
                _ => Err(Error::Argument),
            },
            Command::SetUpperColumnStart(nibble) => match nibble {
                0..=7 => ok_command!(buf, 0x10 | nibble, []),
                _ => Err(Error::Argument),
            },
            Command::SetAddressingMode(mode) => {
                let m = match mode {
                    AddressingMode::Horizontal => 0x00,
                    AddressingMode::Vertical => 0x01,
                    AddressingMode::Page => 0x02,
                };
                ok_command!(buf, 0x20, [m])
            }
            Command::SetColumnAddress(start, end) => match (start, end) {
                (0..=PIXEL_COL_MAX, 0..=PIXEL_COL_MAX) if start <= end => {
                    ok_command!(buf, 0x21, [start, end])
                }
                _ => Err(Error::Argument),
            },
            Command::SetPageAddress(start, end) => match (start, end) {
                (0..=PAGE_MAX, 0..=PAGE_MAX) if start <= end => ok_command!(buf, 0x22, [start, end]),
                _ => Err(Error::Argument),
            },
            Command::SetPageStart(page) => match page {
                0..=PAGE_MAX => ok_command!(buf, 0xB0 | page, []),
                _ => Err(Error::Argument),
            },
            Command::SetStartLine(line) => match line {
                0..=PIXEL_ROW_MAX => ok_command!(buf, 0x40 | line, []),
                _ => Err(Error::Argument),
            },
            Command::SetSegmentRemap(remap) => {
                ok_command!(buf, if remap { 0xA1 } else { 0xA0 }, [])
            }
            Command::SetMuxRatio(ratio) => match ratio {
                16..=NUM_PIXEL_ROWS => ok_command!(buf, 0xA8, [ratio - 1]),
                _ => Err(Error::Argument),
            },
            Command::SetComScanDirection(dir) => ok_command!(
                buf,
                match dir {
                    ComScanDirection::Normal => 0xC0,
                    ComScanDirection::Remapped => 0xC8,
                },
                []
            ),
            Command::SetDisplayOffset(offset) => match offset {
                0..=PIXEL_ROW_MAX => ok_command!(buf, 0xD3, [offset]),
                _ => Err(Error::Argument),
            },
            Command::SetComPins(layout) => {
                let l = match layout {
                    ComPinLayout::Sequential => 0x02,
                    ComPinLayout::Alternative => 0x12,
                };
                ok_command!(buf, 0xDA, [l])
            }
            Command::SetClockDivide(divide, fosc) => match (divide, fosc) {
                (1..=16, 0..=15) => ok_command!(buf, 0xD5, [fosc << 4 | (divide - 1)]),
                _ => Err(Error::Argument),
            },
            Command::SetPrecharge(phase_1, phase_2) => match (phase_1, phase_2) {
                (1..=15, 1..=15) => ok_command!(buf, 0xD9, [phase_2 << 4 | phase_1]),
                _ => Err(Error::Argument),
            },
            Command::SetVcomhDeselect(level) => match level {
                0..=7 => ok_command!(buf, 0xDB, [level << 4]),
                _ => Err(Error::Argument),
            },
            Command::SetChargePump(on) => ok_command!(buf, 0x8D, [if on { 0x14 } else { 0x10 }]),
            Command::DeactivateScroll => ok_command!(buf, 0x2E, []),
        };
        iface.send_commands(bytes?).map_err(Error::Interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::test_spy::TestSpyInterface;

    #[test]
    fn set_contrast() {
        let mut di = TestSpyInterface::new();
        Command::SetContrast(0xCF).send(&mut di).unwrap();
        di.check(&[0x81, 0xCF]);
    }

    #[test]
    fn on_off_switches() {
        let mut di = TestSpyInterface::new();
        Command::SetDisplayOn(false).send(&mut di).unwrap();
        di.check(&[0xAE]);
        di.clear();
        Command::SetDisplayOn(true).send(&mut di).unwrap();
        di.check(&[0xAF]);
        di.clear();
        Command::SetInverted(true).send(&mut di).unwrap();
        di.check(&[0xA7]);
        di.clear();
        Command::EntireDisplayOn(false).send(&mut di).unwrap();
        di.check(&[0xA4]);
    }

    #[test]
    fn column_start_nibbles() {
        let mut di = TestSpyInterface::new();
        Command::SetLowerColumnStart(0x0A).send(&mut di).unwrap();
        di.check(&[0x0A]);
        di.clear();
        Command::SetUpperColumnStart(7).send(&mut di).unwrap();
        di.check(&[0x17]);
        assert_eq!(Command::SetLowerColumnStart(16).send(&mut di), Err(Error::Argument));
        assert_eq!(Command::SetUpperColumnStart(8).send(&mut di), Err(Error::Argument));
    }

    #[test]
    fn set_page_start() {
        let mut di = TestSpyInterface::new();
        Command::SetPageStart(3).send(&mut di).unwrap();
        di.check(&[0xB3]);
        di.clear();
        assert_eq!(Command::SetPageStart(8).send(&mut di), Err(Error::Argument));
        // Rejected commands never reach the interface.
        assert!(di.sent().is_empty());
    }

    #[test]
    fn address_ranges() {
        let mut di = TestSpyInterface::new();
        Command::SetColumnAddress(0, 127).send(&mut di).unwrap();
        di.check(&[0x21, 0, 127]);
        di.clear();
        Command::SetPageAddress(0, 3).send(&mut di).unwrap();
        di.check(&[0x22, 0, 3]);
        assert_eq!(Command::SetColumnAddress(0, 128).send(&mut di), Err(Error::Argument));
        assert_eq!(Command::SetColumnAddress(10, 5).send(&mut di), Err(Error::Argument));
        assert_eq!(Command::SetPageAddress(0, 8).send(&mut di), Err(Error::Argument));
    }

    #[test]
    fn set_addressing_mode() {
        let mut di = TestSpyInterface::new();
        Command::SetAddressingMode(AddressingMode::Horizontal)
            .send(&mut di)
            .unwrap();
        di.check(&[0x20, 0x00]);
        di.clear();
        Command::SetAddressingMode(AddressingMode::Page)
            .send(&mut di)
            .unwrap();
        di.check(&[0x20, 0x02]);
    }

    #[test]
    fn set_mux_ratio() {
        let mut di = TestSpyInterface::new();
        Command::SetMuxRatio(32).send(&mut di).unwrap();
        di.check(&[0xA8, 31]);
        di.clear();
        Command::SetMuxRatio(64).send(&mut di).unwrap();
        di.check(&[0xA8, 63]);
        assert_eq!(Command::SetMuxRatio(15).send(&mut di), Err(Error::Argument));
        assert_eq!(Command::SetMuxRatio(65).send(&mut di), Err(Error::Argument));
    }

    #[test]
    fn orientation() {
        let mut di = TestSpyInterface::new();
        Command::SetSegmentRemap(true).send(&mut di).unwrap();
        di.check(&[0xA1]);
        di.clear();
        Command::SetComScanDirection(ComScanDirection::Remapped)
            .send(&mut di)
            .unwrap();
        di.check(&[0xC8]);
        di.clear();
        Command::SetComScanDirection(ComScanDirection::Normal)
            .send(&mut di)
            .unwrap();
        di.check(&[0xC0]);
    }

    #[test]
    fn set_start_line_and_offset() {
        let mut di = TestSpyInterface::new();
        Command::SetStartLine(0).send(&mut di).unwrap();
        di.check(&[0x40]);
        di.clear();
        Command::SetDisplayOffset(23).send(&mut di).unwrap();
        di.check(&[0xD3, 23]);
        assert_eq!(Command::SetStartLine(64).send(&mut di), Err(Error::Argument));
        assert_eq!(Command::SetDisplayOffset(64).send(&mut di), Err(Error::Argument));
    }

    #[test]
    fn set_com_pins() {
        let mut di = TestSpyInterface::new();
        Command::SetComPins(ComPinLayout::Sequential)
            .send(&mut di)
            .unwrap();
        di.check(&[0xDA, 0x02]);
        di.clear();
        Command::SetComPins(ComPinLayout::Alternative)
            .send(&mut di)
            .unwrap();
        di.check(&[0xDA, 0x12]);
    }

    #[test]
    fn set_clock_divide() {
        let mut di = TestSpyInterface::new();
        Command::SetClockDivide(1, 8).send(&mut di).unwrap();
        di.check(&[0xD5, 0x80]);
        di.clear();
        Command::SetClockDivide(16, 15).send(&mut di).unwrap();
        di.check(&[0xD5, 0xFF]);
        assert_eq!(Command::SetClockDivide(0, 8).send(&mut di), Err(Error::Argument));
        assert_eq!(Command::SetClockDivide(17, 8).send(&mut di), Err(Error::Argument));
        assert_eq!(Command::SetClockDivide(1, 16).send(&mut di), Err(Error::Argument));
    }

    #[test]
    fn set_precharge() {
        let mut di = TestSpyInterface::new();
        Command::SetPrecharge(1, 15).send(&mut di).unwrap();
        di.check(&[0xD9, 0xF1]);
        di.clear();
        Command::SetPrecharge(2, 2).send(&mut di).unwrap();
        di.check(&[0xD9, 0x22]);
        assert_eq!(Command::SetPrecharge(0, 2).send(&mut di), Err(Error::Argument));
        assert_eq!(Command::SetPrecharge(2, 16).send(&mut di), Err(Error::Argument));
    }

    #[test]
    fn set_vcomh_deselect() {
        let mut di = TestSpyInterface::new();
        Command::SetVcomhDeselect(4).send(&mut di).unwrap();
        di.check(&[0xDB, 0x40]);
        assert_eq!(Command::SetVcomhDeselect(8).send(&mut di), Err(Error::Argument));
    }

    #[test]
    fn charge_pump_and_scroll() {
        let mut di = TestSpyInterface::new();
        Command::SetChargePump(true).send(&mut di).unwrap();
        di.check(&[0x8D, 0x14]);
        di.clear();
        Command::SetChargePump(false).send(&mut di).unwrap();
        di.check(&[0x8D, 0x10]);
        di.clear();
        Command::DeactivateScroll.send(&mut di).unwrap();
        di.check(&[0x2E]);
    }
}
