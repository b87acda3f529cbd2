//! Telemetry text driver for the Solomon Systech SSD1306 dot matrix OLED display driver.
//!
//! A `Display` draws a header line, a numeric reading and its unit label into a packed in-memory
//! framebuffer using fixed-size bitmap glyphs at one of four scales, and only sends the pages that
//! changed when it is refreshed.

#![no_std]

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

extern crate embedded_hal as hal;


pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod font;
pub mod interface;
pub mod units;

// Re-exports for primary API.
pub use command::consts;
pub use config::{Config, Rotation};
pub use display::dirty::FlushPolicy;
pub use display::framebuffer::Geometry;
pub use display::layout::{format_value, Alignment};
pub use display::Display;
pub use error::Error;
pub use font::Scale;
pub use interface::i2c::I2cInterface;
pub use interface::spi::SpiInterface;
pub use units::Unit;
