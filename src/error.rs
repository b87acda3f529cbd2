//! Errors surfaced by operations that talk to the panel.

use core::fmt;

/// An error from a display operation, generic over the error type of the underlying interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The interface failed to transmit bytes to the controller.
    Interface(E),
    /// A command argument was outside the range the controller accepts.
    Argument,
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Interface(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "display interface error: {:?}", e),
            Error::Argument => f.write_str("command argument out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}
