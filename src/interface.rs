//! Transports that carry command and data bytes to the SSD1306.

/// A byte transport to the display controller.
pub trait DisplayInterface {
    type Error;

    /// Send a command, together with its argument bytes.
    fn send_commands(&mut self, cmds: &[u8]) -> Result<(), Self::Error>;

    /// Send bytes to be written to display RAM at the current address.
    fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error>;
}

pub mod i2c {
    //! The I2C interface prefixes every transaction with a control byte telling the controller
    //! whether the rest of the transaction is a command stream or a data stream.

    use super::DisplayInterface;

    /// Default 7-bit address of SSD1306 modules (SA0 tied low).
    pub const DEFAULT_ADDRESS: u8 = 0x3C;

    const CONTROL_COMMAND: u8 = 0x00;
    const CONTROL_DATA: u8 = 0x40;

    /// Largest payload sent in one I2C transaction, to stay within small peripheral FIFOs.
    const CHUNK: usize = 32;

    pub struct I2cInterface<I2C> {
        /// The I2C master connected to the SSD1306.
        i2c: I2C,
        /// 7-bit device address of the display.
        addr: u8,
    }

    impl<I2C> I2cInterface<I2C>
    where
        I2C: hal::blocking::i2c::Write,
    {
        /// Create a new I2C interface to the display at 7-bit address `addr`.
        pub fn new(i2c: I2C, addr: u8) -> Self {
            Self { i2c, addr }
        }

        /// Give back the I2C peripheral.
        pub fn release(self) -> I2C {
            self.i2c
        }

        fn write_chunked(&mut self, control: u8, bytes: &[u8]) -> Result<(), I2C::Error> {
            let mut buf = [0u8; CHUNK + 1];
            buf[0] = control;
            for chunk in bytes.chunks(CHUNK) {
                buf[1..=chunk.len()].copy_from_slice(chunk);
                self.i2c.write(self.addr, &buf[..=chunk.len()])?;
            }
            Ok(())
        }
    }

    impl<I2C> DisplayInterface for I2cInterface<I2C>
    where
        I2C: hal::blocking::i2c::Write,
    {
        type Error = I2C::Error;

        fn send_commands(&mut self, cmds: &[u8]) -> Result<(), Self::Error> {
            self.write_chunked(CONTROL_COMMAND, cmds)
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            self.write_chunked(CONTROL_DATA, buf)
        }
    }

}

pub mod spi {
    //! The SPI interface supports the "4-wire" interface of the driver, such that each word on the
    //! SPI bus is 8 bits and a separate D/C GPIO selects between command and data bytes.

    use super::DisplayInterface;

    /// Failure of either the SPI bus or the D/C pin.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum SpiInterfaceError<S, P> {
        Spi(S),
        Pin(P),
    }

    pub struct SpiInterface<SPI, DC> {
        /// The SPI master device connected to the SSD1306.
        spi: SPI,
        /// A GPIO output pin connected to the D/C (data/command) pin of the SSD1306 (the fourth
        /// "wire" of "4-wire" mode).
        dc: DC,
    }

    impl<SPI, DC> SpiInterface<SPI, DC>
    where
        SPI: hal::blocking::spi::Write<u8>,
        DC: hal::digital::v2::OutputPin,
    {
        /// Create a new SPI interface to communicate with the display driver. `spi` is the SPI
        /// master device, and `dc` is the GPIO output pin connected to the D/C pin of the SSD1306.
        pub fn new(spi: SPI, dc: DC) -> Self {
            Self { spi, dc }
        }

        /// Give back the SPI peripheral and D/C pin.
        pub fn release(self) -> (SPI, DC) {
            (self.spi, self.dc)
        }
    }

    impl<SPI, DC> DisplayInterface for SpiInterface<SPI, DC>
    where
        SPI: hal::blocking::spi::Write<u8>,
        DC: hal::digital::v2::OutputPin,
    {
        type Error = SpiInterfaceError<SPI::Error, DC::Error>;

        fn send_commands(&mut self, cmds: &[u8]) -> Result<(), Self::Error> {
            self.dc.set_low().map_err(SpiInterfaceError::Pin)?;
            self.spi.write(cmds).map_err(SpiInterfaceError::Spi)
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            self.dc.set_high().map_err(SpiInterfaceError::Pin)?;
            self.spi.write(buf).map_err(SpiInterfaceError::Spi)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::cell::RefCell;
        use std::rc::Rc;
        use std::vec::Vec;

        #[derive(Debug, PartialEq)]
        enum Event {
            Dc(bool),
            Write(Vec<u8>),
        }

        type Log = Rc<RefCell<Vec<Event>>>;

        struct Bus(Log);
        struct Pin(Log);

        impl hal::blocking::spi::Write<u8> for Bus {
            type Error = ();

            fn write(&mut self, words: &[u8]) -> Result<(), ()> {
                self.0.borrow_mut().push(Event::Write(words.to_vec()));
                Ok(())
            }
        }

        impl hal::digital::v2::OutputPin for Pin {
            type Error = ();

            fn set_low(&mut self) -> Result<(), ()> {
                self.0.borrow_mut().push(Event::Dc(false));
                Ok(())
            }

            fn set_high(&mut self) -> Result<(), ()> {
                self.0.borrow_mut().push(Event::Dc(true));
                Ok(())
            }
        }

        #[test]
        fn dc_selects_commands_and_data() {
            let log = Log::default();
            let mut di = SpiInterface::new(Bus(log.clone()), Pin(log.clone()));
            di.send_commands(&[0xAF]).unwrap();
            di.send_data(&[1, 2, 3]).unwrap();
            assert_eq!(
                *log.borrow(),
                vec![
                    Event::Dc(false),
                    Event::Write(vec![0xAF]),
                    Event::Dc(true),
                    Event::Write(vec![1, 2, 3]),
                ]
            );
        }
    }
}

#[cfg(test)]
pub mod test_spy {
    //! An interface for use in unit tests to spy on whatever was sent to it.

    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;
    use std::vec::Vec;

    use super::DisplayInterface;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Sent {
        Cmd(Vec<u8>),
        Data(Vec<u8>),
    }

    /// Records every transfer. `split` hands out a second handle onto the same log, so a test
    /// can give one handle to the `Display` and keep the other for assertions.
    pub struct TestSpyInterface {
        sent: Rc<RefCell<Vec<Sent>>>,
    }

    impl TestSpyInterface {
        pub fn new() -> Self {
            TestSpyInterface {
                sent: Rc::new(RefCell::new(Vec::new())),
            }
        }

        pub fn split(&self) -> Self {
            TestSpyInterface {
                sent: Rc::clone(&self.sent),
            }
        }

        pub fn clear(&self) {
            self.sent.borrow_mut().clear()
        }

        pub fn sent(&self) -> Vec<Sent> {
            self.sent.borrow().clone()
        }

        pub fn check(&self, cmd: &[u8]) {
            assert_eq!(self.sent(), [Sent::Cmd(cmd.to_vec())]);
        }

        pub fn check_multi(&self, expect: &[Sent]) {
            assert_eq!(&self.sent()[..], expect);
        }

        /// Only the data transfers, in order.
        pub fn data(&self) -> Vec<Vec<u8>> {
            self.sent
                .borrow()
                .iter()
                .filter_map(|s| match s {
                    Sent::Data(d) => Some(d.clone()),
                    Sent::Cmd(_) => None,
                })
                .collect()
        }
    }

    impl DisplayInterface for TestSpyInterface {
        type Error = Infallible;

        fn send_commands(&mut self, cmds: &[u8]) -> Result<(), Infallible> {
            self.sent.borrow_mut().push(Sent::Cmd(cmds.to_vec()));
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Infallible> {
            self.sent.borrow_mut().push(Sent::Data(data.to_vec()));
            Ok(())
        }
    }
}
