//! Bus transport
//!
//! The accelerator is wired to a synchronous serial bus plus two discrete
//! control lines.
//! [`Transport`] is the contract the transaction driver consumes; the adapters
//! in this module implement it on top of the [`embedded_hal`] SPI and digital
//! pin traits for peripherals the platform HAL has already configured.

use embedded_hal::{
    blocking::spi::Transfer,
    digital::v2::{InputPin, OutputPin},
    spi::FullDuplex,
};

/// Control line.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// LOAD, driven by the host.
    ///
    /// High while the accelerator accepts input, low to start computation.
    Load,
    /// DONE, driven by the accelerator.
    ///
    /// High when the result is ready to drain.
    Done,
}

/// Control line level.
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic low.
    Low,
    /// Logic high.
    High,
}

impl Level {
    /// Toggle the level.
    ///
    /// # Example
    ///
    /// ```
    /// use aes_accel::transport::Level;
    ///
    /// assert_eq!(Level::High.toggle(), Level::Low);
    /// assert_eq!(Level::Low.toggle(), Level::High);
    /// ```
    pub const fn toggle(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }

    /// Returns `true` if the level is low.
    pub const fn is_low(&self) -> bool {
        matches!(self, Self::Low)
    }

    /// Returns `true` if the level is high.
    pub const fn is_high(&self) -> bool {
        matches!(self, Self::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

/// Byte and control line access to the accelerator.
///
/// Implementations must not cache, buffer, or reorder:
///
/// * [`write_control`] takes effect before the next call returns to the bus.
/// * [`read_control`] samples the line at the time of the call.
/// * [`transfer_byte`] blocks until the byte has been clocked out and the
///   response byte clocked in.
///
/// [`write_control`]: Transport::write_control
/// [`read_control`]: Transport::read_control
/// [`transfer_byte`]: Transport::transfer_byte
pub trait Transport {
    /// Transport error.
    ///
    /// This is handed back to the caller unchanged inside
    /// [`Error::TransportFailure`](crate::Error::TransportFailure).
    type Error;

    /// Drive a control line.
    fn write_control(&mut self, line: Line, level: Level) -> Result<(), Self::Error>;

    /// Sample a control line.
    fn read_control(&mut self, line: Line) -> Result<Level, Self::Error>;

    /// Exchange a single byte full-duplex.
    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    #[inline]
    fn write_control(&mut self, line: Line, level: Level) -> Result<(), Self::Error> {
        T::write_control(self, line, level)
    }

    #[inline]
    fn read_control(&mut self, line: Line) -> Result<Level, Self::Error> {
        T::read_control(self, line)
    }

    #[inline]
    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error> {
        T::transfer_byte(self, byte)
    }
}

/// Errors from the [`embedded_hal`] adapters.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<S, L, D> {
    /// SPI bus error.
    Spi(S),
    /// Error driving the LOAD pin.
    Load(L),
    /// Error sampling the DONE pin.
    Done(D),
    /// The line was used against its direction.
    ///
    /// LOAD is output only, DONE is input only.
    Direction(Line),
}

#[derive(Debug)]
struct Lines<LOAD, DONE> {
    load: LOAD,
    done: DONE,
}

impl<LOAD, DONE> Lines<LOAD, DONE>
where
    LOAD: OutputPin,
    DONE: InputPin,
{
    fn write<S>(
        &mut self,
        line: Line,
        level: Level,
    ) -> Result<(), BusError<S, LOAD::Error, DONE::Error>> {
        match line {
            Line::Load => {
                let res = match level {
                    Level::High => self.load.set_high(),
                    Level::Low => self.load.set_low(),
                };
                res.map_err(BusError::Load)
            }
            Line::Done => Err(BusError::Direction(line)),
        }
    }

    fn read<S>(&mut self, line: Line) -> Result<Level, BusError<S, LOAD::Error, DONE::Error>> {
        match line {
            Line::Done => self.done.is_high().map(Level::from).map_err(BusError::Done),
            Line::Load => Err(BusError::Direction(line)),
        }
    }
}

/// Transport over a blocking SPI bus.
///
/// Each byte is exchanged with a one word
/// [`Transfer`](embedded_hal::blocking::spi::Transfer).
///
/// # Example
///
/// ```no_run
/// # fn example<SPI, LOAD, DONE, DELAY>(spi: SPI, load: LOAD, done: DONE, delay: DELAY)
/// # where
/// #     SPI: embedded_hal::blocking::spi::Transfer<u8>,
/// #     LOAD: embedded_hal::digital::v2::OutputPin,
/// #     DONE: embedded_hal::digital::v2::InputPin,
/// #     DELAY: embedded_hal::blocking::delay::DelayUs<u32>,
/// # {
/// use aes_accel::{transport::SpiTransport, Accelerator};
///
/// let transport = SpiTransport::new(spi, load, done);
/// let mut accel = Accelerator::new(transport, delay);
/// # }
/// ```
#[derive(Debug)]
pub struct SpiTransport<SPI, LOAD, DONE> {
    spi: SPI,
    lines: Lines<LOAD, DONE>,
}

impl<SPI, LOAD, DONE> SpiTransport<SPI, LOAD, DONE> {
    /// Create a new transport from a configured SPI bus and control pins.
    ///
    /// This will not touch the bus or the pins.
    pub const fn new(spi: SPI, load: LOAD, done: DONE) -> Self {
        Self {
            spi,
            lines: Lines { load, done },
        }
    }

    /// Free the SPI bus and pins from the transport.
    pub fn free(self) -> (SPI, LOAD, DONE) {
        (self.spi, self.lines.load, self.lines.done)
    }
}

impl<SPI, LOAD, DONE> Transport for SpiTransport<SPI, LOAD, DONE>
where
    SPI: Transfer<u8>,
    LOAD: OutputPin,
    DONE: InputPin,
{
    type Error = BusError<SPI::Error, LOAD::Error, DONE::Error>;

    fn write_control(&mut self, line: Line, level: Level) -> Result<(), Self::Error> {
        self.lines.write(line, level)
    }

    fn read_control(&mut self, line: Line) -> Result<Level, Self::Error> {
        self.lines.read(line)
    }

    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error> {
        let mut word: [u8; 1] = [byte];
        self.spi.transfer(&mut word).map_err(BusError::Spi)?;
        Ok(word[0])
    }
}

/// Transport over a non-blocking full-duplex SPI bus.
///
/// Each byte is sent then read back, blocking on [`nb::Error::WouldBlock`].
#[derive(Debug)]
pub struct FullDuplexTransport<SPI, LOAD, DONE> {
    spi: SPI,
    lines: Lines<LOAD, DONE>,
}

impl<SPI, LOAD, DONE> FullDuplexTransport<SPI, LOAD, DONE> {
    /// Create a new transport from a configured SPI bus and control pins.
    ///
    /// This will not touch the bus or the pins.
    pub const fn new(spi: SPI, load: LOAD, done: DONE) -> Self {
        Self {
            spi,
            lines: Lines { load, done },
        }
    }

    /// Free the SPI bus and pins from the transport.
    pub fn free(self) -> (SPI, LOAD, DONE) {
        (self.spi, self.lines.load, self.lines.done)
    }
}

impl<SPI, LOAD, DONE> Transport for FullDuplexTransport<SPI, LOAD, DONE>
where
    SPI: FullDuplex<u8>,
    LOAD: OutputPin,
    DONE: InputPin,
{
    type Error = BusError<SPI::Error, LOAD::Error, DONE::Error>;

    fn write_control(&mut self, line: Line, level: Level) -> Result<(), Self::Error> {
        self.lines.write(line, level)
    }

    fn read_control(&mut self, line: Line) -> Result<Level, Self::Error> {
        self.lines.read(line)
    }

    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error> {
        nb::block!(self.spi.send(byte)).map_err(BusError::Spi)?;
        nb::block!(self.spi.read()).map_err(BusError::Spi)
    }
}

#[cfg(test)]
mod test {
    use super::Level;

    #[test]
    fn level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert!(bool::from(Level::High));
        assert!(!bool::from(Level::Low));
    }

    #[test]
    fn level_predicates() {
        assert!(Level::High.is_high());
        assert!(!Level::High.is_low());
        assert!(Level::Low.is_low());
        assert_eq!(Level::Low.toggle().toggle(), Level::Low);
    }
}
