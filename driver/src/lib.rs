//! Driver for an SPI attached fixed-function AES accelerator.
//!
//! The accelerator takes one 16 byte block and a 128, 192, or 256-bit key and
//! returns one 16 byte block. A transaction is sequenced with two control
//! lines:
//!
//! 1. LOAD is driven high.
//! 2. The 16 message bytes, then the key bytes, are shifted in.
//! 3. LOAD is driven low; the accelerator starts computing.
//! 4. DONE is polled until it reads high.
//! 5. 16 result bytes are shifted out.
//!
//! The bus and pins must be configured by the platform HAL before they are
//! handed to the driver.
//!
//! # Example
//!
//! ```no_run
//! # fn example<SPI, LOAD, DONE, DELAY>(spi: SPI, load: LOAD, done: DONE, delay: DELAY)
//! # where
//! #     SPI: embedded_hal::blocking::spi::Transfer<u8>,
//! #     LOAD: embedded_hal::digital::v2::OutputPin,
//! #     DONE: embedded_hal::digital::v2::InputPin,
//! #     DELAY: embedded_hal::blocking::delay::DelayUs<u32>,
//! # {
//! use aes_accel::{transport::SpiTransport, Accelerator, Block};
//!
//! const KEY: [u8; 16] = [0x2B; 16];
//! let plaintext: Block = [0; 16];
//!
//! let mut accel = Accelerator::new(SpiTransport::new(spi, load, done), delay);
//! match accel.encrypt(&KEY, &plaintext) {
//!     Ok(ciphertext) => { /* ... */ }
//!     Err(e) if e.needs_reset() => { /* reset the accelerator */ }
//!     Err(_) => { /* ... */ }
//! }
//! # }
//! ```
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

mod cancel;
mod error;
mod key;
mod timeout;
mod transaction;

pub mod kat;
pub mod transport;

pub use cancel::CancelToken;
pub use error::Error;
pub use key::{Block, Key, KeySize, LengthError, Operand, BLOCK_LEN};
pub use timeout::{Config, Timeout, ValueError};
pub use transaction::Stage;

/// Embedded-hal trait abstractions.
pub use embedded_hal;

use embedded_hal::blocking::delay::DelayUs;
use transaction::Transaction;
use transport::Transport;

/// Transaction direction.
///
/// The accelerator's mode is fixed by its own configuration, not by the
/// driver; the direction never changes what goes over the wire.
/// It only records the caller's intent and picks the input and expected
/// blocks of a [`KnownAnswer`](kat::KnownAnswer).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Input is plaintext, result is ciphertext.
    Encrypt,
    /// Input is ciphertext, result is plaintext.
    ///
    /// Only meaningful for hardware built or configured for decryption.
    Decrypt,
}

/// AES accelerator driver.
///
/// The driver owns the transport for its whole lifetime, and each transaction
/// borrows the driver mutably, so two transactions can never interleave on
/// the same accelerator.
/// Callers that share one accelerator between execution contexts must put the
/// driver behind their own mutex.
///
/// No state is retained between transactions.
#[derive(Debug)]
pub struct Accelerator<T, D> {
    transport: T,
    delay: D,
    config: Config,
}

impl<T, D> Accelerator<T, D>
where
    T: Transport,
    D: DelayUs<u32>,
{
    /// Take exclusive ownership of an accelerator with the default
    /// [`Config`].
    ///
    /// This will not touch the bus.
    pub fn new(transport: T, delay: D) -> Self {
        Self::with_config(transport, delay, Config::new())
    }

    /// Take exclusive ownership of an accelerator.
    ///
    /// This will not touch the bus.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn example<T, D>(transport: T, delay: D)
    /// # where
    /// #     T: aes_accel::transport::Transport,
    /// #     D: embedded_hal::blocking::delay::DelayUs<u32>,
    /// # {
    /// use aes_accel::{Accelerator, Config, Timeout};
    ///
    /// let config = Config::new().set_timeout(Timeout::from_millis(5));
    /// let accel = Accelerator::with_config(transport, delay, config);
    /// # }
    /// ```
    pub fn with_config(transport: T, delay: D, config: Config) -> Self {
        Self {
            transport,
            delay,
            config,
        }
    }

    /// Free the transport and delay from the driver.
    pub fn free(self) -> (T, D) {
        (self.transport, self.delay)
    }

    /// Current configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: Config) {
        self.config = config
    }

    /// Run one load, compute, drain transaction.
    ///
    /// `key` must be 16, 24, or 32 bytes and `input` must be 16 bytes,
    /// otherwise [`Error::InvalidInputLength`] is returned before any bus
    /// activity.
    ///
    /// Failures are never retried.
    /// See [`Error`] for which failures leave the accelerator in need of a
    /// reset.
    pub fn run_transaction(
        &mut self,
        key: &[u8],
        input: &[u8],
        direction: Direction,
    ) -> Result<Block, Error<T::Error>> {
        self.run(key, input, direction, None)
    }

    /// Run one transaction that can be cancelled through `cancel`.
    ///
    /// See [`CancelToken`] for how cancellation interacts with the stages of
    /// the transaction.
    pub fn run_transaction_cancellable(
        &mut self,
        key: &[u8],
        input: &[u8],
        direction: Direction,
        cancel: &CancelToken,
    ) -> Result<Block, Error<T::Error>> {
        self.run(key, input, direction, Some(cancel))
    }

    /// Encrypt a single block.
    pub fn encrypt(&mut self, key: &[u8], plaintext: &[u8]) -> Result<Block, Error<T::Error>> {
        self.run_transaction(key, plaintext, Direction::Encrypt)
    }

    /// Decrypt a single block.
    ///
    /// The wire protocol is identical to [`encrypt`](Self::encrypt); this only
    /// produces plaintext if the accelerator itself is set up for decryption.
    pub fn decrypt(&mut self, key: &[u8], ciphertext: &[u8]) -> Result<Block, Error<T::Error>> {
        self.run_transaction(key, ciphertext, Direction::Decrypt)
    }

    fn run(
        &mut self,
        key: &[u8],
        input: &[u8],
        direction: Direction,
        cancel: Option<&CancelToken>,
    ) -> Result<Block, Error<T::Error>> {
        let key: Key = Key::new(key)?;
        let input: &Block = crate::key::block(input)?;
        trace!("{} with {} key", direction, key.size());

        Transaction::new(&mut self.transport, &mut self.delay, self.config, cancel)
            .run(key, input)
    }
}
