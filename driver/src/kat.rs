//! Known answer tests
//!
//! Test vector sources:
//!
//! * FIPS-197 Appendix A.1 and B (AES-128)
//! * FIPS-197 Appendix C.1 (AES-128), C.2 (AES-192), C.3 (AES-256)

use crate::{
    key::Block,
    transport::Transport,
    Accelerator, Direction, Error,
};
use embedded_hal::blocking::delay::DelayUs;
use hex_literal::hex;

/// A key, plaintext, ciphertext triple.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct KnownAnswer {
    /// Key material, 16, 24, or 32 bytes.
    pub key: &'static [u8],
    /// Plaintext block.
    pub plaintext: Block,
    /// Ciphertext block.
    pub ciphertext: Block,
}

impl KnownAnswer {
    /// Block handed to the accelerator for `direction`.
    ///
    /// # Example
    ///
    /// ```
    /// use aes_accel::{kat::FIPS_197, Direction};
    ///
    /// let vector = &FIPS_197[0];
    /// assert_eq!(vector.input(Direction::Encrypt), &vector.plaintext);
    /// assert_eq!(vector.expected(Direction::Encrypt), &vector.ciphertext);
    /// ```
    pub const fn input(&self, direction: Direction) -> &Block {
        match direction {
            Direction::Encrypt => &self.plaintext,
            Direction::Decrypt => &self.ciphertext,
        }
    }

    /// Block the accelerator is expected to return for `direction`.
    pub const fn expected(&self, direction: Direction) -> &Block {
        match direction {
            Direction::Encrypt => &self.ciphertext,
            Direction::Decrypt => &self.plaintext,
        }
    }

    /// Run this vector through the accelerator.
    ///
    /// Returns the block the accelerator produced; compare it with
    /// [`expected`](KnownAnswer::expected).
    pub fn run<T, D>(
        &self,
        accel: &mut Accelerator<T, D>,
        direction: Direction,
    ) -> Result<Block, Error<T::Error>>
    where
        T: Transport,
        D: DelayUs<u32>,
    {
        accel.run_transaction(self.key, self.input(direction), direction)
    }
}

/// FIPS-197 example vectors.
pub const FIPS_197: [KnownAnswer; 4] = [
    // Appendix A.1, B
    KnownAnswer {
        key: &hex!("2B7E151628AED2A6ABF7158809CF4F3C"),
        plaintext: hex!("3243F6A8885A308D313198A2E0370734"),
        ciphertext: hex!("3925841D02DC09FBDC118597196A0B32"),
    },
    // Appendix C.1
    KnownAnswer {
        key: &hex!("000102030405060708090A0B0C0D0E0F"),
        plaintext: hex!("00112233445566778899AABBCCDDEEFF"),
        ciphertext: hex!("69C4E0D86A7B0430D8CDB78070B4C55A"),
    },
    // Appendix C.2
    KnownAnswer {
        key: &hex!("000102030405060708090A0B0C0D0E0F1011121314151617"),
        plaintext: hex!("00112233445566778899AABBCCDDEEFF"),
        ciphertext: hex!("DDA97CA4864CDFE06EAF70A0EC0D7191"),
    },
    // Appendix C.3
    KnownAnswer {
        key: &hex!("000102030405060708090A0B0C0D0E0F101112131415161718191A1B1C1D1E1F"),
        plaintext: hex!("00112233445566778899AABBCCDDEEFF"),
        ciphertext: hex!("8EA2B7CA516745BFEAFC49904B496089"),
    },
];

/// Self test failure.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelfTestError<E> {
    /// The transaction for a vector failed.
    Transaction {
        /// Index of the vector in [`FIPS_197`].
        index: usize,
        /// Transaction error.
        error: Error<E>,
    },
    /// The accelerator returned the wrong block.
    Mismatch {
        /// Index of the vector in [`FIPS_197`].
        index: usize,
        /// Expected block.
        expected: Block,
        /// Block returned by the accelerator.
        actual: Block,
    },
}

impl<T, D> Accelerator<T, D>
where
    T: Transport,
    D: DelayUs<u32>,
{
    /// Run every [`FIPS_197`] vector, stopping at the first failure.
    ///
    /// The accelerator's mode is fixed by its own configuration;
    /// `direction` has to match it.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn example<T, D>(mut accel: aes_accel::Accelerator<T, D>)
    /// # where
    /// #     T: aes_accel::transport::Transport,
    /// #     D: embedded_hal::blocking::delay::DelayUs<u32>,
    /// # {
    /// use aes_accel::Direction;
    ///
    /// if accel.self_test(Direction::Encrypt).is_err() {
    ///     // reset the accelerator
    /// }
    /// # }
    /// ```
    pub fn self_test(&mut self, direction: Direction) -> Result<(), SelfTestError<T::Error>> {
        for (index, vector) in FIPS_197.iter().enumerate() {
            let actual: Block = vector
                .run(self, direction)
                .map_err(|error| SelfTestError::Transaction { index, error })?;
            let expected: Block = *vector.expected(direction);
            if actual != expected {
                error!(
                    "self test vector {=usize} expected {:02x} got {:02x}",
                    index,
                    expected,
                    actual
                );
                return Err(SelfTestError::Mismatch {
                    index,
                    expected,
                    actual,
                });
            }
        }
        debug!("self test passed");
        Ok(())
    }
}
