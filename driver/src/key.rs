//! Key material and data blocks

/// Length of a data block in bytes.
pub const BLOCK_LEN: usize = 16;

/// A 16 byte plaintext, ciphertext, or result block.
pub type Block = [u8; BLOCK_LEN];

/// AES key size.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeySize {
    /// 128-bit key.
    Bits128,
    /// 192-bit key.
    Bits192,
    /// 256-bit key.
    Bits256,
}

impl KeySize {
    /// Key size from a length in bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use aes_accel::KeySize;
    ///
    /// assert_eq!(KeySize::from_len(24), Some(KeySize::Bits192));
    /// assert_eq!(KeySize::from_len(20), None);
    /// ```
    pub const fn from_len(len: usize) -> Option<KeySize> {
        match len {
            16 => Some(KeySize::Bits128),
            24 => Some(KeySize::Bits192),
            32 => Some(KeySize::Bits256),
            _ => None,
        }
    }

    /// Key length in bytes.
    pub const fn len(self) -> usize {
        match self {
            KeySize::Bits128 => 16,
            KeySize::Bits192 => 24,
            KeySize::Bits256 => 32,
        }
    }

    /// Key length in bits.
    pub const fn bits(self) -> u16 {
        (self.len() * 8) as u16
    }
}

/// Buffer rejected by a length check.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operand {
    /// Key material, must be 16, 24, or 32 bytes.
    Key,
    /// Input block, must be 16 bytes.
    Block,
}

/// A buffer had an invalid length.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LengthError {
    /// Which buffer was rejected.
    pub operand: Operand,
    /// Length of the rejected buffer in bytes.
    pub len: usize,
}

/// Validated key material.
///
/// The key bytes are borrowed from the caller and are never copied or retained
/// by the driver.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Key<'a> {
    bytes: &'a [u8],
    size: KeySize,
}

impl<'a> Key<'a> {
    /// Validate key material.
    ///
    /// # Example
    ///
    /// ```
    /// use aes_accel::{Key, KeySize, LengthError, Operand};
    ///
    /// let key = Key::new(&[0; 32])?;
    /// assert_eq!(key.size(), KeySize::Bits256);
    ///
    /// assert_eq!(
    ///     Key::new(&[0; 8]),
    ///     Err(LengthError { operand: Operand::Key, len: 8 })
    /// );
    /// # Ok::<(), LengthError>(())
    /// ```
    pub const fn new(bytes: &'a [u8]) -> Result<Key<'a>, LengthError> {
        match KeySize::from_len(bytes.len()) {
            Some(size) => Ok(Key { bytes, size }),
            None => Err(LengthError {
                operand: Operand::Key,
                len: bytes.len(),
            }),
        }
    }

    /// Key size.
    pub const fn size(&self) -> KeySize {
        self.size
    }

    /// Key bytes, in wire order.
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> TryFrom<&'a [u8]> for Key<'a> {
    type Error = LengthError;

    fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
        Key::new(bytes)
    }
}

/// Validate an input block.
pub(crate) fn block(bytes: &[u8]) -> Result<&Block, LengthError> {
    <&Block>::try_from(bytes).map_err(|_| LengthError {
        operand: Operand::Block,
        len: bytes.len(),
    })
}
