use crate::{key::LengthError, transaction::Stage};

/// Transaction errors.
///
/// Every error is terminal for the transaction that produced it.
/// After [`AcceleratorTimeout`], [`TransportFailure`], or [`DoneDeasserted`]
/// the accelerator is in an unknown state and must be reset by the caller
/// before it is used again.
///
/// [`AcceleratorTimeout`]: Error::AcceleratorTimeout
/// [`TransportFailure`]: Error::TransportFailure
/// [`DoneDeasserted`]: Error::DoneDeasserted
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error<E> {
    /// Key or input block has an invalid length.
    ///
    /// Detected before any bus activity.
    InvalidInputLength(LengthError),
    /// DONE was not asserted within the configured timeout.
    AcceleratorTimeout,
    /// The transport failed.
    ///
    /// No transport calls are made after the failing one.
    TransportFailure {
        /// Stage the transaction was in when the transport failed.
        stage: Stage,
        /// Error returned by the transport.
        source: E,
    },
    /// Cancellation was requested.
    ///
    /// If the request arrived after LOAD was asserted the result was drained
    /// and discarded.
    Cancelled,
    /// DONE read low after the drain.
    ///
    /// Only reported when
    /// [`Config::set_check_done_after_drain`](crate::Config::set_check_done_after_drain)
    /// is enabled.
    DoneDeasserted,
}

impl<E> Error<E> {
    /// Returns the transport error, if this is a transport failure.
    pub fn transport(&self) -> Option<&E> {
        match self {
            Error::TransportFailure { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns `true` if the accelerator must be reset before the next
    /// transaction.
    ///
    /// # Example
    ///
    /// ```
    /// use aes_accel::{Error, LengthError, Operand};
    ///
    /// let err: Error<()> = Error::AcceleratorTimeout;
    /// assert!(err.needs_reset());
    ///
    /// let err: Error<()> = Error::InvalidInputLength(LengthError {
    ///     operand: Operand::Key,
    ///     len: 15,
    /// });
    /// assert!(!err.needs_reset());
    /// ```
    pub fn needs_reset(&self) -> bool {
        matches!(
            self,
            Error::AcceleratorTimeout | Error::TransportFailure { .. } | Error::DoneDeasserted
        )
    }
}

impl<E> From<LengthError> for Error<E> {
    fn from(e: LengthError) -> Self {
        Error::InvalidInputLength(e)
    }
}
