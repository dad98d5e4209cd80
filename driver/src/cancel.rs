use core::sync::atomic::{AtomicBool, Ordering::SeqCst};

/// Cancellation request for a transaction.
///
/// A token can live in a `static` and be set from an interrupt handler or
/// another execution context while a transaction is running.
///
/// * Set before LOAD is asserted, the transaction returns
///   [`Error::Cancelled`](crate::Error::Cancelled) without touching the bus.
/// * Set after LOAD is asserted, the accelerator has no abort mechanism so the
///   transaction still drains the result, then discards it and returns
///   [`Error::Cancelled`](crate::Error::Cancelled).
///
/// # Example
///
/// ```
/// use aes_accel::CancelToken;
///
/// static CANCEL: CancelToken = CancelToken::new();
///
/// CANCEL.cancel();
/// assert!(CANCEL.is_cancelled());
/// CANCEL.reset();
/// assert!(!CANCEL.is_cancelled());
/// ```
#[derive(Debug, Default)]
pub struct CancelToken {
    cancelled: AtomicBool,
}

impl CancelToken {
    /// Create a new token that is not cancelled.
    pub const fn new() -> CancelToken {
        CancelToken {
            cancelled: AtomicBool::new(false),
        }
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, SeqCst)
    }

    /// Returns `true` if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(SeqCst)
    }

    /// Clear a cancellation request.
    pub fn reset(&self) {
        self.cancelled.store(false, SeqCst)
    }
}
