use core::time::Duration;

/// Error for a value that is out of bounds.
///
/// Used by [`Timeout::from_duration`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValueError<T> {
    value: T,
    limit: T,
    over: bool,
}

impl<T: Copy> ValueError<T> {
    /// Create a new `ValueError` for a value that exceeded an upper bound.
    ///
    /// # Example
    ///
    /// ```
    /// use aes_accel::ValueError;
    ///
    /// let error: ValueError<u8> = ValueError::too_high(101u8, 100u8);
    /// assert!(error.over());
    /// assert!(!error.under());
    /// ```
    pub const fn too_high(value: T, limit: T) -> ValueError<T> {
        ValueError {
            value,
            limit,
            over: true,
        }
    }

    /// Create a new `ValueError` for a value that exceeded a lower bound.
    pub const fn too_low(value: T, limit: T) -> ValueError<T> {
        ValueError {
            value,
            limit,
            over: false,
        }
    }

    /// Get the value that caused the error.
    pub const fn value(&self) -> T {
        self.value
    }

    /// Get the limit for the value.
    pub const fn limit(&self) -> T {
        self.limit
    }

    /// Returns `true` if the value was over the limit.
    pub const fn over(&self) -> bool {
        self.over
    }

    /// Returns `true` if the value was under the limit.
    pub const fn under(&self) -> bool {
        !self.over
    }
}

/// Time bound for the DONE poll.
///
/// Each timeout is a 32-bit count of microseconds, giving a range of 0s to
/// 4294.967295s.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeout {
    micros: u32,
}

impl Timeout {
    /// Zero timeout; DONE is sampled exactly once.
    ///
    /// # Example
    ///
    /// ```
    /// use aes_accel::Timeout;
    /// use core::time::Duration;
    ///
    /// assert_eq!(Timeout::DISABLED.as_duration(), Duration::ZERO);
    /// ```
    pub const DISABLED: Timeout = Timeout { micros: 0 };

    /// Minimum non-zero timeout, 1µs.
    pub const MIN: Timeout = Timeout { micros: 1 };

    /// Maximum timeout, 4294.967295s.
    ///
    /// # Example
    ///
    /// ```
    /// use aes_accel::Timeout;
    /// use core::time::Duration;
    ///
    /// assert_eq!(
    ///     Timeout::MAX.as_duration(),
    ///     Duration::from_micros(4_294_967_295)
    /// );
    /// ```
    pub const MAX: Timeout = Timeout { micros: u32::MAX };

    /// Timeout resolution, 1µs.
    pub const RESOLUTION: Duration = Duration::from_micros(1);

    /// Create a new timeout from microseconds.
    pub const fn from_micros(micros: u32) -> Timeout {
        Timeout { micros }
    }

    /// Create a new timeout from milliseconds, saturating at [`Timeout::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use aes_accel::Timeout;
    ///
    /// assert_eq!(Timeout::from_millis(5).as_micros(), 5_000);
    /// assert_eq!(Timeout::from_millis(u32::MAX), Timeout::MAX);
    /// ```
    pub const fn from_millis(millis: u32) -> Timeout {
        Timeout {
            micros: millis.saturating_mul(1000),
        }
    }

    /// Create a new timeout from a [`Duration`].
    ///
    /// Sub-microsecond parts are truncated.
    /// Returns a [`ValueError`] holding the requested and maximum microsecond
    /// counts if the duration does not fit.
    ///
    /// # Example
    ///
    /// ```
    /// use aes_accel::{Timeout, ValueError};
    /// use core::time::Duration;
    ///
    /// assert_eq!(
    ///     Timeout::from_duration(Duration::from_millis(250)),
    ///     Ok(Timeout::from_micros(250_000))
    /// );
    ///
    /// let too_long: Duration = Duration::from_secs(5_000);
    /// assert_eq!(
    ///     Timeout::from_duration(too_long),
    ///     Err(ValueError::too_high(5_000_000_000, u32::MAX as u128))
    /// );
    /// ```
    pub const fn from_duration(duration: Duration) -> Result<Timeout, ValueError<u128>> {
        let micros: u128 = duration.as_micros();
        if micros > u32::MAX as u128 {
            Err(ValueError::too_high(micros, u32::MAX as u128))
        } else {
            Ok(Timeout {
                micros: micros as u32,
            })
        }
    }

    /// Create a new timeout from a [`Duration`], saturating at
    /// [`Timeout::MAX`].
    pub const fn from_duration_sat(duration: Duration) -> Timeout {
        match Self::from_duration(duration) {
            Ok(timeout) => timeout,
            Err(_) => Timeout::MAX,
        }
    }

    /// Timeout in microseconds.
    pub const fn as_micros(&self) -> u32 {
        self.micros
    }

    /// Timeout as a [`Duration`].
    pub const fn as_duration(&self) -> Duration {
        Duration::from_micros(self.micros as u64)
    }

    /// Returns `true` for a zero timeout.
    pub const fn is_disabled(&self) -> bool {
        self.micros == 0
    }
}

impl From<Timeout> for Duration {
    fn from(to: Timeout) -> Self {
        to.as_duration()
    }
}

impl TryFrom<Duration> for Timeout {
    type Error = ValueError<u128>;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        Timeout::from_duration(duration)
    }
}

/// Transaction driver configuration.
///
/// # Example
///
/// ```
/// use aes_accel::{Config, Timeout};
///
/// const CONFIG: Config = Config::new()
///     .set_timeout(Timeout::from_millis(20))
///     .set_poll_interval(Timeout::from_micros(50))
///     .set_check_done_after_drain(true);
///
/// assert_eq!(CONFIG.timeout(), Timeout::from_micros(20_000));
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    timeout: Timeout,
    poll_interval: Timeout,
    check_done_after_drain: bool,
}

impl Config {
    /// Default DONE timeout, 100ms.
    pub const DEFAULT_TIMEOUT: Timeout = Timeout::from_millis(100);

    /// Default delay between DONE samples, 10µs.
    pub const DEFAULT_POLL_INTERVAL: Timeout = Timeout::from_micros(10);

    /// Create a new configuration with default values.
    pub const fn new() -> Config {
        Config {
            timeout: Self::DEFAULT_TIMEOUT,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            check_done_after_drain: false,
        }
    }

    /// Set the maximum time to wait for DONE after LOAD is deasserted.
    #[must_use = "set_timeout returns a modified Config"]
    pub const fn set_timeout(mut self, timeout: Timeout) -> Config {
        self.timeout = timeout;
        self
    }

    /// Set the delay between DONE samples.
    ///
    /// A zero interval is rounded up to [`Timeout::MIN`].
    #[must_use = "set_poll_interval returns a modified Config"]
    pub const fn set_poll_interval(mut self, interval: Timeout) -> Config {
        self.poll_interval = if interval.is_disabled() {
            Timeout::MIN
        } else {
            interval
        };
        self
    }

    /// Sample DONE once more after the drain and fail with
    /// [`Error::DoneDeasserted`](crate::Error::DoneDeasserted) if it dropped.
    #[must_use = "set_check_done_after_drain returns a modified Config"]
    pub const fn set_check_done_after_drain(mut self, check: bool) -> Config {
        self.check_done_after_drain = check;
        self
    }

    /// DONE timeout.
    pub const fn timeout(&self) -> Timeout {
        self.timeout
    }

    /// Delay between DONE samples, never zero.
    pub const fn poll_interval(&self) -> Timeout {
        self.poll_interval
    }

    /// Post-drain DONE check.
    pub const fn check_done_after_drain(&self) -> bool {
        self.check_done_after_drain
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
