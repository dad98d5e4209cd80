//! Transaction state machine

use crate::{
    cancel::CancelToken,
    key::{Block, Key, BLOCK_LEN},
    timeout::Config,
    transport::{Level, Line, Transport},
    Error,
};
use embedded_hal::blocking::delay::DelayUs;

/// Outgoing byte during the drain.
///
/// The accelerator ignores it.
const DRAIN_BYTE: u8 = 0x00;

/// Transaction stage.
///
/// A stage is entered once the control line change that starts it has been
/// accepted by the transport.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// No bus activity yet.
    Idle,
    /// LOAD is high, message and key bytes are being shifted in.
    Loading,
    /// LOAD is low, waiting for DONE.
    WaitingForDone,
    /// DONE is high, result bytes are being shifted out.
    Draining,
    /// Result drained.
    Complete,
}

/// One load, compute, drain cycle.
///
/// Borrows the accelerator's resources for the duration of a single call and
/// is consumed by [`run`](Transaction::run).
pub(crate) struct Transaction<'a, T, D> {
    transport: &'a mut T,
    delay: &'a mut D,
    config: Config,
    cancel: Option<&'a CancelToken>,
    stage: Stage,
    cancelled: bool,
}

impl<'a, T, D> Transaction<'a, T, D>
where
    T: Transport,
    D: DelayUs<u32>,
{
    pub(crate) fn new(
        transport: &'a mut T,
        delay: &'a mut D,
        config: Config,
        cancel: Option<&'a CancelToken>,
    ) -> Self {
        Self {
            transport,
            delay,
            config,
            cancel,
            stage: Stage::Idle,
            cancelled: false,
        }
    }

    pub(crate) fn run(mut self, key: Key<'_>, input: &Block) -> Result<Block, Error<T::Error>> {
        if self.cancel_requested() {
            debug!("cancelled before LOAD");
            return Err(Error::Cancelled);
        }

        self.load(key, input)?;
        self.wait_for_done()?;
        let result: Block = self.drain()?;
        self.enter(Stage::Complete);

        if self.cancelled || self.cancel_requested() {
            warn!("cancelled after LOAD, result discarded");
            Err(Error::Cancelled)
        } else {
            Ok(result)
        }
    }

    fn cancel_requested(&self) -> bool {
        self.cancel.is_some_and(CancelToken::is_cancelled)
    }

    fn enter(&mut self, stage: Stage) {
        trace!("{} -> {}", self.stage, stage);
        self.stage = stage;
    }

    fn fail(stage: Stage) -> impl FnOnce(T::Error) -> Error<T::Error> {
        move |source| Error::TransportFailure { stage, source }
    }

    fn load(&mut self, key: Key<'_>, input: &Block) -> Result<(), Error<T::Error>> {
        self.transport
            .write_control(Line::Load, Level::High)
            .map_err(Self::fail(self.stage))?;
        self.enter(Stage::Loading);

        // message bytes must precede key bytes
        for &byte in input.iter().chain(key.as_bytes()) {
            let _: u8 = self
                .transport
                .transfer_byte(byte)
                .map_err(Self::fail(self.stage))?;
        }

        self.transport
            .write_control(Line::Load, Level::Low)
            .map_err(Self::fail(self.stage))?;
        self.enter(Stage::WaitingForDone);
        Ok(())
    }

    fn wait_for_done(&mut self) -> Result<(), Error<T::Error>> {
        let timeout: u32 = self.config.timeout().as_micros();
        let interval: u32 = self.config.poll_interval().as_micros().max(1);
        let mut waited: u32 = 0;

        loop {
            let done: Level = self
                .transport
                .read_control(Line::Done)
                .map_err(Self::fail(self.stage))?;
            if done.is_high() {
                trace!("DONE after {=u32}us", waited);
                return Ok(());
            }

            if !self.cancelled && self.cancel_requested() {
                warn!("cancel requested while waiting for DONE, draining first");
                self.cancelled = true;
            }

            if waited >= timeout {
                warn!("DONE not asserted within {=u32}us", timeout);
                return Err(Error::AcceleratorTimeout);
            }

            // waited + step never exceeds timeout
            let step: u32 = interval.min(timeout - waited);
            self.delay.delay_us(step);
            waited += step;
        }
    }

    fn drain(&mut self) -> Result<Block, Error<T::Error>> {
        self.enter(Stage::Draining);

        let mut result: Block = [0; BLOCK_LEN];
        for byte in result.iter_mut() {
            *byte = self
                .transport
                .transfer_byte(DRAIN_BYTE)
                .map_err(Self::fail(self.stage))?;
        }

        if self.config.check_done_after_drain() {
            let done: Level = self
                .transport
                .read_control(Line::Done)
                .map_err(Self::fail(self.stage))?;
            if done.is_low() {
                warn!("DONE dropped during drain");
                return Err(Error::DoneDeasserted);
            }
        }

        Ok(result)
    }
}
