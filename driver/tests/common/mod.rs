#![allow(dead_code)]

use aes_accel::{
    embedded_hal::blocking::delay::DelayUs,
    transport::{Level, Line, Transport},
    Block,
};
use std::collections::VecDeque;

/// Every call made on a [`MockTransport`], in order.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Event {
    Write(Line, Level),
    Read(Line),
    Transfer(u8),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MockError;

/// Transport double that records calls and replays canned responses.
#[derive(Debug, Default)]
pub struct MockTransport {
    pub events: Vec<Event>,
    /// DONE reads low this many times before reading high.
    /// `None` keeps DONE low forever.
    pub done_after: Option<usize>,
    /// Responses for the drain, front first.
    pub drain: VecDeque<u8>,
    /// DONE level after the drain has started.
    pub done_during_drain: Option<Level>,
    /// Fail the n-th (zero based) `transfer_byte` call.
    pub fail_transfer: Option<usize>,
    /// Fail the n-th (zero based) `write_control` call.
    pub fail_write: Option<usize>,
    /// Fail every `read_control` call.
    pub fail_read: bool,
    done_reads: usize,
    transfers: usize,
    writes: usize,
    draining: bool,
}

impl MockTransport {
    /// DONE high on the first read, `result` shifted out during the drain.
    pub fn replaying(result: Block) -> Self {
        MockTransport {
            done_after: Some(0),
            drain: result.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|ev| match ev {
                Event::Transfer(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn done_polls(&self) -> usize {
        self.events
            .iter()
            .filter(|ev| **ev == Event::Read(Line::Done))
            .count()
    }
}

impl Transport for MockTransport {
    type Error = MockError;

    fn write_control(&mut self, line: Line, level: Level) -> Result<(), MockError> {
        self.events.push(Event::Write(line, level));
        let n = self.writes;
        self.writes += 1;
        if self.fail_write == Some(n) {
            return Err(MockError);
        }
        if line == Line::Load && level == Level::High {
            self.draining = false;
        }
        Ok(())
    }

    fn read_control(&mut self, line: Line) -> Result<Level, MockError> {
        self.events.push(Event::Read(line));
        if self.fail_read {
            return Err(MockError);
        }
        if self.draining {
            if let Some(level) = self.done_during_drain {
                return Ok(level);
            }
        }
        let level = match self.done_after {
            Some(n) if self.done_reads >= n => Level::High,
            _ => Level::Low,
        };
        self.done_reads += 1;
        if level.is_high() {
            self.draining = true;
        }
        Ok(level)
    }

    fn transfer_byte(&mut self, byte: u8) -> Result<u8, MockError> {
        self.events.push(Event::Transfer(byte));
        let n = self.transfers;
        self.transfers += 1;
        if self.fail_transfer == Some(n) {
            return Err(MockError);
        }
        if self.draining {
            let rx = self.drain.pop_front().unwrap_or(0xFF);
            // replay the same bytes for the next transaction
            self.drain.push_back(rx);
            Ok(rx)
        } else {
            Ok(0xEE)
        }
    }
}

/// Delay double that only accumulates the requested time.
#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_us: u64,
    pub calls: usize,
}

impl DelayUs<u32> for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.total_us += u64::from(us);
        self.calls += 1;
    }
}
