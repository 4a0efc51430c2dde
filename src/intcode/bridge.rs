//! Channels between a running core and its controller.
//!
//! Every channel is a rendezvous channel: a send only completes once the other
//! side has taken the value. The core's end is dropped when it halts (or
//! faults), which closes the data channels and the readiness channel at once.

use std::collections::VecDeque;
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use thiserror::Error;
use tracing::trace;

/// The other side of a channel is gone.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("channel closed")]
pub struct Closed;

/// No value arrived within the diagnostic timeout.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no value within {0:?}")]
pub struct Stalled(pub Duration);

/// Source and sink of values for the input and output instructions.
pub trait Io {
    fn input(&mut self) -> Result<i64, Closed>;
    fn output(&mut self, value: i64) -> Result<(), Closed>;
}

/// Whether the core pulses a readiness signal before every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Streaming,
    Interactive,
}

/// In-memory queue, for running a program to completion on the caller's thread.
#[derive(Debug, Default, Clone)]
pub struct BufferedIo {
    pub input: VecDeque<i64>,
    pub output: Vec<i64>,
}

impl BufferedIo {
    pub fn new(input: impl IntoIterator<Item = i64>) -> Self {
        Self { input: input.into_iter().collect(), output: Vec::new() }
    }
}

impl Io for BufferedIo {
    fn input(&mut self) -> Result<i64, Closed> {
        self.input.pop_front().ok_or(Closed)
    }

    fn output(&mut self, value: i64) -> Result<(), Closed> {
        self.output.push(value);
        Ok(())
    }
}

/// The core's end of the bridge.
pub struct CoreIo {
    inbox: Receiver<i64>,
    outbox: Sender<i64>,
    ready: Option<Sender<()>>,
}

impl CoreIo {
    /// Hangs up every channel. Consuming `self` makes this happen once.
    pub fn close(self) {
        trace!(interactive = self.ready.is_some(), "core channels closed");
    }
}

impl Io for CoreIo {
    fn input(&mut self) -> Result<i64, Closed> {
        if let Some(ready) = &self.ready {
            ready.send(()).map_err(|_| Closed)?;
        }
        self.inbox.recv().map_err(|_| Closed)
    }

    fn output(&mut self, value: i64) -> Result<(), Closed> {
        self.outbox.send(value).map_err(|_| Closed)
    }
}

/// The controller's end of the bridge.
pub struct Port {
    tx: Sender<i64>,
    rx: Receiver<i64>,
    ready: Option<Receiver<()>>,
}

impl Port {
    pub fn is_interactive(&self) -> bool {
        self.ready.is_some()
    }

    /// Hands a value to the core, blocking until an input instruction takes it.
    pub fn send(&self, value: i64) -> Result<(), Closed> {
        self.tx.send(value).map_err(|_| Closed)
    }

    pub fn send_all(&self, values: impl IntoIterator<Item = i64>) -> Result<(), Closed> {
        values.into_iter().try_for_each(|v| self.send(v))
    }

    /// Sends `line` as ASCII codes followed by a newline.
    pub fn send_line(&self, line: &str) -> Result<(), Closed> {
        trace!(line, "sending line");
        self.send_all(line.bytes().map(i64::from).chain(std::iter::once(NEWLINE)))
    }

    /// Next output of the core, or `None` once it has halted.
    pub fn recv(&self) -> Option<i64> {
        self.rx.recv().ok()
    }

    /// Like `recv`, but gives up after `timeout`. Only meant for diagnosing a
    /// stuck protocol; the core itself never times out.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<i64>, Stalled> {
        match self.rx.recv_timeout(timeout) {
            Ok(v) => Ok(Some(v)),
            Err(RecvTimeoutError::Disconnected) => Ok(None),
            Err(RecvTimeoutError::Timeout) => Err(Stalled(timeout)),
        }
    }

    /// Blocks until the core is about to read a value. Returns `false` once
    /// the core has halted, and always for a streaming port.
    pub fn wait_ready(&self) -> bool {
        match &self.ready {
            Some(ready) => ready.recv().is_ok(),
            None => false,
        }
    }

    /// Discards outputs up to and including the next newline. Returns `false`
    /// if the stream closed first.
    pub fn skip_line(&self) -> bool {
        while let Some(v) = self.recv() {
            if v == NEWLINE {
                return true;
            }
        }
        false
    }

    /// Drains outputs until the core halts.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.rx.iter()
    }
}

pub const NEWLINE: i64 = 10;

pub fn pair(protocol: Protocol) -> (CoreIo, Port) {
    let (to_core, inbox) = channel::bounded(0);
    let (outbox, from_core) = channel::bounded(0);
    let (ready_tx, ready_rx) = match protocol {
        Protocol::Interactive => {
            let (tx, rx) = channel::bounded(0);
            (Some(tx), Some(rx))
        }
        Protocol::Streaming => (None, None),
    };

    let core = CoreIo { inbox, outbox, ready: ready_tx };
    let port = Port { tx: to_core, rx: from_core, ready: ready_rx };
    (core, port)
}
