//! Renders the one reply of a run and records that the run is complete.

use std::io::Write;

use anyhow::{Result, bail};

use crate::dispatch::Reply;
use crate::render;

/// Where a run is in its single request/reply exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingReply,
    Completed,
}

/// How the run completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The reply was rendered.
    Success,
    /// The daemon reported an error, which was printed.
    ReplyError,
    /// There was nothing to send.
    NothingSent,
}

pub struct Observer<W: Write> {
    out: W,
    phase: Phase,
}

impl<W: Write> Observer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Mark the request as sent.
    pub fn request_sent(&mut self) -> Result<()> {
        if self.phase != Phase::Idle {
            bail!("request already sent (phase {:?})", self.phase);
        }
        self.phase = Phase::AwaitingReply;
        Ok(())
    }

    /// Render `reply`, or print the daemon's error, and complete the run.
    ///
    /// Only one completion is accepted; a second one is an error and prints
    /// nothing.
    pub fn complete(&mut self, reply: Result<Reply, String>) -> Result<Outcome> {
        if self.phase != Phase::AwaitingReply {
            bail!("unexpected reply (phase {:?})", self.phase);
        }
        self.phase = Phase::Completed;

        let outcome = match reply {
            Ok(Reply::Plugins {
                plugins,
                filter: Some(id),
            }) => {
                render::plugin_descriptions(&mut self.out, &plugins, id)?;
                Outcome::Success
            }
            Ok(Reply::Plugins {
                plugins,
                filter: None,
            }) => {
                render::plugin_list(&mut self.out, &plugins)?;
                Outcome::Success
            }
            Ok(Reply::Devices(devices)) => {
                render::device_list(&mut self.out, &devices)?;
                Outcome::Success
            }
            Ok(Reply::Universes(universes)) => {
                render::universe_list(&mut self.out, &universes)?;
                Outcome::Success
            }
            Ok(Reply::Done) => Outcome::Success,
            Err(message) => {
                writeln!(self.out, "{message}")?;
                Outcome::ReplyError
            }
        };

        self.out.flush()?;
        Ok(outcome)
    }

    /// Complete a run that never sent a request.
    pub fn complete_without_request(&mut self) -> Result<Outcome> {
        if self.phase != Phase::Idle {
            bail!("cannot skip a request already sent (phase {:?})", self.phase);
        }
        self.phase = Phase::Completed;
        Ok(Outcome::NothingSent)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
