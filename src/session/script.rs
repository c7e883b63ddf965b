//! Event sources that drive a batch without a window
//!
//! - `ScriptedEvents` replays a JSON list of events
//! - `LineEvents` reads console commands, one per line

use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::Path;

use crate::session::messages::SessionEvent;
use crate::session::shortcuts::{Command, parse_command};

/// Anything that can hand the controller its next event
pub trait EventSource {
    /// `Ok(None)` once the source has nothing more to say
    fn next_event(&mut self) -> Result<Option<SessionEvent>>;
}

/// A pre-recorded list of events
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    events: VecDeque<SessionEvent>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = SessionEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Load a JSON array of events
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event script: {}", path.display()))?;
        let events: Vec<SessionEvent> = serde_json::from_str(&json)
            .with_context(|| format!("Invalid event script: {}", path.display()))?;
        log::info!("Loaded {} scripted events from {}", events.len(), path.display());
        Ok(Self::new(events))
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> Result<Option<SessionEvent>> {
        Ok(self.events.pop_front())
    }
}

/// Console commands read line by line
pub struct LineEvents<R> {
    reader: R,
    pending: VecDeque<SessionEvent>,
}

impl<R: BufRead> LineEvents<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> EventSource for LineEvents<R> {
    fn next_event(&mut self) -> Result<Option<SessionEvent>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }

            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .context("Failed to read command")?;
            if read == 0 {
                return Ok(None);
            }

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_command(line) {
                Some(Command::Event(event)) => self.pending.push_back(event),
                Some(Command::Click(x, y)) => {
                    self.pending.push_back(SessionEvent::pointer_down(x, y));
                    self.pending.push_back(SessionEvent::pointer_up(x, y));
                }
                None => log::warn!("Ignoring unknown command: {line}"),
            }
        }
    }
}
