//! Interactive session: one explicit context object holding the store and
//! configuration, fed one command line at a time.

pub mod handlers;
pub mod help;
pub mod render;

use std::io::{self, BufRead, Write};
use tracing::{debug, warn};
use crate::core::config::Config;
use crate::core::error::ErrorKind;
use crate::core::store::Store;
use crate::query::parser::CommandParser;

/// Whether the REPL should keep reading lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session {
    config: Config,
    store: Store,
    parser: CommandParser,
    dirty: bool,   // in-memory changes not yet saved
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self::with_store(config, Store::new())
    }

    pub fn with_store(config: Config, store: Store) -> Self {
        Session {
            config,
            store,
            parser: CommandParser::new(),
            dirty: false,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Parse and run one line.
    ///
    /// `input` is only read for the DELETE confirmation. Command failures are
    /// reported on `out` and never end the session; only a failure to write
    /// to `out` is returned as an error.
    pub fn process_line<R: BufRead, W: Write>(
        &mut self,
        line: &str,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let result = self
            .parser
            .parse(line)
            .and_then(|command| {
                debug!(?command, "dispatching");
                self.execute(command, input, out)
            });

        match result {
            Ok(flow) => Ok(flow),
            Err(e) => {
                if e.is(ErrorKind::Io) {
                    warn!(error = %e, "command failed");
                } else {
                    debug!(kind = ?e.kind, error = %e, "command rejected");
                }
                writeln!(out, "Error: {}", e)?;
                Ok(Flow::Continue)
            }
        }
    }
}
