// Diagnostic system
//
//  Copyright (C) 2014-2023 Ryan Specialty, LLC.
//
//  This file is part of TAME.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Diagnostic system for reporting non-fatal conditions.
//!
//! Nothing that happens while processing mapping documents is fatal:
//!   missing resources,
//!   malformed documents,
//!   references to unknown classes,
//!   and duplicate declarations all result in something being skipped.
//! Each of those events is reported to a [`DiagnosticSink`] so that the
//!   user can learn why output is missing.
//!
//! A sink must never fail and must never abort processing.

use std::fmt::{self, Display};

/// Diagnostic severity level.
///
/// Lower levels are more severe.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
#[repr(u8)]
pub enum Level {
    /// Something was skipped that the user probably wanted processed.
    Warning = 1,

    /// Informational messages describing what is being processed.
    #[default]
    Note,
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
        }
    }
}

/// Recipient of diagnostic messages.
pub trait DiagnosticSink {
    fn log(&mut self, level: Level, message: String);

    fn warning<M: Display>(&mut self, message: M)
    where
        Self: Sized,
    {
        self.log(Level::Warning, message.to_string())
    }

    fn note<M: Display>(&mut self, message: M)
    where
        Self: Sized,
    {
        self.log(Level::Note, message.to_string())
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn log(&mut self, level: Level, message: String) {
        (**self).log(level, message)
    }
}

/// Forward diagnostics to [`tracing`].
///
/// Warnings are emitted at the `WARN` level and notes at `DEBUG`,
///   so notes are hidden unless the subscriber asks for them.
#[derive(Debug, Default)]
pub struct TracingSink {
    warnings: usize,
}

impl TracingSink {
    pub fn new() -> Self {
        Default::default()
    }

    /// Number of warnings reported thus far.
    pub fn warning_count(&self) -> usize {
        self.warnings
    }
}

impl DiagnosticSink for TracingSink {
    fn log(&mut self, level: Level, message: String) {
        match level {
            Level::Warning => {
                self.warnings += 1;
                tracing::warn!("{message}");
            }
            Level::Note => tracing::debug!("{message}"),
        }
    }
}

/// Retain every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Vec<(Level, String)>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn entries(&self) -> &[(Level, String)] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(level, _)| *level == Level::Warning)
            .map(|(_, msg)| msg.as_str())
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}

impl DiagnosticSink for CollectingSink {
    fn log(&mut self, level: Level, message: String) {
        self.entries.push((level, message));
    }
}
