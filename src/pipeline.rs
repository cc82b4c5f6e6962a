// Processing pipeline
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

//! Processing pipeline.
//!
//! A single processing round is composed of the following steps,
//!   connected in series:
//!
//! ```text
//!   aggregate -> resolve defaults -> resolve access types -> build
//!                                     (+ annotations)
//! ```
//!
//! Each step is a function over the aggregated mapping documents and a
//!   shared [`Context`];
//!     the [`Processor`] owns that context so that the results of each
//!     round accumulate into it.
//! Rounds are independent of one another save for the context:
//!   each round re-reads its mapping documents from scratch.
//!
//! The host compiler decides when rounds happen.
//! Processing is synchronous and runs to completion;
//!   no step can fail.

use crate::aggregate;
use crate::build::build_descriptors;
use crate::context::Context;
use crate::diagnose::DiagnosticSink;
use crate::fs::Filesystem;
use crate::global;
use crate::resolve::{
    resolve_access_types, resolve_annotation_access_types, resolve_defaults,
};
use crate::universe::ClassUniverse;
use std::io::Read;

/// Configuration supplied by the host.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Options {
    /// Resource name of the persistence unit descriptor.
    pub persistence_xml: String,

    /// Additional mapping documents,
    ///   loaded after all others.
    pub orm_xml: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            persistence_xml: global::PERSISTENCE_XML.into(),
            orm_xml: Vec::new(),
        }
    }
}

/// Parse a comma-separated list of mapping document resource names.
///
/// Surrounding whitespace is trimmed and blank entries are dropped.
pub fn parse_orm_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Run processing rounds against a single [`Context`].
#[derive(Debug)]
pub struct Processor<U: ClassUniverse> {
    universe: U,
    options: Options,
    context: Context<U::Class>,
    rounds: usize,
}

impl<U: ClassUniverse> Processor<U> {
    pub fn new(universe: U, options: Options) -> Self {
        Self {
            universe,
            options,
            context: Context::new(),
            rounds: 0,
        }
    }

    pub fn universe(&self) -> &U {
        &self.universe
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn context(&self) -> &Context<U::Class> {
        &self.context
    }

    pub fn into_context(self) -> Context<U::Class> {
        self.context
    }

    /// Number of rounds processed thus far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Process a single round,
    ///   loading mapping documents from `fs`.
    ///
    /// Returns the number of descriptors registered by this round.
    pub fn process_round<R, F, S>(&mut self, fs: &mut F, sink: &mut S) -> usize
    where
        R: Read,
        F: Filesystem<R>,
        S: DiagnosticSink,
    {
        self.rounds += 1;

        let docs = aggregate::collect(fs, sink, &self.options);
        let ctx = &mut self.context;

        sink.note(format_args!(
            "round {}: {} mapping document(s)",
            self.rounds,
            docs.len()
        ));

        resolve_defaults(&docs, ctx, sink);
        resolve_access_types(&docs, ctx);

        if !ctx.unit().is_xml_complete() {
            resolve_annotation_access_types(&docs, &self.universe, ctx, sink);
        }

        build_descriptors(&docs, &self.universe, ctx, sink)
    }
}
