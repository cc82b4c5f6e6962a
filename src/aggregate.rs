// Mapping document aggregation
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

//! Locate and load every mapping document of the persistence unit.
//!
//! Mapping documents are collected in this order:
//!
//!   1. each `mapping-file` of each persistence unit of the persistence
//!        unit descriptor,
//!          in declaration order;
//!   2. the implicit [`global::ORM_XML`];
//!   3. any additional mapping documents provided by
//!        [`Options::orm_xml`].
//!
//! This order is significant:
//!   the first document carrying unit metadata determines the
//!   persistence unit defaults,
//!   and later declarations of a class override the access type
//!   information of earlier ones.
//!
//! Loading never fails.
//! A resource that does not exist contributes nothing,
//!   and one that cannot be read or parsed is reported as a warning and
//!   likewise contributes nothing.

use crate::diagnose::DiagnosticSink;
use crate::fs::Filesystem;
use crate::global;
use crate::pipeline::Options;
use crate::xml::{
    read_entity_mappings, read_persistence, MappingDocument, MappingResult,
};
use std::io::{BufReader, ErrorKind, Read};

/// Open `resource` and read it using `read`.
///
/// Every failure is reported to `sink` and yields [`None`].
pub fn load_resource<R, F, S, T>(
    fs: &mut F,
    sink: &mut S,
    resource: &str,
    read: impl FnOnce(BufReader<R>) -> MappingResult<T>,
) -> Option<T>
where
    R: Read,
    F: Filesystem<R>,
    S: DiagnosticSink,
{
    sink.note(format_args!("reading resource {resource}"));

    let stream = match fs.open(resource) {
        Ok(stream) => stream,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            sink.note(format_args!("{resource} not found"));
            return None;
        }
        Err(e) => {
            sink.warning(format_args!("error reading {resource}: {e}"));
            return None;
        }
    };

    match read(BufReader::new(stream)) {
        Ok(doc) => Some(doc),
        Err(e) => {
            sink.warning(format_args!("error unmarshalling {resource}: {e}"));
            None
        }
    }
}

/// Load a single mapping document.
pub fn load_mapping<R, F, S>(
    fs: &mut F,
    sink: &mut S,
    resource: &str,
) -> Option<MappingDocument>
where
    R: Read,
    F: Filesystem<R>,
    S: DiagnosticSink,
{
    load_resource(fs, sink, resource, |src| {
        read_entity_mappings(src, resource)
    })
}

/// Collect every mapping document of the persistence unit.
///
/// See the [module-level documentation](self) for ordering.
pub fn collect<R, F, S>(
    fs: &mut F,
    sink: &mut S,
    options: &Options,
) -> Vec<MappingDocument>
where
    R: Read,
    F: Filesystem<R>,
    S: DiagnosticSink,
{
    let mut docs = Vec::new();

    let descriptor =
        load_resource(fs, sink, &options.persistence_xml, read_persistence);

    for unit in descriptor.iter().flat_map(|d| d.units.iter()) {
        sink.note(format_args!(
            "persistence unit `{}` lists {} mapping file(s)",
            unit.name.as_deref().unwrap_or_default(),
            unit.mapping_files.len(),
        ));

        docs.extend(
            unit.mapping_files
                .iter()
                .filter_map(|file| load_mapping(fs, sink, file)),
        );
    }

    docs.extend(load_mapping(fs, sink, global::ORM_XML));

    docs.extend(
        options
            .orm_xml
            .iter()
            .filter_map(|file| load_mapping(fs, sink, file)),
    );

    docs
}
