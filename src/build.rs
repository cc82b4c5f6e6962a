// Class descriptor construction
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

//! Build [`ClassDescriptor`]s for the generator.
//!
//! Every class declaration of every mapping document is considered in
//!   aggregation order,
//!     and within each document entities are considered before
//!     embeddables and mapped superclasses.
//! A declaration yields a descriptor only if its class exists in the
//!   [`ClassUniverse`] and no descriptor has yet been registered under the
//!   same name;
//!     the first declaration of a class therefore wins.
//!
//! A class declared twice within the same round is reported as a warning.
//! A class registered by a previous round is expected,
//!   since every round re-reads the same mapping documents,
//!   and is only noted.

use crate::access::AccessTypeInfo;
use crate::context::{ClassDescriptor, Context};
use crate::diagnose::DiagnosticSink;
use crate::universe::ClassUniverse;
use crate::xml::MappingDocument;
use fxhash::FxHashSet;

/// Build and register descriptors for every declared class.
///
/// This must run after access types have been resolved
///   (see [`crate::resolve`]).
/// Returns the number of descriptors registered.
pub fn build_descriptors<U, S>(
    docs: &[MappingDocument],
    universe: &U,
    ctx: &mut Context<U::Class>,
    sink: &mut S,
) -> usize
where
    U: ClassUniverse,
    S: DiagnosticSink,
{
    let mut registered = FxHashSet::default();

    for doc in docs {
        for decl in doc.declarations() {
            let fqcn = doc.fqcn(decl);

            let Some(class) = universe.find_class(&fqcn) else {
                sink.warning(format_args!(
                    "{fqcn} is mapped in xml, but class does not exist. \
                        Skipping meta model generation."
                ));
                continue;
            };

            if ctx.contains_descriptor(&fqcn) {
                if registered.contains(&fqcn) {
                    sink.warning(format_args!(
                        "{fqcn} has already been processed; \
                            ignoring duplicate {} declaration in {}",
                        decl.kind.class_kind(),
                        doc.resource,
                    ));
                } else {
                    sink.note(format_args!(
                        "{fqcn} was processed in a previous round"
                    ));
                }

                continue;
            }

            let access = ctx.access_info(&fqcn).cloned().unwrap_or_else(|| {
                let default =
                    doc.access.unwrap_or(ctx.unit().default_access());
                AccessTypeInfo::new(fqcn.as_str(), decl.access, default)
            });

            sink.note(format_args!(
                "{} {fqcn} uses access type {}",
                decl.kind.class_kind(),
                access.access_type(),
            ));

            ctx.register(ClassDescriptor::new(access, class, decl.clone()));
            registered.insert(fqcn);
        }
    }

    registered.len()
}
