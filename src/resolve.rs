// Access type resolution
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

//! Resolve persistence unit defaults and per-class access types.
//!
//! Resolution happens in up to three passes over the aggregated mapping
//!   documents,
//!     each of which must run in this order:
//!
//!   1. [`resolve_defaults`] installs the persistence unit defaults
//!        carried by the first unit metadata block;
//!   2. [`resolve_access_types`] records the explicit and default access
//!        type of every declared class; and
//!   3. [`resolve_annotation_access_types`] consults the annotated type
//!        hierarchy,
//!          unless the persistence unit is XML-complete.
//!
//! The effective access type of a class is then,
//!   highest precedence first:
//!
//!   1. the explicit access type of its mapping document declaration;
//!   2. the access type annotated on the class itself;
//!   3. the access type of the nearest mapped ancestor that has one,
//!        or failing that the placement of the nearest identifier mapping
//!        (see below);
//!   4. the default access type of its mapping document;
//!   5. the default access type of the persistence unit; and
//!   6. [`global::FALLBACK_ACCESS_TYPE`](crate::global::FALLBACK_ACCESS_TYPE).
//!
//! Walking the Hierarchy
//! =====================
//! Each level of the hierarchy is considered nearest first,
//!   starting with the class itself.
//! The class itself contributes only the placement of its identifier
//!   mapping,
//!     since its own annotation is recorded separately.
//! Each ancestor contributes,
//!   in order of preference,
//!     its explicit mapping document access type,
//!     its annotated access type,
//!     and the placement of its identifier mapping.
//! The first level that contributes anything determines the inherited
//!   access type.
//!
//! The walk stops at the root of the hierarchy or at the first ancestor
//!   that is neither annotated as mapped nor declared in a mapping
//!   document.
//!
//! Embedded Classes
//! ================
//! An embeddable has no hierarchy of its own that determines its access
//!   type;
//!     it instead takes that of the class that embeds it.
//! Once an entity or mapped superclass is resolved,
//!   each embeddable it embeds that is declared in a mapping document
//!   receives the owner's access type,
//!     unless it has its own explicit or annotated access type.

use crate::access::{AccessType, AccessTypeInfo};
use crate::context::Context;
use crate::diagnose::DiagnosticSink;
use crate::universe::ClassUniverse;
use crate::xml::{ClassDeclaration, MappingDocument};
use fxhash::FxHashSet;

/// Install persistence unit defaults from the first unit metadata block.
///
/// Documents are scanned in aggregation order.
/// The first block found is authoritative and every later block is
///   ignored,
///     whether or not it agrees.
/// Once a context has been given unit defaults it keeps them for every
///   subsequent round.
pub fn resolve_defaults<H, S: DiagnosticSink>(
    docs: &[MappingDocument],
    ctx: &mut Context<H>,
    sink: &mut S,
) {
    if let Some(source) = ctx.unit().source() {
        sink.note(format_args!(
            "persistence unit defaults already provided by {source}"
        ));
        return;
    }

    let found = docs
        .iter()
        .find_map(|doc| doc.unit_metadata.map(|meta| (doc, meta)));

    match found {
        Some((doc, meta)) => {
            ctx.unit_mut().apply(
                doc.resource.as_str(),
                meta.xml_mapping_metadata_complete,
                meta.default_access,
            );

            let unit = ctx.unit();

            sink.note(format_args!(
                "persistence unit defaults from {}: access {}{}",
                doc.resource,
                unit.default_access(),
                if unit.is_xml_complete() {
                    ", xml-mapping-metadata-complete"
                } else {
                    ""
                },
            ));
        }

        None => sink.note(format_args!(
            "no persistence unit defaults; using access {}",
            ctx.unit().default_access()
        )),
    }
}

/// Record the explicit and default access type of every declared class.
///
/// A class declared in more than one document takes the information of
///   the last;
///     duplicates are detected later,
///       when descriptors are built.
pub fn resolve_access_types<H>(docs: &[MappingDocument], ctx: &mut Context<H>) {
    for doc in docs {
        let default = doc.access.unwrap_or(ctx.unit().default_access());

        for decl in doc.declarations() {
            ctx.add_access_info(AccessTypeInfo::new(
                doc.fqcn(decl),
                decl.access,
                default,
            ));
        }
    }
}

/// Consult annotations and the type hierarchy of every entity and mapped
///   superclass.
///
/// This does nothing if the persistence unit is XML-complete.
/// Classes that are declared `metadata-complete` have their own
///   annotations ignored,
///     but may still inherit from their hierarchy.
/// Classes that do not exist in `universe` are left alone;
///   they are reported when descriptors are built.
///
/// See the [module-level documentation](self) for the rules.
pub fn resolve_annotation_access_types<U, S>(
    docs: &[MappingDocument],
    universe: &U,
    ctx: &mut Context<U::Class>,
    sink: &mut S,
) where
    U: ClassUniverse,
    S: DiagnosticSink,
{
    if ctx.unit().is_xml_complete() {
        sink.note("persistence unit is xml-complete; ignoring annotations");
        return;
    }

    for doc in docs {
        let decls = doc.entities.iter().chain(doc.mapped_superclasses.iter());

        for decl in decls {
            let fqcn = doc.fqcn(decl);

            if let Some(class) = universe.find_class(&fqcn) {
                resolve_class(universe, ctx, sink, &fqcn, decl, &class);
            }
        }
    }
}

fn resolve_class<U, S>(
    universe: &U,
    ctx: &mut Context<U::Class>,
    sink: &mut S,
    fqcn: &str,
    decl: &ClassDeclaration,
    class: &U::Class,
) where
    U: ClassUniverse,
    S: DiagnosticSink,
{
    let annotated = match decl.metadata_complete {
        Some(true) => None,
        _ => universe.annotation_access_type(class),
    };

    let inherited = inherited_access_type(universe, ctx, class);

    let Some(info) = ctx.access_info_mut(fqcn) else {
        return;
    };

    if let Some(access) = annotated {
        info.set_annotated(access);
    }

    if let Some(access) = inherited {
        sink.note(format_args!("{fqcn} inherits access type {access}"));
        info.set_inherited(access);
    }

    let owner_access = info.access_type();

    for embedded in universe.embedded_classes(class) {
        propagate_to_embedded(universe, ctx, sink, &embedded, owner_access);
    }
}

/// Give an embedded class the access type of its owner.
///
/// Classes not declared in a mapping document are not tracked and are
///   left alone.
fn propagate_to_embedded<U, S>(
    universe: &U,
    ctx: &mut Context<U::Class>,
    sink: &mut S,
    fqcn: &str,
    owner_access: AccessType,
) where
    U: ClassUniverse,
    S: DiagnosticSink,
{
    let annotated = universe
        .find_class(fqcn)
        .and_then(|class| universe.annotation_access_type(&class));

    let Some(info) = ctx.access_info_mut(fqcn) else {
        return;
    };

    if let Some(access) = annotated {
        info.set_annotated(access);
    } else if info.is_defaulted() {
        sink.note(format_args!(
            "embeddable {fqcn} takes access type {owner_access} of its owner"
        ));
        info.set_inherited(owner_access);
    }
}

/// Access type inherited by `class` from its hierarchy,
///   if any.
///
/// See the [module-level documentation](self) for the walk.
pub fn inherited_access_type<U: ClassUniverse>(
    universe: &U,
    ctx: &Context<U::Class>,
    class: &U::Class,
) -> Option<AccessType> {
    if let Some(access) = universe.id_access_type(class) {
        return Some(access);
    }

    let mut visited = FxHashSet::default();
    visited.insert(universe.qualified_name(class));

    let mut current = universe.superclass_of(class);

    while let Some(ancestor) = current {
        let name = universe.qualified_name(&ancestor);

        // A malformed hierarchy must not loop forever.
        if !visited.insert(name.clone()) {
            break;
        }

        let xml = ctx.access_info(&name);

        if xml.is_none() && !universe.is_mapped(&ancestor) {
            break;
        }

        let found = xml
            .and_then(AccessTypeInfo::explicit)
            .or_else(|| universe.annotation_access_type(&ancestor))
            .or_else(|| universe.id_access_type(&ancestor));

        if found.is_some() {
            return found;
        }

        current = universe.superclass_of(&ancestor);
    }

    None
}
