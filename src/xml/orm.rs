// Mapping document reader
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

//! Read `entity-mappings` documents into [`MappingDocument`].

use super::{
    AttributeDecl, AttributeKind, ClassDeclaration, DeclKind, Element,
    ElementReader, MappingDocument, MappingResult, UnitMetadata,
};
use crate::access::AccessType;
use std::io::BufRead;

/// Read an entire mapping document.
///
/// `resource` is recorded on the resulting document and is otherwise
///   unused.
///
/// Errors
/// ======
/// - [`MappingError::UnexpectedRoot`](super::MappingError::UnexpectedRoot)
///     if the root is not `entity-mappings`.
/// - [`MappingError::MissingAttr`](super::MappingError::MissingAttr) if a
///     class declaration lacks `@class` or a member lacks `@name`.
/// - [`MappingError::InvalidAccessType`](super::MappingError::InvalidAccessType)
///     for any access literal other than `FIELD` and `PROPERTY`.
/// - Any other [`MappingError`](super::MappingError) on malformed XML.
pub fn read_entity_mappings<B: BufRead>(
    src: B,
    resource: &str,
) -> MappingResult<MappingDocument> {
    let mut reader = ElementReader::new(src);
    let mut doc = MappingDocument::new(resource);

    if let Element::Empty(_) = reader.root("entity-mappings")? {
        return Ok(doc);
    }

    while let Some(child) = reader.next_child()? {
        match child.local_name() {
            b"package" => {
                doc.package = Some(reader.text(child)?).filter(|p| !p.is_empty());
            }

            b"access" => {
                doc.access = Some(read_access(&mut reader, child)?);
            }

            b"persistence-unit-metadata" => {
                doc.unit_metadata = Some(read_unit_metadata(&mut reader, child)?);
            }

            b"entity" => {
                let name = child.attr(b"name")?;
                let decl = read_class(&mut reader, child, DeclKind::Entity { name })?;
                doc.entities.push(decl);
            }

            b"embeddable" => {
                let decl = read_class(&mut reader, child, DeclKind::Embeddable)?;
                doc.embeddables.push(decl);
            }

            b"mapped-superclass" => {
                let decl =
                    read_class(&mut reader, child, DeclKind::MappedSuperclass)?;
                doc.mapped_superclasses.push(decl);
            }

            // Queries, generators, converters, etc.
            _ => reader.skip(child)?,
        }
    }

    Ok(doc)
}

fn read_access<B: BufRead>(
    reader: &mut ElementReader<B>,
    ele: Element,
) -> MappingResult<AccessType> {
    Ok(reader.text(ele)?.parse()?)
}

fn parse_access_attr(ele: &Element) -> MappingResult<Option<AccessType>> {
    ele.attr(b"access")?
        .map(|lit| lit.trim().parse().map_err(Into::into))
        .transpose()
}

/// Process `persistence-unit-metadata`.
///
/// `xml-mapping-metadata-complete` is an empty marker element;
///   its presence alone sets the flag.
fn read_unit_metadata<B: BufRead>(
    reader: &mut ElementReader<B>,
    ele: Element,
) -> MappingResult<UnitMetadata> {
    let mut meta = UnitMetadata::default();

    if let Element::Empty(_) = ele {
        return Ok(meta);
    }

    while let Some(child) = reader.next_child()? {
        match child.local_name() {
            b"xml-mapping-metadata-complete" => {
                meta.xml_mapping_metadata_complete = true;
                reader.skip(child)?;
            }

            b"persistence-unit-defaults" => {
                meta.default_access = read_unit_defaults(reader, child)?;
            }

            _ => reader.skip(child)?,
        }
    }

    Ok(meta)
}

/// Process `persistence-unit-defaults`,
///   producing its access type if present.
fn read_unit_defaults<B: BufRead>(
    reader: &mut ElementReader<B>,
    ele: Element,
) -> MappingResult<Option<AccessType>> {
    let mut access = None;

    if let Element::Empty(_) = ele {
        return Ok(access);
    }

    while let Some(child) = reader.next_child()? {
        match child.local_name() {
            b"access" => access = Some(read_access(reader, child)?),
            _ => reader.skip(child)?,
        }
    }

    Ok(access)
}

/// Process an `entity`, `embeddable`, or `mapped-superclass`.
fn read_class<B: BufRead>(
    reader: &mut ElementReader<B>,
    ele: Element,
    kind: DeclKind,
) -> MappingResult<ClassDeclaration> {
    let mut decl = ClassDeclaration::new(kind, ele.required_attr("class")?.trim());
    decl.access = parse_access_attr(&ele)?;
    decl.metadata_complete = ele.bool_attr("metadata-complete")?;

    if let Element::Empty(_) = ele {
        return Ok(decl);
    }

    while let Some(child) = reader.next_child()? {
        match child.local_name() {
            b"attributes" => decl.attributes = read_attributes(reader, child)?,
            _ => reader.skip(child)?,
        }
    }

    Ok(decl)
}

/// Process `attributes`,
///   producing each known member in document order.
fn read_attributes<B: BufRead>(
    reader: &mut ElementReader<B>,
    ele: Element,
) -> MappingResult<Vec<AttributeDecl>> {
    let mut attrs = Vec::new();

    if let Element::Empty(_) = ele {
        return Ok(attrs);
    }

    while let Some(child) = reader.next_child()? {
        if let Some(kind) = AttributeKind::from_name(child.local_name()) {
            attrs.push(AttributeDecl {
                kind,
                name: child.required_attr("name")?,
                access: parse_access_attr(&child)?,
            });
        }

        // Column definitions and the like are of no interest.
        reader.skip(child)?;
    }

    Ok(attrs)
}

#[cfg(test)]
mod test;
