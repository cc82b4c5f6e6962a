// Object-relational mapping documents
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

//! Persistence unit descriptors and mapping documents.
//!
//! Two kinds of documents are read:
//!
//!   - A _persistence unit descriptor_ (`persistence.xml`) declares
//!       persistence units,
//!         each of which may list mapping documents by resource name.
//!   - A _mapping document_ (`orm.xml`) declares mapped classes and may
//!       carry defaults for the document or for the entire persistence
//!       unit.
//!
//! Only the small subset of each schema needed to resolve access types
//!   and to hand class declarations to a generator is extracted;
//!     everything else is skipped without complaint.
//!
//! For example (with some extra information omitted):
//!
//! ```xml
//! <entity-mappings xmlns="http://java.sun.com/xml/ns/persistence/orm">
//!   <persistence-unit-metadata>
//!     <xml-mapping-metadata-complete/>
//!     <persistence-unit-defaults>
//!       <access>FIELD</access>
//!     </persistence-unit-defaults>
//!   </persistence-unit-metadata>
//!
//!   <package>com.example</package>
//!   <access>PROPERTY</access>
//!
//!   <entity class="Order" access="FIELD">
//!     <attributes>
//!       <id name="id"/>
//!       <many-to-one name="customer"/>
//!     </attributes>
//!   </entity>
//!
//!   <embeddable class="org.other.Address"/>
//! </entity-mappings>
//! ```

mod error;
mod orm;
mod persistence;
mod reader;

pub use error::{MappingError, MappingResult};
pub use orm::read_entity_mappings;
pub use persistence::read_persistence;
pub use reader::{Element, ElementReader};

use crate::access::AccessType;
use crate::global;
use std::fmt::{self, Display};

/// A parsed `persistence.xml`.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct PersistenceDescriptor {
    pub units: Vec<PersistenceUnit>,
}

/// A single `persistence-unit`.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct PersistenceUnit {
    pub name: Option<String>,

    /// Mapping document resource names in declaration order.
    pub mapping_files: Vec<String>,
}

/// A parsed mapping document (`orm.xml`).
///
/// Documents are immutable once read.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct MappingDocument {
    /// Resource name from which this document was loaded.
    pub resource: String,

    /// Package against which unqualified class names are resolved.
    pub package: Option<String>,

    /// Default access type for classes declared in this document.
    pub access: Option<AccessType>,

    pub unit_metadata: Option<UnitMetadata>,

    pub entities: Vec<ClassDeclaration>,
    pub embeddables: Vec<ClassDeclaration>,
    pub mapped_superclasses: Vec<ClassDeclaration>,
}

impl MappingDocument {
    pub fn new<S: Into<String>>(resource: S) -> Self {
        Self {
            resource: resource.into(),
            ..Default::default()
        }
    }

    /// Every class declaration in this document.
    ///
    /// Entities are produced first,
    ///   followed by embeddables and then mapped superclasses,
    ///   each in document order.
    pub fn declarations(&self) -> impl Iterator<Item = &ClassDeclaration> {
        self.entities
            .iter()
            .chain(self.embeddables.iter())
            .chain(self.mapped_superclasses.iter())
    }

    /// Fully qualified name of a class declared in this document.
    pub fn fqcn(&self, decl: &ClassDeclaration) -> String {
        qualify(self.package.as_deref(), &decl.class)
    }
}

/// The `persistence-unit-metadata` block of a mapping document.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct UnitMetadata {
    /// Whether annotations are to be ignored for the entire unit.
    pub xml_mapping_metadata_complete: bool,

    /// `persistence-unit-defaults/access`.
    pub default_access: Option<AccessType>,
}

/// Kind of mapped class.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ClassKind {
    Entity,
    Embeddable,
    MappedSuperclass,
}

impl ClassKind {
    /// Kind named by the given element (or attribute value).
    pub fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"entity" => Some(Self::Entity),
            b"embeddable" => Some(Self::Embeddable),
            b"mapped-superclass" => Some(Self::MappedSuperclass),
            _ => None,
        }
    }
}

impl Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity => write!(f, "entity"),
            Self::Embeddable => write!(f, "embeddable"),
            Self::MappedSuperclass => write!(f, "mapped-superclass"),
        }
    }
}

/// Data specific to each kind of class declaration.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DeclKind {
    Entity {
        /// Entity name used in queries,
        ///   if different from the class name.
        name: Option<String>,
    },
    Embeddable,
    MappedSuperclass,
}

impl DeclKind {
    pub fn class_kind(&self) -> ClassKind {
        match self {
            Self::Entity { .. } => ClassKind::Entity,
            Self::Embeddable => ClassKind::Embeddable,
            Self::MappedSuperclass => ClassKind::MappedSuperclass,
        }
    }
}

/// A declared `entity`, `embeddable`, or `mapped-superclass`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ClassDeclaration {
    pub kind: DeclKind,

    /// Class name as written,
    ///   which may or may not be qualified.
    pub class: String,

    /// Explicit access type for this class.
    pub access: Option<AccessType>,

    pub metadata_complete: Option<bool>,

    /// Declared persistent members in document order.
    pub attributes: Vec<AttributeDecl>,
}

impl ClassDeclaration {
    pub fn new<S: Into<String>>(kind: DeclKind, class: S) -> Self {
        Self {
            kind,
            class: class.into(),
            access: None,
            metadata_complete: None,
            attributes: Vec::new(),
        }
    }

    pub fn with_access(self, access: AccessType) -> Self {
        Self {
            access: Some(access),
            ..self
        }
    }
}

/// Kind of a persistent member within `attributes`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AttributeKind {
    Id,
    EmbeddedId,
    Basic,
    Version,
    ManyToOne,
    OneToMany,
    OneToOne,
    ManyToMany,
    ElementCollection,
    Embedded,
    Transient,
}

impl AttributeKind {
    pub fn from_name(name: &[u8]) -> Option<Self> {
        use AttributeKind::*;

        Some(match name {
            b"id" => Id,
            b"embedded-id" => EmbeddedId,
            b"basic" => Basic,
            b"version" => Version,
            b"many-to-one" => ManyToOne,
            b"one-to-many" => OneToMany,
            b"one-to-one" => OneToOne,
            b"many-to-many" => ManyToMany,
            b"element-collection" => ElementCollection,
            b"embedded" => Embedded,
            b"transient" => Transient,
            _ => return None,
        })
    }
}

/// A persistent member declared within `attributes`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AttributeDecl {
    pub kind: AttributeKind,
    pub name: String,
    pub access: Option<AccessType>,
}

/// Resolve a declared class name against a default package.
///
/// A name that is already qualified ignores the package.
pub fn qualify(package: Option<&str>, name: &str) -> String {
    match package.map(str::trim) {
        Some(pkg)
            if !pkg.is_empty() && !name.contains(global::PACKAGE_SEPARATOR) =>
        {
            format!("{pkg}{}{name}", global::PACKAGE_SEPARATOR)
        }
        _ => name.into(),
    }
}

/// Package portion of a fully qualified class name,
///   empty for the default package.
pub fn package_of(fqcn: &str) -> &str {
    fqcn.rfind(global::PACKAGE_SEPARATOR)
        .map_or("", |i| &fqcn[..i])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn qualifies_simple_name_with_package() {
        assert_eq!("com.example.Foo", qualify(Some("com.example"), "Foo"));
    }

    #[test]
    fn qualified_name_overrides_package() {
        assert_eq!(
            "org.other.Foo",
            qualify(Some("com.example"), "org.other.Foo")
        );
    }

    #[test]
    fn no_package_leaves_name() {
        assert_eq!("Foo", qualify(None, "Foo"));
        assert_eq!("Foo", qualify(Some(""), "Foo"));
    }

    #[test]
    fn package_of_fqcn() {
        assert_eq!("com.example", package_of("com.example.Foo"));
        assert_eq!("", package_of("Foo"));
    }

    #[test]
    fn declarations_in_builder_order() {
        let mut doc = MappingDocument::new("/META-INF/orm.xml");
        doc.mapped_superclasses
            .push(ClassDeclaration::new(DeclKind::MappedSuperclass, "S"));
        doc.embeddables
            .push(ClassDeclaration::new(DeclKind::Embeddable, "E"));
        doc.entities
            .push(ClassDeclaration::new(DeclKind::Entity { name: None }, "A"));

        let names: Vec<_> =
            doc.declarations().map(|decl| decl.class.as_str()).collect();

        assert_eq!(vec!["A", "E", "S"], names);
    }
}
