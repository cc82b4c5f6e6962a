// Compilation universe
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

//! The set of classes known to the host compiler.
//!
//! Class lookup and hierarchy introspection belong to whatever compiler is
//!   hosting this processor.
//! [`ClassUniverse`] is the narrow capability that resolution needs from
//!   it;
//!     hosts provide an adapter over their own introspection facility.
//!
//! [`ClassIndex`] is such an adapter for a standalone index of classes,
//!   itself an XML document:
//!
//! ```xml
//! <classes>
//!   <class name="com.example.Base" kind="mapped-superclass"
//!          id-access="FIELD"/>
//!   <class name="com.example.Order" extends="com.example.Base"
//!          kind="entity" access="PROPERTY">
//!     <embeds class="com.example.Address"/>
//!   </class>
//!   <class name="com.example.Address" kind="embeddable"/>
//! </classes>
//! ```

use crate::access::AccessType;
use crate::xml::{ClassKind, Element, ElementReader, MappingError, MappingResult};
use fxhash::FxHashMap;
use std::fmt::Debug;
use std::io::BufRead;

/// Class lookup and hierarchy introspection.
pub trait ClassUniverse {
    /// Handle to a class and its declared members.
    type Class: Clone + Debug;

    fn find_class(&self, fqcn: &str) -> Option<Self::Class>;

    fn qualified_name(&self, class: &Self::Class) -> String;

    /// Direct superclass,
    ///   or [`None`] at the root of the hierarchy.
    fn superclass_of(&self, class: &Self::Class) -> Option<Self::Class>;

    /// Access type declared by annotation on the class itself.
    fn annotation_access_type(&self, class: &Self::Class) -> Option<AccessType>;

    /// Whether the class is annotated as an entity or mapped superclass.
    fn is_mapped(&self, class: &Self::Class) -> bool;

    /// Access type implied by the placement of the identifier mapping,
    ///   if the class declares one.
    fn id_access_type(&self, _class: &Self::Class) -> Option<AccessType> {
        None
    }

    /// Names of classes embedded by the persistent state of this class.
    fn embedded_classes(&self, _class: &Self::Class) -> Vec<String> {
        Vec::new()
    }
}

/// A class within a [`ClassIndex`].
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct IndexedClass {
    pub name: String,
    pub superclass: Option<String>,
    pub kind: Option<ClassKind>,
    pub access: Option<AccessType>,
    pub id_access: Option<AccessType>,
    pub embeds: Vec<String>,
}

impl IndexedClass {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn extends<S: Into<String>>(self, superclass: S) -> Self {
        Self {
            superclass: Some(superclass.into()),
            ..self
        }
    }

    pub fn kind(self, kind: ClassKind) -> Self {
        Self {
            kind: Some(kind),
            ..self
        }
    }

    pub fn access(self, access: AccessType) -> Self {
        Self {
            access: Some(access),
            ..self
        }
    }

    pub fn id_access(self, access: AccessType) -> Self {
        Self {
            id_access: Some(access),
            ..self
        }
    }

    pub fn embeds<S: Into<String>>(mut self, class: S) -> Self {
        self.embeds.push(class.into());
        self
    }
}

/// In-memory [`ClassUniverse`].
///
/// A superclass that is not itself indexed is treated as the root of the
///   hierarchy.
#[derive(Debug, Default)]
pub struct ClassIndex {
    classes: FxHashMap<String, IndexedClass>,
}

impl ClassIndex {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with(mut self, class: IndexedClass) -> Self {
        self.insert(class);
        self
    }

    /// Add a class,
    ///   replacing any class of the same name.
    pub fn insert(&mut self, class: IndexedClass) {
        self.classes.insert(class.name.clone(), class);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Read an index document.
    ///
    /// See the [module-level documentation](self) for its structure.
    pub fn read<B: BufRead>(src: B) -> MappingResult<Self> {
        let mut reader = ElementReader::new(src);
        let mut index = Self::new();

        if let Element::Empty(_) = reader.root("classes")? {
            return Ok(index);
        }

        while let Some(child) = reader.next_child()? {
            match child.local_name() {
                b"class" => index.insert(Self::read_class(&mut reader, child)?),
                _ => reader.skip(child)?,
            }
        }

        Ok(index)
    }

    fn read_class<B: BufRead>(
        reader: &mut ElementReader<B>,
        ele: Element,
    ) -> MappingResult<IndexedClass> {
        let parse_access = |attr: &[u8]| -> MappingResult<Option<AccessType>> {
            ele.attr(attr)?
                .map(|lit| lit.parse().map_err(MappingError::from))
                .transpose()
        };

        let mut class = IndexedClass {
            name: ele.required_attr("name")?,
            superclass: ele.attr(b"extends")?,
            kind: ele
                .attr(b"kind")?
                .and_then(|kind| ClassKind::from_name(kind.as_bytes())),
            access: parse_access(b"access")?,
            id_access: parse_access(b"id-access")?,
            embeds: Vec::new(),
        };

        if let Element::Empty(_) = ele {
            return Ok(class);
        }

        while let Some(child) = reader.next_child()? {
            if child.local_name() == b"embeds" {
                class.embeds.push(child.required_attr("class")?);
            }

            reader.skip(child)?;
        }

        Ok(class)
    }
}

impl ClassUniverse for ClassIndex {
    type Class = IndexedClass;

    fn find_class(&self, fqcn: &str) -> Option<IndexedClass> {
        self.classes.get(fqcn).cloned()
    }

    fn qualified_name(&self, class: &IndexedClass) -> String {
        class.name.clone()
    }

    fn superclass_of(&self, class: &IndexedClass) -> Option<IndexedClass> {
        class
            .superclass
            .as_deref()
            .and_then(|name| self.find_class(name))
    }

    fn annotation_access_type(&self, class: &IndexedClass) -> Option<AccessType> {
        class.access
    }

    fn is_mapped(&self, class: &IndexedClass) -> bool {
        matches!(
            class.kind,
            Some(ClassKind::Entity | ClassKind::MappedSuperclass)
        )
    }

    fn id_access_type(&self, class: &IndexedClass) -> Option<AccessType> {
        class.id_access
    }

    fn embedded_classes(&self, class: &IndexedClass) -> Vec<String> {
        class.embeds.clone()
    }
}
