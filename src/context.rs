// Processing context
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

//! State shared by every step of processing.
//!
//! A [`Context`] outlives any single processing round.
//! The host compiler may process sources in several rounds,
//!   and each round re-reads its own set of mapping documents,
//!   but results accumulate here:
//!
//!   - [`PersistenceUnitState`] is set by the first unit metadata block
//!       ever found and is never changed afterward;
//!   - access type information is overwritten by each round,
//!       which is harmless since every round derives it from the same
//!       documents; and
//!   - [`ClassDescriptor`]s are only ever added,
//!       never replaced or removed.
//!
//! The context is generic over the class handle type `H` of the
//!   [`ClassUniverse`](crate::universe::ClassUniverse) in use.

use crate::access::{AccessType, AccessTypeInfo};
use crate::global;
use crate::xml::{ClassDeclaration, ClassKind};
use fxhash::FxHashMap;

/// Settings that apply to the entire persistence unit.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PersistenceUnitState {
    default_access: AccessType,
    xml_complete: bool,

    /// Resource of the mapping document that provided unit metadata.
    source: Option<String>,
}

impl Default for PersistenceUnitState {
    fn default() -> Self {
        Self {
            default_access: global::FALLBACK_ACCESS_TYPE,
            xml_complete: false,
            source: None,
        }
    }
}

impl PersistenceUnitState {
    pub fn default_access(&self) -> AccessType {
        self.default_access
    }

    /// Whether annotations must be ignored entirely.
    pub fn is_xml_complete(&self) -> bool {
        self.xml_complete
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Whether unit metadata has already been applied.
    pub fn is_resolved(&self) -> bool {
        self.source.is_some()
    }

    /// Apply unit metadata found in the mapping document `source`.
    ///
    /// Only the first call has any effect.
    /// Returns whether the metadata was applied.
    pub fn apply<S: Into<String>>(
        &mut self,
        source: S,
        xml_complete: bool,
        default_access: Option<AccessType>,
    ) -> bool {
        if self.is_resolved() {
            return false;
        }

        self.source = Some(source.into());
        self.xml_complete |= xml_complete;

        if let Some(access) = default_access {
            self.default_access = access;
        }

        true
    }
}

/// A class ready for metamodel generation.
#[derive(Debug, Clone)]
pub struct ClassDescriptor<H> {
    fqcn: String,
    access: AccessTypeInfo,
    class: H,
    declaration: ClassDeclaration,
}

impl<H> ClassDescriptor<H> {
    pub fn new(
        access: AccessTypeInfo,
        class: H,
        declaration: ClassDeclaration,
    ) -> Self {
        Self {
            fqcn: access.fqcn().into(),
            access,
            class,
            declaration,
        }
    }

    pub fn fqcn(&self) -> &str {
        &self.fqcn
    }

    pub fn package(&self) -> &str {
        crate::xml::package_of(&self.fqcn)
    }

    pub fn kind(&self) -> ClassKind {
        self.declaration.kind.class_kind()
    }

    /// Effective access type at the time the descriptor was built.
    pub fn access_type(&self) -> AccessType {
        self.access.access_type()
    }

    pub fn access_info(&self) -> &AccessTypeInfo {
        &self.access
    }

    /// Handle to the class within the compilation universe.
    pub fn class(&self) -> &H {
        &self.class
    }

    pub fn declaration(&self) -> &ClassDeclaration {
        &self.declaration
    }
}

/// Processing state shared across components and rounds.
///
/// See the [module-level documentation](self) for accumulation rules.
#[derive(Debug)]
pub struct Context<H> {
    unit: PersistenceUnitState,
    access: FxHashMap<String, AccessTypeInfo>,

    /// Descriptors in registration order.
    descriptors: Vec<ClassDescriptor<H>>,

    /// Index into [`Self::descriptors`] by class name.
    descriptor_index: FxHashMap<String, usize>,
}

impl<H> Default for Context<H> {
    fn default() -> Self {
        Self {
            unit: Default::default(),
            access: Default::default(),
            descriptors: Vec::new(),
            descriptor_index: Default::default(),
        }
    }
}

impl<H> Context<H> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn unit(&self) -> &PersistenceUnitState {
        &self.unit
    }

    pub fn unit_mut(&mut self) -> &mut PersistenceUnitState {
        &mut self.unit
    }

    /// Record access type information,
    ///   replacing anything previously recorded for the same class.
    pub fn add_access_info(&mut self, info: AccessTypeInfo) {
        self.access.insert(info.fqcn().into(), info);
    }

    pub fn access_info(&self, fqcn: &str) -> Option<&AccessTypeInfo> {
        self.access.get(fqcn)
    }

    pub fn access_info_mut(&mut self, fqcn: &str) -> Option<&mut AccessTypeInfo> {
        self.access.get_mut(fqcn)
    }

    /// Effective access type of every class with access type information,
    ///   in no particular order.
    pub fn access_types(&self) -> impl Iterator<Item = (&str, AccessType)> {
        self.access
            .values()
            .map(|info| (info.fqcn(), info.access_type()))
    }

    pub fn contains_descriptor(&self, fqcn: &str) -> bool {
        self.descriptor_index.contains_key(fqcn)
    }

    pub fn descriptor(&self, fqcn: &str) -> Option<&ClassDescriptor<H>> {
        self.descriptor_index
            .get(fqcn)
            .map(|&i| &self.descriptors[i])
    }

    /// Descriptors in the order in which they were registered.
    pub fn descriptors(&self) -> impl Iterator<Item = &ClassDescriptor<H>> {
        self.descriptors.iter()
    }

    pub fn descriptor_count(&self) -> usize {
        self.descriptors.len()
    }

    /// Register a descriptor unless one of the same name already exists.
    ///
    /// Returns whether the descriptor was registered.
    pub fn register(&mut self, descriptor: ClassDescriptor<H>) -> bool {
        if self.contains_descriptor(descriptor.fqcn()) {
            return false;
        }

        self.descriptor_index
            .insert(descriptor.fqcn().into(), self.descriptors.len());
        self.descriptors.push(descriptor);

        true
    }
}
