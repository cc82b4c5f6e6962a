// Access types of mapped classes
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

//! Access types and the information from which they are resolved.
//!
//! The _access type_ of a mapped class determines whether its persistent
//!   state is read and written through fields or through accessor
//!   methods.
//! A class may receive its access type from several places at once,
//!   and [`AccessTypeInfo`] records each of them so that the effective
//!   value can be derived at any time using a single precedence rule
//!   (see [`AccessTypeInfo::access_type`]).

use std::fmt::{self, Display};
use std::str::FromStr;

/// How persistent state of a class is accessed.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum AccessType {
    /// State is accessed directly through fields.
    Field,

    /// State is accessed through accessor methods.
    Property,
}

impl Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => write!(f, "FIELD"),
            Self::Property => write!(f, "PROPERTY"),
        }
    }
}

/// The provided literal is neither `FIELD` nor `PROPERTY`.
#[derive(Debug, PartialEq, Eq)]
pub struct UnknownAccessType(pub String);

impl Display for UnknownAccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown access type `{}`", self.0)
    }
}

impl std::error::Error for UnknownAccessType {}

impl FromStr for AccessType {
    type Err = UnknownAccessType;

    /// Mapping documents use the upper-case enumeration literals
    ///   verbatim;
    ///     no other spelling is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FIELD" => Ok(Self::Field),
            "PROPERTY" => Ok(Self::Property),
            _ => Err(UnknownAccessType(s.into())),
        }
    }
}

/// Everything known about the access type of a single class.
///
/// The explicit and default access types come from mapping documents.
/// The remaining two are discovered while walking the annotated type
///   hierarchy and are never set when the persistence unit is
///   XML-complete.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AccessTypeInfo {
    fqcn: String,

    /// Access type declared on the class in a mapping document.
    explicit: Option<AccessType>,

    /// Default of the declaring mapping document or persistence unit.
    default: AccessType,

    /// Access type declared by an annotation on the class itself.
    annotated: Option<AccessType>,

    /// Access type derived from the class hierarchy or from an owning
    ///   class.
    inherited: Option<AccessType>,
}

impl AccessTypeInfo {
    pub fn new<S: Into<String>>(
        fqcn: S,
        explicit: Option<AccessType>,
        default: AccessType,
    ) -> Self {
        Self {
            fqcn: fqcn.into(),
            explicit,
            default,
            annotated: None,
            inherited: None,
        }
    }

    pub fn fqcn(&self) -> &str {
        &self.fqcn
    }

    pub fn explicit(&self) -> Option<AccessType> {
        self.explicit
    }

    pub fn default_access_type(&self) -> AccessType {
        self.default
    }

    pub fn annotated(&self) -> Option<AccessType> {
        self.annotated
    }

    pub fn inherited(&self) -> Option<AccessType> {
        self.inherited
    }

    pub fn set_annotated(&mut self, access: AccessType) {
        self.annotated = Some(access);
    }

    pub fn set_inherited(&mut self, access: AccessType) {
        self.inherited = Some(access);
    }

    /// Whether the access type was fixed by anything other than a
    ///   default.
    ///
    /// Classes that are only defaulted are candidates for receiving the
    ///   access type of an owning class.
    pub fn is_defaulted(&self) -> bool {
        self.explicit.is_none()
            && self.annotated.is_none()
            && self.inherited.is_none()
    }

    /// Effective access type.
    ///
    /// Precedence,
    ///   highest first:
    ///     explicit mapping document override,
    ///     annotation on the class itself,
    ///     access type inherited from the hierarchy,
    ///     and finally the default.
    pub fn access_type(&self) -> AccessType {
        self.explicit
            .or(self.annotated)
            .or(self.inherited)
            .unwrap_or(self.default)
    }
}

impl Display for AccessTypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.fqcn, self.access_type())
    }
}
