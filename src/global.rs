// Global constants across the entire crate
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

//! System-wide static configuration.
//!
//! This module provides a system-wide configuration.
//! Subsystems should reference these values rather than defining their own
//!   and risk incompatibilities or maintenance issues as requirements
//!   change.
//!
//! By convention,
//!   import this entire module rather than individual members and reference
//!   them as `global::foo` to emphasize their nature and risk.

use crate::access::AccessType;

/// Well-known location of the persistence unit descriptor.
///
/// This may be overridden per run;
///   see [`Options`](crate::pipeline::Options).
pub const PERSISTENCE_XML: &str = "/META-INF/persistence.xml";

/// Mapping document that is always attempted,
///   whether or not any persistence unit lists it.
pub const ORM_XML: &str = "/META-INF/orm.xml";

/// Access type used when neither a mapping document nor the persistence
///   unit provides a default.
pub const FALLBACK_ACCESS_TYPE: AccessType = AccessType::Property;

/// Separator of resource path components.
pub const PATH_SEPARATOR: char = '/';

/// Separator of package components within a class name.
pub const PACKAGE_SEPARATOR: char = '.';
