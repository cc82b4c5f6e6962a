// Static metamodel access-type resolution
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

//! Merge XML object-relational mappings with annotation metadata and
//!   resolve the access type of every mapped class.
//!
//! The resolved view is intended for a generator of static metamodel
//!   classes.
//! It consists of two tables held by a [`context::Context`]:
//!   the effective access type of each mapped class,
//!   and a [`context::ClassDescriptor`] for each class that is ready for
//!   generation.
//!
//! See [`pipeline`] for how the pieces fit together.

// We build docs for private items.
#![allow(rustdoc::private_intra_doc_links)]

pub mod global;

pub mod access;
pub mod aggregate;
pub mod build;
pub mod context;
pub mod diagnose;
pub mod fs;
pub mod pipeline;
pub mod resolve;
pub mod universe;
pub mod xml;

#[cfg(test)]
pub mod test;
