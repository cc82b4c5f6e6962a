// Mapping document errors
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

//! Errors while reading mapping documents.

use crate::access::UnknownAccessType;
use quick_xml::events::attributes::AttrError;
use std::fmt::Display;

/// A [`Result`] with a hard-coded [`MappingError`] error type.
pub type MappingResult<T> = Result<T, MappingError>;

/// Error while reading a mapping document.
///
/// Errors contain only owned values rather than references to original
///   data,
///     since the offending document is dropped in its entirety and only
///     the message survives as a diagnostic.
#[derive(Debug)]
pub enum MappingError {
    /// The document is not well-formed.
    Xml(quick_xml::Error),

    /// The root element was not the expected one.
    ///
    /// This holds the expected and the actual local names.
    UnexpectedRoot(&'static str, String),

    /// The document ended before the root element was closed.
    UnexpectedEof,

    /// An access type other than `FIELD` or `PROPERTY` was provided.
    InvalidAccessType(String),

    /// An attribute expected to be boolean was not.
    ///
    /// This holds the attribute name and its value.
    InvalidBoolean(&'static str, String),

    /// A required attribute is missing.
    ///
    /// This holds the element name and the attribute name.
    MissingAttr(String, &'static str),
}

impl From<quick_xml::Error> for MappingError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e)
    }
}

impl From<AttrError> for MappingError {
    fn from(e: AttrError) -> Self {
        Self::Xml(e.into())
    }
}

impl From<UnknownAccessType> for MappingError {
    fn from(UnknownAccessType(lit): UnknownAccessType) -> Self {
        Self::InvalidAccessType(lit)
    }
}

impl Display for MappingError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        use MappingError::*;

        match self {
            Xml(e) => write!(fmt, "malformed XML: {e}"),
            UnexpectedRoot(expected, found) => write!(
                fmt,
                "expected `{expected}` root element, found `{found}`"
            ),
            UnexpectedEof => write!(fmt, "unexpected end of document"),
            InvalidAccessType(lit) => write!(
                fmt,
                "invalid access type `{lit}`; expected `FIELD` or `PROPERTY`"
            ),
            InvalidBoolean(attr, value) => {
                write!(fmt, "invalid boolean `{value}` for `@{attr}`")
            }
            MissingAttr(ele, attr) => {
                write!(fmt, "`{ele}` is missing required `@{attr}`")
            }
        }
    }
}

impl std::error::Error for MappingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Xml(e) => Some(e),
            _ => None,
        }
    }
}
