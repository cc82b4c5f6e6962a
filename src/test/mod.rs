// Test utilities
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

use crate::fs::Filesystem;
use fxhash::FxHashMap;
use std::io::{Cursor, Error, ErrorKind, Result};

/// In-memory [`Filesystem`] keyed by resource name.
///
/// Every requested resource is recorded,
///   whether or not it exists.
#[derive(Debug, Default)]
pub struct StubFilesystem {
    files: FxHashMap<String, Vec<u8>>,
    unreadable: Vec<String>,
    opened: Vec<String>,
}

impl StubFilesystem {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with(mut self, resource: &str, content: &str) -> Self {
        self.files.insert(resource.into(), content.as_bytes().to_vec());
        self
    }

    /// Opening `resource` fails with an error other than
    ///   [`ErrorKind::NotFound`].
    pub fn unreadable(mut self, resource: &str) -> Self {
        self.unreadable.push(resource.into());
        self
    }

    pub fn opened(&self) -> Vec<&str> {
        self.opened.iter().map(String::as_str).collect()
    }
}

impl Filesystem<Cursor<Vec<u8>>> for StubFilesystem {
    fn open(&mut self, resource: &str) -> Result<Cursor<Vec<u8>>> {
        self.opened.push(resource.into());

        if self.unreadable.iter().any(|r| r == resource) {
            return Err(Error::new(ErrorKind::PermissionDenied, "denied"));
        }

        self.files
            .get(resource)
            .cloned()
            .map(Cursor::new)
            .ok_or_else(|| Error::new(ErrorKind::NotFound, resource))
    }
}

/// Ensures that tests will hit debug assertions.
///
/// If this test fails,
///   then optimization settings are inhibiting debug assertions.
/// See the documentation for [`debug_assert!`] for more information.
#[test]
#[should_panic]
fn uses_debug_assertions() {
    debug_assert!(false, "should panic");
}
