// Light filesystem abstraction
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

//! Lightweight filesystem abstraction.
//!
//! This abstraction is intended to provide generics missing from Rust core,
//!   but makes no attempt to be comprehensive---it
//!     includes only what is needed to locate mapping documents.
//!
//!   - [`File`] provides a trait for operating on files; and
//!   - [`Filesystem`] provides a generic way to open resources by name.
//!
//! Resources are named like `/META-INF/orm.xml`:
//!   `/`-separated and relative to some root,
//!     regardless of any leading separator.
//! [`ClasspathFilesystem`] searches a list of root directories in order,
//!   much like a class path.
//!
//! A resource that cannot be found is reported as an
//!   [`ErrorKind::NotFound`] error;
//!     callers are expected to treat that case as "absent" rather than
//!     as a failure.

use std::fs;
use std::io::{BufReader, Error, ErrorKind, Read, Result};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::global;

/// A file.
pub trait File: Read
where
    Self: Sized,
{
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;
}

impl File for fs::File {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(path)
    }
}

impl<F: File + Read> File for BufReader<F> {
    /// Open the file at `path` and construct a [`BufReader`] from it.
    fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(BufReader::new(F::open(path)?))
    }
}

/// A source of named resources.
///
/// The type of stream produced by this abstraction can be controlled via
///   generics,
///     which allows in-memory implementations to stand in for the
///     filesystem.
pub trait Filesystem<F: Read> {
    fn open(&mut self, resource: &str) -> Result<F>;
}

/// Resources resolved against an ordered list of root directories.
///
/// The first root containing the resource wins.
/// The actual operations are delegated to `F`.
#[derive(Debug)]
pub struct ClasspathFilesystem<F: File> {
    roots: Vec<PathBuf>,
    _file: PhantomData<F>,
}

impl<F: File> ClasspathFilesystem<F> {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            _file: PhantomData,
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Path of `resource` beneath `root`.
    ///
    /// Leading separators are ignored so that absolute resource names do
    ///   not escape the root.
    pub fn resolve(root: &Path, resource: &str) -> PathBuf {
        resource
            .split(global::PATH_SEPARATOR)
            .filter(|part| !part.is_empty())
            .fold(root.to_path_buf(), |path, part| path.join(part))
    }
}

impl<F: File> Filesystem<F> for ClasspathFilesystem<F> {
    fn open(&mut self, resource: &str) -> Result<F> {
        for root in &self.roots {
            let path = Self::resolve(root, resource);

            if path.is_file() {
                return F::open(path);
            }
        }

        Err(Error::new(
            ErrorKind::NotFound,
            format!("{resource} not found"),
        ))
    }
}
