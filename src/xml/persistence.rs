// Persistence unit descriptor reader
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

//! Read `persistence` documents into [`PersistenceDescriptor`].
//!
//! Of each `persistence-unit`,
//!   only its name and the `mapping-file` entries are retained.

use super::{
    Element, ElementReader, MappingResult, PersistenceDescriptor,
    PersistenceUnit,
};
use std::io::BufRead;

pub fn read_persistence<B: BufRead>(
    src: B,
) -> MappingResult<PersistenceDescriptor> {
    let mut reader = ElementReader::new(src);
    let mut descriptor = PersistenceDescriptor::default();

    if let Element::Empty(_) = reader.root("persistence")? {
        return Ok(descriptor);
    }

    while let Some(child) = reader.next_child()? {
        match child.local_name() {
            b"persistence-unit" => {
                let unit = read_unit(&mut reader, child)?;
                descriptor.units.push(unit);
            }
            _ => reader.skip(child)?,
        }
    }

    Ok(descriptor)
}

fn read_unit<B: BufRead>(
    reader: &mut ElementReader<B>,
    ele: Element,
) -> MappingResult<PersistenceUnit> {
    let mut unit = PersistenceUnit {
        name: ele.attr(b"name")?,
        ..Default::default()
    };

    if let Element::Empty(_) = ele {
        return Ok(unit);
    }

    while let Some(child) = reader.next_child()? {
        match child.local_name() {
            b"mapping-file" => {
                let path = reader.text(child)?;

                if !path.is_empty() {
                    unit.mapping_files.push(path);
                }
            }
            _ => reader.skip(child)?,
        }
    }

    Ok(unit)
}
