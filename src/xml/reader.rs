// Element-level XML reader
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

//! Wrapper around [`quick_xml::Reader`] that walks a document one element
//!   at a time.
//!
//! The documents read by this crate have a small,
//!   fixed structure,
//!   and we only ever care about a handful of elements at a handful of
//!   depths.
//! Rather than exposing raw events,
//!   [`ElementReader`] yields the child [`Element`]s of whatever element
//!   was most recently opened;
//!     the caller then decides whether to descend into the child,
//!     read its text,
//!     or [`skip`](ElementReader::skip) it entirely.
//! Every opened child must be consumed by exactly one of those
//!   operations before requesting the next sibling.
//!
//! Element names are matched by their local name,
//!   so namespace prefixes have no effect.
//!
//! ```
//! use metagen::xml::ElementReader;
//!
//! let src = br#"<units><unit name="a">first</unit><unit/></units>"#;
//! let mut reader = ElementReader::new(&src[..]);
//!
//! reader.root("units").unwrap();
//!
//! let first = reader.next_child().unwrap().unwrap();
//! assert_eq!(Some("a".to_string()), first.attr(b"name").unwrap());
//! assert_eq!("first", reader.text(first).unwrap());
//!
//! let second = reader.next_child().unwrap().unwrap();
//! assert_eq!("", reader.text(second).unwrap());
//!
//! assert!(reader.next_child().unwrap().is_none());
//! ```

use super::error::{MappingError, MappingResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader as XmlReader;
use std::io::BufRead;

/// An element whose start tag has just been read.
#[derive(Debug)]
pub enum Element {
    /// A start tag whose content and end tag have not yet been read.
    Open(BytesStart<'static>),

    /// A self-closing tag.
    Empty(BytesStart<'static>),
}

impl Element {
    fn start(&self) -> &BytesStart<'static> {
        match self {
            Self::Open(start) | Self::Empty(start) => start,
        }
    }

    /// Element name without any namespace prefix.
    pub fn local_name(&self) -> &[u8] {
        self.start().local_name().into_inner()
    }

    /// Element name for use in diagnostics.
    pub fn display_name(&self) -> String {
        String::from_utf8_lossy(self.local_name()).into_owned()
    }

    /// Unescaped value of the attribute with the given local name.
    pub fn attr(&self, name: &[u8]) -> MappingResult<Option<String>> {
        for attr in self.start().attributes() {
            let attr = attr?;

            if attr.key.local_name().as_ref() == name {
                let value =
                    attr.unescape_value().map_err(quick_xml::Error::from)?;

                return Ok(Some(value.into_owned()));
            }
        }

        Ok(None)
    }

    /// Like [`Element::attr`],
    ///   but the attribute must be present.
    pub fn required_attr(&self, name: &'static str) -> MappingResult<String> {
        self.attr(name.as_bytes())?.ok_or_else(|| {
            MappingError::MissingAttr(self.display_name(), name)
        })
    }

    /// Boolean attribute using XML Schema lexical forms.
    pub fn bool_attr(&self, name: &'static str) -> MappingResult<Option<bool>> {
        match self.attr(name.as_bytes())?.as_deref().map(str::trim) {
            None => Ok(None),
            Some("true" | "1") => Ok(Some(true)),
            Some("false" | "0") => Ok(Some(false)),
            Some(other) => Err(MappingError::InvalidBoolean(name, other.into())),
        }
    }
}

/// Reads a document element by element.
///
/// See [module-level documentation](self) for more information.
pub struct ElementReader<B: BufRead> {
    reader: XmlReader<B>,

    /// Internal buffer for [`XmlReader`].
    buffer: Vec<u8>,
}

impl<B: BufRead> ElementReader<B> {
    pub fn new(src: B) -> Self {
        let mut reader = XmlReader::from_reader(src);

        // Whitespace between elements is never meaningful in these
        //   documents.
        reader.config_mut().trim_text(true);

        Self {
            reader,
            buffer: Vec::new(),
        }
    }

    /// Read the next event,
    ///   detached from the internal buffer.
    fn next_event(&mut self) -> MappingResult<Event<'static>> {
        self.buffer.clear();

        Ok(self.reader.read_event_into(&mut self.buffer)?.into_owned())
    }

    /// Read up to and including the root start tag,
    ///   which must have the local name `expected`.
    ///
    /// Declarations,
    ///   comments,
    ///   and processing instructions preceding the root are ignored.
    pub fn root(&mut self, expected: &'static str) -> MappingResult<Element> {
        let root = loop {
            match self.next_event()? {
                Event::Start(ele) => break Element::Open(ele),
                Event::Empty(ele) => break Element::Empty(ele),
                Event::Eof => return Err(MappingError::UnexpectedEof),
                _ => (),
            }
        };

        if root.local_name() != expected.as_bytes() {
            return Err(MappingError::UnexpectedRoot(
                expected,
                root.display_name(),
            ));
        }

        Ok(root)
    }

    /// Next child of the most recently opened element,
    ///   or [`None`] once that element has been closed.
    ///
    /// Text between child elements is ignored.
    pub fn next_child(&mut self) -> MappingResult<Option<Element>> {
        loop {
            match self.next_event()? {
                Event::Start(ele) => return Ok(Some(Element::Open(ele))),
                Event::Empty(ele) => return Ok(Some(Element::Empty(ele))),
                Event::End(_) => return Ok(None),
                Event::Eof => return Err(MappingError::UnexpectedEof),
                _ => (),
            }
        }
    }

    /// Consume `ele` along with everything it contains.
    pub fn skip(&mut self, ele: Element) -> MappingResult<()> {
        if let Element::Open(start) = ele {
            self.buffer.clear();

            let end = start.to_end();
            self.reader.read_to_end_into(end.name(), &mut self.buffer)?;
        }

        Ok(())
    }

    /// Consume `ele` and produce its trimmed text content.
    ///
    /// Any nested elements are skipped,
    ///   and a self-closing element has empty content.
    pub fn text(&mut self, ele: Element) -> MappingResult<String> {
        if let Element::Empty(_) = ele {
            return Ok(String::new());
        }

        let mut text = String::new();

        loop {
            match self.next_event()? {
                Event::Text(t) => text
                    .push_str(&t.unescape().map_err(quick_xml::Error::from)?),
                Event::CData(data) => {
                    text.push_str(&String::from_utf8_lossy(&data))
                }
                Event::Start(nested) => self.skip(Element::Open(nested))?,
                Event::End(_) => break,
                Event::Eof => return Err(MappingError::UnexpectedEof),
                _ => (),
            }
        }

        Ok(text.trim().into())
    }
}
