//! Element cursor over a `quick-xml` event stream.
//!
//! [`XmlCursor`] owns the underlying reader and tracks the stack of open
//! elements. A [`Scope`] confines iteration to the direct children of one
//! element: it hands out child elements one at a time, skips the body of any
//! child it was not asked to [`enter`](Scope::enter), and reports the end of
//! the scope when the container's closing tag is consumed. Nested scopes
//! borrow the parent scope mutably, so a container's children can be read in
//! a nested call and the parent resumes at the next sibling.

use crate::error::{Error, Result};
use quick_xml::encoding::Decoder;
use quick_xml::events::BytesStart;
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::io::BufRead;

/// Attributes of one element, keyed by local name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Extracts attributes from a BytesStart element as owned data, decoded
    /// from the document's declared encoding.
    fn from_start(e: &BytesStart<'_>, decoder: Decoder) -> Result<Self> {
        let mut entries = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = decoder
                .decode(attr.key.local_name().as_ref())
                .map_err(quick_xml::Error::from)?
                .into_owned();
            let value = attr.decode_and_unescape_value(decoder)?.into_owned();
            entries.push((key, value));
        }
        Ok(Self { entries })
    }

    /// Looks up an attribute value, ignoring case.
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[cfg(test)]
    pub(crate) fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// A start (or self-closing) element handed out by a [`Scope`].
#[derive(Debug, Clone)]
pub(crate) struct Element {
    /// Local name as written in the document
    pub(crate) name: String,
    pub(crate) attrs: Attributes,
    /// False for `<Empty/>` elements
    has_body: bool,
}

impl Element {
    fn from_start(e: &BytesStart<'_>, decoder: Decoder, has_body: bool) -> Result<Self> {
        let local_name = e.local_name();
        let name = decoder
            .decode(local_name.as_ref())
            .map_err(quick_xml::Error::from)?
            .into_owned();
        let attrs = Attributes::from_start(e, decoder)?;
        Ok(Self {
            name,
            attrs,
            has_body,
        })
    }
}

enum Step {
    Open(Element),
    Close,
    Eof,
}

/// Forward-only element reader.
pub(crate) struct XmlCursor<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    open: Vec<String>,
}

impl<R: BufRead> XmlCursor<R> {
    pub(crate) fn new(reader: R) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        Self {
            reader: xml_reader,
            buf: Vec::with_capacity(4096),
            open: Vec::new(),
        }
    }

    /// Number of currently open elements.
    fn depth(&self) -> usize {
        self.open.len()
    }

    /// Reads up to the next element boundary, ignoring text, comments and
    /// processing instructions.
    fn step(&mut self) -> Result<Step> {
        loop {
            self.buf.clear();
            let event = self.reader.read_event_into(&mut self.buf)?;
            // Read after the event so an encoding declaration is honoured.
            let decoder = self.reader.decoder();
            match event {
                XmlEvent::Start(ref e) => {
                    let element = Element::from_start(e, decoder, true)?;
                    self.open.push(element.name.clone());
                    return Ok(Step::Open(element));
                }
                XmlEvent::Empty(ref e) => {
                    return Ok(Step::Open(Element::from_start(e, decoder, false)?));
                }
                XmlEvent::End(_) => {
                    self.open.pop();
                    return Ok(Step::Close);
                }
                XmlEvent::Eof => {
                    return match self.open.last() {
                        Some(name) => Err(Error::UnexpectedEof(name.clone())),
                        None => Ok(Step::Eof),
                    };
                }
                _ => {}
            }
        }
    }

    /// Consumes events until only `depth` elements remain open.
    fn unwind_to(&mut self, depth: usize) -> Result<()> {
        while self.depth() > depth {
            self.step()?;
        }
        Ok(())
    }

    /// Returns a scope over the document's top-level elements.
    pub(crate) fn root(&mut self) -> Scope<'_, R> {
        Scope {
            cursor: self,
            depth: 0,
            unread_body: false,
            done: false,
        }
    }
}

/// The children of one element.
pub(crate) struct Scope<'c, R: BufRead> {
    cursor: &'c mut XmlCursor<R>,
    /// Open-element depth while positioned between this element's children
    depth: usize,
    /// The last child handed out has a body that has not been consumed
    unread_body: bool,
    done: bool,
}

impl<R: BufRead> Scope<'_, R> {
    /// Returns the next direct child, or `None` once the scope is closed.
    pub(crate) fn next_child(&mut self) -> Result<Option<Element>> {
        if self.done {
            return Ok(None);
        }
        if std::mem::take(&mut self.unread_body) {
            self.cursor.unwind_to(self.depth)?;
        }
        match self.cursor.step()? {
            Step::Open(element) => {
                self.unread_body = element.has_body;
                Ok(Some(element))
            }
            Step::Close | Step::Eof => {
                self.done = true;
                Ok(None)
            }
        }
    }

    /// Opens a scope over the children of `element`, which must be the child
    /// most recently returned by [`next_child`](Scope::next_child).
    ///
    /// If the nested scope is dropped before it is drained, this scope
    /// unwinds past the rest of `element` on its next call.
    pub(crate) fn enter(&mut self, element: &Element) -> Scope<'_, R> {
        let has_body = element.has_body && self.unread_body;
        Scope {
            cursor: &mut *self.cursor,
            depth: self.depth + 1,
            unread_body: false,
            done: !has_body,
        }
    }

    /// Consumes whatever remains of this scope.
    pub(crate) fn finish(mut self) -> Result<()> {
        while self.next_child()?.is_some() {}
        Ok(())
    }
}
