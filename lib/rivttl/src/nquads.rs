//! A [N-Quads](https://www.w3.org/TR/n-quads/) streaming parser implemented by [`NQuadsParser`]
//! and a serializer implemented by [`NQuadsSerializer`].

use crate::event::{ReaderEvent, Sink, StatementFlags};
use crate::line_formats::LineFormatsRecognizer;
use crate::ntriples::write_statement_line;
use crate::toolkit::{Parser, ReaderIterator, SliceIterator, TurtleParseError, TurtleSyntaxError};
use rivrdf::StatementRef;
use std::io::{self, Read, Write};

/// A [N-Quads](https://www.w3.org/TR/n-quads/) streaming parser.
///
/// Count the number of people:
/// ```
/// use rivrdf::vocab::rdf;
/// use rivrdf::{NamedNodeRef, TermRef};
/// use rivttl::NQuadsParser;
///
/// let file = r#"<http://example.com/foo> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> <http://example.com/g> .
/// <http://example.com/foo> <http://schema.org/name> "Foo" <http://example.com/g> ."#;
///
/// let schema_person = NamedNodeRef::new("http://schema.org/Person")?;
/// let mut count = 0;
/// for event in NQuadsParser::new().for_reader(file.as_bytes()) {
///     if let Some(statement) = event?.into_statement() {
///         if statement.predicate.as_ref() == rdf::TYPE
///             && statement.object.as_ref() == TermRef::NamedNode(schema_person)
///         {
///             count += 1;
///         }
///     }
/// }
/// assert_eq!(1, count);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default, Clone)]
#[must_use]
pub struct NQuadsParser {
    lenient: bool,
    variables: bool,
}

impl NQuadsParser {
    /// Builds a new [`NQuadsParser`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recovers from syntax errors by skipping to the next line instead of
    /// failing the document. IRI and UTF-8 validations are also relaxed.
    #[inline]
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// Accepts `?name` and `$name` variables in any term position.
    #[inline]
    pub fn with_variables(mut self) -> Self {
        self.variables = true;
        self
    }

    /// Parses a N-Quads file from a [`Read`] implementation.
    pub fn for_reader<R: Read>(self, reader: R) -> ReaderNQuadsParser<R> {
        ReaderNQuadsParser {
            inner: self.low_level().parser.for_reader(reader),
        }
    }

    /// Parses a N-Quads file from a byte slice.
    pub fn for_slice(self, slice: &(impl AsRef<[u8]> + ?Sized)) -> SliceNQuadsParser<'_> {
        SliceNQuadsParser {
            inner: LineFormatsRecognizer::new_parser(
                slice.as_ref(),
                true,
                true,
                self.variables,
                self.lenient,
            )
            .into_iter(),
        }
    }

    /// Allows to parse a N-Quads file by using a low-level API.
    pub fn low_level(self) -> LowLevelNQuadsParser {
        LowLevelNQuadsParser {
            parser: LineFormatsRecognizer::new_parser(
                Vec::new(),
                false,
                true,
                self.variables,
                self.lenient,
            ),
        }
    }
}

/// Parses a N-Quads file from a [`Read`] implementation.
///
/// Can be built using [`NQuadsParser::for_reader`].
#[must_use]
pub struct ReaderNQuadsParser<R: Read> {
    inner: ReaderIterator<R, LineFormatsRecognizer>,
}

impl<R: Read> Iterator for ReaderNQuadsParser<R> {
    type Item = Result<ReaderEvent, TurtleParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.inner.next()?.map(|(mut event, position)| {
            event.set_caret(position.start);
            event
        }))
    }
}

/// Parses a N-Quads file from a byte slice.
///
/// Can be built using [`NQuadsParser::for_slice`].
#[must_use]
pub struct SliceNQuadsParser<'a> {
    inner: SliceIterator<'a, LineFormatsRecognizer>,
}

impl Iterator for SliceNQuadsParser<'_> {
    type Item = Result<ReaderEvent, TurtleSyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.inner.next()?.map(|(mut event, position)| {
            event.set_caret(position.start);
            event
        }))
    }
}

/// Parses a N-Quads file by using a low-level API.
///
/// Can be built using [`NQuadsParser::low_level`].
pub struct LowLevelNQuadsParser {
    pub(crate) parser: Parser<Vec<u8>, LineFormatsRecognizer>,
}

impl LowLevelNQuadsParser {
    /// Adds some extra bytes to the parser. Should be called when [`parse_next`](Self::parse_next) returns [`None`] and there is still unread data.
    pub fn extend_from_slice(&mut self, other: &[u8]) {
        self.parser.extend_from_slice(other)
    }

    /// Tells the parser that the file is finished.
    pub fn end(&mut self) {
        self.parser.end()
    }

    /// Returns if the parsing is finished.
    pub fn is_end(&self) -> bool {
        self.parser.is_end()
    }

    /// Attempts to parse a new event from the already provided data.
    pub fn parse_next(&mut self) -> Option<Result<ReaderEvent, TurtleSyntaxError>> {
        Some(self.parser.parse_next()?.map(|(mut event, position)| {
            event.set_caret(position.start);
            event
        }))
    }
}

/// A [N-Quads](https://www.w3.org/TR/n-quads/) serializer.
///
/// ```
/// use rivrdf::vocab::rdf;
/// use rivrdf::{NamedNodeRef, StatementRef};
/// use rivttl::NQuadsSerializer;
///
/// let mut serializer = NQuadsSerializer::new().for_writer(Vec::new());
/// serializer.serialize_statement(StatementRef::new(
///     NamedNodeRef::new("http://example.com#me")?,
///     rdf::TYPE,
///     NamedNodeRef::new("http://schema.org/Person")?,
///     NamedNodeRef::new("http://example.com")?,
/// ))?;
/// assert_eq!(
///     b"<http://example.com#me> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> <http://example.com> .\n",
///     serializer.finish()?.as_slice()
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default, Clone)]
#[must_use]
pub struct NQuadsSerializer {
    ascii: bool,
}

impl NQuadsSerializer {
    /// Builds a new [`NQuadsSerializer`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Escapes all non-ASCII characters with `\u`/`\U` escapes.
    #[inline]
    pub fn ascii(mut self) -> Self {
        self.ascii = true;
        self
    }

    /// Writes a N-Quads file to a [`Write`] implementation.
    pub fn for_writer<W: Write>(self, writer: W) -> WriterNQuadsSerializer<W> {
        WriterNQuadsSerializer {
            writer,
            low_level: self.low_level(),
        }
    }

    /// Builds a low-level N-Quads serializer, the caller passes the output on each call.
    pub fn low_level(self) -> LowLevelNQuadsSerializer {
        LowLevelNQuadsSerializer { ascii: self.ascii }
    }
}

/// Writes a N-Quads file to a [`Write`] implementation.
///
/// Can be built using [`NQuadsSerializer::for_writer`].
#[must_use]
pub struct WriterNQuadsSerializer<W: Write> {
    writer: W,
    low_level: LowLevelNQuadsSerializer,
}

impl<W: Write> WriterNQuadsSerializer<W> {
    /// Writes an extra statement.
    pub fn serialize_statement<'a>(&mut self, s: impl Into<StatementRef<'a>>) -> io::Result<()> {
        self.low_level.serialize_statement(s.into(), &mut self.writer)
    }

    /// Ends the write process and returns the underlying [`Write`].
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> Sink for WriterNQuadsSerializer<W> {
    type Error = io::Error;

    fn statement(&mut self, statement: StatementRef<'_>, _flags: StatementFlags) -> io::Result<()> {
        self.low_level.serialize_statement(statement, &mut self.writer)
    }
}

/// Writes a N-Quads file by using a low-level API.
///
/// Can be built using [`NQuadsSerializer::low_level`].
pub struct LowLevelNQuadsSerializer {
    ascii: bool,
}

impl LowLevelNQuadsSerializer {
    /// Writes an extra statement.
    pub fn serialize_statement(
        &mut self,
        s: StatementRef<'_>,
        mut writer: impl Write,
    ) -> io::Result<()> {
        write_statement_line(s, true, self.ascii, &mut writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rivrdf::{BlankNodeRef, LiteralRef, NamedNodeRef};

    #[test]
    fn test_write() -> io::Result<()> {
        let mut serializer = NQuadsSerializer::new().for_writer(Vec::new());
        serializer.serialize_statement(StatementRef::new(
            NamedNodeRef::new_unchecked("http://example.com/s"),
            NamedNodeRef::new_unchecked("http://example.com/p"),
            LiteralRef::new_simple_literal("foo"),
            BlankNodeRef::new_unchecked("g1"),
        ))?;
        serializer.serialize_statement(StatementRef::triple(
            NamedNodeRef::new_unchecked("http://example.com/s"),
            NamedNodeRef::new_unchecked("http://example.com/p"),
            LiteralRef::new_simple_literal("bar"),
        ))?;
        assert_eq!(
            String::from_utf8(serializer.finish()?).unwrap(),
            "<http://example.com/s> <http://example.com/p> \"foo\" _:g1 .\n<http://example.com/s> <http://example.com/p> \"bar\" .\n"
        );
        Ok(())
    }
}
