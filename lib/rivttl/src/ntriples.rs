//! A [N-Triples](https://www.w3.org/TR/n-triples/) streaming parser implemented by [`NTriplesParser`]
//! and a serializer implemented by [`NTriplesSerializer`].

use crate::event::{ReaderEvent, Sink, StatementFlags};
use crate::line_formats::LineFormatsRecognizer;
use crate::toolkit::{Parser, ReaderIterator, SliceIterator, TurtleParseError, TurtleSyntaxError};
use rivrdf::{GraphNameRef, LiteralRef, NamedNodeRef, StatementRef, TermRef};
use std::io::{self, Read, Write};

/// A [N-Triples](https://www.w3.org/TR/n-triples/) streaming parser.
///
/// Count the number of people:
/// ```
/// use rivrdf::vocab::rdf;
/// use rivrdf::{NamedNodeRef, TermRef};
/// use rivttl::NTriplesParser;
///
/// let file = r#"<http://example.com/foo> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .
/// <http://example.com/foo> <http://schema.org/name> "Foo" .
/// <http://example.com/bar> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .
/// <http://example.com/bar> <http://schema.org/name> "Bar" ."#;
///
/// let schema_person = NamedNodeRef::new("http://schema.org/Person")?;
/// let mut count = 0;
/// for event in NTriplesParser::new().for_reader(file.as_bytes()) {
///     if let Some(statement) = event?.into_statement() {
///         if statement.predicate.as_ref() == rdf::TYPE
///             && statement.object.as_ref() == TermRef::NamedNode(schema_person)
///         {
///             count += 1;
///         }
///     }
/// }
/// assert_eq!(2, count);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default, Clone)]
#[must_use]
pub struct NTriplesParser {
    lenient: bool,
    variables: bool,
}

impl NTriplesParser {
    /// Builds a new [`NTriplesParser`].
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

    /// Parses a N-Triples file from a [`Read`] implementation.
    pub fn for_reader<R: Read>(self, reader: R) -> ReaderNTriplesParser<R> {
        ReaderNTriplesParser {
            inner: self.low_level().parser.for_reader(reader),
        }
    }

    /// Parses a N-Triples file from a byte slice.
    pub fn for_slice(self, slice: &(impl AsRef<[u8]> + ?Sized)) -> SliceNTriplesParser<'_> {
        SliceNTriplesParser {
            inner: LineFormatsRecognizer::new_parser(
                slice.as_ref(),
                true,
                false,
                self.variables,
                self.lenient,
            )
            .into_iter(),
        }
    }

    /// Allows to parse a N-Triples file by using a low-level API.
    pub fn low_level(self) -> LowLevelNTriplesParser {
        LowLevelNTriplesParser {
            parser: LineFormatsRecognizer::new_parser(
                Vec::new(),
                false,
                false,
                self.variables,
                self.lenient,
            ),
        }
    }
}

/// Parses a N-Triples file from a [`Read`] implementation.
///
/// Can be built using [`NTriplesParser::for_reader`].
#[must_use]
pub struct ReaderNTriplesParser<R: Read> {
    inner: ReaderIterator<R, LineFormatsRecognizer>,
}

impl<R: Read> Iterator for ReaderNTriplesParser<R> {
    type Item = Result<ReaderEvent, TurtleParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.inner.next()?.map(|(mut event, position)| {
            event.set_caret(position.start);
            event
        }))
    }
}

/// Parses a N-Triples file from a byte slice.
///
/// Can be built using [`NTriplesParser::for_slice`].
#[must_use]
pub struct SliceNTriplesParser<'a> {
    inner: SliceIterator<'a, LineFormatsRecognizer>,
}

impl Iterator for SliceNTriplesParser<'_> {
    type Item = Result<ReaderEvent, TurtleSyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.inner.next()?.map(|(mut event, position)| {
            event.set_caret(position.start);
            event
        }))
    }
}

/// Parses a N-Triples file by using a low-level API.
///
/// Can be built using [`NTriplesParser::low_level`].
pub struct LowLevelNTriplesParser {
    pub(crate) parser: Parser<Vec<u8>, LineFormatsRecognizer>,
}

impl LowLevelNTriplesParser {
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

/// A [N-Triples](https://www.w3.org/TR/n-triples/) serializer.
///
/// ```
/// use rivrdf::vocab::rdf;
/// use rivrdf::{NamedNodeRef, StatementRef};
/// use rivttl::NTriplesSerializer;
///
/// let mut serializer = NTriplesSerializer::new().for_writer(Vec::new());
/// serializer.serialize_statement(StatementRef::triple(
///     NamedNodeRef::new("http://example.com#me")?,
///     rdf::TYPE,
///     NamedNodeRef::new("http://schema.org/Person")?,
/// ))?;
/// assert_eq!(
///     b"<http://example.com#me> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .\n",
///     serializer.finish()?.as_slice()
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default, Clone)]
#[must_use]
pub struct NTriplesSerializer {
    ascii: bool,
}

impl NTriplesSerializer {
    /// Builds a new [`NTriplesSerializer`].
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

    /// Writes a N-Triples file to a [`Write`] implementation.
    pub fn for_writer<W: Write>(self, writer: W) -> WriterNTriplesSerializer<W> {
        WriterNTriplesSerializer {
            writer,
            low_level: self.low_level(),
        }
    }

    /// Builds a low-level N-Triples serializer, the caller passes the output on each call.
    pub fn low_level(self) -> LowLevelNTriplesSerializer {
        LowLevelNTriplesSerializer { ascii: self.ascii }
    }
}

/// Writes a N-Triples file to a [`Write`] implementation.
///
/// Can be built using [`NTriplesSerializer::for_writer`].
#[must_use]
pub struct WriterNTriplesSerializer<W: Write> {
    writer: W,
    low_level: LowLevelNTriplesSerializer,
}

impl<W: Write> WriterNTriplesSerializer<W> {
    /// Writes an extra statement.
    ///
    /// Fails on statements in a named graph: use the N-Quads serializer.
    pub fn serialize_statement<'a>(&mut self, s: impl Into<StatementRef<'a>>) -> io::Result<()> {
        self.low_level.serialize_statement(s.into(), &mut self.writer)
    }

    /// Ends the write process and returns the underlying [`Write`].
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> Sink for WriterNTriplesSerializer<W> {
    type Error = io::Error;

    fn statement(&mut self, statement: StatementRef<'_>, _flags: StatementFlags) -> io::Result<()> {
        self.low_level.serialize_statement(statement, &mut self.writer)
    }
}

/// Writes a N-Triples file by using a low-level API.
///
/// Can be built using [`NTriplesSerializer::low_level`].
pub struct LowLevelNTriplesSerializer {
    ascii: bool,
}

impl LowLevelNTriplesSerializer {
    /// Writes an extra statement.
    ///
    /// Fails on statements in a named graph: use the N-Quads serializer.
    pub fn serialize_statement(
        &mut self,
        s: StatementRef<'_>,
        mut writer: impl Write,
    ) -> io::Result<()> {
        if !s.graph_name.is_default_graph() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "N-Triples does not support named graphs, use the N-Quads serializer",
            ));
        }
        write_statement_line(s, false, self.ascii, &mut writer)
    }
}

/// Writes one `subject predicate object [graph] .` line.
pub(crate) fn write_statement_line(
    s: StatementRef<'_>,
    with_graph_name: bool,
    ascii: bool,
    writer: &mut impl Write,
) -> io::Result<()> {
    write_term(s.subject.into(), ascii, writer)?;
    writer.write_all(b" ")?;
    write_term(s.predicate.into(), ascii, writer)?;
    writer.write_all(b" ")?;
    write_term(s.object, ascii, writer)?;
    if with_graph_name {
        match s.graph_name {
            GraphNameRef::NamedNode(node) => {
                writer.write_all(b" ")?;
                write_term(node.into(), ascii, writer)?;
            }
            GraphNameRef::BlankNode(node) => {
                writer.write_all(b" ")?;
                write_term(node.into(), ascii, writer)?;
            }
            GraphNameRef::Variable(variable) => {
                writer.write_all(b" ")?;
                write_term(variable.into(), ascii, writer)?;
            }
            GraphNameRef::DefaultGraph => (),
        }
    }
    writer.write_all(b" .\n")
}

fn write_term(term: TermRef<'_>, ascii: bool, writer: &mut impl Write) -> io::Result<()> {
    if !ascii {
        // The Display implementations already write the N-Triples form
        return write!(writer, "{term}");
    }
    match term {
        TermRef::NamedNode(node) => write_iri(node, writer),
        TermRef::BlankNode(node) => write!(writer, "{node}"),
        TermRef::Literal(literal) => write_literal(literal, writer),
        TermRef::Variable(variable) => write!(writer, "{variable}"),
    }
}

fn write_iri(node: NamedNodeRef<'_>, writer: &mut impl Write) -> io::Result<()> {
    writer.write_all(b"<")?;
    for c in node.as_str().chars() {
        if c.is_ascii() {
            write!(writer, "{c}")?;
        } else {
            write_u_escape(c, writer)?;
        }
    }
    writer.write_all(b">")
}

fn write_literal(literal: LiteralRef<'_>, writer: &mut impl Write) -> io::Result<()> {
    writer.write_all(b"\"")?;
    for c in literal.value().chars() {
        match c {
            '\u{08}' => writer.write_all(b"\\b")?,
            '\t' => writer.write_all(b"\\t")?,
            '\n' => writer.write_all(b"\\n")?,
            '\u{0C}' => writer.write_all(b"\\f")?,
            '\r' => writer.write_all(b"\\r")?,
            '"' => writer.write_all(b"\\\"")?,
            '\\' => writer.write_all(b"\\\\")?,
            c if c.is_ascii_graphic() || c == ' ' => write!(writer, "{c}")?,
            c => write_u_escape(c, writer)?,
        }
    }
    writer.write_all(b"\"")?;
    if let Some(language) = literal.language() {
        write!(writer, "@{language}")
    } else if literal.is_plain() {
        Ok(())
    } else {
        writer.write_all(b"^^")?;
        write_iri(literal.datatype(), writer)
    }
}

fn write_u_escape(c: char, writer: &mut impl Write) -> io::Result<()> {
    let code = u32::from(c);
    if code <= 0xFFFF {
        write!(writer, "\\u{code:04X}")
    } else {
        write!(writer, "\\U{code:08X}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rivrdf::BlankNodeRef;

    #[test]
    fn test_write() -> io::Result<()> {
        let mut serializer = NTriplesSerializer::new().for_writer(Vec::new());
        serializer.serialize_statement(StatementRef::triple(
            NamedNodeRef::new_unchecked("http://example.com/s"),
            NamedNodeRef::new_unchecked("http://example.com/p"),
            BlankNodeRef::new_unchecked("b1"),
        ))?;
        serializer.serialize_statement(StatementRef::triple(
            BlankNodeRef::new_unchecked("b1"),
            NamedNodeRef::new_unchecked("http://example.com/p"),
            LiteralRef::new_simple_literal("foo\nbar"),
        ))?;
        assert_eq!(
            String::from_utf8(serializer.finish()?).unwrap(),
            "<http://example.com/s> <http://example.com/p> _:b1 .\n_:b1 <http://example.com/p> \"foo\\nbar\" .\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_ascii() -> io::Result<()> {
        let mut serializer = NTriplesSerializer::new().ascii().for_writer(Vec::new());
        serializer.serialize_statement(StatementRef::triple(
            NamedNodeRef::new_unchecked("http://example.com/caf\u{E9}"),
            NamedNodeRef::new_unchecked("http://example.com/p"),
            LiteralRef::new_simple_literal("caf\u{E9} \u{1F600}"),
        ))?;
        assert_eq!(
            String::from_utf8(serializer.finish()?).unwrap(),
            "<http://example.com/caf\\u00E9> <http://example.com/p> \"caf\\u00E9 \\U0001F600\" .\n"
        );
        Ok(())
    }

    #[test]
    fn test_named_graph_is_rejected() {
        let mut serializer = NTriplesSerializer::new().low_level();
        let error = serializer
            .serialize_statement(
                StatementRef::new(
                    NamedNodeRef::new_unchecked("http://example.com/s"),
                    NamedNodeRef::new_unchecked("http://example.com/p"),
                    NamedNodeRef::new_unchecked("http://example.com/o"),
                    NamedNodeRef::new_unchecked("http://example.com/g"),
                ),
                Vec::new(),
            )
            .unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidInput);
    }
}
