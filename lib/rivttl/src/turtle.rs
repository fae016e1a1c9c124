//! A [Turtle](https://www.w3.org/TR/turtle/) streaming parser implemented by [`TurtleParser`]
//! and a serializer implemented by [`TurtleSerializer`].

use crate::event::{ReaderEvent, Sink, StatementFlags};
use crate::terse::TerseRecognizer;
use crate::toolkit::{Parser, ReaderIterator, SliceIterator, TurtleParseError, TurtleSyntaxError};
use crate::trig::{LowLevelTriGSerializer, TriGParser, TriGSerializer};
use rivrdf::{BlankNodeRef, EnvironmentError, IriParseError, NamedNodeRef, StatementRef};
use std::io::{self, Read, Write};

/// A [Turtle](https://www.w3.org/TR/turtle/) streaming parser.
///
/// It emits [`ReaderEvent`]s: directives, statements carrying their
/// abbreviation flags, and end-of-anonymous-node marks.
///
/// Count the number of people:
/// ```
/// use rivrdf::vocab::rdf;
/// use rivrdf::{NamedNodeRef, TermRef};
/// use rivttl::TurtleParser;
///
/// let file = r#"@base <http://example.com/> .
/// @prefix schema: <http://schema.org/> .
/// <foo> a schema:Person ;
///     schema:name "Foo" .
/// <bar> a schema:Person ;
///     schema:name "Bar" ."#;
///
/// let schema_person = NamedNodeRef::new("http://schema.org/Person")?;
/// let mut count = 0;
/// for event in TurtleParser::new().for_reader(file.as_bytes()) {
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
pub struct TurtleParser {
    inner: TriGParser,
}

impl TurtleParser {
    /// Builds a new [`TurtleParser`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recovers from syntax errors instead of failing the document.
    ///
    /// Recovered errors are still reported, then the reader skips to the next
    /// line and continues. Some validations (IRIs, language tags, UTF-8) are
    /// also relaxed: invalid text is replaced by U+FFFD.
    #[inline]
    pub fn lenient(mut self) -> Self {
        self.inner = self.inner.lenient();
        self
    }

    /// Accepts `?name` and `$name` variables in any term position.
    #[inline]
    pub fn with_variables(mut self) -> Self {
        self.inner = self.inner.with_variables();
        self
    }

    /// Does not resolve IRI references against the base IRI.
    #[inline]
    pub fn keep_relative_iris(mut self) -> Self {
        self.inner = self.inner.keep_relative_iris();
        self
    }

    /// Reads blank node labels exactly as written.
    ///
    /// By default labels that look like generated ids (`b1`, `b24`…) are
    /// rewritten to keep them apart from the ids the parser generates for
    /// `[ … ]` and `( … )`.
    #[inline]
    pub fn exact_blank_ids(mut self) -> Self {
        self.inner = self.inner.exact_blank_ids();
        self
    }

    /// Treats `b<digits>` labels as written on purpose and skips the rewrite,
    /// like [`exact_blank_ids`](Self::exact_blank_ids).
    #[inline]
    pub fn trust_generated_blank_ids(mut self) -> Self {
        self.inner = self.inner.trust_generated_blank_ids();
        self
    }

    /// Does not prepend the per-document prefix to generated blank node ids.
    ///
    /// Generated ids from different documents may then collide.
    #[inline]
    pub fn global_blank_ids(mut self) -> Self {
        self.inner = self.inner.global_blank_ids();
        self
    }

    /// Sets the prefix of the blank node ids the parser generates.
    #[inline]
    pub fn with_blank_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.inner = self.inner.with_blank_id_prefix(prefix);
        self
    }

    #[inline]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Result<Self, IriParseError> {
        self.inner = self.inner.with_base_iri(base_iri)?;
        Ok(self)
    }

    #[inline]
    pub fn with_prefix(
        mut self,
        prefix_name: impl Into<String>,
        prefix_iri: impl Into<String>,
    ) -> Result<Self, EnvironmentError> {
        self.inner = self.inner.with_prefix(prefix_name, prefix_iri)?;
        Ok(self)
    }

    /// Parses a Turtle file from a [`Read`] implementation.
    pub fn for_reader<R: Read>(self, reader: R) -> ReaderTurtleParser<R> {
        ReaderTurtleParser {
            inner: self.low_level().parser.for_reader(reader),
        }
    }

    /// Parses a Turtle file from a byte slice.
    pub fn for_slice(self, slice: &(impl AsRef<[u8]> + ?Sized)) -> SliceTurtleParser<'_> {
        SliceTurtleParser {
            inner: TerseRecognizer::new_parser(
                slice.as_ref(),
                true,
                false,
                self.inner.variables,
                self.inner.keep_relative_iris,
                self.inner.lenient,
                !self.inner.exact_blank_ids,
                self.inner.blank_id_prefix,
                self.inner.global_blank_ids,
                self.inner.env,
            )
            .into_iter(),
        }
    }

    /// Allows to parse a Turtle file by using a low-level API.
    ///
    /// ```
    /// use rivttl::TurtleParser;
    ///
    /// let file: [&[u8]; 5] = [
    ///     b"@base <http://example.com/>",
    ///     b". @prefix schema: <http://schema.org/> .",
    ///     b"<foo> a schema:Person",
    ///     b" ; schema:name \"Foo\" . <bar>",
    ///     b" a schema:Person ; schema:name \"Bar\" .",
    /// ];
    ///
    /// let mut count = 0;
    /// let mut parser = TurtleParser::new().low_level();
    /// let mut file_chunks = file.iter();
    /// while !parser.is_end() {
    ///     // We feed more data to the parser
    ///     if let Some(chunk) = file_chunks.next() {
    ///         parser.extend_from_slice(chunk);
    ///     } else {
    ///         parser.end(); // It's finished
    ///     }
    ///     // We read as many events from the parser as possible
    ///     while let Some(event) = parser.parse_next() {
    ///         if event?.into_statement().is_some() {
    ///             count += 1;
    ///         }
    ///     }
    /// }
    /// assert_eq!(2, count);
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn low_level(self) -> LowLevelTurtleParser {
        LowLevelTurtleParser {
            parser: TerseRecognizer::new_parser(
                Vec::new(),
                false,
                false,
                self.inner.variables,
                self.inner.keep_relative_iris,
                self.inner.lenient,
                !self.inner.exact_blank_ids,
                self.inner.blank_id_prefix,
                self.inner.global_blank_ids,
                self.inner.env,
            ),
        }
    }
}

/// Parses a Turtle file from a [`Read`] implementation.
///
/// Can be built using [`TurtleParser::for_reader`].
#[must_use]
pub struct ReaderTurtleParser<R: Read> {
    inner: ReaderIterator<R, TerseRecognizer>,
}

impl<R: Read> ReaderTurtleParser<R> {
    /// The IRI prefixes considered at the current step of the parsing.
    ///
    /// It is empty at the beginning of the parsing and gets updated when
    /// prefix declarations are read.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.parser.context.env.prefixes()
    }

    /// The base IRI considered at the current step of the parsing.
    pub fn base_iri(&self) -> Option<&str> {
        self.inner.parser.context.env.base()
    }
}

impl<R: Read> Iterator for ReaderTurtleParser<R> {
    type Item = Result<ReaderEvent, TurtleParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.inner.next()?.map(|(mut event, position)| {
            event.set_caret(position.start);
            event
        }))
    }
}

/// Parses a Turtle file from a byte slice.
///
/// Can be built using [`TurtleParser::for_slice`].
#[must_use]
pub struct SliceTurtleParser<'a> {
    inner: SliceIterator<'a, TerseRecognizer>,
}

impl SliceTurtleParser<'_> {
    /// The IRI prefixes considered at the current step of the parsing.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.parser.context.env.prefixes()
    }

    /// The base IRI considered at the current step of the parsing.
    pub fn base_iri(&self) -> Option<&str> {
        self.inner.parser.context.env.base()
    }
}

impl Iterator for SliceTurtleParser<'_> {
    type Item = Result<ReaderEvent, TurtleSyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.inner.next()?.map(|(mut event, position)| {
            event.set_caret(position.start);
            event
        }))
    }
}

/// Parses a Turtle file by using a low-level API.
///
/// Can be built using [`TurtleParser::low_level`].
pub struct LowLevelTurtleParser {
    parser: Parser<Vec<u8>, TerseRecognizer>,
}

impl LowLevelTurtleParser {
    /// Adds some extra bytes to the parser. Should be called when [`parse_next`](Self::parse_next) returns [`None`] and there is still unread data.
    pub fn extend_from_slice(&mut self, other: &[u8]) {
        self.parser.extend_from_slice(other)
    }

    /// Tells the parser that the file is finished.
    ///
    /// This triggers the parsing of the final bytes and might lead [`parse_next`](Self::parse_next) to return some extra values.
    pub fn end(&mut self) {
        self.parser.end()
    }

    /// Returns if the parsing is finished i.e. [`end`](Self::end) has been called and [`parse_next`](Self::parse_next) is always going to return `None`.
    pub fn is_end(&self) -> bool {
        self.parser.is_end()
    }

    /// Attempts to parse a new event from the already provided data.
    ///
    /// Returns [`None`] if the parsing is finished or more data is required.
    /// If it is the case more data should be fed using [`extend_from_slice`](Self::extend_from_slice).
    pub fn parse_next(&mut self) -> Option<Result<ReaderEvent, TurtleSyntaxError>> {
        Some(self.parser.parse_next()?.map(|(mut event, position)| {
            event.set_caret(position.start);
            event
        }))
    }

    /// The IRI prefixes considered at the current step of the parsing.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parser.context.env.prefixes()
    }

    /// The base IRI considered at the current step of the parsing.
    pub fn base_iri(&self) -> Option<&str> {
        self.parser.context.env.base()
    }
}

/// A [Turtle](https://www.w3.org/TR/turtle/) serializer.
///
/// It implements [`Sink`], reproducing the `[ … ]`, `( … )`, `;` and `,`
/// abbreviations from the statement flags and end-of-anonymous events, and
/// can also be fed plain statements.
///
/// ```
/// use rivrdf::vocab::rdf;
/// use rivrdf::{NamedNodeRef, StatementRef};
/// use rivttl::TurtleSerializer;
///
/// let mut serializer = TurtleSerializer::new()
///     .with_prefix("schema", "http://schema.org/")?
///     .for_writer(Vec::new());
/// serializer.serialize_statement(StatementRef::triple(
///     NamedNodeRef::new("http://example.com#me")?,
///     rdf::TYPE,
///     NamedNodeRef::new("http://schema.org/Person")?,
/// ))?;
/// assert_eq!(
///     b"@prefix schema: <http://schema.org/> .\n<http://example.com#me> a schema:Person .\n",
///     serializer.finish()?.as_slice()
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default, Clone)]
#[must_use]
pub struct TurtleSerializer {
    inner: TriGSerializer,
}

impl TurtleSerializer {
    /// Builds a new [`TurtleSerializer`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_prefix(
        mut self,
        prefix_name: impl Into<String>,
        prefix_iri: impl Into<String>,
    ) -> Result<Self, EnvironmentError> {
        self.inner = self.inner.with_prefix(prefix_name, prefix_iri)?;
        Ok(self)
    }

    /// Adds a base IRI: IRIs under it are written as relative references.
    ///
    /// ```
    /// use rivrdf::vocab::rdf;
    /// use rivrdf::{NamedNodeRef, StatementRef};
    /// use rivttl::TurtleSerializer;
    ///
    /// let mut serializer = TurtleSerializer::new()
    ///     .with_base_iri("http://example.com")?
    ///     .with_prefix("ex", "http://example.com/ns#")?
    ///     .for_writer(Vec::new());
    /// serializer.serialize_statement(StatementRef::triple(
    ///     NamedNodeRef::new("http://example.com/me")?,
    ///     rdf::TYPE,
    ///     NamedNodeRef::new("http://example.com/ns#Person")?,
    /// ))?;
    /// assert_eq!(
    ///     b"@base <http://example.com> .\n@prefix ex: <http://example.com/ns#> .\n</me> a ex:Person .\n",
    ///     serializer.finish()?.as_slice()
    /// );
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    #[inline]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Result<Self, EnvironmentError> {
        self.inner = self.inner.with_base_iri(base_iri)?;
        Ok(self)
    }

    /// Escapes all non-ASCII characters with `\u`/`\U` or percent escapes.
    #[inline]
    pub fn ascii(mut self) -> Self {
        self.inner = self.inner.ascii();
        self
    }

    /// Writes single spaces instead of line jumps and indentation.
    #[inline]
    pub fn terse(mut self) -> Self {
        self.inner = self.inner.terse();
        self
    }

    /// Never writes prefixed names, even when a prefix matches.
    #[inline]
    pub fn unqualified(mut self) -> Self {
        self.inner = self.inner.unqualified();
        self
    }

    /// Always writes full `<…>` IRIs: no prefixed names and no `a`/`()` sugar.
    #[inline]
    pub fn expanded(mut self) -> Self {
        self.inner = self.inner.expanded();
        self
    }

    /// Writes IRIs exactly as given, never relative to the base IRI.
    #[inline]
    pub fn no_base(mut self) -> Self {
        self.inner = self.inner.no_base();
        self
    }

    /// Suppresses the `@prefix`/`@base` prelude.
    #[inline]
    pub fn contextual(mut self) -> Self {
        self.inner = self.inner.contextual();
        self
    }

    /// Writes `rdf:type` (or its prefixed form) instead of `a`.
    #[inline]
    pub fn always_rdf_type(mut self) -> Self {
        self.inner = self.inner.always_rdf_type();
        self
    }

    /// Writes a Turtle file to a [`Write`] implementation.
    pub fn for_writer<W: Write>(self, writer: W) -> WriterTurtleSerializer<W> {
        WriterTurtleSerializer {
            writer,
            low_level: self.low_level(),
        }
    }

    /// Builds a low-level Turtle serializer, the caller passes the output on each call.
    pub fn low_level(self) -> LowLevelTurtleSerializer {
        LowLevelTurtleSerializer {
            inner: self.inner.low_level_without_graphs(),
        }
    }
}

/// Writes a Turtle file to a [`Write`] implementation.
///
/// Can be built using [`TurtleSerializer::for_writer`].
#[must_use]
pub struct WriterTurtleSerializer<W: Write> {
    writer: W,
    low_level: LowLevelTurtleSerializer,
}

impl<W: Write> WriterTurtleSerializer<W> {
    /// Writes an extra statement.
    ///
    /// Fails on statements in a named graph: Turtle has no graph syntax.
    pub fn serialize_statement<'a>(&mut self, s: impl Into<StatementRef<'a>>) -> io::Result<()> {
        self.low_level
            .serialize_statement(s.into(), StatementFlags::NONE, &mut self.writer)
    }

    /// Forwards a reader event.
    pub fn serialize_event(&mut self, event: &ReaderEvent) -> io::Result<()> {
        event.dispatch(self)
    }

    /// Ends the write process and returns the underlying [`Write`].
    ///
    /// Closes any open anonymous node, list and subject.
    pub fn finish(mut self) -> io::Result<W> {
        self.low_level.finish(&mut self.writer)?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> Sink for WriterTurtleSerializer<W> {
    type Error = io::Error;

    fn base(&mut self, iri: NamedNodeRef<'_>) -> io::Result<()> {
        self.low_level.serialize_base(iri, &mut self.writer)
    }

    fn prefix(&mut self, name: &str, iri: NamedNodeRef<'_>) -> io::Result<()> {
        self.low_level.serialize_prefix(name, iri, &mut self.writer)
    }

    fn statement(&mut self, statement: StatementRef<'_>, flags: StatementFlags) -> io::Result<()> {
        self.low_level
            .serialize_statement(statement, flags, &mut self.writer)
    }

    fn end_anonymous(&mut self, node: BlankNodeRef<'_>) -> io::Result<()> {
        self.low_level
            .serialize_end_anonymous(node, &mut self.writer)
    }
}

/// Writes a Turtle file by using a low-level API.
///
/// Can be built using [`TurtleSerializer::low_level`].
pub struct LowLevelTurtleSerializer {
    inner: LowLevelTriGSerializer,
}

impl LowLevelTurtleSerializer {
    /// Writes an extra statement.
    ///
    /// Fails on statements in a named graph: Turtle has no graph syntax.
    pub fn serialize_statement(
        &mut self,
        s: StatementRef<'_>,
        flags: StatementFlags,
        writer: impl Write,
    ) -> io::Result<()> {
        self.inner.serialize_statement(s, flags, writer)
    }

    /// Writes a base directive.
    pub fn serialize_base(&mut self, iri: NamedNodeRef<'_>, writer: impl Write) -> io::Result<()> {
        self.inner.serialize_base(iri, writer)
    }

    /// Writes a prefix declaration.
    pub fn serialize_prefix(
        &mut self,
        name: &str,
        iri: NamedNodeRef<'_>,
        writer: impl Write,
    ) -> io::Result<()> {
        self.inner.serialize_prefix(name, iri, writer)
    }

    /// Closes the anonymous node opened by a previous `ANON_*` statement.
    pub fn serialize_end_anonymous(
        &mut self,
        node: BlankNodeRef<'_>,
        writer: impl Write,
    ) -> io::Result<()> {
        self.inner.serialize_end_anonymous(node, writer)
    }

    /// Finishes to write the file. Calling it again is a no-op.
    pub fn finish(&mut self, writer: impl Write) -> io::Result<()> {
        self.inner.finish(writer)
    }
}

#[cfg(test)]
#[allow(clippy::panic_in_result_fn)]
mod tests {
    use super::*;
    use rivrdf::{BlankNodeRef, LiteralRef, NamedNodeRef};

    #[test]
    fn test_write() -> io::Result<()> {
        let mut serializer = TurtleSerializer::new().for_writer(Vec::new());
        serializer.serialize_statement(StatementRef::triple(
            NamedNodeRef::new_unchecked("http://example.com/s"),
            NamedNodeRef::new_unchecked("http://example.com/p"),
            NamedNodeRef::new_unchecked("http://example.com/o"),
        ))?;
        serializer.serialize_statement(StatementRef::triple(
            NamedNodeRef::new_unchecked("http://example.com/s"),
            NamedNodeRef::new_unchecked("http://example.com/p"),
            LiteralRef::new_simple_literal("foo"),
        ))?;
        serializer.serialize_statement(StatementRef::triple(
            NamedNodeRef::new_unchecked("http://example.com/s"),
            NamedNodeRef::new_unchecked("http://example.com/p2"),
            LiteralRef::new_language_tagged_literal_unchecked("foo", "en"),
        ))?;
        serializer.serialize_statement(StatementRef::triple(
            BlankNodeRef::new_unchecked("b"),
            NamedNodeRef::new_unchecked("http://example.com/p2"),
            BlankNodeRef::new_unchecked("b2"),
        ))?;
        assert_eq!(
            String::from_utf8(serializer.finish()?).unwrap(),
            "<http://example.com/s> <http://example.com/p> <http://example.com/o> , \"foo\" ;\n\t<http://example.com/p2> \"foo\"@en .\n_:b <http://example.com/p2> _:b2 .\n"
        );
        Ok(())
    }

    #[test]
    fn test_named_graph_is_rejected() {
        let mut serializer = TurtleSerializer::new().low_level();
        let error = serializer
            .serialize_statement(
                StatementRef::new(
                    NamedNodeRef::new_unchecked("http://example.com/s"),
                    NamedNodeRef::new_unchecked("http://example.com/p"),
                    NamedNodeRef::new_unchecked("http://example.com/o"),
                    NamedNodeRef::new_unchecked("http://example.com/g"),
                ),
                StatementFlags::NONE,
                Vec::new(),
            )
            .unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidInput);
    }
}
