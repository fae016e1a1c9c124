//! A [TriG](https://www.w3.org/TR/trig/) streaming parser implemented by [`TriGParser`]
//! and a serializer implemented by [`TriGSerializer`].

use crate::event::{ReaderEvent, Sink, StatementFlags};
use crate::terse::TerseRecognizer;
use crate::toolkit::{Parser, ReaderIterator, SliceIterator, TurtleParseError, TurtleSyntaxError};
use rivrdf::vocab::{rdf, xsd};
use rivrdf::{
    BlankNode, BlankNodeRef, Environment, EnvironmentError, GraphName, GraphNameRef, IriParseError,
    LiteralRef, NamedNodeRef, Predicate, PredicateRef, StatementRef, Subject, SubjectRef, TermRef,
};
use std::io::{self, Read, Write};

/// Maximum number of `[ … ]` / `( … )` scopes a serializer keeps open.
const MAX_NESTING_DEPTH: usize = 128;

/// A [TriG](https://www.w3.org/TR/trig/) streaming parser.
///
/// It emits [`ReaderEvent`]s: directives, statements carrying their
/// abbreviation flags, and end-of-anonymous-node marks.
///
/// Count the number of people:
/// ```
/// use rivrdf::vocab::rdf;
/// use rivrdf::{NamedNodeRef, TermRef};
/// use rivttl::TriGParser;
///
/// let file = r#"@base <http://example.com/> .
/// @prefix schema: <http://schema.org/> .
/// <g> {
///     <foo> a schema:Person ;
///         schema:name "Foo" .
/// }"#;
///
/// let schema_person = NamedNodeRef::new("http://schema.org/Person")?;
/// let mut count = 0;
/// for event in TriGParser::new().for_reader(file.as_bytes()) {
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
pub struct TriGParser {
    pub(crate) lenient: bool,
    pub(crate) variables: bool,
    pub(crate) keep_relative_iris: bool,
    pub(crate) exact_blank_ids: bool,
    pub(crate) global_blank_ids: bool,
    pub(crate) blank_id_prefix: Option<String>,
    pub(crate) env: Environment,
}

impl TriGParser {
    /// Builds a new [`TriGParser`].
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
        self.lenient = true;
        self
    }

    /// Accepts `?name` and `$name` variables in any term position.
    #[inline]
    pub fn with_variables(mut self) -> Self {
        self.variables = true;
        self
    }

    /// Does not resolve IRI references against the base IRI.
    #[inline]
    pub fn keep_relative_iris(mut self) -> Self {
        self.keep_relative_iris = true;
        self
    }

    /// Reads blank node labels exactly as written.
    ///
    /// By default labels that look like generated ids (`b1`, `b24`…) are
    /// rewritten to keep them apart from the ids the parser generates for
    /// `[ … ]` and `( … )`.
    #[inline]
    pub fn exact_blank_ids(mut self) -> Self {
        self.exact_blank_ids = true;
        self
    }

    /// Treats `b<digits>` labels as written on purpose and skips the rewrite,
    /// like [`exact_blank_ids`](Self::exact_blank_ids).
    #[inline]
    pub fn trust_generated_blank_ids(self) -> Self {
        self.exact_blank_ids()
    }

    /// Does not prepend the per-document prefix to generated blank node ids.
    ///
    /// Generated ids from different documents may then collide.
    #[inline]
    pub fn global_blank_ids(mut self) -> Self {
        self.global_blank_ids = true;
        self
    }

    /// Sets the prefix of the blank node ids the parser generates.
    #[inline]
    pub fn with_blank_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.blank_id_prefix = Some(prefix.into());
        self
    }

    #[inline]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Result<Self, IriParseError> {
        let base_iri = base_iri.into();
        self.env
            .set_base(&base_iri)
            .map_err(|e| match e {
                EnvironmentError::InvalidIri(e) => e,
                // A fresh environment only fails on IRI parsing
                _ => unreachable!("set_base on an absolute IRI"),
            })?;
        Ok(self)
    }

    #[inline]
    pub fn with_prefix(
        mut self,
        prefix_name: impl Into<String>,
        prefix_iri: impl Into<String>,
    ) -> Result<Self, EnvironmentError> {
        self.env.set_prefix(prefix_name.into(), &prefix_iri.into())?;
        Ok(self)
    }

    /// Parses a TriG file from a [`Read`] implementation.
    pub fn for_reader<R: Read>(self, reader: R) -> ReaderTriGParser<R> {
        ReaderTriGParser {
            inner: self.low_level().parser.for_reader(reader),
        }
    }

    /// Parses a TriG file from a byte slice.
    pub fn for_slice(self, slice: &(impl AsRef<[u8]> + ?Sized)) -> SliceTriGParser<'_> {
        SliceTriGParser {
            inner: TerseRecognizer::new_parser(
                slice.as_ref(),
                true,
                true,
                self.variables,
                self.keep_relative_iris,
                self.lenient,
                !self.exact_blank_ids,
                self.blank_id_prefix,
                self.global_blank_ids,
                self.env,
            )
            .into_iter(),
        }
    }

    /// Allows to parse a TriG file by using a low-level API.
    pub fn low_level(self) -> LowLevelTriGParser {
        LowLevelTriGParser {
            parser: TerseRecognizer::new_parser(
                Vec::new(),
                false,
                true,
                self.variables,
                self.keep_relative_iris,
                self.lenient,
                !self.exact_blank_ids,
                self.blank_id_prefix,
                self.global_blank_ids,
                self.env,
            ),
        }
    }
}

/// Parses a TriG file from a [`Read`] implementation.
///
/// Can be built using [`TriGParser::for_reader`].
#[must_use]
pub struct ReaderTriGParser<R: Read> {
    inner: ReaderIterator<R, TerseRecognizer>,
}

impl<R: Read> ReaderTriGParser<R> {
    /// The IRI prefixes considered at the current step of the parsing.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.parser.context.env.prefixes()
    }

    /// The base IRI considered at the current step of the parsing.
    pub fn base_iri(&self) -> Option<&str> {
        self.inner.parser.context.env.base()
    }
}

impl<R: Read> Iterator for ReaderTriGParser<R> {
    type Item = Result<ReaderEvent, TurtleParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.inner.next()?.map(|(mut event, position)| {
            event.set_caret(position.start);
            event
        }))
    }
}

/// Parses a TriG file from a byte slice.
///
/// Can be built using [`TriGParser::for_slice`].
#[must_use]
pub struct SliceTriGParser<'a> {
    inner: SliceIterator<'a, TerseRecognizer>,
}

impl SliceTriGParser<'_> {
    /// The IRI prefixes considered at the current step of the parsing.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.parser.context.env.prefixes()
    }

    /// The base IRI considered at the current step of the parsing.
    pub fn base_iri(&self) -> Option<&str> {
        self.inner.parser.context.env.base()
    }
}

impl Iterator for SliceTriGParser<'_> {
    type Item = Result<ReaderEvent, TurtleSyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.inner.next()?.map(|(mut event, position)| {
            event.set_caret(position.start);
            event
        }))
    }
}

/// Parses a TriG file by using a low-level API.
///
/// Can be built using [`TriGParser::low_level`].
pub struct LowLevelTriGParser {
    pub(crate) parser: Parser<Vec<u8>, TerseRecognizer>,
}

impl LowLevelTriGParser {
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

/// Options shared by the Turtle and TriG serializers.
#[derive(Default, Clone)]
pub(crate) struct SerializerOptions {
    /// Escape all non-ASCII characters.
    pub ascii: bool,
    /// Single spaces instead of line jumps and indentation.
    pub terse: bool,
    /// Never write prefixed names.
    pub unqualified: bool,
    /// Always write `<…>` IRIs: no prefixed names, no `a`, no `()`.
    pub expanded: bool,
    /// Write IRIs exactly as given, never relative to the base.
    pub no_base: bool,
    /// Do not write the `@prefix`/`@base` prelude, the consumer is expected
    /// to share the environment.
    pub contextual: bool,
    /// Write `rdf:type` instead of `a`.
    pub always_rdf_type: bool,
}

/// A [TriG](https://www.w3.org/TR/trig/) serializer.
///
/// It implements [`Sink`], reproducing the `[ … ]`, `( … )`, `;` and `,`
/// abbreviations from the statement flags and end-of-anonymous events, and
/// can also be fed plain statements.
///
/// ```
/// use rivrdf::vocab::rdf;
/// use rivrdf::{NamedNodeRef, StatementRef};
/// use rivttl::TriGSerializer;
///
/// let mut serializer = TriGSerializer::new()
///     .with_prefix("schema", "http://schema.org/")?
///     .for_writer(Vec::new());
/// serializer.serialize_statement(StatementRef::new(
///     NamedNodeRef::new("http://example.com#me")?,
///     rdf::TYPE,
///     NamedNodeRef::new("http://schema.org/Person")?,
///     NamedNodeRef::new("http://example.com")?,
/// ))?;
/// assert_eq!(
///     b"@prefix schema: <http://schema.org/> .\n<http://example.com> {\n\t<http://example.com#me> a schema:Person .\n}\n".as_slice(),
///     serializer.finish()?.as_slice()
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default, Clone)]
#[must_use]
pub struct TriGSerializer {
    options: SerializerOptions,
    env: Environment,
}

impl TriGSerializer {
    /// Builds a new [`TriGSerializer`].
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
        self.env.set_prefix(prefix_name.into(), &prefix_iri.into())?;
        Ok(self)
    }

    /// Adds a base IRI: IRIs under it are written as relative references.
    #[inline]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Result<Self, EnvironmentError> {
        self.env.set_base(&base_iri.into())?;
        Ok(self)
    }

    /// Escapes all non-ASCII characters with `\u`/`\U` or percent escapes.
    #[inline]
    pub fn ascii(mut self) -> Self {
        self.options.ascii = true;
        self
    }

    /// Writes single spaces instead of line jumps and indentation.
    #[inline]
    pub fn terse(mut self) -> Self {
        self.options.terse = true;
        self
    }

    /// Never writes prefixed names, even when a prefix matches.
    #[inline]
    pub fn unqualified(mut self) -> Self {
        self.options.unqualified = true;
        self
    }

    /// Always writes full `<…>` IRIs: no prefixed names and no `a`/`()` sugar.
    #[inline]
    pub fn expanded(mut self) -> Self {
        self.options.expanded = true;
        self.options.unqualified = true;
        self
    }

    /// Writes IRIs exactly as given, never relative to the base IRI.
    #[inline]
    pub fn no_base(mut self) -> Self {
        self.options.no_base = true;
        self
    }

    /// Suppresses the `@prefix`/`@base` prelude.
    ///
    /// Useful when the consumer shares the environment out of band.
    #[inline]
    pub fn contextual(mut self) -> Self {
        self.options.contextual = true;
        self
    }

    /// Writes `rdf:type` (or its prefixed form) instead of `a`.
    #[inline]
    pub fn always_rdf_type(mut self) -> Self {
        self.options.always_rdf_type = true;
        self
    }

    /// Writes a TriG file to a [`Write`] implementation.
    pub fn for_writer<W: Write>(self, writer: W) -> WriterTriGSerializer<W> {
        WriterTriGSerializer {
            writer,
            low_level: self.low_level(),
        }
    }

    /// Builds a low-level TriG serializer, the caller passes the output on each call.
    pub fn low_level(self) -> LowLevelTriGSerializer {
        LowLevelTriGSerializer::new(self.options, self.env, true)
    }

    /// The Turtle flavor of the state machine: named graphs are rejected.
    pub(crate) fn low_level_without_graphs(self) -> LowLevelTriGSerializer {
        LowLevelTriGSerializer::new(self.options, self.env, false)
    }
}

/// Writes a TriG file to a [`Write`] implementation.
///
/// Can be built using [`TriGSerializer::for_writer`].
#[must_use]
pub struct WriterTriGSerializer<W: Write> {
    writer: W,
    low_level: LowLevelTriGSerializer,
}

impl<W: Write> WriterTriGSerializer<W> {
    /// Writes an extra statement.
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
    /// Closes any open anonymous node, list, subject and graph.
    pub fn finish(mut self) -> io::Result<W> {
        self.low_level.finish(&mut self.writer)?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> Sink for WriterTriGSerializer<W> {
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
        self.low_level.serialize_end_anonymous(node, &mut self.writer)
    }
}

/// An open `[ … ]` or `( … )` scope of the serializer.
struct Scope {
    kind: ScopeKind,
    /// The node the next inner statement is expected to be about. Advances
    /// along the `rdf:rest` chain for lists.
    node: BlankNode,
    /// The node that opened the scope.
    root: BlankNode,
    /// Context to reinstall when the scope closes.
    saved_subject: Option<Subject>,
    saved_predicate: Option<Predicate>,
    /// The scope was opened in subject position.
    subject_position: bool,
    /// Something was written inside the scope.
    wrote_inner: bool,
}

#[derive(Eq, PartialEq, Clone, Copy)]
enum ScopeKind {
    Anonymous,
    List,
}

/// Writes a TriG file by using a low-level API.
///
/// Can be built using [`TriGSerializer::low_level`].
pub struct LowLevelTriGSerializer {
    options: SerializerOptions,
    env: Environment,
    with_graphs: bool,
    prelude_written: bool,
    graph: GraphName,
    subject: Option<Subject>,
    predicate: Option<Predicate>,
    nesting: Vec<Scope>,
}

impl LowLevelTriGSerializer {
    pub(crate) fn new(options: SerializerOptions, env: Environment, with_graphs: bool) -> Self {
        Self {
            options,
            env,
            with_graphs,
            prelude_written: false,
            graph: GraphName::DefaultGraph,
            subject: None,
            predicate: None,
            nesting: Vec::new(),
        }
    }

    /// Writes an extra statement.
    pub fn serialize_statement(
        &mut self,
        s: StatementRef<'_>,
        flags: StatementFlags,
        mut write: impl Write,
    ) -> io::Result<()> {
        self.write_prelude(&mut write)?;
        let in_list = self
            .nesting
            .last()
            .is_some_and(|scope| {
                scope.kind == ScopeKind::List && SubjectRef::from(&scope.node) == s.subject
            });
        if in_list {
            return self.serialize_list_statement(s, flags, write);
        }
        if s.graph_name != self.graph.as_ref() {
            if !self.with_graphs && !s.graph_name.is_default_graph() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "Turtle does not support named graphs, use the TriG serializer",
                ));
            }
            self.close_subject(&mut write)?;
            self.close_graph(&mut write)?;
            self.graph = s.graph_name.into_owned();
            if let GraphName::DefaultGraph = self.graph {
            } else {
                self.write_term(&mut write, TermRef::from(GraphNameTerm(s.graph_name)))?;
                if self.options.terse {
                    write.write_all(b" { ")?;
                } else {
                    write.write_all(b" {\n")?;
                    self.write_indent(&mut write)?;
                }
            }
            return self.write_full_statement(s, flags, write);
        }
        if self.subject.as_ref().is_some_and(|current| current.as_ref() == s.subject) {
            if self
                .predicate
                .as_ref()
                .is_some_and(|current| current.as_ref() == s.predicate)
            {
                // Same subject and predicate, an object list
                self.mark_inner_write();
                write.write_all(b" , ")?;
                self.write_object(s, flags, write)
            } else if self.predicate.is_some() {
                // Same subject, new predicate
                self.predicate = Some(s.predicate.into_owned());
                self.mark_inner_write();
                if self.options.terse {
                    write.write_all(b" ; ")?;
                } else {
                    write.write_all(b" ;\n")?;
                    self.write_indent(&mut write)?;
                    if self.nesting.is_empty() {
                        write.write_all(b"\t")?;
                    }
                }
                self.write_predicate(&mut write, s.predicate)?;
                write.write_all(b" ")?;
                self.write_object(s, flags, write)
            } else {
                // The subject is already written: an anonymous node being
                // filled in, or a `[ … ]`/`( … )` subject that just closed
                self.predicate = Some(s.predicate.into_owned());
                let open_anonymous = self.nesting.last().is_some_and(|scope| {
                    scope.kind == ScopeKind::Anonymous && !scope.wrote_inner
                });
                self.mark_inner_write();
                if open_anonymous && !self.options.terse {
                    write.write_all(b"\n")?;
                    self.write_indent(&mut write)?;
                } else {
                    write.write_all(b" ")?;
                }
                self.write_predicate(&mut write, s.predicate)?;
                write.write_all(b" ")?;
                self.write_object(s, flags, write)
            }
        } else {
            self.close_subject(&mut write)?;
            if !self.graph.is_default_graph() || !self.nesting.is_empty() {
                self.write_indent(&mut write)?;
            }
            self.write_full_statement(s, flags, write)
        }
    }

    /// Writes `subject predicate object` for a fresh subject.
    fn write_full_statement(
        &mut self,
        s: StatementRef<'_>,
        flags: StatementFlags,
        mut write: impl Write,
    ) -> io::Result<()> {
        if flags.contains(StatementFlags::ANON_SUBJECT) {
            let SubjectRef::BlankNode(node) = s.subject else {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "The ANON_SUBJECT flag requires a blank node subject",
                ));
            };
            write.write_all(b"[")?;
            self.push_scope(Scope {
                kind: ScopeKind::Anonymous,
                node: node.into_owned(),
                root: node.into_owned(),
                saved_subject: None,
                saved_predicate: None,
                subject_position: true,
                wrote_inner: false,
            })?;
            self.subject = Some(s.subject.into_owned());
            self.predicate = Some(s.predicate.into_owned());
            if self.options.terse || flags.contains(StatementFlags::TERSE_SUBJECT) {
                write.write_all(b" ")?;
            } else {
                write.write_all(b"\n")?;
                self.write_indent(&mut write)?;
            }
            self.mark_inner_write();
            self.write_predicate(&mut write, s.predicate)?;
            write.write_all(b" ")?;
            return self.write_object(s, flags, write);
        }
        if flags.contains(StatementFlags::LIST_SUBJECT) {
            let SubjectRef::BlankNode(node) = s.subject else {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "The LIST_SUBJECT flag requires a blank node subject",
                ));
            };
            write.write_all(b"(")?;
            self.push_scope(Scope {
                kind: ScopeKind::List,
                node: node.into_owned(),
                root: node.into_owned(),
                saved_subject: None,
                saved_predicate: None,
                subject_position: true,
                wrote_inner: false,
            })?;
            self.subject = None;
            self.predicate = None;
            // This statement is the `rdf:first` of the list head
            return self.serialize_list_statement(s, flags, write);
        }
        self.subject = Some(s.subject.into_owned());
        self.predicate = Some(s.predicate.into_owned());
        if flags.contains(StatementFlags::EMPTY_SUBJECT) {
            write.write_all(b"[]")?;
        } else {
            self.write_term(&mut write, s.subject.into())?;
        }
        write.write_all(b" ")?;
        self.write_predicate(&mut write, s.predicate)?;
        write.write_all(b" ")?;
        self.write_object(s, flags, write)
    }

    /// Handles a statement whose subject is the open list scope: `rdf:first`
    /// writes the item, `rdf:rest` advances or closes the list.
    fn serialize_list_statement(
        &mut self,
        s: StatementRef<'_>,
        flags: StatementFlags,
        mut write: impl Write,
    ) -> io::Result<()> {
        if s.predicate == rdf::FIRST {
            write.write_all(b" ")?;
            self.mark_inner_write();
            self.write_object(s, flags, write)
        } else if s.predicate == rdf::REST {
            if s.object == TermRef::NamedNode(rdf::NIL) {
                write.write_all(b" )")?;
                self.pop_scope()
            } else if let TermRef::BlankNode(next) = s.object {
                let scope = self.nesting.last_mut().expect("list scope is open");
                scope.node = next.into_owned();
                Ok(())
            } else {
                Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "The rdf:rest of a list must be a blank node or rdf:nil",
                ))
            }
        } else {
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Only rdf:first and rdf:rest statements are allowed inside of a list",
            ))
        }
    }

    /// Writes the object, opening a `[` or `(` scope if the flags call for it.
    fn write_object(
        &mut self,
        s: StatementRef<'_>,
        flags: StatementFlags,
        mut write: impl Write,
    ) -> io::Result<()> {
        if flags.contains(StatementFlags::ANON_OBJECT) {
            let TermRef::BlankNode(node) = s.object else {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "The ANON_OBJECT flag requires a blank node object",
                ));
            };
            write.write_all(b"[")?;
            let saved_subject = self.subject.take();
            let saved_predicate = self.predicate.take();
            self.push_scope(Scope {
                kind: ScopeKind::Anonymous,
                node: node.into_owned(),
                root: node.into_owned(),
                saved_subject,
                saved_predicate,
                subject_position: false,
                wrote_inner: false,
            })?;
            self.subject = Some(node.into_owned().into());
            self.predicate = None;
            return Ok(());
        }
        if flags.contains(StatementFlags::LIST_OBJECT) {
            let TermRef::BlankNode(node) = s.object else {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "The LIST_OBJECT flag requires a blank node object",
                ));
            };
            write.write_all(b"(")?;
            let saved_subject = self.subject.take();
            let saved_predicate = self.predicate.take();
            return self.push_scope(Scope {
                kind: ScopeKind::List,
                node: node.into_owned(),
                root: node.into_owned(),
                saved_subject,
                saved_predicate,
                subject_position: false,
                wrote_inner: false,
            });
        }
        self.write_term(&mut write, s.object)
    }

    /// Writes a base directive, closing the current subject and graph first.
    pub fn serialize_base(&mut self, iri: NamedNodeRef<'_>, mut write: impl Write) -> io::Result<()> {
        if !self.nesting.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "A base cannot be declared inside of an anonymous node or a list",
            ));
        }
        self.env.set_base(iri.as_str()).map_err(invalid_input)?;
        if self.prelude_written && !self.options.contextual {
            self.close_subject(&mut write)?;
            self.close_graph(&mut write)?;
            write.write_all(b"@base <")?;
            self.write_iri_body(&mut write, iri.as_str())?;
            write.write_all(b"> .")?;
            self.write_top_level_jump(&mut write)?;
        }
        Ok(())
    }

    /// Writes a prefix declaration, closing the current subject and graph first.
    pub fn serialize_prefix(
        &mut self,
        name: &str,
        iri: NamedNodeRef<'_>,
        mut write: impl Write,
    ) -> io::Result<()> {
        if !self.nesting.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "A prefix cannot be declared inside of an anonymous node or a list",
            ));
        }
        self.env.set_prefix(name, iri.as_str()).map_err(invalid_input)?;
        if self.prelude_written && !self.options.contextual {
            self.close_subject(&mut write)?;
            self.close_graph(&mut write)?;
            write!(write, "@prefix {name}: <")?;
            self.write_iri_body(&mut write, iri.as_str())?;
            write.write_all(b"> .")?;
            self.write_top_level_jump(&mut write)?;
        }
        Ok(())
    }

    /// Closes the anonymous node opened by a previous `ANON_*` statement.
    pub fn serialize_end_anonymous(
        &mut self,
        node: BlankNodeRef<'_>,
        mut write: impl Write,
    ) -> io::Result<()> {
        let Some(scope) = self.nesting.last() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "No anonymous node is open",
            ));
        };
        if scope.kind != ScopeKind::Anonymous || scope.root.as_ref() != node {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("The anonymous node _:{} is not the open one", node.as_str()),
            ));
        }
        if !scope.wrote_inner {
            write.write_all(b"]")?;
        } else if self.options.terse {
            write.write_all(b" ]")?;
        } else {
            write.write_all(b"\n")?;
            self.write_close_indent(&mut write)?;
            write.write_all(b"]")?;
        }
        self.pop_scope()
    }

    /// Finishes to write the file: closes any open scope, subject and graph.
    ///
    /// Calling it again is a no-op.
    pub fn finish(&mut self, mut write: impl Write) -> io::Result<()> {
        while let Some(scope) = self.nesting.last() {
            match scope.kind {
                ScopeKind::Anonymous => write.write_all(b" ]")?,
                ScopeKind::List => write.write_all(b" )")?,
            }
            self.pop_scope()?;
        }
        self.close_subject(&mut write)?;
        self.close_graph(&mut write)
    }

    fn push_scope(&mut self, scope: Scope) -> io::Result<()> {
        if self.nesting.len() >= MAX_NESTING_DEPTH {
            return Err(io::Error::new(
                io::ErrorKind::OutOfMemory,
                format!("Reached the maximal nesting depth of {MAX_NESTING_DEPTH}"),
            ));
        }
        self.nesting.push(scope);
        Ok(())
    }

    fn pop_scope(&mut self) -> io::Result<()> {
        let scope = self.nesting.pop().expect("pop_scope on an open scope");
        if scope.subject_position {
            self.subject = Some(scope.root.into());
            self.predicate = None;
        } else {
            self.subject = scope.saved_subject;
            self.predicate = scope.saved_predicate;
        }
        Ok(())
    }

    /// Marks that the top scope got content, for `]` layout.
    fn mark_inner_write(&mut self) {
        if let Some(scope) = self.nesting.last_mut() {
            scope.wrote_inner = true;
        }
    }

    fn write_prelude(&mut self, mut write: impl Write) -> io::Result<()> {
        if self.prelude_written {
            return Ok(());
        }
        self.prelude_written = true;
        if self.options.contextual {
            return Ok(());
        }
        if let Some(base) = self.env.base() {
            let base = base.to_owned();
            write.write_all(b"@base <")?;
            self.write_iri_body(&mut write, &base)?;
            write.write_all(b"> .")?;
            self.write_top_level_jump(&mut write)?;
        }
        let prefixes: Vec<(String, String)> = self
            .env
            .prefixes()
            .map(|(name, iri)| (name.to_owned(), iri.to_owned()))
            .collect();
        for (name, iri) in prefixes {
            write!(write, "@prefix {name}: <")?;
            self.write_iri_body(&mut write, &iri)?;
            write.write_all(b"> .")?;
            self.write_top_level_jump(&mut write)?;
        }
        Ok(())
    }

    fn write_top_level_jump(&self, mut write: impl Write) -> io::Result<()> {
        if self.options.terse {
            write.write_all(b" ")
        } else {
            write.write_all(b"\n")
        }
    }

    fn close_subject(&mut self, mut write: impl Write) -> io::Result<()> {
        if self.subject.take().is_some() {
            self.predicate = None;
            write.write_all(b" .")?;
            self.write_top_level_jump(&mut write)?;
        }
        self.predicate = None;
        Ok(())
    }

    fn close_graph(&mut self, mut write: impl Write) -> io::Result<()> {
        if !self.graph.is_default_graph() {
            self.graph = GraphName::DefaultGraph;
            write.write_all(b"}")?;
            self.write_top_level_jump(&mut write)?;
        }
        Ok(())
    }

    /// One tab per open graph and scope.
    fn write_indent(&self, mut write: impl Write) -> io::Result<()> {
        if self.options.terse {
            return Ok(());
        }
        let depth = usize::from(!self.graph.is_default_graph()) + self.nesting.len();
        for _ in 0..depth {
            write.write_all(b"\t")?;
        }
        Ok(())
    }

    /// The indentation of a closing `]`, one level less than the content.
    fn write_close_indent(&self, mut write: impl Write) -> io::Result<()> {
        if self.options.terse {
            return Ok(());
        }
        let depth = usize::from(!self.graph.is_default_graph()) + self.nesting.len();
        for _ in 0..depth.saturating_sub(1) {
            write.write_all(b"\t")?;
        }
        Ok(())
    }

    fn write_predicate(&self, mut write: impl Write, predicate: PredicateRef<'_>) -> io::Result<()> {
        match predicate {
            PredicateRef::NamedNode(node) => {
                if node == rdf::TYPE && !self.options.always_rdf_type && !self.options.expanded {
                    write.write_all(b"a")
                } else {
                    self.write_named(&mut write, node)
                }
            }
            PredicateRef::Variable(variable) => write!(write, "?{}", variable.as_str()),
        }
    }

    fn write_term(&self, mut write: impl Write, term: TermRef<'_>) -> io::Result<()> {
        match term {
            TermRef::NamedNode(node) => {
                if node == rdf::NIL && !self.options.expanded {
                    write.write_all(b"()")
                } else {
                    self.write_named(&mut write, node)
                }
            }
            TermRef::BlankNode(node) => write!(write, "_:{}", node.as_str()),
            TermRef::Literal(literal) => self.write_literal(&mut write, literal),
            TermRef::Variable(variable) => write!(write, "?{}", variable.as_str()),
        }
    }

    fn write_named(&self, mut write: impl Write, node: NamedNodeRef<'_>) -> io::Result<()> {
        if !self.options.unqualified {
            if let Some((prefix, suffix)) = self.env.qualify(node.as_str()) {
                if let Some(escaped) = escape_local_name(suffix) {
                    return write!(write, "{prefix}:{escaped}");
                }
            }
        }
        write.write_all(b"<")?;
        let mut iri = node.as_str();
        if !self.options.no_base && !self.options.expanded {
            if let Some(relative) = relative_to_base(iri, self.env.base()) {
                iri = relative;
            }
        }
        self.write_iri_body(&mut write, iri)?;
        write.write_all(b">")
    }

    fn write_iri_body(&self, mut write: impl Write, iri: &str) -> io::Result<()> {
        for c in iri.chars() {
            match c {
                ' ' | '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}' => {
                    let mut buffer = [0; 4];
                    for byte in c.encode_utf8(&mut buffer).bytes() {
                        write!(write, "%{byte:02X}")?;
                    }
                }
                '\0'..='\u{1F}' | '\u{7F}' => {
                    write!(write, "%{:02X}", u32::from(c))?;
                }
                c if c.is_ascii() => write!(write, "{c}")?,
                c if self.options.ascii => write_u_escape(&mut write, c)?,
                c => write!(write, "{c}")?,
            }
        }
        Ok(())
    }

    fn write_literal(&self, mut write: impl Write, literal: LiteralRef<'_>) -> io::Result<()> {
        let value = literal.value();
        let datatype = literal.datatype();
        let inline = if self.options.expanded {
            false
        } else if datatype == xsd::BOOLEAN {
            is_turtle_boolean(value)
        } else if datatype == xsd::INTEGER {
            is_turtle_integer(value)
        } else if datatype == xsd::DECIMAL {
            is_turtle_decimal(value)
        } else if datatype == xsd::DOUBLE {
            is_turtle_double(value)
        } else {
            false
        };
        if inline {
            return write.write_all(value.as_bytes());
        }
        if value.contains(['\n', '\r', '"']) && !self.options.ascii {
            self.write_long_string(&mut write, value)?;
        } else {
            self.write_short_string(&mut write, value)?;
        }
        if let Some(language) = literal.language() {
            write!(write, "@{language}")
        } else if literal.is_plain() {
            Ok(())
        } else {
            write.write_all(b"^^")?;
            self.write_named(&mut write, datatype)
        }
    }

    fn write_short_string(&self, mut write: impl Write, value: &str) -> io::Result<()> {
        write.write_all(b"\"")?;
        for c in value.chars() {
            match c {
                '\u{08}' => write.write_all(b"\\b")?,
                '\t' => write.write_all(b"\\t")?,
                '\n' => write.write_all(b"\\n")?,
                '\u{0C}' => write.write_all(b"\\f")?,
                '\r' => write.write_all(b"\\r")?,
                '"' => write.write_all(b"\\\"")?,
                '\\' => write.write_all(b"\\\\")?,
                '\0'..='\u{1F}' | '\u{7F}' => write_u_escape(&mut write, c)?,
                c if c.is_ascii() || !self.options.ascii => write!(write, "{c}")?,
                c => write_u_escape(&mut write, c)?,
            }
        }
        write.write_all(b"\"")
    }

    /// Triple-quoted form: line jumps and lone quotes stay raw.
    fn write_long_string(&self, mut write: impl Write, value: &str) -> io::Result<()> {
        write.write_all(b"\"\"\"")?;
        let mut quote_run = 0;
        let mut chars = value.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '"' => {
                    quote_run += 1;
                    // A third consecutive quote or a quote against the
                    // closing delimiter must be escaped
                    if quote_run == 3 || chars.peek().is_none() {
                        write.write_all(b"\\\"")?;
                        quote_run = 0;
                    } else {
                        write.write_all(b"\"")?;
                    }
                    continue;
                }
                '\\' => write.write_all(b"\\\\")?,
                c if c.is_ascii() || !self.options.ascii => write!(write, "{c}")?,
                c => write_u_escape(&mut write, c)?,
            }
            quote_run = 0;
        }
        write.write_all(b"\"\"\"")
    }
}

fn invalid_input(e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, e)
}

fn write_u_escape(mut write: impl Write, c: char) -> io::Result<()> {
    let code = u32::from(c);
    if code <= 0xFFFF {
        write!(write, "\\u{code:04X}")
    } else {
        write!(write, "\\U{code:08X}")
    }
}

/// A wrapper so graph names reuse the term writer.
struct GraphNameTerm<'a>(GraphNameRef<'a>);

impl<'a> From<GraphNameTerm<'a>> for TermRef<'a> {
    fn from(graph_name: GraphNameTerm<'a>) -> Self {
        match graph_name.0 {
            GraphNameRef::NamedNode(node) => Self::NamedNode(node),
            GraphNameRef::BlankNode(node) => Self::BlankNode(node),
            GraphNameRef::Variable(variable) => Self::Variable(variable),
            GraphNameRef::DefaultGraph => {
                unreachable!("the default graph is never written as a term")
            }
        }
    }
}

/// The relative form of `iri` if it is under the base IRI.
fn relative_to_base<'a>(iri: &'a str, base: Option<&str>) -> Option<&'a str> {
    let base = base?;
    let rest = iri.strip_prefix(base)?;
    if rest.is_empty()
        || base.ends_with(['/', '#'])
        || rest.starts_with(['/', '#', '?'])
    {
        Some(rest)
    } else {
        None
    }
}

fn is_turtle_boolean(value: &str) -> bool {
    matches!(value, "true" | "false")
}

fn is_turtle_integer(value: &str) -> bool {
    // [19]  INTEGER  ::=  [+-]? [0-9]+
    let mut value = value.as_bytes();
    if let Some(v) = value.strip_prefix(b"+") {
        value = v;
    } else if let Some(v) = value.strip_prefix(b"-") {
        value = v;
    }
    !value.is_empty() && value.iter().all(u8::is_ascii_digit)
}

fn is_turtle_decimal(value: &str) -> bool {
    // [20]  DECIMAL  ::=  [+-]? [0-9]* '.' [0-9]+
    // A trailing dot like "5." has no bare form in Turtle
    let mut value = value.as_bytes();
    if let Some(v) = value.strip_prefix(b"+") {
        value = v;
    } else if let Some(v) = value.strip_prefix(b"-") {
        value = v;
    }
    while value.first().is_some_and(u8::is_ascii_digit) {
        value = &value[1..];
    }
    let Some(value) = value.strip_prefix(b".") else {
        return false;
    };
    !value.is_empty() && value.iter().all(u8::is_ascii_digit)
}

fn is_turtle_double(value: &str) -> bool {
    // [21]    DOUBLE    ::=  [+-]? ([0-9]+ '.' [0-9]* EXPONENT | '.' [0-9]+ EXPONENT | [0-9]+ EXPONENT)
    // [154s]  EXPONENT  ::=  [eE] [+-]? [0-9]+
    let mut value = value.as_bytes();
    if let Some(v) = value.strip_prefix(b"+") {
        value = v;
    } else if let Some(v) = value.strip_prefix(b"-") {
        value = v;
    }
    let mut with_before = false;
    while value.first().is_some_and(u8::is_ascii_digit) {
        value = &value[1..];
        with_before = true;
    }
    let mut with_after = false;
    if let Some(v) = value.strip_prefix(b".") {
        value = v;
        while value.first().is_some_and(u8::is_ascii_digit) {
            value = &value[1..];
            with_after = true;
        }
    }
    if let Some(v) = value.strip_prefix(b"e") {
        value = v;
    } else if let Some(v) = value.strip_prefix(b"E") {
        value = v;
    } else {
        return false;
    }
    if let Some(v) = value.strip_prefix(b"+") {
        value = v;
    } else if let Some(v) = value.strip_prefix(b"-") {
        value = v;
    }
    (with_before || with_after) && !value.is_empty() && value.iter().all(u8::is_ascii_digit)
}

/// The local-name form of a prefixed-name suffix, or `None` when the suffix
/// cannot be written as a local name at all.
pub(crate) fn escape_local_name(value: &str) -> Option<String> {
    // [168s]  PN_LOCAL  ::=  (PN_CHARS_U | ':' | [0-9] | PLX) ((PN_CHARS | '.' | ':' | PLX)* (PN_CHARS | ':' | PLX))?
    if value.is_empty() {
        return None;
    }
    let mut output = String::with_capacity(value.len());
    let mut chars = value.chars();
    let first = chars.next()?;
    if is_possible_pn_chars_u(first) || first == ':' || first.is_ascii_digit() {
        output.push(first);
    } else if can_be_escaped_in_local_name(first) {
        output.push('\\');
        output.push(first);
    } else {
        return None;
    }

    while let Some(c) = chars.next() {
        if is_possible_pn_chars(c) || c == ':' || (c == '.' && !chars.as_str().is_empty()) {
            output.push(c);
        } else if can_be_escaped_in_local_name(c) {
            output.push('\\');
            output.push(c);
        } else {
            return None;
        }
    }

    Some(output)
}

// [157s]  PN_CHARS_BASE
fn is_possible_pn_chars_base(c: char) -> bool {
    matches!(c,
    'A'..='Z'
    | 'a'..='z'
    | '\u{00C0}'..='\u{00D6}'
    | '\u{00D8}'..='\u{00F6}'
    | '\u{00F8}'..='\u{02FF}'
    | '\u{0370}'..='\u{037D}'
    | '\u{037F}'..='\u{1FFF}'
    | '\u{200C}'..='\u{200D}'
    | '\u{2070}'..='\u{218F}'
    | '\u{2C00}'..='\u{2FEF}'
    | '\u{3001}'..='\u{D7FF}'
    | '\u{F900}'..='\u{FDCF}'
    | '\u{FDF0}'..='\u{FFFD}'
    | '\u{10000}'..='\u{EFFFF}')
}

fn is_possible_pn_chars_u(c: char) -> bool {
    is_possible_pn_chars_base(c) || c == '_'
}

fn is_possible_pn_chars(c: char) -> bool {
    is_possible_pn_chars_u(c)
        || matches!(c,
    '-' | '0'..='9' | '\u{00B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

fn can_be_escaped_in_local_name(c: char) -> bool {
    matches!(
        c,
        '_' | '~'
            | '.'
            | '-'
            | '!'
            | '$'
            | '&'
            | '\''
            | '('
            | ')'
            | '*'
            | '+'
            | ','
            | ';'
            | '='
            | '/'
            | '?'
            | '#'
            | '@'
            | '%'
    )
}

#[cfg(test)]
#[allow(clippy::panic_in_result_fn)]
mod tests {
    use super::*;
    use rivrdf::{Literal, NamedNode, Statement};

    #[test]
    fn test_write() -> io::Result<()> {
        let mut serializer = TriGSerializer::new()
            .with_prefix("ex", "http://example.com/")
            .unwrap()
            .for_writer(Vec::new());
        serializer.serialize_statement(StatementRef::new(
            NamedNodeRef::new_unchecked("http://example.com/s"),
            NamedNodeRef::new_unchecked("http://example.com/p"),
            NamedNodeRef::new_unchecked("http://example.com/o."),
            NamedNodeRef::new_unchecked("http://example.com/g"),
        ))?;
        serializer.serialize_statement(StatementRef::new(
            NamedNodeRef::new_unchecked("http://example.com/s"),
            NamedNodeRef::new_unchecked("http://example.com/p"),
            NamedNodeRef::new_unchecked("http://example.com/o{o}"),
            NamedNodeRef::new_unchecked("http://example.com/g"),
        ))?;
        serializer.serialize_statement(StatementRef::new(
            NamedNodeRef::new_unchecked("http://example.com/s"),
            NamedNodeRef::new_unchecked("http://example.com/p2"),
            LiteralRef::new_language_tagged_literal_unchecked("foo", "en"),
            NamedNodeRef::new_unchecked("http://example.com/g"),
        ))?;
        serializer.serialize_statement(StatementRef::new(
            BlankNodeRef::new_unchecked("b"),
            NamedNodeRef::new_unchecked("http://example.com/p2"),
            LiteralRef::new_typed_literal("true", xsd::BOOLEAN),
            GraphNameRef::DefaultGraph,
        ))?;
        serializer.serialize_statement(StatementRef::new(
            BlankNodeRef::new_unchecked("b"),
            NamedNodeRef::new_unchecked("http://example.org/p2"),
            LiteralRef::new_typed_literal("false", xsd::BOOLEAN),
            NamedNodeRef::new_unchecked("http://example.com/g2"),
        ))?;
        assert_eq!(
            String::from_utf8(serializer.finish()?).unwrap(),
            "@prefix ex: <http://example.com/> .\nex:g {\n\tex:s ex:p ex:o\\. , <http://example.com/o%7Bo%7D> ;\n\t\tex:p2 \"foo\"@en .\n}\n_:b ex:p2 true .\nex:g2 {\n\t_:b <http://example.org/p2> false .\n}\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_anonymous_and_list() -> io::Result<()> {
        let mut serializer = TriGSerializer::new().for_writer(Vec::new());
        let s = NamedNode::new_unchecked("http://example.com/s");
        let p = NamedNode::new_unchecked("http://example.com/p");
        let b = BlankNode::new_unchecked("b1");
        serializer.statement(
            StatementRef::triple(&s, &p, &b),
            StatementFlags::ANON_OBJECT,
        )?;
        serializer.statement(
            StatementRef::triple(&b, NamedNodeRef::new_unchecked("http://example.com/q"), LiteralRef::new_simple_literal("x")),
            StatementFlags::NONE,
        )?;
        serializer.end_anonymous(b.as_ref())?;
        assert_eq!(
            String::from_utf8(serializer.finish()?).unwrap(),
            "<http://example.com/s> <http://example.com/p> [\n\t<http://example.com/q> \"x\"\n] .\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_list() -> io::Result<()> {
        let mut serializer = TriGSerializer::new().for_writer(Vec::new());
        let s = NamedNode::new_unchecked("http://example.com/s");
        let p = NamedNode::new_unchecked("http://example.com/p");
        let l1 = BlankNode::new_unchecked("l1");
        let l2 = BlankNode::new_unchecked("l2");
        serializer.statement(
            StatementRef::triple(&s, &p, &l1),
            StatementFlags::LIST_OBJECT,
        )?;
        for statement in [
            Statement::triple(l1.clone(), rdf::FIRST, Literal::from(1_i64)),
            Statement::triple(l1.clone(), rdf::REST, l2.clone()),
            Statement::triple(l2.clone(), rdf::FIRST, Literal::from(2_i64)),
            Statement::triple(l2.clone(), rdf::REST, rdf::NIL),
        ] {
            serializer.statement(statement.as_ref(), StatementFlags::NONE)?;
        }
        assert_eq!(
            String::from_utf8(serializer.finish()?).unwrap(),
            "<http://example.com/s> <http://example.com/p> ( 1 2 ) .\n"
        );
        Ok(())
    }

    #[test]
    fn test_finish_is_idempotent() -> io::Result<()> {
        let mut buffer = Vec::new();
        let mut serializer = TriGSerializer::new().low_level();
        serializer.serialize_statement(
            StatementRef::triple(
                NamedNodeRef::new_unchecked("http://example.com/s"),
                NamedNodeRef::new_unchecked("http://example.com/p"),
                NamedNodeRef::new_unchecked("http://example.com/o"),
            ),
            StatementFlags::NONE,
            &mut buffer,
        )?;
        serializer.finish(&mut buffer)?;
        let len = buffer.len();
        serializer.finish(&mut buffer)?;
        assert_eq!(buffer.len(), len);
        assert_eq!(
            buffer,
            b"<http://example.com/s> <http://example.com/p> <http://example.com/o> .\n"
        );
        Ok(())
    }
}
