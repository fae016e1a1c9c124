//! The events flowing between readers and writers.
//!
//! Readers tokenise one of the four syntaxes into a stream of
//! [`ReaderEvent`]s; anything consuming that stream (a serializer, a filter,
//! a user callback) implements [`Sink`]. Statements carry [`StatementFlags`]
//! describing how the source spelled them, so a serializer can reproduce the
//! `[ … ]`, `( … )`, `;` and `,` abbreviations instead of flattening
//! everything to one triple per line.

use crate::toolkit::TextPosition;
use rivrdf::{BlankNode, BlankNodeRef, NamedNode, NamedNodeRef, Statement, StatementRef};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Hints from a reader (or a caller) about how a statement was written.
///
/// The `ANON_*`, `LIST_*` and `EMPTY_*` flags are set by the Turtle/TriG
/// readers; the `TERSE_*` flags are caller hints the serializer honours.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct StatementFlags(u16);

impl StatementFlags {
    pub const NONE: Self = Self(0);
    /// The subject is the empty anonymous node `[]`.
    pub const EMPTY_SUBJECT: Self = Self(1 << 0);
    /// The subject opens an anonymous node `[ … ]` with properties.
    pub const ANON_SUBJECT: Self = Self(1 << 1);
    /// The object opens an anonymous node `[ … ]`.
    pub const ANON_OBJECT: Self = Self(1 << 2);
    /// The subject opens a collection `( … )`.
    pub const LIST_SUBJECT: Self = Self(1 << 3);
    /// The object opens a collection `( … )`.
    pub const LIST_OBJECT: Self = Self(1 << 4);
    /// Write the anonymous subject without line breaks.
    pub const TERSE_SUBJECT: Self = Self(1 << 5);
    /// Write the anonymous or list object without line breaks.
    pub const TERSE_OBJECT: Self = Self(1 << 6);
    /// The graph of this statement was written as an empty block `{ }`.
    pub const EMPTY_GRAPH: Self = Self(1 << 7);

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for StatementFlags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for StatementFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for StatementFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(StatementFlags, &str); 8] = [
            (StatementFlags::EMPTY_SUBJECT, "EMPTY_SUBJECT"),
            (StatementFlags::ANON_SUBJECT, "ANON_SUBJECT"),
            (StatementFlags::ANON_OBJECT, "ANON_OBJECT"),
            (StatementFlags::LIST_SUBJECT, "LIST_SUBJECT"),
            (StatementFlags::LIST_OBJECT, "LIST_OBJECT"),
            (StatementFlags::TERSE_SUBJECT, "TERSE_SUBJECT"),
            (StatementFlags::TERSE_OBJECT, "TERSE_OBJECT"),
            (StatementFlags::EMPTY_GRAPH, "EMPTY_GRAPH"),
        ];
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// An event produced by one of the readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderEvent {
    /// The base IRI changed (`@base` or `BASE`).
    Base { iri: NamedNode },
    /// A prefix was declared (`@prefix` or `PREFIX`).
    Prefix { name: String, iri: NamedNode },
    /// A statement, with the abbreviation hints of its source form and the
    /// position of the token that completed it.
    Statement {
        statement: Statement,
        flags: StatementFlags,
        caret: Option<TextPosition>,
    },
    /// The anonymous node opened by a previous `ANON_SUBJECT`/`ANON_OBJECT`
    /// statement was closed by `]`.
    EndAnonymous { node: BlankNode },
}

impl ReaderEvent {
    pub(crate) fn statement(statement: Statement, flags: StatementFlags) -> Self {
        Self::Statement {
            statement,
            flags,
            caret: None,
        }
    }

    pub(crate) fn set_caret(&mut self, position: TextPosition) {
        if let Self::Statement { caret, .. } = self {
            *caret = Some(position);
        }
    }

    /// The statement carried by this event, if it is a statement event.
    #[inline]
    pub fn into_statement(self) -> Option<Statement> {
        if let Self::Statement { statement, .. } = self {
            Some(statement)
        } else {
            None
        }
    }

    /// Forwards this event to a [`Sink`].
    pub fn dispatch<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<(), S::Error> {
        match self {
            Self::Base { iri } => sink.base(iri.as_ref()),
            Self::Prefix { name, iri } => sink.prefix(name, iri.as_ref()),
            Self::Statement {
                statement, flags, ..
            } => sink.statement(statement.as_ref(), *flags),
            Self::EndAnonymous { node } => sink.end_anonymous(node.as_ref()),
        }
    }
}

/// A consumer of [`ReaderEvent`]s.
///
/// The nodes handed to the callbacks are borrowed and only valid for the
/// duration of the call; implementations that retain them must copy.
/// `end_anonymous(n)` is only called after a `statement` whose subject or
/// object was `n` with an `ANON_*` flag.
///
/// The serializers implement this trait, so `reader → filter → serializer`
/// pipelines compose without buffering:
/// ```
/// use rivttl::{TurtleParser, TurtleSerializer};
///
/// let mut serializer = TurtleSerializer::new().for_writer(Vec::new());
/// for event in TurtleParser::new().for_slice("<http://a> <http://b> ( 1 2 ) .") {
///     event?.dispatch(&mut serializer)?;
/// }
/// assert_eq!(
///     serializer.finish()?.as_slice(),
///     b"<http://a> <http://b> ( 1 2 ) .\n"
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub trait Sink {
    type Error;

    fn base(&mut self, iri: NamedNodeRef<'_>) -> Result<(), Self::Error> {
        let _ = iri;
        Ok(())
    }

    fn prefix(&mut self, name: &str, iri: NamedNodeRef<'_>) -> Result<(), Self::Error> {
        let _ = (name, iri);
        Ok(())
    }

    fn statement(
        &mut self,
        statement: StatementRef<'_>,
        flags: StatementFlags,
    ) -> Result<(), Self::Error>;

    fn end_anonymous(&mut self, node: BlankNodeRef<'_>) -> Result<(), Self::Error> {
        let _ = node;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_debug_lists_names() {
        assert_eq!(format!("{:?}", StatementFlags::NONE), "NONE");
        assert_eq!(
            format!(
                "{:?}",
                StatementFlags::ANON_OBJECT | StatementFlags::LIST_SUBJECT
            ),
            "ANON_OBJECT | LIST_SUBJECT"
        );
    }

    #[test]
    fn flags_queries() {
        let flags = StatementFlags::ANON_OBJECT | StatementFlags::TERSE_OBJECT;
        assert!(flags.contains(StatementFlags::ANON_OBJECT));
        assert!(!flags.contains(StatementFlags::ANON_SUBJECT));
        assert!(flags.intersects(StatementFlags::ANON_SUBJECT | StatementFlags::TERSE_OBJECT));
    }
}
