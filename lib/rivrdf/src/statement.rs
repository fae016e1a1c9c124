use crate::term::{
    GraphName, GraphNameRef, Predicate, PredicateRef, Subject, SubjectRef, Term, TermRef,
};
use std::fmt;

/// An owned RDF statement: a [triple](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-triple)
/// together with the name of the graph it belongs to
/// ([`GraphName::DefaultGraph`] for the default graph).
///
/// The default string formatter is returning an N-Quads line:
/// ```
/// use rivrdf::{NamedNode, Statement};
///
/// assert_eq!(
///     "<http://example.com/s> <http://example.com/p> <http://example.com/o> <http://example.com/g>",
///     Statement::new(
///         NamedNode::new("http://example.com/s")?,
///         NamedNode::new("http://example.com/p")?,
///         NamedNode::new("http://example.com/o")?,
///         NamedNode::new("http://example.com/g")?,
///     )
///     .to_string()
/// );
/// # Result::<_,rivrdf::IriParseError>::Ok(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Statement {
    /// The [subject](https://www.w3.org/TR/rdf11-concepts/#dfn-subject) of this statement.
    pub subject: Subject,

    /// The [predicate](https://www.w3.org/TR/rdf11-concepts/#dfn-predicate) of this statement.
    pub predicate: Predicate,

    /// The [object](https://www.w3.org/TR/rdf11-concepts/#dfn-object) of this statement.
    pub object: Term,

    /// The name of the RDF [graph](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-graph) in which this statement is.
    pub graph_name: GraphName,
}

impl Statement {
    /// Builds an RDF statement in a named graph.
    #[inline]
    pub fn new(
        subject: impl Into<Subject>,
        predicate: impl Into<Predicate>,
        object: impl Into<Term>,
        graph_name: impl Into<GraphName>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            graph_name: graph_name.into(),
        }
    }

    /// Builds an RDF statement in the default graph.
    #[inline]
    pub fn triple(
        subject: impl Into<Subject>,
        predicate: impl Into<Predicate>,
        object: impl Into<Term>,
    ) -> Self {
        Self::new(subject, predicate, object, GraphName::DefaultGraph)
    }

    #[inline]
    pub fn as_ref(&self) -> StatementRef<'_> {
        StatementRef {
            subject: self.subject.as_ref(),
            predicate: self.predicate.as_ref(),
            object: self.object.as_ref(),
            graph_name: self.graph_name.as_ref(),
        }
    }
}

impl fmt::Display for Statement {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().fmt(f)
    }
}

/// A borrowed RDF statement.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct StatementRef<'a> {
    /// The [subject](https://www.w3.org/TR/rdf11-concepts/#dfn-subject) of this statement.
    pub subject: SubjectRef<'a>,

    /// The [predicate](https://www.w3.org/TR/rdf11-concepts/#dfn-predicate) of this statement.
    pub predicate: PredicateRef<'a>,

    /// The [object](https://www.w3.org/TR/rdf11-concepts/#dfn-object) of this statement.
    pub object: TermRef<'a>,

    /// The name of the RDF [graph](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-graph) in which this statement is.
    pub graph_name: GraphNameRef<'a>,
}

impl<'a> StatementRef<'a> {
    /// Builds an RDF statement in a named graph.
    #[inline]
    pub fn new(
        subject: impl Into<SubjectRef<'a>>,
        predicate: impl Into<PredicateRef<'a>>,
        object: impl Into<TermRef<'a>>,
        graph_name: impl Into<GraphNameRef<'a>>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            graph_name: graph_name.into(),
        }
    }

    /// Builds an RDF statement in the default graph.
    #[inline]
    pub fn triple(
        subject: impl Into<SubjectRef<'a>>,
        predicate: impl Into<PredicateRef<'a>>,
        object: impl Into<TermRef<'a>>,
    ) -> Self {
        Self::new(subject, predicate, object, GraphNameRef::DefaultGraph)
    }

    #[inline]
    pub fn into_owned(self) -> Statement {
        Statement {
            subject: self.subject.into_owned(),
            predicate: self.predicate.into_owned(),
            object: self.object.into_owned(),
            graph_name: self.graph_name.into_owned(),
        }
    }
}

impl fmt::Display for StatementRef<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)?;
        if !self.graph_name.is_default_graph() {
            write!(f, " {}", self.graph_name)?;
        }
        Ok(())
    }
}

impl<'a> From<&'a Statement> for StatementRef<'a> {
    #[inline]
    fn from(statement: &'a Statement) -> Self {
        statement.as_ref()
    }
}

impl From<StatementRef<'_>> for Statement {
    #[inline]
    fn from(statement: StatementRef<'_>) -> Self {
        statement.into_owned()
    }
}

impl PartialEq<Statement> for StatementRef<'_> {
    #[inline]
    fn eq(&self, other: &Statement) -> bool {
        *self == other.as_ref()
    }
}

impl PartialEq<StatementRef<'_>> for Statement {
    #[inline]
    fn eq(&self, other: &StatementRef<'_>) -> bool {
        self.as_ref() == *other
    }
}
