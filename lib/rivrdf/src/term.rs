use crate::blank_node::{BlankNode, BlankNodeRef};
use crate::literal::{Literal, LiteralRef, ordering_key};
use crate::named_node::{NamedNode, NamedNodeRef};
use crate::variable::{Variable, VariableRef};
use std::cmp::Ordering;
use std::fmt;

/// The owned [subject](https://www.w3.org/TR/rdf11-concepts/#dfn-subject) of a statement: a named node, a blank node or a variable.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Subject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Variable(Variable),
}

impl Subject {
    #[inline]
    pub fn is_named_node(&self) -> bool {
        matches!(self, Self::NamedNode(_))
    }

    #[inline]
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }

    #[inline]
    pub fn as_ref(&self) -> SubjectRef<'_> {
        match self {
            Self::NamedNode(node) => SubjectRef::NamedNode(node.as_ref()),
            Self::BlankNode(node) => SubjectRef::BlankNode(node.as_ref()),
            Self::Variable(variable) => SubjectRef::Variable(variable.as_ref()),
        }
    }
}

impl fmt::Display for Subject {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().fmt(f)
    }
}

impl From<NamedNode> for Subject {
    #[inline]
    fn from(node: NamedNode) -> Self {
        Self::NamedNode(node)
    }
}

impl From<BlankNode> for Subject {
    #[inline]
    fn from(node: BlankNode) -> Self {
        Self::BlankNode(node)
    }
}

impl From<Variable> for Subject {
    #[inline]
    fn from(variable: Variable) -> Self {
        Self::Variable(variable)
    }
}

impl From<NamedNodeRef<'_>> for Subject {
    #[inline]
    fn from(node: NamedNodeRef<'_>) -> Self {
        node.into_owned().into()
    }
}

impl From<BlankNodeRef<'_>> for Subject {
    #[inline]
    fn from(node: BlankNodeRef<'_>) -> Self {
        node.into_owned().into()
    }
}

/// The borrowed [subject](https://www.w3.org/TR/rdf11-concepts/#dfn-subject) of a statement.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum SubjectRef<'a> {
    NamedNode(NamedNodeRef<'a>),
    BlankNode(BlankNodeRef<'a>),
    Variable(VariableRef<'a>),
}

impl SubjectRef<'_> {
    #[inline]
    pub fn into_owned(self) -> Subject {
        match self {
            Self::NamedNode(node) => Subject::NamedNode(node.into_owned()),
            Self::BlankNode(node) => Subject::BlankNode(node.into_owned()),
            Self::Variable(variable) => Subject::Variable(variable.into_owned()),
        }
    }
}

impl fmt::Display for SubjectRef<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamedNode(node) => node.fmt(f),
            Self::BlankNode(node) => node.fmt(f),
            Self::Variable(variable) => variable.fmt(f),
        }
    }
}

impl<'a> From<&'a Subject> for SubjectRef<'a> {
    #[inline]
    fn from(subject: &'a Subject) -> Self {
        subject.as_ref()
    }
}

impl From<SubjectRef<'_>> for Subject {
    #[inline]
    fn from(subject: SubjectRef<'_>) -> Self {
        subject.into_owned()
    }
}

impl<'a> From<NamedNodeRef<'a>> for SubjectRef<'a> {
    #[inline]
    fn from(node: NamedNodeRef<'a>) -> Self {
        Self::NamedNode(node)
    }
}

impl<'a> From<&'a NamedNode> for SubjectRef<'a> {
    #[inline]
    fn from(node: &'a NamedNode) -> Self {
        Self::NamedNode(node.as_ref())
    }
}

impl<'a> From<BlankNodeRef<'a>> for SubjectRef<'a> {
    #[inline]
    fn from(node: BlankNodeRef<'a>) -> Self {
        Self::BlankNode(node)
    }
}

impl<'a> From<&'a BlankNode> for SubjectRef<'a> {
    #[inline]
    fn from(node: &'a BlankNode) -> Self {
        Self::BlankNode(node.as_ref())
    }
}

impl<'a> From<VariableRef<'a>> for SubjectRef<'a> {
    #[inline]
    fn from(variable: VariableRef<'a>) -> Self {
        Self::Variable(variable)
    }
}

impl PartialEq<Subject> for SubjectRef<'_> {
    #[inline]
    fn eq(&self, other: &Subject) -> bool {
        *self == other.as_ref()
    }
}

impl PartialEq<SubjectRef<'_>> for Subject {
    #[inline]
    fn eq(&self, other: &SubjectRef<'_>) -> bool {
        self.as_ref() == *other
    }
}

/// The owned [predicate](https://www.w3.org/TR/rdf11-concepts/#dfn-predicate) of a statement: a named node or a variable.
///
/// Blank nodes and literals cannot appear in predicate position, so the type
/// does not admit them.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Predicate {
    NamedNode(NamedNode),
    Variable(Variable),
}

impl Predicate {
    #[inline]
    pub fn as_ref(&self) -> PredicateRef<'_> {
        match self {
            Self::NamedNode(node) => PredicateRef::NamedNode(node.as_ref()),
            Self::Variable(variable) => PredicateRef::Variable(variable.as_ref()),
        }
    }
}

impl fmt::Display for Predicate {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().fmt(f)
    }
}

impl From<NamedNode> for Predicate {
    #[inline]
    fn from(node: NamedNode) -> Self {
        Self::NamedNode(node)
    }
}

impl From<NamedNodeRef<'_>> for Predicate {
    #[inline]
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self::NamedNode(node.into_owned())
    }
}

impl From<Variable> for Predicate {
    #[inline]
    fn from(variable: Variable) -> Self {
        Self::Variable(variable)
    }
}

/// The borrowed [predicate](https://www.w3.org/TR/rdf11-concepts/#dfn-predicate) of a statement.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum PredicateRef<'a> {
    NamedNode(NamedNodeRef<'a>),
    Variable(VariableRef<'a>),
}

impl PredicateRef<'_> {
    #[inline]
    pub fn into_owned(self) -> Predicate {
        match self {
            Self::NamedNode(node) => Predicate::NamedNode(node.into_owned()),
            Self::Variable(variable) => Predicate::Variable(variable.into_owned()),
        }
    }
}

impl fmt::Display for PredicateRef<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamedNode(node) => node.fmt(f),
            Self::Variable(variable) => variable.fmt(f),
        }
    }
}

impl<'a> From<&'a Predicate> for PredicateRef<'a> {
    #[inline]
    fn from(predicate: &'a Predicate) -> Self {
        predicate.as_ref()
    }
}

impl From<PredicateRef<'_>> for Predicate {
    #[inline]
    fn from(predicate: PredicateRef<'_>) -> Self {
        predicate.into_owned()
    }
}

impl<'a> From<NamedNodeRef<'a>> for PredicateRef<'a> {
    #[inline]
    fn from(node: NamedNodeRef<'a>) -> Self {
        Self::NamedNode(node)
    }
}

impl<'a> From<&'a NamedNode> for PredicateRef<'a> {
    #[inline]
    fn from(node: &'a NamedNode) -> Self {
        Self::NamedNode(node.as_ref())
    }
}

impl<'a> From<VariableRef<'a>> for PredicateRef<'a> {
    #[inline]
    fn from(variable: VariableRef<'a>) -> Self {
        Self::Variable(variable)
    }
}

impl PartialEq<Predicate> for PredicateRef<'_> {
    #[inline]
    fn eq(&self, other: &Predicate) -> bool {
        *self == other.as_ref()
    }
}

impl PartialEq<PredicateRef<'_>> for Predicate {
    #[inline]
    fn eq(&self, other: &PredicateRef<'_>) -> bool {
        self.as_ref() == *other
    }
}

impl PartialEq<NamedNodeRef<'_>> for PredicateRef<'_> {
    #[inline]
    fn eq(&self, other: &NamedNodeRef<'_>) -> bool {
        matches!(self, Self::NamedNode(node) if node == other)
    }
}

/// An owned RDF [term](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-term): a named node, a blank node, a literal or a variable.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Term {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
    Variable(Variable),
}

impl Term {
    #[inline]
    pub fn is_named_node(&self) -> bool {
        matches!(self, Self::NamedNode(_))
    }

    #[inline]
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }

    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    #[inline]
    pub fn as_ref(&self) -> TermRef<'_> {
        match self {
            Self::NamedNode(node) => TermRef::NamedNode(node.as_ref()),
            Self::BlankNode(node) => TermRef::BlankNode(node.as_ref()),
            Self::Literal(literal) => TermRef::Literal(literal.as_ref()),
            Self::Variable(variable) => TermRef::Variable(variable.as_ref()),
        }
    }
}

impl fmt::Display for Term {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().fmt(f)
    }
}

impl PartialOrd for Term {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_ref().cmp(&other.as_ref())
    }
}

impl From<NamedNode> for Term {
    #[inline]
    fn from(node: NamedNode) -> Self {
        Self::NamedNode(node)
    }
}

impl From<BlankNode> for Term {
    #[inline]
    fn from(node: BlankNode) -> Self {
        Self::BlankNode(node)
    }
}

impl From<Literal> for Term {
    #[inline]
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<Variable> for Term {
    #[inline]
    fn from(variable: Variable) -> Self {
        Self::Variable(variable)
    }
}

impl From<NamedNodeRef<'_>> for Term {
    #[inline]
    fn from(node: NamedNodeRef<'_>) -> Self {
        node.into_owned().into()
    }
}

impl From<BlankNodeRef<'_>> for Term {
    #[inline]
    fn from(node: BlankNodeRef<'_>) -> Self {
        node.into_owned().into()
    }
}

impl From<LiteralRef<'_>> for Term {
    #[inline]
    fn from(literal: LiteralRef<'_>) -> Self {
        literal.into_owned().into()
    }
}

impl From<Subject> for Term {
    #[inline]
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::NamedNode(node) => node.into(),
            Subject::BlankNode(node) => node.into(),
            Subject::Variable(variable) => variable.into(),
        }
    }
}

impl From<Predicate> for Term {
    #[inline]
    fn from(predicate: Predicate) -> Self {
        match predicate {
            Predicate::NamedNode(node) => node.into(),
            Predicate::Variable(variable) => variable.into(),
        }
    }
}

impl TryFrom<Term> for Subject {
    type Error = TryFromTermError;

    #[inline]
    fn try_from(term: Term) -> Result<Self, Self::Error> {
        match term {
            Term::NamedNode(node) => Ok(Self::NamedNode(node)),
            Term::BlankNode(node) => Ok(Self::BlankNode(node)),
            Term::Variable(variable) => Ok(Self::Variable(variable)),
            Term::Literal(_) => Err(TryFromTermError {
                term,
                target: "Subject",
            }),
        }
    }
}

impl TryFrom<Term> for Predicate {
    type Error = TryFromTermError;

    #[inline]
    fn try_from(term: Term) -> Result<Self, Self::Error> {
        match term {
            Term::NamedNode(node) => Ok(Self::NamedNode(node)),
            Term::Variable(variable) => Ok(Self::Variable(variable)),
            Term::BlankNode(_) | Term::Literal(_) => Err(TryFromTermError {
                term,
                target: "Predicate",
            }),
        }
    }
}

/// A borrowed RDF [term](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-term).
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum TermRef<'a> {
    NamedNode(NamedNodeRef<'a>),
    BlankNode(BlankNodeRef<'a>),
    Literal(LiteralRef<'a>),
    Variable(VariableRef<'a>),
}

impl TermRef<'_> {
    #[inline]
    pub fn into_owned(self) -> Term {
        match self {
            Self::NamedNode(node) => Term::NamedNode(node.into_owned()),
            Self::BlankNode(node) => Term::BlankNode(node.into_owned()),
            Self::Literal(literal) => Term::Literal(literal.into_owned()),
            Self::Variable(variable) => Term::Variable(variable.into_owned()),
        }
    }

    /// The rank of the term kind in the total term order.
    #[inline]
    fn kind_rank(self) -> u8 {
        match self {
            Self::BlankNode(_) => 0,
            Self::NamedNode(_) => 1,
            Self::Literal(_) => 2,
            Self::Variable(_) => 3,
        }
    }
}

impl fmt::Display for TermRef<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamedNode(node) => node.fmt(f),
            Self::BlankNode(node) => node.fmt(f),
            Self::Literal(literal) => literal.fmt(f),
            Self::Variable(variable) => variable.fmt(f),
        }
    }
}

impl PartialOrd for TermRef<'_> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The total term order: blank nodes, then named nodes, then literals
/// (by lexical form, then by datatype or language tag), then variables.
impl Ord for TermRef<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::BlankNode(a), Self::BlankNode(b)) => a.as_str().cmp(b.as_str()),
            (Self::NamedNode(a), Self::NamedNode(b)) => a.as_str().cmp(b.as_str()),
            (Self::Literal(a), Self::Literal(b)) => ordering_key(*a).cmp(&ordering_key(*b)),
            (Self::Variable(a), Self::Variable(b)) => a.as_str().cmp(b.as_str()),
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }
}

impl<'a> From<&'a Term> for TermRef<'a> {
    #[inline]
    fn from(term: &'a Term) -> Self {
        term.as_ref()
    }
}

impl From<TermRef<'_>> for Term {
    #[inline]
    fn from(term: TermRef<'_>) -> Self {
        term.into_owned()
    }
}

impl<'a> From<NamedNodeRef<'a>> for TermRef<'a> {
    #[inline]
    fn from(node: NamedNodeRef<'a>) -> Self {
        Self::NamedNode(node)
    }
}

impl<'a> From<&'a NamedNode> for TermRef<'a> {
    #[inline]
    fn from(node: &'a NamedNode) -> Self {
        Self::NamedNode(node.as_ref())
    }
}

impl<'a> From<BlankNodeRef<'a>> for TermRef<'a> {
    #[inline]
    fn from(node: BlankNodeRef<'a>) -> Self {
        Self::BlankNode(node)
    }
}

impl<'a> From<&'a BlankNode> for TermRef<'a> {
    #[inline]
    fn from(node: &'a BlankNode) -> Self {
        Self::BlankNode(node.as_ref())
    }
}

impl<'a> From<LiteralRef<'a>> for TermRef<'a> {
    #[inline]
    fn from(literal: LiteralRef<'a>) -> Self {
        Self::Literal(literal)
    }
}

impl<'a> From<&'a Literal> for TermRef<'a> {
    #[inline]
    fn from(literal: &'a Literal) -> Self {
        Self::Literal(literal.as_ref())
    }
}

impl<'a> From<VariableRef<'a>> for TermRef<'a> {
    #[inline]
    fn from(variable: VariableRef<'a>) -> Self {
        Self::Variable(variable)
    }
}

impl<'a> From<SubjectRef<'a>> for TermRef<'a> {
    #[inline]
    fn from(subject: SubjectRef<'a>) -> Self {
        match subject {
            SubjectRef::NamedNode(node) => Self::NamedNode(node),
            SubjectRef::BlankNode(node) => Self::BlankNode(node),
            SubjectRef::Variable(variable) => Self::Variable(variable),
        }
    }
}

impl<'a> From<PredicateRef<'a>> for TermRef<'a> {
    #[inline]
    fn from(predicate: PredicateRef<'a>) -> Self {
        match predicate {
            PredicateRef::NamedNode(node) => Self::NamedNode(node),
            PredicateRef::Variable(variable) => Self::Variable(variable),
        }
    }
}

impl PartialEq<Term> for TermRef<'_> {
    #[inline]
    fn eq(&self, other: &Term) -> bool {
        *self == other.as_ref()
    }
}

impl PartialEq<TermRef<'_>> for Term {
    #[inline]
    fn eq(&self, other: &TermRef<'_>) -> bool {
        self.as_ref() == *other
    }
}

/// An owned graph name: a named node, a blank node, a variable or the [default graph](https://www.w3.org/TR/rdf11-concepts/#dfn-default-graph).
#[derive(Eq, PartialEq, Debug, Clone, Hash, Default)]
pub enum GraphName {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Variable(Variable),
    #[default]
    DefaultGraph,
}

impl GraphName {
    #[inline]
    pub fn is_default_graph(&self) -> bool {
        matches!(self, Self::DefaultGraph)
    }

    #[inline]
    pub fn as_ref(&self) -> GraphNameRef<'_> {
        match self {
            Self::NamedNode(node) => GraphNameRef::NamedNode(node.as_ref()),
            Self::BlankNode(node) => GraphNameRef::BlankNode(node.as_ref()),
            Self::Variable(variable) => GraphNameRef::Variable(variable.as_ref()),
            Self::DefaultGraph => GraphNameRef::DefaultGraph,
        }
    }
}

impl fmt::Display for GraphName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().fmt(f)
    }
}

impl From<NamedNode> for GraphName {
    #[inline]
    fn from(node: NamedNode) -> Self {
        Self::NamedNode(node)
    }
}

impl From<BlankNode> for GraphName {
    #[inline]
    fn from(node: BlankNode) -> Self {
        Self::BlankNode(node)
    }
}

impl From<Variable> for GraphName {
    #[inline]
    fn from(variable: Variable) -> Self {
        Self::Variable(variable)
    }
}

impl From<NamedNodeRef<'_>> for GraphName {
    #[inline]
    fn from(node: NamedNodeRef<'_>) -> Self {
        node.into_owned().into()
    }
}

impl From<BlankNodeRef<'_>> for GraphName {
    #[inline]
    fn from(node: BlankNodeRef<'_>) -> Self {
        node.into_owned().into()
    }
}

impl From<Subject> for GraphName {
    #[inline]
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::NamedNode(node) => node.into(),
            Subject::BlankNode(node) => node.into(),
            Subject::Variable(variable) => variable.into(),
        }
    }
}

/// A borrowed graph name.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Default)]
pub enum GraphNameRef<'a> {
    NamedNode(NamedNodeRef<'a>),
    BlankNode(BlankNodeRef<'a>),
    Variable(VariableRef<'a>),
    #[default]
    DefaultGraph,
}

impl GraphNameRef<'_> {
    #[inline]
    pub fn is_default_graph(self) -> bool {
        matches!(self, Self::DefaultGraph)
    }

    #[inline]
    pub fn into_owned(self) -> GraphName {
        match self {
            Self::NamedNode(node) => GraphName::NamedNode(node.into_owned()),
            Self::BlankNode(node) => GraphName::BlankNode(node.into_owned()),
            Self::Variable(variable) => GraphName::Variable(variable.into_owned()),
            Self::DefaultGraph => GraphName::DefaultGraph,
        }
    }
}

impl fmt::Display for GraphNameRef<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamedNode(node) => node.fmt(f),
            Self::BlankNode(node) => node.fmt(f),
            Self::Variable(variable) => variable.fmt(f),
            Self::DefaultGraph => f.write_str("DEFAULT"),
        }
    }
}

impl<'a> From<&'a GraphName> for GraphNameRef<'a> {
    #[inline]
    fn from(graph_name: &'a GraphName) -> Self {
        graph_name.as_ref()
    }
}

impl From<GraphNameRef<'_>> for GraphName {
    #[inline]
    fn from(graph_name: GraphNameRef<'_>) -> Self {
        graph_name.into_owned()
    }
}

impl<'a> From<NamedNodeRef<'a>> for GraphNameRef<'a> {
    #[inline]
    fn from(node: NamedNodeRef<'a>) -> Self {
        Self::NamedNode(node)
    }
}

impl<'a> From<&'a NamedNode> for GraphNameRef<'a> {
    #[inline]
    fn from(node: &'a NamedNode) -> Self {
        Self::NamedNode(node.as_ref())
    }
}

impl<'a> From<BlankNodeRef<'a>> for GraphNameRef<'a> {
    #[inline]
    fn from(node: BlankNodeRef<'a>) -> Self {
        Self::BlankNode(node)
    }
}

impl<'a> From<&'a BlankNode> for GraphNameRef<'a> {
    #[inline]
    fn from(node: &'a BlankNode) -> Self {
        Self::BlankNode(node.as_ref())
    }
}

impl<'a> From<SubjectRef<'a>> for GraphNameRef<'a> {
    #[inline]
    fn from(subject: SubjectRef<'a>) -> Self {
        match subject {
            SubjectRef::NamedNode(node) => Self::NamedNode(node),
            SubjectRef::BlankNode(node) => Self::BlankNode(node),
            SubjectRef::Variable(variable) => Self::Variable(variable),
        }
    }
}

impl PartialEq<GraphName> for GraphNameRef<'_> {
    #[inline]
    fn eq(&self, other: &GraphName) -> bool {
        *self == other.as_ref()
    }
}

impl PartialEq<GraphNameRef<'_>> for GraphName {
    #[inline]
    fn eq(&self, other: &GraphNameRef<'_>) -> bool {
        self.as_ref() == *other
    }
}

/// An error raised when converting a [`Term`] to a more restricted position type.
#[derive(Debug, thiserror::Error)]
#[error("{term} is not a valid {target}")]
pub struct TryFromTermError {
    term: Term,
    target: &'static str,
}

impl TryFromTermError {
    /// The term that could not be converted.
    #[inline]
    pub fn into_term(self) -> Term {
        self.term
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::xsd;

    #[test]
    fn term_order_agrees_with_equality() {
        let terms: Vec<Term> = vec![
            BlankNode::new_unchecked("a").into(),
            NamedNode::new_unchecked("http://example.com/a").into(),
            Literal::new_simple_literal("a").into(),
            Literal::new_typed_literal("a", xsd::INTEGER).into(),
            Literal::new_language_tagged_literal_unchecked("a", "en").into(),
            Variable::new_unchecked("a").into(),
        ];
        for a in &terms {
            for b in &terms {
                assert_eq!(a == b, a.cmp(b) == Ordering::Equal, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn term_order_is_by_kind_first() {
        let blank: Term = BlankNode::new_unchecked("z").into();
        let named: Term = NamedNode::new_unchecked("http://a").into();
        let literal: Term = Literal::new_simple_literal("a").into();
        let variable: Term = Variable::new_unchecked("a").into();
        assert!(blank < named);
        assert!(named < literal);
        assert!(literal < variable);
    }

    #[test]
    fn literal_not_a_predicate() {
        let term: Term = Literal::new_simple_literal("a").into();
        Predicate::try_from(term).unwrap_err();
    }
}
