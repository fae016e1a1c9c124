#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]

mod blank_node;
mod environment;
mod literal;
mod named_node;
mod statement;
mod term;
mod value;
mod variable;
pub mod vocab;

pub use crate::blank_node::{BlankNode, BlankNodeIdParseError, BlankNodeRef};
pub use crate::environment::{Environment, EnvironmentError};
pub use crate::literal::{Literal, LiteralRef};
pub use crate::named_node::{NamedNode, NamedNodeRef};
pub use crate::statement::{Statement, StatementRef};
pub use crate::term::{
    GraphName, GraphNameRef, Predicate, PredicateRef, Subject, SubjectRef, Term, TermRef,
    TryFromTermError,
};
pub use crate::value::{Coercion, LiteralCastError};
pub use crate::variable::{Variable, VariableNameParseError, VariableRef};
pub use oxilangtag::LanguageTagParseError;
pub use oxiri::IriParseError;
