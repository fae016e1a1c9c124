//! Shared reader implementation for Turtle and TriG.
//!
//! The recognizer emits [`ReaderEvent`]s: directives become `Base`/`Prefix`
//! events, statements carry the abbreviation flags of their source form, and
//! closing an anonymous node emits `EndAnonymous`. Containing statements are
//! emitted *before* the statements inside their `[ … ]` or `( … )`, so a
//! serializer can open the bracket when it sees the flag.

use crate::event::{ReaderEvent, StatementFlags};
use crate::lexer::{TtlLexer, TtlLexerMode, TtlToken};
use crate::toolkit::{Lexer, Parser, RuleRecognizer, RuleRecognizerError, TokenOrLineJump};
use crate::{MAX_BUFFER_SIZE, MIN_BUFFER_SIZE};
use oxiri::{Iri, IriRef};
use rivrdf::vocab::{rdf, xsd};
use rivrdf::{
    BlankNode, Environment, GraphName, Literal, NamedNode, Predicate, Statement, Subject, Term,
    Variable,
};
use std::sync::atomic::{AtomicU64, Ordering};

/// Serial number shared by all readers, so concurrently generated blank node
/// ids stay distinct between documents.
static DOCUMENT_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Generates the `<prefix>b<n>` identifiers of the blank nodes the reader
/// introduces for `[ … ]` and `( … )`.
struct BlankIdGenerator {
    prefix: String,
    next_id: u64,
}

impl BlankIdGenerator {
    fn new(prefix_override: Option<String>, global: bool) -> Self {
        Self {
            prefix: prefix_override.unwrap_or_else(|| {
                if global {
                    String::new()
                } else {
                    format!("f{}", DOCUMENT_SERIAL.fetch_add(1, Ordering::Relaxed))
                }
            }),
            next_id: 0,
        }
    }

    fn fresh(&mut self) -> BlankNode {
        self.next_id += 1;
        BlankNode::new_unchecked(format!("{}b{}", self.prefix, self.next_id))
    }
}

pub struct TerseRecognizer {
    stack: Vec<TerseState>,
    cur_subject: Vec<Subject>,
    cur_predicate: Vec<Predicate>,
    cur_object: Vec<Term>,
    cur_graph: GraphName,
    pending_flags: StatementFlags,
    blank_ids: BlankIdGenerator,
    rewrite_blank_labels: bool,
    saw_generated_like_label: bool,
    saw_rewritten_like_label: bool,
    lenient: bool,
}

pub struct TerseRecognizerContext {
    pub env: Environment,
    pub with_graph_name: bool,
    pub with_variables: bool,
    pub keep_relative_iris: bool,
}

impl RuleRecognizer for TerseRecognizer {
    type TokenRecognizer = TtlLexer;
    type Output = ReaderEvent;
    type Context = TerseRecognizerContext;

    fn error_recovery_state(mut self) -> Self {
        self.stack.clear();
        self.cur_subject.clear();
        self.cur_predicate.clear();
        self.cur_object.clear();
        self.cur_graph = GraphName::DefaultGraph;
        self.pending_flags = StatementFlags::NONE;
        self
    }

    fn recognize_next(
        mut self,
        token: TokenOrLineJump<TtlToken<'_>>,
        context: &mut TerseRecognizerContext,
        results: &mut Vec<ReaderEvent>,
        errors: &mut Vec<RuleRecognizerError>,
    ) -> Self {
        let TokenOrLineJump::Token(token) = token else {
            if self.stack.is_empty() {
                // We are recovering from an error, a line end is a good
                // point to start again from
                self.stack.push(TerseState::TurtleDoc);
            }
            return self;
        };
        if let Some(rule) = self.stack.pop() {
            match rule {
                // [1]  turtleDoc  ::=  statement*
                // [1g] trigDoc    ::=  (directive | block)*
                // [3]  directive  ::=  prefixID | base | sparqlPrefix | sparqlBase
                // [4]  prefixID   ::=  '@prefix' PNAME_NS IRIREF '.'
                // [5]  base       ::=  '@base' IRIREF '.'
                // [5s] sparqlBase    ::=  "BASE" IRIREF
                // [6s] sparqlPrefix  ::=  "PREFIX" PNAME_NS IRIREF
                TerseState::TurtleDoc => {
                    self.cur_graph = GraphName::DefaultGraph;
                    self.stack.push(TerseState::TurtleDoc);
                    match token {
                        TtlToken::PlainKeyword(k) if k.eq_ignore_ascii_case("base") => {
                            self.stack.push(TerseState::BaseExpectIri);
                            self
                        }
                        TtlToken::PlainKeyword(k) if k.eq_ignore_ascii_case("prefix") => {
                            self.stack.push(TerseState::PrefixExpectPrefix);
                            self
                        }
                        TtlToken::LangTag("prefix") => {
                            self.stack.push(TerseState::ExpectDirectiveDot);
                            self.stack.push(TerseState::PrefixExpectPrefix);
                            self
                        }
                        TtlToken::LangTag("base") => {
                            self.stack.push(TerseState::ExpectDirectiveDot);
                            self.stack.push(TerseState::BaseExpectIri);
                            self
                        }
                        TtlToken::PlainKeyword(k)
                            if k.eq_ignore_ascii_case("graph") && context.with_graph_name =>
                        {
                            self.stack.push(TerseState::WrappedGraph);
                            self.stack.push(TerseState::GraphName);
                            self
                        }
                        TtlToken::Punctuation("{") if context.with_graph_name => {
                            self.stack.push(TerseState::WrappedGraph);
                            self.recognize_next(
                                TokenOrLineJump::Token(token),
                                context,
                                results,
                                errors,
                            )
                        }
                        _ => {
                            self.stack.push(TerseState::TriplesOrGraph);
                            self.recognize_next(
                                TokenOrLineJump::Token(token),
                                context,
                                results,
                                errors,
                            )
                        }
                    }
                }
                TerseState::ExpectDot => {
                    self.cur_subject.pop();
                    if token == TtlToken::Punctuation(".") {
                        self
                    } else {
                        errors.push("A dot is expected at the end of statements".into());
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                }
                TerseState::ExpectDirectiveDot => {
                    if token == TtlToken::Punctuation(".") {
                        self
                    } else {
                        errors.push("A dot is expected at the end of @prefix and @base".into());
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                }
                TerseState::BaseExpectIri => {
                    if let TtlToken::IriRef(iri) = token {
                        match context.env.set_base(&iri) {
                            Ok(()) => {
                                if let Some(base) = context.env.base() {
                                    results.push(ReaderEvent::Base {
                                        iri: NamedNode::new_unchecked(base),
                                    });
                                }
                                self
                            }
                            Err(e) => self.error(errors, e.to_string()),
                        }
                    } else {
                        self.error(errors, "The BASE keyword should be followed by an IRI")
                    }
                }
                TerseState::PrefixExpectPrefix => match token {
                    TtlToken::PrefixedName { prefix, local, .. } if local.is_empty() => {
                        self.stack.push(TerseState::PrefixExpectIri {
                            name: prefix.to_owned(),
                        });
                        self
                    }
                    _ => self.error(
                        errors,
                        "The PREFIX keyword should be followed by a prefix like 'ex:'",
                    ),
                },
                TerseState::PrefixExpectIri { name } => {
                    if let TtlToken::IriRef(iri) = token {
                        match context.env.set_prefix(name.as_str(), &iri) {
                            Ok(()) => {
                                let iri = context
                                    .env
                                    .prefixes()
                                    .find(|(n, _)| *n == name)
                                    .map(|(_, iri)| iri.to_owned())
                                    .unwrap_or(iri);
                                results.push(ReaderEvent::Prefix {
                                    name,
                                    iri: NamedNode::new_unchecked(iri),
                                });
                                self
                            }
                            Err(e) => self.error(errors, e.to_string()),
                        }
                    } else {
                        self.error(errors, "The PREFIX declaration should be followed by a prefix and its value as an IRI")
                    }
                }
                // [2g] block           ::=  triplesOrGraph | wrappedGraph | triples2 | ("GRAPH" labelOrSubject wrappedGraph)
                // [3g] triplesOrGraph  ::=  labelOrSubject (wrappedGraph | predicateObjectList '.')
                // [4g] triples2        ::=  blankNodePropertyList predicateObjectList? '.' | collection predicateObjectList '.'
                TerseState::TriplesOrGraph => match token {
                    TtlToken::IriRef(iri) => match self.resolve_iri(context, iri) {
                        Ok(t) => {
                            self.stack
                                .push(TerseState::WrappedGraphOrPredicateObjectList {
                                    term: t.into(),
                                });
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::PrefixedName {
                        prefix,
                        local,
                        might_be_invalid_iri,
                    } => match self.resolve_prefixed_name(context, prefix, &local, might_be_invalid_iri) {
                        Ok(t) => {
                            self.stack
                                .push(TerseState::WrappedGraphOrPredicateObjectList {
                                    term: t.into(),
                                });
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::BlankNodeLabel(label) => match self.user_blank_node(label) {
                        Ok(t) => {
                            self.stack
                                .push(TerseState::WrappedGraphOrPredicateObjectList {
                                    term: t.into(),
                                });
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::Variable(name) if context.with_variables => {
                        self.stack
                            .push(TerseState::WrappedGraphOrPredicateObjectList {
                                term: Variable::new_unchecked(name).into(),
                            });
                        self
                    }
                    TtlToken::Punctuation("[") => {
                        self.stack
                            .push(TerseState::WrappedGraphBlankNodePropertyListCurrent);
                        self
                    }
                    TtlToken::Punctuation("(") => {
                        self.stack.push(TerseState::ExpectDot);
                        self.stack.push(TerseState::PredicateObjectList);
                        self.stack.push(TerseState::SubjectCollectionBeginning);
                        self
                    }
                    _ => self.error(errors, "TOKEN is not a valid subject or graph name"),
                },
                TerseState::WrappedGraphOrPredicateObjectList { term } => {
                    if token == TtlToken::Punctuation("{") && context.with_graph_name {
                        self.cur_graph = term.into();
                        self.pending_flags = StatementFlags::NONE;
                        self.stack.push(TerseState::WrappedGraph);
                    } else {
                        self.cur_subject.push(term);
                        self.stack.push(TerseState::ExpectDot);
                        self.stack.push(TerseState::PredicateObjectList);
                    }
                    self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                }
                TerseState::WrappedGraphBlankNodePropertyListCurrent => {
                    if token == TtlToken::Punctuation("]") {
                        self.pending_flags |= StatementFlags::EMPTY_SUBJECT;
                        self.stack
                            .push(TerseState::WrappedGraphOrPredicateObjectList {
                                term: self.blank_ids.fresh().into(),
                            });
                        self
                    } else {
                        self.pending_flags |= StatementFlags::ANON_SUBJECT;
                        self.cur_subject.push(self.blank_ids.fresh().into());
                        self.stack.push(TerseState::ExpectDot);
                        self.stack.push(TerseState::SubjectBlankNodePropertyListEnd);
                        self.stack.push(TerseState::PredicateObjectList);
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                }
                TerseState::SubjectBlankNodePropertyListEnd => {
                    if token == TtlToken::Punctuation("]") {
                        self.end_anonymous(results);
                        self.stack
                            .push(TerseState::SubjectBlankNodePropertyListAfter);
                        self
                    } else {
                        errors.push("blank node property lists should end with a ']'".into());
                        self.end_anonymous(results);
                        self.stack
                            .push(TerseState::SubjectBlankNodePropertyListAfter);
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                }
                TerseState::SubjectBlankNodePropertyListAfter => {
                    if matches!(token, TtlToken::Punctuation("." | "}")) {
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    } else {
                        self.stack.push(TerseState::PredicateObjectList);
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                }
                // [15] collection  ::=  '(' object* ')'
                TerseState::SubjectCollectionBeginning => {
                    if let TtlToken::Punctuation(")") = token {
                        self.cur_subject.push(rdf::NIL.into());
                        self
                    } else {
                        let root = self.blank_ids.fresh();
                        self.pending_flags |= StatementFlags::LIST_SUBJECT;
                        self.cur_subject.push(root.clone().into());
                        self.cur_subject.push(root.into());
                        self.cur_predicate.push(rdf::FIRST.into());
                        self.stack.push(TerseState::SubjectCollectionPossibleEnd);
                        self.stack.push(TerseState::Object);
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                }
                TerseState::SubjectCollectionPossibleEnd => {
                    let old = self.cur_subject.pop().unwrap();
                    self.cur_object.pop();
                    if let TtlToken::Punctuation(")") = token {
                        self.cur_predicate.pop();
                        results.push(ReaderEvent::statement(
                            Statement::new(old, rdf::REST, rdf::NIL, self.cur_graph.clone()),
                            StatementFlags::NONE,
                        ));
                        self
                    } else {
                        let new = self.blank_ids.fresh();
                        results.push(ReaderEvent::statement(
                            Statement::new(old, rdf::REST, new.clone(), self.cur_graph.clone()),
                            StatementFlags::NONE,
                        ));
                        self.cur_subject.push(new.into());
                        self.stack.push(TerseState::SubjectCollectionPossibleEnd);
                        self.stack.push(TerseState::Object);
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                }
                // [5g] wrappedGraph  ::=  '{' triplesBlock? '}'
                // [6g] triplesBlock  ::=  triples ('.' triplesBlock?)?
                TerseState::WrappedGraph => {
                    if token == TtlToken::Punctuation("{") {
                        self.stack.push(TerseState::WrappedGraphPossibleEnd);
                        self.stack.push(TerseState::Triples);
                        self
                    } else {
                        self.error(
                            errors,
                            "The GRAPH keyword should be followed by a graph name and a value in '{'",
                        )
                    }
                }
                TerseState::WrappedGraphPossibleEnd => {
                    self.cur_subject.pop();
                    match token {
                        TtlToken::Punctuation("}") => self,
                        TtlToken::Punctuation(".") => {
                            self.stack.push(TerseState::WrappedGraphPossibleEnd);
                            self.stack.push(TerseState::Triples);
                            self
                        }
                        _ => {
                            errors.push(
                                "A '}' or a '.' is expected at the end of a graph block".into(),
                            );
                            self.recognize_next(
                                TokenOrLineJump::Token(token),
                                context,
                                results,
                                errors,
                            )
                        }
                    }
                }
                // [6]  triples  ::=  subject predicateObjectList | blankNodePropertyList predicateObjectList?
                // [10] subject  ::=  iri | BlankNode | collection
                TerseState::Triples => match token {
                    TtlToken::Punctuation("}") => {
                        // Early end
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                    TtlToken::Punctuation("[") => {
                        self.stack
                            .push(TerseState::TriplesBlankNodePropertyListCurrent);
                        self
                    }
                    TtlToken::IriRef(iri) => match self.resolve_iri(context, iri) {
                        Ok(t) => {
                            self.cur_subject.push(t.into());
                            self.stack.push(TerseState::PredicateObjectList);
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::PrefixedName {
                        prefix,
                        local,
                        might_be_invalid_iri,
                    } => match self.resolve_prefixed_name(context, prefix, &local, might_be_invalid_iri) {
                        Ok(t) => {
                            self.cur_subject.push(t.into());
                            self.stack.push(TerseState::PredicateObjectList);
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::BlankNodeLabel(label) => match self.user_blank_node(label) {
                        Ok(t) => {
                            self.cur_subject.push(t.into());
                            self.stack.push(TerseState::PredicateObjectList);
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::Variable(name) if context.with_variables => {
                        self.cur_subject.push(Variable::new_unchecked(name).into());
                        self.stack.push(TerseState::PredicateObjectList);
                        self
                    }
                    TtlToken::Punctuation("(") => {
                        self.stack.push(TerseState::PredicateObjectList);
                        self.stack.push(TerseState::SubjectCollectionBeginning);
                        self
                    }
                    _ => self.error(errors, "TOKEN is not a valid RDF subject"),
                },
                TerseState::TriplesBlankNodePropertyListCurrent => {
                    if token == TtlToken::Punctuation("]") {
                        self.pending_flags |= StatementFlags::EMPTY_SUBJECT;
                        self.cur_subject.push(self.blank_ids.fresh().into());
                        self.stack.push(TerseState::PredicateObjectList);
                        self
                    } else {
                        self.pending_flags |= StatementFlags::ANON_SUBJECT;
                        self.cur_subject.push(self.blank_ids.fresh().into());
                        self.stack.push(TerseState::SubjectBlankNodePropertyListEnd);
                        self.stack.push(TerseState::PredicateObjectList);
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                }
                // [7g] labelOrSubject  ::=  iri | BlankNode
                TerseState::GraphName => match token {
                    TtlToken::IriRef(iri) => match self.resolve_iri(context, iri) {
                        Ok(t) => {
                            self.cur_graph = t.into();
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::PrefixedName {
                        prefix,
                        local,
                        might_be_invalid_iri,
                    } => match self.resolve_prefixed_name(context, prefix, &local, might_be_invalid_iri) {
                        Ok(t) => {
                            self.cur_graph = t.into();
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::BlankNodeLabel(label) => match self.user_blank_node(label) {
                        Ok(t) => {
                            self.cur_graph = t.into();
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::Variable(name) if context.with_variables => {
                        self.cur_graph = Variable::new_unchecked(name).into();
                        self
                    }
                    TtlToken::Punctuation("[") => {
                        self.stack.push(TerseState::GraphNameAnonEnd);
                        self
                    }
                    _ => self.error(errors, "TOKEN is not a valid graph name"),
                },
                TerseState::GraphNameAnonEnd => {
                    if token == TtlToken::Punctuation("]") {
                        self.cur_graph = self.blank_ids.fresh().into();
                        self
                    } else {
                        self.error(
                            errors,
                            "Anonymous blank nodes with a property list are not allowed as graph name",
                        )
                    }
                }
                // [7] predicateObjectList  ::=  verb objectList (';' (verb objectList)?)*
                TerseState::PredicateObjectList => {
                    self.stack.push(TerseState::PredicateObjectListEnd);
                    self.stack.push(TerseState::ObjectsList);
                    self.stack.push(TerseState::Verb);
                    self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                }
                TerseState::PredicateObjectListEnd => {
                    self.cur_predicate.pop();
                    if token == TtlToken::Punctuation(";") {
                        self.stack
                            .push(TerseState::PredicateObjectListPossibleContinuation);
                        self
                    } else {
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                }
                TerseState::PredicateObjectListPossibleContinuation => {
                    if token == TtlToken::Punctuation(";") {
                        self.stack
                            .push(TerseState::PredicateObjectListPossibleContinuation);
                        self
                    } else if matches!(token, TtlToken::Punctuation("." | "}" | "]")) {
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    } else {
                        self.stack.push(TerseState::PredicateObjectListEnd);
                        self.stack.push(TerseState::ObjectsList);
                        self.stack.push(TerseState::Verb);
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                }
                // [8] objectList  ::=  object (',' object)*
                TerseState::ObjectsList => {
                    self.stack.push(TerseState::ObjectsListEnd);
                    self.stack.push(TerseState::Object);
                    self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                }
                TerseState::ObjectsListEnd => {
                    self.cur_object.pop();
                    if token == TtlToken::Punctuation(",") {
                        self.stack.push(TerseState::ObjectsListEnd);
                        self.stack.push(TerseState::Object);
                        self
                    } else {
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                }
                // [9]  verb       ::=  predicate | 'a'
                // [11] predicate  ::=  iri
                TerseState::Verb => match token {
                    TtlToken::PlainKeyword("a") => {
                        self.cur_predicate.push(rdf::TYPE.into());
                        self
                    }
                    TtlToken::IriRef(iri) => match self.resolve_iri(context, iri) {
                        Ok(t) => {
                            self.cur_predicate.push(t.into());
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::PrefixedName {
                        prefix,
                        local,
                        might_be_invalid_iri,
                    } => match self.resolve_prefixed_name(context, prefix, &local, might_be_invalid_iri) {
                        Ok(t) => {
                            self.cur_predicate.push(t.into());
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::Variable(name) if context.with_variables => {
                        self.cur_predicate.push(Variable::new_unchecked(name).into());
                        self
                    }
                    _ => self.error(errors, "TOKEN is not a valid predicate"),
                },
                // [12] object  ::=  iri | BlankNode | collection | blankNodePropertyList | literal
                // [13] literal ::=  RDFLiteral | NumericLiteral | BooleanLiteral
                TerseState::Object => match token {
                    TtlToken::IriRef(iri) => match self.resolve_iri(context, iri) {
                        Ok(t) => {
                            self.cur_object.push(t.into());
                            self.emit_statement(results);
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::PrefixedName {
                        prefix,
                        local,
                        might_be_invalid_iri,
                    } => match self.resolve_prefixed_name(context, prefix, &local, might_be_invalid_iri) {
                        Ok(t) => {
                            self.cur_object.push(t.into());
                            self.emit_statement(results);
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::BlankNodeLabel(label) => match self.user_blank_node(label) {
                        Ok(t) => {
                            self.cur_object.push(t.into());
                            self.emit_statement(results);
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::Variable(name) if context.with_variables => {
                        self.cur_object.push(Variable::new_unchecked(name).into());
                        self.emit_statement(results);
                        self
                    }
                    TtlToken::Punctuation("[") => {
                        self.stack
                            .push(TerseState::ObjectBlankNodePropertyListCurrent);
                        self
                    }
                    TtlToken::Punctuation("(") => {
                        self.stack.push(TerseState::ObjectCollectionBeginning);
                        self
                    }
                    TtlToken::String(value) | TtlToken::LongString(value) => {
                        self.stack
                            .push(TerseState::LiteralPossibleSuffix { value });
                        self
                    }
                    TtlToken::Integer(v) => {
                        self.cur_object
                            .push(Literal::new_typed_literal(v, xsd::INTEGER).into());
                        self.emit_statement(results);
                        self
                    }
                    TtlToken::Decimal(v) => {
                        self.cur_object
                            .push(Literal::new_typed_literal(v, xsd::DECIMAL).into());
                        self.emit_statement(results);
                        self
                    }
                    TtlToken::Double(v) => {
                        self.cur_object
                            .push(Literal::new_typed_literal(v, xsd::DOUBLE).into());
                        self.emit_statement(results);
                        self
                    }
                    TtlToken::PlainKeyword("true") => {
                        self.cur_object
                            .push(Literal::new_typed_literal("true", xsd::BOOLEAN).into());
                        self.emit_statement(results);
                        self
                    }
                    TtlToken::PlainKeyword("false") => {
                        self.cur_object
                            .push(Literal::new_typed_literal("false", xsd::BOOLEAN).into());
                        self.emit_statement(results);
                        self
                    }
                    _ => self.error(errors, "TOKEN is not a valid RDF object"),
                },
                TerseState::ObjectBlankNodePropertyListCurrent => {
                    if token == TtlToken::Punctuation("]") {
                        // The empty anonymous node `[]`
                        let node = self.blank_ids.fresh();
                        self.pending_flags |= StatementFlags::ANON_OBJECT;
                        self.cur_object.push(node.clone().into());
                        self.emit_statement(results);
                        results.push(ReaderEvent::EndAnonymous { node });
                        self
                    } else {
                        let node = self.blank_ids.fresh();
                        self.pending_flags |= StatementFlags::ANON_OBJECT;
                        self.cur_object.push(node.clone().into());
                        self.emit_statement(results);
                        self.cur_subject.push(node.into());
                        self.stack.push(TerseState::ObjectBlankNodePropertyListEnd);
                        self.stack.push(TerseState::PredicateObjectList);
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                }
                TerseState::ObjectBlankNodePropertyListEnd => {
                    if token == TtlToken::Punctuation("]") {
                        if let Some(Subject::BlankNode(node)) = self.cur_subject.pop() {
                            results.push(ReaderEvent::EndAnonymous { node });
                        }
                        self
                    } else {
                        self.error(errors, "blank node property lists should end with a ']'")
                    }
                }
                TerseState::ObjectCollectionBeginning => {
                    if let TtlToken::Punctuation(")") = token {
                        self.cur_object.push(rdf::NIL.into());
                        self.emit_statement(results);
                        self
                    } else {
                        let root = self.blank_ids.fresh();
                        self.pending_flags |= StatementFlags::LIST_OBJECT;
                        self.cur_object.push(root.clone().into());
                        self.emit_statement(results);
                        self.cur_subject.push(root.into());
                        self.cur_predicate.push(rdf::FIRST.into());
                        self.stack.push(TerseState::ObjectCollectionPossibleEnd);
                        self.stack.push(TerseState::Object);
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                }
                TerseState::ObjectCollectionPossibleEnd => {
                    let old = self.cur_subject.pop().unwrap();
                    self.cur_object.pop();
                    if let TtlToken::Punctuation(")") = token {
                        self.cur_predicate.pop();
                        results.push(ReaderEvent::statement(
                            Statement::new(old, rdf::REST, rdf::NIL, self.cur_graph.clone()),
                            StatementFlags::NONE,
                        ));
                        self
                    } else {
                        let new = self.blank_ids.fresh();
                        results.push(ReaderEvent::statement(
                            Statement::new(old, rdf::REST, new.clone(), self.cur_graph.clone()),
                            StatementFlags::NONE,
                        ));
                        self.cur_subject.push(new.into());
                        self.stack.push(TerseState::ObjectCollectionPossibleEnd);
                        self.stack.push(TerseState::Object);
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                }
                // [14] RDFLiteral  ::=  String (LANGTAG | '^^' iri)?
                TerseState::LiteralPossibleSuffix { value } => match token {
                    TtlToken::LangTag(language) => {
                        self.cur_object.push(
                            Literal::new_language_tagged_literal_unchecked(
                                value,
                                language.to_ascii_lowercase(),
                            )
                            .into(),
                        );
                        self.emit_statement(results);
                        self
                    }
                    TtlToken::Punctuation("^^") => {
                        self.stack
                            .push(TerseState::LiteralExpectDatatype { value });
                        self
                    }
                    _ => {
                        self.cur_object
                            .push(Literal::new_simple_literal(value).into());
                        self.emit_statement(results);
                        self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                    }
                },
                TerseState::LiteralExpectDatatype { value } => match token {
                    TtlToken::IriRef(iri) => match self.resolve_iri(context, iri) {
                        Ok(datatype) => {
                            if !self.lenient && datatype == rdf::LANG_STRING {
                                errors.push("The datatype of a literal without a language tag must not be rdf:langString".into());
                            }
                            self.cur_object
                                .push(Literal::new_typed_literal(value, datatype).into());
                            self.emit_statement(results);
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::PrefixedName {
                        prefix,
                        local,
                        might_be_invalid_iri,
                    } => match self.resolve_prefixed_name(context, prefix, &local, might_be_invalid_iri) {
                        Ok(datatype) => {
                            if !self.lenient && datatype == rdf::LANG_STRING {
                                errors.push("The datatype of a literal without a language tag must not be rdf:langString".into());
                            }
                            self.cur_object
                                .push(Literal::new_typed_literal(value, datatype).into());
                            self.emit_statement(results);
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    _ => self
                        .error(errors, "Expecting a datatype IRI after '^^', found TOKEN")
                        .recognize_next(TokenOrLineJump::Token(token), context, results, errors),
                },
            }
        } else if matches!(token, TtlToken::Punctuation("." | "}")) {
            self.stack.push(TerseState::TurtleDoc);
            self
        } else {
            self
        }
    }

    fn recognize_end(
        mut self,
        _context: &mut TerseRecognizerContext,
        results: &mut Vec<ReaderEvent>,
        errors: &mut Vec<RuleRecognizerError>,
    ) {
        match &*self.stack {
            [] | [TerseState::TurtleDoc] => {
                debug_assert!(
                    self.cur_subject.is_empty(),
                    "The cur_subject stack must be empty if the state stack is empty"
                );
                debug_assert!(
                    self.cur_predicate.is_empty(),
                    "The cur_predicate stack must be empty if the state stack is empty"
                );
                debug_assert!(
                    self.cur_object.is_empty(),
                    "The cur_object stack must be empty if the state stack is empty"
                );
            }
            [.., TerseState::LiteralPossibleSuffix { value }] => {
                self.cur_object
                    .push(Literal::new_simple_literal(value.clone()).into());
                self.emit_statement(results);
                errors.push("Triples should be followed by a dot".into())
            }
            _ => errors.push("Unexpected end of file".into()),
        }
    }
}

impl TerseRecognizer {
    #[expect(clippy::fn_params_excessive_bools)]
    pub fn new_parser<B>(
        data: B,
        is_ending: bool,
        with_graph_name: bool,
        with_variables: bool,
        keep_relative_iris: bool,
        lenient: bool,
        rewrite_blank_labels: bool,
        blank_id_prefix: Option<String>,
        global_blank_ids: bool,
        env: Environment,
    ) -> Parser<B, Self> {
        Parser::new(
            Lexer::new(
                TtlLexer::new(TtlLexerMode::Terse, lenient),
                data,
                is_ending,
                MIN_BUFFER_SIZE,
                MAX_BUFFER_SIZE,
            ),
            Self {
                stack: vec![TerseState::TurtleDoc],
                cur_subject: Vec::new(),
                cur_predicate: Vec::new(),
                cur_object: Vec::new(),
                cur_graph: GraphName::DefaultGraph,
                pending_flags: StatementFlags::NONE,
                blank_ids: BlankIdGenerator::new(blank_id_prefix, global_blank_ids),
                rewrite_blank_labels,
                saw_generated_like_label: false,
                saw_rewritten_like_label: false,
                lenient,
            },
            TerseRecognizerContext {
                env,
                with_graph_name,
                with_variables,
                keep_relative_iris,
            },
        )
    }

    #[must_use]
    fn error(
        mut self,
        errors: &mut Vec<RuleRecognizerError>,
        msg: impl Into<RuleRecognizerError>,
    ) -> Self {
        errors.push(msg.into());
        self.stack.clear();
        self.cur_subject.clear();
        self.cur_predicate.clear();
        self.cur_object.clear();
        self.cur_graph = GraphName::DefaultGraph;
        self.pending_flags = StatementFlags::NONE;
        self
    }

    fn resolve_iri(
        &self,
        context: &TerseRecognizerContext,
        iri: String,
    ) -> Result<NamedNode, String> {
        if context.keep_relative_iris {
            if !self.lenient {
                IriRef::parse(iri.as_str()).map_err(|e| e.to_string())?;
            }
            Ok(NamedNode::new_unchecked(iri))
        } else if self.lenient {
            Ok(context.env.resolve_unchecked(&iri))
        } else {
            context.env.resolve(&iri).map_err(|e| e.to_string())
        }
    }

    fn resolve_prefixed_name(
        &self,
        context: &TerseRecognizerContext,
        prefix: &str,
        local: &str,
        might_be_invalid_iri: bool,
    ) -> Result<NamedNode, String> {
        let Some((_, start)) = context.env.prefixes().find(|(name, _)| *name == prefix) else {
            return Err(format!("The prefix {prefix}: has not been declared"));
        };
        let iri = format!("{start}{local}");
        if !self.lenient && (might_be_invalid_iri || may_extend_authority(start)) {
            // We validate again. We always validate if the local part might be the IRI authority.
            if let Err(e) = Iri::parse(iri.as_str()) {
                return Err(format!(
                    "The prefixed name {prefix}:{local} builds IRI {iri} that is invalid: {e}"
                ));
            }
        }
        Ok(NamedNode::new_unchecked(iri))
    }

    /// A user-written blank node label, with generated-looking labels moved
    /// out of the way of [`BlankIdGenerator`] output.
    fn user_blank_node(&mut self, label: &str) -> Result<BlankNode, String> {
        if self.rewrite_blank_labels {
            let mut bytes = label.bytes();
            match (bytes.next(), bytes.next()) {
                (Some(b'b'), Some(b'0'..=b'9')) => {
                    self.saw_generated_like_label = true;
                    if self.saw_rewritten_like_label {
                        return Err(format!(
                            "The blank node label {label} clashes with a rewritten label, set an explicit blank node prefix"
                        ));
                    }
                    let mut rewritten = String::with_capacity(label.len());
                    rewritten.push('B');
                    rewritten.push_str(&label[1..]);
                    return Ok(BlankNode::new_unchecked(rewritten));
                }
                (Some(b'B'), Some(b'0'..=b'9')) => {
                    self.saw_rewritten_like_label = true;
                    if self.saw_generated_like_label {
                        return Err(format!(
                            "The blank node label {label} clashes with a rewritten label, set an explicit blank node prefix"
                        ));
                    }
                }
                _ => (),
            }
        }
        Ok(BlankNode::new_unchecked(label))
    }

    fn emit_statement(&mut self, results: &mut Vec<ReaderEvent>) {
        let statement = Statement {
            subject: self.cur_subject.last().unwrap().clone(),
            predicate: self.cur_predicate.last().unwrap().clone(),
            object: self.cur_object.last().unwrap().clone(),
            graph_name: self.cur_graph.clone(),
        };
        results.push(ReaderEvent::statement(statement, self.pending_flags));
        self.pending_flags = StatementFlags::NONE;
    }

    /// Emits the end of the anonymous node whose subject is still current:
    /// the enclosing rule owns the subject stack entry.
    fn end_anonymous(&mut self, results: &mut Vec<ReaderEvent>) {
        if let Some(Subject::BlankNode(node)) = self.cur_subject.last() {
            results.push(ReaderEvent::EndAnonymous { node: node.clone() });
        }
    }
}

/// Appending a local name to an IRI without a path would extend its
/// authority, which needs revalidation.
fn may_extend_authority(iri: &str) -> bool {
    iri.split_once(':').is_some_and(|(_, after_scheme)| {
        after_scheme
            .strip_prefix("//")
            .is_some_and(|hierarchy| !hierarchy.contains(['/', '?', '#']))
    })
}

#[derive(Debug)]
enum TerseState {
    TurtleDoc,
    ExpectDot,
    ExpectDirectiveDot,
    BaseExpectIri,
    PrefixExpectPrefix,
    PrefixExpectIri {
        name: String,
    },
    TriplesOrGraph,
    WrappedGraphBlankNodePropertyListCurrent,
    SubjectBlankNodePropertyListEnd,
    SubjectBlankNodePropertyListAfter,
    SubjectCollectionBeginning,
    SubjectCollectionPossibleEnd,
    WrappedGraphOrPredicateObjectList {
        term: Subject,
    },
    WrappedGraph,
    WrappedGraphPossibleEnd,
    GraphName,
    GraphNameAnonEnd,
    Triples,
    TriplesBlankNodePropertyListCurrent,
    PredicateObjectList,
    PredicateObjectListEnd,
    PredicateObjectListPossibleContinuation,
    ObjectsList,
    ObjectsListEnd,
    Verb,
    Object,
    ObjectBlankNodePropertyListCurrent,
    ObjectBlankNodePropertyListEnd,
    ObjectCollectionBeginning,
    ObjectCollectionPossibleEnd,
    LiteralPossibleSuffix {
        value: String,
    },
    LiteralExpectDatatype {
        value: String,
    },
}
