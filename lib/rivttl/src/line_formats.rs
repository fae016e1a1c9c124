//! Shared reader implementation for N-Triples and N-Quads.

use crate::event::{ReaderEvent, StatementFlags};
use crate::lexer::{TtlLexer, TtlLexerMode, TtlToken};
use crate::toolkit::{
    Lexer, Parser, RuleRecognizer, RuleRecognizerError, TokenOrLineJump,
};
use crate::{MAX_BUFFER_SIZE, MIN_BUFFER_SIZE};
use rivrdf::vocab::rdf;
use rivrdf::{
    BlankNode, GraphName, Literal, NamedNode, Predicate, Statement, Subject, Term, Variable,
};

pub struct LineFormatsRecognizer {
    stack: Vec<LineFormatsState>,
    subjects: Vec<Subject>,
    predicates: Vec<Predicate>,
    objects: Vec<Term>,
    lenient: bool,
}

pub struct LineFormatsRecognizerContext {
    with_graph_name: bool,
    with_variables: bool,
}

enum LineFormatsState {
    ExpectSubject,
    ExpectPredicate,
    ExpectObject,
    ExpectPossibleGraphOrDot,
    ExpectDot,
    ExpectLiteralAnnotationOrGraphNameOrDot { value: String },
    ExpectLiteralDatatype { value: String },
    ExpectLineJump,
    RecoverToLineJump,
}

impl RuleRecognizer for LineFormatsRecognizer {
    type TokenRecognizer = TtlLexer;
    type Output = ReaderEvent;
    type Context = LineFormatsRecognizerContext;

    fn error_recovery_state(mut self) -> Self {
        self.stack.clear();
        self.stack.push(LineFormatsState::RecoverToLineJump);
        self.subjects.clear();
        self.predicates.clear();
        self.objects.clear();
        self
    }

    fn recognize_next(
        mut self,
        token: TokenOrLineJump<TtlToken<'_>>,
        context: &mut LineFormatsRecognizerContext,
        results: &mut Vec<ReaderEvent>,
        errors: &mut Vec<RuleRecognizerError>,
    ) -> Self {
        match self.stack.pop().unwrap_or(LineFormatsState::ExpectSubject) {
            LineFormatsState::ExpectSubject => {
                let TokenOrLineJump::Token(token) = token else {
                    return self;
                };
                match token {
                    TtlToken::IriRef(s) => match self.named_node(s) {
                        Ok(s) => {
                            self.subjects.push(s.into());
                            self.stack.push(LineFormatsState::ExpectPredicate);
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::BlankNodeLabel(s) => {
                        self.subjects.push(BlankNode::new_unchecked(s).into());
                        self.stack.push(LineFormatsState::ExpectPredicate);
                        self
                    }
                    TtlToken::Variable(name) if context.with_variables => {
                        self.subjects.push(Variable::new_unchecked(name).into());
                        self.stack.push(LineFormatsState::ExpectPredicate);
                        self
                    }
                    TtlToken::LangTag(directive)
                        if matches!(directive, "prefix" | "base") =>
                    {
                        self.error(
                            errors,
                            format!("@{directive} directives are not allowed in this syntax"),
                        )
                    }
                    _ => self.error(
                        errors,
                        "The subject of a triple must be an IRI or a blank node",
                    ),
                }
            }
            LineFormatsState::ExpectPredicate => {
                let TokenOrLineJump::Token(token) = token else {
                    return self
                        .error(errors, "line jumps are not allowed in the middle of triples")
                        .recognize_next(TokenOrLineJump::LineJump, context, results, errors);
                };
                match token {
                    TtlToken::IriRef(p) => match self.named_node(p) {
                        Ok(p) => {
                            self.predicates.push(p.into());
                            self.stack.push(LineFormatsState::ExpectObject);
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::Variable(name) if context.with_variables => {
                        self.predicates.push(Variable::new_unchecked(name).into());
                        self.stack.push(LineFormatsState::ExpectObject);
                        self
                    }
                    _ => self.error(errors, "The predicate of a triple must be an IRI"),
                }
            }
            LineFormatsState::ExpectObject => {
                let TokenOrLineJump::Token(token) = token else {
                    return self
                        .error(errors, "line jumps are not allowed in the middle of triples")
                        .recognize_next(TokenOrLineJump::LineJump, context, results, errors);
                };
                match token {
                    TtlToken::IriRef(o) => match self.named_node(o) {
                        Ok(o) => {
                            self.objects.push(o.into());
                            self.stack.push(LineFormatsState::ExpectPossibleGraphOrDot);
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    TtlToken::BlankNodeLabel(o) => {
                        self.objects.push(BlankNode::new_unchecked(o).into());
                        self.stack.push(LineFormatsState::ExpectPossibleGraphOrDot);
                        self
                    }
                    TtlToken::Variable(name) if context.with_variables => {
                        self.objects.push(Variable::new_unchecked(name).into());
                        self.stack.push(LineFormatsState::ExpectPossibleGraphOrDot);
                        self
                    }
                    TtlToken::String(value) => {
                        self.stack
                            .push(LineFormatsState::ExpectLiteralAnnotationOrGraphNameOrDot {
                                value,
                            });
                        self
                    }
                    TtlToken::Punctuation(",") => self.error(
                        errors,
                        "Object lists with ',' are not supported by this syntax",
                    ),
                    _ => self.error(
                        errors,
                        "The object of a triple must be an IRI, a blank node or a literal",
                    ),
                }
            }
            LineFormatsState::ExpectLiteralAnnotationOrGraphNameOrDot { value } => match token {
                TokenOrLineJump::Token(TtlToken::LangTag(language)) => {
                    self.objects.push(
                        Literal::new_language_tagged_literal_unchecked(
                            value,
                            language.to_ascii_lowercase(),
                        )
                        .into(),
                    );
                    self.stack.push(LineFormatsState::ExpectPossibleGraphOrDot);
                    self
                }
                TokenOrLineJump::Token(TtlToken::Punctuation("^^")) => {
                    self.stack
                        .push(LineFormatsState::ExpectLiteralDatatype { value });
                    self
                }
                _ => {
                    self.objects.push(Literal::new_simple_literal(value).into());
                    self.stack.push(LineFormatsState::ExpectPossibleGraphOrDot);
                    self.recognize_next(token, context, results, errors)
                }
            },
            LineFormatsState::ExpectLiteralDatatype { value } => {
                let TokenOrLineJump::Token(token) = token else {
                    return self
                        .error(errors, "line jumps are not allowed in the middle of triples")
                        .recognize_next(TokenOrLineJump::LineJump, context, results, errors);
                };
                match token {
                    TtlToken::IriRef(d) => match self.named_node(d) {
                        Ok(d) => {
                            if !self.lenient && d == rdf::LANG_STRING {
                                errors.push("The datatype of a literal without a language tag must not be rdf:langString".into());
                            }
                            self.objects
                                .push(Literal::new_typed_literal(value, d).into());
                            self.stack.push(LineFormatsState::ExpectPossibleGraphOrDot);
                            self
                        }
                        Err(e) => self.error(errors, e),
                    },
                    _ => self.error(errors, "A literal datatype must be an IRI"),
                }
            }
            LineFormatsState::ExpectPossibleGraphOrDot => match token {
                TokenOrLineJump::Token(TtlToken::IriRef(g)) if context.with_graph_name => {
                    match self.named_node(g) {
                        Ok(g) => {
                            self.emit_statement(results, g.into());
                            self.stack.push(LineFormatsState::ExpectDot);
                            self
                        }
                        Err(e) => self.error(errors, e),
                    }
                }
                TokenOrLineJump::Token(TtlToken::BlankNodeLabel(g))
                    if context.with_graph_name =>
                {
                    self.emit_statement(results, BlankNode::new_unchecked(g).into());
                    self.stack.push(LineFormatsState::ExpectDot);
                    self
                }
                TokenOrLineJump::Token(TtlToken::Variable(name))
                    if context.with_graph_name && context.with_variables =>
                {
                    self.emit_statement(results, Variable::new_unchecked(name).into());
                    self.stack.push(LineFormatsState::ExpectDot);
                    self
                }
                _ => {
                    self.emit_statement(results, GraphName::DefaultGraph);
                    self.stack.push(LineFormatsState::ExpectDot);
                    self.recognize_next(token, context, results, errors)
                }
            },
            LineFormatsState::ExpectDot => {
                let TokenOrLineJump::Token(token) = token else {
                    return self
                        .error(errors, "Statements must be followed by a dot")
                        .recognize_next(TokenOrLineJump::LineJump, context, results, errors);
                };
                if let TtlToken::Punctuation(".") = token {
                    self.stack.push(LineFormatsState::ExpectLineJump);
                    self
                } else {
                    errors.push("Statements must be followed by a dot".into());
                    self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
                }
            }
            LineFormatsState::ExpectLineJump => {
                let TokenOrLineJump::Token(token) = token else {
                    return self;
                };
                errors.push(
                    "Only a single triple or quad can be written on each line".into(),
                );
                self.recognize_next(TokenOrLineJump::Token(token), context, results, errors)
            }
            LineFormatsState::RecoverToLineJump => {
                if token != TokenOrLineJump::LineJump {
                    self.stack.push(LineFormatsState::RecoverToLineJump);
                }
                self
            }
        }
    }

    fn recognize_end(
        mut self,
        _context: &mut LineFormatsRecognizerContext,
        results: &mut Vec<ReaderEvent>,
        errors: &mut Vec<RuleRecognizerError>,
    ) {
        match &*self.stack {
            [
                LineFormatsState::ExpectSubject
                | LineFormatsState::ExpectLineJump
                | LineFormatsState::RecoverToLineJump,
            ]
            | [] => (),
            [LineFormatsState::ExpectDot] => {
                errors.push("Statements must be followed by a dot".into())
            }
            [LineFormatsState::ExpectPossibleGraphOrDot] => {
                self.emit_statement(results, GraphName::DefaultGraph);
                errors.push("Statements must be followed by a dot".into())
            }
            [LineFormatsState::ExpectLiteralAnnotationOrGraphNameOrDot { value }] => {
                self.objects
                    .push(Literal::new_simple_literal(value.clone()).into());
                self.emit_statement(results, GraphName::DefaultGraph);
                errors.push("Statements must be followed by a dot".into())
            }
            _ => errors.push("Unexpected end of file".into()),
        }
    }
}

impl LineFormatsRecognizer {
    pub fn new_parser<B>(
        data: B,
        is_ending: bool,
        with_graph_name: bool,
        with_variables: bool,
        lenient: bool,
    ) -> Parser<B, Self> {
        Parser::new(
            Lexer::new(
                TtlLexer::new(TtlLexerMode::LineFormats, lenient),
                data,
                is_ending,
                MIN_BUFFER_SIZE,
                MAX_BUFFER_SIZE,
            ),
            Self {
                stack: vec![LineFormatsState::ExpectSubject],
                subjects: Vec::new(),
                predicates: Vec::new(),
                objects: Vec::new(),
                lenient,
            },
            LineFormatsRecognizerContext {
                with_graph_name,
                with_variables,
            },
        )
    }

    fn named_node(&self, iri: String) -> Result<NamedNode, String> {
        if self.lenient {
            Ok(NamedNode::new_unchecked(iri))
        } else {
            NamedNode::new(iri).map_err(|e| e.to_string())
        }
    }

    #[must_use]
    fn error(self, errors: &mut Vec<RuleRecognizerError>, msg: impl Into<RuleRecognizerError>) -> Self {
        errors.push(msg.into());
        self.error_recovery_state()
    }

    fn emit_statement(&mut self, results: &mut Vec<ReaderEvent>, graph_name: GraphName) {
        let statement = Statement {
            subject: self.subjects.pop().unwrap(),
            predicate: self.predicates.pop().unwrap(),
            object: self.objects.pop().unwrap(),
            graph_name,
        };
        results.push(ReaderEvent::statement(statement, StatementFlags::NONE));
    }
}
