use crate::toolkit::error::{TextPosition, TurtleParseError, TurtleSyntaxError};
use crate::toolkit::lexer::{Lexer, TokenOrLineJump, TokenRecognizer};
use std::collections::VecDeque;
use std::io::Read;
use std::ops::{Deref, Range};

/// Turns a token stream into parser outputs, with an explicit state stack.
pub trait RuleRecognizer: Sized {
    type TokenRecognizer: TokenRecognizer;
    type Output;
    type Context;

    /// The state to fall back to after an error, from which parsing can resume.
    fn error_recovery_state(self) -> Self;

    fn recognize_next(
        self,
        token: TokenOrLineJump<<Self::TokenRecognizer as TokenRecognizer>::Token<'_>>,
        context: &mut Self::Context,
        results: &mut Vec<Self::Output>,
        errors: &mut Vec<RuleRecognizerError>,
    ) -> Self;

    fn recognize_end(
        self,
        context: &mut Self::Context,
        results: &mut Vec<Self::Output>,
        errors: &mut Vec<RuleRecognizerError>,
    );
}

/// Outcome of pulling one token from the lexer.
enum TokenStep {
    /// No token is ready yet; more input (or end-of-input) is required.
    NoneReady,
    /// A token was fed into the recognizer state.
    Token,
    /// The lexer reported a syntax error.
    Error,
}

pub struct RuleRecognizerError {
    pub message: String,
}

impl<S: Into<String>> From<S> for RuleRecognizerError {
    fn from(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Drives a [`Lexer`] and a [`RuleRecognizer`] over a byte buffer.
///
/// Outputs are queued in source order and handed out together with the caret
/// of the token that completed them.
#[expect(clippy::partial_pub_fields)]
pub struct Parser<B, RR: RuleRecognizer> {
    lexer: Lexer<B, RR::TokenRecognizer>,
    state: Option<RR>,
    pub context: RR::Context,
    results: Vec<RR::Output>,
    errors: Vec<RuleRecognizerError>,
    pending_results: VecDeque<(RR::Output, Range<TextPosition>)>,
    pending_errors: VecDeque<TurtleSyntaxError>,
}

impl<B, RR: RuleRecognizer> Parser<B, RR> {
    pub fn new(lexer: Lexer<B, RR::TokenRecognizer>, recognizer: RR, context: RR::Context) -> Self {
        Self {
            lexer,
            state: Some(recognizer),
            context,
            results: Vec::new(),
            errors: Vec::new(),
            pending_results: VecDeque::new(),
            pending_errors: VecDeque::new(),
        }
    }
}

impl<RR: RuleRecognizer> Parser<Vec<u8>, RR> {
    pub fn extend_from_slice(&mut self, other: &[u8]) {
        self.lexer.extend_from_slice(other)
    }

    #[inline]
    pub fn end(&mut self) {
        self.lexer.end()
    }

    pub fn for_reader<R: Read>(self, reader: R) -> ReaderIterator<R, RR> {
        ReaderIterator {
            reader,
            parser: self,
        }
    }
}

impl<B: Deref<Target = [u8]>, RR: RuleRecognizer> Parser<B, RR> {
    #[inline]
    pub fn is_end(&self) -> bool {
        self.state.is_none()
            && self.pending_results.is_empty()
            && self.pending_errors.is_empty()
            && self.lexer.is_end()
    }

    /// Attempts to parse the next output from the already provided data.
    ///
    /// Returns `None` if the parsing is finished or more data is required.
    pub fn parse_next(
        &mut self,
    ) -> Option<Result<(RR::Output, Range<TextPosition>), TurtleSyntaxError>> {
        loop {
            if let Some(error) = self.pending_errors.pop_front() {
                tracing::debug!(
                    line = error.location().start.line,
                    column = error.location().start.column,
                    offset = error.location().start.offset,
                    "syntax error: {}",
                    error.message()
                );
                return Some(Err(error));
            }
            if let Some(result) = self.pending_results.pop_front() {
                return Some(Ok(result));
            }
            match self.advance_from_next_token() {
                TokenStep::Token => {
                    self.queue_step_outputs();
                    continue;
                }
                TokenStep::Error => continue,
                TokenStep::NoneReady => {}
            }
            if self.lexer.is_end() {
                let Some(state) = self.state.take() else {
                    return None;
                };
                state.recognize_end(&mut self.context, &mut self.results, &mut self.errors);
                self.queue_step_outputs();
            } else {
                return None;
            }
        }
    }

    /// Pulls the next token from the lexer and feeds it into the recognizer
    /// state, if one is available yet.
    fn advance_from_next_token(&mut self) -> TokenStep {
        let Some(result) = self.lexer.parse_next() else {
            return TokenStep::NoneReady;
        };
        match result {
            Ok(token) => {
                self.state = self.state.take().map(|state| {
                    state.recognize_next(
                        token,
                        &mut self.context,
                        &mut self.results,
                        &mut self.errors,
                    )
                });
                TokenStep::Token
            }
            Err(e) => {
                self.state = self.state.take().map(RR::error_recovery_state);
                self.pending_errors.push_back(e);
                TokenStep::Error
            }
        }
    }

    /// Moves the recognizer outputs of the last step into the source-ordered
    /// queues, stamping results with the position of the completing token.
    fn queue_step_outputs(&mut self) {
        let location = self.lexer.last_token_location();
        for result in self.results.drain(..) {
            self.pending_results.push_back((result, location.clone()));
        }
        for error in self.errors.drain(..) {
            let message = error
                .message
                .replace("TOKEN", &self.lexer.last_token_source());
            self.pending_errors
                .push_back(TurtleSyntaxError::new(location.clone(), message));
        }
    }
}

impl<'a, RR: RuleRecognizer> Parser<&'a [u8], RR> {
    #[expect(clippy::should_implement_trait)]
    pub fn into_iter(self) -> SliceIterator<'a, RR> {
        SliceIterator { parser: self }
    }
}

/// Iterates the outputs of a parser fed from a [`Read`] implementation.
#[expect(clippy::partial_pub_fields)]
pub struct ReaderIterator<R: Read, RR: RuleRecognizer> {
    reader: R,
    pub parser: Parser<Vec<u8>, RR>,
}

impl<R: Read, RR: RuleRecognizer> Iterator for ReaderIterator<R, RR> {
    type Item = Result<(RR::Output, Range<TextPosition>), TurtleParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.parser.is_end() {
            if let Some(result) = self.parser.parse_next() {
                return Some(result.map_err(TurtleParseError::Syntax));
            }
            if let Err(e) = self.parser.lexer.extend_from_reader(&mut self.reader) {
                return Some(Err(e.into()));
            }
        }
        None
    }
}

/// Iterates the outputs of a parser over a complete byte slice.
#[expect(clippy::partial_pub_fields)]
pub struct SliceIterator<'a, RR: RuleRecognizer> {
    pub parser: Parser<&'a [u8], RR>,
}

impl<RR: RuleRecognizer> Iterator for SliceIterator<'_, RR> {
    type Item = Result<(RR::Output, Range<TextPosition>), TurtleSyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.parse_next()
    }
}
