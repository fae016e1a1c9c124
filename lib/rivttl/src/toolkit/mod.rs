//! Generic infrastructure shared by the syntax readers: an incremental lexer
//! over a growable byte buffer and a pull parser that drives a rule
//! recognizer over the token stream.

mod error;
mod lexer;
mod parser;

pub use self::error::{TextPosition, TurtleParseError, TurtleSyntaxError};
pub use self::lexer::{Lexer, TokenOrLineJump, TokenRecognizer, TokenRecognizerError};
pub use self::parser::{
    Parser, ReaderIterator, RuleRecognizer, RuleRecognizerError, SliceIterator,
};
