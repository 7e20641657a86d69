//! Main module for the argot matching and composition engine

pub mod bind;
pub mod constructs;
pub mod context;
pub mod docs;
pub mod error;
pub mod matching;
pub mod message;
pub mod modifiers;
pub mod parser;
pub mod primitives;
pub mod suggest;
pub mod testing;
pub mod token;
pub mod value;

pub use constructs::{
    conditional, field, longest, merge, object, one_of, Field, Object, Record,
};
pub use context::{Annotations, ContextKey};
pub use docs::{document, usage_line, DocPage};
pub use error::{ErrorKind, Failure, ParseResult};
pub use matching::{parse, parse_async, parse_with};
pub use message::{Message, Term};
pub use parser::{Attempt, Boxed, Finalize, Mode, Parser, ParserExt};
pub use primitives::{argument, command, flag, option, passthrough, trailing};
pub use suggest::{complete, Suggestion};
pub use token::TokenBuffer;
pub use value::{choice, custom, custom_async, integer, path, pattern, string, ValueParser};
