//! A tokenizer for rdlevel sources.
//!
//! rdlevel is the JSON superset used by Rhythm Doctor level files. The
//! tokenizer knows about the lenient bits (comments, bare identifiers) but
//! leaves all structural decisions to the parser in `rdlevel-tree`.

mod span;
pub use span::Span;

mod token;
pub use token::{Token, TokenKind};

mod tokenizer;
pub use tokenizer::Tokenizer;
