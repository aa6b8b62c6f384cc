//! Hand-written external scanner for the Djot block and inline grammars
//! (§1). Pairs with a generated LR/GLR parser table that drives this
//! crate's [`Scanner`] through the host's lexer callback surface (§6);
//! building or invoking that table is out of scope here.

pub use block::{Block, BlockStack};
pub use context::ScanContext;
pub use cursor::{Cursor, LexerCursor};
pub use inline::{Inline, InlineStack};
pub use scanner::Scanner;
pub use serialize::{deserialize, serialize, DecodedState, Flags};
pub use token::{BlockKind, InlineKind, SpanStyle, Token, TokenSet, TOKEN_COUNT};

mod block;
mod context;
mod cursor;
mod dispatch;
mod inline;
mod scanner;
mod serialize;
pub mod testing;
mod token;
