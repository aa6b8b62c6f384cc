//! The per-construct recognizers `Scanner::scan` dispatches to, in the
//! strict priority order of §4.I. Each submodule corresponds to one row
//! of `SPEC_FULL.md`'s module map.
//!
//! Every recognizer in this tree follows one contract: it either commits
//! (consumes input, sets the result symbol, returns `Some`/`true`) or
//! leaves the cursor and scanner state exactly as it found them and
//! returns `None`/`false`. `Scanner::scan` relies on that to try
//! recognizers in sequence without ever needing to roll anything back.

pub mod block;
pub mod inline;
pub mod newline;
pub mod verbatim;
