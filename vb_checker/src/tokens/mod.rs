//! Token model for the VB checker
//!
//! A [`Token`] is an immutable record of one recognized span of a source line:
//! its [`TokenCategory`], the matched text, the 1-based line and the 0-based
//! starting column. The tokenizer emits them as a [`TokenSequence`] ordered by
//! line and then by column.

pub mod sequence;
pub mod token;

pub use sequence::TokenSequence;
pub use token::{Position, Token, TokenCategory};
