pub mod ast;
pub mod error;
pub mod location;
pub mod matchers;

pub use ast::{AstNode, MacroExpansionArgument, MacroExpansionNode, Token};
pub use error::ExpansionError;
pub use location::{FileId, FileLoc, LocationResolver, SourceLocation, SourceMap, SpellingRange};
pub use matchers::{
    AlignsWithExpansion, IsSpelledFromTokens, NodeMatcher, aligns_with_expansion,
    filter_matches, is_spelled_from_tokens,
};
