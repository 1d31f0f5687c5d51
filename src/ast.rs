use crate::error::ExpansionError;
use crate::location::SourceLocation;

/// A lexical token, reduced to the position it was produced at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    location: SourceLocation,
}

impl Token {
    pub fn new(location: SourceLocation) -> Self {
        Self { location }
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }
}

/// Tokens supplied for one parameter of a macro invocation.
/// Empty arguments (`F()` or `F(a,)`) carry no tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroExpansionArgument {
    name: String,
    tokens: Vec<Token>,
}

impl MacroExpansionArgument {
    pub fn new(name: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            name: name.into(),
            tokens,
        }
    }

    /// Parameter name the tokens were bound to
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn first(&self) -> Option<&Token> {
        self.tokens.first()
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }
}

/// Record of one concrete macro expansion: the replacement tokens it produced
/// and the arguments substituted into them.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroExpansionNode {
    name: String,
    definition_tokens: Vec<Token>,
    arguments: Vec<MacroExpansionArgument>,
}

impl MacroExpansionNode {
    /// Build an expansion record, rejecting an empty replacement list
    pub fn new(
        name: impl Into<String>,
        definition_tokens: Vec<Token>,
        arguments: Vec<MacroExpansionArgument>,
    ) -> Result<Self, ExpansionError> {
        let name = name.into();
        if definition_tokens.is_empty() {
            return Err(ExpansionError::EmptyDefinition { name });
        }

        Ok(Self {
            name,
            definition_tokens,
            arguments,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition_tokens(&self) -> &[Token] {
        &self.definition_tokens
    }

    pub fn arguments(&self) -> &[MacroExpansionArgument] {
        &self.arguments
    }

    /// First replacement token
    pub fn definition_begin(&self) -> &Token {
        // non-empty by construction
        &self.definition_tokens[0]
    }

    /// Last replacement token
    pub fn definition_end(&self) -> &Token {
        &self.definition_tokens[self.definition_tokens.len() - 1]
    }
}

/// Anything in the syntax tree with a begin and end position: declarations,
/// statements and type references alike.
pub trait AstNode {
    fn begin_loc(&self) -> SourceLocation;
    fn end_loc(&self) -> SourceLocation;
}

impl<T: AstNode + ?Sized> AstNode for &T {
    fn begin_loc(&self) -> SourceLocation {
        (**self).begin_loc()
    }

    fn end_loc(&self) -> SourceLocation {
        (**self).end_loc()
    }
}
