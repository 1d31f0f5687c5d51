use crate::ast::{AstNode, MacroExpansionArgument, MacroExpansionNode, Token};
use crate::location::{LocationResolver, SpellingRange};

/// Check whether `node`'s spelling span begins and ends on a boundary of
/// `expansion`.
///
/// Each edge is matched independently: it may sit on the corresponding edge
/// of the replacement list or of any non-empty argument. A node can begin
/// where an argument begins and end where the macro body ends.
pub fn aligns_with_expansion<N, R>(node: &N, resolver: &R, expansion: &MacroExpansionNode) -> bool
where
    N: AstNode + ?Sized,
    R: LocationResolver + ?Sized,
{
    let Some(node_range) = SpellingRange::resolve(resolver, node.begin_loc(), node.end_loc())
    else {
        return false;
    };
    let spelled = |token: &Token| resolver.spelling_loc(token.location());

    let def_begin = spelled(expansion.definition_begin());
    let def_end = spelled(expansion.definition_end());

    let begins = def_begin == Some(node_range.begin)
        || expansion
            .arguments()
            .iter()
            .filter_map(MacroExpansionArgument::first)
            .any(|token| spelled(token) == Some(node_range.begin));

    let ends = def_end == Some(node_range.end)
        || expansion
            .arguments()
            .iter()
            .filter_map(MacroExpansionArgument::last)
            .any(|token| spelled(token) == Some(node_range.end));

    begins && ends
}

/// Check whether `node` spans exactly the range of `tokens` and every token
/// is spelled inside that range.
///
/// An empty token list never matches.
pub fn is_spelled_from_tokens<N, R>(node: &N, resolver: &R, tokens: &[Token]) -> bool
where
    N: AstNode + ?Sized,
    R: LocationResolver + ?Sized,
{
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return false;
    };
    let Some(range) = SpellingRange::resolve(resolver, node.begin_loc(), node.end_loc()) else {
        return false;
    };
    let spelled = |token: &Token| resolver.spelling_loc(token.location());

    if spelled(first) != Some(range.begin) || spelled(last) != Some(range.end) {
        return false;
    }

    tokens
        .iter()
        .all(|token| spelled(token).is_some_and(|loc| range.fully_contains(loc)))
}

/// A predicate a tree walk can apply to each candidate node
pub trait NodeMatcher {
    fn matches(&self, node: &dyn AstNode) -> bool;
}

/// Keep the nodes `matcher` accepts, in iteration order
pub fn filter_matches<'n, M, N>(matcher: &M, nodes: impl IntoIterator<Item = &'n N>) -> Vec<&'n N>
where
    M: NodeMatcher + ?Sized,
    N: AstNode + 'n,
{
    nodes
        .into_iter()
        .filter(|node| matcher.matches(*node))
        .collect()
}

/// [`aligns_with_expansion`] bound to one resolver and expansion record
pub struct AlignsWithExpansion<'a, R: ?Sized> {
    resolver: &'a R,
    expansion: &'a MacroExpansionNode,
}

impl<'a, R: LocationResolver + ?Sized> AlignsWithExpansion<'a, R> {
    pub fn new(resolver: &'a R, expansion: &'a MacroExpansionNode) -> Self {
        Self {
            resolver,
            expansion,
        }
    }
}

impl<R: LocationResolver + ?Sized> NodeMatcher for AlignsWithExpansion<'_, R> {
    fn matches(&self, node: &dyn AstNode) -> bool {
        aligns_with_expansion(node, self.resolver, self.expansion)
    }
}

/// [`is_spelled_from_tokens`] bound to one resolver and token list
pub struct IsSpelledFromTokens<'a, R: ?Sized> {
    resolver: &'a R,
    tokens: &'a [Token],
}

impl<'a, R: LocationResolver + ?Sized> IsSpelledFromTokens<'a, R> {
    pub fn new(resolver: &'a R, tokens: &'a [Token]) -> Self {
        Self { resolver, tokens }
    }
}

impl<R: LocationResolver + ?Sized> NodeMatcher for IsSpelledFromTokens<'_, R> {
    fn matches(&self, node: &dyn AstNode) -> bool {
        is_spelled_from_tokens(node, self.resolver, self.tokens)
    }
}
