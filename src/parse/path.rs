use winnow::{
    Parser,
    combinator::{alt, delimited, repeat},
    error::{ContextError, ParseError},
    token::{take, take_while},
};

/// Splits a path template like `/users/{id}/posts/` into literal text and
/// `{name}` placeholder fragments, scanning left to right.
///
/// The grammar is total: a `{` that doesn't open a well-formed placeholder is
/// consumed as literal text, so any input produces a fragment list.
pub fn scan(template: &str) -> Vec<PathFragment<'_>> {
    let result: Result<Vec<PathFragment<'_>>, ParseError<&str, ContextError>> =
        repeat(0.., fragment).parse(template);
    result.unwrap_or_else(|_| vec![PathFragment::Literal(template)])
}

/// A fragment within a path template.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathFragment<'input> {
    /// Literal text.
    Literal(&'input str),
    /// Template placeholder name.
    Param(&'input str),
}

fn fragment<'a>(input: &mut &'a str) -> winnow::Result<PathFragment<'a>> {
    alt((param, literal)).parse_next(input)
}

fn param<'a>(input: &mut &'a str) -> winnow::Result<PathFragment<'a>> {
    delimited('{', take_while(1.., |c| c != '{' && c != '}'), '}')
        .map(PathFragment::Param)
        .parse_next(input)
}

fn literal<'a>(input: &mut &'a str) -> winnow::Result<PathFragment<'a>> {
    // The single-token fallback picks up a stray `{`.
    alt((take_while(1.., |c| c != '{'), take(1usize)))
        .map(PathFragment::Literal)
        .parse_next(input)
}
