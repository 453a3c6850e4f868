//! Anchor search over the token stream.
//!
//! Every extractor works the same way: find a label token (the anchor), then
//! read the value(s) printed right after it. Labels are not unique in the
//! report, so lookups take an explicit start index.

/// How an anchor token is recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Token contains the label.
    Contains(&'static str),
    /// Token is exactly the label.
    Exact(&'static str),
}

impl Matcher {
    pub fn matches(&self, token: &str) -> bool {
        match self {
            Matcher::Contains(label) => token.contains(label),
            Matcher::Exact(label) => token == *label,
        }
    }
}

/// First index at or after `from` whose token satisfies `matcher`.
pub fn locate(tokens: &[String], matcher: Matcher, from: usize) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, t)| matcher.matches(t))
        .map(|(i, _)| i)
}

/// Token right after the anchor. `None` if the anchor is missing or last.
pub fn next(tokens: &[String], anchor: Option<usize>) -> Option<&str> {
    anchor
        .and_then(|i| tokens.get(i + 1))
        .map(String::as_str)
}

/// Up to `max` non-empty tokens after the anchor.
///
/// Stops early at the end of the stream or at the first token accepted by
/// `stop`, which is not included.
pub fn run<'a>(
    tokens: &'a [String],
    anchor: Option<usize>,
    max: usize,
    stop: Option<&dyn Fn(&str) -> bool>,
) -> Vec<&'a str> {
    let Some(anchor) = anchor else {
        return Vec::new();
    };
    let mut values = Vec::new();
    for t in tokens.iter().skip(anchor + 1) {
        if values.len() >= max {
            break;
        }
        if stop.is_some_and(|f| f(t.as_str())) {
            break;
        }
        if !t.trim().is_empty() {
            values.push(t.trim());
        }
    }
    values
}

/// A field described as data: which anchor, how many values, how to convert each.
pub struct RunSpec<T> {
    pub matcher: Matcher,
    pub arity: usize,
    pub transform: fn(&str) -> T,
}

/// Locate `spec.matcher` from `from` and convert the run that follows it.
/// `None` means the anchor was not found; `Some(vec![])` means it was found
/// with nothing after it.
pub fn extract_run<T>(tokens: &[String], spec: &RunSpec<T>, from: usize) -> Option<Vec<T>> {
    let anchor = locate(tokens, spec.matcher, from)?;
    Some(
        run(tokens, Some(anchor), spec.arity, None)
            .into_iter()
            .map(spec.transform)
            .collect(),
    )
}

#[cfg(test)]
pub(crate) fn toks(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
