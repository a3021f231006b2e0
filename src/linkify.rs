use std::sync::LazyLock;

use regex::Regex;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"((http|https)://\S+)").expect("url pattern compiles"));

/// A run of message text: either plain content or an http(s) link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Link(String),
}

impl Span {
    pub fn as_str(&self) -> &str {
        match self {
            Span::Text(text) | Span::Link(text) => text,
        }
    }
}

/// Split message text into plain and link spans, in order. Concatenating
/// the spans' raw text reproduces the input exactly; rendering decides how
/// each kind is displayed.
pub fn split(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for found in URL_PATTERN.find_iter(text) {
        if found.start() > cursor {
            spans.push(Span::Text(text[cursor..found.start()].to_string()));
        }
        spans.push(Span::Link(found.as_str().to_string()));
        cursor = found.end();
    }

    if cursor < text.len() {
        spans.push(Span::Text(text[cursor..].to_string()));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(spans: &[Span]) -> String {
        spans.iter().map(Span::as_str).collect()
    }

    #[test]
    fn text_without_urls_is_a_single_plain_span() {
        let spans = split("hi @alice");
        assert_eq!(spans, vec![Span::Text("hi @alice".to_string())]);
    }

    #[test]
    fn urls_become_link_spans() {
        let spans = split("see http://example.com");
        assert_eq!(
            spans,
            vec![
                Span::Text("see ".to_string()),
                Span::Link("http://example.com".to_string()),
            ]
        );
    }

    #[test]
    fn https_and_multiple_occurrences_are_all_wrapped() {
        let spans = split("a https://one.test b http://two.test/x?q=1 c");
        let links: Vec<_> = spans
            .iter()
            .filter(|span| matches!(span, Span::Link(_)))
            .map(Span::as_str)
            .collect();
        assert_eq!(links, vec!["https://one.test", "http://two.test/x?q=1"]);
    }

    #[test]
    fn concatenation_reproduces_the_input() {
        for input in [
            "",
            "plain",
            "http://a.test",
            "x http://a.test",
            "http://a.test y",
            "x http://a.test y https://b.test z",
        ] {
            assert_eq!(joined(&split(input)), input);
        }
    }

    #[test]
    fn url_runs_to_the_next_whitespace() {
        let spans = split("go http://a.test/path,still?q=1 now");
        assert_eq!(
            spans[1],
            Span::Link("http://a.test/path,still?q=1".to_string())
        );
    }

    #[test]
    fn empty_input_yields_no_spans() {
        assert!(split("").is_empty());
    }
}
