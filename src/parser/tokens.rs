use std::sync::LazyLock;

use regex::Regex;

static TSPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<tspan[^>]*>(.*?)</tspan>").unwrap());

/// Pull the visible text out of every `<tspan>` in document order.
///
/// Contents are trimmed and empty ones dropped. Entities stay encoded; the
/// extractors that care about them decode what they need.
pub fn tokenize(markup: &str) -> Vec<String> {
    TSPAN_RE
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim()))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_order() {
        let svg = r#"<svg><text><tspan x="1">A</tspan><tspan y="2">B</tspan></text><tspan>C</tspan></svg>"#;
        assert_eq!(tokenize(svg), vec!["A", "B", "C"]);
    }

    #[test]
    fn trims_and_drops_blank() {
        let svg = "<tspan>  IP类型：  </tspan><tspan>   </tspan><tspan>\n\t</tspan><tspan> 机房 </tspan>";
        assert_eq!(tokenize(svg), vec!["IP类型：", "机房"]);
    }

    #[test]
    fn multiline_content() {
        let svg = "<tspan class=\"a\">\n  line\n</tspan>";
        assert_eq!(tokenize(svg), vec!["line"]);
    }

    #[test]
    fn entities_untouched() {
        let svg = "<tspan>Netflix Disney&#43;</tspan>";
        assert_eq!(tokenize(svg), vec!["Netflix Disney&#43;"]);
    }

    #[test]
    fn malformed_markup() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("<svg><tspan>never closed").is_empty());
        // Unclosed leading tspan swallows up to the next close tag
        assert_eq!(tokenize("<tspan>a<tspan>b</tspan>"), vec!["a<tspan>b"]);
    }

    #[test]
    fn fixture_token_count() {
        let svg = std::fs::read_to_string("tests/fixtures/report.svg").unwrap();
        let tokens = tokenize(&svg);
        assert!(tokens.iter().all(|t| !t.is_empty() && t.trim() == t));
        assert_eq!(tokens.first().map(String::as_str), Some("IP质量体检报告："));
    }
}
