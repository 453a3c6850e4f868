pub mod extract;
pub mod locate;
pub mod tokens;

use tracing::debug;

use crate::report::Report;

/// Two-stage pipeline: SVG markup → tokens → report.
pub fn parse_svg(markup: &str) -> Report {
    let tokens = tokens::tokenize(markup);
    debug!(tokens = tokens.len(), "tokenized report");
    extract::extract_all(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reparse_is_byte_identical() {
        let svg = std::fs::read_to_string("tests/fixtures/report.svg").unwrap();
        let a = serde_json::to_string_pretty(&parse_svg(&svg)).unwrap();
        let b = serde_json::to_string_pretty(&parse_svg(&svg)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn serialized_round_trip() {
        let svg = std::fs::read_to_string("tests/fixtures/report.svg").unwrap();
        let report = parse_svg(&svg);
        let json = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn garbage_markup_is_empty_report() {
        let report = parse_svg("<svg><rect/></svg>");
        assert_eq!(report.ip, "");
        assert_eq!(report.risk_factors.len(), 8);
    }
}
