use crate::parser::locate::{locate, Matcher};
use crate::report::RiskScore;

// Exact labels: the same names appear inside other rows of the report.
const SERVICES: [&str; 6] = [
    "SCAMALYTICS：",
    "ipapi：",
    "AbuseIPDB：",
    "IPQS：",
    "Cloudflare：",
    "DB-IP：",
];

/// Scores for the services present in the report, in catalog order.
/// Services without both a code and a label are left out.
pub fn extract(tokens: &[String]) -> Vec<RiskScore> {
    SERVICES
        .iter()
        .filter_map(|&service| {
            let i = locate(tokens, Matcher::Exact(service), 0)?;
            let code = tokens.get(i + 1)?.as_str();
            let label = tokens.get(i + 2)?;
            Some(RiskScore {
                name: service.trim_end_matches('：').to_string(),
                code: code.strip_prefix('|').unwrap_or(code).trim().to_string(),
                label: label.trim().to_string(),
            })
        })
        .collect()
}
