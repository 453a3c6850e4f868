pub mod basic;
pub mod blacklist;
pub mod ip_type;
pub mod risk_factors;
pub mod risk_score;
pub mod streaming;

use crate::report::Report;

/// Run every extractor over the same token stream and merge the results.
/// Anything not found falls back to an empty string, zero or empty list.
pub fn extract_all(tokens: &[String]) -> Report {
    let basic = basic::extract(tokens);

    Report {
        ip: basic.ip.unwrap_or_default(),
        report_time: basic.report_time.unwrap_or_default(),
        version: basic.version.unwrap_or_default(),
        asn: basic.asn.unwrap_or_default(),
        organization: basic.organization.unwrap_or_default(),
        coordinate: basic.coordinate.unwrap_or_default(),
        map_url: basic.map_url.unwrap_or_default(),
        city: basic.city.unwrap_or_default(),
        use_address: basic.use_address.unwrap_or_default(),
        reg_address: basic.reg_address.unwrap_or_default(),
        time_zone: basic.time_zone.unwrap_or_default(),
        ip_type: basic.ip_type.unwrap_or_default(),
        ip_type_attr: ip_type::extract(tokens),
        risk_score: risk_score::extract(tokens),
        risk_factors: risk_factors::extract(tokens),
        stream_unlock: streaming::extract(tokens),
        mail_25port: basic.mail_25port.unwrap_or_default(),
        ip_blacklist: blacklist::extract(tokens).unwrap_or_default(),
    }
}

// ── Tests ──
