use serde::{Deserialize, Serialize};

/// Structured form of one IP quality report. Field order is the serialized order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub ip: String,
    pub report_time: String,
    pub version: String,
    #[serde(rename = "as")]
    pub asn: String,
    pub organization: String,
    pub coordinate: String,
    pub map_url: String,
    pub city: String,
    pub use_address: String,
    pub reg_address: String,
    pub time_zone: String,
    pub ip_type: String,
    pub ip_type_attr: Vec<IpTypeAttr>,
    pub risk_score: Vec<RiskScore>,
    pub risk_factors: Vec<RiskFactor>,
    pub stream_unlock: Vec<StreamUnlock>,
    pub mail_25port: String,
    pub ip_blacklist: IpBlacklist,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpTypeAttr {
    pub name: String,
    pub use_type: String,
    pub company_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    pub name: String,
    pub code: String,
    pub label: String,
}

/// Per-database risk flags. Flags are 0/1 integers on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub area: String,
    #[serde(rename = "isProxy")]
    pub is_proxy: u8,
    #[serde(rename = "isTor")]
    pub is_tor: u8,
    #[serde(rename = "isVPN")]
    pub is_vpn: u8,
    #[serde(rename = "isServer")]
    pub is_server: u8,
    // Misspelled key is what existing clients read.
    #[serde(rename = "isAubse")]
    pub is_abuse: u8,
    #[serde(rename = "isRobot")]
    pub is_robot: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamUnlock {
    pub name: String,
    /// Unlock status as printed in the report.
    #[serde(rename = "service")]
    pub status: String,
    pub area: String,
    pub method: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpBlacklist {
    pub valid: u64,
    pub normal: u64,
    pub marked: u64,
    pub blacklist: u64,
}
