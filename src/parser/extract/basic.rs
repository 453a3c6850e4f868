use std::sync::LazyLock;

use regex::Regex;

use crate::parser::locate::{locate, next, Matcher};

static TIME_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"报告时间：([^脚]+)脚本版本：(.+)$").unwrap());

const IP_LABEL: &str = "IP质量体检报告：";
const TIME_LABEL: &str = "报告时间：";

/// Single-value fields. `None` means the label never appeared.
#[derive(Debug, Default, PartialEq)]
pub struct BasicInfo {
    pub ip: Option<String>,
    pub report_time: Option<String>,
    pub version: Option<String>,
    pub asn: Option<String>,
    pub organization: Option<String>,
    pub coordinate: Option<String>,
    pub map_url: Option<String>,
    pub city: Option<String>,
    pub use_address: Option<String>,
    pub reg_address: Option<String>,
    pub time_zone: Option<String>,
    pub ip_type: Option<String>,
    pub mail_25port: Option<String>,
}

pub fn extract(tokens: &[String]) -> BasicInfo {
    let value = |label: &'static str| {
        next(tokens, locate(tokens, Matcher::Contains(label), 0)).map(str::to_string)
    };
    let (report_time, version) = report_time_and_version(tokens)
        .map(|(t, v)| (Some(t), Some(v)))
        .unwrap_or((None, None));

    BasicInfo {
        ip: value(IP_LABEL),
        report_time,
        version,
        asn: value("自治系统号："),
        organization: value("组织："),
        coordinate: value("坐标："),
        map_url: value("地图："),
        city: value("城市："),
        use_address: value("使用地："),
        reg_address: value("注册地："),
        time_zone: value("时区："),
        ip_type: value("IP类型："),
        mail_25port: value("本地25端口："),
    }
}

/// Both halves of "报告时间：<time>脚本版本：<version>", or neither.
fn report_time_and_version(tokens: &[String]) -> Option<(String, String)> {
    let i = locate(tokens, Matcher::Contains(TIME_LABEL), 0)?;
    let caps = TIME_VERSION_RE.captures(&tokens[i])?;
    Some((caps[1].trim().to_string(), caps[2].trim().to_string()))
}
