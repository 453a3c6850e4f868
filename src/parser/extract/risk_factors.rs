use crate::parser::locate::{extract_run, Matcher, RunSpec};
use crate::report::RiskFactor;

const DATABASES: [&str; 8] = [
    "IP2LOCATION",
    "ipapi",
    "ipregistry",
    "IPQS",
    "SCAMALYTICS",
    "ipdata",
    "IPinfo",
    "IPWHOIS",
];

const YES: &str = "是";

fn flag(token: &str) -> u8 {
    u8::from(token == YES)
}

fn area(token: &str) -> String {
    token.replace(['[', ']'], "")
}

const fn flag_row(label: &'static str) -> RunSpec<u8> {
    RunSpec {
        matcher: Matcher::Contains(label),
        arity: DATABASES.len(),
        transform: flag,
    }
}

const AREA: RunSpec<String> = RunSpec {
    matcher: Matcher::Contains("地区："),
    arity: DATABASES.len(),
    transform: area,
};
const PROXY: RunSpec<u8> = flag_row("代理：");
const TOR: RunSpec<u8> = flag_row("Tor：");
const VPN: RunSpec<u8> = flag_row("VPN：");
const HOSTING: RunSpec<u8> = flag_row("服务器：");
const ABUSE: RunSpec<u8> = flag_row("滥用：");
const ROBOT: RunSpec<u8> = flag_row("机器人：");

/// The risk-factor table, one record per database column.
pub fn extract(tokens: &[String]) -> Vec<RiskFactor> {
    let areas = extract_run(tokens, &AREA, 0).unwrap_or_default();
    let row = |spec: &RunSpec<u8>| extract_run(tokens, spec, 0).unwrap_or_default();
    let proxy = row(&PROXY);
    let tor = row(&TOR);
    let vpn = row(&VPN);
    let hosting = row(&HOSTING);
    let abuse = row(&ABUSE);
    let robot = row(&ROBOT);

    let at = |values: &[u8], i: usize| values.get(i).copied().unwrap_or(0);

    DATABASES
        .iter()
        .enumerate()
        .map(|(i, name)| RiskFactor {
            name: name.to_string(),
            area: areas.get(i).cloned().unwrap_or_default(),
            is_proxy: at(&proxy, i),
            is_tor: at(&tor, i),
            is_vpn: at(&vpn, i),
            is_server: at(&hosting, i),
            is_abuse: at(&abuse, i),
            is_robot: at(&robot, i),
        })
        .collect()
}
