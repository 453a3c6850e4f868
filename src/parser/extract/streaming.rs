//! Streaming-service unlock table.
//!
//! The table is printed as four rows: service names, statuses, regions and
//! methods. Regions and methods are only printed for services that are
//! reachable, so they are consumed as pools rather than indexed by column.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::locate::{locate, next, run, Matcher};
use crate::report::StreamUnlock;

static REGION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([A-Z]{2})\]").unwrap());

const SERVICE_LABEL: Matcher = Matcher::Contains("服务商：");
const STATUS_LABEL: Matcher = Matcher::Contains("状态：");
const REGION_LABEL: Matcher = Matcher::Contains("地区：");
const METHOD_LABEL: Matcher = Matcher::Contains("方式：");

/// Statuses that come with a region and a method.
const AVAILABLE: [&str; 3] = ["解锁", "仅自制", "待支持"];

const ENCODED_PLUS: &str = "&#43;";
const LABEL_DELIMITER: char = '：';

/// Parsing state threaded through the chained row lookups.
#[derive(Debug)]
pub struct StreamContext<'a> {
    tokens: &'a [String],
    /// Next index a row label may be found at.
    cursor: usize,
    pub region_cursor: usize,
    pub method_cursor: usize,
}

impl<'a> StreamContext<'a> {
    pub fn new(tokens: &'a [String]) -> Self {
        Self {
            tokens,
            cursor: 0,
            region_cursor: 0,
            method_cursor: 0,
        }
    }

    /// Find the next row label strictly after the previous one found.
    /// A missing label leaves the cursor where it was.
    fn seek(&mut self, label: Matcher) -> Option<usize> {
        let i = locate(self.tokens, label, self.cursor)?;
        self.cursor = i + 1;
        Some(i)
    }

    fn services(&mut self) -> Vec<String> {
        let anchor = self.seek(SERVICE_LABEL);
        next(self.tokens, anchor)
            .map(|line| {
                line.split_whitespace()
                    .map(|s| s.replace(ENCODED_PLUS, "+"))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn statuses(&mut self, count: usize) -> Vec<String> {
        let anchor = self.seek(STATUS_LABEL);
        let blank = |t: &str| t.trim().is_empty();
        run(self.tokens, anchor, count, Some(&blank))
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn region_pool(&mut self) -> Vec<String> {
        let anchor = self.seek(REGION_LABEL);
        next(self.tokens, anchor)
            .map(|line| {
                REGION_RE
                    .captures_iter(line)
                    .map(|c| c[1].to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn method_pool(&mut self) -> Vec<String> {
        let anchor = self.seek(METHOD_LABEL);
        let delimiter = |t: &str| t.trim().is_empty() || t.contains(LABEL_DELIMITER);
        run(self.tokens, anchor, usize::MAX, Some(&delimiter))
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Region and method for one status. Available statuses draw the next
    /// entry from each pool; any other status gets nothing and leaves both
    /// cursors where they are.
    pub fn assign(
        &mut self,
        status: &str,
        regions: &[String],
        methods: &[String],
    ) -> (String, String) {
        if !AVAILABLE.contains(&status) {
            return (String::new(), String::new());
        }
        let region = regions.get(self.region_cursor).cloned().unwrap_or_default();
        let method = methods.get(self.method_cursor).cloned().unwrap_or_default();
        self.region_cursor += 1;
        self.method_cursor += 1;
        (region, method)
    }
}

pub fn extract(tokens: &[String]) -> Vec<StreamUnlock> {
    let mut ctx = StreamContext::new(tokens);
    let services = ctx.services();
    let statuses = ctx.statuses(services.len());
    let regions = ctx.region_pool();
    let methods = ctx.method_pool();

    let assigned: Vec<(String, String)> = statuses
        .iter()
        .map(|status| ctx.assign(status, &regions, &methods))
        .collect();

    services
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let (area, method) = assigned.get(i).cloned().unwrap_or_default();
            StreamUnlock {
                name,
                status: statuses.get(i).cloned().unwrap_or_default(),
                area,
                method,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::locate::toks;

    /// Flatten label-led rows into one token stream.
    fn table(rows: &[&[&str]]) -> Vec<String> {
        toks(&rows.concat())
    }

    fn pair(area: &str, method: &str) -> (String, String) {
        (area.to_string(), method.to_string())
    }

    #[test]
    fn unavailable_status_does_not_advance_pools() {
        let tokens: Vec<String> = Vec::new();
        let mut ctx = StreamContext::new(&tokens);
        let regions = toks(&["US"]);
        let methods = toks(&["DNS"]);

        assert_eq!(ctx.assign("解锁", &regions, &methods), pair("US", "DNS"));
        assert_eq!(ctx.assign("屏蔽", &regions, &methods), pair("", ""));
        assert_eq!(ctx.region_cursor, 1);
        assert_eq!(ctx.method_cursor, 1);
    }

    #[test]
    fn exhausted_pool_still_advances() {
        let tokens: Vec<String> = Vec::new();
        let mut ctx = StreamContext::new(&tokens);
        let regions = toks(&["US", "JP"]);
        let methods = toks(&["原生"]);

        ctx.assign("仅自制", &regions, &methods);
        assert_eq!(ctx.assign("待支持", &regions, &methods), pair("JP", ""));
        assert_eq!(ctx.method_cursor, 2);
    }

    #[test]
    fn netflix_disney() {
        let t = table(&[
            &["服务商：", "Netflix Disney&#43;"],
            &["状态：", "解锁", "屏蔽"],
            &["地区：", "[US]"],
            &["方式：", "DNS"],
        ]);
        let rows = extract(&t);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            StreamUnlock {
                name: "Netflix".into(),
                status: "解锁".into(),
                area: "US".into(),
                method: "DNS".into(),
            }
        );
        assert_eq!(rows[1].name, "Disney+");
        assert_eq!(rows[1].status, "屏蔽");
        assert_eq!(rows[1].area, "");
        assert_eq!(rows[1].method, "");
    }

    #[test]
    fn third_available_draws_second_pool_entry() {
        let t = table(&[
            &["服务商：", "A B C"],
            &["状态：", "解锁", "失败", "待支持"],
            &["地区：", "[US] [JP]"],
            &["方式：", "原生", "DNS", "邮局连通性："],
        ]);
        let rows = extract(&t);
        assert_eq!(rows[2].area, "JP");
        assert_eq!(rows[2].method, "DNS");
    }

    #[test]
    fn row_labels_found_after_previous_row() {
        // The risk-factor table's "地区：" comes first and must be skipped.
        let t = table(&[
            &["地区：", "[CN]", "[CN]"],
            &["状态：", "bogus"],
            &["服务商：", "Netflix YouTube"],
            &["状态：", "解锁", "解锁"],
            &["地区：", "[HK] [SG]"],
            &["方式：", "原生", "原生"],
        ]);
        let rows = extract(&t);
        assert_eq!(rows[0].status, "解锁");
        assert_eq!(rows[0].area, "HK");
        assert_eq!(rows[1].area, "SG");
        assert_eq!(rows[1].method, "原生");
    }

    #[test]
    fn missing_region_row_keeps_searching_forward() {
        // Without a "地区：" row the method row is still looked up after the
        // status row, never before the service row.
        let t = table(&[
            &["方式：", "stale"],
            &["服务商：", "Netflix"],
            &["状态：", "解锁"],
            &["方式：", "DNS"],
        ]);
        let rows = extract(&t);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].area, "");
        assert_eq!(rows[0].method, "DNS");
    }

    #[test]
    fn statuses_capped_by_service_count() {
        let t = table(&[
            &["服务商：", "Netflix"],
            &["状态：", "解锁", "解锁"],
            &["地区：", "[US]"],
        ]);
        let rows = extract(&t);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].method, "");
    }

    #[test]
    fn fewer_statuses_than_services() {
        let t = table(&[&["服务商：", "Netflix TikTok ChatGPT"], &["状态：", "解锁"]]);
        let rows = extract(&t);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].status, "");
        assert_eq!(rows[2].area, "");
    }

    #[test]
    fn region_codes_only_bracketed_pairs() {
        let t = table(&[
            &["服务商：", "A B C"],
            &["状态：", "解锁", "解锁", "解锁"],
            &["地区：", "[US] US [usa] [GBR] [DE]"],
        ]);
        let rows = extract(&t);
        assert_eq!(rows[0].area, "US");
        assert_eq!(rows[1].area, "DE");
        assert_eq!(rows[2].area, "");
    }

    #[test]
    fn no_service_row() {
        assert!(extract(&toks(&["状态：", "解锁"])).is_empty());
    }
}
