use std::sync::LazyLock;

use regex::Regex;

use crate::parser::locate::{locate, Matcher};
use crate::report::IpBlacklist;

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

const LABEL: Matcher = Matcher::Contains("IP地址黑名单数据库：");
const WINDOW: usize = 10;

/// Blacklist counters, or `None` if the label is missing or fewer than four
/// numbers follow it.
pub fn extract(tokens: &[String]) -> Option<IpBlacklist> {
    let anchor = locate(tokens, LABEL, 0)?;
    let numbers: Vec<u64> = tokens[anchor..]
        .iter()
        .take(WINDOW)
        .flat_map(|t| NUMBER_RE.find_iter(t))
        .map(|m| m.as_str().parse().unwrap_or(u64::MAX))
        .collect();

    match numbers[..] {
        [valid, normal, marked, blacklist, ..] => Some(IpBlacklist {
            valid,
            normal,
            marked,
            blacklist,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::locate::toks;

    #[test]
    fn four_numbers() {
        let t = toks(&["IP地址黑名单数据库：", "100", "50", "30", "5"]);
        assert_eq!(
            extract(&t),
            Some(IpBlacklist {
                valid: 100,
                normal: 50,
                marked: 30,
                blacklist: 5,
            })
        );
    }

    #[test]
    fn numbers_embedded_in_labels() {
        let t = toks(&[
            "IP地址黑名单数据库：",
            "有效 439",
            "正常 421 已标记 17",
            "黑名单 1",
        ]);
        assert_eq!(
            extract(&t),
            Some(IpBlacklist {
                valid: 439,
                normal: 421,
                marked: 17,
                blacklist: 1,
            })
        );
    }

    #[test]
    fn only_ascii_digits_count() {
        let t = toks(&[
            "IP地址黑名单数据库：",
            "有效 １２",
            "正常 ٣",
            "8",
            "6",
            "4",
            "2",
        ]);
        assert_eq!(
            extract(&t),
            Some(IpBlacklist {
                valid: 8,
                normal: 6,
                marked: 4,
                blacklist: 2,
            })
        );
    }

    #[test]
    fn oversized_number_saturates() {
        let t = toks(&["IP地址黑名单数据库：", "99999999999999999999", "1", "2", "3"]);
        assert_eq!(extract(&t).map(|b| b.valid), Some(u64::MAX));
    }

    #[test]
    fn too_few_numbers() {
        let t = toks(&["IP地址黑名单数据库：", "100", "50"]);
        assert_eq!(extract(&t), None);
    }

    #[test]
    fn window_is_ten_tokens() {
        let mut items = vec!["IP地址黑名单数据库："];
        items.extend(["-"; 6]);
        items.extend(["1", "2", "3", "4"]);
        // Anchor + 6 fillers + 3 numbers fill the window; "4" falls outside
        assert_eq!(extract(&toks(&items)), None);
    }

    #[test]
    fn missing_anchor() {
        assert_eq!(extract(&toks(&["100", "50", "30", "5"])), None);
    }
}
