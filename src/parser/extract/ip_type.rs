use crate::parser::locate::{extract_run, Matcher, RunSpec};
use crate::report::IpTypeAttr;

const DATABASES: [&str; 5] = ["IPinfo", "ipregistry", "ipapi", "AbuseIPDB", "IP2LOCATION"];

/// Only the first three databases print a company type.
const COMPANY_TYPE_COLUMNS: usize = 3;

const USE_TYPE: RunSpec<String> = RunSpec {
    matcher: Matcher::Contains("使用类型："),
    arity: DATABASES.len(),
    transform: str::to_string,
};

const COMPANY_TYPE: RunSpec<String> = RunSpec {
    matcher: Matcher::Contains("公司类型："),
    arity: DATABASES.len(),
    transform: str::to_string,
};

/// One row per database, in catalog order, whether or not the rows were found.
pub fn extract(tokens: &[String]) -> Vec<IpTypeAttr> {
    let use_types = extract_run(tokens, &USE_TYPE, 0).unwrap_or_default();
    let company_types = extract_run(tokens, &COMPANY_TYPE, 0).unwrap_or_default();

    DATABASES
        .iter()
        .enumerate()
        .map(|(i, name)| IpTypeAttr {
            name: name.to_string(),
            use_type: use_types.get(i).cloned().unwrap_or_default(),
            company_type: if i < COMPANY_TYPE_COLUMNS {
                company_types.get(i).cloned().unwrap_or_default()
            } else {
                String::new()
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::locate::toks;

    #[test]
    fn columns_and_company_cutoff() {
        let t = toks(&[
            "使用类型：",
            "机房",
            "机房",
            "机房",
            "商业",
            "机房",
            "公司类型：",
            "机房",
            "商业",
            "机房",
            "ISP",
            "ISP",
        ]);
        let rows = extract(&t);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].name, "IPinfo");
        assert_eq!(rows[3].use_type, "商业");
        assert_eq!(rows[1].company_type, "商业");
        assert_eq!(rows[2].company_type, "机房");
        assert_eq!(rows[3].company_type, "");
        assert_eq!(rows[4].company_type, "");
    }

    #[test]
    fn missing_anchors_still_full_catalog() {
        let rows = extract(&toks(&["nothing here"]));
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.use_type.is_empty() && r.company_type.is_empty()));
        assert_eq!(rows[4].name, "IP2LOCATION");
    }

    #[test]
    fn short_tail_pads_empty() {
        let t = toks(&["使用类型：", "机房", "家宽"]);
        let rows = extract(&t);
        assert_eq!(rows[1].use_type, "家宽");
        assert_eq!(rows[2].use_type, "");
    }
}
