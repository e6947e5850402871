use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::query::DataType;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityMatch {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DataType,
}

struct SearchGroup {
    key: &'static str,
    members: &'static [(&'static str, &'static str, DataType)],
}

const SEARCH_GROUPS: &[SearchGroup] = &[
    SearchGroup {
        key: "茅台",
        members: &[
            ("600519.SH", "贵州茅台", DataType::Stock),
            ("000858.SZ", "五粮液", DataType::Stock),
        ],
    },
    SearchGroup {
        key: "银行",
        members: &[
            ("000001.SZ", "平安银行", DataType::Stock),
            ("600036.SH", "招商银行", DataType::Stock),
            ("601398.SH", "工商银行", DataType::Stock),
        ],
    },
];

/// Looks `keyword` up in the built-in security groups. A group matches when
/// its key occurs anywhere in the keyword.
pub fn search_securities(keyword: &str) -> Vec<SecurityMatch> {
    SEARCH_GROUPS
        .iter()
        .filter(|group| keyword.contains(group.key))
        .flat_map(|group| group.members.iter())
        .map(|(code, name, kind)| SecurityMatch {
            code: (*code).to_string(),
            name: (*name).to_string(),
            kind: *kind,
        })
        .collect()
}

/// data type -> category -> field names
pub type IndicatorTree = BTreeMap<DataType, BTreeMap<&'static str, Vec<&'static str>>>;

pub fn indicator_tree() -> IndicatorTree {
    let mut tree = IndicatorTree::new();

    tree.insert(
        DataType::Stock,
        BTreeMap::from([
            ("price", vec!["open", "high", "low", "close", "volume", "amt"]),
            ("valuation", vec!["pe_ttm", "pb_lf", "ps_ttm", "pcf_ttm"]),
            ("financial", vec!["or_ttm", "np_ttm", "roe_ttm", "roa_ttm"]),
            ("technical", vec!["ma5", "ma10", "ma20", "rsi", "macd"]),
        ]),
    );
    tree.insert(
        DataType::Bond,
        BTreeMap::from([
            ("yield", vec!["yield_to_maturity", "duration", "convexity"]),
            ("rating", vec!["credit_rating", "rating_outlook"]),
        ]),
    );
    tree.insert(
        DataType::Fund,
        BTreeMap::from([
            ("nav", vec!["unit_nav", "accum_nav", "nav_date"]),
            (
                "performance",
                vec!["return_1m", "return_3m", "return_1y", "max_drawdown"],
            ),
        ]),
    );

    tree
}
