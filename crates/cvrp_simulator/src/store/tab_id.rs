use std::fmt::Display;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

pub const MAP_TAB_ID: &str = "map";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultTabId(String);

impl ResultTabId {
    pub fn new(created_at: Timestamp, run_number: u64) -> Self {
        ResultTabId(format!(
            "result-{}-{}",
            created_at.as_millisecond(),
            run_number
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ResultTabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResultTabId {
    fn from(value: &str) -> Self {
        ResultTabId(value.to_owned())
    }
}

/// The map tab always exists and cannot be closed; every other tab shows one
/// registered result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TabId {
    Map,
    Result(ResultTabId),
}

impl TabId {
    pub fn is_map(&self) -> bool {
        matches!(self, TabId::Map)
    }

    pub fn as_result(&self) -> Option<&ResultTabId> {
        match self {
            TabId::Map => None,
            TabId::Result(id) => Some(id),
        }
    }
}

impl Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TabId::Map => f.write_str(MAP_TAB_ID),
            TabId::Result(id) => id.fmt(f),
        }
    }
}

impl From<String> for TabId {
    fn from(value: String) -> Self {
        if value == MAP_TAB_ID {
            TabId::Map
        } else {
            TabId::Result(ResultTabId(value))
        }
    }
}

impl From<TabId> for String {
    fn from(value: TabId) -> Self {
        value.to_string()
    }
}

impl From<ResultTabId> for TabId {
    fn from(value: ResultTabId) -> Self {
        TabId::Result(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDirection {
    Next,
    Previous,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_tab_id_format() {
        let created_at = Timestamp::from_millisecond(1_700_000_000_123).unwrap();

        assert_eq!(
            ResultTabId::new(created_at, 7).as_str(),
            "result-1700000000123-7"
        );
    }

    #[test]
    fn test_tab_id_serializes_as_plain_string() {
        assert_eq!(serde_json::to_value(TabId::Map).unwrap(), "map");
        assert_eq!(
            serde_json::to_value(TabId::from(ResultTabId::from("result-1-1"))).unwrap(),
            "result-1-1"
        );

        let parsed: TabId = serde_json::from_str("\"map\"").unwrap();
        assert!(parsed.is_map());
        let parsed: TabId = serde_json::from_str("\"result-5-2\"").unwrap();
        assert_eq!(parsed.as_result().map(ResultTabId::as_str), Some("result-5-2"));
    }
}
