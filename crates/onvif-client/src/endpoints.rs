use std::collections::HashMap;

use crate::error::{OnvifError, Result};

/// 服务端点表
/// 键为小写服务类别名，值为服务地址；插入时统一转小写
#[derive(Debug, Clone, Default)]
pub struct EndpointTable {
    entries: HashMap<String, String>,
}

impl EndpointTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以四个默认端点初始化
    /// 不同厂商设备（如 Events/EVENTS/events）键大小写不一，统一小写后查找
    pub fn with_defaults(address: &str) -> Self {
        let mut table = Self::new();
        table.insert("device", &format!("http://{}/onvif/device_service", address));
        table.insert("search", &format!("http://{}/onvif/Search_service", address));
        table.insert(
            "recording",
            &format!("http://{}/onvif/recording_service", address),
        );
        table.insert("replay", &format!("http://{}/onvif/replay_service", address));
        table
    }

    /// 插入端点；同名覆盖
    pub fn insert(&mut self, name: &str, url: &str) {
        self.entries.insert(name.to_lowercase(), url.to_string());
    }

    /// 解析服务端点
    /// 先精确匹配（大小写不敏感）。未命中时做子串模糊匹配，
    /// 覆盖 event/events、analytic/analytics 这类键名差异；
    /// 多个键命中时取最短键，同长取字典序最小，保证结果确定。
    pub fn resolve(&self, name: &str) -> Result<String> {
        let key = name.to_lowercase();
        if let Some(url) = self.entries.get(&key) {
            return Ok(url.clone());
        }

        self.entries
            .keys()
            .filter(|k| k.contains(&key))
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
            .map(|k| self.entries[k].clone())
            .ok_or_else(|| OnvifError::EndpointNotFound(name.to_string()))
    }

    /// 当前全部端点
    pub fn entries(&self) -> &HashMap<String, String> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_seeded() {
        let table = EndpointTable::with_defaults("10.0.0.5");
        assert_eq!(table.len(), 4);
        assert_eq!(
            table.resolve("device").unwrap(),
            "http://10.0.0.5/onvif/device_service"
        );
        assert_eq!(
            table.resolve("search").unwrap(),
            "http://10.0.0.5/onvif/Search_service"
        );
        assert_eq!(
            table.resolve("recording").unwrap(),
            "http://10.0.0.5/onvif/recording_service"
        );
        assert_eq!(
            table.resolve("replay").unwrap(),
            "http://10.0.0.5/onvif/replay_service"
        );
    }

    #[test]
    fn test_insert_normalizes_key_and_overwrites() {
        let mut table = EndpointTable::new();
        table.insert("Events", "http://cam/onvif/old");
        table.insert("EVENTS", "http://cam/onvif/event_service");

        assert_eq!(table.len(), 1);
        assert_eq!(
            table.resolve("events").unwrap(),
            "http://cam/onvif/event_service"
        );
    }

    #[test]
    fn test_exact_match_wins_over_fuzzy() {
        let mut table = EndpointTable::new();
        table.insert("event", "http://cam/onvif/exact");
        table.insert("events", "http://cam/onvif/fuzzy");

        assert_eq!(table.resolve("event").unwrap(), "http://cam/onvif/exact");
    }

    #[test]
    fn test_fuzzy_match_by_substring() {
        let mut table = EndpointTable::new();
        table.insert("events", "http://cam/onvif/event_service");

        assert_eq!(
            table.resolve("event").unwrap(),
            "http://cam/onvif/event_service"
        );
    }

    #[test]
    fn test_fuzzy_tie_break_is_deterministic() {
        let mut table = EndpointTable::new();
        table.insert("analyticsdevice", "http://cam/onvif/long");
        table.insert("analytics", "http://cam/onvif/short");

        // 最短键优先
        assert_eq!(table.resolve("analytic").unwrap(), "http://cam/onvif/short");

        let mut table = EndpointTable::new();
        table.insert("media2", "http://cam/onvif/media2");
        table.insert("media1", "http://cam/onvif/media1");

        // 同长取字典序最小
        assert_eq!(table.resolve("medi").unwrap(), "http://cam/onvif/media1");
    }

    #[test]
    fn test_resolve_unknown_fails() {
        let table = EndpointTable::with_defaults("10.0.0.5");
        let err = table.resolve("imaging").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
