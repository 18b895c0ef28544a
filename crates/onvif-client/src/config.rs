use std::time::Duration;

use serde::Deserialize;

/// HTTP 客户端配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// 请求超时（毫秒）
    pub timeout_ms: u64,
    /// 接受自签名证书；摄像机常见
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            accept_invalid_certs: false,
        }
    }
}

impl ClientConfig {
    pub(crate) fn build_http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_millis(self.timeout_ms))
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_ms, 10_000);
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_build_http_client() {
        let config = ClientConfig {
            timeout_ms: 500,
            accept_invalid_certs: true,
        };
        assert!(config.build_http_client().is_ok());
    }
}
