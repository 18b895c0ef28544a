use serde::Serialize;

use crate::OnvifRequest;

/// 媒体 profile 列表请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "trt:GetProfiles")]
pub struct GetProfiles;

impl OnvifRequest for GetProfiles {
    const SERVICE: &'static str = "media";
}

/// 流地址请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "trt:GetStreamUri")]
pub struct GetStreamUri {
    #[serde(rename = "trt:StreamSetup")]
    pub stream_setup: StreamSetup,
    #[serde(rename = "trt:ProfileToken")]
    pub profile_token: String,
}

impl GetStreamUri {
    /// RTP 单播、RTSP 传输的常用组合
    pub fn rtsp_unicast(profile_token: impl Into<String>) -> Self {
        Self {
            stream_setup: StreamSetup {
                stream: "RTP-Unicast".to_string(),
                transport: Transport {
                    protocol: "RTSP".to_string(),
                },
            },
            profile_token: profile_token.into(),
        }
    }
}

impl OnvifRequest for GetStreamUri {
    const SERVICE: &'static str = "media";
}

#[derive(Debug, Clone, Serialize)]
pub struct StreamSetup {
    #[serde(rename = "tt:Stream")]
    pub stream: String,
    #[serde(rename = "tt:Transport")]
    pub transport: Transport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Transport {
    #[serde(rename = "tt:Protocol")]
    pub protocol: String,
}

/// 抓图地址请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "trt:GetSnapshotUri")]
pub struct GetSnapshotUri {
    #[serde(rename = "trt:ProfileToken")]
    pub profile_token: String,
}

impl OnvifRequest for GetSnapshotUri {
    const SERVICE: &'static str = "media";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_stream_uri_serialization() {
        let request = GetStreamUri::rtsp_unicast("Profile_1");
        let xml = quick_xml::se::to_string(&request).unwrap();
        assert_eq!(
            xml,
            "<trt:GetStreamUri>\
             <trt:StreamSetup>\
             <tt:Stream>RTP-Unicast</tt:Stream>\
             <tt:Transport><tt:Protocol>RTSP</tt:Protocol></tt:Transport>\
             </trt:StreamSetup>\
             <trt:ProfileToken>Profile_1</trt:ProfileToken>\
             </trt:GetStreamUri>"
        );
    }

    #[test]
    fn test_get_profiles_serialization() {
        let xml = quick_xml::se::to_string(&GetProfiles).unwrap();
        assert_eq!(xml, "<trt:GetProfiles/>");
    }

    #[test]
    fn test_service_tag() {
        assert_eq!(GetProfiles::SERVICE, "media");
        assert_eq!(GetSnapshotUri::SERVICE, "media");
    }
}
