use serde::Serialize;

use crate::OnvifRequest;

/// 能力发现请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "tds:GetCapabilities")]
pub struct GetCapabilities {
    #[serde(rename = "tds:Category")]
    pub category: String,
}

impl GetCapabilities {
    /// 查询全部服务类别
    pub fn all() -> Self {
        Self {
            category: "All".to_string(),
        }
    }
}

impl OnvifRequest for GetCapabilities {
    const SERVICE: &'static str = "device";
}

/// 设备信息请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "tds:GetDeviceInformation")]
pub struct GetDeviceInformation;

impl OnvifRequest for GetDeviceInformation {
    const SERVICE: &'static str = "device";
}

/// 设备时间请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "tds:GetSystemDateAndTime")]
pub struct GetSystemDateAndTime;

impl OnvifRequest for GetSystemDateAndTime {
    const SERVICE: &'static str = "device";
}

/// 服务列表请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "tds:GetServices")]
pub struct GetServices {
    #[serde(rename = "tds:IncludeCapability")]
    pub include_capability: bool,
}

impl OnvifRequest for GetServices {
    const SERVICE: &'static str = "device";
}

/// 重启设备
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "tds:SystemReboot")]
pub struct SystemReboot;

impl OnvifRequest for SystemReboot {
    const SERVICE: &'static str = "device";
}
