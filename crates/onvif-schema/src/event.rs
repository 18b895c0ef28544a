use serde::Serialize;

use crate::OnvifRequest;

/// 创建拉取点订阅
/// 注意服务类别为 "event"，设备能力应答中对应的键是 "events"，
/// 由端点表的模糊匹配兜底
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "tev:CreatePullPointSubscription")]
pub struct CreatePullPointSubscription {
    #[serde(
        rename = "tev:InitialTerminationTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_termination_time: Option<String>,
}

impl OnvifRequest for CreatePullPointSubscription {
    const SERVICE: &'static str = "event";
}

/// 拉取事件消息
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "tev:PullMessages")]
pub struct PullMessages {
    #[serde(rename = "tev:Timeout")]
    pub timeout: String,
    #[serde(rename = "tev:MessageLimit")]
    pub message_limit: i32,
}

impl OnvifRequest for PullMessages {
    const SERVICE: &'static str = "event";
}
