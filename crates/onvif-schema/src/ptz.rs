use serde::Serialize;

use crate::OnvifRequest;

/// 持续移动
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "tptz:ContinuousMove")]
pub struct ContinuousMove {
    #[serde(rename = "tptz:ProfileToken")]
    pub profile_token: String,
    #[serde(rename = "tptz:Velocity")]
    pub velocity: PtzSpeed,
}

impl OnvifRequest for ContinuousMove {
    const SERVICE: &'static str = "ptz";
}

/// 停止移动
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "tptz:Stop")]
pub struct Stop {
    #[serde(rename = "tptz:ProfileToken")]
    pub profile_token: String,
    #[serde(rename = "tptz:PanTilt")]
    pub pan_tilt: bool,
    #[serde(rename = "tptz:Zoom")]
    pub zoom: bool,
}

impl OnvifRequest for Stop {
    const SERVICE: &'static str = "ptz";
}

/// 回到预设原点
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "tptz:GotoHomePosition")]
pub struct GotoHomePosition {
    #[serde(rename = "tptz:ProfileToken")]
    pub profile_token: String,
}

impl OnvifRequest for GotoHomePosition {
    const SERVICE: &'static str = "ptz";
}

/// 移动速度；未设置的分量不下发
#[derive(Debug, Clone, Serialize)]
pub struct PtzSpeed {
    #[serde(rename = "tt:PanTilt", skip_serializing_if = "Option::is_none")]
    pub pan_tilt: Option<Vector2D>,
    #[serde(rename = "tt:Zoom", skip_serializing_if = "Option::is_none")]
    pub zoom: Option<Vector1D>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Vector2D {
    #[serde(rename = "@x")]
    pub x: f32,
    #[serde(rename = "@y")]
    pub y: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Vector1D {
    #[serde(rename = "@x")]
    pub x: f32,
}
