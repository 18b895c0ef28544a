pub mod device;
pub mod event;
pub mod media;
pub mod ptz;

use serde::Serialize;

/// ONVIF 请求类型
/// 每个请求携带所属服务类别，调度器据此解析目标端点，
/// 不依赖对类型来源的运行时反射
pub trait OnvifRequest: Serialize {
    /// 服务类别（小写）
    const SERVICE: &'static str;
}
