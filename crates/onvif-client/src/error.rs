use onvif_soap::SoapError;
use thiserror::Error;

/// ONVIF 客户端错误类型
#[derive(Error, Debug)]
pub enum OnvifError {
    /// 设备不可达或不支持 ONVIF 服务
    #[error("Device at {0} is unreachable or does not support ONVIF services")]
    Unreachable(String),

    /// 目标服务端点未找到
    #[error("Target endpoint service not found: {0}")]
    EndpointNotFound(String),

    /// SOAP envelope 错误
    #[error("SOAP error: {0}")]
    Soap(#[from] SoapError),

    /// 请求序列化失败
    #[error("Failed to serialize request: {0}")]
    Serialize(#[from] quick_xml::DeError),

    /// 网络传输错误
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// ONVIF 客户端结果类型
pub type Result<T> = std::result::Result<T, OnvifError>;
