use thiserror::Error;

/// SOAP 层错误类型
#[derive(Error, Debug)]
pub enum SoapError {
    /// XML 片段解析失败
    #[error("Invalid XML fragment: {0}")]
    InvalidFragment(#[from] quick_xml::Error),

    /// 片段不是平衡的 XML 元素
    #[error("XML fragment is not a well-formed element")]
    MalformedFragment,

    /// Body 中没有内容
    #[error("SOAP body is empty")]
    EmptyBody,

    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialize(#[from] quick_xml::DeError),
}

/// SOAP 层结果类型
pub type Result<T> = std::result::Result<T, SoapError>;
