use std::collections::HashMap;

use onvif_soap::envelope::{SoapEnvelope, ONVIF_NAMESPACES};
use onvif_soap::security::Security;
use quick_xml::escape::escape;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::debug;

use crate::device::Credentials;
use crate::error::Result;

/// 原始 SOAP 响应
/// 状态与响应体原样返回，由调用方解释
#[derive(Debug, Clone)]
pub struct SoapResponse {
    pub status: StatusCode,
    pub body: String,
}

impl SoapResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// 发送一个 SOAP 请求
/// 组装 envelope：命名空间表、请求体、安全头、附加头字段；
/// POST 后不重试、不解析响应体
pub(crate) async fn send(
    http: &reqwest::Client,
    endpoint: &str,
    request_xml: &str,
    credentials: Option<&Credentials>,
    header_fields: Option<&HashMap<String, String>>,
) -> Result<SoapResponse> {
    let mut envelope = SoapEnvelope::new();
    envelope.add_namespaces(ONVIF_NAMESPACES);
    envelope.add_body_element(request_xml)?;

    if let Some(credentials) = credentials {
        let security = Security::new(&credentials.username, &credentials.password);
        envelope.add_header_element(&security.to_xml()?)?;
    }

    if let Some(fields) = header_fields {
        for (name, value) in fields {
            let element = format!("<{}>{}</{}>", name, escape(value), name);
            envelope.add_header_element(&element)?;
        }
    }

    let payload = envelope.to_xml();
    debug!(target: "onvif_client", endpoint = %endpoint, "Sending SOAP request");

    let response = http
        .post(endpoint)
        .header(CONTENT_TYPE, "application/soap+xml; charset=utf-8")
        .body(payload)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    debug!(target: "onvif_client", status = %status, "Received SOAP response");

    Ok(SoapResponse { status, body })
}
