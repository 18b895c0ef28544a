use std::collections::BTreeMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Result, SoapError};

const SOAP_ENV_NS: &str = "http://www.w3.org/2003/05/soap-envelope";
const SOAP_ENC_NS: &str = "http://www.w3.org/2003/05/soap-encoding";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// ONVIF 协议命名空间表
/// 每个出站 envelope 的根元素上全量声明，与 payload 实际使用哪些前缀无关
pub const ONVIF_NAMESPACES: &[(&str, &str)] = &[
    ("xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ("xsd", "http://www.w3.org/2001/XMLSchema"),
    ("c14n", "http://www.w3.org/2001/10/xml-exc-c14n#"),
    (
        "wsu",
        "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-utility-1.0.xsd",
    ),
    ("wsc", "http://schemas.xmlsoap.org/ws/2005/02/sc"),
    ("xenc", "http://www.w3.org/2001/04/xmlenc#"),
    ("ds", "http://www.w3.org/2000/09/xmldsig#"),
    (
        "wsse",
        "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd",
    ),
    ("chan", "http://schemas.microsoft.com/ws/2005/02/duplex"),
    ("wsa5", "http://www.w3.org/2005/08/addressing"),
    ("xmime", "http://tempuri.org/xmime.xsd"),
    ("xop", "http://www.w3.org/2004/08/xop/include"),
    ("tt", "http://www.onvif.org/ver10/schema"),
    ("wsrfbf", "http://docs.oasis-open.org/wsrf/bf-2"),
    ("wstop", "http://docs.oasis-open.org/wsn/t-1"),
    ("wsrfr", "http://docs.oasis-open.org/wsrf/r-2"),
    ("tds", "http://www.onvif.org/ver10/device/wsdl"),
    ("tev", "http://www.onvif.org/ver10/events/wsdl"),
    ("wsnt", "http://docs.oasis-open.org/wsn/b-2"),
    ("tmd", "http://www.onvif.org/ver10/deviceIO/wsdl"),
    ("tptz", "http://www.onvif.org/ver20/ptz/wsdl"),
    ("trt", "http://www.onvif.org/ver10/media/wsdl"),
    ("tns1", "http://www.onvif.org/ver10/topics"),
    ("timg", "http://www.onvif.org/ver20/imaging/wsdl"),
    ("tan", "http://www.onvif.org/ver20/analytics/wsdl"),
    ("wsa", "http://www.w3.org/2004/08/addressing"),
    ("wsntw", "http://docs.oasis-open.org/wsn/bw-2"),
    ("wsrf-rw", "http://docs.oasis-open.org/wsrf/rw-2"),
    ("wsaw", "http://www.w3.org/2006/05/addressing/wsdl"),
    ("onvif", "http://www.onvif.org/ver10/schema"),
    ("trc", "http://www.onvif.org/ver10/recording/wsdl"),
    ("tse", "http://www.onvif.org/ver10/search/wsdl"),
    ("trp", "http://www.onvif.org/ver10/replay/wsdl"),
];

/// SOAP 1.2 envelope
/// Header 与 Body 始终存在；内容以校验过的 XML 片段追加，序列化时一次性拼装。
/// 片段校验失败时 envelope 保持原状。
#[derive(Debug, Clone)]
pub struct SoapEnvelope {
    namespaces: BTreeMap<String, String>,
    header: Vec<String>,
    body: Vec<String>,
}

impl SoapEnvelope {
    /// 创建空 envelope，预置 SOAP envelope/encoding 两个核心命名空间
    pub fn new() -> Self {
        let mut namespaces = BTreeMap::new();
        namespaces.insert("SOAP-ENV".to_string(), SOAP_ENV_NS.to_string());
        namespaces.insert("SOAP-ENC".to_string(), SOAP_ENC_NS.to_string());
        Self {
            namespaces,
            header: Vec::new(),
            body: Vec::new(),
        }
    }

    /// 向 Body 追加一个元素
    pub fn add_body_element(&mut self, fragment: &str) -> Result<()> {
        validate_fragment(fragment)?;
        self.body.push(fragment.to_string());
        Ok(())
    }

    /// 向 Body 追加多个元素；任一片段非法则整体不生效
    pub fn add_body_elements(&mut self, fragments: &[&str]) -> Result<()> {
        for fragment in fragments {
            validate_fragment(fragment)?;
        }
        for fragment in fragments {
            self.body.push((*fragment).to_string());
        }
        Ok(())
    }

    /// 向 Header 追加一个元素
    pub fn add_header_element(&mut self, fragment: &str) -> Result<()> {
        validate_fragment(fragment)?;
        self.header.push(fragment.to_string());
        Ok(())
    }

    /// 向 Header 追加多个元素；任一片段非法则整体不生效
    pub fn add_header_elements(&mut self, fragments: &[&str]) -> Result<()> {
        for fragment in fragments {
            validate_fragment(fragment)?;
        }
        for fragment in fragments {
            self.header.push((*fragment).to_string());
        }
        Ok(())
    }

    /// 在根元素上声明 xmlns:<prefix>；同名前缀覆盖旧值
    pub fn add_namespace(&mut self, prefix: &str, uri: &str) {
        self.namespaces.insert(prefix.to_string(), uri.to_string());
    }

    /// 批量声明命名空间
    pub fn add_namespaces(&mut self, namespaces: &[(&str, &str)]) {
        for (prefix, uri) in namespaces {
            self.add_namespace(prefix, uri);
        }
    }

    /// 取出 Body 的第一个子元素，作为独立文档返回
    pub fn body(&self) -> Result<String> {
        self.body.first().cloned().ok_or(SoapError::EmptyBody)
    }

    /// 序列化整个 envelope
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(1024);
        xml.push_str(XML_DECL);
        xml.push_str("<SOAP-ENV:Envelope");
        for (prefix, uri) in &self.namespaces {
            xml.push_str(" xmlns:");
            xml.push_str(prefix);
            xml.push_str("=\"");
            xml.push_str(uri);
            xml.push('"');
        }
        xml.push_str("><SOAP-ENV:Header>");
        for fragment in &self.header {
            xml.push_str(fragment);
        }
        xml.push_str("</SOAP-ENV:Header><SOAP-ENV:Body>");
        for fragment in &self.body {
            xml.push_str(fragment);
        }
        xml.push_str("</SOAP-ENV:Body></SOAP-ENV:Envelope>");
        xml
    }
}

impl Default for SoapEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

/// 校验片段为平衡、至少含一个元素的 XML
fn validate_fragment(fragment: &str) -> Result<()> {
    let mut reader = Reader::from_str(fragment);
    let mut depth = 0usize;
    let mut elements = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                depth += 1;
                elements += 1;
            }
            Ok(Event::End(_)) => {
                depth = depth.checked_sub(1).ok_or(SoapError::MalformedFragment)?;
            }
            Ok(Event::Empty(_)) => elements += 1,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(SoapError::InvalidFragment(e)),
        }
    }
    if depth != 0 || elements == 0 {
        return Err(SoapError::MalformedFragment);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_envelope_has_header_and_body() {
        let envelope = SoapEnvelope::new();
        let xml = envelope.to_xml();
        assert!(xml.starts_with(XML_DECL));
        assert!(xml.contains("<SOAP-ENV:Header></SOAP-ENV:Header>"));
        assert!(xml.contains("<SOAP-ENV:Body></SOAP-ENV:Body>"));
        assert!(xml.contains("xmlns:SOAP-ENV=\"http://www.w3.org/2003/05/soap-envelope\""));
        assert!(xml.contains("xmlns:SOAP-ENC=\"http://www.w3.org/2003/05/soap-encoding\""));
    }

    #[test]
    fn test_body_round_trip() {
        let fragment = "<tds:GetCapabilities><tds:Category>All</tds:Category></tds:GetCapabilities>";
        let mut envelope = SoapEnvelope::new();
        envelope.add_body_element(fragment).unwrap();
        assert_eq!(envelope.body().unwrap(), fragment);
    }

    #[test]
    fn test_body_on_empty_envelope_fails() {
        let envelope = SoapEnvelope::new();
        assert!(matches!(envelope.body(), Err(SoapError::EmptyBody)));
    }

    #[test]
    fn test_invalid_fragment_leaves_envelope_unchanged() {
        let mut envelope = SoapEnvelope::new();
        let before = envelope.to_xml();

        assert!(envelope.add_body_element("<broken><nope></broken>").is_err());
        assert!(envelope.add_header_element("not xml at all >").is_err());

        assert_eq!(envelope.to_xml(), before);
    }

    #[test]
    fn test_add_body_elements_is_atomic() {
        let mut envelope = SoapEnvelope::new();
        let result = envelope.add_body_elements(&["<a/>", "<broken>"]);
        assert!(result.is_err());
        assert!(matches!(envelope.body(), Err(SoapError::EmptyBody)));
    }

    #[test]
    fn test_namespace_overwrite_keeps_latest() {
        let mut envelope = SoapEnvelope::new();
        envelope.add_namespace("tt", "http://example.org/old");
        envelope.add_namespace("tt", "http://www.onvif.org/ver10/schema");

        let xml = envelope.to_xml();
        assert_eq!(xml.matches("xmlns:tt=").count(), 1);
        assert!(xml.contains("xmlns:tt=\"http://www.onvif.org/ver10/schema\""));
    }

    #[test]
    fn test_header_elements_appended() {
        let mut envelope = SoapEnvelope::new();
        envelope
            .add_header_elements(&["<To>camera</To>", "<Action>probe</Action>"])
            .unwrap();
        let xml = envelope.to_xml();
        assert!(xml.contains("<SOAP-ENV:Header><To>camera</To><Action>probe</Action></SOAP-ENV:Header>"));
    }

    #[test]
    fn test_full_namespace_table_declared() {
        let mut envelope = SoapEnvelope::new();
        envelope.add_namespaces(ONVIF_NAMESPACES);
        let xml = envelope.to_xml();
        assert!(xml.contains("xmlns:tds=\"http://www.onvif.org/ver10/device/wsdl\""));
        assert!(xml.contains("xmlns:tptz=\"http://www.onvif.org/ver20/ptz/wsdl\""));
        assert!(xml.contains("xmlns:wsse="));
    }
}
