use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde::Serialize;
use sha1::{Digest, Sha1};

use crate::error::Result;

const PASSWORD_DIGEST_TYPE: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordDigest";
const NONCE_ENCODING_TYPE: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-soap-message-security-1.0#Base64Binary";
const WSSE_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";
const WSU_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-utility-1.0.xsd";

const NONCE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const NONCE_LEN: usize = 32;

/// WS-Security UsernameToken 安全头
/// digest 与头中携带的 nonce/created 来自同一次生成，发出前不得重新计算
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "wsse:Security")]
pub struct Security {
    #[serde(rename = "@xmlns:wsse")]
    xmlns_wsse: &'static str,
    #[serde(rename = "@xmlns:wsu")]
    xmlns_wsu: &'static str,
    #[serde(rename = "wsse:UsernameToken")]
    username_token: UsernameToken,
}

#[derive(Debug, Clone, Serialize)]
struct UsernameToken {
    #[serde(rename = "wsse:Username")]
    username: String,
    #[serde(rename = "wsse:Password")]
    password: PasswordDigest,
    #[serde(rename = "wsse:Nonce")]
    nonce: Nonce,
    #[serde(rename = "wsu:Created")]
    created: String,
}

#[derive(Debug, Clone, Serialize)]
struct PasswordDigest {
    #[serde(rename = "@Type")]
    kind: &'static str,
    #[serde(rename = "$text")]
    digest: String,
}

#[derive(Debug, Clone, Serialize)]
struct Nonce {
    #[serde(rename = "@EncodingType")]
    encoding: &'static str,
    #[serde(rename = "$text")]
    value: String,
}

impl Security {
    /// 生成新的安全头；每个请求单独生成，nonce 与时间戳只采样一次
    pub fn new(username: &str, password: &str) -> Self {
        let nonce = generate_nonce();
        let created = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);
        let digest = generate_token(&nonce, &created, password);
        Self {
            xmlns_wsse: WSSE_NS,
            xmlns_wsu: WSU_NS,
            username_token: UsernameToken {
                username: username.to_string(),
                password: PasswordDigest {
                    kind: PASSWORD_DIGEST_TYPE,
                    digest,
                },
                nonce: Nonce {
                    encoding: NONCE_ENCODING_TYPE,
                    value: nonce,
                },
                created,
            },
        }
    }

    pub fn username(&self) -> &str {
        &self.username_token.username
    }

    pub fn nonce(&self) -> &str {
        &self.username_token.nonce.value
    }

    pub fn created(&self) -> &str {
        &self.username_token.created
    }

    pub fn digest(&self) -> &str {
        &self.username_token.password.digest
    }

    /// 序列化为可插入 Header 的 XML 元素
    pub fn to_xml(&self) -> Result<String> {
        Ok(quick_xml::se::to_string(self)?)
    }
}

/// Digest = B64ENCODE( SHA1( B64DECODE(nonce) + created + password ) )
/// created 必须与头中 Created 字段逐字节一致
pub fn generate_token(nonce: &str, created: &str, password: &str) -> String {
    let nonce_bytes = BASE64.decode(nonce).unwrap_or_default();
    let mut hasher = Sha1::new();
    hasher.update(&nonce_bytes);
    hasher.update(created.as_bytes());
    hasher.update(password.as_bytes());
    BASE64.encode(hasher.finalize())
}

fn generate_nonce() -> String {
    let mut rng = rand::thread_rng();
    (0..NONCE_LEN)
        .map(|_| NONCE_ALPHABET[rng.gen_range(0..NONCE_ALPHABET.len())] as char)
        .collect()
}
