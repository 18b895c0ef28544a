use std::collections::HashMap;
use std::fmt;

use onvif_schema::device::GetCapabilities;
use onvif_schema::OnvifRequest;
use quick_xml::events::Event;
use quick_xml::Reader;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::endpoints::EndpointTable;
use crate::error::{OnvifError, Result};
use crate::transport::{self, SoapResponse};

/// 登录凭据；两者皆空视为未认证
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    fn is_blank(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}

/// ONVIF 设备类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    NVD,
    NVS,
    NVA,
    NVT,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceType::NVD => "NetworkVideoDisplay",
            DeviceType::NVS => "NetworkVideoStorage",
            DeviceType::NVA => "NetworkVideoAnalytics",
            DeviceType::NVT => "NetworkVideoTransmitter",
        };
        f.write_str(name)
    }
}

/// ONVIF 设备实体
/// 持有端点表与凭据；两者各自加锁，允许跨任务共享同一设备句柄。
/// 锁只在同步临界区内持有，不跨越 await。
#[derive(Debug)]
pub struct Device {
    address: String,
    http: reqwest::Client,
    credentials: RwLock<Option<Credentials>>,
    endpoints: RwLock<EndpointTable>,
}

impl Device {
    /// 连接设备并执行能力发现
    pub async fn connect(address: impl Into<String>) -> Result<Self> {
        Self::connect_with_config(address, None, ClientConfig::default()).await
    }

    /// 带凭据连接；能力发现请求本身即为认证请求
    pub async fn connect_with_auth(
        address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Credentials {
            username: username.into(),
            password: password.into(),
        };
        Self::connect_with_config(address, Some(credentials), ClientConfig::default()).await
    }

    /// 以显式配置连接
    pub async fn connect_with_config(
        address: impl Into<String>,
        credentials: Option<Credentials>,
        config: ClientConfig,
    ) -> Result<Self> {
        let address = address.into();
        let http = config.build_http_client()?;
        let device = Self {
            endpoints: RwLock::new(EndpointTable::with_defaults(&address)),
            credentials: RwLock::new(credentials),
            address,
            http,
        };
        device.fetch_capabilities().await?;
        Ok(device)
    }

    /// 设备地址
    pub fn address(&self) -> &str {
        &self.address
    }

    /// 更换凭据；后续请求使用新凭据，对在途请求无影响
    pub async fn authenticate(&self, username: impl Into<String>, password: impl Into<String>) {
        let mut credentials = self.credentials.write().await;
        *credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
    }

    /// 解析某服务类别的端点地址
    pub async fn endpoint(&self, name: &str) -> Result<String> {
        self.endpoints.read().await.resolve(name)
    }

    /// 当前已知的全部服务端点
    pub async fn services(&self) -> HashMap<String, String> {
        self.endpoints.read().await.entries().clone()
    }

    /// 调用一个 ONVIF 方法
    /// 依据请求类型携带的服务类别解析端点，构造 envelope 并发送；
    /// 响应原样返回
    pub async fn call_method<R: OnvifRequest>(
        &self,
        request: &R,
        header_fields: Option<&HashMap<String, String>>,
    ) -> Result<SoapResponse> {
        let endpoint = self.endpoint(R::SERVICE).await?;
        let request_xml = quick_xml::se::to_string(request)?;
        let credentials = self
            .credentials
            .read()
            .await
            .clone()
            .filter(|c| !c.is_blank());
        transport::send(
            &self.http,
            &endpoint,
            &request_xml,
            credentials.as_ref(),
            header_fields,
        )
        .await
    }

    /// 能力发现
    /// 请求 GetCapabilities(All)，将应答中的服务并入端点表；
    /// 应答解析失败只回退到默认端点，不报错
    async fn fetch_capabilities(&self) -> Result<()> {
        let response = self
            .call_method(&GetCapabilities::all(), None)
            .await
            .map_err(|e| match e {
                OnvifError::EndpointNotFound(_) => e,
                _ => OnvifError::Unreachable(self.address.clone()),
            })?;
        if !response.is_success() {
            return Err(OnvifError::Unreachable(self.address.clone()));
        }

        let discovered = parse_capability_endpoints(&response.body);
        if discovered.is_empty() {
            debug!(target: "onvif", address = %self.address, "No additional endpoints discovered");
            return Ok(());
        }

        let count = discovered.len();
        let mut endpoints = self.endpoints.write().await;
        for (category, url) in discovered {
            endpoints.insert(&category, &url);
        }
        info!(target: "onvif", address = %self.address, count, "Discovered service endpoints");
        Ok(())
    }
}

/// 从能力应答中提取 (服务类别, 地址)
/// 匹配 Envelope/Body/GetCapabilitiesResponse/Capabilities/*/XAddr，
/// 前缀忽略，只看局部名；文档非法时返回空表
fn parse_capability_endpoints(xml: &str) -> Vec<(String, String)> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut found = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
            }
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Text(t)) => {
                if is_capability_xaddr(&stack) {
                    if let Ok(text) = t.unescape() {
                        found.push((stack[stack.len() - 2].clone(), text.trim().to_string()));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => return Vec::new(),
            Ok(_) => {}
        }
    }

    found
}

fn is_capability_xaddr(stack: &[String]) -> bool {
    stack.len() == 6
        && stack[0] == "Envelope"
        && stack[1] == "Body"
        && stack[2] == "GetCapabilitiesResponse"
        && stack[3] == "Capabilities"
        && stack[5] == "XAddr"
}
