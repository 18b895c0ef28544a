pub mod config;
pub mod device;
pub mod endpoints;
pub mod error;
pub mod transport;

pub use config::ClientConfig;
pub use device::{Credentials, Device, DeviceType};
pub use endpoints::EndpointTable;
pub use error::{OnvifError, Result};
pub use transport::SoapResponse;
