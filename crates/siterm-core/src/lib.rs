pub mod config;
pub mod encode;
pub mod error;
pub mod logging;
pub mod request;
pub mod transport;
pub mod url_model;

pub use encode::{encode_request, ParamValue, Params};
pub use error::{RequestError, TransportError};
pub use request::{Body, CallOptions, ConfigOverrides, Headers, Reply, RequestBuilder, RequestConfig};
pub use transport::{CurlTransport, PreparedRequest, ResponseBody, ResponseHead, Transport, Verb};
pub use url_model::{check_server_url, sanitize_url, Endpoint};
