//! HTTP transport used by the executor.
mod client;
mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{ClientSettings, build_client};
pub use transport::{
    BINARY_BODY, HttpResponse, HttpTransport, ReqwestTransport, RequestSpec, ResponseBody,
};
