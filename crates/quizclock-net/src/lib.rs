//! quizclock-net: single-shot network request helpers.
//!
//! An HTTP request executor and a TCP request/response exchanger. Neither
//! shares any state with the quiz engine.

pub mod error;
pub mod http;
pub mod mock;
pub mod tcp;

pub use error::NetError;
pub use http::{HttpExecutor, HttpMethod, HttpRequest, HttpResponse, RequestExecutor};
pub use tcp::{TcpClient, TcpExchanger, TcpRequest};
