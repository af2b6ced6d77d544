mod client;
mod error;
mod rate_limit;
mod request;
#[cfg(test)]
mod request_test;
mod response;

pub use client::{CancelToken, Client, ClientConfig};
pub use error::RequestError;
pub use rate_limit::RateLimiter;
pub use request::{Request, RequestBuilder};
pub use response::Response;
