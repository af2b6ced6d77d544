use std::future::Future;

use reprise_codec::{Header, OutboundRequest, Scheme};
use reprise_web::{Client, Request};

/// What came back over the wire, body still content-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub http_version: String,
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<Header>,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|header| header.is_named(name))
            .map(|header| header.value.as_str())
    }
}

/// Issues one prepared request. Errors are reported as display strings.
pub trait Transport {
    fn dispatch(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<TransportResponse, String>> + Send;
}

impl Transport for Client {
    fn dispatch(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<TransportResponse, String>> + Send {
        let client = self.clone();
        async move {
            let request = to_web_request(request).map_err(|err| err.to_string())?;
            let response = client.request(request).await.map_err(|err| err.to_string())?;
            Ok(TransportResponse {
                http_version: response.http_version,
                status: response.status,
                status_text: response.status_text,
                headers: response
                    .headers
                    .into_iter()
                    .map(|(name, value)| Header::new(name, value))
                    .collect(),
                body: response.body,
            })
        }
    }
}

fn to_web_request(request: OutboundRequest) -> Result<Request, reprise_web::RequestError> {
    let builder = Request::builder(request.host, request.port)
        .method_str(&request.method)?
        .https(request.scheme == Scheme::Https)
        .target(request.target)
        .http_version(request.http_version)
        .body(request.body);
    Ok(request
        .headers
        .into_iter()
        .fold(builder, |builder, header| builder.header(header.name, header.value))
        .build())
}
