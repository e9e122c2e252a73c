use async_trait::async_trait;
use gloo_net::http::Request;

use super::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::ApiError;

/// Browser `fetch` via gloo-net.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        if let Some(authorization) = request.authorization.as_deref() {
            builder = builder.header("Authorization", authorization);
        }

        let prepared = match request.body.as_ref() {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|error| ApiError::Decode(format!("failed to build request: {error}")))?;

        let response = prepared
            .send()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}
