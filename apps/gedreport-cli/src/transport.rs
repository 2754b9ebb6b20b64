//! Native upload transport built on reqwest

use async_trait::async_trait;
use gedreport_core::upload::{HttpReply, Transport, UploadFile};
use gedreport_core::TransportError;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    type Body = UploadFile;

    async fn post_file(
        &self,
        endpoint: &str,
        field: &str,
        file: &UploadFile,
    ) -> Result<HttpReply, TransportError> {
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = Form::new().part(field.to_string(), part);

        let response = self
            .client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpReply::new(status, body.to_vec()))
    }
}
