use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::Value;

use super::{SendMethod, Transport};
use crate::config::RedmineConfig;
use crate::wire::WireObject;

const API_KEY_HEADER: &str = "X-Redmine-API-Key";

pub struct HttpTransport {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &RedmineConfig) -> Self {
        Self::new(config.url.clone(), config.api_key.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Accept", "application/json");
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }
}

async fn read_object(resp: Response) -> Result<Option<WireObject>> {
    let status = resp.status();
    let text = resp.text().await.context("Failed to read Redmine response")?;
    if !status.is_success() {
        bail!("Redmine returned {status}: {}", text.trim());
    }
    if text.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(&text).context("Failed to parse Redmine response")?;
    match value {
        Value::Object(object) => Ok(Some(object)),
        other => bail!("Expected a JSON object from Redmine, got {other}"),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_object(&self, path: &str) -> Result<Option<WireObject>> {
        let url = self.url(path);
        log::debug!("GET {url}");

        let resp = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .context("Redmine API request failed")?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        read_object(resp).await
    }

    async fn send_object(
        &self,
        method: SendMethod,
        path: &str,
        body: &WireObject,
    ) -> Result<Option<WireObject>> {
        let url = self.url(path);
        log::debug!("{method:?} {url}");

        let request = match method {
            SendMethod::Post => self.client.post(&url),
            SendMethod::Put => self.client.put(&url),
        };
        let resp = self
            .authorize(request)
            .json(body)
            .send()
            .await
            .context("Redmine API request failed")?;

        read_object(resp).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        log::debug!("DELETE {url}");

        let resp = self
            .authorize(self.client.delete(&url))
            .send()
            .await
            .context("Redmine API request failed")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("Redmine returned {status} deleting {path}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn transport(server: &MockServer) -> HttpTransport {
        HttpTransport::new(server.uri(), Some("secret".into()))
    }

    fn version_body() -> WireObject {
        json!({"version": {"name": "2.0", "status": "open"}})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let transport = HttpTransport::new("https://redmine.example.com/".into(), None);
        assert_eq!(
            transport.url("/versions/1.json"),
            "https://redmine.example.com/versions/1.json"
        );
    }

    #[tokio::test]
    async fn get_sends_the_api_key_and_returns_the_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/versions/7.json"))
            .and(header("X-Redmine-API-Key", "secret"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"version": {"id": 7}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let object = transport(&server)
            .get_object("/versions/7.json")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(object["version"]["id"], json!(7));
    }

    #[tokio::test]
    async fn get_of_missing_resource_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/versions/404.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = transport(&server).get_object("/versions/404.json").await;
        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_of_non_object_body_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/versions/1.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = transport(&server)
            .get_object("/versions/1.json")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Expected a JSON object"));
    }

    #[tokio::test]
    async fn put_with_empty_reply_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/versions/3.json"))
            .and(body_json(json!({"version": {"name": "2.0", "status": "open"}})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let result = transport(&server)
            .send_object(SendMethod::Put, "/versions/3.json", &version_body())
            .await;
        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn post_returns_the_created_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects/core/versions.json"))
            .and(header("X-Redmine-API-Key", "secret"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"version": {"id": 31}})),
            )
            .mount(&server)
            .await;

        let object = transport(&server)
            .send_object(SendMethod::Post, "/projects/core/versions.json", &version_body())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(object["version"]["id"], json!(31));
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects/core/versions.json"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = transport(&server)
            .send_object(SendMethod::Post, "/projects/core/versions.json", &version_body())
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("500"), "{message}");
        assert!(message.contains("boom"), "{message}");
    }

    #[tokio::test]
    async fn delete_succeeds_on_2xx_and_fails_otherwise() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/versions/3.json"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/versions/4.json"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let transport = transport(&server);
        assert!(transport.delete("/versions/3.json").await.is_ok());
        let err = transport.delete("/versions/4.json").await.unwrap_err();
        assert!(err.to_string().contains("403"));
    }
}
