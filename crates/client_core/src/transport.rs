//! REST transport for the `/employees` resource.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{Employee, EmployeeId},
    error::ApiError,
    protocol::EmployeeBody,
};
use tracing::debug;
use url::Url;

use crate::error::TransportError;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Employee>, TransportError>;
    async fn create(&self, body: &EmployeeBody) -> Result<Employee, TransportError>;
    async fn update(&self, id: EmployeeId, body: &EmployeeBody)
        -> Result<Employee, TransportError>;
    async fn delete(&self, id: EmployeeId) -> Result<(), TransportError>;
}

pub struct HttpEmployeeApi {
    http: Client,
    collection_url: Url,
}

impl HttpEmployeeApi {
    /// `base_url` is the server root, e.g. `http://localhost:3000`; a path
    /// prefix such as `http://host/api` is kept.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let collection_url = collection_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| TransportError::Request {
                url: collection_url.to_string(),
                source,
            })?;
        Ok(Self {
            http,
            collection_url,
        })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    fn member_url(&self, id: EmployeeId) -> Result<Url, TransportError> {
        let mut base = self.collection_url.clone();
        base.set_path(&format!("{}/", base.path().trim_end_matches('/')));
        base.join(&id.to_string())
            .map_err(|source| TransportError::InvalidUrl {
                url: self.collection_url.to_string(),
                source,
            })
    }

    async fn send(
        &self,
        method: &'static str,
        url: &Url,
        request: reqwest::RequestBuilder,
    ) -> Result<Response, TransportError> {
        debug!(method, url = %url, "sending employee api request");
        let response = request.send().await.map_err(|source| TransportError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(TransportError::Status {
            method,
            url: url.to_string(),
            status,
            detail: ApiError::message_from_body(&body),
        })
    }
}

fn collection_url(base_url: &str) -> Result<Url, TransportError> {
    let invalid = |source| TransportError::InvalidUrl {
        url: base_url.to_string(),
        source,
    };
    let mut base = Url::parse(base_url.trim()).map_err(invalid)?;
    if base.cannot_be_a_base() {
        return Err(invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase));
    }
    if !base.path().ends_with('/') {
        base.set_path(&format!("{}/", base.path()));
    }
    base.join("employees").map_err(invalid)
}

#[async_trait]
impl EmployeeApi for HttpEmployeeApi {
    async fn list(&self) -> Result<Vec<Employee>, TransportError> {
        let url = &self.collection_url;
        let response = self.send("GET", url, self.http.get(url.clone())).await?;
        response
            .json()
            .await
            .map_err(|source| TransportError::Decode {
                url: url.to_string(),
                source,
            })
    }

    async fn create(&self, body: &EmployeeBody) -> Result<Employee, TransportError> {
        let url = &self.collection_url;
        let response = self
            .send("POST", url, self.http.post(url.clone()).json(body))
            .await?;
        response
            .json()
            .await
            .map_err(|source| TransportError::Decode {
                url: url.to_string(),
                source,
            })
    }

    async fn update(
        &self,
        id: EmployeeId,
        body: &EmployeeBody,
    ) -> Result<Employee, TransportError> {
        let url = self.member_url(id)?;
        let response = self
            .send("PUT", &url, self.http.put(url.clone()).json(&body.clone().with_id(id)))
            .await?;
        response
            .json()
            .await
            .map_err(|source| TransportError::Decode {
                url: url.to_string(),
                source,
            })
    }

    async fn delete(&self, id: EmployeeId) -> Result<(), TransportError> {
        let url = self.member_url(id)?;
        self.send("DELETE", &url, self.http.delete(url.clone()))
            .await?;
        Ok(())
    }
}
