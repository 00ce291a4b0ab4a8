use crate::error::{ContribError, Result};

const USER_AGENT: &str = concat!("contribmap/", env!("CARGO_PKG_VERSION"));

/// Raw response handed back by an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Converts a non-2xx response into an upstream error carrying the body verbatim.
    pub fn ensure_success(self, platform: &str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ContribError::upstream(platform, self.status, self.body))
        }
    }
}

/// Transport seam so the platform clients can be exercised without a network.
pub trait HttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse>;

    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<HttpResponse>;
}

#[derive(Debug)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    fn finish(response: reqwest::blocking::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()?;
        Self::finish(response)
    }

    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<HttpResponse> {
        let mut request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(body)?);
        if let Some(token) = bearer {
            request = request.header(reqwest::header::AUTHORIZATION, format!("bearer {token}"));
        }
        Self::finish(request.send()?)
    }
}
