use reqwest::{Client, Url};

use crate::config::ApiConfig;
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::ApiError;

/// [`Transport`] over HTTP using `reqwest` (the browser `fetch` API on wasm).
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    config: ApiConfig,
}

impl HttpTransport {
    /// The base URL is checked per request, so a bad value surfaces as an
    /// [`ApiError::Config`] on each call instead of at startup.
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    /// Join the base URL and the request's segments, then append its query.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let mut url = self.config.url()?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Config(format!("{} is not a base URL", self.config.base_url)))?
            .pop_if_empty()
            .extend(&request.path);
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(&request)?;
        let mut builder = self.client.request(request.method.into(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ApiError::transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ApiError::transport)?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Method;

    fn transport() -> HttpTransport {
        HttpTransport::new(&ApiConfig::new("http://localhost:8000/api").unwrap())
    }

    #[test]
    fn test_url_joins_segments_under_base_path() {
        let request = ApiRequest::new(Method::Get, ["files", "42"]);
        let url = transport().url_for(&request).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/files/42");
    }

    #[test]
    fn test_url_encodes_search_term_and_query() {
        let request = ApiRequest::new(Method::Get, ["files", "search", "q3 report/draft"])
            .with_query(vec![("limit".to_string(), "100".to_string())]);
        let url = transport().url_for(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/files/search/q3%20report%2Fdraft?limit=100"
        );
    }

    #[test]
    fn test_url_without_query_has_no_question_mark() {
        let request = ApiRequest::new(Method::Post, ["schema", "columns"]);
        let url = transport().url_for(&request).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/schema/columns");
    }

    #[test]
    fn test_unusable_base_url_fails_each_request() {
        let transport = HttpTransport::new(&ApiConfig {
            base_url: "not a url".to_string(),
        });
        let request = ApiRequest::new(Method::Get, ["files"]);
        assert!(matches!(
            transport.url_for(&request),
            Err(ApiError::Config(_))
        ));
    }
}
