//! # Typed operations over a [`Transport`]
//!
//! [`ApiClient`] has one method per backend capability. Each method builds
//! an [`ApiRequest`], sends it once, and turns the response into a typed
//! value or an [`ApiError`]. Nothing is cached or retried.
//!
//! | Method | Request |
//! |--------|---------|
//! | [`create_file`](ApiClient::create_file) | `POST /files` |
//! | [`get_file`](ApiClient::get_file) | `GET /files/{id}` |
//! | [`list_files`](ApiClient::list_files) | `GET /files?<filters>&skip=&limit=` |
//! | [`update_file`](ApiClient::update_file) | `PUT /files/{id}` |
//! | [`delete_file`](ApiClient::delete_file) | `DELETE /files/{id}` |
//! | [`search_files`](ApiClient::search_files) | `GET /files/search/{term}?limit=` |
//! | [`list_transactions`](ApiClient::list_transactions) | `GET /transactions?<filters>` |
//! | [`add_column`](ApiClient::add_column) | `POST /schema/columns` |

use records::{
    ColumnDefinition, FileCreateInput, FileQuery, FileRecord, FileUpdateInput, Page, Transaction,
    TransactionFilter,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::http::HttpTransport;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};
use crate::ApiError;

/// Client used by the running application.
pub type HttpClient = ApiClient<HttpTransport>;

#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    transport: T,
}

impl ApiClient<HttpTransport> {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(HttpTransport::new(config))
    }
}

impl<T> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn create_file(&self, input: &FileCreateInput) -> Result<FileRecord, ApiError> {
        let request = ApiRequest::new(Method::Post, ["files"]).with_body(to_body(input)?);
        self.fetch_json(request).await
    }

    pub async fn get_file(&self, file_id: i64) -> Result<FileRecord, ApiError> {
        let request = ApiRequest::new(Method::Get, ["files".to_string(), file_id.to_string()]);
        self.fetch_json(request).await
    }

    pub async fn list_files(
        &self,
        query: &FileQuery,
        page: Page,
    ) -> Result<Vec<FileRecord>, ApiError> {
        let mut params = file_query_params(query);
        params.push(("skip".to_string(), page.skip.to_string()));
        params.push(("limit".to_string(), page.limit.to_string()));
        let request = ApiRequest::new(Method::Get, ["files"]).with_query(params);
        self.fetch_json(request).await
    }

    pub async fn update_file(
        &self,
        file_id: i64,
        input: &FileUpdateInput,
    ) -> Result<FileRecord, ApiError> {
        let request = ApiRequest::new(Method::Put, ["files".to_string(), file_id.to_string()])
            .with_body(to_body(input)?);
        self.fetch_json(request).await
    }

    pub async fn delete_file(&self, file_id: i64) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::Delete, ["files".to_string(), file_id.to_string()]);
        self.execute(request).await.map(|_| ())
    }

    pub async fn search_files(&self, term: &str, limit: u32) -> Result<Vec<FileRecord>, ApiError> {
        let request = ApiRequest::new(Method::Get, ["files", "search", term])
            .with_query(vec![("limit".to_string(), limit.to_string())]);
        self.fetch_json(request).await
    }

    pub async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, ApiError> {
        let request =
            ApiRequest::new(Method::Get, ["transactions"]).with_query(transaction_params(filter));
        self.fetch_json(request).await
    }

    pub async fn add_column(&self, column: &ColumnDefinition) -> Result<(), ApiError> {
        let request =
            ApiRequest::new(Method::Post, ["schema", "columns"]).with_body(to_body(column)?);
        self.execute(request).await.map(|_| ())
    }

    async fn fetch_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let path = request.display_path();
        let response = self.execute(request).await?;
        serde_json::from_str(&response.body).map_err(|e| {
            tracing::error!("API Error: {path}: could not decode response: {e}");
            ApiError::Decode(e.to_string())
        })
    }

    /// One round trip; non-2xx statuses become [`ApiError::Status`].
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let method = request.method.as_str();
        let path = request.display_path();
        tracing::debug!("{method} {path}");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("API Error: {method} {path}: {e}");
                return Err(e);
            }
        };

        if response.is_success() {
            Ok(response)
        } else {
            let err = ApiError::from_response(response.status, &response.body);
            tracing::error!("API Error: {method} {path}: {} {err}", response.status);
            Err(err)
        }
    }
}

fn to_body<S: Serialize>(value: &S) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn push_text(params: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        params.push((key.to_string(), value.to_string()));
    }
}

fn file_query_params(query: &FileQuery) -> Vec<(String, String)> {
    let mut params = Vec::new();
    push_text(&mut params, "department", query.department.as_deref());
    push_text(&mut params, "owner", query.owner.as_deref());
    push_text(&mut params, "file_type", query.file_type.as_deref());
    if let Some(level) = query.access_level {
        params.push(("access_level".to_string(), level.as_str().to_string()));
    }
    if let Some(min) = query.min_size {
        params.push(("min_size".to_string(), min.to_string()));
    }
    if let Some(max) = query.max_size {
        params.push(("max_size".to_string(), max.to_string()));
    }
    params
}

fn transaction_params(filter: &TransactionFilter) -> Vec<(String, String)> {
    let mut params = Vec::new();
    push_text(&mut params, "department", Some(&filter.department));
    push_text(&mut params, "category", Some(&filter.category));
    push_text(&mut params, "payment_mode", Some(&filter.payment_mode));
    if let Some(min) = filter.min_amount {
        params.push(("min_amount".to_string(), min.to_string()));
    }
    if let Some(max) = filter.max_amount {
        params.push(("max_amount".to_string(), max.to_string()));
    }
    push_text(&mut params, "start_date", Some(&filter.start_date));
    push_text(&mut params, "end_date", Some(&filter.end_date));
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryTransport;
    use records::{AccessLevel, ColumnType};
    use serde_json::json;

    fn record_json(id: i64, name: &str) -> serde_json::Value {
        json!({
            "file_id": id,
            "file_name": name,
            "file_type": "pdf",
            "file_size": 1536,
            "file_path": format!("/docs/{name}"),
            "department": "Finance",
            "owner": "lee",
            "access_level": "internal",
            "created_at": "2024-05-01T08:00:00",
            "updated_at": "2024-05-02T08:00:00"
        })
    }

    fn client() -> ApiClient<MemoryTransport> {
        ApiClient::new(MemoryTransport::new())
    }

    #[tokio::test]
    async fn test_create_file_posts_body() {
        let client = client();
        client.transport().respond_json(201, record_json(1, "plan.pdf"));

        let input = FileCreateInput {
            file_name: "plan.pdf".to_string(),
            file_type: "pdf".to_string(),
            file_size: 1536,
            file_path: "/docs/plan.pdf".to_string(),
            department: Some("Finance".to_string()),
            owner: None,
            access_level: AccessLevel::Internal,
        };
        let created = client.create_file(&input).await.unwrap();
        assert_eq!(created.file_id, 1);

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.display_path(), "/files");
        assert_eq!(
            request.body,
            Some(json!({
                "file_name": "plan.pdf",
                "file_type": "pdf",
                "file_size": 1536,
                "file_path": "/docs/plan.pdf",
                "department": "Finance",
                "access_level": "internal"
            }))
        );
    }

    #[tokio::test]
    async fn test_partial_update_sends_only_given_field() {
        let client = client();
        client.transport().respond_json(200, record_json(9, "x"));

        let patch = FileUpdateInput {
            file_name: Some("x".to_string()),
            ..Default::default()
        };
        let updated = client.update_file(9, &patch).await.unwrap();
        assert_eq!(updated.file_name, "x");

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.display_path(), "/files/9");
        assert_eq!(request.body, Some(json!({ "file_name": "x" })));
    }

    #[tokio::test]
    async fn test_list_files_serialises_filters_and_page() {
        let client = client();
        client
            .transport()
            .respond_json(200, json!([record_json(1, "a"), record_json(2, "b")]));

        let query = FileQuery {
            department: Some("Finance".to_string()),
            owner: Some("  ".to_string()),
            access_level: Some(AccessLevel::Public),
            min_size: Some(10),
            ..Default::default()
        };
        let files = client.list_files(&query, Page::new(20, 10)).await.unwrap();
        assert_eq!(files.len(), 2);

        let request = client.transport().last_request().unwrap();
        assert_eq!(
            request.query,
            vec![
                ("department".to_string(), "Finance".to_string()),
                ("access_level".to_string(), "public".to_string()),
                ("min_size".to_string(), "10".to_string()),
                ("skip".to_string(), "20".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_missing_file_carries_server_message() {
        let client = client();
        client
            .transport()
            .respond_json(404, json!({ "detail": "File not found" }));

        let err = client.get_file(404).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "File not found");
    }

    #[tokio::test]
    async fn test_delete_ignores_response_body() {
        let client = client();
        client.transport().respond(204, "");

        client.delete_file(3).await.unwrap();
        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.display_path(), "/files/3");
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn test_search_uses_term_as_path_segment() {
        let client = client();
        client.transport().respond_json(200, json!([]));

        let found = client.search_files("budget 2024", 25).await.unwrap();
        assert!(found.is_empty());

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.path, vec!["files", "search", "budget 2024"]);
        assert_eq!(request.query_value("limit"), Some("25"));
    }

    #[tokio::test]
    async fn test_transactions_skip_blank_filters() {
        let client = client();
        client.transport().respond_json(200, json!([]));

        let filter = TransactionFilter {
            department: "Ops".to_string(),
            category: "  ".to_string(),
            payment_mode: "Card".to_string(),
            min_amount: Some(-12.5),
            max_amount: Some(500.0),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-03-31".to_string(),
        };
        client.list_transactions(&filter).await.unwrap();

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.display_path(), "/transactions");
        assert_eq!(
            request.query,
            vec![
                ("department".to_string(), "Ops".to_string()),
                ("payment_mode".to_string(), "Card".to_string()),
                ("min_amount".to_string(), "-12.5".to_string()),
                ("max_amount".to_string(), "500".to_string()),
                ("start_date".to_string(), "2024-01-01".to_string()),
                ("end_date".to_string(), "2024-03-31".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_column_posts_definition() {
        let client = client();
        client.transport().respond_json(200, json!({ "status": "ok" }));

        let column = ColumnDefinition {
            name: "project_code".to_string(),
            column_type: ColumnType::Text,
        };
        client.add_column(&column).await.unwrap();

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.display_path(), "/schema/columns");
        assert_eq!(
            request.body,
            Some(json!({ "name": "project_code", "type": "text" }))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let client = client();
        client.transport().fail("connection refused");

        let err = client.list_transactions(&TransactionFilter::default()).await.unwrap_err();
        assert_eq!(err, ApiError::Transport("connection refused".to_string()));
        assert_eq!(client.transport().request_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let client = client();
        client.transport().respond(200, "<html>oops</html>");

        let err = client.get_file(1).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
