use crate::config::backend::BackendConfig;
use crate::core::http::join_url;
use crate::core::response::ApiResponse;
use crate::domain::model::{Credentials, Page, Price, ProofFile, QueryParams};
use crate::utils::error::Result;
use crate::utils::validation::validate_url;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

const API_PREFIX: &str = "/api/v1";

/// Client for the prices REST service.
///
/// The backend URL is resolved once at construction. Every method issues one
/// request and returns the response unmodified: non-2xx answers come back as
/// an [`ApiResponse`] with `error` set, transport failures as `Err`.
#[derive(Debug, Clone)]
pub struct PricesApi {
    client: Client,
    backend: BackendConfig,
    base_url: String,
}

impl PricesApi {
    pub fn new(client: Client, backend: &BackendConfig) -> Result<Self> {
        let resolved = backend.require()?;
        let base_url = validate_url("prices.url", resolved)?;
        tracing::debug!("🔧 Prices API backend: {}", base_url);

        Ok(Self {
            client,
            backend: backend.clone(),
            base_url: join_url(base_url.as_str(), API_PREFIX),
        })
    }

    /// The backend URL this client was configured with.
    pub fn backend_url(&self) -> Option<&str> {
        self.backend.resolve()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = join_url(&self.base_url, path);
        tracing::debug!("📡 {} {}", method, url);
        self.client.request(method, url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<ApiResponse<T>> {
        let response = request.send().await?;
        ApiResponse::from_response(response).await
    }

    pub async fn get_prices(&self, query: &QueryParams) -> Result<ApiResponse<Page<Price>>> {
        let request = self.request(Method::GET, "/prices").query(query);
        self.send(request).await
    }

    pub async fn create_price<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> Result<ApiResponse<Price>> {
        let request = self.request(Method::POST, "/prices").json(body);
        self.send(request).await
    }

    pub async fn get_price_by_id(&self, id: u64) -> Result<ApiResponse<Price>> {
        let request = self.request(Method::GET, &format!("/prices/{}", id));
        self.send(request).await
    }

    fn update_price_request<B: Serialize + ?Sized>(&self, id: u64, body: &B) -> RequestBuilder {
        self.request(Method::PATCH, &format!("/prices/{}", id))
            .json(body)
    }

    /// Sends `body` as the PATCH payload exactly as given.
    pub async fn update_price<B: Serialize + ?Sized>(
        &self,
        id: u64,
        body: &B,
    ) -> Result<ApiResponse<Price>> {
        self.send(self.update_price_request(id, body)).await
    }

    pub async fn delete_price(&self, id: u64) -> Result<ApiResponse<serde_json::Value>> {
        let request = self.request(Method::DELETE, &format!("/prices/{}", id));
        self.send(request).await
    }

    pub async fn get_price_stats(
        &self,
        query: &QueryParams,
    ) -> Result<ApiResponse<serde_json::Value>> {
        let request = self.request(Method::GET, "/prices/stats").query(query);
        self.send(request).await
    }

    fn login_request(&self, credentials: &Credentials) -> RequestBuilder {
        // set_cookie 讓伺服器同時寫入 session cookie
        self.request(Method::POST, "/auth")
            .query(&[("set_cookie", "true")])
            .form(credentials)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<ApiResponse<serde_json::Value>> {
        self.send(self.login_request(credentials)).await
    }

    fn upload_proof_request(&self, proof: ProofFile) -> Result<RequestBuilder> {
        let mut part = Part::bytes(proof.bytes).file_name(proof.file_name);
        if let Some(content_type) = &proof.content_type {
            part = part.mime_str(content_type)?;
        }
        let form = Form::new().part("file", part);

        Ok(self.request(Method::POST, "/proofs/upload").multipart(form))
    }

    pub async fn upload_proof(&self, proof: ProofFile) -> Result<ApiResponse<serde_json::Value>> {
        self.send(self.upload_proof_request(proof)?).await
    }

    pub async fn get_proofs(&self) -> Result<ApiResponse<Page<serde_json::Value>>> {
        self.send(self.request(Method::GET, "/proofs")).await
    }

    /// Whether the current session is accepted. Only the status is kept.
    pub async fn is_authenticated(&self) -> Result<bool> {
        let response = self.request(Method::GET, "/session").send().await?;
        Ok(response.status().is_success())
    }

    pub async fn get_status(&self) -> Result<Option<serde_json::Value>> {
        let response: ApiResponse<serde_json::Value> =
            self.send(self.request(Method::GET, "/status")).await?;
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ClientError;
    use reqwest::header::CONTENT_TYPE;

    fn api() -> PricesApi {
        PricesApi::new(Client::new(), &BackendConfig::remote("http://localhost:8000")).unwrap()
    }

    #[test]
    fn test_construction_requires_backend() {
        let err = PricesApi::new(Client::new(), &BackendConfig::default()).unwrap_err();
        assert!(matches!(err, ClientError::ConfigError { .. }));
        assert!(err.to_string().contains("PRICES_API_LOCAL_URL"));
    }

    #[test]
    fn test_construction_rejects_invalid_url() {
        let err = PricesApi::new(Client::new(), &BackendConfig::remote("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_backend_url_prefers_local() {
        let backend = BackendConfig::new(
            Some("http://localhost:8000".to_string()),
            Some("https://prices.openfoodfacts.org".to_string()),
        );
        let api = PricesApi::new(Client::new(), &backend).unwrap();
        assert_eq!(api.backend_url(), Some("http://localhost:8000"));
    }

    #[test]
    fn test_login_is_form_encoded() {
        let credentials = Credentials {
            username: "alice".to_string(),
            password: "p@ss word".to_string(),
        };
        let request = api().login_request(&credentials).build().unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.url().path(), "/api/v1/auth");
        assert_eq!(request.url().query(), Some("set_cookie=true"));
        assert_eq!(
            request.headers()[CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, b"username=alice&password=p%40ss+word");
    }

    #[test]
    fn test_upload_proof_is_multipart() {
        let proof =
            ProofFile::new("receipt.jpg", vec![0xff, 0xd8, 0xff]).with_content_type("image/jpeg");
        let request = api().upload_proof_request(proof).unwrap().build().unwrap();

        assert_eq!(request.url().path(), "/api/v1/proofs/upload");
        let content_type = request.headers()[CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
    }

    #[test]
    fn test_upload_proof_rejects_bad_mime() {
        let proof = ProofFile::new("receipt.jpg", vec![1]).with_content_type("not a mime");
        assert!(api().upload_proof_request(proof).is_err());
    }

    #[test]
    fn test_update_price_sends_only_given_fields() {
        let patch = serde_json::json!({"price": 2.49});
        let request = api().update_price_request(42, &patch).build().unwrap();

        assert_eq!(request.method(), &Method::PATCH);
        assert_eq!(request.url().path(), "/api/v1/prices/42");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, br#"{"price":2.49}"#);
    }
}
