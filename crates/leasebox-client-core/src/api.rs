use serde::Deserialize;
use thiserror::Error;

use crate::session::SessionTokenStore;

/// Base path all widget endpoints live under, same origin as the host page.
pub const API_BASE_PATH: &str = "/api";

/// Multipart field name the upload endpoint expects.
pub const UPLOAD_FIELD_NAME: &str = "f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Whether an endpoint wants the session token attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    None,
    Session,
}

/// One widget-initiated JSON API operation. The multipart upload is planned
/// through [`plan_upload_request`] because its body is assembled by the
/// browser transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Register { email: String, password: String },
    Login { email: String, password: String },
    FetchQuota,
    CreateCheckoutSession,
}

/// A fully planned HTTP request: everything the transport needs short of
/// the network itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub auth: AuthRequirement,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

#[must_use]
pub fn plan_api_call(call: &ApiCall) -> PlannedRequest {
    match call {
        ApiCall::Register { email, password } => PlannedRequest {
            method: HttpMethod::Post,
            path: format!("{API_BASE_PATH}/auth/register"),
            auth: AuthRequirement::None,
            headers: Vec::new(),
            body: Some(serde_json::json!({ "email": email, "password": password })),
        },
        ApiCall::Login { email, password } => PlannedRequest {
            method: HttpMethod::Post,
            path: format!("{API_BASE_PATH}/auth/login"),
            auth: AuthRequirement::None,
            headers: Vec::new(),
            body: Some(serde_json::json!({ "email": email, "password": password })),
        },
        ApiCall::FetchQuota => PlannedRequest {
            method: HttpMethod::Get,
            path: format!("{API_BASE_PATH}/quota"),
            auth: AuthRequirement::Session,
            headers: Vec::new(),
            body: None,
        },
        ApiCall::CreateCheckoutSession => PlannedRequest {
            method: HttpMethod::Post,
            path: format!("{API_BASE_PATH}/billing/create-checkout-session"),
            auth: AuthRequirement::Session,
            headers: Vec::new(),
            body: None,
        },
    }
}

/// Plans the multipart upload request. The transport owns the form body and
/// must not set a content type; the browser generates the boundary.
#[must_use]
pub fn plan_upload_request() -> PlannedRequest {
    PlannedRequest {
        method: HttpMethod::Post,
        path: format!("{API_BASE_PATH}/upload"),
        auth: AuthRequirement::Session,
        headers: Vec::new(),
        body: None,
    }
}

/// Token the transport should attach for a planned call, if any. An empty
/// stored token reads as "no session".
#[must_use]
pub fn resolve_bearer_token(
    auth: AuthRequirement,
    store: &dyn SessionTokenStore,
) -> Option<String> {
    match auth {
        AuthRequirement::None => None,
        AuthRequirement::Session => {
            let token = store.token();
            if token.is_empty() { None } else { Some(token) }
        }
    }
}

/// Full header set for a planned JSON call: the fixed JSON content type
/// first, any planned headers, and the bearer token last. Planned headers
/// can never mask the content type or smuggle their own authorization.
#[must_use]
pub fn json_request_headers(
    request: &PlannedRequest,
    store: &dyn SessionTokenStore,
) -> Vec<(String, String)> {
    let mut headers = Vec::with_capacity(request.headers.len() + 2);
    headers.push(("content-type".to_string(), "application/json".to_string()));
    headers.extend(
        request
            .headers
            .iter()
            .filter(|(name, _)| {
                !name.eq_ignore_ascii_case("content-type")
                    && !name.eq_ignore_ascii_case("authorization")
            })
            .cloned(),
    );
    if let Some(token) = resolve_bearer_token(request.auth, store) {
        headers.push(("authorization".to_string(), format!("Bearer {token}")));
    }
    headers
}

/// Header set for the multipart upload: the bearer token and nothing else,
/// so the transport keeps control of the content type.
#[must_use]
pub fn upload_request_headers(store: &dyn SessionTokenStore) -> Vec<(String, String)> {
    match resolve_bearer_token(AuthRequirement::Session, store) {
        Some(token) => vec![("authorization".to_string(), format!("Bearer {token}"))],
        None => Vec::new(),
    }
}

/// Success body of POST /auth/login. The token is required; a success body
/// without one is a decode failure, not a signed-in session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Success body of POST /upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub size_bytes: u64,
    pub yyyymm: String,
    pub quota_mb: u64,
}

/// Success body of GET /quota.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuotaResponse {
    pub plan: String,
    pub used_bytes: u64,
    pub max_bytes: u64,
    pub yyyymm: String,
}

/// Success body of POST /billing/create-checkout-session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutResponse {
    #[serde(default)]
    pub checkout_url: Option<String>,
}

/// The one error every API operation surfaces. `status` is the HTTP status
/// that produced it, or 0 for network-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: Option<String>,
}

#[must_use]
pub fn is_success_status(status: u16) -> bool {
    (200..=299).contains(&status)
}

/// Message for a failed response: the JSON body's `detail` string when one
/// decodes, otherwise the HTTP status line.
#[must_use]
pub fn failure_message(status: u16, status_text: &str, raw_body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(raw_body)
        .ok()
        .and_then(|body| body.detail)
        .unwrap_or_else(|| format!("{status} {status_text}"))
}

/// Decodes a response with a known success shape. Non-2xx statuses and 2xx
/// bodies that do not decode into `T` both normalize into [`ApiError`].
pub fn decode_json_payload<T: for<'de> Deserialize<'de>>(
    status: u16,
    status_text: &str,
    raw_body: &str,
) -> Result<T, ApiError> {
    if !is_success_status(status) {
        return Err(ApiError {
            status,
            message: failure_message(status, status_text, raw_body),
        });
    }
    serde_json::from_str(raw_body).map_err(|error| ApiError {
        status,
        message: format!("failed to decode response: {error}"),
    })
}

/// A decoded success body for endpoints with no modeled shape: JSON when
/// the body parses, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    Json(serde_json::Value),
    Text(String),
}

/// Decodes a response for the opaque endpoints, keeping the transport
/// contract: failures normalize per [`failure_message`], successes come
/// back as JSON or fall through as raw text.
pub fn decode_response_payload(
    status: u16,
    status_text: &str,
    raw_body: &str,
) -> Result<ApiPayload, ApiError> {
    if !is_success_status(status) {
        return Err(ApiError {
            status,
            message: failure_message(status, status_text, raw_body),
        });
    }
    match serde_json::from_str(raw_body) {
        Ok(value) => Ok(ApiPayload::Json(value)),
        Err(_) => Ok(ApiPayload::Text(raw_body.to_string())),
    }
}

/// Redirect target from a checkout response. Absent and empty URLs both
/// count as "no URL returned".
#[must_use]
pub fn resolve_checkout_url(response: &CheckoutResponse) -> Option<&str> {
    response
        .checkout_url
        .as_deref()
        .filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use serde_json::json;

    #[test]
    fn plans_match_the_endpoint_table() {
        let register = plan_api_call(&ApiCall::Register {
            email: "user@example.com".to_string(),
            password: "hunter2".to_string(),
        });
        assert_eq!(register.method, HttpMethod::Post);
        assert_eq!(register.path, "/api/auth/register");
        assert_eq!(register.auth, AuthRequirement::None);
        assert_eq!(
            register.body,
            Some(json!({ "email": "user@example.com", "password": "hunter2" }))
        );

        let login = plan_api_call(&ApiCall::Login {
            email: "user@example.com".to_string(),
            password: "hunter2".to_string(),
        });
        assert_eq!(login.method, HttpMethod::Post);
        assert_eq!(login.path, "/api/auth/login");
        assert_eq!(login.auth, AuthRequirement::None);

        let quota = plan_api_call(&ApiCall::FetchQuota);
        assert_eq!(quota.method, HttpMethod::Get);
        assert_eq!(quota.path, "/api/quota");
        assert_eq!(quota.auth, AuthRequirement::Session);
        assert_eq!(quota.body, None);

        let checkout = plan_api_call(&ApiCall::CreateCheckoutSession);
        assert_eq!(checkout.method, HttpMethod::Post);
        assert_eq!(checkout.path, "/api/billing/create-checkout-session");
        assert_eq!(checkout.auth, AuthRequirement::Session);
        assert_eq!(checkout.body, None);

        let upload = plan_upload_request();
        assert_eq!(upload.method, HttpMethod::Post);
        assert_eq!(upload.path, "/api/upload");
        assert_eq!(upload.auth, AuthRequirement::Session);
        assert_eq!(upload.body, None);
    }

    #[test]
    fn login_token_rides_subsequent_authorized_calls() {
        let store = MemorySessionStore::default();
        let login: LoginResponse =
            decode_json_payload(200, "OK", r#"{"access_token":"T"}"#).expect("login decodes");
        store.set_token(&login.access_token);

        let headers = json_request_headers(&plan_api_call(&ApiCall::FetchQuota), &store);
        assert_eq!(
            headers.last(),
            Some(&("authorization".to_string(), "Bearer T".to_string()))
        );
    }

    #[test]
    fn signed_out_calls_omit_the_bearer_header() {
        let store = MemorySessionStore::default();
        let headers = json_request_headers(&plan_api_call(&ApiCall::FetchQuota), &store);
        assert_eq!(
            headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn unauthenticated_endpoints_never_carry_a_token() {
        let store = MemorySessionStore::default();
        store.set_token("T");
        let login = plan_api_call(&ApiCall::Login {
            email: "user@example.com".to_string(),
            password: "hunter2".to_string(),
        });
        let headers = json_request_headers(&login, &store);
        assert!(headers.iter().all(|(name, _)| name != "authorization"));
    }

    #[test]
    fn planned_headers_cannot_mask_the_fixed_or_auth_headers() {
        let store = MemorySessionStore::default();
        store.set_token("T");
        let mut request = plan_api_call(&ApiCall::FetchQuota);
        request.headers = vec![
            ("x-requested-with".to_string(), "leasebox".to_string()),
            ("Content-Type".to_string(), "text/plain".to_string()),
            ("Authorization".to_string(), "Bearer forged".to_string()),
        ];

        let headers = json_request_headers(&request, &store);
        assert_eq!(
            headers.first(),
            Some(&("content-type".to_string(), "application/json".to_string()))
        );
        assert!(headers.contains(&("x-requested-with".to_string(), "leasebox".to_string())));
        assert_eq!(
            headers.last(),
            Some(&("authorization".to_string(), "Bearer T".to_string()))
        );
        let bearer_count = headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .count();
        assert_eq!(bearer_count, 1);
    }

    #[test]
    fn upload_headers_carry_only_the_bearer_token() {
        let store = MemorySessionStore::default();
        store.set_token("T");
        assert_eq!(
            upload_request_headers(&store),
            vec![("authorization".to_string(), "Bearer T".to_string())]
        );

        store.set_token("");
        assert!(upload_request_headers(&store).is_empty());
    }

    #[test]
    fn failure_message_prefers_the_detail_field() {
        assert_eq!(
            failure_message(402, "Payment Required", r#"{"detail":"quota exceeded"}"#),
            "quota exceeded"
        );
    }

    #[test]
    fn failure_message_falls_back_to_the_status_line() {
        assert_eq!(
            failure_message(502, "Bad Gateway", "<html>upstream</html>"),
            "502 Bad Gateway"
        );
        assert_eq!(
            failure_message(404, "Not Found", r#"{"error":"missing"}"#),
            "404 Not Found"
        );
        assert_eq!(
            failure_message(400, "Bad Request", r#"{"detail":42}"#),
            "400 Bad Request"
        );
    }

    #[test]
    fn decode_json_payload_normalizes_error_statuses() {
        let error = decode_json_payload::<QuotaResponse>(
            402,
            "Payment Required",
            r#"{"detail":"Monthly quota exceeded"}"#,
        )
        .expect_err("non-2xx fails");
        assert_eq!(error.status, 402);
        assert_eq!(error.to_string(), "Monthly quota exceeded");
    }

    #[test]
    fn decode_json_payload_flags_undecodable_success_bodies() {
        let error =
            decode_json_payload::<QuotaResponse>(200, "OK", "ok").expect_err("decode fails");
        assert_eq!(error.status, 200);
        assert!(error.message.starts_with("failed to decode response"));
    }

    #[test]
    fn quota_and_upload_payloads_decode_their_success_shapes() {
        let quota: QuotaResponse = decode_json_payload(
            200,
            "OK",
            &json!({
                "plan": "free",
                "used_bytes": 1_048_576,
                "max_bytes": 104_857_600,
                "yyyymm": "2024-05"
            })
            .to_string(),
        )
        .expect("quota decodes");
        assert_eq!(quota.plan, "free");
        assert_eq!(quota.used_bytes, 1_048_576);
        assert_eq!(quota.max_bytes, 104_857_600);

        let upload: UploadResponse = decode_json_payload(
            200,
            "OK",
            &json!({
                "filename": "a.pdf",
                "size_bytes": 2_097_152,
                "yyyymm": "2024-05",
                "quota_mb": 500
            })
            .to_string(),
        )
        .expect("upload decodes");
        assert_eq!(upload.filename, "a.pdf");
        assert_eq!(upload.quota_mb, 500);
    }

    #[test]
    fn login_without_a_token_reads_as_a_decode_failure() {
        let error =
            decode_json_payload::<LoginResponse>(200, "OK", "{}").expect_err("decode fails");
        assert_eq!(error.status, 200);
        assert!(error.message.starts_with("failed to decode response"));
    }

    #[test]
    fn opaque_payloads_keep_json_or_fall_back_to_raw_text() {
        let payload = decode_response_payload(200, "OK", r#"{"id":7}"#).expect("json decodes");
        assert_eq!(payload, ApiPayload::Json(json!({ "id": 7 })));

        let payload = decode_response_payload(200, "OK", "registered").expect("text passes");
        assert_eq!(payload, ApiPayload::Text("registered".to_string()));

        let error = decode_response_payload(
            500,
            "Internal Server Error",
            r#"{"detail":"Stripe is not configured"}"#,
        )
        .expect_err("non-2xx fails");
        assert_eq!(error.to_string(), "Stripe is not configured");
    }

    #[test]
    fn transport_errors_normalize_with_status_zero() {
        let error = ApiError::transport("connection refused");
        assert_eq!(error.status, 0);
        assert_eq!(error.to_string(), "connection refused");
    }

    #[test]
    fn checkout_url_resolution_requires_a_nonempty_url() {
        let with_url: CheckoutResponse = decode_json_payload(
            200,
            "OK",
            r#"{"checkout_url":"https://pay.example/cs_123"}"#,
        )
        .expect("decodes");
        assert_eq!(
            resolve_checkout_url(&with_url),
            Some("https://pay.example/cs_123")
        );

        let without: CheckoutResponse = decode_json_payload(200, "OK", "{}").expect("decodes");
        assert_eq!(resolve_checkout_url(&without), None);

        let empty: CheckoutResponse =
            decode_json_payload(200, "OK", r#"{"checkout_url":""}"#).expect("decodes");
        assert_eq!(resolve_checkout_url(&empty), None);
    }
}
