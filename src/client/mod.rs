//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod options;

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::domain::{
    AccessToken, MessageSendResponse, Password, SendBinarySms, SendTextSms, StatusCode, Username,
    ValidationError,
};

pub use options::{AuthenticationType, DEFAULT_BASE_URL, WebSmsApiOptions};

const TEXT_ENDPOINT: &str = "/rest/smsmessaging/text";
const BINARY_ENDPOINT: &str = "/rest/smsmessaging/binary";
const BASE_URL_FIELD: &str = "baseUrl";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type BeforePostHook = Arc<dyn Fn(&str, &str) + Send + Sync>;
type ResponseHook = Arc<dyn Fn(HttpResponse) -> HttpResponse + Send + Sync>;
type SuccessCheck = Arc<dyn Fn(&HttpResponse) -> bool + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raw HTTP response as seen by the client hooks.
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        authorization: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        authorization: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(reqwest::header::AUTHORIZATION, authorization)
                .header(reqwest::header::ACCEPT, "application/json")
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Clone)]
/// Injectable strategies around each POST.
struct Hooks {
    before_post: Option<BeforePostHook>,
    on_response: Option<ResponseHook>,
    success_check: SuccessCheck,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            before_post: None,
            on_response: None,
            success_check: Arc::new(HttpResponse::is_success),
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before_post", &self.before_post.is_some())
            .field("on_response", &self.on_response.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
/// Authentication credentials for websms API calls.
///
/// Use [`Auth::bearer`] with an API access token, or [`Auth::basic`] with
/// account username and password.
pub enum Auth {
    /// HTTP Basic authentication.
    Basic { username: Username, password: Password },
    /// Bearer token authentication.
    Bearer(AccessToken),
}

impl Auth {
    /// Create [`Auth::Basic`] and validate that both parts are non-empty.
    pub fn basic(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Basic {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    /// Create [`Auth::Bearer`] and validate that the token is non-empty after trimming.
    pub fn bearer(token: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::Bearer(AccessToken::new(token)?))
    }

    /// Pick credentials from `options` according to its authentication type.
    ///
    /// Fails with [`ValidationError::MissingCredential`] when a credential the
    /// scheme needs is absent or empty.
    pub fn from_options(options: &WebSmsApiOptions) -> Result<Self, ValidationError> {
        match options.authentication_type {
            AuthenticationType::Basic => {
                let username = required(&options.username, Username::FIELD)?;
                let password = required(&options.password, Password::FIELD)?;
                Self::basic(username, password)
            }
            AuthenticationType::Bearer => {
                Self::bearer(required(&options.access_token, AccessToken::FIELD)?)
            }
        }
    }

    fn header_value(&self) -> String {
        match self {
            Self::Basic { username, password } => {
                let credentials = format!("{}:{}", username.as_str(), password.as_str());
                format!("Basic {}", STANDARD.encode(credentials))
            }
            Self::Bearer(token) => format!("Bearer {}", token.as_str()),
        }
    }
}

fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    value
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::MissingCredential { field })
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`WebSmsClient`].
///
/// This error preserves:
/// - HTTP-level failures (transport failures or a failed success check),
/// - API-level failures (`statusCode` other than 2000/2001),
/// - validation/encoding/parse failures.
pub enum WebSmsError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The response did not pass the success check (non-2xx by default).
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// websms answered with a non-success `statusCode`.
    #[error("API error: {status_code:?} {status_message}")]
    Api {
        status_code: StatusCode,
        status_message: String,
    },

    /// Request body could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] Box<dyn StdError + Send + Sync>),

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`WebSmsClient`].
///
/// Use this when you need to customize the base URL, timeout, user-agent, or
/// the request/response hooks.
pub struct WebSmsClientBuilder {
    auth: Auth,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    hooks: Hooks,
}

impl WebSmsClientBuilder {
    /// Create a builder with the default base URL and no timeout/user-agent override.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
            hooks: Hooks::default(),
        }
    }

    /// Override the API root; endpoint paths are resolved against it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Called with the endpoint URL and JSON body before every POST.
    pub fn on_before_post(mut self, hook: impl Fn(&str, &str) + Send + Sync + 'static) -> Self {
        self.hooks.before_post = Some(Arc::new(hook));
        self
    }

    /// Called with every response before the success check; may replace it.
    pub fn on_response(
        mut self,
        hook: impl Fn(HttpResponse) -> HttpResponse + Send + Sync + 'static,
    ) -> Self {
        self.hooks.on_response = Some(Arc::new(hook));
        self
    }

    /// Replace the default 2xx success check.
    pub fn success_check(
        mut self,
        check: impl Fn(&HttpResponse) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.hooks.success_check = Arc::new(check);
        self
    }

    /// Build a [`WebSmsClient`].
    pub fn build(self) -> Result<WebSmsClient, WebSmsError> {
        parse_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| WebSmsError::Transport(Box::new(err)))?;

        Ok(WebSmsClient {
            auth: self.auth,
            base_url: self.base_url,
            hooks: self.hooks,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn parse_base_url(input: &str) -> Result<url::Url, ValidationError> {
    let invalid = || ValidationError::InvalidUrl {
        field: BASE_URL_FIELD,
        input: input.to_owned(),
    };
    let url = url::Url::parse(input.trim()).map_err(|_| invalid())?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    Ok(url)
}

fn endpoint_url(base_url: &str, endpoint: &str) -> Result<url::Url, ValidationError> {
    parse_base_url(base_url)?
        .join(endpoint)
        .map_err(|_| ValidationError::InvalidUrl {
            field: BASE_URL_FIELD,
            input: base_url.to_owned(),
        })
}

#[derive(Clone)]
/// High-level websms client.
///
/// This type orchestrates JSON encoding, authentication, and response parsing.
/// Requests go to `<base_url>/rest/smsmessaging/text` and
/// `<base_url>/rest/smsmessaging/binary`.
pub struct WebSmsClient {
    auth: Auth,
    base_url: String,
    hooks: Hooks,
    http: Arc<dyn HttpTransport>,
}

impl WebSmsClient {
    /// Create a client using the default base URL.
    ///
    /// For more customization, use [`WebSmsClient::builder`].
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_owned(),
            hooks: Hooks::default(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> WebSmsClientBuilder {
        WebSmsClientBuilder::new(auth)
    }

    /// Build a client from configuration options.
    ///
    /// Credentials are checked against the selected authentication type before
    /// anything is sent.
    pub fn from_options(options: &WebSmsApiOptions) -> Result<Self, WebSmsError> {
        let auth = Auth::from_options(options)?;
        Self::builder(auth).base_url(options.base_url.clone()).build()
    }

    /// Send a text SMS.
    ///
    /// Errors:
    /// - [`WebSmsError::HttpStatus`] when the response fails the success check,
    /// - [`WebSmsError::Api`] when websms returns a non-success `statusCode`,
    /// - [`WebSmsError::Parse`] when the body is not a send response.
    pub async fn send_text_message(
        &self,
        request: &SendTextSms,
    ) -> Result<MessageSendResponse, WebSmsError> {
        let body = crate::transport::encode_text_sms_json(request)
            .map_err(|err| WebSmsError::Encode(Box::new(err)))?;
        self.post(TEXT_ENDPOINT, body).await
    }

    /// Send a binary SMS (for example one built with [`SendBinarySms::from_texts`]).
    ///
    /// Errors are the same as for [`WebSmsClient::send_text_message`].
    pub async fn send_binary_message(
        &self,
        request: &SendBinarySms,
    ) -> Result<MessageSendResponse, WebSmsError> {
        let body = crate::transport::encode_binary_sms_json(request)
            .map_err(|err| WebSmsError::Encode(Box::new(err)))?;
        self.post(BINARY_ENDPOINT, body).await
    }

    async fn post(&self, endpoint: &str, body: String) -> Result<MessageSendResponse, WebSmsError> {
        let url = endpoint_url(&self.base_url, endpoint)?;

        if let Some(hook) = &self.hooks.before_post {
            hook(url.as_str(), &body);
        }
        tracing::debug!(endpoint = %url, "posting websms request");

        let authorization = self.auth.header_value();
        let response = self
            .http
            .post_json(url.as_str(), &authorization, body)
            .await
            .map_err(WebSmsError::Transport)?;

        let response = match &self.hooks.on_response {
            Some(hook) => hook(response),
            None => response,
        };

        if !(self.hooks.success_check)(&response) {
            tracing::warn!(endpoint = %url, status = response.status, "websms request failed");
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(WebSmsError::HttpStatus {
                status: response.status,
                body,
            });
        }

        let parsed = crate::transport::decode_message_send_json_response(&response.body)
            .map_err(|err| WebSmsError::Parse(Box::new(err)))?;

        if !parsed.status_code.is_success() {
            tracing::warn!(
                endpoint = %url,
                status_code = parsed.status_code.as_i32(),
                "websms rejected request"
            );
            return Err(WebSmsError::Api {
                status_code: parsed.status_code,
                status_message: parsed.status_message,
            });
        }

        tracing::debug!(
            transfer_id = parsed.transfer_id.as_deref(),
            sms_count = parsed.sms_count,
            "websms request accepted"
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::Value;

    use crate::domain::{MessageContent, RecipientAddress, SendOptions};

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_url: Option<String>,
        last_authorization: Option<String>,
        last_body: Option<String>,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_url: None,
                    last_authorization: None,
                    last_body: None,
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        fn last_request(&self) -> (Option<String>, Option<String>, Option<Value>) {
            let state = self.state.lock().unwrap();
            (
                state.last_url.clone(),
                state.last_authorization.clone(),
                state
                    .last_body
                    .as_deref()
                    .map(|body| serde_json::from_str(body).unwrap()),
            )
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_json<'a>(
            &'a self,
            url: &'a str,
            authorization: &'a str,
            body: String,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.last_url = Some(url.to_owned());
                    state.last_authorization = Some(authorization.to_owned());
                    state.last_body = Some(body);
                    (state.response_status, state.response_body.clone())
                };
                Ok(HttpResponse { status, body })
            })
        }
    }

    const OK_RESPONSE: &str = r#"
    {
      "clientMessageId": "cm-1",
      "smsCount": 1,
      "statusCode": 2000,
      "statusMessage": "OK",
      "transferId": "0051949fe700053c4615"
    }
    "#;

    fn make_client_with_hooks(auth: Auth, transport: FakeTransport, hooks: Hooks) -> WebSmsClient {
        WebSmsClient {
            auth,
            base_url: "https://example.invalid/".to_owned(),
            hooks,
            http: Arc::new(transport),
        }
    }

    fn make_client(auth: Auth, transport: FakeTransport) -> WebSmsClient {
        make_client_with_hooks(auth, transport, Hooks::default())
    }

    fn text_request() -> SendTextSms {
        SendTextSms::new(
            vec![RecipientAddress::new("436761234567").unwrap()],
            MessageContent::new("hello").unwrap(),
            SendOptions::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn send_text_posts_json_with_bearer_auth() {
        let transport = FakeTransport::new(200, OK_RESPONSE);
        let client = make_client(Auth::bearer("token-1").unwrap(), transport.clone());

        let response = client.send_text_message(&text_request()).await.unwrap();
        assert_eq!(response.status_code, StatusCode::new(2000));
        assert_eq!(response.sms_count, 1);
        assert_eq!(response.transfer_id.as_deref(), Some("0051949fe700053c4615"));

        let (url, authorization, body) = transport.last_request();
        assert_eq!(
            url.as_deref(),
            Some("https://example.invalid/rest/smsmessaging/text")
        );
        assert_eq!(authorization.as_deref(), Some("Bearer token-1"));
        let body = body.unwrap();
        assert_eq!(body["messageContent"], "hello");
        assert_eq!(body["recipientAddressList"][0], "436761234567");
    }

    #[tokio::test]
    async fn send_binary_posts_to_binary_endpoint_with_basic_auth() {
        let transport = FakeTransport::new(200, OK_RESPONSE);
        let client = make_client(Auth::basic("user", "pass").unwrap(), transport.clone());

        let request = SendBinarySms::from_texts(
            vec![RecipientAddress::new("436761234567").unwrap()],
            &["one", "two"],
            SendOptions::default(),
        )
        .unwrap();
        client.send_binary_message(&request).await.unwrap();

        let (url, authorization, body) = transport.last_request();
        assert_eq!(
            url.as_deref(),
            Some("https://example.invalid/rest/smsmessaging/binary")
        );
        assert_eq!(authorization.as_deref(), Some("Basic dXNlcjpwYXNz"));
        let body = body.unwrap();
        assert_eq!(body["userDataHeaderPresent"], true);
        assert_eq!(body["messageContent"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn queued_status_is_success() {
        let json = r#"{"smsCount": 1, "statusCode": 2001, "statusMessage": "queued"}"#;
        let client = make_client(Auth::bearer("t").unwrap(), FakeTransport::new(200, json));
        let response = client.send_text_message(&text_request()).await.unwrap();
        assert_eq!(response.status_code.as_i32(), 2001);
    }

    #[tokio::test]
    async fn non_success_status_code_maps_to_api_error() {
        let json = r#"{"statusCode": 4001, "statusMessage": "Invalid Credentials"}"#;
        let client = make_client(Auth::bearer("bad").unwrap(), FakeTransport::new(200, json));

        let err = client.send_text_message(&text_request()).await.unwrap_err();
        match err {
            WebSmsError::Api {
                status_code,
                status_message,
            } => {
                assert_eq!(status_code.as_i32(), 4001);
                assert!(status_code.is_auth_error());
                assert_eq!(status_message, "Invalid Credentials");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_success_http_status_maps_to_http_error() {
        let client = make_client(Auth::bearer("t").unwrap(), FakeTransport::new(500, "oops"));
        let err = client.send_text_message(&text_request()).await.unwrap_err();
        assert!(matches!(
            err,
            WebSmsError::HttpStatus {
                status: 500,
                body: Some(_)
            }
        ));
    }

    #[tokio::test]
    async fn empty_http_body_maps_to_none() {
        let client = make_client(Auth::bearer("t").unwrap(), FakeTransport::new(503, "  "));
        let err = client.send_text_message(&text_request()).await.unwrap_err();
        assert!(matches!(
            err,
            WebSmsError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn invalid_json_maps_to_parse_error() {
        let client = make_client(
            Auth::bearer("t").unwrap(),
            FakeTransport::new(200, "{ not json }"),
        );
        let err = client.send_text_message(&text_request()).await.unwrap_err();
        assert!(matches!(err, WebSmsError::Parse(_)));
    }

    #[tokio::test]
    async fn hooks_observe_request_and_can_override_success_check() {
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let seen_before = Arc::clone(&seen);
        let hooks = Hooks {
            before_post: Some(Arc::new(move |endpoint: &str, _body: &str| {
                seen_before.lock().unwrap().push(endpoint.to_owned());
            })),
            on_response: Some(Arc::new(|mut response: HttpResponse| {
                response.body = OK_RESPONSE.to_owned();
                response
            })),
            success_check: Arc::new(|response: &HttpResponse| response.status == 202),
        };
        let client = make_client_with_hooks(
            Auth::bearer("t").unwrap(),
            FakeTransport::new(202, "ignored"),
            hooks,
        );

        let response = client.send_text_message(&text_request()).await.unwrap();
        assert_eq!(response.client_message_id.as_deref(), Some("cm-1"));
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["https://example.invalid/rest/smsmessaging/text".to_owned()]
        );
    }

    #[tokio::test]
    async fn custom_success_check_can_reject_2xx() {
        let hooks = Hooks {
            success_check: Arc::new(|response: &HttpResponse| response.status == 200),
            ..Hooks::default()
        };
        let client = make_client_with_hooks(
            Auth::bearer("t").unwrap(),
            FakeTransport::new(202, OK_RESPONSE),
            hooks,
        );
        let err = client.send_text_message(&text_request()).await.unwrap_err();
        assert!(matches!(err, WebSmsError::HttpStatus { status: 202, .. }));
    }

    #[test]
    fn auth_constructors_validate_inputs() {
        assert!(Auth::bearer("   ").is_err());
        assert!(Auth::basic("", "pass").is_err());
        assert!(Auth::basic("user", "").is_err());
    }

    #[test]
    fn auth_from_options_requires_scheme_credentials() {
        let options = WebSmsApiOptions {
            authentication_type: AuthenticationType::Basic,
            username: Some("user".to_owned()),
            ..Default::default()
        };
        assert!(matches!(
            Auth::from_options(&options),
            Err(ValidationError::MissingCredential {
                field: Password::FIELD
            })
        ));

        let options = WebSmsApiOptions {
            authentication_type: AuthenticationType::Bearer,
            access_token: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            Auth::from_options(&options),
            Err(ValidationError::MissingCredential {
                field: AccessToken::FIELD
            })
        ));

        let options = WebSmsApiOptions {
            authentication_type: AuthenticationType::Bearer,
            access_token: Some("tok".to_owned()),
            ..Default::default()
        };
        assert!(matches!(Auth::from_options(&options), Ok(Auth::Bearer(_))));
    }

    #[test]
    fn from_options_rejects_missing_credentials_before_building() {
        let err = WebSmsClient::from_options(&WebSmsApiOptions::default()).err();
        assert!(matches!(
            err,
            Some(WebSmsError::Validation(ValidationError::MissingCredential {
                field: Username::FIELD
            }))
        ));
    }

    #[test]
    fn builder_base_url_is_validated_and_applied() {
        let client = WebSmsClient::builder(Auth::bearer("t").unwrap())
            .base_url("https://example.invalid/sandbox/")
            .build()
            .unwrap();
        assert_eq!(client.base_url, "https://example.invalid/sandbox/");
        assert_eq!(
            endpoint_url(&client.base_url, TEXT_ENDPOINT)
                .unwrap()
                .as_str(),
            "https://example.invalid/rest/smsmessaging/text"
        );

        let err = WebSmsClient::builder(Auth::bearer("t").unwrap())
            .base_url("not a url")
            .build()
            .err();
        assert!(matches!(
            err,
            Some(WebSmsError::Validation(ValidationError::InvalidUrl { .. }))
        ));
    }
}
