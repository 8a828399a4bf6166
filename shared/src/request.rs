use crate::config::CredentialsMode;
use crate::error::ApiResult;
use crate::protocol::HttpMethod;
use serde::Serialize;

// =========================================================
// Core abstraction (HTTP interface)
// =========================================================

/// One file inside a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(FilePart),
}

/// `multipart/form-data` fields in insertion order. Repeated names are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, FormValue)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl ToString) -> Self {
        self.fields
            .push((name.to_string(), FormValue::Text(value.to_string())));
        self
    }

    pub fn file(mut self, name: &str, file: FilePart) -> Self {
        self.fields.push((name.to_string(), FormValue::File(file)));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(String),
    Multipart(MultipartForm),
}

impl RequestBody {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> ApiResult<Self> {
        Ok(Self::Json(serde_json::to_string(value)?))
    }
}

/// A fully assembled request, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub credentials: CredentialsMode,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: RequestBody::Empty,
            credentials: CredentialsMode::default(),
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        if let RequestBody::Json(_) = body {
            self = self.with_header("Content-Type", "application/json");
        }
        self.body = body;
        self
    }

    pub fn with_credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP transport.
///
/// `?Send` because browser futures hold `JsValue`s.
#[async_trait::async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Records every request and replays canned responses in order.
    #[derive(Clone, Default)]
    pub(crate) struct MockTransport {
        pub requests: Rc<RefCell<Vec<HttpRequest>>>,
        responses: Rc<RefCell<VecDeque<ApiResult<HttpResponse>>>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn respond(&self, status: u16, body: &str) -> &Self {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
            self
        }

        pub(crate) fn fail(&self, message: &str) -> &Self {
            self.responses
                .borrow_mut()
                .push_back(Err(ApiError::network(message)));
            self
        }

        pub(crate) fn last(&self) -> HttpRequest {
            self.requests
                .borrow()
                .last()
                .cloned()
                .expect("no request was sent")
        }

        pub(crate) fn count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpTransport for MockTransport {
        async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
            self.requests.borrow_mut().push(req);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::network("no canned response")))
        }
    }

    #[test]
    fn json_body_sets_content_type() {
        let req = HttpRequest::new("http://x/api", HttpMethod::Post)
            .with_body(RequestBody::json(&serde_json::json!({"a": 1})).unwrap());
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.body, RequestBody::Json(r#"{"a":1}"#.to_string()));
    }

    #[test]
    fn multipart_body_leaves_content_type_to_the_transport() {
        let form = MultipartForm::new().text("cycle_year", 2026);
        let req = HttpRequest::new("http://x/api", HttpMethod::Post)
            .with_body(RequestBody::Multipart(form));
        assert_eq!(req.header("Content-Type"), None);
    }

    #[test]
    fn ok_means_2xx() {
        let ok = |status| HttpResponse { status, body: String::new() }.ok();
        assert!(ok(200));
        assert!(ok(204));
        assert!(!ok(199));
        assert!(!ok(302));
        assert!(!ok(500));
    }
}
