use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::protocol::{CreateApplicationRequest, MyApplicationsRequest};
use crate::request::HttpTransport;
use crate::session::TokenSource;
use crate::Application;

impl<T: HttpTransport, S: TokenSource> ApiClient<T, S> {
    /// `GET /applications/my-applications`, newest first as the backend orders them.
    pub async fn my_applications(&self) -> ApiResult<Vec<Application>> {
        self.call(&MyApplicationsRequest).await
    }

    /// `POST /applications` as `multipart/form-data`.
    pub async fn create_application(
        &self,
        req: &CreateApplicationRequest,
    ) -> ApiResult<serde_json::Value> {
        self.call(req).await
    }
}

#[cfg(test)]
mod tests {
    use crate::protocol::{CreateApplicationRequest, HttpMethod};
    use crate::request::tests::MockTransport;
    use crate::request::{FilePart, RequestBody};
    use crate::session::MemoryStore;
    use crate::{ApiClient, ApplicationStatus, ClientConfig};

    fn client() -> (ApiClient<MockTransport, MemoryStore>, MockTransport) {
        let transport = MockTransport::new();
        (
            ApiClient::new(ClientConfig::default(), transport.clone(), MemoryStore::new()),
            transport,
        )
    }

    #[tokio::test]
    async fn my_applications_normalizes_documents() {
        let (client, transport) = client();
        transport.respond(
            200,
            r#"[
                {"id":2,"status":"REJECTED","document_url":"uploads/x.pdf","created_at":"2025-03-01T10:00:00Z"},
                {"id":1,"status":"PENDING","document_url":null,"created_at":"2025-02-01T10:00:00Z"}
            ]"#,
        );

        let apps = client.my_applications().await.unwrap();
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].status, ApplicationStatus::Rejected);
        assert_eq!(apps[0].document_url, vec!["uploads/x.pdf"]);
        assert!(apps[1].document_url.is_empty());
    }

    #[tokio::test]
    async fn create_application_sends_multipart() {
        let (client, transport) = client();
        transport.respond(201, r#"{"message":"Application submitted"}"#);

        let req = CreateApplicationRequest {
            cycle_year: 2026,
            amount_requested: "30000".to_string(),
            documents: vec![FilePart {
                file_name: "id.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                bytes: b"%PDF".to_vec(),
            }],
        };
        let body = client.create_application(&req).await.unwrap();
        assert_eq!(body["message"], "Application submitted");

        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Post);
        assert!(sent.url.ends_with("/applications"));
        assert!(matches!(sent.body, RequestBody::Multipart(ref f) if f.fields.len() == 3));
        assert_eq!(sent.header("Content-Type"), None);
    }
}
