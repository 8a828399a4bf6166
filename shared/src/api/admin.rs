use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::protocol::{AuditLogsRequest, ListApplicationsRequest, UpdateStatusRequest};
use crate::request::HttpTransport;
use crate::session::TokenSource;
use crate::{ApplicationList, ApplicationStatus, AuditLogList, RegisterAdminRequest};

impl<T: HttpTransport, S: TokenSource> ApiClient<T, S> {
    /// `GET /applications`; the `status` parameter is omitted for "all".
    pub async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> ApiResult<ApplicationList> {
        self.call(&ListApplicationsRequest { status }).await
    }

    /// `PATCH /applications/:id/status`
    pub async fn update_application_status(
        &self,
        id: u64,
        status: ApplicationStatus,
        amount_allocated: Option<f64>,
    ) -> ApiResult<serde_json::Value> {
        let req = UpdateStatusRequest {
            id,
            status,
            amount_allocated,
        };
        self.call(&req)
            .await
            .map_err(|e| e.in_op_with("admin.review", id.to_string()))
    }

    /// `GET /applications/:id/audit-logs`
    pub async fn audit_logs(&self, application_id: u64) -> ApiResult<AuditLogList> {
        self.call(&AuditLogsRequest { application_id }).await
    }

    /// `POST /users/admin`
    pub async fn register_admin(&self, req: &RegisterAdminRequest) -> ApiResult<serde_json::Value> {
        self.call(req).await
    }
}

#[cfg(test)]
mod tests {
    use crate::protocol::HttpMethod;
    use crate::request::RequestBody;
    use crate::request::tests::MockTransport;
    use crate::session::{KeyValueStore, MemoryStore};
    use crate::{ApiClient, ApplicationStatus, ClientConfig, RegisterAdminRequest, STORAGE_TOKEN_KEY};

    fn client() -> (ApiClient<MockTransport, MemoryStore>, MockTransport) {
        let transport = MockTransport::new();
        let storage = MemoryStore::new();
        storage.set(STORAGE_TOKEN_KEY, "admin-token");
        (
            ApiClient::new(ClientConfig::default(), transport.clone(), storage),
            transport,
        )
    }

    #[tokio::test]
    async fn list_unwraps_data_envelope() {
        let (client, transport) = client();
        transport.respond(
            200,
            r#"{"data":[{"id":4,"full_name":"A B","status":"PENDING","amount_requested":"1000.00",
                "document_url":"[\"u/1.pdf\",\"u/2.pdf\"]","created_at":"2025-01-01T00:00:00Z"}]}"#,
        );

        let list = client
            .list_applications(Some(ApplicationStatus::Pending))
            .await
            .unwrap();

        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0].document_url, vec!["u/1.pdf", "u/2.pdf"]);
        assert_eq!(list.data[0].amount_requested, Some(1000.0));
        assert!(transport.last().url.ends_with("/applications?status=PENDING"));
    }

    #[tokio::test]
    async fn status_update_patches_with_amount() {
        let (client, transport) = client();
        transport.respond(200, r#"{"message":"updated"}"#);

        client
            .update_application_status(9, ApplicationStatus::Approved, Some(2500.5))
            .await
            .unwrap();

        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Patch);
        assert!(sent.url.ends_with("/applications/9/status"));
        assert_eq!(
            sent.body,
            RequestBody::Json(r#"{"status":"APPROVED","amount_allocated":2500.5}"#.to_string())
        );
        assert_eq!(sent.header("Authorization"), Some("Bearer admin-token"));
    }

    #[tokio::test]
    async fn failed_review_carries_the_application_id() {
        let (client, transport) = client();
        transport.respond(404, r#"{"message":"Application not found"}"#);

        let err = client
            .update_application_status(77, ApplicationStatus::Rejected, None)
            .await
            .unwrap_err();

        assert_eq!(err.status, Some(404));
        assert_eq!(
            err.to_string(),
            "[HTTP_STATUS] Application not found | trace: applications.update_status -> admin.review(77)"
        );
    }

    #[tokio::test]
    async fn audit_logs_decode_entries() {
        let (client, transport) = client();
        transport.respond(
            200,
            r#"{"audit_logs":[{"id":1,"user_id":3,"admin_email":"root@b.com","action":"APPROVED",
                "old_value":{"status":"PENDING"},"new_value":{"status":"APPROVED","amount_allocated":500},
                "created_at":"2025-04-02T09:15:00Z"}]}"#,
        );

        let logs = client.audit_logs(4).await.unwrap();
        assert!(transport.last().url.ends_with("/applications/4/audit-logs"));
        assert_eq!(logs.audit_logs.len(), 1);
        assert_eq!(logs.audit_logs[0].admin_email, "root@b.com");
    }

    #[tokio::test]
    async fn register_admin_posts_json() {
        let (client, transport) = client();
        transport.respond(201, r#"{"id":10}"#);

        let req = RegisterAdminRequest {
            email: "new@b.com".to_string(),
            password: "pw".to_string(),
            full_name: "New Admin".to_string(),
        };
        client.register_admin(&req).await.unwrap();

        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Post);
        assert!(sent.url.ends_with("/users/admin"));
    }
}
