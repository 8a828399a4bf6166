use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::protocol::GetProfileRequest;
use crate::request::HttpTransport;
use crate::session::TokenSource;
use crate::{ProfileUpdated, RegisterStudentRequest, StudentProfile, UpdateProfileRequest};

impl<T: HttpTransport, S: TokenSource> ApiClient<T, S> {
    /// `POST /students/register/student`
    pub async fn register_student(&self, req: &RegisterStudentRequest) -> ApiResult<serde_json::Value> {
        self.call(req).await
    }

    /// `GET /students/profile`
    pub async fn get_profile(&self) -> ApiResult<StudentProfile> {
        self.call(&GetProfileRequest).await
    }

    /// `PUT /students/profile`
    pub async fn update_profile(&self, req: &UpdateProfileRequest) -> ApiResult<ProfileUpdated> {
        self.call(req).await
    }
}

#[cfg(test)]
mod tests {
    use crate::protocol::HttpMethod;
    use crate::request::tests::MockTransport;
    use crate::session::{KeyValueStore, MemoryStore};
    use crate::{ApiClient, ClientConfig, RegisterStudentRequest, STORAGE_TOKEN_KEY, UpdateProfileRequest};

    fn client() -> (ApiClient<MockTransport, MemoryStore>, MockTransport) {
        let transport = MockTransport::new();
        let storage = MemoryStore::new();
        storage.set(STORAGE_TOKEN_KEY, "tok");
        (
            ApiClient::new(ClientConfig::default(), transport.clone(), storage),
            transport,
        )
    }

    #[tokio::test]
    async fn register_returns_body_unchanged() {
        let (client, transport) = client();
        transport.respond(201, r#"{"message":"Student registered","student_id":5}"#);

        let req = RegisterStudentRequest {
            email: "s@b.com".to_string(),
            password: "pw".to_string(),
            full_name: "Stu Dent".to_string(),
            national_id: "123".to_string(),
            institution: "TUK".to_string(),
            course: "Eng".to_string(),
            year_of_study: 1,
        };
        let body = client.register_student(&req).await.unwrap();

        assert_eq!(body["student_id"], 5);
        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Post);
        assert!(sent.url.ends_with("/students/register/student"));
    }

    #[tokio::test]
    async fn profile_get_and_update() {
        let (client, transport) = client();
        transport
            .respond(
                200,
                r#"{"full_name":"Stu","national_id":"123","institution":"TUK","course":"Eng","year_of_study":"2"}"#,
            )
            .respond(
                200,
                r#"{"student":{"full_name":"Stu D","national_id":"123","institution":"TUK","course":"Eng","year_of_study":3}}"#,
            );

        let profile = client.get_profile().await.unwrap();
        assert_eq!(profile.year_of_study, Some(2));
        assert_eq!(transport.last().method, HttpMethod::Get);

        let update = UpdateProfileRequest {
            full_name: "Stu D".to_string(),
            institution: profile.institution.clone(),
            course: profile.course.clone(),
            year_of_study: 3,
        };
        let updated = client.update_profile(&update).await.unwrap();
        assert_eq!(updated.student.full_name, "Stu D");

        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Put);
        assert!(sent.url.ends_with("/students/profile"));
        assert_eq!(sent.header("Authorization"), Some("Bearer tok"));
    }
}
