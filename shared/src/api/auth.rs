use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::request::HttpTransport;
use crate::session::TokenSource;
use crate::{LoginRequest, LoginResponse};

impl<T: HttpTransport, S: TokenSource> ApiClient<T, S> {
    /// `POST /auth/login`. Does not touch the session; the caller stores the result.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.call(&req).await
    }
}

#[cfg(test)]
mod tests {
    use crate::protocol::HttpMethod;
    use crate::request::RequestBody;
    use crate::request::tests::MockTransport;
    use crate::session::{MemoryStore, SessionStore};
    use crate::{ApiClient, ClientConfig, Role};

    #[tokio::test]
    async fn login_posts_credentials_and_feeds_the_session() {
        let transport = MockTransport::new();
        let storage = MemoryStore::new();
        let client = ApiClient::new(ClientConfig::default(), transport.clone(), storage.clone());
        transport.respond(
            200,
            r#"{"token":"t1","user":{"id":1,"email":"a@b.com","role":"STUDENT"}}"#,
        );

        let res = client.login("a@b.com", "secret").await.unwrap();

        let req = transport.last();
        assert_eq!(req.method, HttpMethod::Post);
        assert!(req.url.ends_with("/auth/login"));
        assert_eq!(
            req.body,
            RequestBody::Json(r#"{"email":"a@b.com","password":"secret"}"#.to_string())
        );

        let mut session = SessionStore::rehydrate(storage.clone());
        session.login(&res.token, res.user.clone()).unwrap();
        assert_eq!(session.current_user().map(|u| u.role), Some(Role::Student));
        assert_eq!(transport.count(), 1);
    }

    #[tokio::test]
    async fn rejected_login_is_an_error() {
        let transport = MockTransport::new();
        let client = ApiClient::new(ClientConfig::default(), transport.clone(), MemoryStore::new());
        transport.respond(401, r#"{"message":"Invalid credentials"}"#);

        let err = client.login("a@b.com", "wrong").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "Invalid credentials");
    }
}
