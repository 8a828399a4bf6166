use crate::error::ApiResult;
use crate::request::{FilePart, MultipartForm, RequestBody};
use crate::{
    ApplicationList, ApplicationStatus, AuditLogList, LoginRequest, LoginResponse,
    ProfileUpdated, RegisterAdminRequest, RegisterStudentRequest, StudentProfile,
    UpdateProfileRequest,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// HTTP methods used by the backend API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Request/response contract of one backend endpoint.
pub trait ApiRequest {
    /// Decoded response body.
    type Response: DeserializeOwned;
    const METHOD: HttpMethod;
    /// Operation name used in error traces.
    const OPERATION: &'static str;

    /// Path below the API root.
    fn path(&self) -> String;

    /// Query parameters; `None` values are omitted.
    fn query(&self) -> Vec<(&'static str, Option<String>)> {
        Vec::new()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        Ok(RequestBody::Empty)
    }
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "auth.login";

    fn path(&self) -> String {
        "/auth/login".to_string()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        RequestBody::json(self)
    }
}

// =========================================================
// Students
// =========================================================

impl ApiRequest for RegisterStudentRequest {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "students.register";

    fn path(&self) -> String {
        "/students/register/student".to_string()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        RequestBody::json(self)
    }
}

/// Current student's profile
#[derive(Debug, Clone, Copy, Default)]
pub struct GetProfileRequest;

impl ApiRequest for GetProfileRequest {
    type Response = StudentProfile;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "students.profile";

    fn path(&self) -> String {
        "/students/profile".to_string()
    }
}

impl ApiRequest for UpdateProfileRequest {
    type Response = ProfileUpdated;
    const METHOD: HttpMethod = HttpMethod::Put;
    const OPERATION: &'static str = "students.update_profile";

    fn path(&self) -> String {
        "/students/profile".to_string()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        RequestBody::json(self)
    }
}

// =========================================================
// Applications (student side)
// =========================================================

/// Applications submitted by the signed-in student
#[derive(Debug, Clone, Copy, Default)]
pub struct MyApplicationsRequest;

impl ApiRequest for MyApplicationsRequest {
    type Response = Vec<crate::Application>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "applications.mine";

    fn path(&self) -> String {
        "/applications/my-applications".to_string()
    }
}

/// New funding application with supporting documents (multipart)
#[derive(Debug, Clone, PartialEq)]
pub struct CreateApplicationRequest {
    pub cycle_year: u32,
    pub amount_requested: String,
    pub documents: Vec<FilePart>,
}

impl ApiRequest for CreateApplicationRequest {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "applications.create";

    fn path(&self) -> String {
        "/applications".to_string()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        let form = self.documents.iter().cloned().fold(
            MultipartForm::new()
                .text("cycle_year", self.cycle_year)
                .text("amount_requested", &self.amount_requested),
            |form, file| form.file("documents", file),
        );
        Ok(RequestBody::Multipart(form))
    }
}

// =========================================================
// Admin
// =========================================================

/// All applications, optionally filtered by status
#[derive(Debug, Clone, Copy, Default)]
pub struct ListApplicationsRequest {
    pub status: Option<ApplicationStatus>,
}

impl ApiRequest for ListApplicationsRequest {
    type Response = ApplicationList;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "applications.list";

    fn path(&self) -> String {
        "/applications".to_string()
    }

    fn query(&self) -> Vec<(&'static str, Option<String>)> {
        vec![("status", self.status.map(|s| s.as_str().to_string()))]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateStatusRequest {
    #[serde(skip)]
    pub id: u64,
    pub status: ApplicationStatus,
    pub amount_allocated: Option<f64>,
}

impl ApiRequest for UpdateStatusRequest {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Patch;
    const OPERATION: &'static str = "applications.update_status";

    fn path(&self) -> String {
        format!("/applications/{}/status", self.id)
    }

    fn body(&self) -> ApiResult<RequestBody> {
        RequestBody::json(self)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AuditLogsRequest {
    pub application_id: u64,
}

impl ApiRequest for AuditLogsRequest {
    type Response = AuditLogList;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "applications.audit_logs";

    fn path(&self) -> String {
        format!("/applications/{}/audit-logs", self.application_id)
    }
}

impl ApiRequest for RegisterAdminRequest {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "users.register_admin";

    fn path(&self) -> String {
        "/users/admin".to_string()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        RequestBody::json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::FormValue;

    #[test]
    fn status_update_body_omits_the_id() {
        let req = UpdateStatusRequest {
            id: 12,
            status: ApplicationStatus::Approved,
            amount_allocated: Some(15000.0),
        };
        assert_eq!(req.path(), "/applications/12/status");
        assert_eq!(
            req.body().unwrap(),
            RequestBody::Json(r#"{"status":"APPROVED","amount_allocated":15000.0}"#.to_string())
        );
    }

    #[test]
    fn create_application_is_multipart_with_repeated_documents() {
        let doc = |name: &str| FilePart {
            file_name: name.to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![1, 2, 3],
        };
        let req = CreateApplicationRequest {
            cycle_year: 2026,
            amount_requested: "50000".to_string(),
            documents: vec![doc("id.pdf"), doc("fees.pdf")],
        };

        let RequestBody::Multipart(form) = req.body().unwrap() else {
            panic!("expected multipart body");
        };
        let names: Vec<&str> = form.fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["cycle_year", "amount_requested", "documents", "documents"]);
        assert_eq!(form.fields[0].1, FormValue::Text("2026".to_string()));
        assert!(matches!(&form.fields[3].1, FormValue::File(f) if f.file_name == "fees.pdf"));
    }

    #[test]
    fn list_filter_is_optional() {
        let all = ListApplicationsRequest::default();
        assert_eq!(all.query(), vec![("status", None)]);
        let pending = ListApplicationsRequest {
            status: Some(ApplicationStatus::Pending),
        };
        assert_eq!(pending.query(), vec![("status", Some("PENDING".to_string()))]);
    }
}
