//! Client configuration.
//!
//! Defaults target a local backend; `BURSARY_API_URL` and `BURSARY_ASSET_URL`
//! set at build time override them.

/// Defaults used when the build environment does not provide a value.
const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_ASSET_URL: &str = "http://localhost:5000";

/// `fetch` credentials mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsMode {
    Omit,
    SameOrigin,
    /// Send cookies cross-origin (the backend expects this)
    #[default]
    Include,
}

/// Shared configuration of every backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, no trailing slash
    pub base_url: String,
    /// Root that uploaded document paths are relative to, no trailing slash
    pub asset_url: String,
    pub credentials: CredentialsMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_ASSET_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl AsRef<str>, asset_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            asset_url: asset_url.as_ref().trim_end_matches('/').to_string(),
            credentials: CredentialsMode::default(),
        }
    }

    /// Reads the build-time overrides, falling back to the defaults.
    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("BURSARY_API_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(DEFAULT_API_URL),
            option_env!("BURSARY_ASSET_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(DEFAULT_ASSET_URL),
        )
    }

    pub fn with_credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = credentials;
        self
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        join(&self.base_url, path)
    }

    /// Absolute link for a stored document path. Absolute URLs pass through.
    pub fn document_href(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            join(&self.asset_url, path)
        }
    }
}

fn join(root: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", root, path)
    } else {
        format!("{}/{}", root, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_normalized() {
        let config = ClientConfig::new("https://api.example.org/api/", "https://files.example.org//");
        assert_eq!(config.base_url, "https://api.example.org/api");
        assert_eq!(config.url("/auth/login"), "https://api.example.org/api/auth/login");
        assert_eq!(config.url("auth/login"), "https://api.example.org/api/auth/login");
        assert_eq!(config.credentials, CredentialsMode::Include);
    }

    #[test]
    fn document_links() {
        let config = ClientConfig::default();
        assert_eq!(
            config.document_href("uploads/a.pdf"),
            "http://localhost:5000/uploads/a.pdf"
        );
        assert_eq!(
            config.document_href("/uploads/a.pdf"),
            "http://localhost:5000/uploads/a.pdf"
        );
        assert_eq!(
            config.document_href("https://cdn.example.org/a.pdf"),
            "https://cdn.example.org/a.pdf"
        );
    }
}
