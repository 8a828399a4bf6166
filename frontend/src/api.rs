use crate::web::{FetchTransport, LocalStorage};
use bursary_shared::{ApiClient, ClientConfig, RequestSeq, Ticket};
use leptos::prelude::*;

/// The application's backend client: browser `fetch`, token read from LocalStorage.
pub type BursaryApi = ApiClient<FetchTransport, LocalStorage>;

pub fn provide_api() -> BursaryApi {
    let api = ApiClient::new(ClientConfig::from_build_env(), FetchTransport, LocalStorage);
    provide_context(api.clone());
    api
}

/// Fetches the client from Context.
pub fn use_api() -> BursaryApi {
    use_context::<BursaryApi>().expect("BursaryApi should be provided")
}

/// Orders one page's requests. A result is applied only while its ticket is the
/// newest and the page is still mounted.
#[derive(Clone, Copy)]
pub struct RequestTracker(RwSignal<RequestSeq>);

impl RequestTracker {
    pub fn new() -> Self {
        Self(RwSignal::new(RequestSeq::new()))
    }

    /// `None` once the owning page has been disposed.
    pub fn begin(&self) -> Option<Ticket> {
        self.0.try_update_untracked(|seq| seq.begin())
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0
            .try_with_untracked(|seq| seq.is_current(ticket))
            .unwrap_or(false)
    }
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}
