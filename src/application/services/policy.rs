//! Policy upload service
//!
//! Sends the managed bookmarks envelope to the Chrome Policy API. Every failure
//! (token, serialization, transport, non-200 status) ends up in a [`SubmitOutcome`].

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::{batch_modify_url, ApplicationResult, BatchModifyRequest};
use crate::domain::{Envelope, OrgUnit};
use crate::infrastructure::traits::{HttpClient, HttpRequest, TokenProvider};

/// Result of one upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// True only for HTTP 200
    pub success: bool,
    /// HTTP status, `None` when no response was received
    pub status_code: Option<u16>,
    /// Response body, or the error description when no response was received
    pub body_text: String,
}

impl SubmitOutcome {
    pub fn from_response(status: u16, body: String) -> Self {
        Self {
            success: status == 200,
            status_code: Some(status),
            body_text: body,
        }
    }

    pub fn from_error(description: impl Into<String>) -> Self {
        Self {
            success: false,
            status_code: None,
            body_text: description.into(),
        }
    }
}

/// URL and serialized body of a `batchModify` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub url: String,
    pub body: String,
}

/// Service for pushing managed bookmarks to an org unit.
pub struct PolicyService {
    token: Arc<dyn TokenProvider>,
    http: Arc<dyn HttpClient>,
    api_base_url: String,
    customer: String,
    policy_schema: String,
}

impl PolicyService {
    pub fn new(
        token: Arc<dyn TokenProvider>,
        http: Arc<dyn HttpClient>,
        api_base_url: impl Into<String>,
        customer: impl Into<String>,
        policy_schema: impl Into<String>,
    ) -> Self {
        Self {
            token,
            http,
            api_base_url: api_base_url.into(),
            customer: customer.into(),
            policy_schema: policy_schema.into(),
        }
    }

    /// Build URL and body without sending anything.
    pub fn prepare(
        &self,
        envelope: &Envelope,
        org_unit: &OrgUnit,
    ) -> ApplicationResult<PreparedRequest> {
        let request =
            BatchModifyRequest::managed_bookmarks(envelope.clone(), org_unit, &self.policy_schema);
        Ok(PreparedRequest {
            url: batch_modify_url(&self.api_base_url, &self.customer, org_unit),
            body: serde_json::to_string(&request)?,
        })
    }

    /// Overwrite the org unit's managed bookmarks. One attempt, no retry.
    #[instrument(level = "debug", skip(self, envelope, org_unit), fields(org_unit = %org_unit))]
    pub fn submit(&self, envelope: &Envelope, org_unit: &OrgUnit) -> SubmitOutcome {
        let prepared = match self.prepare(envelope, org_unit) {
            Ok(prepared) => prepared,
            Err(e) => return SubmitOutcome::from_error(e.to_string()),
        };

        let token = match self.token.access_token() {
            Ok(token) => token,
            Err(e) => {
                warn!("access token unavailable: {}", e);
                return SubmitOutcome::from_error(format!("access token: {e}"));
            }
        };

        debug!("POST {} ({} bytes)", prepared.url, prepared.body.len());
        let request = HttpRequest {
            url: prepared.url,
            bearer_token: token,
            body: prepared.body,
        };

        match self.http.post_json(&request) {
            Ok(response) => {
                info!("policy API responded with {}", response.status);
                SubmitOutcome::from_response(response.status, response.body)
            }
            Err(e) => {
                warn!("request failed: {}", e);
                SubmitOutcome::from_error(format!("request failed: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::build_envelope;
    use crate::infrastructure::traits::HttpResponse;
    use std::io;
    use std::sync::Mutex;

    struct FixedToken(Option<&'static str>);

    impl TokenProvider for FixedToken {
        fn access_token(&self) -> io::Result<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| io::Error::other("not logged in"))
        }
    }

    #[derive(Default)]
    struct RecordingClient {
        status: u16,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl HttpClient for RecordingClient {
        fn post_json(&self, request: &HttpRequest) -> io::Result<HttpResponse> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(HttpResponse {
                status: self.status,
                body: format!("status {}", self.status),
            })
        }
    }

    fn service(token: FixedToken, http: Arc<RecordingClient>) -> PolicyService {
        PolicyService::new(
            Arc::new(token),
            http,
            "https://policy.test",
            "my_customer",
            "chrome.users.ManagedBookmarks",
        )
    }

    #[test]
    fn given_ok_response_when_submitting_then_success_and_bearer_sent() {
        let http = Arc::new(RecordingClient {
            status: 200,
            ..Default::default()
        });
        let svc = service(FixedToken(Some("tok")), http.clone());
        let ou = OrgUnit::parse("orgunits/abc").unwrap();

        let outcome = svc.submit(&build_envelope(Vec::new(), "Top"), &ou);

        assert!(outcome.success);
        assert_eq!(outcome.status_code, Some(200));
        let seen = http.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].bearer_token, "tok");
        assert_eq!(
            seen[0].url,
            "https://policy.test/v1/customers/my_customer/policies/orgunits/abc:batchModify"
        );
    }

    #[test]
    fn given_missing_token_when_submitting_then_failure_without_request() {
        let http = Arc::new(RecordingClient::default());
        let svc = service(FixedToken(None), http.clone());
        let ou = OrgUnit::parse("abc").unwrap();

        let outcome = svc.submit(&build_envelope(Vec::new(), "Top"), &ou);

        assert!(!outcome.success);
        assert_eq!(outcome.status_code, None);
        assert!(outcome.body_text.contains("not logged in"));
        assert!(http.seen.lock().unwrap().is_empty());
    }
}
