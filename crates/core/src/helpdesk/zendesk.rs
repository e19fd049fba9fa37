//! Zendesk REST API client.
//!
//! Authenticates with HTTP Basic using `{account_email}/token` as the
//! username and the API token as the password. Listing goes through the
//! search endpoint with a fixed status filter; closed tickets are excluded.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ZendeskConfig;

use super::{HelpdeskError, Ticket, TicketSink, TicketSource};

/// Search query selecting every non-closed ticket.
const TICKET_QUERY: &str =
    "type:ticket status:open status:pending status:solved status:hold";

/// Zendesk API client, implementing both `TicketSource` and `TicketSink`.
#[derive(Debug)]
pub struct ZendeskClient {
    client: Client,
    base_url: String,
    account_email: String,
    api_key: String,
}

impl ZendeskClient {
    /// Create a new Zendesk client.
    ///
    /// Fails fast when the domain, account email or API token is missing;
    /// credential problems are configuration errors, never deferred to the
    /// first request.
    pub fn new(config: ZendeskConfig) -> Result<Self, HelpdeskError> {
        if config.domain.is_empty() {
            return Err(HelpdeskError::NotConfigured(
                "Zendesk domain is required".to_string(),
            ));
        }
        if config.account_email.is_empty() {
            return Err(HelpdeskError::NotConfigured(
                "Zendesk account email is required".to_string(),
            ));
        }
        if config.api_key.is_empty() {
            return Err(HelpdeskError::NotConfigured(
                "Zendesk API token is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| format!("https://{}.zendesk.com/api/v2", config.domain));

        Ok(Self {
            client,
            base_url,
            account_email: config.account_email,
            api_key: config.api_key,
        })
    }

    /// Basic auth username per the Zendesk token scheme.
    fn auth_user(&self) -> String {
        format!("{}/token", self.account_email)
    }
}

#[async_trait]
impl TicketSource for ZendeskClient {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Ticket>, HelpdeskError> {
        let url = format!("{}/search.json", self.base_url);

        debug!("Zendesk ticket search: page={}", page);

        let response = self
            .client
            .get(&url)
            .basic_auth(self.auth_user(), Some(&self.api_key))
            .query(&[("page", page.to_string().as_str()), ("query", TICKET_QUERY)])
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Err(HelpdeskError::NotConfigured(
                "Invalid Zendesk credentials".to_string(),
            ));
        }
        if status == 429 {
            return Err(HelpdeskError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HelpdeskError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let search_result: ZendeskSearchResponse = response.json().await.map_err(|e| {
            HelpdeskError::ParseError(format!("Failed to parse ticket search response: {}", e))
        })?;

        Ok(search_result.results)
    }
}

#[async_trait]
impl TicketSink for ZendeskClient {
    async fn update_ticket_tags(&self, id: u64, tags: &[String]) -> Result<(), HelpdeskError> {
        let url = format!("{}/tickets/{}.json", self.base_url, id);

        debug!("Zendesk ticket update: id={}, tags={}", id, tags.len());

        let response = self
            .client
            .put(&url)
            .basic_auth(self.auth_user(), Some(&self.api_key))
            .json(&TicketUpdateBody {
                ticket: TicketTagsBody { tags },
            })
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Err(HelpdeskError::NotConfigured(
                "Invalid Zendesk credentials".to_string(),
            ));
        }
        if status == 429 {
            return Err(HelpdeskError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HelpdeskError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(())
    }
}

// ============================================================================
// Zendesk API Wire Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct ZendeskSearchResponse {
    #[serde(default)]
    results: Vec<Ticket>,
}

#[derive(Debug, Serialize)]
struct TicketUpdateBody<'a> {
    ticket: TicketTagsBody<'a>,
}

#[derive(Debug, Serialize)]
struct TicketTagsBody<'a> {
    tags: &'a [String],
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> ZendeskConfig {
        ZendeskConfig {
            domain: "acme".to_string(),
            account_email: "ops@acme.example".to_string(),
            api_key: "zd-token".to_string(),
            base_url: Some(base_url.to_string()),
            timeout_secs: 5,
        }
    }

    fn page_body(tickets: serde_json::Value) -> serde_json::Value {
        serde_json::json!({ "results": tickets })
    }

    #[test]
    fn test_new_rejects_missing_credentials() {
        let mut config = test_config("http://localhost");
        config.api_key = String::new();
        let err = ZendeskClient::new(config).unwrap_err();
        assert!(matches!(err, HelpdeskError::NotConfigured(_)));

        let mut config = test_config("http://localhost");
        config.account_email = String::new();
        assert!(ZendeskClient::new(config).is_err());

        let mut config = test_config("http://localhost");
        config.domain = String::new();
        assert!(ZendeskClient::new(config).is_err());
    }

    #[test]
    fn test_default_base_url_from_domain() {
        let mut config = test_config("unused");
        config.base_url = None;
        let client = ZendeskClient::new(config).unwrap();
        assert_eq!(client.base_url, "https://acme.zendesk.com/api/v2");
    }

    #[tokio::test]
    async fn test_list_tickets_paginates_until_empty_page() {
        let server = MockServer::start().await;

        // base64("ops@acme.example/token:zd-token")
        let auth = "Basic b3BzQGFjbWUuZXhhbXBsZS90b2tlbjp6ZC10b2tlbg==";

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("page", "1"))
            .and(query_param("query", TICKET_QUERY))
            .and(header("authorization", auth))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
                serde_json::json!([
                    {"id": 1, "description": "a", "tags": []},
                    {"id": 2, "description": "b", "tags": ["vip"]}
                ]),
            )))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
                serde_json::json!([{"id": 3, "description": "c", "tags": []}]),
            )))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("page", "3"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(page_body(serde_json::json!([]))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ZendeskClient::new(test_config(&server.uri())).unwrap();
        let tickets = client.list_tickets().await.unwrap();

        // Three pages requested, no fourth: any page=4 request would hit an
        // unmatched route and fail the listing.
        let ids: Vec<u64> = tickets.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_list_tickets_fails_when_a_page_errors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
                serde_json::json!([{"id": 1, "description": "a", "tags": []}]),
            )))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = ZendeskClient::new(test_config(&server.uri())).unwrap();
        let err = client.list_tickets().await.unwrap_err();
        assert!(matches!(err, HelpdeskError::ApiError { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_invalid_credentials_map_to_not_configured() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = ZendeskClient::new(test_config(&server.uri())).unwrap();
        let err = client.fetch_page(1).await.unwrap_err();
        assert!(matches!(err, HelpdeskError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_update_ticket_tags_sends_wrapped_body() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/tickets/42.json"))
            .and(wiremock::matchers::body_json(serde_json::json!({
                "ticket": {"tags": ["vip", "intent:refund"]}
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ZendeskClient::new(test_config(&server.uri())).unwrap();
        let tags = vec!["vip".to_string(), "intent:refund".to_string()];
        client.update_ticket_tags(42, &tags).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_failure_surfaces_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/tickets/7.json"))
            .respond_with(ResponseTemplate::new(422).set_body_string("bad tags"))
            .mount(&server)
            .await;

        let client = ZendeskClient::new(test_config(&server.uri())).unwrap();
        let err = client
            .update_ticket_tags(7, &["x".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, HelpdeskError::ApiError { status: 422, .. }));
    }
}
