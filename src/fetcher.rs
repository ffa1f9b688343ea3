//! Client for the Aura `OC_ActivitySearchController.searchForActivitiesApplyFilters` action.

use http::StatusCode;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue,
    InvalidHeaderValue, ORIGIN, REFERER, USER_AGENT,
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;
use url::form_urlencoded;

use crate::settings::{SearchFilters, SessionSettings};

const APEX_CLASS: &str = "OC_ActivitySearchController";
const APEX_METHOD: &str = "searchForActivitiesApplyFilters";
const COMMUNITY_APP: &str = "siteforce:communityApp";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid session header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
    #[error("Failed to encode search filters: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Upstream response, handed to the normalizer whatever its status.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FiltersSpec<'a> {
    location: LocationFilter<'a>,
    additional_filters: AdditionalFilters<'a>,
}

#[derive(Serialize)]
struct LocationFilter<'a> {
    latitude: f64,
    longitude: f64,
    radius: u32,
    address: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdditionalFilters<'a> {
    audiences: &'a str,
    program_types: &'a str,
    open_for_registration: bool,
    no_cost_trips: bool,
    chapters: &'a str,
}

#[derive(Clone)]
pub struct ActivityFetcher {
    client: reqwest::Client,
    upstream_url: Url,
    headers: HeaderMap,
    body: String,
}

impl ActivityFetcher {
    pub fn new(
        upstream_url: Url,
        session: &SessionSettings,
        filters: &SearchFilters,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            client: reqwest::Client::new(),
            upstream_url,
            headers: session_headers(session)?,
            body: search_form(session, filters)?,
        })
    }

    /// URL-encoded form body sent with every request.
    #[doc(hidden)]
    pub fn form_body(&self) -> &str {
        &self.body
    }

    pub async fn fetch(&self) -> Result<RawResponse, FetchError> {
        debug!(url = %self.upstream_url, "requesting activity search");
        let response = self
            .client
            .post(self.upstream_url.as_str())
            .headers(self.headers.clone())
            .body(self.body.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "activity search returned a non-success status");
        }
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "activity search responded");
        Ok(RawResponse { status, body })
    }
}

fn session_headers(session: &SessionSettings) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_str(&session.user_agent)?);
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&session.accept_language)?);
    headers.insert(REFERER, HeaderValue::from_str(&session.referer)?);
    headers.insert(ORIGIN, HeaderValue::from_str(&session.origin)?);
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded;charset=UTF-8"),
    );
    headers.insert(COOKIE, HeaderValue::from_str(&session.cookie)?);
    headers.insert(
        HeaderName::from_static("x-sfdc-lds-endpoints"),
        HeaderValue::from_str(&format!(
            "ApexActionController.execute:{APEX_CLASS}.{APEX_METHOD}"
        ))?,
    );
    headers.insert(
        HeaderName::from_static("x-sfdc-page-scope-id"),
        HeaderValue::from_str(&session.page_scope_id)?,
    );
    headers.insert(
        HeaderName::from_static("x-sfdc-request-id"),
        HeaderValue::from_str(&session.request_id)?,
    );
    headers.insert(
        HeaderName::from_static("x-b3-traceid"),
        HeaderValue::from_str(&session.trace_id)?,
    );
    headers.insert(
        HeaderName::from_static("x-b3-spanid"),
        HeaderValue::from_str(&session.span_id)?,
    );
    headers.insert(HeaderName::from_static("x-b3-sampled"), HeaderValue::from_static("0"));
    headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
    headers.insert(HeaderName::from_static("sec-fetch-dest"), HeaderValue::from_static("empty"));
    headers.insert(HeaderName::from_static("sec-fetch-mode"), HeaderValue::from_static("cors"));
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(HeaderName::from_static("sec-gpc"), HeaderValue::from_static("1"));
    headers.insert(HeaderName::from_static("priority"), HeaderValue::from_static("u=0"));
    Ok(headers)
}

fn search_form(session: &SessionSettings, filters: &SearchFilters) -> Result<String, FetchError> {
    let filters_json = serde_json::to_string(&FiltersSpec {
        location: LocationFilter {
            latitude: filters.latitude,
            longitude: filters.longitude,
            radius: filters.radius,
            address: &filters.address,
        },
        additional_filters: AdditionalFilters {
            audiences: &filters.audiences,
            program_types: &filters.program_types,
            open_for_registration: filters.open_for_registration,
            no_cost_trips: filters.no_cost_trips,
            chapters: &filters.chapters,
        },
    })?;

    let message = json!({
        "actions": [{
            "id": "425;a",
            "descriptor": "aura://ApexActionController/ACTION$execute",
            "callingDescriptor": "UNKNOWN",
            "params": {
                "namespace": "",
                "classname": APEX_CLASS,
                "method": APEX_METHOD,
                "params": {"filtersJsonSpecs": filters_json},
                "cacheable": false,
                "isContinuation": false
            }
        }]
    });

    let mut loaded = Map::new();
    loaded.insert(
        format!("APPLICATION@markup://{COMMUNITY_APP}"),
        Value::String(session.app_version.clone()),
    );
    let context = json!({
        "mode": "PROD",
        "fwuid": session.fwuid,
        "app": COMMUNITY_APP,
        "loaded": loaded,
        "dn": [],
        "globals": {},
        "uad": true
    });

    Ok(form_urlencoded::Serializer::new(String::new())
        .append_pair("message", &message.to_string())
        .append_pair("aura.context", &context.to_string())
        .append_pair("aura.pageURI", &format!("/s/?chapters={}", filters.chapters))
        .append_pair("aura.token", "null")
        .finish())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn session() -> SessionSettings {
        SessionSettings {
            user_agent: "test-agent".to_string(),
            accept_language: "en-US".to_string(),
            origin: "https://activities.outdoors.org".to_string(),
            referer: "https://activities.outdoors.org/".to_string(),
            cookie: "pctrk=abc; CookieConsentPolicy=0:1".to_string(),
            page_scope_id: "scope".to_string(),
            request_id: "request".to_string(),
            trace_id: "trace".to_string(),
            span_id: "span".to_string(),
            fwuid: "fwuid-value".to_string(),
            app_version: "1296_test".to_string(),
        }
    }

    fn filters() -> SearchFilters {
        SearchFilters {
            latitude: 0.0,
            longitude: 0.0,
            radius: 100,
            address: String::new(),
            audiences: "--all--".to_string(),
            program_types: "--all--".to_string(),
            chapters: "0015000001Sg06BAAR".to_string(),
            open_for_registration: false,
            no_cost_trips: false,
        }
    }

    fn form_fields(body: &str) -> HashMap<String, String> {
        form_urlencoded::parse(body.as_bytes()).into_owned().collect()
    }

    #[test]
    fn test_search_form_message() {
        let body = search_form(&session(), &filters()).unwrap();
        let fields = form_fields(&body);

        let message: Value = serde_json::from_str(&fields["message"]).unwrap();
        let action = &message["actions"][0];
        assert_eq!(action["descriptor"], "aura://ApexActionController/ACTION$execute");
        assert_eq!(action["params"]["classname"], "OC_ActivitySearchController");
        assert_eq!(action["params"]["method"], "searchForActivitiesApplyFilters");
        assert_eq!(action["params"]["cacheable"], false);

        // filtersJsonSpecs is a JSON document carried as a string
        let specs = action["params"]["params"]["filtersJsonSpecs"].as_str().unwrap();
        let specs: Value = serde_json::from_str(specs).unwrap();
        assert_eq!(specs["location"]["radius"], 100);
        assert_eq!(specs["location"]["address"], "");
        assert_eq!(specs["additionalFilters"]["audiences"], "--all--");
        assert_eq!(specs["additionalFilters"]["programTypes"], "--all--");
        assert_eq!(specs["additionalFilters"]["openForRegistration"], false);
        assert_eq!(specs["additionalFilters"]["noCostTrips"], false);
        assert_eq!(specs["additionalFilters"]["chapters"], "0015000001Sg06BAAR");
    }

    #[test]
    fn test_search_form_aura_fields() {
        let body = search_form(&session(), &filters()).unwrap();
        let fields = form_fields(&body);

        let context: Value = serde_json::from_str(&fields["aura.context"]).unwrap();
        assert_eq!(context["mode"], "PROD");
        assert_eq!(context["fwuid"], "fwuid-value");
        assert_eq!(
            context["loaded"]["APPLICATION@markup://siteforce:communityApp"],
            "1296_test"
        );
        assert_eq!(fields["aura.pageURI"], "/s/?chapters=0015000001Sg06BAAR");
        assert_eq!(fields["aura.token"], "null");
    }

    #[test]
    fn test_session_headers() {
        let headers = session_headers(&session()).unwrap();
        assert_eq!(headers[COOKIE], "pctrk=abc; CookieConsentPolicy=0:1");
        assert_eq!(
            headers["x-sfdc-lds-endpoints"],
            "ApexActionController.execute:OC_ActivitySearchController.searchForActivitiesApplyFilters"
        );
        assert_eq!(headers["x-sfdc-request-id"], "request");
        assert_eq!(headers["x-b3-sampled"], "0");
        assert_eq!(headers["priority"], "u=0");
        assert_eq!(headers["sec-fetch-site"], "same-origin");
        assert_eq!(
            headers[CONTENT_TYPE],
            "application/x-www-form-urlencoded;charset=UTF-8"
        );
    }

    #[test]
    fn test_invalid_header_value_rejected() {
        let mut session = session();
        session.cookie = "bad\nvalue".to_string();
        let err = session_headers(&session).unwrap_err();
        assert!(matches!(err, FetchError::InvalidHeader(_)));
    }
}
