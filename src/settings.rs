use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use url::Url;

/// Session artifacts captured from a browser visit to activities.outdoors.org.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSettings {
    pub user_agent: String,
    pub accept_language: String,
    pub origin: String,
    pub referer: String,
    pub cookie: String,
    pub page_scope_id: String,
    pub request_id: String,
    pub trace_id: String,
    pub span_id: String,
    pub fwuid: String,
    pub app_version: String,
}

/// Filters sent inside `filtersJsonSpecs`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchFilters {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: u32,
    pub address: String,
    pub audiences: String,
    pub program_types: String,
    pub chapters: String,
    pub open_for_registration: bool,
    pub no_cost_trips: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub upstream_url: Url,
    pub activity_base_url: String,
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
    pub session: SessionSettings,
    pub search: SearchFilters,
}

const DEFAULT_COOKIE: &str = "renderCtx=%7B%22pageId%22%3A%223e01151f-cdd6-4058-af41-906813477461%22%2C%22schema%22%3A%22Published%22%2C%22viewType%22%3A%22Published%22%2C%22brandingSetId%22%3A%22457e5b18-486f-4d74-97c2-cc6e6662c03a%22%2C%22audienceIds%22%3A%226AuUN0000001lD2%2C6AuUN0000001lD1%2C6AuUN0000002FMN%22%7D; CookieConsentPolicy=0:1; LSKey-c$CookieConsentPolicy=0:1; pctrk=843a204b-8e06-4e18-b893-eb4e4b616028; _gcl_au=1.1.1317254722.1750805931";

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // APP_PORT, APP_SESSION__COOKIE, APP_SEARCH__CHAPTERS, ...
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default(
                "upstream_url",
                "https://activities.outdoors.org/s/sfsites/aura?r=135&aura.ApexAction.execute=1",
            )?
            .set_default(
                "activity_base_url",
                "https://activities.outdoors.org/s/oc-activity/",
            )?
            .set_default("debug", false)?
            .set_default("enable_swagger", true)?
            .set_default("port", 8081)?
            .set_default(
                "session.user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:139.0) Gecko/20100101 Firefox/139.0",
            )?
            .set_default("session.accept_language", "en-US,en;q=0.5")?
            .set_default("session.origin", "https://activities.outdoors.org")?
            .set_default("session.referer", "https://activities.outdoors.org/")?
            .set_default("session.cookie", DEFAULT_COOKIE)?
            .set_default(
                "session.page_scope_id",
                "d188486d-32f1-41ed-8594-51b92a3349b6",
            )?
            .set_default("session.request_id", "2218902000000f217e")?
            .set_default("session.trace_id", "92ad774e97511890")?
            .set_default("session.span_id", "23f721a599592d41")?
            .set_default(
                "session.fwuid",
                "VXlnM1FET1BLV0NVVUNZMW9MNmU3UWdLNVAwNUkzRVNnOFJ1eVRYdHBvVVExMi42MjkxNDU2LjE2Nzc3MjE2",
            )?
            .set_default("session.app_version", "1296_E-0fs7eMs-UxUK_92StDMQ")?
            .set_default("search.latitude", 0.0)?
            .set_default("search.longitude", 0.0)?
            .set_default("search.radius", 100)?
            .set_default("search.address", "")?
            .set_default("search.audiences", "--all--")?
            .set_default("search.program_types", "--all--")?
            .set_default("search.chapters", "0015000001Sg06BAAR")?
            .set_default("search.open_for_registration", false)?
            .set_default("search.no_cost_trips", false)?
            .build()?;

        config.try_deserialize()
    }
}
