// SmartZone HTTP client
//
// Wraps `reqwest::Client` with controller URL construction, service-ticket
// attachment, and response decoding. Session handling and the endpoint
// groups (zones, AP groups, APs, controller) are inherent methods in their
// own modules; this one only owns transport mechanics.

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::{Credentials, ServiceTicket};
use crate::error::Error;
use crate::query::ListOptions;
use crate::transport::TransportConfig;

/// API version used when the caller doesn't pick one.
pub const DEFAULT_API_VERSION: &str = "8_1";

/// Management port of the controller's northbound interface.
pub const DEFAULT_PORT: u16 = 8443;

/// Error body the controller sends with non-2xx statuses.
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error_type: Option<String>,
}

/// Async client for the SmartZone public REST API.
///
/// Owns the service ticket for its session. `login` and `logout` take
/// `&mut self`; every resource call takes `&self` and fails with
/// [`Error::NotAuthenticated`] before touching the network when no ticket is
/// held. A client is meant to be driven by one caller at a time: use one
/// client per concurrent task, each with its own ticket.
pub struct SmartZoneClient {
    pub(crate) http: reqwest::Client,
    controller_url: Url,
    public_url: Url,
    scg_url: Url,
    api_version: String,
    pub(crate) credentials: Credentials,
    pub(crate) ticket: Option<ServiceTicket>,
    pub(crate) controller_version: Option<String>,
}

impl SmartZoneClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `controller_url` is the controller root, e.g. `https://10.0.0.5:8443`;
    /// see [`controller_url_for_host`](Self::controller_url_for_host).
    pub fn new(
        controller_url: Url,
        api_version: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, controller_url, api_version, credentials)
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        controller_url: Url,
        api_version: &str,
        credentials: Credentials,
    ) -> Result<Self, Error> {
        let controller_url = normalize_root(controller_url);
        let public_url = controller_url.join(&format!("wsg/api/public/v{api_version}/"))?;
        let scg_url = controller_url.join("wsg/api/scg/")?;

        Ok(Self {
            http,
            controller_url,
            public_url,
            scg_url,
            api_version: api_version.to_owned(),
            credentials,
            ticket: None,
            controller_version: None,
        })
    }

    /// The standard controller root for a hostname: `https://{host}:8443/`.
    pub fn controller_url_for_host(host: &str) -> Result<Url, Error> {
        let host = host.trim().trim_end_matches('/');
        Ok(Url::parse(&format!("https://{host}:{DEFAULT_PORT}/"))?)
    }

    /// The controller root URL.
    pub fn controller_url(&self) -> &Url {
        &self.controller_url
    }

    /// Base of the public API: `{root}/wsg/api/public/v{version}/`.
    pub fn base_url(&self) -> &Url {
        &self.public_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    /// Whether a service ticket is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.ticket.is_some()
    }

    /// Controller software version reported by the last successful login.
    pub fn controller_version(&self) -> Option<&str> {
        self.controller_version.as_deref()
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{public base}/{segments...}`, each segment percent-encoded.
    pub(crate) fn public_url(&self, segments: &[&str]) -> Result<Url, Error> {
        endpoint(&self.public_url, segments)
    }

    /// `{root}/wsg/api/scg/{segments...}`, the controller's internal API.
    pub(crate) fn scg_url(&self, segments: &[&str]) -> Result<Url, Error> {
        endpoint(&self.scg_url, segments)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn ticket(&self) -> Result<&ServiceTicket, Error> {
        self.ticket.as_ref().ok_or(Error::NotAuthenticated)
    }

    /// Attach `serviceTicket` followed by the option pairs.
    fn authorize(
        &self,
        builder: RequestBuilder,
        options: &ListOptions,
    ) -> Result<RequestBuilder, Error> {
        let ticket = self.ticket()?;
        Ok(builder
            .query(&[("serviceTicket", ticket.as_str())])
            .query(&options.query_pairs()))
    }

    /// Send a ticketed GET and decode the body.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        options: &ListOptions,
    ) -> Result<T, Error> {
        debug!("GET {} params={:?}", url, options.query_pairs());

        let builder = self.authorize(self.http.get(url), options)?;
        let resp = builder.send().await.map_err(scrub_transport)?;
        handle_response(resp).await
    }

    /// Send a ticketed POST with a JSON body and decode the response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
        options: &ListOptions,
    ) -> Result<T, Error> {
        debug!("POST {} params={:?}", url, options.query_pairs());

        let builder = self.authorize(self.http.post(url).json(body), options)?;
        let resp = builder.send().await.map_err(scrub_transport)?;
        handle_response(resp).await
    }

    /// Send a ticketed PATCH with a JSON body; the controller answers 204.
    pub(crate) async fn patch(&self, url: Url, body: &(impl Serialize + Sync)) -> Result<(), Error> {
        debug!("PATCH {}", url);

        let builder = self.authorize(self.http.patch(url).json(body), &ListOptions::default())?;
        let resp = builder.send().await.map_err(scrub_transport)?;
        handle_empty(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

pub(crate) async fn handle_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await.map_err(scrub_transport)?;
        decode_body(body)
    } else {
        Err(parse_error(status, resp).await)
    }
}

pub(crate) async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

/// Wrap a reqwest error with the query string removed from its URL, so the
/// service ticket never shows up in messages or logs.
pub(crate) fn scrub_transport(mut err: reqwest::Error) -> Error {
    if let Some(url) = err.url_mut() {
        url.set_query(None);
    }
    Error::Transport(err)
}

/// Decode a JSON body, keeping a preview of it in the error.
pub(crate) fn decode_body<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body,
    })
}

pub(crate) async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Error::Authentication {
            message: format!("service ticket rejected (HTTP 401): {}", preview(&raw)),
        };
    }

    match serde_json::from_str::<ErrorResponse>(&raw) {
        Ok(err) if err.message.is_some() || err.error_code.is_some() => {
            let message = err.message.unwrap_or_else(|| status.to_string());
            Error::Api {
                status: status.as_u16(),
                message: match err.error_type {
                    Some(kind) => format!("{message} ({kind})"),
                    None => message,
                },
                code: err.error_code,
            }
        }
        _ => Error::Api {
            status: status.as_u16(),
            message: if raw.is_empty() {
                status.to_string()
            } else {
                preview(&raw).to_owned()
            },
            code: None,
        },
    }
}

pub(crate) fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}

// ── URL helpers ──────────────────────────────────────────────────────

/// Drop query/fragment and make sure the path ends with `/` so joins append.
fn normalize_root(mut url: Url) -> Url {
    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, Error> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
