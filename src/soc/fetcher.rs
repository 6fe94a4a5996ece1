//! HTTP access to the four Schedule of Classes endpoints.

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::soc::errors::{Endpoint, SocApiError};
use crate::soc::json;
use crate::soc::models::{CodeValue, SchedulePayload};
use crate::utils::fmt_duration;

pub const DEFAULT_BASE_URL: &str = "https://act.ucsd.edu/scheduleOfClasses";

const MENU_PATH: &str = "/scheduleOfClassesStudent.htm";
const RESULTS_PATH: &str = "/scheduleOfClassesStudentResult.htm";
const DEPARTMENTS_PATH: &str = "/department-list.json?selectedTerm=";
const SUBJECTS_PATH: &str = "/subject-list.json?selectedTerm=";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(2);

/// Source of raw pages and JSON records from the schedule site.
pub trait Fetch {
    /// GET the menu page HTML.
    fn fetch_menu_page(&self) -> Result<String, SocApiError>;
    /// GET the department list for a term.
    fn fetch_departments(&self, term: &str) -> Result<Vec<CodeValue>, SocApiError>;
    /// GET the subject list for a term.
    fn fetch_subjects(&self, term: &str) -> Result<Vec<CodeValue>, SocApiError>;
    /// POST a schedule search and return the results page HTML.
    fn submit_schedule_search(&self, payload: &SchedulePayload) -> Result<String, SocApiError>;
}

/// Absolute URLs for each endpoint, derived from a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub menu: String,
    pub results: String,
    pub departments: String,
    pub subjects: String,
}

impl Endpoints {
    pub fn with_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            menu: format!("{base}{MENU_PATH}"),
            results: format!("{base}{RESULTS_PATH}"),
            departments: format!("{base}{DEPARTMENTS_PATH}"),
            subjects: format!("{base}{SUBJECTS_PATH}"),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::with_base(DEFAULT_BASE_URL)
    }
}

/// How connections are managed between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionMode {
    /// One client with a cookie store, reused for every request.
    #[default]
    Session,
    /// A fresh client (no cookies, no pooled connections) per request.
    OneShot,
}

/// [`Fetch`] over blocking `reqwest`.
///
/// A single instance is meant to be driven sequentially by one
/// [`ScheduleClient`](crate::soc::ScheduleClient); separate scrapers against
/// the same host should each own their own fetcher.
#[derive(Debug)]
pub struct HttpFetcher {
    endpoints: Endpoints,
    timeout: Duration,
    session: Option<Client>,
}

impl HttpFetcher {
    pub fn new(
        endpoints: Endpoints,
        mode: ConnectionMode,
        timeout: Duration,
    ) -> Result<Self, SocApiError> {
        let session = match mode {
            ConnectionMode::Session => {
                Some(build_client(true, timeout).map_err(SocApiError::Client)?)
            }
            ConnectionMode::OneShot => None,
        };
        Ok(Self {
            endpoints,
            timeout,
            session,
        })
    }

    /// Build and send one request, attributing every failure to `endpoint`.
    fn send(
        &self,
        endpoint: Endpoint,
        url: &str,
        request: impl FnOnce(&Client) -> RequestBuilder,
    ) -> Result<String, SocApiError> {
        let to_error = |source| SocApiError::Request { endpoint, source };
        let client = match &self.session {
            Some(client) => client.clone(),
            None => build_client(false, self.timeout).map_err(to_error)?,
        };

        let start = Instant::now();
        let response = request(&client).send().map_err(to_error)?;
        warn_if_slow(endpoint, url, start);
        read_body(endpoint, response)
    }

    fn get(&self, endpoint: Endpoint, url: &str) -> Result<String, SocApiError> {
        self.send(endpoint, url, |client| client.get(url))
    }
}

fn build_client(cookies: bool, timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .cookie_store(cookies)
        .timeout(timeout)
        .build()
}

fn warn_if_slow(endpoint: Endpoint, url: &str, start: Instant) {
    let elapsed = start.elapsed();
    if elapsed > SLOW_REQUEST_THRESHOLD {
        warn!(%endpoint, url, duration = fmt_duration(elapsed), "slow request");
    }
}

/// Reject anything but `200 OK` before the body is touched.
pub fn check_status(endpoint: Endpoint, status: StatusCode) -> Result<(), SocApiError> {
    if status != StatusCode::OK {
        return Err(SocApiError::Transport {
            endpoint,
            status: status.as_u16(),
        });
    }
    Ok(())
}

fn read_body(endpoint: Endpoint, response: Response) -> Result<String, SocApiError> {
    let status = response.status();
    debug!(%endpoint, status = status.as_u16(), url = %response.url(), "response received");
    check_status(endpoint, status)?;
    response
        .text()
        .map_err(|source| SocApiError::Request { endpoint, source })
}

impl Fetch for HttpFetcher {
    fn fetch_menu_page(&self) -> Result<String, SocApiError> {
        self.get(Endpoint::MenuPage, &self.endpoints.menu)
    }

    fn fetch_departments(&self, term: &str) -> Result<Vec<CodeValue>, SocApiError> {
        let url = format!("{}{}", self.endpoints.departments, urlencoding::encode(term));
        let body = self.get(Endpoint::Departments, &url)?;
        json::decode(Endpoint::Departments, &body)
    }

    fn fetch_subjects(&self, term: &str) -> Result<Vec<CodeValue>, SocApiError> {
        let url = format!("{}{}", self.endpoints.subjects, urlencoding::encode(term));
        let body = self.get(Endpoint::Subjects, &url)?;
        json::decode(Endpoint::Subjects, &body)
    }

    fn submit_schedule_search(&self, payload: &SchedulePayload) -> Result<String, SocApiError> {
        let url = &self.endpoints.results;
        self.send(Endpoint::Results, url, |client| {
            client
                .post(url)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .form(&payload.as_pairs())
        })
    }
}
