//! Shared fixtures for integration tests.

#![allow(dead_code)]

use soc_scraper::soc::{CodeValue, Endpoint, Fetch, SchedulePayload, SocApiError};
use std::cell::{Cell, RefCell};

pub const MENU_PAGE: &str = include_str!("../data/menu_page.html");
pub const DEPARTMENTS_JSON: &str = include_str!("../data/departments.json");
pub const SUBJECTS_JSON: &str = include_str!("../data/subjects.json");
pub const RESULTS_PAGE: &str = "<html><body><table class=\"tbrdr\"></table></body></html>";

/// A [`Fetch`] backed by fixture files that records what it was asked for.
pub struct FixtureFetcher {
    pub menu_page: String,
    pub failing: Option<(Endpoint, u16)>,
    pub menu_fetches: Cell<usize>,
    pub submitted: RefCell<Vec<SchedulePayload>>,
    pub requested_terms: RefCell<Vec<String>>,
}

impl Default for FixtureFetcher {
    fn default() -> Self {
        Self::with_menu_page(MENU_PAGE)
    }
}

impl FixtureFetcher {
    pub fn with_menu_page(html: &str) -> Self {
        Self {
            menu_page: html.to_owned(),
            failing: None,
            menu_fetches: Cell::new(0),
            submitted: RefCell::new(Vec::new()),
            requested_terms: RefCell::new(Vec::new()),
        }
    }

    /// Make one endpoint answer with a non-success status.
    pub fn failing(mut self, endpoint: Endpoint, status: u16) -> Self {
        self.failing = Some((endpoint, status));
        self
    }

    fn check(&self, endpoint: Endpoint) -> Result<(), SocApiError> {
        match self.failing {
            Some((failing, status)) if failing == endpoint => {
                Err(SocApiError::Transport { endpoint, status })
            }
            _ => Ok(()),
        }
    }

    fn records(&self, endpoint: Endpoint, body: &str) -> Result<Vec<CodeValue>, SocApiError> {
        self.check(endpoint)?;
        soc_scraper::soc::json::decode(endpoint, body)
    }
}

impl Fetch for FixtureFetcher {
    fn fetch_menu_page(&self) -> Result<String, SocApiError> {
        self.check(Endpoint::MenuPage)?;
        self.menu_fetches.set(self.menu_fetches.get() + 1);
        Ok(self.menu_page.clone())
    }

    fn fetch_departments(&self, term: &str) -> Result<Vec<CodeValue>, SocApiError> {
        self.requested_terms.borrow_mut().push(term.to_owned());
        self.records(Endpoint::Departments, DEPARTMENTS_JSON)
    }

    fn fetch_subjects(&self, term: &str) -> Result<Vec<CodeValue>, SocApiError> {
        self.requested_terms.borrow_mut().push(term.to_owned());
        self.records(Endpoint::Subjects, SUBJECTS_JSON)
    }

    fn submit_schedule_search(&self, payload: &SchedulePayload) -> Result<String, SocApiError> {
        self.check(Endpoint::Results)?;
        self.submitted.borrow_mut().push(payload.clone());
        Ok(RESULTS_PAGE.to_owned())
    }
}
