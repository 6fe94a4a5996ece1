//! The Schedule of Classes client: term discovery, lookups, and schedule search.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

use crate::soc::errors::SocApiError;
use crate::soc::extract;
use crate::soc::fetcher::Fetch;
use crate::soc::models::{CodeValue, DepartmentMap, SchedulePayload, TermMap};
use crate::utils::fmt_duration;

/// Separates the prefix of a subject label (`USE-Computer Science`) from its name.
const SUBJECT_LABEL_DELIMITER: char = '-';

/// Default result sink, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "schedule.html";

/// Construction-time behavior of a [`ScheduleClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Reload the terms with a second menu page fetch right after the first,
    /// keeping the second mapping.
    ///
    /// This costs one extra request at startup. Turn it off to trust the
    /// first load, which only checks the mapping is non-empty. Both paths
    /// fail construction on an empty mapping.
    pub preload_terms: bool,
    /// Where each fetched results page is written. `None` disables the sink.
    pub output_path: Option<PathBuf>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            preload_terms: true,
            output_path: Some(PathBuf::from(DEFAULT_OUTPUT_PATH)),
        }
    }
}

/// Client for the Schedule of Classes site.
///
/// Terms are loaded once at construction and trusted for the client's
/// lifetime. The search form, by contrast, is re-read from the menu page on
/// every schedule request since its hidden tokens go stale.
pub struct ScheduleClient<F> {
    fetcher: F,
    terms: TermMap,
    output_path: Option<PathBuf>,
}

impl<F: Fetch> ScheduleClient<F> {
    /// Fetch the menu page and load the available terms.
    pub fn new(fetcher: F, options: ClientOptions) -> Result<Self, SocApiError> {
        let start = Instant::now();
        let mut terms = Self::load_terms(&fetcher)?;
        if options.preload_terms {
            debug!(count = terms.len(), "reloading terms");
            terms = Self::load_terms(&fetcher)?;
        }
        if terms.is_empty() {
            return Err(SocApiError::Initialization);
        }

        info!(
            count = terms.len(),
            duration = fmt_duration(start.elapsed()),
            "loaded terms"
        );
        Ok(Self {
            fetcher,
            terms,
            output_path: options.output_path,
        })
    }

    fn load_terms(fetcher: &F) -> Result<TermMap, SocApiError> {
        let html = fetcher.fetch_menu_page()?;
        extract::parse_terms(&html)
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The terms loaded at construction.
    pub fn get_terms(&self) -> Result<&TermMap, SocApiError> {
        if self.terms.is_empty() {
            return Err(SocApiError::Initialization);
        }
        Ok(&self.terms)
    }

    fn validate_term(&self, term: &str) -> Result<(), SocApiError> {
        if self.terms.contains_key(term) {
            return Ok(());
        }
        Err(SocApiError::InvalidTerm {
            term: term.to_owned(),
            known: Some(self.terms.keys().cloned().collect()),
        })
    }

    /// Department code → name for a term. Later duplicate codes win.
    pub fn get_departments(&self, term: &str) -> Result<DepartmentMap, SocApiError> {
        self.validate_term(term)?;
        let departments: DepartmentMap = self
            .fetcher
            .fetch_departments(term)?
            .into_iter()
            .map(|d| (d.code.trim().to_owned(), d.value.trim().to_owned()))
            .collect();
        debug!(term, count = departments.len(), "fetched departments");
        Ok(departments)
    }

    /// Subjects offered in a term, with the label prefix stripped.
    pub fn get_subjects(&self, term: &str) -> Result<Vec<CodeValue>, SocApiError> {
        self.validate_term(term)?;
        let mut subjects = self.fetcher.fetch_subjects(term)?;
        for subject in &mut subjects {
            subject.code = subject.code.trim().to_owned();
            subject.value = strip_subject_prefix(&subject.value).to_owned();
        }
        debug!(term, count = subjects.len(), "fetched subjects");
        Ok(subjects)
    }

    /// Build the search payload from a fresh copy of the menu page's form.
    pub fn schedule_payload(
        &self,
        term: &str,
        subjects: &[impl AsRef<str>],
    ) -> Result<SchedulePayload, SocApiError> {
        self.validate_term(term)?;
        let html = self.fetcher.fetch_menu_page()?;
        let form_fields = extract::parse_form_inputs(&html)?;
        Ok(SchedulePayload::new(form_fields, term, subjects))
    }

    /// Submit a schedule search for the given subjects and return the raw results page.
    ///
    /// The page is also written to the configured output path, if any.
    pub fn get_schedule_page(
        &self,
        term: &str,
        subjects: &[impl AsRef<str>],
    ) -> Result<String, SocApiError> {
        let payload = self.schedule_payload(term, subjects)?;
        debug!(term, fields = payload.len(), "submitting schedule search");
        let html = self.fetcher.submit_schedule_search(&payload)?;

        if let Some(path) = &self.output_path {
            fs::write(path, &html).map_err(SocApiError::Sink)?;
            info!(path = %path.display(), bytes = html.len(), "wrote schedule results");
        }
        Ok(html)
    }
}

/// Drop everything up to and including the first `-`, then trim.
///
/// A label with no delimiter is returned whole (trimmed): `"Mathematics"`
/// stays `"Mathematics"`.
pub fn strip_subject_prefix(label: &str) -> &str {
    label
        .split_once(SUBJECT_LABEL_DELIMITER)
        .map_or(label, |(_, name)| name)
        .trim()
}
