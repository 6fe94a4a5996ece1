//! Client for the UCSD Schedule of Classes site.

pub mod client;
pub mod errors;
pub mod extract;
pub mod fetcher;
pub mod json;
pub mod models;

pub use client::{ClientOptions, ScheduleClient};
pub use errors::{Endpoint, ErrorKind, SocApiError};
pub use fetcher::{ConnectionMode, Endpoints, Fetch, HttpFetcher};
pub use models::{CodeValue, DepartmentMap, FormField, SchedulePayload, TermMap};
