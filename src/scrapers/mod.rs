//! Scrapers for the university schedule site.
//!
//! This module contains everything between an HTTP response and a
//! [`PeriodResult`](crate::models::PeriodResult):
//!
//! | Module | Role |
//! |--------|------|
//! | [`client`] | `PageFetcher` seam, shared HTTP session, URL building |
//! | [`decoder`] | Old/new workload table layouts |
//! | [`directory`] | Teacher list of a period (`vp.htm`) |
//! | [`summary`] | One period, summary or full mode |
//! | [`retrospective`] | A range of years, both semesters each |
//!
//! All requests are issued sequentially over one session. Nothing is
//! retried; see [`crate::error`] for how failures propagate.

pub mod client;
pub mod decoder;
pub mod directory;
pub mod retrospective;
pub mod summary;

#[cfg(test)]
pub(crate) mod testing;
