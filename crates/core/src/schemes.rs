// Government schemes browser
//
// Search and category edits are debounced: a query goes out only once the
// filters have been quiet for the debounce window.

use std::fmt;
use std::time::{Duration, Instant};

use agridoc_protocol::{Scheme, SchemeQuery, ALL_CATEGORIES};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct SchemeBrowser {
    search: String,
    category: String,
    categories: Vec<String>,
    schemes: Vec<Scheme>,
    loading: bool,
    debounce: Duration,
    /// Time of the last filter edit not yet turned into a query.
    dirty_since: Option<Instant>,
}

impl SchemeBrowser {
    /// A fresh browser schedules the unfiltered listing.
    pub fn new(debounce: Duration, now: Instant) -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            categories: vec![ALL_CATEGORIES.to_string()],
            schemes: Vec::new(),
            loading: false,
            debounce,
            dirty_since: Some(now),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Category chips, always led by "All".
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_search(&mut self, text: impl Into<String>, now: Instant) {
        self.search = text.into();
        self.dirty_since = Some(now);
    }

    pub fn set_category(&mut self, category: impl Into<String>, now: Instant) {
        self.category = category.into();
        self.dirty_since = Some(now);
    }

    pub fn query(&self) -> SchemeQuery {
        SchemeQuery { search: self.search.clone(), category: Some(self.category.clone()) }
    }

    /// When the next query becomes due, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.dirty_since.map(|t| t + self.debounce)
    }

    /// Returns the query to issue once the debounce window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<SchemeQuery> {
        let deadline = self.next_deadline()?;
        if now < deadline {
            return None;
        }
        self.dirty_since = None;
        self.loading = true;
        Some(self.query())
    }

    /// Failed fetches keep the previous listing on screen.
    pub fn finish_listing<E: fmt::Display>(&mut self, outcome: Result<Vec<Scheme>, E>) {
        self.loading = false;
        match outcome {
            Ok(schemes) => self.schemes = schemes,
            Err(e) => log::warn!("failed to fetch schemes: {}", e),
        }
    }

    pub fn finish_categories<E: fmt::Display>(&mut self, outcome: Result<Vec<String>, E>) {
        match outcome {
            Ok(categories) => {
                self.categories = std::iter::once(ALL_CATEGORIES.to_string())
                    .chain(categories.into_iter().filter(|c| c != ALL_CATEGORIES))
                    .collect();
            }
            Err(e) => log::warn!("failed to fetch scheme categories: {}", e),
        }
    }
}
