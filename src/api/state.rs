//! Application state for the garde pay API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::RateBook;

/// Shared application state.
///
/// Holds the grade rates loaded at startup. Handlers only read it, so it is
/// shared behind an `Arc` without locking.
#[derive(Clone)]
pub struct AppState {
    rate_book: Arc<RateBook>,
}

impl AppState {
    /// Creates a new application state around a rate book.
    pub fn new(rate_book: RateBook) -> Self {
        Self {
            rate_book: Arc::new(rate_book),
        }
    }

    /// Returns the configured grade rates.
    pub fn rate_book(&self) -> &RateBook {
        &self.rate_book
    }
}
