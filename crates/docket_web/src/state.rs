use chrono::NaiveDate;
use docket_core::{dates, RecordStorage};
use std::sync::Arc;

pub struct AppState {
    pub storage: Arc<dyn RecordStorage>,
    /// Reference date for the projections. The local date when unset.
    pub today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(storage: Arc<dyn RecordStorage>) -> Self {
        Self { storage, today: None }
    }

    pub fn with_today(mut self, today: Option<NaiveDate>) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(dates::today)
    }
}
