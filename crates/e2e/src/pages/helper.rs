//! Behavior shared by every page object

use std::time::Duration;

use tracing::debug;

use crate::driver::Driver;

/// Base every page object is built on
pub struct Helper<'a, D: Driver + ?Sized> {
    driver: &'a D,
}

impl<'a, D: Driver + ?Sized> Helper<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &'a D {
        self.driver
    }

    /// Fixed pause, for animations the app gives no signal for
    pub async fn wait_for_number_of_seconds(&self, seconds: u64) {
        debug!("Waiting {}s", seconds);
        tokio::time::sleep(Duration::from_secs(seconds)).await;
    }
}
