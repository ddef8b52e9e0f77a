//! Test helpers shared by the backend and client tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::handler::{HandlerFactory, S3Handler};

/// Hands out one handler for every region and records the regions asked for
pub struct RecordingFactory {
    handler: Arc<dyn S3Handler>,
    regions: Mutex<Vec<String>>,
}

impl RecordingFactory {
    pub fn new(handler: impl S3Handler + 'static) -> Self {
        Self {
            handler: Arc::new(handler),
            regions: Mutex::new(Vec::new()),
        }
    }

    pub fn regions(&self) -> Vec<String> {
        self.regions.lock().unwrap().clone()
    }
}

#[async_trait]
impl HandlerFactory for RecordingFactory {
    async fn handler(&self, region: &str) -> Arc<dyn S3Handler> {
        self.regions.lock().unwrap().push(region.to_string());
        self.handler.clone()
    }
}
