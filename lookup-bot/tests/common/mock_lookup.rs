//! Scripted [`LookupService`] that records every query it receives.

use async_trait::async_trait;
use lookup_bot::{IdentityResponse, LookupError, LookupService, UniversalLookup};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupCall {
    Identity(String),
    Universal(String),
}

pub struct MockLookup {
    identity: Result<IdentityResponse, LookupError>,
    universal: UniversalLookup,
    calls: Mutex<Vec<LookupCall>>,
}

impl MockLookup {
    pub fn new(
        identity: Result<IdentityResponse, LookupError>,
        universal: UniversalLookup,
    ) -> Arc<Self> {
        Arc::new(Self {
            identity,
            universal,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Identity not found, universal empty.
    pub fn empty() -> Arc<Self> {
        Self::new(Ok(IdentityResponse::default()), UniversalLookup::Empty)
    }

    pub fn calls(&self) -> Vec<LookupCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LookupService for MockLookup {
    async fn lookup_identity(&self, id_text: &str) -> Result<IdentityResponse, LookupError> {
        self.calls
            .lock()
            .unwrap()
            .push(LookupCall::Identity(id_text.to_string()));
        self.identity.clone()
    }

    async fn lookup_universal(&self, query: &str) -> UniversalLookup {
        self.calls
            .lock()
            .unwrap()
            .push(LookupCall::Universal(query.to_string()));
        self.universal.clone()
    }
}
