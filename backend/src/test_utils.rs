//! Test utilities shared by unit and integration tests.
//!
//! [`ScriptedGuideGenerator`] stands in for the external guide service: it
//! records every request, can fail for chosen countries, and can hold a
//! request open until the test releases a [`Notify`] gate.

use async_trait::async_trait;
use shared::{Currency, SurvivalGuide, Transaction, TransactionType};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

use crate::domain::{GuideError, GuideGenerator};

/// Deterministic guide for `country`, also what the scripted generator returns
pub fn sample_guide(country: &str) -> SurvivalGuide {
    SurvivalGuide {
        shopping_guide: format!("Shopping in {}: compare discount chains.", country),
        survival_tips: format!("Living in {}: register your address early.", country),
    }
}

/// Expense transaction with fixed amount and date
pub fn sample_transaction(id: &str, category: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount: -25.5,
        currency: Currency::Eur,
        category: category.to_string(),
        date: "2025-01-15".to_string(),
        description: format!("{} purchase", category),
        merchant: Some("Corner Shop".to_string()),
        transaction_type: TransactionType::Expense,
        notes: None,
    }
}

#[derive(Default)]
pub struct ScriptedGuideGenerator {
    guides: HashMap<String, SurvivalGuide>,
    failures: HashSet<String>,
    gates: HashMap<String, Arc<Notify>>,
    calls: Mutex<Vec<String>>,
    call_made: Notify,
}

impl ScriptedGuideGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `country` with `guide` instead of [`sample_guide`]
    pub fn with_guide(mut self, country: &str, guide: SurvivalGuide) -> Self {
        self.guides.insert(country.to_string(), guide);
        self
    }

    pub fn failing_for(mut self, country: &str) -> Self {
        self.failures.insert(country.to_string());
        self
    }

    /// Hold requests for `country` until `gate` is notified
    pub fn with_gate(mut self, country: &str, gate: Arc<Notify>) -> Self {
        self.gates.insert(country.to_string(), gate);
        self
    }

    /// Countries requested so far, in call order
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// Wait until at least `count` requests have been received
    pub async fn wait_for_calls(&self, count: usize) {
        loop {
            let notified = self.call_made.notified();
            if self.call_count().await >= count {
                return;
            }
            notified.await;
        }
    }
}

#[async_trait]
impl GuideGenerator for ScriptedGuideGenerator {
    async fn generate_guide(&self, country: &str) -> Result<SurvivalGuide, GuideError> {
        self.calls.lock().await.push(country.to_string());
        self.call_made.notify_waiters();

        if let Some(gate) = self.gates.get(country) {
            gate.notified().await;
        }

        if self.failures.contains(country) {
            return Err(GuideError::Request(format!("scripted failure for {}", country)));
        }
        Ok(self
            .guides
            .get(country)
            .cloned()
            .unwrap_or_else(|| sample_guide(country)))
    }
}
