// Farming practice advisor

use std::collections::BTreeMap;
use std::fmt;

use agridoc_protocol::{PlanRequest, PracticePlan};

use crate::profile::UserProfile;

pub const SUGGESTED_PRACTICES: &[&str] = &[
    "Drip Irrigation",
    "Zero Budget Natural Farming",
    "Vermicomposting",
    "SRI Rice Method",
    "Hydroponics",
    "Organic Farming",
];

#[derive(Debug, Clone, Default)]
pub struct AdvisorFlow {
    practice: String,
    loading: bool,
    plan: Option<PracticePlan>,
    error: Option<String>,
}

impl AdvisorFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn practice(&self) -> &str {
        &self.practice
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn plan(&self) -> Option<&PracticePlan> {
        self.plan.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a plan request. Clears the current plan; blank names are ignored.
    pub fn begin(&mut self, practice: &str, profile: &UserProfile) -> Option<PlanRequest> {
        let practice = practice.trim();
        if practice.is_empty() {
            return None;
        }
        self.practice = practice.to_string();
        self.loading = true;
        self.plan = None;
        self.error = None;
        Some(PlanRequest {
            practice_name: self.practice.clone(),
            farmer_profile: farmer_context(profile),
        })
    }

    pub fn finish<E: fmt::Display>(&mut self, outcome: Result<PracticePlan, E>) {
        self.loading = false;
        match outcome {
            Ok(plan) => self.plan = Some(plan),
            Err(e) => {
                log::warn!("practice plan for '{}' failed: {}", self.practice, e);
                self.error = Some(format!("Could not build a plan for {}. Please try again.", self.practice));
            }
        }
    }

    /// Back to the practice picker.
    pub fn close_plan(&mut self) {
        self.plan = None;
    }
}

/// Profile facts the advisor uses to tailor the plan. Empty fields are left
/// out.
fn farmer_context(profile: &UserProfile) -> BTreeMap<String, String> {
    [
        ("name", &profile.name),
        ("location", &profile.location_name),
        ("soil_type", &profile.soil_type),
    ]
    .into_iter()
    .filter(|(_, v)| !v.is_empty())
    .map(|(k, v)| (k.to_string(), v.clone()))
    .collect()
}
