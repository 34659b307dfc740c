//! Fuzzy matching of canonical field names against source record keys.
//!
//! Used when a field spec declares `"source": "fuzzy"`: the incoming
//! record was produced by an upstream system whose key names drift
//! (`fname`, `firstName`, `patient_fname`), so resolution falls back to a
//! known-alias table and Jaro-Winkler similarity.

use std::collections::BTreeMap;

use rapidfuzz::distance::jaro_winkler;
use serde_json::Value;
use tracing::debug;

use ivr_model::value::is_missing;

use crate::path;

/// Minimum similarity for a fuzzy candidate to be accepted.
const CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Finds the source record key that best matches a canonical field name.
///
/// Implementations must be deterministic for a given record and candidate
/// list. Candidates whose record value is missing are never returned.
pub trait FuzzyMatcher: Send + Sync {
    /// The best-matching candidate key, or `None` when nothing clears the
    /// matcher's acceptance bar.
    fn find_best_match(
        &self,
        target: &str,
        candidates: &[String],
        record: &Value,
    ) -> Option<String>;
}

/// Default matcher: alias table, then exact normalized match, then best
/// Jaro-Winkler similarity at or above [`CONFIDENCE_THRESHOLD`].
pub struct JaroWinklerMatcher {
    aliases: BTreeMap<&'static str, &'static [&'static str]>,
}

impl Default for JaroWinklerMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl JaroWinklerMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            aliases: known_aliases(),
        }
    }

    fn is_alias(&self, target: &str, candidate: &str) -> bool {
        self.aliases
            .get(target)
            .is_some_and(|variants| variants.iter().any(|v| *v == candidate))
    }
}

impl FuzzyMatcher for JaroWinklerMatcher {
    fn find_best_match(
        &self,
        target: &str,
        candidates: &[String],
        record: &Value,
    ) -> Option<String> {
        let normalized_target = normalize(target);

        let mut best: Option<(&String, f64)> = None;
        for candidate in candidates {
            if path::resolve(record, candidate).is_none_or(is_missing) {
                continue;
            }
            let normalized = normalize(candidate);
            if self.is_alias(&normalized_target, &normalized) || normalized == normalized_target {
                debug!(target, candidate, "fuzzy match by alias or exact name");
                return Some(candidate.clone());
            }
            let score = jaro_winkler::similarity(normalized_target.chars(), normalized.chars());
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }

        match best {
            Some((candidate, score)) if score >= CONFIDENCE_THRESHOLD => {
                debug!(target, candidate, score, "fuzzy match by similarity");
                Some(candidate.clone())
            }
            _ => None,
        }
    }
}

/// Lowercase with runs of non-alphanumerics collapsed to one underscore,
/// so `firstName`, `first-name`, and `First Name` land near each other.
fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// Canonical field names and the upstream variants seen in practice.
fn known_aliases() -> BTreeMap<&'static str, &'static [&'static str]> {
    let table: [(&str, &[&str]); 8] = [
        (
            "patient_first_name",
            &["first_name", "fname", "patient_fname", "firstname"],
        ),
        (
            "patient_last_name",
            &["last_name", "lname", "patient_lname", "lastname"],
        ),
        (
            "patient_dob",
            &["date_of_birth", "dob", "birth_date", "birthdate"],
        ),
        (
            "patient_phone",
            &["phone", "phone_number", "telephone", "contact_phone"],
        ),
        ("patient_email", &["email", "email_address", "contact_email"]),
        (
            "primary_insurance_name",
            &["insurance_name", "payer_name", "insurance_company"],
        ),
        (
            "primary_member_id",
            &["member_id", "subscriber_id", "insurance_id"],
        ),
        ("provider_npi", &["npi", "provider_number", "npi_number"]),
    ];
    table.into_iter().collect()
}
