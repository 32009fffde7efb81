//! The result envelope wrapping a worker's outcome for a single task.

use serde::{Deserialize, Serialize};

/// Outcome of a worker applying its callback to one task.
///
/// A sum type, not a status-string-plus-optional-fields record: the two
/// arms are mutually exclusive by construction, so there is no invariant to
/// check at runtime (`status == SUCCESS` iff `payload` is populated).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "value", rename_all = "UPPERCASE")]
pub enum Envelope<T> {
    #[serde(rename = "SUCCESS")]
    Success(T),
    #[serde(rename = "FAIL")]
    Failure(String),
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            Envelope::Success(value) => Ok(value),
            Envelope::Failure(desc) => Err(desc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_round_trips_through_json() {
        let env = Envelope::Success(42);
        let bytes = serde_json::to_vec(&env).unwrap();
        let decoded: Envelope<i32> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(env, decoded);
    }

    #[test]
    fn failure_round_trips_through_json() {
        let env: Envelope<i32> = Envelope::Failure("bad".to_string());
        let bytes = serde_json::to_vec(&env).unwrap();
        let decoded: Envelope<i32> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(env, decoded);
    }

    #[test]
    fn envelope_discipline_holds_by_construction() {
        // Property 1 of the testable properties: SUCCESS iff payload populated.
        // With a tagged enum this can't fail to hold; exercise both arms anyway.
        let ok: Envelope<&str> = Envelope::Success("payload");
        let fail: Envelope<&str> = Envelope::Failure("boom".to_string());
        assert!(ok.is_success());
        assert!(!fail.is_success());
        assert_eq!(ok.into_result(), Ok("payload"));
        assert_eq!(fail.into_result(), Err("boom".to_string()));
    }
}
