//! Per-session state owned by the host.
//!
//! The host keeps one `SessionState` per user session (in whatever session
//! backend it has) and passes it by `&mut` into the hooks and the throttle.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Set after a qualifying save, consumed by the next article view
    #[serde(default)]
    pub pending_suggestion: bool,

    /// Display throttle countdown; absent until the first check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throttle_counter: Option<i64>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_round_trips_through_json() {
        let json = serde_json::to_string(&SessionState::new()).unwrap();
        assert_eq!(json, r#"{"pending_suggestion":false}"#);
        let back: SessionState = serde_json::from_str("{}").unwrap();
        assert_eq!(back, SessionState::new());
    }
}
