use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Timestamp in Unix epoch seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("System time before Unix epoch");
        Self(duration.as_secs())
    }

    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn elapsed(&self) -> Duration {
        let now = Self::now();
        Duration::from_secs(now.0.saturating_sub(self.0))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_elapsed() {
        let ts1 = Timestamp::now();
        let ts2 = Timestamp::from_secs(ts1.as_secs() - 10);
        let elapsed = ts2.elapsed();
        assert!(elapsed.as_secs() >= 10);
    }

    #[test]
    fn test_timestamp_serializes_as_number() {
        let ts = Timestamp::from_secs(1234);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "1234");
    }
}
