//! Current date/time in Indian Standard Time.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use serde_json::{json, Value};

use super::Tool;

/// IST is a fixed +05:30 offset with no daylight saving.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

pub struct CurrentDateTime;

impl CurrentDateTime {
    pub fn to_ist(instant: &DateTime<Utc>) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(IST_OFFSET_SECS)
            .map(|ist| instant.with_timezone(&ist))
            .unwrap_or_else(|| instant.fixed_offset())
    }

    /// Format `instant` as `YYYY-MM-DD HH:MM:SS (IST)`.
    pub fn format_ist(instant: &DateTime<Utc>) -> String {
        Self::to_ist(instant)
            .format("%Y-%m-%d %H:%M:%S (IST)")
            .to_string()
    }
}

#[async_trait]
impl Tool for CurrentDateTime {
    fn name(&self) -> &str {
        "get_current_datetime"
    }

    fn description(&self) -> &str {
        "Return the current date and time in Indian Standard Time (IST)."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _args: Value) -> anyhow::Result<String> {
        Ok(Self::format_ist(&Utc::now()))
    }
}
