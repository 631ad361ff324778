use serde_json::Value;

/// Typed view of the backend's ingestion reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub ingested: u64,
    pub from_ts: Option<i64>,
    pub to_ts: Option<i64>,
    pub status: String,
}

impl RefreshReport {
    /// Read a refresh reply; `None` when `ingested` or `status` is missing or mistyped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let ingested = value.get("ingested")?.as_u64()?;
        let status = value.get("status")?.as_str()?.to_string();
        Some(Self {
            ingested,
            from_ts: value.get("from_ts").and_then(Value::as_i64),
            to_ts: value.get("to_ts").and_then(Value::as_i64),
            status,
        })
    }

    pub fn summary_line(&self) -> String {
        let window = match (self.from_ts, self.to_ts) {
            (Some(from), Some(to)) => format!(" from {from} to {to}"),
            (Some(from), None) => format!(" since {from}"),
            (None, Some(to)) => format!(" up to {to}"),
            (None, None) => String::new(),
        };
        format!(
            "Ingested {} events{} (status: {})",
            self.ingested, window, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_full_report() {
        let report = RefreshReport::from_value(&json!({
            "ingested": 42,
            "from_ts": 1_700_000_000_000_i64,
            "to_ts": 1_700_000_600_000_i64,
            "status": "success"
        }))
        .unwrap();
        assert_eq!(report.ingested, 42);
        assert_eq!(
            report.summary_line(),
            "Ingested 42 events from 1700000000000 to 1700000600000 (status: success)"
        );
    }

    #[test]
    fn null_timestamps_are_absent() {
        let report = RefreshReport::from_value(&json!({
            "ingested": 0,
            "from_ts": null,
            "to_ts": null,
            "status": "success"
        }))
        .unwrap();
        assert_eq!(report.from_ts, None);
        assert_eq!(report.summary_line(), "Ingested 0 events (status: success)");
    }

    #[test]
    fn other_shapes_are_rejected() {
        assert_eq!(RefreshReport::from_value(&json!({"msg": "hi"})), None);
        assert_eq!(RefreshReport::from_value(&json!("text")), None);
    }
}
