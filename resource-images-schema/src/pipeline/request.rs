use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Body of `POST /v2/pipeline`.
///
/// A `None` baton opens a fresh stream on the server; every request in `requests` runs on that
/// stream in order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PipelineRequest {
    pub baton: Option<String>,
    pub requests: Vec<StreamRequest>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamRequest {
    Execute { stmt: Stmt },
    Close,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Stmt {
    pub sql: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,

    #[serde(default = "default_want_rows")]
    pub want_rows: bool,
}

fn default_want_rows() -> bool {
    true
}

impl Stmt {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
            want_rows: true,
        }
    }

    #[must_use]
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }
}

impl PipelineRequest {
    /// Executes `stmt` on a fresh stream and closes the stream in the same round trip.
    pub fn execute_and_close(stmt: Stmt) -> Self {
        Self {
            baton: None,
            requests: vec![StreamRequest::Execute { stmt }, StreamRequest::Close],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn execute_and_close_serializes_both_requests() {
        let req = PipelineRequest::execute_and_close(
            Stmt::new("SELECT name FROM t WHERE g = ?").bind("house"),
        );

        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            json!({
                "baton": null,
                "requests": [
                    {
                        "type": "execute",
                        "stmt": {
                            "sql": "SELECT name FROM t WHERE g = ?",
                            "args": [{"type": "text", "value": "house"}],
                            "want_rows": true
                        }
                    },
                    {"type": "close"}
                ]
            })
        );
    }

    #[test]
    fn stmt_without_args_omits_field() {
        let v = serde_json::to_value(Stmt::new("SELECT 1")).unwrap();
        assert!(v.get("args").is_none());
    }
}
