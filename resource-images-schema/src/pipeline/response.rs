use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Response to `POST /v2/pipeline`. `results` holds one entry per submitted request, in order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PipelineResponse {
    #[serde(default)]
    pub baton: Option<String>,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub results: Vec<StreamResult>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamResult {
    Ok { response: StreamResponse },
    Error { error: StreamError },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamResponse {
    Execute {
        result: StmtResult,
    },
    Close,
    /// Response kinds this crate never requests (batch, sequence, describe, ...).
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StmtResult {
    #[serde(default)]
    pub cols: Vec<Col>,

    #[serde(default)]
    pub rows: Vec<Vec<Value>>,

    #[serde(default)]
    pub affected_row_count: u64,

    #[serde(default)]
    pub last_insert_rowid: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Col {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub decltype: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StreamError {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl StmtResult {
    /// Position of the column called `name`, if the server reported it.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.cols
            .iter()
            .position(|c| c.name.as_deref() == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_execute_then_close() {
        let body = json!({
            "baton": null,
            "base_url": null,
            "results": [
                {
                    "type": "ok",
                    "response": {
                        "type": "execute",
                        "result": {
                            "cols": [
                                {"name": "name", "decltype": "TEXT"},
                                {"name": "image_url", "decltype": "TEXT"}
                            ],
                            "rows": [
                                [{"type": "text", "value": "Iron Ore"}, {"type": "null"}]
                            ],
                            "affected_row_count": 0,
                            "last_insert_rowid": null,
                            "replication_index": "12"
                        }
                    }
                },
                {"type": "ok", "response": {"type": "close"}}
            ]
        });

        let resp: PipelineResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.results.len(), 2);

        let StreamResult::Ok {
            response: StreamResponse::Execute { result },
        } = &resp.results[0]
        else {
            panic!("expected execute result, got {:?}", resp.results[0]);
        };
        assert_eq!(result.column_index("image_url"), Some(1));
        assert_eq!(result.rows[0][0], Value::text("Iron Ore"));
        assert_eq!(result.rows[0][1], Value::Null);

        assert_eq!(
            resp.results[1],
            StreamResult::Ok {
                response: StreamResponse::Close
            }
        );
    }

    #[test]
    fn decodes_statement_error() {
        let body = json!({
            "results": [
                {"type": "error", "error": {"message": "no such table: resources", "code": "SQLITE_UNKNOWN"}},
                {"type": "ok", "response": {"type": "close"}}
            ]
        });

        let resp: PipelineResponse = serde_json::from_value(body).unwrap();
        assert_eq!(
            resp.results[0],
            StreamResult::Error {
                error: StreamError {
                    message: "no such table: resources".to_string(),
                    code: Some("SQLITE_UNKNOWN".to_string()),
                }
            }
        );
    }

    #[test]
    fn unknown_response_kind_is_tolerated() {
        let r: StreamResult =
            serde_json::from_value(json!({"type": "ok", "response": {"type": "get_autocommit", "is_autocommit": true}}))
                .unwrap();
        assert_eq!(
            r,
            StreamResult::Ok {
                response: StreamResponse::Other
            }
        );
    }
}
