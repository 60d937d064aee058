use crate::db::models::ResourceImageRow;
use crate::db::query::{IMAGE_URL_COLUMN, NAME_COLUMN};
use crate::error::ReportError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use resource_images_schema::{PipelineResponse, StmtResult, StreamResponse, StreamResult, Value};
use tracing::warn;

/// Pulls the execute result out of an execute+close pipeline response.
pub fn execute_result(resp: PipelineResponse) -> Result<StmtResult, ReportError> {
    let mut results = resp.results.into_iter();

    let result = match results.next() {
        Some(StreamResult::Ok {
            response: StreamResponse::Execute { result },
        }) => result,
        Some(StreamResult::Error { error }) => {
            return Err(ReportError::Statement {
                message: error.message,
                code: error.code,
            });
        }
        Some(other) => {
            return Err(ReportError::ProtocolError(format!(
                "expected an execute response, got {other:?}"
            )));
        }
        None => {
            return Err(ReportError::ProtocolError(
                "pipeline response carried no results".to_string(),
            ));
        }
    };

    // The stream is gone either way; a failed close is only worth a note.
    if let Some(StreamResult::Error { error }) = results.next() {
        warn!(message = %error.message, code = ?error.code, "Closing remote stream failed");
    }

    Ok(result)
}

pub fn rows_from_result(result: &StmtResult) -> Result<Vec<ResourceImageRow>, ReportError> {
    let name_idx = column(result, NAME_COLUMN)?;
    let url_idx = column(result, IMAGE_URL_COLUMN)?;

    result
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let cell = move |idx: usize| {
                row.get(idx).ok_or_else(|| {
                    ReportError::ProtocolError(format!(
                        "row {i} has {} values, expected at least {}",
                        row.len(),
                        idx + 1
                    ))
                })
            };

            let name = value_to_string(cell(name_idx)?)?.ok_or_else(|| {
                ReportError::ProtocolError(format!("row {i} has a NULL {NAME_COLUMN}"))
            })?;
            let image_url = value_to_string(cell(url_idx)?)?;
            Ok(ResourceImageRow { name, image_url })
        })
        .collect()
}

fn column(result: &StmtResult, name: &str) -> Result<usize, ReportError> {
    result.column_index(name).ok_or_else(|| {
        ReportError::ProtocolError(format!("result set has no `{name}` column"))
    })
}

/// Text form of a cell; `None` for SQL NULL. Blobs must hold UTF-8.
fn value_to_string(value: &Value) -> Result<Option<String>, ReportError> {
    match value {
        Value::Null => Ok(None),
        Value::Text { value } | Value::Integer { value } => Ok(Some(value.clone())),
        Value::Float { value } => Ok(Some(value.to_string())),
        Value::Blob { base64 } => {
            let bytes = STANDARD
                .decode(base64)
                .map_err(|e| ReportError::ProtocolError(format!("invalid blob encoding: {e}")))?;
            String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| ReportError::ProtocolError(format!("blob is not UTF-8 text: {e}")))
        }
    }
}
