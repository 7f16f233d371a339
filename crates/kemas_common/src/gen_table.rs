//! Request types for the JamAI Base generative-table API.
//!
//! Only the request side is typed. The response payload is kept as raw
//! `serde_json::Value` because its column shapes are not stable across
//! calls; resolving them is the extraction layer's job.

use serde::{Deserialize, Serialize};

/// Row-insertion request for an action table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowAddRequest {
    pub table_id: String,
    pub data: Vec<RowData>,
    /// Always false: request one complete, buffered response.
    pub stream: bool,
}

/// One input row. The table's single input column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowData {
    pub input_text: String,
}

impl RowAddRequest {
    pub fn new(table_id: &str, input_text: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            data: vec![RowData {
                input_text: input_text.to_string(),
            }],
            stream: false,
        }
    }
}
