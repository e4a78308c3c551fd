// ABOUTME: Messages exchanged between the host UI and the report generator
// ABOUTME: JSON objects tagged by "type", one message per line on the wire

use serde::{Deserialize, Serialize};
use swatchbook_core::{RenderNode, ReportSummary};
use swatchbook_types::VariableCollection;

use crate::error::Result;

/// Request sent by the host UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostRequest {
    /// The UI finished loading and wants the list of collections
    UiReady,
    GenerateDoc {
        #[serde(rename = "collectionId")]
        collection_id: String,
        #[serde(rename = "modeId")]
        mode_id: String,
    },
    /// Close the session
    Cancel,
}

/// Response sent back to the host UI
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostResponse {
    Collections {
        collections: Vec<VariableCollection>,
    },
    Document {
        node: RenderNode,
        summary: ReportSummary,
    },
    /// Short user-facing message
    Notify { message: String },
    Closed,
}

impl HostResponse {
    pub fn notify<S: Into<String>>(message: S) -> Self {
        Self::Notify {
            message: message.into(),
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, HostResponse::Closed)
    }
}

/// Parse one JSON request line
pub fn decode_request(line: &str) -> Result<HostRequest> {
    Ok(serde_json::from_str(line.trim())?)
}

/// Serialize a response as a single JSON line (without the newline)
pub fn encode_response(response: &HostResponse) -> Result<String> {
    Ok(serde_json::to_string(response)?)
}
