// ABOUTME: Host session that answers UI requests from a variable store
// ABOUTME: Generates the color system document for a chosen collection and mode

use async_trait::async_trait;
use std::sync::Arc;
use swatchbook_core::{
    DocumentConfig, ReportDocument, VariableStore, build_report, resolve_tokens_for_collection,
};
use swatchbook_logging::{info, instrument, warn};
use swatchbook_types::VariableCollection;

use crate::error::Result;
use crate::handler::RequestHandler;
use crate::protocol::{HostRequest, HostResponse};

pub const DOCUMENT_GENERATED: &str = "Document generated successfully!";

/// Answers host requests against one variable store
pub struct HostSession {
    store: Arc<dyn VariableStore>,
    config: DocumentConfig,
}

impl HostSession {
    pub fn new(store: Arc<dyn VariableStore>, config: DocumentConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    async fn collections(&self) -> Result<Vec<HostResponse>> {
        let collections = self.store.list_collections().await?;
        info!(collection_count = collections.len(), "Sending collections");
        Ok(vec![HostResponse::Collections { collections }])
    }

    #[instrument(skip(self))]
    async fn generate_doc(&self, collection_id: &str, mode_id: &str) -> Result<Vec<HostResponse>> {
        let collections = self.store.list_collections().await?;
        let Some(collection) = find_collection(&collections, collection_id) else {
            warn!("Collection not found");
            return Ok(vec![HostResponse::notify(format!(
                "Collection not found: {collection_id}"
            ))]);
        };
        let Some(mode) = collection.find_mode(mode_id) else {
            warn!(collection = %collection.name, "Mode not found");
            return Ok(vec![HostResponse::notify(format!(
                "Mode '{mode_id}' not found in collection '{}'",
                collection.name
            ))]);
        };

        let tokens =
            resolve_tokens_for_collection(self.store.as_ref(), &collection.id, &mode.mode_id).await;
        let report = build_report(&tokens);
        let summary = report.summary();
        let node = ReportDocument::build(&report, &self.config);

        info!(
            pairs = summary.pairs,
            graded = summary.graded,
            nodes = node.node_count(),
            "Document generated"
        );
        Ok(vec![
            HostResponse::Document { node, summary },
            HostResponse::notify(DOCUMENT_GENERATED),
        ])
    }
}

fn find_collection<'c>(collections: &'c [VariableCollection], key: &str) -> Option<&'c VariableCollection> {
    collections
        .iter()
        .find(|collection| collection.id == key)
        .or_else(|| collections.iter().find(|collection| collection.matches(key)))
}

#[async_trait]
impl RequestHandler for HostSession {
    async fn handle(&mut self, request: HostRequest) -> Result<Vec<HostResponse>> {
        match request {
            HostRequest::UiReady => self.collections().await,
            HostRequest::GenerateDoc {
                collection_id,
                mode_id,
            } => self.generate_doc(&collection_id, &mode_id).await,
            HostRequest::Cancel => Ok(vec![HostResponse::Closed]),
        }
    }
}
