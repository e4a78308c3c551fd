// ABOUTME: Batch resolution of a collection's tokens and the graded pair report
// ABOUTME: A single unresolvable variable is dropped from the batch, never fatal

use indexmap::IndexMap;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::time::Duration;
use swatchbook_logging::{PerfTimer, info, instrument, warn};

use crate::grade::{ContrastGrader, ContrastResult};
use crate::pairing::{ColorPair, TokenPairer};
use crate::resolver::AliasResolver;
use crate::store::VariableStore;
use crate::token::ColorToken;

const SLOW_RESOLVE_THRESHOLD: Duration = Duration::from_millis(500);

/// Resolve every variable of a collection for one mode, in store order.
///
/// Variables that are not colors or whose alias chain breaks are skipped.
/// A failure to list the collection yields an empty batch.
#[instrument(skip(store))]
pub async fn resolve_tokens_for_collection(
    store: &dyn VariableStore,
    collection_id: &str,
    mode_id: &str,
) -> Vec<ColorToken> {
    let _timer = PerfTimer::new("resolve_tokens_for_collection")
        .with_warn_threshold(SLOW_RESOLVE_THRESHOLD);

    let variables = match store.list_variables(collection_id).await {
        Ok(variables) => variables,
        Err(err) => {
            warn!(error = %err, "Failed to list collection variables");
            return Vec::new();
        }
    };

    let resolver = AliasResolver::new(store);
    let mut tokens = Vec::with_capacity(variables.len());
    for variable in &variables {
        if let Some(token) = ColorToken::from_variable(&resolver, variable, mode_id).await {
            tokens.push(token);
        }
    }

    info!(
        variable_count = variables.len(),
        token_count = tokens.len(),
        "Resolved collection tokens"
    );
    tokens
}

/// One row of the report: a pair and its grade, if both sides are present
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRow<'a> {
    pub pair: ColorPair<'a>,
    pub grade: Option<ContrastResult>,
}

impl ReportRow<'_> {
    pub fn is_graded(&self) -> bool {
        self.grade.is_some()
    }
}

/// Counts over a whole report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub namespaces: usize,
    pub pairs: usize,
    pub graded: usize,
    pub normal_text_passing: usize,
    pub large_text_passing: usize,
}

/// namespace -> base name -> graded pair, in first-encounter order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report<'a> {
    namespaces: IndexMap<String, IndexMap<String, ReportRow<'a>>>,
}

impl<'a> Report<'a> {
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &IndexMap<String, ReportRow<'a>>)> {
        self.namespaces.iter().map(|(name, rows)| (name.as_str(), rows))
    }

    pub fn get(&self, namespace: &str, base_name: &str) -> Option<&ReportRow<'a>> {
        self.namespaces.get(namespace)?.get(base_name)
    }

    /// All rows as `(namespace, base name, row)`
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str, &ReportRow<'a>)> {
        self.namespaces.iter().flat_map(|(namespace, rows)| {
            rows.iter()
                .map(move |(base_name, row)| (namespace.as_str(), base_name.as_str(), row))
        })
    }

    pub fn pair_count(&self) -> usize {
        self.namespaces.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary {
            namespaces: self.namespaces.len(),
            ..ReportSummary::default()
        };
        for (_, _, row) in self.rows() {
            summary.pairs += 1;
            if let Some(grade) = row.grade {
                summary.graded += 1;
                summary.normal_text_passing += usize::from(grade.normal_text.passes());
                summary.large_text_passing += usize::from(grade.large_text.passes());
            }
        }
        summary
    }
}

/// Group, pair and grade resolved tokens
pub fn build_report(tokens: &[ColorToken]) -> Report<'_> {
    let namespaces: IndexMap<_, _> = TokenPairer::pair(tokens)
        .into_iter()
        .map(|(namespace, pairs)| {
            let rows: IndexMap<_, _> = pairs
                .into_iter()
                .map(|(base_name, pair)| {
                    let grade = ContrastGrader::grade(&pair);
                    (base_name, ReportRow { pair, grade })
                })
                .collect();
            (namespace, rows)
        })
        .collect();
    Report { namespaces }
}

#[derive(Serialize)]
struct TokenView<'t> {
    id: &'t str,
    name: &'t str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'t str>,
    hex: String,
}

impl<'t> From<&'t ColorToken> for TokenView<'t> {
    fn from(token: &'t ColorToken) -> Self {
        Self {
            id: token.id(),
            name: token.name(),
            description: token.description(),
            hex: token.color().to_hex(),
        }
    }
}

// Tokens are flattened to id/name/hex in the JSON form.
impl Serialize for ReportRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("background", &self.pair.background.map(TokenView::from))?;
        map.serialize_entry("foreground", &self.pair.foreground.map(TokenView::from))?;
        map.serialize_entry("grade", &self.grade)?;
        map.end()
    }
}

impl Serialize for Report<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.namespaces.serialize(serializer)
    }
}
