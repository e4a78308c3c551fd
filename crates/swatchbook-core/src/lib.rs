// ABOUTME: Color token resolution, pairing and contrast grading engine for Swatchbook
// ABOUTME: Resolves aliased color variables per mode and builds graded background/foreground reports

pub mod config;
pub mod error;
pub mod grade;
pub mod pairing;
pub mod render;
pub mod report;
pub mod resolver;
pub mod store;
pub mod token;

pub use config::DocumentConfig;
pub use error::{ConfigError, ResolveError, StoreError};
pub use grade::{ContrastGrader, ContrastResult, WcagGrade, WcagThresholds};
pub use pairing::{
    ColorPair, NamespaceGroups, PairGroups, PairSide, PairingDiagnostic, TokenPairer,
};
pub use render::{RenderNode, ReportDocument};
pub use report::{Report, ReportRow, ReportSummary, build_report, resolve_tokens_for_collection};
pub use resolver::AliasResolver;
pub use store::{InMemoryStore, Snapshot, VariableStore};
pub use token::{ColorToken, GLOBAL_NAMESPACE, normalize_name};

pub use swatchbook_types::{Color, VariableCollection, VariableRecord};

