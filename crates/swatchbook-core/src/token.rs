// ABOUTME: Resolved color tokens and the naming convention that classifies them
// ABOUTME: Derives namespace, foreground flag and pair key from a slash-delimited token name

use swatchbook_logging::debug;
use swatchbook_types::{Color, VariableRecord};

use crate::error::ResolveError;
use crate::resolver::AliasResolver;

/// Namespace used for tokens whose name has no `/` segment
pub const GLOBAL_NAMESPACE: &str = "global";

const FOREGROUND: &str = "foreground";
const BACKGROUND: &str = "background";

/// A color variable resolved for one mode
#[derive(Debug, Clone, PartialEq)]
pub struct ColorToken {
    id: String,
    name: String,
    description: Option<String>,
    color: Color,
}

impl ColorToken {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        color: Color,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.filter(|d| !d.trim().is_empty()),
            color,
        }
    }

    /// Build a token from a COLOR variable, or `None` if it does not resolve.
    pub async fn from_variable(
        resolver: &AliasResolver<'_>,
        variable: &VariableRecord,
        mode_id: &str,
    ) -> Option<Self> {
        match Self::try_from_variable(resolver, variable, mode_id).await {
            Ok(token) => Some(token),
            Err(err) => {
                debug!(
                    variable_id = %variable.id,
                    variable_name = %variable.name,
                    mode_id = %mode_id,
                    reason = err.kind(),
                    "Skipping variable"
                );
                None
            }
        }
    }

    /// Like [`ColorToken::from_variable`], reporting why the variable was rejected.
    ///
    /// The declared type is checked before any alias is followed.
    pub async fn try_from_variable(
        resolver: &AliasResolver<'_>,
        variable: &VariableRecord,
        mode_id: &str,
    ) -> Result<Self, ResolveError> {
        if !variable.is_color() {
            return Err(ResolveError::WrongType {
                variable_id: variable.id.clone(),
                resolved_type: variable.resolved_type,
            });
        }

        let color = resolver.try_resolve(variable, mode_id).await?;
        Ok(Self::new(
            variable.id.clone(),
            variable.name.clone(),
            variable.description.clone(),
            color,
        ))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Second `/` segment of the name, or the whole name when there is none
    pub fn raw_token_name(&self) -> &str {
        if self.name.contains('/') {
            self.name.split('/').nth(1).unwrap_or_default()
        } else {
            &self.name
        }
    }

    pub fn has_namespace(&self) -> bool {
        self.name.contains('/')
    }

    /// Normalized first `/` segment, or `"global"`
    pub fn namespace(&self) -> String {
        match self.name.split_once('/') {
            Some((first, _)) => normalize_name(first),
            None => GLOBAL_NAMESPACE.to_string(),
        }
    }

    pub fn is_foreground(&self) -> bool {
        classify(&normalize_name(self.raw_token_name())).is_some()
    }

    /// Key shared by a foreground token and its background counterpart.
    ///
    /// A foreground name is mapped onto the background name it pairs with:
    /// `foreground` becomes `background`, `foreground 2` becomes
    /// `background 2` and `primary foreground` becomes `primary`. A key that
    /// comes out as plain `background` inside an explicit namespace is
    /// replaced by the namespace itself, so `Primary/Background` and
    /// `Primary/Foreground` both key to `primary`.
    pub fn base_name(&self) -> String {
        let raw = normalize_name(self.raw_token_name());
        let base = match classify(&raw) {
            Some(ForegroundForm::Exact) => BACKGROUND.to_string(),
            Some(ForegroundForm::Suffixed) => format!("{BACKGROUND}{}", &raw[FOREGROUND.len()..]),
            Some(ForegroundForm::Prefixed) => raw[..raw.len() - FOREGROUND.len() - 1].to_string(),
            None => raw,
        };

        if base == BACKGROUND && self.has_namespace() {
            self.namespace()
        } else {
            base
        }
    }
}

/// How a normalized name spells "foreground"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ForegroundForm {
    /// `foreground`
    Exact,
    /// `foreground 2`
    Suffixed,
    /// `primary foreground`
    Prefixed,
}

fn classify(normalized: &str) -> Option<ForegroundForm> {
    if normalized == FOREGROUND {
        Some(ForegroundForm::Exact)
    } else if normalized.starts_with("foreground ") {
        Some(ForegroundForm::Suffixed)
    } else if normalized.ends_with(" foreground") {
        Some(ForegroundForm::Prefixed)
    } else {
        None
    }
}

/// Trim, lowercase and collapse internal whitespace runs to a single space
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
