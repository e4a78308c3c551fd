// ABOUTME: Groups color tokens by namespace and pairs backgrounds with foregrounds
// ABOUTME: All groupings are ordered by first encounter so output is deterministic

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use swatchbook_logging::trace;

use crate::token::ColorToken;

/// namespace -> tokens, in first-seen order
pub type NamespaceGroups<'a> = IndexMap<String, Vec<&'a ColorToken>>;

/// namespace -> base name -> pair
pub type PairGroups<'a> = IndexMap<String, IndexMap<String, ColorPair<'a>>>;

/// Background and foreground tokens sharing a base name within a namespace.
///
/// Either side may be missing; the pair borrows the tokens it groups.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorPair<'a> {
    pub background: Option<&'a ColorToken>,
    pub foreground: Option<&'a ColorToken>,
}

impl<'a> ColorPair<'a> {
    pub fn new(background: Option<&'a ColorToken>, foreground: Option<&'a ColorToken>) -> Self {
        Self {
            background,
            foreground,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.background.is_some() && self.foreground.is_some()
    }

    /// Tokens present in the pair, background first
    pub fn tokens(&self) -> impl Iterator<Item = &'a ColorToken> {
        self.background.into_iter().chain(self.foreground)
    }

    fn side_mut(&mut self, side: PairSide) -> &mut Option<&'a ColorToken> {
        match side {
            PairSide::Background => &mut self.background,
            PairSide::Foreground => &mut self.foreground,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PairSide {
    Background,
    Foreground,
}

impl PairSide {
    pub fn of(token: &ColorToken) -> Self {
        if token.is_foreground() {
            PairSide::Foreground
        } else {
            PairSide::Background
        }
    }
}

impl fmt::Display for PairSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairSide::Background => f.write_str("background"),
            PairSide::Foreground => f.write_str("foreground"),
        }
    }
}

/// A pair side claimed by more than one token; the later token won
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairingDiagnostic {
    pub namespace: String,
    pub base_name: String,
    pub side: PairSide,
    pub replaced_id: String,
    pub replacement_id: String,
}

impl fmt::Display for PairingDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}: {} '{}' replaced by '{}'",
            self.namespace, self.base_name, self.side, self.replaced_id, self.replacement_id
        )
    }
}

/// Stateless grouping operations over resolved tokens
pub struct TokenPairer;

impl TokenPairer {
    pub fn group_by_namespace(tokens: &[ColorToken]) -> NamespaceGroups<'_> {
        let mut groups = NamespaceGroups::new();
        for token in tokens {
            groups.entry(token.namespace()).or_default().push(token);
        }
        groups
    }

    /// Pair each namespace's tokens by base name. Later claims on the same
    /// side overwrite earlier ones.
    pub fn group_by_pair<'a>(groups: &NamespaceGroups<'a>) -> PairGroups<'a> {
        Self::group_by_pair_with_diagnostics(groups).0
    }

    /// Same grouping as [`TokenPairer::group_by_pair`], also listing every
    /// overwritten claim.
    pub fn group_by_pair_with_diagnostics<'a>(
        groups: &NamespaceGroups<'a>,
    ) -> (PairGroups<'a>, Vec<PairingDiagnostic>) {
        let mut pairs = PairGroups::new();
        let mut diagnostics = Vec::new();

        for (namespace, tokens) in groups {
            let by_base = pairs.entry(namespace.clone()).or_default();
            for &token in tokens {
                let base_name = token.base_name();
                let side = PairSide::of(token);
                let slot = by_base.entry(base_name.clone()).or_default().side_mut(side);

                if let Some(previous) = slot.replace(token) {
                    trace!(
                        namespace = %namespace,
                        base_name = %base_name,
                        side = %side,
                        replaced = %previous.id(),
                        replacement = %token.id(),
                        "Pair side overwritten"
                    );
                    diagnostics.push(PairingDiagnostic {
                        namespace: namespace.clone(),
                        base_name,
                        side,
                        replaced_id: previous.id().to_string(),
                        replacement_id: token.id().to_string(),
                    });
                }
            }
        }

        (pairs, diagnostics)
    }

    /// Group and pair in one step
    pub fn pair(tokens: &[ColorToken]) -> PairGroups<'_> {
        Self::group_by_pair(&Self::group_by_namespace(tokens))
    }
}
