// ABOUTME: Alias resolution for color variables across modes
// ABOUTME: Follows alias chains through the store with a visited set guarding against cycles

use std::borrow::Cow;
use std::collections::HashSet;
use swatchbook_logging::{debug, trace};
use swatchbook_types::{Color, ValueEntry, VariableRecord};

use crate::error::ResolveError;
use crate::store::VariableStore;

/// Resolves a variable's value for a mode to a concrete [`Color`].
///
/// When an alias points at a variable that does not define the requested
/// mode, resolution continues at that variable's first mode in iteration
/// order. This mirrors how the host treats aliases into single-mode
/// primitive collections.
pub struct AliasResolver<'s> {
    store: &'s dyn VariableStore,
}

impl<'s> AliasResolver<'s> {
    pub fn new(store: &'s dyn VariableStore) -> Self {
        Self { store }
    }

    /// Resolve to a color, or `None` when the chain cannot be completed.
    pub async fn resolve(&self, variable: &VariableRecord, mode_id: &str) -> Option<Color> {
        match self.try_resolve(variable, mode_id).await {
            Ok(color) => Some(color),
            Err(err) => {
                debug!(
                    variable_id = %variable.id,
                    mode_id = %mode_id,
                    reason = err.kind(),
                    error = %err,
                    "Variable did not resolve to a color"
                );
                None
            }
        }
    }

    /// Resolve to a color, reporting why the chain could not be completed.
    pub async fn try_resolve(
        &self,
        variable: &VariableRecord,
        mode_id: &str,
    ) -> Result<Color, ResolveError> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut current: Cow<'_, VariableRecord> = Cow::Borrowed(variable);
        let mut mode: String = mode_id.to_string();

        loop {
            let Some(value) = current.value_for_mode(&mode) else {
                return Err(ResolveError::MissingValue {
                    variable_id: current.id.clone(),
                    mode_id: mode,
                });
            };

            if !visited.insert(current.id.clone()) {
                return Err(ResolveError::CycleDetected {
                    variable_id: current.id.clone(),
                });
            }

            let target_id = match value {
                ValueEntry::Color(rgb) if current.is_color() => return Ok(Color::from(*rgb)),
                ValueEntry::Color(_) => {
                    return Err(ResolveError::WrongType {
                        variable_id: current.id.clone(),
                        resolved_type: current.resolved_type,
                    });
                }
                ValueEntry::Alias(alias) => alias.id.clone(),
                ValueEntry::Unsupported(_) => {
                    return Err(ResolveError::UnsupportedValue {
                        variable_id: current.id.clone(),
                        mode_id: mode,
                    });
                }
            };

            let Some(target) = self.store.get_variable_by_id(&target_id).await? else {
                return Err(ResolveError::BrokenAlias {
                    variable_id: current.id.clone(),
                    target_id,
                });
            };

            if !target.has_mode(&mode) {
                let Some(first) = target.first_mode_id() else {
                    return Err(ResolveError::MissingValue {
                        variable_id: target.id.clone(),
                        mode_id: mode,
                    });
                };
                trace!(
                    variable_id = %target.id,
                    requested_mode = %mode,
                    fallback_mode = %first,
                    "Alias target lacks mode, using its first mode"
                );
                mode = first.to_string();
            }

            current = Cow::Owned(target);
        }
    }
}
