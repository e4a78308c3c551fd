// ABOUTME: Pure data types with no cross-crate dependencies
// ABOUTME: Foundation layer for all other swatchbook crates

pub mod collection;
pub mod color;
pub mod variable;

// Re-export commonly used types
pub use collection::{Mode, VariableCollection};
pub use color::{Color, ParseColorError, Rgb};
pub use variable::{AliasKind, ResolvedType, ValueEntry, VariableAlias, VariableRecord};
