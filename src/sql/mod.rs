//! SQL text assembly: parameter inlining with type-aware escaping.

mod inline;
pub use inline::inline_params;
