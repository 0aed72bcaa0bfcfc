// Content preparation — normalization and URL helpers.
//
// Every rule sees the same NormalizedContent, produced once per evaluation.

pub mod normalize;
pub mod urls;

pub use normalize::{normalize, NormalizedContent};
