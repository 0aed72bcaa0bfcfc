// Weighted policy evaluation.
//
// Rules pair plain data (id, name, weight) with a RuleMatcher strategy.
// The engine sums the weights of matching rules and maps the total to a
// verdict using the thresholds of the chosen evaluation mode.

pub mod engine;
pub mod rules;
pub mod traits;
pub mod verdict;

pub use engine::PolicyEngine;
pub use rules::PolicyRule;
pub use traits::RuleMatcher;
pub use verdict::{EvaluationMode, PolicyVerdict, Thresholds, Verdict};
