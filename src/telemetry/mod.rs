// Observability surface — redaction and verdict records.
//
// Anything derived from a verdict goes through `redact` before it is
// logged or exported.

pub mod record;
pub mod redact;

pub use record::{log_verdict, VerdictRecord};
pub use redact::{is_sensitive_key, redact, REDACTION_MARKER};
