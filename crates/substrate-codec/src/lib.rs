//! Persistence codec for the Substrate growth simulation.
//!
//! Entity state is stored as a flat [`AttributeTree`] of named string,
//! float, and double fields. The field names come from an explicit
//! [`Schema`] rather than from in-memory field names, so the Rust structs
//! can be refactored without breaking saved worlds.
//!
//! Decoding never fails. Missing or wrongly-typed fields fall back to the
//! defaults documented on each [`FieldSpec`], and the substitution is
//! logged at debug level.
//!
//! # Modules
//!
//! - [`schema`] -- Field specs and the three canonical schemas
//! - [`grower`] -- Codecs for grower storage and the harvested-item snapshot
//! - [`spore_paper`] -- Codec for spore paper storage
//!
//! [`AttributeTree`]: substrate_types::AttributeTree

pub mod grower;
pub mod schema;
pub mod spore_paper;

use substrate_types::AttributeTree;
use tracing::debug;

pub use grower::{GrowerCodec, GrowerItemCodec};
pub use schema::{FieldDefault, FieldKind, FieldSpec, Schema, SchemaIssue};
pub use spore_paper::SporePaperCodec;

/// Bidirectional mapping between a state value and an attribute record.
///
/// Implementations guarantee `decode(&encode(x)) == x` for every reachable
/// state `x`, and that `decode` accepts any record at all.
pub trait PersistenceCodec<T> {
    /// The schema this codec reads and writes.
    fn schema(&self) -> &'static Schema;

    /// Write `value` into a fresh record.
    fn encode(&self, value: &T) -> AttributeTree;

    /// Read a value back, substituting defaults for absent or corrupt fields.
    fn decode(&self, tree: &AttributeTree) -> T;
}

/// Log every issue `schema` finds in `tree` at debug level.
pub(crate) fn log_issues(schema: &Schema, tree: &AttributeTree) {
    for issue in schema.check(tree) {
        debug!(
            schema = schema.name,
            version = schema.version,
            ?issue,
            "Attribute record issue, using defaults"
        );
    }
}

/// Read a string field, treating blank strings as absent.
pub(crate) fn non_blank(tree: &AttributeTree, key: &str) -> Option<String> {
    tree.get_string(key)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

/// An absolute clock reading; non-finite values decode to zero.
pub(crate) fn sanitize_timestamp(raw: Option<f64>) -> f64 {
    raw.filter(|v| v.is_finite()).unwrap_or(0.0)
}
