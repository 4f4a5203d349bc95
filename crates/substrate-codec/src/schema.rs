//! Explicit, versioned field schemas.
//!
//! Each schema lists the fields a record may carry, their kinds, and the
//! default used when a field is missing. Keys for grower and spore paper
//! storage keep the names existing saves were written with.

use substrate_types::{AttributeTree, AttributeValue};

/// The primitive kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// UTF-8 string.
    String,
    /// 32-bit float.
    Float,
    /// 64-bit double.
    Double,
}

impl FieldKind {
    /// Whether `value` has this kind.
    pub const fn matches(self, value: &AttributeValue) -> bool {
        matches!(
            (self, value),
            (Self::String, AttributeValue::String(_))
                | (Self::Float, AttributeValue::Float(_))
                | (Self::Double, AttributeValue::Double(_))
        )
    }

    /// Short name for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}

/// What a missing field decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// No value (`None`).
    Absent,
    /// Numeric zero.
    Zero,
    /// The container type's maximum fertility.
    MaxFertility,
}

/// One named field of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Record key. For repeated fields this is a prefix followed by an index.
    pub key: &'static str,
    /// Value kind.
    pub kind: FieldKind,
    /// Decoded value when the field is missing or corrupt.
    pub default: FieldDefault,
    /// Whether the key is a prefix for `key0`, `key1`, ...
    pub repeated: bool,
}

impl FieldSpec {
    /// A single, non-repeated field.
    pub const fn single(key: &'static str, kind: FieldKind, default: FieldDefault) -> Self {
        Self {
            key,
            kind,
            default,
            repeated: false,
        }
    }

    /// Whether `key` names this field (or one instance of it, if repeated).
    pub fn matches_key(&self, key: &str) -> bool {
        if !self.repeated {
            return key == self.key;
        }
        key.strip_prefix(self.key)
            .is_some_and(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
    }
}

/// A problem found while checking a record against a schema.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaIssue {
    /// The record has a key the schema does not define.
    UnknownKey {
        /// The unexpected key.
        key: String,
    },
    /// A known key holds the wrong kind of value.
    WrongKind {
        /// The offending key.
        key: String,
        /// Kind the schema expects.
        expected: FieldKind,
        /// Kind found in the record.
        found: &'static str,
    },
}

/// A named, versioned list of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Schema name, for diagnostics.
    pub name: &'static str,
    /// Layout version.
    pub version: u32,
    /// Every field the record may carry.
    pub fields: &'static [FieldSpec],
}

impl Schema {
    /// Look up the field spec for a key.
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.matches_key(key))
    }

    /// Check a record against this schema.
    ///
    /// Missing fields are not issues; they decode to their defaults.
    pub fn check(&self, tree: &AttributeTree) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();
        for (key, value) in tree.iter() {
            match self.field(key) {
                None => issues.push(SchemaIssue::UnknownKey {
                    key: key.to_owned(),
                }),
                Some(spec) if !spec.kind.matches(value) => issues.push(SchemaIssue::WrongKind {
                    key: key.to_owned(),
                    expected: spec.kind,
                    found: value.kind_name(),
                }),
                Some(_) => {}
            }
        }
        issues
    }
}

/// Keys of the grower storage record.
pub mod grower_keys {
    /// Inoculated spore type.
    pub const SPORE: &str = "_inoculatedmushroom";
    /// Refund item code.
    pub const REFUND_ITEM: &str = "_refunditem";
    /// Remaining fertility.
    pub const FERTILITY: &str = "_fertility";
    /// Legacy growth start hour.
    pub const START_GROWING_HOURS: &str = "_startgrowinghours";
    /// Colonization progress.
    pub const ELAPSED_COLONIZE_HOURS: &str = "_elapsedcolonizehours";
    /// Colonization duration.
    pub const COLONIZE_DURATION: &str = "_colonizeduration";
    /// Next growth attempt hour.
    pub const NEXT_GROW_HOURS: &str = "_nextgrowhours";
}

/// Keys of the harvested-item snapshot.
pub mod item_keys {
    /// Remaining fertility, only when not full.
    pub const FERTILITY: &str = "fertility";
    /// Refund item code.
    pub const REFUND_ITEM: &str = "refundItem";
    /// Colonization progress, only when positive.
    pub const ELAPSED_COLONIZE_HOURS: &str = "elapsedColonizeHours";
    /// Colonization duration, only when positive.
    pub const COLONIZE_DURATION: &str = "colonizeDuration";
    /// Inoculated spore type.
    pub const SPORE: &str = "sporetype";
}

/// Keys of the spore paper storage record.
pub mod spore_paper_keys {
    /// Hour the paper last became full.
    pub const START_COLLECTING_HOURS: &str = "_startcollectinghours";
    /// Collected spore type.
    pub const RESULT_SPORE: &str = "_sporetype";
    /// Slot contents prefix (`slot0`, `slot1`, ...).
    pub const SLOT: &str = "slot";
}

/// Grower storage layout.
pub static GROWER_SCHEMA: Schema = Schema {
    name: "grower",
    version: 1,
    fields: &[
        FieldSpec::single(grower_keys::SPORE, FieldKind::String, FieldDefault::Absent),
        FieldSpec::single(grower_keys::REFUND_ITEM, FieldKind::String, FieldDefault::Absent),
        FieldSpec::single(grower_keys::FERTILITY, FieldKind::Float, FieldDefault::MaxFertility),
        FieldSpec::single(grower_keys::START_GROWING_HOURS, FieldKind::Double, FieldDefault::Zero),
        FieldSpec::single(
            grower_keys::ELAPSED_COLONIZE_HOURS,
            FieldKind::Double,
            FieldDefault::Zero,
        ),
        FieldSpec::single(grower_keys::COLONIZE_DURATION, FieldKind::Double, FieldDefault::Zero),
        FieldSpec::single(grower_keys::NEXT_GROW_HOURS, FieldKind::Double, FieldDefault::Zero),
    ],
};

/// Harvested-item snapshot layout.
pub static GROWER_ITEM_SCHEMA: Schema = Schema {
    name: "grower-item",
    version: 1,
    fields: &[
        FieldSpec::single(item_keys::FERTILITY, FieldKind::Float, FieldDefault::MaxFertility),
        FieldSpec::single(item_keys::REFUND_ITEM, FieldKind::String, FieldDefault::Absent),
        FieldSpec::single(
            item_keys::ELAPSED_COLONIZE_HOURS,
            FieldKind::Double,
            FieldDefault::Zero,
        ),
        FieldSpec::single(item_keys::COLONIZE_DURATION, FieldKind::Double, FieldDefault::Zero),
        FieldSpec::single(item_keys::SPORE, FieldKind::String, FieldDefault::Absent),
    ],
};

/// Spore paper storage layout.
pub static SPORE_PAPER_SCHEMA: Schema = Schema {
    name: "spore-paper",
    version: 1,
    fields: &[
        FieldSpec::single(
            spore_paper_keys::START_COLLECTING_HOURS,
            FieldKind::Double,
            FieldDefault::Zero,
        ),
        FieldSpec::single(
            spore_paper_keys::RESULT_SPORE,
            FieldKind::String,
            FieldDefault::Absent,
        ),
        FieldSpec {
            key: spore_paper_keys::SLOT,
            kind: FieldKind::String,
            default: FieldDefault::Absent,
            repeated: true,
        },
    ],
};
