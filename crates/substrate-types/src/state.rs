//! Per-entity state for growth containers and spore papers.
//!
//! These structs hold only the mutable, per-instance fields. Per-type
//! configuration (maximum fertility, grow chance, collection duration)
//! lives with the state machines that consume it.

use crate::code::AssetCode;

/// State of one fruiting bag or grow bed.
///
/// Invariants maintained by the growth scheduler:
///
/// - `0 <= fertility <= max_fertility` for the container's type.
/// - Growth attempts only happen while inoculated, fertile, and not
///   colonizing.
/// - Decay clears the spore and every colonization field together.
#[derive(Debug, Clone)]
pub struct GrowerState {
    /// Spore type the container was inoculated with.
    pub inoculated_spore: Option<String>,

    /// Item refunded (in part) when the container decays.
    pub refund_item: Option<String>,

    /// Remaining fertility.
    pub fertility: f32,

    /// Legacy growth start time in game hours. Preserved through
    /// persistence but not read by any rule.
    pub start_growing_hours: f64,

    /// Colonization progress in game hours.
    pub elapsed_colonize_hours: f64,

    /// Total colonization time required in game hours.
    pub colonize_duration_hours: f64,

    /// Absolute game hour of the next growth attempt. Zero means "not yet
    /// armed", which makes the first eligible tick an attempt.
    pub next_grow_hours: f64,

    /// Last clock reading folded into `elapsed_colonize_hours`.
    ///
    /// Runtime-only: never persisted, so the first tick after a reload
    /// re-seeds it and contributes no elapsed time.
    pub last_colonize_progress: Option<f64>,
}

impl GrowerState {
    /// Fresh, uninoculated state at full fertility.
    pub const fn new(max_fertility: f32) -> Self {
        Self {
            inoculated_spore: None,
            refund_item: None,
            fertility: max_fertility,
            start_growing_hours: 0.0,
            elapsed_colonize_hours: 0.0,
            colonize_duration_hours: 0.0,
            next_grow_hours: 0.0,
            last_colonize_progress: None,
        }
    }

    /// The inoculated spore type, treating blank strings as absent.
    pub fn spore(&self) -> Option<&str> {
        self.inoculated_spore
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    /// Whether a spore type has been introduced.
    pub fn is_inoculated(&self) -> bool {
        self.spore().is_some()
    }

    /// Whether colonization is still in progress.
    pub fn is_colonizing(&self) -> bool {
        self.is_inoculated()
            && self.colonize_duration_hours > 0.0
            && self.elapsed_colonize_hours < self.colonize_duration_hours
    }

    /// Whether fertility is exhausted.
    pub fn is_spent(&self) -> bool {
        self.fertility <= 0.0
    }

    /// Hours of colonization left, if colonizing.
    pub fn remaining_colonize_hours(&self) -> Option<f64> {
        self.is_colonizing()
            .then(|| self.colonize_duration_hours - self.elapsed_colonize_hours)
    }

    /// Fertility as a fraction of `max_fertility`, in `[0, 1]`.
    pub fn fertility_fraction(&self, max_fertility: f32) -> f32 {
        if max_fertility <= 0.0 {
            return 0.0;
        }
        (self.fertility / max_fertility).clamp(0.0, 1.0)
    }

    /// Terminal reset after fertility runs out: clear the spore and every
    /// colonization field, and pin fertility at zero.
    ///
    /// The refund item is kept: breaking the spent container pays it out.
    pub fn reset_spent(&mut self) {
        self.inoculated_spore = None;
        self.fertility = 0.0;
        self.start_growing_hours = 0.0;
        self.elapsed_colonize_hours = 0.0;
        self.colonize_duration_hours = 0.0;
        self.next_grow_hours = 0.0;
        self.last_colonize_progress = None;
    }
}

/// Equality over the persisted fields, compared bit-for-bit.
///
/// `last_colonize_progress` is runtime-only and excluded. A blank spore
/// compares equal to no spore.
impl PartialEq for GrowerState {
    fn eq(&self, other: &Self) -> bool {
        self.spore() == other.spore()
            && self.refund_item == other.refund_item
            && self.fertility.to_bits() == other.fertility.to_bits()
            && self.start_growing_hours.to_bits() == other.start_growing_hours.to_bits()
            && self.elapsed_colonize_hours.to_bits() == other.elapsed_colonize_hours.to_bits()
            && self.colonize_duration_hours.to_bits() == other.colonize_duration_hours.to_bits()
            && self.next_grow_hours.to_bits() == other.next_grow_hours.to_bits()
    }
}

/// State of one spore paper.
///
/// Each slot holds at most one unit. Once `result_spore` is set the paper
/// is converted and stays that way.
#[derive(Debug, Clone, PartialEq)]
pub struct SporePaperState {
    /// Fixed-length slot contents.
    pub slots: Vec<Option<AssetCode>>,

    /// Game hour at which the paper last became full.
    pub start_collecting_hours: f64,

    /// Spore collected by the conversion. Write-once.
    pub result_spore: Option<String>,
}

impl SporePaperState {
    /// Empty, unconverted paper with `slot_count` slots.
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
            start_collecting_hours: 0.0,
            result_spore: None,
        }
    }

    /// Paper that is already printed with `spore` from creation.
    pub fn printed(slot_count: usize, spore: &str) -> Self {
        Self {
            result_spore: Some(spore.to_owned()),
            ..Self::new(slot_count)
        }
    }

    /// Whether conversion has happened.
    pub fn is_converted(&self) -> bool {
        self.result_spore
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(Option::is_some)
    }

    /// First occupied slot, with its index.
    pub fn first_occupied(&self) -> Option<(usize, &AssetCode)> {
        self.slots
            .iter()
            .enumerate()
            .find_map(|(i, slot)| slot.as_ref().map(|code| (i, code)))
    }

    /// Number of occupied slots.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
