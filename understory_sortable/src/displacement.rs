// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sibling displacement: which siblings shift, and where the dragged item lands.
//!
//! ## Overview
//!
//! Given the dragged item's leading-edge position along the active axis (the
//! *sorting offset*) and every sibling's measured edge offset, each sibling is
//! either shifted by one dragged-item extent or left in place:
//!
//! - A sibling *after* the origin index shifts backward (by `-dimension`) once
//!   `sorting_offset + half >= edge_offset`.
//! - A sibling *before* the origin index shifts forward (by `+dimension`) once
//!   `sorting_offset <= edge_offset + half`.
//!
//! `half` is half of the smaller of the two extents: half the sibling's extent
//! when the dragged item is strictly larger, else half the dragged item's.
//!
//! ## Tie-break
//!
//! Siblings are visited in ascending index order. Moving forward, every
//! qualifying sibling overwrites the new index, so the last one wins. Moving
//! backward, only the first qualifying sibling sets it. This keeps the result
//! stable when one recompute crosses several midpoints. When nothing qualifies
//! the new index is the origin index.

use smallvec::SmallVec;

/// Geometry of the item being dragged.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DraggedGeometry {
    /// Logical index the drag started from.
    pub index: usize,
    /// Extent of the dragged item along the active axis.
    pub dimension: f64,
    /// Current leading-edge position of the dragged item, in container space.
    pub sorting_offset: f64,
}

/// Geometry of one entry of the collection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SiblingGeometry {
    /// Logical index of the entry.
    pub index: usize,
    /// Extent of the entry along the active axis.
    pub dimension: f64,
    /// Leading-edge offset from the container origin, or `None` if it could not
    /// be measured (for example the element was detached mid-drag).
    pub edge_offset: Option<f64>,
}

/// Displacement of a single sibling.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SiblingShift {
    /// Position of the sibling in the input slice.
    pub slot: usize,
    /// Logical index of the sibling.
    pub index: usize,
    /// Signed translation along the active axis.
    pub translate: f64,
}

/// Result of a displacement pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Displacement {
    /// One shift per sibling, in input order. Entries sharing the dragged
    /// item's index are omitted.
    pub shifts: SmallVec<[SiblingShift; 16]>,
    /// Index the dragged item would land on if released now.
    pub new_index: usize,
}

impl Displacement {
    /// Returns the shift applied to the sibling at logical `index`, if it was visited.
    #[must_use]
    pub fn shift_of(&self, index: usize) -> Option<f64> {
        self.shifts
            .iter()
            .find(|s| s.index == index)
            .map(|s| s.translate)
    }
}

/// Threshold distance used to decide whether the dragged item has crossed a sibling.
#[must_use]
pub fn half_offset(dragged_dimension: f64, sibling_dimension: f64) -> f64 {
    if dragged_dimension > sibling_dimension {
        sibling_dimension / 2.0
    } else {
        dragged_dimension / 2.0
    }
}

/// Computes sibling shifts and the tentative new index.
///
/// `siblings` must be ordered by ascending logical index.
#[must_use]
pub fn compute_displacement(dragged: DraggedGeometry, siblings: &[SiblingGeometry]) -> Displacement {
    debug_assert!(
        dragged.sorting_offset.is_finite() && dragged.dimension.is_finite(),
        "dragged geometry must be finite; got {dragged:?}"
    );
    let mut shifts = SmallVec::new();
    let mut new_index = None;

    for (slot, sibling) in siblings.iter().enumerate() {
        if sibling.index == dragged.index {
            continue;
        }
        let mut translate = 0.0;
        if let Some(edge) = sibling.edge_offset {
            let half = half_offset(dragged.dimension, sibling.dimension);
            if sibling.index > dragged.index && dragged.sorting_offset + half >= edge {
                translate = -dragged.dimension;
                new_index = Some(sibling.index);
            } else if sibling.index < dragged.index && dragged.sorting_offset <= edge + half {
                translate = dragged.dimension;
                if new_index.is_none() {
                    new_index = Some(sibling.index);
                }
            }
        }
        shifts.push(SiblingShift {
            slot,
            index: sibling.index,
            translate,
        });
    }

    Displacement {
        shifts,
        new_index: new_index.unwrap_or(dragged.index),
    }
}
