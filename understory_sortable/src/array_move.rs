// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Committing a finished sort to the host's data.

use alloc::vec::Vec;

/// Moves the item at `from` to position `to`, shifting the items in between.
///
/// When `to` is past the end, the vector is first padded with
/// `T::default()` so that `to` becomes a valid position. A `from` outside the
/// padded vector then moves nothing: unlike a `splice`-based move, no empty
/// slot is inserted at `to`.
///
/// Typically called with the `old_index` and `new_index` of a
/// [`SortEnd`](crate::SortEnd):
///
/// ```rust
/// use understory_sortable::array_move;
///
/// let mut items = vec!["a", "b", "c", "d"];
/// array_move(&mut items, 3, 1);
/// assert_eq!(items, ["a", "d", "b", "c"]);
///
/// let mut padded = vec![Some(1), Some(2)];
/// array_move(&mut padded, 0, 3);
/// assert_eq!(padded, [Some(2), None, None, Some(1)]);
/// ```
pub fn array_move<T: Default>(items: &mut Vec<T>, from: usize, to: usize) {
    if to >= items.len() {
        items.resize_with(to + 1, T::default);
    }
    if from >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}
