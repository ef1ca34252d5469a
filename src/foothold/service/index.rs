//! Column index over foothold X spans.
//!
//! Every foothold is filed under each fixed-width column its horizontal span
//! touches. Footholds covering an absurd number of columns (or with
//! non-finite bounds) go into a catch-all list that every query includes.

use hashbrown::HashMap;

use crate::foothold::Foothold;
use crate::INDEX_BUCKET_WIDTH;

/// Footholds spanning more columns than this are kept in the catch-all list.
const MAX_COLUMNS_PER_FOOTHOLD: i64 = 4096;

#[derive(Debug, Default, Clone)]
pub(super) struct ColumnIndex {
    columns: HashMap<i32, Vec<usize>>,
    wide: Vec<usize>,
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int casts saturate and the result only selects a bucket"
)]
fn column_of(x: f32) -> i32 {
    (x / INDEX_BUCKET_WIDTH).floor() as i32
}

fn insert_sorted(slots: &mut Vec<usize>, slot: usize) {
    if let Err(pos) = slots.binary_search(&slot) {
        slots.insert(pos, slot);
    }
}

fn remove_sorted(slots: &mut Vec<usize>, slot: usize) {
    if let Ok(pos) = slots.binary_search(&slot) {
        slots.remove(pos);
    }
}

impl ColumnIndex {
    /// Column range covered by a foothold, or `None` for the catch-all list.
    fn span_columns(fh: &Foothold) -> Option<(i32, i32)> {
        let (min_x, max_x) = (fh.min_x(), fh.max_x());
        if !(min_x.is_finite() && max_x.is_finite()) {
            return None;
        }
        let (first, last) = (column_of(min_x), column_of(max_x));
        if i64::from(last) - i64::from(first) >= MAX_COLUMNS_PER_FOOTHOLD {
            return None;
        }
        Some((first, last))
    }

    pub(super) fn insert(&mut self, slot: usize, fh: &Foothold) {
        match Self::span_columns(fh) {
            Some((first, last)) => {
                for column in first..=last {
                    insert_sorted(self.columns.entry(column).or_default(), slot);
                }
            }
            None => insert_sorted(&mut self.wide, slot),
        }
    }

    pub(super) fn remove(&mut self, slot: usize, fh: &Foothold) {
        match Self::span_columns(fh) {
            Some((first, last)) => {
                for column in first..=last {
                    if let Some(slots) = self.columns.get_mut(&column) {
                        remove_sorted(slots, slot);
                        if slots.is_empty() {
                            self.columns.remove(&column);
                        }
                    }
                }
            }
            None => remove_sorted(&mut self.wide, slot),
        }
    }

    pub(super) fn clear(&mut self) {
        self.columns.clear();
        self.wide.clear();
    }

    /// Slots that may span `x`, in ascending order.
    pub(super) fn slots_at(&self, x: f32) -> Vec<usize> {
        let column = self
            .columns
            .get(&column_of(x))
            .map_or(&[][..], Vec::as_slice);
        merge(column, &self.wide)
    }

    /// Slots that may intersect `[min_x, max_x]`, in ascending order.
    pub(super) fn slots_between(&self, min_x: f32, max_x: f32) -> Vec<usize> {
        let mut found: Vec<usize> = if min_x.is_finite() && max_x.is_finite() {
            let (first, last) = (column_of(min_x), column_of(max_x));
            let wanted = i64::from(last) - i64::from(first) + 1;
            if usize::try_from(wanted).map_or(true, |n| n > self.columns.len()) {
                self.columns.values().flatten().copied().collect()
            } else {
                (first..=last)
                    .filter_map(|column| self.columns.get(&column))
                    .flatten()
                    .copied()
                    .collect()
            }
        } else {
            self.columns.values().flatten().copied().collect()
        };
        found.extend_from_slice(&self.wide);
        found.sort_unstable();
        found.dedup();
        found
    }
}

fn merge(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out.sort_unstable();
    out.dedup();
    out
}
