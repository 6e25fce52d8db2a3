//! Combination enumeration.
//!
//! Expands each [`CombinationShape`] into the Cartesian product of its
//! dimensions' values. Iteration is outer-to-inner in shape order, like
//! nested loops: the last dimension varies fastest.
//!
//! ```text
//! shape [genre, style]   genre = {fiction, memoir}   style = {savage, gentle}
//!
//! fiction-savage, fiction-gentle, memoir-savage, memoir-gentle
//! ```
//!
//! Iterators are lazy and own their cursor, so enumerating a shape twice
//! yields the same sequence both times.

use crate::types::{Attribute, Catalogue, CombinationShape, Dimension, PageRecord};

/// Lazy Cartesian product over one shape.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    dimensions: Vec<&'a Dimension>,
    /// Odometer over value indices; `None` once exhausted.
    cursor: Option<Vec<usize>>,
    remaining: usize,
}

/// Enumerate every page record of `shape`.
///
/// An unresolvable key (only possible on an unvalidated catalogue) or an
/// empty shape yields an empty sequence.
pub fn enumerate<'a>(catalogue: &'a Catalogue, shape: &CombinationShape) -> Combinations<'a> {
    let dimensions: Option<Vec<&Dimension>> =
        shape.keys.iter().map(|k| catalogue.dimension(k)).collect();
    let dimensions = dimensions.unwrap_or_default();

    let remaining = if dimensions.is_empty() {
        0
    } else {
        dimensions.iter().map(|d| d.values.len()).product()
    };
    let cursor = (remaining > 0).then(|| vec![0; dimensions.len()]);

    Combinations {
        dimensions,
        cursor,
        remaining,
    }
}

/// Enumerate all shapes, concatenated in declaration order.
pub fn enumerate_all(catalogue: &Catalogue) -> impl Iterator<Item = PageRecord> + '_ {
    catalogue
        .shapes
        .iter()
        .flat_map(move |shape| enumerate(catalogue, shape))
}

/// Number of records [`enumerate`] yields for `shape`.
pub fn combination_count(catalogue: &Catalogue, shape: &CombinationShape) -> usize {
    enumerate(catalogue, shape).len()
}

impl Iterator for Combinations<'_> {
    type Item = PageRecord;

    fn next(&mut self) -> Option<PageRecord> {
        let cursor = self.cursor.as_mut()?;

        let attributes = self
            .dimensions
            .iter()
            .zip(cursor.iter())
            .map(|(dim, &idx)| Attribute {
                dimension: dim.key.clone(),
                value: dim.values[idx].clone(),
            })
            .collect();

        // Advance the innermost position, carrying outward.
        let mut exhausted = true;
        for pos in (0..cursor.len()).rev() {
            cursor[pos] += 1;
            if cursor[pos] < self.dimensions[pos].values.len() {
                exhausted = false;
                break;
            }
            cursor[pos] = 0;
        }
        if exhausted {
            self.cursor = None;
        }
        self.remaining -= 1;

        Some(PageRecord::new(attributes))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Combinations<'_> {}

impl std::iter::FusedIterator for Combinations<'_> {}
