//! Fixed-size history of recent spectra (newest first).

use glam::Vec3;
use std::collections::VecDeque;

use crate::color::DEFAULT_BASE;

/// One spectrum plus the colour it was recorded with
#[derive(Debug, Clone)]
struct Row {
    values: Vec<f32>,
    color: Vec3,
}

/// Ring buffer of `rows` spectra, each exactly `bins` values long
///
/// Index 0 is always the most recent spectrum. Pushing a row ages every
/// other row by one slot and drops the oldest, so the length never changes.
#[derive(Debug, Clone)]
pub struct SpectrumHistory {
    rows: VecDeque<Row>,
    bins: usize,
}

impl SpectrumHistory {
    /// Create a history of silent rows
    pub fn new(rows: usize, bins: usize) -> Self {
        let rows = (0..rows)
            .map(|_| Row {
                values: vec![0.0; bins],
                color: DEFAULT_BASE,
            })
            .collect();
        Self { rows, bins }
    }

    /// Record a new spectrum at index 0, discarding the oldest
    ///
    /// `values` is truncated or zero-padded to `bins`.
    pub fn push(&mut self, values: &[f32], color: Vec3) {
        // Reuse the oldest row's allocation for the incoming spectrum
        let Some(mut row) = self.rows.pop_back() else {
            return;
        };

        let n = values.len().min(self.bins);
        row.values[..n].copy_from_slice(&values[..n]);
        row.values[n..].fill(0.0);
        row.color = color;

        self.rows.push_front(row);
    }

    /// Spectrum `age` pushes ago (0 = newest)
    pub fn row(&self, age: usize) -> Option<&[f32]> {
        self.rows.get(age).map(|r| r.values.as_slice())
    }

    /// Colour recorded with the spectrum `age` pushes ago
    pub fn color(&self, age: usize) -> Option<Vec3> {
        self.rows.get(age).map(|r| r.color)
    }

    /// Newest spectrum
    pub fn latest(&self) -> Option<&[f32]> {
        self.row(0)
    }

    /// `(values, colour)` pairs from newest to oldest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&[f32], Vec3)> + ExactSizeIterator {
        self.rows.iter().map(|r| (r.values.as_slice(), r.color))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Silence every row without changing the shape
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.values.fill(0.0);
            row.color = DEFAULT_BASE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(h: &SpectrumHistory) -> Vec<Vec<f32>> {
        h.iter().map(|(v, _)| v.to_vec()).collect()
    }

    #[test]
    fn test_new_history_is_silent() {
        let h = SpectrumHistory::new(4, 5);
        assert_eq!(h.len(), 4);
        assert_eq!(h.bins(), 5);
        assert!(h.iter().all(|(v, c)| v == [0.0; 5] && c == DEFAULT_BASE));
    }

    #[test]
    fn test_push_shifts_rows_older() {
        let mut h = SpectrumHistory::new(4, 5);
        let red = Vec3::new(1.0, 0.0, 0.0);
        let green = Vec3::new(0.0, 1.0, 0.0);

        h.push(&[1.0, 2.0, 3.0, 4.0, 5.0], red);
        h.push(&[5.0, 4.0, 3.0, 2.0, 1.0], green);

        assert_eq!(
            values(&h),
            vec![
                vec![5.0, 4.0, 3.0, 2.0, 1.0],
                vec![1.0, 2.0, 3.0, 4.0, 5.0],
                vec![0.0; 5],
                vec![0.0; 5],
            ]
        );
        assert_eq!(h.color(0), Some(green));
        assert_eq!(h.color(1), Some(red));
        assert_eq!(h.color(2), Some(DEFAULT_BASE));
    }

    #[test]
    fn test_oldest_row_is_discarded() {
        let mut h = SpectrumHistory::new(3, 2);
        for i in 1..=5 {
            h.push(&[i as f32, i as f32], DEFAULT_BASE);
        }

        assert_eq!(h.len(), 3);
        assert_eq!(h.latest(), Some(&[5.0, 5.0][..]));
        assert_eq!(h.row(2), Some(&[3.0, 3.0][..]));
        assert_eq!(h.row(3), None);
    }

    #[test]
    fn test_rows_keep_fixed_width() {
        let mut h = SpectrumHistory::new(2, 3);

        h.push(&[1.0, 2.0, 3.0, 4.0], DEFAULT_BASE);
        assert_eq!(h.latest(), Some(&[1.0, 2.0, 3.0][..]));

        h.push(&[9.0], DEFAULT_BASE);
        assert_eq!(h.latest(), Some(&[9.0, 0.0, 0.0][..]));
        assert_eq!(h.row(1), Some(&[1.0, 2.0, 3.0][..]));
    }

    #[test]
    fn test_iter_reversed_is_oldest_first() {
        let mut h = SpectrumHistory::new(3, 1);
        h.push(&[1.0], DEFAULT_BASE);
        h.push(&[2.0], DEFAULT_BASE);

        let oldest_first: Vec<f32> = h.iter().rev().map(|(v, _)| v[0]).collect();
        assert_eq!(oldest_first, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_clear_and_empty_history() {
        let mut h = SpectrumHistory::new(2, 2);
        h.push(&[1.0, 1.0], Vec3::ONE);
        h.clear();
        assert_eq!(values(&h), vec![vec![0.0; 2]; 2]);

        let mut empty = SpectrumHistory::new(0, 2);
        empty.push(&[1.0, 1.0], Vec3::ONE);
        assert!(empty.is_empty());
        assert_eq!(empty.latest(), None);
    }
}
