use crate::image::Grid;
use serde::Serialize;
use std::cmp::Ordering;

/// Candidate pose: a cell of the accumulator and its (smoothed) vote.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Peak {
    pub row: usize,
    pub col: usize,
    pub rotation_index: usize,
    pub scale_index: usize,
    pub rotation_deg: f64,
    pub scale: f64,
    pub score: f64,
}

/// 4D vote space over (row, col, rotation, scale).
///
/// Storage keeps every (rotation, scale) slice as one contiguous row-major
/// `rows × cols` block, slices ordered rotation-major, so slices can be
/// filled or smoothed independently.
#[derive(Clone, Debug, PartialEq)]
pub struct Accumulator {
    rows: usize,
    cols: usize,
    rotations_deg: Vec<f64>,
    scales: Vec<f64>,
    data: Vec<f64>,
}

impl Accumulator {
    /// Zero-initialised accumulator for the given hypotheses.
    pub fn new(rows: usize, cols: usize, rotations_deg: Vec<f64>, scales: Vec<f64>) -> Self {
        let len = rows * cols * rotations_deg.len() * scales.len();
        Self {
            rows,
            cols,
            rotations_deg,
            scales,
            data: vec![0.0; len],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rotations_deg(&self) -> &[f64] {
        &self.rotations_deg
    }

    pub fn scales(&self) -> &[f64] {
        &self.scales
    }

    /// Number of (rotation, scale) slices.
    #[inline]
    pub fn slice_count(&self) -> usize {
        self.rotations_deg.len() * self.scales.len()
    }

    #[inline]
    pub fn slice_len(&self) -> usize {
        self.rows * self.cols
    }

    /// `(rotation_index, scale_index)` of the `k`-th slice.
    #[inline]
    pub fn slice_hypothesis(&self, k: usize) -> (usize, usize) {
        (k / self.scales.len(), k % self.scales.len())
    }

    #[inline]
    fn offset(&self, row: usize, col: usize, rotation: usize, scale: usize) -> usize {
        ((rotation * self.scales.len() + scale) * self.rows + row) * self.cols + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize, rotation: usize, scale: usize) -> f64 {
        self.data[self.offset(row, col, rotation, scale)]
    }

    #[inline]
    pub fn add(&mut self, row: usize, col: usize, rotation: usize, scale: usize, weight: f64) {
        let i = self.offset(row, col, rotation, scale);
        self.data[i] += weight;
    }

    pub fn slice(&self, rotation: usize, scale: usize) -> &[f64] {
        let start = self.offset(0, 0, rotation, scale);
        &self.data[start..start + self.slice_len()]
    }

    /// Copy one slice out as a `cols × rows` grid.
    pub fn slice_grid(&self, rotation: usize, scale: usize) -> Grid {
        Grid {
            w: self.cols,
            h: self.rows,
            stride: self.cols,
            data: self.slice(rotation, scale).to_vec(),
        }
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }

    fn peak_at(&self, flat: usize) -> Peak {
        let slice_len = self.slice_len();
        let (rotation_index, scale_index) = self.slice_hypothesis(flat / slice_len);
        let within = flat % slice_len;
        Peak {
            row: within / self.cols,
            col: within % self.cols,
            rotation_index,
            scale_index,
            rotation_deg: self.rotations_deg[rotation_index],
            scale: self.scales[scale_index],
            score: self.data[flat],
        }
    }

    /// Highest cell; the first one in storage order on ties. `None` when
    /// the accumulator is empty or holds no positive vote.
    pub fn global_max(&self) -> Option<Peak> {
        let mut best: Option<usize> = None;
        for (i, &v) in self.data.iter().enumerate() {
            if v > 0.0 && best.map_or(true, |b| v > self.data[b]) {
                best = Some(i);
            }
        }
        best.map(|i| self.peak_at(i))
    }

    /// Local maxima within each slice (8-neighbourhood) scoring above
    /// `min_score`, best first, at most `max_peaks`.
    ///
    /// On plateaus only the first cell in scan order is reported: a cell
    /// must beat the neighbours scanned before it and match or beat the
    /// ones after it.
    pub fn local_maxima(&self, min_score: f64, max_peaks: usize) -> Vec<Peak> {
        let (rows, cols) = (self.rows as isize, self.cols as isize);
        let slice_len = self.slice_len();
        let mut peaks = Vec::new();
        for k in 0..self.slice_count() {
            let base = k * slice_len;
            let slice = &self.data[base..base + slice_len];
            for r in 0..rows {
                for c in 0..cols {
                    let v = slice[(r * cols + c) as usize];
                    if v <= min_score || v <= 0.0 {
                        continue;
                    }
                    let mut is_max = true;
                    'nbrs: for dr in -1..=1isize {
                        for dc in -1..=1isize {
                            if dr == 0 && dc == 0 {
                                continue;
                            }
                            let (nr, nc) = (r + dr, c + dc);
                            if nr < 0 || nc < 0 || nr >= rows || nc >= cols {
                                continue;
                            }
                            let n = slice[(nr * cols + nc) as usize];
                            let before = dr < 0 || (dr == 0 && dc < 0);
                            if n > v || (before && n == v) {
                                is_max = false;
                                break 'nbrs;
                            }
                        }
                    }
                    if is_max {
                        peaks.push(self.peak_at(base + (r * cols + c) as usize));
                    }
                }
            }
        }
        peaks.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    (a.rotation_index, a.scale_index, a.row, a.col).cmp(&(
                        b.rotation_index,
                        b.scale_index,
                        b.row,
                        b.col,
                    ))
                })
        });
        peaks.truncate(max_peaks);
        peaks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc() -> Accumulator {
        Accumulator::new(6, 5, vec![0.0, 90.0], vec![1.0, 1.5, 2.0])
    }

    #[test]
    fn slices_are_contiguous_and_independent() {
        let mut a = acc();
        a.add(2, 3, 1, 2, 4.0);
        a.add(2, 3, 1, 2, 1.0);
        assert_eq!(a.get(2, 3, 1, 2), 5.0);
        assert_eq!(a.slice(1, 2)[2 * 5 + 3], 5.0);
        assert_eq!(a.slice(0, 2).iter().sum::<f64>(), 0.0);
        let g = a.slice_grid(1, 2);
        assert_eq!((g.w, g.h), (5, 6));
        assert_eq!(g.get(3, 2), 5.0);
        assert_eq!(a.slice_count(), 6);
        assert_eq!(a.slice_hypothesis(5), (1, 2));
    }

    #[test]
    fn global_max_reports_pose() {
        let mut a = acc();
        a.add(1, 1, 0, 0, 2.0);
        a.add(4, 2, 1, 1, 7.0);
        let p = a.global_max().unwrap();
        assert_eq!((p.row, p.col), (4, 2));
        assert_eq!((p.rotation_index, p.scale_index), (1, 1));
        assert_eq!(p.rotation_deg, 90.0);
        assert_eq!(p.scale, 1.5);
        assert_eq!(p.score, 7.0);
        assert!(acc().global_max().is_none());
    }

    #[test]
    fn local_maxima_sorted_and_plateau_deduplicated() {
        let mut a = acc();
        a.add(1, 1, 0, 0, 3.0);
        a.add(1, 2, 0, 0, 3.0); // plateau with (1,1)
        a.add(4, 4, 0, 1, 9.0);
        a.add(4, 3, 0, 1, 5.0); // flank of the 9
        let peaks = a.local_maxima(0.0, 10);
        assert_eq!(peaks.len(), 2);
        let top = &peaks[0];
        assert_eq!((top.row, top.col, top.scale_index), (4, 4, 1));
        assert_eq!((peaks[1].row, peaks[1].col), (1, 1));
        assert_eq!(a.local_maxima(4.0, 10).len(), 1);
        assert_eq!(a.local_maxima(0.0, 1).len(), 1);
    }
}
