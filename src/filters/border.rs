//! Boundary extension with zero or mirrored borders.
use crate::image::{Grid, ImageView, ImageViewMut};
use serde::{Deserialize, Serialize};

/// How the samples outside the original extent are produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BorderPolicy {
    /// Border cells stay at 0.
    Zero,
    /// Border cells mirror the nearest rows/columns (`…, 1, 0 | 0, 1, …`).
    #[default]
    Replicate,
}

/// Map an out-of-range index onto `[0, n)` by half-sample symmetric
/// reflection. Pads wider than the grid keep reflecting.
#[inline]
fn reflect(i: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let m = i.rem_euclid(period);
    if m >= n as isize {
        (period - 1 - m) as usize
    } else {
        m as usize
    }
}

/// Return a `(w + 2·pad) × (h + 2·pad)` copy of `grid` with the original
/// centred. `pad == 0` yields a plain copy.
///
/// Mirroring is separable, so corners equal the left/right mirror of the
/// already extended top/bottom rows.
pub fn extend(grid: &Grid, pad: usize, policy: BorderPolicy) -> Grid {
    if pad == 0 {
        return grid.clone();
    }
    let mut out = Grid::new(grid.w + 2 * pad, grid.h + 2 * pad);
    if grid.is_empty() {
        return out;
    }
    match policy {
        BorderPolicy::Zero => {
            for y in 0..grid.h {
                out.row_mut(y + pad)[pad..pad + grid.w].copy_from_slice(grid.row(y));
            }
        }
        BorderPolicy::Replicate => {
            for oy in 0..out.h {
                let src = grid.row(reflect(oy as isize - pad as isize, grid.h));
                let dst = out.row_mut(oy);
                for (ox, px) in dst.iter_mut().enumerate() {
                    *px = src[reflect(ox as isize - pad as isize, grid.w)];
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: usize, h: usize) -> Grid {
        Grid::from_fn(w, h, |x, y| (y * w + x) as f64 + 1.0)
    }

    #[test]
    fn zero_pad_is_plain_copy() {
        let g = ramp(4, 3);
        let out = extend(&g, 0, BorderPolicy::Replicate);
        assert_eq!(out, g);
        assert_ne!(out.data.as_ptr(), g.data.as_ptr());
    }

    #[test]
    fn zero_policy_leaves_border_empty() {
        let g = ramp(3, 2);
        let out = extend(&g, 2, BorderPolicy::Zero);
        assert_eq!((out.w, out.h), (7, 6));
        assert_eq!(out.get(0, 0), 0.0);
        assert_eq!(out.get(6, 5), 0.0);
        assert_eq!(out.get(2, 2), g.get(0, 0));
        assert_eq!(out.get(4, 3), g.get(2, 1));
    }

    #[test]
    fn replicate_mirrors_first_row_and_column() {
        let g = ramp(4, 3);
        let out = extend(&g, 1, BorderPolicy::Replicate);
        for x in 0..g.w {
            assert_eq!(out.get(x + 1, 0), g.get(x, 0));
            assert_eq!(out.get(x + 1, out.h - 1), g.get(x, g.h - 1));
        }
        for y in 0..out.h {
            assert_eq!(out.get(0, y), out.get(1, y));
            assert_eq!(out.get(out.w - 1, y), out.get(out.w - 2, y));
        }
    }

    #[test]
    fn replicate_flips_rather_than_repeats() {
        let g = ramp(3, 3);
        let out = extend(&g, 2, BorderPolicy::Replicate);
        // rows above the image are rows 1 then 0 (flipped), likewise columns
        assert_eq!(out.get(2, 0), g.get(0, 1));
        assert_eq!(out.get(2, 1), g.get(0, 0));
        assert_eq!(out.get(0, 2), g.get(1, 0));
        assert_eq!(out.get(0, 0), g.get(1, 1));
        assert_eq!(out.get(6, 6), g.get(1, 1));
    }

    #[test]
    fn pad_wider_than_grid_keeps_reflecting() {
        let g = ramp(1, 1);
        let out = extend(&g, 3, BorderPolicy::Replicate);
        assert!(out.data.iter().all(|&v| v == 1.0));
    }
}
