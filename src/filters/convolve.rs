use super::border::{extend, BorderPolicy};
use super::gaussian::Kernel;
use crate::image::{Grid, ImageView, ImageViewMut};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Value used for samples the kernel reads outside the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BorderFill {
    /// Half of the grid maximum: a neutral intensity that avoids dark rims.
    #[default]
    HalfMax,
    Zero,
    Constant(f64),
    /// Mirror the nearest rows/columns.
    Replicate,
}

fn padded_input(grid: &Grid, pad: usize, fill: BorderFill) -> Grid {
    let value = match fill {
        BorderFill::Replicate => return extend(grid, pad, BorderPolicy::Replicate),
        BorderFill::Zero => return extend(grid, pad, BorderPolicy::Zero),
        BorderFill::HalfMax => grid.max_value() / 2.0,
        BorderFill::Constant(v) => v,
    };
    let mut out = Grid::filled(grid.w + 2 * pad, grid.h + 2 * pad, value);
    for y in 0..grid.h {
        out.row_mut(y + pad)[pad..pad + grid.w].copy_from_slice(grid.row(y));
    }
    out
}

/// Correlate `grid` with a square `kernel`; output has the input's shape.
///
/// `out(x, y) = Σ pad(x + b − c, y + a − c) · k(a, b)` with `c = size / 2`,
/// where `pad` is the input surrounded by `fill`. Rows run in parallel and
/// each output sample keeps a fixed summation order.
pub fn convolve(grid: &Grid, kernel: &Kernel, fill: BorderFill) -> Grid {
    let (w, h) = (grid.w, grid.h);
    let mut out = Grid::new(w, h);
    if grid.is_empty() {
        return out;
    }

    let size = kernel.size();
    let c = kernel.center();
    // c >= size - 1 - c, so `c` covers both reach directions.
    let pad = c;
    let src = padded_input(grid, pad, fill);

    out.data.par_chunks_mut(w).enumerate().for_each(|(y, dst)| {
        for (x, px) in dst.iter_mut().enumerate() {
            let mut acc = 0.0;
            for a in 0..size {
                // (y + pad) + a - c
                let src_row = src.row(y + a);
                for b in 0..size {
                    acc += src_row[x + b] * kernel.get(a, b);
                }
            }
            *px = acc;
        }
    });
    out
}
