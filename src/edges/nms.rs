//! Non-maximum suppression on gradient magnitude with direction alignment.
//!
//! Each orientation is folded into one of four 45° sectors; the pixel is
//! compared with its two neighbours along that sector and zeroed when it is
//! strictly smaller than either. Neighbours outside the grid do not take
//! part in the comparison.
use crate::angle::Sector;
use crate::edges::grad::GradientField;
use crate::image::Grid;

/// Return a copy of the magnitude with non-maxima set to 0.
pub fn suppress_non_maxima(field: &GradientField) -> Grid {
    let mag = &field.magnitude;
    let mut out = mag.clone();
    for y in 0..mag.h {
        for x in 0..mag.w {
            let m = mag.get(x, y);
            if m == 0.0 {
                continue;
            }
            let sector = Sector::from_degrees(field.orientation.get(x, y));
            let dominated = sector.neighbor_offsets().iter().any(|&(dx, dy)| {
                mag.get_checked(x as isize + dx, y as isize + dy)
                    .is_some_and(|n| m < n)
            });
            if dominated {
                out.set(x, y, 0.0);
            }
        }
    }
    out
}
