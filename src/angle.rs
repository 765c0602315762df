//! Angle utilities shared by the gradient, suppression and voting stages.
//!
//! All angles here are in degrees. Gradient orientations live in
//! (−180°, 180°]; suppression only cares about the axis, so it folds
//! orientations modulo 180°.

/// Wrap an angle in degrees into (−180, 180].
#[inline]
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = (deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Gradient orientation of `(dx, dy)` in degrees, range (−180, 180].
#[inline]
pub fn orientation_degrees(dx: f64, dy: f64) -> f64 {
    normalize_degrees(dy.atan2(dx).to_degrees())
}

/// One of the four 45°-wide suppression sectors, named after the axis the
/// gradient runs along. Boundaries sit at ±22.5° and ±67.5° (mod 180°).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sector {
    /// Gradient along ±x (a vertical edge).
    Horizontal,
    /// Gradient along +x+y / −x−y.
    Diagonal,
    /// Gradient along ±y (a horizontal edge).
    Vertical,
    /// Gradient along +x−y / −x+y.
    AntiDiagonal,
}

impl Sector {
    pub fn from_degrees(deg: f64) -> Self {
        let folded = deg.rem_euclid(180.0);
        if !(22.5..157.5).contains(&folded) {
            Sector::Horizontal
        } else if folded < 67.5 {
            Sector::Diagonal
        } else if folded < 112.5 {
            Sector::Vertical
        } else {
            Sector::AntiDiagonal
        }
    }

    /// Offsets `(dx, dy)` of the two neighbours along the gradient.
    #[inline]
    pub fn neighbor_offsets(self) -> [(isize, isize); 2] {
        match self {
            Sector::Horizontal => [(-1, 0), (1, 0)],
            Sector::Diagonal => [(-1, -1), (1, 1)],
            Sector::Vertical => [(0, -1), (0, 1)],
            Sector::AntiDiagonal => [(1, -1), (-1, 1)],
        }
    }
}

/// Fixed-point orientation: degrees × 10, rounded, in (−1800, 1800].
///
/// Training and detection both derive keys through this function so the
/// same angle always lands in the same bucket.
#[inline]
pub fn quantize_tenths(deg: f64) -> i32 {
    let key = (normalize_degrees(deg) * 10.0).round() as i32;
    if key <= -1800 {
        key + 3600
    } else {
        key
    }
}
