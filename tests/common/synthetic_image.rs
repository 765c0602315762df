use ght_detector::image::Grid;

pub const BRIGHT: f64 = 255.0;

/// `size × size` dark image with a bright axis-aligned square covering
/// rows and columns `lo..hi`.
pub fn square(size: usize, lo: usize, hi: usize) -> Grid {
    Grid::from_fn(size, size, |x, y| {
        if (lo..hi).contains(&x) && (lo..hi).contains(&y) {
            BRIGHT
        } else {
            0.0
        }
    })
}

/// Reference point of [`l_shape_template`].
pub const L_REFERENCE: (f64, f64) = (20.0, 20.0);

/// Membership test for the L-shape in template coordinates (row, col):
/// a vertical bar over rows 8..32, cols 10..18 and a foot over rows 24..32,
/// cols 10..30.
pub fn l_shape_contains(row: f64, col: f64) -> bool {
    let bar = (8.0..32.0).contains(&row) && (10.0..18.0).contains(&col);
    let foot = (24.0..32.0).contains(&row) && (10.0..30.0).contains(&col);
    bar || foot
}

/// 40×40 template with the L-shape; reference point at (20, 20).
pub fn l_shape_template() -> Grid {
    Grid::from_fn(40, 40, |x, y| {
        if l_shape_contains(y as f64, x as f64) {
            BRIGHT
        } else {
            0.0
        }
    })
}

/// Pose of a template shape in a query image: its reference point lands at
/// `center = (row, col)`, rotated by `rotation_deg` and scaled by `scale`.
#[derive(Clone, Copy, Debug)]
pub struct Pose {
    pub center: (f64, f64),
    pub rotation_deg: f64,
    pub scale: f64,
}

/// Render a `size × size` image of the shape `contains` (template
/// coordinates around `reference`) placed at `pose`.
///
/// Uses the same (row, col) rotation convention as voting:
/// `v = s · [[cos, −sin], [sin, cos]] · d`.
fn render_posed(
    size: usize,
    pose: Pose,
    reference: (f64, f64),
    contains: impl Fn(f64, f64) -> bool,
) -> Grid {
    let (sin, cos) = pose.rotation_deg.to_radians().sin_cos();
    Grid::from_fn(size, size, |x, y| {
        let vr = (y as f64 - pose.center.0) / pose.scale;
        let vc = (x as f64 - pose.center.1) / pose.scale;
        // inverse rotation
        let dr = cos * vr + sin * vc;
        let dc = -sin * vr + cos * vc;
        if contains(reference.0 + dr, reference.1 + dc) {
            BRIGHT
        } else {
            0.0
        }
    })
}

/// L-shape rotated by `rotation_deg` and scaled by `scale` about its
/// reference point, which lands at `center = (row, col)` of a
/// `size × size` image.
pub fn l_shape_posed(size: usize, center: (f64, f64), rotation_deg: f64, scale: f64) -> Grid {
    let pose = Pose {
        center,
        rotation_deg,
        scale,
    };
    render_posed(size, pose, L_REFERENCE, l_shape_contains)
}

/// The `square(20, 5, 15)` template (reference (10, 10)) placed at `pose`.
pub fn square_posed(size: usize, pose: Pose) -> Grid {
    let inside = |row: f64, col: f64| (5.0..15.0).contains(&row) && (5.0..15.0).contains(&col);
    render_posed(size, pose, (10.0, 10.0), inside)
}
