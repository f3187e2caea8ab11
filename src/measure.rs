use crate::path::PathCommand;

/// Subdivision stops once the control polygon hugs the chord this closely.
const FLATNESS_TOLERANCE: f32 = 1e-3;
/// Hard recursion cap; 2^16 segments is far beyond visual precision.
const MAX_DEPTH: u32 = 16;

fn dist(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

fn midpoint(a: (f32, f32), b: (f32, f32)) -> (f32, f32) {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

/// Arc length of one cubic segment by adaptive de Casteljau subdivision,
/// with Gravesen's (2·chord + polygon)/3 estimate at the leaves.
fn cubic_length(p0: (f32, f32), p1: (f32, f32), p2: (f32, f32), p3: (f32, f32), depth: u32) -> f32 {
    let chord = dist(p0, p3);
    let polygon = dist(p0, p1) + dist(p1, p2) + dist(p2, p3);
    if depth >= MAX_DEPTH || polygon - chord <= FLATNESS_TOLERANCE {
        return (2.0 * chord + polygon) / 3.0;
    }
    let ab = midpoint(p0, p1);
    let bc = midpoint(p1, p2);
    let cd = midpoint(p2, p3);
    let abc = midpoint(ab, bc);
    let bcd = midpoint(bc, cd);
    let mid = midpoint(abc, bcd);
    cubic_length(p0, ab, abc, mid, depth + 1) + cubic_length(mid, bcd, cd, p3, depth + 1)
}

/// Point on a cubic at parameter `t`, by the Bernstein form.
pub fn cubic_point_at(
    p0: (f32, f32),
    p1: (f32, f32),
    p2: (f32, f32),
    p3: (f32, f32),
    t: f32,
) -> (f32, f32) {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    (
        b0 * p0.0 + b1 * p1.0 + b2 * p2.0 + b3 * p3.0,
        b0 * p0.1 + b1 * p1.1 + b2 * p2.1 + b3 * p3.1,
    )
}

/// Total length of a command list. This walks the same commands the
/// renderer serializes, so a dash array sized from it matches the drawn
/// stroke exactly. Deterministic, never negative; a bare move is length
/// zero.
pub fn path_length(commands: &[PathCommand]) -> f32 {
    let mut total = 0.0;
    let mut cursor = (0.0f32, 0.0f32);
    for command in commands {
        match *command {
            PathCommand::MoveTo(x, y) => cursor = (x, y),
            PathCommand::VerticalTo(y) => {
                total += (y - cursor.1).abs();
                cursor.1 = y;
            }
            PathCommand::CurveTo { c1, c2, to } => {
                total += cubic_length(cursor, c1, c2, to, 0);
                cursor = to;
            }
        }
    }
    total
}
