use pf_core::GridExtent;

use crate::permutation::PermutationTable;

/// The four unit-diagonal gradient directions.
pub const GRADIENTS: [(f64, f64); 4] = [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)];

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
///
/// First and second derivatives vanish at 0 and 1, so neighbouring lattice
/// cells join without visible seams.
#[inline]
pub fn smoothing(t: f64) -> f64 {
    ((6.0 * t - 15.0) * t + 10.0) * t * t * t
}

#[inline]
pub fn lerp(a: f64, b: f64, weight: f64) -> f64 {
    a + weight * (b - a)
}

/// True modulo: the result is always in `[0, n)`.
#[inline]
pub fn wrap_index(index: i64, n: u32) -> usize {
    index.rem_euclid(i64::from(n)) as usize
}

/// Whether the double lookup `table[table[x] + y]` stays in bounds for
/// every wrapped lattice coordinate of `extent`.
pub fn table_covers(table: &PermutationTable, extent: GridExtent) -> bool {
    let size = table.size();
    extent.length as usize <= 2 * size && extent.width as usize <= size + 1
}

#[inline]
fn gradient(table: &PermutationTable, extent: GridExtent, cx: i64, cy: i64) -> (f64, f64) {
    let x = wrap_index(cx, extent.length);
    let y = wrap_index(cy, extent.width);
    GRADIENTS[table.lookup(table.lookup(x) + y) % 4]
}

/// Single-octave gradient noise at `(x, y)`.
///
/// Lattice corners wrap modulo the grid extent, so the noise tiles with
/// period `length` along x and `width` along y. The result is not clamped.
pub fn evaluate_octave(table: &PermutationTable, extent: GridExtent, x: f64, y: f64) -> f64 {
    let x_min = x.floor();
    let y_min = y.floor();
    let x_max = x_min + 1.0;
    let y_max = y_min + 1.0;

    let corners = [(x_min, y_min), (x_max, y_min), (x_min, y_max), (x_max, y_max)];
    let dots = corners.map(|(cx, cy)| {
        let (gx, gy) = gradient(table, extent, cx as i64, cy as i64);
        (x - cx) * gx + (y - cy) * gy
    });

    let weight_x = smoothing(x.rem_euclid(1.0));
    let weight_y = smoothing(y.rem_euclid(1.0));

    let top = lerp(dots[0], dots[1], weight_x);
    let bottom = lerp(dots[2], dots[3], weight_x);
    lerp(top, bottom, weight_y)
}
