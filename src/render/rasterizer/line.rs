//! Integer Bresenham line drawing.
//!
//! The walk always runs along the major axis from the smaller to the larger
//! coordinate. The error term grows by `2|dy|` per step and the minor axis
//! advances once it exceeds `dx` (strictly greater, so ties stay on the current
//! row), after which `2dx` is subtracted.

use crate::render::framebuffer::Framebuffer;

/// Draws a line from `(x0, y0)` to `(x1, y1)` inclusive with alpha 255.
///
/// Pixels outside the framebuffer are skipped; the rest of the line is drawn.
/// Only the part of the major axis that overlaps the framebuffer is walked, so
/// endpoints anywhere in the `i32` range are fine.
pub fn draw_line(
    mut x0: i32,
    mut y0: i32,
    mut x1: i32,
    mut y1: i32,
    color: u32,
    target: &mut Framebuffer,
) {
    let steep = (i64::from(x0) - i64::from(x1)).abs() < (i64::from(y0) - i64::from(y1)).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let major_len = i64::from(if steep { target.height() } else { target.width() });
    let first = i64::from(x0).max(0);
    let last = i64::from(x1).min(major_len - 1);
    if first > last {
        return;
    }

    let dx = i64::from(x1) - i64::from(x0);
    let dy = i64::from(y1) - i64::from(y0);
    let derror = dy.abs() * 2;
    let y_step = if y1 > y0 { 1 } else { -1 };
    let (minor_steps, mut error) = skip_steps(first - i64::from(x0), derror, dx);
    let mut y = i64::from(y0) + minor_steps * y_step;

    for x in first..=last {
        // Both coordinates lie between the i32 endpoints.
        let (px, py) = (x as i32, y as i32);
        if steep {
            target.set_pixel(py, px, color, 255);
        } else {
            target.set_pixel(px, py, color, 255);
        }
        error += derror;
        if error > dx {
            y += y_step;
            error -= dx * 2;
        }
    }
}

/// Minor-axis steps and error term after `skipped` iterations of the walk.
///
/// The error stays in `(-dx, dx]`, which pins the step count to
/// `ceil((skipped * derror - dx) / 2dx)`.
fn skip_steps(skipped: i64, derror: i64, dx: i64) -> (i64, i64) {
    if skipped == 0 || dx == 0 {
        return (0, 0);
    }
    let total = i128::from(skipped) * i128::from(derror);
    let span = 2 * i128::from(dx);
    let steps = -(-(total - i128::from(dx))).div_euclid(span);
    let error = total - steps * span;
    // |steps| <= skipped and |error| <= dx, both within i64.
    (steps as i64, error as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, WHITE};
    use std::collections::BTreeSet;

    fn lit_pixels(fb: &Framebuffer) -> BTreeSet<(i32, i32)> {
        let mut lit = BTreeSet::new();
        for y in 0..fb.height() as i32 {
            for x in 0..fb.width() as i32 {
                if fb.pixel(x, y).map(|(c, _)| c) != Some(BLACK) {
                    lit.insert((x, y));
                }
            }
        }
        lit
    }

    fn draw(x0: i32, y0: i32, x1: i32, y1: i32) -> BTreeSet<(i32, i32)> {
        let mut fb = Framebuffer::new(0, 0, 8, 8).unwrap();
        draw_line(x0, y0, x1, y1, WHITE, &mut fb);
        lit_pixels(&fb)
    }

    #[test]
    fn horizontal_line_is_exact() {
        let expected: BTreeSet<_> = (0..=4).map(|x| (x, 0)).collect();
        assert_eq!(draw(0, 0, 4, 0), expected);
    }

    #[test]
    fn vertical_line_is_exact() {
        let expected: BTreeSet<_> = (0..=4).map(|y| (0, y)).collect();
        assert_eq!(draw(0, 0, 0, 4), expected);
    }

    #[test]
    fn diagonal_steps_every_pixel() {
        let expected: BTreeSet<_> = (0..=5).map(|i| (i, i)).collect();
        assert_eq!(draw(0, 0, 5, 5), expected);
    }

    #[test]
    fn shallow_slope_breaks_ties_on_strict_greater() {
        let expected = BTreeSet::from([(0, 0), (1, 0), (2, 1), (3, 1), (4, 2)]);
        assert_eq!(draw(0, 0, 4, 2), expected);
        // Endpoint order does not matter.
        assert_eq!(draw(4, 2, 0, 0), expected);
    }

    #[test]
    fn steep_slope_walks_along_y() {
        let expected = BTreeSet::from([(0, 0), (0, 1), (1, 2), (1, 3), (2, 4)]);
        assert_eq!(draw(0, 0, 2, 4), expected);
    }

    #[test]
    fn single_point_line() {
        assert_eq!(draw(3, 3, 3, 3), BTreeSet::from([(3, 3)]));
    }

    #[test]
    fn off_screen_part_is_clipped() {
        let expected: BTreeSet<_> = (0..8).map(|x| (x, 2)).collect();
        assert_eq!(draw(-5, 2, 20, 2), expected);
    }

    #[test]
    fn clipped_walk_matches_the_full_walk() {
        // The same line drawn whole into a 16x8 buffer, then shifted so that
        // its first half falls off the left and top edges of an 8x4 buffer.
        for (x1, y1) in [(15, 7), (15, 3), (5, 7), (15, 0)] {
            let mut whole = Framebuffer::new(0, 0, 16, 8).unwrap();
            draw_line(0, 0, x1, y1, WHITE, &mut whole);
            let expected: BTreeSet<_> = lit_pixels(&whole)
                .into_iter()
                .map(|(x, y)| (x - 8, y - 4))
                .filter(|&(x, y)| (0..8).contains(&x) && (0..4).contains(&y))
                .collect();

            let mut shifted = Framebuffer::new(0, 0, 8, 4).unwrap();
            draw_line(-8, -4, x1 - 8, y1 - 4, WHITE, &mut shifted);
            assert_eq!(lit_pixels(&shifted), expected, "line to ({x1}, {y1})");
        }
    }

    #[test]
    fn extreme_endpoints_do_not_overflow() {
        let row: BTreeSet<_> = (0..8).map(|x| (x, 3)).collect();
        assert_eq!(draw(i32::MIN, 3, i32::MAX, 3), row);

        let column: BTreeSet<_> = (0..8).map(|y| (5, y)).collect();
        assert_eq!(draw(5, i32::MAX, 5, i32::MIN), column);

        assert!(draw(i32::MIN, i32::MIN, i32::MAX, i32::MAX).contains(&(0, 0)));
    }

    #[test]
    fn line_writes_full_alpha() {
        let mut fb = Framebuffer::new(0, 0, 4, 4).unwrap();
        fb.set_clear_color(BLACK, 0);
        fb.clear();
        draw_line(0, 0, 3, 0, WHITE, &mut fb);
        assert_eq!(fb.pixel(2, 0), Some((WHITE, 255)));
        assert_eq!(fb.pixel(2, 1), Some((BLACK, 0)));
    }
}
