//! Uniform cubic B-spline evaluation for flight-path trails.
//!
//! The control-point list is clamped by repeating its first and last point
//! once, then every window of four consecutive points is swept with `S`
//! evenly spaced parameter steps. Samples are truncated to whole pixels.

use serde::{Deserialize, Serialize};

use crate::constants::path::{MAX_CONTROL_POINTS, MIN_CONTROL_POINTS};
use crate::error::PathError;
use crate::resolution::PathResolution;

/// A pixel position on the legacy screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// One evaluated position along the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub point: Point,
    /// 1-based window index.
    pub window: usize,
    /// Whether this sample belongs to the final window.
    pub last_window: bool,
}

/// The four uniform cubic B-spline blending weights at `u`.
#[inline]
pub fn basis(u: f32) -> [f32; 4] {
    let u2 = u * u;
    let u3 = u2 * u;
    [
        (1.0 - u) * (1.0 - u) * (1.0 - u) / 6.0,
        (3.0 * u3 - 6.0 * u2 + 4.0) / 6.0,
        (-3.0 * u3 + 3.0 * u2 + 3.0 * u + 1.0) / 6.0,
        u3 / 6.0,
    ]
}

/// Lazy sample stream over one control-point list.
///
/// Yields exactly `(N - 1) * S` samples and cannot be restarted.
#[derive(Debug, Clone)]
pub struct SplineSamples {
    extended: Vec<Point>,
    steps: u32,
    window: usize,
    step: u32,
}

impl SplineSamples {
    /// Number of windows (`N - 1`).
    pub fn windows(&self) -> usize {
        self.extended.len() - 3
    }
}

impl Iterator for SplineSamples {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        let windows = self.windows();
        if self.window > windows {
            return None;
        }

        let u = self.step as f32 / self.steps as f32;
        let [b0, b1, b2, b3] = basis(u);
        let i = self.window;
        let p = &self.extended;
        let x = b0 * p[i - 1].x as f32 + b1 * p[i].x as f32 + b2 * p[i + 1].x as f32
            + b3 * p[i + 2].x as f32;
        let y = b0 * p[i - 1].y as f32 + b1 * p[i].y as f32 + b2 * p[i + 1].y as f32
            + b3 * p[i + 2].y as f32;

        let sample = Sample {
            point: Point::new(x as i32, y as i32),
            window: i,
            last_window: i == windows,
        };

        self.step += 1;
        if self.step == self.steps {
            self.step = 0;
            self.window += 1;
        }

        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let windows = self.windows();
        let remaining = if self.window > windows {
            0
        } else {
            (windows - self.window) * self.steps as usize + (self.steps - self.step) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SplineSamples {}

/// Start sampling the clamped spline through `points`.
///
/// Fails with [`PathError::ControlPoints`] unless `2 <= points.len() <= 18`.
pub fn samples(points: &[Point], resolution: PathResolution) -> Result<SplineSamples, PathError> {
    if !(MIN_CONTROL_POINTS..=MAX_CONTROL_POINTS).contains(&points.len()) {
        return Err(PathError::ControlPoints(points.len()));
    }

    let mut extended = Vec::with_capacity(points.len() + 2);
    extended.push(points[0]);
    extended.extend_from_slice(points);
    extended.push(points[points.len() - 1]);

    Ok(SplineSamples {
        extended,
        steps: resolution.get() as u32,
        window: 1,
        step: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(i32, i32)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_basis_partition_of_unity() {
        for k in 0..=20 {
            let u = k as f32 / 20.0;
            let sum: f32 = basis(u).iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "u={} sum={}", u, sum);
        }
    }

    #[test]
    fn test_sample_count_three_points_fifteen_steps() {
        let s = samples(&pts(&[(73, 140), (81, 145), (89, 145)]), PathResolution::new(15)).unwrap();
        assert_eq!(s.len(), 30);
        assert_eq!(s.count(), 30);
    }

    #[test]
    fn test_sample_count_five_points_one_step() {
        let p = pts(&[(0, 0), (10, 0), (20, 0), (30, 0), (40, 0)]);
        let s = samples(&p, PathResolution::new(1)).unwrap();
        assert_eq!(s.count(), 4);
    }

    #[test]
    fn test_window_tagging() {
        let p = pts(&[(0, 0), (10, 10), (20, 0)]);
        let all: Vec<_> = samples(&p, PathResolution::new(4)).unwrap().collect();
        assert!(all[..4].iter().all(|s| s.window == 1 && !s.last_window));
        assert!(all[4..].iter().all(|s| s.window == 2 && s.last_window));
    }

    #[test]
    fn test_first_sample_of_two_point_spline() {
        // Window (p0, p0, p1, p1) at u = 0: (1/6 + 2/3) p0 + 1/6 p1
        let p = pts(&[(0, 0), (60, 120)]);
        let first = samples(&p, PathResolution::new(10)).unwrap().next().unwrap();
        assert_eq!(first.point, Point::new(10, 20));
    }

    #[test]
    fn test_truncates_toward_zero() {
        // 1/6 * 5 = 0.83 -> 0
        let p = pts(&[(0, 0), (5, 5)]);
        let first = samples(&p, PathResolution::new(1)).unwrap().next().unwrap();
        assert_eq!(first.point, Point::new(0, 0));
    }

    #[test]
    fn test_straight_line_stays_on_line() {
        let p = pts(&[(10, 0), (40, 0), (70, 0), (100, 0)]);
        let mut last_x = i32::MIN;
        for s in samples(&p, PathResolution::new(25)).unwrap() {
            assert_eq!(s.point.y, 0);
            assert!((10..=100).contains(&s.point.x));
            assert!(s.point.x >= last_x);
            last_x = s.point.x;
        }
    }

    #[test]
    fn test_rejects_bad_point_counts() {
        let one = pts(&[(1, 1)]);
        assert!(matches!(
            samples(&one, PathResolution::default()),
            Err(PathError::ControlPoints(1))
        ));
        let many: Vec<_> = (0..19).map(|i| Point::new(i, i)).collect();
        assert!(matches!(
            samples(&many, PathResolution::default()),
            Err(PathError::ControlPoints(19))
        ));
        let max: Vec<_> = (0..18).map(|i| Point::new(i, i)).collect();
        assert!(samples(&max, PathResolution::default()).is_ok());
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let p = pts(&[(0, 0), (10, 10), (20, 0)]);
        let mut s = samples(&p, PathResolution::new(3)).unwrap();
        assert_eq!(s.len(), 6);
        s.next();
        s.next();
        s.next();
        assert_eq!(s.len(), 3);
        s.by_ref().for_each(drop);
        assert_eq!(s.len(), 0);
        assert!(s.next().is_none());
    }
}
