//! Fixed-capacity streaming buffer for trajectory windows.
//!
//! A [`StreamingLine`] holds the last `W` points of an evolving trajectory as
//! a circular buffer and exposes them as a flat ordered sequence, oldest to
//! newest. This is what produces the "growing spark" visual: the line appears
//! to trace the attractor in real time without ever reallocating or
//! re-deriving history, and the simulation rate stays decoupled from the
//! render rate.

use glam::Vec3;

use crate::error::ConfigError;

/// The visible trailing window of a trajectory.
///
/// Capacity is fixed at creation and constant for the buffer's lifetime;
/// [`StreamingLine::advance`] is O(1) and never reallocates.
#[derive(Debug, Clone)]
pub struct StreamingLine {
    /// Ring storage; `head` is the index of the oldest point.
    points: Vec<Vec3>,
    head: usize,
}

impl StreamingLine {
    /// Create a buffer of `window` slots, all filled with `initial`.
    ///
    /// A freshly created line renders as a degenerate point until it has
    /// advanced `window` times.
    pub fn new(window: usize, initial: Vec3) -> Result<Self, ConfigError> {
        if window == 0 {
            return Err(ConfigError::ZeroWindowSize);
        }
        Ok(Self {
            points: vec![initial; window],
            head: 0,
        })
    }

    /// Number of points in the window, constant for this buffer's lifetime.
    pub fn window(&self) -> usize {
        self.points.len()
    }

    /// Append `newest` and discard the oldest point.
    #[inline]
    pub fn advance(&mut self, newest: Vec3) {
        self.points[self.head] = newest;
        self.head = (self.head + 1) % self.points.len();
    }

    /// The most recently advanced point.
    pub fn latest(&self) -> Vec3 {
        let idx = (self.head + self.points.len() - 1) % self.points.len();
        self.points[idx]
    }

    /// Iterate the window in draw order, oldest to newest.
    pub fn ordered(&self) -> impl Iterator<Item = Vec3> + '_ {
        let (older, newer) = self.points.split_at(self.head);
        newer.iter().chain(older.iter()).copied()
    }

    /// Flatten the window into `out` as xyz triples in draw order.
    ///
    /// Clears and refills `out`, reusing its allocation; meant to feed a
    /// renderer's vertex buffer once per frame.
    pub fn write_positions(&self, out: &mut Vec<f32>) {
        out.clear();
        out.reserve(self.points.len() * 3);
        for p in self.ordered() {
            out.extend_from_slice(&[p.x, p.y, p.z]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_window_rejected() {
        assert_eq!(
            StreamingLine::new(0, Vec3::ZERO).unwrap_err(),
            ConfigError::ZeroWindowSize
        );
    }

    #[test]
    fn test_new_fills_with_initial() {
        let initial = Vec3::new(1.0, 2.0, 3.0);
        let line = StreamingLine::new(4, initial).unwrap();
        assert_eq!(line.window(), 4);
        assert!(line.ordered().all(|p| p == initial));
    }

    #[test]
    fn test_window_invariant() {
        let mut line = StreamingLine::new(5, Vec3::ZERO).unwrap();
        for k in 0..23 {
            let newest = Vec3::splat(k as f32 + 1.0);
            line.advance(newest);
            assert_eq!(line.ordered().count(), 5);
            assert_eq!(line.ordered().last().unwrap(), newest);
            assert_eq!(line.latest(), newest);
        }
    }

    #[test]
    fn test_advance_shifts_by_one_entry() {
        let mut line = StreamingLine::new(4, Vec3::ZERO).unwrap();
        for k in 0..6 {
            line.advance(Vec3::splat(k as f32));
        }

        let before: Vec<Vec3> = line.ordered().collect();
        let newest = Vec3::splat(99.0);
        line.advance(newest);
        let after: Vec<Vec3> = line.ordered().collect();

        // Everything except the evicted head survives, shifted left by one
        assert_eq!(&after[..3], &before[1..]);
        assert_eq!(after[3], newest);
    }

    #[test]
    fn test_advance_never_reallocates() {
        let mut line = StreamingLine::new(100, Vec3::ZERO).unwrap();
        let storage = line.points.as_ptr();
        for k in 0..1000 {
            line.advance(Vec3::splat(k as f32));
        }
        assert_eq!(line.points.as_ptr(), storage);
        assert_eq!(line.window(), 100);
    }

    #[test]
    fn test_write_positions_flattens_in_order() {
        let mut line = StreamingLine::new(3, Vec3::ZERO).unwrap();
        line.advance(Vec3::new(1.0, 2.0, 3.0));
        line.advance(Vec3::new(4.0, 5.0, 6.0));

        let mut out = Vec::new();
        line.write_positions(&mut out);
        assert_eq!(
            out,
            vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        );
    }
}
