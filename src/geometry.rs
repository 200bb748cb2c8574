//! Mapping from sequences to zig-zag polylines
//!
//! Screen y grows downward. Every step moves right by `k_spacing`; an even
//! current value moves the pen down by `y_delta`, an odd one moves it up.

use crate::collatz::{Sequence, SequenceCollection};
use crate::config::{PathsConfig, Spacing};
use serde::Serialize;

/// Extra columns past the longest path so its last segment is not clipped
const WIDTH_MARGIN: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Vertical origin of the path at `index`
pub fn origin_y(index: usize, config: &PathsConfig) -> f32 {
    if config.tree {
        config.tree_origin
    } else {
        config.spacing.n_spacing * (index + 1) as f32
    }
}

/// Points of a sequence's path, starting at `(0, origin_y)`, one more per transition
pub fn polyline(sequence: &Sequence, origin_y: f32, spacing: &Spacing) -> Vec<Point> {
    let values = sequence.values();
    let mut points = Vec::with_capacity(values.len());
    let mut y = origin_y;
    points.push(Point::new(0.0, y));

    // Parity of the value being left decides the direction, not the one reached
    for (k, &value) in values[..values.len() - 1].iter().enumerate() {
        y += if value & 1 == 0 { spacing.y_delta } else { -spacing.y_delta };
        points.push(Point::new(spacing.k_spacing * (k + 1) as f32, y));
    }

    points
}

/// Width and height of a surface large enough for every path
pub fn surface_size(collection: &SequenceCollection, config: &PathsConfig) -> (u32, u32) {
    let spacing = &config.spacing;
    let width = spacing.k_spacing * (collection.longest() + WIDTH_MARGIN) as f32;

    // Fit the deepest point of any path, plus one step of margin
    let lowest = collection
        .iter()
        .enumerate()
        .flat_map(|(index, seq)| polyline(seq, origin_y(index, config), spacing))
        .map(|p| p.y)
        .fold(0.0, f32::max);
    let mut height = lowest + spacing.y_delta;
    if config.tree {
        // Paths fan out from one origin; keep it centered at least
        height = height.max(config.tree_origin * 2.0);
    }

    (width.ceil().max(1.0) as u32, height.ceil().max(1.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collatz::generate;
    use crate::config::Range;

    fn spacing() -> Spacing {
        Spacing {
            n_spacing: 8.0,
            k_spacing: 8.0,
            y_delta: 8.0,
        }
    }

    #[test]
    fn first_segment_of_three() {
        let seq = Sequence::compute(3, 100, true);
        let points = polyline(&seq, 40.0, &spacing());
        assert_eq!(points[0], Point::new(0.0, 40.0));
        // 3 is odd: up
        assert_eq!(points[1], Point::new(8.0, 32.0));
        // 10 is even: down
        assert_eq!(points[2], Point::new(16.0, 40.0));
    }

    #[test]
    fn one_point_per_value() {
        let seq = Sequence::compute(27, 1000, true);
        assert_eq!(polyline(&seq, 0.0, &spacing()).len(), seq.len());
    }

    #[test]
    fn single_value_is_a_lone_point() {
        let seq = Sequence::compute(1, 100, true);
        assert_eq!(polyline(&seq, 16.0, &spacing()), vec![Point::new(0.0, 16.0)]);
    }

    #[test]
    fn full_path_of_five() {
        let seq = Sequence::compute(5, 100, true);
        let ys: Vec<f32> = polyline(&seq, 0.0, &spacing()).iter().map(|p| p.y).collect();
        // 5 odd, 16 8 4 2 even
        assert_eq!(ys, vec![0.0, -8.0, 0.0, 8.0, 16.0, 24.0]);
    }

    #[test]
    fn stacked_origins_step_by_n_spacing() {
        let config = PathsConfig::default();
        assert_eq!(origin_y(0, &config), 8.0);
        assert_eq!(origin_y(4, &config), 40.0);
    }

    #[test]
    fn tree_origins_are_shared() {
        let config = PathsConfig { tree: true, ..PathsConfig::default() };
        assert_eq!(origin_y(0, &config), 200.0);
        assert_eq!(origin_y(99, &config), 200.0);
    }

    #[test]
    fn surface_fits_stacked_paths() {
        let config = PathsConfig {
            range: Range::Stop(5),
            odd_only: false,
            ..PathsConfig::default()
        };
        let collection = generate(&config);
        // longest is 8 values; 5's path bottoms out at 64
        assert_eq!(surface_size(&collection, &config), (80, 72));
    }

    #[test]
    fn default_surface_holds_every_stacked_path() {
        let config = PathsConfig::default();
        let collection = generate(&config);
        let (width, height) = surface_size(&collection, &config);
        for (index, seq) in collection.iter().enumerate() {
            for p in polyline(seq, origin_y(index, &config), &config.spacing) {
                assert!(p.y < height as f32, "path {} drops below the surface", seq.start());
                assert!(p.x < width as f32);
            }
        }
    }

    #[test]
    fn tree_surface_holds_deepest_point() {
        let config = PathsConfig {
            range: Range::Stop(4),
            odd_only: false,
            tree: true,
            tree_origin: 10.0,
            ..PathsConfig::default()
        };
        let collection = generate(&config);
        let (_, height) = surface_size(&collection, &config);
        // 3's path bottoms out at 34, plus one y_delta of margin
        assert_eq!(height, 42);
    }

    #[test]
    fn empty_collection_has_nonzero_surface() {
        let config = PathsConfig::default();
        let (w, h) = surface_size(&SequenceCollection::default(), &config);
        assert!(w >= 1 && h >= 1);
    }
}
