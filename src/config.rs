use clap::ValueEnum;
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Which starting values to compute paths for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Range {
    /// Inclusive upper bound: `[start, stop]`
    Stop(u64),
    /// Number of consecutive values: `[start, start + count)`
    Count(u64),
}

impl Range {
    /// Inclusive bounds of the starting values beginning at `start`.
    /// Empty when the stop lies below `start` or the count is zero; a count
    /// running past `u64::MAX` ends there.
    pub fn bounds(&self, start: u64) -> RangeInclusive<u64> {
        match *self {
            Range::Stop(stop) => start..=stop,
            Range::Count(0) => 1..=0,
            Range::Count(count) => start..=start.saturating_add(count - 1),
        }
    }
}

/// How each path picks its stroke color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Cyclic,   // palette[i % len]
    Gradient, // cyclic walk through a blended palette
    Random,   // uniform palette pick per path
}

/// Distances in surface units (pixels, or braille dots in the terminal)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spacing {
    /// Vertical distance between the origins of successive paths
    pub n_spacing: f32,
    /// Horizontal distance between successive vertices of a path
    pub k_spacing: f32,
    /// Vertical change per step
    pub y_delta: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            n_spacing: 8.0,
            k_spacing: 8.0,
            y_delta: 8.0,
        }
    }
}

/// Configuration for computing and drawing Collatz paths.
/// Built once at startup and only read afterwards.
#[derive(Clone, Debug)]
pub struct PathsConfig {
    pub start: u64,
    pub range: Range,
    /// Steps per sequence; zero or less yields single-element sequences
    pub max_iterations: i64,
    pub stop_at_one: bool,
    pub odd_only: bool,
    pub spacing: Spacing,
    pub animate: bool,
    pub frame_time: Duration,
    pub color_mode: ColorMode,
    pub tree: bool,
    /// Shared vertical origin used in tree mode
    pub tree_origin: f32,
    pub seed: Option<u64>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            start: 1,
            range: Range::Stop(800),
            max_iterations: 800,
            stop_at_one: true,
            odd_only: true,
            spacing: Spacing::default(),
            animate: false,
            frame_time: Duration::from_millis(200),
            color_mode: ColorMode::Cyclic,
            tree: false,
            tree_origin: 200.0,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_inclusive() {
        assert_eq!(Range::Stop(5).bounds(1), 1..=5);
        assert_eq!(Range::Stop(3).bounds(3), 3..=3);
    }

    #[test]
    fn count_is_half_open() {
        assert_eq!(Range::Count(5).bounds(10), 10..=14);
        assert!(Range::Count(0).bounds(10).is_empty());
    }

    #[test]
    fn stop_below_start_is_empty() {
        assert!(Range::Stop(4).bounds(9).is_empty());
    }

    #[test]
    fn stop_at_u64_max_keeps_the_last_value() {
        assert_eq!(Range::Stop(u64::MAX).bounds(u64::MAX).count(), 1);
        assert_eq!(Range::Stop(u64::MAX).bounds(u64::MAX - 1).count(), 2);
    }

    #[test]
    fn count_past_u64_max_ends_there() {
        assert_eq!(Range::Count(10).bounds(u64::MAX - 1), (u64::MAX - 1)..=u64::MAX);
    }
}
