//! Strokes a sequence collection onto a surface, immediately or paced one
//! path per frame.

use crate::collatz::{Sequence, SequenceCollection};
use crate::config::PathsConfig;
use crate::error::Result;
use crate::geometry::{origin_y, polyline, surface_size};
use crate::palette::{ColorPicker, Rgb};
use crate::surface::Surface;
use std::time::{Duration, Instant};

/// Waits shorter than this are skipped
const PACING_THRESHOLD: Duration = Duration::from_millis(5);

/// Holds each animation frame to a fixed duration
#[derive(Clone, Copy, Debug)]
pub struct FramePacer {
    frame_time: Duration,
    threshold: Duration,
}

impl FramePacer {
    pub fn new(frame_time: Duration) -> Self {
        Self {
            frame_time,
            threshold: PACING_THRESHOLD,
        }
    }

    /// Time left in the frame after `elapsed`, if worth sleeping for
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.frame_time
            .checked_sub(elapsed)
            .filter(|wait| *wait > self.threshold)
    }

    /// Sleep out the rest of a frame that began at `started`
    pub fn pace(&self, started: Instant) {
        if let Some(wait) = self.remaining(started.elapsed()) {
            log::trace!("pacing for {:?}", wait);
            std::thread::sleep(wait);
        }
    }
}

/// Stroke one sequence's path as a single polyline
pub fn stroke_sequence<S: Surface>(
    surface: &mut S,
    sequence: &Sequence,
    index: usize,
    config: &PathsConfig,
    color: Rgb,
) {
    let points = polyline(sequence, origin_y(index, config), &config.spacing);

    surface.set_stroke(color);
    surface.begin_path();
    surface.move_to(points[0]);
    for &point in &points[1..] {
        surface.line_to(point);
    }
    surface.stroke();
}

/// Size `surface` for the collection and draw every path in order.
///
/// `on_frame` runs after each path when animating (before the frame's
/// remaining time is slept out), otherwise once after the last path.
pub fn render<S, F>(
    surface: &mut S,
    collection: &SequenceCollection,
    config: &PathsConfig,
    mut on_frame: F,
) -> Result<()>
where
    S: Surface,
    F: FnMut(&S) -> Result<()>,
{
    let (width, height) = surface_size(collection, config);
    surface.set_size(width, height);
    log::info!(
        "rendering {} paths on a {}x{} surface",
        collection.len(),
        width,
        height
    );

    let mut picker = ColorPicker::new(config.color_mode, config.seed);
    let pacer = config.animate.then(|| FramePacer::new(config.frame_time));

    for (index, sequence) in collection.iter().enumerate() {
        let started = Instant::now();
        stroke_sequence(surface, sequence, index, config, picker.pick(index));

        if let Some(pacer) = &pacer {
            on_frame(surface)?;
            pacer.pace(started);
        }
    }

    if pacer.is_none() {
        on_frame(surface)?;
    }

    Ok(())
}
