use crate::config::ColorMode;
use crossterm::style::Color;
use rand::prelude::*;
use serde::Serialize;

/// Blended colors between each pair of neighboring palette entries
const GRADIENT_STEPS: usize = 16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend toward `other`, `t` in 0.0..=1.0
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn to_color(self) -> Color {
        Color::Rgb { r: self.r, g: self.g, b: self.b }
    }
}

/// Red, blue, green, yellow
pub const PALETTE: [Rgb; 4] = [
    Rgb::new(0xF4, 0x43, 0x36),
    Rgb::new(0x21, 0x96, 0xF3),
    Rgb::new(0x4C, 0xAF, 0x50),
    Rgb::new(0xFF, 0xEB, 0x3B),
];

/// Closed loop of colors blending each stop into the next, wrapping at the end
pub fn gradient(stops: &[Rgb], steps: usize) -> Vec<Rgb> {
    let steps = steps.max(1);
    let mut colors = Vec::with_capacity(stops.len() * steps);

    for (i, &from) in stops.iter().enumerate() {
        let to = stops[(i + 1) % stops.len()];
        for step in 0..steps {
            colors.push(from.lerp(to, step as f32 / steps as f32));
        }
    }

    colors
}

/// Chooses the stroke color of each path, once per path
pub struct ColorPicker {
    colors: Vec<Rgb>,
    rng: Option<StdRng>,
}

impl ColorPicker {
    pub fn new(mode: ColorMode, seed: Option<u64>) -> Self {
        match mode {
            ColorMode::Cyclic => Self { colors: PALETTE.to_vec(), rng: None },
            ColorMode::Gradient => Self { colors: gradient(&PALETTE, GRADIENT_STEPS), rng: None },
            ColorMode::Random => {
                let seed = seed.unwrap_or_else(|| {
                    std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .map(|d| d.as_secs())
                        .unwrap_or(0)
                });
                Self {
                    colors: PALETTE.to_vec(),
                    rng: Some(StdRng::seed_from_u64(seed)),
                }
            }
        }
    }

    /// Color for the path at `index`
    pub fn pick(&mut self, index: usize) -> Rgb {
        match &mut self.rng {
            Some(rng) => self.colors[rng.gen_range(0..self.colors.len())],
            None => self.colors[index % self.colors.len()],
        }
    }
}
