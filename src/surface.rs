//! Drawing surfaces that paths are stroked onto
//!
//! A surface collects a path with `begin_path`/`move_to`/`line_to` and only
//! touches its pixels on `stroke`. Anything outside the surface is clipped.

use crate::error::Result;
use crate::geometry::Point;
use crate::palette::Rgb;
use image::{ImageFormat, Rgba, RgbaImage};
use serde::Serialize;
use std::path::Path;

// Braille constants (2x4 dot grid per character)
const BRAILLE_BASE: u32 = 0x2800;
const DOTS_X: usize = 2;
const DOTS_Y: usize = 4;

/// Bit of each dot in a braille cell, indexed `[row][col]`
const BRAILLE_BITS: [[u8; DOTS_X]; DOTS_Y] = [
    [0x01, 0x08],
    [0x02, 0x10],
    [0x04, 0x20],
    [0x40, 0x80],
];

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// 2D stroking context
pub trait Surface {
    /// Resize and clear the surface
    fn set_size(&mut self, width: u32, height: u32);
    fn size(&self) -> (u32, u32);
    fn set_stroke(&mut self, color: Rgb);
    /// Discard any path not yet stroked
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    /// Draw the accumulated path with the current stroke color
    fn stroke(&mut self);
}

/// Path under construction, split into subpaths at each `move_to`
#[derive(Default)]
struct PathBuilder {
    subpaths: Vec<Vec<Point>>,
}

impl PathBuilder {
    fn clear(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, p: Point) {
        self.subpaths.push(vec![p]);
    }

    fn line_to(&mut self, p: Point) {
        match self.subpaths.last_mut() {
            Some(subpath) => subpath.push(p),
            None => self.subpaths.push(vec![p]),
        }
    }

    /// Every segment as integer endpoints
    fn segments(&self) -> impl Iterator<Item = ((i32, i32), (i32, i32))> + '_ {
        self.subpaths.iter().flat_map(|subpath| {
            subpath
                .windows(2)
                .map(|pair| (round(pair[0]), round(pair[1])))
        })
    }
}

fn round(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

/// Bresenham line from `(x0, y0)` to `(x1, y1)`, endpoints included
fn plot_line((x0, y0): (i32, i32), (x1, y1): (i32, i32), mut plot: impl FnMut(i32, i32)) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut x = x0;
    let mut y = y0;

    loop {
        plot(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Surface made of braille dots, one dot per unit, for display in a terminal
#[derive(Default)]
pub struct BrailleCanvas {
    width: usize,
    height: usize,
    dots: Vec<bool>,
    /// Color of the last stroke to touch each cell
    cell_colors: Vec<Option<Rgb>>,
    stroke_color: Rgb,
    path: PathBuilder,
}

impl BrailleCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size in terminal cells
    pub fn cells(&self) -> (usize, usize) {
        (self.width.div_ceil(DOTS_X), self.height.div_ceil(DOTS_Y))
    }

    /// Braille character and color at a cell, `None` when no dot is set
    pub fn cell(&self, cx: usize, cy: usize) -> Option<(char, Rgb)> {
        let (cols, rows) = self.cells();
        if cx >= cols || cy >= rows {
            return None;
        }

        let mut code: u32 = 0;
        for (row, bits) in BRAILLE_BITS.iter().enumerate() {
            for (col, &bit) in bits.iter().enumerate() {
                let x = cx * DOTS_X + col;
                let y = cy * DOTS_Y + row;
                if x < self.width && y < self.height && self.dots[y * self.width + x] {
                    code |= bit as u32;
                }
            }
        }

        if code == 0 {
            return None;
        }

        let ch = char::from_u32(BRAILLE_BASE + code).unwrap_or(' ');
        self.cell_colors[cy * cols + cx].map(|color| (ch, color))
    }

    fn plot(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let cols = self.width.div_ceil(DOTS_X);
        self.dots[y * self.width + x] = true;
        self.cell_colors[(y / DOTS_Y) * cols + x / DOTS_X] = Some(self.stroke_color);
    }
}

impl Surface for BrailleCanvas {
    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width as usize;
        self.height = height as usize;
        self.dots = vec![false; self.width * self.height];
        let (cols, rows) = self.cells();
        self.cell_colors = vec![None; cols * rows];
    }

    fn size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    fn set_stroke(&mut self, color: Rgb) {
        self.stroke_color = color;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
    }

    fn line_to(&mut self, p: Point) {
        self.path.line_to(p);
    }

    fn stroke(&mut self) {
        let segments: Vec<_> = self.path.segments().collect();
        for (from, to) in segments {
            plot_line(from, to, |x, y| self.plot(x, y));
        }
    }
}

/// Surface backed by an RGBA image, one pixel per unit, on black
pub struct RasterCanvas {
    image: RgbaImage,
    stroke_color: Rgba<u8>,
    path: PathBuilder,
}

impl RasterCanvas {
    pub fn new() -> Self {
        Self {
            image: RgbaImage::new(0, 0),
            stroke_color: Rgba([255, 255, 255, 255]),
            path: PathBuilder::default(),
        }
    }

    #[cfg(test)]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

impl Surface for RasterCanvas {
    fn set_size(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::from_pixel(width, height, BACKGROUND);
    }

    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn set_stroke(&mut self, color: Rgb) {
        self.stroke_color = Rgba([color.r, color.g, color.b, 255]);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
    }

    fn line_to(&mut self, p: Point) {
        self.path.line_to(p);
    }

    fn stroke(&mut self) {
        let (width, height) = self.image.dimensions();
        let color = self.stroke_color;
        let image = &mut self.image;
        for (from, to) in self.path.segments() {
            plot_line(from, to, |x, y| {
                if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                    image.put_pixel(x as u32, y as u32, color);
                }
            });
        }
    }
}

/// One recorded surface call
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    SetSize { width: u32, height: u32 },
    SetStroke { color: Rgb },
    BeginPath,
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    Stroke,
}

/// Surface that records calls instead of drawing, for hosts that draw themselves
#[derive(Default, Serialize)]
pub struct PathLog {
    #[serde(skip)]
    size: (u32, u32),
    commands: Vec<Command>,
}

impl PathLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
}

impl Surface for PathLog {
    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.commands.push(Command::SetSize { width, height });
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_stroke(&mut self, color: Rgb) {
        self.commands.push(Command::SetStroke { color });
    }

    fn begin_path(&mut self) {
        self.commands.push(Command::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.commands.push(Command::MoveTo { x: p.x, y: p.y });
    }

    fn line_to(&mut self, p: Point) {
        self.commands.push(Command::LineTo { x: p.x, y: p.y });
    }

    fn stroke(&mut self) {
        self.commands.push(Command::Stroke);
    }
}
