//! Geometry helpers for the overlay.
//!
//! Tags are stored in the image's original pixel space. The overlay draws them
//! in display space, which is the original image scaled to the size it is
//! currently shown at. [`ImageView`] converts between the two.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Left edge
    pub min_x: f32,
    /// Top edge
    pub min_y: f32,
    /// Right edge
    pub max_x: f32,
    /// Bottom edge
    pub max_y: f32,
}

impl BoundingBox {
    /// Compute the bounding box of a set of points. Returns None for an empty set.
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        Some(bbox)
    }

    /// Horizontal center of the box.
    pub fn center_x(&self) -> f32 {
        (self.min_x + self.max_x) / 2.0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y && point.y <= self.max_y
    }
}

/// Check if a point is inside a closed polygon (ray casting algorithm).
pub fn polygon_contains(vertices: &[Point], point: Point) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];
        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Given the two ends of a rectangle's diagonal, return the two missing corners.
///
/// For a diagonal `p0 -> p1` the result is `[(p1.x, p0.y), (p0.x, p1.y)]`, so the
/// sequence `p0, c0, p1, c1` walks the rectangle's perimeter.
pub fn rectangle_from_diagonal(diagonal: [Point; 2]) -> [Point; 2] {
    let [p0, p1] = diagonal;
    [Point::new(p1.x, p0.y), Point::new(p0.x, p1.y)]
}

/// Maps coordinates between the original image and its on-screen rendition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageView {
    /// Native width of the image in pixels
    pub original_width: u32,
    /// Native height of the image in pixels
    pub original_height: u32,
    /// Width the image is currently displayed at
    pub display_width: f32,
    /// Height the image is currently displayed at
    pub display_height: f32,
}

impl ImageView {
    pub fn new(original_width: u32, original_height: u32, display_width: f32, display_height: f32) -> Self {
        Self {
            original_width,
            original_height,
            display_width,
            display_height,
        }
    }

    /// A view that shows the image at its native size.
    pub fn actual_size(width: u32, height: u32) -> Self {
        Self::new(width, height, width as f32, height as f32)
    }

    /// Build a view by reading the native dimensions from an image file header.
    pub fn from_image_file(
        path: impl AsRef<Path>,
        display_width: f32,
        display_height: f32,
    ) -> Result<Self, BoardError> {
        let (width, height) = image::image_dimensions(path.as_ref())?;
        log::debug!(
            "Image {:?} is {}x{}, displayed at {}x{}",
            path.as_ref(),
            width,
            height,
            display_width,
            display_height
        );
        Ok(Self::new(width, height, display_width, display_height))
    }

    /// Change the displayed size (zoom).
    pub fn set_display_size(&mut self, width: f32, height: f32) {
        self.display_width = width;
        self.display_height = height;
    }

    /// Horizontal and vertical display scale factors.
    pub fn scale(&self) -> (f32, f32) {
        let sx = if self.original_width == 0 {
            1.0
        } else {
            self.display_width / self.original_width as f32
        };
        let sy = if self.original_height == 0 {
            1.0
        } else {
            self.display_height / self.original_height as f32
        };
        (sx, sy)
    }

    /// Convert a point in original image pixels to display coordinates.
    pub fn to_display(&self, point: Point) -> Point {
        let (sx, sy) = self.scale();
        Point::new(point.x * sx, point.y * sy)
    }

    /// Convert a point in display coordinates back to original image pixels.
    pub fn to_original(&self, point: Point) -> Point {
        let (sx, sy) = self.scale();
        Point::new(point.x / sx, point.y / sy)
    }
}
