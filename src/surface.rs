//! Render surface for the overlay.
//!
//! A [`Stage`] sized to the board container holds one [`Layer`] of [`Poly`]
//! shapes. Drawing goes through the [`Painter`] trait so the surface stays
//! independent of the backend that actually puts pixels on screen.

use std::rc::Rc;

use crate::color::Paint;
use crate::geometry::{BoundingBox, Point, polygon_contains};
use crate::model::Tag;

/// The element the overlay is mounted in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    pub width: f32,
    pub height: f32,
    /// Position of the container's top-left corner on the page
    pub offset: Point,
}

impl Container {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset: Point::new(0.0, 0.0),
        }
    }

    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }
}

/// Receives draw calls when a layer is repainted.
pub trait Painter {
    fn fill_polygon(&mut self, vertices: &[Point], paint: Paint);
    fn stroke_polygon(&mut self, vertices: &[Point], paint: Paint, width: f32);
}

/// Something that can draw itself.
pub trait Renderable {
    fn render(&self, painter: &mut dyn Painter);
}

/// Something the pointer can be tested against.
pub trait HitTestable {
    fn hit_test(&self, point: Point) -> bool;
}

/// A drawn polygon backed by exactly one tag.
#[derive(Debug, Clone)]
pub struct Poly {
    vertices: Vec<Point>,
    bounds: Option<BoundingBox>,
    /// Current fill
    pub fill: Paint,
    /// Current outline
    pub stroke: Paint,
    pub stroke_width: f32,
    anchor: Point,
    tag: Rc<Tag>,
}

impl Poly {
    /// Create a polygon in display coordinates. The label anchor sits under the
    /// shape: horizontally centered, at its lowest point.
    pub fn new(vertices: Vec<Point>, fill: Paint, stroke: Paint, stroke_width: f32, tag: Rc<Tag>) -> Self {
        let bounds = BoundingBox::of(&vertices);
        let anchor = bounds
            .map(|b| Point::new(b.center_x(), b.max_y))
            .unwrap_or(Point::new(0.0, 0.0));
        Self {
            vertices,
            bounds,
            fill,
            stroke,
            stroke_width,
            anchor,
            tag,
        }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Where the info tooltip for this polygon is positioned.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn tag(&self) -> &Rc<Tag> {
        &self.tag
    }
}

impl HitTestable for Poly {
    fn hit_test(&self, point: Point) -> bool {
        match self.bounds {
            Some(b) if b.contains(point) => polygon_contains(&self.vertices, point),
            _ => false,
        }
    }
}

impl Renderable for Poly {
    fn render(&self, painter: &mut dyn Painter) {
        if !self.fill.is_transparent() {
            painter.fill_polygon(&self.vertices, self.fill);
        }
        if !self.stroke.is_transparent() {
            painter.stroke_polygon(&self.vertices, self.stroke, self.stroke_width);
        }
    }
}

/// An ordered set of polygons. Later polygons are drawn on top.
#[derive(Debug, Default)]
pub struct Layer {
    polys: Vec<Poly>,
    draw_count: u64,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a polygon and return its index.
    pub fn add(&mut self, poly: Poly) -> usize {
        self.polys.push(poly);
        self.polys.len() - 1
    }

    pub fn polys(&self) -> &[Poly] {
        &self.polys
    }

    pub fn get(&self, index: usize) -> Option<&Poly> {
        self.polys.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Poly> {
        self.polys.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.polys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polys.is_empty()
    }

    /// Indices of every polygon under the point, in layer order.
    pub fn intersections(&self, point: Point) -> Vec<usize> {
        self.polys
            .iter()
            .enumerate()
            .filter(|(_, poly)| poly.hit_test(point))
            .map(|(i, _)| i)
            .collect()
    }

    /// Repaint the layer.
    pub fn draw(&mut self, painter: Option<&mut (dyn Painter + '_)>) {
        self.draw_count += 1;
        if let Some(painter) = painter {
            for poly in &self.polys {
                poly.render(painter);
            }
        }
    }

    /// How many times the layer has been repainted.
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }
}

/// The drawing surface, sized to the container.
#[derive(Debug)]
pub struct Stage {
    width: f32,
    height: f32,
    layer: Option<Layer>,
}

impl Stage {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            layer: None,
        }
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Drop all content.
    pub fn remove_children(&mut self) {
        self.layer = None;
    }

    /// Mount a layer, replacing any previous one.
    pub fn add(&mut self, layer: Layer) {
        self.layer = Some(layer);
    }

    pub fn layer(&self) -> Option<&Layer> {
        self.layer.as_ref()
    }

    pub fn layer_mut(&mut self) -> Option<&mut Layer> {
        self.layer.as_mut()
    }

    /// Indices of the polygons under the point. Points outside the stage hit nothing.
    pub fn intersections(&self, point: Point) -> Vec<usize> {
        if point.x < 0.0 || point.y < 0.0 || point.x > self.width || point.y > self.height {
            return Vec::new();
        }
        self.layer
            .as_ref()
            .map(|layer| layer.intersections(point))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::TagColor;

    #[derive(Default)]
    struct RecordingPainter {
        fills: usize,
        strokes: usize,
    }

    impl Painter for RecordingPainter {
        fn fill_polygon(&mut self, _vertices: &[Point], _paint: Paint) {
            self.fills += 1;
        }

        fn stroke_polygon(&mut self, _vertices: &[Point], _paint: Paint, _width: f32) {
            self.strokes += 1;
        }
    }

    fn square(x: f32, y: f32, size: f32) -> Poly {
        let tag = Rc::new(Tag::new(TagColor::new(200, 0, 0), vec![], "", 1));
        Poly::new(
            vec![
                Point::new(x, y),
                Point::new(x + size, y),
                Point::new(x + size, y + size),
                Point::new(x, y + size),
            ],
            Paint::new(200, 0, 0, 0.5),
            Paint::TRANSPARENT,
            1.0,
            tag,
        )
    }

    #[test]
    fn test_anchor_below_center() {
        let poly = square(10.0, 20.0, 10.0);
        assert_eq!(poly.anchor(), Point::new(15.0, 30.0));
    }

    #[test]
    fn test_intersections_in_layer_order() {
        let mut layer = Layer::new();
        layer.add(square(0.0, 0.0, 10.0));
        layer.add(square(5.0, 5.0, 10.0));
        layer.add(square(50.0, 50.0, 10.0));

        let mut stage = Stage::new(100.0, 100.0);
        stage.add(layer);

        assert_eq!(stage.intersections(Point::new(7.0, 7.0)), vec![0, 1]);
        assert_eq!(stage.intersections(Point::new(55.0, 55.0)), vec![2]);
        assert!(stage.intersections(Point::new(30.0, 30.0)).is_empty());
        assert!(stage.intersections(Point::new(-1.0, 5.0)).is_empty());
    }

    #[test]
    fn test_draw_skips_transparent_paints() {
        let mut layer = Layer::new();
        layer.add(square(0.0, 0.0, 10.0));
        let mut hidden = square(20.0, 20.0, 10.0);
        hidden.fill = Paint::TRANSPARENT;
        layer.add(hidden);

        let mut painter = RecordingPainter::default();
        layer.draw(Some(&mut painter));
        assert_eq!(painter.fills, 1);
        assert_eq!(painter.strokes, 0);

        layer.get_mut(1).unwrap().stroke = Paint::BLACK;
        layer.draw(Some(&mut painter));
        assert_eq!(painter.strokes, 1);
        assert_eq!(layer.draw_count(), 2);
    }

    #[test]
    fn test_remove_children_clears_layer() {
        let mut stage = Stage::new(10.0, 10.0);
        stage.add(Layer::new());
        assert!(stage.layer().is_some());
        stage.remove_children();
        assert!(stage.layer().is_none());
    }
}
