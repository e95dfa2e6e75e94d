//! Conversion of tags into drawable polygons.

use std::rc::Rc;

use crate::color::Paint;
use crate::config::OverlayStyle;
use crate::geometry::{ImageView, rectangle_from_diagonal};
use crate::model::{RECTANGLE_POINTS, Tag};
use crate::surface::Poly;

/// Fill of a tag that is not hovered.
pub fn rest_fill(tag: &Tag, tags_visible: bool, style: &OverlayStyle) -> Paint {
    if tags_visible {
        tag.color().paint(style.fill_alpha)
    } else {
        Paint::TRANSPARENT
    }
}

/// Fill of a hovered tag: always its own color.
pub fn highlight_fill(tag: &Tag, style: &OverlayStyle) -> Paint {
    tag.color().paint(style.fill_alpha)
}

/// Build the display polygon of a tag.
///
/// A two-point tag is a rectangle diagonal; it is expanded to the four
/// corners `p0, c0, p1, c1`, which walks the rectangle's perimeter.
pub fn tag_to_polygon(
    tag: &Rc<Tag>,
    view: &ImageView,
    style: &OverlayStyle,
    tags_visible: bool,
) -> Poly {
    let mut points: Vec<_> = tag.points().iter().map(|p| view.to_display(*p)).collect();

    if points.len() == RECTANGLE_POINTS {
        let (p0, p1) = (points[0], points[1]);
        let [c0, c1] = rectangle_from_diagonal([p0, p1]);
        points = vec![p0, c0, p1, c1];
    }

    Poly::new(
        points,
        rest_fill(tag, tags_visible, style),
        Paint::TRANSPARENT,
        style.stroke_width,
        Rc::clone(tag),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::TagColor;
    use crate::geometry::{Point, polygon_contains};
    use crate::surface::HitTestable;

    fn tag(points: Vec<Point>, color: TagColor) -> Rc<Tag> {
        Rc::new(Tag::new(color, points, "t", 1))
    }

    /// True if segments p1-p2 and p3-p4 properly cross.
    fn segments_cross(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
        let cross = |a: Point, b: Point, c: Point| (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
        let d1 = cross(p3, p4, p1);
        let d2 = cross(p3, p4, p2);
        let d3 = cross(p1, p2, p3);
        let d4 = cross(p1, p2, p4);
        ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0)) && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    }

    #[test]
    fn test_rectangle_expands_to_four_corners() {
        let t = tag(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
            TagColor::new(255, 0, 0),
        );
        let poly = tag_to_polygon(&t, &ImageView::actual_size(100, 100), &OverlayStyle::default(), true);
        assert_eq!(
            poly.vertices(),
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ]
        );
    }

    #[test]
    fn test_rectangles_are_never_self_intersecting() {
        let diagonals = [
            (Point::new(0.0, 0.0), Point::new(10.0, 20.0)),
            (Point::new(30.0, 5.0), Point::new(2.0, 40.0)),
            (Point::new(50.0, 50.0), Point::new(10.0, 10.0)),
            (Point::new(8.0, 90.0), Point::new(60.0, 1.0)),
        ];
        let view = ImageView::new(200, 200, 100.0, 100.0);

        for (a, b) in diagonals {
            let poly = tag_to_polygon(&tag(vec![a, b], TagColor::new(1, 2, 3)), &view, &OverlayStyle::default(), true);
            let v = poly.vertices();
            assert_eq!(v.len(), 4);
            assert!(!segments_cross(v[0], v[1], v[2], v[3]));
            assert!(!segments_cross(v[1], v[2], v[3], v[0]));

            // The quad covers the rectangle spanned by the scaled diagonal
            let (da, db) = (view.to_display(a), view.to_display(b));
            let center = Point::new((da.x + db.x) / 2.0, (da.y + db.y) / 2.0);
            assert!(polygon_contains(v, center));
            assert!(poly.hit_test(center));
        }
    }

    #[test]
    fn test_polygon_points_are_scaled() {
        let t = tag(
            vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 200.0)],
            TagColor::new(1, 2, 3),
        );
        let poly = tag_to_polygon(&t, &ImageView::new(400, 400, 200.0, 200.0), &OverlayStyle::default(), true);
        assert_eq!(
            poly.vertices(),
            &[Point::new(0.0, 0.0), Point::new(50.0, 0.0), Point::new(50.0, 100.0)]
        );
        assert_eq!(poly.anchor(), Point::new(25.0, 100.0));
    }

    #[test]
    fn test_fill_depends_on_visibility() {
        let style = OverlayStyle::default();
        let t = tag(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)], TagColor::new(9, 8, 7));
        let view = ImageView::actual_size(10, 10);

        let shown = tag_to_polygon(&t, &view, &style, true);
        let hidden = tag_to_polygon(&t, &view, &style, false);
        assert_eq!(shown.fill, Paint::new(9, 8, 7, style.fill_alpha));
        assert!(hidden.fill.is_transparent());
        assert!(shown.stroke.is_transparent());
        assert_eq!(shown.vertices(), hidden.vertices());
        assert_eq!(highlight_fill(&t, &style), shown.fill);
    }
}
