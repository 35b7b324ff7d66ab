//! Chopping arcs into shorter arcs and circles into pie wedges

use std::f64::consts::{PI, TAU};

use glam::DVec2;

use crate::config::Config;
use crate::errors::ChopError;
use crate::geometry::{normalize_angle, screen_angle};
use crate::intersect::Intersections;
use crate::model::{Arc, Ellipse};
use crate::types::{Direction, Point, SCREEN};

/// The point halfway between `a` and `b` on the circle around `center`,
/// going from `a` in `direction` through an angle of `span`.
///
/// The sum of the two radius vectors points at the middle of the shorter
/// of the two arcs, so it is flipped when `span` exceeds a half turn. For
/// antipodal endpoints the sum vanishes and `a`'s radius is turned a quarter
/// instead.
pub(super) fn arc_midpoint(
    center: DVec2,
    r: f64,
    (a, b): (DVec2, DVec2),
    span: f64,
    direction: Direction,
) -> DVec2 {
    match ((a - center) + (b - center)).try_normalize() {
        Some(dir) if span > PI => center - dir * r,
        Some(dir) => center + dir * r,
        None => {
            let turned = SCREEN.to_math(a - center).perp() * direction.sign();
            center + SCREEN.from_math(turned).normalize_or_zero() * r
        }
    }
}

/// Split `arc` at the hits, which must lie on it.
///
/// No hits at all is `NoIntersections`; hits that only touch the endpoints
/// leave nothing to cut and give `ArcNeedsCut`. The arc's own endpoints seed
/// the cut list. Cuts closer than `cfg.min_chop_arc_length` (measured along
/// the arc) to the previous kept cut are dropped; every piece keeps the
/// parent's center.
pub fn chop_arc(arc: &Arc, hits: &Intersections, cfg: &Config) -> Result<Vec<Arc>, ChopError> {
    if hits.is_empty() {
        return Err(ChopError::NoIntersections);
    }
    let sweep = arc.sweep();
    let r = arc.radius();
    // cuts just outside the sweep are numerical noise around an endpoint
    let clamp = |t: f64| {
        if t <= sweep {
            t
        } else if TAU - t < t - sweep {
            0.0
        } else {
            sweep
        }
    };
    let mut cuts: Vec<(f64, DVec2)> = hits
        .iter()
        .map(|h| (clamp(arc.angle_from_start(h.pos)), h.pos))
        .collect();
    cuts.push((0.0, arc.start().to_vec()));
    cuts.push((sweep, arc.end().to_vec()));
    cuts.sort_by(|x, y| x.0.total_cmp(&y.0));

    let min_angle = if r > 0.0 {
        cfg.min_chop_arc_length / r
    } else {
        0.0
    };
    let mut kept: Vec<(f64, DVec2)> = vec![(0.0, arc.start().to_vec())];
    for &(t, pos) in &cuts {
        let prev = kept.last().map_or(0.0, |&(prev, _)| prev);
        if t - prev > min_angle {
            kept.push((t, pos));
        }
    }
    // the end must survive even when a cut crowds it
    let last = kept.len() - 1;
    if last > 0 && kept[last].0 != sweep {
        kept[last] = (sweep, arc.end().to_vec());
    }
    if kept.len() <= 2 {
        return Err(ChopError::ArcNeedsCut);
    }

    let center = arc.center();
    let pieces: Vec<Arc> = kept
        .windows(2)
        .map(|w| {
            let ((ta, a), (tb, b)) = (w[0], w[1]);
            let mid = arc_midpoint(center, r, (a, b), tb - ta, arc.direction());
            Arc::split_from(arc, [a, mid, b].map(Point::from_vec))
        })
        .collect();
    crate::log::debug!(cuts = kept.len(), pieces = pieces.len(), "arc pieces");
    Ok(pieces)
}

/// Split a circle into pie wedges, one per distinct hit.
///
/// Wedges run counterclockwise as displayed from each hit to the next by
/// polar angle, the last wrapping around to the first.
pub fn chop_circle(circle: &Ellipse, hits: &Intersections) -> Result<Vec<Arc>, ChopError> {
    if !circle.is_circle() {
        return Err(ChopError::EllipseUnsupported);
    }
    if hits.is_empty() {
        return Err(ChopError::NoIntersections);
    }
    let center = circle.center().to_vec();
    let r = circle.radii().x;

    let mut points: Vec<Point> = hits.iter().map(|h| Point::from_vec(h.pos)).collect();
    points.sort_by_key(|p| (p.x, p.y));
    points.dedup();
    if points.len() < 2 {
        return Err(ChopError::CircleNeedsTwo);
    }
    let mut around: Vec<(f64, DVec2)> = points
        .iter()
        .map(|p| (screen_angle(p.to_vec() - center), p.to_vec()))
        .collect();
    around.sort_by(|x, y| x.0.total_cmp(&y.0));

    let n = around.len();
    let wedges: Vec<Arc> = (0..n)
        .map(|i| {
            let (ta, a) = around[i];
            let (tb, b) = around[(i + 1) % n];
            let span = normalize_angle(tb - ta);
            let mid = arc_midpoint(center, r, (a, b), span, Direction::Counterclockwise);
            Arc::wedge(
                [a, mid, b].map(Point::from_vec),
                center,
                Direction::Counterclockwise,
            )
            .with_style(circle.style.clone())
            .with_depth(circle.depth)
        })
        .collect();
    crate::log::debug!(wedges = wedges.len(), "circle pieces");
    Ok(wedges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::compute_arc_length;
    use crate::intersect::Hit;
    use crate::model::{ArcKind, Arrow, Shape, Style};
    use std::f64::consts::FRAC_PI_2;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn hits(points: &[(f64, f64)]) -> Intersections {
        points
            .iter()
            .map(|&(x, y)| Hit::new(DVec2::new(x, y), None))
            .collect()
    }

    /// Upper half of the circle of radius 100, clockwise as displayed
    fn upper() -> Arc {
        Arc::new(ArcKind::Open, [p(-100, 0), p(0, -100), p(100, 0)]).unwrap()
    }

    #[test]
    fn midpoint_of_a_quarter() {
        let m = arc_midpoint(
            DVec2::ZERO,
            10.0,
            (DVec2::new(10.0, 0.0), DVec2::new(0.0, -10.0)),
            FRAC_PI_2,
            Direction::Counterclockwise,
        );
        assert!(m.distance(DVec2::new(50f64.sqrt(), -50f64.sqrt())) < 1e-9);
    }

    #[test]
    fn midpoint_of_a_long_way_round() {
        let m = arc_midpoint(
            DVec2::ZERO,
            10.0,
            (DVec2::new(10.0, 0.0), DVec2::new(0.0, -10.0)),
            3.0 * FRAC_PI_2,
            Direction::Clockwise,
        );
        assert!(m.distance(DVec2::new(-(50f64.sqrt()), 50f64.sqrt())) < 1e-9);
    }

    #[test]
    fn midpoint_of_a_half_turn() {
        // counterclockwise as displayed from the right goes up the screen
        let m = arc_midpoint(
            DVec2::ZERO,
            10.0,
            (DVec2::new(10.0, 0.0), DVec2::new(-10.0, 0.0)),
            PI,
            Direction::Counterclockwise,
        );
        assert!(m.distance(DVec2::new(0.0, -10.0)) < 1e-9);
        let m = arc_midpoint(
            DVec2::ZERO,
            10.0,
            (DVec2::new(10.0, 0.0), DVec2::new(-10.0, 0.0)),
            PI,
            Direction::Clockwise,
        );
        assert!(m.distance(DVec2::new(0.0, 10.0)) < 1e-9);
    }

    #[test]
    fn arc_cut_in_the_middle() {
        let arc = upper();
        let pieces = chop_arc(&arc, &hits(&[(0.0, -100.0)]), &Config::default()).unwrap();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].start(), p(-100, 0));
        assert_eq!(pieces[0].end(), p(0, -100));
        assert_eq!(pieces[1].start(), p(0, -100));
        assert_eq!(pieces[1].end(), p(100, 0));
        for piece in &pieces {
            assert_eq!(piece.center(), arc.center());
            assert_eq!(piece.direction(), arc.direction());
            assert!((compute_arc_length(piece) - 50.0 * PI).abs() < 1.0);
        }
        assert_eq!(pieces[0].points()[1], p(-71, -71));
    }

    #[test]
    fn cuts_are_ordered_along_the_arc() {
        let s = 50.0 * 3f64.sqrt();
        let arc = upper();
        let h = hits(&[(s, -50.0), (-s, -50.0)]);
        let pieces = chop_arc(&arc, &h, &Config::default()).unwrap();
        let ends: Vec<(Point, Point)> = pieces.iter().map(|a| (a.start(), a.end())).collect();
        assert_eq!(
            ends,
            vec![
                (p(-100, 0), p(-87, -50)),
                (p(-87, -50), p(87, -50)),
                (p(87, -50), p(100, 0)),
            ]
        );
    }

    #[test]
    fn cuts_at_the_endpoints_do_not_count() {
        let arc = upper();
        let err = chop_arc(&arc, &hits(&[(100.0, 0.0), (-100.0, 0.0)]), &Config::default());
        assert_eq!(err.unwrap_err(), ChopError::ArcNeedsCut);
    }

    #[test]
    fn arc_without_hits() {
        assert_eq!(
            chop_arc(&upper(), &Intersections::new(), &Config::default()).unwrap_err(),
            ChopError::NoIntersections
        );
    }

    #[test]
    fn a_cut_crowding_the_end_is_merged() {
        let arc = upper();
        let near_end = DVec2::from_angle(-0.005) * 100.0;
        let hits = hits(&[(0.0, -100.0), (near_end.x, -near_end.y.abs())]);
        let pieces = chop_arc(&arc, &hits, &Config::default()).unwrap();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[1].end(), p(100, 0));
    }

    #[test]
    fn circle_into_four_wedges() {
        let style = Style {
            thickness: 2,
            backward_arrow: Some(Arrow::default()),
            ..Style::PLAIN
        };
        let circle = Ellipse::circle(p(0, 0), 10).unwrap().with_style(style);
        let h = hits(&[(10.0, 0.0), (-10.0, 0.0), (0.0, 10.0), (0.0, -10.0)]);
        let wedges = chop_circle(&circle, &h).unwrap();
        assert_eq!(wedges.len(), 4);
        for w in &wedges {
            assert_eq!(w.kind(), ArcKind::PieWedge);
            assert_eq!(w.direction(), Direction::Counterclockwise);
            assert!((w.sweep() - FRAC_PI_2).abs() < 1e-9);
            assert_eq!(w.style().thickness, 2);
            assert!(w.style().backward_arrow.is_none());
        }
        // starting at angle 0 and turning up the screen
        assert_eq!(wedges[0].points(), &[p(10, 0), p(7, -7), p(0, -10)]);
    }

    #[test]
    fn circle_with_two_hits() {
        let circle = Ellipse::circle(p(0, 0), 10).unwrap();
        let wedges = chop_circle(&circle, &hits(&[(10.0, 0.0), (-10.0, 0.0)])).unwrap();
        assert_eq!(wedges.len(), 2);
        assert_eq!(wedges[0].points()[1], p(0, -10));
        assert_eq!(wedges[1].points()[1], p(0, 10));
    }

    #[test]
    fn circle_needs_two_distinct_hits() {
        let circle = Ellipse::circle(p(0, 0), 10).unwrap();
        let h = hits(&[(10.0, 0.0), (10.0, 0.0)]);
        assert_eq!(chop_circle(&circle, &h), Err(ChopError::CircleNeedsTwo));
        assert_eq!(
            chop_circle(&circle, &Intersections::new()),
            Err(ChopError::NoIntersections)
        );
    }

    #[test]
    fn ellipses_are_not_chopped() {
        let e = Ellipse::new(p(0, 0), 20, 10, 0.0).unwrap();
        let h = hits(&[(20.0, 0.0), (-20.0, 0.0)]);
        assert_eq!(chop_circle(&e, &h), Err(ChopError::EllipseUnsupported));
    }
}
