use super::*;

fn particle(path: ParticlePath) -> FlowParticle {
    FlowParticle {
        path,
        progress: 0.0,
        color: Rgba8::rgb(138, 43, 226),
        size: 3.0,
        route: 0,
        target: Anchor::Hub,
    }
}

#[test]
fn linear_path_interpolates_endpoints() {
    let p = ParticlePath::between(Point::new(0.0, 0.0), Point::new(100.0, 50.0), PathCurve::Linear);
    assert_eq!(p.eval(0.0), Point::new(0.0, 0.0));
    assert_eq!(p.eval(1.0), Point::new(100.0, 50.0));
    assert_eq!(p.eval(0.5), Point::new(50.0, 25.0));
    assert_eq!(p.eval(7.0), p.end());
    assert_eq!(p.eval(f64::NAN), p.start());
}

#[test]
fn quadratic_path_bends_off_the_chord() {
    let p = ParticlePath::between(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        PathCurve::Quadratic { bend: 0.2 },
    );
    let mid = p.eval(0.5);
    assert!((mid.x - 50.0).abs() < 1e-9);
    assert!(mid.y.abs() > 1.0);
    assert_eq!(p.end(), Point::new(100.0, 0.0));
}

#[test]
fn coincident_endpoints_evaluate_to_start() {
    let at = Point::new(12.0, 34.0);
    for curve in [PathCurve::Linear, PathCurve::Quadratic { bend: 0.5 }] {
        let p = ParticlePath::between(at, at, curve);
        for t in [0.0, 0.3, 1.0] {
            assert_eq!(p.eval(t), at);
        }
    }
}

#[test]
fn progress_saturates_and_ignores_bad_deltas() {
    let mut fp = particle(ParticlePath::between(
        Point::ZERO,
        Point::new(10.0, 0.0),
        PathCurve::Linear,
    ));
    fp.advance(0.7);
    fp.advance(f64::NAN);
    fp.advance(-1.0);
    assert!((fp.progress - 0.7).abs() < 1e-12);
    fp.advance(0.7);
    assert_eq!(fp.progress, 1.0);
    assert!(fp.has_arrived(Ease::Linear, 0.0));
}

#[test]
fn arrival_radius_only_counts_after_halfway() {
    let mut fp = particle(ParticlePath::between(
        Point::ZERO,
        Point::new(30.0, 0.0),
        PathCurve::Linear,
    ));
    fp.progress = 0.4;
    assert!(!fp.has_arrived(Ease::Linear, 20.0));
    fp.progress = 0.6;
    assert!(fp.has_arrived(Ease::Linear, 20.0));
}

#[test]
fn to_bez_path_starts_and_ends_on_the_path() {
    let p = ParticlePath::between(
        Point::new(1.0, 2.0),
        Point::new(9.0, 8.0),
        PathCurve::Quadratic { bend: -0.3 },
    );
    let bez = p.to_bez_path();
    assert_eq!(bez.elements().len(), 2);
    let moved = p.transformed(Affine::scale(2.0));
    assert_eq!(moved.start(), Point::new(2.0, 4.0));
}
