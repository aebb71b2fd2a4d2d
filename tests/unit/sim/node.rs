use super::*;
use crate::config::model::Region;

fn spec(count: usize, link_probability: f64) -> NodeFieldSpec {
    NodeFieldSpec {
        count,
        region: Region::new(0.05, 0.2, 0.25, 0.6),
        radius: [2.0, 5.0],
        opacity: [0.3, 0.7],
        pulse_rate: 3.0,
        link_distance: 80.0,
        link_probability,
    }
}

#[test]
fn nodes_land_inside_their_region_with_ranged_attributes() {
    let area = Rect::new(40.0, 80.0, 240.0, 320.0);
    let (nodes, _) = seed_field(&spec(12, 0.3), area, &mut Rng64::new(1));
    assert_eq!(nodes.len(), 12);
    for n in &nodes {
        assert!(area.contains(n.pos));
        assert!((2.0..5.0).contains(&n.radius));
        assert!((0.3..0.7).contains(&n.opacity));
        assert!((0.0..TAU).contains(&n.phase));
    }
}

#[test]
fn links_respect_distance_and_ordering() {
    let area = Rect::new(0.0, 0.0, 200.0, 200.0);
    let (nodes, links) = seed_field(&spec(20, 1.0), area, &mut Rng64::new(9));
    assert!(!links.is_empty());
    for &(i, j) in &links {
        assert!(i < j);
        assert!(nodes[i].pos.distance(nodes[j].pos) < 80.0);
    }

    let (_, none) = seed_field(&spec(20, 0.0), area, &mut Rng64::new(9));
    assert!(none.is_empty());
}

#[test]
fn same_seed_same_field() {
    let area = Rect::new(0.0, 0.0, 100.0, 100.0);
    let a = seed_field(&spec(8, 0.5), area, &mut Rng64::new(42));
    let b = seed_field(&spec(8, 0.5), area, &mut Rng64::new(42));
    assert_eq!(a, b);
}

#[test]
fn phase_advances_monotonically_and_brightness_stays_bounded() {
    let mut n = SimNode {
        pos: Point::ZERO,
        radius: 3.0,
        opacity: 0.5,
        phase: 0.0,
    };
    let mut last = n.phase;
    for _ in 0..1000 {
        n.advance(3.0, 16.0);
        assert!(n.phase > last);
        last = n.phase;
        assert!((0.2..=1.0).contains(&n.brightness()));
        assert!((0.0..=1.0).contains(&n.alpha()));
    }
}
