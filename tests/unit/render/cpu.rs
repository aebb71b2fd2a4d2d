use kurbo::{Circle, Shape as _};

use super::*;

fn plan(width: u32, height: u32, ops: Vec<DrawOp>) -> FramePlan {
    FramePlan {
        width,
        height,
        transform: Affine::IDENTITY,
        ops,
    }
}

#[test]
fn empty_plan_is_transparent() {
    let mut be = CpuBackend::new(16, 8).unwrap();
    let f = be.render_plan(&plan(16, 8, vec![])).unwrap();
    assert_eq!((f.width, f.height), (16, 8));
    assert_eq!(f.data.len(), 16 * 8 * 4);
    assert!(f.premultiplied);
    assert_eq!(f.painted_pixels(), 0);
}

#[test]
fn clear_paints_every_pixel() {
    let mut be = CpuBackend::new(8, 8).unwrap();
    let f = be
        .render_plan(&plan(
            8,
            8,
            vec![DrawOp::Clear {
                color: Rgba8::rgb(15, 20, 25),
            }],
        ))
        .unwrap();
    assert_eq!(f.painted_pixels(), 64);
    let [r, g, b, a] = f.pixel(3, 3).unwrap();
    assert_eq!(a, 255);
    assert!(r.abs_diff(15) <= 1 && g.abs_diff(20) <= 1 && b.abs_diff(25) <= 1);
}

#[test]
fn filled_circle_covers_its_center_only() {
    let mut be = CpuBackend::new(32, 32).unwrap();
    let op = DrawOp::FillPath {
        path: Circle::new((16.0, 16.0), 6.0).to_path(0.1),
        color: Rgba8::rgb(0, 255, 255),
        opacity: 1.0,
    };
    let f = be.render_plan(&plan(32, 32, vec![op])).unwrap();
    let [_, g, b, a] = f.pixel(16, 16).unwrap();
    assert_eq!(a, 255);
    assert!(g > 200 && b > 200);
    assert_eq!(f.pixel(1, 1).unwrap()[3], 0);
}

#[test]
fn stroke_paints_along_the_line() {
    let mut be = CpuBackend::new(32, 32).unwrap();
    let mut path = BezPath::new();
    path.move_to((2.0, 16.0));
    path.line_to((30.0, 16.0));
    let op = DrawOp::StrokePath {
        path,
        color: Rgba8::rgb(255, 255, 255),
        width: 4.0,
        opacity: 1.0,
    };
    let f = be.render_plan(&plan(32, 32, vec![op])).unwrap();
    assert!(f.pixel(16, 16).unwrap()[3] > 0);
    assert_eq!(f.pixel(16, 2).unwrap()[3], 0);
}

#[test]
fn transform_scales_to_device_pixels() {
    let mut be = CpuBackend::new(8, 8).unwrap();
    let mut p = plan(
        16,
        16,
        vec![DrawOp::FillPath {
            path: kurbo::Rect::new(0.0, 0.0, 4.0, 4.0).to_path(0.1),
            color: Rgba8::rgb(255, 0, 0),
            opacity: 1.0,
        }],
    );
    p.transform = Affine::scale(2.0);
    let f = be.render_plan(&p).unwrap();
    assert_eq!(be.size(), (16, 16));
    assert_eq!(f.pixel(7, 7).unwrap()[3], 255);
    assert_eq!(f.pixel(9, 9).unwrap()[3], 0);
}

#[test]
fn frames_do_not_accumulate() {
    let mut be = CpuBackend::new(8, 8).unwrap();
    let full = plan(
        8,
        8,
        vec![DrawOp::Clear {
            color: Rgba8::rgb(1, 2, 3),
        }],
    );
    be.render_plan(&full).unwrap();
    let f = be.render_plan(&plan(8, 8, vec![])).unwrap();
    assert_eq!(f.painted_pixels(), 0);
}
