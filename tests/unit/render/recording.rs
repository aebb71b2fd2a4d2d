use super::*;

#[test]
fn keeps_only_the_latest_plan() {
    let mut be = RecordingBackend::new();
    assert!(be.last_plan().is_none());
    for width in [10, 20] {
        let plan = FramePlan {
            width,
            height: 5,
            transform: crate::foundation::core::Affine::IDENTITY,
            ops: Vec::new(),
        };
        let frame = be.render_plan(&plan).unwrap();
        assert!(frame.data.is_empty());
    }
    assert_eq!(be.frames(), 2);
    assert_eq!(be.last_plan().map(|p| p.width), Some(20));
    assert_eq!(be.name(), "recording");
}
