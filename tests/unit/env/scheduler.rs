use super::*;

#[test]
fn requests_fire_in_submission_order() {
    let mut s = ManualScheduler::new();
    let a = s.request_frame();
    let b = s.request_frame();
    assert!(a < b);
    assert_eq!(s.take_next(), Some(a));
    assert_eq!(s.take_all(), vec![b]);
    assert_eq!(s.take_next(), None);
    assert_eq!(s.requested_count(), 2);
}

#[test]
fn cancel_counts_only_outstanding_requests() {
    let mut s = ManualScheduler::new();
    let a = s.request_frame();
    assert!(s.is_pending(a));
    s.cancel_frame(a);
    s.cancel_frame(a);
    assert!(!s.is_pending(a));
    assert_eq!(s.cancelled_count(), 1);
    assert_eq!(s.pending_count(), 0);

    let b = s.request_frame();
    assert_eq!(s.take_next(), Some(b));
    s.cancel_frame(b);
    assert_eq!(s.cancelled_count(), 1);
}
