use super::*;

fn clock() -> (TickClock, Instant) {
    let t0 = Instant::now();
    (TickClock::starting_at(Fps::new(10).unwrap(), t0), t0)
}

#[test]
fn first_tick_is_due_immediately() {
    let (mut c, t0) = clock();
    assert_eq!(c.remaining(t0), Duration::ZERO);
    assert!(c.advance(t0));
    assert_eq!(c.next_deadline(), t0 + Duration::from_millis(100));
}

#[test]
fn early_advance_is_refused() {
    let (mut c, t0) = clock();
    assert!(c.advance(t0));
    assert!(!c.advance(t0 + Duration::from_millis(50)));
    assert_eq!(c.remaining(t0 + Duration::from_millis(50)), Duration::from_millis(50));
    assert!(c.advance(t0 + Duration::from_millis(100)));
}

#[test]
fn late_ticks_are_not_replayed_in_a_burst() {
    let (mut c, t0) = clock();
    assert!(c.advance(t0));
    let late = t0 + Duration::from_millis(450);
    assert!(c.advance(late));
    assert!(!c.advance(late));
    assert_eq!(c.next_deadline(), late + Duration::from_millis(100));
}

#[test]
fn wait_returns_after_one_period() {
    let fps = Fps::new(200).unwrap();
    let mut c = TickClock::new(fps);
    let t0 = Instant::now();
    c.wait();
    c.wait();
    assert!(t0.elapsed() >= Duration::from_millis(4));
}
