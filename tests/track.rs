use folio_motion::config::TrackConfig;
use folio_motion::track::{Direction, LoopTrack, TrackEvent};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// A visible, measured track with a 1000px loop, already past its first frame.
fn running_track() -> LoopTrack {
    let mut track = LoopTrack::new(&TrackConfig::default());
    track.send(TrackEvent::Measured { track_width: 2000.0 });
    track.send(TrackEvent::Visibility { intersecting: true, ratio: 0.5 });
    track.frame(0.0);
    track
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn starts_inactive_moving_left() {
    let mut track = LoopTrack::new(&TrackConfig::default());
    assert!(!track.is_active());
    assert_eq!(track.direction(), Direction::Left);
    assert_eq!(track.frame(0.0), 0.0);
    assert_eq!(track.frame(500.0), 0.0);
}

#[test]
fn advances_by_speed_times_elapsed_time() {
    let mut track = running_track();
    assert_eq!(track.loop_width(), 1000.0);
    // First frame only establishes the clock.
    assert_eq!(track.offset(), 0.0);

    assert!(close(track.frame(500.0), -40.0));
    assert!(close(track.frame(1500.0), -120.0));
}

#[test]
fn offset_stays_in_range_and_wraps_by_one_period() {
    let mut track = running_track();
    let mut prev = track.offset();
    let mut wraps = 0;
    for i in 1..=5000 {
        let now = i as f64 * FRAME_MS;
        let next = track.frame(now);
        assert!(next <= 0.0 && next > -1000.0, "offset {next} at frame {i}");

        let step = 80.0 * FRAME_MS / 1000.0;
        let moved = next - prev;
        if moved > 0.0 {
            // Wrapped: one period minus a single frame of motion.
            wraps += 1;
            assert!(close(moved, 1000.0 - step), "moved {moved}");
        } else {
            assert!(close(moved, -step), "moved {moved}");
        }
        prev = next;
    }
    assert!(wraps >= 5);
}

#[test]
fn wheel_reverses_on_next_frame() {
    let mut track = running_track();
    track.frame(1000.0);
    let before = track.offset();

    track.send(TrackEvent::Wheel { delta_y: -3.0 });
    let after = track.frame(1100.0);
    assert_eq!(track.direction(), Direction::Right);
    assert!(close(after - before, 8.0), "{before} -> {after}");

    // Direction persists without further gestures.
    track.frame(1200.0);
    assert_eq!(track.direction(), Direction::Right);

    track.send(TrackEvent::Wheel { delta_y: 12.0 });
    let before = track.offset();
    let after = track.frame(1300.0);
    assert_eq!(track.direction(), Direction::Left);
    assert!(close(after - before, -8.0), "{before} -> {after}");
}

#[test]
fn touch_drag_sets_direction_from_delta() {
    let mut track = running_track();

    // A move without a preceding touchstart is ignored.
    track.send(TrackEvent::TouchMove { y: 300.0 });
    track.frame(100.0);
    assert_eq!(track.direction(), Direction::Left);

    track.send(TrackEvent::TouchStart { y: 300.0 });
    track.send(TrackEvent::TouchMove { y: 340.0 });
    track.frame(200.0);
    assert_eq!(track.direction(), Direction::Right);

    track.send(TrackEvent::TouchMove { y: 320.0 });
    track.frame(300.0);
    assert_eq!(track.direction(), Direction::Left);
}

#[test]
fn inactive_freezes_and_resumes_from_frozen_value() {
    let mut track = running_track();
    track.frame(2000.0);
    let frozen = track.offset();
    assert!(frozen < 0.0);

    track.send(TrackEvent::Visibility { intersecting: true, ratio: 0.05 });
    for i in 1..=120 {
        assert_eq!(track.frame(2000.0 + i as f64 * FRAME_MS), frozen);
    }
    assert!(!track.is_active());

    track.send(TrackEvent::Visibility { intersecting: true, ratio: 0.8 });
    let resumed = track.frame(2000.0 + 121.0 * FRAME_MS);
    assert!(close(resumed, frozen - 80.0 * FRAME_MS / 1000.0));
}

#[test]
fn gestures_while_hidden_are_dropped() {
    let mut track = running_track();
    track.send(TrackEvent::Visibility { intersecting: false, ratio: 0.0 });
    track.send(TrackEvent::Wheel { delta_y: -1.0 });
    track.frame(100.0);
    assert_eq!(track.direction(), Direction::Left);
}

#[test]
fn unmeasured_track_moves_without_wrapping() {
    let mut track = LoopTrack::new(&TrackConfig::default());
    track.send(TrackEvent::Visibility { intersecting: true, ratio: 1.0 });
    track.frame(0.0);
    let offset = track.frame(30_000.0);
    assert!(close(offset, -2400.0));
    assert_eq!(track.loop_width(), 0.0);

    // Once measured, the next frame folds the offset back into range.
    track.send(TrackEvent::Measured { track_width: 2000.0 });
    let offset = track.frame(30_000.0);
    assert!(offset <= 0.0 && offset > -1000.0, "{offset}");
    assert!(close(offset, -400.0));
}

#[test]
fn long_frame_still_lands_in_range() {
    let mut track = running_track();
    let offset = track.frame(60_000.0);
    assert!(offset <= 0.0 && offset > -1000.0, "{offset}");
    assert!(close(offset, -800.0));
}

#[test]
fn clock_going_backwards_does_not_move_track() {
    let mut track = running_track();
    track.frame(1000.0);
    let offset = track.offset();
    assert_eq!(track.frame(500.0), offset);
}
