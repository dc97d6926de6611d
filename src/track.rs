//! Infinite marquee: a strip rendered twice side by side and slid by a
//! velocity whose sign follows the user's last scroll gesture.
//!
//! Event handlers never touch the offset directly. They [`LoopTrack::send`]
//! messages, and the frame step drains them before moving the strip, so a
//! direction flip takes effect on the very next frame.

use std::collections::VecDeque;

use crate::config::TrackConfig;
use crate::frame::FrameClock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Content slides towards negative offsets.
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    /// Scrolling down the page (`delta_y > 0`) pulls the strip left.
    pub fn from_wheel(delta_y: f64) -> Self {
        if delta_y > 0.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Dragging a finger down (`delta_y > 0`) pushes the strip right.
    pub fn from_drag(delta_y: f64) -> Self {
        if delta_y > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackEvent {
    Wheel { delta_y: f64 },
    TouchStart { y: f64 },
    TouchMove { y: f64 },
    /// Intersection report for the hosting section.
    Visibility { intersecting: bool, ratio: f64 },
    /// Full rendered width of the duplicated strip.
    Measured { track_width: f64 },
}

#[derive(Debug)]
pub struct LoopTrack {
    offset: f64,
    direction: Direction,
    speed: f64,
    loop_width: f64,
    active: bool,
    threshold: f64,
    touch_y: Option<f64>,
    clock: FrameClock,
    inbox: VecDeque<TrackEvent>,
}

impl LoopTrack {
    pub fn new(config: &TrackConfig) -> Self {
        Self {
            offset: 0.0,
            direction: Direction::Left,
            speed: config.speed,
            loop_width: 0.0,
            active: false,
            threshold: config.visibility_threshold,
            touch_y: None,
            clock: FrameClock::new(),
            inbox: VecDeque::new(),
        }
    }

    pub fn send(&mut self, event: TrackEvent) {
        self.inbox.push_back(event);
    }

    /// Run one animation frame at timestamp `now_ms` and return the new offset.
    pub fn frame(&mut self, now_ms: f64) -> f64 {
        while let Some(event) = self.inbox.pop_front() {
            self.apply(event);
        }

        let dt = self.clock.delta(now_ms);
        if self.active {
            self.offset += self.speed * self.direction.sign() * dt;
        }
        self.offset = wrap_offset(self.offset, self.loop_width);
        self.offset
    }

    fn apply(&mut self, event: TrackEvent) {
        match event {
            TrackEvent::Visibility { intersecting, ratio } => {
                let active = intersecting && ratio > self.threshold;
                if active != self.active {
                    log::trace!("loop track active={} (ratio {:.2})", active, ratio);
                    // Gesture listeners only exist while the section is in view.
                    self.touch_y = None;
                }
                self.active = active;
            }
            TrackEvent::Measured { track_width } => {
                self.loop_width = if track_width.is_finite() && track_width > 0.0 {
                    track_width / 2.0
                } else {
                    0.0
                };
            }
            _ if !self.active => {}
            TrackEvent::Wheel { delta_y } => self.direction = Direction::from_wheel(delta_y),
            TrackEvent::TouchStart { y } => self.touch_y = Some(y),
            TrackEvent::TouchMove { y } => {
                if let Some(last) = self.touch_y {
                    self.direction = Direction::from_drag(y - last);
                    self.touch_y = Some(y);
                }
            }
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn loop_width(&self) -> f64 {
        self.loop_width
    }
}

/// Bring `offset` back into `(-loop_width, 0]`. A zero loop width means the
/// strip has not been measured yet and the offset is left untouched.
pub fn wrap_offset(offset: f64, loop_width: f64) -> f64 {
    if loop_width.is_nan() || loop_width <= 0.0 || !offset.is_finite() {
        return offset;
    }
    let mut next = offset;
    if next <= -loop_width {
        next += loop_width;
    } else if next > 0.0 {
        next -= loop_width;
    }
    if next <= -loop_width || next > 0.0 {
        // More than one period in a single frame, e.g. after a backgrounded tab.
        next = -(-next).rem_euclid(loop_width);
        if next <= -loop_width {
            next += loop_width;
        }
    }
    next
}
