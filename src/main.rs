//! Host-side helper: `cargo run [frames]` drives every motion component
//! headless for the given number of frames (default 1000) and checks that
//! their outputs stayed bounded. Exits non-zero on the first violation.

use std::{env, process};

use folio_motion::config::MotionConfig;
use folio_motion::particles::ParticleField;
use folio_motion::surface::{Rgba, Surface};
use folio_motion::timeline::{ScrollRegion, Timeline};
use folio_motion::track::{LoopTrack, TrackEvent};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Counts draw calls instead of painting.
struct CountingSurface {
    width: f64,
    height: f64,
    circles: usize,
    clears: usize,
}

impl Surface for CountingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {
        self.clears += 1;
    }

    fn fill_glow_circle(&mut self, _x: f64, _y: f64, _radius: f64, _color: Rgba, _blur: f64) {
        self.circles += 1;
    }
}

fn main() {
    let frames: usize = match env::args().nth(1).map(|a| a.parse()) {
        None => 1000,
        Some(Ok(n)) => n,
        Some(Err(err)) => {
            eprintln!("frame count must be a number: {err}");
            process::exit(2);
        }
    };
    let config = MotionConfig::default();
    let mut violations = Vec::new();

    // 1. Particle field on an 800x600 surface.
    let mut surface = CountingSurface { width: 800.0, height: 600.0, circles: 0, clears: 0 };
    let mut field = ParticleField::new(config.particles.clone(), 0x5eed);
    field.resize(surface.width, surface.height);
    for frame in 0..frames {
        field.step(&mut surface);
        let escaped = field.particles().iter().any(|p| {
            !(0.0..=surface.width).contains(&p.x) || !(0.0..=surface.height).contains(&p.y)
        });
        if escaped {
            violations.push(format!("particle out of bounds at frame {frame}"));
            break;
        }
    }
    println!(
        "particles: {} particles, {} frames, {} circles drawn",
        field.particles().len(),
        surface.clears,
        surface.circles
    );

    // 2. Timeline scrolled top to bottom, with overscroll at both ends.
    let mut timeline = Timeline::new(3, 1280.0, config.timeline.clone());
    let region = ScrollRegion::new(1000.0, 4000.0);
    let mut activated = Vec::new();
    for frame in 0..frames {
        let t = frame as f64 / frames.max(1) as f64;
        let offset = 800.0 + t * 3400.0;
        let p = timeline.scroll_to(offset, region);
        if !(0.0..=1.0).contains(&p) {
            violations.push(format!("progress {p} out of range at offset {offset}"));
            break;
        }
        match timeline.active_item() {
            Some(item) if activated.last() != Some(&item) => activated.push(item),
            Some(_) => {}
            None => violations.push(format!("no active item at progress {p}")),
        }
    }
    if !activated.windows(2).all(|pair| pair[0] < pair[1]) {
        violations.push(format!("items activated out of order: {activated:?}"));
    }
    println!(
        "timeline: final progress {:.3}, layout {:?}, items activated {:?}",
        timeline.progress(),
        timeline.layout(),
        activated
    );

    // 3. Loop track, visible, reversing direction every 200 frames.
    let mut track = LoopTrack::new(&config.track);
    track.send(TrackEvent::Measured { track_width: 2400.0 });
    track.send(TrackEvent::Visibility { intersecting: true, ratio: 1.0 });
    for frame in 0..frames {
        if frame % 200 == 199 {
            let delta_y = if (frame / 200) % 2 == 0 { -1.0 } else { 1.0 };
            track.send(TrackEvent::Wheel { delta_y });
        }
        let offset = track.frame(frame as f64 * FRAME_MS);
        if offset > 0.0 || offset <= -track.loop_width() {
            violations.push(format!("track offset {offset} escaped at frame {frame}"));
            break;
        }
    }
    println!("track: offset {:.3}, direction {:?}", track.offset(), track.direction());

    if violations.is_empty() {
        println!("all invariants held over {frames} frames");
    } else {
        for v in &violations {
            eprintln!("violation: {v}");
        }
        process::exit(1);
    }
}
