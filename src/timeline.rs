//! Scroll-driven timeline reveal.
//!
//! A tall "scene" pins the timeline while the page scrolls through it. The
//! fraction of the scene traversed is the progress; each of the K items owns an
//! equal slice of that progress and animates its opacity, scale and entrance
//! offset across its slice.

use crate::config::TimelineConfig;

/// Piecewise-linear interpolation over `(input, output)` stops sorted by input.
/// Inputs outside the table clamp to the first or last output.
pub fn interpolate(x: f64, stops: &[(f64, f64)]) -> f64 {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return 0.0,
    };
    if x.is_nan() || x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    for pair in stops.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x <= x1 {
            let span = x1 - x0;
            if span <= 0.0 {
                return y1;
            }
            return y0 + (y1 - y0) * (x - x0) / span;
        }
    }
    last.1
}

pub const OPACITY_CURVE: [(f64, f64); 3] = [(0.0, 0.0), (0.2, 1.0), (1.0, 1.0)];
pub const SCALE_CURVE: [(f64, f64); 3] = [(0.0, 0.75), (0.25, 1.0), (1.0, 1.0)];

/// Scroll offsets at which the scene starts and finishes being traversed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRegion {
    pub start: f64,
    pub end: f64,
}

impl ScrollRegion {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Region of a sticky scene at document offset `scene_top`: traversal begins
    /// when its top meets the viewport top and ends when its bottom meets the
    /// viewport bottom.
    pub fn from_scene(scene_top: f64, scene_height: f64, viewport_height: f64) -> Self {
        Self {
            start: scene_top,
            end: scene_top + (scene_height - viewport_height).max(0.0),
        }
    }
}

/// Fraction of `region` traversed at `offset`, clamped to `[0, 1]`.
pub fn progress(offset: f64, region: ScrollRegion) -> f64 {
    let span = region.end - region.start;
    if span.is_nan() || span <= 0.0 {
        return if offset >= region.end { 1.0 } else { 0.0 };
    }
    let p = (offset - region.start) / span;
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Progress slice `[start, end]` during which one item transitions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    /// Position of `progress` inside this interval, clamped to `[0, 1]`.
    pub fn local(&self, progress: f64) -> f64 {
        let span = self.end - self.start;
        if span.is_nan() || span <= 0.0 {
            return if progress >= self.end { 1.0 } else { 0.0 };
        }
        ((progress - self.start) / span).clamp(0.0, 1.0)
    }

    /// Half-open membership, except the final interval also owns `1.0`.
    pub fn contains(&self, progress: f64) -> bool {
        progress >= self.start && (progress < self.end || (self.end >= 1.0 && progress <= self.end))
    }
}

pub fn activation_intervals(count: usize) -> Vec<Interval> {
    if count == 0 {
        return Vec::new();
    }
    let k = count as f64;
    (0..count)
        .map(|i| Interval {
            start: i as f64 / k,
            end: (i + 1) as f64 / k,
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Narrow viewports: items stacked vertically, entering from the left.
    Compact,
    /// Items spread along a horizontal line, alternating above and below it.
    Expanded,
}

impl Layout {
    pub fn for_viewport(width: f64, breakpoint: f64) -> Self {
        if width < breakpoint {
            Layout::Compact
        } else {
            Layout::Expanded
        }
    }
}

/// Derived transform for one item at the current progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemStyle {
    pub opacity: f64,
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl ItemStyle {
    /// CSS `transform` value for this style.
    pub fn transform(&self) -> String {
        format!(
            "translate({:.3}px, {:.3}px) scale({:.4})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Style an item at `local` progress through its own interval.
pub fn item_style(index: usize, local: f64, layout: Layout, config: &TimelineConfig) -> ItemStyle {
    let opacity = interpolate(local, &OPACITY_CURVE);
    let scale = interpolate(local, &SCALE_CURVE);
    let (translate_x, translate_y) = match layout {
        Layout::Expanded => {
            let from = if index % 2 == 0 {
                config.expanded_offset
            } else {
                -config.expanded_offset
            };
            (0.0, interpolate(local, &[(0.0, from), (1.0, 0.0)]))
        }
        Layout::Compact => (interpolate(local, &[(0.0, config.compact_offset), (1.0, 0.0)]), 0.0),
    };
    ItemStyle {
        opacity,
        scale,
        translate_x,
        translate_y,
    }
}

/// Progress state for one timeline scene.
#[derive(Debug, Clone)]
pub struct Timeline {
    intervals: Vec<Interval>,
    layout: Layout,
    progress: f64,
    config: TimelineConfig,
}

impl Timeline {
    pub fn new(item_count: usize, viewport_width: f64, config: TimelineConfig) -> Self {
        Self {
            intervals: activation_intervals(item_count),
            layout: Layout::for_viewport(viewport_width, config.breakpoint),
            progress: 0.0,
            config,
        }
    }

    /// Re-pick the layout for a new viewport width. Returns whether it changed.
    pub fn observe_viewport(&mut self, width: f64) -> bool {
        let layout = Layout::for_viewport(width, self.config.breakpoint);
        if layout == self.layout {
            return false;
        }
        log::debug!("timeline layout {:?} -> {:?} at width {}", self.layout, layout, width);
        self.layout = layout;
        true
    }

    pub fn scroll_to(&mut self, offset: f64, region: ScrollRegion) -> f64 {
        self.progress = progress(offset, region);
        self.progress
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn item_count(&self) -> usize {
        self.intervals.len()
    }

    /// Index of the item whose interval holds the current progress.
    pub fn active_item(&self) -> Option<usize> {
        self.intervals.iter().position(|iv| iv.contains(self.progress))
    }

    /// How far along its own interval each item is.
    pub fn locals(&self) -> Vec<f64> {
        self.intervals.iter().map(|iv| iv.local(self.progress)).collect()
    }

    pub fn item_styles(&self) -> Vec<ItemStyle> {
        self.intervals
            .iter()
            .enumerate()
            .map(|(i, iv)| item_style(i, iv.local(self.progress), self.layout, &self.config))
            .collect()
    }

    /// Fill fraction of the timeline's progress line.
    pub fn line_fill(&self) -> f64 {
        self.progress
    }

    /// Scene height in viewport-height percent (`vh`).
    pub fn scene_height_vh(&self) -> f64 {
        let per_item = match self.layout {
            Layout::Expanded => self.config.expanded_vh_per_item,
            Layout::Compact => self.config.compact_vh_per_item,
        };
        (per_item * self.item_count() as f64).max(self.config.min_scene_vh)
    }
}
