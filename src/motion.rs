use std::cell::Cell;

use crate::config::{
    ANCHOR_SCROLL_OFFSET, MAGNETIC_MIN_VIEWPORT_WIDTH, MAGNETIC_PULL, MAGNETIC_TWIST,
    STAGGER_STEP_MS, TILT_DIVISOR, TILT_LIFT_PX, TILT_PERSPECTIVE_PX,
};

pub const TILT_RESET: &str = "perspective(1000px) rotateX(0) rotateY(0) translateY(0)";
pub const MAGNETIC_RESET: &str = "translate(0, 0) rotate(0)";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Element bounds in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    fn local(self, pointer: Point) -> Point {
        Point::new(pointer.x - self.left, pointer.y - self.top)
    }

    fn offset_from_center(self, pointer: Point) -> Point {
        let local = self.local(pointer);
        Point::new(local.x - self.width / 2.0, local.y - self.height / 2.0)
    }
}

/// Not clamped: a zero scroll range yields a non-finite value.
pub fn progress_percent(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    scroll_top / (document_height - viewport_height) * 100.0
}

pub fn anchor_scroll_target(element_top: f64, scroll_y: f64) -> f64 {
    element_top + scroll_y - ANCHOR_SCROLL_OFFSET
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxPose {
    pub offset_y: f64,
    pub rotation_deg: f64,
}

impl ParallaxPose {
    pub fn transform(self) -> String {
        format!(
            "translateY({}px) rotate({}deg)",
            self.offset_y, self.rotation_deg
        )
    }
}

pub fn parallax_pose(scroll_y: f64, index: usize) -> ParallaxPose {
    let index = index as f64;
    let speed = 0.02 + index * 0.01;

    ParallaxPose {
        offset_y: -(scroll_y * speed),
        rotation_deg: (scroll_y * 0.002 + index).sin() * 3.0,
    }
}

/// Collapses any number of requests into one per rendered frame.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: Cell<bool>,
}

impl FrameGate {
    /// Returns `true` when the caller should schedule a frame.
    pub fn request(&self) -> bool {
        !self.pending.replace(true)
    }

    pub fn complete(&self) {
        self.pending.set(false);
    }
}

pub fn tilt_transform(pointer: Point, bounds: Bounds) -> String {
    let local = bounds.local(pointer);
    let rotate_x = (local.y - bounds.height / 2.0) / TILT_DIVISOR;
    let rotate_y = (bounds.width / 2.0 - local.x) / TILT_DIVISOR;

    format!(
        "perspective({TILT_PERSPECTIVE_PX}px) rotateX({rotate_x}deg) rotateY({rotate_y}deg) translateY({TILT_LIFT_PX}px)"
    )
}

pub fn magnetic_enabled(reduced_motion: bool, viewport_width: f64) -> bool {
    !reduced_motion && viewport_width > MAGNETIC_MIN_VIEWPORT_WIDTH
}

pub fn magnetic_transform(pointer: Point, bounds: Bounds) -> String {
    let offset = bounds.offset_from_center(pointer);

    format!(
        "translate({}px, {}px) rotate({}deg)",
        offset.x * MAGNETIC_PULL,
        offset.y * MAGNETIC_PULL,
        offset.x * MAGNETIC_TWIST
    )
}

pub fn ripple_origin(pointer: Point, bounds: Bounds) -> Point {
    bounds.local(pointer)
}

pub fn stagger_delays(count: usize) -> Vec<String> {
    (0..count)
        .map(|index| format!("{}ms", index as u32 * STAGGER_STEP_MS))
        .collect()
}
