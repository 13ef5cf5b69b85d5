//! Per-frame state for the decorative element that walks after the pointer.

use crate::config::{
    FOLLOWER_ARRIVAL_RADIUS, FOLLOWER_BOUNCE_PX, FOLLOWER_PHASE_STEP, FOLLOWER_SPEED,
    FOLLOWER_TILT_DEG,
};
use crate::motion::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FollowerFrame {
    Walking {
        position: Point,
        facing: f64,
        tilt_deg: f64,
        bounce_px: f64,
    },
    Idle {
        position: Point,
        facing: f64,
    },
}

impl FollowerFrame {
    pub fn transform(&self) -> String {
        match *self {
            Self::Walking {
                position,
                facing,
                tilt_deg,
                bounce_px,
            } => format!(
                "translate({}px, {}px) translate(-50%, -50%) scaleX({facing}) rotate({tilt_deg}deg) translateY({}px)",
                position.x, position.y, -bounce_px
            ),
            Self::Idle { position, facing } => format!(
                "translate({}px, {}px) translate(-50%, -50%) scaleX({facing})",
                position.x, position.y
            ),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Follower {
    pointer: Point,
    position: Point,
    phase: f64,
}

impl Follower {
    pub fn set_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// Advances one frame toward the last known pointer.
    pub fn step(&mut self) -> FollowerFrame {
        let dx = self.pointer.x - self.position.x;
        let dy = self.pointer.y - self.position.y;
        let distance = dx.hypot(dy);

        if distance <= FOLLOWER_ARRIVAL_RADIUS {
            let facing = if self.pointer.x > self.position.x { 1.0 } else { -1.0 };
            return FollowerFrame::Idle {
                position: self.position,
                facing,
            };
        }

        let travel = distance.min(FOLLOWER_SPEED);
        self.position.x += dx / distance * travel;
        self.position.y += dy / distance * travel;
        self.phase += FOLLOWER_PHASE_STEP;

        FollowerFrame::Walking {
            position: self.position,
            facing: if dx > 0.0 { 1.0 } else { -1.0 },
            tilt_deg: self.phase.sin() * FOLLOWER_TILT_DEG,
            bounce_px: (self.phase * 2.0).sin().abs() * FOLLOWER_BOUNCE_PX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl FollowerFrame {
        fn position(&self) -> Point {
            match *self {
                Self::Walking { position, .. } | Self::Idle { position, .. } => position,
            }
        }
    }

    fn distance(a: Point, b: Point) -> f64 {
        (a.x - b.x).hypot(a.y - b.y)
    }

    #[test]
    fn converges_on_stationary_pointer_without_overspeeding() {
        let target = Point::new(100.0, 100.0);
        let mut follower = Follower::default();
        follower.set_pointer(target);

        let mut previous = follower.position;
        for _ in 0..400 {
            let frame = follower.step();
            assert!(distance(previous, frame.position()) <= FOLLOWER_SPEED + 1e-9);
            previous = frame.position();
        }

        assert!(distance(follower.position, target) <= FOLLOWER_ARRIVAL_RADIUS);
        assert!(matches!(follower.step(), FollowerFrame::Idle { .. }));
    }

    #[test]
    fn first_frame_before_any_pointer_is_idle_at_origin() {
        let mut follower = Follower::default();

        let frame = follower.step();
        assert_eq!(
            frame.transform(),
            "translate(0px, 0px) translate(-50%, -50%) scaleX(-1)"
        );
        assert_eq!(follower.phase, 0.0);
    }

    #[test]
    fn idle_frame_keeps_position_and_phase() {
        let mut follower = Follower::default();
        follower.set_pointer(Point::new(0.5, 0.0));

        let frame = follower.step();
        assert_eq!(
            frame,
            FollowerFrame::Idle {
                position: Point::default(),
                facing: 1.0,
            }
        );
        assert_eq!(follower.phase, 0.0);
    }

    #[test]
    fn walking_faces_travel_direction() {
        let mut follower = Follower::default();
        follower.set_pointer(Point::new(-50.0, 0.0));

        let FollowerFrame::Walking { facing, position, .. } = follower.step() else {
            panic!("expected a walking frame");
        };
        assert_eq!(facing, -1.0);
        assert!((position.x + FOLLOWER_SPEED).abs() < 1e-12);
    }

    #[test]
    fn phase_accumulates_while_walking() {
        let mut follower = Follower::default();
        follower.set_pointer(Point::new(10.0, 0.0));
        follower.step();
        follower.step();

        assert!((follower.phase - 2.0 * FOLLOWER_PHASE_STEP).abs() < 1e-12);
    }

    #[test]
    fn transforms_match_frame_kind() {
        let idle = FollowerFrame::Idle {
            position: Point::new(4.0, 8.0),
            facing: -1.0,
        };
        assert_eq!(
            idle.transform(),
            "translate(4px, 8px) translate(-50%, -50%) scaleX(-1)"
        );

        let walking = FollowerFrame::Walking {
            position: Point::new(4.0, 8.0),
            facing: 1.0,
            tilt_deg: 6.0,
            bounce_px: 2.0,
        };
        assert_eq!(
            walking.transform(),
            "translate(4px, 8px) translate(-50%, -50%) scaleX(1) rotate(6deg) translateY(-2px)"
        );
    }
}
