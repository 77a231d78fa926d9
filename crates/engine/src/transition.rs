//! Slide transition parameters for drawer levels.
//!
//! Each navigation step swaps the visible level under a transition keyed by
//! depth. The outgoing and incoming levels animate at the same time: the new
//! level enters from one side while the old one exits to the other, both
//! fading. [`SlideDirection`] picks the side.
//!
//! Progress is tracked as an elapsed [`Duration`] so repeated ticks do not
//! accumulate floating-point drift; easing is applied when a value is read.

use std::time::Duration;

use nestdrawer_types::SlideDirection;

/// Duration of the level slide.
pub const SLIDE_DURATION: Duration = Duration::from_millis(300);

/// Duration of the container height animation.
pub const HEIGHT_DURATION: Duration = Duration::from_millis(250);

/// Horizontal distance travelled by entering/exiting levels, as a
/// percentage of the panel width.
pub const SLIDE_OFFSET_PERCENT: f32 = 110.0;

/// Standard ease-out curve used by both slide and height animations.
pub const STANDARD_EASING: CubicBezier = CubicBezier::new(0.4, 0.0, 0.2, 1.0);

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 32;
const EPSILON: f32 = 1e-5;

/// CSS-style cubic Bézier timing function with fixed endpoints (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    /// Control points are `(x1, y1)` and `(x2, y2)`. Both x values must lie
    /// in `[0, 1]` for the curve to be a function of time.
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    pub fn ease(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        let s = self.solve_parameter(t);
        sample(self.y1, self.y2, s)
    }

    /// Finds the curve parameter whose x coordinate equals `x`.
    fn solve_parameter(&self, x: f32) -> f32 {
        let mut s = x;
        for _ in 0..NEWTON_ITERATIONS {
            let error = sample(self.x1, self.x2, s) - x;
            if error.abs() < EPSILON {
                return s;
            }
            let slope = sample_derivative(self.x1, self.x2, s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= error / slope;
        }

        let (mut low, mut high) = (0.0_f32, 1.0_f32);
        s = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = sample(self.x1, self.x2, s);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                low = s;
            } else {
                high = s;
            }
            s = (low + high) / 2.0;
        }
        s
    }
}

fn sample(a1: f32, a2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
}

fn sample_derivative(a1: f32, a2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
}

/// Position and opacity of a level at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideFrame {
    /// Horizontal offset as a percentage of the panel width; positive is to
    /// the right.
    pub offset_percent: f32,
    /// 0.0 is invisible, 1.0 fully opaque.
    pub opacity: f32,
}

impl SlideFrame {
    /// Resting position of the visible level.
    pub const CENTER: SlideFrame = SlideFrame {
        offset_percent: 0.0,
        opacity: 1.0,
    };

    /// Where an entering level starts: off to the right when moving forward.
    pub fn enter(direction: SlideDirection) -> Self {
        Self {
            offset_percent: SLIDE_OFFSET_PERCENT * direction.sign(),
            opacity: 0.0,
        }
    }

    /// Where an exiting level ends: off to the left when moving forward.
    pub fn exit(direction: SlideDirection) -> Self {
        Self {
            offset_percent: -SLIDE_OFFSET_PERCENT * direction.sign(),
            opacity: 0.0,
        }
    }

    pub fn lerp(self, to: SlideFrame, t: f32) -> Self {
        Self {
            offset_percent: self.offset_percent + (to.offset_percent - self.offset_percent) * t,
            opacity: (self.opacity + (to.opacity - self.opacity) * t).clamp(0.0, 1.0),
        }
    }

    /// Offset in whole cells for a panel `width` cells wide.
    pub fn offset_cells(&self, width: u16) -> i32 {
        (f32::from(width) * self.offset_percent / 100.0).round() as i32
    }
}

/// A level swap in progress.
#[derive(Debug, Clone, Copy)]
pub struct PanelTransition {
    direction: SlideDirection,
    from_depth: usize,
    to_depth: usize,
    elapsed: Duration,
    duration: Duration,
    easing: CubicBezier,
}

impl PanelTransition {
    /// Starts a transition from `from_depth` to `to_depth` with the standard
    /// duration and easing.
    pub fn new(direction: SlideDirection, from_depth: usize, to_depth: usize) -> Self {
        Self {
            direction,
            from_depth,
            to_depth,
            elapsed: Duration::ZERO,
            duration: SLIDE_DURATION,
            easing: STANDARD_EASING,
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Linear progress in `[0, 1]`.
    pub fn raw_progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.easing.ease(self.raw_progress())
    }

    /// Frame of the level being navigated to.
    pub fn incoming(&self) -> SlideFrame {
        SlideFrame::enter(self.direction).lerp(SlideFrame::CENTER, self.progress())
    }

    /// Frame of the level being navigated away from.
    pub fn outgoing(&self) -> SlideFrame {
        SlideFrame::CENTER.lerp(SlideFrame::exit(self.direction), self.progress())
    }

    pub fn direction(&self) -> SlideDirection {
        self.direction
    }

    pub fn from_depth(&self) -> usize {
        self.from_depth
    }

    pub fn to_depth(&self) -> usize {
        self.to_depth
    }
}

/// Animates the container height between two row counts.
#[derive(Debug, Clone, Copy)]
pub struct HeightTransition {
    from: u16,
    to: u16,
    elapsed: Duration,
    duration: Duration,
    easing: CubicBezier,
}

impl HeightTransition {
    /// A transition that is already settled at `height`.
    pub fn settled(height: u16) -> Self {
        Self {
            from: height,
            to: height,
            elapsed: HEIGHT_DURATION,
            duration: HEIGHT_DURATION,
            easing: STANDARD_EASING,
        }
    }

    /// Retargets to `height`, starting from the current animated value.
    /// Retargeting to the current target keeps the animation running.
    pub fn retarget(&mut self, height: u16) {
        if height == self.to {
            return;
        }
        self.from = self.current();
        self.to = height;
        self.elapsed = Duration::ZERO;
    }

    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current height in rows.
    pub fn current(&self) -> u16 {
        if self.is_complete() {
            return self.to;
        }
        let t = (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()) as f32;
        let eased = self.easing.ease(t);
        let value = f32::from(self.from) + (f32::from(self.to) - f32::from(self.from)) * eased;
        value.round().clamp(0.0, f32::from(u16::MAX)) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints() {
        assert_eq!(STANDARD_EASING.ease(0.0), 0.0);
        assert_eq!(STANDARD_EASING.ease(1.0), 1.0);
        assert_eq!(STANDARD_EASING.ease(-3.0), 0.0);
        assert_eq!(STANDARD_EASING.ease(7.0), 1.0);
    }

    #[test]
    fn standard_easing_is_monotonic_and_front_loaded() {
        let mut previous = 0.0;
        for step in 1..=100 {
            let value = STANDARD_EASING.ease(step as f32 / 100.0);
            assert!(value + 1e-4 >= previous, "not monotonic at step {step}");
            previous = value;
        }
        let midpoint = STANDARD_EASING.ease(0.5);
        assert!((midpoint - 0.7756).abs() < 0.01, "midpoint was {midpoint}");
    }

    #[test]
    fn linear_bezier_is_identity() {
        let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        for step in 0..=10 {
            let t = step as f32 / 10.0;
            assert!((linear.ease(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn variants_mirror_direction() {
        assert_eq!(SlideFrame::enter(SlideDirection::Forward).offset_percent, 110.0);
        assert_eq!(SlideFrame::exit(SlideDirection::Forward).offset_percent, -110.0);
        assert_eq!(SlideFrame::enter(SlideDirection::Backward).offset_percent, -110.0);
        assert_eq!(SlideFrame::exit(SlideDirection::Backward).offset_percent, 110.0);
        assert_eq!(SlideFrame::enter(SlideDirection::Forward).opacity, 0.0);
        assert_eq!(SlideFrame::CENTER.opacity, 1.0);
    }

    #[test]
    fn transition_moves_from_enter_to_center() {
        let mut transition = PanelTransition::new(SlideDirection::Forward, 0, 1);
        assert_eq!(transition.incoming(), SlideFrame::enter(SlideDirection::Forward));
        assert_eq!(transition.outgoing(), SlideFrame::CENTER);

        transition.tick(Duration::from_millis(150));
        assert!(!transition.is_complete());
        let halfway = transition.incoming();
        assert!(halfway.offset_percent > 0.0 && halfway.offset_percent < 110.0);
        assert!(transition.outgoing().offset_percent < 0.0);

        transition.tick(Duration::from_millis(200));
        assert!(transition.is_complete());
        assert_eq!(transition.incoming(), SlideFrame::CENTER);
        assert_eq!(transition.outgoing(), SlideFrame::exit(SlideDirection::Forward));
    }

    #[test]
    fn offset_cells_scale_with_width() {
        let frame = SlideFrame::enter(SlideDirection::Forward);
        assert_eq!(frame.offset_cells(40), 44);
        assert_eq!(SlideFrame::exit(SlideDirection::Forward).offset_cells(10), -11);
        assert_eq!(SlideFrame::CENTER.offset_cells(80), 0);
    }

    #[test]
    fn height_transition_retargets_from_current_value() {
        let mut height = HeightTransition::settled(4);
        assert_eq!(height.current(), 4);
        height.retarget(10);
        assert_eq!(height.current(), 4);
        height.tick(Duration::from_millis(125));
        let mid = height.current();
        assert!(mid > 4 && mid < 10, "mid was {mid}");
        height.retarget(2);
        assert_eq!(height.current(), mid);
        height.tick(HEIGHT_DURATION);
        assert_eq!(height.current(), 2);
        assert!(height.is_complete());
    }
}
