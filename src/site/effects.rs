use std::time::Duration;

use super::Rect;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -100px 0px";
pub const REVEAL_STAGGER: Duration = Duration::from_millis(150);
pub const REVEAL_SELECTORS: &[&str] = &[".service-card", ".feature-item", ".news-item", ".doctor-info"];
pub const TILT_SELECTORS: &[&str] = &[".service-card", ".feature-item"];

const TILT_DIVISOR: f64 = 10.0;
const PARALLAX_SPEED: f64 = 0.5;

/// One entry from an intersection batch.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry<T> {
    pub target: T,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledReveal<T> {
    pub target: T,
    pub delay: Duration,
}

/// Staggers reveal animations for elements scrolled into view.
#[derive(Debug, Clone, Copy)]
pub struct RevealObserver {
    pub threshold: f64,
    pub root_margin: &'static str,
    pub stagger: Duration,
}

impl Default for RevealObserver {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            root_margin: REVEAL_ROOT_MARGIN,
            stagger: REVEAL_STAGGER,
        }
    }
}

impl RevealObserver {
    /// Delay grows with position among the intersecting entries of this batch.
    pub fn schedule<T>(&self, entries: Vec<IntersectionEntry<T>>) -> Vec<ScheduledReveal<T>> {
        entries
            .into_iter()
            .filter(|e| e.is_intersecting)
            .enumerate()
            .map(|(i, e)| ScheduledReveal {
                target: e.target,
                delay: self.stagger * i as u32,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub translate_z: f64,
}

impl Tilt {
    pub const RESET: Tilt = Tilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
        translate_z: 0.0,
    };

    pub fn css(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg) translateZ({}px)",
            self.rotate_x, self.rotate_y, self.translate_z
        )
    }
}

/// 3-D tilt for a card given the pointer in viewport coordinates.
pub fn tilt_transform(pointer_x: f64, pointer_y: f64, card: Rect) -> Tilt {
    let x = pointer_x - card.left;
    let y = pointer_y - card.top;
    let inside = (0.0..=card.width).contains(&x) && (0.0..=card.height).contains(&y);
    if !inside {
        return Tilt::RESET;
    }

    let center_x = card.width / 2.0;
    let center_y = card.height / 2.0;
    Tilt {
        rotate_x: (y - center_y) / TILT_DIVISOR,
        rotate_y: (center_x - x) / TILT_DIVISOR,
        translate_z: 10.0,
    }
}

/// Hero background drift at half the scroll speed.
pub fn parallax_transform(scroll_y: f64) -> String {
    // `+ 0.0` turns -0.0 into 0.0
    let y = -(scroll_y * PARALLAX_SPEED) + 0.0;
    format!("translate3d(0, {y}px, 0) rotate(-15deg)")
}
