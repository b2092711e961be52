use std::time::Instant;

use crate::navigation::{Cursor, Direction};

const TRANSITION_DURATION: f32 = 0.45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    SlideHorizontal,
    Fade,
    None,
}

impl TransitionKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "slide" => Some(Self::SlideHorizontal),
            "fade" => Some(Self::Fade),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SlideHorizontal => "slide",
            Self::Fade => "fade",
            Self::None => "none",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::SlideHorizontal => Self::Fade,
            Self::Fade => Self::None,
            Self::None => Self::SlideHorizontal,
        }
    }
}

/// A running animation between two slides. `from` keeps the sub-step the
/// outgoing slide was left at.
#[derive(Debug, Clone, Copy)]
pub struct ActiveTransition {
    pub from: Cursor,
    pub to: usize,
    pub kind: TransitionKind,
    pub direction: Direction,
    start: Instant,
}

impl ActiveTransition {
    pub fn new(from: Cursor, to: usize, kind: TransitionKind, direction: Direction) -> Self {
        Self {
            from,
            to,
            kind,
            direction,
            start: Instant::now(),
        }
    }

    /// Eased progress in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        ease_in_out(self.raw_progress())
    }

    fn raw_progress(&self) -> f32 {
        if self.kind == TransitionKind::None {
            return 1.0;
        }
        (self.start.elapsed().as_secs_f32() / TRANSITION_DURATION).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.raw_progress() >= 1.0
    }
}

/// Cubic ease-in-out.
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
