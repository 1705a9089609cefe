//! Transient on-screen markers.
//!
//! Exclamation marks, "heard" marks and speech bubbles are plain data owned by
//! the actor they belong to. An [`Indicator`] knows where it sits relative to
//! its anchor rectangle, when it was shown and, optionally, how long it stays
//! up. The renderer draws visible indicators and clears `dirty`.
//!
//! Indicator rectangles stay in logical units and a resize leaves them alone.
//! A renderer maps them with
//! [`ScreenScale::to_display`](crate::resources::screenscale::ScreenScale::to_display),
//! the factor `Visual::screen_rect` is derived with. The call circle and the
//! life indicators are drawn the same way.

use glam::Vec2;

use crate::geometry::Rect;

/// Where an indicator is placed relative to its anchor rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Bottom-left of the indicator at the anchor's top-right corner.
    TopRight,
    /// Bottom-center of the indicator at the anchor's mid-top point.
    MidTop,
    /// Bottom-right of the indicator at the anchor's top-left corner.
    TopLeft,
}

/// A marker placed against its owner's logical rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    pub visible: bool,
    /// World time (ms) the indicator was last shown.
    pub shown_at: f32,
    /// Auto-hide delay in ms; `None` stays until hidden explicitly.
    pub duration_ms: Option<f32>,
    pub anchor: Anchor,
    pub rect: Rect,
    /// Optional label (a species name inside a bubble).
    pub text: Option<String>,
    pub dirty: bool,
}

impl Indicator {
    pub fn new(size: Vec2, anchor: Anchor, duration_ms: Option<f32>) -> Self {
        Self {
            visible: false,
            shown_at: 0.0,
            duration_ms,
            anchor,
            rect: Rect::from_pos_size(Vec2::ZERO, size),
            text: None,
            dirty: false,
        }
    }

    /// Show the indicator next to `owner` and stamp it with `now`.
    pub fn show(&mut self, now: f32, owner: &Rect) {
        self.visible = true;
        self.shown_at = now;
        self.follow(owner);
        self.dirty = true;
    }

    pub fn show_with_text(&mut self, now: f32, owner: &Rect, text: impl Into<String>) {
        self.text = Some(text.into());
        self.show(now, owner);
    }

    pub fn hide(&mut self) {
        if self.visible {
            self.visible = false;
            self.dirty = true;
        }
    }

    /// Hide once the duration has elapsed. Returns true if it was hidden now.
    pub fn expire(&mut self, now: f32) -> bool {
        match self.duration_ms {
            Some(duration) if self.visible && now - self.shown_at >= duration => {
                self.hide();
                true
            }
            _ => false,
        }
    }

    /// Re-place the indicator against a (possibly moved) owner rectangle.
    pub fn follow(&mut self, owner: &Rect) {
        let placed = match self.anchor {
            Anchor::TopRight => self
                .rect
                .with_pos(Vec2::new(owner.right(), owner.top() - self.rect.h)),
            Anchor::MidTop => self.rect.with_mid_bottom(owner.mid_top()),
            Anchor::TopLeft => self.rect.with_pos(Vec2::new(
                owner.left() - self.rect.w,
                owner.top() - self.rect.h,
            )),
        };
        if placed != self.rect {
            self.rect = placed;
            if self.visible {
                self.dirty = true;
            }
        }
    }
}
