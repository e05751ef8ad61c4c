//! Marquee scroll state machine for overflowing now-playing text.
//!
//! Animates text wider than its viewport in a transit-announcement style:
//! the content scrolls left until it has fully exited, stays blank for a
//! fixed interval, then re-enters from the right edge of the viewport.
//! Text that fits is centered and never scrolls.

use crate::config::MarqueeSettings;

/// Re-entry parks just right of the viewport edge so the first visible
/// frame after a blank pause cannot flash content at the exact boundary.
const RESPAWN_EPSILON: f32 = 0.5;

/// Horizontal span of the clipping region, in the renderer's linear units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub width: f32,
}

impl Viewport {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarqueePhase {
    /// Not animating; fitting text sits centered.
    Idle,
    /// Moving left at constant speed.
    Scrolling,
    /// Fully off-screen, waiting out the blank interval before re-entry.
    BlankPause,
}

/// Owns all animation state. Mutated only by `tick`, `restart`, `stop` and
/// the geometry setters; the renderer reads `offset_x` and never writes.
pub struct MarqueeEngine {
    phase: MarqueePhase,
    offset_x: f32,
    pause_remaining: f32,
    viewport: Viewport,
    content_width: f32,
    speed: f32,
    blank: f32,
}

impl MarqueeEngine {
    pub fn new(settings: &MarqueeSettings) -> Self {
        Self {
            phase: MarqueePhase::Idle,
            offset_x: 0.0,
            pause_remaining: 0.0,
            viewport: Viewport {
                left: 0.0,
                width: 0.0,
            },
            content_width: 0.0,
            speed: settings.speed,
            blank: settings.blank_ms as f32 / 1000.0,
        }
    }

    pub fn phase(&self) -> MarqueePhase {
        self.phase
    }

    /// Absolute x position of the content's left edge.
    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether the fast animation tick needs to run at all.
    pub fn is_active(&self) -> bool {
        self.phase != MarqueePhase::Idle
    }

    fn fits(&self) -> bool {
        self.content_width <= self.viewport.width
    }

    /// Report new viewport geometry. The current offset shifts by exactly
    /// the geometry delta so an in-flight scroll keeps its position relative
    /// to the viewport instead of jumping when the layout reflows.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        let dx = viewport.left - self.viewport.left;
        self.viewport = viewport;
        if self.phase == MarqueePhase::Idle {
            self.rest_position();
        } else {
            self.offset_x += dx;
            if self.fits() {
                self.stop();
            }
        }
    }

    /// Report the measured width of the current text.
    pub fn set_content_width(&mut self, width: f32) {
        self.content_width = width;
        if self.phase == MarqueePhase::Idle {
            self.rest_position();
        } else if self.fits() {
            self.stop();
        }
    }

    /// Begin (or re-begin) a transit from the viewport's left edge.
    ///
    /// A non-forced restart while already scrolling is a no-op, so layout
    /// events that re-run the restart decision do not visually reset an
    /// in-flight scroll. Content that fits drops to `Idle` instead.
    pub fn restart(&mut self, force: bool) {
        if self.fits() {
            self.stop();
            return;
        }
        if self.phase == MarqueePhase::Scrolling && !force {
            return;
        }
        self.offset_x = self.viewport.left;
        self.pause_remaining = 0.0;
        self.phase = MarqueePhase::Scrolling;
    }

    /// Unconditionally stop animating and cancel any pending blank-pause
    /// deadline, so a stale tick cannot resurrect the animation.
    pub fn stop(&mut self) {
        self.phase = MarqueePhase::Idle;
        self.pause_remaining = 0.0;
        self.rest_position();
    }

    /// Advance the animation by `dt` seconds. Speed is dt-scaled, so frame
    /// rate variance changes smoothness, not transit duration.
    pub fn tick(&mut self, dt: f32) {
        match self.phase {
            MarqueePhase::Idle => {}
            MarqueePhase::Scrolling => {
                self.offset_x -= self.speed * dt;
                if self.offset_x + self.content_width < self.viewport.left {
                    // Trailing edge fully out: park right of the viewport
                    // and wait out the blank interval.
                    self.offset_x = self.viewport.right() + RESPAWN_EPSILON;
                    self.pause_remaining = self.blank;
                    self.phase = MarqueePhase::BlankPause;
                }
            }
            MarqueePhase::BlankPause => {
                self.pause_remaining -= dt;
                if self.pause_remaining <= 0.0 {
                    self.pause_remaining = 0.0;
                    self.phase = MarqueePhase::Scrolling;
                }
            }
        }
    }

    /// Static resting x: fitting text centered, overflowing text left-aligned.
    fn rest_position(&mut self) {
        if self.fits() {
            self.offset_x = self.viewport.left + (self.viewport.width - self.content_width) / 2.0;
        } else {
            self.offset_x = self.viewport.left;
        }
    }
}

#[cfg(test)]
mod tests;
