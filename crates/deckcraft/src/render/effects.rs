//! Timing objects for playback visuals. The renderer itself never
//! schedules anything; playback owns these and feeds the results in as
//! plain rects and opacities.

use std::time::Instant;

use eframe::egui;

use crate::deck::{Animation, Transition};

pub const TRANSITION_DURATION: f32 = 0.3;
const ENTRANCE_DURATION: f32 = 0.5;
const APPEAR_DELAY: f32 = 0.15;

pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// An in-flight inter-slide transition. Created when the playback index
/// changes, dropped once complete.
pub struct ActiveTransition {
    pub from: usize,
    pub to: usize,
    pub kind: Transition,
    pub forward: bool,
    start: Instant,
}

impl ActiveTransition {
    pub fn new(from: usize, to: usize, kind: Transition) -> Self {
        Self {
            from,
            to,
            kind,
            forward: to >= from,
            start: Instant::now(),
        }
    }

    pub fn progress(&self) -> f32 {
        ease_in_out(self.start.elapsed().as_secs_f32() / TRANSITION_DURATION)
    }

    pub fn is_complete(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TRANSITION_DURATION
    }
}

/// How an incoming and outgoing slide should be placed for a transition
/// at a given progress. Pure geometry so it is testable without a frame.
pub struct TransitionFrame {
    pub from_rect: egui::Rect,
    pub from_opacity: f32,
    pub to_rect: egui::Rect,
    pub to_opacity: f32,
}

pub fn transition_frame(
    kind: Transition,
    forward: bool,
    progress: f32,
    rect: egui::Rect,
) -> TransitionFrame {
    let t = progress.clamp(0.0, 1.0);
    match kind {
        Transition::None => TransitionFrame {
            from_rect: rect,
            from_opacity: 0.0,
            to_rect: rect,
            to_opacity: 1.0,
        },
        Transition::Fade => TransitionFrame {
            from_rect: rect,
            from_opacity: 1.0 - t,
            to_rect: rect,
            to_opacity: t,
        },
        Transition::Slide => {
            let w = rect.width();
            let sign = if forward { -1.0 } else { 1.0 };
            let from_offset = sign * t * w;
            let to_offset = from_offset - sign * w;
            TransitionFrame {
                from_rect: rect.translate(egui::vec2(from_offset, 0.0)),
                from_opacity: 1.0,
                to_rect: rect.translate(egui::vec2(to_offset, 0.0)),
                to_opacity: 1.0,
            }
        }
        Transition::Zoom => {
            // Incoming slide grows from the center over the outgoing one.
            let scale = 0.6 + 0.4 * t;
            let to_rect = egui::Rect::from_center_size(rect.center(), rect.size() * scale);
            TransitionFrame {
                from_rect: rect,
                from_opacity: 1.0 - t,
                to_rect,
                to_opacity: t,
            }
        }
        Transition::Flip => {
            // Horizontal squash: the outgoing slide collapses to a sliver
            // in the first half, the incoming one expands in the second.
            if t < 0.5 {
                let width = rect.width() * (1.0 - t * 2.0);
                let from_rect =
                    egui::Rect::from_center_size(rect.center(), egui::vec2(width, rect.height()));
                TransitionFrame {
                    from_rect,
                    from_opacity: 1.0,
                    to_rect: rect,
                    to_opacity: 0.0,
                }
            } else {
                let width = rect.width() * ((t - 0.5) * 2.0);
                let to_rect =
                    egui::Rect::from_center_size(rect.center(), egui::vec2(width, rect.height()));
                TransitionFrame {
                    from_rect: rect,
                    from_opacity: 0.0,
                    to_rect,
                    to_opacity: 1.0,
                }
            }
        }
    }
}

/// Entrance placement of slide content, driven by the slide's animation
/// and the time since it became visible.
pub struct EntranceFrame {
    pub opacity: f32,
    pub rect: egui::Rect,
}

pub fn entrance_frame(animation: Animation, elapsed: f32, rect: egui::Rect) -> EntranceFrame {
    let t = ease_in_out(elapsed / ENTRANCE_DURATION);
    match animation {
        Animation::None => EntranceFrame { opacity: 1.0, rect },
        Animation::Fade => EntranceFrame { opacity: t, rect },
        Animation::Appear => EntranceFrame {
            opacity: if elapsed >= APPEAR_DELAY { 1.0 } else { 0.0 },
            rect,
        },
        Animation::Bounce => {
            // Drop in from above with one overshoot.
            let overshoot = (1.0 - t) * (1.0 - t) - 0.12 * (t * std::f32::consts::PI).sin();
            let offset = -rect.height() * 0.15 * overshoot;
            EntranceFrame {
                opacity: t.max(0.2),
                rect: rect.translate(egui::vec2(0.0, offset)),
            }
        }
        Animation::Zoom => {
            let scale = 0.7 + 0.3 * t;
            EntranceFrame {
                opacity: t,
                rect: egui::Rect::from_center_size(rect.center(), rect.size() * scale),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{Rect, pos2};

    fn rect() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(1920.0, 1080.0))
    }

    #[test]
    fn test_ease_clamps() {
        assert_eq!(ease_in_out(-1.0), 0.0);
        assert_eq!(ease_in_out(2.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fade_endpoints() {
        let start = transition_frame(Transition::Fade, true, 0.0, rect());
        assert_eq!(start.from_opacity, 1.0);
        assert_eq!(start.to_opacity, 0.0);
        let end = transition_frame(Transition::Fade, true, 1.0, rect());
        assert_eq!(end.from_opacity, 0.0);
        assert_eq!(end.to_opacity, 1.0);
    }

    #[test]
    fn test_slide_lands_in_place() {
        let end = transition_frame(Transition::Slide, true, 1.0, rect());
        assert_eq!(end.to_rect, rect());
        let backward = transition_frame(Transition::Slide, false, 1.0, rect());
        assert_eq!(backward.to_rect, rect());
    }

    #[test]
    fn test_none_shows_only_incoming() {
        let frame = transition_frame(Transition::None, true, 0.2, rect());
        assert_eq!(frame.from_opacity, 0.0);
        assert_eq!(frame.to_opacity, 1.0);
    }

    #[test]
    fn test_entrance_settles() {
        for animation in Animation::ALL {
            let frame = entrance_frame(animation, 10.0, rect());
            assert_eq!(frame.opacity, 1.0, "{animation:?}");
            assert!((frame.rect.width() - rect().width()).abs() < 0.5);
        }
    }

    #[test]
    fn test_appear_waits_then_shows() {
        let early = entrance_frame(Animation::Appear, 0.0, rect());
        assert_eq!(early.opacity, 0.0);
        let late = entrance_frame(Animation::Appear, 0.2, rect());
        assert_eq!(late.opacity, 1.0);
    }
}
