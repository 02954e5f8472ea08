//! Full-screen slideshow playback. Owns an immutable snapshot of the
//! deck; nothing that happens here ever writes back into the editor's
//! store.

use std::time::{Duration, Instant};

use eframe::egui::{self, Align2, FontId, Sense};
use log::debug;

use crate::deck::Slide;
use crate::input::{self, PlaybackAction};
use crate::render::effects::{self, ActiveTransition};
use crate::render::images::TextureCache;
use crate::render::{self, RenderMode};
use crate::theme::Theme;

pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(3000);
pub const CONTROLS_HIDE_AFTER: Duration = Duration::from_millis(3000);

/// The playback state machine: a snapshot, a cursor, and the autoplay
/// flag. Pure; all timing lives in [`PlaybackSession`].
pub struct PlaybackState {
    slides: Vec<Slide>,
    current: usize,
    autoplay: bool,
}

impl PlaybackState {
    pub fn new(snapshot: Vec<Slide>, start: usize) -> Self {
        debug_assert!(!snapshot.is_empty());
        let last = snapshot.len().saturating_sub(1);
        Self {
            current: start.min(last),
            slides: snapshot,
            autoplay: false,
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.current]
    }

    pub fn last_index(&self) -> usize {
        self.slides.len() - 1
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay
    }

    /// Advance one slide. At the last slide this stops autoplay instead
    /// of wrapping. Returns whether the index changed.
    pub fn next(&mut self) -> bool {
        if self.current < self.last_index() {
            self.current += 1;
            true
        } else {
            if self.autoplay {
                self.autoplay = false;
            }
            false
        }
    }

    /// Go back one slide; absorbed at the first slide.
    pub fn prev(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Move directly to a valid index.
    pub fn jump(&mut self, index: usize) -> bool {
        if index <= self.last_index() && index != self.current {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn toggle_autoplay(&mut self) {
        self.autoplay = !self.autoplay;
    }
}

pub enum PlaybackOutcome {
    Continue,
    Exit,
}

/// One open slideshow: the state machine plus its timers and the
/// in-flight transition. Dropped wholesale on exit, so no timer can
/// outlive the session.
pub struct PlaybackSession {
    state: PlaybackState,
    transition: Option<ActiveTransition>,
    last_advance: Instant,
    shown_at: Instant,
    last_pointer_move: Instant,
    last_pointer_pos: Option<egui::Pos2>,
}

impl PlaybackSession {
    pub fn new(snapshot: Vec<Slide>, start: usize) -> Self {
        let now = Instant::now();
        debug!("playback started at slide {start} of {}", snapshot.len());
        Self {
            state: PlaybackState::new(snapshot, start),
            transition: None,
            last_advance: now,
            shown_at: now,
            last_pointer_move: now,
            last_pointer_pos: None,
        }
    }

    fn apply(&mut self, action: PlaybackAction) -> PlaybackOutcome {
        let old = self.state.current();
        let changed = match action {
            PlaybackAction::Next => self.state.next(),
            PlaybackAction::Prev => self.state.prev(),
            PlaybackAction::JumpFirst => self.state.jump(0),
            PlaybackAction::JumpLast => self.state.jump(self.state.last_index()),
            PlaybackAction::ToggleAutoplay => {
                self.state.toggle_autoplay();
                if self.state.is_autoplaying() {
                    self.last_advance = Instant::now();
                }
                false
            }
            PlaybackAction::Exit => return PlaybackOutcome::Exit,
        };
        if changed {
            self.index_changed(old);
        }
        PlaybackOutcome::Continue
    }

    fn index_changed(&mut self, old: usize) {
        let now = Instant::now();
        // Any index change resets the autoplay clock, so manual
        // navigation never causes a double-advance.
        self.last_advance = now;
        self.shown_at = now;
        let kind = self.state.current_slide().transition;
        self.transition = Some(ActiveTransition::new(old, self.state.current(), kind));
    }

    fn jump_to(&mut self, index: usize) {
        let old = self.state.current();
        if self.state.jump(index) {
            self.index_changed(old);
        }
    }

    /// Run one frame of playback: input, autoplay timing, drawing.
    pub fn show(&mut self, ctx: &egui::Context, textures: &mut TextureCache) -> PlaybackOutcome {
        let mut actions: Vec<PlaybackAction> = Vec::new();
        ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Key { key, pressed: true, .. } = event {
                    if let Some(action) = input::playback_action(*key) {
                        actions.push(action);
                    }
                }
            }
            // Pointer movement only affects chrome visibility, never
            // whether keys work.
            let pos = i.pointer.hover_pos();
            let moved = match (pos, self.last_pointer_pos) {
                (Some(cur), Some(prev)) => cur.distance(prev) > 1.0,
                (Some(_), None) => true,
                _ => false,
            };
            if moved {
                self.last_pointer_move = Instant::now();
            }
            self.last_pointer_pos = pos;
        });

        for action in actions {
            if let PlaybackOutcome::Exit = self.apply(action) {
                return PlaybackOutcome::Exit;
            }
        }

        // Autoplay tick.
        if self.state.is_autoplaying() && self.last_advance.elapsed() >= AUTOPLAY_INTERVAL {
            let old = self.state.current();
            if self.state.next() {
                self.index_changed(old);
            } else {
                // Auto-stopped at the deck end.
                debug!("autoplay stopped at last slide");
            }
            self.last_advance = Instant::now();
        }

        let mut outcome = PlaybackOutcome::Continue;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let scale = (rect.width() / 1920.0).min(rect.height() / 1080.0);

                // Click anywhere on the slide area advances. Registered
                // before the chrome so the controls stay on top.
                let background = ui.allocate_rect(rect, Sense::click());

                self.draw_slides(ui, rect, textures, scale);

                let controls_visible = self.last_pointer_move.elapsed() < CONTROLS_HIDE_AFTER;
                if controls_visible {
                    if let PlaybackOutcome::Exit = self.draw_controls(ui, rect, scale) {
                        outcome = PlaybackOutcome::Exit;
                        return;
                    }
                }

                if background.clicked() {
                    let old = self.state.current();
                    if self.state.next() {
                        self.index_changed(old);
                    }
                }

                if self.state.is_autoplaying() {
                    let remaining =
                        AUTOPLAY_INTERVAL.saturating_sub(self.last_advance.elapsed());
                    ui.ctx().request_repaint_after(remaining.min(Duration::from_millis(100)));
                }
                if controls_visible {
                    ui.ctx().request_repaint_after(Duration::from_millis(250));
                }
            });

        outcome
    }

    fn draw_slides(
        &mut self,
        ui: &mut egui::Ui,
        rect: egui::Rect,
        textures: &mut TextureCache,
        scale: f32,
    ) {
        if let Some(t) = &self.transition {
            if t.is_complete() {
                self.transition = None;
            }
        }

        match &self.transition {
            Some(t) => {
                let frame = effects::transition_frame(t.kind, t.forward, t.progress(), rect);
                let from = &self.state.slides()[t.from];
                let to = &self.state.slides()[t.to];
                self.draw_one(ui, from, frame.from_rect, frame.from_opacity, textures, scale);
                self.draw_one(ui, to, frame.to_rect, frame.to_opacity, textures, scale);
                ui.ctx().request_repaint();
            }
            None => {
                let slide = self.state.current_slide();
                let elapsed = self.shown_at.elapsed().as_secs_f32();
                let entrance = effects::entrance_frame(slide.animation, elapsed, rect);
                // The background stays put; only the content animates in.
                let theme = Theme::from_template(slide.template);
                ui.painter().rect_filled(rect, 0.0, theme.background);
                self.draw_one(ui, slide, entrance.rect, entrance.opacity, textures, scale);
                if elapsed < 1.0 {
                    ui.ctx().request_repaint();
                }
            }
        }
    }

    fn draw_one(
        &self,
        ui: &mut egui::Ui,
        slide: &Slide,
        rect: egui::Rect,
        opacity: f32,
        textures: &mut TextureCache,
        scale: f32,
    ) {
        if opacity <= 0.0 || rect.width() < 1.0 {
            return;
        }
        let theme = Theme::from_template(slide.template);
        if !theme.paints_background() {
            // The default template skips its background when exporting;
            // playback still needs an opaque stage.
            ui.painter()
                .rect_filled(rect, 0.0, Theme::with_opacity(theme.background, opacity));
        }
        render::render_slide(
            ui,
            slide,
            &theme,
            rect,
            RenderMode::Playback,
            textures,
            opacity,
            scale,
        );
    }

    fn draw_controls(
        &mut self,
        ui: &mut egui::Ui,
        rect: egui::Rect,
        scale: f32,
    ) -> PlaybackOutcome {
        let button_size = egui::vec2(44.0, 44.0) * scale.max(0.6);
        let margin = 24.0 * scale;

        // Exit, top-right.
        let exit_rect = egui::Rect::from_min_size(
            egui::pos2(rect.right() - margin - button_size.x, rect.top() + margin),
            button_size,
        );
        if ui.put(exit_rect, egui::Button::new("✕")).clicked() {
            return PlaybackOutcome::Exit;
        }

        // Prev / next arrows at mid height.
        let prev_rect = egui::Rect::from_center_size(
            egui::pos2(rect.left() + margin + button_size.x / 2.0, rect.center().y),
            button_size,
        );
        if ui.put(prev_rect, egui::Button::new("◀")).clicked() {
            let _ = self.apply(PlaybackAction::Prev);
        }
        let next_rect = egui::Rect::from_center_size(
            egui::pos2(rect.right() - margin - button_size.x / 2.0, rect.center().y),
            button_size,
        );
        if ui.put(next_rect, egui::Button::new("▶")).clicked() {
            let _ = self.apply(PlaybackAction::Next);
        }

        // Play/pause toggle, bottom center.
        let play_label = if self.state.is_autoplaying() { "⏸" } else { "▶" };
        let play_rect = egui::Rect::from_center_size(
            egui::pos2(rect.center().x, rect.bottom() - margin - button_size.y / 2.0),
            button_size,
        );
        if ui.put(play_rect, egui::Button::new(play_label)).clicked() {
            let _ = self.apply(PlaybackAction::ToggleAutoplay);
        }

        // Dot indicator above the play toggle, one dot per slide.
        let dot_r = 6.0 * scale.max(0.6);
        let dot_gap = 20.0 * scale.max(0.6);
        let count = self.state.slides().len();
        let total_width = dot_gap * (count.saturating_sub(1)) as f32;
        let dots_y = play_rect.top() - 24.0 * scale.max(0.6);
        for i in 0..count {
            let center = egui::pos2(
                rect.center().x - total_width / 2.0 + i as f32 * dot_gap,
                dots_y,
            );
            let dot_rect = egui::Rect::from_center_size(center, egui::vec2(dot_r, dot_r) * 3.0);
            let response = ui.allocate_rect(dot_rect, Sense::click());
            let color = if i == self.state.current() {
                egui::Color32::WHITE
            } else {
                egui::Color32::from_white_alpha(90)
            };
            ui.painter().circle_filled(center, dot_r, color);
            if response.hovered() {
                ui.painter().circle_stroke(
                    center,
                    dot_r + 2.0,
                    egui::Stroke::new(1.0, egui::Color32::WHITE),
                );
            }
            if response.clicked() {
                self.jump_to(i);
            }
        }

        // Position counter, bottom right.
        let counter = format!("{} / {}", self.state.current() + 1, count);
        ui.painter().text(
            egui::pos2(rect.right() - margin, rect.bottom() - margin),
            Align2::RIGHT_BOTTOM,
            counter,
            FontId::monospace(14.0 * scale.max(0.6)),
            egui::Color32::from_white_alpha(160),
        );

        PlaybackOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Layout, Slide};

    fn snapshot(n: usize) -> Vec<Slide> {
        (0..n).map(|_| Slide::new(Layout::Content)).collect()
    }

    #[test]
    fn test_starts_at_given_index_autoplay_off() {
        let state = PlaybackState::new(snapshot(3), 1);
        assert_eq!(state.current(), 1);
        assert!(!state.is_autoplaying());
    }

    #[test]
    fn test_start_index_clamped() {
        let state = PlaybackState::new(snapshot(3), 99);
        assert_eq!(state.current(), 2);
    }

    #[test]
    fn test_next_prev_walk() {
        let mut state = PlaybackState::new(snapshot(3), 0);
        assert!(state.next());
        assert!(state.next());
        assert_eq!(state.current(), 2);
        assert!(state.prev());
        assert_eq!(state.current(), 1);
    }

    #[test]
    fn test_next_at_end_is_noop_without_autoplay() {
        // [A, B, C] starting at 1: Right, Right, Left lands back on 1
        // because the second Right hits the deck end.
        let mut state = PlaybackState::new(snapshot(3), 1);
        assert!(state.next());
        assert!(!state.next());
        assert_eq!(state.current(), 2);
        assert!(state.prev());
        assert_eq!(state.current(), 1);
    }

    #[test]
    fn test_prev_at_start_is_noop() {
        let mut state = PlaybackState::new(snapshot(3), 0);
        assert!(!state.prev());
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn test_autoplay_stops_at_deck_end() {
        let mut state = PlaybackState::new(snapshot(3), 2);
        state.toggle_autoplay();
        assert!(state.is_autoplaying());
        // One tick at the last slide: no index change, autoplay off.
        assert!(!state.next());
        assert_eq!(state.current(), 2);
        assert!(!state.is_autoplaying());
    }

    #[test]
    fn test_toggle_autoplay_keeps_index() {
        let mut state = PlaybackState::new(snapshot(3), 1);
        state.toggle_autoplay();
        assert_eq!(state.current(), 1);
        state.toggle_autoplay();
        assert!(!state.is_autoplaying());
        assert_eq!(state.current(), 1);
    }

    #[test]
    fn test_jump_any_valid_index() {
        let mut state = PlaybackState::new(snapshot(5), 0);
        assert!(state.jump(4));
        assert_eq!(state.current(), 4);
        assert!(state.jump(0));
        assert_eq!(state.current(), 0);
        assert!(!state.jump(5));
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn test_jump_available_during_autoplay() {
        let mut state = PlaybackState::new(snapshot(4), 0);
        state.toggle_autoplay();
        assert!(state.jump(2));
        assert!(state.is_autoplaying());
    }

    #[test]
    fn test_session_actions_drive_state() {
        let mut session = PlaybackSession::new(snapshot(3), 0);
        assert!(matches!(
            session.apply(PlaybackAction::Next),
            PlaybackOutcome::Continue
        ));
        assert_eq!(session.state.current(), 1);
        assert!(session.transition.is_some());
        assert!(matches!(
            session.apply(PlaybackAction::Exit),
            PlaybackOutcome::Exit
        ));
        assert_eq!(session.state.current(), 1);
    }

    #[test]
    fn test_session_enabling_autoplay_resets_clock() {
        let mut session = PlaybackSession::new(snapshot(3), 0);
        let before = session.last_advance;
        std::thread::sleep(std::time::Duration::from_millis(5));
        let _ = session.apply(PlaybackAction::ToggleAutoplay);
        assert!(session.state.is_autoplaying());
        assert!(session.last_advance > before);
    }

    #[test]
    fn test_snapshot_is_private_copy() {
        let slides = snapshot(3);
        let ids: Vec<_> = slides.iter().map(|s| s.id).collect();
        let state = PlaybackState::new(slides, 0);
        let state_ids: Vec<_> = state.slides().iter().map(|s| s.id).collect();
        assert_eq!(state_ids, ids);
    }
}
