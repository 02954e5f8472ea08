use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::{Receiver, TryRecvError, bounded};
use eframe::egui;
use log::{info, warn};

use crate::config::Config;
use crate::deck::store::{DeckStore, MoveDirection, Notifier};
use crate::deck::{Animation, Layout, Slide, SlideId, SlideImage, SlidePatch, Template, Transition};
use crate::export;
use crate::input::{self, EditorAction};
use crate::playback::{PlaybackOutcome, PlaybackSession};
use crate::render::images::TextureCache;
use crate::render::{self, RenderMode};
use crate::theme::Theme;

pub struct AppOptions {
    pub fullscreen: bool,
    pub demo: bool,
    pub start_slide: Option<usize>,
}

struct Toast {
    message: String,
    is_error: bool,
    start: Instant,
}

impl Toast {
    fn new(message: String, is_error: bool) -> Self {
        Self {
            message,
            is_error,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let duration = 1.5;
        let fade_start = 1.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < duration {
            1.0 - (elapsed - fade_start) / (duration - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= 1.5
    }
}

/// Single-slot toast surface. Backs the deck layer's notifier so core
/// operations stay testable without a UI mounted.
#[derive(Default)]
struct ToastHost {
    current: Option<Toast>,
}

impl Notifier for ToastHost {
    fn success(&mut self, message: &str) {
        self.current = Some(Toast::new(message.to_string(), false));
    }

    fn error(&mut self, message: &str) {
        self.current = Some(Toast::new(message.to_string(), true));
    }
}

/// An image pick/decode running on a background thread. The target slide
/// is pinned by id at pick time: a late result applies to the slide that
/// was active when the picker opened, wherever it now sits.
struct PendingImage {
    slide: SlideId,
    rx: Receiver<Result<Option<SlideImage>>>,
}

struct PendingExport {
    filename: String,
    region: egui::Rect,
    clear_color: Option<egui::Color32>,
}

enum Mode {
    Editor,
    Playback(PlaybackSession),
}

struct DeckApp {
    store: DeckStore,
    config: Config,
    toasts: ToastHost,
    textures: TextureCache,
    mode: Mode,
    canvas_rect: egui::Rect,
    pending_image: Option<PendingImage>,
    pending_export: Option<PendingExport>,
    restore_windowed: bool,
}

impl DeckApp {
    fn new(config: Config, options: &AppOptions) -> Self {
        let mut store = if options.demo {
            DeckStore::from_slides(demo_deck())
        } else {
            DeckStore::new()
        };
        if let Some(start) = options.start_slide.or_else(|| config.start_slide()) {
            store.select(start.min(store.len() - 1));
        }
        Self {
            store,
            config,
            toasts: ToastHost::default(),
            textures: TextureCache::default(),
            mode: Mode::Editor,
            canvas_rect: egui::Rect::ZERO,
            pending_image: None,
            pending_export: None,
            restore_windowed: !options.fullscreen,
        }
    }

    fn add_slide(&mut self) {
        self.store
            .add_slide(self.config.default_layout(), &mut self.toasts);
        // New slides pick up the configured template and transition.
        self.store.update_active(SlidePatch {
            template: Some(self.config.default_template()),
            transition: Some(self.config.default_transition()),
            ..Default::default()
        });
    }

    fn start_playback(&mut self, ctx: &egui::Context) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
        self.mode = Mode::Playback(PlaybackSession::new(
            self.store.snapshot(),
            self.store.active_index(),
        ));
    }

    fn end_playback(&mut self, ctx: &egui::Context) {
        if self.restore_windowed {
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
        }
        // Dropping the session discards the snapshot and its timers.
        self.mode = Mode::Editor;
    }

    fn apply_editor_action(&mut self, action: EditorAction, ctx: &egui::Context) {
        match action {
            EditorAction::AddSlide => self.add_slide(),
            EditorAction::DeleteSlide => self.store.delete_active(&mut self.toasts),
            EditorAction::PrevSlide => self.store.select_prev(),
            EditorAction::NextSlide => self.store.select_next(),
            EditorAction::StartPlayback => self.start_playback(ctx),
        }
    }

    fn begin_image_insert(&mut self) {
        if self.pending_image.is_some() {
            return;
        }
        let slide = self.store.active_slide().id;
        let (tx, rx) = bounded(1);
        std::thread::spawn(move || {
            let _ = tx.send(pick_and_decode_image());
        });
        self.pending_image = Some(PendingImage { slide, rx });
    }

    fn poll_pending_image(&mut self) {
        let Some(pending) = &self.pending_image else {
            return;
        };
        let result = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                self.pending_image = None;
                self.toasts.error("Could not load image");
                return;
            }
        };
        let slide = pending.slide;
        self.pending_image = None;
        match result {
            Ok(Some(image)) => {
                let patch = SlidePatch {
                    image: Some(Some(image)),
                    ..Default::default()
                };
                if self.store.update_by_id(slide, patch) {
                    self.toasts.success("Image inserted");
                } else {
                    self.toasts.error("Slide was deleted before the image loaded");
                }
            }
            Ok(None) => {} // picker dismissed
            Err(e) => {
                warn!("image load failed: {e:#}");
                self.toasts.error("Could not load image");
            }
        }
    }

    fn request_export(&mut self, ctx: &egui::Context) {
        let theme = Theme::from_template(self.store.active_slide().template);
        self.pending_export = Some(PendingExport {
            filename: export::export_filename(self.store.active_index()),
            region: self.canvas_rect,
            clear_color: (!theme.paints_background()).then_some(theme.background),
        });
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
    }

    fn handle_screenshots(&mut self, ctx: &egui::Context) {
        let mut shots: Vec<std::sync::Arc<egui::ColorImage>> = Vec::new();
        ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Screenshot { image, .. } = event {
                    shots.push(image.clone());
                }
            }
        });
        for image in shots {
            let Some(pending) = self.pending_export.take() else {
                continue;
            };
            let path = export_dir().join(&pending.filename);
            match export::save_region(
                &image,
                pending.region,
                ctx.pixels_per_point(),
                pending.clear_color,
                &path,
            ) {
                Ok(()) => {
                    self.toasts
                        .success(&format!("Exported {}", pending.filename));
                }
                Err(e) => {
                    warn!("export failed: {e:#}");
                    self.toasts.error("Export failed");
                }
            }
        }
    }

    fn prune_textures(&mut self) {
        let live: HashSet<_> = self
            .store
            .slides()
            .iter()
            .filter_map(|s| s.image.as_ref().map(|i| i.id))
            .collect();
        self.textures.retain_live(|id| live.contains(&id));
    }

    fn toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                if ui.button("Add").clicked() {
                    self.add_slide();
                }
                if ui.button("Duplicate").clicked() {
                    self.store.duplicate_active(&mut self.toasts);
                }
                if ui.button("Delete").clicked() {
                    self.store.delete_active(&mut self.toasts);
                }
                if ui.button("▲").on_hover_text("Move slide up").clicked() {
                    self.store.move_active(MoveDirection::Up, &mut self.toasts);
                }
                if ui.button("▼").on_hover_text("Move slide down").clicked() {
                    self.store.move_active(MoveDirection::Down, &mut self.toasts);
                }

                ui.separator();

                let slide = self.store.active_slide();
                let (orig_layout, orig_template, orig_animation, orig_transition) =
                    (slide.layout, slide.template, slide.animation, slide.transition);
                let mut layout = orig_layout;
                let mut template = orig_template;
                let mut animation = orig_animation;
                let mut transition = orig_transition;

                egui::ComboBox::from_label("Layout")
                    .selected_text(layout.label())
                    .show_ui(ui, |ui| {
                        for option in Layout::ALL {
                            ui.selectable_value(&mut layout, option, option.label());
                        }
                    });
                egui::ComboBox::from_label("Theme")
                    .selected_text(template.label())
                    .show_ui(ui, |ui| {
                        for option in Template::ALL {
                            ui.selectable_value(&mut template, option, option.label());
                        }
                    });
                egui::ComboBox::from_label("Animation")
                    .selected_text(animation.label())
                    .show_ui(ui, |ui| {
                        for option in Animation::ALL {
                            ui.selectable_value(&mut animation, option, option.label());
                        }
                    });
                egui::ComboBox::from_label("Transition")
                    .selected_text(transition.label())
                    .show_ui(ui, |ui| {
                        for option in Transition::ALL {
                            ui.selectable_value(&mut transition, option, option.label());
                        }
                    });

                if layout != orig_layout {
                    self.store.update_active(SlidePatch {
                        layout: Some(layout),
                        ..Default::default()
                    });
                    self.toasts
                        .success(&format!("Layout changed to {}", layout.label()));
                }
                if template != orig_template {
                    self.store.update_active(SlidePatch {
                        template: Some(template),
                        ..Default::default()
                    });
                    self.toasts
                        .success(&format!("Theme changed to {}", template.label()));
                }
                if animation != orig_animation {
                    self.store.update_active(SlidePatch {
                        animation: Some(animation),
                        ..Default::default()
                    });
                    self.toasts
                        .success(&format!("Animation set to {}", animation.label()));
                }
                if transition != orig_transition {
                    self.store.update_active(SlidePatch {
                        transition: Some(transition),
                        ..Default::default()
                    });
                    self.toasts
                        .success(&format!("Transition set to {}", transition.label()));
                }

                ui.separator();

                if ui.button("Insert Image…").clicked() {
                    self.begin_image_insert();
                }
                if self.store.active_slide().image.is_some()
                    && ui.button("Remove Image").clicked()
                {
                    self.store.update_active(SlidePatch {
                        image: Some(None),
                        ..Default::default()
                    });
                    self.toasts.success("Image removed");
                }
                if ui.button("Export PNG").clicked() {
                    self.request_export(ctx);
                }

                ui.separator();

                if ui.button("▶ Slideshow").on_hover_text("F5").clicked() {
                    self.start_playback(ctx);
                }
            });
        });
    }

    fn slide_list(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("slides")
            .default_width(200.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.strong(format!("Slides ({})", self.store.len()));
                ui.separator();
                let mut clicked = None;
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let active = self.store.active_index();
                    for (i, slide) in self.store.slides().iter().enumerate() {
                        let name = slide.title.lines().next().unwrap_or("");
                        let label = if name.is_empty() {
                            format!("{}. ({})", i + 1, slide.layout.label())
                        } else {
                            format!("{}. {}", i + 1, name)
                        };
                        if ui.selectable_label(i == active, label).clicked() {
                            clicked = Some(i);
                        }
                    }
                });
                if let Some(i) = clicked {
                    self.store.select(i);
                }
            });
    }

    fn notes_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("notes")
            .resizable(true)
            .default_height(80.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.label("Speaker notes");
                let mut notes = self.store.active_slide().notes.clone();
                let response = ui.add_sized(
                    [ui.available_width(), ui.available_height() - 4.0],
                    egui::TextEdit::multiline(&mut notes)
                        .id_salt(("notes", self.store.active_slide().id))
                        .hint_text("Notes are visible only in the editor"),
                );
                if response.changed() {
                    self.store.update_active(SlidePatch {
                        notes: Some(notes),
                        ..Default::default()
                    });
                }
            });
    }

    fn canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_rect_before_wrap();

            // Largest 16:9 canvas that fits, centered.
            let scale_fit = (avail.width() / 1920.0).min(avail.height() / 1080.0);
            let size = egui::vec2(1920.0, 1080.0) * scale_fit;
            let rect = egui::Rect::from_center_size(avail.center(), size);
            self.canvas_rect = rect;

            let theme = Theme::from_template(self.store.active_slide().template);
            // The editor always paints the stage so the default template
            // still reads as a white slide; export maps that back out.
            ui.painter().rect_filled(rect, 0.0, theme.background);
            ui.painter().rect_stroke(
                rect,
                0.0,
                egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
                egui::StrokeKind::Outside,
            );

            let slide = self.store.active_slide().clone();
            let edits = render::render_slide(
                ui,
                &slide,
                &theme,
                rect,
                RenderMode::Editor,
                &mut self.textures,
                1.0,
                scale_fit,
            );
            if edits.title.is_some() || edits.content.is_some() {
                self.store.update_active(SlidePatch {
                    title: edits.title,
                    content: edits.content,
                    ..Default::default()
                });
            }
        });
    }

    fn draw_toast(&mut self, ctx: &egui::Context) {
        if self.toasts.current.as_ref().is_some_and(|t| t.is_expired()) {
            self.toasts.current = None;
        }
        let Some(toast) = &self.toasts.current else {
            return;
        };
        let opacity = toast.opacity();
        if opacity <= 0.0 {
            return;
        }
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("toast"),
        ));
        let screen = ctx.screen_rect();
        let text_color = if toast.is_error {
            Theme::with_opacity(egui::Color32::from_rgb(0xFF, 0x8A, 0x8A), opacity)
        } else {
            Theme::with_opacity(egui::Color32::WHITE, opacity)
        };
        let bg = Theme::with_opacity(egui::Color32::from_rgb(0x20, 0x20, 0x24), opacity * 0.9);
        let galley = painter.layout_no_wrap(
            toast.message.clone(),
            egui::FontId::proportional(16.0),
            text_color,
        );
        let padding = egui::vec2(14.0, 10.0);
        let toast_rect = egui::Rect::from_min_size(
            egui::pos2(
                screen.center().x - galley.rect.width() / 2.0 - padding.x,
                screen.bottom() - 64.0,
            ),
            galley.rect.size() + padding * 2.0,
        );
        painter.rect_filled(toast_rect, 8.0, bg);
        painter.galley(toast_rect.min + padding, galley, text_color);
        ctx.request_repaint();
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_pending_image();
        if self.pending_image.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
        self.handle_screenshots(ctx);

        match &mut self.mode {
            Mode::Playback(session) => {
                if let PlaybackOutcome::Exit = session.show(ctx, &mut self.textures) {
                    self.end_playback(ctx);
                }
                return;
            }
            Mode::Editor => {}
        }

        // Editor shortcuts only while no text field wants the keyboard.
        if !ctx.wants_keyboard_input() {
            let mut actions: Vec<EditorAction> = Vec::new();
            ctx.input(|i| {
                for event in &i.events {
                    if let egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } = event
                    {
                        if let Some(action) = input::editor_action(*key, *modifiers) {
                            actions.push(action);
                        }
                    }
                }
            });
            for action in actions {
                self.apply_editor_action(action, ctx);
            }
        }

        self.toolbar(ctx);
        self.slide_list(ctx);
        self.notes_panel(ctx);
        self.canvas(ctx);
        self.draw_toast(ctx);
        self.prune_textures();
    }
}

fn pick_and_decode_image() -> Result<Option<SlideImage>> {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
        .pick_file()
    else {
        return Ok(None);
    };
    let bytes = std::fs::read(&path)?;
    let decoded = image::load_from_memory(&bytes)?.into_rgba8();
    let (w, h) = decoded.dimensions();
    info!("loaded image {} ({w}x{h})", path.display());
    Ok(Some(SlideImage::new(
        [w as usize, h as usize],
        decoded.into_raw(),
    )))
}

fn export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Sample deck for `--demo`: one slide per layout, mixed templates.
fn demo_deck() -> Vec<Slide> {
    let mut slides = Vec::new();

    let mut title = Slide::new(Layout::Title);
    title.title = "DeckCraft".to_string();
    title.content = "A small deck to poke around in".to_string();
    title.template = Template::Blue;
    title.animation = Animation::Fade;
    slides.push(title);

    let mut content = Slide::new(Layout::Content);
    content.title = "Content slide".to_string();
    content.content =
        "Body text lives here.\n\nPick a layout, template, animation and transition \
         from the toolbar, then press F5 to present."
            .to_string();
    content.transition = Transition::Slide;
    slides.push(content);

    let mut columns = Slide::new(Layout::TwoColumn);
    columns.title = "Two columns".to_string();
    columns.content = "Text on the left.\n\nInsert an image to fill the right side.".to_string();
    columns.template = Template::Green;
    columns.transition = Transition::Fade;
    slides.push(columns);

    let mut image = Slide::new(Layout::Image);
    image.template = Template::Dark;
    image.transition = Transition::Zoom;
    slides.push(image);

    let mut blank = Slide::new(Layout::Blank);
    blank.title = "The end".to_string();
    blank.content = "Escape exits the slideshow".to_string();
    blank.template = Template::Purple;
    blank.animation = Animation::Zoom;
    blank.transition = Transition::Flip;
    slides.push(blank);

    slides
}

pub fn run(options: AppOptions) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    info!("starting editor (demo: {})", options.demo);

    let viewport = if options.fullscreen {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title("DeckCraft")
    } else {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("DeckCraft")
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "DeckCraft",
        native_options,
        Box::new(move |_cc| Ok(Box::new(DeckApp::new(config, &options)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
