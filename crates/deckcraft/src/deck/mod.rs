pub mod store;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque slide identity. Assigned at creation, stable for the slide's
/// lifetime, never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideId(u64);

static NEXT_SLIDE_ID: AtomicU64 = AtomicU64::new(1);

impl SlideId {
    fn next() -> Self {
        SlideId(NEXT_SLIDE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Identity of an embedded image payload. Monotonic, so texture caches
/// can key on it without hashing pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(u64);

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// A decoded raster image embedded in a slide. Self-contained RGBA
/// payload, no file-system reference.
#[derive(Debug, Clone)]
pub struct SlideImage {
    pub id: ImageId,
    pub size: [usize; 2],
    pub rgba: Arc<[u8]>,
}

impl SlideImage {
    pub fn new(size: [usize; 2], rgba: Vec<u8>) -> Self {
        Self {
            id: ImageId(NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed)),
            size,
            rgba: rgba.into(),
        }
    }
}

/// Which content regions a slide exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Title,
    Content,
    TwoColumn,
    Image,
    Blank,
}

impl Layout {
    pub const ALL: [Layout; 5] = [
        Layout::Title,
        Layout::Content,
        Layout::TwoColumn,
        Layout::Image,
        Layout::Blank,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Layout::Title => "title",
            Layout::Content => "content",
            Layout::TwoColumn => "two-column",
            Layout::Image => "image",
            Layout::Blank => "blank",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.label() == name)
    }
}

/// Visual theme of a slide. Purely a rendering parameter, never affects
/// which regions exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Template {
    #[default]
    Default,
    Blue,
    Dark,
    Green,
    Orange,
    Purple,
}

impl Template {
    pub const ALL: [Template; 6] = [
        Template::Default,
        Template::Blue,
        Template::Dark,
        Template::Green,
        Template::Orange,
        Template::Purple,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Template::Default => "default",
            Template::Blue => "blue",
            Template::Dark => "dark",
            Template::Green => "green",
            Template::Orange => "orange",
            Template::Purple => "purple",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.label() == name)
    }
}

/// Content-entrance effect applied when a slide becomes visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
    #[default]
    None,
    Fade,
    Appear,
    Bounce,
    Zoom,
}

impl Animation {
    pub const ALL: [Animation; 5] = [
        Animation::None,
        Animation::Fade,
        Animation::Appear,
        Animation::Bounce,
        Animation::Zoom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Animation::None => "none",
            Animation::Fade => "fade",
            Animation::Appear => "appear",
            Animation::Bounce => "bounce",
            Animation::Zoom => "zoom",
        }
    }
}

/// Effect applied when a slide replaces the previous one during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    #[default]
    None,
    Fade,
    Slide,
    Zoom,
    Flip,
}

impl Transition {
    pub const ALL: [Transition; 5] = [
        Transition::None,
        Transition::Fade,
        Transition::Slide,
        Transition::Zoom,
        Transition::Flip,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Transition::None => "none",
            Transition::Fade => "fade",
            Transition::Slide => "slide",
            Transition::Zoom => "zoom",
            Transition::Flip => "flip",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.label() == name)
    }
}

/// One unit of presentation content.
#[derive(Debug, Clone)]
pub struct Slide {
    pub id: SlideId,
    pub title: String,
    pub content: String,
    pub layout: Layout,
    pub image: Option<SlideImage>,
    pub template: Template,
    pub animation: Animation,
    pub transition: Transition,
    /// Speaker notes, editor-only, never rendered in playback output.
    pub notes: String,
}

impl Slide {
    /// A freshly created slide: fresh id, empty text, safe defaults.
    pub fn new(layout: Layout) -> Self {
        Self {
            id: SlideId::next(),
            title: String::new(),
            content: String::new(),
            layout,
            image: None,
            template: Template::default(),
            animation: Animation::default(),
            transition: Transition::default(),
            notes: String::new(),
        }
    }

    /// Clone of this slide's field values under a new id.
    pub fn duplicated(&self) -> Self {
        Self {
            id: SlideId::next(),
            ..self.clone()
        }
    }
}

/// A partial update merged into a single slide. Only the set fields are
/// touched. `image` is doubly optional so a patch can set or clear it.
#[derive(Debug, Clone, Default)]
pub struct SlidePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub layout: Option<Layout>,
    pub image: Option<Option<SlideImage>>,
    pub template: Option<Template>,
    pub animation: Option<Animation>,
    pub transition: Option<Transition>,
    pub notes: Option<String>,
}

impl SlidePatch {
    pub fn apply(self, slide: &mut Slide) {
        if let Some(title) = self.title {
            slide.title = title;
        }
        if let Some(content) = self.content {
            slide.content = content;
        }
        if let Some(layout) = self.layout {
            slide.layout = layout;
        }
        if let Some(image) = self.image {
            slide.image = image;
        }
        if let Some(template) = self.template {
            slide.template = template;
        }
        if let Some(animation) = self.animation {
            slide.animation = animation;
        }
        if let Some(transition) = self.transition {
            slide.transition = transition;
        }
        if let Some(notes) = self.notes {
            slide.notes = notes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slide_defaults() {
        let slide = Slide::new(Layout::Title);
        assert_eq!(slide.layout, Layout::Title);
        assert!(slide.title.is_empty());
        assert!(slide.content.is_empty());
        assert!(slide.notes.is_empty());
        assert!(slide.image.is_none());
        assert_eq!(slide.template, Template::Default);
        assert_eq!(slide.animation, Animation::None);
        assert_eq!(slide.transition, Transition::None);
    }

    #[test]
    fn test_slide_ids_unique() {
        let a = Slide::new(Layout::Title);
        let b = Slide::new(Layout::Title);
        let c = Slide::new(Layout::Content);
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_duplicated_keeps_fields_new_id() {
        let mut original = Slide::new(Layout::TwoColumn);
        original.title = "Quarterly review".to_string();
        original.content = "Numbers go here".to_string();
        original.template = Template::Purple;
        original.animation = Animation::Bounce;
        original.transition = Transition::Flip;
        original.notes = "remember the joke".to_string();

        let copy = original.duplicated();
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.title, original.title);
        assert_eq!(copy.content, original.content);
        assert_eq!(copy.layout, original.layout);
        assert_eq!(copy.template, original.template);
        assert_eq!(copy.animation, original.animation);
        assert_eq!(copy.transition, original.transition);
        assert_eq!(copy.notes, original.notes);
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let mut slide = Slide::new(Layout::Content);
        slide.title = "Keep me".to_string();
        slide.notes = "keep these too".to_string();

        SlidePatch {
            content: Some("New body".to_string()),
            template: Some(Template::Green),
            ..Default::default()
        }
        .apply(&mut slide);

        assert_eq!(slide.title, "Keep me");
        assert_eq!(slide.content, "New body");
        assert_eq!(slide.notes, "keep these too");
        assert_eq!(slide.template, Template::Green);
        assert_eq!(slide.layout, Layout::Content);
    }

    #[test]
    fn test_patch_can_clear_image() {
        let mut slide = Slide::new(Layout::Image);
        slide.image = Some(SlideImage::new([2, 2], vec![0u8; 16]));

        SlidePatch {
            image: Some(None),
            ..Default::default()
        }
        .apply(&mut slide);

        assert!(slide.image.is_none());
    }

    #[test]
    fn test_layout_names_round_trip() {
        for layout in Layout::ALL {
            assert_eq!(Layout::from_name(layout.label()), Some(layout));
        }
        assert_eq!(Layout::from_name("gallery"), None);
    }

    #[test]
    fn test_template_names_round_trip() {
        for template in Template::ALL {
            assert_eq!(Template::from_name(template.label()), Some(template));
        }
        assert_eq!(Template::from_name("light"), None);
    }
}
