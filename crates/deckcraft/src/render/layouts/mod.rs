pub mod blank;
pub mod content;
pub mod image_slide;
pub mod title;
pub mod two_column;
