// Timeline layer - selection range model and gesture translation

pub mod gesture;
pub mod range;

pub use gesture::{GestureEffect, GestureTranslator, Handle, HANDLE_HIT_WIDTH_PX};
pub use range::RangeModel;
