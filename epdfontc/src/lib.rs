mod error;
mod font;

pub use error::Error;
pub use font::{FontStack, SharedFontData};
