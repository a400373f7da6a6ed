mod key;
mod mode;
mod request;

pub use key::ThumbnailKey;
pub use mode::ResizeMode;
pub use request::{Dimensions, ImageRequest, MAX_DIMENSION, normalize_source_path};
