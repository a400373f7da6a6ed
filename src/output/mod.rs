mod format;

pub use format::encode_png;
