mod collect;
mod loader;
mod mime;

pub use collect::collect_sources;
pub use loader::decode_source;
pub use mime::{ALLOWED_MIME_TYPES, SNIFF_LEN, is_allowed_mime, sniff_mime};
