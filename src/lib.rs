pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod request;
pub mod resolver;
pub mod source;
pub mod storage;
pub mod transform;

pub use config::{LoadedConfig, ThumbConfig};
pub use error::ThumbError;
pub use request::{Dimensions, ImageRequest, ResizeMode, ThumbnailKey};
pub use resolver::{ResolvedKind, Resolution, ThumbnailResolver};
pub use storage::{LocalDisk, Storage};
