use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ThumbError;

/// How a source image is fitted into the requested box.
#[derive(
    Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ResizeMode {
    /// Scale to fill the box keeping aspect ratio, cropping the overflow
    #[default]
    #[value(name = "fit")]
    Fit,
    /// Stretch to the exact box, ignoring aspect ratio
    #[value(name = "resize")]
    Resize,
    /// Scale down to fit inside the box and pad with a transparent background
    #[value(name = "background")]
    Background,
    /// Keep the centre of the image at its original scale
    #[value(name = "resizeCanvas", alias = "resize-canvas")]
    ResizeCanvas,
}

impl ResizeMode {
    /// Name used in cache directory names and URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeMode::Fit => "fit",
            ResizeMode::Resize => "resize",
            ResizeMode::Background => "background",
            ResizeMode::ResizeCanvas => "resizeCanvas",
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeMode {
    type Err = ThumbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fit" => Ok(ResizeMode::Fit),
            "resize" => Ok(ResizeMode::Resize),
            "background" => Ok(ResizeMode::Background),
            "resizeCanvas" | "resize-canvas" => Ok(ResizeMode::ResizeCanvas),
            _ => Err(ThumbError::UnrecognizedMode(s.to_string())),
        }
    }
}
