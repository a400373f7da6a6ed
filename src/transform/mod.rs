mod resizer;

pub use resizer::{TRANSPARENT, apply_mode, center_on_canvas, scale_down_to_fit};
