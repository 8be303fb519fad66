pub mod interaction;
pub mod model;
pub mod selection;
pub mod theme;
pub mod view;

pub use interaction::{CursorAction, Interaction, RadialSelector};
pub use model::{Category, Ring, Segment, WheelConfiguration, WheelError};
pub use selection::{Label, Selection};
pub use theme::WheelTheme;
pub use view::{WheelLayout, draw};

pub const CATEGORY_IDLE_ALPHA: f64 = 0.5;
pub const SUB_LABEL_IDLE_ALPHA: f64 = 0.25;
pub const LABEL_MIN_SPAN: f64 = 0.3; // radians, ~17 degrees
pub const OUTER_LINE_WIDTH: f64 = 2.0;
pub const INNER_LINE_WIDTH: f64 = 1.0;
pub const FONT_FACE: &str = "Sans";
pub const CATEGORY_FONT_SIZE: f64 = 12.0;
pub const SUB_LABEL_FONT_SIZE: f64 = 10.0;
pub const HUB_FONT_SIZE: f64 = 14.0;
pub const HUB_CAPTION: &str = "風味輪";
