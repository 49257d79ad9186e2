// Chart core: scales, axes, path geometry, hover lookup and the renderer
// that ties them together. Nothing here depends on a drawing backend.
pub mod axis;
pub mod curve;
pub mod frame;
pub mod hover;
pub mod layers;
pub mod renderer;
pub mod scale;
pub mod svg;
pub mod time_ticks;

// Re-export commonly used types
pub use axis::{Axis, TickFormat, draw_axes};
pub use curve::{CurveStyle, LinePath, draw_line};
pub use frame::{ChartFrame, Pos, RenderState};
pub use hover::{Focus, HoverTracker, attach_hover_tracking};
pub use renderer::{ChartMode, ChartRenderer};
pub use scale::{LinearScale, TimeScale, YBaseline, compute_scales};
pub use svg::frame_to_svg;
