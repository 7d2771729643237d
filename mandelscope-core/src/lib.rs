pub mod color;
pub mod coords;
pub mod escape;
pub mod messages;
pub mod partition;
pub mod policy;
pub mod transforms;
pub mod viewport;

pub use color::{color_for, hsl_to_rgb, Rgba, INTERIOR_COLOR};
pub use coords::{complex_to_pixel, pixel_to_complex};
pub use escape::{escape_iterations, EscapePoint};
pub use messages::{PassId, RenderJob, RowResult, WorkerReply};
pub use partition::row_ranges;
pub use policy::effective_iterations;
pub use transforms::{compose_transforms, Mat3, Transform};
pub use viewport::{Viewport, MIN_ITERATION_CAP};
