pub mod item;
pub(crate) mod lenient;
pub mod progress;
pub mod template;
pub mod trip;
