pub mod encode;
pub mod error;
pub mod join;
pub mod loader;
pub mod model_input;
pub mod time_series;
pub mod writer;
