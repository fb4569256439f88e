mod settings;

pub use settings::*;

pub mod telemetries;
