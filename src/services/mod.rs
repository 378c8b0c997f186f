pub mod location;

pub use location::{LocationError, LocationService};
