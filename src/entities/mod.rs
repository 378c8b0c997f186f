pub mod prelude;

pub mod events;
pub mod forecasts;
pub mod locations;
pub mod places;
pub mod trails;
