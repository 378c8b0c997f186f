pub mod event;
pub mod film;
pub mod forecast;
pub mod location;
pub mod place;
pub mod trail;

pub use event::Event;
pub use film::Film;
pub use forecast::Forecast;
pub use location::Location;
pub use place::Place;
pub use trail::Trail;
