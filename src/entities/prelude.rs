pub use super::events::Entity as Events;
pub use super::forecasts::Entity as Forecasts;
pub use super::locations::Entity as Locations;
pub use super::places::Entity as Places;
pub use super::trails::Entity as Trails;
