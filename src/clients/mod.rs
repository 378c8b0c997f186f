pub mod darksky;
pub mod eventbrite;
pub mod geocode;
pub mod hiking;
pub mod tmdb;
pub mod yelp;
