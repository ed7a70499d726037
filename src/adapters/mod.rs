// Adapters layer: concrete lookup providers behind the PlaceLookup port.

pub mod google_places;
pub mod yelp;

pub use google_places::GooglePlacesClient;
pub use yelp::YelpClient;
