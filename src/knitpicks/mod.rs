mod site;

pub use site::{KnitPicks, LISTING_URL};
