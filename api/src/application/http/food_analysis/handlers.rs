pub mod analyze_food_image;

pub use analyze_food_image::*;
