pub mod calculation;
pub mod cities;
pub mod results;
pub mod upload;
