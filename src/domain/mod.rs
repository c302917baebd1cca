pub mod level;
pub mod rating;
