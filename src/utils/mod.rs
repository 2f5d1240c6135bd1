pub mod hull;
pub mod linalg;
pub mod logger;
