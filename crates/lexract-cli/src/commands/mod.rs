pub mod analyze;
pub mod extract;
pub mod render;
pub mod schema;
