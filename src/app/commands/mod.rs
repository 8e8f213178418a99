pub mod render;
pub mod schema;
