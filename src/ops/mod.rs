pub mod composite;
pub mod text;
pub mod tiles;
pub mod transform;
