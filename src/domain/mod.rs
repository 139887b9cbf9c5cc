pub mod entities;
pub mod providers;
pub mod repositories;
pub mod value_objects;
