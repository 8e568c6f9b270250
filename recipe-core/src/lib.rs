pub mod conversions;
pub mod costing;
pub mod db;
pub mod editor;
pub mod models;

pub use db::repository::{RecipeRepository, RepositoryError};
pub use editor::{EditWarning, IdSource, IngredientEdit, RecipeEditor, UuidSource};
pub use models::*;
