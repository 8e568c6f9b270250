pub mod repository;

pub use repository::{RecipeRepository, RepositoryError};
