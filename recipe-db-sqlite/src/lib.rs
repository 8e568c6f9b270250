pub mod money;
pub mod repository;

pub use repository::SqliteRecipeRepository;
