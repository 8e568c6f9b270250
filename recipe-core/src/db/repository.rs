use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewSavedRecipe, SavedRecipe};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Storage for saved recipes. Backends assign the row id, the share id,
/// and both timestamps on create.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn create_recipe(&self, recipe: NewSavedRecipe) -> Result<SavedRecipe, RepositoryError>;

    async fn get_recipe(&self, id: i64) -> Result<SavedRecipe, RepositoryError>;

    /// Lookup by the short id embedded in shareable URLs.
    async fn get_recipe_by_share_id(&self, share_id: &str)
    -> Result<SavedRecipe, RepositoryError>;

    async fn update_recipe(&self, recipe: &SavedRecipe) -> Result<(), RepositoryError>;

    async fn delete_recipe(&self, id: i64) -> Result<(), RepositoryError>;

    /// All saved recipes, most recently updated first.
    async fn list_recipes(&self) -> Result<Vec<SavedRecipe>, RepositoryError>;
}
