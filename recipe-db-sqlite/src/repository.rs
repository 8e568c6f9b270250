use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use recipe_core::{Ingredient, NewSavedRecipe, RecipeRepository, RepositoryError, SavedRecipe};
use sqlx::{Row, sqlite::SqlitePool};
use uuid::Uuid;

use crate::money::{cents_to_decimal, decimal_to_cents};

/// Length of the short id embedded in shareable URLs.
const SHARE_ID_LEN: usize = 10;

pub struct SqliteRecipeRepository {
    pool: SqlitePool,
}

impl SqliteRecipeRepository {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn new_share_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..SHARE_ID_LEN].to_string()
}

fn row_to_saved_recipe(row: &sqlx::sqlite::SqliteRow) -> Result<SavedRecipe, RepositoryError> {
    let ingredients_json: String = row
        .try_get("ingredients")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
    let ingredients: Vec<Ingredient> = serde_json::from_str(&ingredients_json)
        .map_err(|e| RepositoryError::Database(format!("Malformed ingredients JSON: {}", e)))?;

    let total_cost_cents: i64 = row
        .try_get("total_cost_cents")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

    Ok(SavedRecipe {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        share_id: row
            .try_get("share_id")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        name: row
            .try_get("name")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        ingredients,
        servings: row
            .try_get::<i64, _>("servings")
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .try_into()
            .map_err(|_| RepositoryError::Database("servings out of range".to_string()))?,
        batch_multiplier: row
            .try_get::<i64, _>("batch_multiplier")
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .try_into()
            .map_err(|_| RepositoryError::Database("batch_multiplier out of range".to_string()))?,
        total_cost: cents_to_decimal(total_cost_cents),
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get updated_at: {}", e)))?,
    })
}

const SELECT_COLUMNS: &str = "id, share_id, name, ingredients, servings, batch_multiplier,
        total_cost_cents, created_at, updated_at";

#[async_trait]
impl RecipeRepository for SqliteRecipeRepository {
    async fn create_recipe(
        &self,
        recipe: NewSavedRecipe,
    ) -> Result<SavedRecipe, RepositoryError> {
        let now = Utc::now();
        let share_id = new_share_id();
        let ingredients_json = serde_json::to_string(&recipe.ingredients)
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO saved_recipes (
                share_id, name, ingredients, servings, batch_multiplier,
                total_cost_cents, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&share_id)
        .bind(&recipe.name)
        .bind(&ingredients_json)
        .bind(recipe.servings)
        .bind(recipe.batch_multiplier)
        .bind(decimal_to_cents(recipe.total_cost)?)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_recipe(id).await
    }

    async fn get_recipe(
        &self,
        id: i64,
    ) -> Result<SavedRecipe, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM saved_recipes WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        row_to_saved_recipe(&row)
    }

    async fn get_recipe_by_share_id(
        &self,
        share_id: &str,
    ) -> Result<SavedRecipe, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM saved_recipes WHERE share_id = ?",
            SELECT_COLUMNS
        ))
        .bind(share_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        row_to_saved_recipe(&row)
    }

    async fn update_recipe(
        &self,
        recipe: &SavedRecipe,
    ) -> Result<(), RepositoryError> {
        let now = Utc::now();
        let ingredients_json = serde_json::to_string(&recipe.ingredients)
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE saved_recipes SET
                name = ?, ingredients = ?, servings = ?, batch_multiplier = ?,
                total_cost_cents = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&recipe.name)
        .bind(&ingredients_json)
        .bind(recipe.servings)
        .bind(recipe.batch_multiplier)
        .bind(decimal_to_cents(recipe.total_cost)?)
        .bind(now)
        .bind(recipe.id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_recipe(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM saved_recipes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_recipes(&self) -> Result<Vec<SavedRecipe>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM saved_recipes ORDER BY updated_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_saved_recipe).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use recipe_core::{IngredientEdit, RecipeEditor, Unit};
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn setup_test_db() -> SqliteRecipeRepository {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let repo = SqliteRecipeRepository::new_with_pool(pool).await;
        repo.run_migrations()
            .await
            .expect("Failed to run migrations");
        repo
    }

    fn pasta_recipe() -> NewSavedRecipe {
        let mut ed = RecipeEditor::new();
        let id = ed.add_ingredient();
        ed.apply(&id, IngredientEdit::Name("pasta".to_string()));
        ed.apply(&id, IngredientEdit::UsedUnit(Unit::Ounce));
        ed.apply(&id, IngredientEdit::PackageUnit(Unit::Ounce));
        ed.apply(&id, IngredientEdit::UsedQuantity(dec!(8)));
        ed.apply(&id, IngredientEdit::PackageSize(dec!(16)));
        ed.apply(&id, IngredientEdit::PackageCost(dec!(1.49)));

        let total_cost = ed.recipe().total_cost();
        let recipe = ed.into_recipe();
        NewSavedRecipe {
            name: "Weeknight pasta".to_string(),
            ingredients: recipe.ingredients,
            servings: recipe.servings,
            batch_multiplier: recipe.batch_multiplier,
            total_cost,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_recipe() {
        let repo = setup_test_db().await;

        let created = repo
            .create_recipe(pasta_recipe())
            .await
            .expect("Should create recipe");

        assert!(created.id > 0);
        assert_eq!(created.share_id.len(), SHARE_ID_LEN);
        assert_eq!(created.name, "Weeknight pasta");
        assert_eq!(created.servings, 4);
        assert_eq!(created.batch_multiplier, 1);
        // 0.745 stored as 75 cents.
        assert_eq!(created.total_cost, dec!(0.75));
        assert_eq!(created.ingredients.len(), 1);
        assert_eq!(created.ingredients[0].calculated_cost, dec!(0.745));

        let fetched = repo
            .get_recipe(created.id)
            .await
            .expect("Should fetch recipe");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_recipe_not_found() {
        let repo = setup_test_db().await;

        let result = repo.get_recipe(99999).await;

        assert_eq!(result, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_get_recipe_by_share_id() {
        let repo = setup_test_db().await;
        let created = repo
            .create_recipe(pasta_recipe())
            .await
            .expect("Should create recipe");

        let fetched = repo
            .get_recipe_by_share_id(&created.share_id)
            .await
            .expect("Should fetch by share id");

        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn test_get_recipe_by_share_id_not_found() {
        let repo = setup_test_db().await;

        let result = repo.get_recipe_by_share_id("nope123456").await;

        assert_eq!(result, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_share_ids_are_unique() {
        let repo = setup_test_db().await;

        let a = repo
            .create_recipe(pasta_recipe())
            .await
            .expect("Should create recipe");
        let b = repo
            .create_recipe(pasta_recipe())
            .await
            .expect("Should create recipe");

        assert_ne!(a.share_id, b.share_id);
    }

    #[tokio::test]
    async fn test_update_recipe() {
        let repo = setup_test_db().await;
        let mut created = repo
            .create_recipe(pasta_recipe())
            .await
            .expect("Should create recipe");

        created.name = "Pasta for a crowd".to_string();
        created.batch_multiplier = 3;
        created.total_cost = dec!(2.24);

        repo.update_recipe(&created)
            .await
            .expect("Should update recipe");

        let fetched = repo
            .get_recipe(created.id)
            .await
            .expect("Should fetch recipe");
        assert_eq!(fetched.name, "Pasta for a crowd");
        assert_eq!(fetched.batch_multiplier, 3);
        assert_eq!(fetched.total_cost, dec!(2.24));
        assert_eq!(fetched.share_id, created.share_id);
    }

    #[tokio::test]
    async fn test_update_recipe_not_found() {
        let repo = setup_test_db().await;
        let mut created = repo
            .create_recipe(pasta_recipe())
            .await
            .expect("Should create recipe");

        created.id = 99999;

        let result = repo.update_recipe(&created).await;

        assert_eq!(result, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_recipe() {
        let repo = setup_test_db().await;
        let created = repo
            .create_recipe(pasta_recipe())
            .await
            .expect("Should create recipe");

        repo.delete_recipe(created.id)
            .await
            .expect("Should delete recipe");

        let result = repo.get_recipe(created.id).await;
        assert_eq!(result, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_recipe_not_found() {
        let repo = setup_test_db().await;

        let result = repo.delete_recipe(99999).await;

        assert_eq!(result, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_list_recipes() {
        let repo = setup_test_db().await;

        repo.create_recipe(pasta_recipe())
            .await
            .expect("Should create recipe");
        repo.create_recipe(pasta_recipe())
            .await
            .expect("Should create recipe");

        let all = repo.list_recipes().await.expect("Should list recipes");

        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_ingredients_json_is_an_error() {
        let repo = setup_test_db().await;
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO saved_recipes (
                share_id, name, ingredients, servings, batch_multiplier,
                total_cost_cents, created_at, updated_at
            ) VALUES ('badjson0000', 'broken', 'not json', 4, 1, 0, ?, ?)",
        )
        .bind(now)
        .bind(now)
        .execute(repo.pool())
        .await
        .expect("Should insert raw row");

        let result = repo.get_recipe_by_share_id("badjson0000").await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }

    #[tokio::test]
    async fn test_unknown_unit_in_stored_json_is_an_error() {
        let repo = setup_test_db().await;
        let now = Utc::now();

        let ingredients = r#"[{
            "id": "a", "name": "mystery",
            "usedQuantity": "1", "usedUnit": "stone",
            "packageCost": "1", "packageSize": "1", "packageUnit": "lb"
        }]"#;

        sqlx::query(
            "INSERT INTO saved_recipes (
                share_id, name, ingredients, servings, batch_multiplier,
                total_cost_cents, created_at, updated_at
            ) VALUES ('badunit0000', 'broken', ?, 4, 1, 0, ?, ?)",
        )
        .bind(ingredients)
        .bind(now)
        .bind(now)
        .execute(repo.pool())
        .await
        .expect("Should insert raw row");

        let result = repo.get_recipe_by_share_id("badunit0000").await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }
}
