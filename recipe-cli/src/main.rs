use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recipe_core::{NewSavedRecipe, Recipe, RecipeRepository};
use recipe_db_sqlite::SqliteRecipeRepository;
use tracing_subscriber::EnvFilter;

mod input;
mod report;

use input::RecipeFile;

/// Estimate recipe costs from ingredient package prices.
///
/// Recipe files are JSON documents listing, per ingredient, how much the
/// recipe uses and the cost and size of the package it is bought in. See
/// `estimate` for a one-shot report, or `save`/`list`/`show` to keep
/// recipes in a local SQLite database.
#[derive(Parser, Debug)]
#[command(name = "recipe-cost")]
#[command(version, about, long_about = None)]
struct Args {
    /// SQLite database URL (e.g., sqlite:recipes.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:recipes.db?mode=rwc", global = true)]
    database: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cost a recipe file and print the report without saving anything
    Estimate {
        /// Path to the recipe JSON file
        file: PathBuf,

        /// Override the serving count from the file
        #[arg(short, long)]
        servings: Option<u32>,

        /// Override the batch multiplier from the file
        #[arg(short, long)]
        batch: Option<u32>,
    },

    /// Cost a recipe file and save it to the database
    Save {
        /// Path to the recipe JSON file
        file: PathBuf,

        /// Recipe name; overrides the name in the file
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List saved recipes, most recently updated first
    List,

    /// Print the report for a saved recipe
    Show {
        /// Share id of the recipe
        share_id: String,
    },

    /// Delete a saved recipe
    Delete {
        /// Row id of the recipe
        id: i64,
    },
}

fn load_recipe(path: &PathBuf) -> Result<(Recipe, Option<String>)> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read: {}", path.display()))?;
    let file = RecipeFile::parse(&json)
        .with_context(|| format!("Failed to parse: {}", path.display()))?;
    let name = file.name.clone();

    let (recipe, warnings) = file.into_recipe();
    for warning in &warnings {
        eprintln!("warning: {}", report::describe_warning(warning));
    }

    Ok((recipe, name))
}

async fn open_repository(database_url: &str) -> Result<SqliteRecipeRepository> {
    let repo = SqliteRecipeRepository::new(database_url)
        .await
        .with_context(|| format!("Failed to connect to database: {}", database_url))?;
    repo.run_migrations()
        .await
        .context("Failed to run migrations")?;
    Ok(repo)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Estimate {
            file,
            servings,
            batch,
        } => {
            let (mut recipe, _) = load_recipe(&file)?;
            if let Some(servings) = servings.filter(|s| *s > 0) {
                recipe.servings = servings;
            }
            if let Some(batch) = batch.filter(|b| *b > 0) {
                recipe.batch_multiplier = batch;
            }
            print!("{}", report::render(&recipe));
        }

        Command::Save { file, name } => {
            let (recipe, file_name) = load_recipe(&file)?;
            let name = name
                .or(file_name)
                .unwrap_or_else(|| "Untitled recipe".to_string());

            let repo = open_repository(&args.database).await?;
            let total_cost = recipe.total_cost();
            let saved = repo
                .create_recipe(NewSavedRecipe {
                    name,
                    ingredients: recipe.ingredients,
                    servings: recipe.servings,
                    batch_multiplier: recipe.batch_multiplier,
                    total_cost,
                })
                .await
                .context("Failed to save recipe")?;

            println!("Saved '{}' as {} (id {})", saved.name, saved.share_id, saved.id);
        }

        Command::List => {
            let repo = open_repository(&args.database).await?;
            let recipes = repo.list_recipes().await.context("Failed to list recipes")?;

            if recipes.is_empty() {
                println!("No saved recipes.");
            }
            for recipe in recipes {
                println!(
                    "{:<12} {:<32} {:>10}  updated {}",
                    recipe.share_id,
                    recipe.name,
                    report::currency(recipe.total_cost),
                    recipe.updated_at.format("%Y-%m-%d"),
                );
            }
        }

        Command::Show { share_id } => {
            let repo = open_repository(&args.database).await?;
            let saved = repo
                .get_recipe_by_share_id(&share_id)
                .await
                .with_context(|| format!("No recipe with share id '{}'", share_id))?;

            println!("{}\n", saved.name);
            let recipe = Recipe {
                ingredients: saved.ingredients,
                servings: saved.servings,
                batch_multiplier: saved.batch_multiplier,
            };
            print!("{}", report::render(&recipe));
        }

        Command::Delete { id } => {
            let repo = open_repository(&args.database).await?;
            repo.delete_recipe(id)
                .await
                .with_context(|| format!("Failed to delete recipe {}", id))?;
            println!("Deleted recipe {}", id);
        }
    }

    Ok(())
}
