use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, warn};

use mood_munch::{
    diets, load_config, load_moods, Mood, MunchConfig, RankedRecipe, RatingStore,
    RecommendationRequest, Recommender,
};

#[derive(Parser)]
#[command(
    name = "mood-munch",
    version,
    about = "Recipe recommendations from what is in your fridge and how you feel"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recommend recipes for the ingredients on hand
    Recommend {
        /// Comma-separated ingredients, e.g. "chicken, rice"
        #[arg(long, short, default_value = "")]
        ingredients: String,

        /// Mood key; unknown moods fall back to cozy
        #[arg(long, short)]
        mood: Option<String>,

        /// Diet key, "none" for no constraint
        #[arg(long, short)]
        diet: Option<String>,

        /// Number of recipes to show
        #[arg(long, short)]
        top: Option<usize>,

        /// Catalog CSV, overriding the configured path
        #[arg(long)]
        catalog: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List moods with their tips and filters
    Moods,

    /// List the offered diets
    Diets,

    /// Rate a recipe from 1 to 5
    Rate {
        #[arg(long)]
        title: String,

        #[arg(long)]
        score: f64,

        #[arg(long)]
        mood: String,
    },

    /// Show the best-rated recipes
    Favorites {
        /// Only ratings given under this mood
        #[arg(long)]
        mood: Option<String>,
    },
}

fn print_recipe(index: usize, recipe: &RankedRecipe) {
    let score = match recipe.similarity_score {
        Some(score) => format!("{:.2}", score),
        None => "n/a".to_string(),
    };

    println!("{}. {} (match: {})", index + 1, recipe.title, score);
    println!("   Ingredients: {}", recipe.ingredients_text);
    println!("   Instructions:");
    for line in recipe.instructions_text.lines() {
        println!("     {}", line);
    }
    println!("   Tip: {}", recipe.mood_tip);
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config().unwrap_or_else(|e| {
        warn!("Using default configuration: {}", e);
        MunchConfig::default()
    });
    debug!("{:#?}", config);

    match cli.command {
        Command::Recommend {
            ingredients,
            mood,
            diet,
            top,
            catalog,
            json,
        } => {
            let engine = match catalog {
                Some(path) => Recommender::new(path),
                None => Recommender::from_config(&config),
            };
            let request = RecommendationRequest::from_ingredient_line(&ingredients)
                .mood(mood.unwrap_or_else(|| Mood::DEFAULT.key().to_string()))
                .diet(diet.unwrap_or_else(|| config.recommend.default_diet.clone()))
                .top_n(top.unwrap_or(config.recommend.top_n));

            let results = engine.recommend(&request)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if results.is_empty() {
                println!("No matches found. Try different ingredients or check the catalog.");
            } else {
                for (index, recipe) in results.iter().enumerate() {
                    print_recipe(index, recipe);
                }
            }
        }
        Command::Moods => {
            for (key, entry) in load_moods() {
                let filter = entry
                    .filter
                    .map(|directive| directive.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<12} [{}] {}", key, filter, entry.tip);
            }
        }
        Command::Diets => {
            for diet in diets() {
                println!("{}", diet);
            }
        }
        Command::Rate { title, score, mood } => {
            let store = RatingStore::open(&config.ratings.database_path)?;
            store.save_rating(&title, score, &mood)?;
            println!("Saved {} for {}", score, title);
        }
        Command::Favorites { mood } => {
            let store = RatingStore::open(&config.ratings.database_path)?;
            let favorites = store.top_favorites(mood.as_deref())?;
            if favorites.is_empty() {
                println!("No ratings yet.");
            }
            for favorite in favorites {
                println!("{:.1}  {}", favorite.avg_score, favorite.title);
            }
        }
    }

    Ok(())
}
