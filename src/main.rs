use clap::{Parser, Subcommand};
use log::debug;

use ingredient_vision::view::RecipeDetailView;
use ingredient_vision::{check_health, AppView, ClientConfig, IngredientVision};

#[derive(Parser, Debug)]
#[command(name = "ingredient-vision")]
#[command(about = "Turn a photo of your ingredients into recipe ideas", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL (overrides config)
    #[arg(long = "base-url", value_name = "URL", global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload a photo, confirm the detected ingredients and search recipes
    Analyze {
        /// JPEG or PNG photo of your ingredients
        #[arg(value_name = "IMAGE")]
        image: String,

        #[arg(long, value_name = "CUISINE")]
        cuisine: Option<String>,

        #[arg(long = "meal-type", value_name = "MEAL_TYPE")]
        meal_type: Option<String>,

        /// Ingredient to add before searching (repeatable)
        #[arg(long = "add", value_name = "NAME")]
        add: Vec<String>,

        /// Detected ingredient to drop before searching (repeatable)
        #[arg(long = "remove", value_name = "NAME")]
        remove: Vec<String>,

        /// Open the first N recipes and print their details
        #[arg(long, value_name = "N", default_value_t = 0)]
        details: usize,

        /// Show at most N recipes (overrides config)
        #[arg(long = "max-recipes", value_name = "N")]
        max_recipes: Option<usize>,
    },

    /// Check that the backend is reachable
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ClientConfig::load()?;
    debug!("Loaded config: {:?}", config);

    match cli.command {
        Commands::Health => {
            let base_url = cli.base_url.unwrap_or_else(|| config.api.base_url.clone());
            let status = check_health(&base_url, config.api.request_timeout()).await?;
            println!("{}: {}", base_url, status);
        }
        Commands::Analyze {
            image,
            cuisine,
            meal_type,
            add,
            remove,
            details,
            max_recipes,
        } => {
            let mut builder = IngredientVision::builder().config(config).image(image);
            if let Some(url) = cli.base_url {
                builder = builder.base_url(url);
            }
            if let Some(max) = max_recipes {
                builder = builder.max_recipes(max);
            }
            if let Some(cuisine) = cuisine {
                builder = builder.cuisine(cuisine);
            }
            if let Some(meal_type) = meal_type {
                builder = builder.meal_type(meal_type);
            }
            for name in add {
                builder = builder.add_ingredient(name);
            }
            for name in remove {
                builder = builder.remove_ingredient(name);
            }

            let mut journey = builder.build().await?;
            let view = journey.view();
            print_view(&view);

            let shown = view.cards.len().min(details);
            for index in 0..shown {
                if let Some(detail) = journey.open_recipe(index).await.selected {
                    print_detail(&detail);
                }
                journey.close_recipe().await;
            }
        }
    }

    Ok(())
}

fn print_view(view: &AppView) {
    println!("{}", view.heading);
    println!();
    println!("Ingredients:");
    match view.ingredients_message {
        Some(message) => println!("  {}", message),
        None => {
            for name in &view.ingredients {
                println!("  - {}", name);
            }
        }
    }
    match &view.cuisine {
        Some(cuisine) => println!("Cuisine: {}", cuisine),
        None => println!("Narrow with --cuisine: {}", view.cuisine_options.join(", ")),
    }
    match &view.meal_type {
        Some(meal_type) => println!("Meal type: {}", meal_type),
        None => println!(
            "Narrow with --meal-type: {}",
            view.meal_type_options.join(", ")
        ),
    }

    if let Some(summary) = &view.results_summary {
        println!();
        println!("{}", summary);
    }
    if let Some(message) = view.recipes_message {
        println!();
        println!("{}", message);
    }
    for card in &view.cards {
        let mut line = format!("{:>3}. {} (score {:.2})", card.index + 1, card.title, card.score);
        if let Some(percentage) = card.match_percentage {
            line.push_str(&format!(
                ", {}% match: {} have, {} missing",
                percentage, card.matched_count, card.missing_count
            ));
        }
        if let Some(minutes) = card.ready_in_minutes {
            line.push_str(&format!(", {} min", minutes));
        }
        println!("{}", line);
    }
}

fn print_detail(detail: &RecipeDetailView) {
    println!();
    println!("== {} ==", detail.title);
    if let Some(minutes) = detail.ready_in_minutes {
        println!("Ready in {} minutes", minutes);
    }
    if let Some(servings) = detail.servings {
        println!("Serves {}", servings);
    }
    if !detail.matched.is_empty() {
        println!("You have: {}", detail.matched.join(", "));
    }
    if !detail.missing.is_empty() {
        println!("You need: {}", detail.missing.join(", "));
    }
    if !detail.steps.is_empty() {
        for (number, step) in detail.steps.iter().enumerate() {
            println!("  {}. {}", number + 1, step);
        }
    } else if let Some(instructions) = &detail.instructions {
        println!("{}", instructions);
    }
    if let Some(url) = &detail.source_url {
        println!("Source: {}", url);
    }
}
