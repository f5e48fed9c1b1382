//! What a front end shows for a given state, with no rendering decisions of its own.

use crate::ingredients::{KNOWN_CUISINES, KNOWN_MEAL_TYPES};
use crate::merge::match_percentage;
use crate::messages;
use crate::model::RankedRecipe;
use crate::workflow::{AppState, Pending, Stage};

/// One card in the ranked list
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCard {
    /// Position in the workflow's recipe list, for `Event::SelectRecipe`
    pub index: usize,
    pub id: Option<i64>,
    pub title: String,
    pub image: Option<String>,
    pub score: f64,
    pub matched_count: usize,
    pub missing_count: usize,
    /// `None` when the recipe lists no ingredients at all; omit the bar then
    pub match_percentage: Option<u8>,
    pub ready_in_minutes: Option<u32>,
}

impl RecipeCard {
    pub fn from_recipe(index: usize, recipe: &RankedRecipe) -> Self {
        Self {
            index,
            id: recipe.id,
            title: recipe.display_title().to_string(),
            image: recipe.image.clone(),
            score: recipe.score,
            matched_count: recipe.matched.len(),
            missing_count: recipe.missing.len(),
            match_percentage: match_percentage(recipe.matched.len(), recipe.missing.len()),
            ready_in_minutes: recipe.ready_in_minutes,
        }
    }
}

/// The open recipe
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetailView {
    pub title: String,
    pub image: Option<String>,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub steps: Vec<String>,
    pub instructions: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub source_url: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppView {
    pub stage: Stage,
    pub heading: &'static str,
    pub subheading: Option<&'static str>,
    /// Local validation message on the upload stage
    pub notice: Option<String>,
    /// Message of the error stage; dismissing it is the only action offered
    pub error: Option<String>,
    pub ingredients: Vec<String>,
    /// Shown instead of the ingredient list when it is empty
    pub ingredients_message: Option<&'static str>,
    pub cuisine: Option<String>,
    pub meal_type: Option<String>,
    /// Choices for the cuisine select; any other value is still sent as is
    pub cuisine_options: &'static [&'static str],
    pub meal_type_options: &'static [&'static str],
    pub confirm_enabled: bool,
    pub confirm_label: String,
    pub cards: Vec<RecipeCard>,
    /// e.g. "Found 3 recipes for your ingredients"
    pub results_summary: Option<String>,
    /// Shown instead of the cards when the search found nothing
    pub recipes_message: Option<&'static str>,
    pub selected: Option<RecipeDetailView>,
}

impl AppView {
    /// Derives the view; `max_recipes` caps the cards shown, never the state
    pub fn from_state(state: &AppState, max_recipes: Option<usize>) -> Self {
        let stage = state.stage();
        let (heading, subheading) = headings(state);

        let ingredients = state.ingredients().as_slice().to_vec();
        let editing = state.is_editing();
        let ingredients_message = if editing && ingredients.is_empty() {
            Some(messages::NO_INGREDIENTS)
        } else {
            None
        };

        let count = ingredients.len();
        let confirm_label = format!(
            "Find Recipes ({} ingredient{})",
            count,
            if count == 1 { "" } else { "s" }
        );

        let show_recipes = stage == Stage::Recipes;
        let cards: Vec<RecipeCard> = if show_recipes {
            state
                .recipes()
                .iter()
                .take(max_recipes.unwrap_or(usize::MAX))
                .enumerate()
                .map(|(index, recipe)| RecipeCard::from_recipe(index, recipe))
                .collect()
        } else {
            Vec::new()
        };
        let results_summary = (show_recipes && !cards.is_empty()).then(|| {
            let found = cards.len();
            format!(
                "Found {} recipe{} for your ingredients",
                found,
                if found == 1 { "" } else { "s" }
            )
        });
        let recipes_message = (show_recipes && cards.is_empty()).then_some(messages::NO_RECIPES);

        let selected = state.selection().and_then(|selection| {
            state.selected_recipe().map(|recipe| RecipeDetailView {
                title: recipe.display_title().to_string(),
                image: recipe.image.clone(),
                matched: recipe.matched.clone(),
                missing: recipe.missing.clone(),
                steps: recipe.steps().iter().map(|s| s.step.clone()).collect(),
                instructions: recipe
                    .instructions
                    .clone()
                    .filter(|text| !text.trim().is_empty()),
                ready_in_minutes: recipe.ready_in_minutes,
                servings: recipe.servings,
                source_url: recipe.source_url.clone(),
                loading: selection.loading,
            })
        });

        Self {
            stage,
            heading,
            subheading,
            notice: state.notice().map(str::to_string),
            error: state.error().map(|e| e.message.clone()),
            ingredients,
            ingredients_message,
            cuisine: state.filters().cuisine.clone(),
            meal_type: state.filters().meal_type.clone(),
            cuisine_options: KNOWN_CUISINES,
            meal_type_options: KNOWN_MEAL_TYPES,
            confirm_enabled: state.can_confirm(),
            confirm_label,
            cards,
            results_summary,
            recipes_message,
            selected: if show_recipes { selected } else { None },
        }
    }
}

fn headings(state: &AppState) -> (&'static str, Option<&'static str>) {
    match (state.stage(), state.pending()) {
        (Stage::Upload, _) => (
            "Get recipe recommendations",
            Some("Upload an ingredient photo, confirm what we detected, and get recipes tailored to what you have."),
        ),
        (Stage::Processing, Some(Pending::Search)) => ("Searching for recipes...", None),
        (Stage::Processing, _) => ("Processing Your Image...", Some(messages::PROCESSING_TIME)),
        (Stage::Ingredients, _) => (
            "Confirm Ingredients",
            Some("Review and edit the ingredients before finding recipes"),
        ),
        (Stage::Recipes, _) => ("Recipe Recommendations", None),
        (Stage::Error, _) => ("Error", None),
    }
}
