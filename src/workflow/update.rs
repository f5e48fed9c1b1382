use log::{debug, warn};

use super::effect::Effect;
use super::event::Event;
use super::state::{AppState, ErrorState, Pending, Selection, Stage};
use crate::image::ImageFile;
use crate::merge::merge_into;

/// Applies one event to the state and returns the calls to make next.
///
/// Pure apart from logging: no I/O happens here.
pub fn update(mut state: AppState, event: Event) -> (AppState, Vec<Effect>) {
    let effects = match event {
        Event::ImageSelected(file) => select_image(&mut state, file),

        Event::Uploaded { version, response } => {
            if is_awaiting(&state, version, Pending::Upload) {
                state.session.remote_image_id = Some(response.image_id.clone());
                state.pending = Some(Pending::Detect);
                vec![Effect::Detect {
                    version,
                    image_id: response.image_id,
                }]
            } else {
                discard("upload result", version, &state)
            }
        }

        Event::Detected { version, detection } => {
            if is_awaiting(&state, version, Pending::Detect) {
                state.ingredients.seed(&detection.ingredients_normalized);
                state.raw_terms = detection.ingredients_raw;
                state.pending = None;
                enter(&mut state, Stage::Ingredients);
                Vec::new()
            } else {
                discard("detection result", version, &state)
            }
        }

        Event::SearchCompleted { version, recipes } => {
            if is_awaiting(&state, version, Pending::Search) {
                state.recipes = recipes;
                state.pending = None;
                enter(&mut state, Stage::Recipes);
                Vec::new()
            } else {
                discard("search result", version, &state)
            }
        }

        Event::Failed {
            version,
            call,
            message,
        } => {
            if version == state.version && state.pending.is_some() {
                let message = if message.trim().is_empty() {
                    call.fallback_message().to_string()
                } else {
                    message
                };
                state.pending = None;
                state.error = Some(ErrorState {
                    message,
                    failed: call,
                });
                enter(&mut state, Stage::Error);
                Vec::new()
            } else {
                discard("failure", version, &state)
            }
        }

        Event::DetailLoaded {
            version,
            recipe_id,
            detail,
        } => {
            match open_detail(&state, version, recipe_id) {
                Some(selection) => {
                    if let Some(recipe) = state.recipes.get_mut(selection.index) {
                        merge_into(recipe, &detail);
                    }
                    if let Some(selection) = state.selection.as_mut() {
                        selection.loading = false;
                    }
                    Vec::new()
                }
                None => discard("recipe detail", version, &state),
            }
        }

        Event::DetailFailed {
            version,
            recipe_id,
            message,
        } => {
            // Detail is an enhancement; the summary card stays as it is
            warn!("Could not load details for recipe {}: {}", recipe_id, message);
            if open_detail(&state, version, recipe_id).is_some() {
                if let Some(selection) = state.selection.as_mut() {
                    selection.loading = false;
                }
            }
            Vec::new()
        }

        Event::AddIngredient(name) => {
            if state.is_editing() {
                state.ingredients.add(&name);
            }
            Vec::new()
        }

        Event::RemoveIngredient(index) => {
            if state.is_editing() {
                state.ingredients.remove(index);
            }
            Vec::new()
        }

        Event::SetCuisine(cuisine) => {
            if state.is_editing() {
                state.filters.set_cuisine(cuisine.as_deref());
            }
            Vec::new()
        }

        Event::SetMealType(meal_type) => {
            if state.is_editing() {
                state.filters.set_meal_type(meal_type.as_deref());
            }
            Vec::new()
        }

        Event::Confirm => confirm(&mut state),

        Event::SelectRecipe(index) => select_recipe(&mut state, index),

        Event::CloseRecipe => {
            state.selection = None;
            Vec::new()
        }

        Event::DismissError => {
            match state.stage() {
                Stage::Error => {
                    state.error = None;
                    if state.recipes.is_empty() {
                        state.reset();
                    } else {
                        enter(&mut state, Stage::Recipes);
                    }
                }
                Stage::Upload => state.notice = None,
                _ => {}
            }
            Vec::new()
        }

        Event::Retake | Event::StartOver => {
            state.reset();
            debug!("Session reset (version {})", state.version);
            Vec::new()
        }
    };

    (state, effects)
}

fn select_image(state: &mut AppState, file: ImageFile) -> Vec<Effect> {
    if state.stage() != Stage::Upload {
        debug!("Ignoring image selected during {}", state.stage());
        return Vec::new();
    }

    if let Err(e) = state.policy.validate(&file) {
        debug!("Rejected {:?}: {}", file, e);
        state.notice = Some(e.to_string());
        return Vec::new();
    }

    state.notice = None;
    state.version += 1;
    state.session.image = Some(file.clone());
    state.session.remote_image_id = None;
    state.pending = Some(Pending::Upload);
    enter(state, Stage::Processing);

    vec![Effect::Upload {
        version: state.version,
        file,
    }]
}

fn confirm(state: &mut AppState) -> Vec<Effect> {
    if !state.is_editing() {
        debug!("Ignoring confirm during {}", state.stage());
        return Vec::new();
    }

    match state.ingredients.confirm(&state.filters) {
        Ok(request) => {
            state.version += 1;
            state.selection = None;
            state.pending = Some(Pending::Search);
            enter(state, Stage::Processing);
            vec![Effect::Search {
                version: state.version,
                request,
            }]
        }
        Err(e) => {
            debug!("Ignoring confirm: {}", e);
            Vec::new()
        }
    }
}

fn select_recipe(state: &mut AppState, index: usize) -> Vec<Effect> {
    let recipe_id = match state.recipes.get(index).map(|recipe| recipe.id) {
        Some(recipe_id) if state.stage() == Stage::Recipes => recipe_id,
        _ => {
            debug!("Ignoring selection of recipe #{} in {}", index, state.stage());
            return Vec::new();
        }
    };

    state.selection = Some(Selection {
        index,
        recipe_id,
        loading: recipe_id.is_some(),
    });
    match recipe_id {
        Some(recipe_id) => vec![Effect::FetchDetail {
            version: state.version,
            recipe_id,
        }],
        None => Vec::new(),
    }
}

fn enter(state: &mut AppState, stage: Stage) {
    debug!("Stage {} -> {}", state.session.stage, stage);
    state.session.stage = stage;
}

fn is_awaiting(state: &AppState, version: u64, pending: Pending) -> bool {
    version == state.version && state.pending == Some(pending)
}

/// The open selection, if a detail result for `recipe_id` may still apply to it
fn open_detail(state: &AppState, version: u64, recipe_id: i64) -> Option<Selection> {
    if version != state.version || state.stage() != Stage::Recipes {
        return None;
    }
    state
        .selection
        .filter(|selection| selection.recipe_id == Some(recipe_id))
}

fn discard(what: &str, version: u64, state: &AppState) -> Vec<Effect> {
    debug!(
        "Discarding stale {} (version {}, current {}, stage {})",
        what,
        version,
        state.version,
        state.stage()
    );
    Vec::new()
}
