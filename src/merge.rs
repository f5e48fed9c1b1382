use crate::model::{RankedRecipe, RecipeDetail};

/// Merges fetched detail into the summary already on screen.
///
/// Field-wise overwrite: whatever the detail carries replaces the summary's
/// value, anything it omits is kept. `matched`, `missing`, `score` and
/// `title` only change when the detail sends a value for them.
pub fn merge(summary: &RankedRecipe, detail: &RecipeDetail) -> RankedRecipe {
    let mut merged = summary.clone();
    merge_into(&mut merged, detail);
    merged
}

/// In-place variant of [`merge`]
pub fn merge_into(recipe: &mut RankedRecipe, detail: &RecipeDetail) {
    if let Some(id) = detail.id {
        recipe.id = id;
    }
    if let Some(title) = &detail.title {
        recipe.title = Some(title.clone());
    }
    if let Some(image) = &detail.image {
        recipe.image = image.clone();
    }
    if let Some(score) = detail.score {
        recipe.score = score;
    }
    if let Some(matched) = &detail.matched {
        recipe.matched = matched.clone();
    }
    if let Some(missing) = &detail.missing {
        recipe.missing = missing.clone();
    }
    if let Some(source) = &detail.source {
        recipe.source = source.clone();
    }
    if let Some(instructions) = &detail.instructions {
        recipe.instructions = instructions.clone();
    }
    if let Some(blocks) = &detail.analyzed_instructions {
        recipe.analyzed_instructions = blocks.clone();
    }
    if let Some(minutes) = detail.ready_in_minutes {
        recipe.ready_in_minutes = minutes;
    }
    if let Some(servings) = detail.servings {
        recipe.servings = servings;
    }
    if let Some(url) = &detail.source_url {
        recipe.source_url = url.clone();
    }
}

/// `round(matched / (matched + missing) * 100)`, or `None` when both are zero
pub fn match_percentage(matched: usize, missing: usize) -> Option<u8> {
    let total = matched + missing;
    if total == 0 {
        return None;
    }
    let percent = (matched as f64 / total as f64 * 100.0).round();
    Some(percent as u8)
}
