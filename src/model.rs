use serde::{Deserialize, Deserializer, Serialize};

/// Response of `POST /upload-image`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UploadResponse {
    /// Opaque key of the stored image, passed on to detection
    pub image_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Response of `POST /analyze`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Detection {
    /// Labels as the vision model reported them; kept for display/debug only
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients_raw: Vec<String>,
    /// Canonical ingredient names the editor is seeded from
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients_normalized: Vec<String>,
}

/// Body of `POST /recipes`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchRequest {
    pub ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipes: Vec<RankedRecipe>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct InstructionStep {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub step: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct InstructionBlock {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<InstructionStep>,
}

/// A candidate recipe as ranked by the search service.
///
/// Search responses fill the summary fields; the extended fields are filled
/// in when the recipe's detail is merged in.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRecipe {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Opaque ranking value from the service, never recomputed here
    #[serde(default)]
    pub score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matched: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing: Vec<String>,
    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub analyzed_instructions: Vec<InstructionBlock>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub source_url: Option<String>,
}

impl RankedRecipe {
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => "Untitled recipe",
        }
    }

    /// Steps of the first instruction block, which is the one front ends show
    pub fn steps(&self) -> &[InstructionStep] {
        self.analyzed_instructions
            .first()
            .map(|block| block.steps.as_slice())
            .unwrap_or(&[])
    }
}

/// Response of `GET /recipes/{id}`.
///
/// Every field is optional. For fields the summary allows to be empty, an
/// explicit `null` is kept apart from an absent key (`Some(None)` vs `None`)
/// so a merge can tell "cleared" from "not sent".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Option<i64>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub image: Option<Option<String>>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub matched: Option<Vec<String>>,
    #[serde(default)]
    pub missing: Option<Vec<String>>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub instructions: Option<Option<String>>,
    #[serde(default)]
    pub analyzed_instructions: Option<Vec<InstructionBlock>>,
    #[serde(default, deserialize_with = "present")]
    pub ready_in_minutes: Option<Option<u32>>,
    #[serde(default, deserialize_with = "present")]
    pub servings: Option<Option<u32>>,
    #[serde(default, deserialize_with = "present")]
    pub source_url: Option<Option<String>>,
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// FastAPI-style error body: `{"detail": "..."}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_from_search_payload() {
        let recipe: RankedRecipe = serde_json::from_value(json!({
            "id": 1,
            "title": "Steak Tacos",
            "image": "https://example.com/taco.jpg",
            "score": 10,
            "missing": ["cilantro"],
            "matched": ["steak"],
            "source": "spoonacular"
        }))
        .unwrap();

        assert_eq!(recipe.id, Some(1));
        assert_eq!(recipe.display_title(), "Steak Tacos");
        assert_eq!(recipe.score, 10.0);
        assert_eq!(recipe.matched, vec!["steak"]);
        assert_eq!(recipe.missing, vec!["cilantro"]);
        assert!(recipe.instructions.is_none());
        assert!(recipe.steps().is_empty());
    }

    #[test]
    fn test_summary_tolerates_nulls() {
        let recipe: RankedRecipe = serde_json::from_value(json!({
            "id": null,
            "title": null,
            "image": null,
            "score": 0,
            "missing": null,
            "matched": [],
            "source": "stub"
        }))
        .unwrap();

        assert_eq!(recipe.id, None);
        assert_eq!(recipe.display_title(), "Untitled recipe");
        assert!(recipe.missing.is_empty());
    }

    #[test]
    fn test_detail_distinguishes_null_from_absent() {
        let detail: RecipeDetail = serde_json::from_value(json!({
            "id": 1,
            "image": null,
            "readyInMinutes": 25,
            "analyzedInstructions": [{"name": "", "steps": [{"number": 1, "step": "Sear the steak"}]}]
        }))
        .unwrap();

        assert_eq!(detail.id, Some(Some(1)));
        assert_eq!(detail.image, Some(None));
        assert_eq!(detail.ready_in_minutes, Some(Some(25)));
        assert_eq!(detail.servings, None);
        assert_eq!(detail.title, None);
        assert_eq!(detail.matched, None);
        assert_eq!(detail.analyzed_instructions.unwrap()[0].steps[0].step, "Sear the steak");
    }

    #[test]
    fn test_search_request_omits_unset_filters() {
        let request = SearchRequest {
            ingredients: vec!["steak".to_string()],
            cuisine: Some("mexican".to_string()),
            meal_type: None,
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({"ingredients": ["steak"], "cuisine": "mexican"}));
    }
}
