use std::fmt;

use crate::clients::Call;
use crate::image::ImageFile;
use crate::ingredients::{IngredientSet, SearchFilters};
use crate::model::RankedRecipe;
use crate::upload::UploadPolicy;

/// The workflow's current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Upload,
    Processing,
    Ingredients,
    Recipes,
    Error,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Upload => "upload",
            Stage::Processing => "processing",
            Stage::Ingredients => "ingredients",
            Stage::Recipes => "recipes",
            Stage::Error => "error",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The external call a `processing` stage is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Upload,
    Detect,
    Search,
}

/// One photo's journey: the raw image, its remote id once uploaded, and the stage
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(super) image: Option<ImageFile>,
    pub(super) remote_image_id: Option<String>,
    pub(super) stage: Stage,
}

impl Session {
    pub fn image(&self) -> Option<&ImageFile> {
        self.image.as_ref()
    }

    /// Only set once the upload has succeeded
    pub fn remote_image_id(&self) -> Option<&str> {
        self.remote_image_id.as_deref()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorState {
    pub message: String,
    pub failed: Call,
}

/// The recipe whose detail is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub recipe_id: Option<i64>,
    pub loading: bool,
}

/// Everything one user journey owns.
///
/// Only [`update`](super::update) changes it; readers go through the accessors.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub(super) policy: UploadPolicy,
    pub(super) session: Session,
    pub(super) version: u64,
    pub(super) pending: Option<Pending>,
    pub(super) ingredients: IngredientSet,
    pub(super) filters: SearchFilters,
    pub(super) raw_terms: Vec<String>,
    pub(super) recipes: Vec<RankedRecipe>,
    pub(super) selection: Option<Selection>,
    pub(super) notice: Option<String>,
    pub(super) error: Option<ErrorState>,
}

impl AppState {
    pub fn new(policy: UploadPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn stage(&self) -> Stage {
        self.session.stage
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Stamp carried by every effect; results with another stamp are stale
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    pub fn ingredients(&self) -> &IngredientSet {
        &self.ingredients
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    /// Labels exactly as detection reported them
    pub fn raw_terms(&self) -> &[String] {
        &self.raw_terms
    }

    pub fn recipes(&self) -> &[RankedRecipe] {
        &self.recipes
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn selected_recipe(&self) -> Option<&RankedRecipe> {
        self.selection
            .and_then(|selection| self.recipes.get(selection.index))
    }

    /// Local validation message shown on the upload stage
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn error(&self) -> Option<&ErrorState> {
        self.error.as_ref()
    }

    /// Whether ingredient edits are accepted right now
    pub fn is_editing(&self) -> bool {
        matches!(self.stage(), Stage::Ingredients | Stage::Recipes)
    }

    /// Confirm is enabled exactly when editing a non-empty set
    pub fn can_confirm(&self) -> bool {
        self.is_editing() && !self.ingredients.is_empty()
    }

    /// Drops everything but the upload policy and starts a fresh version
    pub(super) fn reset(&mut self) {
        let policy = std::mem::take(&mut self.policy);
        let version = self.version + 1;
        *self = Self {
            policy,
            version,
            ..Default::default()
        };
    }
}
