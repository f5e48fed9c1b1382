use crate::model::SearchRequest;
use crate::ClientError;

/// Cuisines the search service knows how to focus on
pub const KNOWN_CUISINES: &[&str] = &[
    "mexican",
    "italian",
    "american",
    "vietnamese",
    "asian",
    "mediterranean",
    "indian",
    "french",
    "thai",
    "spanish",
    "filipino",
    "middle eastern",
];

/// Meal types the search service knows how to focus on
pub const KNOWN_MEAL_TYPES: &[&str] = &["breakfast", "lunch", "dinner", "snack", "dessert"];

/// Ordered, case-insensitively distinct list of ingredient names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSet {
    items: Vec<String>,
}

impl IngredientSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the working set with a detection result.
    ///
    /// Prior edits are discarded, not merged.
    pub fn seed<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.items.clear();
        for name in names {
            self.add(name.as_ref());
        }
    }

    /// Appends `name` unless it is blank or already present.
    ///
    /// Returns whether the set changed.
    pub fn add(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.items.push(trimmed.to_string());
        true
    }

    /// Removes the entry at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        let key = normalize(name);
        self.items.iter().any(|item| normalize(item) == key)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        let key = normalize(name);
        self.items.iter().position(|item| normalize(item) == key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    /// Builds the search request for this set.
    ///
    /// # Errors
    /// Returns `ClientError::EmptyIngredients` when there is nothing to search for
    pub fn confirm(&self, filters: &SearchFilters) -> Result<SearchRequest, ClientError> {
        if self.is_empty() {
            return Err(ClientError::EmptyIngredients);
        }
        Ok(SearchRequest {
            ingredients: self.items.clone(),
            cuisine: filters.cuisine.clone(),
            meal_type: filters.meal_type.clone(),
        })
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Optional refinements passed through to the search service unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub cuisine: Option<String>,
    pub meal_type: Option<String>,
}

impl SearchFilters {
    /// Sets the cuisine; a blank value clears it
    pub fn set_cuisine(&mut self, cuisine: Option<&str>) {
        self.cuisine = non_blank(cuisine);
    }

    /// Sets the meal type; a blank value clears it
    pub fn set_meal_type(&mut self, meal_type: Option<&str>) {
        self.meal_type = non_blank(meal_type);
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}
