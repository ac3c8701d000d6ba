use serde::Deserialize;

use crate::recipes::repo::ChefMode;

/// The generation flow's output, stored as-is. The AI call itself happens
/// outside this service.
#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    pub prep_time_min: Option<i32>,
    pub cook_time_min: Option<i32>,
    pub servings: Option<i32>,
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub chef_mode: ChefMode,
    pub difficulty: Option<String>,
    pub cuisine: Option<String>,
    pub meal_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecipeListQuery {
    pub chef_mode: Option<ChefMode>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Deserialize)]
pub struct SaveRecipeRequest {
    #[serde(default = "default_collection")]
    pub collection_name: String,
}

fn default_collection() -> String {
    "favorites".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_defaults() {
        let q: RecipeListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.limit, 20);
        assert_eq!(q.offset, 0);
        assert!(q.chef_mode.is_none());
    }

    #[test]
    fn chef_mode_meal_plan_is_snake_case() {
        let q: RecipeListQuery = serde_json::from_str(r#"{"chef_mode": "meal_plan"}"#).unwrap();
        assert_eq!(q.chef_mode, Some(ChefMode::MealPlan));
    }

    #[test]
    fn save_request_defaults_to_favorites() {
        let req: SaveRecipeRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.collection_name, "favorites");
    }
}
