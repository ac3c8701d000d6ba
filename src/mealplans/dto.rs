use serde::Deserialize;
use time::Date;

use crate::mealplans::repo::PlanDay;
use crate::nutrition::calculator::Goal;

/// A generated plan, stored wholesale; read-only afterwards.
#[derive(Debug, Deserialize)]
pub struct CreateMealPlanRequest {
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub goal: Option<Goal>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    pub meals: Vec<PlanDay>,
    #[serde(default)]
    pub shopping_list: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_request_parses_nested_days() {
        let req: CreateMealPlanRequest = serde_json::from_str(
            r#"{
                "name": "cut week",
                "start_date": "2024-06-03",
                "end_date": "2024-06-09",
                "goal": "lose_weight",
                "meals": [
                    {
                        "date": "2024-06-03",
                        "meals": [
                            {"meal_type": "breakfast", "recipe": {"title": "Oats"}}
                        ]
                    }
                ],
                "shopping_list": ["oats", "milk"]
            }"#,
        )
        .unwrap();
        assert_eq!(req.meals.len(), 1);
        assert_eq!(req.meals[0].meals[0].meal_type, "breakfast");
        assert_eq!(req.shopping_list.len(), 2);
    }
}
