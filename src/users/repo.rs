use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::calculator::{ActivityLevel, Goal, Sex};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub idp_id: String,
    pub email: String,
    pub name: Option<String>,
    pub sex: Option<Sex>,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
    pub dietary_restrictions: Vec<String>,
    pub subscription_tier: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// The demographic subset the calculator needs, with all fields present.
#[derive(Debug, Clone, Copy)]
pub struct NutritionProfile {
    pub sex: Sex,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

impl User {
    /// Finds or creates the row owned by this identity-provider id. The email
    /// refreshes on every call so a provider-side change propagates.
    pub async fn ensure(
        db: &PgPool,
        idp_id: &str,
        email: &str,
        name: Option<&str>,
    ) -> anyhow::Result<Uuid> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO users (idp_id, email, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (idp_id)
            DO UPDATE SET email = EXCLUDED.email, updated_at = now()
            RETURNING id
            "#,
        )
        .bind(idp_id)
        .bind(email)
        .bind(name)
        .fetch_one(db)
        .await?;
        Ok(id)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, idp_id, email, name, sex, age, height_cm, weight_kg,
                   activity_level, goal, dietary_restrictions, subscription_tier,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        name: Option<&str>,
        sex: Option<Sex>,
        age: Option<i32>,
        height_cm: Option<f64>,
        weight_kg: Option<f64>,
        activity_level: Option<ActivityLevel>,
        goal: Option<Goal>,
        dietary_restrictions: &[String],
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, sex = $3, age = $4, height_cm = $5, weight_kg = $6,
                activity_level = $7, goal = $8, dietary_restrictions = $9,
                updated_at = now()
            WHERE id = $1
            RETURNING id, idp_id, email, name, sex, age, height_cm, weight_kg,
                      activity_level, goal, dietary_restrictions, subscription_tier,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(sex)
        .bind(age)
        .bind(height_cm)
        .bind(weight_kg)
        .bind(activity_level)
        .bind(goal)
        .bind(dietary_restrictions)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Collects the calculator inputs, or the list of missing field names.
    pub fn nutrition_profile(&self) -> Result<NutritionProfile, Vec<&'static str>> {
        let mut missing = Vec::new();
        if self.sex.is_none() {
            missing.push("sex");
        }
        if self.age.is_none() {
            missing.push("age");
        }
        if self.height_cm.is_none() {
            missing.push("height_cm");
        }
        if self.weight_kg.is_none() {
            missing.push("weight_kg");
        }
        if self.activity_level.is_none() {
            missing.push("activity_level");
        }
        if self.goal.is_none() {
            missing.push("goal");
        }
        let (
            Some(sex),
            Some(age),
            Some(height_cm),
            Some(weight_kg),
            Some(activity_level),
            Some(goal),
        ) = (
            self.sex,
            self.age,
            self.height_cm,
            self.weight_kg,
            self.activity_level,
            self.goal,
        )
        else {
            return Err(missing);
        };

        // A negative stored age is as unusable as a missing one.
        let age_years = u32::try_from(age).map_err(|_| vec!["age"])?;

        Ok(NutritionProfile {
            sex,
            weight_kg,
            height_cm,
            age_years,
            activity_level,
            goal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn blank_user() -> User {
        User {
            id: Uuid::new_v4(),
            idp_id: "idp|1".into(),
            email: "a@b.co".into(),
            name: None,
            sex: None,
            age: None,
            height_cm: None,
            weight_kg: None,
            activity_level: None,
            goal: None,
            dietary_restrictions: vec![],
            subscription_tier: "free".into(),
            created_at: datetime!(2024-01-01 00:00 UTC),
            updated_at: datetime!(2024-01-01 00:00 UTC),
        }
    }

    #[test]
    fn nutrition_profile_lists_every_missing_field() {
        let user = blank_user();
        let missing = user.nutrition_profile().unwrap_err();
        assert_eq!(
            missing,
            vec!["sex", "age", "height_cm", "weight_kg", "activity_level", "goal"]
        );
    }

    #[test]
    fn nutrition_profile_resolves_when_complete() {
        let mut user = blank_user();
        user.sex = Some(Sex::Female);
        user.age = Some(28);
        user.height_cm = Some(165.0);
        user.weight_kg = Some(60.0);
        user.activity_level = Some(ActivityLevel::ModeratelyActive);
        user.goal = Some(Goal::EatHealthy);

        let profile = user.nutrition_profile().unwrap();
        assert_eq!(profile.age_years, 28);
        assert_eq!(profile.goal, Goal::EatHealthy);
    }

    #[test]
    fn nutrition_profile_rejects_negative_age() {
        let mut user = blank_user();
        user.sex = Some(Sex::Male);
        user.age = Some(-1);
        user.height_cm = Some(180.0);
        user.weight_kg = Some(80.0);
        user.activity_level = Some(ActivityLevel::Sedentary);
        user.goal = Some(Goal::MaintainWeight);

        assert_eq!(user.nutrition_profile().unwrap_err(), vec!["age"]);
    }
}
