//! User preference factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for `user_preferences` rows, defaulting to the application defaults.
pub struct UserPreferenceFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    theme: String,
    language: String,
}

impl<'a> UserPreferenceFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            theme: "auto".to_string(),
            language: "zh-TW".to_string(),
        }
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub async fn build(self) -> Result<entity::user_preference::Model, DbErr> {
        let now = Utc::now();
        entity::user_preference::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(self.user_id),
            theme: ActiveValue::Set(self.theme),
            language: ActiveValue::Set(self.language),
            timezone: ActiveValue::Set("Asia/Taipei".to_string()),
            auto_save: ActiveValue::Set(true),
            notifications: ActiveValue::Set(true),
            email_notifications: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_preference(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::user_preference::Model, DbErr> {
    UserPreferenceFactory::new(db, user_id).build().await
}
