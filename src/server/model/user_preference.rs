use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::user_preference::{
        CreateUserPreferenceDto, Theme, UpdateUserPreferenceDto, UserPreferenceDto,
    },
    server::{error::validation::ValidationError, model::parse_stored, util::validate},
};

pub const DEFAULT_LANGUAGE: &str = "zh-TW";
pub const DEFAULT_TIMEZONE: &str = "Asia/Taipei";
pub const MAX_LANGUAGE_LEN: usize = 10;
pub const MAX_TIMEZONE_LEN: usize = 50;

/// Display and notification settings for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPreference {
    pub id: i32,
    pub user_id: i32,
    pub theme: Theme,
    /// BCP 47 tag such as `zh-TW`.
    pub language: String,
    /// IANA zone name.
    pub timezone: String,
    pub auto_save: bool,
    pub notifications: bool,
    pub email_notifications: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserPreference {
    /// Converts a `user_preference` row into the domain model.
    ///
    /// # Arguments
    /// - `entity` - Row loaded from the `user_preferences` table
    ///
    /// # Returns
    /// - `Ok(UserPreference)` - Row with its stored theme parsed
    /// - `Err(DbErr)` - Stored theme is not a known value
    pub fn from_entity(entity: entity::user_preference::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            theme: parse_stored(&entity.theme)?,
            language: entity.language,
            timezone: entity.timezone,
            auto_save: entity.auto_save,
            notifications: entity.notifications,
            email_notifications: entity.email_notifications,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> UserPreferenceDto {
        UserPreferenceDto {
            id: self.id,
            user_id: self.user_id,
            theme: self.theme,
            language: self.language,
            timezone: self.timezone,
            auto_save: self.auto_save,
            notifications: self.notifications,
            email_notifications: self.email_notifications,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A full preference row ready to insert, defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateUserPreferenceParams {
    pub user_id: i32,
    pub theme: Theme,
    pub language: String,
    pub timezone: String,
    pub auto_save: bool,
    pub notifications: bool,
    pub email_notifications: bool,
}

impl CreateUserPreferenceParams {
    /// Applies defaults and validates every field.
    pub fn from_dto(dto: CreateUserPreferenceDto) -> Result<Self, ValidationError> {
        let user_id = validate::positive_id("user_id", dto.user_id)?;
        let update = UpdateUserPreferenceParams::from_dto(UpdateUserPreferenceDto {
            theme: dto.theme,
            language: dto.language,
            timezone: dto.timezone,
            auto_save: dto.auto_save,
            notifications: dto.notifications,
            email_notifications: dto.email_notifications,
        })?;
        Ok(Self::defaults(user_id).apply(update))
    }

    /// Settings a user gets before choosing any.
    pub fn defaults(user_id: i32) -> Self {
        Self {
            user_id,
            theme: Theme::Auto,
            language: DEFAULT_LANGUAGE.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            auto_save: true,
            notifications: true,
            email_notifications: false,
        }
    }

    /// Overlays the present fields of `update`.
    pub fn apply(self, update: UpdateUserPreferenceParams) -> Self {
        Self {
            user_id: self.user_id,
            theme: update.theme.unwrap_or(self.theme),
            language: update.language.unwrap_or(self.language),
            timezone: update.timezone.unwrap_or(self.timezone),
            auto_save: update.auto_save.unwrap_or(self.auto_save),
            notifications: update.notifications.unwrap_or(self.notifications),
            email_notifications: update
                .email_notifications
                .unwrap_or(self.email_notifications),
        }
    }
}

/// Validated partial update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateUserPreferenceParams {
    pub theme: Option<Theme>,
    pub language: Option<String>,
    pub timezone: Option<String>,
    pub auto_save: Option<bool>,
    pub notifications: Option<bool>,
    pub email_notifications: Option<bool>,
}

impl UpdateUserPreferenceParams {
    pub fn from_dto(dto: UpdateUserPreferenceDto) -> Result<Self, ValidationError> {
        Ok(Self {
            theme: dto
                .theme
                .as_deref()
                .map(|t| {
                    t.trim()
                        .parse::<Theme>()
                        .map_err(|_| ValidationError::new("theme", "must be light, dark or auto"))
                })
                .transpose()?,
            language: dto
                .language
                .as_deref()
                .map(|l| validate::bounded_text("language", l, MAX_LANGUAGE_LEN))
                .transpose()?,
            timezone: dto
                .timezone
                .as_deref()
                .map(|t| validate::bounded_text("timezone", t, MAX_TIMEZONE_LEN))
                .transpose()?,
            auto_save: dto.auto_save,
            notifications: dto.notifications,
            email_notifications: dto.email_notifications,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPreferenceFilter {
    pub theme: Option<Theme>,
    pub language: Option<String>,
}
