use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::{IntoParams, ToSchema};

use crate::model::api::UnknownVariant;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" => Ok(Self::Auto),
            _ => Err(UnknownVariant::new("theme", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct UserPreferenceDto {
    pub id: i32,
    pub user_id: i32,
    pub theme: Theme,
    pub language: String,
    pub timezone: String,
    pub auto_save: bool,
    pub notifications: bool,
    pub email_notifications: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Missing fields take the documented defaults. `theme` stays a string so a
/// bad value in a batch is reported per item.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CreateUserPreferenceDto {
    pub user_id: i32,
    pub theme: Option<String>,
    pub language: Option<String>,
    pub timezone: Option<String>,
    pub auto_save: Option<bool>,
    pub notifications: Option<bool>,
    pub email_notifications: Option<bool>,
}

/// Used by both `PUT /user-preferences/{id}` and the per-user upsert.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, ToSchema)]
pub struct UpdateUserPreferenceDto {
    pub theme: Option<String>,
    pub language: Option<String>,
    pub timezone: Option<String>,
    pub auto_save: Option<bool>,
    pub notifications: Option<bool>,
    pub email_notifications: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserPreferenceFilterQuery {
    pub theme: Option<Theme>,
    pub language: Option<String>,
}
