use chrono::{DateTime, Utc};

use crate::{
    model::rbac::{
        CreatePermissionDto, CreateRoleDto, CreateUserDto, PermissionDto, RoleDto,
        UpdatePermissionDto, UpdateRoleDto, UpdateUserDto, UserDto,
    },
    server::{error::validation::ValidationError, util::validate},
};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 50;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_NAME_LEN: usize = 100;

/// An account that can be granted roles.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// Unique login name.
    pub username: String,
    /// Unique contact address.
    pub email: String,
    pub display_name: Option<String>,
    /// Deactivated users keep their role assignments.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts a `user` row into the domain model.
    ///
    /// # Arguments
    /// - `entity` - Row loaded from the `users` table
    ///
    /// # Returns
    /// - `User` - Domain model with identical fields
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            display_name: entity.display_name,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            email: self.email,
            display_name: self.display_name,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A named bundle of permissions.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn from_entity(entity: entity::role::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            display_name: entity.display_name,
            description: entity.description,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> RoleDto {
        RoleDto {
            id: self.id,
            name: self.name,
            display_name: self.display_name,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A single `resource:action` grant.
#[derive(Debug, Clone, PartialEq)]
pub struct Permission {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Permission {
    /// Converts a `permission` row into the domain model.
    pub fn from_entity(entity: entity::permission::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> PermissionDto {
        PermissionDto {
            id: self.id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Usernames are 3 to 50 characters of ASCII letters, digits, `_`, `.` or `-`.
pub fn validate_username(value: &str) -> Result<String, ValidationError> {
    let username = validate::non_empty("username", value)?;
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return Err(ValidationError::new(
            "username",
            format!(
                "must be between {} and {} characters",
                MIN_USERNAME_LEN, MAX_USERNAME_LEN
            ),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(ValidationError::new(
            "username",
            "may only contain letters, digits, '_', '.' and '-'",
        ));
    }
    Ok(username)
}

/// Exactly one `@` with text on both sides and no whitespace.
pub fn validate_email(value: &str) -> Result<String, ValidationError> {
    let email = validate::bounded_text("email", value, MAX_EMAIL_LEN)?;
    let mut parts = email.split('@');
    let valid = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.chars().any(char::is_whitespace)
        }
        _ => false,
    };
    if !valid {
        return Err(ValidationError::new("email", "must be a valid email address"));
    }
    Ok(email.to_lowercase())
}

/// Permission names take the form `resource:action`, both parts non-empty.
pub fn validate_permission_name(value: &str) -> Result<String, ValidationError> {
    let name = validate::bounded_text("name", value, MAX_NAME_LEN)?;
    let valid = match name.split_once(':') {
        Some((resource, action)) => {
            !resource.is_empty()
                && !action.is_empty()
                && !action.contains(':')
                && !name.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::new(
            "name",
            "must have the form 'resource:action'",
        ));
    }
    Ok(name)
}

fn optional_text(
    field: &str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => validate::bounded_text(field, text, max).map(Some),
    }
}

/// Fields required to register a user.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateUserParams {
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub is_active: bool,
}

impl CreateUserParams {
    pub fn from_dto(dto: CreateUserDto) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            display_name: dto.display_name,
            is_active: dto.is_active.unwrap_or(true),
        }
    }

    pub fn validate(self) -> Result<Self, ValidationError> {
        Ok(Self {
            username: validate_username(&self.username)?,
            email: validate_email(&self.email)?,
            display_name: optional_text("display_name", self.display_name, MAX_NAME_LEN)?,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateUserParams {
    pub username: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUserParams {
    pub fn from_dto(dto: UpdateUserDto) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            display_name: dto.display_name,
            is_active: dto.is_active,
        }
    }

    pub fn validate(self) -> Result<Self, ValidationError> {
        Ok(Self {
            username: self.username.as_deref().map(validate_username).transpose()?,
            email: self.email.as_deref().map(validate_email).transpose()?,
            display_name: optional_text("display_name", self.display_name, MAX_NAME_LEN)?,
            is_active: self.is_active,
        })
    }
}

/// Optional filters for listing users.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateRoleParams {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
}

impl CreateRoleParams {
    pub fn from_dto(dto: CreateRoleDto) -> Self {
        Self {
            name: dto.name,
            display_name: dto.display_name,
            description: dto.description,
        }
    }

    pub fn validate(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate::bounded_text("name", &self.name, MAX_NAME_LEN)?,
            display_name: optional_text("display_name", self.display_name, MAX_NAME_LEN)?,
            description: self.description,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateRoleParams {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
}

impl UpdateRoleParams {
    pub fn from_dto(dto: UpdateRoleDto) -> Self {
        Self {
            name: dto.name,
            display_name: dto.display_name,
            description: dto.description,
        }
    }

    pub fn validate(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: self
                .name
                .map(|n| validate::bounded_text("name", &n, MAX_NAME_LEN))
                .transpose()?,
            display_name: optional_text("display_name", self.display_name, MAX_NAME_LEN)?,
            description: self.description,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatePermissionParams {
    pub name: String,
    pub description: Option<String>,
}

impl CreatePermissionParams {
    pub fn from_dto(dto: CreatePermissionDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
        }
    }

    pub fn validate(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_permission_name(&self.name)?,
            description: self.description,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdatePermissionParams {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdatePermissionParams {
    pub fn from_dto(dto: UpdatePermissionDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
        }
    }

    pub fn validate(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: self
                .name
                .as_deref()
                .map(validate_permission_name)
                .transpose()?,
            description: self.description,
        })
    }
}
