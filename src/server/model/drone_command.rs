use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use serde_json::Value;

use crate::{
    model::drone_command::{
        CommandStatus, CommandType, CreateDroneCommandDto, DroneCommandDto,
        DroneCommandStatisticsDto,
    },
    server::{error::validation::ValidationError, model::parse_stored, util::validate},
};

pub const MAX_TAKEOFF_ALTITUDE: f64 = 500.0;

/// A command issued to a drone.
#[derive(Debug, Clone, PartialEq)]
pub struct DroneCommand {
    pub id: i32,
    pub drone_id: i32,
    pub command_type: CommandType,
    /// Type-specific payload, checked by `validate_command_data` on the way in.
    pub command_data: Option<Value>,
    pub status: CommandStatus,
    /// User who issued the command.
    pub issued_by: Option<i32>,
    pub issued_at: DateTime<Utc>,
    /// Set when the command enters `executing`.
    pub executed_at: Option<DateTime<Utc>>,
    /// Set when the command reaches a terminal status.
    pub completed_at: Option<DateTime<Utc>>,
    /// Failure reason, kept only for `failed`.
    pub error_message: Option<String>,
}

impl DroneCommand {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The drone command entity from the database
    ///
    /// # Returns
    /// - `Ok(DroneCommand)` - Converted domain model
    /// - `Err(DbErr::Type)` - Stored command type or status is not a known value
    pub fn from_entity(entity: entity::drone_command::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            drone_id: entity.drone_id,
            command_type: parse_stored(&entity.command_type)?,
            command_data: entity.command_data,
            status: parse_stored(&entity.status)?,
            issued_by: entity.issued_by,
            issued_at: entity.issued_at,
            executed_at: entity.executed_at,
            completed_at: entity.completed_at,
            error_message: entity.error_message,
        })
    }

    pub fn into_dto(self) -> DroneCommandDto {
        DroneCommandDto {
            id: self.id,
            drone_id: self.drone_id,
            command_type: self.command_type,
            command_data: self.command_data,
            status: self.status,
            issued_by: self.issued_by,
            issued_at: self.issued_at,
            executed_at: self.executed_at,
            completed_at: self.completed_at,
            error_message: self.error_message,
        }
    }
}

/// Statuses a command or queue entry may move to from `from`.
pub fn allowed_transitions(from: CommandStatus) -> &'static [CommandStatus] {
    use CommandStatus::*;

    match from {
        Pending => &[Executing, Cancelled, Failed],
        Executing => &[Completed, Failed],
        Completed | Failed | Cancelled => &[],
    }
}

/// Whether the whitelist allows moving from `from` to `to`.
pub fn can_transition(from: CommandStatus, to: CommandStatus) -> bool {
    allowed_transitions(from).contains(&to)
}

/// Timestamps and error text to store when entering `status`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusStamp {
    pub status: CommandStatus,
    pub executed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

impl StatusStamp {
    /// `executed_at` is set entering `executing`; `completed_at` entering any terminal
    /// state. The error message is only kept for `failed`.
    pub fn new(status: CommandStatus, error_message: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            status,
            executed_at: (status == CommandStatus::Executing).then_some(now),
            completed_at: status.is_terminal().then_some(now),
            error_message: if status == CommandStatus::Failed {
                error_message
            } else {
                None
            },
        }
    }
}

/// Parameters for issuing a command.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDroneCommandParams {
    pub drone_id: i32,
    pub command_type: CommandType,
    pub command_data: Option<Value>,
    pub issued_by: Option<i32>,
}

impl CreateDroneCommandParams {
    /// Checks field types and per-command payload requirements.
    ///
    /// `drone_id` arrives as raw JSON so a string or fractional id is reported as a
    /// validation error on that field rather than a body rejection.
    ///
    /// # Returns
    /// - `Ok(Self)` - Typed parameters with a payload valid for the command type
    /// - `Err(ValidationError)` - Bad drone id, unknown command type or invalid payload
    pub fn from_dto(dto: CreateDroneCommandDto) -> Result<Self, ValidationError> {
        let drone_id = parse_drone_id(&dto.drone_id)?;
        let command_type = dto
            .command_type
            .trim()
            .parse::<CommandType>()
            .map_err(|e| ValidationError::new("command_type", e.to_string()))?;

        validate_command_data(command_type, dto.command_data.as_ref())?;

        Ok(Self {
            drone_id,
            command_type,
            command_data: dto.command_data,
            issued_by: dto.issued_by,
        })
    }
}

fn parse_drone_id(value: &Value) -> Result<i32, ValidationError> {
    let id = value
        .as_i64()
        .ok_or_else(|| ValidationError::new("drone_id", "must be a number"))?;
    let id = i32::try_from(id)
        .map_err(|_| ValidationError::new("drone_id", "is out of range"))?;
    validate::positive_id("drone_id", id)
}

/// Validates the payload a command type needs.
///
/// `fly_to` requires a target latitude/longitude and a positive altitude; `takeoff`
/// optionally carries an altitude up to 500 m; moves need a positive `distance` and
/// rotations a positive `degrees`.
pub fn validate_command_data(
    command_type: CommandType,
    data: Option<&Value>,
) -> Result<(), ValidationError> {
    if let Some(data) = data {
        if !data.is_object() && !data.is_null() {
            return Err(ValidationError::new("command_data", "must be an object"));
        }
    }

    let number = |key: &str| -> Option<f64> { data.and_then(|d| d.get(key)).and_then(Value::as_f64) };
    let present = |key: &str| data.and_then(|d| d.get(key)).is_some_and(|v| !v.is_null());

    match command_type {
        CommandType::FlyTo => {
            let latitude = number("latitude").ok_or_else(|| {
                ValidationError::new("command_data.latitude", "is required and must be a number")
            })?;
            validate::in_range("command_data.latitude", latitude, -90.0, 90.0)?;

            let longitude = number("longitude").ok_or_else(|| {
                ValidationError::new("command_data.longitude", "is required and must be a number")
            })?;
            validate::in_range("command_data.longitude", longitude, -180.0, 180.0)?;

            match number("altitude") {
                Some(altitude) if altitude > 0.0 => Ok(()),
                _ => Err(ValidationError::new(
                    "command_data.altitude",
                    "is required and must be greater than 0",
                )),
            }
        }
        CommandType::Takeoff => {
            if !present("altitude") {
                return Ok(());
            }
            match number("altitude") {
                Some(altitude) if altitude > 0.0 && altitude <= MAX_TAKEOFF_ALTITUDE => Ok(()),
                _ => Err(ValidationError::new(
                    "command_data.altitude",
                    format!("must be greater than 0 and at most {}", MAX_TAKEOFF_ALTITUDE),
                )),
            }
        }
        t if t.is_move() => match number("distance") {
            Some(distance) if distance > 0.0 => Ok(()),
            _ => Err(ValidationError::new(
                "command_data.distance",
                "is required and must be greater than 0",
            )),
        },
        t if t.is_rotate() => match number("degrees") {
            Some(degrees) if degrees > 0.0 => Ok(()),
            _ => Err(ValidationError::new(
                "command_data.degrees",
                "is required and must be greater than 0",
            )),
        },
        _ => Ok(()),
    }
}

/// Optional filters for listing commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DroneCommandFilter {
    pub drone_id: Option<i32>,
    pub status: Option<CommandStatus>,
    pub command_type: Option<CommandType>,
}

/// Command counts per status and per type; every variant is listed.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandStatistics {
    pub by_status: Vec<(CommandStatus, u64)>,
    pub by_type: Vec<(CommandType, u64)>,
}

fn fill<K: Copy + PartialEq>(all: &[K], counts: &[(K, u64)]) -> Vec<(K, u64)> {
    all.iter()
        .map(|key| {
            let count = counts
                .iter()
                .filter(|(k, _)| k == key)
                .map(|(_, n)| n)
                .sum();
            (*key, count)
        })
        .collect()
}

impl CommandStatistics {
    /// Fills in zero for every status and type missing from the counts.
    pub fn from_counts(by_status: &[(CommandStatus, u64)], by_type: &[(CommandType, u64)]) -> Self {
        Self {
            by_status: fill(&CommandStatus::ALL, by_status),
            by_type: fill(&CommandType::ALL, by_type),
        }
    }

    pub fn into_dto(self) -> DroneCommandStatisticsDto {
        DroneCommandStatisticsDto {
            total: self.by_status.iter().map(|(_, n)| n).sum(),
            by_status: self
                .by_status
                .into_iter()
                .map(|(status, n)| (status.as_str().to_string(), n))
                .collect(),
            by_type: self
                .by_type
                .into_iter()
                .map(|(command_type, n)| (command_type.as_str().to_string(), n))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dto(command_type: &str, data: Option<Value>) -> CreateDroneCommandDto {
        CreateDroneCommandDto {
            drone_id: json!(1),
            command_type: command_type.to_string(),
            command_data: data,
            issued_by: None,
        }
    }

    #[test]
    fn command_transition_table() {
        use CommandStatus::*;

        assert!(can_transition(Pending, Executing));
        assert!(can_transition(Pending, Cancelled));
        assert!(can_transition(Pending, Failed));
        assert!(!can_transition(Pending, Completed));
        assert!(can_transition(Executing, Completed));
        assert!(can_transition(Executing, Failed));
        assert!(!can_transition(Executing, Cancelled));
        for terminal in [Completed, Failed, Cancelled] {
            for to in CommandStatus::ALL {
                assert!(!can_transition(terminal, to));
            }
        }
    }

    #[test]
    fn status_stamp_sets_timestamps() {
        let now = Utc::now();

        let executing = StatusStamp::new(CommandStatus::Executing, None, now);
        assert_eq!(executing.executed_at, Some(now));
        assert_eq!(executing.completed_at, None);

        let failed = StatusStamp::new(CommandStatus::Failed, Some("motor".to_string()), now);
        assert_eq!(failed.completed_at, Some(now));
        assert_eq!(failed.error_message.as_deref(), Some("motor"));

        let completed = StatusStamp::new(CommandStatus::Completed, Some("ignored".to_string()), now);
        assert_eq!(completed.error_message, None);
    }

    #[test]
    fn rejects_non_numeric_drone_id() {
        let err = CreateDroneCommandParams::from_dto(CreateDroneCommandDto {
            drone_id: json!("abc"),
            ..dto("land", None)
        })
        .unwrap_err();
        assert_eq!(err.field, "drone_id");

        let err = CreateDroneCommandParams::from_dto(CreateDroneCommandDto {
            drone_id: json!(-4),
            ..dto("land", None)
        })
        .unwrap_err();
        assert_eq!(err.field, "drone_id");
    }

    #[test]
    fn rejects_unknown_command_type() {
        let err = CreateDroneCommandParams::from_dto(dto("barrel_roll", None)).unwrap_err();
        assert_eq!(err.field, "command_type");
    }

    #[test]
    fn fly_to_requires_target() {
        assert!(CreateDroneCommandParams::from_dto(dto(
            "fly_to",
            Some(json!({ "latitude": 25.0, "longitude": 121.5, "altitude": 100 }))
        ))
        .is_ok());

        let err = CreateDroneCommandParams::from_dto(dto(
            "fly_to",
            Some(json!({ "latitude": 25.0, "longitude": 121.5, "altitude": 0 })),
        ))
        .unwrap_err();
        assert_eq!(err.field, "command_data.altitude");

        let err = CreateDroneCommandParams::from_dto(dto("fly_to", None)).unwrap_err();
        assert_eq!(err.field, "command_data.latitude");
    }

    #[test]
    fn takeoff_altitude_is_optional_but_bounded() {
        assert!(CreateDroneCommandParams::from_dto(dto("takeoff", None)).is_ok());
        assert!(CreateDroneCommandParams::from_dto(dto(
            "takeoff",
            Some(json!({ "altitude": 500 }))
        ))
        .is_ok());
        assert!(CreateDroneCommandParams::from_dto(dto(
            "takeoff",
            Some(json!({ "altitude": 501 }))
        ))
        .is_err());
    }

    #[test]
    fn move_and_rotate_need_positive_amounts() {
        assert!(CreateDroneCommandParams::from_dto(dto(
            "move_forward",
            Some(json!({ "distance": 10 }))
        ))
        .is_ok());
        assert!(CreateDroneCommandParams::from_dto(dto("move_left", None)).is_err());
        assert!(CreateDroneCommandParams::from_dto(dto(
            "rotate_right",
            Some(json!({ "degrees": -90 }))
        ))
        .is_err());
    }
}
