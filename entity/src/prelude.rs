pub use super::archive_task::Entity as ArchiveTask;
pub use super::drone::Entity as Drone;
pub use super::drone_command::Entity as DroneCommand;
pub use super::drone_command_archive::Entity as DroneCommandArchive;
pub use super::drone_command_queue::Entity as DroneCommandQueue;
pub use super::drone_position::Entity as DronePosition;
pub use super::drone_position_archive::Entity as DronePositionArchive;
pub use super::drone_real_time_status::Entity as DroneRealTimeStatus;
pub use super::drone_status_archive::Entity as DroneStatusArchive;
pub use super::permission::Entity as Permission;
pub use super::role::Entity as Role;
pub use super::role_permission::Entity as RolePermission;
pub use super::user::Entity as User;
pub use super::user_preference::Entity as UserPreference;
pub use super::user_role::Entity as UserRole;
