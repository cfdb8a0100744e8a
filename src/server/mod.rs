//! HTTP backend for the drone fleet.
//!
//! The backend uses Axum as the web framework, SeaORM for database operations and
//! tokio-cron-scheduler for background maintenance.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers, OpenAPI annotations and DTO conversion
//! - **Service Layer** (`service/`) - Business rules, transactions and status transitions
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models, operation parameters and validation
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state
//! - **Startup** (`startup`) - Tracing, database connection and CORS setup
//! - **Router** (`router`) - Route table and Swagger UI at `/api/docs`
//! - **Scheduler** (`scheduler/`) - Hourly archiving, queue cleanup and stale status sweeps
//!
//! # Request Flow
//!
//! 1. **Router** matches the request and hands it to a controller
//! 2. **Controller** extracts path, query and body, converts DTOs to params, calls a service
//! 3. **Service** validates, enforces business rules and calls repositories
//! 4. **Data** queries the database and converts entities to domain models
//! 5. **Controller** converts the domain model back to a DTO inside the response envelope

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
