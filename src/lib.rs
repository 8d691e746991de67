//! Paramsync - push environment variables and secrets to SSM Parameter Store
//! and keep ECS task definitions in step with them.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── push          # Publish parameters + reconcile a task definition
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── vars          # JSON-object input parsing and ignore-pattern filtering
//!     ├── publisher     # Rate-limited parameter upserts
//!     ├── taskdef       # Task-definition model and merge logic
//!     └── remote/       # External capabilities
//!         ├── mod       # ParameterStore / SecretResolver traits
//!         └── aws       # SSM and STS implementations
//! ```
//!
//! # Features
//!
//! - Idempotent upserts of plain (String) and secret (SecureString) parameters
//! - Find-or-create merge of container `environment` and `secrets` lists
//! - Wholesale-replace mode (`--allow-removal`) for drifted containers
//! - Regex exclusion shared by publishing and reconciliation
//! - Fail-fast: no retries, no partial output artifact

pub mod cli;
pub mod core;
pub mod error;
