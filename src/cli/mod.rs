//! Command-line interface.

pub mod completions;
pub mod output;
pub mod push;

use clap::{Parser, Subcommand};

/// Paramsync - sync environment variables and secrets into SSM and ECS.
#[derive(Parser)]
#[command(
    name = "paramsync",
    about = "Sync environment variables and secrets to SSM Parameter Store and ECS task definitions",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Publish parameters and optionally rewrite a task definition
    Push {
        /// Environment variables as a JSON object string
        #[arg(long, env = "PARAMSYNC_ENVIRONMENT_VARIABLES")]
        environment_variables: Option<String>,

        /// Secrets as a JSON object string
        #[arg(long, env = "PARAMSYNC_SECRETS", hide_env_values = true)]
        secrets: Option<String>,

        /// Parameter name prefix (e.g. /my-service/)
        #[arg(long, default_value = "")]
        prefix: String,

        /// Regex excluding matching names from publishing and reconciliation
        #[arg(long)]
        ignore_pattern: Option<String>,

        /// Path to an ECS task definition, absolute or relative to the workspace
        #[arg(long, requires = "container_name")]
        task_definition: Option<String>,

        /// Container whose environment and secrets lists are rewritten
        #[arg(long, requires = "task_definition")]
        container_name: Option<String>,

        /// Reset the container's environment and secrets lists before merging
        #[arg(long)]
        allow_removal: bool,

        /// Root for relative task-definition paths
        #[arg(long, env = "GITHUB_WORKSPACE", default_value = ".")]
        workspace: String,

        /// Log puts without calling the parameter store
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    match command {
        Command::Push {
            environment_variables,
            secrets,
            prefix,
            ignore_pattern,
            task_definition,
            container_name,
            allow_removal,
            workspace,
            dry_run,
        } => push::execute(push::PushArgs {
            environment_variables,
            secrets,
            prefix,
            ignore_pattern,
            task_definition,
            container_name,
            allow_removal,
            workspace,
            dry_run,
        }),
        Command::Completions { shell } => completions::execute(shell),
    }
}
