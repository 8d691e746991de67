//! Push command - publish parameters and reconcile a task definition.
//!
//! Strictly sequential: parse and filter both inputs once, publish the plain
//! variables, then the secrets, then rewrite the task definition if one was
//! given. The first error aborts the rest of the run; parameters already
//! upserted stay in place (the key space is idempotent, not transactional).

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cli::output;
use crate::core::publisher::{self, RateLimiter};
use crate::core::remote::aws::{SsmStore, StsSecretResolver};
use crate::core::remote::ParameterKind;
use crate::core::taskdef;
use crate::core::vars::{self, VarMap};
use crate::error::{Result, SyncError};

/// Inputs for one push run.
pub struct PushArgs {
    pub environment_variables: Option<String>,
    pub secrets: Option<String>,
    pub prefix: String,
    pub ignore_pattern: Option<String>,
    pub task_definition: Option<String>,
    pub container_name: Option<String>,
    pub allow_removal: bool,
    pub workspace: String,
    pub dry_run: bool,
}

/// Publish parameters and optionally rewrite a task definition.
pub fn execute(args: PushArgs) -> Result<()> {
    let mut env_vars = vars::parse_vars(
        "environment-variables",
        args.environment_variables.as_deref(),
    )?;
    let mut secrets = vars::parse_vars("secrets", args.secrets.as_deref())?;

    // Filter once; the publisher and the reconciler see identical sets
    let ignore = vars::compile_ignore_pattern(args.ignore_pattern.as_deref())?;
    vars::filter_ignored(&mut env_vars, &ignore);
    vars::filter_ignored(&mut secrets, &ignore);

    info!(
        env_vars = env_vars.len(),
        secrets = secrets.len(),
        prefix = %args.prefix,
        "running push"
    );

    // The AWS SDK is async; run the whole pipeline on a current-thread runtime
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| SyncError::RemoteCall(format!("failed to create runtime: {}", e)))?;

    rt.block_on(run(args, env_vars, secrets))
}

async fn run(args: PushArgs, env_vars: VarMap, secrets: VarMap) -> Result<()> {
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let total = env_vars.len() + secrets.len();

    if total > 0 {
        if args.dry_run {
            for name in env_vars.keys() {
                debug!("dry-run: would put {}{}", args.prefix, name);
            }
            for name in secrets.keys() {
                debug!("dry-run: would put secret {}{}", args.prefix, name);
            }
            output::warn(&format!("dry-run: skipped {} puts", total));
        } else {
            let store = SsmStore::new(&config);
            let limiter = RateLimiter::default();

            // Plain variables complete fully before secrets begin
            publisher::publish(
                &store,
                ParameterKind::Plain,
                &env_vars,
                &args.prefix,
                &limiter,
            )
            .await?;
            publisher::publish(
                &store,
                ParameterKind::Secret,
                &secrets,
                &args.prefix,
                &limiter,
            )
            .await?;

            output::success(&format!("published {} parameters", total));
        }
    }

    if let (Some(file), Some(container)) = (&args.task_definition, &args.container_name) {
        debug!(
            "task definition file: {} and container name: {}",
            file, container
        );

        let doc = taskdef::load_task_definition(file, Path::new(&args.workspace))?;
        let resolver = StsSecretResolver::new(&config);

        let updated = taskdef::reconcile(
            doc,
            container,
            &args.prefix,
            &env_vars,
            &secrets,
            args.allow_removal,
            &resolver,
        )
        .await?;

        let out_dir = std::env::var_os("RUNNER_TEMP")
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        let path = taskdef::write_task_definition(&updated, &out_dir)?;

        output::success("task definition updated");
        println!("{}", path.display());
    }

    Ok(())
}
