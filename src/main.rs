//! Stratus CLI entrypoint.
//!
//! This is the main entrypoint for the stratus command-line tool.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use stratus_deploy::cli::{Cli, Commands, OutputFormatter, ScopeArgs};
use stratus_deploy::config::{find_workspace_file, ConfigValidator, TargetFilter, WorkspaceParser};
use stratus_deploy::error::Result;
use stratus_deploy::orchestrator::{OrchestrateOptions, Orchestrator};
use stratus_deploy::planner::{PlanFilters, Planner};
use stratus_deploy::provider::LocalStateProvider;
use stratus_deploy::resource::SortOrder;
use stratus_deploy::workspace::WorkspaceConfig;

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Lifecycle operations the CLI can run.
#[derive(Debug, Clone, Copy)]
enum LifecycleOp {
    Create,
    Update,
    Delete,
}

impl LifecycleOp {
    /// Plan direction for this operation; updates walk create order.
    const fn sort_order(self) -> SortOrder {
        match self {
            Self::Delete => SortOrder::Delete,
            Self::Create | Self::Update => SortOrder::Create,
        }
    }

    const fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Initialize logging
    init_logging(cli.verbose);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Up {
            scope,
            dry_run,
            yes,
            force,
        } => {
            cmd_apply(
                cli.workspace.as_deref(),
                &scope,
                LifecycleOp::Create,
                dry_run,
                yes,
                force,
                &formatter,
            )
            .await
        }
        Commands::Down {
            scope,
            dry_run,
            yes,
            force,
        } => {
            cmd_apply(
                cli.workspace.as_deref(),
                &scope,
                LifecycleOp::Delete,
                dry_run,
                yes,
                force,
                &formatter,
            )
            .await
        }
        Commands::Patch {
            scope,
            dry_run,
            yes,
            force,
        } => {
            cmd_apply(
                cli.workspace.as_deref(),
                &scope,
                LifecycleOp::Update,
                dry_run,
                yes,
                force,
                &formatter,
            )
            .await
        }
        Commands::Validate { warnings } => {
            cmd_validate(cli.workspace.as_deref(), warnings, &formatter)
        }
    }
}

/// Loads the workspace file, resolving it from the CLI option or by
/// walking up from the current directory. Loads .env first.
fn load_workspace(workspace_path: Option<&Path>) -> Result<WorkspaceConfig> {
    let path = match workspace_path {
        Some(p) => p.to_path_buf(),
        None => {
            let cwd = std::env::current_dir()?;
            find_workspace_file(&cwd)?
        }
    };

    let base_path = path
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let parser = WorkspaceParser::new().with_base_path(base_path);
    parser.load_dotenv()?;
    parser.load_file(&path)
}

/// Resolves the target filter from the positional filter plus options.
fn parse_scope(scope: &ScopeArgs) -> Result<TargetFilter> {
    let base = match scope.filter.as_deref() {
        Some(filter) => TargetFilter::parse(filter)?,
        None => TargetFilter::default(),
    };
    base.merge_options(
        scope.env.clone(),
        scope.infra.clone(),
        scope.group.clone(),
        scope.name.clone(),
        scope.resource_type.clone(),
    )
}

/// Runs one lifecycle operation over every group in scope.
async fn cmd_apply(
    workspace_path: Option<&Path>,
    scope: &ScopeArgs,
    op: LifecycleOp,
    dry_run: bool,
    yes: bool,
    force: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let mut workspace = load_workspace(workspace_path)?;
    let validation = ConfigValidator::new().validate(&workspace)?;
    for warning in &validation.warnings {
        debug!("{warning}");
    }

    let target = parse_scope(scope)?;
    let settings = workspace.settings.clone();

    let provider =
        LocalStateProvider::with_base_dir(settings.workspace_root.join(".stratus").join("state"));
    let planner = Planner::new();
    let filters = PlanFilters::from(&target);
    let opts = OrchestrateOptions {
        dry_run,
        auto_confirm: yes,
        force: force.then_some(true),
        group_filter: target.group.clone(),
        name_filter: target.name.clone(),
        type_filter: target.resource_type.clone(),
    };

    let order = op.sort_order();
    let workspace_root = settings.workspace_root.clone();
    let mut succeeded_total = 0;
    let mut attempted_total = 0;

    for group in workspace.resource_groups(target.env.as_deref(), target.infra, order) {
        let mut plan = planner.plan_group(group, &filters, order, Some(&workspace_root))?;
        if plan.is_empty() {
            debug!("No matching resources in {}", plan.group_name);
            continue;
        }

        // The orchestrator shows the plan itself on dry runs and before
        // the confirmation prompt; only the auto-confirmed path needs it
        // printed here.
        if yes && !dry_run {
            eprintln!("{}", formatter.format_plan(&plan));
        }

        let orchestrator = Orchestrator::new(&provider, &settings);
        let (succeeded, attempted) = match op {
            LifecycleOp::Create => {
                orchestrator
                    .create_resources(&mut plan.resources, &opts)
                    .await?
            }
            LifecycleOp::Update => {
                orchestrator
                    .update_resources(&mut plan.resources, &opts)
                    .await?
            }
            LifecycleOp::Delete => {
                orchestrator
                    .delete_resources(&mut plan.resources, &opts)
                    .await?
            }
        };
        succeeded_total += succeeded;
        attempted_total += attempted;
    }

    if !dry_run {
        eprintln!(
            "\n{}",
            formatter.format_summary(op.verb(), succeeded_total, attempted_total)
        );
    }

    Ok(())
}

/// Validates the workspace configuration.
fn cmd_validate(
    workspace_path: Option<&Path>,
    show_warnings: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let workspace = load_workspace(workspace_path)?;

    let validator = ConfigValidator::new();
    let result = validator.validate(&workspace)?;
    eprintln!("{}", formatter.format_validation(&result, show_warnings));

    // Show summary
    eprintln!("Workspace summary:");
    eprintln!("  Name: {}", workspace.settings.workspace_name);
    eprintln!("  Groups: {}", workspace.groups.len());
    let resources: usize = workspace.groups.iter().map(|g| g.resources.len()).sum();
    eprintln!("  Standalone resources: {resources}");

    Ok(())
}
