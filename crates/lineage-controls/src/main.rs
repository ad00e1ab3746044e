use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lineage_controls::{
    ControlAction, ControlsConfig, ControlsSession, ControlsSnapshot, ControlsState, EditAccess,
};
use lineage_filter::{FilterCatalog, QueryFilter, QuickFilterReconciler};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "lineage-controls", version, about = "Lineage toolbar state replay")]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the quick filter menu of a catalog
    Menu {
        /// Catalog JSON (defaults to the asset quick filters)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Replay a JSON list of actions and print the resulting query
    Replay {
        /// Actions JSON
        #[arg(long)]
        actions: PathBuf,

        /// Catalog JSON (defaults to the asset quick filters)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Controls config TOML
        #[arg(long)]
        config: Option<PathBuf>,

        /// Allow edit mode
        #[arg(long)]
        editable: bool,

        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Menu { catalog } => {
            let catalog = load_catalog(catalog.as_deref()).await?;
            for item in QuickFilterReconciler::new(catalog).menu() {
                println!("{:<32} {}", item.key, item.label);
            }
        }
        Command::Replay {
            actions,
            catalog,
            config,
            editable,
            json,
        } => {
            let catalog = load_catalog(catalog.as_deref()).await?;
            let config = match config {
                Some(path) => ControlsConfig::load(&path)
                    .await
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => ControlsConfig::default(),
            };
            let actions = load_actions(&actions).await?;
            let snapshot = replay(catalog, &config, actions, editable).await?;
            print_snapshot(&snapshot, json)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

async fn load_catalog(path: Option<&Path>) -> Result<FilterCatalog> {
    let Some(path) = path else {
        return Ok(FilterCatalog::assets_default());
    };
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading catalog {}", path.display()))?;
    FilterCatalog::from_json(&raw).with_context(|| format!("parsing catalog {}", path.display()))
}

async fn load_actions(path: &Path) -> Result<Vec<ControlAction>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading actions {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing actions {}", path.display()))
}

async fn replay(
    catalog: FilterCatalog,
    config: &ControlsConfig,
    actions: Vec<ControlAction>,
    editable: bool,
) -> Result<ControlsSnapshot> {
    let state = ControlsState::new(catalog, config).with_access(EditAccess {
        has_edit_access: editable,
        deleted: false,
    });
    let handle = ControlsSession::spawn(state, config);

    let has_viewport = actions
        .iter()
        .any(|a| matches!(a, ControlAction::ViewportChanged { .. }));
    tracing::info!("Replaying {} actions", actions.len());
    for action in actions {
        handle.send(action).await?;
    }
    if has_viewport {
        // Let the last viewport zoom pass its quiet window.
        tokio::time::sleep(config.debounce() * 2).await;
    }

    let state = handle.shutdown().await?;
    Ok(state.snapshot(0))
}

fn print_snapshot(snapshot: &ControlsSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    match QueryFilter::encode(snapshot.query_filter.as_ref())? {
        Some(filter) => println!("Query filter: {filter}"),
        None => println!("Query filter: no filter"),
    }
    println!("Active filters: {}", snapshot.active_filters.join(", "));
    for field in &snapshot.selected_filters {
        let values: Vec<&str> = field.value.iter().map(|o| o.key.as_str()).collect();
        println!("  {} = [{}]", field.key, values.join(", "));
    }
    println!("Zoom: {:.2}", snapshot.zoom);
    println!(
        "Lineage: upstream {} / downstream {} / {} nodes per layer",
        snapshot.lineage.upstream_depth,
        snapshot.lineage.downstream_depth,
        snapshot.lineage.nodes_per_layer
    );
    println!("Edit mode: {}", snapshot.edit_mode);
    if let Some(error) = &snapshot.last_error {
        println!("Last refused action: {error}");
    }
    Ok(())
}
