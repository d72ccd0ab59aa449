use clap::{Parser, Subcommand};
use mc_layout::{
    DEFAULT_LAYOUTS_DIR, GeneralDraft, LayoutError, LayoutResult, LayoutSession, list_documents,
    read_document,
};
use mc_legacy::{DEFAULT_RESOURCE_ROOT, IndexedPropertyStore, validate};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mc-cli")]
#[command(about = "Mission console layout tool - legacy import and layout documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the syntax of a legacy configuration file
    Check {
        /// Path of the properties file, relative to the resource root
        config_path: PathBuf,
        #[arg(long, default_value = DEFAULT_RESOURCE_ROOT)]
        resource_root: PathBuf,
        /// Print every parsed entry
        #[arg(long)]
        entries: bool,
    },
    /// Import a legacy configuration file and store it as a layout document
    Import {
        /// Path of the properties file, relative to the resource root
        config_path: PathBuf,
        /// Experiment name; also the document's file name
        #[arg(long)]
        name: String,
        /// Open the console maximized
        #[arg(long)]
        maximized: bool,
        /// Window width in pixels (required unless maximized)
        #[arg(long, default_value = "")]
        width: String,
        /// Window height in pixels (required unless maximized)
        #[arg(long, default_value = "")]
        height: String,
        /// Allow the operator to resize the window
        #[arg(long)]
        resizable: bool,
        #[arg(long, default_value = DEFAULT_RESOURCE_ROOT)]
        resource_root: PathBuf,
        #[arg(long, default_value = DEFAULT_LAYOUTS_DIR)]
        layouts_dir: PathBuf,
    },
    /// Show the contents of a layout document
    Show {
        /// Path to the layout JSON file
        document_path: PathBuf,
        /// Print the raw document instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// List stored layouts
    List {
        #[arg(long, default_value = DEFAULT_LAYOUTS_DIR)]
        layouts_dir: PathBuf,
    },
}

fn main() -> LayoutResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            config_path,
            resource_root,
            entries,
        } => cmd_check(&resource_root, &config_path, entries),
        Commands::Import {
            config_path,
            name,
            maximized,
            width,
            height,
            resizable,
            resource_root,
            layouts_dir,
        } => {
            let general = GeneralDraft {
                experiment_name: name,
                protocol_name: None,
                maximized,
                width,
                height,
                resizable,
            };
            cmd_import(&resource_root, &config_path, &layouts_dir, &general)
        }
        Commands::Show {
            document_path,
            json,
        } => cmd_show(&document_path, json),
        Commands::List { layouts_dir } => cmd_list(&layouts_dir),
    }
}

fn cmd_check(resource_root: &Path, config_path: &Path, entries: bool) -> LayoutResult<()> {
    println!("Checking legacy configuration: {}", config_path.display());
    let store = IndexedPropertyStore::load_resource(resource_root, config_path)?;
    if entries {
        for (key, value) in store.iter() {
            println!("  {} = {}", key, value);
        }
    }
    let report = validate(&store);

    if report.ok() {
        println!("✓ Configuration is valid");
        return Ok(());
    }

    for message in report.messages() {
        println!("  ✗ {}", message);
    }
    Err(LayoutError::Validation {
        messages: report.into_messages(),
    })
}

fn cmd_import(
    resource_root: &Path,
    config_path: &Path,
    layouts_dir: &Path,
    general: &GeneralDraft,
) -> LayoutResult<()> {
    println!("Importing legacy configuration: {}", config_path.display());
    let store = IndexedPropertyStore::load_resource(resource_root, config_path)?;

    let mut session = LayoutSession::import_legacy(layouts_dir, &store)?;
    session.apply(general)?;
    let path = session.persist()?;

    println!(
        "✓ Layout written to {}: {}",
        session.layouts_dir().display(),
        path.display()
    );
    println!("  Charts: {}", session.layout().charts().count());
    Ok(())
}

fn cmd_show(document_path: &Path, json: bool) -> LayoutResult<()> {
    let layout = read_document(document_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    println!("Experiment: {}", layout.experiment_name);
    if let Some(protocol) = &layout.protocol_name {
        println!("  Protocol: {}", protocol);
    }
    if layout.maximized {
        println!("  Window: maximized");
    } else {
        println!("  Window: {}x{}", layout.width, layout.height);
    }
    println!("  Resizable: {}", layout.resizable);
    println!("  GNSS 3D view: {}", layout.gnss_3d_view);
    println!(
        "  Panels: state={} console={} log={} (serial={}, iridium={})",
        layout.panels.state.enabled,
        layout.panels.console.enabled,
        layout.panels.log.enabled,
        layout.panels.log.serial,
        layout.panels.log.iridium
    );

    let charts: Vec<_> = layout.charts().collect();
    if charts.is_empty() {
        println!("  No charts");
    } else {
        println!("  Charts:");
        for chart in charts {
            println!(
                "    {} ({} vs {}, {} variables)",
                chart.title,
                chart.y_label,
                chart.x_label,
                chart.variable_count()
            );
            for (source, variables) in chart.assigned_data() {
                println!("      {}: {}", source, variables.join(", "));
            }
        }
    }
    Ok(())
}

fn cmd_list(layouts_dir: &Path) -> LayoutResult<()> {
    let documents = list_documents(layouts_dir)?;

    if documents.is_empty() {
        println!("No layouts found in {}", layouts_dir.display());
    } else {
        println!("Layouts in {}:", layouts_dir.display());
        for path in documents {
            match read_document(&path) {
                Ok(layout) => println!(
                    "  {} - {} charts",
                    layout.experiment_name,
                    layout.charts().count()
                ),
                Err(err) => println!("  {} - unreadable ({})", path.display(), err),
            }
        }
    }
    Ok(())
}
