use clap::{Parser, Subcommand};
use rtf_api::strategies::instance_setting::DEFAULT_SECTION;
use rtf_api::{ApiFacade, Settings};
use rtf_model::{ImageImportOptions, ParentContext, Tab, DEFAULT_CLIENT_STATUS};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "rtf")]
#[command(about = "Typed REST client for test automation")]
struct Cli {
    /// Settings file (TOML). Without it RTF_* environment variables are used
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Workspace and admin tabs
    Tab {
        #[command(subcommand)]
        command: TabCommand,
    },
    /// Workspace folders
    Folder {
        #[command(subcommand)]
        command: FolderCommand,
    },
    /// Admin-level clients
    Client {
        #[command(subcommand)]
        command: ClientCommand,
    },
    /// Instance settings
    Setting {
        #[command(subcommand)]
        command: SettingCommand,
    },
    /// Imaging set jobs
    Imaging {
        #[command(subcommand)]
        command: ImagingCommand,
    },
    /// Document imports
    Documents {
        #[command(subcommand)]
        command: DocumentsCommand,
    },
    /// Message of the day
    Motd {
        #[command(subcommand)]
        command: MotdCommand,
    },
    /// List registered strategies
    Strategies,
}

#[derive(Subcommand)]
enum TabCommand {
    /// Create the tab, or update the one with the same id or name
    Require {
        /// Workspace id, or -1 / "admin" for admin level
        #[arg(short, long, value_parser = parse_context, allow_hyphen_values = true)]
        workspace: ParentContext,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        id: Option<i32>,
        #[arg(long)]
        order: Option<i32>,
    },
    /// Get a tab by id or name
    Get {
        #[arg(short, long, value_parser = parse_context, allow_hyphen_values = true)]
        workspace: ParentContext,
        #[arg(long, conflicts_with = "name")]
        id: Option<i32>,
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Delete a tab
    Delete {
        #[arg(short, long, value_parser = parse_context, allow_hyphen_values = true)]
        workspace: ParentContext,
        #[arg(long)]
        id: i32,
    },
    /// Tabs shown in navigation
    Navigation {
        #[arg(short, long, value_parser = parse_context, allow_hyphen_values = true)]
        workspace: ParentContext,
    },
}

#[derive(Subcommand)]
enum FolderCommand {
    /// Folder tree with the given nodes expanded
    Tree {
        #[arg(short, long, value_parser = parse_context)]
        workspace: ParentContext,
        /// Folder ids to expand
        #[arg(long)]
        expand: Vec<i32>,
        #[arg(long)]
        selected: Option<i32>,
    },
    /// Root folder of the workspace
    Root {
        #[arg(short, long, value_parser = parse_context)]
        workspace: ParentContext,
    },
}

#[derive(Subcommand)]
enum ClientCommand {
    /// Artifact id of a client status choice
    StatusId {
        #[arg(short, long, default_value = DEFAULT_CLIENT_STATUS)]
        name: String,
    },
}

#[derive(Subcommand)]
enum SettingCommand {
    /// Get an instance setting by name and section
    Get {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = DEFAULT_SECTION)]
        section: String,
    },
}

#[derive(Subcommand)]
enum ImagingCommand {
    /// Re-image the documents that errored in the last run
    RetryErrors {
        #[arg(short, long, value_parser = parse_context)]
        workspace: ParentContext,
        #[arg(short, long)]
        imaging_set: i32,
    },
}

#[derive(Subcommand)]
enum DocumentsCommand {
    /// Import image documents from a delimited file
    ImportImages {
        #[arg(short, long, value_parser = parse_context)]
        workspace: ParentContext,
        #[arg(short, long)]
        file: PathBuf,
        /// Skip the first line
        #[arg(long)]
        header: bool,
        #[arg(long, default_value = ",")]
        delimiter: char,
        /// Malformed rows tolerated before the import is refused
        #[arg(long, default_value = "0")]
        max_errors: usize,
    },
}

#[derive(Subcommand)]
enum MotdCommand {
    /// Whether the message of the day is plain text
    TextOnly,
}

fn parse_context(value: &str) -> Result<ParentContext, String> {
    if value.eq_ignore_ascii_case("admin") {
        return Ok(ParentContext::Admin);
    }
    let id: i32 = value
        .parse()
        .map_err(|_| format!("'{}' is not a workspace id", value))?;
    ParentContext::try_from(id)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?;
    info!("Using REST host {}", settings.rest.base_url);
    let mut api = ApiFacade::from_config(settings.rest)?;
    if settings.serialize_require {
        api = api.with_serialized_require();
    }

    if let Err(err) = run(&api, cli.command).await {
        error!("{}", err);
        return Err(err);
    }
    Ok(())
}

async fn run(api: &ApiFacade, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Tab { command } => run_tab(api, command).await?,
        Commands::Folder { command } => match command {
            FolderCommand::Tree {
                workspace,
                expand,
                selected,
            } => {
                let tree = api
                    .folders()
                    .get_folder_tree(workspace, &expand, selected)
                    .await?;
                print_json(&tree)?;
            }
            FolderCommand::Root { workspace } => {
                print_json(&api.folders().get_workspace_root(workspace).await?)?;
            }
        },
        Commands::Client {
            command: ClientCommand::StatusId { name },
        } => {
            print_json(&api.clients().get_status_choice_id(&name).await?)?;
        }
        Commands::Setting {
            command: SettingCommand::Get { name, section },
        } => {
            let setting = api
                .instance_settings()
                .get_by_name_and_section(&name, &section)
                .await?;
            print_json(&setting)?;
        }
        Commands::Imaging {
            command:
                ImagingCommand::RetryErrors {
                    workspace,
                    imaging_set,
                },
        } => {
            let job_id = api
                .imaging_jobs()
                .retry_errors(workspace, imaging_set, None)
                .await?;
            print_json(&job_id)?;
        }
        Commands::Documents {
            command:
                DocumentsCommand::ImportImages {
                    workspace,
                    file,
                    header,
                    delimiter,
                    max_errors,
                },
        } => {
            let mut options = ImageImportOptions::new()
                .with_delimiter(delimiter)
                .with_max_errors(max_errors);
            if header {
                options = options.with_header();
            }
            api.documents()
                .import_images_from_csv(workspace, &file, Some(options))
                .await?;
            println!("Imported {}", file.display());
        }
        Commands::Motd {
            command: MotdCommand::TextOnly,
        } => {
            print_json(&api.motd().is_text_only().await?)?;
        }
        Commands::Strategies => {
            for descriptor in api.resolver().descriptors() {
                println!("{:<24} {}", descriptor.entity, descriptor.operation);
            }
        }
    }
    Ok(())
}

async fn run_tab(api: &ApiFacade, command: TabCommand) -> Result<(), Box<dyn std::error::Error>> {
    let tabs = api.tabs();
    match command {
        TabCommand::Require {
            workspace,
            name,
            id,
            order,
        } => {
            let mut tab = Tab::named(name.unwrap_or_default());
            tab.artifact_id = id.unwrap_or(0);
            if let Some(order) = order {
                tab = tab.with_order(order);
            }
            print_json(&tabs.require(workspace, tab).await?)?;
        }
        TabCommand::Get {
            workspace,
            id,
            name,
        } => {
            let tab = match (id, name) {
                (Some(id), _) => tabs.get(workspace, id).await?,
                (None, Some(name)) => tabs.get_by_name(workspace, &name).await?,
                (None, None) => return Err("pass --id or --name".into()),
            };
            print_json(&tab)?;
        }
        TabCommand::Delete { workspace, id } => {
            tabs.delete(workspace, id).await?;
            println!("Deleted tab {} in {}", id, workspace);
        }
        TabCommand::Navigation { workspace } => {
            print_json(&tabs.get_all_for_navigation(workspace).await?)?;
        }
    }
    Ok(())
}
