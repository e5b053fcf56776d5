use std::{io, path::PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use clap::{CommandFactory, Parser, Subcommand};
use serde::Serialize;

use crate::{
    config::Config,
    contact::{self, ContactOutcome, ContactRequest, MailRelay, ResendRelay},
    domain::{Catalog, Project, View},
    filter::{FilterOutcome, FilterState, LetterFilter, filter_projects},
    storage::{self, JsonFileStore},
    visitor,
};

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "A personal portfolio in the terminal", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, help = "Project catalog JSON file")]
    pub catalog: Option<PathBuf>,

    #[arg(
        long,
        help = "Open this view once loading finishes (home, intro, work, resume, contact)"
    )]
    pub view: Option<View>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "List projects, optionally filtered")]
    Projects {
        #[arg(long, short, help = "Case-insensitive text search")]
        search: Option<String>,

        #[arg(long, short, help = "First letter of the title, or All")]
        letter: Option<LetterFilter>,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },

    #[command(about = "Show one project in full")]
    Show {
        #[arg(help = "Project index as printed by `projects`")]
        index: usize,
    },

    #[command(about = "Count this visit and print the visitor number")]
    Visitor,

    #[command(about = "Send a message through the contact relay")]
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        message: String,
    },

    #[command(about = "Show the resume paths or download the document")]
    Resume {
        #[arg(long, help = "Copy the resume into the download directory")]
        download: bool,
    },

    #[command(about = "Print the effective configuration")]
    Config,

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

#[derive(Debug, Serialize)]
struct ProjectListing<'a> {
    index: usize,
    #[serde(flatten)]
    project: &'a Project,
}

pub fn load_catalog(cli_path: Option<&PathBuf>, config: &Config) -> Result<Catalog> {
    match cli_path.or(config.catalog_path.as_ref()) {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Catalog::builtin().context("Built-in catalog is invalid"),
    }
}

fn listing_lines(outcome: &FilterOutcome<'_>) -> Vec<String> {
    match outcome {
        FilterOutcome::NoResults => vec!["No projects match your search or filter.".to_string()],
        FilterOutcome::Matches(entries) => entries
            .iter()
            .map(|entry| format!("{:>3}  {}", entry.index, entry.project.title))
            .collect(),
    }
}

pub fn list_projects(
    catalog: &Catalog,
    search: Option<String>,
    letter: Option<LetterFilter>,
    json: bool,
) -> Result<()> {
    let state = FilterState {
        search_text: search.unwrap_or_default(),
        letter: letter.unwrap_or_default(),
    };
    let outcome = filter_projects(catalog, &state);

    if json {
        let listings: Vec<ProjectListing> = outcome
            .entries()
            .iter()
            .map(|entry| ProjectListing {
                index: entry.index,
                project: entry.project,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listings)?);
    } else {
        for line in listing_lines(&outcome) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn project_text(project: &Project) -> String {
    let mut out = project.title.to_uppercase();
    if let Some(link) = project.source_link() {
        out.push_str(&format!("\n{}", link));
    }
    if let Some(description) = &project.description {
        out.push_str(&format!("\n\n{}", description));
    }
    if !project.images.is_empty() {
        out.push('\n');
        for image in &project.images {
            out.push_str(&format!("\nImage: {}", image));
        }
    }
    if !project.details.is_empty() {
        out.push_str("\n\nProject details");
        for detail in project.plain_details() {
            out.push_str(&format!("\n  - {}", detail));
        }
    }
    if let Some(video) = &project.video {
        out.push_str(&format!("\n\nDemo video: {}", video));
    }
    out
}

pub fn show_project(catalog: &Catalog, index: usize) -> Result<()> {
    let project = catalog.get(index).ok_or_else(|| {
        anyhow!(
            "No project at index {} (the catalog has {})",
            index,
            catalog.len()
        )
    })?;
    println!("{}", project_text(project));
    Ok(())
}

pub fn print_visitor() -> Result<()> {
    let store = JsonFileStore::new(storage::get_visitor_store_path());
    let today = visitor::today_key(&Local::now());
    let record = visitor::resolve_visitor_count(&store, &today, &mut rand::thread_rng());
    println!("Visitor #{}", visitor::format_visitor_count(record.count));
    Ok(())
}

fn relay_contact(relay: &dyn MailRelay, request: &ContactRequest) -> Result<&'static str> {
    match contact::send_blocking(relay, request) {
        ContactOutcome::Sent => Ok(ContactOutcome::Sent.message()),
        ContactOutcome::Failed => Err(anyhow!(ContactOutcome::Failed.message())),
    }
}

pub fn send_contact(config: &Config, request: ContactRequest) -> Result<()> {
    let relay = ResendRelay::from_config(&config.contact)?;
    println!("{}", relay_contact(&relay, &request)?);
    Ok(())
}

pub fn resume(config: &Config, download: bool) -> Result<()> {
    println!("Document: {}", config.resume.display_path.display());
    println!("Download: {}", config.resume.download_path.display());

    if download {
        let saved =
            storage::copy_into_dir(&config.resume.download_path, &storage::get_download_dir())?;
        println!("Saved to {}", saved.display());
    }
    Ok(())
}

pub fn print_config(config: &Config) {
    println!("# {}", storage::get_config_path().display());
    print!("{}", config.to_toml());
}

pub fn print_completions(shell: &str) -> Result<()> {
    use clap_complete::Shell;
    let shell = match shell {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        _ => {
            return Err(anyhow!(
                "Unsupported shell: {}. Use bash, zsh, or fish.",
                shell
            ));
        }
    };
    clap_complete::generate(shell, &mut Cli::command(), "folio", &mut io::stdout());
    Ok(())
}

pub fn run_cli(command: Command, config: &Config, catalog: &Catalog) -> Result<()> {
    match command {
        Command::Projects {
            search,
            letter,
            json,
        } => list_projects(catalog, search, letter, json),
        Command::Show { index } => show_project(catalog, index),
        Command::Visitor => print_visitor(),
        Command::Contact {
            name,
            email,
            subject,
            message,
        } => send_contact(
            config,
            ContactRequest::new(&name, &email, subject.as_deref().unwrap_or(""), &message),
        ),
        Command::Resume { download } => resume(config, download),
        Command::Config => {
            print_config(config);
            Ok(())
        }
        Command::Completions { shell } => print_completions(&shell),
    }
}
