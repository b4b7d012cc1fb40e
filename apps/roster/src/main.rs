use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use client_core::{
    ClientError, EmployeeApi, Field, HttpEmployeeApi, RosterClient, SortKey, UiError,
    UiErrorContext,
};
use shared::domain::EmployeeId;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod shell;
mod ui;

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Manage the employee roster over its REST API")]
struct Cli {
    /// Base URL of the API; the collection lives at `<url>/employees`.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        sort: Option<SortKey>,
    },
    Stats,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        salary: String,
        #[arg(long, default_value = "")]
        department: String,
        /// Defaults to today.
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        salary: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete {
        id: i64,
    },
    Shell,
}

impl Command {
    /// Field values carried by `add` and `edit`, in form order.
    fn field_values(&self) -> Vec<(Field, String)> {
        match self {
            Command::Add {
                name,
                email,
                phone,
                salary,
                department,
                start_date,
                notes,
            } => {
                let start_date = start_date.unwrap_or_else(|| Local::now().date_naive());
                vec![
                    (Field::Name, name.clone()),
                    (Field::Email, email.clone()),
                    (Field::Phone, phone.clone()),
                    (Field::Salary, salary.clone()),
                    (Field::Department, department.clone()),
                    (Field::StartDate, start_date.to_string()),
                    (Field::Notes, notes.clone()),
                ]
            }
            Command::Edit {
                name,
                email,
                phone,
                salary,
                department,
                start_date,
                notes,
                ..
            } => [
                (Field::Name, name.clone()),
                (Field::Email, email.clone()),
                (Field::Phone, phone.clone()),
                (Field::Salary, salary.clone()),
                (Field::Department, department.clone()),
                (Field::StartDate, start_date.map(|date| date.to_string())),
                (Field::Notes, notes.clone()),
            ]
            .into_iter()
            .filter_map(|(field, value)| value.map(|value| (field, value)))
            .collect(),
            _ => Vec::new(),
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = config::load_settings(cli.config.as_deref())?;
    if let Some(api_url) = &cli.api_url {
        settings.api_url = api_url.clone();
    }
    init_tracing(&settings.log_filter);
    info!(api_url = %settings.api_url, "starting roster client");

    let api = HttpEmployeeApi::new(&settings.api_url, settings.request_timeout())
        .context("invalid api url")?;
    let client = RosterClient::new(api, settings.currency());

    if let Command::Shell = cli.command {
        return shell::run(&client, tokio::io::stdin(), tokio::io::stdout()).await;
    }
    load(&client).await?;

    match &cli.command {
        Command::List { search, sort } => {
            if let Some(query) = search {
                client.search(query.as_str()).await;
            }
            let view = client.sort_by(*sort).await;
            print!("{}", ui::render_view(&view));
        }
        Command::Stats => {
            if let Some(stats) = &client.view().await.stats {
                print!("{}", ui::render_stats(stats));
            }
        }
        Command::Add { .. } => {
            client.open_create().await?;
            let saved = fill_and_submit(&client, cli.command.field_values()).await?;
            println!("created employee #{} {}", saved.0, saved.1);
        }
        Command::Edit { id, .. } => {
            let id = EmployeeId(*id);
            if !client.open_edit(id).await? {
                bail!("no employee #{id} in the roster");
            }
            let saved = fill_and_submit(&client, cli.command.field_values()).await?;
            println!("updated employee #{} {}", saved.0, saved.1);
        }
        Command::Delete { id } => {
            let id = EmployeeId(*id);
            client
                .delete(id)
                .await
                .map_err(|err| describe(UiErrorContext::Delete, &err))?;
            println!("deleted employee #{id}");
        }
        Command::Shell => {}
    }
    Ok(())
}

async fn load<A: EmployeeApi>(client: &RosterClient<A>) -> Result<()> {
    client
        .fetch_all()
        .await
        .map_err(|err| describe(UiErrorContext::Load, &err))
}

/// Fills the open form and submits it. A rejected draft is printed with its
/// failing field before the error is returned.
async fn fill_and_submit<A: EmployeeApi>(
    client: &RosterClient<A>,
    values: Vec<(Field, String)>,
) -> Result<(EmployeeId, String)> {
    for (field, value) in values {
        client.set_field(field, value).await;
    }
    match client.submit().await {
        Ok(saved) => Ok((saved.id, saved.name)),
        Err(ClientError::Validation(invalid)) => {
            eprint!("{}", ui::render_surface(&client.surface().await));
            bail!("{invalid}")
        }
        Err(err) => Err(describe(UiErrorContext::Submit, &err)),
    }
}

fn describe(context: UiErrorContext, err: &ClientError) -> anyhow::Error {
    anyhow::anyhow!(UiError::from_client_error(context, err).message().to_string())
}
