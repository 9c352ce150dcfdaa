use anyhow::{Context, Result};
use clap::Parser;
use estate_scout::cli::{self, Cli, Commands, FavoriteCommands, InquiryCommands};
use estate_scout::client::{ApiClient, HttpTransport};
use estate_scout::config::Config;
use estate_scout::favorites::{self, FavoriteState};
use estate_scout::models::{
    Credentials, InquiryCreate, PropertyCreate, PropertyUpdate, Registration, Stats,
};
use estate_scout::notify::{Notice, NoticeLevel, Notifications};
use estate_scout::render;
use estate_scout::search::{self, SearchOrchestrator};
use estate_scout::session::Session;
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

type Client = ApiClient<HttpTransport>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;
    let client = ApiClient::connect(&config.backend_url).context("Failed to create HTTP client")?;
    info!("Using backend {}", config.backend_url);

    let mut session = config
        .token
        .clone()
        .map(Session::with_token)
        .unwrap_or_default();
    let mut notices = Notifications::new();

    let result = run(&cli, &config, &client, &mut session, &mut notices).await;

    for notice in notices.drain() {
        match notice.level {
            NoticeLevel::Error => eprintln!("{}", notice),
            NoticeLevel::Info | NoticeLevel::Success => println!("{}", notice),
        }
    }

    result
}

async fn run(
    cli: &Cli,
    config: &Config,
    client: &Client,
    session: &mut Session,
    notices: &mut Notifications,
) -> Result<()> {
    let output = cli.output.as_deref();

    match &cli.command {
        Commands::List { page, limit } => {
            let view = SearchOrchestrator::new(limit.unwrap_or(config.page_size));
            browse(view, *page, client, notices, output).await?;
        }
        Commands::Search {
            filters,
            page,
            limit,
        } => {
            let filters = cli::parse_filters(filters).context("Invalid filter")?;
            let view =
                SearchOrchestrator::with_filters(limit.unwrap_or(config.page_size), filters);
            browse(view, *page, client, notices, output).await?;
        }
        Commands::Featured { limit } => {
            if let Some(items) = report(
                search::featured(client, *limit).await,
                search::LOAD_ERROR,
                notices,
            ) {
                print_cards(&items);
                save(output, &items).await?;
            }
        }
        Commands::Show { id } => {
            if let Some(property) = report(
                client.properties().get(id).await,
                "Error loading property",
                notices,
            ) {
                println!("{}", render::detail(&property));
                save(output, &property).await?;
            }
        }
        Commands::Create { json } => {
            let data: PropertyCreate = read_json(json).await?;
            if let Some(property) = report(
                client.properties().create(session, &data).await,
                "Error creating property",
                notices,
            ) {
                notices.push(Notice::success(format!("Created {}", property.id)));
                save(output, &property).await?;
            }
        }
        Commands::Update { id, json } => {
            let data: PropertyUpdate = read_json(json).await?;
            if let Some(property) = report(
                client.properties().update(session, id, &data).await,
                "Error updating property",
                notices,
            ) {
                println!("{}", render::detail(&property));
                save(output, &property).await?;
            }
        }
        Commands::Delete { id } => {
            if let Some(ack) = report(
                client.properties().delete(session, id).await,
                "Error deleting property",
                notices,
            ) {
                notices.push(Notice::success(ack.message));
            }
        }
        Commands::Favorites(FavoriteCommands::List) => {
            if let Some(items) = report(
                client.favorites().list(session).await,
                "Error loading favorites",
                notices,
            ) {
                print_cards(&items);
                save(output, &items).await?;
            }
        }
        Commands::Favorites(FavoriteCommands::Add { id }) => {
            favorites::toggle(client, session, id, false, notices).await;
        }
        Commands::Favorites(FavoriteCommands::Remove { id }) => {
            favorites::toggle(client, session, id, true, notices).await;
        }
        Commands::Inquiries(InquiryCommands::List) => {
            if let Some(items) = report(
                client.inquiries().list(session).await,
                "Error loading inquiries",
                notices,
            ) {
                if items.is_empty() {
                    println!("No inquiries yet.");
                }
                for inquiry in &items {
                    println!("{}\n", render::inquiry(inquiry));
                }
                save(output, &items).await?;
            }
        }
        Commands::Inquiries(InquiryCommands::Create {
            property_id,
            message,
            email,
            phone,
        }) => {
            let data = InquiryCreate {
                property_id: property_id.clone(),
                message: message.clone(),
                contact_email: email.clone(),
                contact_phone: phone.clone(),
            };
            if let Some(inquiry) = report(
                client.inquiries().create(session, &data).await,
                "Error sending inquiry",
                notices,
            ) {
                notices.push(Notice::success("Inquiry sent"));
                save(output, &inquiry).await?;
            }
        }
        Commands::Stats => {
            let stats = report(
                client.stats().get().await,
                "Error loading statistics",
                notices,
            )
            .unwrap_or_else(Stats::default);
            println!("{}", render::stats(&stats));
            save(output, &stats).await?;
        }
        Commands::Login { email, password } => {
            let credentials = Credentials {
                email: email.clone(),
                password: password.clone(),
            };
            if let Some(token) = report(
                client.auth().login(&credentials).await,
                "Login failed",
                notices,
            ) {
                println!("{}", token.access_token);
                session.login(token);
                notices.push(Notice::success("Signed in. Export the token as ESTATE_TOKEN."));
            }
        }
        Commands::Register {
            email,
            password,
            name,
            phone,
            role,
        } => {
            let registration = Registration {
                email: email.clone(),
                password: password.clone(),
                full_name: name.clone(),
                phone: phone.clone(),
                role: (*role).into(),
            };
            if let Some(token) = report(
                client.auth().register(&registration).await,
                "Registration failed",
                notices,
            ) {
                println!("{}", token.access_token);
                session.login(token);
                notices.push(Notice::success("Account created. Export the token as ESTATE_TOKEN."));
            }
        }
        Commands::Me => {
            if !session.is_authenticated() {
                notices.push(Notice::info("Not signed in"));
                return Ok(());
            }
            if let Some(user) = report(
                client.auth().me(session).await,
                "Error loading account",
                notices,
            ) {
                println!("{} <{}> ({:?})", user.full_name, user.email, user.role);
                save(output, &user).await?;
                session.set_user(user);
            }
        }
    }

    Ok(())
}

/// Fetch `page` into the view and print it
async fn browse(
    mut view: SearchOrchestrator,
    page: u32,
    client: &Client,
    notices: &mut Notifications,
    output: Option<&Path>,
) -> Result<()> {
    view.go_to_page(page, client, notices).await;

    if view.is_empty_result() {
        println!("{}", render::empty_state(&view));
        return Ok(());
    }

    if view.results().is_empty() {
        return Ok(());
    }
    print_cards(view.results());
    println!("{}", render::pagination(&view));
    save(output, view.results()).await
}

fn print_cards(items: &[estate_scout::Property]) {
    if items.is_empty() {
        println!("No properties found.");
    }
    for property in items {
        println!("{}\n", render::card(property, &FavoriteState::new(&property.id)));
    }
}

/// Log a failed call and turn it into a single notice; nothing is retried
fn report<T, E: Display>(
    result: std::result::Result<T, E>,
    message: &str,
    notices: &mut Notifications,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!("{}: {}", message, e);
            notices.push(Notice::error(message));
            None
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

async fn save<T: Serialize + ?Sized>(output: Option<&Path>, value: &T) -> Result<()> {
    let Some(path) = output else {
        return Ok(());
    };
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("💾 Saved results to {}", path.display());
    Ok(())
}
