//! Stockroom CLI - database tooling and a terminal client for the API.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! stockroom migrate
//!
//! # Load the sample users and products
//! stockroom seed --clear
//!
//! # Create an admin account
//! stockroom user create alice s3cret! --role admin
//!
//! # Use the API
//! stockroom login demo demo123
//! stockroom products list --page 2 --search chair
//! stockroom products add --name "Desk Lamp" --type "Home & Garden" --sku LMP-001 --quantity 4 --price 24.50
//! stockroom products set-quantity 3 40
//! stockroom analytics
//! stockroom logout
//! ```
//!
//! # Commands
//!
//! - `migrate`, `seed`, `user` - operate on `PostgreSQL` directly
//!   (`STOCKROOM_DATABASE_URL` or `DATABASE_URL`)
//! - `login`, `signup`, `logout`, `products`, `analytics` - call the HTTP API
//!   and keep the token in a session file

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stockroom_client::views::AddProductForm;
use stockroom_core::ProductId;
use stockroom_core::api::{DEFAULT_LIMIT, DEFAULT_PAGE};

mod commands;

use commands::context::ClientContext;

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version, about = "Stockroom inventory tools")]
struct Cli {
    /// Base URL of the Stockroom API
    #[arg(
        long,
        global = true,
        env = "STOCKROOM_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    /// Where the login session is stored (default: ~/.stockroom/session.json)
    #[arg(long, global = true, env = "STOCKROOM_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with sample users and products
    Seed {
        /// Delete all users and products first
        #[arg(long)]
        clear: bool,
    },
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Log in and store the session
    Login { username: String, password: String },
    /// Create an account and store the session
    Signup {
        username: String,
        password: String,
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Browse and edit the catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Show the most-added report
    Analytics,
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a user directly in the database
    Create {
        username: String,
        password: String,

        /// Role (`user`, `admin`)
        #[arg(short, long, default_value = "user")]
        role: String,

        #[arg(short, long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List one page of products
    List {
        #[arg(short, long, default_value_t = DEFAULT_PAGE)]
        page: u32,

        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,

        /// Only show rows on this page matching name, SKU or type
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        /// Category, e.g. "Electronics" or "Home & Garden"
        #[arg(long = "type")]
        product_type: String,
        #[arg(long)]
        sku: String,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        price: String,
    },
    /// Replace the stock level of a product
    SetQuantity {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = ClientContext::new(cli.api_url, cli.session_file);

    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { clear } => commands::seed::run(clear).await?,
        Commands::User { action } => match action {
            UserAction::Create {
                username,
                password,
                role,
                email,
            } => {
                commands::user::create(&username, &password, &role, email.as_deref()).await?;
            }
        },
        Commands::Login { username, password } => {
            commands::auth::login(&ctx, &username, &password).await?;
        }
        Commands::Signup {
            username,
            password,
            email,
        } => commands::auth::signup(&ctx, username, password, email).await?,
        Commands::Logout => commands::auth::logout(&ctx)?,
        Commands::Products { action } => match action {
            ProductAction::List {
                page,
                limit,
                search,
            } => commands::products::list(&ctx, page, limit, search).await?,
            ProductAction::Add {
                name,
                product_type,
                sku,
                image_url,
                description,
                quantity,
                price,
            } => {
                let form = AddProductForm {
                    name,
                    product_type,
                    sku,
                    image_url: image_url.unwrap_or_default(),
                    description: description.unwrap_or_default(),
                    quantity,
                    price,
                };
                commands::products::add(&ctx, form).await?;
            }
            ProductAction::SetQuantity { id, quantity } => {
                commands::products::set_quantity(&ctx, id, quantity).await?;
            }
        },
        Commands::Analytics => commands::analytics::show(&ctx).await?,
    }
    Ok(())
}
