// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe Shop command-line client
//!
//! Talks to the recipe kit backend. The session token is kept in a file
//! store, so `login` in one invocation authenticates the following ones.

use anyhow::Context;
use clap::{Parser, Subcommand};
use recipe_shop_client::{
    config::Config,
    models::{
        CartItemCreate, CartItemUpdate, Credentials, NewUser, OrderCreate, OrderItemCreate,
        ProfileUpdate, RecipeFilter,
    },
    services::AccountService,
    store::FileStore,
    AppState,
};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "recipe-shop")]
#[command(about = "Command-line client for the recipe kit shop", long_about = None)]
struct Cli {
    /// Backend base address (overrides RECIPE_API_BASE_URL)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account and log into it
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        country_code: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show whether a session is stored and who it belongs to
    Status,
    /// Show or update the signed-in profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Browse recipes
    #[command(subcommand)]
    Recipes(RecipesCommand),
    /// List recipe categories
    Categories,
    /// Manage the shopping cart
    #[command(subcommand)]
    Cart(CartCommand),
    /// Order history and checkout
    #[command(subcommand)]
    Orders(OrdersCommand),
}

#[derive(Debug, Subcommand)]
enum ProfileCommand {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        country_code: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum RecipesCommand {
    List {
        #[arg(long)]
        category: Option<u64>,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Get {
        id: u64,
    },
    /// Show the price for a number of people
    Pricing {
        id: u64,
        #[arg(long)]
        people: Option<u32>,
    },
}

#[derive(Debug, Subcommand)]
enum CartCommand {
    List,
    Add {
        recipe_id: u64,
        #[arg(long, default_value_t = 1)]
        people: u32,
    },
    Update {
        item_id: u64,
        #[arg(long)]
        people: u32,
    },
    Remove {
        item_id: u64,
    },
}

#[derive(Debug, Subcommand)]
enum OrdersCommand {
    List,
    Get {
        id: u64,
    },
    Create {
        #[arg(long)]
        address: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        notes: Option<String>,
        /// Order line as RECIPE_ID:PEOPLE (repeatable)
        #[arg(long = "item", value_name = "RECIPE_ID:PEOPLE", value_parser = parse_order_item, required = true)]
        items: Vec<OrderItemCreate>,
    },
}

fn parse_order_item(raw: &str) -> Result<OrderItemCreate, String> {
    let (recipe, people) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected RECIPE_ID:PEOPLE, got '{}'", raw))?;
    Ok(OrderItemCreate {
        recipe_id: recipe
            .trim()
            .parse()
            .map_err(|_| format!("bad recipe id '{}'", recipe))?,
        number_of_people: people
            .trim()
            .parse()
            .map_err(|_| format!("bad people count '{}'", people))?,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    tracing::debug!(base_url = %config.base_url, "Using backend");

    let store = Arc::new(FileStore::new(&config.credentials_dir));
    let state = AppState::new(config, store)?;
    state.session.restore().await;

    run(cli.command, &state).await
}

async fn run(command: Command, state: &AppState) -> anyhow::Result<()> {
    let client = &state.client;

    match command {
        Command::Register {
            name,
            email,
            password,
            country_code,
            phone,
            address,
        } => {
            let account = AccountService::new(client.clone());
            let user = account
                .register(&NewUser {
                    name,
                    email,
                    password,
                    country_code,
                    phone,
                    address,
                })
                .await?;
            print_json(&user)?;
        }
        Command::Login { email, password } => {
            let account = AccountService::new(client.clone());
            let user = account.login(&Credentials { email, password }).await?;
            print_json(&user)?;
        }
        Command::Logout => {
            client.auth().logout().await;
            println!("Logged out");
        }
        Command::Status => {
            let account = AccountService::new(client.clone());
            match account.check_auth_status().await {
                Some(user) => println!("Logged in as {} <{}>", user.name, user.email),
                None => println!("Not logged in"),
            }
        }
        Command::Profile(ProfileCommand::Show) => {
            print_json(&client.auth().get_profile().await?)?;
        }
        Command::Profile(ProfileCommand::Update {
            name,
            country_code,
            phone,
            address,
        }) => {
            let update = ProfileUpdate {
                name,
                country_code,
                phone,
                address,
            };
            print_json(&client.auth().update_profile(&update).await?)?;
        }
        Command::Recipes(RecipesCommand::List {
            category,
            difficulty,
            skip,
            limit,
        }) => {
            let filter = RecipeFilter {
                skip,
                limit,
                category_id: category,
                difficulty,
            };
            print_json(&client.recipes().get_all(&filter).await?)?;
        }
        Command::Recipes(RecipesCommand::Get { id }) => {
            print_json(&client.recipes().get_by_id(id).await?)?;
        }
        Command::Recipes(RecipesCommand::Pricing { id, people }) => {
            print_json(&client.recipes().get_with_pricing(id, people).await?)?;
        }
        Command::Categories => {
            print_json(&client.categories().get_all().await?)?;
        }
        Command::Cart(CartCommand::List) => {
            print_json(&client.cart().get_items().await?)?;
        }
        Command::Cart(CartCommand::Add { recipe_id, people }) => {
            let item = CartItemCreate {
                recipe_id,
                number_of_people: people,
            };
            print_json(&client.cart().add_item(&item).await?)?;
        }
        Command::Cart(CartCommand::Update { item_id, people }) => {
            let update = CartItemUpdate {
                number_of_people: people,
            };
            print_json(&client.cart().update_item(item_id, &update).await?)?;
        }
        Command::Cart(CartCommand::Remove { item_id }) => {
            match client.cart().remove_item(item_id).await? {
                Some(reply) => print_json(&reply)?,
                None => println!("Removed cart item {}", item_id),
            }
        }
        Command::Orders(OrdersCommand::List) => {
            print_json(&client.orders().get_all().await?)?;
        }
        Command::Orders(OrdersCommand::Get { id }) => {
            print_json(&client.orders().get_by_id(id).await?)?;
        }
        Command::Orders(OrdersCommand::Create {
            address,
            phone,
            notes,
            items,
        }) => {
            let order = OrderCreate {
                delivery_address: address,
                delivery_phone: phone,
                special_notes: notes,
                items,
            };
            print_json(&client.orders().create(&order).await?)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Binary and library at info, dependencies at warn.
const DEFAULT_LOG_FILTER: &str = "recipe_shop=info,recipe_shop_client=info,warn";

/// Initialize logging to stderr. `LOG_FORMAT=json` selects structured output.
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
