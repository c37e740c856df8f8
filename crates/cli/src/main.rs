//! Parrot CLI - one-shot access to the storefront page.
//!
//! Every invocation behaves like a page load followed by a single user
//! action: the cart is read from the configured store, the action runs, the
//! cart is written back, and the result is printed.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of a product
//! parrot cart add p1 Widget 9.99
//!
//! # Line controls
//! parrot cart inc p1
//! parrot cart dec p1
//! parrot cart remove p1
//!
//! # Show the cart (plain text, or the HTML fragments)
//! parrot cart show
//! parrot cart show --html
//!
//! # Talk to the simulated support chat
//! parrot chat "Where is my parrot?"
//!
//! # Simulated form submissions
//! parrot form login -e polly@example.com -p cracker
//! ```
//!
//! # Commands
//!
//! - `cart` - Add, adjust, remove, show, and clear cart lines
//! - `chat` - Send a chat message and wait for the reply
//! - `form` - Submit one of the simulated forms

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;

use clap::{Parser, Subcommand};
use parrot_storefront::page::CartAction;
use parrot_storefront::{PageKind, StorefrontConfig, telemetry};

mod commands;

#[derive(Parser)]
#[command(name = "parrot")]
#[command(author, version, about = "Parrot storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
    /// Send a message to the support chat and wait for the reply
    Chat {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Submit a simulated form
    Form {
        #[command(subcommand)]
        form: FormCommand,
    },
}

#[derive(Subcommand)]
enum CartCommand {
    /// Add one unit of a product
    Add {
        /// Product identifier
        id: String,
        /// Display name
        name: String,
        /// Unit price, e.g. 9.99
        price: String,
    },
    /// Add one unit to an existing line
    Inc {
        /// Product identifier
        id: String,
    },
    /// Take one unit off an existing line (never below one)
    Dec {
        /// Product identifier
        id: String,
    },
    /// Remove a line
    Remove {
        /// Product identifier
        id: String,
    },
    /// Show the cart
    Show {
        /// Print the rendered HTML fragments instead of text
        #[arg(long)]
        html: bool,
    },
    /// Remove every line
    Clear,
}

#[derive(Subcommand)]
enum FormCommand {
    /// Simulated login
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Simulated registration
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Simulated product creation
    CreateProduct {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price
        #[arg(short, long)]
        price: String,

        /// Description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Image URL
        #[arg(short, long, default_value = "")]
        image_url: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");
    telemetry::init(config.log_format, "parrot_cli=info,parrot_storefront=warn");

    let cli = Cli::parse();

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> parrot_storefront::Result<()> {
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Cart { action } => {
            let mut page = commands::open_page(config, PageKind::Cart)?;
            match action {
                CartCommand::Add { id, name, price } => {
                    commands::cart::add(&mut page, id, name, price, &mut out)?;
                }
                CartCommand::Inc { id } => {
                    commands::cart::control(&mut page, CartAction::Increase, id, &mut out)?;
                }
                CartCommand::Dec { id } => {
                    commands::cart::control(&mut page, CartAction::Decrease, id, &mut out)?;
                }
                CartCommand::Remove { id } => {
                    commands::cart::control(&mut page, CartAction::Remove, id, &mut out)?;
                }
                CartCommand::Show { html } => commands::cart::show(&page, html, &mut out)?,
                CartCommand::Clear => commands::cart::clear(&mut page, &mut out)?,
            }
        }
        Commands::Chat { message } => {
            let mut page = commands::open_page(config, PageKind::Catalog)?;
            commands::chat::send(&mut page, &message.join(" "), &mut out).await?;
        }
        Commands::Form { form } => {
            let mut page = commands::open_page(config, PageKind::Catalog)?;
            let submission = match form {
                FormCommand::Login { email, password } => {
                    commands::form::login(email, password)
                }
                FormCommand::Register {
                    name,
                    email,
                    password,
                } => commands::form::register(name, email, password),
                FormCommand::CreateProduct {
                    name,
                    price,
                    description,
                    image_url,
                } => commands::form::create_product(name, price, description, image_url),
            };
            commands::form::submit(&mut page, submission, &mut out)?;
        }
    }
    Ok(())
}
