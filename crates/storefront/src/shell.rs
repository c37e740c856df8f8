//! Interactive terminal session.
//!
//! Drives one [`Page`] from line-based input. Each line becomes one or more
//! [`PageEvent`]s; chat replies are delivered by racing the next input line
//! against the next reply deadline, all on a single task.
//!
//! # Commands
//!
//! ```text
//! add <id> <price> <name...>        add one unit to the cart
//! inc <id> | dec <id> | rm <id>     cart line controls
//! cart                              show the cart
//! chat open|close|outside|inside    chat modal visibility and clicks
//! say <text>                        type into the chat box and press Enter
//! login <email> <password>          simulated login
//! register <name> <email> <password>
//! create-product <name> <price> [description...]
//! help | quit
//! ```
//!
//! End of input waits for outstanding chat replies before returning;
//! `quit` leaves immediately, dropping them, like closing the page.

use askama::Template;
use secrecy::SecretString;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{Instant, sleep_until};

use crate::cart::CartTextTemplate;
use crate::chat::{ChatLineTemplate, ChatMessageView, ClickTarget};
use crate::error::Result;
use crate::forms::{CreateProductForm, LoginForm, RegisterForm};
use crate::page::{CartAction, FormSubmission, Page, PageEvent};
use crate::storage::KeyValueStore;

const HELP: &str = "\
commands:
  add <id> <price> <name...>
  inc <id> | dec <id> | rm <id>
  cart
  chat open|close|outside|inside
  say <text>
  login <email> <password>
  register <name> <email> <password>
  create-product <name> <price> [description...]
  help | quit
";

/// One parsed input line.
#[derive(Debug, Clone)]
pub enum Command {
    /// Events to dispatch, in order.
    Events(Vec<PageEvent>),
    /// Print the cart.
    ShowCart,
    Help,
    Quit,
    /// Blank line.
    Nothing,
}

/// Parse one input line.
///
/// # Errors
///
/// Returns a usage message when the command is unknown or its arguments
/// are missing.
pub fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Nothing);
    };
    let args: Vec<&str> = words.collect();

    let command = match (verb, args.as_slice()) {
        ("add", [id, price, name @ ..]) if !name.is_empty() => one(PageEvent::AddToCart {
            product_id: (*id).to_string(),
            product_name: name.join(" "),
            product_price: (*price).to_string(),
        }),
        ("inc", [id]) => one(cart_event(CartAction::Increase, id)),
        ("dec", [id]) => one(cart_event(CartAction::Decrease, id)),
        ("rm", [id]) => one(cart_event(CartAction::Remove, id)),
        ("cart", []) => Command::ShowCart,
        ("chat", ["open"]) => one(PageEvent::OpenChat),
        ("chat", ["close"]) => one(PageEvent::CloseChat),
        ("chat", ["outside"]) => one(PageEvent::ChatClick(ClickTarget::Backdrop)),
        ("chat", ["inside"]) => one(PageEvent::ChatClick(ClickTarget::Content)),
        ("say", _) => {
            // Keep the raw text after the verb so inner spacing survives.
            let text = line.trim_start().strip_prefix("say").unwrap_or_default();
            Command::Events(vec![
                PageEvent::ChatInput(text.to_string()),
                PageEvent::ChatKey(crate::chat::SEND_KEY.to_string()),
            ])
        }
        ("login", [email, password]) => one(PageEvent::Submit(FormSubmission::Login(LoginForm {
            email: (*email).to_string(),
            password: SecretString::from(*password),
        }))),
        ("register", [name, email, password]) => {
            one(PageEvent::Submit(FormSubmission::Register(RegisterForm {
                name: (*name).to_string(),
                email: (*email).to_string(),
                password: SecretString::from(*password),
            })))
        }
        ("create-product", [name, price, description @ ..]) => one(PageEvent::Submit(
            FormSubmission::CreateProduct(CreateProductForm {
                name: (*name).to_string(),
                price: (*price).to_string(),
                description: description.join(" "),
                image_url: String::new(),
            }),
        )),
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => return Err(format!("unrecognized command: {}", line.trim())),
    };
    Ok(command)
}

fn one(event: PageEvent) -> Command {
    Command::Events(vec![event])
}

fn cart_event(action: CartAction, id: &str) -> PageEvent {
    PageEvent::Cart {
        action,
        product_id: id.to_string(),
    }
}

/// Run a session until `quit` or end of input.
///
/// # Errors
///
/// Returns `AppError` if reading input, writing output, persisting the cart,
/// or rendering fails. Malformed commands and rejected add-to-cart data are
/// reported on `out` and do not end the session.
pub async fn run<S, R, W>(page: &mut Page<S>, input: R, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut shown = page.chat().log().len();

    write_cart(page, out).await?;

    loop {
        let wakeup = page.next_wakeup();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Command::Quit) => {
                        out.flush().await?;
                        return Ok(());
                    }
                    Ok(command) => handle(page, command, out).await?,
                    Err(usage) => out.write_all(format!("{usage}\n").as_bytes()).await?,
                }
            }
            () = sleep_until(wakeup.unwrap_or_else(Instant::now)), if wakeup.is_some() => {
                page.tick(Instant::now());
            }
        }
        write_new_messages(page, &mut shown, out).await?;
    }

    // Input is exhausted; let outstanding replies land.
    while let Some(due) = page.next_wakeup() {
        sleep_until(due).await;
        page.tick(Instant::now());
        write_new_messages(page, &mut shown, out).await?;
    }

    out.flush().await?;
    Ok(())
}

async fn handle<S, W>(page: &mut Page<S>, command: Command, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    W: AsyncWrite + Unpin,
{
    match command {
        Command::Events(events) => {
            let touches_cart = events
                .iter()
                .any(|e| matches!(e, PageEvent::AddToCart { .. } | PageEvent::Cart { .. }));

            for event in events {
                match page.dispatch(event, Instant::now()) {
                    Ok(Some(notice)) => {
                        out.write_all(format!("[notice] {notice}\n").as_bytes())
                            .await?;
                    }
                    Ok(None) => {}
                    Err(crate::error::AppError::BadInput(reason)) => {
                        out.write_all(format!("rejected: {reason}\n").as_bytes())
                            .await?;
                    }
                    Err(e) => return Err(e),
                }
            }

            if touches_cart {
                write_cart(page, out).await?;
            }
        }
        Command::ShowCart => write_cart(page, out).await?,
        Command::Help => out.write_all(HELP.as_bytes()).await?,
        Command::Quit | Command::Nothing => {}
    }
    Ok(())
}

async fn write_cart<S, W>(page: &Page<S>, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    W: AsyncWrite + Unpin,
{
    let view = page.cart().view();
    let text = CartTextTemplate { cart: &view }.render()?;
    out.write_all(text.as_bytes()).await?;
    if !text.ends_with('\n') {
        out.write_all(b"\n").await?;
    }
    Ok(())
}

async fn write_new_messages<S, W>(page: &Page<S>, shown: &mut usize, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    W: AsyncWrite + Unpin,
{
    let log = page.chat().log();
    for message in log.iter().skip(*shown) {
        let view = ChatMessageView::from(message);
        let line = ChatLineTemplate { message: &view }.render()?;
        out.write_all(line.trim_end().as_bytes()).await?;
        out.write_all(b"\n").await?;
    }
    *shown = log.len();
    Ok(())
}
