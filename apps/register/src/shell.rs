//! # Register Shell
//!
//! Line-oriented front end for the cashier: browse, build the cart, take
//! cash, complete the sale. Errors are printed and the shell keeps going.
//!
//! ## Session
//! ```text
//! pesatrack> products bre
//!   [1] Bread                        Kshs. 100.00
//! pesatrack> add 1
//! pesatrack> checkout
//! Checkout: summary
//! Total: Kshs. 100.00
//! pesatrack> cash
//! pesatrack> tender 150
//! Balance: Kshs. 50.00
//! pesatrack> pay
//! Purchase complete  PT-20240916-1A2B3C4D
//! ```

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::commands::{admin, auth, cart, catalog, checkout, expenses, users};
use crate::error::ApiError;
use crate::render::Renderer;
use crate::state::AppState;

const PROMPT: &str = "pesatrack> ";

const HELP: &str = "\
Register:
  products [query]      list products, filtered by name
  browse [query]        products grouped by category
  reload | sync         reload the catalog / resync it on the backend
  add <id|name>         add one unit to the cart
  inc <id> | dec <id>   change a line's quantity
  remove <id>           drop a line
  cart | reset          show / empty the cart
Checkout:
  checkout              order summary
  cash                  pay with cash
  tender <amount>       cash received
  pay                   complete the purchase
  cancel                back to the cart
Account:
  login <email> <password> | logout | session
Admin:
  dashboard | expenses [page] | users
Other:
  config | help | quit";

/// What the shell does after a line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue(String),
    Quit,
}

/// Runs the shell until `quit` or end of input.
pub async fn run_shell<R, W>(state: &AppState, input: R, out: &mut W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    info!(store = %state.config.store_name(), "Register shell started");
    writeln!(out, "{} register. Type 'help' for commands.", state.config.store_name())?;

    if let Err(err) = catalog::ensure_products(&state.api, &state.config, &state.catalog).await {
        writeln!(out, "{}", err)?;
    }

    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match execute(state, line).await {
            Ok(Flow::Continue(text)) => {
                if !text.is_empty() {
                    writeln!(out, "{}", text)?;
                }
            }
            Ok(Flow::Quit) => break,
            Err(err) => writeln!(out, "{}", err)?,
        }
    }

    info!("Register shell closed");
    Ok(())
}

async fn execute(state: &AppState, line: &str) -> Result<Flow, ApiError> {
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    debug!(command = %word, "Shell command");
    let render = Renderer::new(&state.config);

    let text = match word.to_lowercase().as_str() {
        "help" | "?" => HELP.to_string(),
        "quit" | "exit" => return Ok(Flow::Quit),
        "config" => render.config(&state.config.summary()),

        // Catalog
        "products" | "search" => render.products(&catalog::search_products(&state.catalog, rest)),
        "browse" => render.groups(&catalog::grouped_products(&state.catalog, rest)),
        "reload" => {
            let count = catalog::load_products(&state.api, &state.config, &state.catalog).await?;
            format!("Loaded {} products", count)
        }
        "sync" => {
            let count = catalog::sync_products(&state.api, &state.config, &state.catalog).await?;
            format!("Catalog synced, {} products", count)
        }

        // Cart
        "cart" => render.cart(&cart::get_cart(&state.cart)),
        "add" => {
            let key = required(rest, "add <id|name>")?;
            render.cart(&cart::add_to_cart(&state.cart, &state.catalog, key)?)
        }
        "inc" => render.cart(&cart::increment_item(&state.cart, required(rest, "inc <id>")?)?),
        "dec" => render.cart(&cart::decrement_item(&state.cart, required(rest, "dec <id>")?)?),
        "remove" | "rm" => {
            let id = required(rest, "remove <id>")?;
            render.cart(&cart::remove_from_cart(&state.cart, id)?)
        }
        "reset" | "clear" => render.cart(&cart::reset_cart(&state.cart)?),

        // Checkout
        "checkout" => render.checkout(&checkout::begin_checkout(&state.cart)?),
        "cash" => render.checkout(&checkout::pay_with_cash(&state.cart)?),
        "tender" => render.checkout(&checkout::enter_tender(&state.cart, rest)?),
        "cancel" => render.checkout(&checkout::cancel_checkout(&state.cart)?),
        "status" => render.checkout(&checkout::checkout_status(&state.cart)),
        "pay" | "complete" => {
            let delay = state.config.success_delay();
            let sale = checkout::complete_and_return(&state.cart, delay).await?;
            format!("{}\nReturning to catalog", render.receipt(&sale))
        }

        // Account
        "login" => {
            let (email, password) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| ApiError::validation("Usage: login <email> <password>"))?;
            auth::sign_in(&state.api, email, password.trim()).await?;
            "Signed in".to_string()
        }
        "logout" => {
            auth::sign_out(&state.api).await?;
            "Signed out".to_string()
        }
        "session" => render.session(&auth::session_status(&state.api).await),

        // Admin
        "dashboard" => render.dashboard(&admin::dashboard(&state.api).await?),
        "expenses" => {
            let page = parse_page(rest)?;
            render.expenses(&expenses::list_expenses(&state.admin, &state.config, page))
        }
        "users" => render.users(&users::list_users(&state.admin)),

        other => {
            return Err(ApiError::validation(format!(
                "Unknown command '{}'. Type 'help' for commands.",
                other
            )))
        }
    };

    Ok(Flow::Continue(text))
}

fn required<'a>(arg: &'a str, usage: &str) -> Result<&'a str, ApiError> {
    if arg.is_empty() {
        Err(ApiError::validation(format!("Usage: {}", usage)))
    } else {
        Ok(arg)
    }
}

fn parse_page(arg: &str) -> Result<usize, ApiError> {
    if arg.is_empty() {
        return Ok(1);
    }
    arg.parse()
        .map_err(|_| ApiError::validation(format!("Page must be a number, got '{}'", arg)))
}
