//! # PesaTrack Register
//!
//! Cashier shell and admin command line for PesaTrack POS.
//!
//! ## Module Organization
//! ```text
//! pesatrack_register/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── shell.rs        ◄─── Interactive cashier shell
//! ├── render.rs       ◄─── Plain-text views
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState bundle
//! │   ├── cart.rs     ◄─── Cart + checkout under one lock
//! │   ├── catalog.rs  ◄─── Product list as last loaded
//! │   ├── admin.rs    ◄─── Expenses, staff, inventory
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/       ◄─── One module per screen
//! └── error.rs        ◄─── ApiError returned by every command
//! ```
//!
//! ## State Management
//! Several focused state types instead of one lock over everything:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐    │
//! │  │    CartState     │ │   CatalogState   │ │    AdminState        │    │
//! │  │                  │ │                  │ │                      │    │
//! │  │  • Cart lines    │ │  • Products      │ │  • Expense ledger    │    │
//! │  │  • Checkout step │ │                  │ │  • Staff roster      │    │
//! │  │  • Tender        │ │                  │ │  • Inventory cache   │    │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘    │
//! │                                                                         │
//! │  Each command takes only the state it needs.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod shell;
pub mod state;

use anyhow::Context;
use chrono::Local;
use pesatrack_client::ClientConfig;
use pesatrack_core::permissions::StaffUpdate;
use pesatrack_core::validation::{ExpenseForm, InventoryForm, SignUpForm};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, ExpenseAction, InventoryAction, InventoryFields, SalesAction, UserAction};
use commands::{admin, auth, catalog, expenses, users};
use render::Renderer;
use state::AppState;

/// Runs one command line.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load configuration ─────────────────────────────────────────────►   │
/// │     • --config PATH (must exist, except for `config --init`)            │
/// │       or the platform pesatrack.toml                                    │
/// │     • PESATRACK_* environment overrides                                 │
/// │                                                                         │
/// │  2. Initialize state ───────────────────────────────────────────────►   │
/// │     • HTTP client with the configured timeout                           │
/// │     • Session token read from disk                                      │
/// │     • Empty cart, seeded expense ledger and staff roster                │
/// │                                                                         │
/// │  3. Dispatch ───────────────────────────────────────────────────────►   │
/// │     • shell: interactive loop on stdin/stdout                           │
/// │     • anything else: one command, text or JSON on stdout                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let writing_new_file = matches!(cli.command, Command::Config { init: true })
        && cli.config.as_ref().is_some_and(|path| !path.exists());
    let config = if writing_new_file {
        ClientConfig::default()
    } else {
        ClientConfig::load(cli.config.clone()).context("Failed to load configuration")?
    };
    let state = AppState::init(config).await.context("Failed to initialize register")?;
    info!(store = %state.config.store_name(), json = cli.json, "Starting PesaTrack register");

    let out = Output {
        json: cli.json,
        render: Renderer::new(&state.config),
    };

    match cli.command {
        Command::Shell => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            shell::run_shell(&state, stdin, &mut stdout).await?;
        }

        // Account
        Command::Login { email, password } => {
            auth::sign_in(&state.api, &email, &password).await?;
            out.message("Signed in");
        }
        Command::Signup(args) => {
            let form = SignUpForm {
                name: args.name,
                id_number: args.id_number,
                phone: args.phone,
                email: args.email,
                password: args.password,
                confirm_password: args.confirm_password,
            };
            out.message(&auth::sign_up(&state.api, &form).await?);
        }
        Command::Logout => {
            auth::sign_out(&state.api).await?;
            out.message("Signed out");
        }
        Command::Session => {
            let status = auth::session_status(&state.api).await;
            out.show(&status, |r| r.session(&status))?;
        }
        Command::ResetPassword { email } => out.message(&auth::reset_password(&email)?),

        // Catalog
        Command::Products { search, grouped } => {
            catalog::load_products(&state.api, &state.config, &state.catalog).await?;
            if grouped {
                let groups = catalog::grouped_products(&state.catalog, &search);
                out.show(&groups, |r| r.groups(&groups))?;
            } else {
                let products = catalog::search_products(&state.catalog, &search);
                out.show(&products, |r| r.products(&products))?;
            }
        }
        Command::Sync => {
            let count = catalog::sync_products(&state.api, &state.config, &state.catalog).await?;
            out.message(&format!("Catalog synced, {} products", count));
        }

        // Analytics
        Command::Dashboard => {
            let summary = admin::dashboard(&state.api).await?;
            out.show(&summary, |r| r.dashboard(&summary))?;
        }
        Command::Report { view } => {
            let report = admin::detailed_report(&state.api, view).await?;
            out.show(&report, |r| r.report(&report))?;
        }
        Command::Monthly { month, week: None } => {
            let monthly = admin::monthly_sales(&state.api, &month).await?;
            out.show(&monthly, |r| r.monthly(&monthly))?;
        }
        Command::Monthly { month, week: Some(week) } => {
            let week = admin::week_sales(&state.api, &month, &week).await?;
            out.show(&week, |r| r.week(&week))?;
        }

        // Inventory
        Command::Inventory { action } => {
            match action {
                InventoryAction::List { search, page } => {
                    admin::load_inventory(&state.api, &state.admin).await?;
                    let page = admin::inventory_page(&state.admin, &state.config, &search, page);
                    out.show(&page, |r| r.inventory(&page))?;
                }
                InventoryAction::Add(fields) => {
                    let form = fields.apply(InventoryForm::default());
                    let saved = admin::save_inventory(&state.api, &state.admin, &form, None).await?;
                    out.show(&saved, |r| r.inventory_item(&saved))?;
                }
                InventoryAction::Update { id, fields } => {
                    admin::load_inventory(&state.api, &state.admin).await?;
                    let form = fields.apply(admin::edit_form(&state.admin, &id)?);
                    let saved =
                        admin::save_inventory(&state.api, &state.admin, &form, Some(id)).await?;
                    out.show(&saved, |r| r.inventory_item(&saved))?;
                }
            }
        }

        // Sales history
        Command::Sales { action: SalesAction::Recent } => {
            let sales = admin::recent_sales(&state.api).await?;
            out.show(&sales, |r| r.recent_sales(&sales))?;
        }
        Command::Sales { action: SalesAction::Details { customer } } => {
            let sale = admin::sale_details(&state.api, &customer).await?;
            out.show(&sale, |r| r.sale_details(&sale))?;
        }

        // Expenses
        Command::Expenses { action: ExpenseAction::List { page } } => {
            let page = expenses::list_expenses(&state.admin, &state.config, page);
            out.show(&page, |r| r.expenses(&page))?;
        }
        Command::Expenses { action: ExpenseAction::Add { title, amount, category, date } } => {
            let form = ExpenseForm { title, amount, category, date };
            let expense = expenses::add_expense(&state.admin, &form, Local::now().date_naive())?;
            out.show(&expense, |r| r.expense(&expense))?;
        }

        // Staff
        Command::Users { action } => {
            let result = match action {
                UserAction::List => {
                    let list = users::list_users(&state.admin);
                    return out.show(&list, |r| r.users(&list));
                }
                UserAction::Update { id, permission, auto_logout, logout_time, status } => {
                    let update = StaffUpdate { permission, auto_logout, logout_time, status };
                    users::update_user(&state.admin, id, update)?
                }
                UserAction::Dormant { id } => users::set_dormant(&state.admin, id)?,
                UserAction::Remove { id } => users::remove_user(&state.admin, id)?,
            };
            out.show(&result, |r| r.user(&result))?;
        }

        Command::Config { init: true } => {
            let path = state.config.config().save(cli.config)?;
            out.message(&format!("Config written to {}", path.display()));
        }
        Command::Config { init: false } => {
            let summary = state.config.summary();
            out.show(&summary, |r| r.config(&summary))?;
        }
    }

    Ok(())
}

impl InventoryFields {
    /// Overrides the form with every field given on the command line.
    fn apply(self, mut form: InventoryForm) -> InventoryForm {
        let fields = [
            (self.name, &mut form.name),
            (self.category, &mut form.category),
            (self.price, &mut form.price),
            (self.quantity, &mut form.quantity_in_stock),
            (self.remaining, &mut form.remaining_stock),
            (self.image_url, &mut form.image_url),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        form
    }
}

/// Prints command results as text or JSON.
struct Output<'a> {
    json: bool,
    render: Renderer<'a>,
}

impl Output<'_> {
    fn show<T, F>(&self, value: &T, text: F) -> anyhow::Result<()>
    where
        T: Serialize,
        F: FnOnce(&Renderer<'_>) -> String,
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text(&self.render));
        }
        Ok(())
    }

    fn message(&self, message: &str) {
        if self.json {
            println!("{}", serde_json::json!({ "message": message }));
        } else {
            println!("{}", message);
        }
    }
}

/// Initializes the tracing subscriber. Logs go to stderr so stdout stays
/// clean for command output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pesatrack_client=trace` - Trace HTTP calls only
/// - Default: INFO, DEBUG for the pesatrack crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,pesatrack_register=debug,pesatrack_client=debug,pesatrack_core=debug")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_fields_override_prefill() {
        let prefill = InventoryForm {
            name: "Sugar 1kg".into(),
            category: "Groceries".into(),
            price: "150.00".into(),
            quantity_in_stock: "40".into(),
            remaining_stock: "12".into(),
            image_url: "https://img.example/sugar.png".into(),
        };
        let fields = InventoryFields {
            price: Some("155".into()),
            remaining: Some("10".into()),
            ..Default::default()
        };
        let form = fields.apply(prefill);
        assert_eq!(form.name, "Sugar 1kg");
        assert_eq!(form.price, "155");
        assert_eq!(form.remaining_stock, "10");
        assert_eq!(form.quantity_in_stock, "40");
    }
}
