//! # Command Line
//!
//! ```bash
//! # Cashier shell
//! pesatrack shell
//!
//! # Account
//! pesatrack login owner@duka.co.ke --password secret
//! pesatrack reset-password owner@duka.co.ke
//!
//! # Admin reports
//! pesatrack dashboard
//! pesatrack report --view weekly
//! pesatrack monthly january --week 2
//! pesatrack inventory list --search sugar --page 2
//! pesatrack sales details C-001
//!
//! # Any command as JSON
//! pesatrack --json sales recent
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pesatrack_core::permissions::{Permission, StaffStatus};
use pesatrack_core::ReportView;

#[derive(Debug, Parser)]
#[command(name = "pesatrack")]
#[command(author, version, about = "PesaTrack point of sale register")]
pub struct Cli {
    /// Config file (default: the platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print responses as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive cashier shell
    Shell,
    /// Sign in and keep the session token
    Login {
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Register a new account
    Signup(SignUpArgs),
    /// Forget the session token
    Logout,
    /// Show whether a session token is stored
    Session,
    /// Request a password reset link
    ResetPassword { email: String },
    /// List products
    Products {
        #[arg(short, long, default_value = "")]
        search: String,
        /// Group by category
        #[arg(short, long)]
        grouped: bool,
    },
    /// Resync the catalog on the backend and reload it
    Sync,
    /// Today's and this month's sales
    Dashboard,
    /// Detailed analytics
    Report {
        #[arg(short, long, default_value = "daily")]
        view: ReportView,
    },
    /// Weekly breakdown of one month
    Monthly {
        /// Month name, full or short
        month: String,
        /// Show one week's days ("2" or "Week 2")
        #[arg(short, long)]
        week: Option<String>,
    },
    /// Stock records
    Inventory {
        #[command(subcommand)]
        action: InventoryAction,
    },
    /// Sales history
    Sales {
        #[command(subcommand)]
        action: SalesAction,
    },
    /// Expense ledger
    Expenses {
        #[command(subcommand)]
        action: ExpenseAction,
    },
    /// Staff permissions
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Show the effective configuration
    Config {
        /// Write it to the config file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Debug, Args)]
pub struct SignUpArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub id_number: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
}

#[derive(Debug, Subcommand)]
pub enum InventoryAction {
    List {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Add a stock record
    Add(InventoryFields),
    /// Edit a stock record; omitted fields keep their stored value
    Update {
        id: String,
        #[command(flatten)]
        fields: InventoryFields,
    },
}

/// Inventory form fields, as typed.
#[derive(Debug, Default, Args)]
pub struct InventoryFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub quantity: Option<String>,
    #[arg(long)]
    pub remaining: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum SalesAction {
    Recent,
    Details { customer: String },
}

#[derive(Debug, Subcommand)]
pub enum ExpenseAction {
    List {
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        category: String,
        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserAction {
    List,
    Update {
        id: u64,
        #[arg(long)]
        permission: Option<Permission>,
        #[arg(long)]
        auto_logout: Option<bool>,
        /// HH:MM, 24-hour
        #[arg(long)]
        logout_time: Option<String>,
        #[arg(long)]
        status: Option<StaffStatus>,
    },
    /// Mark a user dormant
    Dormant { id: u64 },
    Remove { id: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["pesatrack", "report", "--view", "weekly", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Report { view: ReportView::Weekly }));
    }

    #[test]
    fn test_bad_view_is_rejected() {
        assert!(Cli::try_parse_from(["pesatrack", "report", "--view", "hourly"]).is_err());
    }

    #[test]
    fn test_user_update_parses_enums() {
        let cli = Cli::try_parse_from([
            "pesatrack", "users", "update", "2", "--permission", "viewer", "--status", "dormant",
        ])
        .unwrap();
        match cli.command {
            Command::Users { action: UserAction::Update { id, permission, status, .. } } => {
                assert_eq!(id, 2);
                assert_eq!(permission, Some(Permission::Viewer));
                assert_eq!(status, Some(StaffStatus::Dormant));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
