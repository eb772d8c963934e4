//! # Validation Module
//!
//! Form validation for the register and admin screens.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell / CLI input                                            │
//! │  └── Raw text exactly as typed                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, formats, ranges                                  │
//! │  └── Typed output (Money, NaiveDate, InventoryItem)                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend endpoint                                             │
//! │  └── Whatever the server enforces                                      │
//! │                                                                         │
//! │  A form that fails here never reaches the network                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pesatrack_core::validation::validate_sign_in;
//!
//! validate_sign_in("cashier@shop.co.ke", "secret").unwrap();
//! assert!(validate_sign_in("", "secret").is_err());
//! ```

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::InventoryItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Month names accepted by the monthly sales screen.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// =============================================================================
// Field Validators
// =============================================================================

/// Trims a field and rejects it when empty.
pub fn validate_required<'a>(field: &str, value: &'a str) -> ValidationResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(value)
}

/// Validates an email address.
///
/// Deliberately loose: one `@`, something before it, a dotted domain after.
///
/// ```rust
/// use pesatrack_core::validation::validate_email;
///
/// assert!(validate_email("jane@shop.co.ke").is_ok());
/// assert!(validate_email("jane@localhost").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    let email = validate_required("email", email)?;

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(email)
}

/// Parses a positive amount typed into a form.
pub fn validate_amount(field: &str, text: &str) -> ValidationResult<Money> {
    let text = validate_required(field, text)?;

    let amount = Money::parse(text).ok_or_else(|| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a number".to_string(),
    })?;

    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(amount)
}

/// Parses a non-negative whole number (stock counts).
pub fn validate_count(field: &str, text: &str) -> ValidationResult<i64> {
    let text = validate_required(field, text)?;

    let count: i64 = text.parse().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    if count < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(count)
}

/// Validates an auto-logout time and normalizes it to `HH:MM`.
///
/// ```rust
/// use pesatrack_core::validation::validate_logout_time;
///
/// assert_eq!(validate_logout_time("8:05").unwrap(), "08:05");
/// assert!(validate_logout_time("25:00").is_err());
/// ```
pub fn validate_logout_time(text: &str) -> ValidationResult<String> {
    let text = validate_required("logout time", text)?;

    let time = NaiveTime::parse_from_str(text, "%H:%M").map_err(|_| {
        ValidationError::InvalidFormat {
            field: "logout time".to_string(),
            reason: "must be HH:MM (24-hour)".to_string(),
        }
    })?;

    Ok(time.format("%H:%M").to_string())
}

/// Validates a `YYYY-MM-DD` date.
pub fn validate_date(text: &str) -> ValidationResult<NaiveDate> {
    let text = validate_required("date", text)?;
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field: "date".to_string(),
        reason: "must be YYYY-MM-DD".to_string(),
    })
}

/// Resolves a month name (full or three-letter, any case) to its canonical
/// spelling.
///
/// ```rust
/// use pesatrack_core::validation::validate_month;
///
/// assert_eq!(validate_month("sep").unwrap(), "September");
/// assert!(validate_month("Smarch").is_err());
/// ```
pub fn validate_month(text: &str) -> ValidationResult<&'static str> {
    let text = validate_required("month", text)?.to_ascii_lowercase();

    MONTHS
        .iter()
        .find(|m| {
            let lower = m.to_ascii_lowercase();
            lower == text || (text.len() == 3 && lower.starts_with(&text))
        })
        .copied()
        .ok_or_else(|| ValidationError::NotAllowed {
            field: "month".to_string(),
            allowed: MONTHS.iter().map(|m| m.to_string()).collect(),
        })
}

// =============================================================================
// Auth Forms
// =============================================================================

/// Sign-in needs both fields; format is the server's business.
pub fn validate_sign_in(email: &str, password: &str) -> ValidationResult<()> {
    validate_required("email", email)?;
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }
    Ok(())
}

/// Registration form as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignUpForm {
    pub name: String,
    pub id_number: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Checks every sign-up field, then that the passwords agree.
pub fn validate_sign_up(form: &SignUpForm) -> ValidationResult<()> {
    validate_required("name", &form.name)?;
    validate_required("id number", &form.id_number)?;
    validate_phone(&form.phone)?;
    validate_email(&form.email)?;

    if form.password.is_empty() {
        return Err(ValidationError::required("password"));
    }
    if form.confirm_password.is_empty() {
        return Err(ValidationError::required("confirm password"));
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::Mismatch {
            field: "confirm password".to_string(),
        });
    }

    Ok(())
}

/// Digits with an optional leading `+`; spaces and dashes ignored.
pub fn validate_phone(phone: &str) -> ValidationResult<&str> {
    let phone = validate_required("phone", phone)?;
    let digits = phone.strip_prefix('+').unwrap_or(phone);

    let ok = digits
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
        && digits.chars().filter(|c| c.is_ascii_digit()).count() >= 7;

    if !ok {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain at least 7 digits".to_string(),
        });
    }

    Ok(phone)
}

// =============================================================================
// Admin Forms
// =============================================================================

/// Inventory add/edit form as typed (every field is text).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity_in_stock: String,
    pub remaining_stock: String,
    pub image_url: String,
}

impl InventoryForm {
    /// Prefills the form from an existing record for editing.
    pub fn from_item(item: &InventoryItem) -> Self {
        InventoryForm {
            name: item.name.clone(),
            category: item.category.clone(),
            price: item.price.to_decimal_string(),
            quantity_in_stock: item.quantity_in_stock.to_string(),
            remaining_stock: item.remaining_stock.to_string(),
            image_url: item.image_url.clone(),
        }
    }
}

/// All six fields are required; numbers must parse.
///
/// `id` is `None` for a new item and the existing id for an edit.
pub fn validate_inventory_form(
    form: &InventoryForm,
    id: Option<String>,
) -> ValidationResult<InventoryItem> {
    let name = validate_required("name", &form.name)?;
    let category = validate_required("category", &form.category)?;
    let price = validate_amount("price", &form.price)?;
    let quantity_in_stock = validate_count("quantity in stock", &form.quantity_in_stock)?;
    let remaining_stock = validate_count("remaining stock", &form.remaining_stock)?;
    let image_url = validate_required("image url", &form.image_url)?;

    Ok(InventoryItem {
        id,
        name: name.to_string(),
        category: category.to_string(),
        price,
        quantity_in_stock,
        remaining_stock,
        image_url: image_url.to_string(),
    })
}

/// Expense form as typed. An empty date means today.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseForm {
    pub title: String,
    pub amount: String,
    pub category: String,
    pub date: Option<String>,
}

/// Validated expense input, ready for the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidExpense {
    pub title: String,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
}

pub fn validate_expense_form(
    form: &ExpenseForm,
    today: NaiveDate,
) -> ValidationResult<ValidExpense> {
    let title = validate_required("title", &form.title)?;
    let amount = validate_amount("amount", &form.amount)?;
    let category = validate_required("category", &form.category)?;

    let date = match form.date.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => validate_date(text)?,
        _ => today,
    };

    Ok(ValidExpense {
        title: title.to_string(),
        amount,
        category: category.to_string(),
        date,
    })
}

/// Trims a search query; an empty query matches everything.
pub fn normalize_search_query(query: &str) -> String {
    query.trim().to_lowercase()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up_form() -> SignUpForm {
        SignUpForm {
            name: "Jane Wanjiku".into(),
            id_number: "12345678".into(),
            phone: "+254 712 345678".into(),
            email: "jane@shop.co.ke".into(),
            password: "hunter22".into(),
            confirm_password: "hunter22".into(),
        }
    }

    fn inventory_form() -> InventoryForm {
        InventoryForm {
            name: "Sugar 1kg".into(),
            category: "Groceries".into(),
            price: "150".into(),
            quantity_in_stock: "40".into(),
            remaining_stock: "32".into(),
            image_url: "sugar.png".into(),
        }
    }

    #[test]
    fn test_validate_sign_in() {
        assert!(validate_sign_in("a@b.co", "pw").is_ok());

        let err = validate_sign_in("  ", "pw").unwrap_err();
        assert_eq!(err.to_string(), "email is required");

        let err = validate_sign_in("a@b.co", "").unwrap_err();
        assert_eq!(err.to_string(), "password is required");
    }

    #[test]
    fn test_validate_sign_up() {
        assert!(validate_sign_up(&sign_up_form()).is_ok());

        let mut form = sign_up_form();
        form.id_number.clear();
        assert!(matches!(
            validate_sign_up(&form),
            Err(ValidationError::Required { field }) if field == "id number"
        ));

        let mut form = sign_up_form();
        form.confirm_password = "hunter23".into();
        assert!(matches!(validate_sign_up(&form), Err(ValidationError::Mismatch { .. })));

        let mut form = sign_up_form();
        form.phone = "call me".into();
        assert!(matches!(validate_sign_up(&form), Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("@b.co").is_err());
        assert!(validate_email("a@b.").is_err());
        assert!(validate_email("a b@c.co").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount("amount", "1,500").unwrap(), Money::from_major(1500));
        assert!(matches!(
            validate_amount("amount", "0"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_amount("amount", "lots"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_inventory_form_new_item() {
        let item = validate_inventory_form(&inventory_form(), None).unwrap();
        assert_eq!(item.id, None);
        assert_eq!(item.price, Money::from_major(150));
        assert_eq!(item.remaining_stock, 32);
    }

    #[test]
    fn test_validate_inventory_form_requires_every_field() {
        let blanks: [fn(&mut InventoryForm); 6] = [
            |f| f.name.clear(),
            |f| f.category.clear(),
            |f| f.price.clear(),
            |f| f.quantity_in_stock.clear(),
            |f| f.remaining_stock.clear(),
            |f| f.image_url.clear(),
        ];

        for blank in blanks {
            let mut form = inventory_form();
            blank(&mut form);
            assert!(matches!(
                validate_inventory_form(&form, None),
                Err(ValidationError::Required { .. })
            ));
        }
    }

    #[test]
    fn test_inventory_form_prefill_round_trips() {
        let item = validate_inventory_form(&inventory_form(), Some("9".into())).unwrap();
        let again =
            validate_inventory_form(&InventoryForm::from_item(&item), item.id.clone()).unwrap();
        assert_eq!(item, again);
    }

    #[test]
    fn test_validate_expense_form_defaults_date_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 16).unwrap();
        let form = ExpenseForm {
            title: "Water".into(),
            amount: "800".into(),
            category: "Utilities".into(),
            date: None,
        };

        let expense = validate_expense_form(&form, today).unwrap();
        assert_eq!(expense.date, today);
        assert_eq!(expense.amount, Money::from_major(800));

        let form = ExpenseForm { date: Some("2024-09-01".into()), ..form };
        let expense = validate_expense_form(&form, today).unwrap();
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
    }

    #[test]
    fn test_validate_expense_form_requires_title_amount_category() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 16).unwrap();
        let form = ExpenseForm {
            title: "".into(),
            amount: "800".into(),
            category: "Utilities".into(),
            date: None,
        };
        assert!(validate_expense_form(&form, today).is_err());
    }

    #[test]
    fn test_validate_logout_time_and_month() {
        assert_eq!(validate_logout_time("18:30").unwrap(), "18:30");
        assert!(validate_logout_time("6pm").is_err());

        assert_eq!(validate_month("SEPTEMBER").unwrap(), "September");
        assert_eq!(validate_month("jan").unwrap(), "January");
        assert!(validate_month("ju").is_err());
    }
}
