//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Backend envelope
pub const STATUS_OK: u16 = 200;
pub const STATUS_TRANSPORT_FAILURE: u16 = 500;

// Session defaults
pub const DEFAULT_SALES_NAME: &str = "User";
pub const INVALID_SESSION_MESSAGE: &str =
    "Login session is invalid. Please log out and log in again.";

/// Names granted unfiltered visibility over their group's records.
pub const DEFAULT_SUPER_USERS: [&str; 5] = [
    "Ridho Danu S.A",
    "Budiono Untoro",
    "Neli Nursyamsyiah",
    "Tommy S. Purnomo",
    "Lie Suherman",
];

/// Preferred column order for opportunity tables.
pub const PREFERRED_COLUMN_ORDER: [&str; 17] = [
    "opportunity_id",
    "salesgroup_id",
    "sales_name",
    "company_name",
    "vertical_industry",
    "opportunity_name",
    "responsible_name",
    "start_date",
    "pillar",
    "solution",
    "service",
    "brand",
    "channel",
    "distributor_name",
    "stage",
    "selling_price",
    "sales_notes",
];

/// Columns coerced to numbers before display.
pub const NUMERIC_COLUMNS: [&str; 2] = ["cost", "selling_price"];

// Caching
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;
pub const DEFAULT_CACHE_MAX_CAPACITY: u64 = 256;

// HTTP
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// Display
pub const DEFAULT_TIMEZONE: &str = "Asia/Jakarta";
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
