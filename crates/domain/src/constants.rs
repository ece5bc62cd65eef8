//! Provider-wide constants

/// Cache key of the process-wide application token.
pub const APPLICATION_TOKEN_KEY: &str = "application";

/// Language used when none is given.
pub const DEFAULT_LANG: &str = "en";

/// Default lifetime requested for user tokens.
pub const DEFAULT_TOKEN_DURATION_SECONDS: u64 = 3600;

/// Default transport timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Statuses at or above this are treated as bodiless by default.
pub const DEFAULT_TOLERATED_STATUS_CEILING: u16 = 450;

/// Concurrent requests per chunk for voucher batch operations.
pub const VOUCHER_CHUNK_SIZE: usize = 5;

/// Server-side reward reservation window (15 minutes).
pub const DEFAULT_RESERVATION_TIMEOUT_MS: u64 = 900_000;

/// Page size used when walking every category page.
pub const CATEGORY_PAGE_SIZE: u32 = 50;

/// Default page size for searches and histories.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// OAuth grant used for every token request.
pub const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";

/// Scope requested for merchant bearer tokens.
pub const MERCHANT_USER_ACCOUNT_SCOPE: &str = "merchant_user_account";
