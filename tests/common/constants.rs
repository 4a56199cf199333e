//! Shared constants for end-to-end tests
//!
//! Credentials and catalog ids served by the mock services in `server.rs`.

// ============================================================================
// Auth service
// ============================================================================

/// Regular test user, issued id `TEST_USER_ID`
pub const TEST_USER: &str = "emilys";
pub const TEST_PASS: &str = "emilyspass";
pub const TEST_USER_ID: u64 = 9;
pub const TEST_USER_TOKEN: &str = "access-token-emilys";

/// Second account, used for namespace isolation
pub const OTHER_USER: &str = "michaelw";
pub const OTHER_PASS: &str = "michaelwpass";
pub const OTHER_USER_ID: u64 = 2;

/// Account answered in the legacy shape: `token` instead of `accessToken`
/// and no id
pub const LEGACY_USER: &str = "kminchelle";
pub const LEGACY_PASS: &str = "0lelplR";
pub const LEGACY_USER_TOKEN: &str = "legacy-token-kminchelle";

/// Username that makes the mock auth service answer 500
pub const BROKEN_USER: &str = "broken";

// ============================================================================
// Catalog service
// ============================================================================

pub const TEST_API_KEY: &str = "test-api-key";

pub const FIGHT_CLUB_ID: u64 = 550;
pub const PULP_FICTION_ID: u64 = 680;
pub const FORREST_GUMP_ID: u64 = 13;
pub const INCEPTION_ID: u64 = 27205;
/// Upcoming movie without votes or release date
pub const UNTITLED_ID: u64 = 999001;

pub const DRAMA_GENRE_ID: u64 = 18;
