/// Configuration constants for the Neptune backend API
pub mod api {
    /// Base path for the Neptune backend API
    pub const BASE_PATH: &str = "/api/backend/v1";

    /// Token exchange endpoint
    pub const OAUTH_TOKEN: &str = "authorization/oauth-token";

    /// Organization invitations endpoint
    pub const ORGANIZATION_INVITATIONS: &str = "invitations/organization";

    /// Organizations endpoint used for member management
    pub const ORGANIZATIONS: &str = "organizations2";

    /// Header carrying the raw API token during token exchange
    pub const API_TOKEN_HEADER: &str = "X-Neptune-Api-Token";

    /// Path segment of the web app page for accepting an organization invitation
    pub const INVITATION_ACCEPT_PATH: &str = "-/invitations/organization";
}

/// Configuration constants for credentials
pub mod credentials {
    /// Environment variable holding the admin API token
    pub const TOKEN_ENV_VAR: &str = "NEPTUNE_API_TOKEN";

    /// Environment variable overriding the API address from the token
    pub const API_URL_ENV_VAR: &str = "NEPTUNE_API_URL";
}

/// Retry policy defaults
pub mod retry {
    /// Total attempts including the first one
    pub const MAX_ATTEMPTS: u32 = 5;

    /// Delay before the first retry, in milliseconds
    pub const BASE_DELAY_MS: u64 = 1_000;

    /// Upper bound for a single delay, in milliseconds
    pub const MAX_DELAY_MS: u64 = 60_000;
}

/// Default values for CLI
pub mod defaults {
    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}

/// Invitation policy fields sent with every invite
pub mod invitation {
    pub const INVITATION_TYPE: &str = "emailRecipient";
    pub const ROLE_GRANT: &str = "member";
    pub const ADD_TO_ALL_PROJECTS: bool = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_path_format() {
        assert!(api::BASE_PATH.starts_with('/'));
        assert!(!api::BASE_PATH.ends_with('/'));
    }

    #[test]
    fn test_token_env_var() {
        assert_eq!(credentials::TOKEN_ENV_VAR, "NEPTUNE_API_TOKEN");
    }

    #[test]
    fn test_retry_bounds() {
        assert_eq!(retry::MAX_ATTEMPTS, 5);
        assert!(retry::BASE_DELAY_MS <= retry::MAX_DELAY_MS);
    }
}
