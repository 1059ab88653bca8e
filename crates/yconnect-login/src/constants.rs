//! Wire-level constants for the YConnect v2 authorization server.

/// Default authorization server base.
pub(crate) const DEFAULT_ISSUER: &str = "https://auth.login.yahoo.co.jp/yconnect/v2";

/// Path of the authorization endpoint, relative to the issuer.
pub(crate) const AUTHORIZATION_PATH: &str = "/authorization";

/// Alternate authorization path used when probing an installed companion
/// app over universal links.
pub(crate) const NATIVE_AUTHORIZATION_PATH: &str = "/authorization/native";

/// Custom issuers must stay on this domain.
pub(crate) const ISSUER_HOST_SUFFIX: &str = ".yahoo.co.jp";

/// Custom issuers must keep this base path.
pub(crate) const ISSUER_PATH: &str = "/yconnect/v2";

/// Random bytes drawn for the `state` replay-protection value.
pub(crate) const STATE_BYTES: usize = 32;
