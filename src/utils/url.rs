//! Joining the configured base URL with endpoint paths.
//!
//! Endpoint paths keep their own trailing slash: the backend distinguishes
//! `chat_rooms/{id}/` (update, delete) from `chat_rooms/{id}` (detail).

/// Strips trailing slashes from a base URL.
///
/// ```
/// use roomchat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://chat.example/api/"), "https://chat.example/api");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Joins a base URL and an endpoint with exactly one slash between them.
///
/// ```
/// use roomchat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://chat.example/api/", "/login/"),
///     "https://chat.example/api/login/"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        normalize_base_url(base_url),
        endpoint.trim_start_matches('/')
    )
}
