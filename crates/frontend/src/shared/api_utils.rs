//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Port the report API listens on
const API_PORT: u16 = 8081;

/// Get the base URL for API requests
///
/// Uses the host of the current page with the API port, or
/// "http://localhost:8081" during local development.
///
/// # Returns
/// - API base URL like "http://localhost:8081" or "http://reports.example.com:8081"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let hostname = window
        .location()
        .hostname()
        .unwrap_or_else(|_| "localhost".to_string());
    base_for_host(&hostname)
}

fn base_for_host(hostname: &str) -> String {
    match hostname {
        "" | "localhost" | "127.0.0.1" => format!("http://localhost:{}", API_PORT),
        host => format!("http://{}:{}", host, API_PORT),
    }
}

/// Build a full API URL from a path
///
/// # Example
/// ```ignore
/// let url = api_url("/api/reports/ticket-items");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_for_host() {
        assert_eq!(base_for_host("localhost"), "http://localhost:8081");
        assert_eq!(base_for_host(""), "http://localhost:8081");
        assert_eq!(base_for_host("10.0.0.5"), "http://10.0.0.5:8081");
    }
}
