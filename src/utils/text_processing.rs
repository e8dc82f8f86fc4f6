//! Text processing utilities.
//!
//! This module contains utilities for processing and transforming text,
//! such as replacing user-profile URLs in ticket comments with readable
//! mentions.

use log::*;
use regex::Regex;
use std::collections::HashMap;

/// Replace profile URLs with "@name" mentions in text.
///
/// URLs like "users/u_123456" or "https://console.enxy.dev/users/u_123456"
/// become "@name" based on the provided user map.
///
/// # Arguments
/// * `text` - The text to process
/// * `user_map` - Map of user id to user name
///
/// # Returns
/// The text with profile URLs replaced with "@name" mentions.
pub fn replace_mention_urls(text: &str, user_map: &HashMap<String, String>) -> String {
    let mention_patterns = vec![
        r"https://console\.enxy\.dev/users/([A-Za-z0-9_-]+)",
        r"users/([A-Za-z0-9_-]+)",
    ];

    let mut result = text.to_string();
    for pattern in mention_patterns {
        let re = match Regex::new(pattern) {
            Ok(r) => r,
            Err(e) => {
                warn!("Failed to compile regex pattern '{}': {}", pattern, e);
                continue;
            }
        };
        result = re
            .replace_all(&result, |caps: &regex::Captures| {
                if let Some(id_match) = caps.get(1) {
                    let id = id_match.as_str();
                    if let Some(name) = user_map.get(id) {
                        format!("@{}", name)
                    } else {
                        // Unknown user: keep the original URL
                        caps.get(0)
                            .map(|m| m.as_str().to_string())
                            .unwrap_or_default()
                    }
                } else {
                    caps.get(0)
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default()
                }
            })
            .to_string();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_mention_urls_full_url() {
        let mut user_map = HashMap::new();
        user_map.insert("u_123456".to_string(), "John Doe".to_string());

        let text = "Escalated by https://console.enxy.dev/users/u_123456 yesterday";
        let result = replace_mention_urls(text, &user_map);
        assert_eq!(result, "Escalated by @John Doe yesterday");
    }

    #[test]
    fn test_replace_mention_urls_short_url() {
        let mut user_map = HashMap::new();
        user_map.insert("u_123456".to_string(), "John Doe".to_string());

        let text = "See users/u_123456 for details";
        let result = replace_mention_urls(text, &user_map);
        assert_eq!(result, "See @John Doe for details");
    }

    #[test]
    fn test_replace_mention_urls_multiple() {
        let mut user_map = HashMap::new();
        user_map.insert("u_1".to_string(), "John Doe".to_string());
        user_map.insert("u_2".to_string(), "Jane Smith".to_string());

        let text = "Ping users/u_1 and users/u_2";
        let result = replace_mention_urls(text, &user_map);
        assert_eq!(result, "Ping @John Doe and @Jane Smith");
    }

    #[test]
    fn test_replace_mention_urls_unknown_user() {
        let user_map = HashMap::new();
        let text = "Check users/u_999999";
        let result = replace_mention_urls(text, &user_map);
        // Unknown user keeps the original URL
        assert_eq!(result, "Check users/u_999999");
    }

    #[test]
    fn test_replace_mention_urls_no_matches() {
        let mut user_map = HashMap::new();
        user_map.insert("u_123456".to_string(), "John Doe".to_string());

        let text = "This is just regular text with no mention URLs";
        let result = replace_mention_urls(text, &user_map);
        assert_eq!(result, text);
    }
}
