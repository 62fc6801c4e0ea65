use regex::Regex;
use std::sync::OnceLock;

static PATTERNS: OnceLock<Vec<(Regex, String)>> = OnceLock::new();

/// Scrubs credentials out of text before it reaches the logs
///
/// Storage errors echo request details back from the REST endpoint, which can
/// include the anon key or bearer token.
pub struct LogSanitizer {
    patterns: Vec<(Regex, String)>,
}

impl LogSanitizer {
    pub fn new() -> Self {
        let patterns = PATTERNS.get_or_init(|| {
            vec![
                // Supabase keys are JWTs: three base64url segments, header starts with eyJ
                (
                    Regex::new(r"eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+")
                        .expect("valid JWT pattern"),
                    "***.***.***".to_string(),
                ),
                (
                    Regex::new(r"(?i)(bearer\s+)[A-Za-z0-9._~+/=-]+").expect("valid bearer pattern"),
                    "$1***".to_string(),
                ),
                (
                    Regex::new(r"(?i)(apikey[=:]\s*)[A-Za-z0-9._~+/=-]+")
                        .expect("valid apikey pattern"),
                    "$1***".to_string(),
                ),
                (
                    Regex::new(r"(sb_(?:publishable|secret)_)[A-Za-z0-9_-]+")
                        .expect("valid key pattern"),
                    "$1***".to_string(),
                ),
                (
                    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
                        .expect("valid email pattern"),
                    "***@***.***".to_string(),
                ),
            ]
        });

        Self {
            patterns: patterns.clone(),
        }
    }

    pub fn sanitize(&self, message: &str) -> String {
        let mut result = message.to_string();
        for (pattern, replacement) in &self.patterns {
            result = pattern.replace_all(&result, replacement).to_string();
        }
        result
    }
}

impl Default for LogSanitizer {
    fn default() -> Self {
        Self::new()
    }
}
