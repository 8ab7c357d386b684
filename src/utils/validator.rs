/// 粗粒度的URL校验，只用于命令行直接给出的URL
pub fn is_valid_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com"));
        assert!(!is_valid_url("invalid-url"));
        assert!(!is_valid_url("ftp://example.com"));
    }
}
