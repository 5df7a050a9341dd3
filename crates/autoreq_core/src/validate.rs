use url::Url;

/// Checks that `raw` looks like a repository URL the form may submit.
///
/// Returns the trimmed URL on success, or a short hint for the user.
pub fn validate_repo_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Please enter a repository URL.".to_string());
    }
    let parsed = Url::parse(trimmed).map_err(|err| format!("Not a valid URL: {err}."))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!(
            "Unsupported URL scheme '{}'; use http or https.",
            parsed.scheme()
        ));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err("URL is missing a host.".to_string());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_github_clone_urls() {
        assert_eq!(
            validate_repo_url("  https://github.com/acme/widget.git \n"),
            Ok("https://github.com/acme/widget.git".to_string())
        );
        assert!(validate_repo_url("http://example.com/repo").is_ok());
    }

    #[test]
    fn rejects_blank_and_non_urls() {
        assert!(validate_repo_url("").is_err());
        assert!(validate_repo_url("   ").is_err());
        assert!(validate_repo_url("github.com/acme/widget").is_err());
        assert!(validate_repo_url("ftp://github.com/acme/widget").is_err());
        assert!(validate_repo_url("mailto:dev@example.com").is_err());
    }
}
