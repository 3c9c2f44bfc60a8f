use miette::bail;

/// Splits a `project/repository` target into its parts.
pub fn parse_target(target: &str) -> miette::Result<(String, String)> {
    match target.split_once('/') {
        Some((project, name)) if !project.is_empty() && !name.is_empty() => {
            Ok((project.to_string(), name.to_string()))
        }
        _ => bail!("Invalid target '{target}', expected project/repository"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(
            parse_target("openSUSE/standard").unwrap(),
            ("openSUSE".to_string(), "standard".to_string())
        );
        assert!(parse_target("standard").is_err());
        assert!(parse_target("/standard").is_err());
        assert!(parse_target("openSUSE/").is_err());
    }
}
