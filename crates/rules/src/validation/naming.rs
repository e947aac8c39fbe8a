/// Check if a string is valid kebab-case: `^[a-z0-9]+(-[a-z0-9]+)*$`
pub(crate) fn is_kebab_case(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    let mut after_hyphen = true;
    for ch in s.chars() {
        if ch == '-' {
            if after_hyphen {
                return false;
            }
            after_hyphen = true;
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            after_hyphen = false;
        } else {
            return false;
        }
    }
    !after_hyphen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case() {
        assert!(is_kebab_case("cohort-rules-default"));
        assert!(is_kebab_case("v2"));
        assert!(!is_kebab_case(""));
        assert!(!is_kebab_case("-leading"));
        assert!(!is_kebab_case("trailing-"));
        assert!(!is_kebab_case("double--hyphen"));
        assert!(!is_kebab_case("Upper-Case"));
        assert!(!is_kebab_case("snake_case"));
    }
}
