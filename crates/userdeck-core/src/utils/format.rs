/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Truncate then pad with spaces so table columns line up
pub fn fit_column(s: &str, width: usize) -> String {
    let cell = truncate_string(s, width);
    let padding = width.saturating_sub(cell.chars().count());
    format!("{}{}", cell, " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Hello", 2), "He");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate_string("Zoë Ågren", 9), "Zoë Ågren");
    }

    #[test]
    fn test_fit_column() {
        assert_eq!(fit_column("Janet", 8), "Janet   ");
        assert_eq!(fit_column("janet.weaver@reqres.in", 10), "janet.w...");
        assert_eq!(fit_column("", 3), "   ");
    }
}
