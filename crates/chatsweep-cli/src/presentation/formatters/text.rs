use chatsweep_core::truncate;

pub const NAME_WIDTH: usize = 32;
pub const PATH_WIDTH: usize = 48;

/// Truncate to `width` characters and pad to exactly `width`.
pub fn fit(s: &str, width: usize) -> String {
    format!("{:<width$}", truncate(s, width), width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_keeps_width() {
        assert_eq!(fit("short", 8), "short   ");
        let long = "a".repeat(40);
        let fitted = fit(&long, 10);
        assert_eq!(fitted.chars().count(), 10);
        assert!(fitted.ends_with("..."));
    }
}
