//! Tests for subscriber setup

#[cfg(test)]
mod tests {
    use tilebloom::io::logging::{default_directive, init_logging};

    // Tests quiet mode lowers the default filter to warnings
    // Verified by ignoring the quiet flag
    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "info");
        assert_eq!(default_directive(true), "warn");
    }

    // Tests a second install leaves the first subscriber in place
    // Verified by panicking on repeated initialization
    #[test]
    fn test_init_is_idempotent() {
        init_logging(true);
        assert!(!init_logging(false));
    }
}
