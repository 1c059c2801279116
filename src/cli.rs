//! Minimal CLI parsing for one-shot commands.

use std::env;

#[derive(Debug, Default, PartialEq)]
pub struct CliOptions {
    /// Print the GraphQL SDL and exit
    pub print_schema: bool,
}

impl CliOptions {
    pub fn from_args() -> Self {
        Self::parse(env::args().skip(1))
    }

    fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut options = CliOptions::default();
        for arg in args {
            if arg.as_str() == "--print-schema" {
                options.print_schema = true;
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args() {
        assert_eq!(CliOptions::parse(args(&[])), CliOptions::default());
    }

    #[test]
    fn test_print_schema_flag() {
        assert!(CliOptions::parse(args(&["--verbose", "--print-schema"])).print_schema);
    }
}
