//! Command parser - Recognises `<prefix><name> <argument>` lines

use regex_lite::Regex;

use crate::application::errors::ConfigError;

/// A line that matched the command pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub argument: String,
}

/// Extracts command name and free-form argument from chat text
pub struct CommandParser {
    pattern: Regex,
}

impl CommandParser {
    pub fn new(prefix: &str) -> Result<Self, ConfigError> {
        if prefix.is_empty() {
            return Err(ConfigError::InvalidValue("command prefix must not be empty".to_string()));
        }
        let pattern = Regex::new(&format!(r"^{}(\S+)\s*(.*)$", regex_lite::escape(prefix)))
            .map_err(|e| ConfigError::InvalidValue(format!("bad command prefix: {}", e)))?;
        Ok(Self { pattern })
    }

    pub fn parse(&self, text: &str) -> Option<ParsedCommand> {
        let caps = self.pattern.captures(text)?;
        Some(ParsedCommand {
            name: caps.get(1)?.as_str().to_string(),
            argument: caps.get(2).map(|m| m.as_str().trim_end().to_string()).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_and_argument() {
        let parser = CommandParser::new("!").unwrap();
        let cmd = parser.parse("!score add alice 5").unwrap();
        assert_eq!(cmd.name, "score");
        assert_eq!(cmd.argument, "add alice 5");
    }

    #[test]
    fn test_parse_without_argument() {
        let parser = CommandParser::new("!").unwrap();
        let cmd = parser.parse("!help   ").unwrap();
        assert_eq!(cmd.name, "help");
        assert_eq!(cmd.argument, "");
    }

    #[test]
    fn test_non_commands() {
        let parser = CommandParser::new("!").unwrap();
        assert!(parser.parse("hello !help").is_none());
        assert!(parser.parse("!").is_none());
        assert!(parser.parse("! help").is_none());
        assert!(parser.parse(":smile:").is_none());
    }

    #[test]
    fn test_prefix_is_literal() {
        let parser = CommandParser::new(".").unwrap();
        assert!(parser.parse(".help").is_some());
        assert!(parser.parse("xhelp").is_none());
        assert!(CommandParser::new("").is_err());
    }
}
