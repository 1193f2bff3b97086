// Property File Parser
// Parses simple key=value property files

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Parse a property file string, invoking `handler` for each key-value pair.
///
/// Keys keep their case; whitespace around keys and values is trimmed.
/// `#` starts a comment that runs to the end of the line, including after a
/// value. A line without `=` is skipped with a warning.
pub fn parse_propfile(data: &str, handler: &mut dyn FnMut(usize, &str, &str)) {
    for (number, raw_line) in data.lines().enumerate() {
        let line = match raw_line.split_once('#') {
            Some((before, _)) => before,
            None => raw_line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) => {
                let key = key.trim();
                if key.is_empty() {
                    log::warn!("Line {}: value without key", number + 1);
                    continue;
                }
                handler(number + 1, key, value.trim());
            }
            None => log::warn!("Line {}: key without value", number + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    #[error("Property file not found")]
    FileNotFound,
    #[error("I/O error reading property file: {0}")]
    IoError(String),
}

impl From<io::Error> for PropertyError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => PropertyError::FileNotFound,
            _ => PropertyError::IoError(err.to_string()),
        }
    }
}

/// An entry and the line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub value: String,
    pub line: usize,
}

/// Property file containing key-value pairs.
///
/// Keys are case-insensitive; a repeated key keeps the last value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyFile {
    properties: HashMap<String, Property>,
}

impl PropertyFile {
    /// Load a property file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PropertyError> {
        let data = fs::read_to_string(path)?;
        Ok(Self::parse(&data))
    }

    /// Parse property file content
    pub fn parse(data: &str) -> Self {
        let mut properties = HashMap::new();
        parse_propfile(data, &mut |line, key, value| {
            properties.insert(
                key.to_lowercase(),
                Property {
                    value: value.to_string(),
                    line,
                },
            );
        });
        PropertyFile { properties }
    }

    /// Get a property value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .get(&key.to_lowercase())
            .map(|p| p.value.as_str())
    }

    /// Line a key was defined on
    pub fn line_of(&self, key: &str) -> Option<usize> {
        self.properties.get(&key.to_lowercase()).map(|p| p.line)
    }

    /// Check if the property file is empty
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Keys in sorted order (lowercase)
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.properties.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
