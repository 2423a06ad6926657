//! Section/option text codec used by ship files.
//!
//! The dialect is the one the game reads and writes:
//! - `[Section]` headers, `option=value` or `option: value` lines
//! - option names are case sensitive and kept verbatim
//! - full-line comments start with `#` or `;`
//! - an indented line continues the previous value
//! - a section or an option may appear only once
//!
//! Both sections and options keep file order so that a document written
//! back reads like the original.

use indexmap::IndexMap;
use std::fmt;

use crate::error::IniError;

/// Options of one section, in file order.
pub type Section = IndexMap<String, String>;

/// A parsed section/option file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: IndexMap<String, Section>,
}

impl IniDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole file.
    pub fn parse(text: &str) -> Result<Self, IniError> {
        let mut sections: IndexMap<String, Section> = IndexMap::new();
        let mut current: Option<String> = None;
        // (option, indent) of the value a continuation line would extend
        let mut last_option: Option<(String, usize)> = None;

        for (index, raw_line) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw_line.trim();
            if trimmed.is_empty() {
                last_option = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indent = raw_line.len() - raw_line.trim_start().len();
            if let (Some(section), Some((option, option_indent))) = (&current, &last_option) {
                if indent > *option_indent {
                    if let Some(value) = sections
                        .get_mut(section)
                        .and_then(|options| options.get_mut(option))
                    {
                        value.push('\n');
                        value.push_str(trimmed);
                    }
                    continue;
                }
            }

            if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() > 2 {
                let name = trimmed[1..trimmed.len() - 1].to_string();
                if sections.contains_key(&name) {
                    return Err(IniError::DuplicateSection {
                        line,
                        section: name,
                    });
                }
                sections.insert(name.clone(), Section::new());
                current = Some(name);
                last_option = None;
                continue;
            }

            let Some(section) = &current else {
                return Err(IniError::MissingSectionHeader {
                    line,
                    content: raw_line.to_string(),
                });
            };

            let Some(delimiter) = trimmed.find(['=', ':']) else {
                return Err(IniError::InvalidLine {
                    line,
                    content: raw_line.to_string(),
                });
            };
            let option = trimmed[..delimiter].trim_end();
            let value = trimmed[delimiter + 1..].trim_start();
            if option.is_empty() {
                return Err(IniError::InvalidLine {
                    line,
                    content: raw_line.to_string(),
                });
            }

            let options = sections.entry(section.clone()).or_default();
            if options.contains_key(option) {
                return Err(IniError::DuplicateOption {
                    line,
                    section: section.clone(),
                    option: option.to_string(),
                });
            }
            options.insert(option.to_string(), value.to_string());
            last_option = Some((option.to_string(), indent));
        }

        Ok(Self { sections })
    }

    /// Check if a section exists
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Get a section by name
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, options)| (name.as_str(), options))
    }

    /// Get an option value
    pub fn get(&self, section: &str, option: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|options| options.get(option))
            .map(String::as_str)
    }

    /// Replace the content of a section, keeping its position when it
    /// already exists. New sections go at the end.
    pub fn set_section(&mut self, name: &str, options: Section) {
        match self.sections.get_mut(name) {
            Some(existing) => *existing = options,
            None => {
                self.sections.insert(name.to_string(), options);
            }
        }
    }

    /// Set an option, creating the section if needed.
    pub fn set(&mut self, section: &str, option: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(option.to_string(), value.into());
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if the document has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Written the way the game expects it: no spaces around `=`, one blank
/// line after each section, continuation lines indented with a tab.
impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, options) in &self.sections {
            writeln!(f, "[{}]", name)?;
            for (option, value) in options {
                writeln!(f, "{}={}", option, value.replace('\n', "\n\t"))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
