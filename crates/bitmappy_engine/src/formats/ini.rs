//! Section/option documents in the configparser dialect used by sprite files.
//!
//! Supported syntax:
//! - `[name]` section headers (the name is everything up to the last `]`)
//! - `key = value` and `key: value` options, option names are case folded
//! - indented continuation lines, joined with `\n`; blank lines inside a value are kept,
//!   trailing blank lines are dropped
//! - `#` and `;` comment lines
//!
//! An indented line that continues an option value is never a comment. Pixel rows may start
//! with `;` since it is a valid palette key.
//!
//! Duplicate sections and duplicate options within a section are errors.

use std::fmt::{Display, Write as _};

use crate::{EngineError, Result};

const COMMENT_PREFIXES: [char; 2] = ['#', ';'];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniSection {
    name: String,
    options: Vec<(String, String)>,
}

impl IniSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, option: &str) -> Option<&str> {
        let option = option.to_lowercase();
        self.options.iter().find(|(k, _)| *k == option).map(|(_, v)| v.as_str())
    }

    /// Sets or replaces `option`.
    pub fn set(&mut self, option: &str, value: impl Into<String>) {
        let option = option.to_lowercase();
        let value = value.into();
        if let Some(entry) = self.options.iter_mut().find(|(k, _)| *k == option) {
            entry.1 = value;
        } else {
            self.options.push((option, value));
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<IniSection>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> impl Iterator<Item = &IniSection> {
        self.sections.iter()
    }

    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Appends an empty section.
    ///
    /// # Errors
    ///
    /// `EngineError::DuplicateSection` if a section with that name exists.
    pub fn add_section(&mut self, name: impl Into<String>) -> Result<&mut IniSection> {
        let name = name.into();
        if self.has_section(&name) {
            return Err(EngineError::DuplicateSection { name, line: 0 });
        }
        self.sections.push(IniSection::new(name));
        let last = self.sections.len() - 1;
        Ok(&mut self.sections[last])
    }

    /// Parses `text`.
    ///
    /// # Errors
    ///
    /// `IniSyntax` for options outside of a section, lines without delimiter and empty
    /// option or section names; `DuplicateSection`/`DuplicateOption` for redefinitions.
    pub fn parse(text: &str) -> Result<Self> {
        let mut doc = IniDocument::new();
        // (option name, indent of the option line) while a value may still continue
        let mut open_option: Option<(String, usize)> = None;
        let mut value_lines: Vec<String> = Vec::new();

        for (i, raw_line) in text.lines().enumerate() {
            let line_number = i + 1;
            let stripped = raw_line.trim();
            let indent = raw_line.len() - raw_line.trim_start().len();

            if stripped.is_empty() {
                if open_option.is_some() {
                    value_lines.push(String::new());
                }
                continue;
            }

            if let Some((_, option_indent)) = &open_option {
                if indent > *option_indent {
                    value_lines.push(stripped.to_string());
                    continue;
                }
            }

            if stripped.starts_with(COMMENT_PREFIXES) {
                continue;
            }

            doc.close_option(&mut open_option, &mut value_lines);

            if stripped.starts_with('[') {
                let Some(end) = stripped.rfind(']') else {
                    return Err(EngineError::IniSyntax {
                        line: line_number,
                        message: format!("unterminated section header '{stripped}'"),
                    });
                };
                let name = &stripped[1..end];
                if name.is_empty() {
                    return Err(EngineError::IniSyntax {
                        line: line_number,
                        message: "empty section name".to_string(),
                    });
                }
                if doc.has_section(name) {
                    return Err(EngineError::DuplicateSection {
                        name: name.to_string(),
                        line: line_number,
                    });
                }
                doc.sections.push(IniSection::new(name));
                continue;
            }

            let Some(section) = doc.sections.last() else {
                return Err(EngineError::IniSyntax {
                    line: line_number,
                    message: format!("option outside of a section: '{stripped}'"),
                });
            };

            let Some(delimiter) = stripped.find(['=', ':']) else {
                return Err(EngineError::IniSyntax {
                    line: line_number,
                    message: format!("expected 'key = value', got '{stripped}'"),
                });
            };
            let option = stripped[..delimiter].trim_end().to_lowercase();
            if option.is_empty() {
                return Err(EngineError::IniSyntax {
                    line: line_number,
                    message: "empty option name".to_string(),
                });
            }
            if section.get(&option).is_some() {
                return Err(EngineError::DuplicateOption {
                    section: section.name.clone(),
                    option,
                    line: line_number,
                });
            }
            value_lines.push(stripped[delimiter + 1..].trim().to_string());
            open_option = Some((option, indent));
        }
        doc.close_option(&mut open_option, &mut value_lines);
        Ok(doc)
    }

    fn close_option(&mut self, open_option: &mut Option<(String, usize)>, value_lines: &mut Vec<String>) {
        let Some((option, _)) = open_option.take() else {
            return;
        };
        while value_lines.last().is_some_and(String::is_empty) {
            value_lines.pop();
        }
        let value = value_lines.join("\n");
        value_lines.clear();
        if let Some(section) = self.sections.last_mut() {
            section.options.push((option, value));
        }
    }
}

impl Display for IniDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for (option, value) in &section.options {
                let mut line = String::new();
                write!(line, "{option} = {}", value.replace('\n', "\n "))?;
                writeln!(f, "{}", line.trim_end())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
