use std::{fs, path::PathBuf};

use bitmappy_edit::{EditorLayout, Size, MINI_VIEW_SCALE};
use serde::{Deserialize, Serialize};

const OPTIONS_FILE: &str = "options.toml";

/// Persisted defaults, stored as `options.toml` in the project config directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Size of sprites created with `new`
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub sprite_name: String,

    /// Screen pixels per sprite pixel for `render`
    pub cell_size: i32,

    pub screen_width: i32,
    pub screen_height: i32,
    pub mini_view_scale: i32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            canvas_width: 32,
            canvas_height: 32,
            sprite_name: "Untitled".to_string(),
            cell_size: 8,
            screen_width: 640,
            screen_height: 480,
            mini_view_scale: MINI_VIEW_SCALE,
        }
    }
}

impl Options {
    pub fn load_options() -> Self {
        if let Some(proj_dirs) = directories::ProjectDirs::from("com", "GitHub", "bitmappy") {
            if !proj_dirs.config_dir().exists() && fs::create_dir_all(proj_dirs.config_dir()).is_err() {
                log::error!("Can't create configuration directory {:?}", proj_dirs.config_dir());
                return Self::default();
            }
            let options_file = proj_dirs.config_dir().join(OPTIONS_FILE);
            if options_file.exists() {
                match fs::read_to_string(&options_file) {
                    Ok(txt) => match Self::from_toml(&txt) {
                        Ok(result) => return result,
                        Err(err) => log::error!("Error parsing options file {}: {}", options_file.display(), err),
                    },
                    Err(err) => log::error!("Error reading options file: {}", err),
                }
            } else {
                let result = Self::default();
                result.store_options();
                return result;
            }
        }
        Self::default()
    }

    pub fn store_options(&self) {
        if let Some(proj_dirs) = directories::ProjectDirs::from("com", "GitHub", "bitmappy") {
            let file_name = proj_dirs.config_dir().join(OPTIONS_FILE);
            match toml::to_string(self) {
                Ok(text) => {
                    if let Err(err) = fs::write(file_name, text) {
                        log::error!("Error writing options file: {}", err);
                    }
                }
                Err(err) => log::error!("Error writing options file: {}", err),
            }
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Returns the log directory path, creating it if needed
    pub fn get_log_dir() -> Option<PathBuf> {
        let proj_dirs = directories::ProjectDirs::from("com", "GitHub", "bitmappy")?;
        let dir = proj_dirs.config_dir().to_path_buf();
        if !dir.exists() {
            fs::create_dir_all(&dir).ok()?;
        }
        Some(dir)
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    pub fn editor_layout(&self) -> EditorLayout {
        EditorLayout::new(Size::new(self.screen_width, self.screen_height), self.mini_view_scale)
    }
}

#[cfg(test)]
mod tests {
    use bitmappy_edit::Size;

    use super::Options;

    #[test]
    fn test_missing_keys_use_defaults() {
        let options = Options::from_toml("canvas_width = 16\nsprite_name = \"Tile\"\n").unwrap();
        assert_eq!(Size::new(16, 32), options.canvas_size());
        assert_eq!("Tile", options.sprite_name);
        assert_eq!(Options::default().cell_size, options.cell_size);
    }

    #[test]
    fn test_round_trip() {
        let options = Options {
            mini_view_scale: 3,
            ..Default::default()
        };
        let text = toml::to_string(&options).unwrap();
        assert_eq!(options, Options::from_toml(&text).unwrap());
    }

    #[test]
    fn test_editor_layout() {
        let layout = Options::default().editor_layout();
        assert_eq!(Size::new(640, 480), layout.screen_size);
        assert_eq!(2, layout.mini_view_scale);
    }
}
