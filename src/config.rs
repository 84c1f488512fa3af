use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use toml_edit::DocumentMut;

const TABLE_NAME: &str = "site";
const URL_KEY: &str = "url";

/// Site address stored in the configuration, if any
pub fn load_url() -> Option<String> {
    load(URL_KEY)
}

pub fn save_url(url: &str) -> Result<()> {
    save(URL_KEY, url)
}

fn load(key: &str) -> Option<String> {
    let toml = load_toml(&config_path()).ok()?;
    let value = toml.get(TABLE_NAME)?.get(key)?.as_str()?.to_string();

    Some(value)
}

fn save(key: &str, value: &str) -> Result<()> {
    let path = config_path();

    let mut doc = match load_toml(&path) {
        Ok(t) => t,
        Err(_) => {
            if let Some(p) = path.parent() {
                fs::create_dir_all(p)?;
            }

            DocumentMut::new()
        }
    };

    if !doc.contains_table(TABLE_NAME) {
        doc[TABLE_NAME] = toml_edit::table();
    }
    doc[TABLE_NAME][key] = toml_edit::value(value);

    safe_save(&doc.to_string(), &path)
}

fn load_toml(path: &Path) -> Result<DocumentMut> {
    let content = fs::read_to_string(path)?;
    let toml = content.parse::<DocumentMut>()?;

    Ok(toml)
}

/// Writes through a temporary file so a failed write keeps the old content
fn safe_save(content: &str, path: &Path) -> Result<()> {
    let tmp_path = path.with_extension("toml.tmp");

    fs::write(&tmp_path, content)?;
    fs::rename(tmp_path, path)?;

    Ok(())
}

pub fn clean() -> Result<()> {
    let path = config_path();

    fs::remove_file(path).context("Unable to delete configuration")
}

pub fn config_path() -> PathBuf {
    let root = {
        #[cfg(test)]
        {
            Some(std::env::temp_dir().to_string_lossy().into_owned())
        }

        #[cfg(not(test))]
        {
            #[cfg(windows)]
            let r = std::env::var("APPDATA").ok();

            #[cfg(not(windows))]
            let r = std::env::var("HOME").ok();

            r
        }
    };

    let mut path = PathBuf::new();
    if let Some(r) = root {
        path.push(r);
    }
    path.push(CONFIG_PATH);

    path
}

#[cfg(not(windows))]
const CONFIG_PATH: &str = ".config/animeunity/config.toml";

#[cfg(windows)]
const CONFIG_PATH: &str = r"animeunity\config.toml";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clean() {
        let url = "https://www.animeunity.to";

        save_url(url).unwrap();
        assert_eq!(load_url().as_deref(), Some(url));

        save_url("https://www.animeunity.so").unwrap();
        assert_eq!(load_url().as_deref(), Some("https://www.animeunity.so"));

        clean().unwrap();
        assert_eq!(load_url(), None);
    }
}
