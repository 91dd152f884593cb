//! JSON dataset reader: one array file per record set.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use shelf_core::config::ShelfConfig;
use shelf_core::model::Dataset;

use crate::error::{Error, Result};

pub const USERS_FILE: &str = "users.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const PRODUCTS_FILE: &str = "products.json";

const BUNDLED_USERS: &str = include_str!("../../data/users.json");
const BUNDLED_CATEGORIES: &str = include_str!("../../data/categories.json");
const BUNDLED_PRODUCTS: &str = include_str!("../../data/products.json");

fn parse_records<T: DeserializeOwned>(src: &str, origin: &str) -> Result<Vec<T>> {
    serde_json::from_str(src).map_err(|source| Error::Json {
        path: origin.to_string(),
        source,
    })
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let display = path.display().to_string();
    let src = fs::read_to_string(path).map_err(|source| Error::Io {
        path: display.clone(),
        source,
    })?;
    parse_records(&src, &display)
}

/// The dataset compiled into the binary.
pub fn bundled_dataset() -> Result<Dataset> {
    Ok(Dataset {
        users: parse_records(BUNDLED_USERS, "<bundled>/users.json")?,
        categories: parse_records(BUNDLED_CATEGORIES, "<bundled>/categories.json")?,
        products: parse_records(BUNDLED_PRODUCTS, "<bundled>/products.json")?,
    })
}

/// Load `users.json`, `categories.json`, and `products.json` from `dir`.
pub fn load_dataset(dir: impl AsRef<Path>) -> Result<Dataset> {
    let dir = dir.as_ref();
    let dataset = Dataset {
        users: read_records(&dir.join(USERS_FILE))?,
        categories: read_records(&dir.join(CATEGORIES_FILE))?,
        products: read_records(&dir.join(PRODUCTS_FILE))?,
    };
    tracing::debug!(
        dir = %dir.display(),
        users = dataset.users.len(),
        categories = dataset.categories.len(),
        products = dataset.products.len(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Load from `cfg.data_dir`, falling back to the bundled dataset.
pub fn load_dataset_from(cfg: &ShelfConfig) -> Result<Dataset> {
    match cfg.data_dir.as_deref() {
        Some(dir) => load_dataset(dir),
        None => bundled_dataset(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) {
        fs::write(dir.path().join(name), body).unwrap();
    }

    #[test]
    fn bundled_dataset_parses() {
        let ds = bundled_dataset().unwrap();
        assert_eq!(ds.users.len(), 4);
        assert_eq!(ds.categories.len(), 5);
        assert_eq!(ds.products.len(), 10);
    }

    #[test]
    fn loads_from_directory() {
        let dir = TempDir::new().unwrap();
        write(&dir, USERS_FILE, r#"[{"id":1,"name":"Alice","sex":"f"}]"#);
        write(&dir, CATEGORIES_FILE, r#"[{"id":1,"title":"Dairy","icon":"🥛","ownerId":1}]"#);
        write(&dir, PRODUCTS_FILE, r#"[{"id":1,"name":"Milk","categoryId":1}]"#);

        let cfg = ShelfConfig {
            data_dir: Some(dir.path().display().to_string()),
            ..Default::default()
        };
        let ds = load_dataset_from(&cfg).unwrap();
        assert_eq!(ds.products[0].name, "Milk");
        assert_eq!(ds.categories[0].title, "Dairy");
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        let err = load_dataset(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io { ref path, .. } if path.ends_with(USERS_FILE)));
    }

    #[test]
    fn malformed_json_is_reported() {
        let dir = TempDir::new().unwrap();
        write(&dir, USERS_FILE, "[{\"id\":");
        assert!(matches!(load_dataset(dir.path()), Err(Error::Json { .. })));
    }
}
