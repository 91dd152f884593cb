//! String collation used by the text sort keys.
//!
//! Ordering is an explicit dependency of the pipeline rather than whatever
//! the process locale happens to be, so results are reproducible.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub trait Collation {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

impl<F> Collation for F
where
    F: Fn(&str, &str) -> Ordering,
{
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self(a, b)
    }
}

/// Code-point ordering. Uppercase sorts before lowercase.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCollation;

impl Collation for BinaryCollation {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

/// UCA collation tailored for a locale: letters compare by base character
/// first, then accents, then case (lowercase first).
pub struct LocaleCollation {
    locale: String,
    collator: Collator,
}

impl LocaleCollation {
    pub fn new(locale: &str) -> Result<Self> {
        let parsed: Locale = locale
            .parse()
            .map_err(|e| Error::Config(format!("invalid locale '{}': {:?}", locale, e)))?;
        let collator = Collator::try_new(&parsed.into(), CollatorOptions::new())
            .map_err(|e| Error::Config(format!("no collation data for '{}': {:?}", locale, e)))?;
        Ok(Self {
            locale: locale.to_string(),
            collator,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl fmt::Debug for LocaleCollation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleCollation")
            .field("locale", &self.locale)
            .finish()
    }
}

impl Collation for LocaleCollation {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollationKind {
    #[default]
    Locale,
    Binary,
}

impl CollationKind {
    pub fn build(self, locale: &str) -> Result<Box<dyn Collation>> {
        Ok(match self {
            CollationKind::Locale => Box::new(LocaleCollation::new(locale)?),
            CollationKind::Binary => Box::new(BinaryCollation),
        })
    }
}

impl FromStr for CollationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "locale" => Ok(CollationKind::Locale),
            "binary" => Ok(CollationKind::Binary),
            other => Err(Error::Config(format!("unknown collation '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_ordering_is_not_byte_ordering() {
        let c = LocaleCollation::new("en").unwrap();
        // Byte order puts every uppercase letter first.
        assert_eq!(BinaryCollation.compare("apple", "Banana"), Ordering::Greater);
        assert_eq!(c.compare("apple", "Banana"), Ordering::Less);
        assert_eq!(c.compare("a", "A"), Ordering::Less);
        assert_eq!(c.compare("résumé", "resume"), Ordering::Greater);
        assert_eq!(c.compare("résumé", "rez"), Ordering::Less);
    }

    #[test]
    fn closures_are_collations() {
        let reversed = |a: &str, b: &str| b.cmp(a);
        assert_eq!(reversed.compare("a", "b"), Ordering::Greater);
    }

    #[test]
    fn bad_locale_is_a_config_error() {
        assert!(matches!(
            LocaleCollation::new("not a locale!"),
            Err(Error::Config(_))
        ));
        assert!("fancy".parse::<CollationKind>().is_err());
    }
}
