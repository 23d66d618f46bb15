use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub const PAID_PRICE_TYPE: &str = "payant";

lazy_static! {
    static ref PARIS_ZIPCODE: Regex = Regex::new(r"75[0-9]{3}").unwrap();
}

#[derive(Debug, Clone)]
pub struct Event {
    pub title: String,
    pub tag1: Label,
    pub tag2: Option<Label>,
    /// Fifth category slot. Kept on the event but nothing filters on it.
    pub tag5: Option<Label>,
    pub date_start: NaiveDateTime,
    pub date_end: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub date_description: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub address_zipcode: Zipcode,
    pub address_name: Option<String>,
    pub address_street: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price_type: Option<Label>,
    pub price_detail: Option<String>,
}

impl Event {
    pub fn has_category(&self, categories: &HashSet<Label>) -> bool {
        categories.contains(&self.tag1)
            || self
                .tag2
                .as_ref()
                .is_some_and(|tag| categories.contains(tag))
    }
}

/// Category label (tag, zipcode, price type).
///
/// Compared, ordered and hashed by its text, so a label built from user input
/// matches one produced by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(Arc<str>);

impl Label {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Hands out one shared allocation per distinct label text.
#[derive(Debug, Default)]
pub struct LabelInterner {
    pool: HashSet<Label>,
}

impl LabelInterner {
    pub fn intern(&mut self, value: &str) -> Label {
        if let Some(label) = self.pool.get(value) {
            return label.clone();
        }

        let label = Label::from(value);
        self.pool.insert(label.clone());
        label
    }

    pub(crate) fn len(&self) -> usize {
        self.pool.len()
    }
}

/// Paris postal code, always exactly `75` followed by three digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Zipcode(Label);

impl Zipcode {
    /// Finds the first Paris postal code in free text (e.g. `" 75 011"` gives
    /// `75011`). Every whitespace character is removed first, tabs and line
    /// breaks included, not only spaces.
    pub fn extract(raw: &str) -> Option<Zipcode> {
        Self::find(raw).map(|code| Zipcode(Label::from(code.as_str())))
    }

    pub(crate) fn extract_interned(raw: &str, interner: &mut LabelInterner) -> Option<Zipcode> {
        Self::find(raw).map(|code| Zipcode(interner.intern(&code)))
    }

    fn find(raw: &str) -> Option<String> {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

        PARIS_ZIPCODE
            .find(&compact)
            .map(|found| found.as_str().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Zipcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
