use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const FILE_NAME: &str = "File Name";
pub const POST_TITLE: &str = "Post Title";
pub const DESCRIPTION: &str = "Description";
pub const PUBLICATION_DATE: &str = "Publication Date";
pub const DURATION: &str = "Duration";
pub const YOUTUBE: &str = "YouTube";
pub const TIKTOK: &str = "TikTok";
pub const X_COM: &str = "X.com";
pub const TYPE: &str = "Type";
pub const CASE: &str = "Case";
pub const DOCKET_NO: &str = "SCOTUS Docket no.";

/// One scheduled publication. Field names on the wire are the display names
/// used by the data file, spaces and punctuation included.
///
/// Only string values populate the typed fields. Anything else stored under
/// a known name (numbers, booleans, `null`) stays in `extra` with its
/// original JSON value, so rewriting the file keeps it as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentRecord {
    pub file_name: Option<String>,
    pub post_title: Option<String>,
    pub description: Option<String>,
    pub publication_date: Option<String>,
    pub duration: Option<String>,
    pub youtube: Option<String>,
    pub tiktok: Option<String>,
    pub x_com: Option<String>,
    pub content_type: Option<String>,
    pub case: Option<String>,
    pub docket_no: Option<String>,
    /// Keys this model does not know about, or known keys holding a
    /// non-string value.
    pub extra: Map<String, Value>,
}

impl ContentRecord {
    fn fields(&self) -> [(&'static str, &Option<String>); 11] {
        [
            (FILE_NAME, &self.file_name),
            (POST_TITLE, &self.post_title),
            (DESCRIPTION, &self.description),
            (PUBLICATION_DATE, &self.publication_date),
            (DURATION, &self.duration),
            (YOUTUBE, &self.youtube),
            (TIKTOK, &self.tiktok),
            (X_COM, &self.x_com),
            (TYPE, &self.content_type),
            (CASE, &self.case),
            (DOCKET_NO, &self.docket_no),
        ]
    }

    fn fields_mut(&mut self) -> [(&'static str, &mut Option<String>); 11] {
        [
            (FILE_NAME, &mut self.file_name),
            (POST_TITLE, &mut self.post_title),
            (DESCRIPTION, &mut self.description),
            (PUBLICATION_DATE, &mut self.publication_date),
            (DURATION, &mut self.duration),
            (YOUTUBE, &mut self.youtube),
            (TIKTOK, &mut self.tiktok),
            (X_COM, &mut self.x_com),
            (TYPE, &mut self.content_type),
            (CASE, &mut self.case),
            (DOCKET_NO, &mut self.docket_no),
        ]
    }
}

impl Serialize for ContentRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.fields();
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in fields.iter() {
            if let Some(value) = value {
                map.serialize_entry(key, value)?;
            }
        }
        // A typed value set after loading wins over the stored raw one.
        for (key, value) in &self.extra {
            let shadowed = fields.iter().any(|(k, v)| *k == key.as_str() && v.is_some());
            if !shadowed {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ContentRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut extra = Map::<String, Value>::deserialize(deserializer)?;
        let mut record = ContentRecord::default();
        for (key, field) in record.fields_mut() {
            if matches!(extra.get(key), Some(Value::String(_))) {
                if let Some(Value::String(value)) = extra.remove(key) {
                    *field = Some(value);
                }
            }
        }
        record.extra = extra;
        Ok(record)
    }
}

pub type Collection = Vec<ContentRecord>;

impl ContentRecord {
    pub fn publication_date(&self) -> Option<&str> {
        self.publication_date.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Case-insensitive "primary" check used to order same-day records.
    pub fn is_primary(&self) -> bool {
        self.content_type()
            .map(|t| t.to_lowercase() == ContentType::Primary.as_str().to_lowercase())
            .unwrap_or(false)
    }

    /// The searchable text fields, in the order they are matched.
    pub fn search_fields(&self) -> [Option<&str>; 3] {
        [
            self.post_title.as_deref(),
            self.case.as_deref(),
            self.description.as_deref(),
        ]
    }
}

/// The content types offered by the create and edit forms. Stored values are
/// free text, so records may carry other types too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Primary,
    ShortLandscape,
    ShortPortrait,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [
        ContentType::Primary,
        ContentType::ShortLandscape,
        ContentType::ShortPortrait,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Primary => "Primary",
            ContentType::ShortLandscape => "Short (landscape)",
            ContentType::ShortPortrait => "Short (portrait)",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
