use serde::{Deserialize, Serialize};

/// Preference sent when the user left the field empty.
pub const DEFAULT_PREFERENCE: &str = "any";

/// One image chosen for a single upload cycle.
///
/// The bytes are never inspected by the client; the declared media type and
/// filename travel with the multipart part so the server can validate them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedImage {
    pub bytes: Vec<u8>,
    pub media_type: String,
    pub filename: String,
}

impl SelectedImage {
    pub fn new(
        bytes: impl Into<Vec<u8>>,
        media_type: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
            filename: filename.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        is_image_media_type(&self.media_type)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Image payloads can be megabytes; keep them out of debug output and logs.
impl std::fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedImage")
            .field("size_bytes", &self.bytes.len())
            .field("media_type", &self.media_type)
            .field("filename", &self.filename)
            .finish()
    }
}

pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Free-form dietary preference typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preference(pub String);

impl Preference {
    /// Value actually sent over the wire: the literal empty string means "any".
    pub fn effective(&self) -> &str {
        effective_preference(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Preference {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Preference {
    fn from(value: String) -> Self {
        Self(value)
    }
}

pub fn effective_preference(raw: &str) -> &str {
    if raw.is_empty() {
        DEFAULT_PREFERENCE
    } else {
        raw
    }
}
