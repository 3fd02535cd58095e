/// How a media field refers to its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaRef<'a> {
    /// http(s) URL pointing somewhere else
    Remote(&'a str),
    /// `data:` URI carrying the payload inline
    Embedded { mime: &'a str, payload: &'a str },
    /// Anything else (blob handles, relative paths)
    Other(&'a str),
}

impl<'a> MediaRef<'a> {
    pub fn classify(value: &'a str) -> Self {
        let lower: String = value.chars().take(8).collect::<String>().to_ascii_lowercase();

        if lower.starts_with("http://") || lower.starts_with("https://") {
            return MediaRef::Remote(value);
        }

        if lower.starts_with("data:") {
            let rest = &value[5..];
            if let Some((header, payload)) = rest.split_once(',') {
                let mime = header.split(';').next().unwrap_or("");
                return MediaRef::Embedded { mime, payload };
            }
        }

        MediaRef::Other(value)
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, MediaRef::Embedded { .. })
    }
}
