use bytes::Bytes;

const DEFAULT_FILENAME: &str = "recording.m4a";
const DEFAULT_MIME_TYPE: &str = "audio/m4a";

/// An uploaded audio clip. The filename is reduced to its final path
/// component before it is used as an archive key.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub filename: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl AudioClip {
    pub fn new(filename: Option<String>, mime_type: Option<String>, data: Bytes) -> Self {
        let filename = filename
            .as_deref()
            .map(safe_file_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());

        let mime_type = mime_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

        Self {
            filename,
            mime_type,
            data,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

fn safe_file_name(raw: &str) -> String {
    raw.rsplit(['/', '\\'])
        .next()
        .unwrap_or(raw)
        .trim()
        .to_string()
}
