//! `multipart/form-data` bodies for file uploads.

use uuid::Uuid;

/// A form with one or more file parts, sent by [`crate::HttpClient::post_multipart`].
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    pub fn new() -> Self {
        Self {
            boundary: format!("pollwatch-{}", Uuid::new_v4().simple()),
            body: Vec::new(),
        }
    }

    /// Append a file part under `field`.
    pub fn file(mut self, field: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        let head = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            self.boundary,
            escape_quoted(field),
            escape_quoted(filename),
            content_type
        );
        self.body.extend_from_slice(head.as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Close the form, returning the `Content-Type` header value and the body.
    pub(crate) fn finish(mut self) -> (String, Vec<u8>) {
        let closing = format!("--{}--\r\n", self.boundary);
        self.body.extend_from_slice(closing.as_bytes());
        (self.content_type(), self.body)
    }
}

/// Percent-encode the characters that would break out of a quoted header value.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_file_part_layout() {
        let form = MultipartForm::new().file("file", "stop.png", "image/png", b"\x89PNG");
        let boundary = form.boundary.clone();
        let (content_type, body) = form.finish();

        assert_eq!(
            content_type,
            format!("multipart/form-data; boundary={}", boundary)
        );

        let mut expected = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"stop.png\"\r\nContent-Type: image/png\r\n\r\n",
            b = boundary
        )
        .into_bytes();
        expected.extend_from_slice(b"\x89PNG\r\n");
        expected.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
        assert_eq!(body, expected);
    }

    #[test]
    fn test_filename_quotes_are_escaped() {
        let (_, body) = MultipartForm::new()
            .file("file", "a\"b\r\n.png", "image/png", b"")
            .finish();
        let text = String::from_utf8(body).unwrap();
        assert!(text.contains("filename=\"a%22b%0D%0A.png\""), "{}", text);
    }

    #[test]
    fn test_boundaries_differ_between_forms() {
        assert_ne!(MultipartForm::new().boundary, MultipartForm::new().boundary);
    }
}
