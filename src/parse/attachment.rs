//! Binary attachments in MIME multipart responses.
//!
//! Bulk data calls (e.g. `downloadFile`) answer with a multipart body: an
//! XML part followed by the file part, identified by a `urn:uuid` content ID.

const CONTENT_ID_MARKER: &[u8] = b"Content-ID: <urn:uuid:";
const BOUNDARY_MARKER: &[u8] = b"--MIMEBoundaryurn_uuid_";
const HEADER_END: &[u8] = b"\r\n\r\n";

/// Extracts the last attachment from a multipart response body.
///
/// The attachment starts after the header block that follows the last
/// `Content-ID: <urn:uuid:..>` line and ends before the `\r\n` preceding
/// the last MIME boundary. Returns `None` if either marker is missing.
///
/// # Example
///
/// ```rust
/// use ebay_api::parse::parse_response_attachment;
///
/// let body = b"--MIMEBoundaryurn_uuid_1\r\n\
///     Content-Type: application/zip\r\n\
///     Content-ID: <urn:uuid:0123456789abcdef0123456789abcdef>\r\n\r\n\
///     PK\x03\x04data\r\n\
///     --MIMEBoundaryurn_uuid_1--";
///
/// assert_eq!(parse_response_attachment(body), Some(&b"PK\x03\x04data"[..]));
/// assert_eq!(parse_response_attachment(b"<xml/>"), None);
/// ```
#[must_use]
pub fn parse_response_attachment(body: &[u8]) -> Option<&[u8]> {
    let marker = rfind(body, CONTENT_ID_MARKER)?;
    let boundary = rfind(body, BOUNDARY_MARKER)?;

    let headers = marker + CONTENT_ID_MARKER.len();
    let start = find(&body[headers..], HEADER_END)? + headers + HEADER_END.len();
    let end = boundary.checked_sub(2)?;

    (start <= end).then(|| &body[start..end])
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .rposition(|window| window == needle)
}
