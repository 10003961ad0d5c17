use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use url::Url;

use crate::FetchOutput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding_label: String,
    /// Malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Decodes a fetched body to UTF-8.
///
/// Order of precedence: byte order mark, `charset` parameter of the
/// Content-Type header, then `chardetng` detection hinted with the top-level
/// domain of the final URL (many `.bg` listing sites still serve windows-1251).
pub fn decode_page(output: &FetchOutput) -> DecodedPage {
    decode_body(
        &output.bytes,
        output.metadata.content_type.as_deref(),
        Some(&output.metadata.final_url),
    )
}

pub fn decode_body(bytes: &[u8], content_type: Option<&str>, url: Option<&str>) -> DecodedPage {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(encoding) = content_type
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, encoding);
    }

    let tld = url.and_then(top_level_domain);
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(tld.as_deref().map(str::as_bytes), true);
    decode_with(bytes, encoding)
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(['"', '\'']);
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn top_level_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let tld = host.rsplit('.').next()?;
    (!tld.is_empty() && tld != host).then(|| tld.to_ascii_lowercase())
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> DecodedPage {
    let (text, used, had_errors) = encoding.decode(bytes);
    DecodedPage {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
        had_errors,
    }
}
