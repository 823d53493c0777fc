//! Encoding-resilient text decoding.
//!
//! Legacy trees routinely mix UTF-8 with GB18030/GBK sources, and diffing
//! must never fall over on them. Decoding first walks an ordered candidate
//! list (superset encodings first), then falls back to statistical
//! detection with `chardetng` over a bounded sample, and finally to lossy
//! UTF-8. The result is total: any byte sequence decodes to *some* string.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, GB18030, GBK, UTF_8};

/// Candidate encodings tried strictly, in order. Each of these can reject
/// input, which is what keeps the detection stage reachable.
const CANDIDATE_ENCODINGS: [&'static Encoding; 3] = [UTF_8, GB18030, GBK];

/// Upper bound on the bytes fed to statistical detection. Detection cost
/// grows with input size, and a prefix is just as characteristic.
pub const DETECTION_SAMPLE_LIMIT: usize = 10_000;

/// Bytes read from the start of a file when probing text eligibility.
pub const TEXT_PROBE_LIMIT: usize = 8192;

/// Decode arbitrary bytes into text. Never fails.
pub fn decode_bytes(raw: &[u8]) -> String {
    if raw.is_empty() {
        return String::new();
    }

    for encoding in CANDIDATE_ENCODINGS {
        if let Some(text) = decode_strict(raw, encoding) {
            return text;
        }
    }

    let encoding = detect_encoding(raw);
    let (decoded, _, had_errors) = encoding.decode(raw);
    if had_errors && encoding == UTF_8 {
        // the detector gave up and fell back to the universal encoding;
        // substitute invalid sequences rather than rejecting them
        return String::from_utf8_lossy(raw).into_owned();
    }

    decoded.into_owned()
}

/// Whether a byte prefix looks like text this engine can line-diff.
///
/// Binary eligibility is decided here, separately from [`decode_bytes`]
/// (which stays total): content containing NUL bytes, or that no candidate
/// nor detected encoding decodes cleanly, is skipped as binary.
pub fn is_text_eligible(prefix: &[u8]) -> bool {
    if prefix.is_empty() {
        return true;
    }
    if prefix.contains(&0) {
        return false;
    }

    if CANDIDATE_ENCODINGS
        .iter()
        .any(|&encoding| decode_strict(prefix, encoding).is_some())
    {
        return true;
    }

    let (_, _, had_errors) = detect_encoding(prefix).decode(prefix);
    !had_errors
}

fn decode_strict(raw: &[u8], encoding: &'static Encoding) -> Option<String> {
    let (decoded, _, had_errors) = encoding.decode(raw);
    if had_errors {
        return None;
    }

    Some(decoded.into_owned())
}

fn detect_encoding(raw: &[u8]) -> &'static Encoding {
    let sample = &raw[..raw.len().min(DETECTION_SAMPLE_LIMIT)];

    let mut detector = EncodingDetector::new();
    detector.feed(sample, true);
    let (encoding, _is_confident) = detector.guess_assess(None, true);

    encoding
}
