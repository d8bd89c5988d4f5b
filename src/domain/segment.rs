//! Concatenated binary SMS segments.
//!
//! Outbound binary messages are sent as a list of base64 strings, each one a
//! user data header (UDH) announcing the concatenation followed by the UTF-8
//! payload of that part. Inbound binary notifications carry the same shape.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

/// Reference number shared by every segment of one [`encode_segments`] call.
///
/// Handsets reassemble parts by reference number, so two multi-part messages
/// in flight to the same recipient with this default can interleave. Use
/// [`encode_segments_with_reference`] to pick a distinct value per message.
pub const DEFAULT_REFERENCE: u8 = 0xCC;

/// Largest number of parts the one-byte header fields can describe.
pub const MAX_PARTS: usize = u8::MAX as usize;

const UDH_LENGTH: u8 = 0x05;
const IEI_CONCATENATED_8BIT: u8 = 0x00;
const IE_DATA_LENGTH: u8 = 0x03;

/// Inbound segments are documented as URL-safe base64, usually without padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, thiserror::Error)]
pub enum SegmentError {
    #[error("segment {index} is not valid base64: {source}")]
    InvalidBase64 {
        index: usize,
        #[source]
        source: base64::DecodeError,
    },

    #[error("segment {index} declares a {offset}-byte header but is only {len} bytes long")]
    HeaderOutOfBounds {
        index: usize,
        offset: usize,
        len: usize,
    },

    #[error("too many parts: {actual} (max {max})")]
    TooManyParts { max: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Six-byte concatenated-SMS user data header.
///
/// Invariant: `1 <= part_index <= total_parts`.
pub struct ConcatenatedHeader {
    reference: u8,
    total_parts: u8,
    part_index: u8,
}

impl ConcatenatedHeader {
    /// Encoded size in bytes, including the leading UDH length byte.
    pub const LEN: usize = 6;

    /// Build a header for part `part_index` (1-based) of `total_parts`.
    ///
    /// Returns `None` when the index is zero or exceeds the total.
    pub fn new(reference: u8, total_parts: u8, part_index: u8) -> Option<Self> {
        if part_index == 0 || part_index > total_parts {
            return None;
        }
        Some(Self {
            reference,
            total_parts,
            part_index,
        })
    }

    /// Parse a header from the start of a raw segment.
    ///
    /// Only the 8-bit-reference concatenation element is recognised.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [UDH_LENGTH, IEI_CONCATENATED_8BIT, IE_DATA_LENGTH, reference, total, index, ..] => {
                Self::new(*reference, *total, *index)
            }
            _ => None,
        }
    }

    pub fn to_bytes(self) -> [u8; Self::LEN] {
        [
            UDH_LENGTH,
            IEI_CONCATENATED_8BIT,
            IE_DATA_LENGTH,
            self.reference,
            self.total_parts,
            self.part_index,
        ]
    }

    pub fn reference(self) -> u8 {
        self.reference
    }

    pub fn total_parts(self) -> u8 {
        self.total_parts
    }

    pub fn part_index(self) -> u8 {
        self.part_index
    }
}

/// Encode message parts as base64 segments using [`DEFAULT_REFERENCE`].
///
/// Each text becomes one segment, in order. An empty input yields an empty list.
pub fn encode_segments<S: AsRef<str>>(texts: &[S]) -> Result<Vec<String>, SegmentError> {
    encode_segments_with_reference(texts, DEFAULT_REFERENCE)
}

/// Encode message parts as base64 segments sharing `reference`.
pub fn encode_segments_with_reference<S: AsRef<str>>(
    texts: &[S],
    reference: u8,
) -> Result<Vec<String>, SegmentError> {
    let total = u8::try_from(texts.len()).map_err(|_| SegmentError::TooManyParts {
        max: MAX_PARTS,
        actual: texts.len(),
    })?;

    Ok((1..=total)
        .zip(texts)
        .map(|(index, text)| {
            let header = ConcatenatedHeader {
                reference,
                total_parts: total,
                part_index: index,
            };
            let text = text.as_ref().as_bytes();
            let mut bytes = Vec::with_capacity(ConcatenatedHeader::LEN + text.len());
            bytes.extend_from_slice(&header.to_bytes());
            bytes.extend_from_slice(text);
            STANDARD.encode(bytes)
        })
        .collect())
}

/// Decode base64 segments back into the message text.
///
/// With `user_data_header_present`, every segment starts with a UDH whose first
/// byte is its own remaining length; that many bytes plus one are skipped.
/// Segments are joined in the order given. Invalid UTF-8 is replaced rather
/// than rejected.
pub fn decode_segments<S: AsRef<str>>(
    segments: &[S],
    user_data_header_present: bool,
) -> Result<String, SegmentError> {
    let mut payload = Vec::new();
    for (index, segment) in segments.iter().enumerate() {
        let raw = decode_base64(segment.as_ref())
            .map_err(|source| SegmentError::InvalidBase64 { index, source })?;
        let body = if user_data_header_present {
            strip_header(&raw, index)?
        } else {
            &raw[..]
        };
        payload.extend_from_slice(body);
    }
    Ok(String::from_utf8_lossy(&payload).into_owned())
}

fn decode_base64(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let segment = segment.trim();
    STANDARD.decode(segment).or_else(|err| {
        let fallback = URL_SAFE_LENIENT.decode(segment);
        // Report the alphabet the segment is actually written in.
        if segment.contains(['-', '_']) {
            fallback
        } else {
            fallback.map_err(|_| err)
        }
    })
}

fn strip_header(raw: &[u8], index: usize) -> Result<&[u8], SegmentError> {
    let offset = raw.first().map_or(1, |udh_len| usize::from(*udh_len) + 1);
    raw.get(offset..).ok_or(SegmentError::HeaderOutOfBounds {
        index,
        offset,
        len: raw.len(),
    })
}
