//! Content-encoding negotiation and gzip compression.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Content encodings the server can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Gzip,
    Identity,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Gzip => "gzip",
            Encoding::Identity => "identity",
        }
    }
}

/// Picks an encoding from a raw `Accept-Encoding` header value.
///
/// Only `gzip` is recognized. A `gzip;q=0` token counts as a refusal.
pub fn negotiate(accept_encoding: Option<&str>) -> Encoding {
    let Some(header) = accept_encoding else {
        return Encoding::Identity;
    };

    let accepts_gzip = header.split(',').any(|token| {
        let mut parts = token.split(';');
        let coding = parts.next().unwrap_or("").trim();
        coding.eq_ignore_ascii_case("gzip") && !parts.any(is_zero_quality)
    });

    if accepts_gzip {
        Encoding::Gzip
    } else {
        Encoding::Identity
    }
}

fn is_zero_quality(param: &str) -> bool {
    match param.trim().split_once('=') {
        Some((name, value)) if name.trim().eq_ignore_ascii_case("q") => value
            .trim()
            .parse::<f32>()
            .map(|q| q == 0.0)
            .unwrap_or(false),
        _ => false,
    }
}

/// Compresses `data` into a single gzip member at the default level.
pub fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
