use std::io::Read;
use flate2::read::GzDecoder;

pub const fn is_gzip(bytes: &[u8]) -> bool {
    // Gzip files start with the bytes 0x1F 0x8B
    bytes.len() >= 2 && bytes[0] == 0x1F && bytes[1] == 0x8B
}

pub fn decompress_string(input: &[u8]) -> std::io::Result<String> {
    let mut decoder = GzDecoder::new(input);
    let mut decompressed = String::new();
    decoder.read_to_string(&mut decompressed)?;
    Ok(decompressed)
}

/// Playlist sources are sometimes served gzipped without a content encoding header.
pub fn bytes_to_text(content: &[u8]) -> std::io::Result<String> {
    if is_gzip(content) {
        decompress_string(content)
    } else {
        Ok(String::from_utf8_lossy(content).to_string())
    }
}
