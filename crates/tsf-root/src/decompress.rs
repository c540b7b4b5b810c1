//! ROOT compression blocks.
//!
//! A compressed object is a sequence of blocks, each with a 9-byte header:
//! ```text
//! bytes 0-1:  algorithm tag ("ZL", "L4", "ZS", "XZ")
//! byte  2:    method (ignored)
//! bytes 3-5:  compressed size   (3-byte little-endian)
//! bytes 6-8:  uncompressed size (3-byte little-endian)
//! ```

use std::io::Read;

use crate::error::{Result, RootError};

const HEADER_LEN: usize = 9;

/// ROOT prefixes LZ4 payloads with an 8-byte xxhash64 of the block.
const LZ4_CHECKSUM_LEN: usize = 8;

/// Decompress a ROOT-compressed object into exactly `expected_len` bytes.
pub fn decompress(src: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(expected_len);
    let mut rest = src;

    while out.len() < expected_len {
        if rest.len() < HEADER_LEN {
            return Err(RootError::Decompression(format!(
                "truncated block header: {} bytes left, {} of {} bytes decoded",
                rest.len(),
                out.len(),
                expected_len
            )));
        }
        let (header, body) = rest.split_at(HEADER_LEN);
        let c_size = le24(&header[3..6]);
        let u_size = le24(&header[6..9]);
        if c_size > body.len() {
            return Err(RootError::Decompression(format!(
                "block claims {} compressed bytes but only {} remain",
                c_size,
                body.len()
            )));
        }
        let (payload, tail) = body.split_at(c_size);

        let block = match &header[0..2] {
            b"ZL" => zlib(payload, u_size)?,
            b"L4" => lz4(payload, u_size)?,
            b"ZS" => zstd(payload, u_size)?,
            b"XZ" => xz(payload, u_size)?,
            tag => {
                return Err(RootError::Decompression(format!(
                    "unsupported compression algorithm {:?}",
                    String::from_utf8_lossy(tag)
                )));
            }
        };
        if block.len() != u_size {
            return Err(RootError::Decompression(format!(
                "block decoded to {} bytes, header says {}",
                block.len(),
                u_size
            )));
        }

        out.extend_from_slice(&block);
        rest = tail;
    }

    if out.len() != expected_len {
        return Err(RootError::Decompression(format!(
            "decoded {} bytes, key says {}",
            out.len(),
            expected_len
        )));
    }
    Ok(out)
}

fn zlib(data: &[u8], expected: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(expected);
    flate2::read::ZlibDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| RootError::Decompression(format!("zlib: {}", e)))?;
    Ok(out)
}

fn lz4(data: &[u8], expected: usize) -> Result<Vec<u8>> {
    let Some(block) = data.get(LZ4_CHECKSUM_LEN..) else {
        return Err(RootError::Decompression("LZ4 block shorter than its checksum".into()));
    };
    lz4_flex::decompress(block, expected)
        .map_err(|e| RootError::Decompression(format!("lz4: {}", e)))
}

fn zstd(data: &[u8], expected: usize) -> Result<Vec<u8>> {
    let mut decoder = ruzstd::decoding::StreamingDecoder::new(data)
        .map_err(|e| RootError::Decompression(format!("zstd: {}", e)))?;
    let mut out = Vec::with_capacity(expected);
    decoder
        .read_to_end(&mut out)
        .map_err(|e| RootError::Decompression(format!("zstd: {}", e)))?;
    Ok(out)
}

fn xz(data: &[u8], expected: usize) -> Result<Vec<u8>> {
    let mut input = std::io::BufReader::new(data);
    let mut out = Vec::with_capacity(expected);
    lzma_rs::xz_decompress(&mut input, &mut out)
        .map_err(|e| RootError::Decompression(format!("xz: {}", e)))?;
    Ok(out)
}

fn le24(b: &[u8]) -> usize {
    b[0] as usize | (b[1] as usize) << 8 | (b[2] as usize) << 16
}
