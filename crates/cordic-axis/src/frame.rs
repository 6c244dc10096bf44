//! Byte framing for stream beats
//!
//! Frames are packed little-endian 16-bit words. A sin/cos input beat is a
//! single `u16` angle code (2 bytes); angle/magnitude input beats and all
//! output beats are two interleaved `i16` lanes (4 bytes).

use byteorder::{ByteOrder, LittleEndian};

use cordic_core::CordicMode;

use crate::error::{AxisError, AxisResult};
use crate::types::Beat;

/// Split a byte buffer into little-endian `i16` words
pub fn bytes_to_words(bytes: &[u8]) -> AxisResult<Vec<i16>> {
    if bytes.len() % 2 != 0 {
        return Err(AxisError::OddLength(bytes.len()));
    }
    let mut words = vec![0i16; bytes.len() / 2];
    LittleEndian::read_i16_into(bytes, &mut words);
    Ok(words)
}

/// Pack `i16` words into little-endian bytes
pub fn words_to_bytes(words: &[i16]) -> Vec<u8> {
    let mut bytes = vec![0u8; words.len() * 2];
    LittleEndian::write_i16_into(words, &mut bytes);
    bytes
}

fn check_lanes(words: usize, lanes: usize) -> AxisResult<()> {
    if words % lanes != 0 {
        return Err(AxisError::LaneMismatch { words, lanes });
    }
    Ok(())
}

/// De-interleave a two-lane frame into signed lane vectors
pub fn int16_lanes(bytes: &[u8]) -> AxisResult<(Vec<i16>, Vec<i16>)> {
    let words = bytes_to_words(bytes)?;
    check_lanes(words.len(), 2)?;
    Ok(words.chunks_exact(2).map(|pair| (pair[0], pair[1])).unzip())
}

/// De-interleave a two-lane frame into unsigned lane vectors
pub fn uint16_lanes(bytes: &[u8]) -> AxisResult<(Vec<u16>, Vec<u16>)> {
    let (lane0, lane1) = int16_lanes(bytes)?;
    Ok((
        lane0.into_iter().map(|w| w as u16).collect(),
        lane1.into_iter().map(|w| w as u16).collect(),
    ))
}

/// Encode input beats for `mode`
pub fn encode_input(mode: CordicMode, beats: &[Beat]) -> Vec<u8> {
    match mode {
        CordicMode::SinCos => {
            let codes: Vec<u16> = beats.iter().map(Beat::angle_code).collect();
            let mut bytes = vec![0u8; codes.len() * 2];
            LittleEndian::write_u16_into(&codes, &mut bytes);
            bytes
        }
        CordicMode::AngleMag => encode_output(beats),
    }
}

/// Decode an input frame for `mode`
pub fn decode_input(mode: CordicMode, bytes: &[u8]) -> AxisResult<Vec<Beat>> {
    let words = bytes_to_words(bytes)?;
    let lanes = mode.input_lanes();
    check_lanes(words.len(), lanes)?;

    let beats = match mode {
        CordicMode::SinCos => words.iter().map(|&w| Beat::angle(w as u16)).collect(),
        CordicMode::AngleMag => words
            .chunks_exact(lanes)
            .map(|pair| Beat::vector(pair[0], pair[1]))
            .collect(),
    };
    Ok(beats)
}

/// Encode output beats (two lanes per beat)
pub fn encode_output(beats: &[Beat]) -> Vec<u8> {
    let words: Vec<i16> = beats.iter().flat_map(|b| [b.lane0, b.lane1]).collect();
    words_to_bytes(&words)
}

/// Decode an output frame
pub fn decode_output(bytes: &[u8]) -> AxisResult<Vec<Beat>> {
    let (lane0, lane1) = int16_lanes(bytes)?;
    Ok(lane0.into_iter().zip(lane1).map(Beat::from).collect())
}
