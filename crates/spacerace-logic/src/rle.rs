//! Legacy image decoders: the game's signed-count RLE and PCX runs.

/// Errors from the legacy decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended inside a run or literal block.
    Truncated { offset: usize },
    /// Decoded image holds fewer than `width * height` pixels.
    TooShort { expected: usize, found: usize },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Truncated { offset } => {
                write!(f, "Compressed data truncated at byte {}", offset)
            }
            DecodeError::TooShort { expected, found } => write!(
                f,
                "Decoded image too short: expected {} bytes, found {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Expand signed-count RLE.
///
/// A negative count byte `c` repeats the next byte `1 - c` times; a
/// non-negative `c` copies the next `c + 1` bytes verbatim.
pub fn decode_rle(src: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(src.len() * 2);
    let mut used = 0;

    while used < src.len() {
        let count = src[used] as i8;
        used += 1;

        if count < 0 {
            let run = 1 - count as i32;
            let val = *src
                .get(used)
                .ok_or(DecodeError::Truncated { offset: used })?;
            used += 1;
            out.extend(std::iter::repeat(val).take(run as usize));
        } else {
            let len = count as usize + 1;
            let block = src
                .get(used..used + len)
                .ok_or(DecodeError::Truncated { offset: used })?;
            out.extend_from_slice(block);
            used += len;
        }
    }

    Ok(out)
}

/// Expand an RLE image of `width` × `height` pixels.
///
/// Images whose rows were stored with a one-byte pad (stride `width + 1`)
/// are detected by their decoded length and unpadded.
pub fn decode_rle_image(src: &[u8], width: usize, height: usize) -> Result<Vec<u8>, DecodeError> {
    let raw = decode_rle(src)?;
    let size = width * height;

    if raw.len() < size + height {
        if raw.len() < size {
            return Err(DecodeError::TooShort {
                expected: size,
                found: raw.len(),
            });
        }
        return Ok(raw[..size].to_vec());
    }

    Ok(raw
        .chunks(width + 1)
        .take(height)
        .flat_map(|row| &row[..width])
        .copied()
        .collect())
}

/// Expand PCX-style runs: a byte with both top bits set repeats the next
/// byte `b & 0x3f` times; anything else is a literal.
pub fn decode_pcx(src: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(src.len() * 2);
    let mut i = 0;

    while i < src.len() {
        let b = src[i];
        i += 1;
        if b & 0xc0 == 0xc0 {
            let val = *src.get(i).ok_or(DecodeError::Truncated { offset: i })?;
            i += 1;
            out.extend(std::iter::repeat(val).take((b & 0x3f) as usize));
        } else {
            out.push(b);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rle_runs_and_literals() {
        // run of 4 x 7, literal [1, 2, 3], run of 2 x 9
        let src = [(-3i8) as u8, 7, 2, 1, 2, 3, (-1i8) as u8, 9];
        assert_eq!(decode_rle(&src).unwrap(), vec![7, 7, 7, 7, 1, 2, 3, 9, 9]);
    }

    #[test]
    fn test_rle_zero_count_is_one_literal() {
        assert_eq!(decode_rle(&[0, 42]).unwrap(), vec![42]);
        assert_eq!(decode_rle(&[]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_rle_truncated() {
        assert_eq!(
            decode_rle(&[(-5i8) as u8]).unwrap_err(),
            DecodeError::Truncated { offset: 1 }
        );
        assert_eq!(
            decode_rle(&[3, 1, 2]).unwrap_err(),
            DecodeError::Truncated { offset: 1 }
        );
    }

    #[test]
    fn test_rle_image_unpadded() {
        // 3x2 image stored flat
        let src = [5, 1, 2, 3, 4, 5, 6];
        assert_eq!(decode_rle_image(&src, 3, 2).unwrap(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_rle_image_strips_row_padding() {
        // 3x2 image with a pad byte after each row
        let src = [7, 1, 2, 3, 0, 4, 5, 6, 0];
        assert_eq!(decode_rle_image(&src, 3, 2).unwrap(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_rle_image_too_short() {
        let src = [2, 1, 2, 3];
        assert_eq!(
            decode_rle_image(&src, 3, 2).unwrap_err(),
            DecodeError::TooShort {
                expected: 6,
                found: 3
            }
        );
    }

    #[test]
    fn test_pcx() {
        let src = [0xc3, 0x11, 0x05, 0xc1, 0xff];
        assert_eq!(decode_pcx(&src).unwrap(), vec![0x11, 0x11, 0x11, 0x05, 0xff]);
        assert!(decode_pcx(&[0xc2]).is_err());
    }
}
