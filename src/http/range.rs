//! HTTP Range request parsing module
//!
//! Single-range `bytes=` parsing for asset downloads. Malformed headers fall
//! back to the full body; ranges past the end of the file are unsatisfiable.

/// Outcome of parsing a Range header against a file of known size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No Range header, or one we ignore; send the whole file
    Full,
    /// Send bytes `start..=end` (both within the file)
    Partial { start: usize, end: usize },
    /// Range cannot be satisfied; respond 416
    Unsatisfiable,
}

/// Parse an HTTP Range header (single range, bytes unit).
///
/// Supported forms:
/// - `bytes=start-end`
/// - `bytes=start-`
/// - `bytes=-suffix` (last `suffix` bytes)
pub fn parse_range_header(range_header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(byte_range) = range_header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };

    // Multi-range requests are ignored rather than rejected
    if byte_range.contains(',') {
        return RangeOutcome::Full;
    }

    let Some((start_str, end_str)) = byte_range.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if file_size == 0 {
        return RangeOutcome::Unsatisfiable;
    }

    // Suffix form: "-500" means the last 500 bytes
    if start_str.is_empty() {
        let Ok(suffix) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        if suffix == 0 {
            return RangeOutcome::Unsatisfiable;
        }
        return RangeOutcome::Partial {
            start: file_size.saturating_sub(suffix),
            end: file_size - 1,
        };
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        let Ok(end) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        end.min(file_size - 1)
    };

    if start > end {
        return RangeOutcome::Unsatisfiable;
    }

    RangeOutcome::Partial { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_header_is_full() {
        assert_eq!(parse_range_header(None, 100), RangeOutcome::Full);
    }

    #[test]
    fn fixed_range() {
        assert_eq!(
            parse_range_header(Some("bytes=0-9"), 100),
            RangeOutcome::Partial { start: 0, end: 9 }
        );
    }

    #[test]
    fn open_ended_range() {
        assert_eq!(
            parse_range_header(Some("bytes=50-"), 100),
            RangeOutcome::Partial { start: 50, end: 99 }
        );
    }

    #[test]
    fn suffix_range() {
        assert_eq!(
            parse_range_header(Some("bytes=-20"), 100),
            RangeOutcome::Partial { start: 80, end: 99 }
        );
        // Suffix longer than the file clamps to the whole file
        assert_eq!(
            parse_range_header(Some("bytes=-500"), 100),
            RangeOutcome::Partial { start: 0, end: 99 }
        );
    }

    #[test]
    fn end_clamped_to_file_size() {
        assert_eq!(
            parse_range_header(Some("bytes=90-200"), 100),
            RangeOutcome::Partial { start: 90, end: 99 }
        );
    }

    #[test]
    fn start_past_end_of_file() {
        assert_eq!(
            parse_range_header(Some("bytes=200-"), 100),
            RangeOutcome::Unsatisfiable
        );
    }

    #[test]
    fn malformed_headers_fall_back_to_full() {
        assert_eq!(parse_range_header(Some("bytes=a-b"), 100), RangeOutcome::Full);
        assert_eq!(
            parse_range_header(Some("bytes=0-9,20-29"), 100),
            RangeOutcome::Full
        );
        assert_eq!(parse_range_header(Some("items=0-9"), 100), RangeOutcome::Full);
    }
}
