//! Remaining-word count below the read line.

use crate::content::TextUnit;

/// Words still ahead of `read_line_y`.
///
/// Units whose bottom lies above the read line are done. The first unit the
/// read line falls inside gets partial credit in proportion to how far into it
/// the line sits; every other unit still ahead counts in full.
pub fn remaining_words(read_line_y: f64, units: &[TextUnit]) -> u64 {
    let mut remaining = 0u64;
    let mut straddled = false;

    for unit in units {
        if read_line_y > unit.bottom {
            continue;
        }
        if !straddled && read_line_y >= unit.top {
            straddled = true;
            remaining += unread_part(read_line_y, unit);
        } else {
            remaining += unit.words;
        }
    }
    remaining
}

fn unread_part(read_line_y: f64, unit: &TextUnit) -> u64 {
    let height = unit.bottom - unit.top;
    if !(height > 0.0) {
        return unit.words;
    }
    let read_fraction = ((read_line_y - unit.top) / height).clamp(0.0, 1.0);
    let read = (unit.words as f64 * read_fraction).round() as u64;
    unit.words.saturating_sub(read)
}

/// Sum of all words in `units`.
pub fn total_words(units: &[TextUnit]) -> u64 {
    units.iter().map(|unit| unit.words).sum()
}
