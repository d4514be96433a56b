//! Embedded 7-row bitmap font used by the text framing.
//!
//! Glyphs are stored as rows of `#` (ink) and `.` (blank); each glyph's width
//! is its own row length, giving proportional spacing.

pub const GLYPH_ROWS: usize = 7;

type Glyph = [&'static str; GLYPH_ROWS];

const SPACE: Glyph = ["...", "...", "...", "...", "...", "...", "..."];

const GLYPHS: &[(char, Glyph)] = &[
    ('A', [".###.", "#...#", "#...#", "#####", "#...#", "#...#", "##.##"]),
    ('B', ["####.", ".#..#", ".#..#", ".###.", ".#..#", ".#..#", "####."]),
    ('C', [".####", "#...#", "#....", "#....", "#....", "#...#", ".###."]),
    ('D', ["####.", ".#..#", ".#..#", ".#..#", ".#..#", ".#..#", "####."]),
    ('E', ["#####", ".#..#", ".#...", ".###.", ".#...", ".#..#", "#####"]),
    ('F', ["#####", ".#..#", ".#...", ".###.", ".#...", ".#...", "###.."]),
    ('G', [".###.", "#...#", "#....", "#.###", "#...#", "#...#", ".###."]),
    ('H', ["##.##", "#...#", "#...#", "#####", "#...#", "#...#", "##.##"]),
    ('I', ["###", ".#.", ".#.", ".#.", ".#.", ".#.", "###"]),
    ('J', ["..###", "...#.", "...#.", "...#.", "#..#.", "#..#.", ".##.."]),
    ('K', ["##.##", ".#.#.", ".##..", ".#...", ".##..", ".#.#.", "##.##"]),
    ('L', ["###..", ".#...", ".#...", ".#...", ".#...", ".#..#", "#####"]),
    ('M', ["#...#", "##.##", "#.#.#", "#.#.#", "#...#", "#...#", "##.##"]),
    ('N', ["#...#", "##..#", "#.#.#", "#.#.#", "#..##", "#...#", "##..#"]),
    ('O', [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('P', ["####.", ".#..#", ".#..#", ".###.", ".#...", ".#...", "###.."]),
    ('Q', [".###.", "#...#", "#...#", "#...#", "#.#.#", "#..#.", ".##.#"]),
    ('R', ["####.", ".#..#", ".#..#", ".###.", ".#.#.", ".#..#", "##.##"]),
    ('S', [".####", "#....", "#....", ".###.", "....#", "....#", "####."]),
    ('T', ["#####", "#.#.#", "..#..", "..#..", "..#..", "..#..", ".###."]),
    ('U', ["##.##", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('V', ["##.##", "#...#", "#...#", "#...#", ".#.#.", ".#.#.", "..#.."]),
    ('W', ["##.##", "#...#", "#...#", "#.#.#", "#.#.#", "##.##", "#...#"]),
    ('X', ["##.##", ".#.#.", ".#.#.", "..#..", ".#.#.", ".#.#.", "##.##"]),
    ('Y', ["##.##", ".#.#.", ".#.#.", "..#..", "..#..", "..#..", ".###."]),
    ('Z', ["#####", "#...#", "...#.", "..#..", ".#...", "#...#", "#####"]),
    ('0', [".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."]),
    ('1', [".#.", "##.", ".#.", ".#.", ".#.", ".#.", "###"]),
    ('2', [".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"]),
    ('3', ["#####", "...#.", "..#..", "...#.", "....#", "#...#", ".###."]),
    ('4', ["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "..###"]),
    ('5', ["#####", "#....", "####.", "....#", "....#", "#...#", ".###."]),
    ('6', ["..##.", ".#...", "#....", "####.", "#...#", "#...#", ".###."]),
    ('7', ["#####", "#...#", "...#.", "..#..", ".#...", ".#...", ".#..."]),
    ('8', [".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."]),
    ('9', [".###.", "#...#", "#...#", ".####", "....#", "...#.", ".##.."]),
    ('!', ["#", "#", "#", "#", "#", ".", "#"]),
    ('?', [".###.", "#...#", "....#", "...#.", "..#..", ".....", "..#.."]),
    ('.', ["..", "..", "..", "..", "..", "##", "##"]),
    ('-', ["....", "....", "....", "####", "....", "....", "...."]),
    ('\'', ["#", "#", ".", ".", ".", ".", "."]),
];

/// The bitmap for `c`. Lowercase maps to uppercase; characters without a
/// glyph fall back to a blank advance.
pub fn glyph(c: char) -> &'static Glyph {
    let upper = c.to_ascii_uppercase();
    GLYPHS
        .iter()
        .find(|(g, _)| *g == upper)
        .map_or(&SPACE, |(_, rows)| rows)
}

/// Width of the glyph in font pixels.
pub fn glyph_width(glyph: &Glyph) -> usize {
    glyph[0].len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_rows_have_equal_width() {
        for (c, rows) in GLYPHS {
            let width = glyph_width(rows);
            assert!(rows.iter().all(|r| r.len() == width), "glyph {c:?}");
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('~'), &SPACE);
        assert_eq!(glyph_width(glyph('i')), 3);
    }
}
