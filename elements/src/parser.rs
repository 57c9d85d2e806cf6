//! A lenient reader for multi-satellite element set feeds.
//!
//! Feeds are a sequence of name / line 1 / line 2 groups, possibly mixed with
//! blank lines and commentary. Anything that doesn't classify is dropped,
//! a bad group never fails the whole feed.

use nom::{
    character::complete::satisfy,
    combinator::{peek, rest},
    error::ErrorKind,
    Err::Error,
};
use orbtypes::prelude::*;
use tracing::debug;

pub type Result<I, O, E = ParseError<I>> = std::result::Result<(I, O), nom::Err<E>>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ParseError<I> {
    #[error("Element line has {0} characters, expected 69")]
    ElementLineLength(usize),
    #[error("Unknown element line number '{0}'")]
    ElementLineNumber(char),
    #[error("Name line has {0} characters, must be under 69")]
    NameLength(usize),
    #[error("Blank name")]
    BlankName,
    #[error("Name line while a name is already pending")]
    UnexpectedName,
    #[error("Parse error")]
    Nom(I, ErrorKind),
}

impl<I> nom::error::ParseError<I> for ParseError<I> {
    fn from_error_kind(s: I, kind: ErrorKind) -> Self {
        ParseError::Nom(s, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum FeedLine<'a> {
    Blank,
    Name(&'a str),
    LineOne(&'a str),
    LineTwo(&'a str),
}

#[derive(Default)]
struct Pending<'a> {
    name: Option<&'a str>,
    line1: Option<&'a str>,
    line2: Option<&'a str>,
}

impl<'a> Pending<'a> {
    fn take_complete(&mut self) -> Option<TleRecord> {
        match (self.name, self.line1, self.line2) {
            (Some(name), Some(line1), Some(line2)) => {
                *self = Pending::default();
                Some(TleRecord::new(name, line1, line2))
            }
            _ => None,
        }
    }
}

/// Splits a raw feed into element set records, in order of appearance.
///
/// Every line has exactly one trailing character removed before it is
/// classified, the feed terminates lines with `\r\n`. A feed using bare `\n`
/// therefore loses the last real character of each line and its element
/// lines fail the length check.
pub fn parse_element_sets(feed: &str) -> Vec<TleRecord> {
    let mut pending = Pending::default();
    let mut records = Vec::new();

    for (idx, raw) in feed.split('\n').enumerate() {
        let line = strip_terminator(raw);
        match feed_line(line, pending.name.is_some()) {
            Ok((_, FeedLine::Blank)) => (),
            Ok((_, FeedLine::Name(name))) => pending.name = Some(name),
            Ok((_, FeedLine::LineOne(l))) => pending.line1 = Some(l),
            Ok((_, FeedLine::LineTwo(l))) => pending.line2 = Some(l),
            Err(e) => debug!(line = idx + 1, error = %e, "Dropping feed line"),
        }

        if let Some(tle) = pending.take_complete() {
            records.push(tle);
        }
    }

    if pending.name.is_some() || pending.line1.is_some() || pending.line2.is_some() {
        debug!(name = ?pending.name, "Feed ended with an incomplete element set");
    }

    records
}

fn strip_terminator(line: &str) -> &str {
    let mut chars = line.chars();
    chars.next_back();
    chars.as_str()
}

fn feed_line(s: &str, name_pending: bool) -> Result<&str, FeedLine<'_>> {
    if s.is_empty() {
        return Ok((s, FeedLine::Blank));
    }
    if s.starts_with(|c: char| c.is_ascii_digit()) {
        element_line(s)
    } else if name_pending {
        Err(Error(ParseError::UnexpectedName))
    } else {
        let (s, name) = name_line(s)?;
        Ok((s, FeedLine::Name(name)))
    }
}

fn element_line(s: &str) -> Result<&str, FeedLine<'_>> {
    let (_, number) = peek(satisfy(|c| c.is_ascii_digit()))(s)?;
    let len = s.chars().count();
    if len != TLE_LINE_LEN {
        return Err(Error(ParseError::ElementLineLength(len)));
    }
    let (s, line) = rest(s)?;
    match number {
        '1' => Ok((s, FeedLine::LineOne(line))),
        '2' => Ok((s, FeedLine::LineTwo(line))),
        n => Err(Error(ParseError::ElementLineNumber(n))),
    }
}

fn name_line(s: &str) -> Result<&str, &str> {
    let (_, _) = peek(satisfy(|c| !c.is_ascii_digit()))(s)?;
    let len = s.chars().count();
    if len >= TLE_LINE_LEN {
        return Err(Error(ParseError::NameLength(len)));
    }
    let (s, line) = rest(s)?;
    let name = line.trim();
    if name.is_empty() {
        return Err(Error(ParseError::BlankName));
    }
    Ok((s, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const GEO_SET: &str = indoc! {r#"GEO1
        1 37481U 11019A   23190.45078927 -.00000009  00000-0  00000+0 0  9991
        2 37481   2.3847  40.6385 0001640  70.7486  43.7146  1.00272292 44578

        GEO2
        1 39120U 13011A   23190.50177227 -.00000262  00000-0  00000+0 0  9997
        2 39120   2.3950  38.7964 0001772  68.0002 323.0070  1.00271163 37822
        "#};

    const ISS_L1: &str = "1 25544U 98067A   20148.21301450  .00001715  00000-0  38778-4 0  9992";
    const ISS_L2: &str = "2 25544  51.6435  92.2789 0002570 358.0648 144.9972 15.49396855228767";

    fn crlf(s: &str) -> String {
        s.replace('\n', "\r\n")
    }

    #[test]
    fn classify_lines() {
        assert_eq!(feed_line("", false), Ok(("", FeedLine::Blank)));
        assert_eq!(
            feed_line("  ISS (ZARYA)    ", false),
            Ok(("", FeedLine::Name("ISS (ZARYA)")))
        );
        assert_eq!(
            feed_line("ISS (ZARYA)", true),
            Err(Error(ParseError::UnexpectedName))
        );
        assert_eq!(feed_line(ISS_L1, false), Ok(("", FeedLine::LineOne(ISS_L1))));
        assert_eq!(feed_line(ISS_L2, true), Ok(("", FeedLine::LineTwo(ISS_L2))));
        assert_eq!(
            feed_line(&ISS_L1[..68], false),
            Err(Error(ParseError::ElementLineLength(68)))
        );
        assert_eq!(
            feed_line(&ISS_L1.replacen('1', "3", 1), false),
            Err(Error(ParseError::ElementLineNumber('3')))
        );
        assert_eq!(
            feed_line("    ", false),
            Err(Error(ParseError::BlankName))
        );
        let long_name = "X".repeat(TLE_LINE_LEN);
        assert_eq!(
            feed_line(&long_name, false),
            Err(Error(ParseError::NameLength(TLE_LINE_LEN)))
        );
    }

    #[test]
    fn terminator_is_always_stripped() {
        assert_eq!(strip_terminator("GEO1\r"), "GEO1");
        assert_eq!(strip_terminator("GEO1"), "GEO");
        assert_eq!(strip_terminator(""), "");
    }

    #[test]
    fn parse_crlf_feed() {
        let sets = parse_element_sets(&crlf(GEO_SET));
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "GEO1");
        assert_eq!(
            sets[0].line1,
            "1 37481U 11019A   23190.45078927 -.00000009  00000-0  00000+0 0  9991"
        );
        assert_eq!(
            sets[0].line2,
            "2 37481   2.3847  40.6385 0001640  70.7486  43.7146  1.00272292 44578"
        );
        assert_eq!(sets[1].name, "GEO2");
        assert_eq!(sets[1].catalog_number(), Some(CatalogNumber::from(39120)));
    }

    #[test]
    fn bare_newline_feed_yields_nothing() {
        assert!(parse_element_sets(GEO_SET).is_empty());
    }

    #[test]
    fn empty_feed() {
        assert!(parse_element_sets("").is_empty());
        assert!(parse_element_sets("\r\n\r\n").is_empty());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let feed = crlf(&format!(
            "ISS (ZARYA)\n1 25544U short\n{ISS_L1}\n3 garbage\n{ISS_L2}\n"
        ));
        let sets = parse_element_sets(&feed);
        assert_eq!(sets, vec![TleRecord::new("ISS (ZARYA)", ISS_L1, ISS_L2)]);
    }

    #[test]
    fn first_name_wins_until_emitted() {
        let feed = crlf(&format!("ISS (ZARYA)\nCOMMENTARY\n{ISS_L1}\n{ISS_L2}\n"));
        let sets = parse_element_sets(&feed);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].name, "ISS (ZARYA)");
    }

    #[test]
    fn dangling_name_is_never_emitted() {
        let feed = crlf(&format!("ISS (ZARYA)\n{ISS_L1}\n{ISS_L2}\nLONELY\n"));
        let sets = parse_element_sets(&feed);
        assert_eq!(sets.len(), 1);
    }

    #[test]
    fn overlong_name_never_contributes() {
        let long_name = "N".repeat(TLE_LINE_LEN + 3);
        let feed = crlf(&format!("{long_name}\n{ISS_L1}\n{ISS_L2}\n"));
        assert!(parse_element_sets(&feed).is_empty());
    }
}
