use std::iter::Peekable;
use std::str::Chars;

use indexmap::IndexMap;
use log::trace;

use crate::model::ChannelRecord;
use crate::utils::{EXTGRP_PREFIX, EXTINF_PREFIX, PROPERTY_PREFIXES, STREAM_SCHEMES};

#[derive(Debug, PartialEq, Eq)]
enum LineKind {
    Extinf,
    Property,
    StreamUrl,
    Other,
}

fn classify_line(line: &str) -> LineKind {
    if line.starts_with(EXTINF_PREFIX) {
        LineKind::Extinf
    } else if PROPERTY_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
        LineKind::Property
    } else if is_stream_url(line) {
        LineKind::StreamUrl
    } else {
        LineKind::Other
    }
}

fn is_stream_url(line: &str) -> bool {
    STREAM_SCHEMES.iter().any(|scheme| line.get(..scheme.len()).is_some_and(|s| s.eq_ignore_ascii_case(scheme)))
}

#[inline]
fn skip_duration(it: &mut Peekable<Chars>) {
    while it.next_if(|c| *c == '-' || *c == '+' || *c == '.' || c.is_ascii_digit()).is_some() {}
}

fn get_value(it: &mut Peekable<Chars>) -> String {
    let mut result = String::with_capacity(128);
    for oc in it.by_ref() {
        if oc == '"' {
            break;
        }
        result.push(oc);
    }
    result
}

fn get_unquoted_value(it: &mut Peekable<Chars>) -> String {
    let mut result = String::new();
    while let Some(c) = it.next_if(|c| *c != ',' && !c.is_whitespace()) {
        result.push(c);
    }
    result
}

// reads an attribute key, returns true if it was terminated by '='
fn token_till_assign(it: &mut Peekable<Chars>) -> (String, bool) {
    let mut key = String::new();
    while let Some(c) = it.next_if(|c| *c != ',' && !c.is_whitespace()) {
        if c == '=' {
            return (key, true);
        }
        key.push(c);
    }
    (key, false)
}

/// Splits an `#EXTINF` line into its display name and its attributes.
/// The name starts after the first comma outside of a quoted attribute value,
/// so commas inside the name and inside attribute values are kept.
fn parse_extinf(line: &str) -> (String, IndexMap<String, String>) {
    let mut attributes = IndexMap::new();
    let content = line.strip_prefix(EXTINF_PREFIX).unwrap_or(line);
    let content = content.strip_prefix(':').unwrap_or(content);
    let mut it = content.chars().peekable();
    skip_duration(&mut it);

    let mut title = None;
    while let Some(c) = it.peek().copied() {
        if c == ',' {
            it.next();
            title = Some(it.by_ref().collect::<String>().trim().to_string());
            break;
        }
        if c.is_whitespace() {
            it.next();
            continue;
        }
        let (key, assigned) = token_till_assign(&mut it);
        if assigned {
            let value = if it.next_if_eq(&'"').is_some() {
                get_value(&mut it)
            } else {
                get_unquoted_value(&mut it)
            };
            if !key.is_empty() {
                attributes.insert(key.to_lowercase(), value);
            }
        }
    }

    let name = title.filter(|t| !t.is_empty())
        .or_else(|| attributes.get("tvg-name").map(|n| n.trim().to_string()))
        .unwrap_or_default();
    (name, attributes)
}

#[derive(Debug)]
struct PendingBlock {
    name: String,
    attributes: IndexMap<String, String>,
    lines: Vec<String>,
}

impl PendingBlock {
    fn new(line: &str, trimmed: &str) -> Self {
        let (name, attributes) = parse_extinf(trimmed);
        Self {
            name,
            attributes,
            lines: vec![line.to_string()],
        }
    }

    fn complete(mut self, url_line: &str) -> ChannelRecord {
        let ext_group = self.lines.iter()
            .find_map(|l| l.trim().strip_prefix(EXTGRP_PREFIX))
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());
        self.lines.push(url_line.to_string());
        let raw_block = self.lines.join("\n");
        let mut record = ChannelRecord::new(self.name, self.attributes, url_line.trim().to_string(), raw_block);
        if record.group.is_none() {
            record.group = ext_group;
        }
        record
    }
}

#[derive(Debug, Default)]
enum ParserState {
    #[default]
    AwaitingEntry,
    InMetadata(PendingBlock),
    EntryComplete(ChannelRecord),
}

/// Line classifying state machine over playlist lines.
/// Entries without a stream url are dropped silently.
pub struct ChannelParser<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    lines: I,
    state: ParserState,
}

impl<I> ChannelParser<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            state: ParserState::AwaitingEntry,
        }
    }

    fn advance(state: ParserState, line: &str) -> ParserState {
        let trimmed = line.trim().trim_start_matches('\u{feff}');
        match (state, classify_line(trimmed)) {
            (ParserState::InMetadata(block), LineKind::Extinf) => {
                trace!("dropping channel without stream url: {}", block.name);
                ParserState::InMetadata(PendingBlock::new(line, trimmed))
            }
            (_, LineKind::Extinf) => ParserState::InMetadata(PendingBlock::new(line, trimmed)),
            (ParserState::InMetadata(mut block), LineKind::Property) => {
                block.lines.push(line.to_string());
                ParserState::InMetadata(block)
            }
            (ParserState::InMetadata(block), LineKind::StreamUrl) => ParserState::EntryComplete(block.complete(line)),
            (ParserState::InMetadata(block), LineKind::Other) => ParserState::InMetadata(block),
            (_, _) => ParserState::AwaitingEntry,
        }
    }
}

impl<I> Iterator for ChannelParser<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = ChannelRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if matches!(self.state, ParserState::EntryComplete(_)) {
                if let ParserState::EntryComplete(record) = std::mem::take(&mut self.state) {
                    return Some(record);
                }
            }
            match self.lines.next() {
                Some(line) => {
                    let state = std::mem::take(&mut self.state);
                    self.state = Self::advance(state, line.as_ref().trim_end_matches('\r'));
                }
                None => {
                    if let ParserState::InMetadata(block) = std::mem::take(&mut self.state) {
                        trace!("dropping channel without stream url: {}", block.name);
                    }
                    return None;
                }
            }
        }
    }
}

pub fn consume_m3u<'a, I, F: FnMut(ChannelRecord)>(lines: I, mut visit: F)
where
    I: Iterator<Item=&'a str>,
{
    for record in ChannelParser::new(lines) {
        visit(record);
    }
}

pub fn parse_m3u(text: &str) -> Vec<ChannelRecord> {
    ChannelParser::new(text.lines()).collect()
}

#[cfg(test)]
mod tests {
    use crate::processing::parser::m3u::{classify_line, consume_m3u, parse_extinf, parse_m3u, LineKind};

    #[test]
    fn test_single_channel() {
        let records = parse_m3u("#EXTM3U\n#EXTINF:-1 tvg-logo=\"http://x/l.png\",News 24\nhttp://stream/a.m3u8\n");
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "News 24");
        assert_eq!(record.logo.as_deref(), Some("http://x/l.png"));
        assert_eq!(record.stream_url, "http://stream/a.m3u8");
        assert_eq!(record.safe_file_name, "News_24");
        assert_eq!(record.raw_block, "#EXTINF:-1 tvg-logo=\"http://x/l.png\",News 24\nhttp://stream/a.m3u8");
    }

    #[test]
    fn test_consecutive_channels_are_streamed() {
        let text = "#EXTM3U\n\
            #EXTINF:-1 tvg-id=\"a\",First\n\
            #KODIPROP:inputstream=adaptive\n\
            http://stream/1.m3u8\n\
            #EXTINF:-1,Second\n\
            https://stream/2.m3u8\n\
            #EXTINF:-1,Third\n\
            http://stream/3.m3u8\n";
        let mut names = vec![];
        consume_m3u(text.lines(), |record| names.push(record.name));
        assert_eq!(names, vec!["First", "Second", "Third"]);

        let records = parse_m3u(text);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].raw_block, "#EXTINF:-1 tvg-id=\"a\",First\n#KODIPROP:inputstream=adaptive\nhttp://stream/1.m3u8");
        assert_eq!(records[2].stream_url, "http://stream/3.m3u8");
    }

    #[test]
    fn test_orphan_channel_is_dropped() {
        let records = parse_m3u("#EXTM3U\n#EXTINF:-1,Orphan Channel\n#EXTINF:-1,Real\nhttps://s/real.m3u8\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Real");

        let records = parse_m3u("#EXTM3U\n#EXTINF:-1,Orphan At End\n");
        assert!(records.is_empty());
    }

    #[test]
    fn test_well_formed_and_malformed_blocks() {
        let mut text = String::from("#EXTM3U\n");
        let mut expected = vec![];
        for i in 0..12 {
            if i % 3 == 0 {
                text.push_str(&format!("#EXTINF:-1,Broken {i}\n#EXTVLCOPT:http-user-agent=x\n\n"));
            } else {
                text.push_str(&format!("#EXTINF:-1 group-title=\"G\",Channel {i}\nhttp://host/{i}.m3u8\n"));
                expected.push(format!("Channel {i}"));
            }
        }
        let records = parse_m3u(&text);
        assert_eq!(records.len(), 8);
        assert_eq!(records.iter().map(|r| r.name.clone()).collect::<Vec<String>>(), expected);
    }

    #[test]
    fn test_property_lines_are_kept() {
        let text = "#EXTM3U\r\n#EXTINF:-1 tvg-id=\"sky.uk\" group-title=\"Sports\",Sky Sports\r\n#KODIPROP:inputstream.adaptive.license_type=clearkey\r\n# some comment\r\n#EXTVLCOPT:http-referrer=https://ref/\r\nhttps://cdn/sky.mpd\r\n";
        let records = parse_m3u(text);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id.as_deref(), Some("sky.uk"));
        assert_eq!(record.group.as_deref(), Some("Sports"));
        assert_eq!(record.stream_url, "https://cdn/sky.mpd");
        assert_eq!(record.raw_block, "#EXTINF:-1 tvg-id=\"sky.uk\" group-title=\"Sports\",Sky Sports\n#KODIPROP:inputstream.adaptive.license_type=clearkey\n#EXTVLCOPT:http-referrer=https://ref/\nhttps://cdn/sky.mpd");
    }

    #[test]
    fn test_commas_in_name_and_attributes() {
        let (name, attributes) = parse_extinf("#EXTINF:-1 group-title=\"News, Sports\",ABC, Live, HD");
        assert_eq!(name, "ABC, Live, HD");
        assert_eq!(attributes.get("group-title").map(String::as_str), Some("News, Sports"));
    }

    #[test]
    fn test_extinf_attributes() {
        let (name, attributes) = parse_extinf("#EXTINF:-1 TVG-NAME=\"Zee\" tvg-chno=5 catchup,");
        assert_eq!(name, "Zee");
        assert_eq!(attributes.get("tvg-name").map(String::as_str), Some("Zee"));
        assert_eq!(attributes.get("tvg-chno").map(String::as_str), Some("5"));
        assert!(!attributes.contains_key("catchup"));

        let (name, attributes) = parse_extinf("#EXTINF:0,  Plain  ");
        assert_eq!(name, "Plain");
        assert!(attributes.is_empty());

        let (name, _) = parse_extinf("#EXTINF:-1 tvg-id=\"x\"");
        assert_eq!(name, "");
    }

    #[test]
    fn test_extgrp_group() {
        let records = parse_m3u("#EXTM3U\n#EXTINF:-1,Movie\n#EXTGRP:Cinema\nhttp://m/1.ts\n#EXTINF:-1 group-title=\"Own\",Other\n#EXTGRP:Cinema\nhttp://m/2.ts\n");
        assert_eq!(records[0].group.as_deref(), Some("Cinema"));
        assert_eq!(records[1].group.as_deref(), Some("Own"));
    }

    #[test]
    fn test_non_http_lines_do_not_complete() {
        let records = parse_m3u("#EXTM3U\nhttp://stray/url\n#EXTINF:-1,Radio\nrtmp://radio/live\nHTTPS://radio/live.m3u8\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stream_url, "HTTPS://radio/live.m3u8");
        assert_eq!(records[0].raw_block, "#EXTINF:-1,Radio\nHTTPS://radio/live.m3u8");
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line("#EXTINF:-1,A"), LineKind::Extinf);
        assert_eq!(classify_line("#EXTHTTP:{\"cookie\":\"x\"}"), LineKind::Property);
        assert_eq!(classify_line("#EXT-X-KEY:METHOD=NONE"), LineKind::Property);
        assert_eq!(classify_line("http://a/b"), LineKind::StreamUrl);
        assert_eq!(classify_line("#EXTM3U"), LineKind::Other);
        assert_eq!(classify_line("h"), LineKind::Other);
    }
}
