//! Chapter and section segmentation.

use regex::Regex;
use tracing::debug;

use super::{Chapter, Section, Segments};
use crate::error::{Result, RulebookError};
use crate::models::config::SegmentationConfig;

/// Splits document text into chapters and sections.
pub struct Segmenter {
    /// Chapter header at line start; group 2 is the rest of the line.
    chapter_header: Regex,
    /// Running page header: chapter token followed by a bare page number.
    page_header: Regex,
    section_header: Regex,
    min_content_chars: usize,
}

impl Segmenter {
    pub fn new(config: &SegmentationConfig) -> Result<Self> {
        let token = config.chapter_token.trim();
        if token.is_empty() {
            return Err(RulebookError::Config("chapter_token must not be empty".to_string()));
        }
        let token = regex::escape(token);

        Ok(Self {
            chapter_header: Regex::new(&format!(
                r"(?im)^[ \t]*{token}[ \t]+(\d+)\b([^\n]*)"
            ))?,
            page_header: Regex::new(&format!(r"(?i)[ \t]*\b{token}[ \t]+\d+[ \t]+\d+\b[ \t]*"))?,
            section_header: Regex::new(r"\bSection\s+(\d+)\.[ \t]*([^\n.]{0,100})")?,
            min_content_chars: config.min_content_chars,
        })
    }

    /// Split text into chapters, in document order.
    ///
    /// Running page headers are removed first, wherever they sit on a line,
    /// so they never open a chapter. Text before the first chapter header is
    /// front matter and is dropped. A document with no chapter header at all
    /// becomes one unnamed chapter.
    pub fn chapters(&self, text: &str) -> Vec<Chapter> {
        let text = self.strip_page_headers(text);

        let headers: Vec<(usize, usize, u32, String)> = self
            .chapter_header
            .captures_iter(&text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let rest = caps.get(2)?;
                let number = caps[1].parse().ok()?;

                // A section marker on the header line starts the chapter body
                let title_len = self
                    .section_header
                    .find(rest.as_str())
                    .map_or(rest.len(), |m| m.start());
                let title = rest.as_str()[..title_len]
                    .trim()
                    .trim_start_matches(['.', ':', '-'])
                    .trim()
                    .to_string();

                Some((whole.start(), rest.start() + title_len, number, title))
            })
            .collect();

        if headers.is_empty() {
            debug!("no chapter headers found; treating document as a single chapter");
            return vec![Chapter {
                number: None,
                title: String::new(),
                body: text,
            }];
        }

        headers
            .iter()
            .enumerate()
            .map(|(i, (_, body_start, number, title))| {
                let end = headers.get(i + 1).map_or(text.len(), |next| next.0);
                Chapter {
                    number: Some(*number),
                    title: title.clone(),
                    body: text[*body_start..end].to_string(),
                }
            })
            .collect()
    }

    /// Replace running page headers ("Chapter 3 27") with a line break.
    pub fn strip_page_headers(&self, body: &str) -> String {
        self.page_header.replace_all(body, "\n").into_owned()
    }

    /// Split a chapter body into sections.
    pub fn sections(&self, chapter: &Chapter) -> Segments<Section> {
        let body = chapter.body.as_str();
        let headers: Vec<_> = self.section_header.captures_iter(body).collect();
        let mut segments = Segments::default();

        for (i, caps) in headers.iter().enumerate() {
            // Content starts right after the "Section <n>." marker
            let Some(marker_end) = caps.get(1).map(|m| m.end() + 1) else {
                continue;
            };
            let Ok(number) = caps[1].parse::<u32>() else {
                continue;
            };
            let end = headers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(body.len(), |m| m.start());

            let content = body[marker_end..end].trim();
            if content.chars().count() < self.min_content_chars {
                debug!(
                    chapter = ?chapter.number,
                    section = number,
                    chars = content.len(),
                    "skipping short section candidate"
                );
                segments.skipped += 1;
                continue;
            }

            let title = caps[2].trim().to_string();
            segments.items.push(Section {
                number,
                title: if title.is_empty() {
                    format!("Section {number}")
                } else {
                    title
                },
                content: content.to_string(),
            });
        }

        segments
    }
}
