//! Renderer module
//!
//! Renders a PageSet to different output formats: jsonl, json, md, raw

use crate::core::model::PageSet;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    /// Only affects raw output
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: false,
            color: true,
        }
    }
}

impl RenderConfig {
    /// Create a new render config with default options
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self {
            format,
            pretty,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// One page as it appears in structured output
#[derive(Debug, Serialize)]
struct PageRecord<'a> {
    index: usize,
    location: &'a str,
    page: &'a str,
}

fn records(pages: &PageSet) -> Vec<PageRecord<'_>> {
    pages
        .iter()
        .enumerate()
        .map(|(index, (page, location))| PageRecord {
            index,
            location,
            page,
        })
        .collect()
}

/// Renderer for page sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a page set to a string
    pub fn render(&self, pages: &PageSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(pages),
            OutputFormat::Json => self.render_json(pages),
            OutputFormat::Markdown => self.render_markdown(pages),
            OutputFormat::Raw => self.render_raw(pages),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&self, pages: &PageSet, mut writer: W) -> std::io::Result<()> {
        let output = self.render(pages);
        writer.write_all(output.as_bytes())?;
        if !output.is_empty() && !output.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Render as JSON Lines (one JSON object per page)
    fn render_jsonl(&self, pages: &PageSet) -> String {
        records(pages)
            .iter()
            .filter_map(|record| {
                if self.config.pretty {
                    serde_json::to_string_pretty(record).ok()
                } else {
                    serde_json::to_string(record).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, pages: &PageSet) -> String {
        let records = records(pages);
        if self.config.pretty {
            serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&records).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown, one section per page
    fn render_markdown(&self, pages: &PageSet) -> String {
        let mut output = String::new();

        for (page, location) in pages.iter() {
            output.push_str(&format!("## {}\n", location));
            output.push_str("\n```\n");
            output.push_str(page);
            if !page.ends_with('\n') {
                output.push('\n');
            }
            output.push_str("```\n\n");
        }

        output
    }

    /// Render as raw text for reading in a terminal
    fn render_raw(&self, pages: &PageSet) -> String {
        pages
            .iter()
            .map(|(page, location)| {
                let header = format!("== {} ==", location);
                let header = if self.config.color {
                    header.bold().cyan().to_string()
                } else {
                    header
                };
                format!("{}\n{}", header, page)
            })
            .collect::<Vec<_>>()
            .join("\n---\n")
    }
}
