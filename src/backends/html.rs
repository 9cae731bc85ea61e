//! HTML to light Markdown.
//!
//! The document is parsed with `scraper` (an html5ever tree) and the element tree is walked in
//! document order, translating tags on the fly.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector, node::Element};

use crate::converter::DocumentConverterResult;
use crate::utils::{decode_text, markdown_table};

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Elements whose content is never part of the text
const SKIPPED: [&str; 6] = ["head", "script", "style", "noscript", "template", "title"];

pub fn convert_html(bytes: &[u8]) -> DocumentConverterResult {
    let document = Html::parse_document(&decode_text(bytes));
    let title = document.select(&TITLE).next().map(|title| {
        RE_WHITESPACE
            .replace_all(&title.text().collect::<String>(), " ")
            .trim()
            .to_string()
    });

    let mut writer = MarkdownWriter::default();
    writer.walk(document.root_element());

    DocumentConverterResult::new(title, &writer.out)
}

#[derive(Default)]
struct ListState {
    ordered: bool,
    next: usize,
    /// Width of the current item's marker, including its indentation
    indent: usize,
}

#[derive(Default)]
struct TableState {
    rows: Vec<Vec<String>>,
    cell: Option<String>,
}

impl TableState {
    fn finish_cell(&mut self) {
        if let Some(cell) = self.cell.take() {
            if self.rows.is_empty() {
                self.rows.push(vec![]);
            }
            if let Some(row) = self.rows.last_mut() {
                row.push(cell.trim().to_string());
            }
        }
    }
}

#[derive(Default)]
struct MarkdownWriter {
    out: String,
    lists: Vec<ListState>,
    links: Vec<Option<String>>,
    quotes: Vec<Option<usize>>,
    tables: Vec<TableState>,
    pre: usize,
    /// Emphasis markers opened but not yet followed by any text
    pending_marks: String,
    /// Nothing has been written since the last list marker
    item_start: bool,
    /// A paragraph break inside a list item, written before the next text
    item_break: bool,
}

impl MarkdownWriter {
    fn walk(&mut self, element: ElementRef) {
        let name = element.value().name();
        if SKIPPED.contains(&name) {
            return;
        }
        self.open(name, element.value());
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.text(text),
                // html5ever keeps CDATA outside foreign content as a bogus comment
                Node::Comment(comment) => {
                    if let Some(cdata) = comment.strip_prefix("[CDATA[") {
                        self.text(cdata.strip_suffix("]]").unwrap_or(cdata));
                    }
                }
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.walk(child);
                    }
                }
                _ => {}
            }
        }
        self.close(name);
    }

    /// Where text currently goes: the open table cell, nowhere (between cells), or the document
    fn sink(&mut self) -> Option<&mut String> {
        match self.tables.last_mut() {
            Some(table) => table.cell.as_mut(),
            None => Some(&mut self.out),
        }
    }

    fn push(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.tables.is_empty() {
            self.item_start = false;
            if self.item_break {
                self.item_break = false;
                let indent = self.lists.last().map_or(0, |list| list.indent);
                self.out.truncate(self.out.trim_end_matches(' ').len());
                self.out.push_str("\n\n");
                self.out.push_str(&" ".repeat(indent));
            }
        }
        let marks = match text.trim().is_empty() {
            true => String::new(),
            false => std::mem::take(&mut self.pending_marks),
        };
        let Some(sink) = self.sink() else { return };
        match text.strip_prefix(' ') {
            Some(rest) if !marks.is_empty() => {
                sink.push(' ');
                sink.push_str(&marks);
                sink.push_str(rest);
            }
            _ => {
                sink.push_str(&marks);
                sink.push_str(text);
            }
        }
    }

    fn text(&mut self, raw: &str) {
        if self.pre > 0 {
            self.push(raw);
            return;
        }
        let collapsed = RE_WHITESPACE.replace_all(raw, " ");
        let trim = self.item_break
            || match self.sink() {
                Some(sink) => sink.is_empty() || sink.ends_with(char::is_whitespace),
                None => return,
            };
        let text: &str = if trim { collapsed.trim_start() } else { &collapsed };
        self.push(text);
    }

    fn open_inline(&mut self, marker: &str) {
        self.pending_marks.push_str(marker);
    }

    /// Closes an emphasis marker, keeping surrounding whitespace outside of it
    fn close_inline(&mut self, marker: &str) {
        if let Some(unused) = self.pending_marks.strip_suffix(marker).map(str::len) {
            self.pending_marks.truncate(unused);
            return;
        }
        let Some(sink) = self.sink() else { return };
        let trimmed = sink.trim_end_matches(' ').len();
        let had_space = trimmed < sink.len();
        sink.truncate(trimmed);
        sink.push_str(marker);
        if had_space {
            sink.push(' ');
        }
    }

    /// Starts a new paragraph (or, inside a table cell, just a space)
    fn block(&mut self) {
        if !self.tables.is_empty() {
            self.push(" ");
            return;
        }
        if !self.lists.is_empty() {
            // paragraphs inside a list item continue the item
            if !self.item_start {
                self.item_break = true;
            }
            return;
        }
        self.item_break = false;
        if self.out.is_empty() {
            return;
        }
        self.out.truncate(self.out.trim_end_matches(' ').len());
        while !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn newline(&mut self) {
        self.item_break = false;
        if !self.tables.is_empty() {
            self.push(" ");
        } else if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn open(&mut self, name: &str, element: &Element) {
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.block();
                if self.tables.is_empty() {
                    let level = name[1..].parse::<usize>().unwrap_or(1);
                    self.push(&format!("{} ", "#".repeat(level)));
                }
            }
            "p" | "div" | "section" | "article" | "header" | "footer" | "main" | "nav"
            | "aside" | "figure" | "figcaption" | "address" | "dl" | "dt" | "dd" | "details"
            | "summary" | "form" | "fieldset" | "body" | "center" => self.block(),
            "br" => {
                if self.tables.is_empty() {
                    self.out.truncate(self.out.trim_end_matches(' ').len());
                    self.out.push('\n');
                } else {
                    self.push(" ");
                }
            }
            "hr" => {
                self.block();
                self.push("---");
                self.block();
            }
            "strong" | "b" => self.open_inline("**"),
            "em" | "i" => self.open_inline("*"),
            "s" | "del" | "strike" => self.open_inline("~~"),
            "code" if self.pre == 0 => self.open_inline("`"),
            "pre" => {
                self.block();
                self.push("```\n");
                self.pre += 1;
            }
            "a" => {
                let href = element
                    .attr("href")
                    .filter(|href| !href.starts_with("javascript:"))
                    .map(String::from);
                if href.is_some() {
                    self.push("[");
                }
                self.links.push(href);
            }
            "img" => {
                if let Some(src) = element.attr("src") {
                    let alt = element.attr("alt").unwrap_or_default();
                    self.push(&format!("![{}]({})", alt, src));
                }
            }
            "blockquote" => {
                self.block();
                let start = self.tables.is_empty().then_some(self.out.len());
                self.quotes.push(start);
            }
            "ul" | "ol" => {
                if self.lists.is_empty() {
                    self.block();
                } else {
                    self.newline();
                }
                self.lists.push(ListState {
                    ordered: name == "ol",
                    next: 1,
                    indent: 0,
                });
            }
            "li" => {
                self.newline();
                if !self.tables.is_empty() {
                    return;
                }
                let depth = self.lists.len().saturating_sub(1);
                let Some(list) = self.lists.last_mut() else {
                    return;
                };
                let marker = match list.ordered {
                    true => {
                        list.next += 1;
                        format!("{}{}. ", "  ".repeat(depth), list.next - 1)
                    }
                    false => format!("{}* ", "  ".repeat(depth)),
                };
                list.indent = marker.len();
                self.out.push_str(&marker);
                self.item_start = true;
            }
            "table" => {
                self.block();
                self.tables.push(TableState::default());
            }
            "tr" => {
                if let Some(table) = self.tables.last_mut() {
                    table.finish_cell();
                    table.rows.push(vec![]);
                }
            }
            "td" | "th" => {
                if let Some(table) = self.tables.last_mut() {
                    table.finish_cell();
                    table.cell = Some(String::new());
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &str) {
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" | "div" | "section" | "article"
            | "header" | "footer" | "main" | "nav" | "aside" | "figure" | "figcaption"
            | "address" | "dl" | "dt" | "dd" | "details" | "summary" | "form" | "fieldset"
            | "body" | "center" => self.block(),
            "strong" | "b" => self.close_inline("**"),
            "em" | "i" => self.close_inline("*"),
            "s" | "del" | "strike" => self.close_inline("~~"),
            "code" if self.pre == 0 => self.close_inline("`"),
            "pre" => {
                self.pre = self.pre.saturating_sub(1);
                self.newline();
                self.push("```");
                self.block();
            }
            "a" => {
                if let Some(Some(href)) = self.links.pop() {
                    self.push(&format!("]({})", href));
                }
            }
            "blockquote" => {
                if let Some(Some(start)) = self.quotes.pop() {
                    let inner = self.out.split_off(start.min(self.out.len()));
                    let quoted = inner
                        .trim()
                        .lines()
                        .map(|line| match line.trim_end() {
                            "" => ">".to_string(),
                            line => format!("> {}", line),
                        })
                        .collect::<Vec<String>>()
                        .join("\n");
                    self.out.push_str(&quoted);
                }
                self.block();
            }
            "ul" | "ol" => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.block();
                } else {
                    self.newline();
                }
            }
            "li" => self.newline(),
            "tr" | "td" | "th" => {
                if let Some(table) = self.tables.last_mut() {
                    table.finish_cell();
                }
            }
            "table" => {
                let Some(mut table) = self.tables.pop() else { return };
                table.finish_cell();
                let rows: Vec<Vec<String>> =
                    table.rows.into_iter().filter(|row| !row.is_empty()).collect();
                if self.tables.is_empty() {
                    self.block();
                    self.push(&markdown_table(&rows));
                    self.block();
                } else {
                    // nested tables flatten into the enclosing cell
                    let flattened = rows
                        .iter()
                        .map(|row| row.join(" "))
                        .collect::<Vec<String>>()
                        .join(" ");
                    self.push(&flattened);
                }
            }
            _ => {}
        }
    }
}
