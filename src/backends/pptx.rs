//! Presentations (.pptx). A pptx file is a ZIP archive of Open XML parts; slides live in
//! `ppt/slides/slideN.xml` and the document title in `docProps/core.xml`.

use std::io::{Cursor, Read, Seek};

use log::warn;
use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::converter::DocumentConverterResult;
use crate::errors::ConversionError;

#[derive(Debug, Default, PartialEq)]
struct SlideContent {
    number: usize,
    title: Option<String>,
    text_boxes: Vec<String>,
}

impl SlideContent {
    fn render(&self) -> String {
        let mut text = format!("<!-- Slide number: {} -->\n", self.number);
        if let Some(title) = &self.title {
            text.push_str(&format!("# {}\n", title));
        }
        for text_box in self.text_boxes.iter() {
            text.push_str(text_box);
            text.push('\n');
        }
        text
    }
}

pub fn convert_pptx(bytes: &[u8]) -> Result<DocumentConverterResult, ConversionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ConversionError::Presentation(format!("not a pptx archive: {}", e)))?;

    let slide_numbers = slide_numbers(&archive);
    if slide_numbers.is_empty() {
        return Err(ConversionError::Presentation(
            "no slides found in presentation".to_string(),
        ));
    }

    let mut slides = vec![];
    for number in slide_numbers {
        let path = format!("ppt/slides/slide{}.xml", number);
        match read_part(&mut archive, &path) {
            Some(xml) => slides.push(parse_slide(number, &xml)),
            None => warn!("Skipping unreadable slide {}", path),
        }
    }

    let title = read_part(&mut archive, "docProps/core.xml").and_then(|xml| parse_title(&xml));
    let text = slides
        .iter()
        .map(|slide| slide.render())
        .collect::<Vec<String>>()
        .join("\n");
    Ok(DocumentConverterResult::new(title, &text))
}

/// Slide numbers present in the archive, in presentation order. Archive order is not slide
/// order (`slide10.xml` may come before `slide2.xml`).
fn slide_numbers<R: Read + Seek>(archive: &ZipArchive<R>) -> Vec<usize> {
    let mut numbers: Vec<usize> = archive
        .file_names()
        .filter_map(|name| {
            name.strip_prefix("ppt/slides/slide")?
                .strip_suffix(".xml")?
                .parse::<usize>()
                .ok()
        })
        .collect();
    numbers.sort_unstable();
    numbers
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Option<String> {
    let mut file = archive.by_name(path).ok()?;
    let mut content = String::new();
    file.read_to_string(&mut content).ok()?;
    Some(content)
}

fn parse_slide(number: usize, xml: &str) -> SlideContent {
    let mut slide = SlideContent {
        number,
        ..Default::default()
    };

    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut in_text_body = false;
    let mut in_text = false;
    let mut is_title = false;
    let mut current_body: Vec<String> = vec![];
    let mut current_paragraph = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"sp" => is_title = false,
                b"txBody" => {
                    in_text_body = true;
                    current_body.clear();
                }
                b"p" => current_paragraph.clear(),
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"ph" => {
                    for attr in e.attributes().flatten() {
                        if attr.key.local_name().as_ref() == b"type" {
                            let value = String::from_utf8_lossy(&attr.value);
                            if value == "title" || value == "ctrTitle" {
                                is_title = true;
                            }
                        }
                    }
                }
                b"br" if in_text_body => current_paragraph.push('\n'),
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"sp" => is_title = false,
                b"p" if in_text_body => {
                    let paragraph = current_paragraph.trim();
                    if !paragraph.is_empty() {
                        current_body.push(paragraph.to_string());
                    }
                    current_paragraph.clear();
                }
                b"t" => in_text = false,
                b"txBody" => {
                    in_text_body = false;
                    if !current_body.is_empty() {
                        if is_title && slide.title.is_none() {
                            slide.title = Some(current_body.join(" "));
                        } else {
                            slide.text_boxes.push(current_body.join("\n"));
                        }
                    }
                    current_body.clear();
                }
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text && in_text_body {
                    current_paragraph.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!("Malformed XML in slide {}: {}", number, e);
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    slide
}

fn parse_title(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut in_title = false;
    let mut title = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"title" => in_title = true,
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"title" => in_title = false,
            Ok(Event::Text(e)) if in_title => {
                title = Some(e.unescape().unwrap_or_default().to_string());
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    title
}
