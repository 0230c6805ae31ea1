// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::model::StaffMember;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

const FALLBACK_TITLE: &str = "Department";
const FALLBACK_FILE_STEM: &str = "department";

/// Page geometry in points, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub margin_x: f64,
    pub top: f64,
    /// Space between the title and the first entry.
    pub title_gap: f64,
    pub name_advance: f64,
    pub qualification_advance: f64,
    pub email_advance: f64,
    pub separator_gap: f64,
    pub rule_end_x: f64,
    /// Nothing may be drawn below this line.
    pub bottom: f64,
    pub title_size: f64,
    pub body_size: f64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageLayout {
    pub fn a4() -> Self {
        Self {
            margin_x: 48.0,
            top: 64.0,
            title_gap: 24.0,
            name_advance: 16.0,
            qualification_advance: 14.0,
            email_advance: 18.0,
            separator_gap: 12.0,
            rule_end_x: 560.0,
            bottom: 780.0,
            title_size: 16.0,
            body_size: 11.0,
        }
    }

    /// Distance from an entry's first line to its separator rule.
    pub fn entry_extent(&self) -> f64 {
        self.name_advance + self.qualification_advance + self.email_advance
    }

    pub fn entry_advance(&self) -> f64 {
        self.entry_extent() + self.separator_gap
    }

    /// Whole entries that fit on a page. Never less than one.
    pub fn capacity(&self, first_page: bool) -> usize {
        let start = if first_page {
            self.top + self.title_gap
        } else {
            self.top
        };
        let room = self.bottom - self.entry_extent() - start;
        if room < 0.0 {
            return 1;
        }
        (room / self.entry_advance()).floor() as usize + 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text {
        x: f64,
        y: f64,
        size: f64,
        text: String,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    PageBreak,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaffDocument {
    pub file_stem: String,
    pub commands: Vec<DrawCommand>,
}

impl StaffDocument {
    pub fn pages(&self) -> Vec<&[DrawCommand]> {
        self.commands
            .split(|c| matches!(c, DrawCommand::PageBreak))
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.pages().len()
    }

    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.file_stem, extension)
    }
}

/// Lays a roster out as a paginated document.
#[derive(Debug, Clone, Default)]
pub struct StaffRosterExporter {
    layout: PageLayout,
}

impl StaffRosterExporter {
    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Entries keep the order given. Each entry stays on one page: if it would
    /// cross the bottom bound, a page break goes in first.
    pub fn export(&self, title: Option<&str>, staff: &[StaffMember]) -> StaffDocument {
        let l = &self.layout;
        let title = title.map(str::trim).filter(|t| !t.is_empty());
        let mut commands = Vec::with_capacity(1 + staff.len() * 4);

        commands.push(DrawCommand::Text {
            x: l.margin_x,
            y: l.top,
            size: l.title_size,
            text: format!("Staff List — {}", title.unwrap_or(FALLBACK_TITLE)),
        });

        let mut y = l.top + l.title_gap;
        let mut on_page = 0usize;

        for (idx, member) in staff.iter().enumerate() {
            if on_page > 0 && y + l.entry_extent() > l.bottom {
                commands.push(DrawCommand::PageBreak);
                y = l.top;
                on_page = 0;
            }

            let body = |y: f64, text: String| DrawCommand::Text {
                x: l.margin_x,
                y,
                size: l.body_size,
                text,
            };
            commands.push(body(
                y,
                format!("{}. {} — {}", idx + 1, member.name, member.designation),
            ));
            y += l.name_advance;
            commands.push(body(y, format!("Qualification: {}", member.qualification)));
            y += l.qualification_advance;
            commands.push(body(y, format!("Email: {}", member.email)));
            y += l.email_advance;
            commands.push(DrawCommand::Line {
                x1: l.margin_x,
                y1: y,
                x2: l.rule_end_x,
                y2: y,
            });
            y += l.separator_gap;
            on_page += 1;
        }

        StaffDocument {
            file_stem: file_stem(title),
            commands,
        }
    }
}

fn file_stem(title: Option<&str>) -> String {
    let base: String = title
        .unwrap_or(FALLBACK_FILE_STEM)
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c => c,
        })
        .collect();
    format!("{}-staff", base)
}

/// Turns draw commands into file bytes.
pub trait DocumentSurface {
    fn extension(&self) -> &str;
    fn render(&self, document: &StaffDocument) -> Vec<u8>;
}

/// Plain-text rendering: one line per text command, dashes for rules and a
/// form feed between pages.
#[derive(Debug, Clone, Copy)]
pub struct TextSurface {
    /// Points per character when turning rule length into dashes.
    pub char_width: f64,
}

impl Default for TextSurface {
    fn default() -> Self {
        Self { char_width: 8.0 }
    }
}

impl DocumentSurface for TextSurface {
    fn extension(&self) -> &str {
        "txt"
    }

    fn render(&self, document: &StaffDocument) -> Vec<u8> {
        let mut out = String::new();
        for (n, page) in document.pages().iter().enumerate() {
            if n > 0 {
                out.push('\u{c}');
                out.push('\n');
            }
            for command in page.iter() {
                match command {
                    DrawCommand::Text { text, .. } => {
                        out.push_str(text);
                        out.push('\n');
                    }
                    DrawCommand::Line { x1, x2, .. } => {
                        let width = ((x2 - x1).abs() / self.char_width).round() as usize;
                        out.push_str(&"-".repeat(width));
                        out.push('\n');
                    }
                    DrawCommand::PageBreak => {}
                }
            }
        }
        out.into_bytes()
    }
}

/// Renders `document` and writes it into `dir`. Returns the written path.
pub fn save_document(
    document: &StaffDocument,
    surface: &dyn DocumentSurface,
    dir: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(document.file_name(surface.extension()));
    fs::write(&path, surface.render(document))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(
        "Exported staff roster — path={} pages={}",
        path.display(),
        document.page_count()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(n: usize) -> StaffMember {
        StaffMember {
            id: format!("1-{}", n),
            department_id: "1".to_string(),
            name: format!("Dr. Member {}", n),
            designation: "Assistant Professor".to_string(),
            qualification: "M.E".to_string(),
            email: format!("faculty{}@college.edu", n),
            photo_url: None,
        }
    }

    #[test]
    fn test_a4_capacity() {
        let layout = PageLayout::a4();
        assert_eq!(layout.capacity(true), 11);
        assert_eq!(layout.capacity(false), 12);
    }

    #[test]
    fn test_entry_layout_and_order() {
        let exporter = StaffRosterExporter::default();
        let doc = exporter.export(Some("IT Block"), &[member(1), member(2)]);

        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.file_name("txt"), "IT Block-staff.txt");

        let texts: Vec<&str> = doc
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                "Staff List — IT Block",
                "1. Dr. Member 1 — Assistant Professor",
                "Qualification: M.E",
                "Email: faculty1@college.edu",
                "2. Dr. Member 2 — Assistant Professor",
                "Qualification: M.E",
                "Email: faculty2@college.edu",
            ]
        );

        // Separator under the first entry sits 48pt below its first line
        assert!(doc.commands.contains(&DrawCommand::Line {
            x1: 48.0,
            y1: 136.0,
            x2: 560.0,
            y2: 136.0
        }));
    }

    #[test]
    fn test_missing_title_falls_back() {
        let exporter = StaffRosterExporter::default();
        for title in [None, Some(""), Some("   ")] {
            let doc = exporter.export(title, &[]);
            assert_eq!(doc.file_stem, "department-staff");
            assert_eq!(
                doc.commands[0],
                DrawCommand::Text {
                    x: 48.0,
                    y: 64.0,
                    size: 16.0,
                    text: "Staff List — Department".to_string()
                }
            );
            assert_eq!(doc.page_count(), 1);
        }
    }

    #[test]
    fn test_file_stem_strips_path_separators() {
        let doc = StaffRosterExporter::default().export(Some("Civil/Structural"), &[]);
        assert_eq!(doc.file_stem, "Civil-Structural-staff");
    }

    #[test]
    fn test_text_surface_renders_pages() {
        let staff: Vec<_> = (1..=13).map(member).collect();
        let doc = StaffRosterExporter::default().export(Some("MBA Block"), &staff);
        assert_eq!(doc.page_count(), 2);

        let text = String::from_utf8(TextSurface::default().render(&doc)).unwrap();
        assert_eq!(text.matches('\u{c}').count(), 1);
        assert!(text.starts_with("Staff List — MBA Block\n1. Dr. Member 1"));
        assert!(text.contains(&"-".repeat(64)));
    }

    #[test]
    fn test_save_document_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let doc = StaffRosterExporter::default().export(Some("Admin Block"), &[member(1)]);
        let path = save_document(&doc, &TextSurface::default(), dir.path()).unwrap();

        assert_eq!(path, dir.path().join("Admin Block-staff.txt"));
        let written = fs::read_to_string(path).unwrap();
        assert!(written.contains("Email: faculty1@college.edu"));
    }
}
