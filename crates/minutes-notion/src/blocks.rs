//! Notion block tree for a [`StructuredSummary`].
//!
//! Notion rejects any rich-text item whose content exceeds
//! [`MAX_TEXT_CHARS`]. Long text is therefore split with [`chunk_text`]:
//! discussion bodies become one paragraph block per chunk, every other block
//! carries one rich-text segment per chunk.

use minutes_core::render::{
    join_attendees, DECISION_COLUMNS, NONE_PLACEHOLDER, NOT_APPLICABLE, SECTION_TITLES,
};
use minutes_core::text::chunk_chars;
use minutes_core::StructuredSummary;
use serde_json::{json, Value};

/// Maximum characters in one Notion rich-text item.
pub const MAX_TEXT_CHARS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading2(String),
    Heading3(String),
    Paragraph(String),
    Bullet(String),
    /// Unchecked to-do: `text` followed by a grey italic `detail`.
    ToDo {
        text: String,
        detail: String,
    },
    /// Table whose first row is a column header.
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Divider,
}

impl Block {
    /// Serializes the block into the Notion API's JSON shape.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Block::Heading2(text) => text_block("heading_2", text),
            Block::Heading3(text) => text_block("heading_3", text),
            Block::Paragraph(text) => text_block("paragraph", text),
            Block::Bullet(text) => text_block("bulleted_list_item", text),
            Block::ToDo { text, detail } => {
                let mut segments = rich_text(text);
                segments.extend(chunk_text(detail).into_iter().map(|chunk| {
                    json!({
                        "type": "text",
                        "text": {"content": chunk},
                        "annotations": {"italic": true, "color": "gray"},
                    })
                }));
                json!({
                    "object": "block",
                    "type": "to_do",
                    "to_do": {"rich_text": segments, "checked": false},
                })
            }
            Block::Table { header, rows } => {
                let children: Vec<Value> = std::iter::once(header)
                    .chain(rows)
                    .map(|cells| table_row(cells))
                    .collect();
                json!({
                    "object": "block",
                    "type": "table",
                    "table": {
                        "table_width": header.len(),
                        "has_column_header": true,
                        "has_row_header": false,
                        "children": children,
                    },
                })
            }
            Block::Divider => json!({"object": "block", "type": "divider", "divider": {}}),
        }
    }
}

/// Splits `text` into sequential pieces of [`MAX_TEXT_CHARS`] characters;
/// only the last piece may be shorter. Concatenating the pieces yields
/// `text` exactly.
#[must_use]
pub fn chunk_text(text: &str) -> Vec<&str> {
    chunk_chars(text, MAX_TEXT_CHARS)
}

/// Renders the seven summary sections as Notion blocks, in reading order.
#[must_use]
pub fn render_blocks(summary: &StructuredSummary) -> Vec<Block> {
    let mut blocks = Vec::new();

    blocks.push(Block::Heading2(SECTION_TITLES[0].to_string()));
    for line in [
        format!("회의 제목: {}", summary.title),
        format!("회의 일시: {}", summary.date),
        format!("참석자: {}", join_attendees(&summary.attendees)),
        format!("회의 목적: {}", summary.purpose),
    ] {
        blocks.push(Block::Bullet(line));
    }

    blocks.push(Block::Heading2(SECTION_TITLES[1].to_string()));
    push_bullets(&mut blocks, &summary.executive_summary);

    blocks.push(Block::Heading2(SECTION_TITLES[2].to_string()));
    if summary.discussion_topics.is_empty() {
        blocks.push(Block::Paragraph(NONE_PLACEHOLDER.to_string()));
    }
    for (i, topic) in summary.discussion_topics.iter().enumerate() {
        blocks.push(Block::Heading3(format!("주제 {}: {}", i + 1, topic.title)));
        blocks.extend(
            chunk_text(&topic.body)
                .into_iter()
                .map(|chunk| Block::Paragraph(chunk.to_string())),
        );
        blocks.push(Block::Divider);
    }

    blocks.push(Block::Heading2(SECTION_TITLES[3].to_string()));
    if summary.decision_structure.is_empty() {
        blocks.push(Block::Paragraph(NOT_APPLICABLE.to_string()));
    } else {
        blocks.push(Block::Table {
            header: DECISION_COLUMNS.iter().map(ToString::to_string).collect(),
            rows: summary
                .decision_structure
                .iter()
                .map(|item| {
                    vec![
                        item.category.clone(),
                        item.subject.clone(),
                        item.influence.clone(),
                        item.criteria.clone(),
                        item.comment.clone(),
                    ]
                })
                .collect(),
        });
    }

    blocks.push(Block::Heading2(SECTION_TITLES[4].to_string()));
    push_bullets(&mut blocks, &summary.key_risks);

    blocks.push(Block::Heading2(SECTION_TITLES[5].to_string()));
    push_bullets(&mut blocks, &summary.decisions);

    blocks.push(Block::Heading2(SECTION_TITLES[6].to_string()));
    if summary.action_items.is_empty() {
        blocks.push(Block::Paragraph(NONE_PLACEHOLDER.to_string()));
    }
    for item in &summary.action_items {
        blocks.push(Block::ToDo {
            text: item.action.clone(),
            detail: format!(
                " (@{} / ~{}) - 목적: {} / 리스크: {}",
                item.subject, item.due_date, item.purpose, item.risk
            ),
        });
    }

    blocks
}

fn push_bullets(blocks: &mut Vec<Block>, items: &[String]) {
    if items.is_empty() {
        blocks.push(Block::Paragraph(NONE_PLACEHOLDER.to_string()));
    }
    blocks.extend(items.iter().cloned().map(Block::Bullet));
}

fn rich_text(content: &str) -> Vec<Value> {
    chunk_text(content)
        .into_iter()
        .map(|chunk| json!({"type": "text", "text": {"content": chunk}}))
        .collect()
}

fn text_block(kind: &str, content: &str) -> Value {
    json!({
        "object": "block",
        "type": kind,
        kind: {"rich_text": rich_text(content)},
    })
}

fn table_row(cells: &[String]) -> Value {
    let cells: Vec<Vec<Value>> = cells.iter().map(|c| rich_text(c)).collect();
    json!({"object": "block", "type": "table_row", "table_row": {"cells": cells}})
}

#[cfg(test)]
#[path = "blocks_test.rs"]
mod tests;
