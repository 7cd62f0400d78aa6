use std::sync::Mutex;

use async_trait::async_trait;
use minutes_core::{Destination, StructuredSummary};

use super::*;
use crate::client::CreatedPage;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Create {
        api_key: String,
        database_id: String,
        title_property: String,
        blocks: usize,
    },
    Append {
        page_id: String,
        blocks: usize,
    },
}

/// Records every write; optionally fails the create or the n-th append.
#[derive(Default)]
struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    fail_create: bool,
    fail_append_at: Option<usize>,
}

impl RecordingApi {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotionApi for RecordingApi {
    async fn create_page(
        &self,
        api_key: &str,
        database_id: &str,
        title_property: &str,
        _title: &str,
        blocks: &[Block],
    ) -> Result<CreatedPage, PublishError> {
        self.calls.lock().unwrap().push(Call::Create {
            api_key: api_key.to_string(),
            database_id: database_id.to_string(),
            title_property: title_property.to_string(),
            blocks: blocks.len(),
        });
        if self.fail_create {
            return Err(PublishError::Api {
                status: 400,
                message: "validation_error: bad property".to_string(),
            });
        }
        Ok(CreatedPage {
            id: "page-1".to_string(),
            url: "https://www.notion.so/page-1".to_string(),
        })
    }

    async fn append_blocks(
        &self,
        _api_key: &str,
        page_id: &str,
        blocks: &[Block],
    ) -> Result<(), PublishError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(Call::Append {
            page_id: page_id.to_string(),
            blocks: blocks.len(),
        });
        let appends = calls
            .iter()
            .filter(|c| matches!(c, Call::Append { .. }))
            .count();
        if self.fail_append_at == Some(appends) {
            return Err(PublishError::Api {
                status: 502,
                message: "bad gateway".to_string(),
            });
        }
        Ok(())
    }
}

fn destinations() -> Arc<ChannelDestinationMap> {
    let default = Destination {
        api_key: "default-key".to_string(),
        database_id: "default-db".to_string(),
    };
    Arc::new(
        ChannelDestinationMap::new(default)
            .with_override("42", Some("team-key"), Some("team-db")),
    )
}

fn publisher(api: Arc<RecordingApi>) -> Publisher {
    Publisher::new(api, destinations(), "이름")
}

fn paragraphs(n: usize) -> Vec<Block> {
    (0..n).map(|i| Block::Paragraph(i.to_string())).collect()
}

fn summary_with_bullets(n: usize) -> StructuredSummary {
    StructuredSummary {
        title: "20260213_한전_킥오프 관련 회의".to_string(),
        date: "2026.02.13".to_string(),
        attendees: Vec::new(),
        purpose: "킥오프".to_string(),
        executive_summary: (0..n).map(|i| format!("요약 {i}")).collect(),
        discussion_topics: Vec::new(),
        decision_structure: Vec::new(),
        key_risks: Vec::new(),
        decisions: Vec::new(),
        action_items: Vec::new(),
    }
}

#[tokio::test]
async fn write_calls_match_batch_count() {
    for n in [0_usize, 1, 99, 100, 101, 200, 250] {
        let api = Arc::new(RecordingApi::default());
        let url = publisher(api.clone())
            .publish_blocks("title", &paragraphs(n), "1")
            .await
            .unwrap();
        assert_eq!(url, "https://www.notion.so/page-1");

        let calls = api.calls();
        assert_eq!(calls.len(), n.div_ceil(MAX_BLOCKS_PER_REQUEST).max(1), "n = {n}");
        assert!(matches!(calls[0], Call::Create { blocks, .. } if blocks == n.min(100)));
        assert!(calls[1..]
            .iter()
            .all(|c| matches!(c, Call::Append { page_id, .. } if page_id == "page-1")));
    }
}

#[tokio::test]
async fn batches_preserve_order_and_sizes() {
    let api = Arc::new(RecordingApi::default());
    publisher(api.clone())
        .publish_blocks("title", &paragraphs(250), "1")
        .await
        .unwrap();

    let sizes: Vec<usize> = api
        .calls()
        .into_iter()
        .map(|c| match c {
            Call::Create { blocks, .. } | Call::Append { blocks, .. } => blocks,
        })
        .collect();
    assert_eq!(sizes, vec![100, 100, 50]);
}

#[tokio::test]
async fn publish_renders_summary_blocks() {
    let summary = summary_with_bullets(150);
    let expected = crate::blocks::render_blocks(&summary).len();
    assert!(expected > 150);

    let api = Arc::new(RecordingApi::default());
    publisher(api.clone()).publish(&summary, "1").await.unwrap();

    let calls = api.calls();
    assert_eq!(calls.len(), expected.div_ceil(MAX_BLOCKS_PER_REQUEST));
    match &calls[0] {
        Call::Create {
            title_property,
            blocks,
            ..
        } => {
            assert_eq!(title_property, "이름");
            assert_eq!(*blocks, 100);
        }
        other => panic!("first call must create the page, got {other:?}"),
    }
}

#[tokio::test]
async fn channel_override_selects_destination() {
    let api = Arc::new(RecordingApi::default());
    publisher(api.clone())
        .publish_blocks("title", &paragraphs(1), "42")
        .await
        .unwrap();
    publisher(api.clone())
        .publish_blocks("title", &paragraphs(1), "7")
        .await
        .unwrap();

    let calls = api.calls();
    assert!(matches!(&calls[0], Call::Create { api_key, database_id, .. }
        if api_key == "team-key" && database_id == "team-db"));
    assert!(matches!(&calls[1], Call::Create { api_key, database_id, .. }
        if api_key == "default-key" && database_id == "default-db"));
}

#[tokio::test]
async fn missing_database_is_configuration_error() {
    let api = Arc::new(RecordingApi::default());
    let publisher = Publisher::new(
        api.clone(),
        Arc::new(ChannelDestinationMap::new(Destination {
            api_key: "key".to_string(),
            database_id: String::new(),
        })),
        "이름",
    );
    let err = publisher
        .publish_blocks("title", &paragraphs(3), "9")
        .await
        .unwrap_err();
    assert!(matches!(err, PublishError::Configuration { ref channel_id } if channel_id == "9"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn create_failure_makes_no_appends() {
    let api = Arc::new(RecordingApi {
        fail_create: true,
        ..RecordingApi::default()
    });
    let err = publisher(api.clone())
        .publish_blocks("title", &paragraphs(250), "1")
        .await
        .unwrap_err();
    assert!(matches!(err, PublishError::Api { status: 400, .. }));
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn append_failure_is_partial_and_stops() {
    let api = Arc::new(RecordingApi {
        fail_append_at: Some(1),
        ..RecordingApi::default()
    });
    let err = publisher(api.clone())
        .publish_blocks("title", &paragraphs(350), "1")
        .await
        .unwrap_err();

    match err {
        PublishError::PartialAppend {
            page_id,
            batch,
            source,
        } => {
            assert_eq!(page_id, "page-1");
            assert_eq!(batch, 2);
            assert!(matches!(*source, PublishError::Api { status: 502, .. }));
        }
        other => panic!("expected partial append, got {other:?}"),
    }
    assert_eq!(api.calls().len(), 2);
}
