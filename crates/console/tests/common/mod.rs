//! In-memory stand-ins for the API, shared by the controller tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use herald_client::{ApiError, AssetFetcher, ReorderApi, ResourceApi};
use herald_console::notify::{Notifier, RecordingNotifier};
use herald_core::event::{EventType, PhotoEvent};
use herald_core::ordering::OrderAssignment;
use herald_core::payload::Payload;
use herald_core::press::PressRelease;
use herald_core::slider::SliderItem;
use herald_core::Resource;

pub const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

/// One call received by [`FakeApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Get(String),
    Create(Payload),
    Update(String, Payload),
    UpdateFields(String, Value),
    Remove(String),
    Reorder(Vec<OrderAssignment>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    UpdateFields,
    Remove,
    Reorder,
}

struct FakeState<R> {
    records: Vec<R>,
    calls: Vec<Call>,
    failing: HashSet<Op>,
    failing_ids: HashSet<String>,
    saved: Option<R>,
}

/// Records every call and answers from a fixed collection.
pub struct FakeApi<R> {
    state: Mutex<FakeState<R>>,
}

impl<R: Resource> FakeApi<R> {
    pub fn with_records(records: Vec<R>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeState {
                records,
                calls: Vec::new(),
                failing: HashSet::new(),
                failing_ids: HashSet::new(),
                saved: None,
            }),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::with_records(Vec::new())
    }

    /// Make every call of this kind fail.
    pub fn fail(&self, op: Op) {
        self.state.lock().unwrap().failing.insert(op);
    }

    /// Make single-field updates for `id` fail.
    pub fn fail_fields_for(&self, id: &str) {
        self.state.lock().unwrap().failing_ids.insert(id.to_string());
    }

    /// Record returned by `create` / `update`. Without one, `create`
    /// answers like a server that sends no record body.
    pub fn will_save(&self, record: R) {
        self.state.lock().unwrap().saved = Some(record);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::List | Call::Get(_)))
            .collect()
    }

    fn record(&self, call: Call, op: Op) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        let id_fails = match &call {
            Call::UpdateFields(id, _) => state.failing_ids.contains(id),
            _ => false,
        };
        state.calls.push(call);
        if id_fails || state.failing.contains(&op) {
            return Err(ApiError::Status {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(())
    }

    fn saved(&self) -> Result<R, ApiError> {
        self.state
            .lock()
            .unwrap()
            .saved
            .clone()
            .ok_or_else(|| ApiError::Status {
                status: 500,
                body: "no canned record".to_string(),
            })
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for FakeApi<R> {
    async fn list(&self) -> Result<Vec<R>, ApiError> {
        self.record(Call::List, Op::List)?;
        Ok(self.state.lock().unwrap().records.clone())
    }

    async fn get(&self, id: &str) -> Result<R, ApiError> {
        self.record(Call::Get(id.to_string()), Op::Get)?;
        self.state
            .lock()
            .unwrap()
            .records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                body: "not found".to_string(),
            })
    }

    async fn create(&self, payload: Payload) -> Result<Option<R>, ApiError> {
        self.record(Call::Create(payload), Op::Create)?;
        Ok(self.state.lock().unwrap().saved.clone())
    }

    async fn update(&self, id: &str, payload: Payload) -> Result<R, ApiError> {
        self.record(Call::Update(id.to_string(), payload), Op::Update)?;
        self.saved()
    }

    async fn update_fields(&self, id: &str, fields: Value) -> Result<(), ApiError> {
        self.record(Call::UpdateFields(id.to_string(), fields), Op::UpdateFields)
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        self.record(Call::Remove(id.to_string()), Op::Remove)
    }
}

#[async_trait]
impl<R: Resource> ReorderApi for FakeApi<R> {
    async fn reorder(&self, assignments: &[OrderAssignment]) -> Result<(), ApiError> {
        self.record(Call::Reorder(assignments.to_vec()), Op::Reorder)
    }
}

/// Serves canned bytes per URL.
#[derive(Default)]
pub struct FakeAssets {
    assets: HashMap<String, Vec<u8>>,
}

impl FakeAssets {
    pub fn with(url: &str, bytes: &[u8]) -> Self {
        let mut assets = HashMap::new();
        assets.insert(url.to_string(), bytes.to_vec());
        Self { assets }
    }
}

#[async_trait]
impl AssetFetcher for FakeAssets {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        self.assets.get(url).cloned().ok_or_else(|| ApiError::Status {
            status: 404,
            body: format!("no asset at {url}"),
        })
    }
}

pub fn notifier() -> (Arc<RecordingNotifier>, Arc<dyn Notifier>) {
    let recording = Arc::new(RecordingNotifier::new());
    let shared: Arc<dyn Notifier> = recording.clone();
    (recording, shared)
}

// ---- fixtures ----

pub fn event(id: &str, title: &str, event_type: EventType) -> PhotoEvent {
    PhotoEvent {
        id: id.to_string(),
        title: title.to_string(),
        date: "2024-04-12T00:00:00.000Z".to_string(),
        event_type,
        images: Vec::new(),
        qr_code: Some(format!("https://cdn.example.com/qr/{id}.png")),
        permalink: Some(title.to_lowercase().replace(' ', "-")),
        created_at: None,
        updated_at: None,
    }
}

pub fn press(id: &str, title: &str, source: &str) -> PressRelease {
    PressRelease {
        id: id.to_string(),
        title: title.to_string(),
        date: "2024-06-01".to_string(),
        content: "<p>Body</p>".to_string(),
        source: source.to_string(),
        author: "Desk".to_string(),
        tags: Vec::new(),
        link: String::new(),
        thumbnail_url: None,
        is_active: true,
    }
}

pub fn slider(id: &str, order: i64) -> SliderItem {
    SliderItem {
        id: id.to_string(),
        title: format!("Slide {id}"),
        subtitle: String::new(),
        order,
        is_active: true,
        image_url: format!("/uploads/{id}.jpg"),
        link: None,
    }
}

pub fn orders(items: &[SliderItem]) -> Vec<(&str, i64)> {
    items.iter().map(|s| (s.id.as_str(), s.order)).collect()
}
