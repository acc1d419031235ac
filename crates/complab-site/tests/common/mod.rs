//! Common fixtures for CompositeLab site integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use complab_core::{Capability, Error, MemorySource, Result, SiteConfig};
use complab_render::Fragment;
use complab_site::{Catalog, Platform};

pub const INDEX: &str = "materials/materials-index.json";
pub const T300: &str = "materials/fibers/t300.json";
pub const IM7: &str = "materials/fibers/im7.json";
pub const M8552: &str = "materials/matrices/8552.json";
pub const BROKEN: &str = "materials/matrices/broken.json";

pub const MANIFEST: &str = r#"{"materials": {
    "fibers": [
        {"id": "T300", "file": "materials/fibers/t300.json"},
        {"id": "IM7", "file": "materials/fibers/im7.json"}
    ],
    "matrices": [
        {"id": "8552", "file": "materials/matrices/8552.json"}
    ]
}}"#;

pub const T300_JSON: &str = r#"{
    "id": "T300",
    "name": "T300 Carbon Fiber",
    "type": "Fiber",
    "manufacturer": "Toray",
    "mechanical": {
        "tensile_modulus": {"label": "Tensile Modulus", "value": 230, "unit": "GPa"}
    },
    "abaqus": {"template": "*MATERIAL, NAME=T300\n*ELASTIC\n230000., 0.2"},
    "references": ["Toray T300 datasheet", "MIL-HDBK-17"]
}"#;

pub const IM7_JSON: &str = r#"{
    "id": "IM7",
    "name": "IM7 Carbon Fiber",
    "type": "Fiber",
    "references": []
}"#;

pub const M8552_JSON: &str = r#"{
    "id": "8552",
    "name": "Hexcel 8552",
    "type": "Matrix",
    "cure_kinetics": {
        "activation_energy": {"label": "Activation Energy", "value": 66.5, "unit": "kJ/mol"}
    }
}"#;

/// Source holding the standard three-record catalog.
pub fn standard_source() -> MemorySource {
    MemorySource::new()
        .with_document(INDEX, MANIFEST)
        .with_document(T300, T300_JSON)
        .with_document(IM7, IM7_JSON)
        .with_document(M8552, M8552_JSON)
}

/// Catalog over `source` with default settings.
pub fn catalog(source: MemorySource) -> (Arc<MemorySource>, Catalog) {
    let source = Arc::new(source);
    let catalog = Catalog::new(source.clone(), SiteConfig::default());
    (source, catalog)
}

/// A call the recording platform received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Clipboard(String),
    Save { file_name: String, contents: String },
    Print { title: String },
}

/// Platform that records calls, optionally refusing one capability.
#[derive(Default)]
pub struct RecordingPlatform {
    pub calls: Mutex<Vec<PlatformCall>>,
    pub refuse: Option<Capability>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing(capability: Capability) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            refuse: Some(capability),
        }
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, capability: Capability) -> Result<()> {
        if self.refuse == Some(capability) {
            return Err(Error::capability(capability, "denied by test"));
        }
        Ok(())
    }
}

#[async_trait]
impl Platform for RecordingPlatform {
    async fn write_clipboard(&self, text: &str) -> Result<()> {
        self.check(Capability::Clipboard)?;
        self.calls.lock().unwrap().push(PlatformCall::Clipboard(text.to_string()));
        Ok(())
    }

    async fn save_file(&self, file_name: &str, contents: &str) -> Result<()> {
        self.check(Capability::FileSave)?;
        self.calls.lock().unwrap().push(PlatformCall::Save {
            file_name: file_name.to_string(),
            contents: contents.to_string(),
        });
        Ok(())
    }

    async fn print(&self, title: &str, _document: &Fragment) -> Result<()> {
        self.check(Capability::Print)?;
        self.calls.lock().unwrap().push(PlatformCall::Print {
            title: title.to_string(),
        });
        Ok(())
    }
}
