//! User actions: copy, export, print, edit preview, add new.
//!
//! Actions work only on records already in the session cache; none of them
//! fetches. Each returns an [`ActionFeedback`] to show inline next to the
//! control that triggered it, so a missing platform capability never fails
//! the page.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use complab_core::{Capability, Category, Error, MaterialRecord, Result};
use complab_render::Fragment;

use crate::catalog::Catalog;
use crate::detail::DetailPage;

/// File name used when exporting the whole cache.
pub const EXPORT_ALL_FILE: &str = "all_materials.json";

/// Platform primitives the actions depend on.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Put `text` on the clipboard.
    async fn write_clipboard(&self, text: &str) -> Result<()>;

    /// Offer `contents` to the user as a downloadable file.
    async fn save_file(&self, file_name: &str, contents: &str) -> Result<()>;

    /// Print a rendered document.
    async fn print(&self, title: &str, document: &Fragment) -> Result<()>;
}

/// Platform that saves downloads into a directory.
///
/// Clipboard and print are not available; without a directory, neither is
/// file save.
#[derive(Debug, Clone, Default)]
pub struct FsPlatform {
    download_dir: Option<PathBuf>,
}

impl FsPlatform {
    /// Save downloads into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: Some(dir.into()),
        }
    }

    /// Use the catalog's configured download directory, if any.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            download_dir: catalog.config().download_dir.clone(),
        }
    }
}

#[async_trait]
impl Platform for FsPlatform {
    async fn write_clipboard(&self, _text: &str) -> Result<()> {
        Err(Error::capability(Capability::Clipboard, "no clipboard on this platform"))
    }

    async fn save_file(&self, file_name: &str, contents: &str) -> Result<()> {
        let Some(dir) = &self.download_dir else {
            return Err(Error::capability(
                Capability::FileSave,
                "no download directory configured",
            ));
        };
        if Path::new(file_name).file_name() != Some(OsStr::new(file_name)) {
            return Err(Error::capability(
                Capability::FileSave,
                format!("refusing file name outside the download directory: {file_name}"),
            ));
        }
        let path = dir.join(file_name);
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| Error::capability(Capability::FileSave, e))?;
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| Error::capability(Capability::FileSave, format!("{}: {e}", path.display())))?;
        log::info!("Saved {}", path.display());
        Ok(())
    }

    async fn print(&self, _title: &str, _document: &Fragment) -> Result<()> {
        Err(Error::capability(Capability::Print, "no print facility on this platform"))
    }
}

/// Inline message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFeedback {
    /// Whether the action succeeded
    pub ok: bool,
    /// Message for the user
    pub message: String,
    /// Extra content to show, such as an edit preview
    pub preview: Option<String>,
}

impl ActionFeedback {
    /// Successful action.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            preview: None,
        }
    }

    /// Failed action.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            preview: None,
        }
    }

    fn from_error(action: &str, error: &Error) -> Self {
        log::warn!("{action} failed: {error}");
        Self::failure(error.user_message())
    }

    fn with_preview(mut self, preview: String) -> Self {
        self.preview = Some(preview);
        self
    }
}

impl Catalog {
    fn cached(&self, id: &str) -> Result<std::sync::Arc<MaterialRecord>> {
        self.cache().get(id).ok_or_else(|| Error::record_not_found(id))
    }

    /// Copy a record's generated code to the clipboard.
    pub async fn copy_code(&self, platform: &dyn Platform, id: &str) -> ActionFeedback {
        let record = match self.cached(id) {
            Ok(record) => record,
            Err(e) => return ActionFeedback::from_error("copy", &e),
        };
        let Some(template) = record.code_template() else {
            return ActionFeedback::failure(format!("{} has no ABAQUS code to copy.", record.name));
        };
        match platform.write_clipboard(template).await {
            Ok(()) => ActionFeedback::success("✓ Copied!"),
            Err(e) => ActionFeedback::from_error("copy", &e),
        }
    }

    /// Save one record as `<id>.json`.
    pub async fn export_record(&self, platform: &dyn Platform, id: &str) -> ActionFeedback {
        let outcome: Result<()> = async {
            let record = self.cached(id)?;
            let json = record.to_json_pretty()?;
            platform.save_file(&format!("{id}.json"), &json).await
        }
        .await;
        match outcome {
            Ok(()) => ActionFeedback::success("✓ Exported!"),
            Err(e) => ActionFeedback::from_error("export", &e),
        }
    }

    /// Save every cached record as one document keyed by identifier.
    pub async fn export_all(&self, platform: &dyn Platform) -> ActionFeedback {
        let snapshot = self.cache().snapshot();
        let count = snapshot.len();
        let outcome: Result<()> = async {
            let by_id: BTreeMap<&str, &MaterialRecord> = snapshot
                .iter()
                .map(|(id, record)| (id.as_str(), record.as_ref()))
                .collect();
            let json = serde_json::to_string_pretty(&by_id)?;
            platform.save_file(EXPORT_ALL_FILE, &json).await
        }
        .await;
        match outcome {
            Ok(()) => ActionFeedback::success(format!("✓ Exported {count} materials!")),
            Err(e) => ActionFeedback::from_error("export all", &e),
        }
    }

    /// Print a populated detail page.
    pub async fn print(&self, platform: &dyn Platform, page: &DetailPage) -> ActionFeedback {
        if !page.is_populated() {
            return ActionFeedback::failure("There is no datasheet to print.");
        }
        match platform.print(&page.title, &page.body).await {
            Ok(()) => ActionFeedback::success("Sent to printer."),
            Err(e) => ActionFeedback::from_error("print", &e),
        }
    }

    /// Preview a record's data for editing. Nothing is changed.
    pub fn edit_preview(&self, id: &str) -> ActionFeedback {
        let outcome = self
            .cached(id)
            .and_then(|record| Ok((record.name.clone(), record.to_json_pretty()?)));
        match outcome {
            Ok((name, json)) => {
                ActionFeedback::success(format!("Editing {name}. Changes are not saved."))
                    .with_preview(json)
            }
            Err(e) => ActionFeedback::from_error("edit", &e),
        }
    }

    /// Acknowledge a request to add a material. Nothing is created.
    pub fn add_new(&self, category: Category, name: &str) -> ActionFeedback {
        let name = name.trim();
        if name.is_empty() {
            return ActionFeedback::failure("A material name is required.");
        }
        log::info!("Add-new requested for {category} material '{name}'");
        ActionFeedback::success(format!(
            "Adding \"{name}\" to {} is not available yet.",
            category.heading()
        ))
    }
}
