//! Menu Editor
//!
//! Owns the in-memory menu for one admin session and is its only writer.
//! Every mutation is built on a working copy, written back in full with the
//! SHA from the last read, and only then committed to memory.

use std::cell::{Cell, RefCell};
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{Item, ItemId, MenuDocument};
use crate::error::{MenuError, MenuResult};
use crate::render::{project, MenuView};
use crate::repository::{ContentApi, MenuRepository};

/// Called with the new document after every load and committed change
pub type ChangeListener = Box<dyn Fn(&MenuDocument)>;

/// Image file picked in the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Raw admin form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub section: String,
    pub image: Option<ImageUpload>,
}

impl MenuForm {
    /// Form pre-filled from an existing item
    pub fn from_item(item: &Item, section: &str) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            // Shortest text that parses back to the same value
            price: item.price.to_string(),
            section: section.to_string(),
            image: None,
        }
    }

    fn validate(self) -> MenuResult<ValidForm> {
        let name = self.name.trim().to_string();
        let description = self.description.trim().to_string();
        let section = self.section.trim().to_string();
        if name.is_empty() {
            return Err(MenuError::Validation("Name is required.".into()));
        }
        if description.is_empty() {
            return Err(MenuError::Validation("Description is required.".into()));
        }
        if section.is_empty() {
            return Err(MenuError::Validation("Section is required.".into()));
        }
        let price = self
            .price
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| MenuError::Validation(format!("Price \"{}\" is not a number.", self.price.trim())))?;

        if let Some(image) = &self.image {
            if image.bytes.is_empty() {
                return Err(MenuError::Validation("The selected image is empty.".into()));
            }
            let is_image = mime_guess::from_path(&image.file_name)
                .first()
                .map_or(false, |m| m.type_() == mime_guess::mime::IMAGE);
            if !is_image {
                return Err(MenuError::Validation(format!("{} is not an image.", image.file_name)));
            }
        }

        Ok(ValidForm { name, description, price, section, image: self.image })
    }
}

struct ValidForm {
    name: String,
    description: String,
    price: f64,
    section: String,
    image: Option<ImageUpload>,
}

/// Non-fatal problems reported alongside a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The item was saved with its previous (or the placeholder) image
    ImageUploadFailed(String),
    /// The menu change stands; the old image file is still in the repository
    ImageDeleteFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub item: Item,
    pub created: bool,
    pub warnings: Vec<Warning>,
}

/// Confirmation token: only `request_delete` hands these out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    id: ItemId,
    name: String,
}

impl PendingDelete {
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOutcome {
    pub removed: Item,
    pub section_removed: bool,
    pub warnings: Vec<Warning>,
}

#[derive(Default)]
struct EditorState {
    document: MenuDocument,
    /// SHA of the last read or write; None until the first load
    sha: Option<String>,
    editing: Option<ItemId>,
}

/// Clears the in-flight flag when the operation ends, however it ends
struct FlightGuard<'a>(&'a Cell<bool>);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct MenuEditor<A: ContentApi> {
    repo: MenuRepository<A>,
    state: RefCell<EditorState>,
    in_flight: Cell<bool>,
    listener: RefCell<Option<ChangeListener>>,
}

impl<A: ContentApi> MenuEditor<A> {
    pub fn new(repo: MenuRepository<A>) -> Self {
        Self {
            repo,
            state: RefCell::new(EditorState::default()),
            in_flight: Cell::new(false),
            listener: RefCell::new(None),
        }
    }

    pub fn repository(&self) -> &MenuRepository<A> {
        &self.repo
    }

    /// Register the rendering collaborator
    pub fn set_listener(&self, listener: ChangeListener) {
        *self.listener.borrow_mut() = Some(listener);
    }

    /// Detach the rendering collaborator; later loads and commits go unseen
    pub fn clear_listener(&self) {
        self.listener.borrow_mut().take();
    }

    pub fn document(&self) -> MenuDocument {
        self.state.borrow().document.clone()
    }

    pub fn view(&self) -> MenuView {
        project(&self.state.borrow().document)
    }

    pub fn is_loaded(&self) -> bool {
        self.state.borrow().sha.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    pub fn editing(&self) -> Option<ItemId> {
        self.state.borrow().editing.clone()
    }

    fn begin_flight(&self) -> MenuResult<FlightGuard<'_>> {
        if self.in_flight.replace(true) {
            return Err(MenuError::Busy);
        }
        Ok(FlightGuard(&self.in_flight))
    }

    fn notify(&self) {
        let document = self.document();
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener(&document);
        }
    }

    fn loaded_sha(&self) -> MenuResult<String> {
        self.state
            .borrow()
            .sha
            .clone()
            .ok_or_else(|| MenuError::NotFound("menu has not been loaded yet".into()))
    }

    fn commit(&self, document: MenuDocument, sha: String) {
        {
            let mut state = self.state.borrow_mut();
            state.document = document;
            state.sha = Some(sha);
        }
        self.notify();
    }

    /// Fetch the menu and replace the in-memory document. On failure the
    /// current document is kept.
    pub async fn load(&self) -> MenuResult<()> {
        let _guard = self.begin_flight()?;
        let handle = self.repo.fetch_document().await?;
        let document = MenuDocument::from_json(&handle.content)?;
        log::info!(
            "loaded menu: {} sections, {} items",
            document.sections.len(),
            document.item_count()
        );
        // An edit whose target is gone stays set; `submit` reports it
        self.commit(document, handle.sha);
        Ok(())
    }

    /// Switch the form to update mode for `id`; returns the pre-filled form
    pub fn begin_edit(&self, id: &ItemId) -> MenuResult<MenuForm> {
        let mut state = self.state.borrow_mut();
        let (si, ii) = state
            .document
            .locate(id)
            .ok_or_else(|| MenuError::NotFound(format!("item {}", id)))?;
        let section = &state.document.sections[si];
        let form = MenuForm::from_item(&section.items[ii], &section.name);
        state.editing = Some(id.clone());
        Ok(form)
    }

    pub fn cancel_edit(&self) {
        self.state.borrow_mut().editing = None;
    }

    /// Validate, upload the image if any, apply and persist.
    pub async fn submit(&self, form: MenuForm) -> MenuResult<SubmitOutcome> {
        let form = form.validate()?;
        let _guard = self.begin_flight()?;
        let sha = self.loaded_sha()?;

        let target = {
            let state = self.state.borrow();
            state
                .editing
                .clone()
                .map(|id| (state.document.find(&id).cloned(), id))
        };
        let (editing, previous) = match target {
            Some((Some(previous), id)) => (Some(id), Some(previous)),
            Some((None, id)) => {
                self.state.borrow_mut().editing = None;
                return Err(MenuError::NotFound(format!("item {} is no longer on the menu", id)));
            }
            None => (None, None),
        };

        let fallback_image = previous
            .as_ref()
            .map(|item| item.image.clone())
            .unwrap_or_else(|| self.repo.config().placeholder_image.clone());

        let mut warnings = Vec::new();
        let mut uploaded_path = None;
        let image = match form.image {
            Some(upload) => {
                let name = asset_name(&upload.file_name, chrono::Utc::now().timestamp_millis());
                match self.repo.upload_asset(&upload.bytes, &name).await {
                    Ok(url) => {
                        uploaded_path = Some(self.repo.config().asset_path(&name));
                        url
                    }
                    Err(e) => {
                        log::warn!("image upload failed, keeping {}: {}", fallback_image, e);
                        warnings.push(Warning::ImageUploadFailed(e.to_string()));
                        fallback_image
                    }
                }
            }
            None => fallback_image,
        };

        let mut working = self.document();
        let (item, message) = match editing {
            Some(id) => {
                let item = Item {
                    id: id.clone(),
                    name: form.name,
                    description: form.description,
                    price: form.price,
                    image,
                };
                let (si, _) = working
                    .locate(&id)
                    .ok_or_else(|| MenuError::NotFound(format!("item {}", id)))?;
                if working.sections[si].name == form.section {
                    working.replace(&id, item.clone());
                } else {
                    working.remove(&id);
                    working.append(&form.section, item.clone());
                }
                let message = format!("Update menu item: {}", item.name);
                (item, message)
            }
            None => {
                let item = Item::new(form.name, form.description, form.price, image);
                working.append(&form.section, item.clone());
                let message = format!("Add menu item: {}", item.name);
                (item, message)
            }
        };

        let json = working.to_json()?;
        let new_sha = match self.repo.update_document(&json, &message, &sha).await {
            Ok(new_sha) => new_sha,
            Err(e) => {
                if let Some(path) = uploaded_path {
                    log::warn!("orphaned asset {}: menu write failed: {}", path, e);
                }
                return Err(e);
            }
        };

        let created = previous.is_none();
        self.state.borrow_mut().editing = None;
        self.commit(working, new_sha);
        Ok(SubmitOutcome { item, created, warnings })
    }

    /// First half of a delete: hands out the token the confirmation step
    /// must give back
    pub fn request_delete(&self, id: &ItemId) -> MenuResult<PendingDelete> {
        let state = self.state.borrow();
        let item = state
            .document
            .find(id)
            .ok_or_else(|| MenuError::NotFound(format!("item {}", id)))?;
        Ok(PendingDelete { id: id.clone(), name: item.name.clone() })
    }

    /// Remove the item, drop its section if emptied, persist, then
    /// optionally delete the old image (best effort).
    pub async fn confirm_delete(&self, pending: PendingDelete, remove_image: bool) -> MenuResult<DeleteOutcome> {
        let _guard = self.begin_flight()?;
        let sha = self.loaded_sha()?;

        let mut working = self.document();
        let sections_before = working.sections.len();
        let removed = working
            .remove(&pending.id)
            .ok_or_else(|| MenuError::NotFound(format!("item {} is no longer on the menu", pending.id)))?;
        let section_removed = working.sections.len() < sections_before;

        let json = working.to_json()?;
        let message = format!("Delete menu item: {}", removed.name);
        let new_sha = self.repo.update_document(&json, &message, &sha).await?;

        {
            let mut state = self.state.borrow_mut();
            if state.editing.as_ref() == Some(&pending.id) {
                state.editing = None;
            }
        }
        let still_used = working
            .sections
            .iter()
            .flat_map(|s| s.items.iter())
            .any(|item| item.image == removed.image);
        self.commit(working, new_sha);

        let mut warnings = Vec::new();
        if remove_image && !still_used {
            if let Some(path) = self.repo.config().owned_asset_path(&removed.image) {
                let message = format!("Delete image for {}", removed.name);
                if let Err(e) = self.repo.delete_asset(&path, &message).await {
                    log::warn!("could not delete image {}: {}", path, e);
                    warnings.push(Warning::ImageDeleteFailed(e.to_string()));
                }
            }
        }

        Ok(DeleteOutcome { removed, section_removed, warnings })
    }
}

/// `<millis>-<file name>` with anything outside `[A-Za-z0-9._-]` collapsed
pub fn asset_name(file_name: &str, millis: i64) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let unsafe_chars = UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid pattern"));
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let cleaned = unsafe_chars.replace_all(base, "-");
    let cleaned = cleaned.trim_matches('-');
    let cleaned = if cleaned.is_empty() { "image" } else { cleaned };
    format!("{}-{}", millis, cleaned)
}
