//! Record Board for BoardVault.
//!
//! Mirrors a collection from a [`RecordStore`], derives the visible page from
//! the active filter and search text, owns the add/edit modal and the toast,
//! and mediates every write back to the store.
//!
//! The mirror is never edited locally: writes go to the store, the store
//! pushes a new full snapshot, and the board replaces its list with it.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::managers::record_view;
use crate::services::clipboard::Clipboard;
use crate::services::toaster::{self, Toast, ToastKind, Toaster};
use crate::store::{CollectionPath, RecordStore, Snapshot, Subscription};
use crate::types::errors::{BoardError, StoreError, ValidationError};
use crate::types::record::{FilterTag, NewRecord, Page, Record, RecordForm, RecordPatch};
use crate::types::settings::BoardSettings;

/// Prompt shown before a record is removed for good.
pub const DELETE_PROMPT: &str = "Delete permanently?";

/// Add/edit modal state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModalState {
    pub open: bool,
    /// `Some` while editing an existing record, `None` when adding.
    pub edit_id: Option<String>,
    pub form: RecordForm,
}

/// Result of a paste-from-clipboard request. Only `Updated` wrote anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasteOutcome {
    Updated,
    NoValidLink,
    ClipboardUnavailable,
}

/// Milliseconds since the UNIX epoch.
fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Checks the required fields of a form. Description is optional.
pub fn validate_form(form: &RecordForm) -> Result<(), ValidationError> {
    if form.title.trim().is_empty() {
        return Err(ValidationError::MissingField("title"));
    }
    if form.category.trim().is_empty() {
        return Err(ValidationError::MissingField("category"));
    }
    if form.url.trim().is_empty() {
        return Err(ValidationError::MissingField("url"));
    }
    if !is_url_shaped(form.url.trim()) {
        return Err(ValidationError::InvalidUrl(form.url.clone()));
    }
    Ok(())
}

/// `scheme://rest` where the scheme starts with a letter.
fn is_url_shaped(url: &str) -> bool {
    match url.split_once("://") {
        Some((scheme, rest)) => {
            !rest.is_empty()
                && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// The single board component.
pub struct RecordBoard<S, C> {
    store: Arc<S>,
    clipboard: Arc<C>,
    collection: CollectionPath,
    page_size: usize,
    records: Snapshot,
    subscription: Option<Subscription>,
    filter: FilterTag,
    search: String,
    page: usize,
    modal: ModalState,
    toaster: Toaster,
}

impl<S: RecordStore, C: Clipboard> RecordBoard<S, C> {
    /// Creates a detached board for the workspace named in `settings`.
    pub fn new(store: Arc<S>, clipboard: Arc<C>, settings: &BoardSettings) -> Self {
        Self {
            store,
            clipboard,
            collection: CollectionPath::notes(&settings.workspace_id),
            page_size: settings.page_size.max(1),
            records: Snapshot::default(),
            subscription: None,
            filter: FilterTag::All,
            search: String::new(),
            page: 1,
            modal: ModalState::default(),
            toaster: Toaster::new(Duration::from_millis(settings.toast_duration_ms)),
        }
    }

    // ─── Snapshot sync ───

    /// Subscribes to the collection and loads its current snapshot.
    pub fn attach(&mut self) -> Result<(), StoreError> {
        let mut subscription = self.store.subscribe(&self.collection)?;
        let snapshot = subscription.latest();
        info!(collection = %self.collection, records = snapshot.len(), "board attached");
        self.records = snapshot;
        self.subscription = Some(subscription);
        Ok(())
    }

    /// Drops the subscription and empties the mirror.
    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            info!(collection = %self.collection, "board detached");
        }
        self.records = Snapshot::default();
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Replaces the whole mirror. No merging.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.records = snapshot;
    }

    /// Applies a pushed snapshot if one is pending. Returns whether it did.
    pub fn refresh(&mut self) -> bool {
        let pending = self.subscription.as_mut().and_then(Subscription::take_changed);
        match pending {
            Some(snapshot) => {
                self.apply_snapshot(snapshot);
                true
            }
            None => false,
        }
    }

    /// Waits for the next push and applies it. Returns `false` when detached
    /// or when the store went away.
    pub async fn wait_for_snapshot(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };
        match subscription.changed().await {
            Some(snapshot) => {
                self.apply_snapshot(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    // ─── Filter, search, pagination ───

    pub fn filter(&self) -> &FilterTag {
        &self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Switches the sidebar view. Changing it sends the table back to page 1.
    pub fn set_filter(&mut self, filter: FilterTag) {
        if self.filter != filter {
            self.filter = filter;
            self.page = 1;
        }
    }

    /// Changes the search text. Changing it sends the table back to page 1.
    pub fn set_search(&mut self, search: &str) {
        if self.search != search {
            self.search = search.to_string();
            self.page = 1;
        }
    }

    /// Records matching the current filter and search, all pages.
    pub fn visible(&self) -> Vec<Record> {
        record_view::list(&self.records, &self.filter, &self.search)
    }

    /// The current page. The page number is not re-clamped when the list
    /// shrinks, so it may come back empty after an archive or delete.
    pub fn view(&self) -> Page {
        record_view::paginate(self.visible(), self.page_size, self.page)
    }

    pub fn total_pages(&self) -> usize {
        record_view::total_pages(self.visible().len(), self.page_size)
    }

    pub fn categories(&self) -> Vec<String> {
        record_view::categories(&self.records)
    }

    /// Jumps to a numbered page in `1..=total_pages`.
    pub fn go_to_page(&mut self, page: usize) -> Result<(), BoardError> {
        if page == 0 || page > self.total_pages() {
            return Err(BoardError::PageOutOfRange(page));
        }
        self.page = page;
        Ok(())
    }

    /// Moves forward one page unless already on the last one.
    pub fn next_page(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Moves back one page unless already on the first one.
    pub fn previous_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    // ─── Modal ───

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    /// Opens an empty form for a new record.
    pub fn open_new(&mut self) {
        self.modal = ModalState {
            open: true,
            edit_id: None,
            form: RecordForm::default(),
        };
    }

    /// Opens the form pre-filled from an existing record.
    pub fn open_edit(&mut self, id: &str) -> Result<(), BoardError> {
        let record = self
            .record(id)
            .ok_or_else(|| BoardError::RecordNotFound(id.to_string()))?;
        self.modal = ModalState {
            open: true,
            edit_id: Some(record.id.clone()),
            form: RecordForm::from(record),
        };
        Ok(())
    }

    pub fn update_form(&mut self, form: RecordForm) {
        self.modal.form = form;
    }

    /// Closes the modal and clears the form and edit target.
    pub fn close_modal(&mut self) {
        self.modal = ModalState::default();
    }

    // ─── Writes ───

    /// Creates a record, or merges `form` into record `edit_id`.
    ///
    /// Editing leaves `archived` and `created_at` alone. On success the modal
    /// is closed and the record id is returned.
    pub async fn save(&mut self, form: &RecordForm, edit_id: Option<&str>) -> Result<String, BoardError> {
        validate_form(form)?;
        let now = now_millis();

        let result = match edit_id {
            Some(id) => {
                let patch = RecordPatch {
                    title: Some(form.title.clone()),
                    url: Some(form.url.clone()),
                    description: Some(form.description.clone()),
                    category: Some(form.category.clone()),
                    archived: None,
                    updated_at: Some(now),
                };
                self.store
                    .update(&self.collection.doc(id), patch)
                    .await
                    .map(|_| id.to_string())
            }
            None => {
                let record = NewRecord {
                    title: form.title.clone(),
                    url: form.url.clone(),
                    description: form.description.clone(),
                    category: form.category.clone(),
                    archived: false,
                    created_at: now,
                    updated_at: now,
                };
                self.store.create(&self.collection, record).await
            }
        };

        match result {
            Ok(id) => {
                debug!(id = %id, edited = edit_id.is_some(), "record saved");
                self.refresh();
                self.close_modal();
                Ok(id)
            }
            Err(e) => {
                error!(error = %e, "failed to save record");
                Err(e.into())
            }
        }
    }

    /// Saves whatever the modal currently holds.
    pub async fn submit(&mut self) -> Result<String, BoardError> {
        let form = self.modal.form.clone();
        let edit_id = self.modal.edit_id.clone();
        self.save(&form, edit_id.as_deref()).await
    }

    /// Moves a record to or from the trash. Touches no other field.
    pub async fn archive(&mut self, id: &str, archived: bool) -> Result<(), BoardError> {
        let patch = RecordPatch {
            archived: Some(archived),
            ..RecordPatch::default()
        };
        self.store
            .update(&self.collection.doc(id), patch)
            .await
            .inspect_err(|e| error!(id, error = %e, "failed to change archive state"))?;
        self.refresh();
        Ok(())
    }

    /// Permanently removes an archived record once `confirm` agrees.
    ///
    /// Returns `Ok(false)` when the prompt was declined.
    pub async fn delete<F>(&mut self, id: &str, confirm: F) -> Result<bool, BoardError>
    where
        F: FnOnce(&str) -> bool,
    {
        let record = self
            .record(id)
            .ok_or_else(|| BoardError::RecordNotFound(id.to_string()))?;
        if !record.archived {
            return Err(BoardError::NotArchived(id.to_string()));
        }
        if !confirm(DELETE_PROMPT) {
            debug!(id, "delete declined");
            return Ok(false);
        }

        self.store
            .delete(&self.collection.doc(id))
            .await
            .inspect_err(|e| error!(id, error = %e, "failed to delete record"))?;
        info!(id, "record deleted");
        self.refresh();
        Ok(true)
    }

    /// Replaces a record's url with the clipboard text when it looks like a link.
    ///
    /// Rejections and clipboard failures are reported through the toast and
    /// are not errors. A failed store write shows the error toast and is
    /// also returned.
    pub async fn paste_url_from_clipboard(&mut self, id: &str) -> Result<PasteOutcome, BoardError> {
        let text = match self.clipboard.read_text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "clipboard read failed");
                self.toaster.show(toaster::CLIPBOARD_ERROR, ToastKind::Error);
                return Ok(PasteOutcome::ClipboardUnavailable);
            }
        };

        let url = match text {
            Some(t) if t.starts_with("http") => t,
            _ => {
                self.toaster.show(toaster::NO_VALID_LINK, ToastKind::Error);
                return Ok(PasteOutcome::NoValidLink);
            }
        };

        let patch = RecordPatch {
            url: Some(url),
            updated_at: Some(now_millis()),
            ..RecordPatch::default()
        };
        if let Err(e) = self.store.update(&self.collection.doc(id), patch).await {
            error!(id, error = %e, "failed to update url from clipboard");
            self.toaster.show(toaster::CLIPBOARD_ERROR, ToastKind::Error);
            return Err(e.into());
        }
        self.refresh();
        self.toaster.show(toaster::LINK_UPDATED, ToastKind::Info);
        Ok(PasteOutcome::Updated)
    }

    // ─── Toast ───

    pub fn toast(&self) -> Option<&Toast> {
        self.toaster.current()
    }

    pub fn dismiss_toast(&mut self) {
        self.toaster.dismiss();
    }
}
