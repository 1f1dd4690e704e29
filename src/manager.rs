//! The notes manager: holds what the notes page shows and drives the
//! add / edit / delete workflow against the notes service.
//!
//! The collection view is only ever replaced by a full reload. A mutation
//! never patches it locally; after the service confirms a change the whole
//! list is fetched again. Failures are logged and otherwise leave the state
//! exactly as it was, so an open dialog simply stays open.

use super::{
    client::{ApiRequest, Transport},
    config::COLLECTION,
    models::{is_success, Draft, Note, NoteId},
};
use axum::http::Method;
use serde_json::Value;
use tracing::{debug, error};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditMode {
    Add,
    Edit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open(EditMode),
}

/// What happened to a mutation. This is for callers that want to know; the
/// manager's visible state only changes on `Applied`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The service reported success and the view was reloaded.
    Applied,
    /// The service answered, but without a truthy `success`.
    Rejected,
    /// The request or its response could not be completed.
    Failed,
    /// There was nothing to send.
    Skipped,
}

pub struct NotesManager<T> {
    transport: T,
    view: Value,
    modal: ModalState,
    draft: Option<Draft>,
    delete_open: bool,
    delete_target: Option<NoteId>,
}

fn collection_path() -> String {
    format!("/{COLLECTION}")
}

impl<T: Transport> NotesManager<T> {
    pub fn new(transport: T) -> Self {
        NotesManager {
            transport,
            view: Value::Null,
            modal: ModalState::Closed,
            draft: None,
            delete_open: false,
            delete_target: None,
        }
    }

    /// Fetch the whole collection and make the response the new view. On
    /// failure the previous view stays.
    pub async fn load(&mut self) {
        match self
            .transport
            .send(ApiRequest::new(Method::GET, collection_path()))
            .await
        {
            Ok(view) => self.view = view,
            Err(e) => error!("Error fetching notes: {e}"),
        }
    }

    /// The last list response, as received.
    pub fn view(&self) -> &Value {
        &self.view
    }

    /// Every entry of the view's `data` array, in order.
    pub fn notes(&self) -> Vec<Note> {
        let Some(items) = self.view.get("data").and_then(Value::as_array) else {
            return Vec::new();
        };
        items.iter().cloned().map(Note::from).collect()
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// The form's contents, for the presentation layer to write into. `None`
    /// while the modal is closed.
    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        self.draft.as_mut()
    }

    pub fn is_delete_open(&self) -> bool {
        self.delete_open
    }

    pub fn delete_target(&self) -> Option<&NoteId> {
        self.delete_target.as_ref()
    }

    pub fn open_add(&mut self) {
        self.draft = Some(Draft::default());
        self.modal = ModalState::Open(EditMode::Add);
    }

    /// Seed the form from `note`. The draft is a copy; editing it leaves the
    /// view alone.
    pub fn open_edit(&mut self, note: &Note) {
        self.draft = Some(Draft::from(note));
        self.modal = ModalState::Open(EditMode::Edit);
    }

    pub fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
        self.draft = None;
    }

    /// Send the draft: POST to the collection when the modal was opened for
    /// adding, PATCH to the update path when it was opened for editing.
    pub async fn submit(&mut self) -> MutationOutcome {
        let (ModalState::Open(mode), Some(draft)) = (self.modal, &self.draft)
        else {
            debug!("submit with no open modal");
            return MutationOutcome::Skipped;
        };

        let path = match mode {
            EditMode::Add => collection_path(),
            EditMode::Edit => match &draft.id {
                Some(id) => format!("/{COLLECTION}/update/{id}"),
                None => {
                    error!("edit draft has no id");
                    return MutationOutcome::Failed;
                }
            },
        };
        let method = match mode {
            EditMode::Add => Method::POST,
            EditMode::Edit => Method::PATCH,
        };
        let body = match serde_json::to_value(draft) {
            Ok(body) => body,
            Err(e) => {
                error!("{e}");
                return MutationOutcome::Failed;
            }
        };

        let outcome = self
            .mutate(ApiRequest::new(method, path).with_body(body))
            .await;
        if outcome == MutationOutcome::Applied {
            self.close_modal();
        }
        outcome
    }

    /// Remember which note to delete and ask for confirmation. Nothing is
    /// sent yet.
    pub fn request_delete(&mut self, id: NoteId) {
        self.delete_target = Some(id);
        self.delete_open = true;
    }

    pub fn cancel_delete(&mut self) {
        self.delete_target = None;
        self.delete_open = false;
    }

    pub async fn confirm_delete(&mut self) -> MutationOutcome {
        let Some(id) = &self.delete_target else {
            debug!("delete confirmed with no target");
            return MutationOutcome::Skipped;
        };
        let request =
            ApiRequest::new(Method::DELETE, format!("/{COLLECTION}/delete/{id}"));

        let outcome = self.mutate(request).await;
        if outcome == MutationOutcome::Applied {
            self.cancel_delete();
        }
        outcome
    }

    async fn mutate(&mut self, request: ApiRequest) -> MutationOutcome {
        match self.transport.send(request).await {
            Ok(result) if is_success(&result) => {
                self.load().await;
                MutationOutcome::Applied
            }
            Ok(result) => {
                debug!(?result, "notes service did not report success");
                MutationOutcome::Rejected
            }
            Err(e) => {
                error!("{e}");
                MutationOutcome::Failed
            }
        }
    }
}
