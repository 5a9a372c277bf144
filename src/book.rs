//! ClientBook - the application context.
//!
//! Owns the store handle, the form state and the view, and runs every user
//! operation against them. Each operation completes (or fails) before it
//! returns, so a list refresh always follows the transaction it reflects.

use tracing::{debug, error, warn};

use crate::config::BookConfig;
use crate::error::ClientError;
use crate::form::{ClientForm, FieldEvent, FieldStatus};
use crate::reconcile::{reconcile, Candidate};
use crate::record::RecordId;
use crate::store::{
    client_schema, ClientStore, InMemoryClientStore, StoreError, TransactionExt, WriteOp,
};
use crate::validate::FieldName;
use crate::view::{ClientRow, ClientView, Notice, RowAction};

/// What a successful save did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted(RecordId),
    Updated(RecordId),
}

pub struct ClientBook<S, V> {
    store: Result<S, StoreError>,
    form: ClientForm,
    view: V,
    config: BookConfig,
}

impl<V: ClientView> ClientBook<InMemoryClientStore, V> {
    /// Open the configured in-memory store with the standard schema.
    pub fn open(config: BookConfig, view: V) -> Self {
        let store = InMemoryClientStore::open(&config.store, client_schema);
        Self::new(store, view, config)
    }
}

impl<S: ClientStore, V: ClientView> ClientBook<S, V> {
    /// Build the book around an opened (or failed) store.
    ///
    /// A failed store is reported once; afterwards every store-backed
    /// operation returns [`ClientError::StoreUnavailable`] without effect.
    pub fn new(store: Result<S, StoreError>, view: V, config: BookConfig) -> Self {
        let mut book = Self {
            store,
            form: ClientForm::new(),
            view,
            config,
        };

        match book.store.as_ref().err().cloned() {
            None => {
                // A read failure has already been surfaced by refresh.
                let _ = book.refresh();
            }
            Some(err) => {
                error!(error = %err, "could not open client store");
                book.view.notify(Notice::error("Could not open the client store"));
            }
        }
        book.sync_submit();
        book
    }

    pub fn form(&self) -> &ClientForm {
        &self.form
    }

    /// Direct access to the form, e.g. to restore an edit state read back
    /// from the page. Call [`sync_submit`](Self::sync_submit) afterwards if
    /// field values changed.
    pub fn form_mut(&mut self) -> &mut ClientForm {
        &mut self.form
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    pub fn store(&self) -> Result<&S, ClientError> {
        self.store
            .as_ref()
            .map_err(|err| ClientError::StoreUnavailable(err.clone()))
    }

    /// Push the current submit gate to the view.
    pub fn sync_submit(&mut self) {
        self.view.set_submit_enabled(self.form.is_submittable());
    }

    /// Typed input on `field`.
    pub fn input(&mut self, field: FieldName, value: impl Into<String>) -> FieldStatus {
        self.field_event(field, FieldEvent::Input(value.into()))
    }

    pub fn paste(&mut self, field: FieldName, value: impl Into<String>) -> FieldStatus {
        self.field_event(field, FieldEvent::Paste(value.into()))
    }

    pub fn blur(&mut self, field: FieldName) -> FieldStatus {
        self.field_event(field, FieldEvent::Blur)
    }

    fn field_event(&mut self, field: FieldName, event: FieldEvent) -> FieldStatus {
        let status = self.form.handle(field, event);
        self.sync_submit();
        status
    }

    /// Re-render the list from the store. Returns the number of rows.
    ///
    /// On failure the previous list stays on screen.
    pub fn refresh(&mut self) -> Result<usize, ClientError> {
        let read = self.store()?.get_all();
        let records = match read {
            Ok(records) => records,
            Err(err) => {
                error!(error = %err, "could not read clients");
                self.view.notify(Notice::error("Could not read clients"));
                return Err(ClientError::ReadFailure(err));
            }
        };

        let rows: Vec<ClientRow> = records.iter().filter_map(ClientRow::from_record).collect();
        self.view.render(&rows);
        Ok(rows.len())
    }

    /// Fill the form from the record stored under `id` and switch to edit
    /// mode. Returns `false` when no such record exists.
    pub fn load_for_edit(&mut self, id: RecordId) -> Result<bool, ClientError> {
        let read = self.store()?.get(id);
        let record = match read {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(%id, "no client to edit");
                return Ok(false);
            }
            Err(err) => {
                error!(%id, error = %err, "could not load client");
                self.view.notify(Notice::error("Could not load the client"));
                return Err(ClientError::ReadFailure(err));
            }
        };

        self.form.load(id, &record);
        self.sync_submit();
        Ok(true)
    }

    /// Save the form: update the record being edited, or add a new one.
    pub fn submit(&mut self) -> Result<SaveOutcome, ClientError> {
        let candidate = Candidate::from_form(&self.form);
        self.submit_candidate(candidate)
    }

    /// Save `candidate` according to the form's edit state.
    ///
    /// Invalid fields and key problems abort before the store is contacted. A rejected
    /// transaction leaves the form as it was so the user can correct it.
    pub fn submit_candidate(&mut self, candidate: Candidate) -> Result<SaveOutcome, ClientError> {
        self.store()?;

        let op = match reconcile(candidate, self.form.edit_state()) {
            Ok(op) => op,
            Err(err) => {
                warn!(error = %err, "save cancelled");
                if let ClientError::InvalidForm { fields } = &err {
                    for field in fields {
                        self.form.handle(*field, FieldEvent::Blur);
                    }
                }
                let message = match err {
                    ClientError::InvalidForm { .. } => "Please correct the highlighted fields.",
                    ClientError::InvalidEditKey { .. } => "Invalid edit id. Operation cancelled.",
                    _ => "Invalid client key. Operation cancelled.",
                };
                self.view.notify(Notice::error(message));
                return Err(err);
            }
        };
        let inserting = matches!(op, WriteOp::Insert { .. });

        let committed = self.store()?.transaction().push(op).commit();
        let receipt = match committed {
            Ok(receipt) => receipt,
            Err(err) => {
                error!(error = %err, "could not save client");
                let action = if inserting { "add" } else { "update" };
                self.view
                    .notify(Notice::error(format!("Could not {} the client: {}", action, err)));
                return Err(ClientError::TransactionFailure(err));
            }
        };

        let outcome = match (receipt.inserted.first(), receipt.updated.first()) {
            (Some(id), _) => SaveOutcome::Inserted(*id),
            (_, Some(id)) => SaveOutcome::Updated(*id),
            _ => {
                return Err(ClientError::TransactionFailure(StoreError::Storage(
                    "commit wrote nothing".into(),
                )))
            }
        };

        if let SaveOutcome::Inserted(_) = outcome {
            self.view.notify(Notice::success(
                "Client added",
                self.config.notice_clear_after(),
            ));
        }
        // A read failure here is already reported; the save itself stands.
        let _ = self.refresh();
        self.form.reset();
        self.view.set_submit_enabled(false);
        Ok(outcome)
    }

    /// Delete the record stored under `id`, then re-render.
    pub fn delete_record(&mut self, id: RecordId) -> Result<(), ClientError> {
        let committed = self.store()?.transaction().delete(id).commit();
        if let Err(err) = committed {
            error!(%id, error = %err, "could not delete client");
            self.view
                .notify(Notice::error(format!("Could not delete the client: {}", err)));
            return Err(ClientError::TransactionFailure(err));
        }

        let _ = self.refresh();
        Ok(())
    }

    /// Route a row trigger.
    pub fn dispatch(&mut self, action: RowAction) -> Result<(), ClientError> {
        match action {
            RowAction::Edit(id) => self.load_for_edit(id).map(|_| ()),
            RowAction::Delete(id) => self.delete_record(id),
        }
    }
}
