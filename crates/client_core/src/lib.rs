use shared::domain::{Employee, EmployeeId};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

pub mod error;
pub mod events;
pub mod form;
pub mod roster;
pub mod transport;
pub mod validation;
pub mod view;

pub use error::{ClientError, TransportError};
pub use events::{ClientEvent, UiError, UiErrorCategory, UiErrorContext, UiEvent};
pub use form::{EditSurface, FormDraft, FormMode, OpenForm};
pub use roster::{compute_stats, filter, sort, Roster, RosterStats, SortKey};
pub use transport::{EmployeeApi, HttpEmployeeApi, DEFAULT_REQUEST_TIMEOUT};
pub use validation::{validate, Field, ValidationError};
pub use view::{render, CurrencyFormat, RosterView};

/// Owns the roster and everything derived from it. State sits behind a
/// mutex that is released before every network call, so the view stays
/// readable while a request is in flight.
pub struct RosterClient<A: EmployeeApi> {
    api: A,
    currency: CurrencyFormat,
    inner: Mutex<RosterState>,
    events: broadcast::Sender<ClientEvent>,
}

#[derive(Default)]
struct RosterState {
    roster: Roster,
    query: String,
    sort: Option<SortKey>,
    surface: EditSurface,
    view: RosterView,
    last_error: Option<UiError>,
    /// Covers the write request and the resync that follows it.
    submit_in_flight: bool,
}

impl RosterState {
    fn rerender(&mut self, currency: &CurrencyFormat) {
        let stats = compute_stats(self.roster.as_slice());
        let visible = roster::visible(self.roster.as_slice(), &self.query, self.sort);
        self.view = render(&visible, &stats, currency);
    }

    fn clear_error_for(&mut self, context: UiErrorContext) {
        if self
            .last_error
            .as_ref()
            .is_some_and(|error| error.context() == context)
        {
            self.last_error = None;
        }
    }
}

impl<A: EmployeeApi> RosterClient<A> {
    pub fn new(api: A, currency: CurrencyFormat) -> Self {
        let (events, _) = broadcast::channel(64);
        let mut state = RosterState::default();
        state.rerender(&currency);
        Self {
            api,
            currency,
            inner: Mutex::new(state),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    /// Replaces the roster with the server's current list and re-renders.
    /// On failure the previous roster stays in place.
    pub async fn fetch_all(&self) -> Result<(), ClientError> {
        match self.api.list().await {
            Ok(employees) => {
                let count = employees.len();
                {
                    let mut state = self.inner.lock().await;
                    state.roster.replace(employees);
                    state.rerender(&self.currency);
                    state.clear_error_for(UiErrorContext::Load);
                }
                info!(count, "roster synchronized");
                let _ = self.events.send(ClientEvent::RosterReplaced { count });
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "roster synchronization failed");
                let err = ClientError::from(err);
                self.record_error(UiErrorContext::Load, &err).await;
                Err(err)
            }
        }
    }

    pub async fn search(&self, query: impl Into<String>) -> RosterView {
        let mut state = self.inner.lock().await;
        state.query = query.into();
        state.rerender(&self.currency);
        state.view.clone()
    }

    /// `None` shows the roster in server order.
    pub async fn sort_by(&self, key: Option<SortKey>) -> RosterView {
        let mut state = self.inner.lock().await;
        state.sort = key;
        state.rerender(&self.currency);
        state.view.clone()
    }

    /// Opens the form with an empty draft.
    pub async fn open_create(&self) -> Result<(), ClientError> {
        {
            let mut state = self.inner.lock().await;
            if state.submit_in_flight {
                return Err(ClientError::Busy);
            }
            state.surface.open_create();
        }
        let _ = self.events.send(ClientEvent::SurfaceChanged { open: true });
        Ok(())
    }

    /// Opens the form pre-filled from record `id`. Returns `Ok(false)` and
    /// leaves the surface untouched when the roster has no such record.
    pub async fn open_edit(&self, id: EmployeeId) -> Result<bool, ClientError> {
        {
            let mut state = self.inner.lock().await;
            if state.submit_in_flight {
                return Err(ClientError::Busy);
            }
            let RosterState {
                roster, surface, ..
            } = &mut *state;
            let Some(employee) = roster.find(id) else {
                debug!(%id, "edit requested for an id outside the roster");
                return Ok(false);
            };
            surface.open_edit(employee);
        }
        let _ = self.events.send(ClientEvent::SurfaceChanged { open: true });
        Ok(true)
    }

    pub async fn set_field(&self, field: Field, value: impl Into<String>) -> bool {
        self.inner.lock().await.surface.set_field(field, value)
    }

    /// Discards the draft. Refused while a submission is in flight.
    pub async fn cancel(&self) -> Result<(), ClientError> {
        {
            let mut state = self.inner.lock().await;
            if state.submit_in_flight {
                return Err(ClientError::Busy);
            }
            if !state.surface.is_open() {
                return Ok(());
            }
            state.surface.close();
        }
        let _ = self.events.send(ClientEvent::SurfaceChanged { open: false });
        Ok(())
    }

    /// Validates the open draft against the current roster, then creates or
    /// updates depending on the draft's hidden id. The form closes only once
    /// the server accepted the write; a transport failure keeps the draft.
    /// A refresh failure after an accepted write is `ClientError::Resync`.
    pub async fn submit(&self) -> Result<Employee, ClientError> {
        let draft = {
            let mut state = self.inner.lock().await;
            if state.submit_in_flight {
                warn!("submit refused: previous submission still in flight");
                return Err(ClientError::Busy);
            }
            let RosterState {
                roster, surface, ..
            } = &mut *state;
            let Some(form) = surface.form_mut() else {
                return Err(ClientError::NoOpenForm);
            };
            if let Err(invalid) = validation::validate(&form.draft, roster.as_slice(), form.draft.id)
            {
                debug!(field = %invalid.field, message = invalid.message, "draft rejected");
                form.field_error = Some(invalid.clone());
                form.notice = None;
                return Err(invalid.into());
            }
            form.field_error = None;
            form.notice = None;
            form.submitting = true;
            let draft = form.draft.clone();
            state.submit_in_flight = true;
            draft
        };

        let body = draft.to_body();
        let written = match draft.id {
            Some(id) => self.api.update(id, &body).await,
            None => self.api.create(&body).await,
        };

        let saved = match written {
            Ok(saved) => saved,
            Err(err) => {
                warn!(error = %err, "employee write failed; keeping draft");
                let err = ClientError::from(err);
                let ui_error = UiError::from_client_error(UiErrorContext::Submit, &err);
                {
                    let mut state = self.inner.lock().await;
                    state.submit_in_flight = false;
                    if let Some(form) = state.surface.form_mut() {
                        form.submitting = false;
                        form.notice = Some(ui_error.message().to_string());
                    }
                    state.last_error = Some(ui_error.clone());
                }
                let _ = self.events.send(ClientEvent::Error(ui_error));
                return Err(err);
            }
        };

        info!(id = %saved.id, updated = draft.id.is_some(), "employee saved");
        {
            let mut state = self.inner.lock().await;
            state.surface.close();
            state.clear_error_for(UiErrorContext::Submit);
        }
        let _ = self.events.send(ClientEvent::SurfaceChanged { open: false });

        let resynced = self.fetch_all().await;
        self.inner.lock().await.submit_in_flight = false;
        match resynced {
            Ok(()) => Ok(saved),
            Err(ClientError::Transport(source)) => Err(ClientError::Resync {
                id: saved.id,
                source,
            }),
            Err(other) => Err(other),
        }
    }

    /// Deletes on the server, then resyncs. The id does not have to be in the
    /// roster, and a 404 from the server counts as already deleted.
    pub async fn delete(&self, id: EmployeeId) -> Result<(), ClientError> {
        match self.api.delete(id).await {
            Ok(()) => info!(%id, "employee deleted"),
            Err(err) if err.is_not_found() => {
                debug!(%id, "employee already absent on the server");
            }
            Err(err) => {
                warn!(%id, error = %err, "employee delete failed");
                let err = ClientError::from(err);
                self.record_error(UiErrorContext::Delete, &err).await;
                return Err(err);
            }
        }
        self.fetch_all().await
    }

    /// Looks up a control key from the last render and handles its event.
    pub async fn dispatch(&self, key: &str) -> Result<(), ClientError> {
        let event = self.inner.lock().await.view.bindings.resolve(key).cloned();
        match event {
            Some(event) => self.handle(event).await,
            None => Err(ClientError::UnknownControl(key.to_string())),
        }
    }

    pub async fn handle(&self, event: UiEvent) -> Result<(), ClientError> {
        debug!(event = event.name(), "handling ui event");
        match event {
            UiEvent::Refresh => self.fetch_all().await,
            UiEvent::Search(query) => {
                self.search(query).await;
                Ok(())
            }
            UiEvent::Sort(key) => {
                self.sort_by(key).await;
                Ok(())
            }
            UiEvent::Add => self.open_create().await,
            UiEvent::Edit(id) => self.open_edit(id).await.map(|_| ()),
            UiEvent::Delete(id) => self.delete(id).await,
            UiEvent::SetField(field, value) => {
                if self.set_field(field, value).await {
                    Ok(())
                } else if self.inner.lock().await.submit_in_flight {
                    Err(ClientError::Busy)
                } else {
                    Err(ClientError::NoOpenForm)
                }
            }
            UiEvent::Submit => self.submit().await.map(|_| ()),
            UiEvent::Cancel => self.cancel().await,
        }
    }

    pub async fn view(&self) -> RosterView {
        self.inner.lock().await.view.clone()
    }

    pub async fn stats(&self) -> RosterStats {
        compute_stats(self.inner.lock().await.roster.as_slice())
    }

    pub async fn roster(&self) -> Vec<Employee> {
        self.inner.lock().await.roster.as_slice().to_vec()
    }

    pub async fn surface(&self) -> EditSurface {
        self.inner.lock().await.surface.clone()
    }

    pub async fn last_error(&self) -> Option<UiError> {
        self.inner.lock().await.last_error.clone()
    }

    async fn record_error(&self, context: UiErrorContext, err: &ClientError) {
        let ui_error = UiError::from_client_error(context, err);
        self.inner.lock().await.last_error = Some(ui_error.clone());
        let _ = self.events.send(ClientEvent::Error(ui_error));
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
