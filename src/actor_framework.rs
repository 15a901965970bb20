use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::domain::ValidationErrors;
use crate::persistence::PersistenceError;

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with hooks)
// =============================================================================

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

impl From<ValidationErrors> for FrameworkError {
    fn from(errors: ValidationErrors) -> Self {
        FrameworkError::Validation(errors)
    }
}

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and creation parameters
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, FrameworkError>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), FrameworkError> {
        Ok(())
    }

    /// Apply a patch. On error the actor discards the partially patched copy,
    /// so implementations do not need to roll back.
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), FrameworkError>;

    fn on_delete(&self) -> Result<(), FrameworkError> {
        Ok(())
    }
}

/// Receives the full ordered entity list after every successful mutation.
pub trait Snapshotter<T>: Send + Sync {
    fn save(&self, items: &[T]) -> Result<(), PersistenceError>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns the authoritative entity list. Entries keep their creation order.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: IndexMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    snapshot: Option<Arc<dyn Snapshotter<T>>>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: IndexMap::new(),
            next_id_fn: Box::new(next_id_fn),
            snapshot: None,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Preloads entries, e.g. from a stored snapshot. A repeated id replaces
    /// the earlier entry so ids stay unique.
    pub fn with_items(mut self, items: impl IntoIterator<Item = T>) -> Self {
        for item in items {
            let id = item.id().clone();
            if self.store.insert(id.clone(), item).is_some() {
                warn!(%id, "Duplicate id in preloaded items, keeping the last entry");
            }
        }
        self
    }

    pub fn with_snapshot(mut self, snapshot: Arc<dyn Snapshotter<T>>) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Serves requests until every client has been dropped.
    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items = self.store.values().cloned().collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
            }
        }
        debug!(items = self.store.len(), "Resource actor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T, FrameworkError> {
        let id = self.fresh_id();
        let mut item = T::from_create_params(id.clone(), params)?;
        item.on_create()?;
        self.store.insert(id, item.clone());
        self.persist();
        Ok(item)
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        let Some(item) = self.store.get_mut(&id) else {
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        let mut updated = item.clone();
        updated.on_update(patch)?;
        *item = updated.clone();
        self.persist();
        Ok(updated)
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        let Some(item) = self.store.get(&id) else {
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        item.on_delete()?;
        self.store.shift_remove(&id);
        self.persist();
        Ok(())
    }

    // The generator is expected to make progress; ids already in use are skipped.
    fn fresh_id(&self) -> T::Id {
        loop {
            let id = (self.next_id_fn)();
            if !self.store.contains_key(&id) {
                return id;
            }
            debug!(%id, "Generated id already in use, drawing another");
        }
    }

    fn persist(&self) {
        if let Some(snapshot) = &self.snapshot {
            let items: Vec<T> = self.store.values().cloned().collect();
            if let Err(e) = snapshot.save(&items) {
                warn!(error = %e, "Failed to persist snapshot");
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Create { params, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::List { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Update { id, patch, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Delete { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u64,
        title: String,
        locked: bool,
    }

    #[derive(Debug)]
    struct NoteCreate {
        title: String,
    }

    #[derive(Debug)]
    struct NotePatch {
        title: Option<String>,
    }

    impl Entity for Note {
        type Id = u64;
        type CreateParams = NoteCreate;
        type Patch = NotePatch;

        fn id(&self) -> &u64 {
            &self.id
        }

        fn from_create_params(id: u64, params: NoteCreate) -> Result<Self, FrameworkError> {
            if params.title.is_empty() {
                let mut errors = ValidationErrors::new();
                errors.add("title", "Title is required");
                return Err(errors.into());
            }
            Ok(Self {
                id,
                title: params.title,
                locked: false,
            })
        }

        fn on_update(&mut self, patch: NotePatch) -> Result<(), FrameworkError> {
            if let Some(title) = patch.title {
                self.title = title;
            }
            Ok(())
        }

        fn on_delete(&self) -> Result<(), FrameworkError> {
            if self.locked {
                let mut errors = ValidationErrors::new();
                errors.add("locked", "Locked notes cannot be deleted");
                return Err(errors.into());
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSnapshot {
        saves: Mutex<Vec<Vec<u64>>>,
    }

    impl Snapshotter<Note> for RecordingSnapshot {
        fn save(&self, items: &[Note]) -> Result<(), PersistenceError> {
            self.saves.lock().push(items.iter().map(|n| n.id).collect());
            Ok(())
        }
    }

    fn counter_from(start: u64) -> impl Fn() -> u64 + Send + Sync + 'static {
        let counter = Arc::new(AtomicU64::new(start));
        move || counter.fetch_add(1, Ordering::SeqCst)
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_resource_actor_crud_keeps_creation_order() {
        let snapshot = Arc::new(RecordingSnapshot::default());
        let (actor, client) = ResourceActor::<Note>::new(10, counter_from(1));
        tokio::spawn(actor.with_snapshot(snapshot.clone()).run());

        let first = client.create(NoteCreate { title: "b".into() }).await.unwrap();
        let second = client.create(NoteCreate { title: "a".into() }).await.unwrap();
        let third = client.create(NoteCreate { title: "c".into() }).await.unwrap();

        let updated = client
            .update(second.id, NotePatch { title: Some("z".into()) })
            .await
            .unwrap();
        assert_eq!(updated.title, "z");

        client.delete(first.id).await.unwrap();
        let ids: Vec<u64> = client.list().await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![second.id, third.id]);

        let saves = snapshot.saves.lock().clone();
        assert_eq!(saves.len(), 5);
        assert_eq!(saves.last().unwrap(), &vec![second.id, third.id]);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found_and_do_not_persist() {
        let snapshot = Arc::new(RecordingSnapshot::default());
        let (actor, client) = ResourceActor::<Note>::new(10, counter_from(1));
        tokio::spawn(actor.with_snapshot(snapshot.clone()).run());

        let err = client.update(42, NotePatch { title: None }).await.unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("42".into()));
        let err = client.delete(42).await.unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("42".into()));
        assert_eq!(client.get(42).await.unwrap(), None);
        assert!(snapshot.saves.lock().is_empty());
    }

    #[tokio::test]
    async fn test_validation_failure_leaves_store_unchanged() {
        let (actor, client) = ResourceActor::<Note>::new(10, counter_from(1));
        tokio::spawn(actor.run());

        let err = client.create(NoteCreate { title: String::new() }).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Validation(_)));
        assert!(client.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generated_ids_skip_preloaded_entries() {
        let preloaded = vec![
            Note { id: 1, title: "one".into(), locked: false },
            Note { id: 2, title: "two".into(), locked: true },
        ];
        let (actor, client) = ResourceActor::<Note>::new(10, counter_from(1));
        tokio::spawn(actor.with_items(preloaded).run());

        let created = client.create(NoteCreate { title: "three".into() }).await.unwrap();
        assert_eq!(created.id, 3);

        let err = client.delete(2).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Validation(_)));
        assert_eq!(client.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_client_reports_closed_actor() {
        let (actor, client) = ResourceActor::<Note>::new(10, counter_from(1));
        drop(actor);
        assert_eq!(client.list().await.unwrap_err(), FrameworkError::ActorClosed);
    }
}
