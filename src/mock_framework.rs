//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_list`] to assert behavior.

use crate::actor_framework::{Entity, Response, ResourceClient, ResourceRequest};
use tokio::sync::mpsc;

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// Client tests don't need a full `ResourceActor` when they only check the
/// *Client* logic (e.g. how `CatalogClient` maps errors or runs queries).
///
/// The mock client sends to a channel the test controls (`receiver`). The test
/// inspects each request and answers it, which makes success, failure and
/// ordering deterministic.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Patch, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            patch,
            respond_to,
        }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::FrameworkError;
    use crate::domain::{Product, ProductForm};

    fn form(name: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            description: "Test".to_string(),
            price: 10.0,
            category: "Decor".to_string(),
            image: "https://example.com/x.jpg".to_string(),
            stock: 3,
            featured: None,
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Product>(10);

        // Test Create
        let create_task = tokio::spawn(async move { client.create(form("Test")).await });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Test");
        let product = payload.into_product(7).unwrap();
        responder.send(Ok(product.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(product));
    }

    #[tokio::test]
    async fn test_mock_delete_reports_not_found() {
        let (client, mut receiver) = create_mock_client::<Product>(10);

        let delete_task = tokio::spawn(async move { client.delete(42).await });

        let (id, responder) = expect_delete(&mut receiver)
            .await
            .expect("Expected Delete request");
        assert_eq!(id, 42);
        responder
            .send(Err(FrameworkError::NotFound(id.to_string())))
            .unwrap();

        let result = delete_task.await.unwrap();
        assert_eq!(result, Err(FrameworkError::NotFound("42".to_string())));
    }

    #[tokio::test]
    async fn test_expect_helpers_reject_other_requests() {
        let (client, mut receiver) = create_mock_client::<Product>(10);

        let list_task = tokio::spawn(async move { client.list().await });
        assert!(expect_get(&mut receiver).await.is_none());

        // The mismatched request was consumed and its responder dropped.
        assert_eq!(list_task.await.unwrap(), Err(FrameworkError::ActorDropped));
    }
}
