//! Authenticated API trait.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::endpoints::{
    CURRENT_USER, FREE_ROOMS, FreeRoomsQuery, LessonFilter, Resource, TEACHER_DISCIPLINES,
    TEACHER_GROUPS,
};
use crate::error::Error;
use crate::models::CurrentUser;
use crate::types::RequestDescriptor;
use crate::Result;

/// An authenticated view of the scheduling API.
///
/// Implementors provide [`Api::call`]; every resource helper is expressed
/// through it, so all of them share the same authentication and error
/// handling. Response payloads are passed through unexamined.
#[async_trait]
pub trait Api: Send + Sync {
    /// Issue one logical request and return the parsed response body.
    async fn call(&self, request: &RequestDescriptor) -> Result<Value>;

    /// Fetch the authenticated user's record.
    async fn current_user(&self) -> Result<CurrentUser> {
        let body = self.call(&RequestDescriptor::get(CURRENT_USER)).await?;
        serde_json::from_value(body).map_err(|e| Error::Decode {
            message: e.to_string(),
        })
    }

    /// List a collection.
    async fn list(&self, resource: Resource) -> Result<Value> {
        debug!(%resource, "Listing resource");
        self.call(&RequestDescriptor::get(resource.collection_path()))
            .await
    }

    /// Fetch a single item.
    async fn get(&self, resource: Resource, id: u64) -> Result<Value> {
        debug!(%resource, id, "Getting resource item");
        self.call(&RequestDescriptor::get(resource.item_path(id)))
            .await
    }

    /// Create an item.
    async fn create(&self, resource: Resource, body: &Value) -> Result<Value> {
        debug!(%resource, "Creating resource item");
        let request = RequestDescriptor::post(resource.collection_path()).json(body)?;
        self.call(&request).await
    }

    /// Replace an item.
    async fn update(&self, resource: Resource, id: u64, body: &Value) -> Result<Value> {
        debug!(%resource, id, "Updating resource item");
        let request = RequestDescriptor::put(resource.item_path(id)).json(body)?;
        self.call(&request).await
    }

    /// Delete an item.
    async fn delete(&self, resource: Resource, id: u64) -> Result<Value> {
        debug!(%resource, id, "Deleting resource item");
        self.call(&RequestDescriptor::delete(resource.item_path(id)))
            .await
    }

    /// Rooms the backend reports as free in the queried range.
    async fn free_rooms(&self, query: &FreeRoomsQuery) -> Result<Value> {
        let request = RequestDescriptor::get(FREE_ROOMS).query(&query.params());
        self.call(&request).await
    }

    /// Lessons of one group, teacher or room, optionally for a single week.
    async fn lessons_by(&self, filter: LessonFilter, week: Option<u32>) -> Result<Value> {
        let request = RequestDescriptor::get(filter.path()).query(&filter.params(week));
        self.call(&request).await
    }

    /// Groups taught by the current teacher.
    async fn teacher_groups(&self) -> Result<Value> {
        self.call(&RequestDescriptor::get(TEACHER_GROUPS)).await
    }

    /// Disciplines taught by the current teacher.
    async fn teacher_disciplines(&self) -> Result<Value> {
        self.call(&RequestDescriptor::get(TEACHER_DISCIPLINES))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::types::Method;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records requests and answers with a fixed body.
    struct Recorder {
        requests: Mutex<Vec<RequestDescriptor>>,
        response: Value,
    }

    impl Recorder {
        fn new(response: Value) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                response,
            }
        }

        fn last(&self) -> RequestDescriptor {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Api for Recorder {
        async fn call(&self, request: &RequestDescriptor) -> Result<Value> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self.response.clone())
        }
    }

    #[tokio::test]
    async fn update_sends_put_with_json_body() {
        let api = Recorder::new(json!({"id": 3}));
        api.update(Resource::Groups, 3, &json!({"name": "PM-21"}))
            .await
            .unwrap();

        let request = api.last();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/groups/3/");
        assert_eq!(request.body.as_deref(), Some(br#"{"name":"PM-21"}"#.as_slice()));
    }

    #[tokio::test]
    async fn lessons_by_group_with_week() {
        let api = Recorder::new(json!([]));
        api.lessons_by(LessonFilter::Group(4), Some(11)).await.unwrap();

        assert_eq!(api.last().path, "/lessons/by_group/?group_id=4&week=11");
    }

    #[tokio::test]
    async fn free_rooms_query() {
        let api = Recorder::new(json!([]));
        let mut query = FreeRoomsQuery::new("2024-09-02T08:30", "2024-09-02T10:00");
        query.capacity = Some(30);
        api.free_rooms(&query).await.unwrap();

        assert_eq!(
            api.last().path,
            "/rooms/free/?start=2024-09-02T08%3A30&end=2024-09-02T10%3A00&capacity=30"
        );
    }

    #[tokio::test]
    async fn current_user_decodes_role() {
        let api = Recorder::new(json!({"id": 1, "username": "sidorov", "role": "TEACHER"}));
        let user = api.current_user().await.unwrap();

        assert_eq!(api.last().path, CURRENT_USER);
        assert_eq!(user.role(), Role::Teacher);
    }

    #[tokio::test]
    async fn current_user_rejects_non_object() {
        let api = Recorder::new(json!("nope"));
        let err = api.current_user().await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
