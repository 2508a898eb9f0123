//! One function per catalog operation.
//!
//! Each call logs a failure and hands it back unchanged. Nothing here
//! retries or caches.

use tracing::error;

use super::{ApiError, HttpClient};
use crate::models::{Algorithm, AlgorithmDraft, AlgorithmId, Question, QuizPayload, Tag};

pub async fn list_algorithms<C: HttpClient>(client: &C) -> Result<Vec<Algorithm>, ApiError> {
    client
        .get("/algorithms")
        .await
        .inspect_err(|err| error!(%err, "error fetching algorithms"))
}

pub async fn fetch_algorithm<C: HttpClient>(client: &C, id: AlgorithmId) -> Result<Algorithm, ApiError> {
    client
        .get(&format!("/algorithms/{id}"))
        .await
        .inspect_err(|err| error!(%err, algorithm_id = id, "error fetching algorithm"))
}

pub async fn create_algorithm<C: HttpClient>(
    client: &C,
    draft: &AlgorithmDraft,
) -> Result<Algorithm, ApiError> {
    client
        .post("/algorithms", draft)
        .await
        .inspect_err(|err| error!(%err, name = %draft.name, "error creating algorithm"))
}

pub async fn update_algorithm<C: HttpClient>(
    client: &C,
    algorithm: &Algorithm,
) -> Result<Algorithm, ApiError> {
    client
        .put(&format!("/algorithms/{}", algorithm.id), algorithm)
        .await
        .inspect_err(|err| error!(%err, algorithm_id = algorithm.id, "error updating algorithm"))
}

pub async fn delete_algorithm<C: HttpClient>(client: &C, id: AlgorithmId) -> Result<(), ApiError> {
    client
        .delete(&format!("/algorithms/{id}"))
        .await
        .inspect_err(|err| error!(%err, algorithm_id = id, "error deleting algorithm"))
}

pub async fn generate_quiz<C: HttpClient>(client: &C, id: AlgorithmId) -> Result<Vec<Question>, ApiError> {
    client
        .get::<QuizPayload>(&format!("/algorithms/{id}/generate-quiz"))
        .await
        .map(QuizPayload::into_questions)
        .inspect_err(|err| error!(%err, algorithm_id = id, "error generating quiz"))
}

pub async fn list_tags<C: HttpClient>(client: &C) -> Result<Vec<Tag>, ApiError> {
    client
        .get("/tags")
        .await
        .inspect_err(|err| error!(%err, "error fetching tags"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    use reqwest::StatusCode;
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use serde_json::{Value, json};

    use super::*;
    use crate::api::Method;

    /// Canned responses keyed by method and path; records every call.
    #[derive(Default)]
    struct FakeClient {
        responses: HashMap<(Method, String), Result<Value, StatusCode>>,
        calls: Mutex<Vec<(Method, String, Option<Value>)>>,
    }

    impl FakeClient {
        fn respond(mut self, method: Method, path: &str, response: Result<Value, StatusCode>) -> Self {
            self.responses.insert((method, path.to_string()), response);
            self
        }

        fn calls(&self) -> Vec<(Method, String, Option<Value>)> {
            self.calls.lock().unwrap().clone()
        }

        fn answer<T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T, ApiError> {
            self.calls.lock().unwrap().push((method, path.to_string(), body));
            let url = format!("http://fake{path}");
            match self.responses.get(&(method, path.to_string())) {
                Some(Ok(value)) => {
                    serde_json::from_value(value.clone()).map_err(|source| ApiError::Decode { url, source })
                }
                Some(Err(status)) => Err(ApiError::Status { method, url, status: *status }),
                None => Err(ApiError::Status { method, url, status: StatusCode::NOT_FOUND }),
            }
        }
    }

    impl HttpClient for FakeClient {
        fn get<T>(&self, path: &str) -> impl Future<Output = Result<T, ApiError>> + Send
        where
            T: DeserializeOwned + Send,
        {
            let result = self.answer(Method::Get, path, None);
            async move { result }
        }

        fn post<B, T>(&self, path: &str, body: &B) -> impl Future<Output = Result<T, ApiError>> + Send
        where
            B: Serialize + Sync,
            T: DeserializeOwned + Send,
        {
            let result = self.answer(Method::Post, path, serde_json::to_value(body).ok());
            async move { result }
        }

        fn put<B, T>(&self, path: &str, body: &B) -> impl Future<Output = Result<T, ApiError>> + Send
        where
            B: Serialize + Sync,
            T: DeserializeOwned + Send,
        {
            let result = self.answer(Method::Put, path, serde_json::to_value(body).ok());
            async move { result }
        }

        fn delete(&self, path: &str) -> impl Future<Output = Result<(), ApiError>> + Send {
            let result = self.answer::<Value>(Method::Delete, path, None).map(|_| ());
            async move { result }
        }
    }

    fn algorithm_json(id: i64, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": "desc",
            "solution_code": "pass",
            "tags": [{"id": 1, "name": "graph"}],
            "created_at": "2024-01-02T03:04:05.000006",
            "updated_at": "2024-01-02T03:04:05.000006"
        })
    }

    #[tokio::test]
    async fn test_list_algorithms() {
        let client = FakeClient::default().respond(
            Method::Get,
            "/algorithms",
            Ok(json!([algorithm_json(1, "BFS"), algorithm_json(2, "DFS")])),
        );

        let algorithms = list_algorithms(&client).await.unwrap();
        assert_eq!(algorithms.len(), 2);
        assert_eq!(algorithms[1].name, "DFS");
    }

    #[tokio::test]
    async fn test_fetch_algorithm_surfaces_failure() {
        let client = FakeClient::default().respond(
            Method::Get,
            "/algorithms/9",
            Err(StatusCode::INTERNAL_SERVER_ERROR),
        );

        let err = fetch_algorithm(&client, 9).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_create_posts_draft() {
        let client = FakeClient::default().respond(Method::Post, "/algorithms", Ok(algorithm_json(5, "BFS")));
        let draft = AlgorithmDraft {
            name: "BFS".to_string(),
            description: "desc".to_string(),
            solution_code: "pass".to_string(),
            tags: vec![Tag::unsaved("graph")],
        };

        let created = create_algorithm(&client, &draft).await.unwrap();
        assert_eq!(created.id, 5);

        let calls = client.calls();
        let (method, path, body) = &calls[0];
        assert_eq!((*method, path.as_str()), (Method::Post, "/algorithms"));
        assert_eq!(body.as_ref().unwrap()["tags"][0]["name"], "graph");
    }

    #[tokio::test]
    async fn test_update_puts_full_record() {
        let client = FakeClient::default().respond(Method::Put, "/algorithms/3", Ok(algorithm_json(3, "Renamed")));
        let algorithm: Algorithm = serde_json::from_value(algorithm_json(3, "Renamed")).unwrap();

        let updated = update_algorithm(&client, &algorithm).await.unwrap();
        assert_eq!(updated.name, "Renamed");

        let calls = client.calls();
        assert_eq!(calls[0].2.as_ref().unwrap()["id"], 3);
    }

    #[tokio::test]
    async fn test_delete_algorithm() {
        let client = FakeClient::default().respond(Method::Delete, "/algorithms/4", Ok(Value::Null));
        delete_algorithm(&client, 4).await.unwrap();
        assert_eq!(client.calls()[0].0, Method::Delete);
    }

    #[tokio::test]
    async fn test_generate_quiz_accepts_both_shapes() {
        let question = json!({
            "id": "q",
            "text": "?",
            "options": [{"id": "a", "text": "yes"}],
            "correctAnswerId": "a"
        });
        let client = FakeClient::default()
            .respond(Method::Get, "/algorithms/1/generate-quiz", Ok(json!([question.clone()])))
            .respond(Method::Get, "/algorithms/2/generate-quiz", Ok(json!({ "questions": [question] })));

        assert_eq!(generate_quiz(&client, 1).await.unwrap().len(), 1);
        assert_eq!(generate_quiz(&client, 2).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_tags_decode_error() {
        let client = FakeClient::default().respond(Method::Get, "/tags", Ok(json!({"unexpected": true})));
        assert!(matches!(list_tags(&client).await, Err(ApiError::Decode { .. })));
    }
}
