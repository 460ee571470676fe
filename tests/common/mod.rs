use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use playcall::{InferenceClient, InferenceError, InferenceOutput};
use std::sync::{Arc, Mutex};

/// Stand-in for the hosted model: replays a fixed answer and records prompts.
pub struct StubModel {
    answer: Result<Option<String>, String>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl StubModel {
    pub fn answering(text: &str) -> Arc<Self> {
        Arc::new(Self { answer: Ok(Some(text.to_string())), calls: Mutex::new(vec![]) })
    }

    pub fn silent() -> Arc<Self> {
        Arc::new(Self { answer: Ok(None), calls: Mutex::new(vec![]) })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self { answer: Err(message.to_string()), calls: Mutex::new(vec![]) })
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.calls.lock().unwrap().last().map(|(_, p)| p.clone())
    }
}

#[async_trait]
impl InferenceClient for StubModel {
    async fn run(&self, model: &str, prompt: &str) -> Result<InferenceOutput, InferenceError> {
        self.calls.lock().unwrap().push((model.to_string(), prompt.to_string()));
        match &self.answer {
            Ok(response) => Ok(InferenceOutput { response: response.clone() }),
            Err(msg) => Err(InferenceError::Service(msg.clone())),
        }
    }
}

pub fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(res: Response<Body>) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn assert_cors<B>(res: &Response<B>) {
    let h = res.headers();
    assert_eq!(h["access-control-allow-origin"], "*");
    assert_eq!(h["access-control-allow-methods"], "POST, GET, OPTIONS");
    assert_eq!(h["access-control-allow-headers"], "Content-Type");
}
