// src/generator.rs

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Client for the external text-generation service (Ollama-compatible
/// `/api/generate` endpoint).
#[derive(Clone)]
pub struct GeneratorClient {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl GeneratorClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: model.to_owned(),
        }
    }

    /// Generates one MCQ as raw text.
    ///
    /// The service's output is returned unparsed and unvalidated; malformed
    /// output is passed through to the caller as-is. Any transport error or
    /// non-2xx status propagates as a generation failure. No retry, no
    /// caching.
    pub async fn generate(
        &self,
        topic: &str,
        subtopic: &str,
        difficulty: &str,
    ) -> Result<String, AppError> {
        let prompt = build_prompt(topic, subtopic, difficulty);

        let body: GenerateResponse = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&GenerateRequest {
                model: &self.model,
                prompt: &prompt,
                stream: false,
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(body.response)
    }
}

/// Builds the fixed few-shot prompt: two worked MCQ examples plus the output
/// format contract, with the requested topic, subtopic and difficulty.
pub fn build_prompt(topic: &str, subtopic: &str, difficulty: &str) -> String {
    format!(
        r#"
You are an expert computer science educator.

Here are examples of good MCQs:

---
Question: Which of these statements about arrays is TRUE?
Options:
A) Arrays can store multiple data types.
B) Array elements are stored in contiguous memory.
C) Array size can be increased dynamically in C.
D) Arrays do not allow indexing.
Answer: B
Explanation: Arrays use contiguous memory allocation.
Hint: Think about how array elements are placed in memory.
---

Question: What will be the output of this code?
int arr[] = {{1, 2, 3}};
printf("%d", arr[1]);
Options:
A) 1
B) 2
C) 3
D) Compilation Error
Answer: B
Explanation: arr[1] refers to the second element which is 2.
Hint: Remember array indexing starts from 0.
---

Now, generate ONE NEW, UNIQUE, NON-REPEATED, HIGH-QUALITY MCQ for:
Topic: {topic}
Subtopic: {subtopic}
Difficulty: {difficulty}

Requirements:
- Use different question formats: theory, code output, debugging, reasoning.
- Use realistic examples, varied numbers, and diverse scenarios.
- Do not repeat previous structure or wording.
- Strictly follow this format:
Question: ...
Options:
A) ...
B) ...
C) ...
D) ...
Answer: (A/B/C/D)
Explanation: ...
Hint: ...
No extra text.
"#
    )
}
