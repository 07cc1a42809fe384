//! Interactive command-line client for the career counselor
//!
//! Picks one unused numeric identifier per run, greets the server with
//! "hi" and then relays each typed line until one contains "exit".

use rand::Rng;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;
use thiserror::Error;

const DEFAULT_URL: &str = "http://127.0.0.1:5000/chat";
const ID_RANGE: RangeInclusive<u32> = 1..=1000;
const GREETING: &str = "hi";

#[derive(Debug, Error, PartialEq, Eq)]
enum IdPoolError {
    #[error("All unique numbers within {start}..={end} have been generated")]
    Exhausted { start: u32, end: u32 },
}

/// Hands out random numbers from a bounded range, never the same one twice
struct UniqueIds {
    range: RangeInclusive<u32>,
    issued: HashSet<u32>,
}

impl UniqueIds {
    fn new(range: RangeInclusive<u32>) -> Self {
        Self {
            range,
            issued: HashSet::new(),
        }
    }

    fn next_id(&mut self, rng: &mut impl Rng) -> Result<u32, IdPoolError> {
        if self.issued.len() >= self.range.clone().count() {
            return Err(IdPoolError::Exhausted {
                start: *self.range.start(),
                end: *self.range.end(),
            });
        }

        loop {
            let candidate = rng.gen_range(self.range.clone());
            if self.issued.insert(candidate) {
                return Ok(candidate);
            }
        }
    }
}

/// One round trip to the chat endpoint. Only transport failures are errors;
/// HTTP error statuses are reported and the loop carries on.
fn send(url: &str, user_id: &str, message: &str) -> Result<(), Box<ureq::Transport>> {
    let payload = json!({ "message": message, "user_id": user_id });
    tracing::debug!(url, user_id, "Sending message");

    match ureq::post(url)
        .set("Content-Type", "application/json")
        .send_json(payload)
    {
        Ok(response) if matches!(response.status(), 200 | 201) => {
            let body: Value = response.into_json().unwrap_or(Value::Null);
            match body.get("message").and_then(Value::as_str) {
                Some(message) => println!("\nCounselor: {message}"),
                None => println!("No message in response."),
            }
        }
        Ok(response) => {
            println!("Failed to send request. Status code : {}", response.status());
        }
        Err(ureq::Error::Status(code, response)) => {
            tracing::debug!(code, body = ?response.into_string().ok(), "Server rejected message");
            println!("Failed to send request. Status code : {code}");
        }
        Err(ureq::Error::Transport(transport)) => return Err(Box::new(transport)),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counselor_client=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let url = std::env::var("COUNSELOR_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    let user_id = UniqueIds::new(ID_RANGE)
        .next_id(&mut rand::thread_rng())?
        .to_string();
    tracing::info!(user_id = %user_id, url = %url, "Starting session");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut message = GREETING.to_string();

    loop {
        send(&url, &user_id, &message)?;

        print!("You: ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if line.contains("exit") {
            break;
        }
        message = line;
    }

    Ok(())
}
