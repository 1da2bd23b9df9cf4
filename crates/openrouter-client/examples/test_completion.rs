//! Simple test for the OpenRouter completion client.
//!
//! Run with: cargo run -p openrouter-client --example test_completion
//! Or with a custom message: cargo run -p openrouter-client --example test_completion -- "Your message"
//!
//! Make sure to set environment variables in .env:
//!   OPENROUTER_API_KEY - OpenRouter API key

use chat_core::{ChatTurn, CompletionBackend, CompletionRequest};
use openrouter_client::OpenRouterClient;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let message_text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Hello! Please respond with a short greeting.".to_string()
    };

    println!("Initializing OpenRouter client...");
    let client = OpenRouterClient::from_env()?;

    println!("Client: {}", client.name());
    println!("API URL: {}", client.config().api_url);
    println!("Model: {}", client.config().model);
    println!();

    let request = CompletionRequest {
        system_instruction: "You are a friendly conversation partner. Keep replies short."
            .to_string(),
        turns: vec![ChatTurn::user(&message_text)],
        max_tokens: 120,
        temperature: 0.85,
    };

    println!("Sending: \"{}\"", message_text);
    println!("Waiting for response...\n");

    match client.complete(request).await {
        Ok(reply) => {
            println!("=== Response ===");
            println!("{}", reply);
            println!("================");
        }
        Err(err) => {
            println!("Failed ({:?}): {}", err.kind(), err);
            println!("Presentable: {}", err.presentable());
        }
    }

    Ok(())
}
