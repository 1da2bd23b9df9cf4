//! Interactive engine walkthrough.
//!
//! A tiny line-based front-end standing in for a real chat transport.
//! Everything after the command routing is exactly what a production
//! transport would call.
//!
//! Run with: cargo run -p engine --example repl
//!
//! Configuration via .env file or environment variables:
//!   OPENROUTER_API_KEY    - completion provider key (required)
//!   AMORA_WALLET_ADDRESS  - receiving wallet quoted to users (required)
//!   TON_WALLET_ADDRESS    - same wallet, for ledger lookups (required)
//!   MODELSLAB_API_KEY     - image provider key (optional)
//!   AMORA_DB_URL          - database URL (default: sqlite:amora.db?mode=rwc)

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use database::Database;
use engine::{
    ConfirmOutcome, EngineConfig, EngineError, ImageOutcome, OnboardingFlow, PaymentWorkflow,
    SessionEngine, UserLocks,
};
use modelslab_client::ModelsLabClient;
use openrouter_client::OpenRouterClient;
use toncenter_client::TonCenterClient;
use tracing::info;

/// The single local "user" this walkthrough drives.
const USER_ID: i64 = 1;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let db_url =
        std::env::var("AMORA_DB_URL").unwrap_or_else(|_| "sqlite:amora.db?mode=rwc".to_string());
    let db = Database::connect(&db_url).await?;
    db.migrate().await?;

    let locks = Arc::new(UserLocks::new());
    let completion = OpenRouterClient::from_env()?;
    let verifier = TonCenterClient::from_env()?;
    let config = EngineConfig::from_env()?;

    let mut sessions = SessionEngine::new(db.clone(), completion, locks.clone());
    if let Ok(images) = ModelsLabClient::from_env() {
        sessions = sessions.with_images(images);
    } else {
        info!("MODELSLAB_API_KEY not set, images disabled");
    }
    let payments = PaymentWorkflow::new(db.clone(), verifier, config, locks.clone());
    let onboarding = OnboardingFlow::new(db.clone());

    println!("Amora engine REPL. Commands: /create /cancel /reset /start_session [tier] /confirm <addr> /pic <prompt> /quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = dispatch(line, &sessions, &payments, &onboarding).await;
        match response {
            Ok(text) => println!("{}\n", text),
            Err(err) => println!("(rejected) {}\n", err),
        }

        if line == "/quit" {
            break;
        }
    }

    Ok(())
}

async fn dispatch(
    line: &str,
    sessions: &SessionEngine<OpenRouterClient>,
    payments: &PaymentWorkflow<TonCenterClient>,
    onboarding: &OnboardingFlow,
) -> Result<String, EngineError> {
    if line == "/quit" {
        return Ok("bye!".to_string());
    }

    if line == "/create" {
        return onboarding.begin(USER_ID).await.map(step_text);
    }
    if line == "/cancel" {
        return onboarding.cancel(USER_ID).await.map(str::to_string);
    }
    if line == "/reset" {
        return onboarding.reset(USER_ID).await.map(str::to_string);
    }

    if let Some(rest) = line.strip_prefix("/start_session") {
        let level = rest.trim();
        if level.is_empty() {
            return Ok(payments.pricing_menu());
        }
        return payments.start_session(USER_ID, level).await.map(|q| q.text);
    }

    if let Some(address) = line.strip_prefix("/confirm") {
        let address = address.trim();
        if address.is_empty() {
            return Ok("❌ I need your wallet address!\n\nUse: /confirm <your_address>".to_string());
        }
        return payments
            .confirm_payment(USER_ID, address)
            .await
            .map(|outcome| match outcome {
                ConfirmOutcome::Confirmed { text, .. } => text,
                ConfirmOutcome::NotFound { text } => text,
            });
    }

    if let Some(prompt) = line.strip_prefix("/pic") {
        return sessions
            .request_image(USER_ID, prompt.trim())
            .await
            .map(|outcome| match outcome {
                ImageOutcome::Image { url, caption } => format!("{}\n{}", caption, url),
                ImageOutcome::Locked { text } | ImageOutcome::Unavailable { text } => text,
            });
    }

    // Mid-onboarding answers win over chat; otherwise it's a normal turn.
    if let Some(step) = onboarding.submit(USER_ID, line).await? {
        return Ok(step_text(step));
    }

    sessions.chat_turn(USER_ID, line).await.map(|reply| reply.text)
}

fn step_text(step: engine::OnboardingStep) -> String {
    match step {
        engine::OnboardingStep::Question { text, .. } => text,
        engine::OnboardingStep::Completed { text, .. } => text,
    }
}
