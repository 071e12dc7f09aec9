//! Chat command implementation

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use farmhand::AppContext;
use farmhand::geo::Coords;
use farmhand::llm::{ChatSession, WeatherContext};

use super::load_config;

pub struct ChatOptions {
    pub question: Option<String>,
    pub stream: bool,
    pub with_weather: bool,
    pub offline: bool,
    pub gps: Option<Coords>,
}

/// Ask one question, or run a prompt loop on stdin
pub async fn chat_command(work_dir: &Path, config_path: Option<&Path>, options: ChatOptions) -> Result<()> {
    let config = load_config(work_dir, config_path)?;
    let with_weather = options.with_weather;
    let gps = options.gps;

    let mut ctx = tokio::task::spawn_blocking(move || {
        let mut ctx = AppContext::from_config(config);
        if with_weather {
            ctx.refresh_location_weather(gps);
        }
        ctx
    })
    .await
    .context("Context setup task failed")?;

    if options.offline {
        ctx = ctx.into_offline();
    }
    let ctx = Arc::new(ctx);
    let weather = ctx.weather_context();
    if let Some(w) = &weather {
        debug!("Attaching weather for {}", w.location.as_deref().unwrap_or("unknown location"));
    }
    if !ctx.advisor().is_online() {
        eprintln!("No LLM API key configured, using offline answers.");
    }

    match options.question {
        Some(question) => {
            ask(&ctx, &question, weather, options.stream).await?;
        }
        None => {
            interactive(ctx, weather, options.stream).await?;
        }
    }

    Ok(())
}

async fn ask(ctx: &Arc<AppContext>, question: &str, weather: Option<WeatherContext>, stream: bool) -> Result<()> {
    if stream {
        stream_answer(Arc::clone(ctx), question.to_string(), weather).await?;
        println!();
    } else {
        let ctx = Arc::clone(ctx);
        let question = question.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            ctx.advisor().generate_response(&question, weather.as_ref())
        })
        .await
        .context("Chat task failed")?;
        println!("{}", answer);
    }
    Ok(())
}

/// Print chunks as the blocking stream produces them
async fn stream_answer(ctx: Arc<AppContext>, question: String, weather: Option<WeatherContext>) -> Result<String> {
    let (tx, mut rx) = tokio::sync::mpsc::channel::<String>(64);

    let worker = tokio::task::spawn_blocking(move || {
        ctx.advisor()
            .generate_streaming_response(&question, weather.as_ref(), |chunk| {
                let _ = tx.blocking_send(chunk.to_string());
            });
    });

    let mut answer = String::new();
    let mut stdout = std::io::stdout();
    while let Some(chunk) = rx.recv().await {
        print!("{}", chunk);
        stdout.flush().ok();
        answer.push_str(&chunk);
    }
    worker.await.context("Streaming task failed")?;
    Ok(answer)
}

async fn interactive(ctx: Arc<AppContext>, weather: Option<WeatherContext>, stream: bool) -> Result<()> {
    let mut session = ChatSession::new();
    if let Some(greeting) = session.messages().first() {
        println!("{}\n", greeting.text);
    }
    println!("Type a question, /clear to start over, /quit to leave.");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => {
                session.clear();
                if let Some(greeting) = session.messages().first() {
                    println!("{}\n", greeting.text);
                }
                continue;
            }
            _ => {}
        }

        if stream {
            let answer = stream_answer(Arc::clone(&ctx), line.to_string(), weather.clone()).await?;
            println!("\n");
            session.record(line, answer);
        } else {
            let worker_ctx = Arc::clone(&ctx);
            let question = line.to_string();
            let worker_weather = weather.clone();
            let answer = tokio::task::spawn_blocking(move || {
                worker_ctx
                    .advisor()
                    .generate_response(&question, worker_weather.as_ref())
            })
            .await
            .context("Chat task failed")?;
            println!("{}\n", answer);
            session.record(line, answer);
        }
    }

    debug!("Chat ended after {} messages", session.messages().len());
    Ok(())
}
