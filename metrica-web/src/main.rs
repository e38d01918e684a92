//! Servidor web Axum com WebSocket para visualização da escansão métrica em tempo real

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use metrica_core::{
    corrector::NoRewrite,
    pipeline::{MetricaPipeline, PipelineEvent},
    profile::ProsodyProfile,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

/// Estado compartilhado da aplicação
struct AppState {
    pipeline: MetricaPipeline,
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    text: String,
    #[serde(default)]
    genre: Option<String>,
    /// Roda o corretor sobre versos acima do teto do perfil.
    #[serde(default)]
    correct: bool,
}

/// Mensagem WebSocket recebida do cliente
#[derive(Deserialize)]
struct WsRequest {
    text: String,
    #[serde(default)]
    genre: Option<String>,
}

fn resolve_profile(genre: Option<&str>) -> ProsodyProfile {
    match genre {
        Some(key) => ProsodyProfile::for_genre(key),
        None => ProsodyProfile::default_profile(),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let pipeline = MetricaPipeline::new();
    let state = Arc::new(AppState { pipeline });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Caminho absoluto para a pasta docs/ (relativo ao workspace raiz)
    let docs_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("workspace root")
        .join("docs");

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/analyze", post(analyze_handler))
        .route("/ws", get(ws_handler))
        .route("/profiles", get(profiles_handler))
        .nest_service("/docs", ServeDir::new(docs_dir))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("🎵 Servidor de métrica iniciado em http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Análise métrica via HTTP POST (sem streaming)
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Letra vazia"})),
        )
            .into_response();
    }

    let profile = resolve_profile(req.genre.as_deref());
    let report = if req.correct {
        state
            .pipeline
            .analyze_and_correct(&req.text, &profile, &NoRewrite)
    } else {
        state.pipeline.analyze(&req.text, &profile)
    };

    Json(report).into_response()
}

/// Retorna os perfis de prosódia embutidos, por gênero
async fn profiles_handler() -> impl IntoResponse {
    let profiles: Vec<ProsodyProfile> = ProsodyProfile::known_genres()
        .iter()
        .map(|g| ProsodyProfile::for_genre(g))
        .collect();
    Json(profiles)
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe a letra, executa o pipeline e envia os
/// eventos de escansão um a um
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                // Tenta parsear como JSON {text, genre}; senão usa como letra pura
                let (text_str, profile) = if let Ok(req) = serde_json::from_str::<WsRequest>(&text)
                {
                    let p = resolve_profile(req.genre.as_deref());
                    (req.text.trim().to_string(), p)
                } else {
                    (text.trim().to_string(), ProsodyProfile::default_profile())
                };

                if text_str.is_empty() {
                    continue;
                }

                info!(
                    "Analisando via WebSocket [{}]: {} chars",
                    profile.genre,
                    text_str.len()
                );

                // O pipeline é síncrono: roda em spawn_blocking para não
                // bloquear o runtime
                let (tx_std, rx_std) = std::sync::mpsc::channel::<PipelineEvent>();
                let state_for_thread = Arc::clone(&state);
                let text_for_thread = text_str.clone();

                let handle = tokio::task::spawn_blocking(move || {
                    state_for_thread
                        .pipeline
                        .analyze_streaming(&text_for_thread, &profile, tx_std);
                });

                handle.await.ok();

                // Drena a fila std::mpsc numa Vec (o rx_std não é Send)
                let events: Vec<PipelineEvent> = rx_std.try_iter().collect();

                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            return; // cliente desconectou
                        }
                        // Pequena pausa para animação visual (passo a passo)
                        tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}
