//! Request handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use grammarkey::{
    catalog, decrypt_text, encrypt_text, parse_modes, visualize, EntropyReport, Generator,
    ModeInfo, ParseStep, SealedText, TreeView,
};

use crate::error::{err, err500, ApiError, ApiJson};
use crate::Shared;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct GenerateKeyReq {
    pub modes: Vec<String>,
    #[serde(default)]
    pub length: Option<usize>,
}

#[derive(Serialize, Deserialize)]
pub struct GenerateKeyResponse {
    pub key: String,
    pub parse_steps: Vec<ParseStep>,
    pub modes: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ModesResponse {
    pub modes: Vec<ModeInfo>,
}

#[derive(Deserialize)]
pub struct TreeReq {
    pub parse_steps: Vec<ParseStep>,
}

#[derive(Deserialize)]
pub struct EntropyReq {
    pub text: String,
}

#[derive(Deserialize)]
pub struct EncryptReq {
    pub plaintext: String,
    pub key: String,
}

#[derive(Deserialize)]
pub struct DecryptReq {
    pub encrypted: String,
    pub nonce: String,
    pub key: String,
}

#[derive(Serialize, Deserialize)]
pub struct DecryptResponse {
    pub plaintext: String,
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({"message": "Cryptographic Key Generation API"}))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy"}))
}

pub async fn get_modes() -> Json<ModesResponse> {
    Json(ModesResponse { modes: catalog() })
}

pub async fn generate_key(
    State(state): State<Shared>,
    ApiJson(req): ApiJson<GenerateKeyReq>,
) -> Result<Json<GenerateKeyResponse>, ApiError> {
    let modes = parse_modes(&req.modes)?;
    let derivation = Generator::new(&modes)
        .max_length(state.max_key_length)
        .generate(req.length)?;

    tracing::info!(
        modes = ?req.modes,
        length = derivation.key.chars().count(),
        steps = derivation.parse_steps.len(),
        "generated key"
    );

    Ok(Json(GenerateKeyResponse {
        key: derivation.key,
        parse_steps: derivation.parse_steps,
        modes: req.modes,
    }))
}

pub async fn layout_tree(ApiJson(req): ApiJson<TreeReq>) -> Result<Json<TreeView>, ApiError> {
    let view = tokio::task::spawn_blocking(move || visualize(&req.parse_steps)).await??;
    tracing::debug!(view_box = %view.view_box, "laid out tree");
    Ok(Json(view))
}

pub async fn calculate_entropy(ApiJson(req): ApiJson<EntropyReq>) -> Json<EntropyReport> {
    Json(EntropyReport::measure(&req.text))
}

pub async fn encrypt(
    State(state): State<Shared>,
    ApiJson(req): ApiJson<EncryptReq>,
) -> Result<Json<SealedText>, ApiError> {
    let kdf = state.kdf;
    let sealed = tokio::task::spawn_blocking(move || encrypt_text(&req.plaintext, &req.key, kdf))
        .await?
        .map_err(|e| {
            tracing::error!(error = %e, "encryption failed");
            err500(e.to_string())
        })?;
    Ok(Json(sealed))
}

pub async fn decrypt(
    State(state): State<Shared>,
    ApiJson(req): ApiJson<DecryptReq>,
) -> Result<Json<DecryptResponse>, ApiError> {
    let kdf = state.kdf;
    let sealed = SealedText { encrypted: req.encrypted, nonce: req.nonce };
    let plaintext = tokio::task::spawn_blocking(move || decrypt_text(&sealed, &req.key, kdf))
        .await?
        .map_err(|_| {
            tracing::warn!("decryption failed");
            err("Decryption failed")
        })?;
    Ok(Json(DecryptResponse { plaintext }))
}
