use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use clap::Parser;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use resonance::classify::Complexity;
use resonance::config::{ParamKey, ParamSpec, Params, Variant};
use resonance::export::ExportFormat;
use resonance::profiles::{self, DiseaseProfile, InterfaceLanguage, Lipinski, MolecularCandidate};
use resonance::scoring::ScoreSet;
use resonance::waves::WaveLayer;
use resonance::{Error, render};

#[derive(Parser, Debug)]
#[command(name = "server", version)]
struct Args {
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Static frontend served for every non-API path.
    #[arg(long, default_value = "frontend")]
    frontend: PathBuf,
}

#[derive(Default, Deserialize)]
struct EvaluateRequest {
    variant: Option<String>,
    disease: Option<String>,
    language: Option<String>,
    /// Missing keys keep their defaults.
    params: Option<Params>,
    t: Option<f64>,
    width: Option<usize>,
    height: Option<usize>,
    /// Include the sampled curves, not just the rendered chart.
    curves: Option<bool>,
}

#[derive(Serialize)]
struct EvaluateResponse {
    variant: Variant,
    title: &'static str,
    disease: &'static DiseaseProfile,
    sliders: Vec<Slider>,
    scores: ScoreSet,
    complexity: Complexity,
    complexity_total: f64,
    candidate: &'static MolecularCandidate,
    lipinski: Lipinski,
    violations: u32,
    drug_like: bool,
    layers: Vec<Layer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    curves: Option<Vec<WaveLayer>>,
    exports: Exports,
    timings: Vec<TimingEntry>,
    width: usize,
    height: usize,
}

#[derive(Serialize)]
struct Slider {
    key: ParamKey,
    name: &'static str,
    help: &'static str,
    value: f64,
    min: f64,
    max: f64,
    step: f64,
}

#[derive(Serialize)]
struct Layer {
    name: String,
    data_url: String,
}

#[derive(Serialize)]
struct Exports {
    report: String,
    csv: String,
    smiles: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

#[derive(Serialize)]
struct ProfilesResponse {
    diseases: &'static [DiseaseProfile],
    languages: Vec<&'static str>,
    variants: Vec<VariantEntry>,
    params: Vec<ParamSpec>,
}

#[derive(Serialize)]
struct VariantEntry {
    name: &'static str,
    title: &'static str,
    params: &'static [ParamKey],
}

struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        let status = match e {
            Error::OutOfRange { .. }
            | Error::UnknownDisease(_)
            | Error::UnknownLanguage(_)
            | Error::UnknownVariant(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

fn encode_png(rgba: &[u8], w: usize, h: usize) -> Result<String, Error> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder.write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

fn build_response(req: EvaluateRequest) -> Result<EvaluateResponse, Error> {
    let variant: Variant = match req.variant.as_deref() {
        Some(v) => v.parse()?,
        None => Variant::default(),
    };
    let language: InterfaceLanguage = match req.language.as_deref() {
        Some(l) => l.parse()?,
        None => InterfaceLanguage::default(),
    };
    let disease = match req.disease.as_deref() {
        Some(d) => profiles::disease(d)?,
        None => profiles::default_disease(),
    };
    let params = req.params.unwrap_or_default();
    params.validate()?;
    let t = req.t.unwrap_or(0.0);
    let width = req.width.unwrap_or(1024).clamp(16, 4096);
    let height = req.height.unwrap_or(512).clamp(16, 4096);

    let (eval, timings) = resonance::evaluate_timed(&params, disease, variant, t);

    let sliders = variant
        .params()
        .iter()
        .map(|&key| {
            let label = language.label(key);
            let spec = key.spec();
            Slider {
                key,
                name: label.name,
                help: label.help,
                value: params.get(key),
                min: spec.min,
                max: spec.max,
                step: spec.step,
            }
        })
        .collect();

    let score_h = (height / 2).max(16);
    let layers = vec![
        Layer {
            name: "waves".into(),
            data_url: encode_png(
                &render::render_waves(&eval.layers, disease.color, width, height)?,
                width,
                height,
            )?,
        },
        Layer {
            name: "scores".into(),
            data_url: encode_png(&render::render_scores(&eval.scores, width, score_h), width, score_h)?,
        },
    ];

    let exports = Exports {
        report: ExportFormat::Report.render(&eval),
        csv: ExportFormat::Csv.render(&eval),
        smiles: ExportFormat::Smiles.render(&eval),
    };

    let timing_entries = timings
        .iter()
        .map(|t| TimingEntry {
            name: t.name.to_string(),
            ms: t.ms,
        })
        .collect();

    let lipinski = eval.candidate.lipinski();
    let curves = req.curves.unwrap_or(false).then(|| eval.layers.clone());

    Ok(EvaluateResponse {
        variant,
        title: variant.title(),
        disease,
        sliders,
        scores: eval.scores,
        complexity: eval.complexity,
        complexity_total: eval.complexity_total,
        candidate: eval.candidate,
        lipinski,
        violations: lipinski.violations(),
        drug_like: lipinski.drug_like(),
        layers,
        curves,
        exports,
        timings: timing_entries,
        width,
        height,
    })
}

async fn evaluate_handler(Json(req): Json<EvaluateRequest>) -> Result<Json<EvaluateResponse>, ApiError> {
    let response = tokio::task::spawn_blocking(move || build_response(req))
        .await
        .map_err(|e| ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("evaluation task failed: {e}"),
        })?;

    match response {
        Ok(r) => Ok(Json(r)),
        Err(e) => {
            tracing::warn!(error = %e, "evaluate rejected");
            Err(e.into())
        }
    }
}

async fn profiles_handler() -> Json<ProfilesResponse> {
    Json(ProfilesResponse {
        diseases: &profiles::DISEASES,
        languages: InterfaceLanguage::ALL.iter().map(|l| l.name()).collect(),
        variants: Variant::ALL
            .iter()
            .map(|&v| VariantEntry {
                name: v.name(),
                title: v.title(),
                params: v.params(),
            })
            .collect(),
        params: ParamKey::ALL.iter().map(|k| k.spec()).collect(),
    })
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    resonance::logging::init_tracing();
    let args = Args::parse();

    let frontend = ServeDir::new(&args.frontend);

    let app = Router::new()
        .route("/api/evaluate", post(evaluate_handler))
        .route("/api/profiles", get(profiles_handler))
        .layer(CorsLayer::permissive())
        .fallback_service(frontend);

    tracing::info!("resonance server at http://{}", args.addr);

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    axum::serve(listener, app).await
}
