use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use resonance::animation::{self, Clock};
use resonance::config::{ParamKey, Params, Variant};
use resonance::export::ExportFormat;
use resonance::profiles::{self, InterfaceLanguage};
use resonance::{Error, Result, render};

/// Evaluate a resonance dashboard and write its charts and exports.
#[derive(Parser, Debug)]
#[command(name = "resonance", version)]
struct Cli {
    /// Dashboard variant: sbcl, disease or molecular.
    #[arg(long, default_value = "disease")]
    variant: String,

    /// Disease profile name.
    #[arg(long, default_value = "Glioblastoma")]
    disease: String,

    /// Slider naming: Basic, Scientific, Symbolic or Mathematical.
    #[arg(long, default_value = "Basic")]
    language: String,

    /// TOML preset with parameter values. Flags below override it.
    #[arg(long)]
    params: Option<PathBuf>,

    #[arg(long)]
    membrane: Option<f64>,
    #[arg(long)]
    entropy: Option<f64>,
    #[arg(long)]
    structural: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    charge: Option<f64>,
    #[arg(long)]
    selectivity: Option<f64>,
    #[arg(long)]
    stability: Option<f64>,
    #[arg(long)]
    delivery: Option<f64>,
    #[arg(long)]
    recognition: Option<f64>,
    #[arg(long)]
    flexibility: Option<f64>,

    #[arg(long, default_value = "artifacts")]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 1200)]
    width: usize,

    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Also write this many animation frames.
    #[arg(long, default_value_t = 0)]
    frames: usize,

    #[arg(long, default_value_t = 50)]
    delay_ms: u64,

    /// Animation time step per frame.
    #[arg(long, default_value_t = 0.1)]
    dt: f64,
}

impl Cli {
    fn overrides(&self) -> [(ParamKey, Option<f64>); 9] {
        [
            (ParamKey::Membrane, self.membrane),
            (ParamKey::Entropy, self.entropy),
            (ParamKey::Structural, self.structural),
            (ParamKey::Charge, self.charge),
            (ParamKey::Selectivity, self.selectivity),
            (ParamKey::Stability, self.stability),
            (ParamKey::Delivery, self.delivery),
            (ParamKey::Recognition, self.recognition),
            (ParamKey::Flexibility, self.flexibility),
        ]
    }

    fn resolve_params(&self) -> Result<Params> {
        let mut params = match &self.params {
            Some(path) => Params::from_toml_file(path)?,
            None => Params::default(),
        };
        for (key, value) in self.overrides() {
            if let Some(v) = value {
                params.set(key, v);
            }
        }
        params.validate()?;
        Ok(params)
    }
}

fn save_png(path: &Path, rgba: &[u8], w: usize, h: usize) -> Result<()> {
    image::save_buffer(path, rgba, w as u32, h as u32, image::ColorType::Rgba8).map_err(|source| {
        Error::ImageWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::info!("saved {}", path.display());
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("saved {}", path.display());
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let variant: Variant = cli.variant.parse()?;
    let language: InterfaceLanguage = cli.language.parse()?;
    let disease = profiles::disease(&cli.disease)?;
    let params = cli.resolve_params()?;

    std::fs::create_dir_all(&cli.out_dir).map_err(|source| Error::Io {
        path: cli.out_dir.clone(),
        source,
    })?;

    tracing::info!(
        "{} | disease={} | language={}",
        variant.title(),
        disease.name,
        language
    );
    for &key in variant.params() {
        let label = language.label(key);
        tracing::info!("  {:<28} {:>6.2}  ({})", label.name, params.get(key), label.help);
    }

    let (eval, timings) = resonance::evaluate_timed(&params, disease, variant, 0.0);

    tracing::debug!("timings:");
    for t in &timings {
        tracing::debug!("  {:20} {:8.3} ms", t.name, t.ms);
    }

    // Metric cards
    for s in &eval.scores.scores {
        println!("{:<20} {:>5.1}%", s.kind.label(), s.value);
    }
    println!("{:<20} {:>5}%", "Phase Lock", eval.scores.phase_lock);
    println!(
        "{:<20} {} ({:.2})",
        "Complexity", eval.complexity, eval.complexity_total
    );
    println!("{:<20} {}", "Candidate", eval.candidate.id);

    let (w, h) = (cli.width, cli.height);
    let waves_rgba = render::render_waves(&eval.layers, disease.color, w, h)?;
    save_png(&cli.out_dir.join("waves.png"), &waves_rgba, w, h)?;
    let score_h = (h / 2).max(1);
    let scores_rgba = render::render_scores(&eval.scores, w, score_h);
    save_png(&cli.out_dir.join("scores.png"), &scores_rgba, w, score_h)?;

    for format in ExportFormat::ALL {
        write_text(&cli.out_dir.join(format.file_name()), &format.render(&eval))?;
    }

    if cli.frames > 0 {
        let mut clock = Clock::new(cli.dt);
        let drawn = animation::animate(
            &params,
            disease,
            variant,
            &mut clock,
            cli.frames,
            Duration::from_millis(cli.delay_ms),
            |frame, layers| -> Result<()> {
                let rgba = render::render_waves(layers, disease.color, w, h)?;
                save_png(&cli.out_dir.join(format!("frame_{frame:03}.png")), &rgba, w, h)
            },
        );
        tracing::info!(drawn, requested = cli.frames, t = clock.t(), "animation finished");
    }

    Ok(())
}

fn main() -> ExitCode {
    resonance::logging::init_tracing();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
