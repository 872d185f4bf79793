use resonance::classify::Complexity;
use resonance::config::{Params, Variant};
use resonance::export::{self, CSV_HEADER, ExportFormat};
use resonance::profiles;
use resonance::scoring::ScoreKind;
use resonance::{Error, evaluate, render};

fn reference_params() -> Params {
    Params {
        membrane: 2.5,
        entropy: 0.5,
        structural: 3.0,
        charge: -1.0,
        selectivity: 0.74,
        stability: 3.2,
        ..Params::default()
    }
}

#[test]
fn reference_dashboard_end_to_end() {
    let disease = profiles::disease("Glioblastoma").unwrap();
    assert_eq!(disease.chaos, 0.9);

    let eval = evaluate(&reference_params(), disease, Variant::Disease, 0.0);
    assert!((eval.scores.get(ScoreKind::Coupling).unwrap() - 45.0).abs() < 1e-9);
    assert_eq!(eval.complexity, Complexity::Advanced);
    assert!(eval.candidate.lipinski().drug_like());

    let csv = export::csv(&eval);
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some(CSV_HEADER));
    let row = lines.next().unwrap();
    assert!(row.ends_with(",True"));
    assert_eq!(row.split(',').count(), 12);
    assert_eq!(lines.next(), None);
}

#[test]
fn low_complexity_selects_simple_candidate() {
    let p = Params {
        membrane: 0.5,
        entropy: 0.1,
        structural: 1.0,
        charge: 0.0,
        selectivity: 0.2,
        stability: 1.0,
        ..Params::default()
    };
    let eval = evaluate(&p, profiles::default_disease(), Variant::Molecular, 0.0);
    assert_eq!(eval.complexity, Complexity::Simple);
    assert_eq!(eval.candidate.id, "SBCL-S01");
}

#[test]
fn non_drug_like_candidate_exports_false() {
    // total = 3 + 2.5 + 3 + 0 + 0 + 2 = 10.5 -> complex
    let p = Params {
        membrane: 3.0,
        entropy: 0.5,
        structural: 3.0,
        charge: 0.0,
        selectivity: 0.0,
        stability: 2.0,
        ..Params::default()
    };
    let eval = evaluate(&p, profiles::default_disease(), Variant::Disease, 0.0);
    assert_eq!(eval.complexity, Complexity::Complex);
    assert!(export::csv_row(&eval).ends_with(",False"));
    assert!(export::report(&eval).contains("Lipinski violations: 2 (not drug-like)"));
}

#[test]
fn every_format_renders_for_every_variant() {
    for variant in Variant::ALL {
        let eval = evaluate(&Params::default(), profiles::default_disease(), variant, 1.25);
        for format in ExportFormat::ALL {
            let text = format.render(&eval);
            assert!(text.ends_with('\n'), "{variant} {format:?}");
        }
        let line = export::smiles_line(&eval);
        assert_eq!(line.matches('\t').count(), 3);
    }
}

#[test]
fn charts_render_for_every_disease() {
    for disease in &profiles::DISEASES {
        let eval = evaluate(&Params::default(), disease, Variant::Disease, 0.0);
        let rgba = render::render_waves(&eval.layers, disease.color, 64, 32).unwrap();
        assert_eq!(rgba.len(), 64 * 32 * 4);
        assert_eq!(render::render_scores(&eval.scores, 64, 32).len(), 64 * 32 * 4);
    }
}

#[test]
fn unknown_names_are_rejected() {
    assert!(matches!(profiles::disease("Influenza"), Err(Error::UnknownDisease(_))));
    assert!(matches!("Klingon".parse::<profiles::InterfaceLanguage>(), Err(Error::UnknownLanguage(_))));
    assert!(matches!("heatmap".parse::<Variant>(), Err(Error::UnknownVariant(_))));
}

#[test]
fn preset_file_round_trip_through_validation() {
    let dir = std::env::temp_dir().join(format!("resonance-preset-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let good = dir.join("good.toml");
    std::fs::write(&good, "membrane = 4.0\nselectivity = 0.9\n").unwrap();
    let p = Params::from_toml_file(&good).unwrap();
    assert_eq!(p.membrane, 4.0);
    assert_eq!(p.selectivity, 0.9);

    let bad = dir.join("bad.toml");
    std::fs::write(&bad, "charge = 3.5\n").unwrap();
    assert!(matches!(Params::from_toml_file(&bad), Err(Error::OutOfRange { param: "charge", .. })));

    let broken = dir.join("broken.toml");
    std::fs::write(&broken, "membrane = \"wide\"\n").unwrap();
    assert!(matches!(Params::from_toml_file(&broken), Err(Error::Toml { .. })));

    assert!(matches!(Params::from_toml_file(&dir.join("missing.toml")), Err(Error::Io { .. })));

    std::fs::remove_dir_all(&dir).unwrap();
}
