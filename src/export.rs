use std::fmt::Write as _;

use crate::Evaluation;
use crate::config::ParamKey;

pub const CSV_HEADER: &str =
    "molecule_id,disease,phase_lock,membrane,entropy,structural,charge,selectivity,stability,mw,logP,drug_like";

/// Column order of the numeric parameter fields in the CSV row.
pub const CSV_PARAMS: [ParamKey; 6] = [
    ParamKey::Membrane,
    ParamKey::Entropy,
    ParamKey::Structural,
    ParamKey::Charge,
    ParamKey::Selectivity,
    ParamKey::Stability,
];

/// Download artifacts: plain-text report, CSV row, SMILES line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Report,
    Csv,
    Smiles,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Report, ExportFormat::Csv, ExportFormat::Smiles];

    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Report => "report.txt",
            ExportFormat::Csv => "candidate.csv",
            ExportFormat::Smiles => "candidate.smi",
        }
    }

    pub fn render(self, eval: &Evaluation) -> String {
        match self {
            ExportFormat::Report => report(eval),
            ExportFormat::Csv => csv(eval),
            ExportFormat::Smiles => smiles_line(eval),
        }
    }
}

fn py_bool(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// One data row, no header.
pub fn csv_row(eval: &Evaluation) -> String {
    let p = &eval.params;
    let m = eval.candidate;
    let mut fields = vec![
        csv_field(m.id),
        csv_field(eval.disease.name),
        eval.scores.phase_lock.to_string(),
    ];
    fields.extend(CSV_PARAMS.iter().map(|&k| format!("{:?}", p.get(k))));
    fields.push(format!("{:?}", m.molecular_weight));
    fields.push(format!("{:?}", m.log_p));
    fields.push(py_bool(m.lipinski().drug_like()).to_string());
    fields.join(",")
}

/// Header plus the single row.
pub fn csv(eval: &Evaluation) -> String {
    format!("{CSV_HEADER}\n{}\n", csv_row(eval))
}

pub fn smiles_line(eval: &Evaluation) -> String {
    format!(
        "{}\t{}\t{}%\t{}\n",
        eval.candidate.id, eval.candidate.smiles, eval.scores.phase_lock, eval.disease.name
    )
}

pub fn report(eval: &Evaluation) -> String {
    let m = eval.candidate;
    let lip = m.lipinski();
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", eval.variant.title());
    let _ = writeln!(out, "{}", "=".repeat(eval.variant.title().len()));
    let _ = writeln!(out, "Disease profile: {}", eval.disease.name);
    let _ = writeln!(out);

    let _ = writeln!(out, "Parameters");
    for &key in eval.variant.params() {
        let _ = writeln!(out, "  {:<12} {:>6.2}", key.name(), eval.params.get(key));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Scores");
    for s in &eval.scores.scores {
        let _ = writeln!(out, "  {:<20} {:>5.1}%", s.kind.label(), s.value);
    }
    let _ = writeln!(out, "  {:<20} {:>5}%", "Phase Lock", eval.scores.phase_lock);
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Complexity: {} (total {:.2})",
        eval.complexity, eval.complexity_total
    );
    let _ = writeln!(out, "Candidate: {}", m.id);
    let _ = writeln!(out, "  SMILES: {}", m.smiles);
    let _ = writeln!(out, "  MW: {:.2} g/mol", m.molecular_weight);
    let _ = writeln!(out, "  logP: {:.2}", m.log_p);
    let _ = writeln!(out, "  H-bond donors/acceptors: {}/{}", m.h_bond_donors, m.h_bond_acceptors);
    let _ = writeln!(
        out,
        "  Lipinski violations: {} ({})",
        lip.violations(),
        if lip.drug_like() { "drug-like" } else { "not drug-like" }
    );
    out
}
