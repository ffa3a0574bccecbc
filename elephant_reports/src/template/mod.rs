use std::{collections::HashMap, path::{Path, PathBuf}, process::Command};

use anyhow::Context as _;
use serde::Serialize;
use serde_json::Value;
use tera::{Context, Tera};
use tracing::{debug, info};

use elephant_entities::prelude::OrderedRoster;


const PRESENTATION_TEMPLATE: &str = "presentation.tex";
const OUTPUT_STEM: &str = "presentation";
const AUX_EXTENSIONS: [&str; 7] = ["aux", "log", "nav", "out", "snm", "toc", "tex"];

fn escape_latex(val: &str) -> String {
    let mut out = String::with_capacity(val.len());
    for c in val.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            },
            _ => out.push(c),
        }
    }
    out
}

fn latex_escape<'a, 'b>(val: &'a Value, _args: &'b HashMap<String, Value>) -> tera::Result<Value> {
    match val {
        Value::String(s) => Ok(Value::String(escape_latex(s))),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        _ => Err(tera::Error::call_filter("latex_escape", anyhow::Error::msg(format!("Invalid argument {:?}. Should be string.", val)))),
    }
}

#[derive(Debug, Serialize)]
struct TurnSlide<'a> {
    current: &'a str,
    next: &'a str,
}

#[derive(Debug, Serialize)]
struct DeckInfo<'a> {
    title: &'a str,
    turns: Vec<TurnSlide<'a>>,
    first: &'a str,
}

/// What `TurnOrderDeck::export` left on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportedDeck {
    Source(PathBuf),
    Pdf(PathBuf),
}

impl ExportedDeck {
    pub fn path(&self) -> &Path {
        match self {
            ExportedDeck::Source(path) | ExportedDeck::Pdf(path) => path,
        }
    }
}

/// Beamer slides that walk through the turn order, one slide per participant.
pub struct TurnOrderDeck {
    title: String,
    tera: Tera,
}

impl TurnOrderDeck {
    pub fn new<S: Into<String>>(title: S) -> Result<Self, anyhow::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(PRESENTATION_TEMPLATE, include_str!("templates/presentation.tex"))?;
        tera.register_filter("latex_escape", latex_escape);
        tera.autoescape_on(vec![]);

        Ok(Self {
            title: title.into(),
            tera,
        })
    }

    pub fn render(&self, ordered: &OrderedRoster) -> Result<String, anyhow::Error> {
        let info = DeckInfo {
            title: &self.title,
            turns: ordered.turns().map(|turn| TurnSlide {
                current: &turn.current.name,
                next: &turn.next.name,
            }).collect(),
            first: &ordered.first().name,
        };

        Ok(self.tera.render(PRESENTATION_TEMPLATE, &Context::from_serialize(&info)?)?)
    }

    /// Writes `presentation.tex` into `output_dir` and, if asked to, compiles it
    /// with `pdflatex`. After a successful compile only the PDF remains.
    pub fn export(&self, ordered: &OrderedRoster, output_dir: &Path, compile_pdf: bool) -> Result<ExportedDeck, anyhow::Error> {
        std::fs::create_dir_all(output_dir)?;

        let source_path = output_dir.join(format!("{}.tex", OUTPUT_STEM));
        std::fs::write(&source_path, self.render(ordered)?)?;
        debug!("Wrote {}", source_path.display());

        if !compile_pdf {
            return Ok(ExportedDeck::Source(source_path));
        }

        let status = Command::new("pdflatex")
            .arg("-interaction=nonstopmode")
            .arg(format!("{}.tex", OUTPUT_STEM))
            .current_dir(output_dir)
            .status()
            .context("Could not run pdflatex")?;
        if !status.success() {
            anyhow::bail!("pdflatex failed with {}, the source is kept at {}", status, source_path.display());
        }

        for extension in AUX_EXTENSIONS {
            let path = output_dir.join(format!("{}.{}", OUTPUT_STEM, extension));
            if path.exists() {
                std::fs::remove_file(&path)?;
            }
        }

        let pdf_path = output_dir.join(format!("{}.pdf", OUTPUT_STEM));
        info!("Presentation written to {}", pdf_path.display());
        Ok(ExportedDeck::Pdf(pdf_path))
    }
}
