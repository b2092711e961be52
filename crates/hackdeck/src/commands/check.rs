use anyhow::Result;
use colored::Colorize;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::app::Settings;
use crate::deck::Deck;
use crate::map::{MAP_FILE, MapDocument};
use crate::render::image_cache::ImageCache;

/// ISO 3166-2 subdivision code, e.g. `IN-UP`.
static REGION_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{2}-[A-Z0-9]{1,3}$").expect("region id regex should compile")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Check the deck's map steps and chart images against the files in
/// `assets_dir`. Regions missing from the map are warnings since the
/// presentation skips them.
pub fn diagnose(deck: &Deck, assets_dir: &Path) -> Vec<Finding> {
    let mut findings = Vec::new();

    let map_path = assets_dir.join(MAP_FILE);
    let document = match MapDocument::open(&map_path) {
        Ok(doc) => {
            findings.push(Finding::new(
                Severity::Ok,
                format!("map {} parsed", map_path.display()),
            ));
            Some(doc)
        }
        Err(e) => {
            findings.push(Finding::new(Severity::Error, format!("map: {e}")));
            None
        }
    };

    for (i, slide) in deck.slides.iter().enumerate() {
        let Some(steps) = slide.map_steps() else {
            continue;
        };
        for (j, step) in steps.iter().enumerate() {
            let at = format!("slide {} point {}", i + 1, j + 1);
            let id = step.region_id.as_str();
            if !REGION_ID.is_match(id) {
                findings.push(Finding::new(
                    Severity::Error,
                    format!("{at}: region id '{id}' is not an ISO 3166-2 code"),
                ));
                continue;
            }
            match &document {
                Some(doc) if !doc.has_region(id) => findings.push(Finding::new(
                    Severity::Warning,
                    format!("{at}: region {id} ({}) is not in the map", step.name),
                )),
                Some(_) => findings.push(Finding::new(
                    Severity::Ok,
                    format!("{at}: {id} ({})", step.name),
                )),
                None => {}
            }
        }
    }

    for src in deck.image_sources() {
        let path = ImageCache::resolve(assets_dir, src);
        if path.is_file() {
            findings.push(Finding::new(
                Severity::Ok,
                format!("image {}", path.display()),
            ));
        } else {
            findings.push(Finding::new(
                Severity::Warning,
                format!("image {} is missing, a placeholder is drawn", path.display()),
            ));
        }
    }

    findings
}

pub fn run(settings: &Settings) -> Result<()> {
    let deck = Deck::builtin()?;
    println!(
        "Checking {} against {}",
        deck.display_title().bold(),
        settings.assets_dir.display()
    );

    let findings = diagnose(&deck, &settings.assets_dir);
    for finding in &findings {
        let mark = match finding.severity {
            Severity::Ok => "\u{2713}".green(),
            Severity::Warning => "!".yellow().bold(),
            Severity::Error => "\u{2717}".red().bold(),
        };
        println!("  {mark} {}", finding.message);
    }

    let count = |s: Severity| findings.iter().filter(|f| f.severity == s).count();
    let (warnings, errors) = (count(Severity::Warning), count(Severity::Error));
    if errors > 0 {
        anyhow::bail!("{errors} error(s), {warnings} warning(s)");
    }
    if warnings > 0 {
        println!("{}", format!("{warnings} warning(s)").yellow());
    } else {
        println!("{}", "All assets look good.".green().bold());
    }
    Ok(())
}
