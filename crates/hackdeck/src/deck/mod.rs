use serde::Deserialize;
use thiserror::Error;

/// The deck shipped with the binary.
const BUILTIN_DECK: &str = include_str!("../../assets/deck.yaml");

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to parse deck: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("deck contains no slides")]
    Empty,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub meta: DeckMeta,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub footer: Option<String>,
}

/// One slide of the deck. The variant decides which layout draws it.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Slide {
    Title(TitleSlide),
    Content(ContentSlide),
    Stats(StatsSlide),
    Chart(ChartSlide),
    Matrix(MatrixSlide),
    Map(MapSlide),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    Title,
    Content,
    Stats,
    Chart,
    Matrix,
    Map,
}

impl SlideKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::Stats => "stats",
            Self::Chart => "chart",
            Self::Matrix => "matrix",
            Self::Map => "map",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleSlide {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub subheading: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentSlide {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub head: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsSlide {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stat {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartSlide {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub intro: String,
    pub chart: Chart,
    #[serde(default)]
    pub footer: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Chart {
    Pie {
        #[serde(default)]
        segments: Vec<PieSegment>,
    },
    Bar {
        #[serde(default)]
        bars: Vec<Bar>,
    },
    Image {
        #[serde(default)]
        src: String,
        #[serde(default)]
        alt: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct PieSegment {
    #[serde(default)]
    pub label: String,
    /// Share of the whole, in percent.
    pub value: f32,
    pub color: ColorTag,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bar {
    #[serde(default)]
    pub label: String,
    /// Bar height as a percentage of the plot height.
    pub value: f32,
    #[serde(default)]
    pub caption: String,
    pub color: ColorTag,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatrixSlide {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub intro: Option<String>,
    #[serde(default)]
    pub cells: Vec<MatrixCell>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatrixCell {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub color: ColorTag,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapSlide {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub mode: MapMode,
    #[serde(default)]
    pub steps: Vec<MapStep>,
}

/// What a map slide is framing. Decides the highlight palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapMode {
    #[default]
    Concentration,
    Northeast,
    Crisis,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MapStep {
    /// Element id in the map document, e.g. `IN-UP`.
    #[serde(default)]
    pub region_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stat: String,
    #[serde(default)]
    pub insight: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Red,
    Orange,
    Amber,
    Green,
    Teal,
    Blue,
    Indigo,
    Purple,
    Slate,
}

impl Slide {
    pub fn kind(&self) -> SlideKind {
        match self {
            Self::Title(_) => SlideKind::Title,
            Self::Content(_) => SlideKind::Content,
            Self::Stats(_) => SlideKind::Stats,
            Self::Chart(_) => SlideKind::Chart,
            Self::Matrix(_) => SlideKind::Matrix,
            Self::Map(_) => SlideKind::Map,
        }
    }

    pub fn heading(&self) -> &str {
        match self {
            Self::Title(s) => &s.heading,
            Self::Content(s) => &s.heading,
            Self::Stats(s) => &s.heading,
            Self::Chart(s) => &s.heading,
            Self::Matrix(s) => &s.heading,
            Self::Map(s) => &s.heading,
        }
    }

    /// Steps of a map slide, `None` for every other kind.
    pub fn map_steps(&self) -> Option<&[MapStep]> {
        match self {
            Self::Map(m) => Some(&m.steps),
            _ => None,
        }
    }
}

impl Deck {
    /// Load the deck compiled into the binary.
    pub fn builtin() -> Result<Self, DeckError> {
        Self::from_yaml(BUILTIN_DECK)
    }

    pub fn from_yaml(source: &str) -> Result<Self, DeckError> {
        let deck: Deck = serde_yaml::from_str(source)?;
        if deck.is_empty() {
            return Err(DeckError::Empty);
        }
        for (i, slide) in deck.slides.iter().enumerate() {
            if slide.map_steps().is_some_and(|steps| steps.is_empty()) {
                tracing::warn!(slide = i + 1, "map slide has no steps");
            }
        }
        tracing::debug!(slides = deck.slides.len(), "deck loaded");
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn display_title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or("hackdeck")
    }

    /// Every chart image path referenced by the deck.
    pub fn image_sources(&self) -> impl Iterator<Item = &str> {
        self.slides.iter().filter_map(|s| match s {
            Slide::Chart(ChartSlide {
                chart: Chart::Image { src, .. },
                ..
            }) => Some(src.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_deck_loads() {
        let deck = Deck::builtin().unwrap();
        assert_eq!(deck.len(), 21);
        assert_eq!(deck.slides[0].kind(), SlideKind::Title);
        assert_eq!(deck.slides[20].kind(), SlideKind::Title);
        assert_eq!(deck.slides[0].heading(), "FORENSIC GOVERNANCE");
        assert!(deck.meta.footer.is_some());
    }

    #[test]
    fn builtin_map_steps_reference_regions() {
        let deck = Deck::builtin().unwrap();
        let maps: Vec<&MapSlide> = deck
            .slides
            .iter()
            .filter_map(|s| match s {
                Slide::Map(m) => Some(m),
                _ => None,
            })
            .collect();
        assert_eq!(maps.len(), 3);
        assert_eq!(maps[1].mode, MapMode::Northeast);
        for map in maps {
            assert!(!map.steps.is_empty());
            assert!(map.steps.iter().all(|s| s.region_id.starts_with("IN-")));
        }
    }

    #[test]
    fn builtin_chart_kinds() {
        let deck = Deck::builtin().unwrap();
        let charts: Vec<&Chart> = deck
            .slides
            .iter()
            .filter_map(|s| match s {
                Slide::Chart(c) => Some(&c.chart),
                _ => None,
            })
            .collect();
        assert_eq!(charts.len(), 2);
        assert!(matches!(charts[0], Chart::Pie { segments } if segments.len() == 3));
        assert!(matches!(charts[1], Chart::Image { .. }));
        assert_eq!(deck.image_sources().collect::<Vec<_>>(), vec!["/nov-chart.jpeg"]);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let yaml = "slides:\n  - kind: content\n    heading: Only a heading\n";
        let deck = Deck::from_yaml(yaml).unwrap();
        match &deck.slides[0] {
            Slide::Content(c) => {
                assert_eq!(c.heading, "Only a heading");
                assert!(c.intro.is_empty());
                assert!(c.points.is_empty());
            }
            other => panic!("unexpected slide: {other:?}"),
        }
    }

    #[test]
    fn nested_chart_tag_parses() {
        let yaml = r#"
slides:
  - kind: chart
    heading: Bars
    chart:
      type: bar
      bars:
        - { label: Oct, value: 12, caption: "1x", color: blue }
        - { label: Nov, value: 88, caption: "7x", color: red }
    footer: Spike then crash
"#;
        let deck = Deck::from_yaml(yaml).unwrap();
        let Slide::Chart(chart) = &deck.slides[0] else {
            panic!("expected chart slide");
        };
        assert!(matches!(&chart.chart, Chart::Bar { bars } if bars.len() == 2));
        assert_eq!(chart.footer.as_deref(), Some("Spike then crash"));
    }

    #[test]
    fn empty_deck_is_rejected() {
        assert!(matches!(Deck::from_yaml("slides: []"), Err(DeckError::Empty)));
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let yaml = "slides:\n  - kind: video\n    heading: Nope\n";
        assert!(matches!(Deck::from_yaml(yaml), Err(DeckError::Parse(_))));
    }

    #[test]
    fn map_slide_without_steps_is_accepted() {
        let yaml = "slides:\n  - kind: map\n    heading: Empty map\n";
        let deck = Deck::from_yaml(yaml).unwrap();
        assert_eq!(deck.slides[0].map_steps().map(<[MapStep]>::len), Some(0));
    }
}
