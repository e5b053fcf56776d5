use std::{fmt, path::Path, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

const DEFAULT_CATALOG: &str = include_str!("../data/projects.json");
const INTRO_TEXT: &str = include_str!("../data/intro.txt");

static SOURCE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href="([^"]*github\.com[^"]*)""#).expect("source link pattern is valid")
});
static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#).expect("anchor pattern is valid")
});
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

impl Project {
    #[cfg(test)]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            images: Vec::new(),
            video: None,
            description: None,
            details: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_details(mut self, details: &[&str]) -> Self {
        self.details = details.iter().map(ToString::to_string).collect();
        self
    }

    pub fn initial(&self) -> Option<char> {
        self.title.chars().next().and_then(|c| c.to_uppercase().next())
    }

    pub fn source_link(&self) -> Option<&str> {
        self.details
            .iter()
            .filter(|detail| detail.contains("<a href="))
            .find_map(|detail| SOURCE_LINK.captures(detail))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    pub fn plain_details(&self) -> Vec<String> {
        self.details.iter().map(|detail| plain_text(detail)).collect()
    }
}

/// Renders anchors as `label (url)` and drops any other markup.
pub fn plain_text(fragment: &str) -> String {
    let linked = ANCHOR.replace_all(fragment, "$2 ($1)");
    TAG.replace_all(&linked, "").trim().to_string()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    pub fn new(projects: Vec<Project>) -> Result<Self, CatalogError> {
        if let Some(index) = projects.iter().position(|p| p.title.trim().is_empty()) {
            return Err(CatalogError::EmptyTitle { index });
        }
        Ok(Self { projects })
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let projects: Vec<Project> =
            serde_json::from_str(content).map_err(|e| CatalogError::Json(e.to_string()))?;
        Self::new(projects)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Read(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_CATALOG)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, index: usize) -> Option<&Project> {
        self.projects.get(index)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Intro,
    Work,
    Resume,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Intro,
        Section::Work,
        Section::Resume,
        Section::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Intro => "Intro",
            Section::Work => "Projects",
            Section::Resume => "Resume",
            Section::Contact => "Contact",
        }
    }

    pub fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Section {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Section {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Intro,
    Work,
    Resume,
    Contact,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Intro => "intro",
            View::Work => "work",
            View::Resume => "resume",
            View::Contact => "contact",
        }
    }

    pub fn section(self) -> Option<Section> {
        match self {
            View::Home => None,
            View::Intro => Some(Section::Intro),
            View::Work => Some(Section::Work),
            View::Resume => Some(Section::Resume),
            View::Contact => Some(Section::Contact),
        }
    }
}

impl From<Section> for View {
    fn from(section: Section) -> Self {
        match section {
            Section::Intro => View::Intro,
            Section::Work => View::Work,
            Section::Resume => View::Resume,
            Section::Contact => View::Contact,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view '{0}' (expected home, intro, work, resume or contact)")]
pub struct ParseViewError(pub String);

impl FromStr for View {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(View::Home),
            "intro" => Ok(View::Intro),
            "work" | "projects" => Ok(View::Work),
            "resume" | "about" => Ok(View::Resume),
            "contact" => Ok(View::Contact),
            _ => Err(ParseViewError(s.to_string())),
        }
    }
}

impl FromStr for Section {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<View>()?
            .section()
            .ok_or_else(|| ParseViewError(s.to_string()))
    }
}

pub fn intro_paragraphs() -> Vec<&'static str> {
    INTRO_TEXT
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
