//! Declarative YAML test specification

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{E2eError, E2eResult};
use crate::pages::AppPage;

/// A complete test specification parsed from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSpec {
    /// Unique name for this test
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering tests
    #[serde(default)]
    pub tags: Vec<String>,

    /// Steps to execute in order
    pub steps: Vec<TestStep>,
}

/// A single step in a test, expressed in page-object terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    /// Navigate to a screen through the sidebar
    OpenPage { page: AppPage },

    /// Submit the "Using the Grid" form
    SubmitGridForm {
        email: String,
        password: String,
        option: String,
    },

    /// Submit the "Inline form"
    SubmitInlineForm {
        name: String,
        email: String,
        #[serde(default)]
        remember_me: bool,
    },

    /// Pick today + offset in the form picker
    SelectDate { offset_days: i64 },

    /// Pick a start and end in the range picker
    SelectRange {
        start_offset_days: i64,
        end_offset_days: i64,
    },

    /// Fixed pause (use sparingly)
    Wait { seconds: u64 },

    /// Log a message (for debugging)
    Log { message: String },
}

impl TestStep {
    /// Short label used in results and logs
    pub fn name(&self) -> String {
        match self {
            TestStep::OpenPage { page } => format!("open_page:{}", page.title()),
            TestStep::SubmitGridForm { email, .. } => format!("submit_grid_form:{}", email),
            TestStep::SubmitInlineForm { email, .. } => format!("submit_inline_form:{}", email),
            TestStep::SelectDate { offset_days } => format!("select_date:{:+}", offset_days),
            TestStep::SelectRange {
                start_offset_days,
                end_offset_days,
            } => format!("select_range:{:+}..{:+}", start_offset_days, end_offset_days),
            TestStep::Wait { seconds } => format!("wait:{}s", seconds),
            TestStep::Log { message } => {
                format!("log:{}", message.chars().take(30).collect::<String>())
            }
        }
    }
}

impl TestSpec {
    /// Parse a test spec from YAML string
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        let spec: Self = serde_yaml::from_str(yaml)?;
        if spec.steps.is_empty() {
            return Err(E2eError::SpecParse(format!("{}: no steps", spec.name)));
        }
        Ok(spec)
    }

    /// Parse a test spec from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
            .map_err(|e| E2eError::SpecParse(format!("{}: {}", path.display(), e)))
    }

    /// Load all test specs from a directory, in path order
    pub fn load_all(dir: &Path) -> E2eResult<Vec<Self>> {
        let mut specs = Vec::new();

        for entry in walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            let spec = Self::from_file(entry.path())?;
            specs.push(spec);
        }

        Ok(specs)
    }

    /// Filter specs by tag
    pub fn filter_by_tag<'a>(specs: &'a [Self], tag: &str) -> Vec<&'a Self> {
        specs.iter().filter(|s| s.tags.iter().any(|t| t == tag)).collect()
    }
}
