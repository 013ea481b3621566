//! Scenario files: a viewport, optional tunables and a list of anchors to
//! resolve.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use perch::{
    MeasureOutcome, Menu, MenuEntry, MenuMetrics, Placement, PlacementConfig, PopoverArena, PopoverKind,
    Point, Rect, Side, Size,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub config: PlacementConfig,
    pub viewport: Size,
    #[serde(default)]
    pub metrics: MenuMetrics,
    pub cases: Vec<Case>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Case {
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: PopoverKind,
    pub anchor: Rect,
    /// Overrides the kind's default side.
    #[serde(default)]
    pub side: Option<Side>,
    /// Size reported as measured after the first pass.
    #[serde(default)]
    pub content: Option<Size>,
    /// Menu entries used to estimate the first pass.
    #[serde(default)]
    pub menu: Option<Vec<MenuEntry>>,
}

fn default_kind() -> PopoverKind {
    PopoverKind::Menu
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseReport {
    pub name: String,
    pub kind: PopoverKind,
    pub first: Placement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<Point>,
}

/// Read a scenario from `path`, or from stdin when `path` is `-`.
pub fn load(path: &Path) -> Result<Scenario> {
    let json = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read scenario from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file '{}'", path.display()))?
    };
    parse(&json).with_context(|| format!("Invalid scenario '{}'", path.display()))
}

pub fn parse(json: &str) -> Result<Scenario> {
    let scenario: Scenario = serde_json::from_str(json)?;
    scenario.config.validate()?;
    Ok(scenario)
}

impl Scenario {
    pub fn run(&self) -> Result<Vec<CaseReport>> {
        self.cases
            .iter()
            .map(|case| self.run_case(case).with_context(|| format!("Case '{}' failed", case.name)))
            .collect()
    }

    fn run_case(&self, case: &Case) -> Result<CaseReport> {
        let mut arena = PopoverArena::new(self.viewport, self.config);

        let id = match case.kind {
            PopoverKind::Menu => arena.create_menu(),
            PopoverKind::Submenu => {
                // Submenus need an open parent; its geometry does not affect
                // the submenu's placement.
                let parent = arena.create_menu();
                arena.open(parent, case.anchor)?;
                arena.create_submenu(parent)?
            }
        };
        if let Some(side) = case.side {
            arena.set_preferred_side(id, side)?;
        }

        let estimate = case
            .menu
            .as_ref()
            .map(|entries| Menu::from_entries(entries.clone()).estimate_size(&self.metrics));
        let ticket = match estimate {
            Some(estimate) => arena.open_with_estimate(id, case.anchor, estimate)?,
            None => arena.open(id, case.anchor)?,
        };
        let Some(first) = arena.placement(id) else {
            bail!("{id} has no placement after opening");
        };
        tracing::debug!(case = %case.name, side = ?first.side, "first pass");

        let (measured, shift) = match case.content {
            Some(size) => match arena.content_measured(ticket, size)? {
                MeasureOutcome::Applied { placement, shift } => (Some(placement), Some(shift)),
                MeasureOutcome::Stale => bail!("measurement for {id} went stale"),
            },
            None => (None, None),
        };

        Ok(CaseReport { name: case.name.clone(), kind: case.kind, first, measured, shift })
    }
}
