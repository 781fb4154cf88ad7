//! Layout validation for deployment diagrams.
//!
//! Checks a component set for mechanical defects: overlapping cards, cards
//! or boundaries on the wrong side of the zone split, children escaping their
//! parent, and declarative containment rules that are not honored. Nothing
//! here mutates the layout.

use std::fmt;

use super::config::LayoutConfig;
use super::overlap::detect_overlaps;
use super::position::Scene;
use super::types::{BoundingBox, Point};
use crate::model::{Boundary, Component, Zone};

/// Which check produced a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Overlap,
    ZoneBoundary,
    BoundaryZone,
    Containment,
    ParentExists,
    MustContain,
    MustExclude,
    MissingRuleTarget,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Overlap => write!(f, "overlap"),
            Rule::ZoneBoundary => write!(f, "zone-boundary"),
            Rule::BoundaryZone => write!(f, "boundary-zone"),
            Rule::Containment => write!(f, "containment"),
            Rule::ParentExists => write!(f, "parent-exists"),
            Rule::MustContain => write!(f, "must-contain"),
            Rule::MustExclude => write!(f, "must-exclude"),
            Rule::MissingRuleTarget => write!(f, "missing-rule-target"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub rule: Rule,
    pub severity: Severity,
    /// Component and boundary ids involved
    pub subjects: Vec<String>,
    pub message: String,
    /// Suggested change that would clear the violation
    pub fix: Option<String>,
}

impl Violation {
    pub fn error(rule: Rule, subjects: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            rule,
            severity: Severity::Error,
            subjects,
            message: message.into(),
            fix: None,
        }
    }

    pub fn warning(rule: Rule, subjects: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            rule,
            severity: Severity::Warning,
            subjects,
            message: message.into(),
            fix: None,
        }
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn involves(&self, id: &str) -> bool {
        self.subjects.iter().any(|s| s == id)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComponentStats {
    pub total: usize,
    pub visible: usize,
}

/// Everything `validate` found
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
    pub stats: ComponentStats,
}

impl ValidationReport {
    /// True when there are no errors; warnings are allowed
    pub fn is_valid(&self) -> bool {
        !self.violations.iter().any(Violation::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Violations produced by `rule`
    pub fn by_rule(&self, rule: Rule) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.rule == rule)
    }
}

fn write_section<'a>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    violations: impl Iterator<Item = &'a Violation>,
) -> fmt::Result {
    let mut violations = violations.peekable();
    if violations.peek().is_none() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "{title}:")?;
    for (i, v) in violations.enumerate() {
        writeln!(f, "  {}. {}", i + 1, v)?;
        if let Some(fix) = &v.fix {
            writeln!(f, "     fix: {fix}")?;
        }
    }
    Ok(())
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Layout validation: {} components, {} visible",
            self.stats.total, self.stats.visible
        )?;
        writeln!(
            f,
            "Errors: {}, warnings: {}",
            self.error_count(),
            self.warning_count()
        )?;
        write_section(f, "Errors", self.errors())?;
        write_section(f, "Warnings", self.warnings())?;
        writeln!(f)?;
        if self.is_valid() {
            write!(f, "PASSED")
        } else {
            write!(f, "FAILED: {} error(s)", self.error_count())
        }
    }
}

/// Run every check against `scene`
pub fn validate(scene: &Scene) -> ValidationReport {
    let mut violations = Vec::new();
    check_overlaps(scene, &mut violations);
    check_component_zones(scene, &mut violations);
    check_boundary_zones(scene, &mut violations);
    check_containment(scene, &mut violations);
    check_rules(scene, &mut violations);

    ValidationReport {
        violations,
        stats: ComponentStats {
            total: scene.components.len(),
            visible: scene.components.iter().filter(|c| c.visible).count(),
        },
    }
}

// ── Overlap ───────────────────────────────────────────────────────

fn check_overlaps(scene: &Scene, violations: &mut Vec<Violation>) {
    for pair in detect_overlaps(scene) {
        let (Some(a), Some(b)) = (scene.component(&pair.first), scene.component(&pair.second))
        else {
            continue;
        };
        let pa = scene.absolute_position(a);
        let pb = scene.absolute_position(b);
        violations.push(
            Violation::error(
                Rule::Overlap,
                vec![a.id.clone(), b.id.clone()],
                format!(
                    "\"{}\" at ({}, {}) overlaps \"{}\" at ({}, {}) in {}",
                    a.label, pa.x, pa.y, b.label, pb.x, pb.y, pair.context
                ),
            )
            .with_fix(format!(
                "keep at least {}px between the two cards",
                scene.config.min_spacing
            )),
        );
    }
}

// ── Zones ─────────────────────────────────────────────────────────

fn check_component_zones(scene: &Scene, violations: &mut Vec<Violation>) {
    let config = scene.config;
    let split = config.zone_split_x;
    let width = config.component_size().width;

    for c in scene.components.iter().filter(|c| c.visible) {
        let abs = scene.absolute_position(c);
        match c.zone {
            Zone::Public if abs.x + width > split => {
                violations.push(
                    Violation::error(
                        Rule::ZoneBoundary,
                        vec![c.id.clone()],
                        format!(
                            "\"{}\" extends beyond the public zone (x + width = {} > {})",
                            c.label,
                            abs.x + width,
                            split
                        ),
                    )
                    .with_fix(format!("move \"{}\" to x <= {}", c.id, split - width)),
                );
            }
            Zone::Private if config.check_private_zone && abs.x < split => {
                violations.push(
                    Violation::error(
                        Rule::ZoneBoundary,
                        vec![c.id.clone()],
                        format!(
                            "\"{}\" is not in the private zone ({} < {})",
                            c.label, abs.x, split
                        ),
                    )
                    .with_fix(format!("move \"{}\" to x >= {}", c.id, split)),
                );
            }
            _ => {}
        }
    }
}

fn check_boundary_zones(scene: &Scene, violations: &mut Vec<Violation>) {
    let config = scene.config;
    let split = config.zone_split_x;

    for boundary in scene.boundaries {
        let bounds = scene.effective_box(boundary);
        match boundary.zone {
            Zone::Public if bounds.right() > split => {
                violations.push(
                    Violation::error(
                        Rule::BoundaryZone,
                        vec![boundary.id.clone()],
                        format!(
                            "boundary \"{}\" extends beyond the public zone ({} + {} = {} > {})",
                            boundary.label,
                            bounds.x,
                            bounds.width,
                            bounds.right(),
                            split
                        ),
                    )
                    .with_fix(format!(
                        "move or narrow \"{}\" so its right edge is <= {}",
                        boundary.id, split
                    )),
                );
            }
            Zone::Private if config.check_private_zone && bounds.x < split => {
                violations.push(
                    Violation::error(
                        Rule::BoundaryZone,
                        vec![boundary.id.clone()],
                        format!(
                            "boundary \"{}\" is not in the private zone ({} < {})",
                            boundary.label, bounds.x, split
                        ),
                    )
                    .with_fix(format!("move \"{}\" to x >= {}", boundary.id, split)),
                );
            }
            _ => {}
        }
    }
}

// ── Parent containment ────────────────────────────────────────────

fn check_containment(scene: &Scene, violations: &mut Vec<Violation>) {
    let card = scene.config.component_size();

    for c in scene.components.iter().filter(|c| c.visible) {
        let Some(parent) = &c.parent_boundary else {
            continue;
        };
        let Some(boundary) = scene.boundary(parent) else {
            violations.push(Violation::warning(
                Rule::ParentExists,
                vec![c.id.clone(), parent.clone()],
                format!(
                    "\"{}\" has parent boundary \"{}\" but that boundary does not exist",
                    c.label, parent
                ),
            ));
            continue;
        };

        let size = scene.effective_box(boundary).size();
        let inner = BoundingBox::from_origin(c.position, card);
        if !BoundingBox::from_origin(Point::default(), size).contains_box(&inner) {
            violations.push(
                Violation::error(
                    Rule::Containment,
                    vec![c.id.clone(), boundary.id.clone()],
                    format!(
                        "\"{}\" at ({}, {})-({}, {}) is outside \"{}\" (0, 0)-({}, {})",
                        c.label,
                        inner.x,
                        inner.y,
                        inner.right(),
                        inner.bottom(),
                        boundary.label,
                        size.width,
                        size.height
                    ),
                )
                .with_fix(format!(
                    "keep the relative position of \"{}\" at x >= 0 and y >= 0",
                    c.id
                )),
            );
        }
    }
}

// ── Declarative containment rules ─────────────────────────────────

fn check_rules(scene: &Scene, violations: &mut Vec<Violation>) {
    for boundary in scene.boundaries {
        let Some(rules) = &boundary.containment_rules else {
            continue;
        };

        for id in &rules.must_contain {
            let Some(c) = scene.component(id) else {
                violations.push(Violation::warning(
                    Rule::MissingRuleTarget,
                    vec![boundary.id.clone(), id.clone()],
                    format!(
                        "boundary \"{}\" should contain \"{}\" but that component does not exist",
                        boundary.label, id
                    ),
                ));
                continue;
            };
            if !c.has_parent(&boundary.id) {
                violations.push(
                    Violation::error(
                        Rule::MustContain,
                        vec![c.id.clone(), boundary.id.clone()],
                        format!(
                            "\"{}\" should have parent boundary \"{}\" but has \"{}\"",
                            c.label,
                            boundary.id,
                            c.parent_boundary.as_deref().unwrap_or("none")
                        ),
                    )
                    .with_fix(format!(
                        "set parent_boundary = \"{}\" on \"{}\"",
                        boundary.id, c.id
                    )),
                );
            }
        }

        for id in &rules.must_exclude {
            let Some(c) = scene.component(id) else {
                continue;
            };
            if c.has_parent(&boundary.id) {
                violations.push(
                    Violation::error(
                        Rule::MustExclude,
                        vec![c.id.clone(), boundary.id.clone()],
                        format!(
                            "\"{}\" should not be inside \"{}\"",
                            c.label, boundary.label
                        ),
                    )
                    .with_fix(format!("clear parent_boundary on \"{}\"", c.id)),
                );
            }
        }
    }
}

/// Outcome of validating one toggled-on component
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleCheck {
    pub component_id: String,
    /// Whether the component was already visible in the baseline
    pub was_visible: bool,
    pub report: ValidationReport,
}

impl ToggleCheck {
    /// Errors that involve the toggled component itself
    pub fn own_errors(&self) -> impl Iterator<Item = &Violation> {
        self.report.errors().filter(|v| v.involves(&self.component_id))
    }
}

/// Turn each component on in turn, the rest as given, and validate each set
pub fn sweep_toggles(
    components: &[Component],
    boundaries: &[Boundary],
    config: &LayoutConfig,
) -> Vec<ToggleCheck> {
    components
        .iter()
        .enumerate()
        .map(|(index, component)| {
            let mut toggled = components.to_vec();
            toggled[index].visible = true;
            let scene = Scene::new(&toggled, boundaries, config);
            ToggleCheck {
                component_id: component.id.clone(),
                was_visible: component.visible,
                report: validate(&scene),
            }
        })
        .collect()
}
