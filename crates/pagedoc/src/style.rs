//! Style grouping codec: per-path CSS property rows to stylesheet text.
//!
//! A narrow sibling of the document builder: rows sharing a path are
//! grouped, breakpoint-less rows supply base declarations, and rows with a
//! breakpoint nest inside a width-gated `@media` block. This codec only
//! needs grouping plus two-level emission, not full tree construction.

use heck::ToKebabCase;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named responsive breakpoints, each gated at a maximum pixel width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breakpoint {
    /// Up to 768px.
    Tablet,
    /// Up to 480px.
    Mobile,
}

impl Breakpoint {
    /// The `max-width` pixel value gating this breakpoint.
    #[inline]
    pub fn max_width_px(self) -> u32 {
        match self {
            Breakpoint::Tablet => 768,
            Breakpoint::Mobile => 480,
        }
    }

    /// All breakpoints in emission order (widest first).
    pub fn all() -> [Breakpoint; 2] {
        [Breakpoint::Tablet, Breakpoint::Mobile]
    }
}

/// One persisted style row: a path, an optional breakpoint, and a set of
/// camelCase CSS property names with their values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRow {
    /// The content path this row styles.
    pub path: String,
    /// Base declarations when `None`, breakpoint-gated otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpoint: Option<Breakpoint>,
    /// camelCase property name → value.
    pub properties: BTreeMap<String, String>,
}

impl StyleRow {
    /// Create a base (non-breakpoint) row.
    pub fn base(path: impl Into<String>, properties: BTreeMap<String, String>) -> Self {
        Self {
            path: path.into(),
            breakpoint: None,
            properties,
        }
    }

    /// Create a breakpoint-gated row.
    pub fn at(
        path: impl Into<String>,
        breakpoint: Breakpoint,
        properties: BTreeMap<String, String>,
    ) -> Self {
        Self {
            path: path.into(),
            breakpoint: Some(breakpoint),
            properties,
        }
    }
}

struct StyleGroup<'a> {
    path: &'a str,
    base: BTreeMap<&'a str, &'a str>,
    gated: BTreeMap<Breakpoint, BTreeMap<&'a str, &'a str>>,
}

/// Render grouped style rows as stylesheet text.
///
/// Rows are grouped by path in first-seen order. Each group emits its base
/// declarations, then one `@media (max-width: Npx)` block per breakpoint
/// present. Property names are converted from camelCase to kebab-case.
///
/// # Examples
///
/// ```
/// use pagedoc::{render_stylesheet, Breakpoint, StyleRow};
/// use std::collections::BTreeMap;
///
/// let mut props = BTreeMap::new();
/// props.insert("fontSize".to_owned(), "18px".to_owned());
/// let css = render_stylesheet(&[StyleRow::base("hero.title", props)]);
/// assert!(css.contains("font-size: 18px;"));
/// ```
pub fn render_stylesheet(rows: &[StyleRow]) -> String {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: BTreeMap<&str, StyleGroup<'_>> = BTreeMap::new();

    for row in rows {
        let group = groups.entry(&row.path).or_insert_with(|| {
            order.push(&row.path);
            StyleGroup {
                path: &row.path,
                base: BTreeMap::new(),
                gated: BTreeMap::new(),
            }
        });
        let target = match row.breakpoint {
            None => &mut group.base,
            Some(bp) => group.gated.entry(bp).or_default(),
        };
        for (name, value) in &row.properties {
            target.insert(name, value);
        }
    }

    let mut css = String::new();
    for path in order {
        let group = &groups[path];
        if !group.base.is_empty() {
            emit_block(&mut css, &selector_for(group.path), &group.base, 0);
        }
        for bp in Breakpoint::all() {
            if let Some(props) = group.gated.get(&bp) {
                css.push_str(&format!("@media (max-width: {}px) {{\n", bp.max_width_px()));
                emit_block(&mut css, &selector_for(group.path), props, 1);
                css.push_str("}\n\n");
            }
        }
    }
    css
}

fn selector_for(path: &str) -> String {
    format!("[data-path=\"{path}\"]")
}

fn emit_block(css: &mut String, selector: &str, props: &BTreeMap<&str, &str>, depth: usize) {
    let pad = "  ".repeat(depth);
    css.push_str(&format!("{pad}{selector} {{\n"));
    for (name, value) in props {
        css.push_str(&format!("{pad}  {}: {value};\n", name.to_kebab_case()));
    }
    css.push_str(&format!("{pad}}}\n"));
    if depth == 0 {
        css.push('\n');
    }
}
