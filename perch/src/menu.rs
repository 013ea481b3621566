//! Dropdown menu model.
//!
//! Entries are a tagged tree (items, labels, separators, groups, submenus).
//! [`Menu`] flattens the tree into rows for hover navigation, activation and
//! size estimation. The estimate feeds the first placement pass so the panel
//! lands close to where the measured pass will put it.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::primitives::{Rect, Size};

/// Opaque handle to content rendered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeHandle(pub u64);

/// Child content of an entry: plain text, or a host node of unknown width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Content {
    Text(String),
    Node(NodeHandle),
}

impl Content {
    pub fn text(&self) -> Option<&str> {
        match self {
            Content::Text(s) => Some(s),
            Content::Node(_) => None,
        }
    }

    fn width(&self, metrics: &MenuMetrics) -> f32 {
        match self {
            Content::Text(s) => s.width() as f32 * metrics.char_width,
            Content::Node(_) => metrics.node_width,
        }
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Text(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Text(s)
    }
}

impl From<NodeHandle> for Content {
    fn from(node: NodeHandle) -> Self {
        Content::Node(node)
    }
}

/// A selectable row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub content: Content,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub shortcut: Option<String>,
    /// Reported on selection. Falls back to the text content.
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub destructive: bool,
}

impl MenuItem {
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
            icon: None,
            shortcut: None,
            value: None,
            disabled: false,
            destructive: false,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn destructive(mut self, destructive: bool) -> Self {
        self.destructive = destructive;
        self
    }

    fn selection_value(&self) -> Option<String> {
        self.value.clone().or_else(|| self.content.text().map(str::to_string))
    }
}

/// A row that opens a nested menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubMenu {
    pub trigger: Content,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub entries: Vec<MenuEntry>,
}

impl SubMenu {
    pub fn new(trigger: impl Into<Content>) -> Self {
        Self { trigger: trigger.into(), icon: None, entries: Vec::new() }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn entry(mut self, entry: MenuEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn item(self, item: MenuItem) -> Self {
        self.entry(MenuEntry::Item(item))
    }

    /// The nested panel as a menu of its own.
    pub fn to_menu(&self) -> Menu {
        Menu::from_entries(self.entries.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuEntry {
    Item(MenuItem),
    Label {
        content: Content,
        #[serde(default)]
        inset: bool,
    },
    Separator,
    Group(Vec<MenuEntry>),
    Sub(SubMenu),
}

/// One flattened row of a menu panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Item(MenuItem),
    Label { content: Content, inset: bool },
    Separator,
    /// Vertical padding at the start or end of a group.
    GroupEdge,
    Sub(SubMenu),
}

impl Row {
    /// Rows that can take hover and be activated.
    pub fn is_interactive(&self) -> bool {
        match self {
            Row::Item(item) => !item.disabled,
            Row::Sub(_) => true,
            Row::Label { .. } | Row::Separator | Row::GroupEdge => false,
        }
    }

    fn height(&self, m: &MenuMetrics) -> f32 {
        match self {
            Row::Item(_) => m.item_height,
            Row::Sub(_) => m.sub_trigger_height,
            Row::Label { .. } => m.label_height,
            Row::Separator => m.separator_height,
            Row::GroupEdge => m.group_padding,
        }
    }

    fn width(&self, m: &MenuMetrics) -> f32 {
        let icon = |icon: &Option<String>| if icon.is_some() { m.icon_size + m.icon_gap } else { 0.0 };
        match self {
            Row::Item(item) => {
                let shortcut = item.shortcut.as_deref().map_or(0.0, |s| {
                    m.icon_gap + s.width() as f32 * m.shortcut_char_width
                });
                m.item_padding_x * 2.0 + icon(&item.icon) + item.content.width(m) + shortcut
            }
            Row::Sub(sub) => {
                m.label_padding_x * 2.0
                    + icon(&sub.icon)
                    + sub.trigger.width(m)
                    + m.icon_gap
                    + m.icon_size
            }
            Row::Label { content, inset } => {
                let left = if *inset { m.inset_padding } else { m.label_padding_x };
                left + m.label_padding_x + content.width(m)
            }
            Row::Separator | Row::GroupEdge => 0.0,
        }
    }
}

/// Pixel metrics used to estimate a panel's size before the host measures it.
///
/// Defaults follow the toolkit's menu styles: 16px icons, 20px text lines,
/// `py-2` items, `py-1.5` labels and sub-triggers, `p-1` panel padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuMetrics {
    pub item_height: f32,
    pub sub_trigger_height: f32,
    pub label_height: f32,
    pub separator_height: f32,
    pub group_padding: f32,
    pub panel_padding: f32,
    pub item_padding_x: f32,
    pub label_padding_x: f32,
    pub inset_padding: f32,
    pub icon_size: f32,
    pub icon_gap: f32,
    pub char_width: f32,
    pub shortcut_char_width: f32,
    /// Width assumed for [`Content::Node`] children.
    pub node_width: f32,
    pub min_width: f32,
}

impl Default for MenuMetrics {
    fn default() -> Self {
        Self {
            item_height: 36.0,
            sub_trigger_height: 32.0,
            label_height: 32.0,
            separator_height: 9.0,
            group_padding: 4.0,
            panel_padding: 4.0,
            item_padding_x: 12.0,
            label_padding_x: 8.0,
            inset_padding: 32.0,
            icon_size: 16.0,
            icon_gap: 8.0,
            char_width: 8.4,
            shortcut_char_width: 7.2,
            node_width: 120.0,
            min_width: 128.0,
        }
    }
}

/// Hover movement for keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

/// What activating a row means for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// An item was chosen: record the value and close the menu chain.
    Select { value: Option<String> },
    /// A submenu trigger: open the nested panel anchored at this row.
    OpenSub { row: usize },
    /// Row is not interactive.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Menu {
    entries: Vec<MenuEntry>,
    rows: Vec<Row>,
    hovered: Option<usize>,
    selected: Option<String>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<MenuEntry>) -> Self {
        let mut menu = Self { entries, ..Self::default() };
        menu.reflow();
        menu
    }

    pub fn entry(mut self, entry: MenuEntry) -> Self {
        self.entries.push(entry);
        self.reflow();
        self
    }

    pub fn item(self, item: MenuItem) -> Self {
        self.entry(MenuEntry::Item(item))
    }

    pub fn label(self, content: impl Into<Content>) -> Self {
        self.entry(MenuEntry::Label { content: content.into(), inset: false })
    }

    pub fn separator(self) -> Self {
        self.entry(MenuEntry::Separator)
    }

    pub fn group(self, entries: Vec<MenuEntry>) -> Self {
        self.entry(MenuEntry::Group(entries))
    }

    pub fn sub(self, sub: SubMenu) -> Self {
        self.entry(MenuEntry::Sub(sub))
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn reflow(&mut self) {
        fn flatten(entries: &[MenuEntry], rows: &mut Vec<Row>) {
            for entry in entries {
                match entry {
                    MenuEntry::Item(item) => rows.push(Row::Item(item.clone())),
                    MenuEntry::Label { content, inset } => {
                        rows.push(Row::Label { content: content.clone(), inset: *inset })
                    }
                    MenuEntry::Separator => rows.push(Row::Separator),
                    MenuEntry::Group(children) => {
                        rows.push(Row::GroupEdge);
                        flatten(children, rows);
                        rows.push(Row::GroupEdge);
                    }
                    MenuEntry::Sub(sub) => rows.push(Row::Sub(sub.clone())),
                }
            }
        }
        self.rows.clear();
        flatten(&self.entries, &mut self.rows);
        self.hovered = None;
    }

    // =====================================================================
    // Hover / activation
    // =====================================================================

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Pointer hover. Non-interactive rows clear the hover.
    pub fn set_hovered(&mut self, row: Option<usize>) {
        self.hovered = row.filter(|&r| self.rows.get(r).is_some_and(Row::is_interactive));
    }

    /// Move hover to the next interactive row, wrapping. Returns true if it changed.
    pub fn move_hover(&mut self, step: Step) -> bool {
        let len = self.rows.len();
        if len == 0 {
            return false;
        }
        let start = match (self.hovered, step) {
            (Some(h), _) => h,
            (None, Step::Next) => len - 1,
            (None, Step::Previous) => 0,
        };
        let mut idx = start;
        for _ in 0..len {
            idx = match step {
                Step::Next => (idx + 1) % len,
                Step::Previous => (idx + len - 1) % len,
            };
            if self.rows[idx].is_interactive() {
                let changed = self.hovered != Some(idx);
                self.hovered = Some(idx);
                return changed;
            }
        }
        false
    }

    pub fn activate(&mut self, row: usize) -> Activation {
        match self.rows.get(row) {
            Some(Row::Item(item)) if !item.disabled => {
                let value = item.selection_value();
                if value.is_some() {
                    self.selected = value.clone();
                }
                Activation::Select { value }
            }
            Some(Row::Sub(_)) => Activation::OpenSub { row },
            _ => Activation::Ignored,
        }
    }

    pub fn activate_hovered(&mut self) -> Activation {
        match self.hovered {
            Some(row) => self.activate(row),
            None => Activation::Ignored,
        }
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn sub_menu(&self, row: usize) -> Option<&SubMenu> {
        match self.rows.get(row) {
            Some(Row::Sub(sub)) => Some(sub),
            _ => None,
        }
    }

    // =====================================================================
    // Geometry
    // =====================================================================

    /// Intrinsic panel size from row metrics and text widths.
    pub fn estimate_size(&self, metrics: &MenuMetrics) -> Size {
        let padding = metrics.panel_padding * 2.0;
        let height: f32 = self.rows.iter().map(|r| r.height(metrics)).sum();
        let width = self.rows.iter().map(|r| r.width(metrics)).fold(0.0_f32, f32::max);
        Size::new((width + padding).max(metrics.min_width), height + padding)
    }

    /// Y offset of `row` from the top of the panel.
    pub fn row_offset(&self, row: usize, metrics: &MenuMetrics) -> f32 {
        metrics.panel_padding + self.rows.iter().take(row).map(|r| r.height(metrics)).sum::<f32>()
    }

    /// Viewport box of a submenu trigger row inside a panel drawn at `panel`.
    pub fn submenu_anchor(&self, row: usize, panel: &Rect, metrics: &MenuMetrics) -> Option<Rect> {
        let sub = self.rows.get(row).filter(|r| matches!(r, Row::Sub(_)))?;
        Some(Rect::new(
            panel.x + metrics.panel_padding,
            panel.y + self.row_offset(row, metrics),
            (panel.width - metrics.panel_padding * 2.0).max(0.0),
            sub.height(metrics),
        ))
    }
}
