//! Tab switching and the filter bar.

use tracing::debug;

use crate::page::{Display, Page};

/// Classes carried by the active tab button.
pub const ACTIVE_TAB_CLASSES: [&str; 5] = [
    "active",
    "text-indigo-600",
    "dark:text-indigo-400",
    "border-b-2",
    "border-indigo-600",
];

/// Classes carried by inactive tab buttons.
pub const INACTIVE_TAB_CLASSES: [&str; 2] = ["text-gray-600", "dark:text-gray-400"];

/// Classes carried by the selected filter button.
pub const SELECTED_FILTER_CLASSES: [&str; 2] = ["bg-purple-600", "text-white"];

/// What a tab click changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabSwitch {
    /// Button styles updated and the matching panel shown.
    Switched,
    /// Button styles updated; there is no matching panel.
    StyleOnly,
    /// No button carries that identifier; nothing changed.
    UnknownTab,
}

/// Activates the tab button whose `data-tab` is `tab`.
pub fn activate_tab(page: &mut Page, tab: &str) -> TabSwitch {
    let Some(target) = page.tab_buttons.iter().position(|b| b.tab == tab) else {
        debug!(tab, "click on unknown tab");
        return TabSwitch::UnknownTab;
    };

    for button in &mut page.tab_buttons {
        button.classes.remove(ACTIVE_TAB_CLASSES);
        button.classes.add(INACTIVE_TAB_CLASSES);
    }
    let button = &mut page.tab_buttons[target];
    button.classes.add(ACTIVE_TAB_CLASSES);
    button.classes.remove(INACTIVE_TAB_CLASSES);

    let panel_id = format!("{tab}{}", crate::page::ids::PANEL_SUFFIX);
    if page.tab_panel(&panel_id).is_none() {
        debug!(tab, panel = %panel_id, "tab has no panel");
        return TabSwitch::StyleOnly;
    }

    for panel in &mut page.tab_panels {
        let shown = panel.id == panel_id;
        panel.display = if shown { Display::Block } else { Display::None };
        if shown {
            panel.classes.add(["active"]);
        } else {
            panel.classes.remove(["active"]);
        }
    }

    debug!(tab, "switched tab");
    TabSwitch::Switched
}

/// Marks the filter button `filter` as selected.
///
/// Returns false, leaving the bar untouched, if no button carries `filter`.
pub fn select_filter(page: &mut Page, filter: &str) -> bool {
    if !page.filter_buttons.iter().any(|b| b.filter == filter) {
        return false;
    }
    for button in &mut page.filter_buttons {
        if button.filter == filter {
            button.classes.add(SELECTED_FILTER_CLASSES);
        } else {
            button.classes.remove(SELECTED_FILTER_CLASSES);
        }
    }
    true
}
