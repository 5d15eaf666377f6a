//! The meetings page as an explicit view-model.
//!
//! Each element the page script touches is a typed field of [`Page`]; the
//! element identifiers of the markup are in [`ids`]. Elements the markup may
//! lack are `Option`s, and handlers skip what is absent.

use std::fmt;

use meetdesk_core::RenderedBlock;

/// Element identifiers and class hooks of the page markup.
pub mod ids {
    pub const ADD_MEETING_FORM: &str = "addMeetingForm";
    pub const MEETING_TITLE: &str = "meetingTitle";
    pub const MEETING_CATEGORY: &str = "meetingCategory";
    pub const MEETING_DATE: &str = "meetingDate";
    pub const MEETING_TIME: &str = "meetingTime";
    pub const MEETING_DURATION: &str = "meetingDuration";
    pub const MEETING_LINK: &str = "meetingLink";
    pub const MEETING_DESCRIPTION: &str = "meetingDescription";
    pub const MEETINGS_CONTAINER: &str = "meetingsContainer";
    pub const EMPTY_STATE: &str = "emptyStateMeetings";
    pub const TOTAL_MEETINGS: &str = "totalMeetings";
    pub const UPCOMING_MEETINGS: &str = "upcomingMeetings";
    pub const PAST_MEETINGS: &str = "pastMeetings";

    pub const TAB_BUTTON_CLASS: &str = "tab-btn";
    pub const TAB_CONTENT_CLASS: &str = "tab-content";
    pub const FILTER_BUTTON_CLASS: &str = "meeting-filter-btn";
    pub const HIDDEN_CLASS: &str = "hidden";

    /// Suffix appended to a tab identifier to address its panel.
    pub const PANEL_SUFFIX: &str = "-content";
}

/// An ordered set of CSS classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    /// Parses a space-separated `class` attribute.
    pub fn parse(attr: &str) -> Self {
        let mut list = Self::default();
        list.add(attr.split_whitespace());
        list
    }

    /// Adds each class not already present, keeping first-seen order.
    pub fn add<'a>(&mut self, classes: impl IntoIterator<Item = &'a str>) {
        for class in classes {
            if !self.contains(class) {
                self.0.push(class.to_string());
            }
        }
    }

    pub fn remove<'a>(&mut self, classes: impl IntoIterator<Item = &'a str>) {
        for class in classes {
            self.0.retain(|c| c != class);
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn contains_all<'a>(&self, classes: impl IntoIterator<Item = &'a str>) -> bool {
        classes.into_iter().all(|c| self.contains(c))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// Inline `display` style of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// No inline style; the stylesheet decides.
    #[default]
    Unset,
    None,
    Block,
}

/// A `.tab-btn` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabButton {
    /// The `data-tab` attribute.
    pub tab: String,
    pub classes: ClassList,
}

impl TabButton {
    pub fn new(tab: impl Into<String>) -> Self {
        Self {
            tab: tab.into(),
            classes: ClassList::parse(ids::TAB_BUTTON_CLASS),
        }
    }

    pub fn is_active(&self) -> bool {
        self.classes.contains("active")
    }
}

/// A `.tab-content` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPanel {
    pub id: String,
    pub classes: ClassList,
    pub display: Display,
}

impl TabPanel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            classes: ClassList::parse(ids::TAB_CONTENT_CLASS),
            display: Display::Unset,
        }
    }

    /// The panel addressed by tab identifier `tab`.
    pub fn for_tab(tab: &str) -> Self {
        Self::new(format!("{tab}{}", ids::PANEL_SUFFIX))
    }

    pub fn is_shown(&self) -> bool {
        self.display == Display::Block
    }
}

/// A `.meeting-filter-btn` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    /// The `data-filter` attribute.
    pub filter: String,
    pub classes: ClassList,
}

impl FilterButton {
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            classes: ClassList::parse(ids::FILTER_BUTTON_CLASS),
        }
    }
}

/// The inputs of the add-meeting form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Title,
    Category,
    Date,
    Time,
    Duration,
    Link,
    Description,
}

impl FieldId {
    pub const ALL: [FieldId; 7] = [
        Self::Title,
        Self::Category,
        Self::Date,
        Self::Time,
        Self::Duration,
        Self::Link,
        Self::Description,
    ];

    pub fn element_id(&self) -> &'static str {
        match self {
            Self::Title => ids::MEETING_TITLE,
            Self::Category => ids::MEETING_CATEGORY,
            Self::Date => ids::MEETING_DATE,
            Self::Time => ids::MEETING_TIME,
            Self::Duration => ids::MEETING_DURATION,
            Self::Link => ids::MEETING_LINK,
            Self::Description => ids::MEETING_DESCRIPTION,
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.element_id() == id)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// One form input: its current value and the value the markup started with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    pub value: String,
    pub initial: String,
}

impl FormField {
    pub fn with_initial(initial: impl Into<String>) -> Self {
        let initial = initial.into();
        Self {
            value: initial.clone(),
            initial,
        }
    }
}

/// The `#addMeetingForm` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingForm {
    fields: [FormField; 7],
}

impl MeetingForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the markup's initial value of a field (and its current value).
    pub fn with_initial(mut self, field: FieldId, initial: impl Into<String>) -> Self {
        self.fields[field.index()] = FormField::with_initial(initial);
        self
    }

    pub fn value(&self, field: FieldId) -> &str {
        &self.fields[field.index()].value
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        self.fields[field.index()].value = value.into();
    }

    /// Restores every field to its initial value.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clone_from(&field.initial);
        }
    }

    /// Returns true if no field differs from its initial value.
    pub fn is_pristine(&self) -> bool {
        self.fields.iter().all(|f| f.value == f.initial)
    }
}

/// The `#meetingsContainer` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingsContainer {
    pub blocks: Vec<RenderedBlock>,
}

impl MeetingsContainer {
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn append(&mut self, block: RenderedBlock) {
        self.blocks.push(block);
    }

    pub fn inner_html(&self) -> String {
        self.blocks.iter().map(RenderedBlock::outer_html).collect()
    }
}

/// The `#emptyStateMeetings` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub classes: ClassList,
}

impl EmptyState {
    pub fn hidden() -> Self {
        Self {
            classes: ClassList::parse(ids::HIDDEN_CLASS),
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.classes.contains(ids::HIDDEN_CLASS)
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.classes.remove([ids::HIDDEN_CLASS]);
        } else {
            self.classes.add([ids::HIDDEN_CLASS]);
        }
    }
}

impl Default for EmptyState {
    fn default() -> Self {
        Self::hidden()
    }
}

/// A summary display showing one number as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counter {
    pub text: String,
}

impl Counter {
    pub fn set(&mut self, value: usize) {
        self.text = value.to_string();
    }
}

/// Everything on the page the meetings controller reads or writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub tab_buttons: Vec<TabButton>,
    pub tab_panels: Vec<TabPanel>,
    pub filter_buttons: Vec<FilterButton>,
    pub form: Option<MeetingForm>,
    /// Value of the hidden `csrfmiddlewaretoken` input, if the page has one.
    pub csrf_token: Option<String>,
    pub container: Option<MeetingsContainer>,
    pub empty_state: Option<EmptyState>,
    pub total: Option<Counter>,
    pub upcoming: Option<Counter>,
    pub past: Option<Counter>,
}

impl Page {
    /// An empty page with no elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full meetings page: two tabs, the filter bar, the form, the list
    /// and all three counters.
    pub fn standard() -> Self {
        Self::new()
            .with_tab("meetings")
            .with_tab("schedule")
            .with_filters(["all", "upcoming", "past"])
            .with_form(MeetingForm::new().with_initial(FieldId::Category, "work"))
            .with_list()
            .with_counters()
    }

    /// Adds a tab button and its panel.
    pub fn with_tab(mut self, tab: &str) -> Self {
        self.tab_buttons.push(TabButton::new(tab));
        self.tab_panels.push(TabPanel::for_tab(tab));
        self
    }

    /// Adds a tab button with no panel.
    pub fn with_tab_button(mut self, tab: &str) -> Self {
        self.tab_buttons.push(TabButton::new(tab));
        self
    }

    pub fn with_filters<'a>(mut self, filters: impl IntoIterator<Item = &'a str>) -> Self {
        self.filter_buttons
            .extend(filters.into_iter().map(FilterButton::new));
        self
    }

    pub fn with_form(mut self, form: MeetingForm) -> Self {
        self.form = Some(form);
        self
    }

    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Adds the meetings container and its empty-state element.
    pub fn with_list(mut self) -> Self {
        self.container = Some(MeetingsContainer::default());
        self.empty_state = Some(EmptyState::hidden());
        self
    }

    pub fn with_counters(mut self) -> Self {
        self.total = Some(Counter::default());
        self.upcoming = Some(Counter::default());
        self.past = Some(Counter::default());
        self
    }

    pub fn tab_panel(&self, id: &str) -> Option<&TabPanel> {
        self.tab_panels.iter().find(|p| p.id == id)
    }

    /// The button currently marked active, if any.
    pub fn active_tab(&self) -> Option<&str> {
        self.tab_buttons
            .iter()
            .find(|b| b.is_active())
            .map(|b| b.tab.as_str())
    }

    /// Number of blocks currently in the container.
    pub fn rendered_count(&self) -> usize {
        self.container.as_ref().map_or(0, |c| c.blocks.len())
    }

    /// Text of the three counters, in total/upcoming/past order.
    pub fn counter_texts(&self) -> [Option<&str>; 3] {
        [&self.total, &self.upcoming, &self.past].map(|c| c.as_ref().map(|c| c.text.as_str()))
    }
}
