//! In-memory stand-in for the ngx-admin app
//!
//! Answers the selectors the page objects use with canned elements and keeps
//! just enough widget state (menu groups, calendar view, picker inputs, form
//! fields) for the page objects to run against it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use ngx_e2e::locator::Selector;
use ngx_e2e::pages::datepicker::{CALENDAR_LABEL, CALENDAR_NEXT, DAY_CELL};
use ngx_e2e::pages::form_layouts::SUBMIT_BUTTON;
use ngx_e2e::pages::PageSettings;
use ngx_e2e::{Driver, E2eError, E2eResult, ElementHandle};
use ngx_e2e_common::{FixedClock, FormattedDate, MonthYear};

pub const GROUPS: [&str; 3] = ["Forms", "Tables & Data", "Modal & Overlays"];
pub const ITEMS: [(&str, &str); 5] = [
    ("Form Layouts", "Forms"),
    ("Datepicker", "Forms"),
    ("Smart Table", "Tables & Data"),
    ("Toastr", "Modal & Overlays"),
    ("Tooltip", "Modal & Overlays"),
];

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn month(y: i32, m: u32) -> MonthYear {
    MonthYear::new(y, m).unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Picker {
    Form,
    Range,
}

/// A submitted form as the app received it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub form: &'static str,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug)]
pub struct AppState {
    pub today: NaiveDate,
    pub visited: Vec<String>,
    pub page: Option<String>,
    pub expanded: HashMap<String, bool>,
    pub group_clicks: Vec<String>,

    pub open_picker: Option<Picker>,
    pub view: MonthYear,
    /// The forward control stops working once the view reaches this month
    pub view_limit: Option<MonthYear>,
    pub next_clicks: u32,
    /// The next this-many clicks on the forward control are intercepted
    pub intercept_next: u32,
    pub blocked_clicks: u32,
    pub disabled_days: Vec<u32>,
    /// Render the following month's grid after the visible one
    pub two_month_grid: bool,
    pub form_value: String,
    pub range_value: String,
    range_start: Option<NaiveDate>,

    pub fields: HashMap<String, String>,
    pub radio: Option<String>,
    pub remember_me: bool,
    pub submissions: Vec<Submission>,
}

impl AppState {
    fn new(today: NaiveDate) -> Self {
        Self {
            today,
            visited: Vec::new(),
            page: None,
            expanded: GROUPS.iter().map(|g| (g.to_string(), false)).collect(),
            group_clicks: Vec::new(),
            open_picker: None,
            view: MonthYear::of(today),
            view_limit: None,
            next_clicks: 0,
            intercept_next: 0,
            blocked_clicks: 0,
            disabled_days: Vec::new(),
            two_month_grid: false,
            form_value: String::new(),
            range_value: String::new(),
            range_start: None,
            fields: HashMap::new(),
            radio: None,
            remember_me: false,
            submissions: Vec::new(),
        }
    }

    fn on_page(&self, title: &str) -> bool {
        self.page.as_deref() == Some(title)
    }

    fn card_text(id: &str) -> &'static str {
        match id {
            "card:grid" => "Using the Grid Email Password Radios Option 1 Option 2 Disabled Option Sign in",
            _ => "Inline form Remember me Submit",
        }
    }

    fn find(&self, selector: &str, scope: Option<&str>) -> Vec<String> {
        let one = |id: &str| vec![id.to_string()];

        match scope {
            None => {}
            Some("card:grid") => {
                return match selector {
                    "[placeholder=\"Email\"]" => one("grid:email"),
                    "[placeholder=\"Password\"]" => one("grid:password"),
                    "nb-radio" => vec![
                        "grid:radio:Option 1".to_string(),
                        "grid:radio:Option 2".to_string(),
                        "grid:radio:Disabled Option".to_string(),
                    ],
                    SUBMIT_BUTTON => one("grid:submit"),
                    _ => vec![],
                };
            }
            Some("card:inline") => {
                return match selector {
                    "[placeholder=\"Jane Doe\"]" => one("inline:name"),
                    "[placeholder=\"Email\"]" => one("inline:email"),
                    "nb-checkbox input[type=\"checkbox\"]" => one("inline:checkbox-input"),
                    "nb-checkbox" => one("inline:checkbox"),
                    SUBMIT_BUTTON => one("inline:submit"),
                    _ => vec![],
                };
            }
            Some(_) => return vec![],
        }

        let calendar_open = self.open_picker.is_some();
        match selector {
            "[placeholder=\"Form Picker\"]" if self.on_page("Datepicker") => one("input:form"),
            "[placeholder=\"Range Picker\"]" if self.on_page("Datepicker") => one("input:range"),
            CALENDAR_LABEL if calendar_open => one("calendar:label"),
            CALENDAR_NEXT if calendar_open => one("calendar:next"),
            DAY_CELL if calendar_open => {
                let mut cells: Vec<String> = (1..=self.view.days())
                    .filter(|d| !self.disabled_days.contains(d))
                    .map(|d| format!("day:{}", d))
                    .collect();
                if self.two_month_grid {
                    cells.extend((1..=self.view.next().days()).map(|d| format!("next:{}", d)));
                }
                cells
            }
            "nb-card" if self.on_page("Form Layouts") => {
                vec!["card:grid".to_string(), "card:inline".to_string()]
            }
            other => {
                let Some(title) = other
                    .strip_prefix("[title=\"")
                    .and_then(|rest| rest.strip_suffix("\"]"))
                else {
                    return vec![];
                };
                if GROUPS.contains(&title) {
                    return one(&format!("group:{}", title));
                }
                let visible = ITEMS
                    .iter()
                    .any(|(item, group)| *item == title && self.expanded[*group]);
                if visible {
                    one(&format!("item:{}", title))
                } else {
                    vec![]
                }
            }
        }
    }

    fn click(&mut self, id: &str) -> E2eResult<()> {
        if let Some(group) = id.strip_prefix("group:") {
            let expanded = self.expanded.get_mut(group).ok_or_else(|| missing(id))?;
            *expanded = !*expanded;
            self.group_clicks.push(group.to_string());
            return Ok(());
        }
        if let Some(item) = id.strip_prefix("item:") {
            self.page = Some(item.to_string());
            self.open_picker = None;
            return Ok(());
        }
        if let Some(day) = id.strip_prefix("day:") {
            let day = day.parse().map_err(|_| missing(id))?;
            return self.select_day(self.view, day);
        }
        if let Some(day) = id.strip_prefix("next:") {
            let day = day.parse().map_err(|_| missing(id))?;
            return self.select_day(self.view.next(), day);
        }
        if let Some(option) = id.strip_prefix("grid:radio:") {
            if option == "Disabled Option" {
                return Err(E2eError::NotActionable {
                    selector: id.to_string(),
                    reason: "disabled".to_string(),
                });
            }
            self.radio = Some(option.to_string());
            return Ok(());
        }

        match id {
            "input:form" => self.open(Picker::Form),
            "input:range" => self.open(Picker::Range),
            "calendar:next" => {
                if self.intercept_next > 0 {
                    self.intercept_next -= 1;
                    self.blocked_clicks += 1;
                    return Err(E2eError::NotActionable {
                        selector: id.to_string(),
                        reason: "element click intercepted".to_string(),
                    });
                }
                self.next_clicks += 1;
                if self.view_limit.map_or(true, |limit| self.view < limit) {
                    self.view = self.view.next();
                }
            }
            "inline:checkbox" => self.remember_me = !self.remember_me,
            "grid:submit" => {
                let fields = vec![
                    ("email".to_string(), self.field("grid:email")),
                    ("password".to_string(), self.field("grid:password")),
                    ("option".to_string(), self.radio.clone().unwrap_or_default()),
                ];
                self.submissions.push(Submission { form: "grid", fields });
            }
            "inline:submit" => {
                let fields = vec![
                    ("name".to_string(), self.field("inline:name")),
                    ("email".to_string(), self.field("inline:email")),
                    ("remember_me".to_string(), self.remember_me.to_string()),
                ];
                self.submissions.push(Submission { form: "inline", fields });
            }
            "calendar:label" | "card:grid" | "card:inline" | "grid:email" | "grid:password"
            | "inline:name" | "inline:email" | "inline:checkbox-input" => {}
            _ => return Err(missing(id)),
        }
        Ok(())
    }

    fn open(&mut self, picker: Picker) {
        self.open_picker = Some(picker);
        self.view = MonthYear::of(self.today);
        if picker == Picker::Range {
            self.range_start = None;
        }
    }

    fn select_day(&mut self, page: MonthYear, day: u32) -> E2eResult<()> {
        let date = NaiveDate::from_ymd_opt(page.year(), page.month(), day)
            .ok_or_else(|| missing(&format!("day:{}", day)))?;
        let formatted = FormattedDate::from(date);

        match self.open_picker {
            Some(Picker::Form) => {
                self.form_value = formatted.to_string();
                self.open_picker = None;
            }
            Some(Picker::Range) => match self.range_start.take() {
                None => {
                    self.range_start = Some(date);
                    self.range_value = formatted.to_string();
                }
                Some(start) => {
                    self.range_value = format!("{} - {}", FormattedDate::from(start), formatted);
                    self.open_picker = None;
                }
            },
            None => return Err(missing(&format!("day:{}", day))),
        }
        Ok(())
    }

    fn field(&self, id: &str) -> String {
        self.fields.get(id).cloned().unwrap_or_default()
    }

    fn text(&self, id: &str) -> E2eResult<String> {
        if let Some(day) = id.strip_prefix("day:").or_else(|| id.strip_prefix("next:")) {
            return Ok(format!(" {} ", day));
        }
        if let Some(option) = id.strip_prefix("grid:radio:") {
            return Ok(option.to_string());
        }
        if let Some(title) = id.strip_prefix("group:").or_else(|| id.strip_prefix("item:")) {
            return Ok(title.to_string());
        }
        match id {
            "calendar:label" => Ok(format!(" {} {} ", self.view.month_name(), self.view.year())),
            "card:grid" | "card:inline" => Ok(Self::card_text(id).to_string()),
            "grid:submit" => Ok("Sign in".to_string()),
            "inline:submit" => Ok("Submit".to_string()),
            "inline:checkbox" => Ok("Remember me".to_string()),
            _ => Ok(String::new()),
        }
    }

    fn property(&self, id: &str, name: &str) -> Option<String> {
        match (id, name) {
            ("input:form", "value") => Some(self.form_value.clone()),
            ("input:range", "value") => Some(self.range_value.clone()),
            ("inline:checkbox-input", "checked") => Some(self.remember_me.to_string()),
            (_, "value") if self.fields.contains_key(id) => Some(self.field(id)),
            _ => None,
        }
    }
}

fn missing(id: &str) -> E2eError {
    E2eError::ElementNotFound {
        selector: id.to_string(),
    }
}

/// Fake browser page serving the ngx-admin screens
pub struct FakeApp {
    state: Mutex<AppState>,
    timeout: Duration,
}

impl FakeApp {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            state: Mutex::new(AppState::new(today)),
            timeout: Duration::from_secs(1),
        }
    }

    /// App already showing the Datepicker screen
    pub fn on_datepicker(today: NaiveDate) -> Self {
        let app = Self::new(today);
        app.state().page = Some("Datepicker".to_string());
        app
    }

    pub fn state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap()
    }

    pub fn settings(&self, max_calendar_pages: u32) -> PageSettings {
        PageSettings {
            clock: Arc::new(FixedClock(self.state().today)),
            max_calendar_pages,
        }
    }
}

#[async_trait]
impl Driver for FakeApp {
    async fn goto(&self, url: &str) -> E2eResult<()> {
        let mut state = self.state();
        state.visited.push(url.to_string());
        state.page = None;
        state.open_picker = None;
        Ok(())
    }

    async fn find_elements(
        &self,
        selector: &Selector,
        scope: Option<&ElementHandle>,
    ) -> E2eResult<Vec<ElementHandle>> {
        let ids = self
            .state()
            .find(selector.value(), scope.map(|s| s.id()));
        Ok(ids.into_iter().map(ElementHandle::new).collect())
    }

    async fn click(&self, element: &ElementHandle) -> E2eResult<()> {
        self.state().click(element.id())
    }

    async fn text(&self, element: &ElementHandle) -> E2eResult<String> {
        self.state().text(element.id())
    }

    async fn property(&self, element: &ElementHandle, name: &str) -> E2eResult<Option<String>> {
        Ok(self.state().property(element.id(), name))
    }

    async fn attribute(&self, element: &ElementHandle, name: &str) -> E2eResult<Option<String>> {
        let state = self.state();
        let value = element
            .id()
            .strip_prefix("group:")
            .filter(|_| name == "aria-expanded")
            .and_then(|group| state.expanded.get(group))
            .map(|expanded| expanded.to_string());
        Ok(value)
    }

    async fn clear(&self, element: &ElementHandle) -> E2eResult<()> {
        self.state()
            .fields
            .insert(element.id().to_string(), String::new());
        Ok(())
    }

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> E2eResult<()> {
        self.state()
            .fields
            .entry(element.id().to_string())
            .or_default()
            .push_str(text);
        Ok(())
    }

    fn action_timeout(&self) -> Duration {
        self.timeout
    }
}
