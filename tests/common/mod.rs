// tests/common/mod.rs
//
// Scripted PageQuery backend for driving the locator without a browser.
// Element handles encode their role ("row:2", "cell:2:0:3", ...) so the
// fake can answer text/attr/click lookups from its script alone.
#![allow(dead_code)]

use std::collections::HashSet;
use std::time::Duration;

use sietch_watch::query::{Elem, PageQuery, QueryError};

pub struct FakeTab {
    pub label: String,
    pub selected: bool,
}

pub struct FakeRow {
    pub world: String,
    pub has_button: bool,
    pub details: Vec<Vec<String>>,
}

pub struct FakeSite {
    pub tabs: Vec<FakeTab>,
    pub pages: Vec<Vec<FakeRow>>,
    /// Pretend a "next" control exists on every page (the last page just
    /// reloads itself), for pagination-bound scenarios.
    pub endless_next: bool,
    /// goto() ordinals (1-based) that behave like a dead page: every
    /// bounded wait times out until the next navigation.
    pub fail_navs: HashSet<usize>,

    // recordings for assertions
    pub navs: usize,
    pub pages_scanned: Vec<usize>,
    pub tab_clicks: usize,
    pub pauses: usize,

    cur: usize,
    expanded: Option<usize>,
    nav_down: bool,
}

impl FakeSite {
    pub fn new(pages: Vec<Vec<FakeRow>>) -> Self {
        Self {
            tabs: vec![
                FakeTab { label: s("North America"), selected: true },
                FakeTab { label: s("Europe"), selected: false },
            ],
            pages,
            endless_next: false,
            fail_navs: HashSet::new(),
            navs: 0,
            pages_scanned: Vec::new(),
            tab_clicks: 0,
            pauses: 0,
            cur: 0,
            expanded: None,
            nav_down: false,
        }
    }

    pub fn endless_next(mut self) -> Self {
        self.endless_next = true;
        self
    }

    pub fn fail_on(mut self, navs: &[usize]) -> Self {
        self.fail_navs = navs.iter().copied().collect();
        self
    }

    fn has_next(&self) -> bool {
        self.endless_next || self.cur + 1 < self.pages.len()
    }

    fn row(&self, i: usize) -> &FakeRow {
        &self.pages[self.cur][i]
    }
}

/// A world row whose detail panel holds the given rows of cell texts.
pub fn world_row(world: &str, details: Vec<Vec<String>>) -> FakeRow {
    FakeRow { world: s(world), has_button: true, details }
}

/// Typical detail row: [sietch name, status, mode, capacity].
pub fn detail(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| s(c)).collect()
}

fn s(t: &str) -> String {
    String::from(t)
}

fn id(parts: &[&str]) -> Elem {
    Elem(parts.join(":"))
}

fn split(el: &Elem) -> Vec<String> {
    el.0.split(':').map(String::from).collect()
}

impl PageQuery for FakeSite {
    fn goto(&mut self, _url: &str) -> Result<(), QueryError> {
        self.navs += 1;
        self.nav_down = self.fail_navs.contains(&self.navs);
        self.cur = 0;
        self.expanded = None;
        Ok(())
    }

    fn wait_for(&mut self, css: &str, timeout: Duration) -> Result<(), QueryError> {
        let present = !self.nav_down
            && match css {
                r#"[role="tablist"]"# => !self.tabs.is_empty(),
                "table tbody tr" => !self.pages[self.cur].is_empty(),
                _ => false,
            };
        if present {
            Ok(())
        } else {
            Err(QueryError::Timeout { selector: css.to_string(), waited: timeout })
        }
    }

    fn query_all(&mut self, css: &str) -> Result<Vec<Elem>, QueryError> {
        Ok(match css {
            r#"[role="tablist"]"# => vec![Elem(s("tablist"))],
            r#"[role="tablist"] button[role="tab"]"# => (0..self.tabs.len())
                .map(|i| id(&["tab", &i.to_string()]))
                .collect(),
            "table tbody tr" => {
                self.pages_scanned.push(self.cur);
                (0..self.pages[self.cur].len())
                    .map(|i| id(&["row", &i.to_string()]))
                    .collect()
            }
            "button.inline-flex" => {
                if self.has_next() {
                    vec![Elem(s("pager:prev")), Elem(s("pager:next"))]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        })
    }

    fn query_all_in(&mut self, scope: &Elem, css: &str) -> Result<Vec<Elem>, QueryError> {
        let p = split(scope);
        Ok(match (p[0].as_str(), css) {
            ("row", "td:nth-child(2)") => vec![id(&["name", &p[1]])],
            ("row", "button") => {
                let i: usize = p[1].parse().unwrap();
                if self.row(i).has_button {
                    vec![id(&["btn", &p[1]])]
                } else {
                    Vec::new()
                }
            }
            ("panel", "table tr") => {
                let i: usize = p[1].parse().unwrap();
                (0..self.row(i).details.len())
                    .map(|j| id(&["detail", &p[1], &j.to_string()]))
                    .collect()
            }
            ("detail", "td") => {
                let (i, j): (usize, usize) = (p[1].parse().unwrap(), p[2].parse().unwrap());
                (0..self.row(i).details[j].len())
                    .map(|k| id(&["cell", &p[1], &p[2], &k.to_string()]))
                    .collect()
            }
            _ => Vec::new(),
        })
    }

    fn text(&mut self, el: &Elem) -> Result<String, QueryError> {
        let p = split(el);
        Ok(match p[0].as_str() {
            "tab" => self.tabs[p[1].parse::<usize>().unwrap()].label.clone(),
            "name" => self.row(p[1].parse().unwrap()).world.clone(),
            "cell" => {
                let (i, j, k): (usize, usize, usize) = (
                    p[1].parse().unwrap(),
                    p[2].parse().unwrap(),
                    p[3].parse().unwrap(),
                );
                self.row(i).details[j][k].clone()
            }
            _ => String::new(),
        })
    }

    fn attr(&mut self, el: &Elem, name: &str) -> Result<Option<String>, QueryError> {
        let p = split(el);
        if p[0] == "tab" && name == "aria-selected" {
            let sel = self.tabs[p[1].parse::<usize>().unwrap()].selected;
            return Ok(Some(s(if sel { "true" } else { "false" })));
        }
        Ok(None)
    }

    fn click(&mut self, el: &Elem) -> Result<(), QueryError> {
        let p = split(el);
        match p[0].as_str() {
            "tab" => {
                self.tab_clicks += 1;
                let target: usize = p[1].parse().unwrap();
                for (i, t) in self.tabs.iter_mut().enumerate() {
                    t.selected = i == target;
                }
            }
            "pager" if p[1] == "next" => {
                if self.cur + 1 < self.pages.len() {
                    self.cur += 1;
                }
                // endless_next on the last page: the same page reloads
                self.expanded = None;
            }
            "btn" => self.expanded = Some(p[1].parse().unwrap()),
            _ => {}
        }
        Ok(())
    }

    fn next_sibling(&mut self, el: &Elem) -> Result<Option<Elem>, QueryError> {
        let p = split(el);
        if p[0] == "row" && self.expanded == Some(p[1].parse().unwrap()) {
            return Ok(Some(id(&["panel", &p[1]])));
        }
        Ok(None)
    }

    fn pause(&mut self, _d: Duration) {
        self.pauses += 1;
    }
}
