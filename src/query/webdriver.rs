// src/query/webdriver.rs
// Minimal W3C WebDriver client over plain HTTP + JSON. Talks to a local
// chromedriver (or any conforming driver) and runs the browser headless.
// Only the handful of endpoints the locator needs are implemented.

use std::thread;
use std::time::{Duration, Instant};

use serde_json::{Value, json};

use super::{Elem, PageQuery, QueryError};

/// W3C element identifier key inside element reference objects.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// How often a bounded wait re-polls the page.
const WAIT_POLL_MS: u64 = 250;

/// One browser session. The session (and with it the headless browser tab)
/// is released when this is dropped, on every exit path.
pub struct WebDriverPage {
    agent: ureq::Agent,
    base: String,
    session: String,
}

impl WebDriverPage {
    /// Start a headless session on the WebDriver server at `base`
    /// (e.g. "http://localhost:9515").
    pub fn connect(base: &str) -> Result<Self, QueryError> {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(15))
            .build();
        let caps = json!({
            "capabilities": {
                "alwaysMatch": {
                    "goog:chromeOptions": {
                        "args": ["--headless=new", "--window-size=1280,1024"]
                    }
                }
            }
        });
        let v = send(agent.post(&format!("{base}/session")), Some(caps))?;
        let session = v["value"]["sessionId"]
            .as_str()
            .ok_or_else(|| QueryError::Protocol(s!("no sessionId in new-session reply")))?
            .to_string();
        logd!("WebDriver: session {} on {}", session, base);
        Ok(Self { agent, base: s!(base), session })
    }

    fn endpoint(&self, tail: &str) -> String {
        format!("{}/session/{}{}", self.base, self.session, tail)
    }

    fn post(&self, tail: &str, body: Value) -> Result<Value, QueryError> {
        send(self.agent.post(&self.endpoint(tail)), Some(body))
    }

    fn get(&self, tail: &str) -> Result<Value, QueryError> {
        send(self.agent.get(&self.endpoint(tail)), None)
    }

    fn elems_from(v: &Value) -> Result<Vec<Elem>, QueryError> {
        let arr = v["value"]
            .as_array()
            .ok_or_else(|| QueryError::Protocol(s!("element list reply is not an array")))?;
        let mut out = Vec::with_capacity(arr.len());
        for e in arr {
            out.push(elem_from_ref(e)?);
        }
        Ok(out)
    }
}

impl PageQuery for WebDriverPage {
    fn goto(&mut self, url: &str) -> Result<(), QueryError> {
        self.post("/url", json!({ "url": url })).map(|_| ())
    }

    fn wait_for(&mut self, css: &str, timeout: Duration) -> Result<(), QueryError> {
        let deadline = Instant::now() + timeout;
        loop {
            if !self.query_all(css)?.is_empty() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(QueryError::Timeout { selector: s!(css), waited: timeout });
            }
            thread::sleep(Duration::from_millis(WAIT_POLL_MS));
        }
    }

    fn query_all(&mut self, css: &str) -> Result<Vec<Elem>, QueryError> {
        let v = self.post(
            "/elements",
            json!({ "using": "css selector", "value": css }),
        )?;
        Self::elems_from(&v)
    }

    fn query_all_in(&mut self, scope: &Elem, css: &str) -> Result<Vec<Elem>, QueryError> {
        let v = self.post(
            &format!("/element/{}/elements", scope.0),
            json!({ "using": "css selector", "value": css }),
        )?;
        Self::elems_from(&v)
    }

    fn text(&mut self, el: &Elem) -> Result<String, QueryError> {
        let v = self.get(&format!("/element/{}/text", el.0))?;
        v["value"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| QueryError::Protocol(s!("element text reply is not a string")))
    }

    fn attr(&mut self, el: &Elem, name: &str) -> Result<Option<String>, QueryError> {
        let v = self.get(&format!("/element/{}/attribute/{}", el.0, name))?;
        Ok(v["value"].as_str().map(String::from))
    }

    fn click(&mut self, el: &Elem) -> Result<(), QueryError> {
        self.post(&format!("/element/{}/click", el.0), json!({})).map(|_| ())
    }

    fn next_sibling(&mut self, el: &Elem) -> Result<Option<Elem>, QueryError> {
        let v = self.post(
            "/execute/sync",
            json!({
                "script": "return arguments[0].nextElementSibling;",
                "args": [ { (ELEMENT_KEY): el.0.clone() } ]
            }),
        )?;
        if v["value"].is_null() {
            return Ok(None);
        }
        elem_from_ref(&v["value"]).map(Some)
    }

    fn pause(&mut self, d: Duration) {
        thread::sleep(d);
    }
}

impl Drop for WebDriverPage {
    fn drop(&mut self) {
        let url = self.endpoint("");
        if let Err(e) = self.agent.delete(&url).call() {
            logd!("WebDriver: session delete failed: {}", e);
        }
    }
}

fn elem_from_ref(v: &Value) -> Result<Elem, QueryError> {
    v[ELEMENT_KEY]
        .as_str()
        .map(|id| Elem(s!(id)))
        .ok_or_else(|| QueryError::Protocol(s!("reply is not an element reference")))
}

fn send(req: ureq::Request, body: Option<Value>) -> Result<Value, QueryError> {
    let res = match body {
        Some(b) => req.send_json(b),
        None => req.call(),
    };
    match res {
        Ok(resp) => resp
            .into_json::<Value>()
            .map_err(|e| QueryError::Protocol(e.to_string())),
        Err(ureq::Error::Status(code, resp)) => {
            // Drivers put a human-readable message under value.message
            let detail = resp
                .into_json::<Value>()
                .ok()
                .and_then(|v| v["value"]["message"].as_str().map(String::from))
                .unwrap_or_default();
            Err(QueryError::Protocol(format!("HTTP {code}: {detail}")))
        }
        Err(e) => Err(QueryError::Transport(e.to_string())),
    }
}
