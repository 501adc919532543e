//! In-memory browser used by unit tests

use crate::crawler::browser::{Browser, BrowserError, Navigation};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
enum Outcome {
    Status(u16),
    Timeout,
    Crash,
    Redirect(String),
}

#[derive(Debug, Clone)]
struct FakePage {
    outcome: Outcome,
    anchors: Vec<Option<String>>,
}

/// A site made of hand-written pages
///
/// Unknown URLs answer 404 with no anchors.
#[derive(Debug, Default)]
pub struct FakeSite {
    pages: HashMap<String, FakePage>,
    current: Option<(Url, Vec<Option<String>>)>,
    pub navigations: Vec<String>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// A 200 page with the given hrefs
    pub fn page(mut self, url: &str, hrefs: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            FakePage {
                outcome: Outcome::Status(200),
                anchors: hrefs.iter().map(|h| Some(h.to_string())).collect(),
            },
        );
        self
    }

    /// A page with raw anchors (`None` = anchor without href)
    pub fn raw_page(mut self, url: &str, status: u16, anchors: Vec<Option<&str>>) -> Self {
        self.pages.insert(
            url.to_string(),
            FakePage {
                outcome: Outcome::Status(status),
                anchors: anchors.into_iter().map(|a| a.map(str::to_string)).collect(),
            },
        );
        self
    }

    pub fn timeout(mut self, url: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            FakePage {
                outcome: Outcome::Timeout,
                anchors: Vec::new(),
            },
        );
        self
    }

    pub fn crash(mut self, url: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            FakePage {
                outcome: Outcome::Crash,
                anchors: Vec::new(),
            },
        );
        self
    }

    /// Navigating to `from` lands on `to` (which must also be a page)
    pub fn redirect(mut self, from: &str, to: &str) -> Self {
        self.pages.insert(
            from.to_string(),
            FakePage {
                outcome: Outcome::Redirect(to.to_string()),
                anchors: Vec::new(),
            },
        );
        self
    }

    fn land(&mut self, url: Url, status: u16, anchors: Vec<Option<String>>) -> Navigation {
        self.current = Some((url.clone(), anchors));
        Navigation {
            status,
            final_url: url,
        }
    }
}

#[async_trait]
impl Browser for FakeSite {
    async fn navigate(&mut self, url: &Url, timeout: Duration) -> Result<Navigation, BrowserError> {
        self.navigations.push(url.to_string());
        self.current = None;

        let page = self.pages.get(url.as_str()).cloned();
        match page {
            None => Ok(self.land(url.clone(), 404, Vec::new())),
            Some(FakePage {
                outcome: Outcome::Status(status),
                anchors,
            }) => Ok(self.land(url.clone(), status, anchors)),
            Some(FakePage {
                outcome: Outcome::Timeout,
                ..
            }) => Err(BrowserError::Timeout {
                url: url.to_string(),
                timeout,
            }),
            Some(FakePage {
                outcome: Outcome::Crash,
                ..
            }) => Err(BrowserError::SessionLost("renderer crashed".to_string())),
            Some(FakePage {
                outcome: Outcome::Redirect(target),
                ..
            }) => {
                let target_url = Url::parse(&target).map_err(|e| BrowserError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
                let (status, anchors) = match self.pages.get(&target) {
                    Some(FakePage {
                        outcome: Outcome::Status(status),
                        anchors,
                    }) => (*status, anchors.clone()),
                    _ => (404, Vec::new()),
                };
                Ok(self.land(target_url, status, anchors))
            }
        }
    }

    async fn enumerate_anchors(&mut self) -> Result<Vec<Option<String>>, BrowserError> {
        self.current
            .as_ref()
            .map(|(_, anchors)| anchors.clone())
            .ok_or(BrowserError::NoPage)
    }
}
