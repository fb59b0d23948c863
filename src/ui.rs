//! The in-memory dashboard page and its UI seams.
//!
//! Instead of initializing a UI framework ambiently, components reach the
//! page through two small traits:
//! - [`Notify`]: transient toast notifications
//! - [`SelectPopulate`]: filling the country and category selects
//!
//! [`Page`] implements both and renders the whole document with
//! [`Page::to_html`].

use crate::loader::Loader;
use crate::models::Query;
use crate::render::NewsContainer;
use chrono::{DateTime, Local};
use itertools::Itertools;
use std::borrow::Cow;
use tracing::{error, info, warn};

/// HTML-escape text or an attribute value.
pub fn escape(raw: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(raw)
}

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    /// CSS classes applied to the toast.
    pub fn css_classes(self) -> &'static str {
        match self {
            NoticeKind::Success => "",
            NoticeKind::Warning => "yellow accent-2 blue-text",
            NoticeKind::Error => "error-msg",
        }
    }
}

/// A single toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

/// Show a user-visible notification.
pub trait Notify {
    fn notify(&mut self, message: &str, kind: NoticeKind);
}

/// Which select control to populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectId {
    Country,
    Category,
}

/// An `<option>` of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Replace the options of a select control.
pub trait SelectPopulate {
    fn populate(&mut self, select: SelectId, options: Vec<SelectOption>);
}

/// Toasts raised during the current trigger.
#[derive(Debug, Default)]
pub struct Toasts {
    notices: Vec<Notice>,
}

impl Toasts {
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }

    fn to_html(&self) -> String {
        self.notices
            .iter()
            .map(|n| {
                format!(
                    r#"    <div class="toast {}">{}</div>"#,
                    n.kind.css_classes(),
                    escape(&n.message)
                )
            })
            .join("\n")
    }
}

impl Notify for Toasts {
    fn notify(&mut self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Success => info!(%message, "Notice"),
            NoticeKind::Warning => warn!(%message, "Notice"),
            NoticeKind::Error => error!(%message, "Notice"),
        }
        self.notices.push(Notice {
            message: message.to_string(),
            kind,
        });
    }
}

/// Current values of the `newsControls` form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub country: String,
    pub category: String,
    pub search: String,
}

impl FormState {
    /// Read the form values as a request [`Query`].
    pub fn query(&self) -> Query {
        Query::new(&self.country, &self.category, &self.search)
    }
}

/// The dashboard document.
#[derive(Debug, Default)]
pub struct Page {
    pub title: String,
    pub form: FormState,
    pub loader: Loader,
    pub toasts: Toasts,
    pub container: NewsContainer,
    countries: Vec<SelectOption>,
    categories: Vec<SelectOption>,
}

impl Page {
    pub fn new(title: &str, form: FormState) -> Self {
        Self {
            title: title.to_string(),
            form,
            ..Default::default()
        }
    }

    pub fn options(&self, select: SelectId) -> &[SelectOption] {
        match select {
            SelectId::Country => &self.countries,
            SelectId::Category => &self.categories,
        }
    }

    /// Render the full HTML document.
    pub fn to_html(&self, generated_at: DateTime<Local>) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("  <meta charset=\"utf-8\">\n");
        html.push_str(&format!("  <title>{}</title>\n", escape(&self.title)));
        html.push_str(
            "  <link rel=\"stylesheet\" href=\"https://cdnjs.cloudflare.com/ajax/libs/materialize/1.0.0/css/materialize.min.css\">\n",
        );
        html.push_str("</head>\n<body>\n");
        if self.loader.is_visible() {
            html.push_str(Loader::MARKUP);
            html.push('\n');
        }
        html.push_str(&format!(
            "  <nav><div class=\"nav-wrapper container\"><span class=\"brand-logo\">{}</span></div></nav>\n",
            escape(&self.title)
        ));
        html.push_str("  <div class=\"container\">\n    <form name=\"newsControls\">\n");
        html.push_str(&select_html(
            "country",
            &self.form.country,
            &self.countries,
        ));
        html.push_str(&select_html(
            "category",
            &self.form.category,
            &self.categories,
        ));
        html.push_str(&format!(
            "      <input type=\"text\" name=\"search\" id=\"search\" value=\"{}\">\n",
            escape(&self.form.search)
        ));
        html.push_str("      <button class=\"btn\" type=\"submit\">Search</button>\n");
        html.push_str("    </form>\n  </div>\n");
        html.push_str("  <div class=\"toasts\">\n");
        html.push_str(&self.toasts.to_html());
        html.push_str("\n  </div>\n");
        html.push_str("  <div class=\"news-container container\">\n    <div class=\"row\">");
        html.push_str(&self.container.inner_html());
        html.push_str("</div>\n  </div>\n");
        html.push_str(&format!(
            "  <footer class=\"page-footer\"><div class=\"container\">Updated {}</div></footer>\n",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        html.push_str("</body>\n</html>\n");
        html
    }
}

fn select_html(name: &str, current: &str, options: &[SelectOption]) -> String {
    let options = options
        .iter()
        .map(|o| {
            let selected = if o.value == current { " selected" } else { "" };
            format!(
                "        <option value=\"{}\"{}>{}</option>",
                escape(&o.value),
                selected,
                escape(&o.label)
            )
        })
        .join("\n");
    format!("      <select name=\"{name}\" id=\"{name}\">\n{options}\n      </select>\n")
}

impl Notify for Page {
    fn notify(&mut self, message: &str, kind: NoticeKind) {
        self.toasts.notify(message, kind);
    }
}

impl SelectPopulate for Page {
    fn populate(&mut self, select: SelectId, options: Vec<SelectOption>) {
        let (slot, current) = match select {
            SelectId::Country => (&mut self.countries, &mut self.form.country),
            SelectId::Category => (&mut self.categories, &mut self.form.category),
        };
        if current.trim().is_empty() {
            if let Some(first) = options.first() {
                *current = first.value.clone();
            }
        }
        info!(?select, count = options.len(), "Populated select");
        *slot = options;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use scraper::{Html, Selector};

    fn option(value: &str, label: &str) -> SelectOption {
        SelectOption {
            value: value.to_string(),
            label: label.to_string(),
        }
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 5, 6, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_notify_records_kind_and_classes() {
        let mut page = Page::default();
        page.notify("No news", NoticeKind::Warning);
        page.notify("Error. Status code: 500", NoticeKind::Error);

        let notices = page.toasts.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].kind.css_classes(), "yellow accent-2 blue-text");
        assert_eq!(notices[1].kind.css_classes(), "error-msg");

        page.toasts.clear();
        assert!(page.toasts.notices().is_empty());
    }

    #[test]
    fn test_populate_selects_first_when_blank() {
        let mut page = Page::new("News", FormState::default());
        page.populate(
            SelectId::Country,
            vec![option("ar", "Argentina"), option("at", "Austria")],
        );
        assert_eq!(page.form.country, "ar");
        assert_eq!(page.options(SelectId::Country).len(), 2);
        assert!(page.options(SelectId::Category).is_empty());
    }

    #[test]
    fn test_populate_keeps_current_value() {
        let form = FormState {
            category: "sports".to_string(),
            ..Default::default()
        };
        let mut page = Page::new("News", form);
        page.populate(
            SelectId::Category,
            vec![option("business", "Business"), option("sports", "Sports")],
        );
        assert_eq!(page.form.category, "sports");
    }

    #[test]
    fn test_to_html_structure() {
        let form = FormState {
            country: "de".to_string(),
            category: String::new(),
            search: "a \"quoted\" <term>".to_string(),
        };
        let mut page = Page::new("News", form);
        page.populate(
            SelectId::Country,
            vec![option("us", "United States"), option("de", "Germany")],
        );
        page.notify("No news", NoticeKind::Warning);
        page.loader.show();

        let html = page.to_html(fixed_time());
        let doc = Html::parse_document(&html);

        let selected = Selector::parse("select#country option[selected]").unwrap();
        let selected: Vec<_> = doc.select(&selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value().attr("value"), Some("de"));

        let search = Selector::parse("input#search").unwrap();
        let input = doc.select(&search).next().unwrap();
        assert_eq!(input.value().attr("value"), Some("a \"quoted\" <term>"));

        let toast = Selector::parse(".toast").unwrap();
        assert_eq!(doc.select(&toast).count(), 1);

        let progress = Selector::parse(".progress .indeterminate").unwrap();
        assert_eq!(doc.select(&progress).count(), 1);

        assert!(html.contains("Updated 2025-05-06 14:30:00"));
    }

    #[test]
    fn test_to_html_without_loader() {
        let page = Page::new("News", FormState::default());
        let html = page.to_html(fixed_time());
        assert!(!html.contains("class=\"progress\""));
    }

    #[test]
    fn test_form_state_query() {
        let form = FormState {
            country: "gb".to_string(),
            category: "health".to_string(),
            search: "  ".to_string(),
        };
        let query = form.query();
        assert_eq!(query.country, "gb");
        assert_eq!(query.search_text, None);
    }
}
