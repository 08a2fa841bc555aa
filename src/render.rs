// 🧾 Table Renderer - ordered subset → localized markup
// Every render replaces the whole table body (no diffing)

use crate::criteria::{FeeFilter, FilterCriteria, Presence};
use crate::language::{Language, UiStrings};
use crate::maplink::map_search_url;
use crate::record::BeachRecord;
use std::fmt::Write;

// ============================================================================
// BADGES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    Yes,
    No,
    Free,
    Paid,
}

impl BadgeKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeKind::Yes => "badge badge-yes",
            BadgeKind::No => "badge badge-no",
            BadgeKind::Free => "badge badge-free",
            BadgeKind::Paid => "badge badge-paid",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            BadgeKind::Yes | BadgeKind::Free => "fas fa-check",
            BadgeKind::No => "fas fa-times",
            BadgeKind::Paid => "fas fa-yen-sign",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub kind: BadgeKind,
    pub label: &'static str,
}

fn presence_badge(value: bool, strings: &UiStrings) -> Badge {
    if value {
        Badge {
            kind: BadgeKind::Yes,
            label: strings.badge_has,
        }
    } else {
        Badge {
            kind: BadgeKind::No,
            label: strings.badge_has_not,
        }
    }
}

pub fn lifeguard_badge(beach: &BeachRecord, strings: &UiStrings) -> Badge {
    presence_badge(beach.has_lifeguard, strings)
}

pub fn shower_badge(beach: &BeachRecord, strings: &UiStrings) -> Badge {
    presence_badge(beach.has_shower, strings)
}

pub fn fee_badge(beach: &BeachRecord, strings: &UiStrings) -> Badge {
    if beach.is_free {
        Badge {
            kind: BadgeKind::Free,
            label: strings.badge_free,
        }
    } else {
        Badge {
            kind: BadgeKind::Paid,
            label: strings.badge_paid,
        }
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// What the page shows for one render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub count: usize,
    pub no_results_visible: bool,
    pub body_html: String,
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn badge_cell(badge: Badge) -> String {
    format!(
        r#"<td class="icon-cell"><span class="{}"><i class="{}"></i> {}</span></td>"#,
        badge.kind.css_class(),
        badge.kind.icon(),
        badge.label
    )
}

pub fn render_table(subset: &[BeachRecord], language: Language) -> TableView {
    if subset.is_empty() {
        return TableView {
            count: 0,
            no_results_visible: true,
            body_html: String::new(),
        };
    }

    let strings = language.strings();
    let mut html = String::new();

    for beach in subset {
        let map_url = map_search_url(&beach.name, &beach.address);
        html.push_str("<tr>");
        let _ = write!(
            html,
            r#"<td><a class="beach-name-link" href="{}" target="_blank" rel="noopener">{}</a></td>"#,
            escape_html(&map_url),
            escape_html(&beach.name)
        );
        let _ = write!(
            html,
            r#"<td><div>{}</div><i class="fas fa-map-marker-alt"></i> <small>{}</small></td>"#,
            escape_html(&beach.address),
            strings.region
        );
        let _ = write!(
            html,
            r#"<td><div class="open-time">{}</div></td>"#,
            escape_html(&beach.open_time)
        );
        html.push_str(&badge_cell(lifeguard_badge(beach, strings)));
        html.push_str(&badge_cell(shower_badge(beach, strings)));
        html.push_str(&badge_cell(fee_badge(beach, strings)));
        let _ = write!(
            html,
            r#"<td><div class="note">{}</div></td>"#,
            escape_html(&beach.note)
        );
        html.push_str("</tr>\n");
    }

    TableView {
        count: subset.len(),
        no_results_visible: false,
        body_html: html,
    }
}

// ============================================================================
// PAGE
// ============================================================================

/// Query string carrying the criteria (empty when nothing is filtered)
pub fn criteria_query(criteria: &FilterCriteria) -> String {
    if criteria.is_unfiltered() {
        return String::new();
    }
    format!(
        "?search={}&lifeguard={}&shower={}&fee={}",
        urlencoding::encode(&criteria.search_term),
        criteria.lifeguard.as_str(),
        criteria.shower.as_str(),
        criteria.fee.as_str()
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        value,
        if selected { " selected" } else { "" },
        label
    )
}

fn presence_select(id: &str, label: &str, current: Presence, strings: &UiStrings) -> String {
    format!(
        r#"<label for="{id}">{label}</label><select id="{id}" name="{name}" onchange="this.form.submit()">{}{}{}</select>"#,
        option("all", strings.option_all, current == Presence::All),
        option("yes", strings.option_yes, current == Presence::Yes),
        option("no", strings.option_no, current == Presence::No),
        id = id,
        name = id.trim_end_matches("Filter"),
        label = label,
    )
}

fn fee_select(current: FeeFilter, strings: &UiStrings) -> String {
    format!(
        r#"<label for="feeFilter">{}</label><select id="feeFilter" name="fee" onchange="this.form.submit()">{}{}{}</select>"#,
        strings.fee_label,
        option("all", strings.option_all, current == FeeFilter::All),
        option("free", strings.option_free, current == FeeFilter::Free),
        option("paid", strings.option_paid, current == FeeFilter::Paid),
    )
}

/// Full document for one language variant.
///
/// Static text comes only from the language table, so switching the variant
/// relocalizes every header, placeholder, option label and the footer.
pub fn render_page(language: Language, criteria: &FilterCriteria, view: &TableView) -> String {
    let s = language.strings();
    let other = language.toggle();

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/assets/css/style.css">
</head>
<body>
<header>
<h1>{heading}</h1>
<p class="subtitle">{subtitle}</p>
<a id="langToggle" class="lang-toggle" href="{toggle_href}">{toggle_label}</a>
</header>
<main>
<form class="filters" method="get" action="{action}">
<input id="searchInput" name="search" type="text" placeholder="{placeholder}" value="{search}">
{lifeguard}
{shower}
{fee}
<a id="resetBtn" class="reset-btn" href="{action}">{reset}</a>
</form>
<p class="result-count">{count_label}: <span id="beachCount">{count}</span></p>
<div id="noResults" class="no-results" style="display: {no_results_display}">{no_results}</div>
<table class="beach-table">
<thead><tr><th>{c_name}</th><th>{c_address}</th><th>{c_open}</th><th>{c_lifeguard}</th><th>{c_shower}</th><th>{c_fee}</th><th>{c_note}</th></tr></thead>
<tbody id="beachTableBody">
{body}</tbody>
</table>
</main>
<footer><p>{footer}</p></footer>
</body>
</html>
"#,
        lang = language.tag(),
        title = s.page_title,
        heading = s.heading,
        subtitle = s.subtitle,
        toggle_href = escape_html(&format!("{}{}", other.page_path(), criteria_query(criteria))),
        toggle_label = s.toggle_label,
        action = language.page_path(),
        placeholder = s.search_placeholder,
        search = escape_html(&criteria.search_term),
        lifeguard = presence_select("lifeguardFilter", s.lifeguard_label, criteria.lifeguard, s),
        shower = presence_select("showerFilter", s.shower_label, criteria.shower, s),
        fee = fee_select(criteria.fee, s),
        reset = s.reset_button,
        count_label = s.result_count,
        count = view.count,
        no_results_display = if view.no_results_visible { "block" } else { "none" },
        no_results = s.no_results,
        c_name = s.col_name,
        c_address = s.col_address,
        c_open = s.col_open_time,
        c_lifeguard = s.col_lifeguard,
        c_shower = s.col_shower,
        c_fee = s.col_fee,
        c_note = s.col_note,
        body = view.body_html,
        footer = s.footer,
    );
    html
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{JA, ZH};

    fn beach(name: &str, lifeguard: bool, shower: bool, free: bool) -> BeachRecord {
        BeachRecord {
            name: name.to_string(),
            address: "Chatan".to_string(),
            open_time: "9:00-18:00".to_string(),
            has_lifeguard: lifeguard,
            has_shower: shower,
            is_free: free,
            note: "Parking available".to_string(),
        }
    }

    #[test]
    fn test_empty_subset_shows_no_results() {
        let view = render_table(&[], Language::Zh);
        assert_eq!(view.count, 0);
        assert!(view.no_results_visible);
        assert!(view.body_html.is_empty());
    }

    #[test]
    fn test_one_row_per_record_in_order() {
        let beaches = vec![beach("Araha", true, true, true), beach("Manza", false, true, false)];
        let view = render_table(&beaches, Language::Zh);

        assert_eq!(view.count, 2);
        assert!(!view.no_results_visible);
        assert_eq!(view.body_html.matches("<tr>").count(), 2);
        let araha = view.body_html.find("Araha").unwrap();
        let manza = view.body_html.find("Manza").unwrap();
        assert!(araha < manza);
    }

    #[test]
    fn test_badges_are_localized() {
        let beaches = vec![beach("Araha", true, false, false)];

        let zh = render_table(&beaches, Language::Zh).body_html;
        assert!(zh.contains(r#"<span class="badge badge-yes"><i class="fas fa-check"></i> 有</span>"#));
        assert!(zh.contains(r#"<span class="badge badge-no"><i class="fas fa-times"></i> 无</span>"#));
        assert!(zh.contains(r#"<span class="badge badge-paid"><i class="fas fa-yen-sign"></i> 收费</span>"#));
        assert!(zh.contains("<small>冲绳</small>"));

        let ja = render_table(&beaches, Language::Ja).body_html;
        assert!(ja.contains("あり"));
        assert!(ja.contains("なし"));
        assert!(ja.contains("有料"));
        assert!(ja.contains("<small>沖縄</small>"));
    }

    #[test]
    fn test_badge_helpers() {
        let b = beach("A", false, true, true);
        assert_eq!(lifeguard_badge(&b, &ZH).kind, BadgeKind::No);
        assert_eq!(shower_badge(&b, &JA).label, "あり");
        assert_eq!(fee_badge(&b, &ZH).label, "免费");
        assert_eq!(fee_badge(&b, &JA).kind, BadgeKind::Free);
    }

    #[test]
    fn test_record_text_is_escaped() {
        let mut b = beach("<script>alert(1)</script>", true, true, true);
        b.note = "Tom & Jerry's".to_string();
        let html = render_table(&[b], Language::Zh).body_html;

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Tom &amp; Jerry&#39;s"));
    }

    #[test]
    fn test_name_links_to_map_search() {
        let html = render_table(&[beach("Araha", true, true, true)], Language::Zh).body_html;
        assert!(html.contains("https://www.google.com/maps/search/?api=1&amp;query=Araha%20Chatan%20"));
        assert!(html.contains(r#"target="_blank""#));
    }

    #[test]
    fn test_page_uses_language_table() {
        let view = render_table(&[], Language::Ja);
        let page = render_page(Language::Ja, &FilterCriteria::default(), &view);

        for text in [JA.page_title, JA.search_placeholder, JA.col_open_time, JA.footer, JA.no_results] {
            assert!(page.contains(text), "missing {}", text);
        }
        assert!(!page.contains(ZH.footer));
        assert!(page.contains(r#"style="display: block""#));
        assert!(page.contains(r#"href="/">中文</a>"#));
    }

    #[test]
    fn test_page_reflects_criteria() {
        let criteria = FilterCriteria {
            search_term: "a\"b".to_string(),
            lifeguard: Presence::No,
            shower: Presence::All,
            fee: FeeFilter::Paid,
        };
        let view = render_table(&[beach("A", false, true, false)], Language::Zh);
        let page = render_page(Language::Zh, &criteria, &view);

        assert!(page.contains(r#"value="a&quot;b""#));
        assert!(page.contains(r#"<option value="no" selected>"#));
        assert!(page.contains(r#"<option value="paid" selected>"#));
        assert!(page.contains(r#"<span id="beachCount">1</span>"#));
        assert!(page.contains(r#"style="display: none""#));
        assert!(page.contains("/index-jp.html?search=a%22b&amp;lifeguard=no&amp;shower=all&amp;fee=paid"));
    }

    #[test]
    fn test_criteria_query_empty_when_unfiltered() {
        assert_eq!(criteria_query(&FilterCriteria::default()), "");
    }
}
