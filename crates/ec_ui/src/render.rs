//! Pure functions from response data to view trees.

use ec_core::{messages, ExposureCheckResponse, SearchResultItem};
use url::Url;

use crate::controller::{FormInput, Phase, SubmitControl};
use crate::view::{Element, Node};

/// Path the page form posts to.
pub const FORM_ACTION: &str = "/check";

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

/// The three regions filled from one successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub summary: Node,
    pub total_count: Node,
    pub list: Node,
}

impl ResultsView {
    /// The visible result panel.
    pub fn into_node(self) -> Node {
        Element::new("section")
            .id("resultArea")
            .class("bg-white rounded-xl shadow p-6 space-y-6")
            .child(self.summary)
            .child(
                Element::new("div")
                    .child(
                        Element::new("h3")
                            .class("text-lg font-semibold text-gray-800 mb-3")
                            .text("검색 결과 ")
                            .child(self.total_count),
                    )
                    .child(self.list),
            )
            .into()
    }
}

pub fn render_results(response: &ExposureCheckResponse) -> ResultsView {
    ResultsView {
        summary: exposure_summary(response),
        total_count: total_count(response),
        list: results_list(response),
    }
}

pub fn exposure_summary(response: &ExposureCheckResponse) -> Node {
    let body = if response.is_exposed {
        exposed_summary(response)
    } else {
        not_exposed_summary(response)
    };
    Element::new("div")
        .id("exposureSummary")
        .child(body)
        .into()
}

fn exposed_summary(response: &ExposureCheckResponse) -> Element {
    let mut summary = Element::new("div")
        .class("text-center")
        .attr("data-exposed", "true")
        .child(status_icon(true))
        .child(
            Element::new("h2")
                .class("text-2xl font-bold text-green-600 mb-2")
                .text(messages::EXPOSED_TITLE),
        )
        .child(keyword_line(&response.keyword, "검색 시", "text-gray-600 mb-4"));

    if let Some(rank) = response.exposed_rank {
        summary = summary.child(
            Element::new("div")
                .class("inline-block bg-green-50 rounded-lg px-6 py-3")
                .attr("data-exposed-rank", rank.to_string())
                .child(
                    Element::new("span")
                        .class("text-4xl font-bold text-green-600")
                        .text(rank.to_string()),
                )
                .child(
                    Element::new("span")
                        .class("text-gray-600")
                        .text(messages::RANK_SUFFIX),
                ),
        );
    }

    if let Some(item) = &response.exposed_result {
        summary = summary.child(exposed_result_card(item));
    }
    summary
}

fn exposed_result_card(item: &SearchResultItem) -> Element {
    Element::new("div")
        .class("mt-4 p-4 bg-gray-50 rounded-lg text-left")
        .child(
            Element::new("p")
                .class("font-semibold text-gray-800 mb-1")
                .text(item.title.clone()),
        )
        .child(
            Element::new("p")
                .class("text-sm text-gray-500")
                .text(byline(item)),
        )
        .child(link(&item.url, "text-sm text-green-600 hover:underline break-all").text(item.url.clone()))
}

fn byline(item: &SearchResultItem) -> String {
    [item.blog_name.as_str(), item.date.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" · ")
}

fn not_exposed_summary(response: &ExposureCheckResponse) -> Element {
    Element::new("div")
        .class("text-center")
        .attr("data-exposed", "false")
        .child(status_icon(false))
        .child(
            Element::new("h2")
                .class("text-2xl font-bold text-red-600 mb-2")
                .text(messages::NOT_EXPOSED_TITLE),
        )
        .child(keyword_line(&response.keyword, "검색 결과", "text-gray-600"))
        .child(
            Element::new("p")
                .class("text-gray-500 text-sm mt-2")
                .text(format!(
                    "상위 {}개 결과에 해당 글이 노출되지 않습니다.",
                    response.total_results
                )),
        )
}

fn keyword_line(keyword: &str, suffix: &str, class: &'static str) -> Element {
    Element::new("p")
        .class(class)
        .text("'")
        .child(
            Element::new("span")
                .class("font-semibold")
                .text(keyword.to_string()),
        )
        .text(format!("' {suffix}"))
}

fn status_icon(exposed: bool) -> Element {
    let (wrapper, color, path) = if exposed {
        ("bg-green-100", "text-green-500", "M5 13l4 4L19 7")
    } else {
        ("bg-red-100", "text-red-500", "M6 18L18 6M6 6l12 12")
    };
    Element::new("div")
        .class(format!(
            "inline-flex items-center justify-center w-16 h-16 {wrapper} rounded-full mb-4"
        ))
        .child(
            Element::new("svg")
                .class(format!("w-8 h-8 {color}"))
                .attr("fill", "none")
                .attr("stroke", "currentColor")
                .attr("viewBox", "0 0 24 24")
                .child(
                    Element::new("path")
                        .attr("stroke-linecap", "round")
                        .attr("stroke-linejoin", "round")
                        .attr("stroke-width", "2")
                        .attr("d", path),
                ),
        )
}

pub fn total_count(response: &ExposureCheckResponse) -> Node {
    Element::new("span")
        .id("totalCount")
        .class("text-sm text-gray-500")
        .text(format!("(총 {}개)", response.total_results))
        .into()
}

/// Ranked list of every result, or a single placeholder when there are none.
pub fn results_list(response: &ExposureCheckResponse) -> Node {
    let list = Element::new("div").id("resultsList").class("space-y-3");
    if response.results.is_empty() {
        return list
            .child(
                Element::new("p")
                    .class("text-center text-gray-500")
                    .attr("data-empty", "true")
                    .text(messages::NO_RESULTS),
            )
            .into();
    }
    list.children(
        response
            .results
            .iter()
            .map(|item| result_item(item, response.is_highlighted(item))),
    )
    .into()
}

fn result_item(item: &SearchResultItem, highlighted: bool) -> Node {
    let (frame, badge) = if highlighted {
        ("border-green-500 bg-green-50", "bg-green-500 text-white")
    } else {
        ("border-gray-200 hover:border-gray-300", "bg-gray-200 text-gray-600")
    };

    let mut meta = Element::new("div")
        .class("flex items-center gap-2 mt-2 text-xs text-gray-500")
        .child(Element::new("span").text(item.blog_name.clone()));
    if !item.date.is_empty() {
        meta = meta
            .child(Element::new("span").text(" · "))
            .child(Element::new("span").text(item.date.clone()));
    }

    let mut row = Element::new("div")
        .class(format!("p-4 border rounded-lg {frame} transition"))
        .attr("data-rank", item.rank.to_string());
    if highlighted {
        row = row.attr("data-highlighted", "true");
    }

    row.child(
        Element::new("div")
            .class("flex items-start gap-3")
            .child(
                Element::new("div")
                    .class(format!(
                        "flex-shrink-0 w-8 h-8 flex items-center justify-center rounded-full {badge} font-semibold text-sm"
                    ))
                    .text(item.rank.to_string()),
            )
            .child(
                Element::new("div")
                    .class("flex-1 min-w-0")
                    .child(
                        link(&item.url, "font-semibold text-gray-800 hover:text-green-600 line-clamp-1")
                            .text(item.title.clone()),
                    )
                    .child(
                        Element::new("p")
                            .class("text-sm text-gray-600 mt-1 line-clamp-2")
                            .text(item.description.clone()),
                    )
                    .child(meta),
            ),
    )
    .into()
}

/// External link opened in a new tab. Only http(s) targets get an `href`;
/// anything else (e.g. `javascript:`) renders as an inert anchor.
fn link(url: &str, class: &'static str) -> Element {
    let anchor = Element::new("a").class(class);
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => anchor
            .attr("href", url)
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer"),
        _ => anchor,
    }
}

pub fn error_panel(message: &str) -> Node {
    Element::new("div")
        .id("errorArea")
        .class("bg-red-50 border border-red-200 rounded-xl p-4")
        .attr("role", "alert")
        .child(
            Element::new("p")
                .id("errorMessage")
                .class("text-red-700")
                .text(message.to_string()),
        )
        .into()
}

pub fn submit_control(control: SubmitControl) -> Node {
    let mut button = Element::new("button")
        .id("submitBtn")
        .attr("type", "submit")
        .class(if control.enabled {
            "w-full bg-green-500 hover:bg-green-600 text-white font-semibold py-3 rounded-lg flex items-center justify-center gap-2"
        } else {
            "w-full bg-green-500 text-white font-semibold py-3 rounded-lg flex items-center justify-center gap-2 opacity-75 cursor-not-allowed"
        });
    if !control.enabled {
        button = button.flag("disabled");
    }
    if control.shows_spinner() {
        button = button.child(
            Element::new("span")
                .id("loadingIcon")
                .class("animate-spin h-5 w-5 border-2 border-white border-t-transparent rounded-full")
                .attr("aria-hidden", "true"),
        );
    }
    button
        .child(Element::new("span").id("btnText").text(control.label()))
        .into()
}

fn text_field(id: &'static str, name: &'static str, label: &'static str, placeholder: &'static str, value: &str) -> Node {
    Element::new("div")
        .child(
            Element::new("label")
                .attr("for", id)
                .class("block text-sm font-medium text-gray-700 mb-1")
                .text(label),
        )
        .child(
            Element::new("input")
                .id(id)
                .attr("name", name)
                .attr("type", "text")
                .attr("placeholder", placeholder)
                .attr("value", value)
                .class("w-full border border-gray-300 rounded-lg px-4 py-2 focus:ring-2 focus:ring-green-500")
                .flag("required"),
        )
        .into()
}

pub fn search_form(input: &FormInput, control: SubmitControl) -> Node {
    Element::new("form")
        .id("searchForm")
        .attr("method", "post")
        .attr("action", FORM_ACTION)
        .class("bg-white rounded-xl shadow p-6 space-y-4")
        .child(text_field("keyword", "keyword", "검색 키워드", "예: 망원동맛집", &input.keyword))
        .child(text_field(
            "blogUrl",
            "blog_url",
            "글 URL",
            "예: https://blog.naver.com/myblog/223000000000",
            &input.blog_url,
        ))
        .child(submit_control(control))
        .into()
}

/// Everything below the form for the given phase: at most one of the error
/// panel and the result panel.
pub fn outcome(phase: &Phase) -> Option<Node> {
    match phase {
        Phase::Idle | Phase::Submitting(_) => None,
        Phase::Failed(error) => Some(error_panel(&error.to_string())),
        Phase::Succeeded(response) => Some(render_results(response).into_node()),
    }
}

pub fn page(input: &FormInput, phase: &Phase) -> Node {
    let mut main = Element::new("main")
        .class("max-w-2xl mx-auto py-10 px-4 space-y-6")
        .child(
            Element::new("header")
                .class("text-center")
                .child(
                    Element::new("h1")
                        .class("text-3xl font-bold text-gray-800")
                        .text("네이버 블로그 노출 체크"),
                )
                .child(
                    Element::new("p")
                        .class("text-gray-500 mt-2")
                        .text("키워드 검색 시 내 글이 몇 위에 노출되는지 확인하세요."),
                ),
        )
        .child(search_form(input, phase.control()));
    if let Some(outcome) = outcome(phase) {
        main = main.child(outcome);
    }

    Element::new("html")
        .attr("lang", "ko")
        .child(
            Element::new("head")
                .child(Element::new("meta").attr("charset", "utf-8"))
                .child(
                    Element::new("meta")
                        .attr("name", "viewport")
                        .attr("content", "width=device-width, initial-scale=1"),
                )
                .child(Element::new("title").text("네이버 블로그 노출 체크"))
                .child(Element::new("script").attr("src", TAILWIND_CDN)),
        )
        .child(Element::new("body").class("bg-gray-100 min-h-screen").child(main))
        .into()
}
