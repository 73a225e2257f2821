//! In-memory reference sources and page builders for tests.
use async_trait::async_trait;
use std::future::Future;

use super::{ReferenceSource, TransportError};

const STUB_LOCATION: &str = "https://example.org/gtfs/reference";

/// Stub [`ReferenceSource`] serving a fixed page or a fixed HTTP failure.
#[derive(Debug, Clone)]
pub struct StubReferenceSource {
    page: Result<String, u16>,
}

impl StubReferenceSource {
    /// Serve `html` on every fetch.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            page: Ok(html.into()),
        }
    }

    /// Fail every fetch with the given HTTP status.
    #[must_use]
    pub const fn failing(status: u16) -> Self {
        Self { page: Err(status) }
    }
}

#[async_trait(?Send)]
impl ReferenceSource for StubReferenceSource {
    fn location(&self) -> &str {
        STUB_LOCATION
    }

    async fn fetch_page(&self) -> Result<String, TransportError> {
        self.page.clone().map_err(|status| TransportError::Http {
            url: STUB_LOCATION.to_owned(),
            status,
            message: "stubbed failure".to_owned(),
        })
    }
}

/// Drive a future to completion on a single-threaded Tokio runtime.
///
/// # Panics
/// Panics when the runtime cannot be built.
pub fn block_on_for_tests<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|err| panic!("failed to build Tokio runtime: {err}"))
        .block_on(future)
}

/// Column rows of one documented file: (name, type label, requirement).
pub type DocumentedColumns<'a> = &'a [(&'a str, &'a str, &'a str)];

/// Render a page shaped like the published reference for the default layout.
///
/// Filler tables occupy original positions 0 and 5; two trailing headings and
/// four trailing tables follow the documented files. The default layout needs
/// at least four documented files, so shorter inputs are padded with
/// column-less files named `unused_<n>`.
#[must_use]
pub fn reference_page(files: &[(&str, DocumentedColumns<'_>)]) -> String {
    let padding: Vec<String> = (files.len()..4).map(|index| format!("unused_{index}")).collect();
    let documented = files
        .iter()
        .map(|&(name, columns)| (name, columns))
        .chain(padding.iter().map(|name| (name.as_str(), &[][..])));

    let mut page = String::from("<html><body>\n");
    push_table(&mut page, &[("term", "definition", "note")]);
    for (index, (name, columns)) in documented.enumerate() {
        if index == 4 {
            push_table(&mut page, &[("example", "value", "note")]);
        }
        push_heading(&mut page, &format!("{name}.txt"));
        push_table(&mut page, columns);
    }
    if files.len() <= 4 {
        push_table(&mut page, &[("example", "value", "note")]);
    }
    push_heading(&mut page, "Dataset attributes");
    push_heading(&mut page, "Example");
    for _ in 0..4 {
        push_table(&mut page, &[("trailing", "value", "note")]);
    }
    page.push_str("</body></html>\n");
    page
}

fn push_heading(page: &mut String, text: &str) {
    let id = text.replace('.', "");
    page.push_str(&format!("<h3 id=\"{id}\">{text}</h3>\n"));
}

fn push_table(page: &mut String, rows: DocumentedColumns<'_>) {
    page.push_str(
        "<table><thead><tr><th>Field Name</th><th>Type</th><th>Presence</th></tr></thead><tbody>\n",
    );
    for (name, type_label, requirement) in rows {
        page.push_str(&format!(
            "<tr><td>{name}</td><td>{type_label}</td><td>{requirement}</td><td>Description</td></tr>\n"
        ));
    }
    page.push_str("</tbody></table>\n");
}
