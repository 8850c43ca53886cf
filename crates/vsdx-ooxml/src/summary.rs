//! Extraction summaries
//!
//! [`ExtractionSummary`] is a read-only view computed from an
//! [`ExtractionResult`] for callers that only need counts and presence
//! flags, such as a results table or an analysis prompt.

use serde::Serialize;

use crate::model::{ExtractedData, ExtractionResult, PageSummary};

/// Counts and presence flags derived from an extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionSummary<'a> {
    pub total_pages: usize,
    /// Sum of the element counts of all pages
    pub total_elements: usize,
    pub total_masters: usize,
    pub has_app_properties: bool,
    pub has_document_info: bool,
    pub pages: &'a [PageSummary],
    pub extracted_data: &'a ExtractedData,
}

impl<'a> ExtractionSummary<'a> {
    /// Summarize an extraction result
    pub fn from_result(result: &'a ExtractionResult) -> Self {
        Self {
            total_pages: result.pages.len(),
            total_elements: result.pages.iter().map(|p| p.element_count).sum(),
            total_masters: result.masters.len(),
            has_app_properties: result.extracted_data.has_app_properties(),
            has_document_info: result.extracted_data.has_document_info(),
            pages: &result.pages,
            extracted_data: &result.extracted_data,
        }
    }

    /// The page with the most elements, first one on ties
    pub fn largest_page(&self) -> Option<&'a PageSummary> {
        self.pages.iter().reduce(|best, page| {
            if page.element_count > best.element_count {
                page
            } else {
                best
            }
        })
    }

    /// Render the summary as an analysis request in plain text
    ///
    /// The text lists the totals and every page, followed by the questions
    /// to be answered. Sending it anywhere is up to the caller.
    pub fn analysis_prompt(&self) -> String {
        let mut prompt = String::from(
            "Analyze the following VSDX (Microsoft Visio) file extraction results \
             and provide insights:\n\n",
        );

        prompt.push_str("**Extraction Summary:**\n");
        prompt.push_str(&format!("- Total Pages: {}\n", self.total_pages));
        prompt.push_str(&format!("- Total Elements: {}\n", self.total_elements));
        prompt.push_str(&format!(
            "- Has Application Properties: {}\n",
            self.has_app_properties
        ));
        prompt.push_str(&format!("- Has Document Info: {}\n", self.has_document_info));

        let application = self
            .extracted_data
            .app_properties
            .as_ref()
            .and_then(|props| props.get("Application"));
        if let Some(application) = application {
            prompt.push_str(&format!("- Producing Application: {}\n", application));
        }

        prompt.push_str("\n**Page Details:**\n");
        for (i, page) in self.pages.iter().enumerate() {
            prompt.push_str(&format!(
                "\nPage {}:\n- Name: {}\n- Filename: {}\n- Elements Count: {}\n- Root Tag: {}\n",
                i + 1,
                page.name,
                page.filename,
                page.element_count,
                page.root_tag
            ));
        }

        prompt.push_str(ANALYSIS_REQUEST);
        prompt
    }
}

const ANALYSIS_REQUEST: &str = "
**Analysis Request:**
Please provide a comprehensive analysis covering:

1. **Document Structure Analysis:** overall organization, page complexity, element distribution.
2. **Content Insights:** what kind of diagrams these appear to be and their likely domain.
3. **Technical Assessment:** XML structure quality, data completeness, anomalies.
4. **Recommendations:** next steps for working with the extracted data.
5. **Summary:** key takeaways and an overall assessment of the extraction.

Please format your response in clear sections with markdown formatting for readability.
";

impl ExtractionResult {
    /// Summary view of this result
    pub fn summary(&self) -> ExtractionSummary<'_> {
        ExtractionSummary::from_result(self)
    }
}
