//! LLM prompt engineering for order-form extraction

/// Top-level shape requested from providers that support a JSON output mode
pub const SCHEMA_HINT: &str = "object";

/// Builds the extraction prompt for one chunk of document text
///
/// Every chunk gets the same self-contained instructions; reconciling
/// chunks is left to the merge stage.
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder for a chunk
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            EXTRACTION_INSTRUCTIONS.len() + EXTRACTION_RULES.len() + self.text.len() + 16,
        );

        // 1. Field schema with type/enumeration constraints
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Cross-field rules
        prompt.push_str(EXTRACTION_RULES);
        prompt.push_str("\n\n");

        // 3. The text, verbatim
        prompt.push_str("PDF text:\n");
        prompt.push_str(self.text);
        prompt.push('\n');

        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You read text and tables extracted from a payroll services order form.
Use the text and the tables together: when one is incomplete, fill the gap from the other.
Return a single JSON object with exactly these fields:

1. client: object
  - dsp_name: string
  - dsp_code: string
  - dsp_fein: string, digits only (strip spaces and special characters)

2. contacts: array of objects
  - contact_type: "DSP" or "Accounts Payable"
  - name, email, phone, city, address_line_1, address_line_2, postal_code, state: strings
  - country: 3-letter country code inferred from city and state (e.g. "USA")

3. bank_account: object, or null when the document has no bank details
  - bank_name: string
  - routing_number: string, digits only
  - account_number: string, digits only
  - account_type: "Checking" or "Savings"

4. billing_terms: object
  - initial_term_period: string (e.g. "6 months")
  - renewal_term_period: string (e.g. "6 months")
  - billing_frequency: string
  - initial_term_start_date: date "YYYY-MM-DD"
  - initial_term_end_date: date "YYYY-MM-DD"
  - estimated_employee_count: number
  - estimated_total_subscription_fee: number
  - one_time_setup_fee: number

5. plan_catalog: array of objects, one per listed employee range
  - employee_range_label: "01-50" or "51-100" or "100+"
  - employee_range_min: number (101 for the "100+" range)
  - employee_range_max: number (10000 for the "100+" range)
  - one_time_implementation_fee: number
  - weekly_base_fee: number
  - weekly_per_check: number
  - biweekly_base_fee: number
  - biweekly_per_check: number

6. client_selected_plan: object
  - payroll_frequency: "Weekly" or "Bi-Weekly"
  - selected_employee_range: "01-50" or "51-100" or "100+"
  - employee_range_min: number (101 for the "100+" range)
  - employee_range_max: number (10000 for the "100+" range)

7. add_on_modules: array of objects
  - module_name: string
  - fee_per_unit: number
  - unit_type: "Per Employee Per Payroll" or "Per Employee Per Year" or "Per EIN Per Month" or "Per Garnishment Per Payroll"
  - units: number
  - subscription_fee: number
  - subscription_fee_frequency: "Monthly" or "Yearly"

8. additional_notes: string with the content of the additional notes section, or null"#;

const EXTRACTION_RULES: &str = r#"Rules:
- Fees and counts are JSON numbers, not strings. The only exceptions are initial_term_period and renewal_term_period, which are strings.
- Dates use YYYY-MM-DD with zero-padded month and day.
- A field that is not present is null; a list that is not present is [].
- The one-time setup fee (billing_terms) and the one-time implementation fee (plan_catalog) are different values; extract them separately.
- Include at most two contacts: one "DSP" contact and one "Accounts Payable" contact.
- Include every plan listed in the plan catalog.
- Return only the JSON object, with no explanation or extra text."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_text_verbatim() {
        let text = "=== PAGE 1 TEXT ===\nDSP Name: Acme Logistics\n";
        let prompt = PromptBuilder::new(text).build();
        assert!(prompt.contains(text));
        assert!(prompt.ends_with(&format!("PDF text:\n{}\n", text)));
    }

    #[test]
    fn test_prompt_includes_enumerations() {
        let prompt = PromptBuilder::new("x").build();
        assert!(prompt.contains(r#""DSP" or "Accounts Payable""#));
        assert!(prompt.contains(r#""01-50" or "51-100" or "100+""#));
        assert!(prompt.contains("YYYY-MM-DD"));
        assert!(prompt.contains(r#""Checking" or "Savings""#));
    }

    #[test]
    fn test_prompt_names_string_exceptions() {
        let prompt = PromptBuilder::new("x").build();
        assert!(prompt.contains("JSON numbers, not strings"));
        assert!(prompt.contains("initial_term_period and renewal_term_period"));
    }
}
