// All LLM prompt constants for the emails module.
//
// The wording is a prompt-engineering artifact; the functional contract is
// only the placeholder substitution ({page_data}, {job_description},
// {link_list}) and the output shape each template demands.

/// Job-extraction prompt template. Replace `{page_data}` before sending.
/// The model must answer with a bare JSON array (or a single JSON object
/// when the page holds one posting).
pub const JOB_EXTRACTION_TEMPLATE: &str = r#"### SCRAPED TEXT FROM WEBSITE:
{page_data}

### INSTRUCTION:
The scraped text is from the careers page of a website.
Your job is to extract the job postings and return them in JSON format containing
the following keys: `role`, `experience`, `skills` and `description`.
Only return the valid JSON.

### VALID JSON (NO PREAMBLE):
"#;

/// Email-writing prompt template.
/// Replace `{job_description}` and `{link_list}` before sending.
pub const EMAIL_TEMPLATE: &str = r#"### JOB DESCRIPTION:
{job_description}

### INSTRUCTION:
You are a passionate software developer specializing in AI & software solutions,
eager to contribute your skills and enthusiasm to the company. With hands-on
experience from personal and professional projects, you have helped teams achieve
process automation, improved efficiency, and cost reduction.

Your task is to craft a cold email to the client (potential employer) for the job
described above, highlighting your relevant skills and concrete examples of your
work.

Also, select the most relevant items from your portfolio links here:
{link_list}, and add them as proof of your capabilities.

Do not provide a preamble.

### EMAIL (NO PREAMBLE):
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_template_carries_page_data_placeholder() {
        assert!(JOB_EXTRACTION_TEMPLATE.contains("{page_data}"));
    }

    #[test]
    fn test_email_template_carries_both_placeholders() {
        assert!(EMAIL_TEMPLATE.contains("{job_description}"));
        assert!(EMAIL_TEMPLATE.contains("{link_list}"));
    }
}
