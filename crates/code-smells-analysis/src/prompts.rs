/// Prompt templates for the analysis request.
pub struct AnalysisPrompts;

/// Placeholder replaced with the diff under review. The template carries
/// literal braces in its code examples, so interpolation is a plain string
/// replacement rather than `format!`.
const GIT_DIFF_PLACEHOLDER: &str = "{{GIT_DIFF}}";

const ANALYSIS_TEMPLATE: &str = r#"
You are an experienced software engineer tasked with reviewing code changes and identifying potential red flags based on software engineering best practices. Your goal is to analyze a git diff and recognize any issues that may violate good software engineering principles.

Here is the git diff to analyze:

<git_diff>
{{GIT_DIFF}}
</git_diff>

First, familiarize yourself with the following software engineering principles and potential red flags:

<principles>
1. Complexity is incremental: you have to sweat the small stuff.
2. Working code isn't enough.
3. Make continual small investments to improve system design.
4. Modules should be deep.
5. Interfaces should be designed to make the most common usage as simple as possible.
6. It's more important for a module to have a simple interface than a simple implementation.
7. General-purpose modules are deeper.
8. Separate general-purpose and special-purpose code.
9. Different layers should have different abstractions.
10. Pull complexity downward.
11. Define errors out of existence.
12. Design it twice.
13. Comments should describe things that are not obvious from the code.
14. Software should be designed for ease of reading, not ease of writing.
</principles>

<red_flags>
1. Shallow Module: the interface for a class or method isn't much simpler than its implementation.
2. Information Leakage: a design decision is reflected in multiple modules.
3. Temporal Decomposition: the code structure is based on the order in which operations are executed, not on information hiding.
4. Overexposure: An API forces callers to be aware of rarely used features in order to use commonly used features.
5. Pass-Through Method: a method does almost nothing except pass its arguments to another method with a similar signature.
6. Repetition: a nontrivial piece of code is repeated over and over.
7. Special-General Mixture: special-purpose code is not cleanly separated from general purpose code.
8. Conjoined Methods: two methods have so many dependencies that it's hard to understand the implementation of one without understanding the implementation of the other.
9. Comment Repeats Code: all of the information in a comment is immediately obvious from the code next to the comment.
10. Implementation Documentation Contaminates Interface: an interface comment describes implementation details not needed by users of the thing being documented.
11. Vague Name: the name of a variable or method is so imprecise that it doesn't convey much useful information.
12. Hard to Pick Name: it is difficult to come up with a precise and intuitive name for an entity.
13. Hard to Describe: in order to be complete, the documentation for a variable or method must be long.
14. Nonobvious Code: the behavior or meaning of a piece of code cannot be understood easily.
</red_flags>

Present your analysis in the following format:

<output>
<analysis_process>
(Your detailed analysis process here)
</analysis_process>

<red_flags>
<flag>
<description>Brief description of the issue</description>
<location>Specific line(s) or section(s) of code</location>
<explanation>Detailed explanation of why it's a problem</explanation>
<suggestion>Recommendation for improvement</suggestion>
<example_fix>
<![CDATA[
Small code example showing how to fix the issue
]]>
</example_fix>
</flag>
(Repeat the <flag> section for each red flag identified)
</red_flags>

<overall_assessment>
Provide a brief overall assessment of the code changes, summarizing the main issues (if any) and their potential impact on the software project.
</overall_assessment>
</output>

If no red flags are found, replace the <red_flags> section with:

<no_red_flags>
Explanation of why the code changes appear to be following good software engineering practices.
</no_red_flags>
"#;

impl AnalysisPrompts {
    /// Build the review prompt for a single diff.
    pub fn build_analysis_prompt(diff: &str) -> String {
        ANALYSIS_TEMPLATE.replace(GIT_DIFF_PLACEHOLDER, diff)
    }
}
